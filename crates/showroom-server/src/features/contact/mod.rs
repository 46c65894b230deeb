pub mod commands;
pub mod routes;

pub use commands::{ContactReceipt, SendContactCommand, SendContactError, RECEIPT_MESSAGE};
pub use routes::{contact_routes, ContactState};
