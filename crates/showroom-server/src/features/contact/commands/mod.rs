pub mod send;

pub use send::{ContactReceipt, SendContactCommand, SendContactError, RECEIPT_MESSAGE};
