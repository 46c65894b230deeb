pub mod commands;
pub mod queries;
pub mod routes;

pub use commands::{CreateCarCommand, CreateCarError};
pub use queries::CarQueryError;
pub use routes::cars_routes;
