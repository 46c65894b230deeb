pub mod create;

pub use create::{CreateCarCommand, CreateCarError};
