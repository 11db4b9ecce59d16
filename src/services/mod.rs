// Service exports
pub mod request;

pub use request::{RequestClient, RequestError};
