//! Request/response types for the users API

pub mod error;
pub mod json;
pub mod response;

pub use error::ApiError;
pub use json::Json;
pub use response::{ApiResponse, ResponseStatus};
