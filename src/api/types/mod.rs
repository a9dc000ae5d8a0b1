//! Request and response types shared by the endpoints

pub mod envelope;
pub mod error;
pub mod json;
pub mod path;

pub use envelope::{ApiResponse, Envelope, IdPayload, MessagePayload, NoError, SuccessBody};
pub use error::ApiError;
pub use json::Json;
pub use path::Path;
