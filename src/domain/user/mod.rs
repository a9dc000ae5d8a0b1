//! User domain module
//!
//! Users have a unique, immutable name and a changeable display name.

mod entity;
mod validation;

pub use entity::{User, UserId};
pub use validation::{
    validate_display_name, validate_user_id, validate_user_name, UserValidationError,
    MAX_DISPLAY_NAME_LENGTH, MAX_USER_NAME_LENGTH,
};
