//! User infrastructure module

mod service;

pub use service::{CreateUserRequest, UpdateUserRequest, UserService};
