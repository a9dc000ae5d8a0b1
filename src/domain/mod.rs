//! Domain layer - Core entities, validation rules and storage contracts

pub mod error;
pub mod membership;
pub mod storage;
pub mod team;
pub mod user;

pub use error::DomainError;
pub use membership::MembershipRepository;
pub use storage::{Storage, StorageEntity, StorageKey};
pub use team::{Team, TeamId, TeamValidationError, MAX_USERS_PER_REQUEST};
pub use user::{User, UserId, UserValidationError};
