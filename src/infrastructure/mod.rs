//! Infrastructure layer - storage backends, services and observability

pub mod logging;
pub mod membership;
pub mod observability;
pub mod storage;
pub mod team;
pub mod user;
