//! Team domain module
//!
//! Teams group users through memberships. A team has a unique name and an admin.

mod entity;
mod validation;

pub use entity::{Team, TeamId};
pub use validation::{
    validate_team_admin, validate_team_description, validate_team_id, validate_team_name,
    TeamValidationError, MAX_TEAM_DESCRIPTION_LENGTH, MAX_TEAM_NAME_LENGTH,
};

/// Maximum number of user ids accepted by a single add-members request
pub const MAX_USERS_PER_REQUEST: usize = 50;
