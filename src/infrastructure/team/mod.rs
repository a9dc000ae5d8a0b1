//! Team infrastructure implementations

mod service;

pub use service::{CreateTeamRequest, TeamMember, TeamService, UpdateTeamRequest};
