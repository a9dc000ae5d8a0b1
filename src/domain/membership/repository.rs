//! Membership repository trait

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use crate::domain::team::TeamId;
use crate::domain::user::UserId;
use crate::domain::DomainError;

/// Repository for team memberships
///
/// A membership links one team to one user. Each pair exists at most once, and
/// listings come back in the order the memberships were added.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait MembershipRepository: Send + Sync {
    /// Adds the given users to a team, skipping pairs that already exist.
    /// Returns the users that were newly added.
    async fn add(&self, team_id: &TeamId, user_ids: &[UserId]) -> Result<Vec<UserId>, DomainError>;

    /// Removes the given users from a team only. Returns the users that were removed.
    async fn remove(
        &self,
        team_id: &TeamId,
        user_ids: &[UserId],
    ) -> Result<Vec<UserId>, DomainError>;

    /// Lists the members of a team
    async fn user_ids(&self, team_id: &TeamId) -> Result<Vec<UserId>, DomainError>;

    /// Lists the teams a user belongs to
    async fn team_ids(&self, user_id: &UserId) -> Result<Vec<TeamId>, DomainError>;
}
