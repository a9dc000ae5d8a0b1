//! In-memory membership repository

use std::sync::RwLock;

use async_trait::async_trait;

use super::dedup_preserving_order;
use crate::domain::team::TeamId;
use crate::domain::user::UserId;
use crate::domain::{DomainError, MembershipRepository};

/// Membership pairs in the order they were added
#[derive(Debug, Default)]
pub struct InMemoryMembershipRepository {
    members: RwLock<Vec<(TeamId, UserId)>>,
}

impl InMemoryMembershipRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, Vec<(TeamId, UserId)>>, DomainError> {
        self.members
            .read()
            .map_err(|e| DomainError::storage(format!("Failed to acquire read lock: {}", e)))
    }

    fn write(
        &self,
    ) -> Result<std::sync::RwLockWriteGuard<'_, Vec<(TeamId, UserId)>>, DomainError> {
        self.members
            .write()
            .map_err(|e| DomainError::storage(format!("Failed to acquire write lock: {}", e)))
    }
}

#[async_trait]
impl MembershipRepository for InMemoryMembershipRepository {
    async fn add(&self, team_id: &TeamId, user_ids: &[UserId]) -> Result<Vec<UserId>, DomainError> {
        let mut members = self.write()?;
        let mut added = Vec::new();

        for user_id in dedup_preserving_order(user_ids) {
            let exists = members
                .iter()
                .any(|(team, user)| team == team_id && *user == user_id);

            if !exists {
                members.push((team_id.clone(), user_id.clone()));
                added.push(user_id);
            }
        }

        Ok(added)
    }

    async fn remove(
        &self,
        team_id: &TeamId,
        user_ids: &[UserId],
    ) -> Result<Vec<UserId>, DomainError> {
        let mut members = self.write()?;
        let mut removed = Vec::new();

        for user_id in dedup_preserving_order(user_ids) {
            if let Some(position) = members
                .iter()
                .position(|(team, user)| team == team_id && *user == user_id)
            {
                members.remove(position);
                removed.push(user_id);
            }
        }

        Ok(removed)
    }

    async fn user_ids(&self, team_id: &TeamId) -> Result<Vec<UserId>, DomainError> {
        Ok(self
            .read()?
            .iter()
            .filter(|(team, _)| team == team_id)
            .map(|(_, user)| user.clone())
            .collect())
    }

    async fn team_ids(&self, user_id: &UserId) -> Result<Vec<TeamId>, DomainError> {
        Ok(self
            .read()?
            .iter()
            .filter(|(_, user)| user == user_id)
            .map(|(team, _)| team.clone())
            .collect())
    }
}
