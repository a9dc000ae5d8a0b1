//! PostgreSQL membership repository backed by the `team_members` table

use async_trait::async_trait;
use sqlx::postgres::PgPool;

use super::dedup_preserving_order;
use crate::domain::team::TeamId;
use crate::domain::user::UserId;
use crate::domain::{DomainError, MembershipRepository};

#[derive(Debug, Clone)]
pub struct PostgresMembershipRepository {
    pool: PgPool,
}

impl PostgresMembershipRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn to_strings(user_ids: &[UserId]) -> Vec<String> {
    user_ids.iter().map(|id| id.as_str().to_string()).collect()
}

/// Keep the caller's ordering for ids reported back by RETURNING
fn in_request_order(requested: Vec<UserId>, returned: &[String]) -> Vec<UserId> {
    requested
        .into_iter()
        .filter(|id| returned.iter().any(|r| r == id.as_str()))
        .collect()
}

fn map_error(err: sqlx::Error, action: &str) -> DomainError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_foreign_key_violation() {
            return DomainError::validation("Membership refers to an unknown team or user");
        }
    }

    DomainError::storage(format!("Failed to {} memberships: {}", action, err))
}

fn decode_ids<T, E: std::fmt::Display>(
    rows: Vec<String>,
    parse: impl Fn(String) -> Result<T, E>,
) -> Result<Vec<T>, DomainError> {
    rows.into_iter()
        .map(|raw| {
            parse(raw).map_err(|e| DomainError::storage(format!("Corrupt membership row: {}", e)))
        })
        .collect()
}

#[async_trait]
impl MembershipRepository for PostgresMembershipRepository {
    async fn add(&self, team_id: &TeamId, user_ids: &[UserId]) -> Result<Vec<UserId>, DomainError> {
        let requested = dedup_preserving_order(user_ids);

        let inserted: Vec<String> = sqlx::query_scalar(
            r#"
            INSERT INTO team_members (team_id, user_id)
            SELECT $1, u.user_id
            FROM UNNEST($2::text[]) WITH ORDINALITY AS u(user_id, ord)
            ORDER BY u.ord
            ON CONFLICT (team_id, user_id) DO NOTHING
            RETURNING user_id
            "#,
        )
        .bind(team_id.as_str())
        .bind(to_strings(&requested))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_error(e, "add"))?;

        Ok(in_request_order(requested, &inserted))
    }

    async fn remove(
        &self,
        team_id: &TeamId,
        user_ids: &[UserId],
    ) -> Result<Vec<UserId>, DomainError> {
        let requested = dedup_preserving_order(user_ids);

        let deleted: Vec<String> = sqlx::query_scalar(
            r#"
            DELETE FROM team_members
            WHERE team_id = $1 AND user_id = ANY($2)
            RETURNING user_id
            "#,
        )
        .bind(team_id.as_str())
        .bind(to_strings(&requested))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_error(e, "remove"))?;

        Ok(in_request_order(requested, &deleted))
    }

    async fn user_ids(&self, team_id: &TeamId) -> Result<Vec<UserId>, DomainError> {
        let rows: Vec<String> =
            sqlx::query_scalar("SELECT user_id FROM team_members WHERE team_id = $1 ORDER BY seq")
                .bind(team_id.as_str())
                .fetch_all(&self.pool)
                .await
                .map_err(|e| map_error(e, "list"))?;

        decode_ids(rows, |raw| UserId::new(raw))
    }

    async fn team_ids(&self, user_id: &UserId) -> Result<Vec<TeamId>, DomainError> {
        let rows: Vec<String> =
            sqlx::query_scalar("SELECT team_id FROM team_members WHERE user_id = $1 ORDER BY seq")
                .bind(user_id.as_str())
                .fetch_all(&self.pool)
                .await
                .map_err(|e| map_error(e, "list"))?;

        decode_ids(rows, |raw| TeamId::new(raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_returned_ids_follow_request_order() {
        let (a, b, c) = (UserId::generate(), UserId::generate(), UserId::generate());
        let returned = vec![c.as_str().to_string(), a.as_str().to_string()];

        let ordered = in_request_order(vec![a.clone(), b, c.clone()], &returned);
        assert_eq!(ordered, vec![a, c]);
    }

    #[test]
    fn test_corrupt_rows_surface_as_storage_errors() {
        let result = decode_ids(vec!["not-a-uuid".to_string()], |raw| UserId::new(raw));
        assert!(matches!(result, Err(DomainError::Storage { .. })));
    }
}
