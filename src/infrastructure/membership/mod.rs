//! Membership infrastructure - team/user link stores

mod in_memory;
mod postgres;

pub use in_memory::InMemoryMembershipRepository;
pub use postgres::PostgresMembershipRepository;

use crate::domain::user::UserId;

/// Drop repeated ids while keeping the first occurrence in place
pub(crate) fn dedup_preserving_order(user_ids: &[UserId]) -> Vec<UserId> {
    let mut unique: Vec<UserId> = Vec::with_capacity(user_ids.len());
    for id in user_ids {
        if !unique.contains(id) {
            unique.push(id.clone());
        }
    }
    unique
}
