//! Membership domain - the association between teams and users

mod repository;

pub use repository::MembershipRepository;

#[cfg(test)]
pub use repository::MockMembershipRepository;
