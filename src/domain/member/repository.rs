//! Member repository interface

use async_trait::async_trait;

use super::{Email, Member, Profile};
use crate::domain::DomainResult;

/// Persistence port for the member aggregate.
///
/// `save` writes the root and its detail atomically and is the authoritative
/// email uniqueness check: a conflicting email surfaces as
/// [`DomainError::DuplicateEmail`](crate::domain::DomainError::DuplicateEmail).
#[async_trait]
pub trait MemberRepository: Send + Sync {
    /// Persist the aggregate, assigning identities when it is new.
    async fn save(&self, member: &Member) -> DomainResult<Member>;

    async fn find_by_id(&self, id: i64) -> DomainResult<Option<Member>>;
    async fn find_by_email(&self, email: &Email) -> DomainResult<Option<Member>>;
    async fn find_by_profile(&self, profile: &Profile) -> DomainResult<Option<Member>>;
}
