//! Inbound ports — the use cases transport adapters call
//!
//! [`MemberService`](crate::application::MemberService) implements
//! [`MemberCommands`], [`MemberFinder`](crate::application::MemberFinder)
//! implements [`MemberQueries`]. Every error carries a stable
//! [`ErrorKind`](crate::shared::ErrorKind) for the adapter to map.

use async_trait::async_trait;

use crate::domain::{DomainResult, Member, RegisterMemberDto, UpdateMemberInfoDto};

/// Lifecycle operations. Each call mutates at most one aggregate.
#[async_trait]
pub trait MemberCommands: Send + Sync {
    async fn register(&self, dto: RegisterMemberDto) -> DomainResult<Member>;
    async fn activate(&self, id: i64) -> DomainResult<Member>;
    async fn deactivate(&self, id: i64) -> DomainResult<Member>;
    async fn update_info(&self, id: i64, dto: UpdateMemberInfoDto) -> DomainResult<Member>;
}

/// Read-only lookups. A miss is `NotFound`, never `Ok(None)`.
#[async_trait]
pub trait MemberQueries: Send + Sync {
    async fn find_by_id(&self, id: i64) -> DomainResult<Member>;
    async fn find_by_email(&self, email: &str) -> DomainResult<Member>;
    async fn find_by_profile(&self, profile: &str) -> DomainResult<Member>;
}
