//! Read-only member lookups

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::{
    DomainError, DomainResult, Email, Member, MemberQueries, MemberRepository, Profile,
};

/// Lookups through the repository port. Never mutates.
///
/// A key that cannot be a valid email or profile handle cannot match any
/// member, so it is reported as not found rather than as a validation error.
pub struct MemberFinder {
    repo: Arc<dyn MemberRepository>,
}

impl MemberFinder {
    pub fn new(repo: Arc<dyn MemberRepository>) -> Self {
        Self { repo }
    }

    pub async fn find_by_id(&self, id: i64) -> DomainResult<Member> {
        debug!(member_id = id, "Looking up member");
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::member_not_found("id", id))
    }

    pub async fn find_by_email(&self, email: &str) -> DomainResult<Member> {
        let Ok(parsed) = Email::parse(email) else {
            return Err(DomainError::member_not_found("email", email));
        };
        self.repo
            .find_by_email(&parsed)
            .await?
            .ok_or_else(|| DomainError::member_not_found("email", email))
    }

    pub async fn find_by_profile(&self, profile: &str) -> DomainResult<Member> {
        let parsed = match Profile::parse(profile) {
            Ok(parsed) if !parsed.is_unset() => parsed,
            _ => return Err(DomainError::member_not_found("profile", profile)),
        };
        self.repo
            .find_by_profile(&parsed)
            .await?
            .ok_or_else(|| DomainError::member_not_found("profile", profile))
    }
}

#[async_trait]
impl MemberQueries for MemberFinder {
    async fn find_by_id(&self, id: i64) -> DomainResult<Member> {
        MemberFinder::find_by_id(self, id).await
    }

    async fn find_by_email(&self, email: &str) -> DomainResult<Member> {
        MemberFinder::find_by_email(self, email).await
    }

    async fn find_by_profile(&self, profile: &str) -> DomainResult<Member> {
        MemberFinder::find_by_profile(self, profile).await
    }
}
