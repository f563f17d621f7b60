//! Outbound ports — capabilities the core needs from infrastructure
//!
//! [`PasswordHasher`] is used by the member factory, [`Notifier`] by the
//! registration use case. Repositories live next to their aggregate
//! (see [`MemberRepository`](crate::domain::MemberRepository)).

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{DomainResult, Email};

/// Turns plaintext credentials into stored hashes and checks them.
pub trait PasswordHasher: Send + Sync {
    fn hash(&self, plaintext: &str) -> DomainResult<String>;

    fn verify(&self, plaintext: &str, credential: &str) -> DomainResult<bool>;
}

#[derive(Debug, Error)]
pub enum NotificationError {
    #[error("Notification delivery failed: {0}")]
    Delivery(String),
}

/// Best-effort outbound messaging.
///
/// Callers of the use-case layer never see a [`NotificationError`]; the
/// orchestrator logs and drops it.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, to: &Email, subject: &str, body: &str) -> Result<(), NotificationError>;
}
