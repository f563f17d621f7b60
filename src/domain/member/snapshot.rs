//! Flat, persistence-friendly shape of the member aggregate

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::{DetailStatus, MemberStatus};

/// Produced by [`Member::snapshot`](super::Member::snapshot) and consumed by
/// [`Member::restore`](super::Member::restore).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberSnapshot {
    pub id: Option<i64>,
    pub email: String,
    pub nickname: String,
    pub password_hash: String,
    pub status: MemberStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Optimistic concurrency revision, starts at 0.
    pub version: i64,
    pub detail: MemberDetailSnapshot,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberDetailSnapshot {
    pub id: Option<i64>,
    pub profile: String,
    pub birth_date: Option<NaiveDate>,
    pub status: DetailStatus,
}
