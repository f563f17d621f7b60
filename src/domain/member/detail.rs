//! Member detail, the child record owned by [`Member`](super::Member).
//!
//! Mutators are `pub(super)`: only the aggregate root can reach them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::Profile;

/// Detail lifecycle status. Always mirrors the root's [`MemberStatus`](super::MemberStatus).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DetailStatus {
    Pending,
    Active,
    Inactive,
}

impl DetailStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Active => "ACTIVE",
            Self::Inactive => "INACTIVE",
        }
    }
}

impl std::fmt::Display for DetailStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberDetail {
    id: Option<i64>,
    profile: Profile,
    birth_date: Option<NaiveDate>,
    status: DetailStatus,
}

impl MemberDetail {
    pub(super) fn create() -> Self {
        Self {
            id: None,
            profile: Profile::unset(),
            birth_date: None,
            status: DetailStatus::Pending,
        }
    }

    pub(super) fn restore(
        id: Option<i64>,
        profile: Profile,
        birth_date: Option<NaiveDate>,
        status: DetailStatus,
    ) -> Self {
        Self {
            id,
            profile,
            birth_date,
            status,
        }
    }

    pub(super) fn activate(&mut self) {
        self.status = DetailStatus::Active;
    }

    pub(super) fn deactivate(&mut self) {
        self.status = DetailStatus::Inactive;
    }

    pub(super) fn update_info(&mut self, profile: Profile, birth_date: Option<NaiveDate>) {
        self.profile = profile;
        self.birth_date = birth_date;
    }

    /// Identity assigned by the repository; `None` until first save.
    pub fn id(&self) -> Option<i64> {
        self.id
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn birth_date(&self) -> Option<NaiveDate> {
        self.birth_date
    }

    pub fn status(&self) -> DetailStatus {
        self.status
    }
}
