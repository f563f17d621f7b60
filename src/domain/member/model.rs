//! Member aggregate root

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::detail::{DetailStatus, MemberDetail};
use super::snapshot::{MemberDetailSnapshot, MemberSnapshot};
use super::{Email, Profile, RegisterMemberDto, UpdateMemberInfoDto};
use crate::domain::ports::PasswordHasher;
use crate::domain::{DomainError, DomainResult};

/// Member lifecycle status.
///
/// Transitions only move forward: `Pending -> Active -> Inactive`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MemberStatus {
    Pending,
    Active,
    Inactive,
}

impl MemberStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Active => "ACTIVE",
            Self::Inactive => "INACTIVE",
        }
    }

    /// The detail status that mirrors this root status.
    pub fn mirrored(&self) -> DetailStatus {
        match self {
            Self::Pending => DetailStatus::Pending,
            Self::Active => DetailStatus::Active,
            Self::Inactive => DetailStatus::Inactive,
        }
    }
}

impl std::fmt::Display for MemberStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Member aggregate. Owns exactly one [`MemberDetail`].
///
/// Every change goes through the methods below; there is no way to build a
/// `Member` that skipped validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    id: Option<i64>,
    email: Email,
    nickname: String,
    password_hash: String,
    status: MemberStatus,
    detail: MemberDetail,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    version: i64,
}

impl Member {
    /// Build a new `PENDING` member from a registration request.
    ///
    /// Only I/O performed is the injected hasher call.
    pub fn register(dto: RegisterMemberDto, hasher: &dyn PasswordHasher) -> DomainResult<Self> {
        let email = Email::parse(&dto.email)?;
        let nickname = require_nickname(&dto.nickname)?;
        let password_hash = hasher.hash(&dto.password)?;

        let now = Utc::now();
        Ok(Self {
            id: None,
            email,
            nickname,
            password_hash,
            status: MemberStatus::Pending,
            detail: MemberDetail::create(),
            created_at: now,
            updated_at: now,
            version: 0,
        })
    }

    pub fn activate(&mut self) -> DomainResult<()> {
        self.ensure_status(MemberStatus::Pending, "activate")?;
        self.status = MemberStatus::Active;
        self.detail.activate();
        self.touch();
        Ok(())
    }

    pub fn deactivate(&mut self) -> DomainResult<()> {
        self.ensure_status(MemberStatus::Active, "deactivate")?;
        self.status = MemberStatus::Inactive;
        self.detail.deactivate();
        self.touch();
        Ok(())
    }

    /// Replace nickname, profile and birth date. Requires `ACTIVE`.
    ///
    /// All input is validated before anything is written, so a failure
    /// leaves the member untouched.
    pub fn update_info(&mut self, dto: UpdateMemberInfoDto) -> DomainResult<()> {
        self.ensure_status(MemberStatus::Active, "update")?;
        let nickname = require_nickname(&dto.nickname)?;
        let profile = Profile::parse(&dto.profile)?;

        self.nickname = nickname;
        self.detail.update_info(profile, dto.birth_date);
        self.touch();
        Ok(())
    }

    pub fn verify_password(&self, plaintext: &str, hasher: &dyn PasswordHasher) -> DomainResult<bool> {
        hasher.verify(plaintext, &self.password_hash)
    }

    /// Identity assigned by the repository; `None` until first save.
    pub fn id(&self) -> Option<i64> {
        self.id
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn nickname(&self) -> &str {
        &self.nickname
    }

    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }

    pub fn status(&self) -> MemberStatus {
        self.status
    }

    pub fn detail(&self) -> &MemberDetail {
        &self.detail
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Stored revision this copy was loaded at. Repositories refuse to
    /// overwrite a newer revision, and bump it on every successful save.
    pub fn version(&self) -> i64 {
        self.version
    }

    pub fn is_active(&self) -> bool {
        self.status == MemberStatus::Active
    }

    /// Flat copy of the aggregate for persistence adapters.
    pub fn snapshot(&self) -> MemberSnapshot {
        MemberSnapshot {
            id: self.id,
            email: self.email.as_str().to_string(),
            nickname: self.nickname.clone(),
            password_hash: self.password_hash.clone(),
            status: self.status,
            created_at: self.created_at,
            updated_at: self.updated_at,
            version: self.version,
            detail: MemberDetailSnapshot {
                id: self.detail.id(),
                profile: self.detail.profile().as_str().to_string(),
                birth_date: self.detail.birth_date(),
                status: self.detail.status(),
            },
        }
    }

    /// Rebuild an aggregate from persisted data.
    ///
    /// Value types are validated again and the detail status must mirror the
    /// root status.
    pub fn restore(snapshot: MemberSnapshot) -> DomainResult<Self> {
        let email = Email::parse(&snapshot.email)?;
        let profile = Profile::parse(&snapshot.detail.profile)?;
        if snapshot.detail.status != snapshot.status.mirrored() {
            return Err(DomainError::Validation(format!(
                "member {} has status {} but its detail is {}",
                snapshot.id.map_or_else(|| "<new>".to_string(), |id| id.to_string()),
                snapshot.status,
                snapshot.detail.status
            )));
        }

        Ok(Self {
            id: snapshot.id,
            email,
            nickname: snapshot.nickname,
            password_hash: snapshot.password_hash,
            status: snapshot.status,
            detail: MemberDetail::restore(
                snapshot.detail.id,
                profile,
                snapshot.detail.birth_date,
                snapshot.detail.status,
            ),
            created_at: snapshot.created_at,
            updated_at: snapshot.updated_at,
            version: snapshot.version,
        })
    }

    fn ensure_status(&self, expected: MemberStatus, action: &str) -> DomainResult<()> {
        if self.status != expected {
            return Err(DomainError::InvalidState(format!(
                "cannot {} member {}: not in {} state (currently {})",
                action,
                self.email,
                expected,
                self.status
            )));
        }
        Ok(())
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// Nicknames are stored without surrounding whitespace.
fn require_nickname(raw: &str) -> DomainResult<String> {
    let nickname = raw.trim();
    if nickname.is_empty() {
        return Err(DomainError::Validation("nickname is required".into()));
    }
    Ok(nickname.to_string())
}

// ── Tests ──────────────────────────────────────────────────────
