//! Test doubles shared by unit tests across the crate.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::{
    DomainResult, Email, NotificationError, Notifier, PasswordHasher, RegisterMemberDto,
    UpdateMemberInfoDto,
};

/// Prefixes instead of hashing so tests stay fast and readable.
pub struct PlainTextHasher;

impl PasswordHasher for PlainTextHasher {
    fn hash(&self, plaintext: &str) -> DomainResult<String> {
        Ok(format!("hashed:{}", plaintext))
    }

    fn verify(&self, plaintext: &str, credential: &str) -> DomainResult<bool> {
        Ok(credential == format!("hashed:{}", plaintext))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentMessage {
    pub to: String,
    pub subject: String,
    pub body: String,
}

#[derive(Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<SentMessage>>,
}

impl RecordingNotifier {
    pub fn sent(&self) -> Vec<SentMessage> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send(&self, to: &Email, subject: &str, body: &str) -> Result<(), NotificationError> {
        self.sent.lock().unwrap().push(SentMessage {
            to: to.to_string(),
            subject: subject.to_string(),
            body: body.to_string(),
        });
        Ok(())
    }
}

pub struct FailingNotifier;

#[async_trait]
impl Notifier for FailingNotifier {
    async fn send(&self, _to: &Email, _subject: &str, _body: &str) -> Result<(), NotificationError> {
        Err(NotificationError::Delivery("mail relay unreachable".into()))
    }
}

pub fn register_dto(email: &str) -> RegisterMemberDto {
    RegisterMemberDto {
        email: email.to_string(),
        nickname: "n".to_string(),
        password: "p".to_string(),
    }
}

pub fn update_dto(profile: &str) -> UpdateMemberInfoDto {
    UpdateMemberInfoDto {
        nickname: "Jane".to_string(),
        profile: profile.to_string(),
        birth_date: NaiveDate::from_ymd_opt(1990, 5, 17),
    }
}
