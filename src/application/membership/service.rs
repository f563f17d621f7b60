//! Member lifecycle service — application-layer orchestration
//!
//! Sequences duplicate checks, aggregate construction or mutation,
//! persistence and notification. Transport adapters should be thin wrappers
//! that delegate to this service.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::domain::{
    DomainError, DomainResult, Email, Member, MemberCommands, MemberRepository, Notifier,
    PasswordHasher, RegisterMemberDto, UpdateMemberInfoDto,
};

pub const DEFAULT_WELCOME_SUBJECT: &str = "Welcome aboard";

/// Orchestrates registration and lifecycle use cases.
///
/// Each operation touches exactly one aggregate and awaits its steps in
/// order; nothing is spawned.
pub struct MemberService {
    repo: Arc<dyn MemberRepository>,
    hasher: Arc<dyn PasswordHasher>,
    notifier: Arc<dyn Notifier>,
    welcome_subject: String,
}

impl MemberService {
    pub fn new(
        repo: Arc<dyn MemberRepository>,
        hasher: Arc<dyn PasswordHasher>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            repo,
            hasher,
            notifier,
            welcome_subject: DEFAULT_WELCOME_SUBJECT.to_string(),
        }
    }

    pub fn with_welcome_subject(mut self, subject: impl Into<String>) -> Self {
        self.welcome_subject = subject.into();
        self
    }

    // ── Registration ────────────────────────────────────────────

    /// Register a new member in `PENDING` state.
    ///
    /// The email pre-check only saves a round trip; the repository's `save`
    /// is what actually guarantees uniqueness. The welcome message is sent
    /// after the write and its failure does not undo the registration.
    pub async fn register(&self, dto: RegisterMemberDto) -> DomainResult<Member> {
        let email = Email::parse(&dto.email)?;
        if self.repo.find_by_email(&email).await?.is_some() {
            return Err(DomainError::DuplicateEmail(email.to_string()));
        }

        let member = Member::register(dto, self.hasher.as_ref())?;
        let member = self.repo.save(&member).await?;

        info!(
            member_id = ?member.id(),
            email = %member.email(),
            "New member registered"
        );

        self.send_welcome(&member).await;
        Ok(member)
    }

    // ── Lifecycle ───────────────────────────────────────────────

    pub async fn activate(&self, id: i64) -> DomainResult<Member> {
        self.modify(id, "activated", |member| member.activate()).await
    }

    pub async fn deactivate(&self, id: i64) -> DomainResult<Member> {
        self.modify(id, "deactivated", |member| member.deactivate()).await
    }

    pub async fn update_info(&self, id: i64, dto: UpdateMemberInfoDto) -> DomainResult<Member> {
        self.modify(id, "updated", move |member| member.update_info(dto))
            .await
    }

    // ── Helpers ─────────────────────────────────────────────────

    /// Load, mutate through the root, persist.
    ///
    /// The save only lands if nobody wrote the member since it was loaded;
    /// otherwise the repository reports `InvalidState` and nothing changes.
    async fn modify<F>(&self, id: i64, outcome: &'static str, mutate: F) -> DomainResult<Member>
    where
        F: FnOnce(&mut Member) -> DomainResult<()> + Send,
    {
        let mut member = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::member_not_found("id", id))?;

        mutate(&mut member)?;
        let member = self.repo.save(&member).await?;

        info!(member_id = id, status = %member.status(), "Member {}", outcome);
        Ok(member)
    }

    async fn send_welcome(&self, member: &Member) {
        let body = format!(
            "Hi {}, thanks for registering. Your account is pending activation.",
            member.nickname()
        );

        if let Err(e) = self
            .notifier
            .send(member.email(), &self.welcome_subject, &body)
            .await
        {
            warn!(
                member_id = ?member.id(),
                error = %e,
                "Welcome notification failed, registration kept"
            );
        }
    }
}

#[async_trait]
impl MemberCommands for MemberService {
    async fn register(&self, dto: RegisterMemberDto) -> DomainResult<Member> {
        MemberService::register(self, dto).await
    }

    async fn activate(&self, id: i64) -> DomainResult<Member> {
        MemberService::activate(self, id).await
    }

    async fn deactivate(&self, id: i64) -> DomainResult<Member> {
        MemberService::deactivate(self, id).await
    }

    async fn update_info(&self, id: i64, dto: UpdateMemberInfoDto) -> DomainResult<Member> {
        MemberService::update_info(self, id, dto).await
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::domain::{DetailStatus, MemberStatus, Profile};
    use crate::infrastructure::storage::InMemoryMemberRepository;
    use crate::shared::ErrorKind;
    use crate::testing::{
        register_dto, update_dto, FailingNotifier, PlainTextHasher, RecordingNotifier,
    };

    struct Fixture {
        repo: Arc<InMemoryMemberRepository>,
        notifier: Arc<RecordingNotifier>,
        service: MemberService,
    }

    fn fixture() -> Fixture {
        let repo = Arc::new(InMemoryMemberRepository::new());
        let notifier = Arc::new(RecordingNotifier::default());
        let service = MemberService::new(repo.clone(), Arc::new(PlainTextHasher), notifier.clone());
        Fixture {
            repo,
            notifier,
            service,
        }
    }

    /// Pretends the email is free on every pre-check, like a concurrent
    /// registration that has not committed yet.
    struct StalePrecheck(InMemoryMemberRepository);

    #[async_trait]
    impl MemberRepository for StalePrecheck {
        async fn save(&self, member: &Member) -> DomainResult<Member> {
            self.0.save(member).await
        }

        async fn find_by_id(&self, id: i64) -> DomainResult<Option<Member>> {
            self.0.find_by_id(id).await
        }

        async fn find_by_email(&self, _email: &Email) -> DomainResult<Option<Member>> {
            Ok(None)
        }

        async fn find_by_profile(&self, profile: &Profile) -> DomainResult<Option<Member>> {
            self.0.find_by_profile(profile).await
        }
    }

    /// Lets another writer deactivate the member right after every load.
    struct DeactivatedBehindTheLoad(InMemoryMemberRepository);

    #[async_trait]
    impl MemberRepository for DeactivatedBehindTheLoad {
        async fn save(&self, member: &Member) -> DomainResult<Member> {
            self.0.save(member).await
        }

        async fn find_by_id(&self, id: i64) -> DomainResult<Option<Member>> {
            let loaded = self.0.find_by_id(id).await?;
            if let Some(mut other) = loaded.clone() {
                if other.deactivate().is_ok() {
                    self.0.save(&other).await?;
                }
            }
            Ok(loaded)
        }

        async fn find_by_email(&self, email: &Email) -> DomainResult<Option<Member>> {
            self.0.find_by_email(email).await
        }

        async fn find_by_profile(&self, profile: &Profile) -> DomainResult<Option<Member>> {
            self.0.find_by_profile(profile).await
        }
    }

    #[tokio::test]
    async fn register_persists_pending_member() {
        let f = fixture();
        let member = f.service.register(register_dto("a@b.com")).await.unwrap();

        assert_eq!(member.status(), MemberStatus::Pending);
        assert_eq!(member.detail().status(), DetailStatus::Pending);
        assert_eq!(member.email().as_str(), "a@b.com");
        assert!(member.id().is_some());
        assert_eq!(f.repo.len(), 1);
    }

    #[tokio::test]
    async fn register_sends_welcome_after_saving() {
        let f = fixture();
        f.service.register(register_dto("a@b.com")).await.unwrap();

        let sent = f.notifier.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, "a@b.com");
        assert_eq!(sent[0].subject, DEFAULT_WELCOME_SUBJECT);
        assert!(sent[0].body.contains("Hi n"));
    }

    #[tokio::test]
    async fn register_twice_is_duplicate_email() {
        let f = fixture();
        f.service.register(register_dto("a@b.com")).await.unwrap();

        let err = f.service.register(register_dto("a@b.com")).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DuplicateEmail);
        assert_eq!(f.repo.len(), 1);
        assert_eq!(f.notifier.sent().len(), 1);
    }

    #[tokio::test]
    async fn storage_conflict_surfaces_as_duplicate_email() {
        let repo = Arc::new(StalePrecheck(InMemoryMemberRepository::new()));
        let service = MemberService::new(
            repo.clone(),
            Arc::new(PlainTextHasher),
            Arc::new(RecordingNotifier::default()),
        );
        service.register(register_dto("a@b.com")).await.unwrap();

        let err = service.register(register_dto("a@b.com")).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DuplicateEmail);
        assert_eq!(repo.0.len(), 1);
    }

    #[tokio::test]
    async fn register_rejects_invalid_input_without_writing() {
        let f = fixture();
        let err = f.service.register(register_dto("broken")).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);

        let mut dto = register_dto("a@b.com");
        dto.nickname = String::new();
        let err = f.service.register(dto).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);

        assert!(f.repo.is_empty());
        assert!(f.notifier.sent().is_empty());
    }

    #[tokio::test]
    async fn notification_failure_does_not_fail_registration() {
        let repo = Arc::new(InMemoryMemberRepository::new());
        let service =
            MemberService::new(repo.clone(), Arc::new(PlainTextHasher), Arc::new(FailingNotifier));

        let member = service.register(register_dto("a@b.com")).await.unwrap();
        assert_eq!(member.status(), MemberStatus::Pending);
        assert_eq!(repo.len(), 1);
    }

    #[tokio::test]
    async fn activate_then_activate_again() {
        let f = fixture();
        let id = f.service.register(register_dto("a@b.com")).await.unwrap().id().unwrap();

        let member = f.service.activate(id).await.unwrap();
        assert_eq!(member.status(), MemberStatus::Active);
        assert_eq!(member.detail().status(), DetailStatus::Active);

        let err = f.service.activate(id).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidState);

        let stored = f.repo.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(stored.status(), MemberStatus::Active);
    }

    #[tokio::test]
    async fn update_info_before_and_after_activation() {
        let f = fixture();
        let id = f.service.register(register_dto("a@b.com")).await.unwrap().id().unwrap();

        let err = f.service.update_info(id, update_dto("jane")).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidState);
        let stored = f.repo.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(stored.nickname(), "n");

        f.service.activate(id).await.unwrap();
        let member = f.service.update_info(id, update_dto("jane")).await.unwrap();
        assert_eq!(member.nickname(), "Jane");
        assert_eq!(member.detail().profile().as_str(), "jane");
        assert_eq!(member.detail().birth_date(), NaiveDate::from_ymd_opt(1990, 5, 17));

        let stored = f.repo.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(stored, member);
    }

    #[tokio::test]
    async fn concurrent_deactivation_wins_over_stale_update() {
        let repo = Arc::new(DeactivatedBehindTheLoad(InMemoryMemberRepository::new()));
        let service = MemberService::new(
            repo.clone(),
            Arc::new(PlainTextHasher),
            Arc::new(RecordingNotifier::default()),
        );
        let id = service.register(register_dto("a@b.com")).await.unwrap().id().unwrap();
        service.activate(id).await.unwrap();

        let err = service.update_info(id, update_dto("jane")).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidState);

        let stored = repo.0.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(stored.status(), MemberStatus::Inactive);
        assert!(stored.detail().profile().is_unset());
    }

    #[tokio::test]
    async fn update_info_validation_error_keeps_stored_state() {
        let f = fixture();
        let id = f.service.register(register_dto("a@b.com")).await.unwrap().id().unwrap();
        let active = f.service.activate(id).await.unwrap();

        let err = f.service.update_info(id, update_dto("way-too-long-handle")).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(f.repo.find_by_id(id).await.unwrap().unwrap(), active);
    }

    #[tokio::test]
    async fn deactivate_only_after_activation() {
        let f = fixture();
        let id = f.service.register(register_dto("a@b.com")).await.unwrap().id().unwrap();

        let err = f.service.deactivate(id).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidState);

        f.service.activate(id).await.unwrap();
        let member = f.service.deactivate(id).await.unwrap();
        assert_eq!(member.status(), MemberStatus::Inactive);
        assert_eq!(member.detail().status(), DetailStatus::Inactive);

        assert_eq!(
            f.service.activate(id).await.unwrap_err().kind(),
            ErrorKind::InvalidState
        );
    }

    #[tokio::test]
    async fn unknown_id_is_not_found() {
        let f = fixture();
        for err in [
            f.service.activate(7).await.unwrap_err(),
            f.service.deactivate(7).await.unwrap_err(),
            f.service.update_info(7, update_dto("jane")).await.unwrap_err(),
        ] {
            assert_eq!(err.kind(), ErrorKind::NotFound);
        }
    }

    #[tokio::test]
    async fn usable_through_the_inbound_port() {
        let f = fixture();
        let port: &dyn MemberCommands = &f.service;
        let member = port.register(register_dto("a@b.com")).await.unwrap();
        let member = port.activate(member.id().unwrap()).await.unwrap();
        assert!(member.is_active());
    }
}
