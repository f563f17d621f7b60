//! In-memory member repository

use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tracing::debug;

use crate::domain::{
    DomainError, DomainResult, Email, Member, MemberRepository, MemberSnapshot, Profile,
};

/// In-memory storage for development and testing.
///
/// Holds one snapshot per member, so root and detail are always written
/// together. The email index is claimed through the map's entry API, which
/// makes `save` the authoritative uniqueness check.
pub struct InMemoryMemberRepository {
    members: DashMap<i64, MemberSnapshot>,
    email_index: DashMap<String, i64>,
    member_counter: AtomicI64,
    detail_counter: AtomicI64,
}

impl InMemoryMemberRepository {
    pub fn new() -> Self {
        Self {
            members: DashMap::new(),
            email_index: DashMap::new(),
            member_counter: AtomicI64::new(1),
            detail_counter: AtomicI64::new(1),
        }
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    fn insert_new(&self, mut snapshot: MemberSnapshot) -> DomainResult<Member> {
        match self.email_index.entry(snapshot.email.clone()) {
            Entry::Occupied(_) => Err(DomainError::DuplicateEmail(snapshot.email)),
            Entry::Vacant(slot) => {
                let id = self.member_counter.fetch_add(1, Ordering::SeqCst);
                snapshot.id = Some(id);
                snapshot.detail.id = Some(self.detail_counter.fetch_add(1, Ordering::SeqCst));
                let member = Member::restore(snapshot.clone())?;
                self.members.insert(id, snapshot);
                slot.insert(id);
                Ok(member)
            }
        }
    }

    /// Overwrites the stored snapshot only if it is still at the revision the
    /// caller loaded. The check and the write happen under the entry lock.
    fn replace(&self, id: i64, snapshot: MemberSnapshot) -> DomainResult<Member> {
        let expected = snapshot.version;
        let next = MemberSnapshot {
            version: expected + 1,
            ..snapshot
        };
        let member = Member::restore(next.clone())?;
        let Some(mut stored) = self.members.get_mut(&id) else {
            return Err(DomainError::member_not_found("id", id));
        };

        if stored.version != expected {
            debug!(member_id = id, expected, stored = stored.version, "Stale member write");
            return Err(DomainError::stale_member(id));
        }

        if stored.email != next.email {
            match self.email_index.entry(next.email.clone()) {
                Entry::Occupied(_) => return Err(DomainError::DuplicateEmail(next.email)),
                Entry::Vacant(slot) => {
                    slot.insert(id);
                }
            }
            self.email_index.remove(&stored.email);
        }

        *stored = next;
        Ok(member)
    }

    fn load(&self, id: i64) -> DomainResult<Option<Member>> {
        self.members
            .get(&id)
            .map(|entry| Member::restore(entry.value().clone()))
            .transpose()
    }
}

impl Default for InMemoryMemberRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MemberRepository for InMemoryMemberRepository {
    async fn save(&self, member: &Member) -> DomainResult<Member> {
        let snapshot = member.snapshot();
        match snapshot.id {
            None => self.insert_new(snapshot),
            Some(id) => self.replace(id, snapshot),
        }
    }

    async fn find_by_id(&self, id: i64) -> DomainResult<Option<Member>> {
        self.load(id)
    }

    async fn find_by_email(&self, email: &Email) -> DomainResult<Option<Member>> {
        let id = self.email_index.get(email.as_str()).map(|entry| *entry.value());
        match id {
            Some(id) => self.load(id),
            None => Ok(None),
        }
    }

    async fn find_by_profile(&self, profile: &Profile) -> DomainResult<Option<Member>> {
        if profile.is_unset() {
            return Ok(None);
        }
        let found = self
            .members
            .iter()
            .filter(|entry| entry.detail.profile == profile.as_str())
            .min_by_key(|entry| *entry.key())
            .map(|entry| entry.value().clone());
        debug!(profile = %profile, found = found.is_some(), "Profile lookup");
        found.map(Member::restore).transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MemberStatus;
    use crate::shared::ErrorKind;
    use crate::testing::{register_dto, update_dto, PlainTextHasher};

    fn new_member(email: &str) -> Member {
        Member::register(register_dto(email), &PlainTextHasher).unwrap()
    }

    #[tokio::test]
    async fn save_assigns_identities() {
        let repo = InMemoryMemberRepository::new();
        let saved = repo.save(&new_member("a@b.com")).await.unwrap();
        assert_eq!(saved.id(), Some(1));
        assert_eq!(saved.detail().id(), Some(1));

        let second = repo.save(&new_member("c@d.com")).await.unwrap();
        assert_eq!(second.id(), Some(2));
    }

    #[tokio::test]
    async fn save_enforces_unique_email() {
        let repo = InMemoryMemberRepository::new();
        repo.save(&new_member("a@b.com")).await.unwrap();
        let err = repo.save(&new_member("a@b.com")).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DuplicateEmail);
        assert_eq!(repo.len(), 1);
    }

    #[tokio::test]
    async fn save_updates_existing_aggregate() {
        let repo = InMemoryMemberRepository::new();
        let mut member = repo.save(&new_member("a@b.com")).await.unwrap();
        member.activate().unwrap();
        member.update_info(update_dto("jane")).unwrap();
        let saved = repo.save(&member).await.unwrap();
        assert_eq!(saved.version(), member.version() + 1);

        let loaded = repo.find_by_id(member.id().unwrap()).await.unwrap().unwrap();
        assert_eq!(loaded, saved);
        assert_eq!(repo.len(), 1);
    }

    #[tokio::test]
    async fn stale_copy_cannot_revive_inactive_member() {
        let repo = InMemoryMemberRepository::new();
        let mut member = repo.save(&new_member("a@b.com")).await.unwrap();
        member.activate().unwrap();
        let id = repo.save(&member).await.unwrap().id().unwrap();

        let mut stale = repo.find_by_id(id).await.unwrap().unwrap();
        let mut fresh = repo.find_by_id(id).await.unwrap().unwrap();
        fresh.deactivate().unwrap();
        repo.save(&fresh).await.unwrap();

        stale.update_info(update_dto("jane")).unwrap();
        let err = repo.save(&stale).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidState);

        let stored = repo.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(stored.status(), MemberStatus::Inactive);
        assert!(stored.detail().profile().is_unset());
    }

    #[tokio::test]
    async fn only_one_of_two_racing_activations_lands() {
        let repo = InMemoryMemberRepository::new();
        let id = repo.save(&new_member("a@b.com")).await.unwrap().id().unwrap();

        let mut first = repo.find_by_id(id).await.unwrap().unwrap();
        let mut second = repo.find_by_id(id).await.unwrap().unwrap();
        first.activate().unwrap();
        second.activate().unwrap();

        repo.save(&first).await.unwrap();
        let err = repo.save(&second).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidState);
        assert_eq!(repo.find_by_id(id).await.unwrap().unwrap().version(), 1);
    }

    #[tokio::test]
    async fn lookups_by_email_and_profile() {
        let repo = InMemoryMemberRepository::new();
        let mut member = repo.save(&new_member("a@b.com")).await.unwrap();
        member.activate().unwrap();
        member.update_info(update_dto("jane")).unwrap();
        repo.save(&member).await.unwrap();

        let email = Email::parse("a@b.com").unwrap();
        assert!(repo.find_by_email(&email).await.unwrap().is_some());

        let profile = Profile::parse("jane").unwrap();
        let found = repo.find_by_profile(&profile).await.unwrap().unwrap();
        assert_eq!(found.id(), member.id());

        assert!(repo.find_by_profile(&Profile::unset()).await.unwrap().is_none());
        assert!(repo.find_by_id(42).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn saving_unknown_id_is_not_found() {
        let repo = InMemoryMemberRepository::new();
        let mut snapshot = new_member("a@b.com").snapshot();
        snapshot.id = Some(99);
        let ghost = Member::restore(snapshot).unwrap();
        let err = repo.save(&ghost).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }
}
