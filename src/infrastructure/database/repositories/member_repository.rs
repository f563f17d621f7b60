use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{
    ActiveEnum, ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, DbErr,
    EntityTrait, QueryFilter, QueryOrder, Set, SqlErr, TransactionTrait, UpdateResult,
};
use tracing::{debug, warn};

use crate::domain::{
    DetailStatus, DomainError, DomainResult, Email, Member, MemberDetailSnapshot,
    MemberRepository, MemberSnapshot, MemberStatus, Profile,
};
use crate::infrastructure::database::entities::{member, member_detail};

pub struct SeaOrmMemberRepository {
    db: DatabaseConnection,
}

impl SeaOrmMemberRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn entity_status_to_domain(status: member::MemberStatus) -> MemberStatus {
    match status {
        member::MemberStatus::Pending => MemberStatus::Pending,
        member::MemberStatus::Active => MemberStatus::Active,
        member::MemberStatus::Inactive => MemberStatus::Inactive,
    }
}

fn domain_status_to_entity(status: MemberStatus) -> member::MemberStatus {
    match status {
        MemberStatus::Pending => member::MemberStatus::Pending,
        MemberStatus::Active => member::MemberStatus::Active,
        MemberStatus::Inactive => member::MemberStatus::Inactive,
    }
}

fn entity_detail_status_to_domain(status: member_detail::DetailStatus) -> DetailStatus {
    match status {
        member_detail::DetailStatus::Pending => DetailStatus::Pending,
        member_detail::DetailStatus::Active => DetailStatus::Active,
        member_detail::DetailStatus::Inactive => DetailStatus::Inactive,
    }
}

fn domain_detail_status_to_entity(status: DetailStatus) -> member_detail::DetailStatus {
    match status {
        DetailStatus::Pending => member_detail::DetailStatus::Pending,
        DetailStatus::Active => member_detail::DetailStatus::Active,
        DetailStatus::Inactive => member_detail::DetailStatus::Inactive,
    }
}

fn rows_to_domain(
    row: member::Model,
    detail: Option<member_detail::Model>,
) -> DomainResult<Member> {
    let Some(detail) = detail else {
        return Err(DomainError::Infrastructure(format!(
            "member {} has no detail row",
            row.id
        )));
    };

    Member::restore(MemberSnapshot {
        id: Some(row.id),
        email: row.email,
        nickname: row.nickname,
        password_hash: row.password_hash,
        status: entity_status_to_domain(row.status),
        created_at: row.created_at,
        updated_at: row.updated_at,
        version: row.version,
        detail: MemberDetailSnapshot {
            id: Some(detail.id),
            profile: detail.profile,
            birth_date: detail.birth_date,
            status: entity_detail_status_to_domain(detail.status),
        },
    })
}

fn db_err(e: DbErr) -> DomainError {
    DomainError::Infrastructure(format!("Database error: {}", e))
}

/// The only unique column written through `save` is the member email.
fn save_err(email: &str, e: DbErr) -> DomainError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => DomainError::DuplicateEmail(email.to_string()),
        _ => db_err(e),
    }
}

// ── Writes (inside one transaction) ─────────────────────────────

async fn insert_aggregate(
    txn: &DatabaseTransaction,
    snapshot: MemberSnapshot,
) -> DomainResult<(member::Model, member_detail::Model)> {
    let new_member = member::ActiveModel {
        id: NotSet,
        email: Set(snapshot.email.clone()),
        nickname: Set(snapshot.nickname),
        password_hash: Set(snapshot.password_hash),
        status: Set(domain_status_to_entity(snapshot.status)),
        created_at: Set(snapshot.created_at),
        updated_at: Set(snapshot.updated_at),
        version: Set(snapshot.version),
    };
    let row = new_member
        .insert(txn)
        .await
        .map_err(|e| save_err(&snapshot.email, e))?;

    let new_detail = member_detail::ActiveModel {
        id: NotSet,
        member_id: Set(row.id),
        profile: Set(snapshot.detail.profile),
        birth_date: Set(snapshot.detail.birth_date),
        status: Set(domain_detail_status_to_entity(snapshot.detail.status)),
    };
    let detail = new_detail.insert(txn).await.map_err(db_err)?;

    Ok((row, detail))
}

/// The root row is only overwritten while it still carries the revision the
/// caller loaded, and moves to the next revision in the same statement.
async fn update_aggregate(
    txn: &DatabaseTransaction,
    id: i64,
    snapshot: MemberSnapshot,
) -> DomainResult<(member::Model, member_detail::Model)> {
    let expected = snapshot.version;
    let result: UpdateResult = member::Entity::update_many()
        .col_expr(member::Column::Email, Expr::value(snapshot.email.clone()))
        .col_expr(member::Column::Nickname, Expr::value(snapshot.nickname))
        .col_expr(member::Column::PasswordHash, Expr::value(snapshot.password_hash))
        .col_expr(
            member::Column::Status,
            Expr::value(domain_status_to_entity(snapshot.status).to_value()),
        )
        .col_expr(member::Column::UpdatedAt, Expr::value(snapshot.updated_at))
        .col_expr(member::Column::Version, Expr::value(expected + 1))
        .filter(member::Column::Id.eq(id))
        .filter(member::Column::Version.eq(expected))
        .exec(txn)
        .await
        .map_err(|e| save_err(&snapshot.email, e))?;

    if result.rows_affected == 0 {
        let exists = member::Entity::find_by_id(id)
            .one(txn)
            .await
            .map_err(db_err)?
            .is_some();
        if !exists {
            return Err(DomainError::member_not_found("id", id));
        }
        warn!(member_id = id, expected, "Rejected write from a stale member copy");
        return Err(DomainError::stale_member(id));
    }

    let row = member::Entity::find_by_id(id)
        .one(txn)
        .await
        .map_err(db_err)?
        .ok_or_else(|| DomainError::member_not_found("id", id))?;

    let existing_detail = member_detail::Entity::find()
        .filter(member_detail::Column::MemberId.eq(id))
        .one(txn)
        .await
        .map_err(db_err)?
        .ok_or_else(|| DomainError::Infrastructure(format!("member {} has no detail row", id)))?;

    let mut detail: member_detail::ActiveModel = existing_detail.into();
    detail.profile = Set(snapshot.detail.profile);
    detail.birth_date = Set(snapshot.detail.birth_date);
    detail.status = Set(domain_detail_status_to_entity(snapshot.detail.status));
    let detail = detail.update(txn).await.map_err(db_err)?;

    Ok((row, detail))
}

// ── Repository implementation ───────────────────────────────────

#[async_trait]
impl MemberRepository for SeaOrmMemberRepository {
    async fn save(&self, member: &Member) -> DomainResult<Member> {
        let snapshot = member.snapshot();
        let txn = self.db.begin().await.map_err(db_err)?;

        // Dropping `txn` on an early return rolls both rows back.
        let (row, detail) = match snapshot.id {
            None => insert_aggregate(&txn, snapshot).await?,
            Some(id) => update_aggregate(&txn, id, snapshot).await?,
        };

        txn.commit().await.map_err(db_err)?;
        rows_to_domain(row, Some(detail))
    }

    async fn find_by_id(&self, id: i64) -> DomainResult<Option<Member>> {
        let found = member::Entity::find_by_id(id)
            .find_also_related(member_detail::Entity)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        found.map(|(row, detail)| rows_to_domain(row, detail)).transpose()
    }

    async fn find_by_email(&self, email: &Email) -> DomainResult<Option<Member>> {
        let found = member::Entity::find()
            .filter(member::Column::Email.eq(email.as_str()))
            .find_also_related(member_detail::Entity)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        found.map(|(row, detail)| rows_to_domain(row, detail)).transpose()
    }

    async fn find_by_profile(&self, profile: &Profile) -> DomainResult<Option<Member>> {
        if profile.is_unset() {
            return Ok(None);
        }

        let found = member_detail::Entity::find()
            .filter(member_detail::Column::Profile.eq(profile.as_str()))
            .order_by_asc(member_detail::Column::MemberId)
            .find_also_related(member::Entity)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        debug!(profile = %profile, found = found.is_some(), "Profile lookup");

        match found {
            Some((detail, Some(row))) => rows_to_domain(row, Some(detail)).map(Some),
            Some((detail, None)) => Err(DomainError::Infrastructure(format!(
                "detail {} references a missing member",
                detail.id
            ))),
            None => Ok(None),
        }
    }
}
