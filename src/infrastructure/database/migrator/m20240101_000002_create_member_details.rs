//! Migration to create member_details table

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(MemberDetails::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(MemberDetails::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(MemberDetails::MemberId)
                            .integer()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(MemberDetails::Profile)
                            .string_len(15)
                            .not_null()
                            .default(""),
                    )
                    .col(ColumnDef::new(MemberDetails::BirthDate).date().null())
                    .col(
                        ColumnDef::new(MemberDetails::Status)
                            .string_len(16)
                            .not_null()
                            .default("PENDING"),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_member_details_member")
                            .from(MemberDetails::Table, MemberDetails::MemberId)
                            .to(Members::Table, Members::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_member_details_profile")
                    .table(MemberDetails::Table)
                    .col(MemberDetails::Profile)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(MemberDetails::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum MemberDetails {
    Table,
    Id,
    MemberId,
    Profile,
    BirthDate,
    Status,
}

#[derive(Iden)]
enum Members {
    Table,
    Id,
}
