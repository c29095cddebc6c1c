//! Create user table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(User::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(User::Id).big_integer().not_null().primary_key())
                    .col(ColumnDef::new(User::Username).string_len(128).not_null().default(""))
                    .col(ColumnDef::new(User::Nickname).string_len(256).not_null().default(""))
                    .col(ColumnDef::new(User::Tier).integer().not_null().default(0))
                    .col(ColumnDef::new(User::Level).integer().not_null().default(0))
                    .col(ColumnDef::new(User::IsBanned).boolean().not_null().default(false))
                    .col(ColumnDef::new(User::SubmittedCount).integer().not_null().default(0))
                    .col(ColumnDef::new(User::AcceptedCount).integer().not_null().default(0))
                    .col(ColumnDef::new(User::RejectedCount).integer().not_null().default(0))
                    .col(ColumnDef::new(User::ReviewedCount).integer().not_null().default(0))
                    .col(
                        ColumnDef::new(User::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(User::ModifiedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Index: username (name lookup during target resolution)
        manager
            .create_index(
                Index::create()
                    .name("idx_user_username")
                    .table(User::Table)
                    .col(User::Username)
                    .to_owned(),
            )
            .await?;

        // Index: modified_at (active-user window queries)
        manager
            .create_index(
                Index::create()
                    .name("idx_user_modified_at")
                    .table(User::Table)
                    .col(User::ModifiedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(User::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum User {
    Table,
    Id,
    Username,
    Nickname,
    Tier,
    Level,
    IsBanned,
    SubmittedCount,
    AcceptedCount,
    RejectedCount,
    ReviewedCount,
    CreatedAt,
    ModifiedAt,
}
