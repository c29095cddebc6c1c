//! Create ban record table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(BanRecord::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(BanRecord::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(BanRecord::UserId).big_integer().not_null())
                    .col(ColumnDef::new(BanRecord::OperatorId).big_integer().not_null())
                    .col(ColumnDef::new(BanRecord::IsBan).boolean().not_null())
                    .col(ColumnDef::new(BanRecord::Reason).text().not_null())
                    .col(
                        ColumnDef::new(BanRecord::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Index: (user_id, created_at) - history is read per target, ascending
        manager
            .create_index(
                Index::create()
                    .name("idx_ban_record_user_created")
                    .table(BanRecord::Table)
                    .col(BanRecord::UserId)
                    .col(BanRecord::CreatedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(BanRecord::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum BanRecord {
    Table,
    Id,
    UserId,
    OperatorId,
    IsBan,
    Reason,
    CreatedAt,
}
