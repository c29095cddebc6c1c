//! Create advertisement table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Advertisement::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Advertisement::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Advertisement::Enabled).boolean().not_null().default(true))
                    .col(ColumnDef::new(Advertisement::Weight).integer().not_null().default(0))
                    .col(
                        ColumnDef::new(Advertisement::ExpireAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Advertisement::MaxShowCount)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Advertisement::ShowCount).integer().not_null().default(0))
                    .col(
                        ColumnDef::new(Advertisement::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Index: enabled (the selector only ever loads enabled ads)
        manager
            .create_index(
                Index::create()
                    .name("idx_advertisement_enabled")
                    .table(Advertisement::Table)
                    .col(Advertisement::Enabled)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Advertisement::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Advertisement {
    Table,
    Id,
    Enabled,
    Weight,
    ExpireAt,
    MaxShowCount,
    ShowCount,
    CreatedAt,
}
