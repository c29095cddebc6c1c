//! Ban record repository.

use std::sync::Arc;

use crate::entities::{BanRecord, User, ban_record, user};
use chrono::{DateTime, Utc};
use newsdesk_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait, sea_query::Expr,
};

/// Ban ledger repository.
///
/// The ledger is append-only: rows are inserted, never updated or deleted.
#[derive(Clone)]
pub struct BanRecordRepository {
    db: Arc<DatabaseConnection>,
}

impl BanRecordRepository {
    /// Create a new ban record repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Flip a user's ban flag and append the matching ledger row in one
    /// transaction.
    ///
    /// Both writes commit together or not at all; a failure of either rolls
    /// the unit of work back and surfaces as [`AppError::Database`]. The
    /// flag update is conditional on the prior state, so two concurrent
    /// identical requests cannot both append a ledger row: the loser matches
    /// zero rows and gets [`AppError::InvalidState`].
    pub async fn apply_ban(
        &self,
        user_id: i64,
        operator_id: i64,
        is_ban: bool,
        reason: String,
        now: DateTime<Utc>,
    ) -> AppResult<ban_record::Model> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        let result = User::update_many()
            .col_expr(user::Column::IsBanned, Expr::value(is_ban))
            .col_expr(user::Column::ModifiedAt, Expr::value(now))
            .filter(user::Column::Id.eq(user_id))
            .filter(user::Column::IsBanned.eq(!is_ban))
            .exec(&txn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        if result.rows_affected == 0 {
            txn.rollback()
                .await
                .map_err(|e| AppError::Database(e.to_string()))?;
            return Err(AppError::InvalidState(
                if is_ban {
                    "user is already banned"
                } else {
                    "user is already unbanned"
                }
                .to_string(),
            ));
        }

        let record = ban_record::ActiveModel {
            user_id: Set(user_id),
            operator_id: Set(operator_id),
            is_ban: Set(is_ban),
            reason: Set(reason),
            created_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        txn.commit()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        tracing::info!(
            user_id,
            operator_id,
            is_ban,
            "Ban flag updated and ledger row appended"
        );

        Ok(record)
    }

    /// All ledger rows for a user, oldest first.
    ///
    /// An empty vec means "no history", which is a valid outcome distinct
    /// from a store failure.
    pub async fn history(&self, user_id: i64) -> AppResult<Vec<ban_record::Model>> {
        BanRecord::find()
            .filter(ban_record::Column::UserId.eq(user_id))
            .order_by_asc(ban_record::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}
