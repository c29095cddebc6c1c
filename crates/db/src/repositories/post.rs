//! Post repository.

use std::sync::Arc;

use crate::entities::{
    Post, User,
    post::{self, PostStatus},
    user,
};
use chrono::{DateTime, Utc};
use newsdesk_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    Set, TransactionTrait, sea_query::Expr,
};

/// Post repository for database operations.
#[derive(Clone)]
pub struct PostRepository {
    db: Arc<DatabaseConnection>,
}

impl PostRepository {
    /// Create a new post repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a post by ID.
    pub async fn find_by_id(&self, id: i64) -> AppResult<Option<post::Model>> {
        Post::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find a post by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: i64) -> AppResult<post::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Post {id} not found")))
    }

    /// Insert a pending post and bump the author's submission counter in one
    /// transaction. The submission counter is only ever incremented here, at
    /// creation, never on later transitions.
    pub async fn create(&self, author_id: i64, now: DateTime<Utc>) -> AppResult<post::Model> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        let model = post::ActiveModel {
            author_id: Set(author_id),
            status: Set(PostStatus::Pending),
            created_at: Set(now),
            reviewed_by: Set(None),
            reviewed_at: Set(None),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        User::update_many()
            .col_expr(
                user::Column::SubmittedCount,
                Expr::col(user::Column::SubmittedCount).add(1),
            )
            .col_expr(user::Column::ModifiedAt, Expr::value(now))
            .filter(user::Column::Id.eq(author_id))
            .exec(&txn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        txn.commit()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(model)
    }

    /// Move a post out of `Pending` with a conditional UPDATE.
    ///
    /// Returns `true` when the row was still pending and the transition was
    /// applied; `false` when another actor got there first (or the post was
    /// never pending). The condition makes the status change race-free
    /// without a fetch.
    pub async fn transition(
        &self,
        post_id: i64,
        to: PostStatus,
        reviewed_by: Option<i64>,
        now: DateTime<Utc>,
    ) -> AppResult<bool> {
        let result = Post::update_many()
            .col_expr(post::Column::Status, Expr::value(to))
            .col_expr(post::Column::ReviewedBy, Expr::value(reviewed_by))
            .col_expr(post::Column::ReviewedAt, Expr::value(Some(now)))
            .filter(post::Column::Id.eq(post_id))
            .filter(post::Column::Status.eq(PostStatus::Pending))
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(result.rows_affected == 1)
    }

    /// Apply a review outcome and its counter effects in one transaction.
    ///
    /// The status CAS, the author's accepted/rejected counter and the
    /// moderator's reviewed counter commit together or not at all; a
    /// transient failure after the CAS cannot leave a reviewed post with
    /// unmoved counters. Returns `false` (after rolling back) when the post
    /// was no longer pending.
    pub async fn review(
        &self,
        post_id: i64,
        outcome: PostStatus,
        author_id: i64,
        moderator_id: i64,
        now: DateTime<Utc>,
    ) -> AppResult<bool> {
        let author_counter = match outcome {
            PostStatus::Accepted => user::Column::AcceptedCount,
            PostStatus::Rejected => user::Column::RejectedCount,
            PostStatus::Pending | PostStatus::Cancelled => {
                return Err(AppError::Internal(
                    "review outcome must be accepted or rejected".to_string(),
                ));
            }
        };

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        let result = Post::update_many()
            .col_expr(post::Column::Status, Expr::value(outcome))
            .col_expr(post::Column::ReviewedBy, Expr::value(Some(moderator_id)))
            .col_expr(post::Column::ReviewedAt, Expr::value(Some(now)))
            .filter(post::Column::Id.eq(post_id))
            .filter(post::Column::Status.eq(PostStatus::Pending))
            .exec(&txn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        if result.rows_affected == 0 {
            txn.rollback()
                .await
                .map_err(|e| AppError::Database(e.to_string()))?;
            return Ok(false);
        }

        User::update_many()
            .col_expr(author_counter, Expr::col(author_counter).add(1))
            .col_expr(user::Column::ModifiedAt, Expr::value(now))
            .filter(user::Column::Id.eq(author_id))
            .exec(&txn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        User::update_many()
            .col_expr(
                user::Column::ReviewedCount,
                Expr::col(user::Column::ReviewedCount).add(1),
            )
            .col_expr(user::Column::ModifiedAt, Expr::value(now))
            .filter(user::Column::Id.eq(moderator_id))
            .exec(&txn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        txn.commit()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(true)
    }

    // ========== Statistics ==========

    /// Count counted submissions (`status > Cancelled`) created in `[from, to)`.
    pub async fn count_submitted_in_range(
        &self,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    ) -> AppResult<u64> {
        self.count_in_range(post::Column::Status.gt(PostStatus::Cancelled), from, to)
            .await
    }

    /// Count posts with the given status created in `[from, to)`.
    pub async fn count_status_in_range(
        &self,
        status: PostStatus,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    ) -> AppResult<u64> {
        self.count_in_range(post::Column::Status.eq(status), from, to)
            .await
    }

    async fn count_in_range(
        &self,
        status_cond: sea_orm::sea_query::SimpleExpr,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    ) -> AppResult<u64> {
        let mut query = Post::find().filter(status_cond);

        if let Some(from) = from {
            query = query.filter(post::Column::CreatedAt.gte(from));
        }
        if let Some(to) = to {
            query = query.filter(post::Column::CreatedAt.lt(to));
        }

        query
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}
