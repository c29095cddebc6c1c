//! Advertisement repository.

use std::sync::Arc;

use crate::entities::{Advertisement, advertisement};
use newsdesk_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    sea_query::Expr,
};

/// Advertisement repository for database operations.
#[derive(Clone)]
pub struct AdvertisementRepository {
    db: Arc<DatabaseConnection>,
}

impl AdvertisementRepository {
    /// Create a new advertisement repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// All enabled ads in insertion order.
    ///
    /// The order is what makes the cumulative-weight walk in the selector
    /// stable between calls.
    pub async fn find_enabled(&self) -> AppResult<Vec<advertisement::Model>> {
        Advertisement::find()
            .filter(advertisement::Column::Enabled.eq(true))
            .order_by_asc(advertisement::Column::Id)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Persist `enabled = false` for an exhausted ad.
    pub async fn disable(&self, id: i64) -> AppResult<()> {
        Advertisement::update_many()
            .col_expr(advertisement::Column::Enabled, Expr::value(false))
            .filter(advertisement::Column::Id.eq(id))
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        tracing::debug!(ad_id = id, "Disabled exhausted advertisement");
        Ok(())
    }

    /// Increment the show counter atomically (single UPDATE, no fetch).
    pub async fn increment_show_count(&self, id: i64) -> AppResult<()> {
        Advertisement::update_many()
            .col_expr(
                advertisement::Column::ShowCount,
                Expr::col(advertisement::Column::ShowCount).add(1),
            )
            .filter(advertisement::Column::Id.eq(id))
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Create a new advertisement.
    pub async fn create(&self, model: advertisement::ActiveModel) -> AppResult<advertisement::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    fn create_test_ad(id: i64, weight: i32) -> advertisement::Model {
        let now = Utc::now();
        advertisement::Model {
            id,
            enabled: true,
            weight,
            expire_at: now + Duration::days(7),
            max_show_count: 0,
            show_count: 0,
            created_at: now,
        }
    }

    #[tokio::test]
    async fn test_find_enabled_preserves_order() {
        let ad1 = create_test_ad(1, 10);
        let ad2 = create_test_ad(2, 5);

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[ad1, ad2]])
                .into_connection(),
        );

        let repo = AdvertisementRepository::new(db);
        let ads = repo.find_enabled().await.unwrap();

        assert_eq!(ads.len(), 2);
        assert_eq!(ads[0].id, 1);
        assert_eq!(ads[1].id, 2);
    }

    #[tokio::test]
    async fn test_disable() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_exec_results([MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                }])
                .into_connection(),
        );

        let repo = AdvertisementRepository::new(db);
        repo.disable(1).await.unwrap();
    }

    #[tokio::test]
    async fn test_increment_show_count() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_exec_results([MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                }])
                .into_connection(),
        );

        let repo = AdvertisementRepository::new(db);
        repo.increment_show_count(1).await.unwrap();
    }
}
