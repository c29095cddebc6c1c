//! Ban ledger service.

use chrono::Utc;
use newsdesk_common::{AppError, AppResult, ModerationConfig};
use newsdesk_db::{
    entities::{ban_record, user},
    repositories::BanRecordRepository,
};

use super::rights::RightsService;

/// Ban ledger service.
///
/// Every successful ban or unban flips the target's flag and appends one
/// immutable ledger row; re-issuing the same action is a no-op that leaves
/// the ledger untouched.
#[derive(Clone)]
pub struct BanService {
    ban_repo: BanRecordRepository,
    config: ModerationConfig,
}

impl BanService {
    /// Create a new ban service.
    #[must_use]
    pub const fn new(ban_repo: BanRecordRepository, config: ModerationConfig) -> Self {
        Self { ban_repo, config }
    }

    /// Ban or unban a user.
    ///
    /// The actor must strictly outrank the target. A redundant request
    /// (target already in the requested state) returns
    /// [`AppError::InvalidState`] without writing a ledger row.
    pub async fn set_ban(
        &self,
        actor: &user::Model,
        target: &user::Model,
        is_ban: bool,
        reason: Option<&str>,
    ) -> AppResult<ban_record::Model> {
        RightsService::ensure_can_act(actor, target)?;

        // Fast path on the caller's snapshot; the repository re-checks the
        // flag inside the transaction, so a concurrent duplicate still loses.
        if target.is_banned == is_ban {
            return Err(AppError::InvalidState(
                if is_ban {
                    "user is already banned"
                } else {
                    "user is already unbanned"
                }
                .to_string(),
            ));
        }

        let reason = reason
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .unwrap_or(self.config.ban_reason_placeholder.as_str())
            .to_string();

        self.ban_repo
            .apply_ban(target.id, actor.id, is_ban, reason, Utc::now())
            .await
    }

    /// Ban/unban history for a user, oldest first. Empty means no history.
    pub async fn history(&self, target_id: i64) -> AppResult<Vec<ban_record::Model>> {
        self.ban_repo.history(target_id).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
    use std::sync::Arc;

    fn test_user(id: i64, tier: i32, is_banned: bool) -> user::Model {
        user::Model {
            id,
            username: format!("user{id}"),
            nickname: format!("User {id}"),
            tier,
            level: 0,
            is_banned,
            submitted_count: 0,
            accepted_count: 0,
            rejected_count: 0,
            reviewed_count: 0,
            created_at: Utc::now(),
            modified_at: Utc::now(),
        }
    }

    fn service(db: Arc<sea_orm::DatabaseConnection>) -> BanService {
        BanService::new(BanRecordRepository::new(db), ModerationConfig::default())
    }

    #[tokio::test]
    async fn test_set_ban_denied_for_peer() {
        let db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        let svc = service(db);

        let actor = test_user(1, 20, false);
        let peer = test_user(2, 20, false);

        let err = svc.set_ban(&actor, &peer, true, None).await.unwrap_err();
        assert_eq!(err.error_code(), "PERMISSION_DENIED");
    }

    #[tokio::test]
    async fn test_set_ban_denied_for_self() {
        let db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        let svc = service(db);

        let actor = test_user(1, 20, false);

        let err = svc
            .set_ban(&actor, &actor.clone(), true, None)
            .await
            .unwrap_err();
        assert_eq!(err.error_code(), "PERMISSION_DENIED");
    }

    #[tokio::test]
    async fn test_redundant_ban_is_invalid_state() {
        let db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        let svc = service(db);

        let actor = test_user(1, 20, false);
        let target = test_user(2, 10, true);

        // Already banned; no ledger row may be written (the mock would panic
        // on an unexpected statement).
        let err = svc.set_ban(&actor, &target, true, None).await.unwrap_err();
        assert_eq!(err.error_code(), "INVALID_STATE");

        let target = test_user(3, 10, false);
        let err = svc.set_ban(&actor, &target, false, None).await.unwrap_err();
        assert_eq!(err.error_code(), "INVALID_STATE");
    }

    #[tokio::test]
    async fn test_set_ban_substitutes_placeholder_reason() {
        let record = ban_record::Model {
            id: 1,
            user_id: 2,
            operator_id: 1,
            is_ban: true,
            reason: "no reason given".to_string(),
            created_at: Utc::now(),
        };

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_exec_results([
                    MockExecResult {
                        last_insert_id: 0,
                        rows_affected: 1,
                    },
                    MockExecResult {
                        last_insert_id: 1,
                        rows_affected: 1,
                    },
                ])
                .append_query_results([[record]])
                .into_connection(),
        );
        let svc = service(db);

        let actor = test_user(1, 20, false);
        let target = test_user(2, 10, false);

        let row = svc.set_ban(&actor, &target, true, Some("   ")).await.unwrap();
        assert_eq!(row.reason, "no reason given");
        assert!(row.is_ban);
    }
}
