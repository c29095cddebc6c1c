//! Post moderation state machine.
//!
//! Posts start `Pending` and move to exactly one terminal state. Moderators
//! accept or reject; the author may cancel their own pending post. All
//! transitions are conditional updates, so a lost race surfaces as
//! `InvalidState` rather than a double-counted outcome.

use chrono::Utc;
use newsdesk_common::{AppError, AppResult};
use newsdesk_db::{
    entities::{
        post::{self, PostStatus},
        user,
    },
    repositories::{PostRepository, UserRepository},
};

use super::rights::RightsService;

/// Post lifecycle service.
#[derive(Clone)]
pub struct PostService {
    post_repo: PostRepository,
    user_repo: UserRepository,
}

impl PostService {
    /// Create a new post service.
    #[must_use]
    pub const fn new(post_repo: PostRepository, user_repo: UserRepository) -> Self {
        Self { post_repo, user_repo }
    }

    /// Submit a new post.
    ///
    /// The author's submission counter is incremented here, once; later
    /// transitions never touch it.
    pub async fn submit(&self, author: &user::Model) -> AppResult<post::Model> {
        if author.is_banned {
            return Err(AppError::PermissionDenied(
                "banned users cannot submit posts".to_string(),
            ));
        }

        let model = self.post_repo.create(author.id, Utc::now()).await?;

        tracing::info!(post_id = model.id, author_id = author.id, "Post submitted");
        Ok(model)
    }

    /// Accept a pending post.
    ///
    /// The moderator must strictly outrank the author; accepting your own
    /// post is never allowed. Bumps the author's accepted counter and the
    /// moderator's reviewed counter.
    pub async fn accept(&self, moderator: &user::Model, post: &post::Model) -> AppResult<()> {
        self.review(moderator, post, PostStatus::Accepted).await
    }

    /// Reject a pending post. Same authorization rule as [`Self::accept`].
    pub async fn reject(&self, moderator: &user::Model, post: &post::Model) -> AppResult<()> {
        self.review(moderator, post, PostStatus::Rejected).await
    }

    async fn review(
        &self,
        moderator: &user::Model,
        post: &post::Model,
        outcome: PostStatus,
    ) -> AppResult<()> {
        let author = self.user_repo.get_by_id(post.author_id).await?;
        RightsService::ensure_can_act(moderator, &author)?;

        // Status change and counter bumps commit as one transaction; a
        // failure mid-way cannot strand a reviewed post with stale counters.
        let applied = self
            .post_repo
            .review(post.id, outcome, author.id, moderator.id, Utc::now())
            .await?;
        if !applied {
            return Err(AppError::InvalidState(
                "post is no longer pending".to_string(),
            ));
        }

        tracing::info!(
            post_id = post.id,
            moderator_id = moderator.id,
            outcome = ?outcome,
            "Post reviewed"
        );
        Ok(())
    }

    /// Cancel a pending post.
    ///
    /// Only the author may cancel, and only while the post is pending. No
    /// counters move; the submission already counted at creation.
    pub async fn cancel(&self, actor: &user::Model, post: &post::Model) -> AppResult<()> {
        if actor.id != post.author_id {
            return Err(AppError::PermissionDenied(
                "only the author can cancel a post".to_string(),
            ));
        }

        let applied = self
            .post_repo
            .transition(post.id, PostStatus::Cancelled, None, Utc::now())
            .await?;
        if !applied {
            return Err(AppError::InvalidState(
                "post is no longer pending".to_string(),
            ));
        }

        tracing::info!(post_id = post.id, author_id = actor.id, "Post cancelled");
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
    use std::sync::Arc;

    fn test_user(id: i64, tier: i32) -> user::Model {
        user::Model {
            id,
            username: format!("user{id}"),
            nickname: format!("User {id}"),
            tier,
            level: 0,
            is_banned: false,
            submitted_count: 0,
            accepted_count: 0,
            rejected_count: 0,
            reviewed_count: 0,
            created_at: Utc::now(),
            modified_at: Utc::now(),
        }
    }

    fn test_post(id: i64, author_id: i64, status: PostStatus) -> post::Model {
        post::Model {
            id,
            author_id,
            status,
            created_at: Utc::now(),
            reviewed_by: None,
            reviewed_at: None,
        }
    }

    fn service(db: Arc<sea_orm::DatabaseConnection>) -> PostService {
        PostService::new(PostRepository::new(db.clone()), UserRepository::new(db))
    }

    #[tokio::test]
    async fn test_banned_author_cannot_submit() {
        let db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        let svc = service(db);

        let mut author = test_user(1, 10);
        author.is_banned = true;

        let err = svc.submit(&author).await.unwrap_err();
        assert_eq!(err.error_code(), "PERMISSION_DENIED");
    }

    #[tokio::test]
    async fn test_accept_by_peer_moderator_is_denied() {
        let author = test_user(1, 20);

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[author.clone()]])
                .into_connection(),
        );
        let svc = service(db);

        let moderator = test_user(2, 20);
        let post = test_post(1, author.id, PostStatus::Pending);

        let err = svc.accept(&moderator, &post).await.unwrap_err();
        assert_eq!(err.error_code(), "PERMISSION_DENIED");
    }

    #[tokio::test]
    async fn test_accept_already_reviewed_is_invalid_state() {
        let author = test_user(1, 10);

        // The conditional UPDATE hits zero rows: post left Pending earlier.
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[author.clone()]])
                .append_exec_results([MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 0,
                }])
                .into_connection(),
        );
        let svc = service(db);

        let moderator = test_user(2, 20);
        let post = test_post(1, author.id, PostStatus::Accepted);

        let err = svc.accept(&moderator, &post).await.unwrap_err();
        assert_eq!(err.error_code(), "INVALID_STATE");
    }

    #[tokio::test]
    async fn test_accept_updates_both_counters() {
        let author = test_user(1, 10);

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[author.clone()]])
                .append_exec_results([
                    // status CAS
                    MockExecResult {
                        last_insert_id: 0,
                        rows_affected: 1,
                    },
                    // author accepted_count
                    MockExecResult {
                        last_insert_id: 0,
                        rows_affected: 1,
                    },
                    // moderator reviewed_count
                    MockExecResult {
                        last_insert_id: 0,
                        rows_affected: 1,
                    },
                ])
                .into_connection(),
        );
        let svc = service(db);

        let moderator = test_user(2, 20);
        let post = test_post(1, author.id, PostStatus::Pending);

        svc.accept(&moderator, &post).await.unwrap();
    }

    #[tokio::test]
    async fn test_cancel_by_non_author_is_denied() {
        let db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        let svc = service(db);

        let stranger = test_user(2, 30);
        let post = test_post(1, 1, PostStatus::Pending);

        let err = svc.cancel(&stranger, &post).await.unwrap_err();
        assert_eq!(err.error_code(), "PERMISSION_DENIED");
    }

    #[tokio::test]
    async fn test_cancel_own_pending_post() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_exec_results([MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                }])
                .into_connection(),
        );
        let svc = service(db);

        let author = test_user(1, 10);
        let post = test_post(1, author.id, PostStatus::Pending);

        svc.cancel(&author, &post).await.unwrap();
    }
}
