//! Rights and hierarchy service.
//!
//! Resolves command targets and enforces the privilege ordering: a larger
//! `tier` outranks a smaller one, and nobody outranks themself.

use newsdesk_common::{AppError, AppResult};
use newsdesk_db::{entities::user, repositories::UserRepository};

/// The interaction context a command arrived in.
///
/// The transport fills this in; the core never talks to the chat platform
/// directly. A replied-to message's author takes precedence over any token
/// the operator typed.
#[derive(Debug, Clone, Default)]
pub struct ResolveContext {
    /// Author of the message the command replied to, if any.
    pub replied_user_id: Option<i64>,
}

/// Snapshot of a user for the dispatcher to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserSummary {
    pub id: i64,
    pub nickname: String,
    pub tier: i32,
    pub level: i32,
    pub is_banned: bool,
    pub submitted_count: i32,
    pub accepted_count: i32,
    pub rejected_count: i32,
    pub reviewed_count: i32,
}

/// Rights and hierarchy service.
#[derive(Clone)]
pub struct RightsService {
    user_repo: UserRepository,
}

impl RightsService {
    /// Create a new rights service.
    #[must_use]
    pub const fn new(user_repo: UserRepository) -> Self {
        Self { user_repo }
    }

    /// Resolve the user a command is aimed at.
    ///
    /// Preference order: the replied-to author from the context, then the
    /// fallback token parsed as a numeric ID, then a handle lookup. Has no
    /// side effects.
    pub async fn resolve_target(
        &self,
        ctx: &ResolveContext,
        fallback_token: Option<&str>,
    ) -> AppResult<user::Model> {
        if let Some(id) = ctx.replied_user_id {
            if let Some(user) = self.user_repo.find_by_id(id).await? {
                return Ok(user);
            }
        }

        let Some(token) = fallback_token.map(str::trim).filter(|t| !t.is_empty()) else {
            // A reply pointed at somebody we have no record of: that is an
            // unknown user, not a malformed command.
            if let Some(id) = ctx.replied_user_id {
                return Err(AppError::UserNotFound(id.to_string()));
            }
            return Err(AppError::Validation(
                "a target user reference or ID is required".to_string(),
            ));
        };

        if let Ok(id) = token.parse::<i64>() {
            if let Some(user) = self.user_repo.find_by_id(id).await? {
                return Ok(user);
            }
        }

        self.user_repo
            .find_by_username(token.trim_start_matches('@'))
            .await?
            .ok_or_else(|| AppError::UserNotFound(token.to_string()))
    }

    /// Whether `actor` may act on `target`.
    ///
    /// True iff the target sits strictly below the actor in the hierarchy
    /// and the two are different users. Peers and superiors are never valid
    /// targets, nor is the actor themself regardless of tier.
    #[must_use]
    pub const fn can_act(actor: &user::Model, target: &user::Model) -> bool {
        target.tier < actor.tier && actor.id != target.id
    }

    /// Gate a mutation behind the hierarchy check.
    pub fn ensure_can_act(actor: &user::Model, target: &user::Model) -> AppResult<()> {
        if actor.id == target.id {
            return Err(AppError::PermissionDenied(
                "cannot act on yourself".to_string(),
            ));
        }
        if !Self::can_act(actor, target) {
            return Err(AppError::PermissionDenied(
                "target is not below your privilege tier".to_string(),
            ));
        }
        Ok(())
    }

    /// Build a render-ready snapshot of a user.
    #[must_use]
    pub fn summarize(user: &user::Model) -> UserSummary {
        UserSummary {
            id: user.id,
            nickname: user.nickname.clone(),
            tier: user.tier,
            level: user.level,
            is_banned: user.is_banned,
            submitted_count: user.submitted_count,
            accepted_count: user.accepted_count,
            rejected_count: user.rejected_count,
            reviewed_count: user.reviewed_count,
        }
    }
}
