//! Post entity.

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Post lifecycle status.
///
/// The ordinal matters: `Cancelled` is the lowest value so that
/// "counted" submissions are exactly `status > Cancelled`. A post moves from
/// `Pending` to exactly one terminal state and never transitions again.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, EnumIter,
    DeriveActiveEnum, Default,
)]
#[sea_orm(rs_type = "i32", db_type = "Integer")]
pub enum PostStatus {
    /// Withdrawn by the author; excluded from acceptance statistics.
    Cancelled = 0,
    /// Awaiting review.
    #[default]
    Pending = 1,
    /// Published.
    Accepted = 2,
    /// Declined by a moderator.
    Rejected = 3,
}

impl PostStatus {
    /// Whether this status is terminal (no further transitions).
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::Pending)
    }

    /// Whether posts in this status count towards submission statistics.
    #[must_use]
    pub const fn is_counted(self) -> bool {
        !matches!(self, Self::Cancelled)
    }
}

/// Post model.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "post")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    /// The submitting user.
    pub author_id: i64,

    /// Lifecycle status.
    pub status: PostStatus,

    /// When the post was submitted.
    pub created_at: DateTime<Utc>,

    /// Moderator who accepted/rejected the post, if reviewed.
    #[sea_orm(nullable)]
    pub reviewed_by: Option<i64>,

    /// When the post was reviewed or cancelled.
    #[sea_orm(nullable)]
    pub reviewed_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::AuthorId",
        to = "super::user::Column::Id"
    )]
    Author,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Author.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_ordering() {
        assert!(PostStatus::Cancelled < PostStatus::Pending);
        assert!(PostStatus::Pending < PostStatus::Accepted);
        assert!(PostStatus::Accepted < PostStatus::Rejected);
    }

    #[test]
    fn test_cancelled_is_terminal_but_uncounted() {
        assert!(PostStatus::Cancelled.is_terminal());
        assert!(!PostStatus::Cancelled.is_counted());
        assert!(!PostStatus::Pending.is_terminal());
        assert!(PostStatus::Pending.is_counted());
        assert!(PostStatus::Accepted.is_counted());
        assert!(PostStatus::Rejected.is_counted());
    }
}
