//! Ban record entity.

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Ban ledger row - one ban or unban action against a user.
///
/// Rows are append-only and immutable once written; the ledger is the sole
/// source of ban history.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "ban_record")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    /// The user acted upon.
    pub user_id: i64,

    /// The operator who issued the action.
    pub operator_id: i64,

    /// `true` for a ban, `false` for an unban.
    pub is_ban: bool,

    /// Free-text reason; a configured placeholder when none was given.
    #[sea_orm(column_type = "Text")]
    pub reason: String,

    /// When the action was taken.
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
