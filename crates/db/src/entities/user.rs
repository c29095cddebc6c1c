//! User entity.

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Privilege-tier direction: a LARGER `tier` value outranks a smaller one.
///
/// All hierarchy checks must go through
/// `newsdesk_core::services::rights::can_act` rather than comparing tiers
/// inline, so the direction lives in exactly one place.
pub const HIGHER_TIER_IS_MORE_PRIVILEGED: bool = true;

/// User model.
///
/// Users are never deleted; the ban flag and the per-user counters are the
/// only fields the moderation pipeline mutates after creation.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user")]
pub struct Model {
    /// Immutable numeric identity (the chat platform user ID).
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i64,

    /// Handle (`@name`), empty for users without one.
    pub username: String,

    /// Display name.
    pub nickname: String,

    /// Privilege ordinal; larger = more privileged.
    pub tier: i32,

    /// Derived experience level.
    pub level: i32,

    /// Whether the user is currently banned.
    pub is_banned: bool,

    /// Posts submitted (counted once, at creation).
    pub submitted_count: i32,

    /// Posts accepted.
    pub accepted_count: i32,

    /// Posts rejected.
    pub rejected_count: i32,

    /// Posts this user reviewed as a moderator.
    pub reviewed_count: i32,

    /// When the user was first seen.
    pub created_at: DateTime<Utc>,

    /// Last mutation of this row; drives the "active user" statistic.
    pub modified_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::ban_record::Entity")]
    BanRecords,
    #[sea_orm(has_many = "super::post::Entity")]
    Posts,
}

impl Related<super::ban_record::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BanRecords.def()
    }
}

impl Related<super::post::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Posts.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
