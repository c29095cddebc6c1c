//! Advertisement entity.

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Advertisement model.
///
/// An ad is a weighted-draw candidate while `enabled`. Expiry is lazy: the
/// selector disables an ad at the moment it is considered, never via a
/// background sweep.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "advertisement")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    /// Whether this ad is a selection candidate.
    pub enabled: bool,

    /// Draw weight; an ad is selected with probability `weight / total`.
    /// Non-negative; a zero-weight ad is disabled on sight.
    pub weight: i32,

    /// Hard expiry; the ad is disabled once `now >= expire_at`.
    pub expire_at: DateTime<Utc>,

    /// Maximum number of showings, `0` = unlimited.
    pub max_show_count: i32,

    /// Times this ad has been shown.
    pub show_count: i32,

    /// When the ad was created.
    pub created_at: DateTime<Utc>,
}

impl Model {
    /// The lazy-expiry disable predicate: true when this ad must be disabled
    /// before it may be considered as a candidate.
    #[must_use]
    pub fn is_exhausted(&self, now: DateTime<Utc>) -> bool {
        self.weight == 0
            || (self.max_show_count > 0 && self.show_count >= self.max_show_count)
            || now >= self.expire_at
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
