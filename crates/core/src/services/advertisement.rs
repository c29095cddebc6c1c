//! Weighted advertisement selector.
//!
//! Lazy expiry: an ad failing the disable predicate is persisted as disabled
//! the moment it is considered, whether or not it would have been drawn.
//! Selection is a cumulative-weight walk in insertion order, so each ad wins
//! with probability `weight / total_weight`.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use newsdesk_common::{AppError, AppResult};
use newsdesk_db::{entities::advertisement, repositories::AdvertisementRepository};
use rand::{Rng, SeedableRng, rngs::StdRng};
use sea_orm::Set;

/// Input for creating an advertisement.
pub struct CreateAdvertisementInput {
    pub weight: i32,
    pub expire_at: DateTime<Utc>,
    /// `0` = unlimited showings.
    pub max_show_count: i32,
}

/// Advertisement selection service.
#[derive(Clone)]
pub struct AdvertisementService {
    repo: AdvertisementRepository,
    // One generator for the process; per-call generators correlate draws
    // under rapid successive selections.
    rng: Arc<Mutex<StdRng>>,
}

impl AdvertisementService {
    /// Create a new advertisement service with an entropy-seeded generator.
    #[must_use]
    pub fn new(repo: AdvertisementRepository) -> Self {
        Self {
            repo,
            rng: Arc::new(Mutex::new(StdRng::from_entropy())),
        }
    }

    /// Create a service with a fixed seed, for deterministic tests.
    #[must_use]
    pub fn with_seed(repo: AdvertisementRepository, seed: u64) -> Self {
        Self {
            repo,
            rng: Arc::new(Mutex::new(StdRng::seed_from_u64(seed))),
        }
    }

    /// Pick the advertisement to attach to the next publication, if any.
    ///
    /// Exhausted ads (zero weight, show cap reached, or expired) are
    /// persisted as disabled before the draw, regardless of the selection
    /// outcome. Returns `None` when no candidate survives.
    pub async fn pick(&self) -> AppResult<Option<advertisement::Model>> {
        let ads = self.repo.find_enabled().await?;
        let now = Utc::now();

        let mut survivors = Vec::with_capacity(ads.len());
        for ad in ads {
            if ad.is_exhausted(now) {
                self.repo.disable(ad.id).await?;
            } else {
                survivors.push(ad);
            }
        }

        if survivors.is_empty() {
            return Ok(None);
        }

        // Survivors all have weight >= 1, so the total is positive.
        let total: i64 = survivors.iter().map(|ad| i64::from(ad.weight)).sum();
        let roll = {
            let mut rng = self
                .rng
                .lock()
                .map_err(|_| AppError::Internal("advertisement rng poisoned".to_string()))?;
            rng.gen_range(0..total)
        };

        Ok(weighted_pick(&survivors, roll).cloned())
    }

    /// Record that the ad was actually shown.
    ///
    /// Callers invoke this after a successful publication; the increment is
    /// a single atomic UPDATE and is allowed to lag the cleanup pass.
    pub async fn record_show(&self, ad_id: i64) -> AppResult<()> {
        self.repo.increment_show_count(ad_id).await
    }

    /// Create a new advertisement.
    pub async fn create(
        &self,
        input: CreateAdvertisementInput,
    ) -> AppResult<advertisement::Model> {
        if input.weight < 0 {
            return Err(AppError::Validation(
                "advertisement weight must be non-negative".to_string(),
            ));
        }
        if input.max_show_count < 0 {
            return Err(AppError::Validation(
                "max show count must be non-negative".to_string(),
            ));
        }

        let model = advertisement::ActiveModel {
            enabled: Set(true),
            weight: Set(input.weight),
            expire_at: Set(input.expire_at),
            max_show_count: Set(input.max_show_count),
            show_count: Set(0),
            created_at: Set(Utc::now()),
            ..Default::default()
        };

        self.repo.create(model).await
    }

    /// All current selection candidates.
    pub async fn list_enabled(&self) -> AppResult<Vec<advertisement::Model>> {
        self.repo.find_enabled().await
    }
}

/// First ad whose running cumulative weight strictly exceeds `roll`.
///
/// `roll` must lie in `[0, total_weight)`; with that precondition the walk
/// always terminates on some ad.
fn weighted_pick(ads: &[advertisement::Model], roll: i64) -> Option<&advertisement::Model> {
    let mut cumulative = 0_i64;
    ads.iter().find(|ad| {
        cumulative += i64::from(ad.weight);
        cumulative > roll
    })
}
