//! Reporting aggregator.
//!
//! Derives period and user statistics from the post and user counters; pure
//! reads, no mutations.

use chrono::{DateTime, Datelike, Duration, TimeZone, Utc};
use newsdesk_common::AppResult;
use newsdesk_db::{
    entities::post::PostStatus,
    repositories::{PostRepository, UserRepository},
};

/// Submission statistics for a time window.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct PeriodStats {
    /// Counted submissions (cancelled posts excluded).
    pub submitted: u64,
    pub accepted: u64,
    pub rejected: u64,
    /// `accepted / submitted`; `None` when nothing was submitted.
    pub acceptance_rate: Option<f64>,
}

/// Aggregate user statistics.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct UserStats {
    pub total: u64,
    pub banned: u64,
    /// Users touched within the trailing 30 days.
    pub active_last_30_days: u64,
    /// Users who have submitted at least once.
    pub has_submitted: u64,
}

/// The full system report the dispatcher renders on demand.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct SystemReport {
    pub month_to_date: PeriodStats,
    pub year_to_date: PeriodStats,
    pub all_time: PeriodStats,
    pub users: UserStats,
}

/// Reporting service.
#[derive(Clone)]
pub struct ReportService {
    post_repo: PostRepository,
    user_repo: UserRepository,
}

impl ReportService {
    /// Create a new report service.
    #[must_use]
    pub const fn new(post_repo: PostRepository, user_repo: UserRepository) -> Self {
        Self { post_repo, user_repo }
    }

    /// Submission statistics for posts created in `[from, to)`.
    ///
    /// An empty window yields `acceptance_rate: None`, never a division
    /// fault.
    pub async fn period_stats(
        &self,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    ) -> AppResult<PeriodStats> {
        let submitted = self.post_repo.count_submitted_in_range(from, to).await?;
        let accepted = self
            .post_repo
            .count_status_in_range(PostStatus::Accepted, from, to)
            .await?;
        let rejected = self
            .post_repo
            .count_status_in_range(PostStatus::Rejected, from, to)
            .await?;

        let acceptance_rate = if submitted > 0 {
            Some(accepted as f64 / submitted as f64)
        } else {
            None
        };

        Ok(PeriodStats {
            submitted,
            accepted,
            rejected,
            acceptance_rate,
        })
    }

    /// Aggregate user statistics as of `now`.
    pub async fn user_stats(&self, now: DateTime<Utc>) -> AppResult<UserStats> {
        Ok(UserStats {
            total: self.user_repo.count_all().await?,
            banned: self.user_repo.count_banned().await?,
            active_last_30_days: self
                .user_repo
                .count_active_since(now - Duration::days(30))
                .await?,
            has_submitted: self.user_repo.count_has_submitted().await?,
        })
    }

    /// Month-to-date, year-to-date and all-time submission statistics plus
    /// user statistics, in one bundle.
    pub async fn system_report(&self, now: DateTime<Utc>) -> AppResult<SystemReport> {
        Ok(SystemReport {
            month_to_date: self.period_stats(Some(month_start(now)), None).await?,
            year_to_date: self.period_stats(Some(year_start(now)), None).await?,
            all_time: self.period_stats(None, None).await?,
            users: self.user_stats(now).await?,
        })
    }
}

/// Midnight on the first day of `now`'s month.
fn month_start(now: DateTime<Utc>) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(now.year(), now.month(), 1, 0, 0, 0)
        .single()
        .unwrap_or(now)
}

/// Midnight on the first day of `now`'s year.
fn year_start(now: DateTime<Utc>) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(now.year(), 1, 1, 0, 0, 0)
        .single()
        .unwrap_or(now)
}
