//! Business logic services.

#![allow(missing_docs)]

pub mod advertisement;
pub mod ban;
pub mod post;
pub mod report;
pub mod rights;

pub use advertisement::{AdvertisementService, CreateAdvertisementInput};
pub use ban::BanService;
pub use post::PostService;
pub use report::{PeriodStats, ReportService, SystemReport, UserStats};
pub use rights::{ResolveContext, RightsService, UserSummary};
