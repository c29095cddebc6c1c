//! Common utilities and shared types for newsdesk.
//!
//! This crate provides the foundational components used across all newsdesk
//! crates:
//!
//! - **Configuration**: Application settings via [`Config`]
//! - **Error handling**: Unified error types via [`AppError`] and [`AppResult`]
//!
//! # Example
//!
//! ```no_run
//! use newsdesk_common::{AppResult, Config};
//!
//! fn example() -> AppResult<()> {
//!     let config = Config::load()?;
//!     println!("review group: {}", config.moderation.review_group_id);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod logging;

pub use config::{Config, DatabaseConfig, ModerationConfig};
pub use error::{AppError, AppResult};
