//! Application configuration.

use serde::Deserialize;
use std::path::Path;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Database configuration.
    pub database: DatabaseConfig,
    /// Moderation configuration.
    #[serde(default)]
    pub moderation: ModerationConfig,
}

/// Database connection configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// `PostgreSQL` connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

/// Moderation pipeline configuration.
///
/// Threaded explicitly into the services at construction; there is no
/// process-wide "current review group" state.
#[derive(Debug, Clone, Deserialize)]
pub struct ModerationConfig {
    /// Chat ID of the review group, `-1` when no review group is configured.
    #[serde(default = "default_review_group_id")]
    pub review_group_id: i64,
    /// Chat ID of the publication channel, `-1` when unset.
    #[serde(default = "default_review_group_id")]
    pub publish_channel_id: i64,
    /// Reason recorded on a ban/unban when the operator gives none.
    #[serde(default = "default_ban_reason_placeholder")]
    pub ban_reason_placeholder: String,
}

impl Default for ModerationConfig {
    fn default() -> Self {
        Self {
            review_group_id: default_review_group_id(),
            publish_channel_id: default_review_group_id(),
            ban_reason_placeholder: default_ban_reason_placeholder(),
        }
    }
}

const fn default_max_connections() -> u32 {
    100
}

const fn default_min_connections() -> u32 {
    5
}

const fn default_review_group_id() -> i64 {
    -1
}

fn default_ban_reason_placeholder() -> String {
    "no reason given".to_string()
}

impl Config {
    /// Load configuration from files and environment variables.
    ///
    /// Configuration is loaded in the following order:
    /// 1. `config/default.toml`
    /// 2. `config/{environment}.toml` (based on `NEWSDESK_ENV`)
    /// 3. Environment variables with `NEWSDESK_` prefix
    pub fn load() -> Result<Self, config::ConfigError> {
        // Pull a .env file into the process environment first, if present.
        dotenvy::dotenv().ok();

        let env = std::env::var("NEWSDESK_ENV").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("NEWSDESK")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Load configuration from a specific file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::from(path.as_ref()))
            .add_source(
                config::Environment::with_prefix("NEWSDESK")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}
