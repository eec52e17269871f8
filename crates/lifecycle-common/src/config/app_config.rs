//! Application configuration structs
//!
//! Loads configuration from environment variables once at process start.
//! A running pass never re-reads it, so one pass stays internally
//! consistent even if the environment is hot-reloaded elsewhere.

use serde::Deserialize;
use std::env;
use std::str::FromStr;

use lifecycle_core::TimePolicy;

/// Main application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub app: AppSettings,
    pub database: DatabaseConfig,
    pub redis: RedisConfig,
    pub lifecycle: LifecycleConfig,
    /// Absent when no mail API is configured; warnings are then logged
    /// instead of sent, like a console email backend in development
    pub mail: Option<MailConfig>,
}

/// General application settings
#[derive(Debug, Clone)]
pub struct AppSettings {
    pub name: String,
    pub env: Environment,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }
}

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

/// Redis configuration
#[derive(Debug, Clone)]
pub struct RedisConfig {
    pub url: String,
    pub max_connections: u32,
}

/// Transactional mail API configuration
#[derive(Debug, Clone)]
pub struct MailConfig {
    pub api_url: String,
    pub api_key: String,
    pub sender_email: String,
    pub sender_name: Option<String>,
}

/// Lifecycle policy and scheduling configuration
#[derive(Debug, Clone)]
pub struct LifecycleConfig {
    /// Base windows in seconds; see `TimePolicy` for scaling semantics
    pub verification_window_secs: i64,
    pub warning_window_secs: i64,
    pub deletion_window_secs: i64,
    /// Uniform multiplier applied to all three windows
    pub time_scale: f64,
    /// Seconds between scheduled cleanup passes
    pub pass_interval_secs: u64,
    /// Enforced timeout on each session liveness probe
    pub probe_timeout_secs: u64,
    /// Enforced timeout on each warning email send
    pub mail_timeout_secs: u64,
}

impl LifecycleConfig {
    /// Build the immutable time policy handed to the classifier
    #[must_use]
    pub fn time_policy(&self) -> TimePolicy {
        TimePolicy {
            verification_window_secs: self.verification_window_secs,
            warning_window_secs: self.warning_window_secs,
            deletion_window_secs: self.deletion_window_secs,
            scale: self.time_scale,
        }
    }
}

// Default value functions
fn default_app_name() -> String {
    "account-lifecycle".to_string()
}

fn default_max_connections() -> u32 {
    20
}

fn default_min_connections() -> u32 {
    5
}

fn default_redis_max_connections() -> u32 {
    10
}

fn default_verification_window() -> i64 {
    600 // 10 minutes
}

fn default_warning_window() -> i64 {
    53 * 86_400 // 53 days
}

fn default_deletion_window() -> i64 {
    60 * 86_400 // 60 days
}

fn default_pass_interval() -> u64 {
    300 // 5 minutes
}

fn default_collaborator_timeout() -> u64 {
    3
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if required environment variables are missing or
    /// a variable that is present fails to parse. A present-but-invalid
    /// value is a configuration error, never a silent default.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let mail = match env::var("MAIL_API_URL").ok().filter(|v| !v.is_empty()) {
            Some(api_url) => Some(MailConfig {
                api_url,
                api_key: env::var("MAIL_API_KEY")
                    .map_err(|_| ConfigError::MissingVar("MAIL_API_KEY"))?,
                sender_email: env::var("MAIL_SENDER_EMAIL")
                    .map_err(|_| ConfigError::MissingVar("MAIL_SENDER_EMAIL"))?,
                sender_name: env::var("MAIL_SENDER_NAME").ok(),
            }),
            None => None,
        };

        Ok(Self {
            app: AppSettings {
                name: env::var("APP_NAME").unwrap_or_else(|_| default_app_name()),
                env: env::var("APP_ENV")
                    .ok()
                    .and_then(|s| match s.to_lowercase().as_str() {
                        "production" => Some(Environment::Production),
                        "staging" => Some(Environment::Staging),
                        "development" => Some(Environment::Development),
                        _ => None,
                    })
                    .unwrap_or_default(),
            },
            database: DatabaseConfig {
                url: env::var("DATABASE_URL")
                    .map_err(|_| ConfigError::MissingVar("DATABASE_URL"))?,
                max_connections: parse_env("DATABASE_MAX_CONNECTIONS")?
                    .unwrap_or_else(default_max_connections),
                min_connections: parse_env("DATABASE_MIN_CONNECTIONS")?
                    .unwrap_or_else(default_min_connections),
            },
            redis: RedisConfig {
                url: env::var("REDIS_URL").map_err(|_| ConfigError::MissingVar("REDIS_URL"))?,
                max_connections: parse_env("REDIS_MAX_CONNECTIONS")?
                    .unwrap_or_else(default_redis_max_connections),
            },
            lifecycle: LifecycleConfig {
                verification_window_secs: parse_env("VERIFICATION_WINDOW_SECS")?
                    .unwrap_or_else(default_verification_window),
                warning_window_secs: parse_env("WARNING_WINDOW_SECS")?
                    .unwrap_or_else(default_warning_window),
                deletion_window_secs: parse_env("DELETION_WINDOW_SECS")?
                    .unwrap_or_else(default_deletion_window),
                time_scale: parse_env("TIME_SCALE")?.unwrap_or(1.0),
                pass_interval_secs: parse_env("PASS_INTERVAL_SECS")?
                    .unwrap_or_else(default_pass_interval),
                probe_timeout_secs: parse_env("PROBE_TIMEOUT_SECS")?
                    .unwrap_or_else(default_collaborator_timeout),
                mail_timeout_secs: parse_env("MAIL_TIMEOUT_SECS")?
                    .unwrap_or_else(default_collaborator_timeout),
            },
            mail,
        })
    }
}

/// Parse an optional environment variable, erroring when present but invalid
fn parse_env<T: FromStr>(key: &'static str) -> Result<Option<T>, ConfigError> {
    match env::var(key) {
        Ok(raw) => raw
            .parse::<T>()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue(key, raw)),
        Err(_) => Ok(None),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
