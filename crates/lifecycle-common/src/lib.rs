//! # lifecycle-common
//!
//! Shared utilities including configuration and telemetry.

pub mod config;
pub mod telemetry;

// Re-export commonly used types at crate root
pub use config::{
    AppConfig, AppSettings, ConfigError, DatabaseConfig, Environment, LifecycleConfig, MailConfig,
    RedisConfig,
};
pub use telemetry::{init_tracing, try_init_tracing, TracingConfig, TracingError};
