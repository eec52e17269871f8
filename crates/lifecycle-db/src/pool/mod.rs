//! PostgreSQL connection pool and migrations

mod postgres;

pub use postgres::{create_pool, run_migrations};

// Re-export so downstream crates avoid a direct sqlx dependency
pub use sqlx::PgPool;
