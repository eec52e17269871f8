//! # lifecycle-db
//!
//! Database layer implementing the account and audit repository traits
//! with PostgreSQL via SQLx.
//!
//! ## Overview
//!
//! - Connection pool management and embedded migrations
//! - Database models with SQLx `FromRow` derives
//! - Entity ↔ model mappers
//! - Repository implementations with per-account transactions: every
//!   lifecycle action commits its row mutation and its audit entry
//!   together, or not at all

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use pool::{create_pool, run_migrations, PgPool};
pub use repositories::{PgAccountRepository, PgAuditLogRepository};
