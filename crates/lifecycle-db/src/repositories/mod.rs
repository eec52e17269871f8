//! Repository implementations

mod account;
mod audit;
mod error;

pub use account::PgAccountRepository;
pub use audit::PgAuditLogRepository;
