//! Engine services

mod context;
mod error;
mod executor;
mod pass;

pub use context::EngineContext;
pub use error::{EngineError, EngineResult};
pub use pass::{CleanupService, PassSummary};
