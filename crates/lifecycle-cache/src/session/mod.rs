//! Session liveness storage module.
//!
//! Redis-backed record of the sessions currently bound to each account,
//! maintained by the session middleware and read by the cleanup pass.

mod liveness;

pub use liveness::SessionLivenessStore;
