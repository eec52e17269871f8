//! Lifecycle time policy - the three windows and their scale factor

mod time_policy;

pub use time_policy::{PolicyError, TimePolicy};
