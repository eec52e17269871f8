//! Time policy - base windows plus a uniform scale multiplier
//!
//! Loaded once at process start and passed explicitly into the classifier,
//! so a single pass stays internally consistent even if the environment
//! changes underneath it.

use chrono::Duration;

const SECS_PER_DAY: i64 = 86_400;

/// Immutable lifecycle time policy.
///
/// Base windows are denominated in seconds; `scale` multiplies all three
/// uniformly. Effective windows are not clamped: a zero or negative
/// effective window means "immediately eligible". That is an operational
/// hazard accepted for accelerated test environments, not a guarded error.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimePolicy {
    /// Max time an account may remain unverified before hard deletion
    pub verification_window_secs: i64,
    /// Inactivity after which the one-time warning is sent
    pub warning_window_secs: i64,
    /// Inactivity after which the account is anonymized and soft-deleted
    pub deletion_window_secs: i64,
    /// Uniform multiplier applied to all three windows
    pub scale: f64,
}

impl Default for TimePolicy {
    /// Production values: 10 minutes to verify, warning at 53 days of
    /// inactivity, deletion at 60
    fn default() -> Self {
        Self {
            verification_window_secs: 600,
            warning_window_secs: 53 * SECS_PER_DAY,
            deletion_window_secs: 60 * SECS_PER_DAY,
            scale: 1.0,
        }
    }
}

impl TimePolicy {
    /// Accelerated profile for demos and tests: everything in seconds
    #[must_use]
    pub fn accelerated() -> Self {
        Self {
            verification_window_secs: 10,
            warning_window_secs: 40,
            deletion_window_secs: 60,
            scale: 1.0,
        }
    }

    /// Validate the policy at startup.
    ///
    /// Negative base windows and non-finite scales are configuration
    /// errors. Zero is deliberately valid (test acceleration), as are
    /// fractional scales that collapse day-denominated windows.
    pub fn validate(&self) -> Result<(), PolicyError> {
        for (name, value) in [
            ("verification_window", self.verification_window_secs),
            ("warning_window", self.warning_window_secs),
            ("deletion_window", self.deletion_window_secs),
        ] {
            if value < 0 {
                return Err(PolicyError::NegativeWindow(name, value));
            }
        }
        if !self.scale.is_finite() {
            return Err(PolicyError::InvalidScale(self.scale));
        }
        Ok(())
    }

    /// Effective verification window (`base * scale`)
    #[must_use]
    pub fn verification_window(&self) -> Duration {
        self.effective(self.verification_window_secs)
    }

    /// Effective warning window (`base * scale`)
    #[must_use]
    pub fn warning_window(&self) -> Duration {
        self.effective(self.warning_window_secs)
    }

    /// Effective deletion window (`base * scale`)
    #[must_use]
    pub fn deletion_window(&self) -> Duration {
        self.effective(self.deletion_window_secs)
    }

    fn effective(&self, base_secs: i64) -> Duration {
        Duration::milliseconds((base_secs as f64 * self.scale * 1000.0) as i64)
    }
}

/// Policy validation errors, fatal at startup
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PolicyError {
    #[error("{0} must not be negative (got {1})")]
    NegativeWindow(&'static str, i64),

    #[error("time scale must be finite (got {0})")]
    InvalidScale(f64),
}
