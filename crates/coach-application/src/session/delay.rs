//! Reply delay policies.
//!
//! The controller asks a `ReplyDelay` how long to wait before each coach
//! reply. Production uses `UniformDelay`; tests use `FixedDelay` together
//! with tokio's paused clock.

use coach_core::config::ReplyConfig;
use coach_core::{CoachError, Result};
use rand::Rng;
use std::time::Duration;

/// Source of the simulated "thinking" delay before a coach reply.
pub trait ReplyDelay: Send + Sync {
    fn next_delay(&self) -> Duration;
}

/// Delay drawn uniformly from `[min, max]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UniformDelay {
    min: Duration,
    max: Duration,
}

impl UniformDelay {
    /// # Errors
    ///
    /// Returns `CoachError::Config` if `min > max`.
    pub fn new(min: Duration, max: Duration) -> Result<Self> {
        if min > max {
            return Err(CoachError::config(format!(
                "Reply delay minimum {:?} exceeds maximum {:?}",
                min, max
            )));
        }
        Ok(Self { min, max })
    }

    pub fn from_config(config: &ReplyConfig) -> Result<Self> {
        Self::new(config.min_delay(), config.max_delay())
    }
}

impl ReplyDelay for UniformDelay {
    fn next_delay(&self) -> Duration {
        if self.min == self.max {
            return self.min;
        }
        rand::thread_rng().gen_range(self.min..=self.max)
    }
}

/// Always the same delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedDelay(pub Duration);

impl ReplyDelay for FixedDelay {
    fn next_delay(&self) -> Duration {
        self.0
    }
}
