//! Retry policy: attempt budget plus the delay between attempts.

use crate::config::merge::merge_policy::{DEFAULT_MAX_POLL_ATTEMPTS, DEFAULT_POLL_INTERVAL_MS};
use crate::config::WorkflowSettings;
use std::time::Duration;

/// Delay applied after a non-terminal attempt, before the next one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Delay {
    Fixed(Duration),
    Exponential {
        initial: Duration,
        factor: f64,
        max: Duration,
    },
}

impl Delay {
    /// Delay following attempt number `attempt` (1-based).
    pub fn after(&self, attempt: u32) -> Duration {
        match *self {
            Delay::Fixed(d) => d,
            Delay::Exponential {
                initial,
                factor,
                max,
            } => {
                let exponent = attempt.saturating_sub(1).min(i32::MAX as u32) as i32;
                let scaled = initial.as_secs_f64() * factor.max(1.0).powi(exponent);
                if !scaled.is_finite() || scaled >= max.as_secs_f64() {
                    max
                } else {
                    Duration::from_secs_f64(scaled)
                }
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetryPolicy {
    /// Maximum number of attempts; zero means no attempt is made
    pub max_attempts: u32,
    pub delay: Delay,
}

impl RetryPolicy {
    pub fn fixed(max_attempts: u32, interval: Duration) -> Self {
        Self {
            max_attempts,
            delay: Delay::Fixed(interval),
        }
    }

    pub fn exponential(max_attempts: u32, initial: Duration, factor: f64, max: Duration) -> Self {
        Self {
            max_attempts,
            delay: Delay::Exponential {
                initial,
                factor,
                max,
            },
        }
    }

    /// Fixed-interval policy from the `workflow` section of the global config.
    pub fn from_settings(settings: &WorkflowSettings) -> Self {
        Self::fixed(settings.max_attempts, settings.interval())
    }

    pub fn delay_after(&self, attempt: u32) -> Duration {
        self.delay.after(attempt)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::fixed(
            DEFAULT_MAX_POLL_ATTEMPTS,
            Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
        )
    }
}
