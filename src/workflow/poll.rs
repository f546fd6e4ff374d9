//! Generic "poll until terminal" loop.
//!
//! Attempts run strictly one after another: attempt `n + 1` is only issued after attempt `n`'s
//! future has resolved, and the policy delay is only slept between attempts, never after the
//! last one.

use super::retry::RetryPolicy;
use std::future::Future;
use tracing::trace;

#[derive(Debug, Clone, PartialEq)]
pub enum PollOutcome<T, E> {
    /// `is_terminal` accepted this value
    Terminal { value: T, attempts: u32 },
    /// Budget spent without a terminal value; `last` is the final non-terminal value
    Exhausted { last: Option<T>, attempts: u32 },
    /// An attempt returned an error; polling stopped there
    Failed { error: E, attempts: u32 },
}

impl<T, E> PollOutcome<T, E> {
    pub fn attempts(&self) -> u32 {
        match self {
            PollOutcome::Terminal { attempts, .. }
            | PollOutcome::Exhausted { attempts, .. }
            | PollOutcome::Failed { attempts, .. } => *attempts,
        }
    }
}

/// Run `op` until `is_terminal` accepts its value, it errors, or the policy's budget runs out.
///
/// `op` receives the 1-based attempt number.
pub async fn poll_until<T, E, F, Fut, P>(
    policy: &RetryPolicy,
    mut op: F,
    mut is_terminal: P,
) -> PollOutcome<T, E>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, E>>,
    P: FnMut(&T) -> bool,
{
    let mut last = None;
    for attempt in 1..=policy.max_attempts {
        match op(attempt).await {
            Ok(value) if is_terminal(&value) => {
                return PollOutcome::Terminal {
                    value,
                    attempts: attempt,
                };
            }
            Ok(value) => last = Some(value),
            Err(error) => {
                return PollOutcome::Failed {
                    error,
                    attempts: attempt,
                };
            }
        }

        if attempt < policy.max_attempts {
            let delay = policy.delay_after(attempt);
            trace!(attempt, delay_ms = delay.as_millis() as u64, "Waiting before next attempt");
            tokio::time::sleep(delay).await;
        }
    }

    PollOutcome::Exhausted {
        last,
        attempts: policy.max_attempts,
    }
}
