//! Reconnect supervisor
//!
//! Repeats connection attempts until the client is closed or too many
//! attempts fail in a row. An attempt that reached sync resets the count.
//! Every attempt is followed by the same fixed back-off.

use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::time::Duration;

use futures_util::FutureExt;
use tomon_common::GatewayConfig;

/// Retry tuning
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReconnectPolicy {
    /// Consecutive failures tolerated before giving up
    pub max_attempts: u32,
    /// Pause after every attempt
    pub delay: Duration,
}

impl ReconnectPolicy {
    #[must_use]
    pub fn from_config(config: &GatewayConfig) -> Self {
        Self {
            max_attempts: config.reconnect_attempts,
            delay: config.reconnect_delay,
        }
    }
}

impl Default for ReconnectPolicy {
    fn default() -> Self {
        Self::from_config(&GatewayConfig::default())
    }
}

/// Consecutive-failure counter
#[derive(Debug, Clone)]
pub struct RetryBudget {
    policy: ReconnectPolicy,
    failures: u32,
}

impl RetryBudget {
    #[must_use]
    pub fn new(policy: ReconnectPolicy) -> Self {
        Self {
            policy,
            failures: 0,
        }
    }

    pub fn record_success(&mut self) {
        self.failures = 0;
    }

    /// Count a failure; returns whether another attempt is allowed
    pub fn record_failure(&mut self) -> bool {
        self.failures = self.failures.saturating_add(1);
        self.failures < self.policy.max_attempts
    }

    #[must_use]
    pub fn failures(&self) -> u32 {
        self.failures
    }
}

/// Result of one connection attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptOutcome {
    /// The identity ack arrived (the connection may have dropped since)
    Synced,
    Failed,
}

/// Why the supervisor stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuperviseExit {
    Closed,
    Exhausted { attempts: u32 },
}

/// Run attempts until `is_closed` reports true or the budget is spent
///
/// A panicking attempt counts as a failure.
pub async fn supervise<C, A, Fut>(policy: ReconnectPolicy, is_closed: C, mut attempt: A) -> SuperviseExit
where
    C: Fn() -> bool,
    A: FnMut() -> Fut,
    Fut: Future<Output = AttemptOutcome>,
{
    let mut budget = RetryBudget::new(policy);

    loop {
        if is_closed() {
            return SuperviseExit::Closed;
        }

        let outcome = match AssertUnwindSafe(attempt()).catch_unwind().await {
            Ok(outcome) => outcome,
            Err(_) => {
                tracing::error!("Connection attempt panicked");
                AttemptOutcome::Failed
            }
        };

        match outcome {
            AttemptOutcome::Synced => budget.record_success(),
            AttemptOutcome::Failed => {
                if !budget.record_failure() {
                    return SuperviseExit::Exhausted {
                        attempts: budget.failures(),
                    };
                }
                tracing::debug!(
                    failures = budget.failures(),
                    max = policy.max_attempts,
                    "Connection attempt failed"
                );
            }
        }

        if is_closed() {
            return SuperviseExit::Closed;
        }
        tokio::time::sleep(policy.delay).await;
    }
}
