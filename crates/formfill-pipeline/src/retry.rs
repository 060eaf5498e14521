//! Bounded fixed-delay retry around generative backend calls.

use crate::error::PipelineError;
use formfill_domain::GenerativeBackend;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{info, warn};

/// Retry bounds for a generative call.
///
/// Fixed delay, no backoff growth, no jitter. Blocked responses, empty
/// responses, and transport errors are all retried the same way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first.
    pub max_attempts: u32,
    /// Sleep between attempts.
    pub delay: Duration,
}

impl RetryPolicy {
    /// A policy with no sleeps, for tests.
    pub fn immediate(max_attempts: u32) -> Self {
        Self {
            max_attempts,
            delay: Duration::ZERO,
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            delay: Duration::from_secs(5),
        }
    }
}

/// Call the backend until it answers or the attempt bound is hit.
///
/// After the final failure no further attempt is made and
/// [`PipelineError::RetriesExhausted`] carries the last error.
pub async fn generate_with_retry<B>(
    backend: &B,
    prompt: &str,
    policy: &RetryPolicy,
) -> Result<String, PipelineError>
where
    B: GenerativeBackend + ?Sized,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 0;

    loop {
        attempt += 1;
        match backend.generate(prompt).await {
            Ok(text) => return Ok(text),
            Err(e) => {
                warn!(attempt, max_attempts, error = %e, "generative backend call failed");
                if attempt >= max_attempts {
                    return Err(PipelineError::RetriesExhausted {
                        attempts: max_attempts,
                        last: e,
                    });
                }
            }
        }
        if !policy.delay.is_zero() {
            info!(delay_secs = policy.delay.as_secs(), "retrying backend call after delay");
            sleep(policy.delay).await;
        }
    }
}
