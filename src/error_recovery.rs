// src/error_recovery.rs
//! Retry with exponential backoff for page fetches.

use std::fmt::Display;
use std::time::Duration;

/// Retries an async operation with exponential backoff.
///
/// Runs the operation at most `max_attempts` times (at least once) and
/// returns the last error if every attempt fails.
pub async fn retry_with_backoff<F, T, E, Fut>(
    mut operation: F,
    max_attempts: u32,
    initial_delay: Duration,
    max_delay: Duration,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    E: Display,
    Fut: std::future::Future<Output = Result<T, E>>,
{
    let max_attempts = max_attempts.max(1);
    let mut delay = initial_delay;
    let mut attempt = 1;

    loop {
        match operation().await {
            Ok(result) => return Ok(result),
            Err(e) if attempt < max_attempts => {
                log::warn!(
                    "Attempt {}/{} failed: {}; retrying after {:?}",
                    attempt,
                    max_attempts,
                    e,
                    delay
                );
                tokio::time::sleep(delay).await;

                // Exponential backoff with cap
                delay = std::cmp::min(delay * 2, max_delay);
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}
