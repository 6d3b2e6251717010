use std::future::Future;
use std::time::Duration;
use tracing::warn;

const MAX_DELAY: Duration = Duration::from_secs(5);

/// Run an async operation up to `attempts` times, doubling the delay between tries.
///
/// The last error is returned unchanged so callers keep their typed errors.
/// `attempts == 1` means a single try with no retry.
pub async fn retry_async<F, Fut, T, E>(
    operation_name: &str,
    attempts: u32,
    initial_delay: Duration,
    mut operation: F,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
{
    let mut delay = initial_delay;
    let mut tries_left = attempts.max(1);

    loop {
        tries_left -= 1;
        let err = match operation().await {
            Ok(value) => return Ok(value),
            Err(e) if tries_left == 0 => return Err(e),
            Err(e) => e,
        };

        warn!(
            operation = operation_name,
            remaining = tries_left,
            backoff_ms = delay.as_millis() as u64,
            "operation failed, trying again: {}",
            err
        );
        tokio::time::sleep(delay).await;
        delay = next_delay(delay);
    }
}

/// Double the wait, never past `MAX_DELAY`
fn next_delay(delay: Duration) -> Duration {
    delay.saturating_mul(2).min(MAX_DELAY)
}
