//! Bounded retry with exponential backoff for transient transport failures.
//!
//! Only the catalog and message endpoints go through here. A failed file
//! download is never retried, it is logged and skipped by the caller.

use crate::config::RetryConfig;
use crate::errors::Result;

use log::{info, warn};
use std::future::Future;
use std::time::Duration;

/// Run `operation` until it succeeds, fails with a non-retryable error, or the
/// retry budget in `config` is spent. The last error is returned unchanged.
pub async fn with_retry<F, Fut, T>(config: &RetryConfig, label: &str, mut operation: F) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let mut attempt = 0;
    let mut delay = config.initial_delay;

    loop {
        match operation().await {
            Ok(result) => {
                if attempt > 0 {
                    info!("{label} succeeded after {} attempts", attempt + 1);
                }
                return Ok(result);
            }
            Err(why) if why.is_retryable() && attempt < config.max_retries => {
                attempt += 1;
                warn!(
                    "{label} failed with {why}, retry {attempt}/{} in {delay:.2?}",
                    config.max_retries
                );
                tokio::time::sleep(delay).await;

                delay = Duration::from_secs_f64(delay.as_secs_f64() * config.backoff_multiplier)
                    .min(config.max_delay);
            }
            Err(why) => return Err(why),
        }
    }
}
