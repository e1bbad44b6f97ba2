//! Timeout helper.

use std::future::Future;
use std::time::Duration;

use crate::error::ThreadrunError;

/// Wrap a request future with a deadline.
pub async fn with_timeout<T>(
    duration: Duration,
    future: impl Future<Output = Result<T, ThreadrunError>>,
) -> Result<T, ThreadrunError> {
    match tokio::time::timeout(duration, future).await {
        Ok(result) => result,
        Err(_) => Err(ThreadrunError::Timeout(duration.as_millis() as u64)),
    }
}
