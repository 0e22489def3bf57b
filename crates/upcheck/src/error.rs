use thiserror::Error;

/// Configuration errors raised before any probe is dispatched.
///
/// An unreachable endpoint is never one of these; it is reported as a
/// down [`ProbeOutcome`](crate::ProbeOutcome).
#[derive(Debug, Error)]
pub enum Error {
    #[error("Timeout too small: {0} ms (min: {min} ms)", min = crate::probe::MIN_TIMEOUT_MS)]
    TimeoutTooSmall(u64),

    #[error("Timeout too large: {0} ms (max: {max} ms)", max = crate::probe::MAX_TIMEOUT_MS)]
    TimeoutTooLarge(u64),

    #[error("Concurrency limit must be at least 1")]
    ZeroConcurrency,

    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}
