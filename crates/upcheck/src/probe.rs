//! Single-endpoint liveness probe.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::{Instant, timeout};
use tracing::debug;

use crate::endpoint::Endpoint;
use crate::error::Error;
use crate::outcome::{DownReason, ProbeOutcome};
use crate::transport::Transport;

pub const MIN_TIMEOUT_MS: u64 = 100;
pub const MAX_TIMEOUT_MS: u64 = 300_000; // 5 minutes

/// Validate a probe timeout in milliseconds
pub fn validate_timeout(timeout_ms: u64) -> Result<Duration, Error> {
    if timeout_ms < MIN_TIMEOUT_MS {
        return Err(Error::TimeoutTooSmall(timeout_ms));
    }

    if timeout_ms > MAX_TIMEOUT_MS {
        return Err(Error::TimeoutTooLarge(timeout_ms));
    }

    Ok(Duration::from_millis(timeout_ms))
}

/// Checks one endpoint at a time against a fixed time budget
#[derive(Clone)]
pub struct Prober {
    transport: Arc<dyn Transport>,
    timeout: Duration,
}

impl Prober {
    /// Create a prober, rejecting budgets outside the allowed range
    pub fn new(transport: Arc<dyn Transport>, timeout: Duration) -> Result<Self, Error> {
        let timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
        validate_timeout(timeout_ms)?;

        Ok(Self { transport, timeout })
    }

    /// Create a prober from a timeout in milliseconds
    pub fn from_millis(transport: Arc<dyn Transport>, timeout_ms: u64) -> Result<Self, Error> {
        Self::new(transport, Duration::from_millis(timeout_ms))
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Probe `endpoint` once.
    ///
    /// Never fails: an unreachable endpoint is a down outcome. The request is
    /// raced against the timer, and both are dropped before this returns, so a
    /// request that loses the race is cancelled rather than left in flight.
    pub async fn probe(&self, endpoint: &Endpoint) -> ProbeOutcome {
        debug!(url = %endpoint.url, "Dispatching probe");

        let start = Instant::now();
        let result = timeout(self.timeout, self.transport.get(&endpoint.url)).await;
        let elapsed_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);

        let reason = match result {
            Ok(Ok(code)) => {
                debug!(url = %endpoint.url, status = code, elapsed_ms, "Endpoint up");
                return ProbeOutcome::up(code, elapsed_ms);
            }
            Ok(Err(error)) => {
                debug!(url = %endpoint.url, %error, elapsed_ms, "Transport failed");
                DownReason::Transport
            }
            Err(_) => DownReason::Timeout,
        };

        debug!(url = %endpoint.url, ?reason, elapsed_ms, "Endpoint down");
        ProbeOutcome::down(elapsed_ms)
    }
}
