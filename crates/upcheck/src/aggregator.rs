//! Fan-out of probes over an endpoint list and ordered collection of results.

use std::sync::Arc;

use futures::future::join_all;
use serde::Serialize;
use tokio::sync::Semaphore;
use tracing::info;

use crate::endpoint::Endpoint;
use crate::error::Error;
use crate::outcome::ProbeOutcome;
use crate::probe::Prober;
use crate::transport::HttpTransport;

/// One endpoint paired with the outcome of its probe
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckResult {
    pub endpoint: Endpoint,
    pub outcome: ProbeOutcome,
}

/// Up-count over total for one check cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Summary {
    pub up_count: usize,
    pub total: usize,
}

impl Summary {
    pub fn from_results(results: &[CheckResult]) -> Self {
        let up_count = results.iter().filter(|result| result.outcome.is_up()).count();
        Self { up_count, total: results.len() }
    }

    /// Every checked endpoint is up
    pub fn is_healthy(&self) -> bool {
        self.up_count == self.total
    }

    /// Process exit status: 0 when healthy, 1 when anything is down
    pub fn exit_code(&self) -> u8 {
        if self.is_healthy() { 0 } else { 1 }
    }
}

/// Ordered results of one check cycle
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub results: Vec<CheckResult>,
    pub summary: Summary,
}

/// Probes a list of endpoints concurrently
pub struct Aggregator {
    prober: Prober,
    limiter: Option<Semaphore>,
}

impl Aggregator {
    /// Aggregator probing every endpoint at once
    pub fn new(prober: Prober) -> Self {
        Self { prober, limiter: None }
    }

    /// Bound the number of probes in flight at any time
    pub fn with_max_concurrency(mut self, max_concurrency: usize) -> Result<Self, Error> {
        if max_concurrency == 0 {
            return Err(Error::ZeroConcurrency);
        }
        self.limiter = Some(Semaphore::new(max_concurrency));
        Ok(self)
    }

    /// Probe every endpoint and wait for all of them.
    ///
    /// `results[i]` always belongs to `endpoints[i]`, whatever order the
    /// probes finished in. Down endpoints never turn into errors.
    pub async fn check(&self, endpoints: &[Endpoint]) -> Report {
        info!(
            count = endpoints.len(),
            timeout_ms = u64::try_from(self.prober.timeout().as_millis()).unwrap_or(u64::MAX),
            "Checking endpoints"
        );

        let outcomes = join_all(endpoints.iter().map(|endpoint| self.probe_one(endpoint))).await;

        let results: Vec<CheckResult> = endpoints
            .iter()
            .cloned()
            .zip(outcomes)
            .map(|(endpoint, outcome)| CheckResult { endpoint, outcome })
            .collect();

        let summary = Summary::from_results(&results);
        info!(up = summary.up_count, total = summary.total, "Check complete");

        Report { results, summary }
    }

    async fn probe_one(&self, endpoint: &Endpoint) -> ProbeOutcome {
        // The permit is held for the whole probe, the budget starts once it is acquired.
        // The limiter is owned here and never closed, so acquiring cannot fail.
        let _permit = match &self.limiter {
            Some(limiter) => limiter.acquire().await.ok(),
            None => None,
        };

        self.prober.probe(endpoint).await
    }
}

/// Check `endpoints` over HTTP with a `timeout_ms` budget per probe.
///
/// Only an invalid timeout or an HTTP client that cannot be built is an
/// error; unreachable endpoints are reported in the [`Report`].
pub async fn check(endpoints: &[Endpoint], timeout_ms: u64) -> Result<Report, Error> {
    let transport = Arc::new(HttpTransport::new()?);
    let prober = Prober::from_millis(transport, timeout_ms)?;

    Ok(Aggregator::new(prober).check(endpoints).await)
}
