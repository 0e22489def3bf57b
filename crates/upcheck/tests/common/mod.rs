//! Scripted transport shared by the integration tests

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use upcheck::{Transport, TransportError};

/// What the fake network does for one url
#[derive(Debug, Clone, Copy)]
pub enum Script {
    /// Respond with `code` after `after`
    Respond { code: u16, after: Duration },
    /// Fail with a transport error after `after`
    Fail { after: Duration },
    /// Never answer
    Hang,
}

/// Transport replaying a fixed script per url, counting requests in flight
#[derive(Default)]
pub struct ScriptedTransport {
    scripts: HashMap<String, Script>,
    in_flight: Arc<AtomicUsize>,
    peak: Arc<AtomicUsize>,
    dispatched: AtomicUsize,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(mut self, url: &str, code: u16, after_ms: u64) -> Self {
        self.scripts
            .insert(url.to_string(), Script::Respond { code, after: Duration::from_millis(after_ms) });
        self
    }

    pub fn fail(mut self, url: &str, after_ms: u64) -> Self {
        self.scripts.insert(url.to_string(), Script::Fail { after: Duration::from_millis(after_ms) });
        self
    }

    pub fn hang(mut self, url: &str) -> Self {
        self.scripts.insert(url.to_string(), Script::Hang);
        self
    }

    /// Requests currently in flight
    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Highest number of requests that were ever in flight together
    pub fn peak(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }

    /// Total requests sent
    pub fn dispatched(&self) -> usize {
        self.dispatched.load(Ordering::SeqCst)
    }
}

/// Decrements the in-flight counter when the request future is dropped
struct InFlight(Arc<AtomicUsize>);

impl Drop for InFlight {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

#[async_trait::async_trait]
impl Transport for ScriptedTransport {
    async fn get(&self, url: &str) -> Result<u16, TransportError> {
        self.dispatched.fetch_add(1, Ordering::SeqCst);
        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(current, Ordering::SeqCst);
        let _guard = InFlight(self.in_flight.clone());

        match self.scripts.get(url).copied().unwrap_or(Script::Hang) {
            Script::Respond { code, after } => {
                tokio::time::sleep(after).await;
                Ok(code)
            }
            Script::Fail { after } => {
                tokio::time::sleep(after).await;
                Err(TransportError::InvalidUrl(url::ParseError::EmptyHost))
            }
            Script::Hang => std::future::pending().await,
        }
    }
}
