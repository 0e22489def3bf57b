//! upcheck - concurrent endpoint probe engine
//!
//! Takes a set of endpoints, checks every one of them in parallel with a
//! bounded timeout, and folds the outcomes into an ordered report plus a
//! single healthy/unhealthy signal.

pub mod aggregator;
pub mod endpoint;
pub mod error;
pub mod outcome;
pub mod probe;
pub mod transport;

// Re-export main types
pub use aggregator::{Aggregator, CheckResult, Report, Summary, check};
pub use endpoint::Endpoint;
pub use error::Error;
pub use outcome::{ProbeOutcome, ProbeStatus};
pub use probe::Prober;
pub use transport::{HttpTransport, Transport, TransportError};

/// Result type for fallible engine setup
pub type Result<T> = std::result::Result<T, Error>;

/// Default probe timeout in milliseconds
pub const DEFAULT_TIMEOUT_MS: u64 = 5000;
