//! Per-endpoint probe outcomes.

use std::fmt;

use serde::ser::{Serialize, SerializeStruct, Serializer};

/// Status reported for one probe
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeStatus {
    /// Status code of the response that came back in time
    Code(u16),
    /// No response in time, or the transport failed
    Timeout,
}

impl ProbeStatus {
    /// Numeric status code, if a response was received
    pub fn code(&self) -> Option<u16> {
        match self {
            ProbeStatus::Code(code) => Some(*code),
            ProbeStatus::Timeout => None,
        }
    }
}

impl fmt::Display for ProbeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProbeStatus::Code(code) => write!(f, "{code}"),
            ProbeStatus::Timeout => write!(f, "TIMEOUT"),
        }
    }
}

impl Serialize for ProbeStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ProbeStatus::Code(code) => serializer.serialize_u16(*code),
            ProbeStatus::Timeout => serializer.serialize_str("TIMEOUT"),
        }
    }
}

/// Why a probe resolved down. Only logged, callers just see [`ProbeStatus::Timeout`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DownReason {
    Timeout,
    Transport,
}

/// Result of checking one endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbeOutcome {
    status: ProbeStatus,
    elapsed_ms: u64,
}

impl ProbeOutcome {
    /// A response with `code` arrived after `elapsed_ms`
    pub fn up(code: u16, elapsed_ms: u64) -> Self {
        Self { status: ProbeStatus::Code(code), elapsed_ms }
    }

    /// Nothing usable arrived within the budget
    pub fn down(elapsed_ms: u64) -> Self {
        Self { status: ProbeStatus::Timeout, elapsed_ms }
    }

    pub fn is_up(&self) -> bool {
        matches!(self.status, ProbeStatus::Code(_))
    }

    pub fn status(&self) -> ProbeStatus {
        self.status
    }

    /// Local wall-clock time from dispatch to resolution
    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }
}

impl Serialize for ProbeOutcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ProbeOutcome", 3)?;
        state.serialize_field("up", &self.is_up())?;
        state.serialize_field("status", &self.status)?;
        state.serialize_field("elapsed_ms", &self.elapsed_ms)?;
        state.end()
    }
}
