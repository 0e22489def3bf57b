use std::fmt;

use serde::{Deserialize, Serialize};

/// A named network target to be checked
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawEndpoint")]
pub struct Endpoint {
    /// Fully-qualified address of the target
    pub url: String,

    /// Display label, the url itself when none was given
    pub name: String,
}

/// On-disk shape, where `name` may be missing
#[derive(Deserialize)]
struct RawEndpoint {
    url: String,
    #[serde(default)]
    name: Option<String>,
}

impl From<RawEndpoint> for Endpoint {
    fn from(raw: RawEndpoint) -> Self {
        Self::new(raw.url, raw.name)
    }
}

impl Endpoint {
    /// Create an endpoint, falling back to the url when `name` is unset or blank
    pub fn new(url: impl Into<String>, name: Option<String>) -> Self {
        let url = url.into();
        let name = name.filter(|name| !name.trim().is_empty()).unwrap_or_else(|| url.clone());
        Self { url, name }
    }

    /// Endpoint labelled by its own url
    pub fn from_url(url: impl Into<String>) -> Self {
        Self::new(url, None)
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.name == self.url {
            write!(f, "{}", self.url)
        } else {
            write!(f, "{} ({})", self.name, self.url)
        }
    }
}
