//! Network seam used by the prober.

use reqwest::redirect;
use thiserror::Error;
use url::Url;

use crate::Error;

/// Maximum redirect hops followed within one probe
pub const MAX_REDIRECTS: usize = 10;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),
}

/// Sends the single liveness request of a probe
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    /// Request `url` and return the status code of the response
    async fn get(&self, url: &str) -> Result<u16, TransportError>;
}

/// HTTP/HTTPS transport backed by one shared reqwest client
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Build the transport. No client-level timeout is set, the prober owns the budget.
    pub fn new() -> Result<Self, Error> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("upcheck/", env!("CARGO_PKG_VERSION")))
            .redirect(redirect::Policy::limited(MAX_REDIRECTS))
            .build()
            .map_err(Error::Client)?;

        Ok(Self { client })
    }
}

#[async_trait::async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &str) -> Result<u16, TransportError> {
        let url = Url::parse(url)?;
        let response = self.client.get(url).send().await?;

        // Any response counts, whatever its status
        Ok(response.status().as_u16())
    }
}
