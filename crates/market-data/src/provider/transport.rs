//! HTTP transport seam.
//!
//! Providers issue requests through [`HttpTransport`] so the request/paging
//! logic can be exercised without a network.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::HeaderMap;
use tracing::debug;

use crate::errors::MarketDataError;

/// Blocking GET returning the raw response body.
pub trait HttpTransport {
    /// Fetch `url` with the given headers.
    ///
    /// Implementations must return [`MarketDataError::HttpStatus`] for
    /// non-success responses and [`MarketDataError::Network`] for transport
    /// failures.
    fn get(&self, url: &str, headers: &HeaderMap) -> Result<Vec<u8>, MarketDataError>;
}

impl<T: HttpTransport + ?Sized> HttpTransport for &T {
    fn get(&self, url: &str, headers: &HeaderMap) -> Result<Vec<u8>, MarketDataError> {
        (**self).get(url, headers)
    }
}

/// [`HttpTransport`] backed by a blocking `reqwest` client.
#[derive(Clone, Debug)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Build a transport. `None` disables the request timeout entirely.
    pub fn new(timeout: Option<Duration>) -> Result<Self, MarketDataError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

impl HttpTransport for ReqwestTransport {
    fn get(&self, url: &str, headers: &HeaderMap) -> Result<Vec<u8>, MarketDataError> {
        debug!("GET {}", url);

        let response = self.client.get(url).headers(headers.clone()).send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(MarketDataError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes()?;
        debug!("Received {} bytes from {}", body.len(), url);
        Ok(body.to_vec())
    }
}
