//! HTTP transport abstraction for testability
//!
//! Both classification strategies fetch through [`Transport`], so tests can
//! drive them with in-memory responses instead of live tile and geocoding
//! servers.

use crate::constants::api::USER_AGENT;
use crate::error::{Error, Result};
use std::future::Future;
use std::time::Duration;
use tracing::trace;

/// Trait for asynchronous HTTP GET
pub trait Transport: Send + Sync {
    /// Fetch `url` and return the response body
    ///
    /// Non-success statuses are errors.
    fn get(&self, url: &str) -> impl Future<Output = Result<Vec<u8>>> + Send;
}

/// Real transport using reqwest
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Create a transport whose requests give up after `timeout`
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;

        Ok(Self { client })
    }
}

impl Transport for ReqwestTransport {
    async fn get(&self, url: &str) -> Result<Vec<u8>> {
        trace!(url, "GET");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| Error::Fetch(format!("Request to {} failed: {}", url, e)))?;

        if !response.status().is_success() {
            return Err(Error::Fetch(format!(
                "{} returned status: {}",
                url,
                response.status()
            )));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| Error::Fetch(format!("Failed to read body from {}: {}", url, e)))?;

        Ok(body.to_vec())
    }
}

#[cfg(test)]
pub(crate) mod stub {
    use super::*;
    use std::sync::{Arc, Mutex};

    /// Canned responses keyed by request kind, with a request log
    #[derive(Clone, Default)]
    pub struct StubTransport {
        tile: Option<Vec<u8>>,
        geocode: Option<Vec<u8>>,
        requests: Arc<Mutex<Vec<String>>>,
    }

    impl StubTransport {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_tile(mut self, body: Vec<u8>) -> Self {
            self.tile = Some(body);
            self
        }

        pub fn with_geocode(mut self, body: &str) -> Self {
            self.geocode = Some(body.as_bytes().to_vec());
            self
        }

        pub fn requests(&self) -> Vec<String> {
            self.requests.lock().unwrap().clone()
        }

        pub fn tile_requests(&self) -> usize {
            self.requests().iter().filter(|u| !is_geocode(u)).count()
        }

        pub fn geocode_requests(&self) -> usize {
            self.requests().iter().filter(|u| is_geocode(u)).count()
        }
    }

    fn is_geocode(url: &str) -> bool {
        url.contains("/reverse")
    }

    impl Transport for StubTransport {
        async fn get(&self, url: &str) -> Result<Vec<u8>> {
            self.requests.lock().unwrap().push(url.to_string());

            let body = if is_geocode(url) {
                &self.geocode
            } else {
                &self.tile
            };
            body.clone()
                .ok_or_else(|| Error::Fetch(format!("{} returned status: 404 Not Found", url)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_creation() {
        let transport = ReqwestTransport::new(Duration::from_secs(5)).unwrap();
        assert!(format!("{:?}", transport).contains("ReqwestTransport"));
    }

    #[tokio::test]
    async fn test_stub_records_requests() {
        let stub = stub::StubTransport::new().with_geocode("{}");
        assert!(stub.get("http://tiles/5/1/2.png").await.is_err());
        assert!(stub.get("http://geo/reverse?lat=0&lon=0").await.is_ok());
        assert_eq!(stub.tile_requests(), 1);
        assert_eq!(stub.geocode_requests(), 1);
    }
}
