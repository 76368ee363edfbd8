use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;
use url::Url;

use crate::error::{FeedError, Result};

/// Raw response handed back by the HTTP port.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

/// HTTP port the remote loader fetches through.
///
/// The returned future may complete on any executor thread; callers
/// dispatch elsewhere if they need to. Any error is a transport failure
/// and its contents are never inspected by the core.
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn get(&self, url: &Url) -> Result<HttpResponse>;
}

/// Production HTTP client backed by reqwest.
pub struct ReqwestHttpClient {
    client: reqwest::Client,
    timeout: Duration,
}

impl ReqwestHttpClient {
    pub fn new(timeout_seconds: u64) -> Self {
        Self {
            client: reqwest::Client::new(),
            timeout: Duration::from_secs(timeout_seconds),
        }
    }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn get(&self, url: &Url) -> Result<HttpResponse> {
        let response = self
            .client
            .get(url.as_str())
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| {
                debug!("Feed request failed: {e}");
                FeedError::Connectivity
            })?;

        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| {
                debug!("Failed to read feed payload: {e}");
                FeedError::Connectivity
            })?
            .to_vec();

        debug!("Fetched feed payload: status {status}, {} bytes", body.len());
        Ok(HttpResponse { status, body })
    }
}
