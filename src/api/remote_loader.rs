use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, instrument};
use url::Url;

use crate::api::client::HttpClient;
use crate::api::mapper;
use crate::domain::{FeedImage, FeedLoader};
use crate::error::{FeedError, Result};

/// Loads the feed from the remote endpoint. One fetch per call, no retries;
/// timeouts belong to the HTTP port.
pub struct RemoteFeedLoader {
    url: Url,
    client: Arc<dyn HttpClient>,
}

impl RemoteFeedLoader {
    pub fn new(url: Url, client: Arc<dyn HttpClient>) -> Self {
        Self { url, client }
    }

    #[instrument(skip(self))]
    pub async fn load(&self) -> Result<Vec<FeedImage>> {
        let response = match self.client.get(&self.url).await {
            Ok(response) => response,
            // Transport errors surface uniformly, whatever their cause
            Err(_) => return Err(FeedError::Connectivity),
        };

        let items = mapper::map(&response.body, response.status)?;
        let images: Vec<FeedImage> = items.into_iter().map(FeedImage::from).collect();

        info!("Fetched {} feed images", images.len());
        Ok(images)
    }
}

#[async_trait]
impl FeedLoader for RemoteFeedLoader {
    async fn load_feed(&self) -> Result<Vec<FeedImage>> {
        self.load().await
    }
}
