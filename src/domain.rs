use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use url::Url;
use uuid::Uuid;

use crate::error::Result;

/// A single item in the image feed. Value equality; immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedImage {
    pub id: Uuid,
    pub description: Option<String>,
    pub location: Option<String>,
    pub url: Url,
}

/// The one operation the presentation layer loads feeds through, served
/// interchangeably by the remote and local loaders.
#[async_trait]
pub trait FeedLoader {
    async fn load_feed(&self) -> Result<Vec<FeedImage>>;
}
