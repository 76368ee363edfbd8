use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;
use uuid::Uuid;

use crate::domain::FeedImage;
use crate::error::Result;

/// Feed item as held at the storage boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalFeedImage {
    pub id: Uuid,
    pub description: Option<String>,
    pub location: Option<String>,
    pub url: Url,
}

impl From<FeedImage> for LocalFeedImage {
    fn from(image: FeedImage) -> Self {
        LocalFeedImage {
            id: image.id,
            description: image.description,
            location: image.location,
            url: image.url,
        }
    }
}

impl From<LocalFeedImage> for FeedImage {
    fn from(image: LocalFeedImage) -> Self {
        FeedImage {
            id: image.id,
            description: image.description,
            location: image.location,
            url: image.url,
        }
    }
}

/// The single record a feed store holds: the ordered cached feed plus the
/// timestamp it was written at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheRecord {
    pub feed: Vec<LocalFeedImage>,
    pub timestamp: DateTime<Utc>,
}

/// Storage port for the cached feed.
///
/// A store holds at most one record. `insert` replaces it wholesale, never
/// merges. `delete` on an empty store succeeds. `retrieve` distinguishes an
/// empty store (`Ok(None)`) from a failed read (`Err`). Completions may run
/// on any executor thread.
#[async_trait]
pub trait FeedStore: Send + Sync {
    async fn retrieve(&self) -> Result<Option<CacheRecord>>;
    async fn insert(&self, feed: Vec<LocalFeedImage>, timestamp: DateTime<Utc>) -> Result<()>;
    async fn delete(&self) -> Result<()>;
}
