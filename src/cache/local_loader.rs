use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::debug;

use crate::cache::policy;
use crate::cache::store::{FeedStore, LocalFeedImage};
use crate::domain::{FeedImage, FeedLoader};
use crate::error::Result;

/// Clock source injected into the loader so freshness decisions stay
/// deterministic under test.
pub type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// Orchestrates save/load/validate against the storage port.
///
/// Every operation is scoped to its returned future: dropping the future
/// (or the loader) before the store replies simply discards the result.
/// The store still runs any submitted operation to completion.
pub struct LocalFeedLoader {
    store: Arc<dyn FeedStore>,
    current_date: Clock,
}

impl LocalFeedLoader {
    pub fn new(store: Arc<dyn FeedStore>, current_date: Clock) -> Self {
        Self {
            store,
            current_date,
        }
    }

    /// Replaces the cached feed, stamped with the current date.
    ///
    /// The old record is deleted first; a deletion error aborts the save and
    /// no insertion is attempted.
    pub async fn save(&self, feed: Vec<FeedImage>) -> Result<()> {
        self.store.delete().await?;

        let local: Vec<LocalFeedImage> = feed.into_iter().map(LocalFeedImage::from).collect();
        self.store.insert(local, (self.current_date)()).await
    }

    /// Loads the cached feed, serving an empty feed when the cache is empty
    /// or stale. Staleness never triggers deletion here; cleanup belongs to
    /// `validate_cache`.
    pub async fn load(&self) -> Result<Vec<FeedImage>> {
        match self.store.retrieve().await? {
            Some(record) if policy::is_fresh(record.timestamp, (self.current_date)()) => {
                Ok(record.feed.into_iter().map(FeedImage::from).collect())
            }
            _ => Ok(Vec::new()),
        }
    }

    /// Drops the cached record when it is stale or unreadable. Best-effort
    /// maintenance: every outcome, including the deletion's, is swallowed.
    pub async fn validate_cache(&self) {
        let invalid = match self.store.retrieve().await {
            Err(_) => true,
            Ok(Some(record)) => !policy::is_fresh(record.timestamp, (self.current_date)()),
            Ok(None) => false,
        };

        if invalid {
            if let Err(error) = self.store.delete().await {
                debug!("Failed to delete invalid cache: {error}");
            }
        }
    }
}

#[async_trait]
impl FeedLoader for LocalFeedLoader {
    async fn load_feed(&self) -> Result<Vec<FeedImage>> {
        self.load().await
    }
}
