use serde::Deserialize;
use url::Url;
use uuid::Uuid;

use crate::domain::FeedImage;
use crate::error::{FeedError, Result};

/// Feed item as it appears on the wire.
#[derive(Debug, Deserialize)]
pub(crate) struct RemoteFeedItem {
    pub id: Uuid,
    pub description: Option<String>,
    pub location: Option<String>,
    pub image: Url,
}

#[derive(Deserialize)]
struct Root {
    items: Vec<RemoteFeedItem>,
}

const OK_200: u16 = 200;

/// Maps a raw payload and status code into wire items.
///
/// Valid only for a 200 whose body decodes as `{"items": [...]}` with a
/// parseable id and image locator on every item. Every violation collapses
/// into the same invalid-data error; there are no partial results.
pub(crate) fn map(body: &[u8], status: u16) -> Result<Vec<RemoteFeedItem>> {
    if status != OK_200 {
        return Err(FeedError::InvalidData);
    }

    let root: Root = serde_json::from_slice(body).map_err(|_| FeedError::InvalidData)?;
    Ok(root.items)
}

impl From<RemoteFeedItem> for FeedImage {
    fn from(item: RemoteFeedItem) -> Self {
        FeedImage {
            id: item.id,
            description: item.description,
            location: item.location,
            url: item.image,
        }
    }
}
