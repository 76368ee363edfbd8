use std::fs;
use std::path::Path;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};
use tokio::sync::Mutex;
use url::Url;
use uuid::Uuid;

use crate::cache::store::{CacheRecord, FeedStore, LocalFeedImage};
use crate::error::{FeedError, Result};

/// SQLite-backed feed store.
///
/// One `cache` row owns an ordered set of `cache_image` child rows. Every
/// operation runs as one explicit transaction on the store's connection.
/// The fair mutex in front of the connection is this backend's serialized
/// write context, and no await point exists while it is held, so a dropped
/// caller can never leave a transaction half-applied.
pub struct SqliteFeedStore {
    conn: Mutex<Connection>,
}

impl SqliteFeedStore {
    pub fn open<P: AsRef<Path>>(db_path: P) -> Result<Self> {
        if let Some(parent) = db_path.as_ref().parent() {
            fs::create_dir_all(parent).map_err(|e| FeedError::Database {
                message: format!("Failed to create store directory: {e}"),
            })?;
        }

        let conn = Connection::open(db_path).map_err(|e| FeedError::Database {
            message: format!("Failed to open database: {e}"),
        })?;

        conn.execute_batch(
            r#"
            PRAGMA journal_mode=WAL;
            PRAGMA foreign_keys=ON;
            CREATE TABLE IF NOT EXISTS cache (
                id         INTEGER PRIMARY KEY,
                timestamp  TEXT NOT NULL
            );
            CREATE TABLE IF NOT EXISTS cache_image (
                cache_id    INTEGER NOT NULL REFERENCES cache(id) ON DELETE CASCADE,
                position    INTEGER NOT NULL,
                image_id    TEXT NOT NULL,
                description TEXT,
                location    TEXT,
                url         TEXT NOT NULL,
                PRIMARY KEY (cache_id, position)
            );
            "#,
        )
        .map_err(|e| FeedError::Database {
            message: format!("Failed to bootstrap schema: {e}"),
        })?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }
}

#[async_trait]
impl FeedStore for SqliteFeedStore {
    async fn retrieve(&self) -> Result<Option<CacheRecord>> {
        let conn = self.conn.lock().await;

        let mut stmt = conn
            .prepare("SELECT id, timestamp FROM cache LIMIT 1")
            .map_err(|e| FeedError::Retrieval {
                message: format!("Failed to prepare cache query: {e}"),
            })?;
        let mut rows = stmt.query([]).map_err(|e| FeedError::Retrieval {
            message: format!("Failed to query cache: {e}"),
        })?;

        let (cache_id, timestamp) = match rows.next().map_err(|e| FeedError::Retrieval {
            message: format!("Failed to read cache row: {e}"),
        })? {
            Some(row) => {
                let id: i64 = row.get(0).map_err(|e| FeedError::Retrieval {
                    message: format!("Failed to get cache id: {e}"),
                })?;
                let raw: String = row.get(1).map_err(|e| FeedError::Retrieval {
                    message: format!("Failed to get timestamp: {e}"),
                })?;
                let timestamp = DateTime::parse_from_rfc3339(&raw)
                    .map_err(|e| FeedError::Retrieval {
                        message: format!("Failed to parse timestamp: {e}"),
                    })?
                    .with_timezone(&Utc);
                (id, timestamp)
            }
            None => return Ok(None),
        };

        let mut stmt = conn
            .prepare(
                "SELECT image_id, description, location, url FROM cache_image
                 WHERE cache_id = ?1 ORDER BY position",
            )
            .map_err(|e| FeedError::Retrieval {
                message: format!("Failed to prepare image query: {e}"),
            })?;
        let mut rows = stmt.query(params![cache_id]).map_err(|e| FeedError::Retrieval {
            message: format!("Failed to query images: {e}"),
        })?;

        let mut feed = Vec::new();
        while let Some(row) = rows.next().map_err(|e| FeedError::Retrieval {
            message: format!("Failed to read image row: {e}"),
        })? {
            let id: String = row.get(0).map_err(|e| FeedError::Retrieval {
                message: format!("Failed to get image id: {e}"),
            })?;
            let description: Option<String> = row.get(1).map_err(|e| FeedError::Retrieval {
                message: format!("Failed to get description: {e}"),
            })?;
            let location: Option<String> = row.get(2).map_err(|e| FeedError::Retrieval {
                message: format!("Failed to get location: {e}"),
            })?;
            let url: String = row.get(3).map_err(|e| FeedError::Retrieval {
                message: format!("Failed to get url: {e}"),
            })?;

            feed.push(LocalFeedImage {
                id: Uuid::parse_str(&id).map_err(|e| FeedError::Retrieval {
                    message: format!("Failed to parse image id: {e}"),
                })?,
                description,
                location,
                url: Url::parse(&url).map_err(|e| FeedError::Retrieval {
                    message: format!("Failed to parse image url: {e}"),
                })?,
            });
        }

        Ok(Some(CacheRecord { feed, timestamp }))
    }

    async fn insert(&self, feed: Vec<LocalFeedImage>, timestamp: DateTime<Utc>) -> Result<()> {
        let mut conn = self.conn.lock().await;

        let tx = conn.transaction().map_err(|e| FeedError::Insertion {
            message: format!("Failed to begin transaction: {e}"),
        })?;

        // Replace wholesale: drop the existing record (children cascade),
        // then write the new one in the same transaction
        tx.execute("DELETE FROM cache", [])
            .map_err(|e| FeedError::Insertion {
                message: format!("Failed to replace cache: {e}"),
            })?;
        tx.execute(
            "INSERT INTO cache (timestamp) VALUES (?1)",
            params![timestamp.to_rfc3339()],
        )
        .map_err(|e| FeedError::Insertion {
            message: format!("Failed to insert cache row: {e}"),
        })?;

        let cache_id = tx.last_insert_rowid();
        for (position, image) in feed.iter().enumerate() {
            tx.execute(
                "INSERT INTO cache_image (cache_id, position, image_id, description, location, url)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    cache_id,
                    position as i64,
                    image.id.to_string(),
                    image.description,
                    image.location,
                    image.url.as_str()
                ],
            )
            .map_err(|e| FeedError::Insertion {
                message: format!("Failed to insert image row: {e}"),
            })?;
        }

        tx.commit().map_err(|e| FeedError::Insertion {
            message: format!("Failed to commit insert: {e}"),
        })
    }

    async fn delete(&self) -> Result<()> {
        let mut conn = self.conn.lock().await;

        let tx = conn.transaction().map_err(|e| FeedError::Deletion {
            message: format!("Failed to begin transaction: {e}"),
        })?;

        // Deleting from an empty store touches zero rows and still succeeds
        tx.execute("DELETE FROM cache", [])
            .map_err(|e| FeedError::Deletion {
                message: format!("Failed to delete cache: {e}"),
            })?;

        tx.commit().map_err(|e| FeedError::Deletion {
            message: format!("Failed to commit delete: {e}"),
        })
    }
}
