use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::{mpsc, oneshot};
use tracing::debug;

use crate::cache::store::{CacheRecord, FeedStore, LocalFeedImage};
use crate::error::{FeedError, Result};

enum Command {
    Retrieve(oneshot::Sender<Result<Option<CacheRecord>>>),
    Insert(Vec<LocalFeedImage>, DateTime<Utc>, oneshot::Sender<Result<()>>),
    Delete(oneshot::Sender<Result<()>>),
}

/// File-backed feed store holding one JSON record.
///
/// All operations run on a single worker task owning the file, so at most
/// one is in flight and completions arrive in submission order. Each reply
/// travels over a oneshot sender, which is consumed on send: an operation
/// cannot complete twice.
pub struct FileFeedStore {
    commands: mpsc::UnboundedSender<Command>,
}

impl FileFeedStore {
    /// Spawns the worker; must be called from within a tokio runtime.
    pub fn new(store_path: PathBuf) -> Self {
        let (commands, mut rx) = mpsc::unbounded_channel();

        tokio::spawn(async move {
            while let Some(command) = rx.recv().await {
                // Replies to callers that have gone away are dropped silently
                match command {
                    Command::Retrieve(reply) => {
                        let _ = reply.send(retrieve_record(&store_path));
                    }
                    Command::Insert(feed, timestamp, reply) => {
                        let _ = reply.send(insert_record(&store_path, feed, timestamp));
                    }
                    Command::Delete(reply) => {
                        let _ = reply.send(delete_record(&store_path));
                    }
                }
            }
            debug!("File store worker finished");
        });

        Self { commands }
    }
}

fn retrieve_record(path: &Path) -> Result<Option<CacheRecord>> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        // No file yet means an empty store, not a failure
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(FeedError::Retrieval {
                message: format!("Failed to read cache file: {e}"),
            })
        }
    };

    let record: CacheRecord = serde_json::from_slice(&bytes).map_err(|e| FeedError::Retrieval {
        message: format!("Failed to decode cache file: {e}"),
    })?;

    Ok(Some(record))
}

fn insert_record(path: &Path, feed: Vec<LocalFeedImage>, timestamp: DateTime<Utc>) -> Result<()> {
    let record = CacheRecord { feed, timestamp };
    let encoded = serde_json::to_vec(&record).map_err(|e| FeedError::Insertion {
        message: format!("Failed to encode cache record: {e}"),
    })?;

    // One whole-file overwrite; the serialized worker keeps partial state
    // from ever being observable
    fs::write(path, encoded).map_err(|e| FeedError::Insertion {
        message: format!("Failed to write cache file: {e}"),
    })
}

fn delete_record(path: &Path) -> Result<()> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        // Deleting an empty store is a success
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(FeedError::Deletion {
            message: format!("Failed to delete cache file: {e}"),
        }),
    }
}

#[async_trait]
impl FeedStore for FileFeedStore {
    async fn retrieve(&self) -> Result<Option<CacheRecord>> {
        let (reply, response) = oneshot::channel();
        self.commands
            .send(Command::Retrieve(reply))
            .map_err(|_| FeedError::Retrieval {
                message: "Store worker is gone".to_string(),
            })?;

        match response.await {
            Ok(result) => result,
            Err(_) => Err(FeedError::Retrieval {
                message: "Store worker dropped the reply".to_string(),
            }),
        }
    }

    async fn insert(&self, feed: Vec<LocalFeedImage>, timestamp: DateTime<Utc>) -> Result<()> {
        let (reply, response) = oneshot::channel();
        self.commands
            .send(Command::Insert(feed, timestamp, reply))
            .map_err(|_| FeedError::Insertion {
                message: "Store worker is gone".to_string(),
            })?;

        match response.await {
            Ok(result) => result,
            Err(_) => Err(FeedError::Insertion {
                message: "Store worker dropped the reply".to_string(),
            }),
        }
    }

    async fn delete(&self) -> Result<()> {
        let (reply, response) = oneshot::channel();
        self.commands
            .send(Command::Delete(reply))
            .map_err(|_| FeedError::Deletion {
                message: "Store worker is gone".to_string(),
            })?;

        match response.await {
            Ok(result) => result,
            Err(_) => Err(FeedError::Deletion {
                message: "Store worker dropped the reply".to_string(),
            }),
        }
    }
}
