use thiserror::Error;

#[derive(Error, Debug)]
pub enum FeedError {
    #[error("Connectivity failure")]
    Connectivity,

    #[error("Invalid feed data")]
    InvalidData,

    #[error("Cache retrieval failed: {message}")]
    Retrieval { message: String },

    #[error("Cache insertion failed: {message}")]
    Insertion { message: String },

    #[error("Cache deletion failed: {message}")]
    Deletion { message: String },

    #[error("Database error: {message}")]
    Database { message: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, FeedError>;
