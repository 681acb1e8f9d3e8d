//! Error types for tree-scatter

use thiserror::Error;

/// Main error type for tree-scatter operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    #[error("Invalid bounds: {0}")]
    InvalidBounds(String),

    #[error("Invalid distance: {0}")]
    InvalidDistance(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Fetch failed: {0}")]
    Fetch(String),

    #[error("Image decode error: {0}")]
    Decode(String),

    #[error("Geocoding error: {0}")]
    Geocoding(String),

    #[error("Server error: {0}")]
    Server(String),
}

/// Result type alias for tree-scatter operations
pub type Result<T> = std::result::Result<T, Error>;
