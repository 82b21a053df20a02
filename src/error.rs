use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum InputError {
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A page could not be retrieved. Always local to one entry.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },
    #[error("failed to read body of {url}: {source}")]
    Body {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid delay range [{min}, {max}]: bounds must be non-negative, min <= max, and representable as a duration")]
    InvalidDelay { min: f64, max: f64 },
    #[error("invalid timeout: must be at least 1 second")]
    InvalidTimeout,
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}
