//! Error handling

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Failures while asking the API for a random photo.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The API key was missing or rejected
    #[error("API key rejected (HTTP {status})")]
    Unauthorized {
        /// 401 or 403
        status: u16,
    },
    /// The filters matched no photo
    #[error("no photo matches the given filters")]
    NoMatch,
    /// The response did not have the expected shape
    #[error("malformed API response: {0}")]
    MalformedResponse(String),
    /// The API refused the request for some other reason, eg an invalid orientation
    #[error("API rejected the request (HTTP {status}): {message}")]
    Rejected {
        /// HTTP status returned
        status: u16,
        /// Error text returned by the API, if any
        message: String,
    },
    /// Rate limited or server side failure, still failing after retries
    #[error("transient API failure (HTTP {status})")]
    Transient {
        /// 429 or 5xx
        status: u16,
        /// Delay asked for by a `Retry-After` header
        retry_after: Option<Duration>,
    },
    /// Connection, TLS or timeout failure
    #[error("network error: {0}")]
    Network(#[source] reqwest::Error),
    /// The HTTP client could not be built
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    /// A client setting is out of range
    #[error("invalid client configuration: {0}")]
    InvalidConfig(String),
    /// The endpoint URL could not be built from the configured base
    #[error("invalid API URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// Failures while saving the image bytes to disk.
#[derive(Debug, Error)]
pub enum DownloadError {
    /// The image request failed or the stream was cut short
    #[error("network error while downloading image: {0}")]
    Network(String),
    /// Writing or promoting the file failed
    #[error("I/O error while saving image: {0}")]
    Io(#[from] std::io::Error),
    /// The destination directory is missing or not writable
    #[error("destination directory {} is unavailable: {reason}", .path.display())]
    DirectoryUnavailable {
        /// Directory that was asked for
        path: PathBuf,
        /// Why it can't be used
        reason: String,
    },
}

/// Anything that can go wrong while saving a new image.
#[derive(Debug, Error)]
pub enum Error {
    /// Requesting the photo failed
    #[error(transparent)]
    Fetch(#[from] FetchError),
    /// Downloading the photo failed
    #[error(transparent)]
    Download(#[from] DownloadError),
}

impl Error {
    /// Short machine-readable name of the failure, used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Error::Fetch(err) => match err {
                FetchError::Unauthorized { .. } => "unauthorized",
                FetchError::NoMatch => "no_match",
                FetchError::MalformedResponse(_) => "malformed_response",
                FetchError::Rejected { .. } => "rejected",
                FetchError::Transient { .. } => "transient",
                FetchError::Network(_) => "network",
                FetchError::Client(_) => "client",
                FetchError::InvalidConfig(_) => "invalid_config",
                FetchError::InvalidUrl(_) => "invalid_url",
            },
            Error::Download(err) => match err {
                DownloadError::Network(_) => "download_network",
                DownloadError::Io(_) => "io",
                DownloadError::DirectoryUnavailable { .. } => "directory_unavailable",
            },
        }
    }
}
