//! Error types for BOM data fetching.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while reading from a data source. Callers treat every
/// variant the same way ("fetch failed"); the variants exist for logs.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FetchError {
    /// Base URL is not an http(s) URL.
    #[error("invalid data source URL: {0}")]
    InvalidUrl(String),

    /// Connection, timeout or transport failure.
    #[error("network error: {0}")]
    Network(String),

    /// The endpoint answered with a non-2xx status.
    #[error("{endpoint} returned HTTP {status}")]
    Status { endpoint: String, status: u16 },

    /// Response body did not match the expected shape.
    #[error("could not decode {endpoint}: {message}")]
    Decode { endpoint: String, message: String },

    /// Snapshot file could not be read.
    #[error("failed to read snapshot {path}: {source}")]
    SnapshotRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Snapshot file is not a JSON item array.
    #[error("failed to parse snapshot {path}: {message}")]
    SnapshotParse { path: PathBuf, message: String },

    /// A concurrent fetch worker panicked.
    #[error("fetch worker for {0} panicked")]
    Worker(&'static str),
}

impl FetchError {
    /// Message shown to the user in place of the data.
    #[must_use]
    pub fn user_message(&self) -> &str {
        match self {
            Self::InvalidUrl(_) => "The configured data source URL is not valid.",
            Self::SnapshotRead { .. } | Self::SnapshotParse { .. } => {
                "Could not load the BOM snapshot file."
            }
            _ => "Failed to fetch BOM data.",
        }
    }
}

/// Result type alias for fetch operations.
pub type Result<T> = std::result::Result<T, FetchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_names_endpoint() {
        let err = FetchError::Status {
            endpoint: "/api/bom-items".to_string(),
            status: 503,
        };
        assert_eq!(err.to_string(), "/api/bom-items returned HTTP 503");
        assert_eq!(err.user_message(), "Failed to fetch BOM data.");
    }
}
