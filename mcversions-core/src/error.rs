//! Error types for the catalog and remote layers

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading, writing or interpreting a local catalog.
///
/// None of these are recovered by the reconciler: a broken catalog is a
/// data-integrity problem the operator has to fix by hand.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read catalog file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Catalog file {path} is not valid JSON.\n\nFix or remove the file before running again.")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Catalog file {path} must contain a JSON array of version entries")]
    NotAnArray { path: PathBuf },

    #[error("Catalog entry #{index} is malformed: {reason}")]
    MalformedEntry { index: usize, reason: String },

    #[error("Failed to serialize catalog")]
    Serialize {
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to write catalog file {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors raised by a [`Transport`](crate::remote::Transport).
///
/// The manifest client recovers every one of these at the call site.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Request to {url} failed")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP {status} from {url}")]
    Status { url: String, status: u16 },

    #[error("Failed to decode JSON from {url}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to write download to {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl FetchError {
    pub(crate) fn request(url: &str, source: reqwest::Error) -> Self {
        FetchError::Request {
            url: url.to_string(),
            source,
        }
    }

    pub(crate) fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        FetchError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}
