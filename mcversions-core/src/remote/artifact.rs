//! Client jar handling
//!
//! A client jar is a ZIP archive whose root may hold `version.json`, the
//! metadata fragment that becomes the catalog entry.

use serde_json::{json, Map, Value};
use std::path::Path;
use thiserror::Error;

/// Archive member carrying version metadata
pub const VERSION_MEMBER: &str = "version.json";

#[derive(Error, Debug)]
pub enum ArchiveError {
    #[error("Failed to open archive {path}")]
    Open {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Archive {path} is not a readable ZIP file")]
    Corrupt {
        path: String,
        #[source]
        source: zip::result::ZipError,
    },

    #[error("version.json not found in {path}")]
    MissingMember { path: String },

    #[error("version.json in {path} is not valid JSON")]
    InvalidJson {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("version.json in {path} is not a JSON object")]
    NotAnObject { path: String },
}

/// What a download attempt produced for one version
#[derive(Debug, Clone, PartialEq)]
pub enum ArtifactOutcome {
    /// `version.json`, verbatim
    Extracted(Map<String, Value>),
    /// Nothing usable; the catalog gets a name-only record
    Fallback { reason: String },
}

impl ArtifactOutcome {
    pub fn fallback(reason: impl Into<String>) -> Self {
        ArtifactOutcome::Fallback {
            reason: reason.into(),
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, ArtifactOutcome::Fallback { .. })
    }

    /// Catalog record for this outcome
    ///
    /// Every failure path yields `{"name": <version_id>}` so the version is
    /// recognised as known on the next run.
    pub fn into_entry(self, version_id: &str) -> Value {
        match self {
            ArtifactOutcome::Extracted(metadata) => Value::Object(metadata),
            ArtifactOutcome::Fallback { .. } => json!({ "name": version_id }),
        }
    }
}

/// Read `version.json` from the root of a ZIP archive on disk
pub fn read_version_json(archive_path: &Path) -> Result<Map<String, Value>, ArchiveError> {
    let path = archive_path.display().to_string();

    let file = std::fs::File::open(archive_path).map_err(|source| ArchiveError::Open {
        path: path.clone(),
        source,
    })?;

    let mut archive = zip::ZipArchive::new(file).map_err(|source| ArchiveError::Corrupt {
        path: path.clone(),
        source,
    })?;

    let member = match archive.by_name(VERSION_MEMBER) {
        Ok(member) => member,
        Err(zip::result::ZipError::FileNotFound) => {
            return Err(ArchiveError::MissingMember { path });
        }
        Err(source) => return Err(ArchiveError::Corrupt { path, source }),
    };

    let value: Value = serde_json::from_reader(member).map_err(|source| {
        ArchiveError::InvalidJson {
            path: path.clone(),
            source,
        }
    })?;

    match value {
        Value::Object(metadata) => Ok(metadata),
        _ => Err(ArchiveError::NotAnObject { path }),
    }
}
