//! Catalog file management (`<channel>.json`)
//!
//! Loads and rewrites the per-channel catalog files.

use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};

use super::CatalogEntry;
use crate::error::CatalogError;
use crate::Channel;

/// Reads and writes per-channel catalog files in a directory
#[derive(Debug, Clone)]
pub struct CatalogStore {
    dir: PathBuf,
}

impl CatalogStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the catalog file for a channel
    pub fn path_for(&self, channel: Channel) -> PathBuf {
        self.dir.join(channel.catalog_file_name())
    }

    /// Load the catalog for a channel, or an empty one if the file is absent
    pub fn load(&self, channel: Channel) -> Result<Vec<CatalogEntry>, CatalogError> {
        let path = self.path_for(channel);

        if !path.exists() {
            tracing::debug!("No catalog at {}, starting empty", path.display());
            return Ok(Vec::new());
        }

        let content = std::fs::read_to_string(&path).map_err(|source| CatalogError::Read {
            path: path.clone(),
            source,
        })?;

        let value: serde_json::Value =
            serde_json::from_str(&content).map_err(|source| CatalogError::Parse {
                path: path.clone(),
                source,
            })?;

        match value {
            serde_json::Value::Array(entries) => {
                tracing::debug!("Loaded {} entries from {}", entries.len(), path.display());
                Ok(entries)
            }
            _ => Err(CatalogError::NotAnArray { path }),
        }
    }

    /// Rewrite the catalog file for a channel
    ///
    /// Output is indented with four spaces and keeps non-ASCII text as-is.
    /// The new content goes to a temporary file in the same directory which
    /// then replaces the old file, so readers never see a half-written
    /// catalog.
    pub fn save(&self, channel: Channel, entries: &[CatalogEntry]) -> Result<(), CatalogError> {
        let path = self.path_for(channel);
        let content = to_pretty_json(entries)?;

        std::fs::create_dir_all(&self.dir).map_err(|source| CatalogError::Write {
            path: path.clone(),
            source,
        })?;

        let write_err = |source: std::io::Error| CatalogError::Write {
            path: path.clone(),
            source,
        };

        let mut staged = tempfile::NamedTempFile::new_in(&self.dir).map_err(write_err)?;
        staged.write_all(&content).map_err(write_err)?;
        staged.flush().map_err(write_err)?;
        if let Some(permissions) = permissions_for(&path).map_err(write_err)? {
            staged
                .as_file()
                .set_permissions(permissions)
                .map_err(write_err)?;
        }
        staged.persist(&path).map_err(|e| write_err(e.error))?;

        tracing::debug!("Saved {} entries to {}", entries.len(), path.display());
        Ok(())
    }
}

/// Permissions the rewritten catalog should carry
///
/// Staged files are created owner-only; an existing catalog keeps its mode
/// and a new one gets `0644` where modes exist.
fn permissions_for(path: &Path) -> std::io::Result<Option<std::fs::Permissions>> {
    match std::fs::metadata(path) {
        Ok(metadata) => Ok(Some(metadata.permissions())),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(new_file_permissions()),
        Err(e) => Err(e),
    }
}

#[cfg(unix)]
fn new_file_permissions() -> Option<std::fs::Permissions> {
    use std::os::unix::fs::PermissionsExt;
    Some(std::fs::Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn new_file_permissions() -> Option<std::fs::Permissions> {
    None
}

fn to_pretty_json(entries: &[CatalogEntry]) -> Result<Vec<u8>, CatalogError> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    entries
        .serialize(&mut serializer)
        .map_err(|source| CatalogError::Serialize { source })?;
    Ok(buf)
}
