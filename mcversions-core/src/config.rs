//! Run settings
//!
//! ## Sources (in precedence order)
//!
//! 1. Environment: `MCVERSIONS_MANIFEST_URL`, `MCVERSIONS_CATALOG_DIR`,
//!    `MCVERSIONS_TIMEOUT_SECONDS`
//! 2. `mcversions.json` in the project directory
//! 3. Built-in defaults
//!
//! ```json
//! {
//!   "manifest_url": "https://piston-meta.mojang.com/mc/game/version_manifest_v2.json",
//!   "catalog_dir": ".",
//!   "timeout_seconds": 120
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Mojang's version manifest
pub const DEFAULT_MANIFEST_URL: &str =
    "https://piston-meta.mojang.com/mc/game/version_manifest_v2.json";

/// Config file looked up in the project directory
pub const CONFIG_FILE: &str = "mcversions.json";

pub const ENV_MANIFEST_URL: &str = "MCVERSIONS_MANIFEST_URL";
pub const ENV_CATALOG_DIR: &str = "MCVERSIONS_CATALOG_DIR";
pub const ENV_TIMEOUT_SECONDS: &str = "MCVERSIONS_TIMEOUT_SECONDS";

/// Client jars are tens of megabytes; anything shorter just fails downloads
const MIN_TIMEOUT_SECONDS: u64 = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// URL of the top-level version manifest
    #[serde(default = "default_manifest_url")]
    pub manifest_url: String,

    /// Directory holding `release.json` / `snapshot.json`, relative to the
    /// project directory unless absolute
    #[serde(default = "default_catalog_dir")]
    pub catalog_dir: PathBuf,

    /// Total timeout for a single request in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            manifest_url: default_manifest_url(),
            catalog_dir: default_catalog_dir(),
            timeout_seconds: default_timeout(),
        }
    }
}

fn default_manifest_url() -> String {
    DEFAULT_MANIFEST_URL.to_string()
}

fn default_catalog_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_timeout() -> u64 {
    120
}

impl Settings {
    /// Resolve settings for a project directory from file, environment and
    /// defaults
    pub fn load(project_dir: &Path) -> Self {
        let mut settings = Self::load_from_file(&project_dir.join(CONFIG_FILE));
        settings.apply_env(|key| std::env::var(key).ok());

        if settings.catalog_dir.is_relative() {
            settings.catalog_dir = project_dir.join(&settings.catalog_dir);
        }
        settings
    }

    /// Read a config file, falling back to defaults when it is absent or
    /// unreadable
    pub fn load_from_file(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(settings) => {
                    tracing::debug!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    tracing::warn!("Failed to parse {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Override fields from environment-style lookups
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup(ENV_MANIFEST_URL).filter(|v| !v.is_empty()) {
            self.manifest_url = url;
        }

        if let Some(dir) = lookup(ENV_CATALOG_DIR).filter(|v| !v.is_empty()) {
            self.catalog_dir = PathBuf::from(dir);
        }

        if let Some(raw) = lookup(ENV_TIMEOUT_SECONDS) {
            match raw.trim().parse::<u64>() {
                Ok(seconds) => self.timeout_seconds = seconds,
                Err(_) => tracing::warn!(
                    "Ignoring {}={:?}: expected a number of seconds",
                    ENV_TIMEOUT_SECONDS,
                    raw
                ),
            }
        }
    }

    /// Request timeout, clamped to a sane minimum
    pub fn timeout(&self) -> Duration {
        if self.timeout_seconds < MIN_TIMEOUT_SECONDS {
            tracing::warn!(
                "Configured timeout_seconds={} is too low; using minimum of {} seconds",
                self.timeout_seconds,
                MIN_TIMEOUT_SECONDS
            );
            return Duration::from_secs(MIN_TIMEOUT_SECONDS);
        }
        Duration::from_secs(self.timeout_seconds)
    }
}
