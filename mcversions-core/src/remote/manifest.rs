//! Remote manifest and descriptor documents
//!
//! Only the fields the reconciler consumes are modelled; everything else in
//! Mojang's documents is ignored on decode.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::Channel;

/// Top-level version manifest (`version_manifest_v2.json`)
///
/// Entries stay raw until a channel is selected, so a malformed entry only
/// affects the channel it belongs to.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VersionManifest {
    /// Newest id per channel, if the manifest advertises it
    #[serde(default)]
    pub latest: Option<Value>,

    /// Every known version, newest first
    #[serde(default)]
    pub versions: Vec<Value>,
}

/// One manifest entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteVersion {
    pub id: String,

    /// Descriptor URL for this version
    pub url: String,

    /// `release`, `snapshot`, `old_beta`, `old_alpha`, ...
    #[serde(rename = "type")]
    pub kind: String,
}

impl VersionManifest {
    /// Newest id the manifest advertises for a channel
    pub fn latest_for(&self, channel: Channel) -> Option<&str> {
        self.latest.as_ref()?.get(channel.as_str())?.as_str()
    }

    /// Versions of one channel as `id → descriptor URL`, in manifest order
    ///
    /// Entries of other types are never decoded. Entries of this channel
    /// missing `id` or `url` are skipped with a warning.
    pub fn versions_in(&self, channel: Channel) -> RemoteVersions {
        let mut versions = RemoteVersions::new();

        for (index, raw) in self.versions.iter().enumerate() {
            if raw.get("type").and_then(Value::as_str) != Some(channel.as_str()) {
                continue;
            }

            match RemoteVersion::deserialize(raw) {
                Ok(version) => versions.insert(version.id, version.url),
                Err(e) => warn!(
                    "Skipping malformed {} manifest entry #{}: {}",
                    channel, index, e
                ),
            }
        }

        versions
    }
}

/// Per-version descriptor; only `downloads.client` is read
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VersionDescriptor {
    pub downloads: Downloads,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Downloads {
    pub client: Option<ClientDownload>,
}

/// The client jar of a version
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientDownload {
    pub url: String,
    #[serde(default)]
    pub size: Option<u64>,
    #[serde(default)]
    pub sha1: Option<String>,
}

/// Ordered mapping of version id to descriptor URL
///
/// Keeps manifest order. Inserting an id that is already present replaces
/// its URL without moving it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemoteVersions {
    entries: Vec<(String, String)>,
}

impl RemoteVersions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: String, url: String) {
        match self.entries.iter_mut().find(|(existing, _)| *existing == id) {
            Some(entry) => entry.1 = url,
            None => self.entries.push((id, url)),
        }
    }

    pub fn get(&self, id: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == id)
            .map(|(_, url)| url.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `(id, descriptor_url)` pairs in order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(id, url)| (id.as_str(), url.as_str()))
    }

    pub fn ids(&self) -> Vec<String> {
        self.entries.iter().map(|(id, _)| id.clone()).collect()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RemoteVersions {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut versions = RemoteVersions::new();
        for (id, url) in iter {
            versions.insert(id.into(), url.into());
        }
        versions
    }
}
