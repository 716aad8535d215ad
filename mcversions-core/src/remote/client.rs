//! Manifest client
//!
//! Resolves versions, descriptors and client jars. Every remote failure is
//! recovered here: logged with its context and turned into an empty or
//! fallback result, so one bad version never aborts a run.

use tracing::{debug, info, warn};

use super::artifact::{read_version_json, ArtifactOutcome};
use super::manifest::{ClientDownload, RemoteVersions, VersionDescriptor, VersionManifest};
use super::transport::Transport;
use crate::Channel;

/// Client for the remote version manifest and everything it links to
pub struct ManifestClient<T: Transport> {
    transport: T,
    manifest_url: String,
}

impl<T: Transport> ManifestClient<T> {
    pub fn new(transport: T, manifest_url: impl Into<String>) -> Self {
        Self {
            transport,
            manifest_url: manifest_url.into(),
        }
    }

    pub fn manifest_url(&self) -> &str {
        &self.manifest_url
    }

    /// Fetch and decode the top-level manifest
    ///
    /// Returns `None` on any transport, status or decode failure.
    pub async fn fetch_manifest(&self) -> Option<VersionManifest> {
        let value = match self.transport.get_json(&self.manifest_url).await {
            Ok(value) => value,
            Err(e) => {
                warn!("Failed to fetch version manifest: {}", chain(e));
                return None;
            }
        };

        match serde_json::from_value::<VersionManifest>(value) {
            Ok(manifest) => {
                debug!(
                    "Fetched manifest from {} via {}: {} versions",
                    self.manifest_url,
                    self.transport.name(),
                    manifest.versions.len()
                );
                Some(manifest)
            }
            Err(e) => {
                warn!(
                    "Version manifest from {} has an unexpected shape: {}",
                    self.manifest_url, e
                );
                None
            }
        }
    }

    /// Versions of one channel as `id → descriptor URL`, in manifest order
    ///
    /// An unavailable manifest yields an empty mapping and a warning.
    pub async fn fetch_versions_by_channel(&self, channel: Channel) -> RemoteVersions {
        let Some(manifest) = self.fetch_manifest().await else {
            warn!(
                "No {} versions available: manifest could not be fetched",
                channel
            );
            return RemoteVersions::new();
        };

        if let Some(latest) = manifest.latest_for(channel) {
            debug!("Latest {} according to manifest: {}", channel, latest);
        }

        manifest.versions_in(channel)
    }

    /// Resolve the client jar of a version from its descriptor
    pub async fn fetch_client_download(&self, descriptor_url: &str) -> Option<ClientDownload> {
        let value = match self.transport.get_json(descriptor_url).await {
            Ok(value) => value,
            Err(e) => {
                warn!(
                    "Error fetching version descriptor {}: {}",
                    descriptor_url,
                    chain(e)
                );
                return None;
            }
        };

        let descriptor = match serde_json::from_value::<VersionDescriptor>(value) {
            Ok(descriptor) => descriptor,
            Err(e) => {
                warn!("Version descriptor {} is malformed: {}", descriptor_url, e);
                return None;
            }
        };

        if descriptor.downloads.client.is_none() {
            warn!("Version descriptor {} has no client download", descriptor_url);
        }
        descriptor.downloads.client
    }

    /// Download a version's client jar and pull `version.json` out of it
    ///
    /// The jar is staged in a temporary directory that is removed on every
    /// exit path.
    pub async fn download_and_extract(
        &self,
        version_id: &str,
        descriptor_url: &str,
    ) -> ArtifactOutcome {
        let Some(client) = self.fetch_client_download(descriptor_url).await else {
            return ArtifactOutcome::fallback(format!(
                "client download could not be resolved from {descriptor_url}"
            ));
        };

        let staging = match tempfile::tempdir() {
            Ok(dir) => dir,
            Err(e) => {
                warn!("Failed to create staging directory for {}: {}", version_id, e);
                return ArtifactOutcome::fallback(format!("staging directory unavailable: {e}"));
            }
        };
        let jar_path = staging.path().join(jar_file_name(version_id));

        info!("Downloading client jar for {} from {}", version_id, client.url);
        let written = match self.transport.download(&client.url, &jar_path).await {
            Ok(written) => written,
            Err(e) => {
                let reason = chain(e);
                warn!(
                    "Error downloading client jar for {} from {}: {}",
                    version_id, client.url, reason
                );
                return ArtifactOutcome::fallback(reason);
            }
        };

        if let Some(expected) = client.size {
            if written != expected {
                warn!(
                    "Client jar for {} is {} bytes, descriptor says {}",
                    version_id, written, expected
                );
                return ArtifactOutcome::fallback(format!(
                    "size mismatch: expected {expected} bytes, got {written}"
                ));
            }
        }

        match read_version_json(&jar_path) {
            Ok(metadata) => {
                debug!("Extracted version.json for {}", version_id);
                ArtifactOutcome::Extracted(metadata)
            }
            Err(e) => {
                let reason = chain(e);
                warn!("Error reading client jar for {}: {}", version_id, reason);
                ArtifactOutcome::fallback(reason)
            }
        }
    }
}

/// Staging file name; path separators in ids would escape the staging dir
fn jar_file_name(version_id: &str) -> String {
    let safe: String = version_id
        .chars()
        .map(|c| if c == '/' || c == '\\' { '_' } else { c })
        .collect();
    format!("{safe}.jar")
}

/// Render an error with its source chain on one line
fn chain(err: impl Into<anyhow::Error>) -> String {
    format!("{:#}", err.into())
}
