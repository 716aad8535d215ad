//! Reconciliation driver
//!
//! Brings a channel's catalog up to date with the remote manifest:
//!
//! 1. load the local catalog and collect the identifiers it already knows
//! 2. fetch the channel's remote versions
//! 3. diff the two
//! 4. download and extract metadata for each missing version, in manifest
//!    order, appending one record per version
//! 5. publish the added ids to CI and rewrite the catalog
//!
//! There is no rollback. Fallback records for versions whose download
//! failed are persisted alongside the successful ones.

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

use crate::catalog::{extract_identifiers, CatalogStore, KnownIdentifiers};
use crate::ci::CiSinks;
use crate::remote::{ManifestClient, RemoteVersions, Transport};
use crate::Channel;

/// Outcome of one reconciliation run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyncReport {
    pub channel: Channel,
    /// Versions the manifest lists for the channel
    pub remote_count: usize,
    /// Remote ids the catalog did not know, in manifest order
    pub missing: Vec<String>,
    /// Ids a record was appended for
    pub added: Vec<String>,
    /// Subset of `added` that only got a fallback record
    pub fallbacks: Vec<String>,
    /// Whether the catalog file was rewritten
    pub saved: bool,
}

impl SyncReport {
    fn new(channel: Channel, remote: &RemoteVersions, missing: &RemoteVersions) -> Self {
        Self {
            channel,
            remote_count: remote.len(),
            missing: missing.ids(),
            added: Vec::new(),
            fallbacks: Vec::new(),
            saved: false,
        }
    }

    pub fn is_up_to_date(&self) -> bool {
        self.missing.is_empty()
    }
}

/// Remote versions whose id the catalog doesn't know, in remote order
pub fn compute_missing(remote: &RemoteVersions, known: &KnownIdentifiers) -> RemoteVersions {
    remote
        .iter()
        .filter(|(id, _)| !known.contains(id))
        .collect()
}

/// Runs reconciliation for one channel at a time
pub struct Reconciler<T: Transport> {
    store: CatalogStore,
    client: ManifestClient<T>,
    sinks: CiSinks,
}

impl<T: Transport> Reconciler<T> {
    pub fn new(store: CatalogStore, client: ManifestClient<T>, sinks: CiSinks) -> Self {
        Self {
            store,
            client,
            sinks,
        }
    }

    /// Reconcile the catalog of `channel` with the remote manifest
    ///
    /// Fails only on local catalog problems; remote failures degrade to
    /// fewer versions or fallback records.
    pub async fn run(&self, channel: Channel) -> Result<SyncReport> {
        let catalog_path = self.store.path_for(channel);

        let mut entries = self
            .store
            .load(channel)
            .with_context(|| format!("Failed to load {} catalog", channel))?;

        let known = extract_identifiers(&entries).with_context(|| {
            format!(
                "Refusing to sync {}: fix the catalog entry or every version would be downloaded again",
                catalog_path.display()
            )
        })?;

        let remote = self.client.fetch_versions_by_channel(channel).await;

        let missing = compute_missing(&remote, &known);
        let mut report = SyncReport::new(channel, &remote, &missing);

        info!("Found {} minecraft versions.", report.remote_count);
        info!("Missing minecraft versions: {:?}", report.missing);

        if missing.is_empty() {
            info!("{} catalog is up to date", channel);
            return Ok(report);
        }

        for (version_id, descriptor_url) in missing.iter() {
            info!("Downloading minecraft version {}...", version_id);

            let outcome = self
                .client
                .download_and_extract(version_id, descriptor_url)
                .await;
            if outcome.is_fallback() {
                report.fallbacks.push(version_id.to_string());
            }

            entries.push(outcome.into_entry(version_id));
            report.added.push(version_id.to_string());
        }

        info!("Added Versions: {}", report.added.join(","));
        self.sinks.publish(&report.added);

        self.store
            .save(channel, &entries)
            .with_context(|| format!("Failed to save {} catalog", channel))?;
        report.saved = true;

        Ok(report)
    }
}
