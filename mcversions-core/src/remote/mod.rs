//! Remote version manifest client
//!
//! ```text
//! piston-meta.mojang.com
//!     │
//!     ├── version_manifest_v2.json  ← every version with type + descriptor URL
//!     └── v1/packages/…/<id>.json   ← per-version descriptor
//!            │  downloads.client.url
//!            ▼
//!     client.jar (ZIP)
//!            │  version.json
//!            ▼
//!     catalog entry
//! ```
//!
//! Network access goes through the [`Transport`] trait so the client can be
//! driven by an in-memory fake.

mod artifact;
mod client;
mod manifest;
mod transport;

pub use artifact::{read_version_json, ArchiveError, ArtifactOutcome, VERSION_MEMBER};
pub use client::ManifestClient;
pub use manifest::{
    ClientDownload, Downloads, RemoteVersion, RemoteVersions, VersionDescriptor,
    VersionManifest,
};
pub use transport::{HttpTransport, Transport};
