//! Local version catalog
//!
//! One JSON array per channel, stored next to each other in the catalog
//! directory:
//!
//! ```text
//! <catalog_dir>/
//!     ├── release.json   ← entries for the release channel
//!     └── snapshot.json  ← entries for the snapshot channel
//! ```
//!
//! Each entry is a JSON object with at least a `name`. Entries extracted
//! from a client jar carry the full contents of its `version.json`;
//! fallback entries carry only the `name`.
//!
//! The catalog is read once per run, appended to in memory and written
//! back as a whole. Entries are never removed or edited in place.

mod identifiers;
mod store;

pub use identifiers::{extract_identifiers, KnownIdentifiers};
pub use store::CatalogStore;

/// A single catalog record, kept as raw JSON so unknown fields survive
pub type CatalogEntry = serde_json::Value;
