//! mcversions core library
//!
//! Keeps a locally persisted catalog of Minecraft versions in step with
//! Mojang's version manifest. One run of the reconciler:
//!
//! 1. loads the catalog for a channel (`release.json` / `snapshot.json`)
//! 2. fetches the remote manifest and filters it down to that channel
//! 3. downloads the client jar for every version the catalog doesn't know
//!    yet, pulls `version.json` out of it and appends it to the catalog
//!
//! Everything runs sequentially on the caller's task.

pub mod catalog;
pub mod channel;
pub mod ci;
pub mod config;
pub mod error;
pub mod remote;
pub mod sync;

pub use channel::Channel;
pub use config::Settings;
pub use error::{CatalogError, FetchError};
pub use sync::{Reconciler, SyncReport};
