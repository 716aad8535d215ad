//! Shared fixtures for integration tests
//!
//! An in-memory transport stands in for piston-meta and the CDN, and jars
//! are built on the fly with the zip writer.

#![allow(dead_code)]

use async_trait::async_trait;
use mcversions_core::remote::Transport;
use mcversions_core::FetchError;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::io::{Cursor, Write};
use std::path::Path;
use std::sync::{Arc, Mutex, Once};
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

pub const MANIFEST_URL: &str = "https://piston-meta.test/mc/game/version_manifest_v2.json";

static INIT: Once = Once::new();

/// Initialize logging for tests (only once per test run)
pub fn init_test_logging() {
    INIT.call_once(|| {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let _ = tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .with_test_writer()
                    .with_target(true)
                    .with_level(true),
            )
            .with(tracing_subscriber::filter::EnvFilter::from_default_env())
            .try_init();
    });
}

/// Canned responses keyed by URL; anything else answers 404
///
/// Mirrors the `FakeTransport` in `remote::client`'s unit tests, which
/// integration tests cannot import because it only exists under
/// `cfg(test)` in the library. Requests are recorded in a shared log so a
/// test can still inspect them after the transport moved into a reconciler.
#[derive(Default)]
pub struct FakeTransport {
    documents: HashMap<String, Value>,
    files: HashMap<String, Vec<u8>>,
    requests: Arc<Mutex<Vec<String>>>,
}

impl FakeTransport {
    pub fn with_document(mut self, url: &str, value: Value) -> Self {
        self.documents.insert(url.to_string(), value);
        self
    }

    pub fn with_file(mut self, url: &str, bytes: Vec<u8>) -> Self {
        self.files.insert(url.to_string(), bytes);
        self
    }

    /// Manifest at [`MANIFEST_URL`] listing `(id, type)` pairs
    pub fn with_manifest(self, versions: &[(&str, &str)]) -> Self {
        let versions: Vec<Value> = versions
            .iter()
            .map(|(id, kind)| json!({"id": id, "type": kind, "url": descriptor_url(id)}))
            .collect();
        self.with_document(MANIFEST_URL, json!({"latest": {}, "versions": versions}))
    }

    /// Descriptor plus jar for `id`, with `version_json` as the jar's metadata
    pub fn with_release(self, id: &str, version_json: &str) -> Self {
        let jar = build_jar(&[("version.json", version_json)]);
        self.with_descriptor_and_jar(id, jar)
    }

    pub fn with_descriptor_and_jar(self, id: &str, jar: Vec<u8>) -> Self {
        let jar_url = format!("https://cdn.test/{id}/client.jar");
        let descriptor =
            json!({"id": id, "downloads": {"client": {"url": jar_url, "size": jar.len()}}});
        self.with_document(&descriptor_url(id), descriptor)
            .with_file(&jar_url, jar)
    }

    /// Handle on every URL requested so far, in order
    pub fn request_log(&self) -> Arc<Mutex<Vec<String>>> {
        Arc::clone(&self.requests)
    }

    fn record(&self, url: &str) {
        self.requests.lock().unwrap().push(url.to_string());
    }
}

fn not_found(url: &str) -> FetchError {
    FetchError::Status {
        url: url.to_string(),
        status: 404,
    }
}

#[async_trait]
impl Transport for FakeTransport {
    async fn get_json(&self, url: &str) -> Result<Value, FetchError> {
        self.record(url);
        self.documents.get(url).cloned().ok_or_else(|| not_found(url))
    }

    async fn download(&self, url: &str, dest: &Path) -> Result<u64, FetchError> {
        self.record(url);
        let bytes = self.files.get(url).ok_or_else(|| not_found(url))?;
        std::fs::write(dest, bytes).map_err(|source| FetchError::Io {
            path: dest.to_path_buf(),
            source,
        })?;
        Ok(bytes.len() as u64)
    }

    fn name(&self) -> &'static str {
        "fake"
    }
}

pub fn descriptor_url(id: &str) -> String {
    format!("https://piston-meta.test/v1/packages/{id}.json")
}

/// Build an in-memory ZIP with the given `(name, contents)` members
pub fn build_jar(members: &[(&str, &str)]) -> Vec<u8> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = FileOptions::default().compression_method(CompressionMethod::Deflated);

    for (name, contents) in members {
        writer.start_file(*name, options).unwrap();
        writer.write_all(contents.as_bytes()).unwrap();
    }

    writer.finish().unwrap().into_inner()
}
