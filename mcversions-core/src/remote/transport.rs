//! Transport trait - abstraction over how remote documents are fetched
//!
//! The HTTP implementation is the only one shipped; tests substitute an
//! in-memory fake.

use async_trait::async_trait;
use std::path::Path;
use std::time::Duration;
use tokio::io::AsyncWriteExt;

use crate::error::FetchError;

/// Connect timeout for every request; the total timeout is configurable
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Fetches JSON documents and downloads artifacts
#[async_trait]
pub trait Transport: Send + Sync {
    /// GET a URL and decode the body as JSON
    async fn get_json(&self, url: &str) -> Result<serde_json::Value, FetchError>;

    /// GET a URL and stream the body into `dest`, returning the bytes written
    async fn download(&self, url: &str, dest: &Path) -> Result<u64, FetchError>;

    /// Transport identifier for logging
    fn name(&self) -> &'static str;
}

/// `reqwest`-backed transport
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Create a transport whose requests give up after `timeout`
    pub fn new(timeout: Duration) -> anyhow::Result<Self> {
        use anyhow::Context;

        let client = reqwest::Client::builder()
            .user_agent(concat!("mcversions/", env!("CARGO_PKG_VERSION")))
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client })
    }

    async fn get(&self, url: &str) -> Result<reqwest::Response, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::request(url, e))?;

        if !response.status().is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: response.status().as_u16(),
            });
        }

        Ok(response)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get_json(&self, url: &str) -> Result<serde_json::Value, FetchError> {
        let body = self
            .get(url)
            .await?
            .bytes()
            .await
            .map_err(|e| FetchError::request(url, e))?;

        serde_json::from_slice(&body).map_err(|source| FetchError::Decode {
            url: url.to_string(),
            source,
        })
    }

    async fn download(&self, url: &str, dest: &Path) -> Result<u64, FetchError> {
        let mut response = self.get(url).await?;

        let mut file = tokio::fs::File::create(dest)
            .await
            .map_err(|e| FetchError::io(dest, e))?;

        let mut written = 0u64;
        while let Some(chunk) = response
            .chunk()
            .await
            .map_err(|e| FetchError::request(url, e))?
        {
            file.write_all(&chunk)
                .await
                .map_err(|e| FetchError::io(dest, e))?;
            written += chunk.len() as u64;
        }

        file.flush().await.map_err(|e| FetchError::io(dest, e))?;

        tracing::debug!("Downloaded {} bytes from {} to {:?}", written, url, dest);
        Ok(written)
    }

    fn name(&self) -> &'static str {
        "http"
    }
}
