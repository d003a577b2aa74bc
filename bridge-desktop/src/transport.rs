//! Byte Transport Implementation using Reqwest

use async_trait::async_trait;
use bridge_traits::{
    error::{BridgeError, Result},
    transport::{ByteTransport, FetchOutcome},
};
use reqwest::Client;
use std::path::Path;
use std::time::Duration;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};

/// Reqwest-based byte transport implementation
///
/// Streams a remote resource to a destination file with:
/// - Connection pooling via reqwest
/// - TLS support by default
/// - Partial-file cleanup on any failure
pub struct ReqwestByteTransport {
    client: Client,
}

impl ReqwestByteTransport {
    /// Create a new transport with default configuration
    pub fn new() -> Self {
        Self::with_timeout(Duration::from_secs(300))
    }

    /// Create a new transport with custom timeout
    pub fn with_timeout(timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(10))
            .pool_max_idle_per_host(10)
            .user_agent("offline-asset-core/0.1.0")
            .build()
            .expect("Failed to build HTTP client");

        Self { client }
    }

    /// Create a new transport from a preconfigured client
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    async fn discard_partial(destination: &Path) {
        match fs::remove_file(destination).await {
            Ok(()) => debug!(path = ?destination, "Removed partial download"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => warn!(path = ?destination, error = %e, "Failed to remove partial download"),
        }
    }
}

impl Default for ReqwestByteTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ByteTransport for ReqwestByteTransport {
    async fn fetch(&self, remote: &str, destination: &Path) -> Result<FetchOutcome> {
        debug!(url = %remote, path = ?destination, "Fetching remote resource");

        let mut response = match self.client.get(remote).send().await {
            Ok(response) => response,
            Err(e) => {
                warn!(url = %remote, error = %e, "Fetch request failed");
                return Err(BridgeError::Transport(e.to_string()));
            }
        };

        let status = response.status();
        if !status.is_success() {
            warn!(url = %remote, status = status.as_u16(), "Fetch refused by remote");
            return Ok(FetchOutcome::failed());
        }

        if let Some(parent) = destination.parent() {
            fs::create_dir_all(parent).await.map_err(BridgeError::Io)?;
        }

        let mut file = fs::File::create(destination)
            .await
            .map_err(BridgeError::Io)?;
        let mut bytes_written = 0u64;

        loop {
            match response.chunk().await {
                Ok(Some(chunk)) => {
                    if let Err(e) = file.write_all(&chunk).await {
                        drop(file);
                        Self::discard_partial(destination).await;
                        return Err(BridgeError::Io(e));
                    }
                    bytes_written += chunk.len() as u64;
                }
                Ok(None) => break,
                Err(e) => {
                    drop(file);
                    Self::discard_partial(destination).await;
                    warn!(url = %remote, error = %e, "Fetch interrupted mid-stream");
                    return Err(BridgeError::Transport(e.to_string()));
                }
            }
        }

        if let Err(e) = file.flush().await {
            drop(file);
            Self::discard_partial(destination).await;
            return Err(BridgeError::Io(e));
        }

        debug!(url = %remote, bytes = bytes_written, "Fetch complete");
        Ok(FetchOutcome::completed(bytes_written))
    }
}
