//! Byte Transport Abstraction
//!
//! Provides async transfer of a remote resource into a local byte sink.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::Result;

/// Outcome of a transfer attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchOutcome {
    /// Whether the remote resource was fully transferred to the destination.
    pub success: bool,
    /// Number of bytes written to the destination.
    pub bytes_written: u64,
}

impl FetchOutcome {
    /// Outcome for a completed transfer.
    pub fn completed(bytes_written: u64) -> Self {
        Self {
            success: true,
            bytes_written,
        }
    }

    /// Outcome for a refused or failed transfer (nothing left on disk).
    pub fn failed() -> Self {
        Self {
            success: false,
            bytes_written: 0,
        }
    }
}

/// Async byte transport trait
///
/// Performs a GET-style transfer of a remote resource into a local file.
/// Transfers are all-or-nothing: implementations MUST remove any partially
/// written destination file before reporting failure, whether the failure is
/// signalled as `Ok(FetchOutcome { success: false, .. })` (e.g. a non-2xx
/// status) or as `Err` (connection loss, timeout).
///
/// # Example
///
/// ```ignore
/// use bridge_traits::transport::ByteTransport;
/// use std::path::Path;
///
/// async fn pull(transport: &dyn ByteTransport) -> Result<bool> {
///     let outcome = transport
///         .fetch("https://cdn.example.com/brochure.pdf", Path::new("/tmp/brochure.pdf"))
///         .await?;
///     Ok(outcome.success)
/// }
/// ```
#[async_trait]
pub trait ByteTransport: Send + Sync {
    /// Transfer the resource at `remote` into the file at `destination`.
    async fn fetch(&self, remote: &str, destination: &Path) -> Result<FetchOutcome>;
}
