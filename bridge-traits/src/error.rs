use thiserror::Error;

/// Failures surfaced by platform bridge implementations.
///
/// The cache core absorbs these; they never reach the application surface.
#[derive(Error, Debug)]
pub enum BridgeError {
    /// The adapter could not complete the requested operation.
    #[error("Bridge operation failed: {0}")]
    OperationFailed(String),

    /// The transfer failed before the destination was fully written.
    #[error("Transport error: {0}")]
    Transport(String),

    /// Local filesystem access failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, BridgeError>;
