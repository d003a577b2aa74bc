//! # Desktop Bridge Implementations
//!
//! Default implementations of bridge traits for desktop platforms
//! (macOS, Windows, Linux).
//!
//! ## Overview
//!
//! This crate provides production-ready implementations of the bridge traits
//! using desktop-appropriate libraries:
//! - `ByteTransport` using `reqwest`
//! - `LocalStore` using `tokio::fs` with JSON collection documents
//!
//! ## Usage
//!
//! ```ignore
//! use bridge_desktop::{ReqwestByteTransport, TokioLocalStore};
//! use bridge_traits::{ByteTransport, LocalStore};
//!
//! #[tokio::main]
//! async fn main() {
//!     let transport = ReqwestByteTransport::new();
//!     let store = TokioLocalStore::new();
//!
//!     // Use in service configuration
//! }
//! ```

mod storage;
mod transport;

pub use storage::TokioLocalStore;
pub use transport::ReqwestByteTransport;
