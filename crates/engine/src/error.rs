//! The module contains the errors the local store can surface.
//!
//! Read and parse failures of the durable slot are deliberately *not* here:
//! the store recovers from them by re-seeding and never surfaces them to
//! callers. Only write-side failures are fatal.

use thiserror::Error;

/// Local store custom errors.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The durable slot could not be written. Surfaced to the caller and
    /// not retried.
    #[error("storage write failed: {0}")]
    Storage(#[source] std::io::Error),
    #[error("failed to encode receipts: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("export failed: {0}")]
    Export(#[from] csv::Error),
}
