//! Run-level error type.

use thiserror::Error;

use crate::config::ConfigError;
use crate::deadletter::DeadLetterError;
use crate::shopify::PlatformError;
use crate::supplier::SupplierError;

/// Errors that can abort a sync run or one-off operation.
#[derive(Debug, Error)]
pub enum SyncError {
    /// Commerce-platform API failure.
    #[error(transparent)]
    Platform(#[from] PlatformError),

    /// Supplier API failure.
    #[error(transparent)]
    Supplier(#[from] SupplierError),

    /// Dead-letter sink failure.
    #[error(transparent)]
    DeadLetter(#[from] DeadLetterError),

    /// Configuration failure.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The store has no publications to publish created products to.
    #[error("Store {0} has no publications")]
    NoPublications(String),
}
