//! Domain error types.

use review_store::ReviewStoreError;
use thiserror::Error;

use crate::review::{ClassifierError, ReviewError};

/// Errors that can occur during domain operations.
#[derive(Debug, Error)]
pub enum DomainError {
    /// An error occurred in the review store.
    #[error("Review store error: {0}")]
    Store(#[from] ReviewStoreError),

    /// A review lifecycle precondition was violated.
    #[error("Review error: {0}")]
    Review(ReviewError),

    /// The classification capability failed.
    #[error("Classification error: {0}")]
    Classification(#[from] ClassifierError),
}
