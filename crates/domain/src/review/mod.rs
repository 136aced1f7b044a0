//! Review lifecycle controller and related types.

mod classifier;
mod commands;
mod service;

pub use classifier::{ClassifierError, HeuristicClassifier, ReviewClassifier, Verdict};
pub use commands::PostReview;
pub use service::{DEFAULT_CLASSIFY_CONCURRENCY, ReviewService};

use common::ReviewStatus;
use thiserror::Error;

/// Errors that can occur during review lifecycle operations.
#[derive(Debug, Error)]
pub enum ReviewError {
    /// The review is not in the expected status for the operation.
    #[error("Invalid review state: cannot submit a review in {current_status} status")]
    InvalidState { current_status: ReviewStatus },
}
