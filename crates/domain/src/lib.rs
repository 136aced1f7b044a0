//! Domain layer for the review workflow.
//!
//! This crate provides the review lifecycle controller:
//! - ReviewService for submitting reviews and scheduling classification
//! - ReviewClassifier trait with a deterministic heuristic implementation
//! - PostReview command and the domain error taxonomy

pub mod error;
pub mod review;

pub use common::{BookId, ReviewId, ReviewStatus};
pub use error::DomainError;
pub use review::{
    ClassifierError, DEFAULT_CLASSIFY_CONCURRENCY, HeuristicClassifier, PostReview,
    ReviewClassifier, ReviewError, ReviewService, Verdict,
};
