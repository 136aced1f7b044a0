use thiserror::Error;

use common::{BookId, ParseReviewStatusError, ReviewId};

/// Errors that can occur when interacting with the review store.
#[derive(Debug, Error)]
pub enum ReviewStoreError {
    /// The review was not found in the store.
    #[error("Review not found: {0}")]
    ReviewNotFound(ReviewId),

    /// The book was not found in the store.
    #[error("Book not found: {0}")]
    BookNotFound(BookId),

    /// A stored status column held a value outside the state machine.
    #[error("Invalid stored status: {0}")]
    InvalidStatus(#[from] ParseReviewStatusError),

    /// A database error occurred.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A database migration error occurred.
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Result type for review store operations.
pub type Result<T> = std::result::Result<T, ReviewStoreError>;
