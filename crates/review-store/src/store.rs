use async_trait::async_trait;

use common::{BookId, ReviewId, ReviewStatus};

use crate::error::{ReviewStoreError, Result};
use crate::review::{Book, Review};

/// Core trait for review store implementations.
///
/// The store is a durable holder of review and book records. All
/// implementations must be thread-safe (Send + Sync).
#[async_trait]
pub trait ReviewStore: Send + Sync {
    /// Persists a new review and returns its identity.
    ///
    /// If the record carries no id, the store assigns one; a pre-set id
    /// is honored. All fields are durable when this returns.
    async fn create_review(&self, review: Review) -> Result<ReviewId>;

    /// Updates the status of an existing review and stamps `reviewed_at`.
    ///
    /// Fails with [`ReviewStoreError::ReviewNotFound`] if the id is unknown.
    async fn update_status(&self, id: ReviewId, status: ReviewStatus) -> Result<()>;

    /// Retrieves a review by id.
    ///
    /// Returns None if no review with that id exists.
    async fn get_review(&self, id: ReviewId) -> Result<Option<Review>>;

    /// Persists a new book and returns its identity.
    async fn create_book(&self, book: Book) -> Result<BookId>;

    /// Retrieves a book by id.
    async fn get_book(&self, id: BookId) -> Result<Option<Book>>;

    /// Retrieves all reviews attached to a book, oldest first.
    async fn reviews_for_book(&self, book_id: BookId) -> Result<Vec<Review>>;
}

/// Extension trait providing convenience methods for review stores.
#[async_trait]
pub trait ReviewStoreExt: ReviewStore {
    /// Retrieves a review by id, failing if it does not exist.
    async fn require_review(&self, id: ReviewId) -> Result<Review> {
        self.get_review(id)
            .await?
            .ok_or(ReviewStoreError::ReviewNotFound(id))
    }

    /// Checks whether a review exists.
    async fn review_exists(&self, id: ReviewId) -> Result<bool> {
        Ok(self.get_review(id).await?.is_some())
    }
}

// Blanket implementation for all ReviewStore implementations
impl<T: ReviewStore + ?Sized> ReviewStoreExt for T {}
