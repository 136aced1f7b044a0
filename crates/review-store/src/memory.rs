use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use common::{BookId, ReviewId, ReviewStatus};

use crate::{
    ReviewStoreError, Result,
    review::{Book, Review},
    store::ReviewStore,
};

#[derive(Default)]
struct State {
    reviews: HashMap<ReviewId, Review>,
    books: HashMap<BookId, Book>,
}

/// In-memory review store implementation.
///
/// Stores all records in memory behind an async lock and provides the
/// same interface as the PostgreSQL implementation. Used by tests and
/// the demo binary.
#[derive(Clone, Default)]
pub struct InMemoryReviewStore {
    state: Arc<RwLock<State>>,
}

impl InMemoryReviewStore {
    /// Creates a new empty in-memory review store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the total number of reviews stored.
    pub async fn review_count(&self) -> usize {
        self.state.read().await.reviews.len()
    }

    /// Returns the total number of books stored.
    pub async fn book_count(&self) -> usize {
        self.state.read().await.books.len()
    }

    /// Removes a review by id. Returns true if it was present.
    ///
    /// Deletion is not part of the store contract the workflow consumes;
    /// this helper exists so tests can make a review disappear between
    /// persistence and the asynchronous status update.
    pub async fn remove_review(&self, id: ReviewId) -> bool {
        self.state.write().await.reviews.remove(&id).is_some()
    }

    /// Clears all reviews and books.
    pub async fn clear(&self) {
        let mut state = self.state.write().await;
        state.reviews.clear();
        state.books.clear();
    }
}

#[async_trait]
impl ReviewStore for InMemoryReviewStore {
    async fn create_review(&self, mut review: Review) -> Result<ReviewId> {
        let id = review.id().unwrap_or_default();
        review.assign_id(id);

        let mut state = self.state.write().await;
        state.reviews.insert(id, review);

        metrics::counter!("store_reviews_created").increment(1);
        Ok(id)
    }

    async fn update_status(&self, id: ReviewId, status: ReviewStatus) -> Result<()> {
        let mut state = self.state.write().await;
        let review = state
            .reviews
            .get_mut(&id)
            .ok_or(ReviewStoreError::ReviewNotFound(id))?;

        review.set_status(status, Utc::now());
        Ok(())
    }

    async fn get_review(&self, id: ReviewId) -> Result<Option<Review>> {
        let state = self.state.read().await;
        Ok(state.reviews.get(&id).cloned())
    }

    async fn create_book(&self, mut book: Book) -> Result<BookId> {
        let id = book.id().unwrap_or_default();
        book.assign_id(id);

        let mut state = self.state.write().await;
        state.books.insert(id, book);
        Ok(id)
    }

    async fn get_book(&self, id: BookId) -> Result<Option<Book>> {
        let state = self.state.read().await;
        Ok(state.books.get(&id).cloned())
    }

    async fn reviews_for_book(&self, book_id: BookId) -> Result<Vec<Review>> {
        let state = self.state.read().await;
        let mut reviews: Vec<_> = state
            .reviews
            .values()
            .filter(|r| r.book_id() == Some(book_id))
            .cloned()
            .collect();
        reviews.sort_by_key(Review::created_at);
        Ok(reviews)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::ReviewStoreExt;

    #[tokio::test]
    async fn create_assigns_id_when_absent() {
        let store = InMemoryReviewStore::new();

        let id = store
            .create_review(Review::new("Very good book!", "a@b.com"))
            .await
            .unwrap();

        let stored = store.get_review(id).await.unwrap().unwrap();
        assert_eq!(stored.id(), Some(id));
        assert_eq!(stored.status(), ReviewStatus::Check);
        assert_eq!(store.review_count().await, 1);
    }

    #[tokio::test]
    async fn create_honors_preset_id() {
        let store = InMemoryReviewStore::new();
        let preset = ReviewId::new();

        let mut review = Review::new("Fine", "a@b.com");
        review.assign_id(preset);

        let id = store.create_review(review).await.unwrap();
        assert_eq!(id, preset);
        assert!(store.review_exists(preset).await.unwrap());
    }

    #[tokio::test]
    async fn update_status_stamps_reviewed_at() {
        let store = InMemoryReviewStore::new();
        let id = store
            .create_review(Review::new("Very good book!", "a@b.com"))
            .await
            .unwrap();

        store
            .update_status(id, ReviewStatus::Accept)
            .await
            .unwrap();

        let stored = store.get_review(id).await.unwrap().unwrap();
        assert_eq!(stored.status(), ReviewStatus::Accept);
        assert!(stored.reviewed_at().is_some());
    }

    #[tokio::test]
    async fn update_status_unknown_id_fails() {
        let store = InMemoryReviewStore::new();

        let result = store
            .update_status(ReviewId::new(), ReviewStatus::Accept)
            .await;

        assert!(matches!(
            result,
            Err(ReviewStoreError::ReviewNotFound(_))
        ));
    }

    #[tokio::test]
    async fn get_review_missing_returns_none() {
        let store = InMemoryReviewStore::new();
        let result = store.get_review(ReviewId::new()).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn require_review_missing_fails() {
        let store = InMemoryReviewStore::new();
        let result = store.require_review(ReviewId::new()).await;
        assert!(matches!(
            result,
            Err(ReviewStoreError::ReviewNotFound(_))
        ));
    }

    #[tokio::test]
    async fn books_and_reviews_association() {
        let store = InMemoryReviewStore::new();

        let book_id = store
            .create_book(Book::new("The Pragmatic Programmer", "978-0135957059"))
            .await
            .unwrap();

        store
            .create_review(Review::for_book(book_id, "Very good book!", "a@b.com"))
            .await
            .unwrap();
        store
            .create_review(Review::for_book(book_id, "Helped me a lot", "c@d.com"))
            .await
            .unwrap();
        store
            .create_review(Review::new("Unrelated", "e@f.com"))
            .await
            .unwrap();

        let book = store.get_book(book_id).await.unwrap().unwrap();
        assert_eq!(book.title(), "The Pragmatic Programmer");

        let reviews = store.reviews_for_book(book_id).await.unwrap();
        assert_eq!(reviews.len(), 2);
        assert!(reviews.iter().all(|r| r.book_id() == Some(book_id)));
    }

    #[tokio::test]
    async fn remove_and_clear() {
        let store = InMemoryReviewStore::new();
        let id = store
            .create_review(Review::new("x", "a@b.com"))
            .await
            .unwrap();

        assert!(store.remove_review(id).await);
        assert!(!store.remove_review(id).await);

        store
            .create_review(Review::new("y", "a@b.com"))
            .await
            .unwrap();
        store.clear().await;
        assert_eq!(store.review_count().await, 0);
    }
}
