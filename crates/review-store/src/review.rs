//! Review and book records held by the store.

use chrono::{DateTime, Utc};
use common::{BookId, ReviewId, ReviewStatus};
use serde::{Deserialize, Serialize};

/// A book review record.
///
/// Identity is assigned by the store on creation. `content` and `email`
/// are immutable after creation; only `status` (and the `reviewed_at`
/// stamp that accompanies it) changes, exactly once.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    /// Unique review identifier. None until the store assigns one.
    id: Option<ReviewId>,

    /// The book this review belongs to, if any.
    book_id: Option<BookId>,

    /// Review text.
    content: String,

    /// Reviewer email address. Assumed valid, not validated here.
    email: String,

    /// Current lifecycle status.
    status: ReviewStatus,

    /// When the review was created.
    created_at: DateTime<Utc>,

    /// When a terminal status was written, if it has been.
    reviewed_at: Option<DateTime<Utc>>,
}

impl Review {
    /// Creates a new review in `Check` status, not yet attached to a book.
    pub fn new(content: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: None,
            book_id: None,
            content: content.into(),
            email: email.into(),
            status: ReviewStatus::Check,
            created_at: Utc::now(),
            reviewed_at: None,
        }
    }

    /// Creates a new review in `Check` status for the given book.
    pub fn for_book(
        book_id: BookId,
        content: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            book_id: Some(book_id),
            ..Self::new(content, email)
        }
    }

    /// Returns a copy of this review with the given status.
    ///
    /// Useful for constructing records in a known lifecycle position,
    /// e.g. in tests.
    pub fn with_status(mut self, status: ReviewStatus) -> Self {
        self.status = status;
        self
    }

    /// Returns the review's identity, if assigned.
    pub fn id(&self) -> Option<ReviewId> {
        self.id
    }

    /// Returns the associated book, if any.
    pub fn book_id(&self) -> Option<BookId> {
        self.book_id
    }

    /// Returns the review text.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns the reviewer email.
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Returns the current status.
    pub fn status(&self) -> ReviewStatus {
        self.status
    }

    /// Returns the creation timestamp.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns when a terminal status was written, if it has been.
    pub fn reviewed_at(&self) -> Option<DateTime<Utc>> {
        self.reviewed_at
    }

    pub(crate) fn assign_id(&mut self, id: ReviewId) {
        self.id = Some(id);
    }

    pub(crate) fn set_status(&mut self, status: ReviewStatus, at: DateTime<Utc>) {
        self.status = status;
        self.reviewed_at = Some(at);
    }

    pub(crate) fn from_stored(
        id: ReviewId,
        book_id: Option<BookId>,
        content: String,
        email: String,
        status: ReviewStatus,
        created_at: DateTime<Utc>,
        reviewed_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            id: Some(id),
            book_id,
            content,
            email,
            status,
            created_at,
            reviewed_at,
        }
    }
}

/// A book record. Reviews reference books by id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Book {
    /// Unique book identifier. None until the store assigns one.
    id: Option<BookId>,

    /// Book title.
    title: String,

    /// ISBN, stored as given.
    isbn: String,

    /// When the book was created.
    created_at: DateTime<Utc>,
}

impl Book {
    /// Creates a new book record.
    pub fn new(title: impl Into<String>, isbn: impl Into<String>) -> Self {
        Self {
            id: None,
            title: title.into(),
            isbn: isbn.into(),
            created_at: Utc::now(),
        }
    }

    /// Returns the book's identity, if assigned.
    pub fn id(&self) -> Option<BookId> {
        self.id
    }

    /// Returns the book title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the ISBN.
    pub fn isbn(&self) -> &str {
        &self.isbn
    }

    /// Returns the creation timestamp.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub(crate) fn assign_id(&mut self, id: BookId) {
        self.id = Some(id);
    }

    pub(crate) fn from_stored(
        id: BookId,
        title: String,
        isbn: String,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Some(id),
            title,
            isbn,
            created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_review_starts_in_check() {
        let review = Review::new("Very good book!", "a@b.com");
        assert!(review.id().is_none());
        assert!(review.book_id().is_none());
        assert_eq!(review.status(), ReviewStatus::Check);
        assert!(review.reviewed_at().is_none());
        assert_eq!(review.content(), "Very good book!");
        assert_eq!(review.email(), "a@b.com");
    }

    #[test]
    fn for_book_attaches_book_id() {
        let book_id = BookId::new();
        let review = Review::for_book(book_id, "Decent read", "a@b.com");
        assert_eq!(review.book_id(), Some(book_id));
        assert_eq!(review.status(), ReviewStatus::Check);
    }

    #[test]
    fn with_status_overrides_status() {
        let review = Review::new("x", "a@b.com").with_status(ReviewStatus::Accept);
        assert_eq!(review.status(), ReviewStatus::Accept);
    }

    #[test]
    fn set_status_stamps_reviewed_at() {
        let mut review = Review::new("x", "a@b.com");
        let now = Utc::now();
        review.set_status(ReviewStatus::Reject, now);
        assert_eq!(review.status(), ReviewStatus::Reject);
        assert_eq!(review.reviewed_at(), Some(now));
    }

    #[test]
    fn review_serialization_roundtrip() {
        let review = Review::for_book(BookId::new(), "Very good book!", "a@b.com");
        let json = serde_json::to_string(&review).unwrap();
        assert!(json.contains("CHECK"));
        let deserialized: Review = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized.content(), review.content());
        assert_eq!(deserialized.status(), ReviewStatus::Check);
    }

    #[test]
    fn new_book_has_no_id() {
        let book = Book::new("The Pragmatic Programmer", "978-0135957059");
        assert!(book.id().is_none());
        assert_eq!(book.title(), "The Pragmatic Programmer");
        assert_eq!(book.isbn(), "978-0135957059");
    }
}
