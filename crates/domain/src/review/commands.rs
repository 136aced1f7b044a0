//! Review commands.

use common::BookId;

/// Command to post a new review for classification.
#[derive(Debug, Clone)]
pub struct PostReview {
    /// The book the review is for, if any.
    pub book_id: Option<BookId>,

    /// Review text.
    pub content: String,

    /// Reviewer email address.
    pub email: String,
}

impl PostReview {
    /// Creates a new PostReview command without a book association.
    pub fn new(content: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            book_id: None,
            content: content.into(),
            email: email.into(),
        }
    }

    /// Creates a new PostReview command for the given book.
    pub fn for_book(
        book_id: BookId,
        content: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            book_id: Some(book_id),
            content: content.into(),
            email: email.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_review_command() {
        let cmd = PostReview::new("Very good book!", "a@b.com");
        assert!(cmd.book_id.is_none());
        assert_eq!(cmd.content, "Very good book!");
        assert_eq!(cmd.email, "a@b.com");
    }

    #[test]
    fn test_post_review_for_book() {
        let book_id = BookId::new();
        let cmd = PostReview::for_book(book_id, "Decent read", "a@b.com");
        assert_eq!(cmd.book_id, Some(book_id));
    }
}
