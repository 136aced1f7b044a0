use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a review.
///
/// Wraps a UUID to provide type safety and prevent mixing up
/// review IDs with other UUID-based identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReviewId(Uuid);

impl ReviewId {
    /// Creates a new random review ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a review ID from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the underlying UUID.
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for ReviewId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ReviewId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for ReviewId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl From<ReviewId> for Uuid {
    fn from(id: ReviewId) -> Self {
        id.0
    }
}

/// Unique identifier for a book.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookId(Uuid);

impl BookId {
    /// Creates a new random book ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a book ID from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the underlying UUID.
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for BookId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for BookId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for BookId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl From<BookId> for Uuid {
    fn from(id: BookId) -> Self {
        id.0
    }
}
