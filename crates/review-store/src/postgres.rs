use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Row, postgres::PgRow};
use uuid::Uuid;

use common::{BookId, ReviewId, ReviewStatus};

use crate::{
    ReviewStoreError, Result,
    review::{Book, Review},
    store::ReviewStore,
};

/// PostgreSQL-backed review store implementation.
#[derive(Clone)]
pub struct PostgresReviewStore {
    pool: PgPool,
}

impl PostgresReviewStore {
    /// Creates a new PostgreSQL review store.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Gets a reference to the underlying connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Runs the database migrations.
    pub async fn run_migrations(&self) -> std::result::Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("../../migrations").run(&self.pool).await
    }

    fn row_to_review(row: PgRow) -> Result<Review> {
        let status: ReviewStatus = row
            .try_get::<String, _>("status")?
            .parse()
            .map_err(ReviewStoreError::InvalidStatus)?;

        Ok(Review::from_stored(
            ReviewId::from_uuid(row.try_get::<Uuid, _>("id")?),
            row.try_get::<Option<Uuid>, _>("book_id")?.map(BookId::from_uuid),
            row.try_get("content")?,
            row.try_get("email")?,
            status,
            row.try_get::<DateTime<Utc>, _>("created_at")?,
            row.try_get::<Option<DateTime<Utc>>, _>("reviewed_at")?,
        ))
    }

    fn row_to_book(row: PgRow) -> Result<Book> {
        Ok(Book::from_stored(
            BookId::from_uuid(row.try_get::<Uuid, _>("id")?),
            row.try_get("title")?,
            row.try_get("isbn")?,
            row.try_get::<DateTime<Utc>, _>("created_at")?,
        ))
    }
}

#[async_trait]
impl ReviewStore for PostgresReviewStore {
    async fn create_review(&self, mut review: Review) -> Result<ReviewId> {
        let id = review.id().unwrap_or_default();
        review.assign_id(id);

        sqlx::query(
            r#"
            INSERT INTO reviews (id, book_id, content, email, status, created_at, reviewed_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(id.as_uuid())
        .bind(review.book_id().map(|b| b.as_uuid()))
        .bind(review.content())
        .bind(review.email())
        .bind(review.status().as_str())
        .bind(review.created_at())
        .bind(review.reviewed_at())
        .execute(&self.pool)
        .await?;

        metrics::counter!("store_reviews_created").increment(1);
        Ok(id)
    }

    async fn update_status(&self, id: ReviewId, status: ReviewStatus) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE reviews
            SET status = $2, reviewed_at = $3
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .bind(status.as_str())
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(ReviewStoreError::ReviewNotFound(id));
        }

        Ok(())
    }

    async fn get_review(&self, id: ReviewId) -> Result<Option<Review>> {
        let row = sqlx::query(
            r#"
            SELECT id, book_id, content, email, status, created_at, reviewed_at
            FROM reviews
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(Self::row_to_review).transpose()
    }

    async fn create_book(&self, mut book: Book) -> Result<BookId> {
        let id = book.id().unwrap_or_default();
        book.assign_id(id);

        sqlx::query(
            r#"
            INSERT INTO books (id, title, isbn, created_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(id.as_uuid())
        .bind(book.title())
        .bind(book.isbn())
        .bind(book.created_at())
        .execute(&self.pool)
        .await?;

        Ok(id)
    }

    async fn get_book(&self, id: BookId) -> Result<Option<Book>> {
        let row = sqlx::query(
            r#"
            SELECT id, title, isbn, created_at
            FROM books
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(Self::row_to_book).transpose()
    }

    async fn reviews_for_book(&self, book_id: BookId) -> Result<Vec<Review>> {
        let rows = sqlx::query(
            r#"
            SELECT id, book_id, content, email, status, created_at, reviewed_at
            FROM reviews
            WHERE book_id = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(book_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Self::row_to_review).collect()
    }
}
