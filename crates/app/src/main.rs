//! Bookstore review demo entry point.
//!
//! Seeds a book, posts one review, and follows it from `CHECK` to its
//! terminal status through the asynchronous classification task.

mod config;

use common::ReviewId;
use config::Config;
use domain::{HeuristicClassifier, PostReview, ReviewService};
use review_store::{Book, InMemoryReviewStore, PostgresReviewStore, Review, ReviewStore};
use tokio::time::{Duration, sleep, timeout};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() {
    let config = Config::from_env();

    // 1. Initialize tracing
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_level.clone())),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // 2. Pick the store and run the reference scenario
    match config.database_url {
        Some(ref url) => {
            let pool = sqlx::postgres::PgPoolOptions::new()
                .max_connections(5)
                .connect(url)
                .await
                .expect("failed to connect to database");

            let store = PostgresReviewStore::new(pool);
            store.run_migrations().await.expect("migrations failed");

            tracing::info!("using PostgreSQL review store");
            run_demo(store, config.classify_concurrency).await;
        }
        None => {
            tracing::info!("DATABASE_URL not set, using in-memory review store");
            run_demo(InMemoryReviewStore::new(), config.classify_concurrency).await;
        }
    }
}

/// Posts the reference review and follows it to a terminal status.
async fn run_demo<S>(store: S, classify_concurrency: usize)
where
    S: ReviewStore + Clone + 'static,
{
    let service =
        ReviewService::with_concurrency_limit(store, HeuristicClassifier::new(), classify_concurrency);

    let book_id = service
        .store()
        .create_book(Book::new("The Pragmatic Programmer", "978-0135957059"))
        .await
        .expect("failed to seed book");

    let review_id = service
        .post_review(PostReview::for_book(
            book_id,
            "Very good book!",
            "marinv@gmail.com",
        ))
        .await
        .expect("failed to post review");
    tracing::info!(%review_id, "review posted");

    // The classification task is not awaited, so this read may still
    // observe the initial status.
    if let Some(review) = service
        .get_review(review_id)
        .await
        .expect("failed to read review")
    {
        tracing::info!(%review_id, status = %review.status(), "status immediately after posting");
    }

    match wait_for_terminal(&service, review_id).await {
        Some(review) => {
            tracing::info!(%review_id, status = %review.status(), "review classified");
        }
        None => {
            tracing::warn!(%review_id, "review did not reach a terminal status in time");
        }
    }
}

/// Polls the store until the review reaches a terminal status.
async fn wait_for_terminal<S>(
    service: &ReviewService<S, HeuristicClassifier>,
    id: ReviewId,
) -> Option<Review>
where
    S: ReviewStore + Clone + 'static,
{
    timeout(Duration::from_secs(5), async {
        loop {
            if let Ok(Some(review)) = service.get_review(id).await
                && review.status().is_terminal()
            {
                return review;
            }
            sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .ok()
}
