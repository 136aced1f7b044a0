//! Review lifecycle service.

use std::sync::Arc;
use std::time::Instant;

use common::{ReviewId, ReviewStatus};
use review_store::{Review, ReviewStore, ReviewStoreExt};
use tokio::sync::Semaphore;

use crate::error::DomainError;

use super::{PostReview, ReviewClassifier, ReviewError};

impl From<ReviewError> for DomainError {
    fn from(e: ReviewError) -> Self {
        DomainError::Review(e)
    }
}

/// Default cap on classification tasks running at once.
///
/// Submission is never blocked by this; only classifier execution is
/// throttled.
pub const DEFAULT_CLASSIFY_CONCURRENCY: usize = 32;

/// Service owning the review lifecycle.
///
/// Persists submitted reviews in `Check` status and schedules exactly one
/// asynchronous classification task per submission. The task computes a
/// verdict off the calling path and writes the terminal status back
/// through the store; its completion is never awaited by the caller.
pub struct ReviewService<S: ReviewStore, C: ReviewClassifier> {
    store: S,
    classifier: C,
    classify_permits: Arc<Semaphore>,
}

impl<S, C> ReviewService<S, C>
where
    S: ReviewStore + Clone + 'static,
    C: ReviewClassifier + Clone + 'static,
{
    /// Creates a new review service with the given store and classifier.
    pub fn new(store: S, classifier: C) -> Self {
        Self::with_concurrency_limit(store, classifier, DEFAULT_CLASSIFY_CONCURRENCY)
    }

    /// Creates a review service with a custom classification concurrency cap.
    pub fn with_concurrency_limit(store: S, classifier: C, limit: usize) -> Self {
        Self {
            store,
            classifier,
            classify_permits: Arc::new(Semaphore::new(limit)),
        }
    }

    /// Returns a reference to the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Submits a review for classification.
    ///
    /// The review must be in `Check` status. On success the review is
    /// durable in the store before this returns, one classification task
    /// has been scheduled for it, and the assigned id is returned
    /// immediately. A read straight after may still observe `Check`.
    ///
    /// If persistence fails the error propagates and no task is scheduled.
    #[tracing::instrument(skip(self, review), fields(status = %review.status()))]
    pub async fn submit(&self, review: Review) -> Result<ReviewId, DomainError> {
        if !review.status().can_submit() {
            return Err(ReviewError::InvalidState {
                current_status: review.status(),
            }
            .into());
        }

        let id = self.store.create_review(review).await?;
        metrics::counter!("reviews_submitted").increment(1);
        tracing::info!(%id, "review persisted, scheduling classification");

        let store = self.store.clone();
        let classifier = self.classifier.clone();
        let permits = Arc::clone(&self.classify_permits);
        tokio::spawn(async move {
            // The semaphore is never closed, so this only fails at shutdown.
            let Ok(_permit) = permits.acquire_owned().await else {
                return;
            };
            if let Err(e) = classify(&store, &classifier, id).await {
                metrics::counter!("reviews_classification_failed").increment(1);
                tracing::warn!(%id, error = %e, "review classification failed");
            }
        });

        Ok(id)
    }

    /// Builds a review in `Check` status from the command and submits it.
    #[tracing::instrument(skip(self, cmd))]
    pub async fn post_review(&self, cmd: PostReview) -> Result<ReviewId, DomainError> {
        let review = match cmd.book_id {
            Some(book_id) => Review::for_book(book_id, cmd.content, cmd.email),
            None => Review::new(cmd.content, cmd.email),
        };
        self.submit(review).await
    }

    /// Loads a review by ID.
    ///
    /// Returns None if the review doesn't exist.
    #[tracing::instrument(skip(self))]
    pub async fn get_review(&self, id: ReviewId) -> Result<Option<Review>, DomainError> {
        Ok(self.store.get_review(id).await?)
    }
}

/// Classification task body.
///
/// Loads the review, skips it if a terminal status was already written,
/// otherwise asks the classifier for a verdict and persists it. Errors are
/// terminal for the task: the caller of `submit` has already returned, so
/// they are logged by the spawning wrapper and never retried.
async fn classify<S, C>(store: &S, classifier: &C, id: ReviewId) -> Result<(), DomainError>
where
    S: ReviewStore,
    C: ReviewClassifier,
{
    let start = Instant::now();
    let review = store.require_review(id).await?;

    if review.status().is_terminal() {
        tracing::debug!(%id, status = %review.status(), "review already classified, skipping");
        return Ok(());
    }

    let verdict = classifier.classify(review.content()).await?;
    let status = ReviewStatus::from(verdict);
    store.update_status(id, status).await?;

    metrics::counter!("reviews_classified").increment(1);
    metrics::histogram!("classification_duration_seconds").record(start.elapsed().as_secs_f64());
    tracing::info!(%id, %status, "review classified");

    Ok(())
}
