//! Review classification capability.

use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use common::ReviewStatus;
use thiserror::Error;

/// Terminal outcome of classifying a review's content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// The content passed the check.
    Accept,

    /// The content failed the check.
    Reject,
}

impl From<Verdict> for ReviewStatus {
    fn from(verdict: Verdict) -> Self {
        match verdict {
            Verdict::Accept => ReviewStatus::Accept,
            Verdict::Reject => ReviewStatus::Reject,
        }
    }
}

/// Errors raised by a classification capability.
#[derive(Debug, Error)]
pub enum ClassifierError {
    /// The classifier could not produce a verdict.
    #[error("Classifier unavailable: {0}")]
    Unavailable(String),
}

/// Trait for review content classification.
///
/// Implementations judge a review's content and return a terminal verdict.
/// The capability is pluggable; a real deployment might call a grammar or
/// moderation service here.
#[async_trait]
pub trait ReviewClassifier: Send + Sync {
    /// Classifies the given review content.
    async fn classify(&self, content: &str) -> Result<Verdict, ClassifierError>;
}

#[derive(Debug, Default)]
struct HeuristicState {
    classifications: u64,
    fail_on_classify: bool,
}

/// Deterministic rule-based classifier.
///
/// Rejects blank content and content containing a blocklisted word,
/// accepts everything else. Carries a failure toggle and a call counter
/// so tests can force and observe the error path.
#[derive(Debug, Clone)]
pub struct HeuristicClassifier {
    blocklist: Arc<Vec<String>>,
    state: Arc<RwLock<HeuristicState>>,
}

impl HeuristicClassifier {
    /// Creates a classifier with the default blocklist.
    pub fn new() -> Self {
        Self::with_blocklist(["spam", "garbage"])
    }

    /// Creates a classifier with a custom blocklist.
    ///
    /// Matching is case-insensitive on whole content substrings.
    pub fn with_blocklist<I, W>(words: I) -> Self
    where
        I: IntoIterator<Item = W>,
        W: Into<String>,
    {
        let blocklist = words
            .into_iter()
            .map(|w| w.into().to_lowercase())
            .collect();
        Self {
            blocklist: Arc::new(blocklist),
            state: Arc::new(RwLock::new(HeuristicState::default())),
        }
    }

    /// Configures the classifier to fail on subsequent classify calls.
    pub fn set_fail_on_classify(&self, fail: bool) {
        self.state.write().unwrap().fail_on_classify = fail;
    }

    /// Returns the number of classifications performed so far.
    pub fn classification_count(&self) -> u64 {
        self.state.read().unwrap().classifications
    }
}

impl Default for HeuristicClassifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ReviewClassifier for HeuristicClassifier {
    async fn classify(&self, content: &str) -> Result<Verdict, ClassifierError> {
        let mut state = self.state.write().unwrap();

        if state.fail_on_classify {
            return Err(ClassifierError::Unavailable(
                "classification backend offline".to_string(),
            ));
        }

        state.classifications += 1;
        drop(state);

        if content.trim().is_empty() {
            return Ok(Verdict::Reject);
        }

        let lowered = content.to_lowercase();
        if self.blocklist.iter().any(|word| lowered.contains(word)) {
            return Ok(Verdict::Reject);
        }

        Ok(Verdict::Accept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_non_empty_content_accepts() {
        let classifier = HeuristicClassifier::new();
        let verdict = classifier.classify("Very good book!").await.unwrap();
        assert_eq!(verdict, Verdict::Accept);
        assert_eq!(classifier.classification_count(), 1);
    }

    #[tokio::test]
    async fn test_empty_content_rejects() {
        let classifier = HeuristicClassifier::new();
        assert_eq!(classifier.classify("").await.unwrap(), Verdict::Reject);
        assert_eq!(classifier.classify("   ").await.unwrap(), Verdict::Reject);
    }

    #[tokio::test]
    async fn test_blocklisted_word_rejects() {
        let classifier = HeuristicClassifier::with_blocklist(["awful"]);
        let verdict = classifier
            .classify("This AWFUL book wasted my time")
            .await
            .unwrap();
        assert_eq!(verdict, Verdict::Reject);
    }

    #[tokio::test]
    async fn test_fail_on_classify() {
        let classifier = HeuristicClassifier::new();
        classifier.set_fail_on_classify(true);

        let result = classifier.classify("Very good book!").await;
        assert!(matches!(result, Err(ClassifierError::Unavailable(_))));
        assert_eq!(classifier.classification_count(), 0);
    }

    #[test]
    fn test_verdict_to_status() {
        assert_eq!(ReviewStatus::from(Verdict::Accept), ReviewStatus::Accept);
        assert_eq!(ReviewStatus::from(Verdict::Reject), ReviewStatus::Reject);
    }
}
