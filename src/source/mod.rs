//! Question source adapter.
//!
//! One request per quiz start; every way the provider can fail is reported as a
//! [`SourceError`], which the session collapses into a single user-facing message.

mod open_trivia;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{Question, QuestionKind};

pub use open_trivia::{OpenTriviaSource, DEFAULT_API_URL};

/// Default number of questions per quiz.
pub const DEFAULT_AMOUNT: u32 = 5;
/// Default category id (Science: Computers).
pub const DEFAULT_CATEGORY: u32 = 18;

/// Parameters of one question request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuestionQuery {
    pub amount: u32,
    pub category: u32,
    pub kind: QuestionKind,
}

impl Default for QuestionQuery {
    fn default() -> Self {
        Self {
            amount: DEFAULT_AMOUNT,
            category: DEFAULT_CATEGORY,
            kind: QuestionKind::Multiple,
        }
    }
}

impl QuestionQuery {
    /// Query string pairs in the order the provider documents them.
    pub fn to_pairs(&self) -> [(&'static str, String); 3] {
        [
            ("amount", self.amount.to_string()),
            ("category", self.category.to_string()),
            ("type", self.kind.as_str().to_string()),
        ]
    }
}

/// Coarse classification of a [`SourceError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The request did not produce a successful HTTP response.
    Transport,
    /// The response arrived but broke the provider's data contract.
    Contract,
}

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SourceError {
    #[error("question request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("question request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error("provider reported response code {0}")]
    ResponseCode(i64),
    #[error("provider returned a malformed body: {0}")]
    Malformed(#[source] serde_json::Error),
    #[error("provider returned {actual} questions, expected {expected}")]
    CountMismatch { expected: usize, actual: usize },
}

impl SourceError {
    pub fn kind(&self) -> FailureKind {
        match self {
            SourceError::Transport(_) | SourceError::HttpStatus(_) => FailureKind::Transport,
            SourceError::ResponseCode(_)
            | SourceError::Malformed(_)
            | SourceError::CountMismatch { .. } => FailureKind::Contract,
        }
    }
}

/// Anything that can hand out a fresh list of questions.
#[async_trait]
pub trait QuestionSource: Send + Sync {
    /// Fetch exactly `query.amount` questions.
    ///
    /// # Errors
    ///
    /// Returns `SourceError` on any transport or data-contract failure. No retry
    /// is attempted.
    async fn fetch(&self, query: &QuestionQuery) -> Result<Vec<Question>, SourceError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_query() {
        let query = QuestionQuery::default();
        let pairs = query.to_pairs();
        assert_eq!(pairs[0], ("amount", "5".to_string()));
        assert_eq!(pairs[1], ("category", "18".to_string()));
        assert_eq!(pairs[2], ("type", "multiple".to_string()));
    }

    #[test]
    fn test_failure_kinds() {
        assert_eq!(
            SourceError::HttpStatus(reqwest::StatusCode::BAD_GATEWAY).kind(),
            FailureKind::Transport
        );
        assert_eq!(SourceError::ResponseCode(1).kind(), FailureKind::Contract);
        assert_eq!(
            SourceError::CountMismatch {
                expected: 5,
                actual: 3
            }
            .kind(),
            FailureKind::Contract
        );
    }
}
