//! Runtime configuration assembled from the command line.

use std::path::PathBuf;
use std::time::Duration;

use crate::countdown::DEFAULT_TIME_LIMIT;
use crate::order::{OptionOrder, Shuffled, Sorted};
use crate::source::{QuestionQuery, DEFAULT_API_URL};

pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// How answer options are arranged on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderKind {
    #[default]
    Sorted,
    Shuffled,
}

#[derive(Debug, Clone)]
pub struct QuizConfig {
    pub query: QuestionQuery,
    pub api_url: String,
    pub request_timeout: Duration,
    /// Seconds allowed per question.
    pub time_limit: u32,
    pub order: OrderKind,
    pub seed: Option<u64>,
    pub log_file: Option<PathBuf>,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            query: QuestionQuery::default(),
            api_url: DEFAULT_API_URL.to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            time_limit: DEFAULT_TIME_LIMIT,
            order: OrderKind::default(),
            seed: None,
            log_file: None,
        }
    }
}

impl QuizConfig {
    pub fn option_order(&self) -> Box<dyn OptionOrder> {
        match self.order {
            OrderKind::Sorted => Box::new(Sorted),
            OrderKind::Shuffled => Box::new(Shuffled::new(self.seed)),
        }
    }
}
