//! Quiz session state.
//!
//! Plain synchronous bookkeeping. The asynchronous half of starting a quiz
//! lives in [`crate::service`]; this module only decides which load result is
//! allowed to land and how answers are scored.

use std::collections::BTreeMap;

use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::grade::{self, Grade};
use crate::models::Question;
use crate::source::SourceError;

/// The only error message a user ever sees for a failed load.
pub const UNABLE_TO_RETRIEVE: &str = "Unable to retrieve questions";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    /// No questions loaded yet.
    Idle,
    /// A fetch is in flight.
    Loading,
    /// Questions loaded and the current one is still open.
    Active,
    /// On the last question and it has been answered.
    Complete,
    /// The last load failed.
    Error,
}

/// Identifies one `start()` attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(Uuid);

impl LoadTicket {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

/// What happened to a load result handed to [`Session::finish_loading`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Installed { count: usize },
    Failed,
    /// A newer `start()` owns the session; the result was dropped.
    Stale,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Correct,
    Incorrect,
    /// The current question already has an answer; nothing changed.
    AlreadyAnswered,
    /// There is no current question to answer.
    NoQuestion,
}

/// Score summary shown on the results screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub score: usize,
    pub total: usize,
    pub percentage: u32,
    pub grade: Grade,
}

/// One attempt at the quiz.
///
/// The first answer submitted for a question is final. `score` is maintained
/// incrementally and always equals [`Session::recomputed_score`].
#[derive(Debug, Default)]
pub struct Session {
    questions: Vec<Question>,
    current_index: usize,
    answers: BTreeMap<usize, String>,
    score: usize,
    pending: Option<LoadTicket>,
    error: Option<String>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the session as loading and hand out the ticket of the new attempt.
    ///
    /// Any ticket handed out earlier stops being accepted. The current
    /// questions stay visible until the new result lands.
    pub fn begin_loading(&mut self) -> LoadTicket {
        let ticket = LoadTicket::new();
        if self.pending.replace(ticket).is_some() {
            debug!("superseding an in-flight load");
        }
        self.error = None;
        ticket
    }

    /// Install the result of the attempt identified by `ticket`.
    ///
    /// Success replaces every field at once. Failure leaves an empty session
    /// carrying [`UNABLE_TO_RETRIEVE`].
    pub fn finish_loading(
        &mut self,
        ticket: LoadTicket,
        result: Result<Vec<Question>, SourceError>,
    ) -> LoadOutcome {
        if self.pending != Some(ticket) {
            debug!("dropping result of a superseded load");
            return LoadOutcome::Stale;
        }

        let (questions, error) = match result {
            Ok(questions) if questions.is_empty() => {
                warn!("provider returned no questions");
                (Vec::new(), Some(UNABLE_TO_RETRIEVE.to_string()))
            }
            Ok(questions) => (questions, None),
            Err(e) => {
                warn!(error = %e, kind = ?e.kind(), "failed to load questions");
                (Vec::new(), Some(UNABLE_TO_RETRIEVE.to_string()))
            }
        };

        let failed = error.is_some();
        *self = Session {
            questions,
            error,
            ..Session::default()
        };

        if failed {
            LoadOutcome::Failed
        } else {
            info!(count = self.questions.len(), "quiz session started");
            LoadOutcome::Installed {
                count: self.questions.len(),
            }
        }
    }

    pub fn status(&self) -> SessionStatus {
        if self.pending.is_some() {
            SessionStatus::Loading
        } else if self.error.is_some() {
            SessionStatus::Error
        } else if self.questions.is_empty() {
            SessionStatus::Idle
        } else if self.is_last_question() && self.answers.contains_key(&self.current_index) {
            SessionStatus::Complete
        } else {
            SessionStatus::Active
        }
    }

    /// Record `choice` for the current question unless it already has an answer.
    pub fn submit_answer(&mut self, choice: &str) -> SubmitOutcome {
        let Some(question) = self.questions.get(self.current_index) else {
            return SubmitOutcome::NoQuestion;
        };

        if self.answers.contains_key(&self.current_index) {
            return SubmitOutcome::AlreadyAnswered;
        }

        let correct = question.is_correct(choice);
        self.answers.insert(self.current_index, choice.to_string());
        debug!(index = self.current_index, correct, "answer recorded");

        if correct {
            self.score += 1;
            SubmitOutcome::Correct
        } else {
            SubmitOutcome::Incorrect
        }
    }

    /// Move to the next question. Returns `false` at the last question.
    pub fn next_question(&mut self) -> bool {
        if self.current_index + 1 < self.questions.len() {
            self.current_index += 1;
            true
        } else {
            false
        }
    }

    pub fn score(&self) -> usize {
        self.score
    }

    /// Score counted from scratch out of the answer map.
    pub fn recomputed_score(&self) -> usize {
        self.answers
            .iter()
            .filter(|(index, answer)| {
                self.questions
                    .get(**index)
                    .is_some_and(|question| question.is_correct(answer))
            })
            .count()
    }

    pub fn summary(&self) -> Summary {
        let total = self.total();
        let percentage = grade::percentage(self.score, total);
        Summary {
            score: self.score,
            total,
            percentage,
            grade: Grade::from_percentage(percentage),
        }
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn question(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.current_index)
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn total(&self) -> usize {
        self.questions.len()
    }

    pub fn is_last_question(&self) -> bool {
        !self.questions.is_empty() && self.current_index + 1 == self.questions.len()
    }

    pub fn answer(&self, index: usize) -> Option<&str> {
        self.answers.get(&index).map(String::as_str)
    }

    pub fn current_answer(&self) -> Option<&str> {
        self.answer(self.current_index)
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

#[cfg(test)]
pub(crate) fn loaded_session(count: usize) -> Session {
    let mut session = Session::new();
    let ticket = session.begin_loading();
    session.finish_loading(ticket, Ok(crate::models::sample_questions(count)));
    session
}
