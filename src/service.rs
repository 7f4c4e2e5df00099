//! Asynchronous quiz start with cancel-and-replace semantics.

use std::sync::Arc;

use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::session::{LoadOutcome, Session};
use crate::source::{QuestionQuery, QuestionSource};

/// Session shared between the UI loop and load tasks.
pub type SharedSession = Arc<Mutex<Session>>;

/// Result of one [`QuizService::start`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    Loaded { count: usize },
    Failed,
    /// A later `start()` (or [`QuizService::cancel`]) took over.
    Superseded,
}

/// Owns the session and the question source; starts quizzes.
pub struct QuizService {
    session: SharedSession,
    source: Arc<dyn QuestionSource>,
    query: QuestionQuery,
    inflight: Mutex<Option<CancellationToken>>,
}

impl QuizService {
    pub fn new(source: Arc<dyn QuestionSource>, query: QuestionQuery) -> Self {
        Self {
            session: Arc::new(Mutex::new(Session::new())),
            source,
            query,
            inflight: Mutex::new(None),
        }
    }

    pub fn session(&self) -> &SharedSession {
        &self.session
    }

    pub fn query(&self) -> &QuestionQuery {
        &self.query
    }

    /// Fetch a fresh question list and install it in the session.
    ///
    /// Cancels the fetch of any earlier `start()` that is still running.
    pub async fn start(&self) -> StartOutcome {
        let token = CancellationToken::new();

        // Ticket and token are swapped under the session lock so two racing
        // starts cannot leave the session waiting on a cancelled fetch.
        let ticket = {
            let mut session = self.session.lock().await;
            let ticket = session.begin_loading();
            if let Some(previous) = self.inflight.lock().await.replace(token.clone()) {
                previous.cancel();
            }
            ticket
        };

        info!(query = ?self.query, "starting quiz");

        let result = tokio::select! {
            _ = token.cancelled() => {
                debug!("question fetch cancelled");
                return StartOutcome::Superseded;
            }
            result = self.source.fetch(&self.query) => result,
        };

        let mut session = self.session.lock().await;
        let outcome = session.finish_loading(ticket, result);

        // An uncancelled token is still the registered one: replacing it needs
        // the session lock held here.
        if !token.is_cancelled() {
            self.inflight.lock().await.take();
        }

        match outcome {
            LoadOutcome::Installed { count } => StartOutcome::Loaded { count },
            LoadOutcome::Failed => StartOutcome::Failed,
            LoadOutcome::Stale => StartOutcome::Superseded,
        }
    }

    /// Cancel the in-flight fetch, if any.
    pub async fn cancel(&self) {
        if let Some(token) = self.inflight.lock().await.take() {
            token.cancel();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use tokio::sync::Notify;

    use super::*;
    use crate::models::{sample_questions, Question};
    use crate::session::{SessionStatus, UNABLE_TO_RETRIEVE};
    use crate::source::SourceError;

    /// Serves `sample_questions`, optionally parking the first call until released.
    struct FakeSource {
        calls: AtomicUsize,
        gate: Option<Arc<Notify>>,
        fail: bool,
    }

    impl FakeSource {
        fn ok() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                gate: None,
                fail: false,
            }
        }

        fn failing() -> Self {
            Self {
                fail: true,
                ..Self::ok()
            }
        }

        fn gated(gate: Arc<Notify>) -> Self {
            Self {
                gate: Some(gate),
                ..Self::ok()
            }
        }
    }

    #[async_trait]
    impl QuestionSource for FakeSource {
        async fn fetch(&self, query: &QuestionQuery) -> Result<Vec<Question>, SourceError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            if call == 0 {
                if let Some(gate) = &self.gate {
                    gate.notified().await;
                }
            }
            if self.fail {
                return Err(SourceError::ResponseCode(1));
            }
            let mut questions = sample_questions(query.amount as usize);
            questions[0].prompt = format!("call {}", call);
            Ok(questions)
        }
    }

    #[tokio::test]
    async fn test_start_installs_questions() {
        let service = QuizService::new(Arc::new(FakeSource::ok()), QuestionQuery::default());

        assert_eq!(service.start().await, StartOutcome::Loaded { count: 5 });

        let session = service.session().lock().await;
        assert_eq!(session.status(), SessionStatus::Active);
        assert_eq!(session.total(), 5);
    }

    #[tokio::test]
    async fn test_failed_start_reports_error() {
        let service = QuizService::new(Arc::new(FakeSource::failing()), QuestionQuery::default());

        assert_eq!(service.start().await, StartOutcome::Failed);

        let session = service.session().lock().await;
        assert_eq!(session.status(), SessionStatus::Error);
        assert_eq!(session.error(), Some(UNABLE_TO_RETRIEVE));
        assert!(session.questions().is_empty());
    }

    #[tokio::test]
    async fn test_restart_resets_progress() {
        let service = QuizService::new(Arc::new(FakeSource::ok()), QuestionQuery::default());
        service.start().await;
        {
            let mut session = service.session().lock().await;
            session.submit_answer("right 0");
            session.next_question();
        }

        service.start().await;

        let session = service.session().lock().await;
        assert_eq!(session.current_index(), 0);
        assert_eq!(session.score(), 0);
        assert!(session.answer(0).is_none());
        assert_eq!(session.questions()[0].prompt, "call 1");
    }

    #[tokio::test]
    async fn test_second_start_supersedes_first() {
        let gate = Arc::new(Notify::new());
        let service = Arc::new(QuizService::new(
            Arc::new(FakeSource::gated(Arc::clone(&gate))),
            QuestionQuery::default(),
        ));

        let first = tokio::spawn({
            let service = Arc::clone(&service);
            async move { service.start().await }
        });
        while service.session().lock().await.status() != SessionStatus::Loading {
            tokio::task::yield_now().await;
        }

        assert_eq!(service.start().await, StartOutcome::Loaded { count: 5 });
        gate.notify_one();
        assert_eq!(first.await.unwrap(), StartOutcome::Superseded);

        let session = service.session().lock().await;
        assert_eq!(session.status(), SessionStatus::Active);
        assert_eq!(session.questions()[0].prompt, "call 1");
    }

    #[tokio::test]
    async fn test_cancel_abandons_fetch() {
        let gate = Arc::new(Notify::new());
        let service = Arc::new(QuizService::new(
            Arc::new(FakeSource::gated(gate)),
            QuestionQuery::default(),
        ));

        let pending = tokio::spawn({
            let service = Arc::clone(&service);
            async move { service.start().await }
        });
        while service.inflight.lock().await.is_none() {
            tokio::task::yield_now().await;
        }

        service.cancel().await;
        assert_eq!(pending.await.unwrap(), StartOutcome::Superseded);
    }
}
