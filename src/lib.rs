//! # trivia-quiz
//!
//! A terminal trivia quiz backed by the Open Trivia DB.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use trivia_quiz::{Quiz, QuizConfig, QuizError};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), QuizError> {
//!     // Five computer science questions, 30 seconds each
//!     let quiz = Quiz::from_config(&QuizConfig::default())?;
//!
//!     // Run the quiz in the terminal
//!     quiz.run().await
//! }
//! ```

mod app;
mod config;
mod countdown;
mod grade;
pub mod logging;
mod models;
mod order;
mod service;
mod session;
mod source;
pub mod terminal;
mod ui;

use std::io;
use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{Event, EventStream, KeyCode, KeyEventKind};
use futures_util::StreamExt;
use thiserror::Error;
use tokio::sync::mpsc;
use tracing::{debug, info};

pub use app::{Advance, App, Screen};
pub use config::{OrderKind, QuizConfig, DEFAULT_REQUEST_TIMEOUT};
pub use countdown::{Countdown, CountdownEvent, DEFAULT_TIME_LIMIT};
pub use grade::{percentage, Grade};
pub use models::{decode_html, Difficulty, Question, QuestionKind};
pub use order::{OptionOrder, Shuffled, Sorted};
pub use service::{QuizService, SharedSession, StartOutcome};
pub use session::{
    LoadOutcome, LoadTicket, Session, SessionStatus, SubmitOutcome, Summary, UNABLE_TO_RETRIEVE,
};
pub use source::{
    FailureKind, OpenTriviaSource, QuestionQuery, QuestionSource, SourceError, DEFAULT_AMOUNT,
    DEFAULT_API_URL, DEFAULT_CATEGORY,
};

const REDRAW_INTERVAL: Duration = Duration::from_millis(250);

/// Error type for quiz operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizError {
    /// The question source could not be set up.
    #[error("failed to set up question source: {0}")]
    Source(#[from] SourceError),
    /// IO error during quiz execution.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// A quiz instance that can be run in the terminal.
pub struct Quiz {
    service: Arc<QuizService>,
    app: App,
}

/// What a key press asks the event loop to do.
enum Action {
    None,
    Start,
    Quit,
}

impl Quiz {
    /// Create a quiz over any question source.
    pub fn new(service: QuizService, app: App) -> Self {
        Self {
            service: Arc::new(service),
            app,
        }
    }

    /// Create a quiz talking to the Open Trivia DB as configured.
    pub fn from_config(config: &QuizConfig) -> Result<Self, QuizError> {
        let source = OpenTriviaSource::new(config.api_url.clone(), config.request_timeout)?;
        let service = QuizService::new(Arc::new(source), config.query);
        let app = App::new(config.option_order(), config.time_limit);
        Ok(Self::new(service, app))
    }

    pub fn service(&self) -> &Arc<QuizService> {
        &self.service
    }

    /// Run the quiz in the terminal.
    ///
    /// This will take over the terminal, display the quiz UI, and return
    /// when the user quits.
    pub async fn run(mut self) -> Result<(), QuizError> {
        let mut term = terminal::init()?;
        let result = self.run_event_loop(&mut term).await;
        self.service.cancel().await;
        terminal::restore()?;
        result
    }

    async fn run_event_loop(
        &mut self,
        terminal: &mut terminal::QuizTerminal,
    ) -> Result<(), QuizError> {
        let mut events = EventStream::new();
        let (countdown_tx, mut countdown_rx) = mpsc::unbounded_channel::<CountdownEvent>();
        let (loaded_tx, mut loaded_rx) = mpsc::unbounded_channel::<StartOutcome>();
        let mut countdown: Option<Countdown> = None;
        let mut redraw = tokio::time::interval(REDRAW_INTERVAL);

        loop {
            {
                let session = self.service.session().lock().await;
                terminal.draw(|frame| {
                    ui::render(frame, &self.app, &session, self.service.query())
                })?;
            }

            tokio::select! {
                event = events.next() => match event {
                    Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                        match self.handle_input(key.code).await {
                            Action::Quit => break,
                            Action::Start => self.spawn_start(&loaded_tx),
                            Action::None => {}
                        }
                    }
                    Some(Ok(_)) => {}
                    Some(Err(e)) => return Err(e.into()),
                    None => break,
                },
                Some(event) = countdown_rx.recv() => {
                    let mut session = self.service.session().lock().await;
                    self.app.on_countdown(event, &mut session);
                }
                Some(outcome) = loaded_rx.recv() => {
                    let session = self.service.session().lock().await;
                    self.app.on_loaded(outcome, &session);
                }
                _ = redraw.tick() => {}
            }

            let target = {
                let session = self.service.session().lock().await;
                self.app.countdown_target(&session)
            };
            if countdown.as_ref().map(Countdown::question) != target {
                // Dropping the old handle cancels it.
                countdown = target.map(|question| {
                    Countdown::spawn(question, self.app.time_limit(), countdown_tx.clone())
                });
            }
        }

        Ok(())
    }

    fn spawn_start(&mut self, loaded_tx: &mpsc::UnboundedSender<StartOutcome>) {
        self.app.on_restart();
        let service = Arc::clone(&self.service);
        let tx = loaded_tx.clone();
        tokio::spawn(async move {
            let outcome = service.start().await;
            debug!(?outcome, "start finished");
            let _ = tx.send(outcome);
        });
    }

    /// Returns the action the event loop should take.
    async fn handle_input(&mut self, key: KeyCode) -> Action {
        let mut session = self.service.session().lock().await;
        let app = &mut self.app;

        if matches!(key, KeyCode::Char('q') | KeyCode::Char('Q')) {
            info!("quit requested");
            return Action::Quit;
        }

        match app.screen {
            Screen::Landing => handle_landing_input(key),
            Screen::Question => handle_question_input(app, &mut session, key),
            Screen::Results => handle_results_input(app, &session, key),
        }
    }
}

fn handle_landing_input(key: KeyCode) -> Action {
    match key {
        KeyCode::Enter => Action::Start,
        KeyCode::Esc => Action::Quit,
        _ => Action::None,
    }
}

fn handle_question_input(app: &mut App, session: &mut Session, key: KeyCode) -> Action {
    match key {
        KeyCode::Up | KeyCode::Char('k') => app.select_previous_option(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next_option(),
        KeyCode::Enter | KeyCode::Char(' ') => {
            app.submit_selected(session);
        }
        KeyCode::Right | KeyCode::Char('n') => {
            app.next(session);
        }
        KeyCode::Char('h') => app.reveal_hint(),
        _ => {}
    }
    Action::None
}

fn handle_results_input(app: &mut App, session: &Session, key: KeyCode) -> Action {
    match key {
        KeyCode::Down | KeyCode::Char('j') => app.scroll_results_down(session),
        KeyCode::Up | KeyCode::Char('k') => app.scroll_results_up(),
        KeyCode::Char('r') | KeyCode::Char('R') => return Action::Start,
        KeyCode::Char('h') | KeyCode::Home | KeyCode::Esc => app.go_home(),
        _ => {}
    }
    Action::None
}
