use tracing::debug;

use crate::countdown::{CountdownEvent, DEFAULT_TIME_LIMIT};
use crate::order::{OptionOrder, Sorted};
use crate::service::StartOutcome;
use crate::session::{Session, SessionStatus, SubmitOutcome};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Landing,
    Question,
    Results,
}

/// What moving past the current question led to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    NextQuestion,
    Finished,
    /// Nothing to do: wrong screen, or the event belonged to an earlier question.
    Ignored,
}

/// View state layered over the session.
pub struct App {
    pub screen: Screen,
    order: Box<dyn OptionOrder>,
    time_limit: u32,
    time_left: u32,
    options: Vec<String>,
    selected_option: usize,
    show_hint: bool,
    result_scroll: usize,
}

impl App {
    pub fn new(order: Box<dyn OptionOrder>, time_limit: u32) -> Self {
        Self {
            screen: Screen::Landing,
            order,
            time_limit,
            time_left: time_limit,
            options: Vec::new(),
            selected_option: 0,
            show_hint: false,
            result_scroll: 0,
        }
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn selected_option(&self) -> usize {
        self.selected_option
    }

    pub fn time_left(&self) -> u32 {
        self.time_left
    }

    pub fn time_limit(&self) -> u32 {
        self.time_limit
    }

    pub fn show_hint(&self) -> bool {
        self.show_hint
    }

    pub fn result_scroll(&self) -> usize {
        self.result_scroll
    }

    /// The question index the countdown should be running for, if any.
    pub fn countdown_target(&self, session: &Session) -> Option<usize> {
        match self.screen {
            Screen::Question if session.current_question().is_some() => {
                Some(session.current_index())
            }
            _ => None,
        }
    }

    /// React to a finished `start()`.
    pub fn on_loaded(&mut self, outcome: StartOutcome, session: &Session) {
        match outcome {
            StartOutcome::Loaded { .. } if session.status() == SessionStatus::Active => {
                self.result_scroll = 0;
                self.enter_question(session);
            }
            StartOutcome::Loaded { .. } | StartOutcome::Failed => {
                self.screen = Screen::Landing;
            }
            StartOutcome::Superseded => {}
        }
    }

    /// Called when the user asks for a new quiz; the landing screen shows progress.
    pub fn on_restart(&mut self) {
        self.screen = Screen::Landing;
        self.options.clear();
    }

    pub fn go_home(&mut self) {
        self.screen = Screen::Landing;
    }

    pub fn select_next_option(&mut self) {
        if !self.options.is_empty() {
            self.selected_option = (self.selected_option + 1) % self.options.len();
        }
    }

    pub fn select_previous_option(&mut self) {
        let count = self.options.len();
        if count > 0 {
            self.selected_option = (self.selected_option + count - 1) % count;
        }
    }

    pub fn reveal_hint(&mut self) {
        self.show_hint = true;
    }

    pub fn submit_selected(&mut self, session: &mut Session) -> SubmitOutcome {
        if self.screen != Screen::Question {
            return SubmitOutcome::NoQuestion;
        }
        match self.options.get(self.selected_option) {
            Some(choice) => session.submit_answer(choice),
            None => SubmitOutcome::NoQuestion,
        }
    }

    /// Manual "next": only once the current question has an answer.
    pub fn next(&mut self, session: &mut Session) -> Advance {
        if self.screen != Screen::Question || session.current_answer().is_none() {
            return Advance::Ignored;
        }
        self.advance(session)
    }

    pub fn on_countdown(&mut self, event: CountdownEvent, session: &mut Session) -> Advance {
        if self.screen != Screen::Question {
            return Advance::Ignored;
        }

        match event {
            CountdownEvent::Tick {
                question,
                remaining,
            } => {
                if question == session.current_index() {
                    self.time_left = remaining;
                }
                Advance::Ignored
            }
            CountdownEvent::Expired { question } => {
                if question != session.current_index() {
                    debug!(question, "ignoring stale countdown expiry");
                    return Advance::Ignored;
                }
                self.time_left = 0;
                debug!(question, "time is up");
                self.advance(session)
            }
        }
    }

    pub fn scroll_results_down(&mut self, session: &Session) {
        let max_scroll = session.total().saturating_sub(1);
        self.result_scroll = (self.result_scroll + 1).min(max_scroll);
    }

    pub fn scroll_results_up(&mut self) {
        self.result_scroll = self.result_scroll.saturating_sub(1);
    }

    fn advance(&mut self, session: &mut Session) -> Advance {
        if session.next_question() {
            self.enter_question(session);
            Advance::NextQuestion
        } else {
            self.screen = Screen::Results;
            self.result_scroll = 0;
            Advance::Finished
        }
    }

    fn enter_question(&mut self, session: &Session) {
        self.screen = Screen::Question;
        self.options = session
            .current_question()
            .map(|question| question.options())
            .unwrap_or_default();
        self.order.arrange(&mut self.options);
        self.selected_option = 0;
        self.time_left = self.time_limit;
        self.show_hint = false;
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new(Box::new(Sorted), DEFAULT_TIME_LIMIT)
    }
}
