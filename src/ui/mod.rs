mod quiz;
mod result;
mod welcome;

use ratatui::{prelude::*, widgets::Block};

use crate::app::{App, Screen};
use crate::models::Difficulty;
use crate::session::Session;
use crate::source::QuestionQuery;

pub fn render(frame: &mut Frame, app: &App, session: &Session, query: &QuestionQuery) {
    let area = frame.area();
    frame.render_widget(Block::default().bg(Color::Reset), area);

    match app.screen {
        Screen::Question if session.current_question().is_some() => {
            quiz::render(frame, area, app, session)
        }
        Screen::Results if !session.questions().is_empty() => {
            result::render(frame, area, app, session)
        }
        _ => welcome::render(frame, area, session, query),
    }
}

fn difficulty_color(difficulty: Difficulty) -> Color {
    match difficulty {
        Difficulty::Easy => Color::Green,
        Difficulty::Medium => Color::Yellow,
        Difficulty::Hard => Color::Red,
    }
}
