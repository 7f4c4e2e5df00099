use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

use crate::session::{Session, SessionStatus};
use crate::source::QuestionQuery;

pub fn render(frame: &mut Frame, area: Rect, session: &Session, query: &QuestionQuery) {
    let chunks = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(10),
        Constraint::Fill(1),
    ])
    .split(area);

    let mut content = vec![
        Line::from(""),
        Line::from(Span::styled(
            "TRIVIA QUIZ",
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(""),
        Line::from(
            format!(
                "{} Questions · Category {} · {}",
                query.amount, query.category, query.kind
            )
            .fg(Color::DarkGray),
        ),
        Line::from(""),
        Line::from(""),
    ];
    content.extend(status_lines(session));

    let widget = Paragraph::new(content).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Color::DarkGray),
    );

    frame.render_widget(widget, chunks[1]);
}

fn status_lines(session: &Session) -> Vec<Line<'_>> {
    match session.status() {
        SessionStatus::Loading => vec![Line::from(Span::styled(
            "Loading questions...",
            Style::default().fg(Color::Yellow),
        ))],
        SessionStatus::Error => vec![
            Line::from(Span::styled(
                session.error().unwrap_or_default(),
                Style::default().fg(Color::Red).bold(),
            )),
            Line::from("ENTER to retry  ·  q quit".fg(Color::DarkGray)),
        ],
        _ => vec![
            Line::from(Span::styled(
                "ENTER",
                Style::default().fg(Color::Green).bold(),
            )),
            Line::from("to start  ·  q quit".fg(Color::DarkGray)),
        ],
    }
}
