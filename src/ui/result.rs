use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Padding, Paragraph},
};

use crate::app::App;
use crate::models::decode_html;
use crate::session::{Session, Summary};

use super::difficulty_color;

const NO_ANSWER: &str = "No answer";

pub fn render(frame: &mut Frame, area: Rect, app: &App, session: &Session) {
    let summary = session.summary();

    let chunks = Layout::vertical([
        Constraint::Length(8),
        Constraint::Fill(1),
        Constraint::Length(2),
    ])
    .margin(1)
    .split(area);

    render_score_summary(frame, chunks[0], &summary);
    render_question_breakdown(frame, chunks[1], session, app.result_scroll());
    render_controls(frame, chunks[2]);
}

fn grade_color(percentage: u32) -> Color {
    match percentage {
        90.. => Color::Green,
        70..=89 => Color::Cyan,
        50..=69 => Color::Yellow,
        _ => Color::Red,
    }
}

fn render_score_summary(frame: &mut Frame, area: Rect, summary: &Summary) {
    let color = grade_color(summary.percentage);

    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            "QUIZ RESULTS",
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!(
                "{}%  ·  {} / {}",
                summary.percentage, summary.score, summary.total
            ),
            Style::default().fg(color).bold(),
        )),
        Line::from(Span::styled(
            format!("Grade {}", summary.grade.letter()),
            Style::default().fg(color).bold(),
        )),
        Line::from(summary.grade.message().fg(Color::Gray)),
    ];

    let widget = Paragraph::new(content).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Color::DarkGray),
    );
    frame.render_widget(widget, area);
}

fn render_question_breakdown(frame: &mut Frame, area: Rect, session: &Session, scroll: usize) {
    let mut lines: Vec<Line> = Vec::new();

    for (index, question) in session.questions().iter().enumerate() {
        let answer = session.answer(index);
        let is_correct = answer.is_some_and(|answer| question.is_correct(answer));
        let (symbol, color) = if is_correct {
            ("+", Color::Green)
        } else {
            ("-", Color::Red)
        };

        lines.push(Line::from(vec![
            Span::styled(format!(" {} ", symbol), Style::default().fg(color).bold()),
            Span::styled(
                format!("{:2}. ", index + 1),
                Style::default().fg(Color::DarkGray),
            ),
            Span::styled(
                format!("[{}] ", question.difficulty.label()),
                Style::default().fg(difficulty_color(question.difficulty)),
            ),
            Span::styled(
                decode_html(&question.category),
                Style::default().fg(Color::DarkGray),
            ),
        ]));
        lines.push(Line::from(Span::styled(
            format!("     {}", decode_html(&question.prompt)),
            Style::default().fg(Color::White),
        )));
        lines.push(Line::from(vec![
            Span::styled("     Correct answer: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                decode_html(&question.correct_answer),
                Style::default().fg(Color::Green),
            ),
        ]));
        lines.push(Line::from(vec![
            Span::styled("     Your answer:    ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                answer.map(decode_html).unwrap_or_else(|| NO_ANSWER.to_string()),
                Style::default().fg(color),
            ),
        ]));
        lines.push(Line::from(""));
    }

    // Each question takes five lines; scroll moves one question at a time.
    let offset = (scroll * 5).min(u16::MAX as usize) as u16;
    let widget = Paragraph::new(lines)
        .block(Block::default().padding(Padding::horizontal(1)))
        .scroll((offset, 0));
    frame.render_widget(widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect) {
    let widget = Paragraph::new("j/k scroll  ·  r try again  ·  h home  ·  q quit")
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}
