use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Gauge, Padding, Paragraph, Wrap},
};

use crate::app::App;
use crate::models::{decode_html, Question};
use crate::session::Session;

use super::difficulty_color;

const OPTION_LABELS: [char; 4] = ['A', 'B', 'C', 'D'];
const LOW_TIME: u32 = 10;

pub fn render(frame: &mut Frame, area: Rect, app: &App, session: &Session) {
    let Some(question) = session.current_question() else {
        return;
    };

    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(5),
        Constraint::Fill(1),
        Constraint::Length(if app.show_hint() { 4 } else { 0 }),
        Constraint::Length(1),
    ])
    .margin(1)
    .split(area);

    render_header(frame, chunks[0], question, session);
    render_timer(frame, chunks[1], app);
    render_question_text(frame, chunks[2], &question.prompt);
    render_options(frame, chunks[3], app, session.current_answer());
    if app.show_hint() {
        render_hint(frame, chunks[4], &question.category);
    }
    render_controls(frame, chunks[5], session);
}

fn render_header(frame: &mut Frame, area: Rect, question: &Question, session: &Session) {
    let chunks = Layout::horizontal([Constraint::Fill(1), Constraint::Length(20)]).split(area);

    let tags = Line::from(vec![
        Span::styled(
            format!(" {} ", question.difficulty.label()),
            Style::default()
                .fg(Color::Black)
                .bg(difficulty_color(question.difficulty))
                .bold(),
        ),
        Span::raw("  "),
        Span::styled(
            decode_html(&question.category),
            Style::default().fg(Color::DarkGray),
        ),
    ]);
    frame.render_widget(Paragraph::new(tags), chunks[0]);

    let progress = format!(
        "Question {}/{}",
        session.current_index() + 1,
        session.total()
    );
    let widget = Paragraph::new(progress)
        .alignment(Alignment::Right)
        .fg(Color::Cyan)
        .bold();
    frame.render_widget(widget, chunks[1]);
}

fn render_timer(frame: &mut Frame, area: Rect, app: &App) {
    let color = if app.time_left() <= LOW_TIME {
        Color::Red
    } else {
        Color::Cyan
    };
    let ratio = if app.time_limit() > 0 {
        f64::from(app.time_left()) / f64::from(app.time_limit())
    } else {
        0.0
    };

    let widget = Gauge::default()
        .gauge_style(Style::default().fg(color).bg(Color::DarkGray))
        .ratio(ratio.clamp(0.0, 1.0))
        .label(format!("{}s", app.time_left()));
    frame.render_widget(widget, area);
}

fn render_question_text(frame: &mut Frame, area: Rect, prompt: &str) {
    let widget = Paragraph::new(decode_html(prompt))
        .wrap(Wrap { trim: true })
        .style(Style::default().fg(Color::White).bold())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .padding(Padding::horizontal(1)),
        );
    frame.render_widget(widget, area);
}

fn render_options(frame: &mut Frame, area: Rect, app: &App, submitted: Option<&str>) {
    let mut lines: Vec<Line> = Vec::with_capacity(app.options().len() * 2);

    for (index, option) in app.options().iter().enumerate() {
        let is_selected = index == app.selected_option();
        let is_submitted = submitted == Some(option.as_str());

        let style = if is_submitted {
            Style::default().fg(Color::Black).bg(Color::Cyan).bold()
        } else if is_selected {
            Style::default().fg(Color::Cyan).bold()
        } else {
            Style::default().fg(Color::Gray)
        };
        let marker = if is_selected { ">" } else { " " };
        let label = OPTION_LABELS.get(index).copied().unwrap_or('?');

        lines.push(Line::from(vec![
            Span::styled(format!(" {} ", marker), style),
            Span::styled(format!("{}. ", label), style),
            Span::styled(decode_html(option), style),
        ]));
        lines.push(Line::from(""));
    }

    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Options ")
            .title_style(Style::default().fg(Color::Cyan))
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(widget, area);
}

fn render_hint(frame: &mut Frame, area: Rect, category: &str) {
    let text = format!(
        "Look for keywords in the question and consider the context. \
         The answer might be related to {}.",
        decode_html(category)
    );
    let widget = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .fg(Color::LightBlue)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Blue))
                .title(" Hint ")
                .padding(Padding::horizontal(1)),
        );
    frame.render_widget(widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect, session: &Session) {
    let next = if session.current_answer().is_none() {
        ""
    } else if session.is_last_question() {
        "  ·  n finish quiz"
    } else {
        "  ·  n next question"
    };
    let widget = Paragraph::new(format!(
        "j/k navigate  ·  enter select  ·  h hint{}  ·  q quit",
        next
    ))
    .alignment(Alignment::Center)
    .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}
