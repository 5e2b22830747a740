use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use super::status_color;
use crate::catalogue::answer_text;
use crate::tui::App;

pub fn draw(f: &mut Frame, app: &App, area: Rect) {
    let Some(displayed) = &app.displayed else {
        let block = Block::default().borders(Borders::ALL).title(" Answer ");
        let paragraph = Paragraph::new("No question selected").block(block);
        f.render_widget(paragraph, area);
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5), // Question
            Constraint::Min(0),    // Answer
        ])
        .split(area);

    let tracked = app
        .tracker
        .position_of(&displayed.entry.question)
        .and_then(|index| app.tracker.get(index));

    let asked_line = match tracked {
        Some(item) => Line::from(vec![
            Span::styled("Asked: ", Style::default().fg(Color::Gray)),
            Span::styled(
                item.status.label(),
                Style::default().fg(status_color(item.status)),
            ),
        ]),
        None => Line::from(Span::styled(
            "Not marked as asked",
            Style::default().fg(Color::DarkGray),
        )),
    };

    let question = Paragraph::new(vec![
        Line::from(Span::styled(
            displayed.entry.question.as_str(),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )),
        asked_line,
    ])
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" Question {} ", displayed.index + 1))
            .title_style(Style::default().fg(Color::Yellow)),
    )
    .wrap(Wrap { trim: true });
    f.render_widget(question, chunks[0]);

    let answer = Paragraph::new(answer_text(&displayed.entry.answer))
        .style(Style::default().fg(Color::White))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Answer ")
                .title_style(Style::default().fg(Color::Cyan)),
        )
        .wrap(Wrap { trim: false })
        .scroll((app.answer_scroll, 0));
    f.render_widget(answer, chunks[1]);
}
