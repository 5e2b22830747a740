use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use super::{status_color, truncate};
use crate::tui::App;

pub fn draw(f: &mut Frame, app: &App, area: Rect) {
    let title = match &app.selected_category {
        Some(name) => format!(" {} ", name),
        None => " Questions ".to_string(),
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .title_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        );

    if app.questions.items.is_empty() {
        let paragraph = Paragraph::new("No questions in this category.")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        f.render_widget(paragraph, area);
        return;
    }

    let width = area.width.saturating_sub(30) as usize;

    let items: Vec<ListItem> = app
        .questions
        .items
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let tracked = app
                .tracker
                .position_of(&entry.question)
                .and_then(|index| app.tracker.get(index));

            let (marker, status_span) = match tracked {
                Some(item) => (
                    Span::styled("● ", Style::default().fg(Color::Yellow)),
                    Span::styled(
                        format!(" {}", item.status.label()),
                        Style::default().fg(status_color(item.status)),
                    ),
                ),
                None => (Span::raw("  "), Span::raw("")),
            };

            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("{:>3}. ", i + 1),
                    Style::default().fg(Color::DarkGray),
                ),
                marker,
                Span::styled(
                    truncate(&entry.question, width.max(10)),
                    Style::default().fg(Color::White),
                ),
                status_span,
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    let mut state = ListState::default();
    state.select(app.questions.selected);

    f.render_stateful_widget(list, area, &mut state);
}
