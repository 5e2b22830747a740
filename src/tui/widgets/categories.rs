use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use super::truncate;
use crate::tui::App;

pub fn draw(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Categories ")
        .title_style(Style::default().fg(Color::Cyan));

    if app.categories.items.is_empty() {
        let paragraph = Paragraph::new("The catalogue has no categories.")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        f.render_widget(paragraph, area);
        return;
    }

    let items: Vec<ListItem> = app
        .categories
        .items
        .iter()
        .map(|category| {
            let total = category.questions.len();
            let asked = category
                .questions
                .iter()
                .filter(|q| app.tracker.position_of(&q.question).is_some())
                .count();

            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("{:<32}", truncate(&category.name, 30)),
                    Style::default().fg(Color::White),
                ),
                Span::styled(
                    format!("{:>3} questions  ", total),
                    Style::default().fg(Color::Gray),
                ),
                Span::styled(
                    format!("{} asked", asked),
                    Style::default().fg(if asked > 0 {
                        Color::Yellow
                    } else {
                        Color::DarkGray
                    }),
                ),
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
    state.select(app.categories.selected);

    f.render_stateful_widget(list, area, &mut state);
}
