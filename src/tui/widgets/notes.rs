use ratatui::{
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::tui::App;

pub fn draw(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" Notes ({}) ", app.notes_path()))
        .title_style(Style::default().fg(Color::Cyan));

    let paragraph = if app.notes_text.trim().is_empty() {
        Paragraph::new("No notes yet. Add one with `qabank notes add <text>`.")
            .style(Style::default().fg(Color::DarkGray))
    } else {
        Paragraph::new(app.notes_text.as_str()).style(Style::default().fg(Color::White))
    };

    f.render_widget(paragraph.block(block).wrap(Wrap { trim: false }), area);
}
