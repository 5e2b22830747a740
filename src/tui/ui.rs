use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
    Frame,
};

use super::widgets::{answer, asked, categories, notes, questions};
use super::{App, View};

pub fn draw(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Tab bar
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Notice
            Constraint::Length(1), // Help bar
        ])
        .split(f.area());

    draw_tabs(f, app, chunks[0]);
    draw_content(f, app, chunks[1]);
    draw_notice(f, app, chunks[2]);
    draw_help_bar(f, app, chunks[3]);
}

fn draw_tabs(f: &mut Frame, app: &App, area: Rect) {
    let tab_titles = vec![
        "Catalogue".to_string(),
        format!("Asked ({})", app.tracker.len()),
        "Notes".to_string(),
    ];
    let selected = match app.view {
        View::Categories | View::Questions | View::Answer => 0,
        View::Asked => 1,
        View::Notes => 2,
    };

    let tabs = Tabs::new(tab_titles)
        .block(Block::default().borders(Borders::ALL).title(" qabank "))
        .select(selected)
        .style(Style::default().fg(Color::White))
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        );

    f.render_widget(tabs, area);
}

fn draw_content(f: &mut Frame, app: &App, area: Rect) {
    match app.view {
        View::Categories => categories::draw(f, app, area),
        View::Questions => questions::draw(f, app, area),
        View::Answer => answer::draw(f, app, area),
        View::Asked => asked::draw(f, app, area),
        View::Notes => notes::draw(f, app, area),
    }
}

fn draw_notice(f: &mut Frame, app: &App, area: Rect) {
    let Some(notice) = &app.notice else {
        return;
    };
    let line = Paragraph::new(Line::from(Span::styled(
        format!(" {}", notice),
        Style::default().fg(Color::Yellow),
    )));
    f.render_widget(line, area);
}

fn key(label: &'static str) -> Span<'static> {
    Span::styled(label, Style::default().fg(Color::Cyan))
}

fn draw_help_bar(f: &mut Frame, app: &App, area: Rect) {
    let help_text = if app.edit.is_some() {
        vec![
            Span::styled("Editing", Style::default().fg(Color::Yellow)),
            Span::raw(" | "),
            key("<Esc>/<Tab>"),
            Span::raw(" Save  "),
            key("<CR>"),
            Span::raw(" Newline  "),
            key("←/→"),
            Span::raw(" Move"),
        ]
    } else {
        let mut spans = vec![key("<Tab>"), Span::raw(" Views  ")];

        match app.view {
            View::Categories => {
                spans.extend(vec![
                    key("j/k"),
                    Span::raw(" Nav  "),
                    key("g/G"),
                    Span::raw(" Top/Bot  "),
                    key("l/<CR>"),
                    Span::raw(" Open  "),
                ]);
            }
            View::Questions => {
                spans.extend(vec![
                    key("j/k"),
                    Span::raw(" Nav  "),
                    key("l/<CR>"),
                    Span::raw(" Answer  "),
                    key("m"),
                    Span::raw(" Mark asked  "),
                    key("n"),
                    Span::raw(" Next  "),
                    key("h/<Esc>"),
                    Span::raw(" Back  "),
                ]);
            }
            View::Answer => {
                spans.extend(vec![
                    key("j/k"),
                    Span::raw(" Scroll  "),
                    key("m"),
                    Span::raw(" Mark asked  "),
                    key("h/<Esc>"),
                    Span::raw(" Back  "),
                ]);
            }
            View::Asked => {
                spans.extend(vec![
                    key("j/k"),
                    Span::raw(" Nav  "),
                    key("1-4"),
                    Span::raw(" Grade  "),
                    key("e/<CR>"),
                    Span::raw(" Edit  "),
                ]);
            }
            View::Notes => {
                spans.extend(vec![
                    key("^r"),
                    Span::raw(" Reload  "),
                    key("P/F"),
                    Span::raw(" Push/Fetch  "),
                ]);
            }
        }

        spans.extend(vec![key("q"), Span::raw(" Quit")]);

        spans
    };

    let help = Paragraph::new(Line::from(help_text)).style(Style::default().bg(Color::DarkGray));

    f.render_widget(help, area);
}
