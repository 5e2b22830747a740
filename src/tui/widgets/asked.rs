use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use super::status_color;
use crate::tui::App;
use crate::view::{asked_rows, AskedRow, RowText};

pub fn draw(f: &mut Frame, app: &App, area: Rect) {
    let summary = app.tracker.summary();
    let title = format!(
        " Asked Questions ({}: {} answered, {} partial, {} confusing, {} not answered) ",
        summary.total,
        summary.answered,
        summary.partially_correct,
        summary.confusing,
        summary.not_answered
    );

    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .title_style(Style::default().fg(Color::Magenta));

    if app.tracker.is_empty() {
        let paragraph = Paragraph::new(
            "No questions marked as asked yet. Press m on a question to track it.",
        )
        .style(Style::default().fg(Color::DarkGray))
        .block(block);
        f.render_widget(paragraph, area);
        return;
    }

    let items: Vec<ListItem> = asked_rows(&app.tracker, app.edit.as_ref())
        .iter()
        .map(row_item)
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().bg(Color::DarkGray))
        .highlight_symbol("> ");

    let mut state = ListState::default();
    state.select(app.asked.selected);

    f.render_stateful_widget(list, area, &mut state);
}

fn row_item(row: &AskedRow) -> ListItem<'static> {
    let number = Span::styled(
        format!("{}. ", row.number),
        Style::default().fg(Color::DarkGray),
    );

    let mut lines: Vec<Line> = match &row.text {
        RowText::Display(text) => text
            .split('\n')
            .enumerate()
            .map(|(i, part)| {
                let lead = if i == 0 {
                    number.clone()
                } else {
                    Span::raw("   ")
                };
                Line::from(vec![
                    lead,
                    Span::styled(
                        part.to_string(),
                        Style::default()
                            .fg(Color::White)
                            .add_modifier(Modifier::BOLD),
                    ),
                ])
            })
            .collect(),
        RowText::Editing { before, after } => editing_lines(number, before, after),
    };

    let mut controls = vec![Span::raw("   ")];
    for grade in &row.grades {
        let marker = if grade.selected { "(•)" } else { "( )" };
        let style = if grade.selected {
            Style::default()
                .fg(status_color(grade.status))
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        controls.push(Span::styled(
            format!("{} {} {}  ", grade.key, marker, grade.status.label()),
            style,
        ));
    }
    controls.push(Span::styled("Status: ", Style::default().fg(Color::Gray)));
    controls.push(Span::styled(
        row.status_label(),
        Style::default().fg(status_color(row.status)),
    ));
    lines.push(Line::from(controls));
    lines.push(Line::from(""));

    ListItem::new(lines)
}

// Caret is drawn as a block between the two halves of the buffer.
fn editing_lines(number: Span<'static>, before: &str, after: &str) -> Vec<Line<'static>> {
    let edit_style = Style::default().fg(Color::Yellow);
    let caret = Span::styled("█", Style::default().fg(Color::Yellow));

    let before_parts: Vec<&str> = before.split('\n').collect();
    let after_parts: Vec<&str> = after.split('\n').collect();
    let mut lines = Vec::new();

    let lead = |i: usize| {
        if i == 0 {
            number.clone()
        } else {
            Span::raw("   ")
        }
    };

    for (i, part) in before_parts[..before_parts.len() - 1].iter().enumerate() {
        lines.push(Line::from(vec![
            lead(i),
            Span::styled(part.to_string(), edit_style),
        ]));
    }

    let caret_line = before_parts.len() - 1;
    lines.push(Line::from(vec![
        lead(caret_line),
        Span::styled(before_parts[caret_line].to_string(), edit_style),
        caret,
        Span::styled(after_parts[0].to_string(), edit_style),
    ]));

    for part in &after_parts[1..] {
        lines.push(Line::from(vec![
            Span::raw("   "),
            Span::styled(part.to_string(), edit_style),
        ]));
    }

    lines
}
