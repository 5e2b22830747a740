pub mod answer;
pub mod asked;
pub mod categories;
pub mod notes;
pub mod questions;

use ratatui::style::Color;

use crate::models::Status;

fn status_color(status: Status) -> Color {
    match status {
        Status::Unset => Color::DarkGray,
        Status::Answered => Color::Green,
        Status::NotAnswered => Color::Red,
        Status::Confusing => Color::Magenta,
        Status::PartiallyCorrect => Color::Yellow,
    }
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
