//! View-model for the asked-question list. The TUI rebuilds it from the
//! tracker on every frame; nothing is patched incrementally.

use crate::models::Status;
use crate::tracker::{EditHandle, TrackerStore};

pub const EMPTY_TEXT_PLACEHOLDER: &str = "(empty)";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GradeControl {
    pub key: char,
    pub status: Status,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowText {
    Display(String),
    /// Buffer halves either side of the caret
    Editing { before: String, after: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AskedRow {
    /// 1-based, display only
    pub number: usize,
    pub text: RowText,
    pub grades: Vec<GradeControl>,
    pub status: Status,
}

impl AskedRow {
    pub fn status_label(&self) -> &'static str {
        self.status.label()
    }
}

pub fn asked_rows(tracker: &TrackerStore, edit: Option<&EditHandle>) -> Vec<AskedRow> {
    tracker
        .items()
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let text = match edit {
                Some(handle) if handle.index == i && tracker.editing() == Some(i) => {
                    let (before, after) = handle.split();
                    RowText::Editing {
                        before: before.to_string(),
                        after: after.to_string(),
                    }
                }
                _ if item.text.is_empty() => RowText::Display(EMPTY_TEXT_PLACEHOLDER.to_string()),
                _ => RowText::Display(item.text.clone()),
            };

            let grades = Status::GRADES
                .iter()
                .enumerate()
                .map(|(g, status)| GradeControl {
                    key: char::from(b'1' + g as u8),
                    status: *status,
                    selected: item.status == *status,
                })
                .collect();

            AskedRow {
                number: i + 1,
                text,
                grades,
                status: item.status,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tracker(questions: &[&str]) -> TrackerStore {
        let mut tracker = TrackerStore::new();
        for q in questions {
            tracker.add_asked_question(q).unwrap();
        }
        tracker
    }

    #[test]
    fn empty_tracker_has_no_rows() {
        assert!(asked_rows(&TrackerStore::new(), None).is_empty());
    }

    #[test]
    fn rows_are_numbered_from_one_in_order() {
        let rows = asked_rows(&tracker(&["Q1", "Q2", "Q3"]), None);
        let numbers: Vec<usize> = rows.iter().map(|r| r.number).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
        assert_eq!(rows[2].text, RowText::Display("Q3".to_string()));
    }

    #[test]
    fn grade_controls_reflect_status() {
        let mut t = tracker(&["Q1"]);
        t.set_status(0, Status::Confusing).unwrap();

        let row = &asked_rows(&t, None)[0];
        let keys: Vec<char> = row.grades.iter().map(|g| g.key).collect();
        assert_eq!(keys, vec!['1', '2', '3', '4']);

        let selected: Vec<Status> = row
            .grades
            .iter()
            .filter(|g| g.selected)
            .map(|g| g.status)
            .collect();
        assert_eq!(selected, vec![Status::Confusing]);
        assert_eq!(row.status_label(), "Confusing");
    }

    #[test]
    fn unset_row_selects_no_grade() {
        let row = &asked_rows(&tracker(&["Q1"]), None)[0];
        assert!(row.grades.iter().all(|g| !g.selected));
        assert_eq!(row.status_label(), "Not graded");
    }

    #[test]
    fn editing_row_shows_buffer_around_caret() {
        let mut t = tracker(&["Q1", "Q2"]);
        let mut handle = t.begin_edit(1).unwrap();
        handle.move_left();
        handle.insert('!');

        let rows = asked_rows(&t, Some(&handle));
        assert_eq!(rows[0].text, RowText::Display("Q1".to_string()));
        assert_eq!(
            rows[1].text,
            RowText::Editing {
                before: "Q!".to_string(),
                after: "2".to_string()
            }
        );
    }

    #[test]
    fn stale_handle_renders_as_display() {
        let mut t = tracker(&["Q1"]);
        let handle = t.begin_edit(0).unwrap();
        t.commit_edit(0, "Q1 edited").unwrap();

        let rows = asked_rows(&t, Some(&handle));
        assert_eq!(rows[0].text, RowText::Display("Q1 edited".to_string()));
    }

    #[test]
    fn empty_text_uses_placeholder() {
        let mut t = tracker(&["Q1"]);
        t.commit_edit(0, "").unwrap();
        let rows = asked_rows(&t, None);
        assert_eq!(rows[0].text, RowText::Display("(empty)".to_string()));
    }
}
