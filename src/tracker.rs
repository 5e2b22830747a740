//! Asked-question tracker.
//!
//! An owned, in-memory list of the questions the user flagged while
//! reviewing. Items are only ever appended, graded, or have their text
//! replaced; nothing is removed and nothing is persisted.

use log::{debug, info, warn};
use thiserror::Error;

use crate::models::{AskedItem, Status, StatusSummary};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TrackerError {
    #[error("This question has already been marked as asked.")]
    Duplicate,

    #[error("no asked question at index {index} (tracking {len})")]
    IndexOutOfRange { index: usize, len: usize },
}

/// Open edit on one item: the buffer the user types into plus a cursor
/// expressed in chars.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditHandle {
    pub index: usize,
    pub buffer: String,
    pub cursor: usize,
}

impl EditHandle {
    fn new(index: usize, text: &str) -> Self {
        // Multi-line text opens at the start of the second line, anything else at the end.
        let cursor = match text.find('\n') {
            Some(pos) => text[..=pos].chars().count(),
            None => text.chars().count(),
        };
        Self {
            index,
            buffer: text.to_string(),
            cursor,
        }
    }

    fn byte_offset(&self) -> usize {
        self.buffer
            .char_indices()
            .nth(self.cursor)
            .map(|(i, _)| i)
            .unwrap_or(self.buffer.len())
    }

    pub fn insert(&mut self, c: char) {
        let at = self.byte_offset();
        self.buffer.insert(at, c);
        self.cursor += 1;
    }

    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        self.cursor -= 1;
        let at = self.byte_offset();
        self.buffer.remove(at);
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.buffer.chars().count() {
            self.cursor += 1;
        }
    }

    /// Buffer split at the cursor, for rendering a caret between the halves.
    pub fn split(&self) -> (&str, &str) {
        self.buffer.split_at(self.byte_offset())
    }
}

#[derive(Debug, Default)]
pub struct TrackerStore {
    items: Vec<AskedItem>,
    editing: Option<usize>,
}

impl TrackerStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[AskedItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&AskedItem> {
        self.items.get(index)
    }

    /// Index of the item currently in edit mode, if any.
    pub fn editing(&self) -> Option<usize> {
        self.editing
    }

    /// Finds a tracked item by the catalogue text it was seeded from.
    pub fn position_of(&self, question: &str) -> Option<usize> {
        self.items.iter().position(|item| item.original == question)
    }

    pub fn find_by_original(&self, question: &str) -> Option<&AskedItem> {
        self.position_of(question).and_then(|index| self.get(index))
    }

    /// Appends `text` as a new ungraded item and returns its index.
    ///
    /// The duplicate check compares against each item's seed text, so a
    /// question stays "already asked" even after its tracked text was edited.
    pub fn add_asked_question(&mut self, text: &str) -> Result<usize, TrackerError> {
        if self.position_of(text).is_some() {
            info!("event=mark_asked module=tracker status=duplicate");
            return Err(TrackerError::Duplicate);
        }

        self.items.push(AskedItem::new(text));
        let index = self.items.len() - 1;
        info!(
            "event=mark_asked module=tracker status=ok index={} total={}",
            index,
            self.items.len()
        );
        Ok(index)
    }

    pub fn set_status(&mut self, index: usize, status: Status) -> Result<(), TrackerError> {
        let item = self.item_mut(index)?;
        let previous = item.status;
        item.status = status;
        debug!(
            "event=set_status module=tracker status=ok index={} from={} to={}",
            index,
            previous.as_str(),
            status.as_str()
        );
        Ok(())
    }

    /// Puts item `index` into edit mode and hands back a buffer seeded with
    /// its current text. Only one item edits at a time; starting a new edit
    /// moves the slot.
    pub fn begin_edit(&mut self, index: usize) -> Result<EditHandle, TrackerError> {
        let handle = EditHandle::new(index, &self.item_at(index)?.text);
        if let Some(previous) = self.editing.replace(index) {
            if previous != index {
                debug!(
                    "event=begin_edit module=tracker status=moved from={} to={}",
                    previous, index
                );
            }
        }
        Ok(handle)
    }

    /// Replaces the text of item `index` verbatim and leaves edit mode.
    /// The item's status is untouched.
    pub fn commit_edit(&mut self, index: usize, new_text: &str) -> Result<(), TrackerError> {
        let item = self.item_mut(index)?;
        if new_text.trim().is_empty() {
            warn!(
                "event=commit_edit module=tracker status=empty_text index={}",
                index
            );
        }
        item.text = new_text.to_string();
        if self.editing == Some(index) {
            self.editing = None;
        }
        debug!("event=commit_edit module=tracker status=ok index={}", index);
        Ok(())
    }

    pub fn summary(&self) -> StatusSummary {
        let mut summary = StatusSummary::default();
        for item in &self.items {
            summary.record(item.status);
        }
        summary
    }

    fn item_at(&self, index: usize) -> Result<&AskedItem, TrackerError> {
        self.items.get(index).ok_or(TrackerError::IndexOutOfRange {
            index,
            len: self.items.len(),
        })
    }

    fn item_mut(&mut self, index: usize) -> Result<&mut AskedItem, TrackerError> {
        let len = self.items.len();
        self.items.get_mut(index).ok_or_else(|| {
            warn!(
                "event=tracker_index module=tracker status=error index={} len={}",
                index, len
            );
            TrackerError::IndexOutOfRange { index, len }
        })
    }
}
