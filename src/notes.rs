use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDateTime};
use log::info;
use thiserror::Error;

pub const NOTES_FILE_NAME: &str = "qa_database";

#[derive(Debug, Error)]
pub enum NotesError {
    #[error("note is empty")]
    EmptyNote,

    #[error("failed to access notes file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
}

/// Free-form study notes kept in a plain text file.
#[derive(Debug, Clone)]
pub struct NotesStore {
    path: PathBuf,
}

impl NotesStore {
    pub fn in_dir<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            path: dir.as_ref().join(NOTES_FILE_NAME),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whole file contents; a missing file reads as no notes.
    pub fn load(&self) -> Result<String, NotesError> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => Ok(contents),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(String::new()),
            Err(source) => Err(self.io_error(source)),
        }
    }

    pub fn append(&self, note: &str) -> Result<(), NotesError> {
        let entry = format_entry(note, &Local::now().naive_local())?;
        self.ensure_parent()?;

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| self.io_error(e))?;
        file.write_all(entry.as_bytes())
            .map_err(|e| self.io_error(e))?;

        info!(
            "event=notes_append module=notes status=ok bytes={}",
            entry.len()
        );
        Ok(())
    }

    /// Replaces the file with `contents`.
    pub fn save(&self, contents: &str) -> Result<(), NotesError> {
        self.ensure_parent()?;
        fs::write(&self.path, contents).map_err(|e| self.io_error(e))?;
        info!(
            "event=notes_save module=notes status=ok bytes={}",
            contents.len()
        );
        Ok(())
    }

    fn ensure_parent(&self) -> Result<(), NotesError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }
        Ok(())
    }

    fn io_error(&self, source: std::io::Error) -> NotesError {
        NotesError::Io {
            path: self.path.display().to_string(),
            source,
        }
    }
}

fn format_entry(note: &str, at: &NaiveDateTime) -> Result<String, NotesError> {
    let note = note.trim();
    if note.is_empty() {
        return Err(NotesError::EmptyNote);
    }
    Ok(format!("[{}] {}\n", at.format("%Y-%m-%d %H:%M"), note))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, 9)
            .unwrap()
            .and_hms_opt(14, 5, 0)
            .unwrap()
    }

    mod format_tests {
        use super::*;

        #[test]
        fn formats_timestamped_line() {
            let entry = format_entry("review B-trees", &at()).unwrap();
            assert_eq!(entry, "[2026-03-09 14:05] review B-trees\n");
        }

        #[test]
        fn trims_note() {
            let entry = format_entry("  padded  ", &at()).unwrap();
            assert_eq!(entry, "[2026-03-09 14:05] padded\n");
        }

        #[test]
        fn rejects_blank_note() {
            assert!(matches!(format_entry("   ", &at()), Err(NotesError::EmptyNote)));
            assert!(matches!(format_entry("", &at()), Err(NotesError::EmptyNote)));
        }
    }

    mod store_tests {
        use super::*;

        #[test]
        fn file_is_named_qa_database() {
            let store = NotesStore::in_dir("/tmp/x");
            assert!(store.path().ends_with("qa_database"));
        }

        #[test]
        fn load_missing_file_is_empty() {
            let dir = tempfile::tempdir().unwrap();
            let store = NotesStore::in_dir(dir.path());
            assert_eq!(store.load().unwrap(), "");
        }

        #[test]
        fn append_creates_file_and_directory() {
            let dir = tempfile::tempdir().unwrap();
            let store = NotesStore::in_dir(dir.path().join("nested"));

            store.append("first").unwrap();
            store.append("second").unwrap();

            let contents = store.load().unwrap();
            let lines: Vec<&str> = contents.lines().collect();
            assert_eq!(lines.len(), 2);
            assert!(lines[0].ends_with("] first"));
            assert!(lines[1].ends_with("] second"));
        }

        #[test]
        fn append_blank_leaves_file_alone() {
            let dir = tempfile::tempdir().unwrap();
            let store = NotesStore::in_dir(dir.path());

            assert!(matches!(store.append("  "), Err(NotesError::EmptyNote)));
            assert!(!store.path().exists());
        }

        #[test]
        fn save_replaces_contents() {
            let dir = tempfile::tempdir().unwrap();
            let store = NotesStore::in_dir(dir.path());

            store.append("old").unwrap();
            store.save("fresh start\n").unwrap();
            assert_eq!(store.load().unwrap(), "fresh start\n");
        }

        #[test]
        fn load_directory_is_io_error() {
            let dir = tempfile::tempdir().unwrap();
            std::fs::create_dir(dir.path().join(NOTES_FILE_NAME)).unwrap();
            let store = NotesStore::in_dir(dir.path());

            assert!(matches!(store.load(), Err(NotesError::Io { .. })));
        }
    }
}
