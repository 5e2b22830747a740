use serde::{Deserialize, Serialize};

// Self-graded outcome for a question that came up in an interview
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    #[default]
    Unset,
    Answered,
    NotAnswered,
    Confusing,
    PartiallyCorrect,
}

impl Status {
    /// The four grades a user can pick, in the order the UI offers them.
    pub const GRADES: [Status; 4] = [
        Status::Answered,
        Status::NotAnswered,
        Status::Confusing,
        Status::PartiallyCorrect,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Unset => "unset",
            Status::Answered => "answered",
            Status::NotAnswered => "not_answered",
            Status::Confusing => "confusing",
            Status::PartiallyCorrect => "partially_correct",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Status::Unset => "Not graded",
            Status::Answered => "Answered",
            Status::NotAnswered => "Not Answered",
            Status::Confusing => "Confusing",
            Status::PartiallyCorrect => "Partially correct",
        }
    }

    /// Maps the `1`..`4` grade keys onto a grade.
    pub fn from_key(c: char) -> Option<Self> {
        let digit = c.to_digit(10)? as usize;
        digit
            .checked_sub(1)
            .and_then(|i| Self::GRADES.get(i))
            .copied()
    }
}

// A question the user flagged as asked. `original` is the catalogue text it
// was seeded from and never changes; `text` is what the user edits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AskedItem {
    pub text: String,
    pub status: Status,
    #[serde(skip_serializing)]
    pub original: String,
}

impl AskedItem {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            original: text.clone(),
            text,
            status: Status::Unset,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogueEntry {
    pub question: String,
    /// HTML fragment
    pub answer: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    #[serde(default)]
    pub questions: Vec<CatalogueEntry>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusSummary {
    pub total: usize,
    pub unset: usize,
    pub answered: usize,
    pub not_answered: usize,
    pub confusing: usize,
    pub partially_correct: usize,
}

impl StatusSummary {
    pub fn record(&mut self, status: Status) {
        self.total += 1;
        match status {
            Status::Unset => self.unset += 1,
            Status::Answered => self.answered += 1,
            Status::NotAnswered => self.not_answered += 1,
            Status::Confusing => self.confusing += 1,
            Status::PartiallyCorrect => self.partially_correct += 1,
        }
    }
}

// JSON output wrapper for CLI
#[derive(Debug, Serialize)]
pub struct JsonOutput<T: Serialize> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T: Serialize> JsonOutput<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn err(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(msg.into()),
        }
    }
}
