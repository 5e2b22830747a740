use std::collections::HashSet;
use std::path::Path;

use log::info;
use serde::Deserialize;
use thiserror::Error;

use crate::models::{CatalogueEntry, Category};

const BUILTIN_CATALOGUE: &str = include_str!("../data/catalogue.json");

#[derive(Debug, Error)]
pub enum CatalogueError {
    #[error("failed to read catalogue {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("malformed catalogue: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("catalogue has a category with an empty name")]
    EmptyCategoryName,

    #[error("category '{0}' appears more than once")]
    DuplicateCategory(String),

    #[error("category '{category}' has an empty question at position {position}")]
    EmptyQuestion { category: String, position: usize },

    #[error("unknown category '{0}'")]
    UnknownCategory(String),

    #[error("category '{category}' has no question {number} (it has {count})")]
    UnknownQuestion {
        category: String,
        number: usize,
        count: usize,
    },
}

#[derive(Debug, Deserialize)]
struct CatalogueFile {
    categories: Vec<Category>,
}

/// Static category -> questions mapping, in file order.
#[derive(Debug, Clone)]
pub struct Catalogue {
    categories: Vec<Category>,
}

impl Catalogue {
    pub fn builtin() -> Result<Self, CatalogueError> {
        Self::from_json(BUILTIN_CATALOGUE)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, CatalogueError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| CatalogueError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let catalogue = Self::from_json(&raw)?;
        info!(
            "event=catalogue_load module=catalogue status=ok path={} categories={}",
            path.display(),
            catalogue.categories.len()
        );
        Ok(catalogue)
    }

    pub fn from_json(raw: &str) -> Result<Self, CatalogueError> {
        let file: CatalogueFile = serde_json::from_str(raw)?;
        Self::new(file.categories)
    }

    pub fn new(categories: Vec<Category>) -> Result<Self, CatalogueError> {
        let mut seen = HashSet::new();
        for category in &categories {
            if category.name.trim().is_empty() {
                return Err(CatalogueError::EmptyCategoryName);
            }
            if !seen.insert(category.name.as_str()) {
                return Err(CatalogueError::DuplicateCategory(category.name.clone()));
            }
            if let Some(position) = category
                .questions
                .iter()
                .position(|e| e.question.trim().is_empty())
            {
                return Err(CatalogueError::EmptyQuestion {
                    category: category.name.clone(),
                    position: position + 1,
                });
            }
        }
        Ok(Self { categories })
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Exact name match first, then a case-insensitive one.
    pub fn category(&self, name: &str) -> Result<&Category, CatalogueError> {
        self.categories
            .iter()
            .find(|c| c.name == name)
            .or_else(|| {
                self.categories
                    .iter()
                    .find(|c| c.name.eq_ignore_ascii_case(name))
            })
            .ok_or_else(|| CatalogueError::UnknownCategory(name.to_string()))
    }

    pub fn get_questions_for_category(
        &self,
        name: &str,
    ) -> Result<&[CatalogueEntry], CatalogueError> {
        Ok(&self.category(name)?.questions)
    }

    /// Looks up a question by its 1-based number within a category.
    pub fn entry(&self, name: &str, number: usize) -> Result<&CatalogueEntry, CatalogueError> {
        let category = self.category(name)?;
        number
            .checked_sub(1)
            .and_then(|i| category.questions.get(i))
            .ok_or_else(|| CatalogueError::UnknownQuestion {
                category: category.name.clone(),
                number,
                count: category.questions.len(),
            })
    }

    pub fn total_questions(&self) -> usize {
        self.categories.iter().map(|c| c.questions.len()).sum()
    }
}

/// Renders an HTML answer fragment as terminal-friendly markdown.
pub fn answer_text(html: &str) -> String {
    let markdown = html2md::parse_html(html);
    let mut out = String::with_capacity(markdown.len());
    let mut blank_run = 0;
    for line in markdown.lines() {
        let line = line.trim_end();
        if line.is_empty() {
            blank_run += 1;
            if blank_run > 1 {
                continue;
            }
        } else {
            blank_run = 0;
        }
        out.push_str(line);
        out.push('\n');
    }
    out.trim().to_string()
}
