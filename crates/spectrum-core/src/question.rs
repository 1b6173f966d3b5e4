//! Question repository.
//!
//! Questions are read once from a semicolon-delimited table with the columns
//! `id`, `categories` and `text` (further columns are ignored) and grouped
//! into category pools. The repository is read-only after loading.

use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{LoadError, LoadResult};

/// A single question card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// Unique id from the source table.
    pub id: u32,
    /// Category label.
    pub category: String,
    /// Question body.
    pub text: String,
}

/// All questions sharing a category label, in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    /// Category label.
    pub name: String,
    /// Questions in this category.
    pub questions: Vec<Question>,
}

/// Raw table row.
#[derive(Debug, Deserialize)]
struct RawQuestion {
    id: u32,
    categories: String,
    text: String,
}

/// The loaded question set, grouped by category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionRepository {
    categories: Vec<Category>,
}

impl QuestionRepository {
    /// Load the question table from a file.
    pub fn load(path: &Path) -> LoadResult<Self> {
        let file = std::fs::File::open(path).map_err(|source| LoadError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let repo = Self::from_reader(file)?;
        info!(
            path = %path.display(),
            questions = repo.len(),
            categories = repo.categories.len(),
            "question repository loaded"
        );
        Ok(repo)
    }

    /// Parse the question table from any reader.
    pub fn from_reader<R: Read>(rdr: R) -> LoadResult<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(b';')
            .trim(csv::Trim::All)
            .from_reader(rdr);

        let mut questions = Vec::new();
        for row in reader.deserialize::<RawQuestion>() {
            let raw = row?;
            questions.push(Question {
                id: raw.id,
                category: raw.categories,
                text: raw.text,
            });
        }
        Self::from_questions(questions)
    }

    /// Build a repository from already-parsed questions.
    ///
    /// Categories keep the order in which they first appear.
    pub fn from_questions(questions: Vec<Question>) -> LoadResult<Self> {
        if questions.is_empty() {
            return Err(LoadError::Empty);
        }

        let mut seen = HashSet::new();
        let mut categories: Vec<Category> = Vec::new();
        for q in questions {
            if q.category.trim().is_empty() {
                return Err(LoadError::EmptyField {
                    id: q.id,
                    field: "categories",
                });
            }
            if q.text.trim().is_empty() {
                return Err(LoadError::EmptyField {
                    id: q.id,
                    field: "text",
                });
            }
            if !seen.insert(q.id) {
                return Err(LoadError::DuplicateId(q.id));
            }

            match categories.iter_mut().find(|c| c.name == q.category) {
                Some(cat) => cat.questions.push(q),
                None => {
                    debug!(category = %q.category, "new category");
                    categories.push(Category {
                        name: q.category.clone(),
                        questions: vec![q],
                    });
                }
            }
        }

        Ok(Self { categories })
    }

    /// All categories in source order.
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Category names in source order.
    pub fn category_names(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(|c| c.name.as_str())
    }

    /// Look up a category by exact name.
    pub fn category(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.name == name)
    }

    /// Whether a category with this name exists.
    pub fn contains_category(&self, name: &str) -> bool {
        self.category(name).is_some()
    }

    /// Total number of questions.
    pub fn len(&self) -> usize {
        self.categories.iter().map(|c| c.questions.len()).sum()
    }

    /// Whether there are no questions.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Decorative emoji for the built-in category labels.
pub fn category_emoji(name: &str) -> Option<&'static str> {
    match name {
        "Śmieszne" => Some("😂"),
        "Światopoglądowe" => Some("🌍"),
        "Związkowe" => Some("❤️"),
        "Pikantne" => Some("🌶️"),
        "Luźne" => Some("😎"),
        "Przeszłość" => Some("📜"),
        "Wolisz" => Some("🤔"),
        "Dylematy" => Some("⚖️"),
        _ => None,
    }
}

/// Category label prefixed with its emoji when one is known.
pub fn display_label(name: &str) -> String {
    match category_emoji(name) {
        Some(emoji) => format!("{emoji} {name}"),
        None => name.to_string(),
    }
}
