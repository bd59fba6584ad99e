#![forbid(unsafe_code)]

//! Tutorial catalog document.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::tutorial::{Difficulty, Tutorial};

/// Catalog of available tutorials.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TutorialIndex {
    pub version: String,
    pub tutorials: Vec<TutorialIndexEntry>,
}

/// One catalog row. `difficulty` is free text here, unlike in metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TutorialIndexEntry {
    pub id: String,
    pub file: String,
    pub name: String,
    pub difficulty: String,
}

impl TutorialIndexEntry {
    /// The row describing `tutorial`.
    #[must_use]
    pub fn for_tutorial(tutorial: &Tutorial) -> Self {
        Self {
            id: tutorial.metadata.id.clone(),
            file: tutorial.file_name(),
            name: tutorial.metadata.name.clone(),
            difficulty: tutorial.metadata.difficulty.as_str().to_string(),
        }
    }
}

/// Partial update for an index row. Empty strings count as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexEntryPatch {
    pub id: Option<String>,
    pub file: Option<String>,
    pub name: Option<String>,
    pub difficulty: Option<String>,
}

impl From<TutorialIndexEntry> for IndexEntryPatch {
    fn from(entry: TutorialIndexEntry) -> Self {
        Self {
            id: Some(entry.id),
            file: Some(entry.file),
            name: Some(entry.name),
            difficulty: Some(entry.difficulty),
        }
    }
}

fn present(value: &Option<String>) -> Option<&String> {
    value.as_ref().filter(|s| !s.is_empty())
}

impl TutorialIndex {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&TutorialIndexEntry> {
        self.tutorials.iter().find(|t| t.id == id)
    }

    /// Merge `patch` into the row for `tutorial_id`, or append a new row.
    ///
    /// New rows fill missing fields from the id: `<id>.json` for the file,
    /// the id itself for the name, and `beginner` for the difficulty.
    pub fn upsert_entry(&mut self, tutorial_id: &str, patch: IndexEntryPatch) {
        if let Some(entry) = self.tutorials.iter_mut().find(|t| t.id == tutorial_id) {
            if let Some(id) = present(&patch.id) {
                entry.id.clone_from(id);
            }
            if let Some(file) = present(&patch.file) {
                entry.file.clone_from(file);
            }
            if let Some(name) = present(&patch.name) {
                entry.name.clone_from(name);
            }
            if let Some(difficulty) = present(&patch.difficulty) {
                entry.difficulty.clone_from(difficulty);
            }
            return;
        }

        self.tutorials.push(TutorialIndexEntry {
            id: present(&patch.id).cloned().unwrap_or_else(|| tutorial_id.to_string()),
            file: present(&patch.file)
                .cloned()
                .unwrap_or_else(|| format!("{tutorial_id}.json")),
            name: present(&patch.name)
                .cloned()
                .unwrap_or_else(|| tutorial_id.to_string()),
            difficulty: present(&patch.difficulty)
                .cloned()
                .unwrap_or_else(|| Difficulty::Beginner.as_str().to_string()),
        });
    }
}
