//! Data types shared by the store and the HTTP layer

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const DEFAULT_CATEGORY: &str = "General";

fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}

/// A stored memory record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Memory {
    /// Assigned by the store on insert
    pub id: Option<i64>,
    pub title: String,
    pub content: String,
    pub category: String,
    /// Set once at insert, never changed by updates
    pub created_at: DateTime<Utc>,
}

impl Memory {
    /// Replace the mutable fields with the ones from `input`.
    ///
    /// `id` and `created_at` are left untouched.
    pub fn apply(&mut self, input: MemoryInput) {
        self.title = input.title;
        self.content = input.content;
        self.category = input.category;
    }
}

/// Request body for creating or replacing a memory
///
/// Any `id` or `created_at` sent by the client is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct MemoryInput {
    pub title: String,
    pub content: String,
    #[serde(default = "default_category")]
    pub category: String,
}

impl MemoryInput {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        MemoryInput {
            title: title.into(),
            content: content.into(),
            category: default_category(),
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }
}
