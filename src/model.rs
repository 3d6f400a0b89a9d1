//! Core data types shared by the controller, the components, and the API client.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Server-assigned article identifier.
pub type ArticleId = i64;

// ============================================================================
// Article
// ============================================================================

/// A single article record.
///
/// `id` is `None` for drafts that have not been saved yet and is omitted from
/// the JSON body in that case. Fields the server sends that we do not model
/// are kept in `extra` so an edit round-trip hands them back untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ArticleId>,
    pub title: String,
    #[serde(default)]
    pub extract: String,
    pub edited: DateTime<Utc>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Article {
    /// Build an unsaved draft stamped with the current time.
    pub fn draft(title: impl Into<String>, extract: impl Into<String>) -> Self {
        Self {
            id: None,
            title: title.into(),
            extract: extract.into(),
            edited: Utc::now(),
            extra: serde_json::Map::new(),
        }
    }

    /// Section key of this article, or `None` when the title is empty.
    pub fn section(&self) -> Option<String> {
        crate::index::section_of(&self.title)
    }
}

// ============================================================================
// Mode
// ============================================================================

/// Which component owns the main area: the viewer or the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    View,
    Add,
    Edit,
}

impl Mode {
    /// True while the editor is open.
    pub fn is_editing(self) -> bool {
        matches!(self, Self::Add | Self::Edit)
    }
}
