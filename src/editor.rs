//! Article editor form state.
//!
//! The editor owns two text fields and nothing else. It never talks to the
//! network: a save or cancel produces an [`EditorOutcome`] that the
//! controller acts on.

use chrono::Utc;
use thiserror::Error;

use crate::model::Article;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Title must not be empty")]
    EmptyTitle,
}

/// Which text field receives typed characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Field {
    #[default]
    Title,
    Body,
}

impl Field {
    fn other(self) -> Self {
        match self {
            Self::Title => Self::Body,
            Self::Body => Self::Title,
        }
    }
}

/// Result of a completed editor interaction.
///
/// `Saved` carries the finished article; `Cancelled` carries nothing.
#[derive(Debug, Clone, PartialEq)]
pub enum EditorOutcome {
    Saved(Article),
    Cancelled,
}

impl EditorOutcome {
    /// The completed article, if any.
    pub fn into_article(self) -> Option<Article> {
        match self {
            Self::Saved(article) => Some(article),
            Self::Cancelled => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Editor {
    original: Option<Article>,
    title: String,
    body: String,
    focus: Field,
}

impl Editor {
    /// Open an editor, pre-populated from `article` when editing.
    pub fn new(article: Option<&Article>) -> Self {
        let (title, body) = article
            .map(|a| (a.title.clone(), a.extract.clone()))
            .unwrap_or_default();
        Self {
            original: article.cloned(),
            title,
            body,
            focus: Field::Title,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn focus(&self) -> Field {
        self.focus
    }

    /// True when editing an existing article rather than composing a new one.
    pub fn is_edit(&self) -> bool {
        self.original.is_some()
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn set_body(&mut self, body: impl Into<String>) {
        self.body = body.into();
    }

    pub fn toggle_focus(&mut self) {
        self.focus = self.focus.other();
    }

    /// Append a character to the focused field.
    pub fn insert_char(&mut self, c: char) {
        self.focused_mut().push(c);
    }

    /// Remove the last character of the focused field.
    pub fn backspace(&mut self) {
        self.focused_mut().pop();
    }

    fn focused_mut(&mut self) -> &mut String {
        match self.focus {
            Field::Title => &mut self.title,
            Field::Body => &mut self.body,
        }
    }

    /// Save is enabled iff the title field is non-empty.
    pub fn can_save(&self) -> bool {
        !self.title.is_empty()
    }

    /// Build the finished article.
    ///
    /// Starts from a copy of the original so fields the form does not expose
    /// (`id`, unknown server fields) carry over, then overwrites title and
    /// extract and stamps `edited` with the current time.
    pub fn save(&self) -> Result<EditorOutcome, ValidationError> {
        if !self.can_save() {
            return Err(ValidationError::EmptyTitle);
        }

        let mut article = self
            .original
            .clone()
            .unwrap_or_else(|| Article::draft("", ""));
        article.title = self.title.clone();
        article.extract = self.body.clone();
        article.edited = Utc::now();
        Ok(EditorOutcome::Saved(article))
    }

    /// Abandon the form regardless of its contents.
    pub fn cancel(&self) -> EditorOutcome {
        EditorOutcome::Cancelled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn existing() -> Article {
        let mut extra = serde_json::Map::new();
        extra.insert("author".to_string(), json!("Terrance"));
        Article {
            id: Some(4),
            title: "Alpha Centauri".to_string(),
            extract: "An alien diplomat with an enormous egg shaped head".to_string(),
            edited: Utc.with_ymd_and_hms(1972, 1, 29, 18, 0, 40).unwrap(),
            extra,
        }
    }

    #[test]
    fn test_fresh_editor_is_empty_and_cannot_save() {
        let editor = Editor::new(None);
        assert_eq!(editor.title(), "");
        assert_eq!(editor.body(), "");
        assert!(!editor.is_edit());
        assert!(!editor.can_save());
        assert_eq!(editor.save(), Err(ValidationError::EmptyTitle));
    }

    #[test]
    fn test_editor_prepopulated_from_article() {
        let editor = Editor::new(Some(&existing()));
        assert_eq!(editor.title(), "Alpha Centauri");
        assert_eq!(editor.body(), existing().extract);
        assert!(editor.is_edit());
        assert!(editor.can_save());
    }

    #[test]
    fn test_save_toggles_with_title() {
        let mut editor = Editor::new(None);
        editor.insert_char('D');
        assert!(editor.can_save());

        editor.backspace();
        assert!(!editor.can_save());

        editor.set_title("Daleks");
        assert!(editor.can_save());
        editor.set_title("");
        assert!(!editor.can_save());
    }

    #[test]
    fn test_clearing_prepopulated_title_disables_save() {
        let mut editor = Editor::new(Some(&existing()));
        editor.set_title("");
        assert!(!editor.can_save());
    }

    #[test]
    fn test_cancel_ignores_field_contents() {
        let mut editor = Editor::new(Some(&existing()));
        editor.set_title("changed");
        editor.set_body("changed too");
        assert_eq!(editor.cancel(), EditorOutcome::Cancelled);
        assert_eq!(Editor::new(None).cancel(), EditorOutcome::Cancelled);
    }

    #[test]
    fn test_save_fresh_sets_fields_and_timestamp() {
        let mut editor = Editor::new(None);
        editor.set_title("321");
        editor.set_body("contact");

        let before = Utc::now();
        let article = editor.save().unwrap().into_article().unwrap();

        assert_eq!(article.id, None);
        assert_eq!(article.title, "321");
        assert_eq!(article.extract, "contact");
        assert!(article.edited >= before);
    }

    #[test]
    fn test_save_preserves_unexposed_fields_and_title() {
        let original = existing();
        let mut editor = Editor::new(Some(&original));
        editor.set_body("A new body");

        let article = editor.save().unwrap().into_article().unwrap();

        assert_eq!(article.id, Some(4));
        assert_eq!(article.title, original.title);
        assert_eq!(article.extract, "A new body");
        assert_eq!(article.extra.get("author"), Some(&json!("Terrance")));
        assert!(article.edited > original.edited);
    }

    #[test]
    fn test_typing_goes_to_focused_field() {
        let mut editor = Editor::new(None);
        assert_eq!(editor.focus(), Field::Title);
        editor.insert_char('A');
        editor.toggle_focus();
        assert_eq!(editor.focus(), Field::Body);
        editor.insert_char('b');
        editor.insert_char('c');
        editor.backspace();

        assert_eq!(editor.title(), "A");
        assert_eq!(editor.body(), "b");

        editor.toggle_focus();
        assert_eq!(editor.focus(), Field::Title);
    }
}
