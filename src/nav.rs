//! Navigation bar state: section list, title list and the highlighted section.
//!
//! The bar never mutates the collection or the selection. Picking an entry
//! returns a [`NavIntent`] for the controller to apply.

use crate::index::{section_keys, titles_for_section};
use crate::model::{Article, ArticleId};

/// Selection change requested by the navigation bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavIntent {
    /// `None` clears the current selection.
    Select(Option<ArticleId>),
}

/// Which of the two lists has keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NavFocus {
    #[default]
    Sections,
    Titles,
}

#[derive(Debug, Clone, Default)]
pub struct NavBar {
    section: Option<String>,
    focus: NavFocus,
    section_cursor: usize,
    title_cursor: usize,
}

impl NavBar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Highlighted section, if any.
    pub fn section(&self) -> Option<&str> {
        self.section.as_deref()
    }

    pub fn focus(&self) -> NavFocus {
        self.focus
    }

    pub fn section_cursor(&self) -> usize {
        self.section_cursor
    }

    pub fn title_cursor(&self) -> usize {
        self.title_cursor
    }

    /// Follow a change of the controller's current article.
    ///
    /// Keeps the highlighted section in step with selections made elsewhere
    /// (after a save, for instance). No article or an empty title leaves the
    /// highlight alone.
    pub fn current_changed(&mut self, collection: &[Article], current: Option<&Article>) {
        let Some(article) = current else {
            return;
        };
        let Some(section) = article.section() else {
            return;
        };

        if let Some(pos) = section_keys(collection).iter().position(|s| *s == section) {
            self.section_cursor = pos;
        }
        if let Some(pos) = titles_for_section(collection, Some(section.as_str()))
            .iter()
            .position(|a| a.id == article.id)
        {
            self.title_cursor = pos;
        }
        self.section = Some(section);
    }

    /// Highlight `key` and clear the selection so the viewer never shows an
    /// article from another section.
    pub fn pick_section(&mut self, key: &str) -> NavIntent {
        self.section = Some(key.to_string());
        self.title_cursor = 0;
        NavIntent::Select(None)
    }

    /// Select a title.
    pub fn pick_title(&self, article: &Article) -> NavIntent {
        NavIntent::Select(article.id)
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            NavFocus::Sections => NavFocus::Titles,
            NavFocus::Titles => NavFocus::Sections,
        };
    }

    pub fn cursor_up(&mut self) {
        match self.focus {
            NavFocus::Sections => self.section_cursor = self.section_cursor.saturating_sub(1),
            NavFocus::Titles => self.title_cursor = self.title_cursor.saturating_sub(1),
        }
    }

    pub fn cursor_down(&mut self, collection: &[Article]) {
        let len = match self.focus {
            NavFocus::Sections => section_keys(collection).len(),
            NavFocus::Titles => titles_for_section(collection, self.section()).len(),
        };
        if len == 0 {
            return;
        }
        let max_index = len.saturating_sub(1);
        match self.focus {
            NavFocus::Sections => {
                self.section_cursor = self.section_cursor.saturating_add(1).min(max_index)
            }
            NavFocus::Titles => {
                self.title_cursor = self.title_cursor.saturating_add(1).min(max_index)
            }
        }
    }

    /// Activate the entry under the cursor in the focused list.
    ///
    /// Picking a section moves focus to its titles.
    pub fn activate(&mut self, collection: &[Article]) -> Option<NavIntent> {
        match self.focus {
            NavFocus::Sections => {
                let key = section_keys(collection).get(self.section_cursor)?.clone();
                let intent = self.pick_section(&key);
                self.focus = NavFocus::Titles;
                Some(intent)
            }
            NavFocus::Titles => {
                let titles = titles_for_section(collection, self.section());
                let article = titles.get(self.title_cursor)?;
                Some(self.pick_title(article))
            }
        }
    }

    /// Clamp cursors after the collection changed underneath them.
    pub fn clamp(&mut self, collection: &[Article]) {
        let sections = section_keys(collection).len();
        self.section_cursor = self.section_cursor.min(sections.saturating_sub(1));
        let titles = titles_for_section(collection, self.section()).len();
        self.title_cursor = self.title_cursor.min(titles.saturating_sub(1));
    }
}
