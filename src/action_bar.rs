//! Action bar controls: add, edit and delete.

/// Tag emitted when an action bar control is activated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionTag {
    Add,
    Edit,
    Delete,
}

impl ActionTag {
    /// Literal tag handed to the click handler.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Edit => "edit",
            Self::Delete => "delete",
        }
    }

    /// Button caption.
    pub fn label(self) -> &'static str {
        match self {
            Self::Add => "Add Article",
            Self::Edit => "Edit Article",
            Self::Delete => "Delete Article",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "add" => Some(Self::Add),
            "edit" => Some(Self::Edit),
            "delete" => Some(Self::Delete),
            _ => None,
        }
    }
}

/// Controls shown for the current selection state.
///
/// "Add" is always present; "Edit" and "Delete" only when an article is selected.
pub fn visible_tags(allow_edit: bool) -> &'static [ActionTag] {
    if allow_edit {
        &[ActionTag::Add, ActionTag::Edit, ActionTag::Delete]
    } else {
        &[ActionTag::Add]
    }
}

/// Activate `tag` if it is currently shown, handing its literal to `handler`.
///
/// Returns whether the handler ran.
pub fn click(allow_edit: bool, tag: ActionTag, mut handler: impl FnMut(&'static str)) -> bool {
    if visible_tags(allow_edit).contains(&tag) {
        handler(tag.as_str());
        true
    } else {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_add_without_selection() {
        assert_eq!(visible_tags(false), &[ActionTag::Add]);
    }

    #[test]
    fn test_all_controls_with_selection() {
        assert_eq!(
            visible_tags(true),
            &[ActionTag::Add, ActionTag::Edit, ActionTag::Delete]
        );
    }

    #[test]
    fn test_click_passes_exact_literal() {
        for (tag, literal) in [
            (ActionTag::Add, "add"),
            (ActionTag::Edit, "edit"),
            (ActionTag::Delete, "delete"),
        ] {
            let mut calls = Vec::new();
            assert!(click(true, tag, |t| calls.push(t)));
            assert_eq!(calls, vec![literal]);
        }
    }

    #[test]
    fn test_hidden_controls_do_not_fire() {
        let mut calls = Vec::new();
        assert!(!click(false, ActionTag::Edit, |t| calls.push(t)));
        assert!(!click(false, ActionTag::Delete, |t| calls.push(t)));
        assert!(click(false, ActionTag::Add, |t| calls.push(t)));
        assert_eq!(calls, vec!["add"]);
    }

    #[test]
    fn test_tag_round_trip() {
        for tag in [ActionTag::Add, ActionTag::Edit, ActionTag::Delete] {
            assert_eq!(ActionTag::from_tag(tag.as_str()), Some(tag));
        }
        assert_eq!(ActionTag::from_tag("view"), None);
    }
}
