//! Keybinding registry: maps key events to commands, with config overrides.
//!
//! Bindings are looked up per [`Context`] and fall back to `Global`. The
//! editor form is not routed through here; its keys (Tab, Ctrl+s, Esc) are
//! fixed so typing never collides with a rebinding.
use crossterm::event::{KeyCode, KeyModifiers};
use std::collections::HashMap;

// ============================================================================
// Command Enum
// ============================================================================

/// User-facing commands that can be bound to keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    Quit,
    NavDown,
    NavUp,
    CycleFocus,
    Back,
    Select,
    AddArticle,
    EditArticle,
    DeleteArticle,
    Refresh,
    ShowHelp,
}

impl Command {
    /// Human-readable description for the help screen.
    pub fn describe(self) -> &'static str {
        match self {
            Self::Quit => "Quit application",
            Self::NavDown => "Move cursor down",
            Self::NavUp => "Move cursor up",
            Self::CycleFocus => "Switch between sections and titles",
            Self::Back => "Back to sections",
            Self::Select => "Pick section / show article",
            Self::AddArticle => "Add article",
            Self::EditArticle => "Edit selected article",
            Self::DeleteArticle => "Delete selected article",
            Self::Refresh => "Reload articles from server",
            Self::ShowHelp => "Show help",
        }
    }
}

// ============================================================================
// Context Enum
// ============================================================================

/// Dispatch context: which navigation list has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Context {
    Global,
    Sections,
    Titles,
}

impl Context {
    pub fn label(self) -> &'static str {
        match self {
            Self::Global => "Global",
            Self::Sections => "Sections",
            Self::Titles => "Titles",
        }
    }
}

// ============================================================================
// Key Specification
// ============================================================================

/// A key event: code + modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeySpec {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeySpec {
    pub const fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    pub const fn plain(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::NONE)
    }

    pub const fn ctrl(c: char) -> Self {
        Self::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }
}

/// Parse a key string from config.
///
/// Accepts a single character (`"q"`, `"?"`), a named key (`"Enter"`,
/// `"Esc"`, `"Tab"`, arrows, `"Backspace"`, `"Delete"`, `"space"`), `"Ctrl+<char>"`
/// or `"F1"`..`"F12"`.
fn parse_key_string(s: &str) -> Option<KeySpec> {
    let s = s.trim();

    if let Some(rest) = s.strip_prefix("Ctrl+") {
        let mut chars = rest.trim().chars();
        let c = chars.next()?;
        return chars.next().is_none().then(|| KeySpec::ctrl(c));
    }

    let named = match s.to_lowercase().as_str() {
        "enter" | "return" => Some(KeyCode::Enter),
        "esc" | "escape" => Some(KeyCode::Esc),
        "tab" => Some(KeyCode::Tab),
        "up" => Some(KeyCode::Up),
        "down" => Some(KeyCode::Down),
        "left" => Some(KeyCode::Left),
        "right" => Some(KeyCode::Right),
        "backspace" => Some(KeyCode::Backspace),
        "delete" | "del" => Some(KeyCode::Delete),
        "space" => Some(KeyCode::Char(' ')),
        _ => None,
    };
    if let Some(code) = named {
        return Some(KeySpec::plain(code));
    }

    if let Some(n) = s
        .strip_prefix(['F', 'f'])
        .and_then(|rest| rest.parse::<u8>().ok())
    {
        return (1..=12).contains(&n).then(|| KeySpec::plain(KeyCode::F(n)));
    }

    let mut chars = s.chars();
    let c = chars.next()?;
    chars.next().is_none().then(|| KeySpec::plain(KeyCode::Char(c)))
}

/// Format a KeySpec for the help screen.
fn format_key(key: &KeySpec) -> String {
    let modifier = if key.modifiers.contains(KeyModifiers::CONTROL) {
        "Ctrl+"
    } else {
        ""
    };

    let key_name = match key.code {
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Esc => "Esc".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::Up => "Up".to_string(),
        KeyCode::Down => "Down".to_string(),
        KeyCode::Left => "Left".to_string(),
        KeyCode::Right => "Right".to_string(),
        KeyCode::Backspace => "Backspace".to_string(),
        KeyCode::Delete => "Delete".to_string(),
        KeyCode::F(n) => format!("F{}", n),
        _ => "?".to_string(),
    };

    format!("{}{}", modifier, key_name)
}

// ============================================================================
// Keybinding Registry
// ============================================================================

/// Registry of keybindings, supporting defaults and config overrides.
///
/// The same key can map to different commands in different contexts.
pub struct KeybindingRegistry {
    lookup: HashMap<(Context, KeySpec), Command>,
    /// Insertion-ordered copy for help enumeration
    bindings: Vec<(Context, KeySpec, Command)>,
}

impl KeybindingRegistry {
    pub fn new() -> Self {
        let mut registry = Self {
            lookup: HashMap::new(),
            bindings: Vec::new(),
        };
        registry.register_defaults();
        registry
    }

    /// Bind `key` in `context`, dropping whatever it was bound to before.
    fn bind(&mut self, context: Context, key: KeySpec, command: Command) {
        if self.lookup.insert((context, key), command).is_some() {
            self.bindings
                .retain(|(ctx, k, _)| !(*ctx == context && *k == key));
        }
        self.bindings.push((context, key, command));
    }

    fn register_defaults(&mut self) {
        use Command::*;
        use KeyCode::{Char, Down, Enter, Esc, Left, Right, Tab, Up};

        let global = [
            (Char('q'), Quit),
            (Char('j'), NavDown),
            (Down, NavDown),
            (Char('k'), NavUp),
            (Up, NavUp),
            (Tab, CycleFocus),
            (Enter, Select),
            (Esc, Back),
            (Char('a'), AddArticle),
            (Char('e'), EditArticle),
            (Char('d'), DeleteArticle),
            (Char('r'), Refresh),
            (Char('?'), ShowHelp),
        ];
        for (code, command) in global {
            self.bind(Context::Global, KeySpec::plain(code), command);
        }

        // Arrow-style drilling between the two lists
        self.bind(Context::Sections, KeySpec::plain(Right), Select);
        self.bind(Context::Sections, KeySpec::plain(Char('l')), Select);
        self.bind(Context::Titles, KeySpec::plain(Left), Back);
        self.bind(Context::Titles, KeySpec::plain(Char('h')), Back);
    }

    /// Apply user overrides from the config `keybindings` table.
    ///
    /// Keys are command names (`"quit"`, `"add"`), values are key strings
    /// (`"q"`, `"Ctrl+n"`, `"F5"`). An override replaces every existing
    /// binding of that command, in every context it was bound in.
    ///
    /// Returns warnings for unknown command names, unparseable keys, and keys
    /// taken over from another command (which loses that binding).
    pub fn apply_overrides(&mut self, overrides: &HashMap<String, String>) -> Vec<String> {
        let mut warnings = Vec::new();

        for (name, key_str) in overrides {
            let Some(command) = parse_command_name(name) else {
                warnings.push(format!("Unknown action '{}', ignoring", name));
                continue;
            };

            let Some(key) = parse_key_string(key_str) else {
                warnings.push(format!(
                    "Cannot parse key '{}' for action '{}', ignoring",
                    key_str, name
                ));
                continue;
            };

            let mut contexts: Vec<Context> = self
                .bindings
                .iter()
                .filter(|(_, _, c)| *c == command)
                .map(|(ctx, _, _)| *ctx)
                .collect();
            contexts.dedup();

            self.lookup.retain(|_, c| *c != command);
            self.bindings.retain(|(_, _, c)| *c != command);

            for ctx in contexts {
                if let Some(&displaced) = self.lookup.get(&(ctx, key)) {
                    warnings.push(format!(
                        "Key '{}' for action '{}' replaces '{}' in {}",
                        key_str,
                        name,
                        displaced.describe(),
                        ctx.label()
                    ));
                }
                self.bind(ctx, key, command);
            }

            tracing::info!(action = %name, key = %key_str, "Applied keybinding override");
        }

        warnings
    }

    /// Look up the command for a key, trying `context` first, then Global.
    pub fn command_for_key(
        &self,
        code: KeyCode,
        modifiers: KeyModifiers,
        context: Context,
    ) -> Option<Command> {
        let key = KeySpec::new(code, modifiers);

        if let Some(&command) = self.lookup.get(&(context, key)) {
            return Some(command);
        }
        if context != Context::Global {
            return self.lookup.get(&(Context::Global, key)).copied();
        }
        None
    }

    /// First key bound to `command` in Global, formatted for display.
    pub fn key_hint(&self, command: Command) -> Option<String> {
        self.bindings
            .iter()
            .find(|(ctx, _, c)| *ctx == Context::Global && *c == command)
            .map(|(_, key, _)| format_key(key))
    }

    /// All bindings as (context, key label, command, description) for help.
    pub fn all_bindings(&self) -> Vec<(Context, String, Command, &'static str)> {
        self.bindings
            .iter()
            .map(|(ctx, key, command)| (*ctx, format_key(key), *command, command.describe()))
            .collect()
    }
}

impl Default for KeybindingRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_command_name(name: &str) -> Option<Command> {
    match name.to_lowercase().as_str() {
        "quit" => Some(Command::Quit),
        "nav_down" | "down" => Some(Command::NavDown),
        "nav_up" | "up" => Some(Command::NavUp),
        "cycle_focus" | "focus" => Some(Command::CycleFocus),
        "back" => Some(Command::Back),
        "select" => Some(Command::Select),
        "add_article" | "add" => Some(Command::AddArticle),
        "edit_article" | "edit" => Some(Command::EditArticle),
        "delete_article" | "delete" => Some(Command::DeleteArticle),
        "refresh" | "reload" => Some(Command::Refresh),
        "show_help" | "help" => Some(Command::ShowHelp),
        _ => None,
    }
}

// ============================================================================
// Tests
// ============================================================================
