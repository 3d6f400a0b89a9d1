//! Keyboard input dispatch.
//!
//! Overlays capture keys first (help, then delete confirmation). While the
//! editor is open its fixed keys apply; otherwise keys go through the
//! keybinding registry in the context of the focused navigation list.

use crossterm::event::{KeyCode, KeyModifiers};
use tokio::sync::mpsc;

use crate::action_bar::ActionTag;
use crate::app::{App, AppEvent};
use crate::editor::Field;
use crate::keybindings::{Command, Context};
use crate::nav::NavFocus;

use super::loop_runner::Flow;

fn nav_context(focus: NavFocus) -> Context {
    match focus {
        NavFocus::Sections => Context::Sections,
        NavFocus::Titles => Context::Titles,
    }
}

pub(super) fn handle_key(
    app: &mut App,
    code: KeyCode,
    modifiers: KeyModifiers,
    event_tx: &mpsc::Sender<AppEvent>,
) -> Flow {
    if app.show_help {
        if matches!(code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')) {
            app.show_help = false;
        }
        return Flow::Continue;
    }

    if app.pending_confirm.is_some() {
        match code {
            KeyCode::Char('y') | KeyCode::Char('Y') => app.resolve_confirm(true, event_tx),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                app.resolve_confirm(false, event_tx)
            }
            _ => {}
        }
        return Flow::Continue;
    }

    if app.mode().is_editing() {
        handle_editor_key(app, code, modifiers, event_tx);
        return Flow::Continue;
    }

    handle_browse_key(app, code, modifiers, event_tx)
}

fn handle_editor_key(
    app: &mut App,
    code: KeyCode,
    modifiers: KeyModifiers,
    event_tx: &mpsc::Sender<AppEvent>,
) {
    if app.is_busy() {
        // Fields are frozen until the save answer arrives
        return;
    }

    match code {
        KeyCode::Esc => app.cancel_editor(event_tx),
        KeyCode::Char('s') if modifiers.contains(KeyModifiers::CONTROL) => {
            app.submit_editor(event_tx)
        }
        _ => {
            let Some(editor) = app.editor.as_mut() else {
                return;
            };
            match code {
                KeyCode::Tab | KeyCode::BackTab => editor.toggle_focus(),
                KeyCode::Enter if editor.focus() == Field::Title => editor.toggle_focus(),
                KeyCode::Enter => editor.insert_char('\n'),
                KeyCode::Backspace => editor.backspace(),
                KeyCode::Char(c) if !modifiers.contains(KeyModifiers::CONTROL) => {
                    editor.insert_char(c)
                }
                _ => {}
            }
        }
    }
}

fn handle_browse_key(
    app: &mut App,
    code: KeyCode,
    modifiers: KeyModifiers,
    event_tx: &mpsc::Sender<AppEvent>,
) -> Flow {
    let context = nav_context(app.nav.focus());
    let Some(command) = app.keybindings.command_for_key(code, modifiers, context) else {
        return Flow::Continue;
    };
    tracing::trace!(?command, "Key command");

    match command {
        Command::Quit => return Flow::Quit,
        Command::NavDown => app.nav.cursor_down(&app.state.collection),
        Command::NavUp => app.nav.cursor_up(),
        Command::CycleFocus => app.nav.toggle_focus(),
        Command::Back => {
            if app.nav.focus() == NavFocus::Titles {
                app.nav.toggle_focus();
            }
        }
        Command::Select => {
            if let Some(intent) = app.nav.activate(&app.state.collection) {
                app.on_nav_intent(intent);
            }
        }
        Command::AddArticle => app.on_action_bar(ActionTag::Add, event_tx),
        Command::EditArticle => app.on_action_bar(ActionTag::Edit, event_tx),
        Command::DeleteArticle => app.on_action_bar(ActionTag::Delete, event_tx),
        Command::Refresh => {
            app.load(event_tx);
        }
        Command::ShowHelp => app.show_help = true,
    }
    Flow::Continue
}
