//! Action bar widget.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::action_bar::{visible_tags, ActionTag};
use crate::app::App;
use crate::keybindings::Command;

fn command_for(tag: ActionTag) -> Command {
    match tag {
        ActionTag::Add => Command::AddArticle,
        ActionTag::Edit => Command::EditArticle,
        ActionTag::Delete => Command::DeleteArticle,
    }
}

/// Render one button per visible control, each labelled with its key.
pub fn render(f: &mut Frame, app: &App, area: Rect) {
    if area.width < 1 || area.height < 1 {
        return;
    }

    let allow_edit = app.current().is_some() && !app.mode().is_editing();
    let dimmed = app.is_busy() || app.mode().is_editing();
    let button_style = if dimmed {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Gray)
            .add_modifier(Modifier::BOLD)
    };

    let mut spans = Vec::new();
    for tag in visible_tags(allow_edit) {
        if !spans.is_empty() {
            spans.push(Span::raw("  "));
        }
        let key = app
            .keybindings
            .key_hint(command_for(*tag))
            .map(|k| format!("[{}] ", k))
            .unwrap_or_default();
        spans.push(Span::styled(format!(" {}{} ", key, tag.label()), button_style));
    }

    let paragraph = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL));
    f.render_widget(paragraph, area);
}
