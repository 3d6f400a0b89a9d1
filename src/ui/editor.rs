//! Editor form widget.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::editor::{Editor, Field};

fn field_block(title: &'static str, focused: bool) -> Block<'static> {
    let style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };
    Block::default()
        .borders(Borders::ALL)
        .border_style(style)
        .title(title)
}

/// Render the two fields plus a save/cancel hint line.
///
/// The hint greys out "Save" while the title is empty.
pub fn render(f: &mut Frame, editor: &Editor, busy: bool, area: Rect) {
    if area.width < 4 || area.height < 7 {
        return;
    }

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(area);

    let title_focused = editor.focus() == Field::Title;
    let cursor = |focused: bool| if focused { "_" } else { "" };

    let title = Paragraph::new(format!("{}{}", editor.title(), cursor(title_focused)))
        .block(field_block("Title", title_focused));
    f.render_widget(title, rows[0]);

    let body = Paragraph::new(format!("{}{}", editor.body(), cursor(!title_focused)))
        .block(field_block("Body", !title_focused))
        .wrap(Wrap { trim: false });
    f.render_widget(body, rows[1]);

    let save_style = if editor.can_save() && !busy {
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let heading = if editor.is_edit() {
        "Editing"
    } else {
        "New article"
    };
    let hint = Line::from(vec![
        Span::styled(format!("{}  ", heading), Style::default().fg(Color::Gray)),
        Span::styled("[Ctrl+s] Save", save_style),
        Span::raw("  [Esc] Cancel  [Tab] Switch field"),
    ]);
    f.render_widget(Paragraph::new(hint), rows[2]);
}
