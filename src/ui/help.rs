//! Help overlay: keybinding table grouped by context.
//!
//! Shows the live bindings, so config overrides are reflected.

use crate::app::App;
use crate::keybindings::Context;
use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Row, Table},
    Frame,
};

const CONTEXT_ORDER: [Context; 3] = [Context::Global, Context::Sections, Context::Titles];

/// Fixed editor keys, listed after the configurable ones.
const EDITOR_KEYS: [(&str, &str); 4] = [
    ("Tab", "Switch field"),
    ("Enter", "Next field / new line in body"),
    ("Ctrl+s", "Save"),
    ("Esc", "Cancel"),
];

fn header_row(label: &str) -> Row<'static> {
    Row::new(vec![
        Line::from(Span::styled(
            format!("-- {} --", label),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ])
    .style(Style::default().fg(Color::Cyan))
}

pub fn render(f: &mut Frame, app: &App) {
    let overlay = centered_rect(70, 80, f.area());
    if overlay.width < 20 || overlay.height < 6 {
        return;
    }

    f.render_widget(Clear, overlay);

    let bindings = app.keybindings.all_bindings();
    let mut rows: Vec<Row> = Vec::new();

    for ctx in CONTEXT_ORDER {
        let in_ctx: Vec<_> = bindings.iter().filter(|(c, _, _, _)| *c == ctx).collect();
        if in_ctx.is_empty() {
            continue;
        }
        rows.push(header_row(ctx.label()));
        for (_, key, _, description) in in_ctx {
            rows.push(Row::new(vec![format!("  {}", key), description.to_string()]));
        }
        rows.push(Row::new(vec![String::new(), String::new()]));
    }

    rows.push(header_row("Editor"));
    for (key, description) in EDITOR_KEYS {
        rows.push(Row::new(vec![format!("  {}", key), description.to_string()]));
    }

    let widths = [Constraint::Length(14), Constraint::Min(20)];
    let table = Table::new(rows, widths)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(" Help (? or Esc to close) "),
        )
        .header(
            Row::new(vec!["Key", "Action"])
                .style(
                    Style::default()
                        .add_modifier(Modifier::BOLD)
                        .add_modifier(Modifier::UNDERLINED),
                )
                .bottom_margin(1),
        );

    f.render_widget(table, overlay);
}

/// Centered rectangle covering the given percentages of `area`.
pub(super) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let width = area.width * percent_x / 100;
    let height = area.height * percent_y / 100;
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}
