//! Frame layout and overlay dispatch.

use crate::app::{App, ConfirmAction};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use super::{action_bar, editor, help, nav, status, viewer};

/// Minimum terminal dimensions required for normal operation.
pub(super) const MIN_WIDTH: u16 = 50;
pub(super) const MIN_HEIGHT: u16 = 12;

/// Draw one frame.
///
/// ```text
/// +---------+----------------+-------------------------------+
/// | Index   | Titles         | Article / Editor              |
/// +---------+----------------+-------------------------------+
/// | [a] Add Article  [e] Edit Article  [d] Delete Article    |
/// +----------------------------------------------------------+
/// status line
/// ```
pub fn draw(f: &mut Frame, app: &App) {
    let area = f.area();
    if area.width < 1 || area.height < 1 {
        return;
    }

    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        let msg = if area.height < 3 || area.width < 20 {
            Paragraph::new("Too small")
        } else {
            Paragraph::new(format!(
                "Terminal too small\n\nMinimum: {}x{}\nCurrent: {}x{}",
                MIN_WIDTH, MIN_HEIGHT, area.width, area.height
            ))
            .alignment(Alignment::Center)
        };
        f.render_widget(msg, area);
        return;
    }

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .split(area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
        .split(rows[0]);

    nav::render(f, app, columns[0]);
    match &app.editor {
        Some(form) if app.mode().is_editing() => editor::render(f, form, app.is_busy(), columns[1]),
        _ => viewer::render(f, app.current(), columns[1]),
    }
    action_bar::render(f, app, rows[1]);
    status::render(f, app, rows[2]);

    if app.show_help {
        help::render(f, app);
    }
    if let Some(confirm) = &app.pending_confirm {
        render_confirm_overlay(f, confirm);
    }
}

fn render_confirm_overlay(f: &mut Frame, confirm: &ConfirmAction) {
    let area = f.area();

    let text = match confirm {
        ConfirmAction::DeleteArticle { title, .. } => {
            format!("Delete \"{}\"?\n\n(y) Confirm  (n/Esc) Cancel", title)
        }
    };

    let width = 50u16.min(area.width.saturating_sub(4));
    let height = 6u16.min(area.height.saturating_sub(4));
    let overlay = Rect::new(
        area.x + (area.width.saturating_sub(width)) / 2,
        area.y + (area.height.saturating_sub(height)) / 2,
        width,
        height,
    );
    if overlay.width < 10 || overlay.height < 5 {
        return;
    }

    f.render_widget(Clear, overlay);
    let paragraph = Paragraph::new(text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red))
                .title(" Confirm "),
        )
        .alignment(Alignment::Center);
    f.render_widget(paragraph, overlay);
}
