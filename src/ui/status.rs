use crate::app::App;
use crate::model::Mode;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    widgets::Paragraph,
    Frame,
};
use std::borrow::Cow;

/// Render the status bar
pub fn render(f: &mut Frame, app: &App, area: Rect) {
    if area.width < 1 || area.height < 1 {
        return;
    }

    let text: Cow<'_, str> = if let Some((msg, _)) = &app.status_message {
        Cow::Borrowed(msg.as_ref())
    } else if let Some(task) = app.in_flight {
        Cow::Owned(format!("Waiting for server ({})...", task))
    } else {
        match app.mode() {
            Mode::View => Cow::Borrowed(
                "[j/k]move [Enter]pick [Tab]switch list [a]dd [e]dit [d]elete [r]eload [?]help [q]uit",
            ),
            Mode::Add | Mode::Edit => {
                Cow::Borrowed("Type to edit | Tab switch field | Ctrl+s save | Esc cancel")
            }
        }
    };

    let style = Style::default().bg(Color::DarkGray).fg(Color::White);
    f.render_widget(Paragraph::new(text).style(style), area);
}
