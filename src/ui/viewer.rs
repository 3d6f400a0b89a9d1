//! Article viewer widget.

use chrono::{DateTime, Local, TimeZone, Utc};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use std::fmt::Display;

use crate::model::Article;
use crate::util::strip_control_chars;

/// `edited` as a local date and time, e.g. `6/10/2020, 2:54:40 PM`.
pub fn format_edited(edited: DateTime<Utc>) -> String {
    format_edited_in(edited, &Local)
}

/// [`format_edited`] in an explicit time zone.
pub fn format_edited_in<Tz>(edited: DateTime<Utc>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    edited
        .with_timezone(tz)
        .format("%-m/%-d/%Y, %-I:%M:%S %p")
        .to_string()
}

fn article_lines(article: &Article) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(Span::styled(
            strip_control_chars(&article.title).into_owned(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];

    lines.extend(
        strip_control_chars(&article.extract)
            .lines()
            .map(|l| Line::from(l.to_string())),
    );

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format_edited(article.edited),
        Style::default().fg(Color::DarkGray),
    )));
    lines
}

/// Render `article`, or an empty panel when there is none.
pub fn render(f: &mut Frame, article: Option<&Article>, area: Rect) {
    if area.width < 1 || area.height < 1 {
        return;
    }

    let block = Block::default().borders(Borders::ALL).title(" Article ");
    let Some(article) = article else {
        f.render_widget(block, area);
        return;
    };

    let paragraph = Paragraph::new(article_lines(article))
        .block(block)
        .wrap(Wrap { trim: false });
    f.render_widget(paragraph, area);
}
