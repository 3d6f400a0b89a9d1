//! Navigation bar widget: section keys on the left, titles on the right.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

use crate::app::App;
use crate::index::{section_keys, titles_for_section};
use crate::nav::NavFocus;
use crate::util::{strip_control_chars, truncate_to_width};

const SECTION_COLUMN_WIDTH: u16 = 9;

fn border_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    }
}

fn cursor_style(focused: bool) -> Style {
    if focused {
        Style::default().bg(Color::DarkGray).fg(Color::White)
    } else {
        Style::default().add_modifier(Modifier::UNDERLINED)
    }
}

pub fn render(f: &mut Frame, app: &App, area: Rect) {
    if area.width < 2 || area.height < 3 {
        return;
    }

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(SECTION_COLUMN_WIDTH), Constraint::Min(0)])
        .split(area);

    render_sections(f, app, columns[0]);
    render_titles(f, app, columns[1]);
}

fn render_sections(f: &mut Frame, app: &App, area: Rect) {
    let focused = app.nav.focus() == NavFocus::Sections;
    let highlighted = app.nav.section();

    let items: Vec<ListItem> = section_keys(&app.state.collection)
        .into_iter()
        .map(|key| {
            let style = if Some(key.as_str()) == highlighted {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            ListItem::new(strip_control_chars(&key).into_owned()).style(style)
        })
        .collect();

    let mut list_state = ListState::default();
    if !items.is_empty() {
        list_state.select(Some(app.nav.section_cursor()));
    }

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style(focused))
                .title("Index"),
        )
        .highlight_style(cursor_style(focused));

    f.render_stateful_widget(list, area, &mut list_state);
}

fn render_titles(f: &mut Frame, app: &App, area: Rect) {
    let focused = app.nav.focus() == NavFocus::Titles;
    let max_width = area.width.saturating_sub(2) as usize;

    let items: Vec<ListItem> = titles_for_section(&app.state.collection, app.nav.section())
        .into_iter()
        .map(|article| {
            let title = strip_control_chars(&article.title);
            let style = if article.id.is_some() && article.id == app.state.selected {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default()
            };
            ListItem::new(truncate_to_width(&title, max_width).into_owned()).style(style)
        })
        .collect();

    let mut list_state = ListState::default();
    if !items.is_empty() {
        list_state.select(Some(app.nav.title_cursor()));
    }

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style(focused))
                .title("Titles"),
        )
        .highlight_style(cursor_style(focused));

    f.render_stateful_widget(list, area, &mut list_state);
}
