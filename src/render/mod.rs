// Copyright (C) 2026  Caprica Software Limited
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! User interface rendering logic.
//!
//! This module handles the translation of the [`App`] state into visual
//! widgets using the `ratatui` framework. It is responsible for layout
//! management, widget styling, and terminal frame composition.
//!
//! # Rendering Pipeline
//!
//! The primary entry point is the [`draw`] function, which is called after
//! every application event. Components implement [`Render`] and draw into
//! the area they are given; popups are drawn last, over everything else.

pub(crate) mod icons;
mod player;

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Flex, Layout, Rect},
    style::{Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Padding, Paragraph, Wrap},
};

use crate::{App, Screen, render::player::draw_player, theme::Theme};

const ACCESS_DIALOG_WIDTH: u16 = 60;

pub(crate) trait Render {
    fn draw(&mut self, f: &mut Frame, area: Rect, theme: &Theme);
}

/// Renders the user interface to the terminal frame.
///
/// # Arguments
///
/// * `f` - The current terminal frame used for drawing.
/// * `app` - A mutable reference to the application state, allowing the UI
///   to update internal view state (like table scroll positions).
pub(crate) fn draw(f: &mut Frame, app: &mut App) {
    let area = f.area();
    let theme = app.theme;

    f.render_widget(Block::default().bg(theme.background_colour), area);

    // Outer layout: search, main, player, status
    let outer = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(6),
            Constraint::Length(1),
        ])
        .split(area);

    app.search.draw(f, outer[0], &theme);

    match &app.screen {
        Screen::Songs => app.song_table.draw(f, outer[1], &theme),
        Screen::Loading => draw_message(f, outer[1], &theme, &loading_message(app), None),
        Screen::Empty => draw_message(
            f,
            outer[1],
            &theme,
            "No songs found",
            Some("Press M and choose Rescan library to index your music"),
        ),
        Screen::AccessDenied(reason) => draw_access_dialog(f, outer[1], &theme, reason),
    }

    draw_player(f, outer[2], app);
    draw_status(f, outer[3], app);

    if let Some(menu) = app.menu.as_mut() {
        menu.draw(f, area, &theme);
    }
    if let Some(dialog) = app.dialog.as_mut() {
        dialog.draw(f, area, &theme);
    }
}

/// A rectangle of the given size centred in `area`, clipped to fit.
pub(crate) fn popup_area(area: Rect, width: u16, height: u16) -> Rect {
    let [vertical] = Layout::vertical([Constraint::Length(height.min(area.height))])
        .flex(Flex::Center)
        .areas(area);
    let [popup] = Layout::horizontal([Constraint::Length(width.min(area.width))])
        .flex(Flex::Center)
        .areas(vertical);
    popup
}

fn loading_message(app: &App) -> String {
    match app.scan_progress {
        Some(count) => format!("Scanning library, {} files read", count),
        None => "Loading songs".to_string(),
    }
}

fn draw_message(f: &mut Frame, area: Rect, theme: &Theme, message: &str, hint: Option<&str>) {
    let mut lines = vec![Line::from(Span::styled(
        message.to_string(),
        Style::default().fg(theme.accent_colour).add_modifier(Modifier::BOLD),
    ))];
    if let Some(hint) = hint {
        lines.push(Line::from(""));
        lines.push(Line::from(hint.to_string()).fg(theme.table_time_fg));
    }

    let height = lines.len() as u16;
    let [centre] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);

    f.render_widget(Paragraph::new(lines).alignment(Alignment::Center), centre);
}

fn draw_access_dialog(f: &mut Frame, area: Rect, theme: &Theme, reason: &str) {
    let lines = vec![
        Line::from("Your music cannot be listed until its directory can be read."),
        Line::from(""),
        Line::from(reason.to_string()).fg(theme.error_colour),
        Line::from(""),
        Line::from(vec![
            Span::styled("r", Style::default().fg(theme.accent_colour).add_modifier(Modifier::BOLD)),
            Span::raw(" retry    "),
            Span::styled("c", Style::default().fg(theme.accent_colour).add_modifier(Modifier::BOLD)),
            Span::raw(" cancel"),
        ]),
    ];

    let popup = popup_area(area, ACCESS_DIALOG_WIDTH, lines.len() as u16 + 4);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.accent_colour))
        .title(" Music access ")
        .padding(Padding::uniform(1))
        .bg(theme.popup_bg);

    f.render_widget(Clear, popup);
    f.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: true }),
        popup,
    );
}

fn draw_status(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;

    let (order_prefix, order) = if app.list_shuffled {
        ("  in ", "shuffled order")
    } else {
        ("  sorted by ", app.sort_order.label())
    };

    let line = match &app.toast {
        Some(toast) => {
            let colour = if toast.error {
                theme.error_colour
            } else {
                theme.accent_colour
            };
            Line::from(toast.message.as_str()).fg(colour)
        }
        None => Line::from(vec![
            Span::raw(song_count(app.song_table.selected(), app.song_table.songs().len()))
                .fg(theme.table_time_fg),
            Span::raw(order_prefix).fg(theme.border_colour),
            Span::raw(order).fg(theme.table_time_fg),
            Span::raw("   / search  o sort  s shuffle  r repeat  M menu  q quit")
                .fg(theme.border_colour),
        ]),
    };

    f.render_widget(Paragraph::new(line).block(Block::default().padding(Padding::horizontal(1))), area);
}

fn song_count(selected: Option<usize>, total: usize) -> String {
    match selected {
        Some(index) if total > 0 => format!("{}/{} songs", index + 1, total),
        _ => format!("{} songs", total),
    }
}
