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

//! The player panel.
//!
//! Shows the now-playing notification, elapsed and remaining time, the
//! transport controls with the shuffle and repeat modes, and the seek gauge.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Padding, Paragraph},
};

use crate::{
    App,
    model::{PlaybackState, RepeatMode},
    render::icons::{
        ICON_LOADING, ICON_NEXT, ICON_PAUSE, ICON_PLAY, ICON_PREV, ICON_REPEAT, ICON_REPEAT_ONE,
        ICON_SHUFFLE, ICON_STOP,
    },
    service::ControlAction,
    util::format::{format_progress, progress_ratio},
};

/// Renders the main player widget including track info and controls.
pub(crate) fn draw_player(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;

    // The panel stands out while the notification is ongoing.
    let border = if app.service.is_foreground() {
        theme.accent_colour
    } else {
        theme.border_colour
    };

    let block = Block::default()
        .borders(Borders::TOP | Borders::BOTTOM)
        .border_style(Style::default().fg(border))
        .padding(Padding::horizontal(1));

    let inner_area = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(inner_area);

    let info_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(26)])
        .split(chunks[0]);

    let bold = Style::default().add_modifier(Modifier::BOLD);

    let icon = match app.service.state() {
        PlaybackState::Preparing => ICON_LOADING,
        _ if app.player_playing => ICON_PLAY,
        _ if app.now_playing.is_some() => ICON_PAUSE,
        _ => ICON_STOP,
    };

    let mut track_line = vec![Span::styled(format!(" {} ", icon), bold).fg(Color::White)];
    match (app.service.notification(), &app.now_playing) {
        (Some(notification), _) => {
            track_line.push(Span::styled(notification.title.as_str(), bold).fg(theme.accent_colour));
            track_line.push(Span::raw(" by "));
            track_line.push(Span::styled(notification.text.as_str(), bold).fg(theme.accent_colour));
        }
        (None, Some(song)) => {
            track_line.push(Span::styled(song.display_title(), bold).fg(theme.accent_colour));
            track_line.push(Span::raw(" by "));
            track_line.push(Span::styled(song.display_artist(), bold).fg(theme.accent_colour));
        }
        (None, None) => track_line.push(Span::raw("Nothing playing").fg(theme.border_colour)),
    }
    f.render_widget(Paragraph::new(Line::from(track_line)), info_chunks[0]);

    if app.now_playing.is_some() {
        let time = format_progress(app.player_time_ms, app.player_duration_ms);
        f.render_widget(
            Paragraph::new(Span::styled(time, bold).fg(theme.accent_colour)).alignment(Alignment::Right),
            info_chunks[1],
        );
    }

    let control_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(26)])
        .split(chunks[1]);

    let controls = match app.service.notification() {
        Some(notification) => {
            let mut spans = vec![];
            for (action, key) in notification.actions.iter().zip(["p", "space", "n"]) {
                spans.push(Span::styled(format!(" {} ", action_icon(*action)), bold).fg(Color::White));
                spans.push(Span::raw(format!("{} {}  ", action.label(), key)).fg(theme.border_colour));
            }
            spans.push(Span::styled(format!(" {} ", action_icon(notification.dismiss)), bold).fg(Color::White));
            spans.push(Span::raw(format!("{} x", notification.dismiss.label())).fg(theme.border_colour));
            Line::from(spans)
        }
        None => Line::from(Span::raw(" Enter plays the selected song").fg(theme.border_colour)),
    };
    f.render_widget(Paragraph::new(controls), control_chunks[0]);

    f.render_widget(
        Paragraph::new(mode_line(app)).alignment(Alignment::Right),
        control_chunks[1],
    );

    let position_gauge = Gauge::default()
        .gauge_style(
            Style::default()
                .fg(theme.accent_colour)
                .bg(theme.gauge_track_colour),
        )
        .ratio(progress_ratio(app.player_time_ms, app.player_duration_ms))
        .label("")
        .use_unicode(true);

    f.render_widget(position_gauge, chunks[3]);
}

fn action_icon(action: ControlAction) -> &'static str {
    match action {
        ControlAction::Play => ICON_PLAY,
        ControlAction::Pause => ICON_PAUSE,
        ControlAction::Previous => ICON_PREV,
        ControlAction::Next => ICON_NEXT,
        ControlAction::Stop => ICON_STOP,
    }
}

fn mode_line(app: &App) -> Line<'static> {
    let theme = &app.theme;
    let on = Style::default().fg(theme.accent_colour).add_modifier(Modifier::BOLD);
    let off = Style::default().fg(theme.border_colour);

    let shuffle_style = if app.service.is_shuffle() { on } else { off };

    let repeat = app.service.repeat_mode();
    let repeat_icon = match repeat {
        RepeatMode::One => ICON_REPEAT_ONE,
        RepeatMode::Off | RepeatMode::All => ICON_REPEAT,
    };
    let repeat_style = if repeat == RepeatMode::Off { off } else { on };

    Line::from(vec![
        Span::styled(format!("{} shuffle", ICON_SHUFFLE), shuffle_style),
        Span::raw("  "),
        Span::styled(format!("{} {}", repeat_icon, repeat.label()), repeat_style),
    ])
}
