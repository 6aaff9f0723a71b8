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

//! Drawing for the song table.
//!
//! Each row shows the album art state, title, artist, album and duration. The
//! playing row is marked and drawn in the accent colour. Albums seen for the
//! first time while drawing have their art requested.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Rect},
    style::{Modifier, Style, Stylize},
    text::Line,
    widgets::{Block, Cell, Row, Table},
};

use crate::{
    components::song_table::{ArtState, SongTable},
    render::{
        Render,
        icons::{ICON_ART, ICON_NO_ART, ICON_PLAY},
    },
    theme::Theme,
};

const HEADER_ROWS: u16 = 2;

impl Render for SongTable {
    fn draw(&mut self, f: &mut Frame, area: Rect, theme: &Theme) {
        self.draw_table(f, area, theme);

        self.page_size = usize::from(area.height.saturating_sub(HEADER_ROWS)).max(1);
        let first = self.table_state.offset();
        self.request_art(first..first + self.page_size);
    }
}

impl SongTable {
    fn draw_table(&mut self, f: &mut Frame, area: Rect, theme: &Theme) {
        let rows = self.songs.iter().enumerate().map(|(index, song)| {
            let playing = self.playing == Some(index);

            let marker = if playing { ICON_PLAY } else { "" };
            let art = match self.art.get(&song.album_id) {
                Some(ArtState::Ready(_)) => Line::from(ICON_ART).fg(theme.table_art_fg),
                Some(ArtState::Missing) => Line::from(ICON_NO_ART).fg(theme.border_colour),
                Some(ArtState::Pending) | None => Line::from(""),
            };

            let title_style = if playing {
                Style::default().fg(theme.accent_colour).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.table_title_fg)
            };

            Row::new(vec![
                Cell::from(Line::from(marker).fg(theme.accent_colour)),
                Cell::from(art),
                Cell::from(Line::from(song.display_title()).style(title_style)),
                Cell::from(Line::from(song.display_artist()).fg(theme.table_artist_fg)),
                Cell::from(Line::from(song.display_album()).fg(theme.table_album_fg)),
                Cell::from(
                    Line::from(song.formatted_duration())
                        .fg(theme.table_time_fg)
                        .alignment(Alignment::Right),
                ),
            ])
        });

        let table = Table::new(
            rows,
            [
                Constraint::Length(2),
                Constraint::Length(2),
                Constraint::Percentage(40),
                Constraint::Percentage(25),
                Constraint::Percentage(25),
                Constraint::Length(6),
            ],
        )
        .header(
            Row::new(vec![
                Cell::from(""),
                Cell::from(""),
                Cell::from("Title"),
                Cell::from("Artist"),
                Cell::from("Album"),
                Cell::from(Line::from("Time").alignment(Alignment::Right)),
            ])
            .style(Style::default().bold().fg(theme.accent_colour))
            .bottom_margin(1),
        )
        .row_highlight_style(Style::default().bg(theme.highlight_bg).fg(theme.highlight_fg))
        .block(Block::default());

        f.render_stateful_widget(table, area, &mut self.table_state);
    }
}
