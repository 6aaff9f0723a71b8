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

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Style, Stylize},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::{components::search_bar::SearchBar, render::Render, theme::Theme};

const PROMPT: &str = "/ ";

impl Render for SearchBar {
    fn draw(&mut self, f: &mut Frame, area: Rect, theme: &Theme) {
        let [container] = Layout::horizontal([Constraint::Min(1)])
            .horizontal_margin(1)
            .areas(area);

        let line = Line::from(vec![
            Span::styled(PROMPT, Style::default().fg(theme.accent_colour)),
            Span::raw(self.input.value()),
        ]);

        f.render_widget(
            Paragraph::new(line)
                .fg(theme.commander_colour)
                .bg(theme.gauge_track_colour),
            container,
        );

        if self.active {
            let cursor_x = container.x + PROMPT.len() as u16 + self.input.cursor() as u16;
            f.set_cursor_position((cursor_x, container.y));
        }
    }
}
