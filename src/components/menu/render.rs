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
    layout::Rect,
    style::{Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Padding, Paragraph, Wrap},
};

use crate::{
    components::menu::{Dialog, Menu},
    render::{Render, popup_area},
    theme::Theme,
};

const MENU_WIDTH: u16 = 30;
const DIALOG_WIDTH: u16 = 56;

impl Render for Menu {
    fn draw(&mut self, f: &mut Frame, area: Rect, theme: &Theme) {
        let height = self.items.len() as u16 + 2;
        let popup = popup_area(area, MENU_WIDTH, height);

        let title = match &self.anchor {
            Some((song, _)) => format!(" {} ", song.display_title()),
            None => format!(" {} ", self.title),
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.accent_colour))
            .title(title)
            .bg(theme.popup_bg);

        let items: Vec<ListItem> = self
            .items
            .iter()
            .map(|item| ListItem::new(item.label()).fg(theme.table_title_fg))
            .collect();

        let list = List::new(items)
            .block(block)
            .highlight_style(Style::default().bg(theme.highlight_bg).fg(theme.highlight_fg))
            .highlight_symbol("> ");

        f.render_widget(Clear, popup);
        f.render_stateful_widget(list, popup, &mut self.list_state);
    }
}

impl Render for Dialog {
    fn draw(&mut self, f: &mut Frame, area: Rect, theme: &Theme) {
        let (title, lines) = match self {
            Dialog::SongInfo(song, cover) => (
                " Song info ",
                vec![
                    field("Title", song.display_title(), theme),
                    field("Artist", song.display_artist(), theme),
                    field("Album", song.display_album(), theme),
                    field("Duration", &song.formatted_duration(), theme),
                    field("File", &song.path, theme),
                    field(
                        "Cover",
                        &cover.as_ref().map_or("none".to_string(), |path| path.display().to_string()),
                        theme,
                    ),
                ],
            ),
            Dialog::About => (
                " About ",
                vec![
                    Line::from(Span::styled(
                        format!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
                        Style::default().fg(theme.accent_colour).add_modifier(Modifier::BOLD),
                    )),
                    Line::from(env!("CARGO_PKG_DESCRIPTION")),
                ],
            ),
        };

        let height = lines.len() as u16 + 4;
        let popup = popup_area(area, DIALOG_WIDTH, height);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.accent_colour))
            .title(title)
            .title_bottom(Line::from(" any key to close ").fg(theme.border_colour))
            .padding(Padding::uniform(1))
            .bg(theme.popup_bg);

        f.render_widget(Clear, popup);
        f.render_widget(
            Paragraph::new(lines).block(block).wrap(Wrap { trim: true }),
            popup,
        );
    }
}

fn field<'a>(name: &'a str, value: &str, theme: &Theme) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("{:<9}", name), Style::default().fg(theme.table_time_fg)),
        Span::styled(value.to_string(), Style::default().fg(theme.table_title_fg)),
    ])
}
