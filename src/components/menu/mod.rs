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

//! Popup menus and dialogs.
//!
//! The song menu is opened on a table row and carries that row as its anchor.
//! The main menu holds the library-wide actions. Dialogs are read-only popups
//! dismissed with any key.

mod render;

use std::path::PathBuf;

use crossterm::event::{Event, KeyCode};
use ratatui::widgets::ListState;

use crate::model::Song;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum MenuItem {
    Play,
    SongInfo,
    Cancel,
    Refresh,
    Rescan,
    About,
}

impl MenuItem {
    pub(crate) fn label(self) -> &'static str {
        match self {
            MenuItem::Play => "Play",
            MenuItem::SongInfo => "Song info",
            MenuItem::Cancel => "Cancel",
            MenuItem::Refresh => "Refresh",
            MenuItem::Rescan => "Rescan library",
            MenuItem::About => "About",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum MenuAction {
    Selected(MenuItem),
    Dismissed,
}

pub(crate) struct Menu {
    title: &'static str,
    items: Vec<MenuItem>,
    list_state: ListState,
    anchor: Option<(Song, usize)>,
}

impl Menu {
    pub(crate) fn for_song(song: Song, index: usize) -> Self {
        Self::new(
            "Song",
            vec![MenuItem::Play, MenuItem::SongInfo, MenuItem::Cancel],
            Some((song, index)),
        )
    }

    pub(crate) fn main() -> Self {
        Self::new(
            "Menu",
            vec![MenuItem::Refresh, MenuItem::Rescan, MenuItem::About],
            None,
        )
    }

    fn new(title: &'static str, items: Vec<MenuItem>, anchor: Option<(Song, usize)>) -> Self {
        let mut list_state = ListState::default();
        list_state.select(Some(0));

        Self {
            title,
            items,
            list_state,
            anchor,
        }
    }

    /// The song and row the menu was opened on.
    pub(crate) fn anchor(&self) -> Option<&(Song, usize)> {
        self.anchor.as_ref()
    }

    pub(crate) fn process_event(&mut self, event: &Event) -> Option<MenuAction> {
        let Event::Key(key_event) = event else {
            return None;
        };

        let len = self.items.len();
        let selected = self.list_state.selected().unwrap_or(0);

        match key_event.code {
            KeyCode::Char('j') | KeyCode::Down => {
                self.list_state.select(Some((selected + 1) % len));
                None
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.list_state.select(Some((selected + len - 1) % len));
                None
            }
            KeyCode::Enter => self.items.get(selected).map(|&item| MenuAction::Selected(item)),
            KeyCode::Esc | KeyCode::Char('q') => Some(MenuAction::Dismissed),
            _ => None,
        }
    }
}

pub(crate) enum Dialog {
    /// Details of a song, with its cover art file when one is known.
    SongInfo(Song, Option<PathBuf>),
    About,
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyEvent, KeyModifiers};

    use super::*;
    use crate::model::fixtures::titled;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn song_menu_keeps_its_anchor() {
        let menu = Menu::for_song(titled(4, "four"), 3);

        assert_eq!(menu.anchor(), Some(&(titled(4, "four"), 3)));
        assert!(Menu::main().anchor().is_none());
    }

    #[test]
    fn selection_wraps_and_activates() {
        let mut menu = Menu::for_song(titled(1, "one"), 0);

        assert_eq!(menu.process_event(&key(KeyCode::Up)), None);
        assert_eq!(
            menu.process_event(&key(KeyCode::Enter)),
            Some(MenuAction::Selected(MenuItem::Cancel))
        );

        assert_eq!(menu.process_event(&key(KeyCode::Down)), None);
        assert_eq!(menu.process_event(&key(KeyCode::Down)), None);
        assert_eq!(
            menu.process_event(&key(KeyCode::Enter)),
            Some(MenuAction::Selected(MenuItem::SongInfo))
        );
    }

    #[test]
    fn escape_dismisses() {
        let mut menu = Menu::main();

        assert_eq!(menu.process_event(&key(KeyCode::Esc)), Some(MenuAction::Dismissed));
    }
}
