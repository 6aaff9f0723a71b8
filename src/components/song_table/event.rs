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

//! Keyboard handling for the song table.

use crossterm::event::{Event, KeyCode, KeyModifiers};

use crate::components::song_table::{SongTable, SongTableAction};

impl SongTable {
    /// Applies navigation keys and reports row actions.
    ///
    /// Returns `None` both for keys that only moved the cursor and for keys
    /// the table does not handle.
    pub(crate) fn process_event(&mut self, event: &Event) -> Option<SongTableAction> {
        let Event::Key(key_event) = event else {
            return None;
        };

        match (key_event.code, key_event.modifiers) {
            (KeyCode::Char('j'), _) | (KeyCode::Down, _) => self.goto_next(),
            (KeyCode::Char('k'), _) | (KeyCode::Up, _) => self.goto_previous(),
            (KeyCode::Char('g'), _) | (KeyCode::Home, _) => self.goto_first(),
            (KeyCode::Char('G'), _) | (KeyCode::End, _) => self.goto_last(),

            (KeyCode::Char('f'), KeyModifiers::CONTROL) | (KeyCode::PageDown, _) => {
                self.goto_page_forward()
            }
            (KeyCode::Char('b'), KeyModifiers::CONTROL) | (KeyCode::PageUp, _) => {
                self.goto_page_back()
            }

            (KeyCode::Enter, _) => return self.current_action(SongTableAction::Play),
            (KeyCode::Char('m'), _) => return self.current_action(SongTableAction::Menu),

            _ => {}
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyEvent;

    use super::*;
    use crate::model::fixtures::titled;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn table() -> SongTable {
        let mut table = SongTable::new();
        table.set_songs(vec![titled(1, "one"), titled(2, "two")]);
        table
    }

    #[test]
    fn enter_plays_the_selected_row() {
        let mut table = table();

        assert_eq!(table.process_event(&key(KeyCode::Char('j'))), None);
        assert_eq!(
            table.process_event(&key(KeyCode::Enter)),
            Some(SongTableAction::Play(titled(2, "two"), 1))
        );
    }

    #[test]
    fn menu_is_anchored_on_the_selected_row() {
        let mut table = table();

        assert_eq!(
            table.process_event(&key(KeyCode::Char('m'))),
            Some(SongTableAction::Menu(titled(1, "one"), 0))
        );
    }

    #[test]
    fn empty_table_has_no_actions() {
        let mut table = SongTable::new();

        assert_eq!(table.process_event(&key(KeyCode::Enter)), None);
        assert_eq!(table.process_event(&key(KeyCode::Char('m'))), None);
    }
}
