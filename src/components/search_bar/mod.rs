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

//! Search input.
//!
//! A single line editor, opened with `/`, that filters the song list as the
//! query is typed. `Enter` keeps the filter and returns to the list, `Esc`
//! clears it.

mod render;

use crossterm::event::{Event, KeyCode};
use tui_input::{Input, backend::crossterm::EventHandler};

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum SearchAction {
    Changed(String),
    Submitted,
    Cancelled,
}

#[derive(Default)]
pub(crate) struct SearchBar {
    active: bool,
    input: Input,
}

impl SearchBar {
    pub(crate) fn active(&self) -> bool {
        self.active
    }

    pub(crate) fn open(&mut self) {
        self.active = true;
    }

    pub(crate) fn query(&self) -> &str {
        self.input.value()
    }

    /// Handles a key while the editor is open.
    ///
    /// Returns `None` when the editor is closed or the key did not change
    /// the query.
    pub(crate) fn process_event(&mut self, event: &Event) -> Option<SearchAction> {
        if !self.active {
            return None;
        }

        let Event::Key(key_event) = event else {
            return None;
        };

        match key_event.code {
            KeyCode::Esc => {
                self.active = false;
                self.input.reset();
                Some(SearchAction::Cancelled)
            }
            KeyCode::Enter => {
                self.active = false;
                Some(SearchAction::Submitted)
            }
            _ => {
                let before = self.input.value().to_string();
                self.input.handle_event(event);
                let after = self.input.value();
                (after != before).then(|| SearchAction::Changed(after.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyEvent, KeyModifiers};

    use super::*;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn closed_bar_ignores_keys() {
        let mut bar = SearchBar::default();

        assert_eq!(bar.process_event(&key(KeyCode::Char('a'))), None);
        assert_eq!(bar.query(), "");
    }

    #[test]
    fn typing_changes_the_query() {
        let mut bar = SearchBar::default();
        bar.open();

        assert_eq!(
            bar.process_event(&key(KeyCode::Char('a'))),
            Some(SearchAction::Changed("a".to_string()))
        );
        assert_eq!(
            bar.process_event(&key(KeyCode::Char('b'))),
            Some(SearchAction::Changed("ab".to_string()))
        );
        assert_eq!(bar.process_event(&key(KeyCode::Enter)), Some(SearchAction::Submitted));
        assert!(!bar.active());
        assert_eq!(bar.query(), "ab");
    }

    #[test]
    fn escape_clears_the_query() {
        let mut bar = SearchBar::default();
        bar.open();
        bar.process_event(&key(KeyCode::Char('x')));

        assert_eq!(bar.process_event(&key(KeyCode::Esc)), Some(SearchAction::Cancelled));
        assert_eq!(bar.query(), "");
    }
}
