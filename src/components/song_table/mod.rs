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

//! Song list table.
//!
//! [`SongTable`] presents a fixed list of songs, one row each, and tracks the
//! cursor, which row is playing and the album art known for each album. It
//! does not play anything itself: activating a row or opening its menu is
//! reported back as a [`SongTableAction`] for the application to act on.

mod event;
mod render;

use std::{collections::HashMap, ops::Range, path::PathBuf};

use ratatui::widgets::TableState;

use crate::model::Song;

const DEFAULT_PAGE_SIZE: usize = 10;

/// What is known about an album's cover art.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum ArtState {
    Pending,
    Ready(PathBuf),
    Missing,
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum SongTableAction {
    /// A row was activated; the song and its position in the list.
    Play(Song, usize),
    /// The row menu was requested, anchored on that row.
    Menu(Song, usize),
    /// Cover art for the album is needed.
    FetchArt(i64),
}

pub(crate) struct SongTable {
    songs: Vec<Song>,
    table_state: TableState,
    playing: Option<usize>,
    art: HashMap<i64, ArtState>,
    pending: Vec<SongTableAction>,
    page_size: usize,
}

impl SongTable {
    pub(crate) fn new() -> Self {
        Self {
            songs: vec![],
            table_state: TableState::new(),
            playing: None,
            art: HashMap::new(),
            pending: vec![],
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Replaces the whole list. The cursor returns to the first row and no
    /// row is marked as playing.
    pub(crate) fn set_songs(&mut self, songs: Vec<Song>) {
        self.songs = songs;
        self.playing = None;
        self.table_state = TableState::new();
        if !self.songs.is_empty() {
            self.table_state.select(Some(0));
        }
    }

    pub(crate) fn songs(&self) -> &[Song] {
        &self.songs
    }

    pub(crate) fn selected(&self) -> Option<usize> {
        self.table_state.selected()
    }

    pub(crate) fn playing(&self) -> Option<usize> {
        self.playing
    }

    /// Marks `index` as the playing row.
    ///
    /// Returns the rows whose styling changed: the previously playing row
    /// first, then the new one, each at most once.
    pub(crate) fn set_playing(&mut self, index: Option<usize>) -> Vec<usize> {
        let index = index.filter(|&i| i < self.songs.len());
        let previous = std::mem::replace(&mut self.playing, index);

        let mut changed = Vec::with_capacity(2);
        if previous == index {
            return changed;
        }
        changed.extend(previous);
        changed.extend(index);
        changed
    }

    pub(crate) fn art_state(&self, album_id: i64) -> Option<&ArtState> {
        self.art.get(&album_id)
    }

    /// Records the outcome of an art request, `None` when the album has no
    /// usable art.
    pub(crate) fn set_art(&mut self, album_id: i64, path: Option<PathBuf>) {
        let state = path.map_or(ArtState::Missing, ArtState::Ready);
        self.art.insert(album_id, state);
    }

    /// Forgets all album art, album ids do not survive a rescan.
    pub(crate) fn clear_art(&mut self) {
        self.art.clear();
    }

    /// Takes the art requests raised while drawing.
    pub(crate) fn take_pending(&mut self) -> Vec<SongTableAction> {
        std::mem::take(&mut self.pending)
    }

    /// Requests art, once, for each album shown in `rows`.
    fn request_art(&mut self, rows: Range<usize>) {
        let end = rows.end.min(self.songs.len());
        let start = rows.start.min(end);

        for song in &self.songs[start..end] {
            if !self.art.contains_key(&song.album_id) {
                self.art.insert(song.album_id, ArtState::Pending);
                self.pending.push(SongTableAction::FetchArt(song.album_id));
            }
        }
    }

    fn current_action(&self, make: fn(Song, usize) -> SongTableAction) -> Option<SongTableAction> {
        let index = self.table_state.selected()?;
        self.songs.get(index).map(|song| make(song.clone(), index))
    }

    fn goto_next(&mut self) {
        let len = self.songs.len();
        if len == 0 {
            return;
        }
        let i = match self.table_state.selected() {
            Some(i) if i + 1 < len => i + 1,
            _ => 0,
        };
        self.table_state.select(Some(i));
    }

    fn goto_previous(&mut self) {
        let len = self.songs.len();
        if len == 0 {
            return;
        }
        let i = match self.table_state.selected() {
            Some(i) if i > 0 => i - 1,
            _ => len - 1,
        };
        self.table_state.select(Some(i));
    }

    fn goto_first(&mut self) {
        if !self.songs.is_empty() {
            self.table_state.select(Some(0));
        }
    }

    fn goto_last(&mut self) {
        if let Some(last) = self.songs.len().checked_sub(1) {
            self.table_state.select(Some(last));
        }
    }

    fn goto_page_forward(&mut self) {
        if let Some(last) = self.songs.len().checked_sub(1) {
            let i = self.table_state.selected().unwrap_or(0) + self.page_size;
            self.table_state.select(Some(i.min(last)));
        }
    }

    fn goto_page_back(&mut self) {
        if !self.songs.is_empty() {
            let i = self.table_state.selected().unwrap_or(0);
            self.table_state.select(Some(i.saturating_sub(self.page_size)));
        }
    }
}
