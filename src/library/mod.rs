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

//! Song library queries and list transforms.
//!
//! This module sits between the media index and everything that displays or
//! plays songs. Loading goes through [`get_all_songs`], which never fails: a
//! broken index degrades to an empty (or partial) list. Everything else here
//! is a pure transform that takes a slice and returns a new ordered vector,
//! the input is never reordered in place.

pub(crate) mod art;

use rand::{rng, seq::SliceRandom};
use rusqlite::Connection;
use tracing::{debug, error};

use crate::{
    db,
    model::{ContentLocator, Song},
};

/// Songs this short or shorter are treated as notification sounds and clips
/// rather than music.
pub(crate) const DEFAULT_MIN_DURATION_MS: u64 = 30_000;

/// Loads every music entry from the media index, ordered by title.
///
/// Entries with a duration of `min_duration_ms` or less are left out. If the
/// query fails part way through, whatever was read before the failure is
/// returned and the error is logged.
pub(crate) fn get_all_songs(conn: &Connection, min_duration_ms: u64) -> Vec<Song> {
    let mut rows = Vec::new();

    if let Err(e) = db::query_music(conn, &mut rows) {
        error!("Failed to query media index: {:#}", e);
    }

    let songs = filter_music(rows, min_duration_ms);
    debug!(count = songs.len(), "Loaded songs from media index");
    songs
}

/// Keeps the songs strictly longer than `min_duration_ms`.
pub(crate) fn filter_music(songs: Vec<Song>, min_duration_ms: u64) -> Vec<Song> {
    songs
        .into_iter()
        .filter(|song| song.duration_ms > min_duration_ms)
        .collect()
}

/// Formats a duration in milliseconds as `MM:SS`.
///
/// Minutes are never carried into hours, an hour long track is `60:00`.
pub(crate) fn format_duration(duration_ms: u64) -> String {
    crate::util::format::format_time(duration_ms / 1000)
}

/// The locator for the cover art of an album.
pub(crate) fn album_art_locator(album_id: i64) -> ContentLocator {
    ContentLocator::album_art(album_id)
}

/// Case-insensitive substring search over title, artist and album.
///
/// A blank query matches everything and returns the input unchanged.
pub(crate) fn search_songs(songs: &[Song], query: &str) -> Vec<Song> {
    if query.trim().is_empty() {
        return songs.to_vec();
    }

    let query = query.to_lowercase();
    songs
        .iter()
        .filter(|song| {
            song.title.to_lowercase().contains(&query)
                || song.artist.to_lowercase().contains(&query)
                || song.album.to_lowercase().contains(&query)
        })
        .cloned()
        .collect()
}

pub(crate) fn shuffle_songs(songs: &[Song]) -> Vec<Song> {
    let mut shuffled = songs.to_vec();
    shuffled.shuffle(&mut rng());
    shuffled
}

pub(crate) fn sort_songs_by_title(songs: &[Song]) -> Vec<Song> {
    sorted_by_key(songs, |song| song.title.to_lowercase())
}

pub(crate) fn sort_songs_by_artist(songs: &[Song]) -> Vec<Song> {
    sorted_by_key(songs, |song| song.artist.to_lowercase())
}

pub(crate) fn sort_songs_by_album(songs: &[Song]) -> Vec<Song> {
    sorted_by_key(songs, |song| song.album.to_lowercase())
}

pub(crate) fn sort_songs_by_duration(songs: &[Song]) -> Vec<Song> {
    sorted_by_key(songs, |song| song.duration_ms)
}

// `sort_by_key` is stable, equal keys keep their relative order.
fn sorted_by_key<K: Ord>(songs: &[Song], key: impl FnMut(&Song) -> K) -> Vec<Song> {
    let mut sorted = songs.to_vec();
    sorted.sort_by_key(key);
    sorted
}

/// Ordering applied to the song table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) enum SortOrder {
    #[default]
    Title,
    Artist,
    Album,
    Duration,
}

impl SortOrder {
    pub(crate) fn next(self) -> Self {
        match self {
            SortOrder::Title => SortOrder::Artist,
            SortOrder::Artist => SortOrder::Album,
            SortOrder::Album => SortOrder::Duration,
            SortOrder::Duration => SortOrder::Title,
        }
    }

    pub(crate) fn apply(self, songs: &[Song]) -> Vec<Song> {
        match self {
            SortOrder::Title => sort_songs_by_title(songs),
            SortOrder::Artist => sort_songs_by_artist(songs),
            SortOrder::Album => sort_songs_by_album(songs),
            SortOrder::Duration => sort_songs_by_duration(songs),
        }
    }

    pub(crate) fn label(self) -> &'static str {
        match self {
            SortOrder::Title => "title",
            SortOrder::Artist => "artist",
            SortOrder::Album => "album",
            SortOrder::Duration => "duration",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::fixtures::{song, titled};

    fn titles(songs: &[Song]) -> Vec<&str> {
        songs.iter().map(|s| s.title.as_str()).collect()
    }

    #[test]
    fn format_duration_pads_and_never_rolls_into_hours() {
        assert_eq!(format_duration(0), "00:00");
        assert_eq!(format_duration(90_000), "01:30");
        assert_eq!(format_duration(3_600_000), "60:00");
        assert_eq!(format_duration(59_999), "00:59");
    }

    #[test]
    fn blank_search_returns_input_unchanged() {
        let songs = vec![titled(1, "b"), titled(2, "a")];

        assert_eq!(search_songs(&songs, ""), songs);
        assert_eq!(search_songs(&songs, "   "), songs);
    }

    #[test]
    fn search_matches_title_artist_or_album_ignoring_case() {
        let songs = vec![
            song(1, "Harvest Moon", "Neil Young", "Harvest Moon", 200_000),
            song(2, "Heart of Gold", "NEIL YOUNG", "Harvest", 190_000),
            song(3, "Cortez", "Crazy Horse", "Zuma", 450_000),
            song(4, "Big Yellow Taxi", "Joni", "Ladies of the Canyon", 130_000),
        ];

        assert_eq!(titles(&search_songs(&songs, "neil")), vec!["Harvest Moon", "Heart of Gold"]);
        assert_eq!(titles(&search_songs(&songs, "ZUMA")), vec!["Cortez"]);
        assert_eq!(titles(&search_songs(&songs, "taxi")), vec!["Big Yellow Taxi"]);
        assert!(search_songs(&songs, "nothing here").is_empty());
    }

    #[test]
    fn title_sort_is_case_insensitive() {
        let songs = vec![titled(1, "banana"), titled(2, "Apple")];

        assert_eq!(titles(&sort_songs_by_title(&songs)), vec!["Apple", "banana"]);
        // input untouched
        assert_eq!(titles(&songs), vec!["banana", "Apple"]);
    }

    #[test]
    fn title_sort_is_stable_for_equal_keys() {
        let songs = vec![titled(1, "same"), titled(2, "SAME"), titled(3, "Same")];

        let ids: Vec<i64> = sort_songs_by_title(&songs).iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn artist_album_and_duration_sorts() {
        let songs = vec![
            song(1, "x", "b", "Z", 300_000),
            song(2, "y", "A", "y", 100_000),
            song(3, "z", "c", "x", 200_000),
        ];

        let ids = |v: Vec<Song>| v.iter().map(|s| s.id).collect::<Vec<_>>();
        assert_eq!(ids(sort_songs_by_artist(&songs)), vec![2, 1, 3]);
        assert_eq!(ids(sort_songs_by_album(&songs)), vec![3, 2, 1]);
        assert_eq!(ids(sort_songs_by_duration(&songs)), vec![2, 3, 1]);
    }

    #[test]
    fn shuffle_keeps_every_song() {
        let songs: Vec<Song> = (1..=20).map(|i| titled(i, "t")).collect();

        let mut ids: Vec<i64> = shuffle_songs(&songs).iter().map(|s| s.id).collect();
        ids.sort();
        assert_eq!(ids, (1..=20).collect::<Vec<_>>());
    }

    #[test]
    fn inclusion_threshold_is_exclusive() {
        let songs = vec![
            song(1, "clip", "", "", 30_000),
            song(2, "song", "", "", 30_001),
            song(3, "beep", "", "", 1_000),
        ];

        let kept = filter_music(songs, DEFAULT_MIN_DURATION_MS);
        assert_eq!(titles(&kept), vec!["song"]);
    }

    #[test]
    fn sort_order_cycles_through_every_column() {
        let mut order = SortOrder::default();
        for _ in 0..4 {
            order = order.next();
        }

        assert_eq!(order, SortOrder::Title);
    }

    #[test]
    fn get_all_songs_degrades_to_empty_without_schema() {
        let conn = Connection::open_in_memory().unwrap();

        assert!(get_all_songs(&conn, DEFAULT_MIN_DURATION_MS).is_empty());
    }
}
