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

//! The track record shared by the library, the playback service and the UI.

use crate::{library::format_duration, model::ContentLocator};

const UNKNOWN_TITLE: &str = "Unknown Title";
const UNKNOWN_ARTIST: &str = "Unknown Artist";
const UNKNOWN_ALBUM: &str = "Unknown Album";

/// A single playable track as described by the media index.
///
/// Songs are never edited after they are read from the index, a refresh of
/// the library replaces the whole list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Song {
    pub(crate) id: i64,
    pub(crate) title: String,
    pub(crate) artist: String,
    pub(crate) album: String,
    pub(crate) duration_ms: u64,
    pub(crate) path: String,
    pub(crate) album_id: i64,
    pub(crate) artist_id: i64,
    pub(crate) locator: ContentLocator,
}

impl Song {
    pub(crate) fn display_title(&self) -> &str {
        display_or(&self.title, UNKNOWN_TITLE)
    }

    pub(crate) fn display_artist(&self) -> &str {
        display_or(&self.artist, UNKNOWN_ARTIST)
    }

    pub(crate) fn display_album(&self) -> &str {
        display_or(&self.album, UNKNOWN_ALBUM)
    }

    pub(crate) fn formatted_duration(&self) -> String {
        format_duration(self.duration_ms)
    }
}

fn display_or<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.trim().is_empty() {
        fallback
    } else {
        value
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::song;

    #[test]
    fn blank_fields_fall_back_to_unknown() {
        let s = song(1, "  ", "", "\t", 61_000);

        assert_eq!(s.display_title(), "Unknown Title");
        assert_eq!(s.display_artist(), "Unknown Artist");
        assert_eq!(s.display_album(), "Unknown Album");
    }

    #[test]
    fn populated_fields_are_shown_as_is() {
        let s = song(1, "Blue", "Joni", "Blue", 61_000);

        assert_eq!(s.display_title(), "Blue");
        assert_eq!(s.display_artist(), "Joni");
        assert_eq!(s.formatted_duration(), "01:01");
    }
}
