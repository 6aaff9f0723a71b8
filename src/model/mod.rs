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

//! Domain models and core data structures.
//!
//! This module defines the central entities of the application, the songs
//! read from the media index and the small value types describing playback,
//! shared between the library, the playback service and the UI.

mod locator;
mod song;

pub(crate) use locator::{ContentLocator, LocatorError, LocatorKind};
pub(crate) use song::Song;

#[cfg(test)]
pub(crate) use song::fixtures;

/// Playback state of the service.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum PlaybackState {
    Idle,
    Preparing,
    Playing,
    Paused,
}

impl PlaybackState {
    /// Whether the engine has a loaded, prepared track.
    pub(crate) fn is_prepared(self) -> bool {
        matches!(self, PlaybackState::Playing | PlaybackState::Paused)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) enum RepeatMode {
    #[default]
    Off,
    All,
    One,
}

impl RepeatMode {
    /// The mode that follows this one, `Off -> All -> One -> Off`.
    pub(crate) fn next(self) -> Self {
        match self {
            RepeatMode::Off => RepeatMode::All,
            RepeatMode::All => RepeatMode::One,
            RepeatMode::One => RepeatMode::Off,
        }
    }

    pub(crate) fn label(self) -> &'static str {
        match self {
            RepeatMode::Off => "Repeat off",
            RepeatMode::All => "Repeat all",
            RepeatMode::One => "Repeat one",
        }
    }
}

/// Cover art bytes for an album as stored in the media index.
#[derive(Debug, Clone)]
pub(crate) struct AlbumArt {
    pub(crate) album_id: i64,
    pub(crate) mime: String,
    pub(crate) data: Vec<u8>,
}

#[cfg(test)]
mod tests {
    use super::RepeatMode;

    #[test]
    fn repeat_cycles_off_all_one() {
        let mut mode = RepeatMode::default();
        let mut seen = vec![mode];
        for _ in 0..3 {
            mode = mode.next();
            seen.push(mode);
        }

        assert_eq!(
            seen,
            vec![RepeatMode::Off, RepeatMode::All, RepeatMode::One, RepeatMode::Off]
        );
    }
}
