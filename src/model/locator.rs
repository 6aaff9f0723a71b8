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

//! Content locators.
//!
//! A locator names a playable or image resource in the media index without
//! exposing where the bytes live on disk. The playback service and the media
//! session only ever hand these around, the index resolves them.

use std::{fmt, str::FromStr};

use thiserror::Error;

const SCHEME: &str = "library://";
const AUDIO: &str = "audio";
const ALBUM_ART: &str = "albumart";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum LocatorKind {
    Audio(i64),
    AlbumArt(i64),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub(crate) enum LocatorError {
    #[error("unrecognised content locator: {0}")]
    Unrecognised(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct ContentLocator(LocatorKind);

impl ContentLocator {
    pub(crate) fn audio(id: i64) -> Self {
        Self(LocatorKind::Audio(id))
    }

    pub(crate) fn album_art(album_id: i64) -> Self {
        Self(LocatorKind::AlbumArt(album_id))
    }

    pub(crate) fn kind(&self) -> LocatorKind {
        self.0
    }

    pub(crate) fn parse(value: &str) -> Result<Self, LocatorError> {
        value.parse()
    }
}

impl fmt::Display for ContentLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            LocatorKind::Audio(id) => write!(f, "{SCHEME}{AUDIO}/{id}"),
            LocatorKind::AlbumArt(id) => write!(f, "{SCHEME}{ALBUM_ART}/{id}"),
        }
    }
}

impl FromStr for ContentLocator {
    type Err = LocatorError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let unrecognised = || LocatorError::Unrecognised(value.to_string());

        let rest = value.strip_prefix(SCHEME).ok_or_else(unrecognised)?;
        let (collection, id) = rest.split_once('/').ok_or_else(unrecognised)?;
        let id: i64 = id.parse().map_err(|_| unrecognised())?;

        match collection {
            AUDIO => Ok(Self::audio(id)),
            ALBUM_ART => Ok(Self::album_art(id)),
            _ => Err(unrecognised()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn audio_locator_is_built_from_the_song_id() {
        let locator = ContentLocator::audio(42);

        assert_eq!(locator.to_string(), "library://audio/42");
        assert_eq!(locator.kind(), LocatorKind::Audio(42));
    }

    #[test]
    fn album_art_locator_parses_back() {
        let parsed = ContentLocator::parse("library://albumart/7").unwrap();

        assert_eq!(parsed, ContentLocator::album_art(7));
    }

    #[test]
    fn foreign_locators_are_rejected() {
        for value in ["content://media/7", "library://video/7", "library://audio/x", "library://audio"] {
            assert!(matches!(
                ContentLocator::parse(value),
                Err(LocatorError::Unrecognised(_))
            ));
        }
    }
}
