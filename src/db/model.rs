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

//! Database row mapping for domain models.
//!
//! This module provides the conversion logic between raw SQLite result rows
//! and high-level domain models, ensuring type-safe extraction of model
//! attributes from database queries.

use rusqlite::Row;

use crate::model::{AlbumArt, ContentLocator, Song};

impl Song {
    /// Maps an SQLite row to a [`Song`] instance.
    ///
    /// This is a helper function designed to be used with [`rusqlite::Statement::query_map`].
    /// The first column is the path-derived durable id, which is kept across
    /// rescans. The content locator is derived from it rather than stored.
    ///
    /// # Errors
    ///
    /// Returns a [`rusqlite::Error`] if:
    /// * The row does not contain enough columns.
    /// * The data in a column cannot be converted to the required Rust type.
    pub(crate) fn from_row(row: &Row) -> rusqlite::Result<Self> {
        let id: i64 = row.get(0)?;
        let duration_ms: i64 = row.get(4)?;

        Ok(Self {
            id,
            title: row.get(1)?,
            artist: row.get(2)?,
            album: row.get(3)?,
            duration_ms: u64::try_from(duration_ms).unwrap_or(0),
            path: row.get(5)?,
            album_id: row.get(6)?,
            artist_id: row.get(7)?,
            locator: ContentLocator::audio(id),
        })
    }
}

impl AlbumArt {
    pub(crate) fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            album_id: row.get(0)?,
            mime: row.get(1)?,
            data: row.get(2)?,
        })
    }
}
