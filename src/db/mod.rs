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

//! Media index data access layer.
//!
//! This module handles all interactions with the SQLite database that acts as
//! the media index, including schema creation and fetching song metadata. It
//! uses cached statements to optimize frequently executed queries.
//!
//! # Tables
//!
//! * `artists` - Stores unique artist names.
//! * `albums` - Groups songs under titles, linked to artists.
//! * `songs` - Individual audio files with metadata and file paths.
//! * `album_art` - The first embedded picture found for each album.
//!
//! # Performance
//!
//! Most functions in this module use [`rusqlite::Connection::prepare_cached`]
//! to reduce SQL parsing overhead.

mod model;
pub(crate) mod scan;

use anyhow::{Context, Result};
use rusqlite::{Connection, OptionalExtension};

use crate::model::{AlbumArt, Song};

/// Opens a connection to the SQLite database and configures performance settings.
///
/// This function performs the following setup:
/// * **WAL Mode**: Enables Write-Ahead Logging so the scanner and the loader
///   can share the file.
/// * **Performance Tuning**: Sets synchronous mode to `NORMAL` and increases the cache size.
/// * **Constraints**: Enforces foreign key integrity.
/// * **Schema**: Executes [`create_schema`] to ensure all tables and indices exist.
///
/// # Errors
///
/// Returns an error if:
/// * The database file cannot be opened.
/// * The initial PRAGMA configurations fail.
/// * The schema initialization fails.
pub(crate) fn init_db(path: &str) -> Result<Connection> {
    let conn = Connection::open(path).with_context(|| format!("Failed to open {}", path))?;

    let journal_mode: String = conn.query_row("PRAGMA journal_mode = WAL", [], |r| r.get(0))?;
    if journal_mode != "wal" {
        anyhow::bail!(
            "Failed to switch to WAL mode. Current mode: {}",
            journal_mode
        );
    }

    configure(&conn)?;

    Ok(conn)
}

/// Opens a private in-memory index, used by tests.
#[cfg(test)]
pub(crate) fn init_memory_db() -> Result<Connection> {
    let conn = Connection::open_in_memory()?;
    configure(&conn)?;
    Ok(conn)
}

fn configure(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        PRAGMA synchronous = NORMAL;
        PRAGMA foreign_keys = ON;
        PRAGMA cache_size = -64000; -- Use 64MB of RAM for cache
    ",
    )?;

    conn.set_prepared_statement_cache_capacity(100);

    create_schema(conn)
}

/// Create the database schema.
///
/// This function creates the `artists`, `albums`, `songs` and `album_art`
/// tables if they do not already exist, with cascading deletes from artists
/// down to album art and indices on the join columns.
///
/// This operation is wrapped in a single SQL transaction to ensure the schema
/// is updated atomically.
fn create_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "BEGIN;

        CREATE TABLE IF NOT EXISTS artists (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL COLLATE NOCASE UNIQUE
        );

        CREATE TABLE IF NOT EXISTS albums (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            artist_id INTEGER NOT NULL,
            title TEXT NOT NULL COLLATE NOCASE,
            UNIQUE (artist_id, title),
            FOREIGN KEY (artist_id) REFERENCES artists (id) ON DELETE CASCADE
        );

        CREATE INDEX IF NOT EXISTS idx_albums_artist_id ON albums (artist_id);

        CREATE TABLE IF NOT EXISTS songs (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            durable_id INTEGER NOT NULL UNIQUE,
            album_id INTEGER NOT NULL,
            artist_id INTEGER NOT NULL,
            title TEXT NOT NULL COLLATE NOCASE,
            duration_ms INTEGER NOT NULL,
            path TEXT NOT NULL UNIQUE,
            is_music INTEGER NOT NULL DEFAULT 1,
            FOREIGN KEY (album_id) REFERENCES albums (id) ON DELETE CASCADE,
            FOREIGN KEY (artist_id) REFERENCES artists (id) ON DELETE CASCADE
        );

        CREATE INDEX IF NOT EXISTS idx_songs_album_id ON songs (album_id);
        CREATE INDEX IF NOT EXISTS idx_songs_title ON songs (title);

        CREATE TABLE IF NOT EXISTS album_art (
            album_id INTEGER PRIMARY KEY,
            mime TEXT NOT NULL,
            data BLOB NOT NULL,
            FOREIGN KEY (album_id) REFERENCES albums (id) ON DELETE CASCADE
        );

        COMMIT;",
    )
    .context("Failed to create schema")
}

/// Reads every music entry, ordered by title, into `songs`.
///
/// Rows are appended as they are read so that on failure the caller keeps
/// everything read up to that point.
///
/// # Errors
///
/// Returns an error if the SQL query fails or if a row cannot be mapped to a
/// [`Song`].
pub(crate) fn query_music(conn: &Connection, songs: &mut Vec<Song>) -> Result<()> {
    let sql = "
        SELECT s.durable_id, s.title, ar.name, al.title, s.duration_ms, s.path, s.album_id, s.artist_id
        FROM songs s
        JOIN albums al ON s.album_id = al.id
        JOIN artists ar ON s.artist_id = ar.id
        WHERE s.is_music = 1
        ORDER BY s.title ASC
    ";

    let mut stmt = conn.prepare_cached(sql)?;
    let rows = stmt.query_map([], Song::from_row)?;

    for row in rows {
        songs.push(row?);
    }

    Ok(())
}

/// Fetches the stored cover art for an album, if the scan found any.
pub(crate) fn fetch_album_art(conn: &Connection, album_id: i64) -> Result<Option<AlbumArt>> {
    let mut stmt = conn.prepare_cached("SELECT album_id, mime, data FROM album_art WHERE album_id = ?")?;
    let art = stmt
        .query_row([album_id], AlbumArt::from_row)
        .optional()?;

    Ok(art)
}

pub(crate) fn song_count(conn: &Connection) -> Result<i64> {
    let count = conn.query_row("SELECT COUNT(*) FROM songs", [], |row| row.get(0))?;
    Ok(count)
}
