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

//! Media library indexing and database persistence.
//!
//! This module handles the discovery of audio files on the local filesystem
//! and rebuilds the media index from them.
//!
//! It utilizes `WalkDir` for efficient directory traversal and `Lofty` for
//! metadata extraction.
//!
//! # Performance
//!
//! Large library scans are performed within an atomic SQLite transaction to
//! maximize write throughput and ensure database integrity. Internal caching
//! is used during processing to minimize redundant database lookups for
//! existing artist and album entries.

use anyhow::{Context, Result};
use lofty::{prelude::*, probe::Probe, tag::Tag};
use rusqlite::{Connection, Transaction, params};
use std::{
    collections::{HashMap, HashSet},
    path::Path,
    sync::mpsc::Sender,
};
use tracing::{info, warn};
use walkdir::WalkDir;
use xxhash_rust::xxh3::xxh3_64;

use crate::events::AppEvent;

const PROGRESS_INTERVAL: i64 = 50;

/// Tag values read from a single file, before they are written to the index.
struct ScannedSong {
    title: String,
    artist: String,
    album: String,
    duration_ms: i64,
    path: String,
}

/// Recursively scans the media directories and rebuilds the media index.
///
/// This performs a full rebuild by clearing all existing records and
/// re-indexing every root. Only files with one of the given extensions are
/// considered.
///
/// # Returns
///
/// Returns the total number of songs imported into the index.
///
/// # Errors
///
/// Returns an error if the transaction fails or if database constraints are
/// violated during insertion. Unreadable files are skipped, not errors.
pub(crate) fn process_music_library(
    conn: &mut Connection,
    roots: &[String],
    extensions: &[String],
    event_tx: &Sender<AppEvent>,
) -> Result<i64> {
    let extensions: HashSet<String> = extensions.iter().map(|e| e.to_lowercase()).collect();

    let mut artist_cache: HashMap<String, i64> = HashMap::new();
    let mut album_cache: HashMap<(i64, String), i64> = HashMap::new();
    let mut albums_with_art: HashSet<i64> = HashSet::new();

    let tx = conn.transaction()?;

    tx.execute("DELETE FROM album_art", [])?;
    tx.execute("DELETE FROM songs", [])?;
    tx.execute("DELETE FROM albums", [])?;
    tx.execute("DELETE FROM artists", [])?;

    let mut processed: i64 = 0;

    for root in roots {
        info!(root = %root, "Scanning media directory");

        for entry in WalkDir::new(root)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .filter(|e| has_audio_extension(e.path(), &extensions))
        {
            let path = entry.path();

            let tagged_file = match Probe::open(path).and_then(|p| p.read()) {
                Ok(file) => file,
                Err(e) => {
                    warn!("Skipping {}: {}", path.display(), e);
                    continue;
                }
            };

            let tag = tagged_file.primary_tag().or_else(|| tagged_file.first_tag());

            let Some(path_str) = path.to_str() else {
                warn!("Skipping {}: path is not valid UTF-8", path.display());
                continue;
            };

            let song = ScannedSong {
                title: tag
                    .and_then(|t| t.title().map(|s| s.to_string()))
                    .unwrap_or_else(|| file_stem(path)),
                artist: tag
                    .and_then(|t| t.artist().map(|s| s.to_string()))
                    .unwrap_or_default(),
                album: tag
                    .and_then(|t| t.album().map(|s| s.to_string()))
                    .unwrap_or_default(),
                duration_ms: i64::try_from(tagged_file.properties().duration().as_millis())
                    .unwrap_or(0),
                path: path_str.to_string(),
            };

            let artist_id = artist_id(&tx, &mut artist_cache, &song.artist)?;
            let album_id = album_id(&tx, &mut album_cache, artist_id, &song.album)?;

            if let Some(tag) = tag {
                if albums_with_art.insert(album_id) && !store_album_art(&tx, album_id, tag)? {
                    albums_with_art.remove(&album_id);
                }
            }

            tx.execute(
                "INSERT OR IGNORE INTO songs (durable_id, album_id, artist_id, title, duration_ms, path)
                 VALUES (?, ?, ?, ?, ?, ?)",
                params![
                    durable_id(&song.path),
                    album_id,
                    artist_id,
                    song.title,
                    song.duration_ms,
                    song.path
                ],
            )?;

            processed += 1;
            if processed % PROGRESS_INTERVAL == 0 {
                let _ = event_tx.send(AppEvent::ScanProgress(processed));
            }
        }
    }

    tx.commit().context("Failed to commit transaction")?;

    let count = crate::db::song_count(conn)?;
    info!(count, "Media index rebuilt");

    Ok(count)
}

fn has_audio_extension(path: &Path, extensions: &HashSet<String>) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| extensions.contains(&ext.to_lowercase()))
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().to_string())
        .unwrap_or_default()
}

// Stable across rescans, unlike the autoincrement row id.
fn durable_id(path: &str) -> i64 {
    (xxh3_64(path.as_bytes()) >> 1) as i64
}

fn artist_id(tx: &Transaction, cache: &mut HashMap<String, i64>, name: &str) -> Result<i64> {
    if let Some(&id) = cache.get(name) {
        return Ok(id);
    }

    tx.execute("INSERT OR IGNORE INTO artists (name) VALUES (?)", params![name])?;
    let id: i64 = tx.query_row("SELECT id FROM artists WHERE name = ?", params![name], |r| r.get(0))?;
    cache.insert(name.to_string(), id);

    Ok(id)
}

fn album_id(
    tx: &Transaction,
    cache: &mut HashMap<(i64, String), i64>,
    artist_id: i64,
    title: &str,
) -> Result<i64> {
    let key = (artist_id, title.to_string());
    if let Some(&id) = cache.get(&key) {
        return Ok(id);
    }

    tx.execute(
        "INSERT OR IGNORE INTO albums (artist_id, title) VALUES (?, ?)",
        params![artist_id, title],
    )?;
    let id: i64 = tx.query_row(
        "SELECT id FROM albums WHERE artist_id = ? AND title = ?",
        params![artist_id, title],
        |r| r.get(0),
    )?;
    cache.insert(key, id);

    Ok(id)
}

/// Stores the first embedded picture of `tag` as the album's cover art.
///
/// Returns `false` when the tag carries no picture.
fn store_album_art(tx: &Transaction, album_id: i64, tag: &Tag) -> Result<bool> {
    let Some(picture) = tag.pictures().first() else {
        return Ok(false);
    };

    let mime = picture
        .mime_type()
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| "image/jpeg".to_string());

    tx.execute(
        "INSERT OR REPLACE INTO album_art (album_id, mime, data) VALUES (?, ?, ?)",
        params![album_id, mime, picture.data()],
    )?;

    Ok(true)
}

#[cfg(test)]
mod tests {
    use std::{fs, sync::mpsc};

    use super::*;

    #[test]
    fn extension_filter_ignores_case() {
        let extensions: HashSet<String> = ["mp3".to_string(), "flac".to_string()].into();

        assert!(has_audio_extension(Path::new("/a/b.MP3"), &extensions));
        assert!(has_audio_extension(Path::new("/a/b.flac"), &extensions));
        assert!(!has_audio_extension(Path::new("/a/cover.jpg"), &extensions));
        assert!(!has_audio_extension(Path::new("/a/README"), &extensions));
    }

    #[test]
    fn durable_id_depends_only_on_path() {
        assert_eq!(durable_id("/m/a.mp3"), durable_id("/m/a.mp3"));
        assert_ne!(durable_id("/m/a.mp3"), durable_id("/m/b.mp3"));
        assert!(durable_id("/m/a.mp3") >= 0);
    }

    /// Writes a silent mono 8-bit PCM WAV file.
    fn write_wav(path: &Path, seconds: u32) {
        let rate: u32 = 8_000;
        let data_len = rate * seconds;

        let mut bytes = Vec::new();
        bytes.extend_from_slice(b"RIFF");
        bytes.extend_from_slice(&(36 + data_len).to_le_bytes());
        bytes.extend_from_slice(b"WAVEfmt ");
        bytes.extend_from_slice(&16u32.to_le_bytes());
        bytes.extend_from_slice(&1u16.to_le_bytes());
        bytes.extend_from_slice(&1u16.to_le_bytes());
        bytes.extend_from_slice(&rate.to_le_bytes());
        bytes.extend_from_slice(&rate.to_le_bytes());
        bytes.extend_from_slice(&1u16.to_le_bytes());
        bytes.extend_from_slice(&8u16.to_le_bytes());
        bytes.extend_from_slice(b"data");
        bytes.extend_from_slice(&data_len.to_le_bytes());
        bytes.resize(bytes.len() + data_len as usize, 128);

        fs::write(path, bytes).unwrap();
    }

    #[test]
    fn song_ids_survive_a_rescan() {
        let dir = std::env::temp_dir().join(format!("tunebox-rescan-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        write_wav(&dir.join("first.wav"), 2);
        write_wav(&dir.join("second.wav"), 2);

        let mut conn = crate::db::init_memory_db().unwrap();
        let (event_tx, _event_rx) = mpsc::channel();
        let roots = [dir.to_string_lossy().to_string()];
        let extensions = ["wav".to_string()];

        let scan = |conn: &mut Connection| {
            process_music_library(conn, &roots, &extensions, &event_tx).unwrap();
            let mut songs = Vec::new();
            crate::db::query_music(conn, &mut songs).unwrap();
            songs
        };

        let before = scan(&mut conn);
        let after = scan(&mut conn);
        fs::remove_dir_all(&dir).ok();

        assert_eq!(before.len(), 2);
        let ids = |songs: &[crate::model::Song]| songs.iter().map(|s| s.id).collect::<Vec<_>>();
        assert_eq!(ids(&before), ids(&after));
        assert_eq!(before[0].title, "first");
        assert_eq!(before[0].id, durable_id(&before[0].path));
        assert_eq!(before[0].locator, crate::model::ContentLocator::audio(before[0].id));
    }

    #[test]
    fn unreadable_audio_files_are_skipped() {
        let dir = std::env::temp_dir().join(format!("tunebox-scan-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("broken.mp3"), b"not really audio").unwrap();
        fs::write(dir.join("notes.txt"), b"ignored").unwrap();

        let mut conn = crate::db::init_memory_db().unwrap();
        let (event_tx, _event_rx) = mpsc::channel();

        let count = process_music_library(
            &mut conn,
            &[dir.to_string_lossy().to_string()],
            &["mp3".to_string()],
            &event_tx,
        )
        .unwrap();

        fs::remove_dir_all(&dir).ok();
        assert_eq!(count, 0);
    }
}
