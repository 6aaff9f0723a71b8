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

//! Background task processing.
//!
//! Anything that touches the media index or the filesystem runs here, on a
//! dedicated worker thread that owns its own database connection. Requests
//! arrive as [`AppTask`]s and results are broadcast back to the application
//! as [`AppEvent`]s.
//!
//! Only actions that may block, or may take more than a trivial amount of time
//! to process, should be implemented as tasks. Other actions are likely more
//! suited to events.

mod handlers;

use anyhow::{Context, Result};
use rusqlite::Connection;
use std::{
    sync::mpsc::{Receiver, Sender},
    thread,
};
use tracing::{debug, error};

use crate::{config::AppConfig, db, events::AppEvent, library::art::ArtCache};

#[derive(Debug)]
pub(crate) enum AppTask {
    /// Load the music list from the media index.
    LoadSongs,
    /// Re-index the media directories, then reload.
    ScanLibrary,
    /// Resolve the cover art of an album into the art cache.
    FetchAlbumArt(i64),
}

/// Spawns a background thread to process application tasks.
///
/// The worker initialises its own database connection; if that fails the
/// application is told with a fatal error event.
///
/// # Arguments
///
/// * `config` - The application configuration.
/// * `art` - Where extracted album art is written.
/// * `task_rx` - The receiving end of the task channel.
/// * `event_tx` - The sending end of the channel for broadcasting results.
pub(crate) fn spawn_task_worker(
    config: &AppConfig,
    art: ArtCache,
    task_rx: Receiver<AppTask>,
    event_tx: Sender<AppEvent>,
) {
    let config = config.clone();

    thread::spawn(move || {
        let mut conn = match db::init_db(&config.database_file)
            .with_context(|| format!("Failed to open media index {}", config.database_file))
        {
            Ok(conn) => conn,
            Err(e) => {
                error!("{:#}", e);
                let _ = event_tx.send(AppEvent::FatalError(format!("{:#}", e)));
                return;
            }
        };

        while let Ok(task) = task_rx.recv() {
            debug!(?task, "Running task");

            let mut ctx = TaskContext {
                config: &config,
                art: &art,
                event_tx: &event_tx,
                conn: &mut conn,
            };

            if let Err(e) = handle_task(task, &mut ctx) {
                error!("Task failed: {:#}", e);
                let _ = event_tx.send(AppEvent::Error(e.to_string()));
            }
        }
    });
}

/// Bundles shared resources required by task handlers to simplify resource
/// passing when invoking those handler functions.
struct TaskContext<'a> {
    config: &'a AppConfig,
    art: &'a ArtCache,
    event_tx: &'a Sender<AppEvent>,
    conn: &'a mut Connection,
}

fn handle_task(task: AppTask, ctx: &mut TaskContext) -> Result<()> {
    match task {
        AppTask::LoadSongs => handlers::load_songs(ctx),
        AppTask::ScanLibrary => handlers::scan_library(ctx),
        AppTask::FetchAlbumArt(album_id) => handlers::fetch_album_art(ctx, album_id),
    }
}
