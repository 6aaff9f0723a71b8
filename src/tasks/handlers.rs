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

use anyhow::Result;
use tracing::{debug, info, warn};

use crate::{
    db::{self, scan},
    events::AppEvent,
    library,
    tasks::TaskContext,
};

/// Loads the song list, indexing the media directories first if the index
/// has never been filled.
pub(super) fn load_songs(ctx: &mut TaskContext) -> Result<()> {
    if db::song_count(ctx.conn)? == 0 {
        info!("Media index is empty, scanning");
        return scan_library(ctx);
    }

    send_songs(ctx)
}

fn send_songs(ctx: &mut TaskContext) -> Result<()> {
    let songs = library::get_all_songs(ctx.conn, ctx.config.min_duration_ms);
    ctx.event_tx.send(AppEvent::SongsLoaded(songs))?;

    Ok(())
}

pub(super) fn scan_library(ctx: &mut TaskContext) -> Result<()> {
    let media_dirs = ctx.config.effective_media_dirs();

    match scan::process_music_library(ctx.conn, &media_dirs, &ctx.config.extensions, ctx.event_tx) {
        Ok(count) => {
            info!(count, "Library scan finished");
            if let Err(e) = ctx.art.clear() {
                warn!("{:#}", e);
            }
            ctx.event_tx.send(AppEvent::LibraryScanned(count))?;
        }
        Err(e) => {
            warn!("Library scan failed: {:#}", e);
            ctx.event_tx
                .send(AppEvent::Error(format!("Library scan failed: {}", e)))?;
        }
    }

    send_songs(ctx)
}

/// Art that cannot be read or written is reported as missing, the table
/// shows a placeholder for it.
pub(super) fn fetch_album_art(ctx: &mut TaskContext, album_id: i64) -> Result<()> {
    debug!(locator = %library::album_art_locator(album_id), "Resolving album art");

    let path = match ctx.art.lookup(album_id) {
        Some(path) => Some(path),
        None => match db::fetch_album_art(ctx.conn, album_id) {
            Ok(Some(art)) => ctx
                .art
                .store(&art)
                .inspect_err(|e| warn!("Failed to cache album art: {:#}", e))
                .ok(),
            Ok(None) => None,
            Err(e) => {
                warn!(album_id, "Failed to read album art: {:#}", e);
                None
            }
        },
    };

    ctx.event_tx.send(AppEvent::AlbumArtReady(album_id, path))?;

    Ok(())
}
