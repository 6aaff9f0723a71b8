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
    App, Screen, access,
    components::SongTableAction,
    library,
    model::Song,
    player::PlayerEvent,
    tasks::AppTask,
};

/// Checks the media directories and, if they can be read, starts loading
/// songs. Otherwise the access dialog is shown.
pub(crate) fn check_access_and_load(app: &mut App) -> Result<()> {
    match access::check_media_access(&app.config.effective_media_dirs()) {
        Ok(()) => {
            app.screen = Screen::Loading;
            app.task_tx.send(AppTask::LoadSongs)?;
        }
        Err(e) => {
            warn!("Media access denied: {}", e);
            app.screen = Screen::AccessDenied(e.to_string());
        }
    }

    Ok(())
}

/// Rebuilds the table from the loaded songs with the current search and sort
/// applied, and has the service play from the same list.
pub(crate) fn refresh_song_list(app: &mut App) {
    let found = library::search_songs(&app.songs, app.search.query());
    let ordered = app.sort_order.apply(&found);

    app.list_shuffled = false;
    show_song_list(app, ordered);
}

pub(crate) fn show_song_list(app: &mut App, songs: Vec<Song>) {
    app.song_table.set_songs(songs.clone());
    app.service.set_songs(songs);
    sync_playing_row(app);
}

pub(crate) fn sync_playing_row(app: &mut App) {
    let changed = app.song_table.set_playing(app.service.current_index());
    if !changed.is_empty() {
        debug!(?changed, playing = ?app.song_table.playing(), "Restyled rows");
    }
}

/// Brings the UI back in line with the service after the terminal has been
/// away.
pub(super) fn handle_resumed(app: &mut App) {
    app.player_playing = app.service.is_playing();
    app.now_playing = app.service.current_song().cloned();
    app.player_time_ms = app.service.current_position();
    app.player_duration_ms = app.service.duration();

    if app.player_playing {
        app.poller.start();
    } else {
        app.poller.stop();
    }

    sync_playing_row(app);
}

pub(super) fn handle_tick(app: &mut App) {
    if app.toast.as_ref().is_some_and(|toast| toast.expires <= std::time::Instant::now()) {
        app.toast = None;
    }
}

pub(super) fn handle_scan_progress(app: &mut App, count: i64) {
    app.scan_progress = Some(count);
}

pub(super) fn handle_library_scanned(app: &mut App, count: i64) {
    app.scan_progress = None;
    app.song_table.clear_art();
    app.show_toast(format!("Indexed {} songs", count));
}

pub(super) fn handle_songs_loaded(app: &mut App, songs: Vec<Song>) {
    info!(count = songs.len(), "Songs loaded");
    app.scan_progress = None;

    if songs.is_empty() {
        app.songs.clear();
        show_song_list(app, vec![]);
        app.screen = Screen::Empty;
        return;
    }

    app.songs = songs;
    refresh_song_list(app);
    app.screen = Screen::Songs;

    app.service.set_observer(Some(Box::new(app.event_tx.clone())));
}

pub(super) fn handle_album_art_ready(app: &mut App, album_id: i64, path: Option<std::path::PathBuf>) {
    app.song_table.set_art(album_id, path);
}

pub(super) fn handle_player_event(app: &mut App, event: PlayerEvent) {
    match event {
        PlayerEvent::Prepared(duration_ms) => app.service.on_prepared(duration_ms),
        PlayerEvent::Position(position_ms) => app.service.on_position(position_ms),
        PlayerEvent::Duration(duration_ms) => app.service.on_duration(duration_ms),
        PlayerEvent::Completed => app.service.on_completion(),
        PlayerEvent::Error(message) => app.service.on_error(&message),
    }
}

pub(super) fn handle_play_song(app: &mut App, id: i64) {
    match app.song_table.songs().iter().position(|song| song.id == id) {
        Some(index) => app.service.play_song(index),
        None => app.show_error(format!("Song {} is not in the list", id)),
    }
}

pub(super) fn handle_playback_state_changed(app: &mut App, playing: bool, song: Option<Song>) {
    app.player_playing = playing;
    app.now_playing = song.filter(|_| app.service.is_active());

    if app.now_playing.is_none() {
        app.player_time_ms = 0;
        app.player_duration_ms = 0;
    }

    if playing {
        app.poller.start();
    } else {
        app.poller.stop();
    }
}

pub(super) fn handle_progress(app: &mut App, position_ms: u64, duration_ms: u64) {
    app.player_time_ms = position_ms;
    app.player_duration_ms = duration_ms;
}

pub(super) fn handle_poll_progress(app: &mut App) {
    if !app.service.is_playing() {
        app.poller.stop();
        return;
    }

    app.player_time_ms = app.service.current_position();
    app.player_duration_ms = app.service.duration();
}

pub(super) fn handle_error(app: &mut App, message: String) {
    app.show_error(message);
}

/// Sends the art requests raised while drawing the table to the task worker.
pub(super) fn request_album_art(app: &mut App) -> Result<()> {
    for action in app.song_table.take_pending() {
        if let SongTableAction::FetchArt(album_id) = action {
            app.task_tx.send(AppTask::FetchAlbumArt(album_id))?;
        }
    }

    Ok(())
}
