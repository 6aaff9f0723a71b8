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

//! Application events and the main event loop.
//!
//! Every input the application reacts to arrives as an [`AppEvent`] on one
//! channel: key presses and terminal changes from the input thread, results
//! from the task worker, engine events from the audio worker, control
//! messages from the socket and media keys, and the playback service's own
//! state and progress notifications.
//!
//! The loop in [`process_events`] is the only place the playback service is
//! driven from, so it never needs locking.

mod handlers;
mod key_handlers;

use handlers::*;

pub(crate) use handlers::check_access_and_load;

use std::{io::Stdout, path::PathBuf, sync::mpsc::Sender};

use anyhow::Result;
use crossterm::event::KeyEvent;
use ratatui::{Terminal, prelude::CrosstermBackend};

use crate::{
    App,
    model::Song,
    player::PlayerEvent,
    render::draw,
    service::{ControlAction, FocusChange, PlaybackObserver},
};

#[derive(Debug)]
pub(crate) enum AppEvent {
    Key(KeyEvent),
    /// The terminal was resized or regained focus.
    Resumed,
    Tick,

    ScanProgress(i64),
    LibraryScanned(i64),
    SongsLoaded(Vec<Song>),
    AlbumArtReady(i64, Option<PathBuf>),

    Player(PlayerEvent),
    Control(ControlAction),
    AudioFocus(FocusChange),
    /// Play the song with this id, if it is in the list.
    PlaySong(i64),

    PlaybackStateChanged { playing: bool, song: Option<Song> },
    Progress { position_ms: u64, duration_ms: u64 },
    PollProgress,

    ExitApplication,

    Error(String),
    FatalError(String),
}

/// The playback service reports to the event loop through the same channel
/// as everything else.
impl PlaybackObserver for Sender<AppEvent> {
    fn on_playback_state(&self, playing: bool, song: Option<&Song>) {
        let _ = self.send(AppEvent::PlaybackStateChanged {
            playing,
            song: song.cloned(),
        });
    }

    fn on_progress(&self, position_ms: u64, duration_ms: u64) {
        let _ = self.send(AppEvent::Progress {
            position_ms,
            duration_ms,
        });
    }
}

/// Runs the main application loop, handling events and rendering the UI in the
/// terminal.
///
/// This function loops until a quit event is received or the event channel
/// is closed.
///
/// # Errors
///
/// Returns an error for a fatal worker failure or if drawing fails.
pub(crate) fn process_events(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
) -> Result<()> {
    terminal.draw(|f| draw(f, app))?;

    while let Ok(event) = app.event_rx.recv() {
        if matches!(event, AppEvent::ExitApplication) {
            break;
        }

        dispatch_event(app, event)?;
        sync_playing_row(app);

        terminal.draw(|f| draw(f, app))?;
        request_album_art(app)?;
    }

    Ok(())
}

fn dispatch_event(app: &mut App, event: AppEvent) -> Result<()> {
    match event {
        AppEvent::Key(key) => key_handlers::process_key_event(app, key)?,
        AppEvent::Resumed => handle_resumed(app),
        AppEvent::Tick => handle_tick(app),
        AppEvent::ScanProgress(count) => handle_scan_progress(app, count),
        AppEvent::LibraryScanned(count) => handle_library_scanned(app, count),
        AppEvent::SongsLoaded(songs) => handle_songs_loaded(app, songs),
        AppEvent::AlbumArtReady(album_id, path) => handle_album_art_ready(app, album_id, path),
        AppEvent::Player(event) => handle_player_event(app, event),
        AppEvent::Control(action) => app.service.handle_action(action),
        AppEvent::AudioFocus(change) => app.service.on_audio_focus_change(change),
        AppEvent::PlaySong(id) => handle_play_song(app, id),
        AppEvent::PlaybackStateChanged { playing, song } => {
            handle_playback_state_changed(app, playing, song)
        }
        AppEvent::Progress {
            position_ms,
            duration_ms,
        } => handle_progress(app, position_ms, duration_ms),
        AppEvent::PollProgress => handle_poll_progress(app),
        AppEvent::Error(message) => handle_error(app, message),
        AppEvent::FatalError(message) => anyhow::bail!(message),
        AppEvent::ExitApplication => {}
    }

    Ok(())
}

#[cfg(test)]
pub(crate) mod fixtures {
    use std::sync::mpsc::{self, Receiver};

    use anyhow::Result;

    use crate::{
        App,
        config::AppConfig,
        model::Song,
        service::{MediaBackend, MusicService, SharedFocus},
        session::NullSession,
        tasks::AppTask,
    };

    /// An engine that accepts every command and plays nothing.
    struct SilentBackend;

    impl MediaBackend for SilentBackend {
        fn prepare(&mut self, _song: &Song) -> Result<()> {
            Ok(())
        }

        fn start(&mut self) -> Result<()> {
            Ok(())
        }

        fn pause(&mut self) -> Result<()> {
            Ok(())
        }

        fn seek_to(&mut self, _position_ms: u64) -> Result<()> {
            Ok(())
        }

        fn set_volume(&mut self, _volume: f32) -> Result<()> {
            Ok(())
        }

        fn release(&mut self) -> Result<()> {
            Ok(())
        }
    }

    /// An application around a silent service. The task receiver is returned
    /// so that task sends succeed.
    pub(crate) fn test_app() -> (App, Receiver<AppTask>) {
        let (event_tx, event_rx) = mpsc::channel();
        let (task_tx, task_rx) = mpsc::channel();

        let service = MusicService::new(
            Box::new(SilentBackend),
            Box::new(SharedFocus::default()),
            Box::new(NullSession),
        );

        let app = App::with_service(AppConfig::default(), task_tx, event_tx, event_rx, service);
        (app, task_rx)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc;

    use super::*;
    use crate::model::fixtures::titled;

    #[test]
    fn observer_forwards_state_and_progress() {
        let (event_tx, event_rx) = mpsc::channel();
        let song = titled(3, "Third");

        event_tx.on_playback_state(true, Some(&song));
        event_tx.on_progress(1_000, 60_000);

        assert!(matches!(
            event_rx.try_recv(),
            Ok(AppEvent::PlaybackStateChanged { playing: true, song: Some(s) }) if s.id == 3
        ));
        assert!(matches!(
            event_rx.try_recv(),
            Ok(AppEvent::Progress {
                position_ms: 1_000,
                duration_ms: 60_000
            })
        ));
    }
}
