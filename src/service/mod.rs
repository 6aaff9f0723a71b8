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

//! Playback service.
//!
//! [`MusicService`] owns the one active player, the song list it plays from
//! and every piece of playback state: the current index, whether the engine
//! is preparing, playing or paused, and the shuffle and repeat modes. It is
//! driven from a single thread, the application event loop, which calls the
//! transport operations for user input and the `on_*` callbacks for engine
//! events, so no locking is needed.
//!
//! Everything platform-owned sits behind a trait at the edge of the service:
//!
//! * [`MediaBackend`] - the audio engine, preparing asynchronously.
//! * [`AudioFocus`] - who may produce audio.
//! * [`SessionSink`] - notification and media session publishing.
//! * [`PlaybackObserver`] - the subscriber for state and progress changes.

mod action;
mod focus;
mod notification;
pub(crate) mod remote;

#[cfg(test)]
mod tests;

use anyhow::Result;
use tracing::{debug, info, warn};

pub(crate) use action::{ControlAction, FocusChange, ParseActionError};
pub(crate) use focus::{AudioFocus, SharedFocus};
pub(crate) use notification::Notification;

use crate::model::{PlaybackState, RepeatMode, Song};

const FULL_VOLUME: f32 = 1.0;
const DUCKED_VOLUME: f32 = 0.3;

/// An audio engine that can hold one prepared track.
///
/// `prepare` returns as soon as loading has started, completion is reported
/// later through [`MusicService::on_prepared`]. Engine positions are in
/// milliseconds.
pub(crate) trait MediaBackend {
    fn prepare(&mut self, song: &Song) -> Result<()>;
    fn start(&mut self) -> Result<()>;
    fn pause(&mut self) -> Result<()>;
    fn seek_to(&mut self, position_ms: u64) -> Result<()>;
    /// Sets output volume, `0.0..=1.0`.
    fn set_volume(&mut self, volume: f32) -> Result<()>;
    /// Unloads the current track, if any.
    fn release(&mut self) -> Result<()>;
}

/// Receives the notification and media session state.
pub(crate) trait SessionSink {
    fn publish(&mut self, notification: &Notification, song: &Song);
    fn clear(&mut self);
}

/// Subscriber for playback state and progress.
pub(crate) trait PlaybackObserver {
    fn on_playback_state(&self, playing: bool, song: Option<&Song>);
    fn on_progress(&self, position_ms: u64, duration_ms: u64);
}

pub(crate) struct MusicService {
    backend: Box<dyn MediaBackend>,
    focus: Box<dyn AudioFocus>,
    session: Box<dyn SessionSink>,
    observer: Option<Box<dyn PlaybackObserver>>,

    songs: Vec<Song>,
    /// Position of `song` in `songs`, `None` once a new list no longer has it.
    current: Option<usize>,
    song: Option<Song>,
    state: PlaybackState,
    shuffle: bool,
    repeat: RepeatMode,

    position_ms: u64,
    duration_ms: u64,

    foreground: bool,
    active: bool,
    notification: Option<Notification>,
}

impl MusicService {
    pub(crate) fn new(
        backend: Box<dyn MediaBackend>,
        focus: Box<dyn AudioFocus>,
        session: Box<dyn SessionSink>,
    ) -> Self {
        Self {
            backend,
            focus,
            session,
            observer: None,
            songs: vec![],
            current: None,
            song: None,
            state: PlaybackState::Idle,
            shuffle: false,
            repeat: RepeatMode::Off,
            position_ms: 0,
            duration_ms: 0,
            foreground: false,
            active: false,
            notification: None,
        }
    }

    /// Replaces the song list the service plays from.
    ///
    /// The service keeps its own copy, later changes to the caller's list are
    /// not seen. The current song keeps its selection if it is still in the
    /// new list, wherever it now sits. A song that is playing or paused keeps
    /// playing when it is missing from the new list; the next song is then
    /// taken from the start of the list.
    pub(crate) fn set_songs(&mut self, songs: Vec<Song>) {
        self.songs = songs;
        self.current = self
            .song
            .as_ref()
            .and_then(|current| self.songs.iter().position(|song| song.id == current.id));

        if self.current.is_none() && !self.state.is_prepared() {
            self.song = None;
        }
    }

    pub(crate) fn set_observer(&mut self, observer: Option<Box<dyn PlaybackObserver>>) {
        self.observer = observer;
    }

    /// Starts preparing the song at `index`.
    ///
    /// Does nothing if `index` is out of bounds. If the engine refuses the
    /// song the service stays idle with the song selected.
    pub(crate) fn play_song(&mut self, index: usize) {
        if index >= self.songs.len() {
            return;
        }

        self.current = Some(index);
        self.song = Some(self.songs[index].clone());
        self.active = true;
        self.release_player();

        let song = &self.songs[index];
        match self.backend.prepare(song) {
            Ok(()) => {
                debug!(index, title = %song.display_title(), "Preparing song");
                self.state = PlaybackState::Preparing;
            }
            Err(e) => {
                warn!("Failed to set up playback of {}: {:#}", song.path, e);
            }
        }
    }

    /// The engine finished preparing the current song.
    pub(crate) fn on_prepared(&mut self, duration_ms: u64) {
        if self.state != PlaybackState::Preparing {
            debug!("Ignoring prepared event in state {:?}", self.state);
            return;
        }

        self.duration_ms = duration_ms;
        self.position_ms = 0;

        self.request_focus();
        if let Err(e) = self.backend.start() {
            warn!("Failed to start playback: {:#}", e);
            self.release_player();
            return;
        }

        self.state = PlaybackState::Playing;
        self.foreground = true;
        self.refresh_notification();
        self.notify_playback_state();
        self.notify_progress();
    }

    /// The current song played to its end.
    pub(crate) fn on_completion(&mut self) {
        if !self.state.is_prepared() {
            return;
        }

        match self.repeat {
            RepeatMode::One => {
                self.position_ms = 0;
                let restarted = self.backend.seek_to(0).and_then(|_| self.backend.start());
                if let Err(e) = restarted {
                    warn!("Failed to restart song: {:#}", e);
                }
            }
            RepeatMode::All => self.play_next(),
            RepeatMode::Off => {
                let has_more = match self.current {
                    Some(i) => i + 1 < self.songs.len(),
                    None => !self.songs.is_empty(),
                };
                if has_more {
                    self.play_next();
                } else {
                    self.stop();
                }
            }
        }
    }

    /// The engine failed, the player is torn down and nothing is reported.
    pub(crate) fn on_error(&mut self, message: &str) {
        warn!("Playback error: {}", message);
        self.release_player();
    }

    pub(crate) fn on_position(&mut self, position_ms: u64) {
        if self.state.is_prepared() {
            self.position_ms = position_ms;
        }
    }

    pub(crate) fn on_duration(&mut self, duration_ms: u64) {
        if self.state.is_prepared() {
            self.duration_ms = duration_ms;
        }
    }

    pub(crate) fn pause(&mut self) {
        if self.state != PlaybackState::Playing {
            return;
        }

        if let Err(e) = self.backend.pause() {
            warn!("Failed to pause: {:#}", e);
        }

        self.state = PlaybackState::Paused;
        self.foreground = false;
        self.refresh_notification();
        self.notify_playback_state();
    }

    pub(crate) fn resume(&mut self) {
        if self.state != PlaybackState::Paused {
            return;
        }

        self.request_focus();
        if let Err(e) = self.backend.start() {
            warn!("Failed to resume: {:#}", e);
            return;
        }

        self.state = PlaybackState::Playing;
        self.foreground = true;
        self.refresh_notification();
        self.notify_playback_state();
        self.notify_progress();
    }

    /// Pauses when playing, otherwise resumes, starting from the first song
    /// when nothing has been selected yet.
    pub(crate) fn toggle_play_pause(&mut self) {
        if self.is_playing() {
            self.pause();
        } else if self.song.is_none() && !self.songs.is_empty() {
            self.play_song(0);
        } else {
            self.resume();
        }
    }

    /// Tears down playback entirely.
    pub(crate) fn stop(&mut self) {
        self.release_player();
        self.focus.abandon();

        self.foreground = false;
        self.notification = None;
        self.session.clear();

        self.notify_playback_state();
        self.active = false;

        info!("Playback stopped");
    }

    pub(crate) fn play_next(&mut self) {
        let len = self.songs.len();
        if len == 0 {
            return;
        }

        let index = if self.shuffle {
            rand::random_range(0..len)
        } else {
            self.current.map_or(0, |i| (i + 1) % len)
        };

        self.play_song(index);
    }

    /// Steps back one song, wrapping to the end. Shuffle is not applied.
    pub(crate) fn play_previous(&mut self) {
        let len = self.songs.len();
        if len == 0 {
            return;
        }

        let index = match self.current {
            Some(i) if i > 0 => i - 1,
            _ => len - 1,
        };

        self.play_song(index);
    }

    pub(crate) fn seek_to(&mut self, position_ms: u64) {
        if !self.state.is_prepared() {
            return;
        }

        match self.backend.seek_to(position_ms) {
            Ok(()) => {
                self.position_ms = position_ms;
                self.notify_progress();
            }
            Err(e) => warn!("Failed to seek: {:#}", e),
        }
    }

    /// Seeks to a proportion of the song, `percent` in `0..=100`.
    pub(crate) fn seek_to_percent(&mut self, percent: u8) {
        let percent = u64::from(percent.min(100));
        self.seek_to(self.duration() * percent / 100);
    }

    pub(crate) fn toggle_shuffle(&mut self) -> bool {
        self.shuffle = !self.shuffle;
        self.shuffle
    }

    pub(crate) fn toggle_repeat(&mut self) -> RepeatMode {
        self.repeat = self.repeat.next();
        self.repeat
    }

    pub(crate) fn on_audio_focus_change(&mut self, change: FocusChange) {
        debug!(?change, "Audio focus changed");

        match change {
            FocusChange::Gain => {
                if !self.is_playing() {
                    self.resume();
                }
                self.set_volume(FULL_VOLUME);
            }
            FocusChange::Loss => self.stop(),
            FocusChange::LossTransient => {
                if self.is_playing() {
                    self.pause();
                }
            }
            FocusChange::LossTransientCanDuck => self.set_volume(DUCKED_VOLUME),
        }
    }

    /// Runs one of the named external control actions.
    pub(crate) fn handle_action(&mut self, action: ControlAction) {
        debug!(%action, "Control action");

        match action {
            ControlAction::Play => self.resume(),
            ControlAction::Pause => self.pause(),
            ControlAction::Previous => self.play_previous(),
            ControlAction::Next => self.play_next(),
            ControlAction::Stop => self.stop(),
        }
    }

    pub(crate) fn current_position(&self) -> u64 {
        if self.state.is_prepared() {
            self.position_ms
        } else {
            0
        }
    }

    pub(crate) fn duration(&self) -> u64 {
        if self.state.is_prepared() {
            self.duration_ms
        } else {
            0
        }
    }

    pub(crate) fn current_song(&self) -> Option<&Song> {
        self.song.as_ref()
    }

    pub(crate) fn current_index(&self) -> Option<usize> {
        self.current
    }

    pub(crate) fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    pub(crate) fn is_shuffle(&self) -> bool {
        self.shuffle
    }

    pub(crate) fn repeat_mode(&self) -> RepeatMode {
        self.repeat
    }

    pub(crate) fn state(&self) -> PlaybackState {
        self.state
    }

    pub(crate) fn notification(&self) -> Option<&Notification> {
        self.notification.as_ref()
    }

    pub(crate) fn is_foreground(&self) -> bool {
        self.foreground
    }

    pub(crate) fn is_active(&self) -> bool {
        self.active
    }

    fn release_player(&mut self) {
        if let Err(e) = self.backend.release() {
            warn!("Failed to release player: {:#}", e);
        }

        self.state = PlaybackState::Idle;
        self.position_ms = 0;
        self.duration_ms = 0;
    }

    fn request_focus(&mut self) {
        if !self.focus.request() {
            warn!("Audio focus request was not granted");
        }
    }

    fn set_volume(&mut self, volume: f32) {
        if let Err(e) = self.backend.set_volume(volume) {
            warn!("Failed to set volume: {:#}", e);
        }
    }

    fn refresh_notification(&mut self) {
        let playing = self.is_playing();
        let Some(song) = self.song.as_ref() else {
            return;
        };

        let notification = Notification::for_song(song, playing);
        self.session.publish(&notification, song);
        self.notification = Some(notification);
    }

    fn notify_playback_state(&self) {
        if let Some(observer) = &self.observer {
            observer.on_playback_state(self.is_playing(), self.current_song());
        }
    }

    fn notify_progress(&self) {
        if let Some(observer) = &self.observer {
            observer.on_progress(self.current_position(), self.duration());
        }
    }
}
