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

//! Media session publishing.
//!
//! [`MediaSession`] mirrors the playback notification to the desktop media
//! controls (MPRIS, Now Playing) through `souvlaki`, and turns the buttons
//! pressed there back into [`ControlAction`]s on the application event
//! channel.

use std::{
    sync::{Arc, Mutex, mpsc::Sender},
    time::Duration,
};

use souvlaki::{MediaControlEvent, MediaControls, MediaMetadata, MediaPlayback, PlatformConfig};
use tracing::{debug, warn};

use crate::{
    events::AppEvent,
    library::art::ArtCache,
    model::Song,
    service::{ControlAction, Notification, SessionSink},
};

const DISPLAY_NAME: &str = "Tunebox";
const DBUS_NAME: &str = "tunebox";

/// A session sink that publishes nothing.
#[derive(Debug, Default)]
pub(crate) struct NullSession;

impl SessionSink for NullSession {
    fn publish(&mut self, _notification: &Notification, _song: &Song) {}

    fn clear(&mut self) {}
}

pub(crate) struct MediaSession {
    controls: Option<MediaControls>,
    playing: Arc<Mutex<bool>>,
    art: ArtCache,
}

impl MediaSession {
    /// Connects to the platform media controls.
    ///
    /// If the platform backend cannot be created the session still works,
    /// it just publishes nothing.
    pub(crate) fn new(event_tx: Sender<AppEvent>, art: ArtCache) -> Self {
        let playing = Arc::new(Mutex::new(false));
        let controls = create_controls(event_tx, Arc::clone(&playing));

        Self {
            controls,
            playing,
            art,
        }
    }

    fn set_playing(&self, playing: bool) {
        match self.playing.lock() {
            Ok(mut state) => *state = playing,
            Err(poisoned) => *poisoned.into_inner() = playing,
        }
    }
}

impl SessionSink for MediaSession {
    fn publish(&mut self, notification: &Notification, song: &Song) {
        self.set_playing(notification.playing);

        let Some(controls) = self.controls.as_mut() else {
            return;
        };

        let cover_url = self
            .art
            .lookup(song.album_id)
            .map(|path| format!("file://{}", path.display()));
        let album = song.display_album();
        let duration = (song.duration_ms > 0).then(|| Duration::from_millis(song.duration_ms));

        let metadata = MediaMetadata {
            title: Some(notification.title.as_str()),
            artist: Some(notification.text.as_str()),
            album: Some(album),
            cover_url: cover_url.as_deref(),
            duration,
        };
        if let Err(e) = controls.set_metadata(metadata) {
            warn!("Failed to publish media metadata: {:?}", e);
            return;
        }

        let playback = if notification.playing {
            MediaPlayback::Playing { progress: None }
        } else {
            MediaPlayback::Paused { progress: None }
        };
        if let Err(e) = controls.set_playback(playback) {
            warn!("Failed to publish playback state: {:?}", e);
        }
    }

    fn clear(&mut self) {
        self.set_playing(false);

        if let Some(controls) = self.controls.as_mut() {
            if let Err(e) = controls.set_playback(MediaPlayback::Stopped) {
                warn!("Failed to clear playback state: {:?}", e);
            }
            let _ = controls.set_metadata(MediaMetadata::default());
        }
    }
}

#[cfg(not(target_os = "windows"))]
fn create_controls(event_tx: Sender<AppEvent>, playing: Arc<Mutex<bool>>) -> Option<MediaControls> {
    let mut controls = match MediaControls::new(PlatformConfig {
        display_name: DISPLAY_NAME,
        dbus_name: DBUS_NAME,
        hwnd: None,
    }) {
        Ok(controls) => controls,
        Err(e) => {
            warn!("Failed to create media controls backend: {:?}", e);
            return None;
        }
    };

    let attached = controls.attach(move |event| {
        let is_playing = match playing.lock() {
            Ok(state) => *state,
            Err(poisoned) => *poisoned.into_inner(),
        };

        if let Some(action) = map_control_event(event, is_playing) {
            debug!(%action, "Media control pressed");
            let _ = event_tx.send(AppEvent::Control(action));
        }
    });

    if let Err(e) = attached {
        warn!("Failed to attach media controls handler: {:?}", e);
        return None;
    }

    Some(controls)
}

#[cfg(target_os = "windows")]
fn create_controls(_event_tx: Sender<AppEvent>, _playing: Arc<Mutex<bool>>) -> Option<MediaControls> {
    // Needs a window handle, which a terminal application does not own.
    warn!("Media controls are not available on Windows");
    None
}

/// Maps a media key press onto a control action. Seeking, volume and window
/// requests are not supported.
fn map_control_event(event: MediaControlEvent, is_playing: bool) -> Option<ControlAction> {
    match event {
        MediaControlEvent::Play => Some(ControlAction::Play),
        MediaControlEvent::Pause => Some(ControlAction::Pause),
        MediaControlEvent::Toggle => Some(if is_playing {
            ControlAction::Pause
        } else {
            ControlAction::Play
        }),
        MediaControlEvent::Next => Some(ControlAction::Next),
        MediaControlEvent::Previous => Some(ControlAction::Previous),
        MediaControlEvent::Stop => Some(ControlAction::Stop),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use souvlaki::SeekDirection;

    use super::*;

    #[test]
    fn toggle_follows_the_playing_state() {
        assert_eq!(
            map_control_event(MediaControlEvent::Toggle, true),
            Some(ControlAction::Pause)
        );
        assert_eq!(
            map_control_event(MediaControlEvent::Toggle, false),
            Some(ControlAction::Play)
        );
    }

    #[test]
    fn transport_buttons_map_directly() {
        assert_eq!(map_control_event(MediaControlEvent::Next, false), Some(ControlAction::Next));
        assert_eq!(
            map_control_event(MediaControlEvent::Previous, true),
            Some(ControlAction::Previous)
        );
        assert_eq!(map_control_event(MediaControlEvent::Stop, true), Some(ControlAction::Stop));
    }

    #[test]
    fn seeking_is_ignored() {
        let event = MediaControlEvent::SeekBy(SeekDirection::Forward, Duration::from_secs(5));
        assert_eq!(map_control_event(event, true), None);
        assert_eq!(map_control_event(MediaControlEvent::Raise, true), None);
    }
}
