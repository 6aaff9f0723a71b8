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

//! The now-playing notification.
//!
//! A notification is a snapshot of what the service is playing and which
//! transport actions are offered. It is shown in the player panel and
//! published to the media session.

use crate::{model::Song, service::ControlAction};

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Notification {
    pub(crate) title: String,
    pub(crate) text: String,
    pub(crate) playing: bool,
    /// Previous, play-or-pause, next.
    pub(crate) actions: [ControlAction; 3],
    /// Sent when the notification is dismissed.
    pub(crate) dismiss: ControlAction,
}

impl Notification {
    pub(crate) fn for_song(song: &Song, playing: bool) -> Self {
        let play_pause = if playing {
            ControlAction::Pause
        } else {
            ControlAction::Play
        };

        Self {
            title: song.display_title().to_string(),
            text: song.display_artist().to_string(),
            playing,
            actions: [ControlAction::Previous, play_pause, ControlAction::Next],
            dismiss: ControlAction::Stop,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::fixtures::song;

    #[test]
    fn playing_notification_offers_pause() {
        let n = Notification::for_song(&song(1, "Title", "", "", 60_000), true);

        assert_eq!(n.title, "Title");
        assert_eq!(n.text, "Unknown Artist");
        assert_eq!(
            n.actions,
            [ControlAction::Previous, ControlAction::Pause, ControlAction::Next]
        );
        assert_eq!(n.dismiss, ControlAction::Stop);
    }

    #[test]
    fn paused_notification_offers_play() {
        let n = Notification::for_song(&song(1, "Title", "Artist", "", 60_000), false);

        assert_eq!(n.actions[1], ControlAction::Play);
    }
}
