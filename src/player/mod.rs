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

//! Audio engine.
//!
//! This module provides [`MpvPlayer`], the [`MediaBackend`] used by the
//! playback service. It manages a background worker thread that interfaces
//! with the underlying audio library (MPV), ensuring that heavy audio
//! operations do not block the main application thread.
//!
//! Loading is asynchronous: [`MpvPlayer::prepare`] only queues the file, the
//! worker reports [`PlayerEvent::Prepared`] once MPV has opened it.

mod commands;

use std::sync::mpsc;

use anyhow::Result;

use crate::{events::AppEvent, model::Song, player::commands::AudioPlayerCommand, service::MediaBackend};

/// Notifications from the audio worker, delivered on the application event
/// channel.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum PlayerEvent {
    /// The loaded file is ready, with its duration in milliseconds.
    Prepared(u64),
    Position(u64),
    Duration(u64),
    Completed,
    Error(String),
}

/// A handle to the audio playback engine.
///
/// This struct acts as a command proxy; it does not perform audio processing
/// itself but instead sends instructions to a background worker thread.
pub(crate) struct MpvPlayer {
    command_tx: mpsc::Sender<AudioPlayerCommand>,
}

impl MpvPlayer {
    /// Spawns the audio worker thread and returns a new player handle.
    ///
    /// # Arguments
    ///
    /// * `event_tx` - A channel to send engine events (preparation, progress,
    ///   completion and errors) back to the main event loop.
    pub(crate) fn new(event_tx: mpsc::Sender<AppEvent>) -> Self {
        let (command_tx, command_rx) = mpsc::channel::<AudioPlayerCommand>();

        commands::spawn_player_worker(command_rx, event_tx);

        Self { command_tx }
    }

    fn send(&self, command: AudioPlayerCommand) -> Result<()> {
        self.command_tx.send(command)?;
        Ok(())
    }
}

impl MediaBackend for MpvPlayer {
    fn prepare(&mut self, song: &Song) -> Result<()> {
        if song.path.is_empty() {
            anyhow::bail!("{} has no file path", song.locator);
        }
        self.send(AudioPlayerCommand::Load(song.path.clone()))
    }

    fn start(&mut self) -> Result<()> {
        self.send(AudioPlayerCommand::SetPause(false))
    }

    fn pause(&mut self) -> Result<()> {
        self.send(AudioPlayerCommand::SetPause(true))
    }

    fn seek_to(&mut self, position_ms: u64) -> Result<()> {
        self.send(AudioPlayerCommand::SeekTo(position_ms))
    }

    fn set_volume(&mut self, volume: f32) -> Result<()> {
        self.send(AudioPlayerCommand::SetVolume(volume.clamp(0.0, 1.0)))
    }

    fn release(&mut self) -> Result<()> {
        self.send(AudioPlayerCommand::Stop)
    }
}
