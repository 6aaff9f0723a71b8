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

//! MPV-backed audio worker and event processing.
//!
//! The worker owns the `libmpv` handle. It operates using a dual-channel
//! communication pattern:
//! 1. **Command Channel**: Receives [`AudioPlayerCommand`]s from
//!    [`MpvPlayer`](super::MpvPlayer).
//! 2. **Event Channel**: Broadcasts [`PlayerEvent`]s wrapped in
//!    [`AppEvent::Player`] to the application event loop.
//!
//! Files are loaded paused and kept open at their end (`keep-open`), so the
//! service decides when playback starts and a finished file can be replayed
//! by seeking back to the start.

use anyhow::{Context, Result};
use mpv::Format;
use std::{
    sync::mpsc::{self, Receiver, Sender},
    thread,
};
use tracing::debug;

use crate::{events::AppEvent, player::PlayerEvent};

const FULL_MPV_VOLUME: f32 = 100.0;

#[derive(Debug)]
pub(crate) enum AudioPlayerCommand {
    Load(String),
    SetPause(bool),
    SeekTo(u64),
    SetVolume(f32),
    Stop,
}

/// Tracks engine flags between events.
#[derive(Debug, Default)]
struct WorkerState {
    eof_reached: bool,
    duration_ms: u64,
}

/// Spawns the audio worker thread to process playback commands.
///
/// If the internal worker returns an error, it is caught here and broadcast as
/// a fatal application event.
pub(crate) fn spawn_player_worker(
    command_rx: Receiver<AudioPlayerCommand>,
    event_tx: Sender<AppEvent>,
) {
    let error_tx = event_tx.clone();

    thread::spawn(move || {
        if let Err(e) = audio_player_worker(command_rx, event_tx) {
            let _ = error_tx.send(AppEvent::FatalError(format!("MPV worker failure: {:?}", e)));
        }
    });
}

/// The primary execution loop for the audio player backend.
///
/// This function initializes a local `libmpv` context and alternates between
/// draining commands and waiting briefly for MPV events.
///
/// # Errors
///
/// Returns an error if the MPV context fails to initialize, or if the event
/// channel is closed.
fn audio_player_worker(
    command_rx: Receiver<AudioPlayerCommand>,
    event_tx: Sender<AppEvent>,
) -> Result<()> {
    let mut handler = (|| {
        let mut builder = mpv::MpvHandlerBuilder::new().context("Failed to create MPV builder")?;
        builder
            .set_option("vo", "null")
            .context("Failed to set no video output")?;
        builder
            .set_option("keep-open", "yes")
            .context("Failed to set keep-open")?;
        builder.build().context("Failed to build MPV handler")
    })()?;

    handler
        .observe_property::<f64>("duration", 0)
        .context("Failed to observe duration")?;
    handler
        .observe_property::<f64>("time-pos", 0)
        .context("Failed to observe time-pos")?;
    handler
        .observe_property::<bool>("eof-reached", 0)
        .context("Failed to observe eof-reached")?;

    let mut state = WorkerState::default();

    loop {
        if !process_commands(&mut handler, &mut state, &command_rx, &event_tx)? {
            return Ok(());
        }
        process_mpv_events(&mut handler, &mut state, &event_tx)?;
    }
}

/// Drains and executes all pending commands.
///
/// Returns `false` once the player handle has been dropped. A command MPV
/// rejects is reported as a [`PlayerEvent::Error`] rather than ending the
/// worker.
fn process_commands(
    handler: &mut mpv::MpvHandler,
    state: &mut WorkerState,
    command_rx: &Receiver<AudioPlayerCommand>,
    event_tx: &Sender<AppEvent>,
) -> Result<bool> {
    loop {
        let command = match command_rx.try_recv() {
            Ok(command) => command,
            Err(mpsc::TryRecvError::Empty) => return Ok(true),
            Err(mpsc::TryRecvError::Disconnected) => return Ok(false),
        };

        debug!(?command, "Player command");

        if matches!(command, AudioPlayerCommand::Load(_)) {
            state.duration_ms = 0;
        }

        if let Err(e) = run_command(handler, command) {
            event_tx
                .send(AppEvent::Player(PlayerEvent::Error(format!("{:#}", e))))
                .context("Failed to send player error")?;
        }
    }
}

fn run_command(handler: &mut mpv::MpvHandler, command: AudioPlayerCommand) -> Result<()> {
    match command {
        AudioPlayerCommand::Load(filename) => {
            handler.set_property("pause", true)?;
            handler
                .command(&["loadfile", &filename, "replace"])
                .context(format!("Failed to load file: {}", &filename))?;
        }
        AudioPlayerCommand::SetPause(pause) => {
            handler.set_property("pause", pause)?;
        }
        AudioPlayerCommand::SeekTo(position_ms) => {
            let seconds = position_ms as f64 / 1000.0;
            handler.command(&["seek", &seconds.to_string(), "absolute"])?;
        }
        AudioPlayerCommand::SetVolume(volume) => {
            handler.set_property("volume", f64::from(volume * FULL_MPV_VOLUME))?;
        }
        AudioPlayerCommand::Stop => {
            handler.command(&["stop"])?;
        }
    }

    Ok(())
}

/// Polls for MPV events and forwards the ones the service cares about.
///
/// This function waits for up to 50ms for an event from the MPV context.
fn process_mpv_events(
    handler: &mut mpv::MpvHandler,
    state: &mut WorkerState,
    event_tx: &Sender<AppEvent>,
) -> Result<()> {
    let Some(mpv_event) = handler.wait_event(0.05) else {
        return Ok(());
    };

    let player_event = match mpv_event {
        mpv::Event::FileLoaded => {
            state.eof_reached = false;
            Some(PlayerEvent::Prepared(state.duration_ms))
        }
        mpv::Event::PropertyChange { name, change, .. } => match (name, change) {
            ("duration", Format::Double(seconds)) => {
                state.duration_ms = seconds_to_ms(seconds);
                Some(PlayerEvent::Duration(state.duration_ms))
            }
            ("time-pos", Format::Double(seconds)) if seconds >= 0.0 => {
                Some(PlayerEvent::Position(seconds_to_ms(seconds)))
            }
            ("eof-reached", Format::Flag(reached)) => {
                let finished = reached && !state.eof_reached;
                state.eof_reached = reached;
                finished.then_some(PlayerEvent::Completed)
            }
            _ => None,
        },
        mpv::Event::EndFile(Ok(mpv::EndFileReason::MPV_END_FILE_REASON_ERROR)) => {
            Some(PlayerEvent::Error("MPV could not play the file".to_string()))
        }
        mpv::Event::EndFile(Err(e)) => Some(PlayerEvent::Error(format!("{:?}", e))),
        _ => None,
    };

    if let Some(event) = player_event {
        event_tx
            .send(AppEvent::Player(event))
            .context("Failed to send player event")?;
    }

    Ok(())
}

fn seconds_to_ms(seconds: f64) -> u64 {
    if seconds.is_finite() && seconds > 0.0 {
        (seconds * 1000.0).round() as u64
    } else {
        0
    }
}
