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

//! Control socket.
//!
//! Other processes drive playback by writing one message per line to a Unix
//! domain socket:
//!
//! ```text
//! play | pause | previous | next | stop
//! play library://audio/<id>
//! focus gain | focus loss | focus loss-transient | focus duck
//! ```
//!
//! Each line is answered with `ok` or `error: <reason>`. Accepted messages are
//! forwarded to the application event loop, which owns the playback service.

use std::{
    io::{BufRead, BufReader, Write},
    path::{Path, PathBuf},
    str::FromStr,
    sync::mpsc::Sender,
    thread,
};

#[cfg(unix)]
use std::os::unix::net::{UnixListener, UnixStream};

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use crate::{
    events::AppEvent,
    model::{ContentLocator, LocatorKind},
    service::{ControlAction, FocusChange, ParseActionError},
};

const SOCKET_NAME: &str = "tunebox.sock";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum RemoteMessage {
    Control(ControlAction),
    Focus(FocusChange),
    /// Play a specific song, by id.
    PlaySong(i64),
}

impl FromStr for RemoteMessage {
    type Err = ParseActionError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        match line.trim().split_once(char::is_whitespace) {
            Some(("focus", change)) => Ok(RemoteMessage::Focus(change.parse()?)),
            Some(("play", locator)) => match ContentLocator::parse(locator.trim())?.kind() {
                LocatorKind::Audio(id) => Ok(RemoteMessage::PlaySong(id)),
                LocatorKind::AlbumArt(_) => Err(ParseActionError::NotPlayable(locator.trim().to_string())),
            },
            _ => Ok(RemoteMessage::Control(line.parse()?)),
        }
    }
}

impl From<RemoteMessage> for AppEvent {
    fn from(message: RemoteMessage) -> Self {
        match message {
            RemoteMessage::Control(action) => AppEvent::Control(action),
            RemoteMessage::Focus(change) => AppEvent::AudioFocus(change),
            RemoteMessage::PlaySong(id) => AppEvent::PlaySong(id),
        }
    }
}

/// The default socket location, in the user's runtime directory when there
/// is one.
pub(crate) fn default_socket_path() -> PathBuf {
    dirs::runtime_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join(SOCKET_NAME)
}

/// A bound control socket. The socket file is removed on drop.
pub(crate) struct ControlSocket {
    path: PathBuf,
}

impl ControlSocket {
    /// Binds the socket and starts accepting connections on a background
    /// thread.
    ///
    /// # Errors
    ///
    /// Returns an error if another instance is already listening on `path`
    /// or the socket cannot be bound.
    #[cfg(unix)]
    pub(crate) fn bind(path: &Path, event_tx: Sender<AppEvent>) -> Result<Self> {
        if path.exists() {
            if UnixStream::connect(path).is_ok() {
                anyhow::bail!("Another instance is listening on {}", path.display());
            }
            std::fs::remove_file(path).context("Failed to remove stale control socket")?;
        }

        let listener = UnixListener::bind(path)
            .with_context(|| format!("Failed to bind control socket {}", path.display()))?;

        info!("Control socket listening on {}", path.display());

        thread::spawn(move || {
            for stream in listener.incoming() {
                match stream {
                    Ok(stream) => {
                        let event_tx = event_tx.clone();
                        thread::spawn(move || {
                            if let Err(e) = serve_client(stream, &event_tx) {
                                debug!("Control client closed: {:#}", e);
                            }
                        });
                    }
                    Err(e) => warn!("Control socket accept failed: {}", e),
                }
            }
        });

        Ok(Self {
            path: path.to_path_buf(),
        })
    }

    #[cfg(not(unix))]
    pub(crate) fn bind(_path: &Path, _event_tx: Sender<AppEvent>) -> Result<Self> {
        anyhow::bail!("Control socket requires a Unix platform")
    }
}

impl Drop for ControlSocket {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.path);
    }
}

#[cfg(unix)]
fn serve_client(stream: UnixStream, event_tx: &Sender<AppEvent>) -> Result<()> {
    let mut writer = stream.try_clone()?;
    let reader = BufReader::new(stream);

    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let reply = handle_line(&line, event_tx);
        writeln!(writer, "{}", reply)?;
    }

    Ok(())
}

fn handle_line(line: &str, event_tx: &Sender<AppEvent>) -> String {
    match line.parse::<RemoteMessage>() {
        Ok(message) => {
            debug!(?message, "Control message received");
            match event_tx.send(message.into()) {
                Ok(()) => "ok".to_string(),
                Err(_) => "error: player is shutting down".to_string(),
            }
        }
        Err(e) => format!("error: {}", e),
    }
}
