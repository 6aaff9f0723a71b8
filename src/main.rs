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

//! # Tunebox.
//!
//! A terminal music player for the songs in your local library.
//!
//! This application coordinates a TUI frontend built with `ratatui`, a
//! playback service driving an MPV audio worker, and a background task
//! worker that owns the media index.
//!
//! It uses an event-driven architecture where:
//!
//! * The **Main Thread** manages the terminal lifecycle, renders the UI and
//!   is the only thread that touches the playback service.
//! * **Background Workers** handle media index queries, library scans, album
//!   art and audio, reporting back as events.
//! * **Event Sources** capture user input, terminal changes, system ticks,
//!   progress polls, media keys and control socket messages.
//!
//! ## Architecture
//!
//! The application follows a strict setup-run-teardown pattern to ensure the
//! terminal state is preserved even in the event of a crash. Communication
//! between the UI and background workers is handled via `std::sync::mpsc`
//! channels.

mod access;
mod components;
mod config;
mod db;
mod events;
mod library;
mod logging;
mod model;
mod player;
mod poller;
mod render;
mod service;
mod session;
mod tasks;
mod theme;
mod util;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, DisableFocusChange, EnableFocusChange},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::{
    io::{self},
    path::PathBuf,
    sync::mpsc::{self, Receiver, Sender},
    thread,
    time::{Duration, Instant},
};
use tracing::{info, warn};

use crate::{
    components::{Dialog, Menu, SearchBar, SongTable},
    config::AppConfig,
    events::{AppEvent, process_events},
    library::{SortOrder, art::ArtCache},
    model::Song,
    player::MpvPlayer,
    poller::ProgressPoller,
    service::{MusicService, SessionSink, SharedFocus, remote::ControlSocket},
    session::{MediaSession, NullSession},
    tasks::AppTask,
    theme::Theme,
};

const TICK_INTERVAL: Duration = Duration::from_millis(250);
const TOAST_DURATION: Duration = Duration::from_secs(3);
const INPUT_RETRY_DELAY: Duration = Duration::from_millis(100);
const MAX_INPUT_FAILURES: u32 = 10;

/// What fills the main area.
#[derive(Debug, PartialEq)]
enum Screen {
    /// The media directories cannot be read; the reason is shown.
    AccessDenied(String),
    Loading,
    Empty,
    Songs,
}

/// A short message in the status line.
struct Toast {
    message: String,
    error: bool,
    expires: Instant,
}

/// Application state.
struct App {
    pub config: AppConfig,

    pub theme: Theme,
    pub screen: Screen,

    pub event_tx: Sender<AppEvent>,
    pub event_rx: Receiver<AppEvent>,

    pub task_tx: Sender<AppTask>,

    pub service: MusicService,
    pub poller: ProgressPoller,
    pub control_socket: Option<ControlSocket>,

    /// Songs as loaded, before search and ordering.
    pub songs: Vec<Song>,
    pub sort_order: SortOrder,
    pub list_shuffled: bool,

    pub song_table: SongTable,
    pub search: SearchBar,
    pub menu: Option<Menu>,
    pub dialog: Option<Dialog>,
    pub toast: Option<Toast>,
    pub scan_progress: Option<i64>,

    pub player_playing: bool,
    pub now_playing: Option<Song>,
    pub player_time_ms: u64,
    pub player_duration_ms: u64,
}

impl App {
    /// Create a new instance of application state.
    pub fn new(config: AppConfig, task_tx: Sender<AppTask>, art: ArtCache) -> Self {
        let (event_tx, event_rx) = mpsc::channel();

        let session: Box<dyn SessionSink> = if config.media_controls {
            Box::new(MediaSession::new(event_tx.clone(), art))
        } else {
            Box::new(NullSession)
        };

        let service = MusicService::new(
            Box::new(MpvPlayer::new(event_tx.clone())),
            Box::new(SharedFocus::default()),
            session,
        );

        Self::with_service(config, task_tx, event_tx, event_rx, service)
    }

    /// Builds the application state around an existing playback service,
    /// whose events arrive on `event_rx`.
    pub fn with_service(
        config: AppConfig,
        task_tx: Sender<AppTask>,
        event_tx: Sender<AppEvent>,
        event_rx: Receiver<AppEvent>,
        service: MusicService,
    ) -> Self {
        Self {
            config,
            theme: Theme::default(),
            screen: Screen::Loading,
            poller: ProgressPoller::new(event_tx.clone()),
            event_tx,
            event_rx,
            task_tx,
            service,
            control_socket: None,
            songs: vec![],
            sort_order: SortOrder::default(),
            list_shuffled: false,
            song_table: SongTable::new(),
            search: SearchBar::default(),
            menu: None,
            dialog: None,
            toast: None,
            scan_progress: None,
            player_playing: false,
            now_playing: None,
            player_time_ms: 0,
            player_duration_ms: 0,
        }
    }

    pub fn show_toast(&mut self, message: impl Into<String>) {
        self.toast = Some(Toast {
            message: message.into(),
            error: false,
            expires: Instant::now() + TOAST_DURATION,
        });
    }

    pub fn show_error(&mut self, message: impl Into<String>) {
        self.toast = Some(Toast {
            message: message.into(),
            error: true,
            expires: Instant::now() + TOAST_DURATION,
        });
    }
}

/// The entry point of the application.
///
/// Sets up the communication channels, initializes the application state,
/// manages the terminal lifecycle, and returns an error if any part of the
/// execution fails.
fn main() -> Result<()> {
    let config = config::load_config();

    let _log_guard = logging::init_logging(&config.log_dir).context("Failed to initialise logging")?;
    info!(version = env!("CARGO_PKG_VERSION"), "Starting");

    let art = ArtCache::new(ArtCache::default_dir());

    let (task_tx, task_rx) = mpsc::channel();
    let mut app = App::new(config, task_tx, art.clone());

    let mut terminal = setup_terminal(&app)?;
    let res = run(&mut terminal, &mut app, task_rx, art);
    shutdown(&mut app);
    restore_terminal(&mut terminal);

    if let Err(e) = &res {
        tracing::error!("Application error: {:#}", e);
    }

    res.context("Application error occurred")
}

/// Prepares the terminal for the TUI application.
///
/// This function performs the following side effects:
/// * Sets the terminal background color based on the provided theme.
/// * Enables raw mode to capture all keyboard input.
/// * Switches the terminal to the alternate screen buffer and asks for focus
///   change events.
///
/// # Errors
///
/// Returns an error if raw mode cannot be enabled or if the alternate screen
/// cannot be entered.
fn setup_terminal(app: &App) -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    util::term::set_terminal_bg(app.theme.background_colour);

    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableFocusChange)
        .context("Failed to enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend).context("Failed to create terminal")?;

    Ok(terminal)
}

/// Restores the terminal to its original state.
///
/// This reverses the changes made by [`setup_terminal`], including disabling
/// raw mode, leaving the alternate screen, and resetting the background color.
/// It also ensures the cursor is made visible again.
///
/// This function is best-effort and does not return a result, as it is
/// called during cleanup.
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) {
    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), DisableFocusChange, LeaveAlternateScreen).ok();
    util::term::reset_terminal_bg();
    terminal.show_cursor().ok();
}

/// Starts the application's background workers and enters the main event loop.
///
/// This function spawns several long-running background threads:
/// * A task worker to process [`AppTask`]s against the media index.
/// * An input thread to poll for key presses and terminal changes.
/// * A tick thread to trigger periodic UI refreshes.
///
/// It then binds the control socket, checks the media directories can be
/// read and hands control to [`process_events`].
///
/// # Errors
///
/// Returns an error if the event processing loop encounters an unrecoverable
/// application error.
fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    task_rx: Receiver<AppTask>,
    art: ArtCache,
) -> Result<()> {
    tasks::spawn_task_worker(&app.config, art, task_rx, app.event_tx.clone());

    // Translate raw terminal events to application events.
    let tx_input = app.event_tx.clone();
    thread::spawn(move || forward_terminal_events(event::read, &tx_input));

    // The tick is the minimum "frame rate" for rendering the TUI application.
    let tx_tick = app.event_tx.clone();
    thread::spawn(move || {
        while tx_tick.send(AppEvent::Tick).is_ok() {
            thread::sleep(TICK_INTERVAL);
        }
    });

    let socket_path = app
        .config
        .control_socket
        .as_ref()
        .map(PathBuf::from)
        .unwrap_or_else(service::remote::default_socket_path);
    match ControlSocket::bind(&socket_path, app.event_tx.clone()) {
        Ok(socket) => app.control_socket = Some(socket),
        Err(e) => warn!("Control socket unavailable: {:#}", e),
    }

    events::check_access_and_load(app)?;

    process_events(terminal, app)
}

/// Reads terminal events until the application goes away.
///
/// Read errors are retried after a short pause. After too many in a row the
/// application is told input is gone.
fn forward_terminal_events(
    mut read: impl FnMut() -> io::Result<event::Event>,
    event_tx: &Sender<AppEvent>,
) {
    let mut failures = 0;

    loop {
        let sent = match read() {
            Ok(event::Event::Key(key)) => event_tx.send(AppEvent::Key(key)),
            Ok(event::Event::Resize(..) | event::Event::FocusGained) => {
                event_tx.send(AppEvent::Resumed)
            }
            Ok(_) => Ok(()),
            Err(e) => {
                failures += 1;
                if failures >= MAX_INPUT_FAILURES {
                    let _ = event_tx.send(AppEvent::FatalError(format!("Terminal input failed: {}", e)));
                    return;
                }
                warn!("Failed to read terminal event: {}", e);
                thread::sleep(INPUT_RETRY_DELAY);
                continue;
            }
        };

        failures = 0;
        if sent.is_err() {
            return;
        }
    }
}

/// Stops everything that outlives the event loop, in order: progress polling,
/// the service's observer, playback itself and the control socket.
fn shutdown(app: &mut App) {
    app.poller.stop();
    app.service.set_observer(None);
    app.service.stop();
    app.control_socket = None;

    info!("Shut down");
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    use super::*;

    #[test]
    fn terminal_events_become_app_events() {
        let (event_tx, event_rx) = mpsc::channel();
        let mut events = vec![
            Ok(event::Event::Key(KeyEvent::new(KeyCode::Char('n'), KeyModifiers::NONE))),
            Ok(event::Event::FocusGained),
        ]
        .into_iter();

        forward_terminal_events(
            || events.next().unwrap_or_else(|| Err(io::Error::other("closed"))),
            &event_tx,
        );

        assert!(matches!(event_rx.try_recv(), Ok(AppEvent::Key(_))));
        assert!(matches!(event_rx.try_recv(), Ok(AppEvent::Resumed)));
        assert!(matches!(event_rx.try_recv(), Ok(AppEvent::FatalError(_))));
        assert!(event_rx.try_recv().is_err());
    }

    #[test]
    fn repeated_read_errors_end_the_input_thread() {
        let (event_tx, event_rx) = mpsc::channel();
        let mut reads = 0;

        forward_terminal_events(
            || {
                reads += 1;
                Err(io::Error::other("no tty"))
            },
            &event_tx,
        );

        assert_eq!(reads, MAX_INPUT_FAILURES);
        assert!(matches!(
            event_rx.try_recv(),
            Ok(AppEvent::FatalError(message)) if message.contains("no tty")
        ));
    }
}
