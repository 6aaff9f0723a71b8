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

//! Playback progress polling.
//!
//! While a song is playing the UI samples the service's position once a
//! second. The poller is a background thread that reschedules itself after
//! each tick and sends [`AppEvent::PollProgress`]; the event loop does the
//! actual reading, so the service is never touched off its own thread.

use std::{
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
        mpsc::Sender,
    },
    thread,
    time::Duration,
};

use tracing::trace;

use crate::events::AppEvent;

const POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Generation zero means stopped.
const STOPPED: u64 = 0;

pub(crate) struct ProgressPoller {
    event_tx: Sender<AppEvent>,
    interval: Duration,
    generation: Arc<AtomicU64>,
    last_generation: u64,
}

impl ProgressPoller {
    pub(crate) fn new(event_tx: Sender<AppEvent>) -> Self {
        Self::with_interval(event_tx, POLL_INTERVAL)
    }

    pub(crate) fn with_interval(event_tx: Sender<AppEvent>, interval: Duration) -> Self {
        Self {
            event_tx,
            interval,
            generation: Arc::new(AtomicU64::new(STOPPED)),
            last_generation: STOPPED,
        }
    }

    pub(crate) fn is_running(&self) -> bool {
        self.generation.load(Ordering::SeqCst) != STOPPED
    }

    /// Starts polling. Does nothing if already running.
    ///
    /// A thread left over from an earlier run notices the new generation and
    /// exits at its next wake-up, so there is never more than one live poll.
    pub(crate) fn start(&mut self) {
        if self.is_running() {
            return;
        }

        self.last_generation += 1;
        let mine = self.last_generation;
        self.generation.store(mine, Ordering::SeqCst);

        let generation = Arc::clone(&self.generation);
        let event_tx = self.event_tx.clone();
        let interval = self.interval;

        thread::spawn(move || {
            loop {
                thread::sleep(interval);

                if generation.load(Ordering::SeqCst) != mine {
                    break;
                }
                if event_tx.send(AppEvent::PollProgress).is_err() {
                    break;
                }
            }
            trace!(generation = mine, "Progress poller finished");
        });
    }

    pub(crate) fn stop(&mut self) {
        self.generation.store(STOPPED, Ordering::SeqCst);
    }
}

impl Drop for ProgressPoller {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc;

    use super::*;

    #[test]
    fn polls_until_stopped() {
        let (event_tx, event_rx) = mpsc::channel();
        let mut poller = ProgressPoller::with_interval(event_tx, Duration::from_millis(10));

        poller.start();
        assert!(poller.is_running());
        assert!(matches!(
            event_rx.recv_timeout(Duration::from_secs(1)),
            Ok(AppEvent::PollProgress)
        ));

        poller.stop();
        assert!(!poller.is_running());

        thread::sleep(Duration::from_millis(50));
        while event_rx.try_recv().is_ok() {}
        assert!(event_rx.recv_timeout(Duration::from_millis(50)).is_err());
    }

    #[test]
    fn starting_twice_keeps_one_poll() {
        let (event_tx, _event_rx) = mpsc::channel();
        let mut poller = ProgressPoller::with_interval(event_tx, Duration::from_millis(10));

        poller.start();
        poller.start();

        assert_eq!(poller.generation.load(Ordering::SeqCst), 1);
    }
}
