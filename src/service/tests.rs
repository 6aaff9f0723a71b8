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

use std::{cell::RefCell, rc::Rc};

use anyhow::{Result, bail};

use super::*;
use crate::model::fixtures::titled;

#[derive(Debug, Clone, PartialEq)]
enum Call {
    Prepare(i64),
    Start,
    Pause,
    Seek(u64),
    Volume(f32),
    Release,
    Request,
    Abandon,
    Publish(String, bool),
    Clear,
    State(bool, Option<i64>),
    Progress(u64, u64),
}

type Log = Rc<RefCell<Vec<Call>>>;

struct FakeBackend {
    log: Log,
    fail_prepare: Rc<RefCell<bool>>,
}

impl MediaBackend for FakeBackend {
    fn prepare(&mut self, song: &Song) -> Result<()> {
        if *self.fail_prepare.borrow() {
            bail!("unsupported format");
        }
        self.log.borrow_mut().push(Call::Prepare(song.id));
        Ok(())
    }

    fn start(&mut self) -> Result<()> {
        self.log.borrow_mut().push(Call::Start);
        Ok(())
    }

    fn pause(&mut self) -> Result<()> {
        self.log.borrow_mut().push(Call::Pause);
        Ok(())
    }

    fn seek_to(&mut self, position_ms: u64) -> Result<()> {
        self.log.borrow_mut().push(Call::Seek(position_ms));
        Ok(())
    }

    fn set_volume(&mut self, volume: f32) -> Result<()> {
        self.log.borrow_mut().push(Call::Volume(volume));
        Ok(())
    }

    fn release(&mut self) -> Result<()> {
        self.log.borrow_mut().push(Call::Release);
        Ok(())
    }
}

struct FakeFocus(Log);

impl AudioFocus for FakeFocus {
    fn request(&mut self) -> bool {
        self.0.borrow_mut().push(Call::Request);
        true
    }

    fn abandon(&mut self) {
        self.0.borrow_mut().push(Call::Abandon);
    }
}

struct FakeSession(Log);

impl SessionSink for FakeSession {
    fn publish(&mut self, notification: &Notification, _song: &Song) {
        self.0
            .borrow_mut()
            .push(Call::Publish(notification.title.clone(), notification.playing));
    }

    fn clear(&mut self) {
        self.0.borrow_mut().push(Call::Clear);
    }
}

struct FakeObserver(Log);

impl PlaybackObserver for FakeObserver {
    fn on_playback_state(&self, playing: bool, song: Option<&Song>) {
        self.0
            .borrow_mut()
            .push(Call::State(playing, song.map(|s| s.id)));
    }

    fn on_progress(&self, position_ms: u64, duration_ms: u64) {
        self.0.borrow_mut().push(Call::Progress(position_ms, duration_ms));
    }
}

struct Harness {
    service: MusicService,
    log: Log,
    fail_prepare: Rc<RefCell<bool>>,
}

impl Harness {
    fn with_songs(count: i64) -> Self {
        let log: Log = Rc::default();
        let fail_prepare = Rc::new(RefCell::new(false));

        let mut service = MusicService::new(
            Box::new(FakeBackend {
                log: Rc::clone(&log),
                fail_prepare: Rc::clone(&fail_prepare),
            }),
            Box::new(FakeFocus(Rc::clone(&log))),
            Box::new(FakeSession(Rc::clone(&log))),
        );
        service.set_observer(Some(Box::new(FakeObserver(Rc::clone(&log)))));
        service.set_songs((0..count).map(|i| titled(i, &format!("song {i}"))).collect());

        Self {
            service,
            log,
            fail_prepare,
        }
    }

    /// Plays `index` through to the playing state.
    fn playing(mut self, index: usize) -> Self {
        self.service.play_song(index);
        self.service.on_prepared(180_000);
        self.log.borrow_mut().clear();
        self
    }

    fn calls(&self) -> Vec<Call> {
        self.log.borrow().clone()
    }
}

#[test]
fn play_next_on_empty_list_is_a_no_op() {
    let mut h = Harness::with_songs(0);

    h.service.play_next();
    h.service.play_previous();

    assert_eq!(h.service.state(), PlaybackState::Idle);
    assert_eq!(h.service.current_index(), None);
    assert!(h.calls().is_empty());
}

#[test]
fn play_next_cycles_through_the_list() {
    let mut h = Harness::with_songs(3);

    let mut seen = vec![];
    for _ in 0..4 {
        h.service.play_next();
        seen.push(h.service.current_index().unwrap());
    }

    assert_eq!(seen, vec![0, 1, 2, 0]);
}

#[test]
fn play_previous_wraps_to_the_last_song() {
    let mut h = Harness::with_songs(3).playing(0);

    h.service.play_previous();

    assert_eq!(h.service.current_index(), Some(2));
}

#[test]
fn play_previous_ignores_shuffle() {
    let mut h = Harness::with_songs(5).playing(3);
    h.service.toggle_shuffle();

    h.service.play_previous();

    assert_eq!(h.service.current_index(), Some(2));
}

#[test]
fn shuffled_next_stays_in_bounds() {
    let mut h = Harness::with_songs(4);
    assert!(h.service.toggle_shuffle());

    for _ in 0..50 {
        h.service.play_next();
        assert!(h.service.current_index().unwrap() < 4);
    }
}

#[test]
fn play_song_ignores_out_of_bounds_index() {
    let mut h = Harness::with_songs(2);

    h.service.play_song(2);

    assert_eq!(h.service.current_index(), None);
    assert!(h.calls().is_empty());
}

#[test]
fn play_song_releases_then_prepares() {
    let mut h = Harness::with_songs(2);

    h.service.play_song(1);

    assert_eq!(h.calls(), vec![Call::Release, Call::Prepare(1)]);
    assert_eq!(h.service.state(), PlaybackState::Preparing);
    assert!(!h.service.is_playing());
    assert_eq!(h.service.duration(), 0);
}

#[test]
fn prepared_song_starts_with_focus_notification_and_callbacks() {
    let mut h = Harness::with_songs(2);
    h.service.play_song(0);
    h.log.borrow_mut().clear();

    h.service.on_prepared(200_000);

    assert_eq!(
        h.calls(),
        vec![
            Call::Request,
            Call::Start,
            Call::Publish("song 0".to_string(), true),
            Call::State(true, Some(0)),
            Call::Progress(0, 200_000),
        ]
    );
    assert!(h.service.is_playing());
    assert!(h.service.is_foreground());
    assert_eq!(h.service.duration(), 200_000);
    assert_eq!(
        h.service.notification().unwrap().actions[1],
        ControlAction::Pause
    );
}

#[test]
fn setup_failure_leaves_the_song_selected_but_idle() {
    let mut h = Harness::with_songs(2);
    *h.fail_prepare.borrow_mut() = true;

    h.service.play_song(1);

    assert_eq!(h.service.state(), PlaybackState::Idle);
    assert_eq!(h.service.current_index(), Some(1));

    // A late prepared event must not start anything.
    h.service.on_prepared(1_000);
    assert!(!h.service.is_playing());
}

#[test]
fn repeat_one_restarts_the_same_song() {
    let mut h = Harness::with_songs(3).playing(1);
    h.service.toggle_repeat();
    assert_eq!(h.service.toggle_repeat(), RepeatMode::One);

    h.service.on_completion();

    assert_eq!(h.service.current_index(), Some(1));
    assert_eq!(h.calls(), vec![Call::Seek(0), Call::Start]);
    assert!(h.service.is_playing());
}

#[test]
fn repeat_all_wraps_from_the_last_song() {
    let mut h = Harness::with_songs(3).playing(2);
    assert_eq!(h.service.toggle_repeat(), RepeatMode::All);

    h.service.on_completion();

    assert_eq!(h.service.current_index(), Some(0));
    assert_eq!(h.service.state(), PlaybackState::Preparing);
}

#[test]
fn repeat_off_advances_while_songs_remain() {
    let mut h = Harness::with_songs(3).playing(0);

    h.service.on_completion();

    assert_eq!(h.service.current_index(), Some(1));
    assert_eq!(h.service.state(), PlaybackState::Preparing);
}

#[test]
fn repeat_off_stops_after_the_last_song() {
    let mut h = Harness::with_songs(3).playing(2);

    h.service.on_completion();

    assert_eq!(h.service.state(), PlaybackState::Idle);
    assert!(!h.service.is_active());
    assert!(h.service.notification().is_none());
    assert!(h.calls().contains(&Call::Abandon));
    assert!(h.calls().contains(&Call::Clear));
}

#[test]
fn toggle_repeat_cycles_in_one_order() {
    let mut h = Harness::with_songs(0);

    let modes: Vec<RepeatMode> = (0..6).map(|_| h.service.toggle_repeat()).collect();

    assert_eq!(
        modes,
        vec![
            RepeatMode::All,
            RepeatMode::One,
            RepeatMode::Off,
            RepeatMode::All,
            RepeatMode::One,
            RepeatMode::Off
        ]
    );
}

#[test]
fn pause_and_resume_only_apply_in_matching_state() {
    let mut h = Harness::with_songs(2);

    h.service.pause();
    h.service.resume();
    assert!(h.calls().is_empty());

    let mut h = h.playing(0);
    h.service.resume();
    assert!(h.calls().is_empty());

    h.service.pause();
    assert_eq!(h.service.state(), PlaybackState::Paused);
    assert!(!h.service.is_foreground());
    assert_eq!(
        h.calls(),
        vec![
            Call::Pause,
            Call::Publish("song 0".to_string(), false),
            Call::State(false, Some(0)),
        ]
    );

    h.log.borrow_mut().clear();
    h.service.resume();
    assert!(h.service.is_playing());
    assert_eq!(h.calls()[..2], [Call::Request, Call::Start]);
}

#[test]
fn toggle_play_pause_starts_from_the_first_song() {
    let mut h = Harness::with_songs(3);

    h.service.toggle_play_pause();

    assert_eq!(h.service.current_index(), Some(0));
    assert_eq!(h.service.state(), PlaybackState::Preparing);
}

#[test]
fn stop_tears_everything_down() {
    let mut h = Harness::with_songs(2).playing(1);

    h.service.stop();

    assert_eq!(
        h.calls(),
        vec![Call::Release, Call::Abandon, Call::Clear, Call::State(false, Some(1))]
    );
    assert_eq!(h.service.current_position(), 0);
    assert_eq!(h.service.duration(), 0);
    assert!(!h.service.is_foreground());
}

#[test]
fn error_releases_without_reporting() {
    let mut h = Harness::with_songs(2).playing(0);

    h.service.on_error("decoder failed");

    assert_eq!(h.calls(), vec![Call::Release]);
    assert_eq!(h.service.state(), PlaybackState::Idle);

    // Completion after the error is ignored.
    h.service.on_completion();
    assert_eq!(h.service.current_index(), Some(0));
}

#[test]
fn seek_percent_maps_onto_duration() {
    let mut h = Harness::with_songs(1).playing(0);

    h.service.seek_to_percent(50);
    assert_eq!(h.service.current_position(), 90_000);

    h.service.seek_to_percent(200);
    assert_eq!(h.service.current_position(), 180_000);

    assert_eq!(h.calls()[0], Call::Seek(90_000));
}

#[test]
fn seek_before_prepared_is_ignored() {
    let mut h = Harness::with_songs(1);
    h.service.play_song(0);
    h.log.borrow_mut().clear();

    h.service.seek_to(5_000);

    assert!(h.calls().is_empty());
    assert_eq!(h.service.current_position(), 0);
}

#[test]
fn focus_changes_pause_duck_and_stop() {
    let mut h = Harness::with_songs(2).playing(0);

    h.service.on_audio_focus_change(FocusChange::LossTransientCanDuck);
    assert_eq!(h.calls(), vec![Call::Volume(0.3)]);
    assert!(h.service.is_playing());

    h.service.on_audio_focus_change(FocusChange::LossTransient);
    assert_eq!(h.service.state(), PlaybackState::Paused);

    h.service.on_audio_focus_change(FocusChange::Gain);
    assert!(h.service.is_playing());
    assert_eq!(h.calls().last(), Some(&Call::Volume(1.0)));

    h.service.on_audio_focus_change(FocusChange::Loss);
    assert_eq!(h.service.state(), PlaybackState::Idle);
    assert!(!h.service.is_active());
}

#[test]
fn control_actions_map_onto_operations() {
    let mut h = Harness::with_songs(3).playing(0);

    h.service.handle_action(ControlAction::Pause);
    assert_eq!(h.service.state(), PlaybackState::Paused);

    h.service.handle_action(ControlAction::Play);
    assert!(h.service.is_playing());

    h.service.handle_action(ControlAction::Next);
    assert_eq!(h.service.current_index(), Some(1));

    h.service.handle_action(ControlAction::Previous);
    assert_eq!(h.service.current_index(), Some(0));

    h.service.handle_action(ControlAction::Stop);
    assert_eq!(h.service.state(), PlaybackState::Idle);
}

#[test]
fn positions_are_zero_unless_prepared() {
    let mut h = Harness::with_songs(1);

    h.service.on_position(10_000);
    assert_eq!(h.service.current_position(), 0);

    let mut h = h.playing(0);
    h.service.on_position(10_000);
    h.service.on_duration(181_000);
    assert_eq!(h.service.current_position(), 10_000);
    assert_eq!(h.service.duration(), 181_000);
}

#[test]
fn shrinking_the_list_clears_a_stale_selection() {
    let mut h = Harness::with_songs(3).playing(2);
    h.service.stop();

    h.service.set_songs(vec![titled(9, "only")]);

    assert_eq!(h.service.current_index(), None);
    assert_eq!(h.service.current_song(), None);
}

#[test]
fn filtering_out_the_playing_song_keeps_it_playing() {
    let mut h = Harness::with_songs(3).playing(0);

    h.service.set_songs(vec![titled(1, "song 1"), titled(2, "song 2")]);

    assert_eq!(h.service.current_index(), None);
    assert_eq!(h.service.current_song().map(|s| s.id), Some(0));
    assert!(h.service.is_playing());

    h.service.pause();
    assert_eq!(
        h.calls(),
        vec![
            Call::Pause,
            Call::Publish("song 0".to_string(), false),
            Call::State(false, Some(0)),
        ]
    );
    assert!(!h.service.notification().unwrap().playing);

    h.service.resume();
    h.log.borrow_mut().clear();

    h.service.on_completion();
    assert_eq!(h.calls(), vec![Call::Release, Call::Prepare(1)]);
    assert_eq!(h.service.current_index(), Some(0));
    assert_eq!(h.service.state(), PlaybackState::Preparing);
}

#[test]
fn the_playing_song_is_found_again_when_it_returns() {
    let mut h = Harness::with_songs(3).playing(2);

    h.service.set_songs(vec![titled(0, "song 0")]);
    h.service.set_songs(vec![titled(0, "song 0"), titled(2, "song 2")]);

    assert_eq!(h.service.current_index(), Some(1));
}

#[test]
fn reordering_the_list_follows_the_current_song() {
    let mut h = Harness::with_songs(3).playing(0);

    h.service
        .set_songs(vec![titled(2, "song 2"), titled(1, "song 1"), titled(0, "song 0")]);

    assert_eq!(h.service.current_index(), Some(2));
    assert_eq!(h.service.current_song().map(|s| s.id), Some(0));
}
