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

//! Keyboard routing.
//!
//! A key goes to the first of these that is open: the access dialog, an
//! information dialog, a menu, the search editor. Otherwise the song table
//! gets it, and anything the table does not act on is a global key.

use anyhow::Result;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::{
    App, Screen,
    components::{ArtState, Dialog, Menu, MenuAction, MenuItem, SearchAction, SongTableAction},
    events::{
        AppEvent,
        handlers::{check_access_and_load, refresh_song_list, show_song_list},
    },
    library,
    tasks::AppTask,
};

/// Seek step for `,` and `.`, as a percentage of the song.
const SEEK_STEP_PERCENT: u64 = 5;

pub(super) fn process_key_event(app: &mut App, key: KeyEvent) -> Result<()> {
    if key.kind != KeyEventKind::Press {
        return Ok(());
    }

    if matches!(app.screen, Screen::AccessDenied(_)) {
        return process_access_key(app, key);
    }

    if app.dialog.is_some() {
        app.dialog = None;
        return Ok(());
    }

    let event = Event::Key(key);

    if let Some(menu) = app.menu.as_mut() {
        if let Some(action) = menu.process_event(&event) {
            handle_menu_action(app, action)?;
        }
        return Ok(());
    }

    if app.search.active() {
        if let Some(action) = app.search.process_event(&event) {
            handle_search_action(app, action);
        }
        return Ok(());
    }

    if app.screen == Screen::Songs {
        if let Some(action) = app.song_table.process_event(&event) {
            return handle_table_action(app, action);
        }
    }

    process_global_key_event(app, key)
}

fn process_access_key(app: &mut App, key: KeyEvent) -> Result<()> {
    match key.code {
        KeyCode::Char('r') => check_access_and_load(app)?,
        KeyCode::Char('c') | KeyCode::Esc => app.event_tx.send(AppEvent::ExitApplication)?,
        _ => {}
    }

    Ok(())
}

fn handle_table_action(app: &mut App, action: SongTableAction) -> Result<()> {
    match action {
        SongTableAction::Play(_, index) => app.service.play_song(index),
        SongTableAction::Menu(song, index) => app.menu = Some(Menu::for_song(song, index)),
        SongTableAction::FetchArt(album_id) => app.task_tx.send(AppTask::FetchAlbumArt(album_id))?,
    }

    Ok(())
}

fn handle_menu_action(app: &mut App, action: MenuAction) -> Result<()> {
    let Some(menu) = app.menu.take() else {
        return Ok(());
    };

    let MenuAction::Selected(item) = action else {
        return Ok(());
    };

    match item {
        MenuItem::Play => {
            if let Some((_, index)) = menu.anchor() {
                app.service.play_song(*index);
            }
        }
        MenuItem::SongInfo => {
            if let Some((song, _)) = menu.anchor() {
                let cover = match app.song_table.art_state(song.album_id) {
                    Some(ArtState::Ready(path)) => Some(path.clone()),
                    _ => None,
                };
                app.dialog = Some(Dialog::SongInfo(song.clone(), cover));
            }
        }
        MenuItem::Cancel => {}
        MenuItem::Refresh => {
            app.task_tx.send(AppTask::LoadSongs)?;
            app.show_toast("Refreshing");
        }
        MenuItem::Rescan => {
            app.screen = Screen::Loading;
            app.scan_progress = Some(0);
            app.task_tx.send(AppTask::ScanLibrary)?;
        }
        MenuItem::About => app.dialog = Some(Dialog::About),
    }

    Ok(())
}

fn handle_search_action(app: &mut App, action: SearchAction) {
    match action {
        SearchAction::Changed(_) | SearchAction::Cancelled => refresh_song_list(app),
        SearchAction::Submitted => {}
    }
}

fn process_global_key_event(app: &mut App, key: KeyEvent) -> Result<()> {
    match (key.code, key.modifiers) {
        (KeyCode::Char('q'), _) | (KeyCode::Char('c'), KeyModifiers::CONTROL) => {
            app.event_tx.send(AppEvent::ExitApplication)?;
        }

        // Transport
        (KeyCode::Char(' '), _) => app.service.toggle_play_pause(),
        (KeyCode::Char('n'), _) => app.service.play_next(),
        (KeyCode::Char('p'), _) => app.service.play_previous(),
        (KeyCode::Char('x'), _) => app.service.stop(),

        // Modes
        (KeyCode::Char('s'), _) => {
            let on = app.service.toggle_shuffle();
            app.show_toast(if on { "Shuffle on" } else { "Shuffle off" });
        }
        (KeyCode::Char('r'), _) => {
            let mode = app.service.toggle_repeat();
            app.show_toast(mode.label());
        }

        // Seeking
        (KeyCode::Char(','), _) => seek_by_step(app, false),
        (KeyCode::Char('.'), _) => seek_by_step(app, true),
        (KeyCode::Char(digit @ '0'..='9'), _) => {
            let tenths = digit as u8 - b'0';
            app.service.seek_to_percent(tenths * 10);
        }

        // List
        (KeyCode::Char('/'), _) => app.search.open(),
        (KeyCode::Char('o'), _) => {
            app.sort_order = app.sort_order.next();
            refresh_song_list(app);
            app.show_toast(format!("Sorted by {}", app.sort_order.label()));
        }
        (KeyCode::Char('S'), _) => {
            let shuffled = library::shuffle_songs(app.song_table.songs());
            show_song_list(app, shuffled);
            app.list_shuffled = true;
            app.show_toast("List shuffled");
        }

        (KeyCode::Char('M'), _) => app.menu = Some(Menu::main()),

        _ => {}
    }

    Ok(())
}

fn seek_by_step(app: &mut App, forward: bool) {
    let target = step_target(app.service.current_position(), app.service.duration(), forward);
    app.service.seek_to(target);
}

/// The position one seek step away, kept within the song.
fn step_target(position_ms: u64, duration_ms: u64, forward: bool) -> u64 {
    let step = duration_ms * SEEK_STEP_PERCENT / 100;

    if forward {
        (position_ms + step).min(duration_ms)
    } else {
        position_ms.saturating_sub(step)
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyModifiers;

    use super::*;
    use crate::{
        events::{fixtures::test_app, handlers::show_song_list},
        model::fixtures::titled,
    };

    fn press(app: &mut App, code: KeyCode) {
        process_key_event(app, KeyEvent::new(code, KeyModifiers::NONE)).unwrap();
    }

    #[test]
    fn seek_steps_stay_within_the_song() {
        assert_eq!(step_target(10_000, 100_000, true), 15_000);
        assert_eq!(step_target(10_000, 100_000, false), 5_000);
        assert_eq!(step_target(98_000, 100_000, true), 100_000);
        assert_eq!(step_target(2_000, 100_000, false), 0);
        assert_eq!(step_target(0, 0, true), 0);
    }

    #[test]
    fn seek_keys_move_the_playing_song() {
        let (mut app, _tasks) = test_app();
        app.screen = Screen::Songs;
        show_song_list(&mut app, vec![titled(0, "only")]);
        app.service.play_song(0);
        app.service.on_prepared(200_000);

        press(&mut app, KeyCode::Char('.'));
        assert_eq!(app.service.current_position(), 10_000);

        press(&mut app, KeyCode::Char('5'));
        assert_eq!(app.service.current_position(), 100_000);

        press(&mut app, KeyCode::Char(','));
        assert_eq!(app.service.current_position(), 90_000);
    }

    #[test]
    fn transport_keys_drive_the_service() {
        let (mut app, _tasks) = test_app();
        app.screen = Screen::Songs;
        show_song_list(&mut app, vec![titled(0, "first"), titled(1, "second")]);

        press(&mut app, KeyCode::Char(' '));
        assert_eq!(app.service.current_index(), Some(0));

        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.service.current_index(), Some(1));

        press(&mut app, KeyCode::Char('x'));
        assert!(!app.service.is_active());
    }

    #[test]
    fn any_key_closes_a_dialog() {
        let (mut app, _tasks) = test_app();
        app.dialog = Some(Dialog::About);

        press(&mut app, KeyCode::Char('n'));

        assert!(app.dialog.is_none());
        assert_eq!(app.service.current_index(), None);
    }
}
