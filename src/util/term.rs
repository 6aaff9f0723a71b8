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

//! Terminal emulator colour control.
//!
//! The background is set with OSC 11 and restored with OSC 111. Terminals
//! that do not understand these sequences ignore them.

use std::io::{self, Write};

use ratatui::style::Color;

use crate::theme::Theme;

/// Paints the whole terminal window with `colour`, so no outline of the
/// user's own background shows around the UI. Non-RGB colours are ignored.
pub(crate) fn set_terminal_bg(colour: Color) {
    if let Some(hex) = Theme::to_hex(colour) {
        write_sequence(&format!("\x1b]11;{}\x07", hex));
    }
}

/// Returns the terminal background to the user's configured colour.
pub(crate) fn reset_terminal_bg() {
    write_sequence("\x1b]111\x07");
}

fn write_sequence(sequence: &str) {
    let mut stdout = io::stdout();
    let _ = stdout.write_all(sequence.as_bytes());
    let _ = stdout.flush();
}
