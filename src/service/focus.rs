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

//! Audio focus arbitration.

use tracing::debug;

/// Arbitration of which application may produce audio.
///
/// Focus changes themselves arrive asynchronously as
/// [`FocusChange`](crate::service::FocusChange) messages, this trait only
/// covers asking for and giving up focus.
pub(crate) trait AudioFocus {
    /// Asks for exclusive audio output, returns whether it was granted.
    fn request(&mut self) -> bool;

    fn abandon(&mut self);
}

/// Focus for desktops without an arbiter: every request is granted.
///
/// External arbiters can still deliver focus changes through the control
/// socket.
#[derive(Debug, Default)]
pub(crate) struct SharedFocus {
    held: bool,
}

impl AudioFocus for SharedFocus {
    fn request(&mut self) -> bool {
        if !self.held {
            debug!("Audio focus acquired");
        }
        self.held = true;
        true
    }

    fn abandon(&mut self) {
        if self.held {
            debug!("Audio focus abandoned");
        }
        self.held = false;
    }
}
