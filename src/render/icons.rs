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

//! Symbols used across the interface.
//!
//! Media symbols carry Variation Selector-15 (`\u{FE0E}`) where terminals
//! would otherwise draw a colour emoji that ignores the theme.

pub(crate) const ICON_PLAY: &str = "\u{25B6}";
pub(crate) const ICON_PAUSE: &str = "\u{23F8}\u{FE0E}";
pub(crate) const ICON_STOP: &str = "\u{23F9}\u{FE0E}";
pub(crate) const ICON_NEXT: &str = "\u{23ED}\u{FE0E}";
pub(crate) const ICON_PREV: &str = "\u{23EE}\u{FE0E}";
pub(crate) const ICON_LOADING: &str = "\u{231B}\u{FE0E}";

pub(crate) const ICON_SHUFFLE: &str = "\u{1F500}\u{FE0E}";
pub(crate) const ICON_REPEAT: &str = "\u{1F501}\u{FE0E}";
pub(crate) const ICON_REPEAT_ONE: &str = "\u{1F502}\u{FE0E}";

// Album art availability in the song table.
pub(crate) const ICON_ART: &str = "\u{25A3}";
pub(crate) const ICON_NO_ART: &str = "\u{25A1}";
