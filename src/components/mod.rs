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

//! Interactive UI components.
//!
//! Each component owns its view state, handles the keys routed to it and
//! draws itself through [`Render`](crate::render::Render). Components report
//! what the user asked for as action values; acting on them is left to the
//! event handlers.

pub(crate) mod menu;
pub(crate) mod search_bar;
pub(crate) mod song_table;

pub(crate) use menu::{Dialog, Menu, MenuAction, MenuItem};
pub(crate) use search_bar::{SearchAction, SearchBar};
pub(crate) use song_table::{ArtState, SongTable, SongTableAction};
