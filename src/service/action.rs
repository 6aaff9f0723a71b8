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

//! Named control actions and audio focus changes.
//!
//! These are the messages external surfaces (the control socket, the media
//! session, notification actions) use to drive the playback service.

use std::{fmt, str::FromStr};

use thiserror::Error;

use crate::model::LocatorError;

#[derive(Debug, Error, PartialEq, Eq)]
pub(crate) enum ParseActionError {
    #[error("unknown control action: {0}")]
    UnknownAction(String),
    #[error("unknown focus change: {0}")]
    UnknownFocus(String),
    #[error(transparent)]
    Locator(#[from] LocatorError),
    #[error("not a playable locator: {0}")]
    NotPlayable(String),
}

/// The five transport actions accepted from outside the UI.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ControlAction {
    Play,
    Pause,
    Previous,
    Next,
    Stop,
}

impl ControlAction {
    pub(crate) fn label(self) -> &'static str {
        match self {
            ControlAction::Play => "Play",
            ControlAction::Pause => "Pause",
            ControlAction::Previous => "Previous",
            ControlAction::Next => "Next",
            ControlAction::Stop => "Stop",
        }
    }
}

impl fmt::Display for ControlAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ControlAction::Play => "play",
            ControlAction::Pause => "pause",
            ControlAction::Previous => "previous",
            ControlAction::Next => "next",
            ControlAction::Stop => "stop",
        };
        f.write_str(name)
    }
}

impl FromStr for ControlAction {
    type Err = ParseActionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "play" => Ok(ControlAction::Play),
            "pause" => Ok(ControlAction::Pause),
            "previous" => Ok(ControlAction::Previous),
            "next" => Ok(ControlAction::Next),
            "stop" => Ok(ControlAction::Stop),
            _ => Err(ParseActionError::UnknownAction(s.trim().to_string())),
        }
    }
}

/// A change in who holds audio output, as reported by the focus arbiter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum FocusChange {
    Gain,
    Loss,
    LossTransient,
    LossTransientCanDuck,
}

impl FromStr for FocusChange {
    type Err = ParseActionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "gain" => Ok(FocusChange::Gain),
            "loss" => Ok(FocusChange::Loss),
            "loss-transient" => Ok(FocusChange::LossTransient),
            "duck" => Ok(FocusChange::LossTransientCanDuck),
            _ => Err(ParseActionError::UnknownFocus(s.trim().to_string())),
        }
    }
}
