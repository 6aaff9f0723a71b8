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

//! Application configuration.
//!
//! This module manages the application configuration file. Missing or
//! unreadable configuration falls back to the defaults.

use serde::{Deserialize, Serialize};

use crate::library::DEFAULT_MIN_DURATION_MS;

const CONFIG_NAME: &str = "tunebox";

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct AppConfig {
    pub version: u32,
    /// Directories indexed by a library scan. When empty the platform audio
    /// directory is used.
    pub media_dirs: Vec<String>,
    pub extensions: Vec<String>,
    /// Songs must be strictly longer than this to be listed.
    pub min_duration_ms: u64,
    pub database_file: String,
    pub log_dir: String,
    /// Path of the control socket, `None` for the runtime directory default.
    pub control_socket: Option<String>,
    pub media_controls: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: 1,
            media_dirs: vec![],
            extensions: ["mp3", "flac", "ogg", "opus", "m4a", "wav"]
                .iter()
                .map(|e| e.to_string())
                .collect(),
            min_duration_ms: DEFAULT_MIN_DURATION_MS,
            database_file: "music.db".to_string(),
            log_dir: ".logs".to_string(),
            control_socket: None,
            media_controls: true,
        }
    }
}

impl AppConfig {
    /// The directories to index, falling back to the user's audio directory.
    pub fn effective_media_dirs(&self) -> Vec<String> {
        if !self.media_dirs.is_empty() {
            return self.media_dirs.clone();
        }

        dirs::audio_dir()
            .map(|dir| vec![dir.to_string_lossy().to_string()])
            .unwrap_or_default()
    }
}

pub fn load_config() -> AppConfig {
    confy::load(CONFIG_NAME, None).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configured_dirs_take_precedence() {
        let config = AppConfig {
            media_dirs: vec!["/srv/music".to_string()],
            ..AppConfig::default()
        };

        assert_eq!(config.effective_media_dirs(), vec!["/srv/music".to_string()]);
    }

    #[test]
    fn defaults_keep_the_thirty_second_threshold() {
        let config = AppConfig::default();

        assert_eq!(config.min_duration_ms, 30_000);
        assert!(config.extensions.iter().any(|e| e == "mp3"));
    }
}
