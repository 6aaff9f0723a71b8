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

//! Media directory access checks.
//!
//! Songs can only be listed and played if the media directories can be read.
//! The check runs at startup, and again whenever the user retries from the
//! access dialog.

use std::{fs, io, path::PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum AccessError {
    #[error("no music directory is configured and none could be found")]
    NoMediaDirectory,
    #[error("cannot read {}: {source}", .path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Checks that every media directory exists and can be listed.
pub(crate) fn check_media_access(dirs: &[String]) -> Result<(), AccessError> {
    if dirs.is_empty() {
        return Err(AccessError::NoMediaDirectory);
    }

    for dir in dirs {
        let path = PathBuf::from(dir);
        if let Err(source) = fs::read_dir(&path) {
            return Err(AccessError::Unreadable { path, source });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn readable_directories_are_granted() {
        let dir = std::env::temp_dir().to_string_lossy().to_string();

        assert!(check_media_access(&[dir]).is_ok());
    }

    #[test]
    fn no_directories_is_denied() {
        assert!(matches!(
            check_media_access(&[]),
            Err(AccessError::NoMediaDirectory)
        ));
    }

    #[test]
    fn a_missing_directory_is_denied() {
        let readable = std::env::temp_dir().to_string_lossy().to_string();
        let missing = "/definitely/not/a/music/dir".to_string();

        let err = check_media_access(&[readable, missing]).unwrap_err();

        assert!(matches!(err, AccessError::Unreadable { .. }));
        assert!(err.to_string().starts_with("cannot read /definitely/not/a/music/dir"));
    }
}
