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

//! On-disk cache for album art extracted from the media index.

use std::{fs, path::PathBuf};

use anyhow::{Context, Result};

use crate::model::AlbumArt;

const EXTENSIONS: [&str; 3] = ["jpg", "png", "img"];

/// A directory of `<album id>.<ext>` image files.
#[derive(Clone, Debug)]
pub(crate) struct ArtCache {
    dir: PathBuf,
}

impl ArtCache {
    pub(crate) fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The per-user cache location, falling back to the temp directory.
    pub(crate) fn default_dir() -> PathBuf {
        dirs::cache_dir()
            .unwrap_or_else(std::env::temp_dir)
            .join("tunebox")
            .join("art")
    }

    /// The cached image for `album_id`, if one has been written.
    pub(crate) fn lookup(&self, album_id: i64) -> Option<PathBuf> {
        EXTENSIONS
            .iter()
            .map(|ext| self.dir.join(format!("{}.{}", album_id, ext)))
            .find(|path| path.is_file())
    }

    /// Removes every cached image. Album ids are reassigned by a rescan.
    pub(crate) fn clear(&self) -> Result<()> {
        if self.dir.exists() {
            fs::remove_dir_all(&self.dir)
                .with_context(|| format!("Failed to clear art cache {}", self.dir.display()))?;
        }
        Ok(())
    }

    /// Writes `art` to the cache, returning the file it was written to.
    pub(crate) fn store(&self, art: &AlbumArt) -> Result<PathBuf> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Failed to create art cache {}", self.dir.display()))?;

        let path = self
            .dir
            .join(format!("{}.{}", art.album_id, extension_for(&art.mime)));
        fs::write(&path, &art.data)
            .with_context(|| format!("Failed to write album art {}", path.display()))?;

        Ok(path)
    }
}

fn extension_for(mime: &str) -> &'static str {
    match mime.to_ascii_lowercase().as_str() {
        "image/jpeg" | "image/jpg" => "jpg",
        "image/png" => "png",
        _ => "img",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_cache(name: &str) -> ArtCache {
        let dir = std::env::temp_dir().join(format!("tunebox-art-{}-{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        ArtCache::new(dir)
    }

    #[test]
    fn stored_art_can_be_looked_up() {
        let cache = temp_cache("store");
        let art = AlbumArt {
            album_id: 7,
            mime: "image/PNG".to_string(),
            data: vec![1, 2, 3],
        };

        assert_eq!(cache.lookup(7), None);

        let path = cache.store(&art).unwrap();
        assert_eq!(path.extension().and_then(|e| e.to_str()), Some("png"));
        assert_eq!(cache.lookup(7), Some(path.clone()));
        assert_eq!(fs::read(&path).unwrap(), vec![1, 2, 3]);

        cache.clear().unwrap();
        assert_eq!(cache.lookup(7), None);
    }

    #[test]
    fn unknown_mime_types_get_a_generic_extension() {
        assert_eq!(extension_for("image/jpeg"), "jpg");
        assert_eq!(extension_for("image/webp"), "img");
        assert_eq!(extension_for(""), "img");
    }
}
