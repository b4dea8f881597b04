use serde::Deserialize;

use super::paths::stem_of;

/// Body of `songs/<folder>/songs.json`.
#[derive(Debug, Clone, Deserialize)]
pub struct SongsDocument {
    pub songs: Vec<String>,
}

/// One catalog entry, as named by the server (`"My Song.mp3"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    pub file_name: String,
}

impl Track {
    pub fn new(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
        }
    }

    /// Text before the first `.`; this is the name shown in the list and the
    /// name used to build the asset path.
    pub fn stem(&self) -> &str {
        stem_of(&self.file_name)
    }
}

/// Ordered track list for one folder. Order is the server's order.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub folder: String,
    pub tracks: Vec<Track>,
}

impl Catalog {
    pub fn new(folder: impl Into<String>, songs: Vec<String>) -> Self {
        Self {
            folder: folder.into(),
            tracks: songs.into_iter().map(Track::new).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn stem_at(&self, index: usize) -> Option<&str> {
        self.tracks.get(index).map(Track::stem)
    }
}
