//! Next/previous index arithmetic over the current catalog.
//!
//! The current track is identified by name, not by index, so an unmatched
//! name (catalog swapped underneath the playing track) is a normal case.

use crate::catalog::Catalog;

/// What triggered an advance.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Advance {
    /// The next control. Stops at the last track.
    Manual,
    /// End of track with autoplay on. Wraps to the first track.
    Autoplay,
}

/// Position of `name` in `catalog`, comparing stems.
pub fn find_index(catalog: &Catalog, name: &str) -> Option<usize> {
    catalog.tracks.iter().position(|t| t.stem() == name)
}

/// Index to play after `current`.
///
/// An unmatched `current` resolves to the first track for either trigger.
pub fn next_index(catalog: &Catalog, current: &str, advance: Advance) -> Option<usize> {
    if catalog.is_empty() {
        return None;
    }
    match find_index(catalog, current) {
        None => Some(0),
        Some(i) if i + 1 < catalog.len() => Some(i + 1),
        Some(_) => match advance {
            Advance::Manual => None,
            Advance::Autoplay => Some(0),
        },
    }
}

/// Index to play before `current`. No wraparound; unmatched is a no-op.
pub fn previous_index(catalog: &Catalog, current: &str) -> Option<usize> {
    match find_index(catalog, current) {
        Some(i) if i >= 1 => Some(i - 1),
        _ => None,
    }
}
