//! URL helpers for the `songs/<folder>/...` layout.
//!
//! Stems are pushed as percent-encoded path segments and decoded again by
//! [`extract_song_name`]; navigation relies on that round trip being exact.

use percent_encoding::percent_decode_str;
use url::Url;

use super::CatalogError;

/// Text before the first `.` of a catalog file name.
pub fn stem_of(file_name: &str) -> &str {
    file_name.split('.').next().unwrap_or(file_name)
}

/// `<base>/songs/<folder>/songs.json`
pub fn songs_json_url(base: &Url, folder: &str) -> Result<Url, CatalogError> {
    folder_url(base, folder, "songs.json")
}

/// `<base>/songs/<folder>/<stem>.mp3`. The extension is always `.mp3`.
pub fn asset_url(base: &Url, folder: &str, stem: &str) -> Result<Url, CatalogError> {
    folder_url(base, folder, &format!("{stem}.mp3"))
}

fn folder_url(base: &Url, folder: &str, leaf: &str) -> Result<Url, CatalogError> {
    let mut url = base.clone();
    {
        let mut segments = url
            .path_segments_mut()
            .map_err(|_| CatalogError::InvalidBase(base.to_string()))?;
        segments.pop_if_empty().push("songs");
        for part in folder.split('/').filter(|p| !p.is_empty()) {
            segments.push(part);
        }
        segments.push(leaf);
    }
    Ok(url)
}

/// Recover the track name from a media source URL: the last path segment,
/// cut at its first `.`, then percent-decoded.
///
/// Returns `None` for URLs without a path or with invalid UTF-8 escapes.
pub fn extract_song_name(url: &Url) -> Option<String> {
    let file_name = url.path_segments()?.next_back()?;
    let encoded = stem_of(file_name);
    percent_decode_str(encoded)
        .decode_utf8()
        .ok()
        .map(|s| s.into_owned())
}

/// Decode escapes in a stem for display; invalid sequences are replaced.
pub fn decode_label(stem: &str) -> String {
    percent_decode_str(stem).decode_utf8_lossy().into_owned()
}
