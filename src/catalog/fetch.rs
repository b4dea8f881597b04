use reqwest::blocking::Client;
use tracing::debug;
use url::Url;

use super::model::{Catalog, SongsDocument};
use super::paths::songs_json_url;
use super::CatalogError;

/// Fetch and parse the track list of `folder`.
///
/// No retry, no fallback: any failure is handed back to the caller.
pub fn load_catalog(client: &Client, base: &Url, folder: &str) -> Result<Catalog, CatalogError> {
    let url = songs_json_url(base, folder)?;
    debug!(url = %url, folder, "Fetching catalog");

    let response = client.get(url.clone()).send()?;
    let status = response.status();
    if !status.is_success() {
        return Err(CatalogError::Status {
            status: status.as_u16(),
            url: url.to_string(),
        });
    }

    let body = response.bytes()?;
    let document = parse_songs_document(&body)?;
    debug!(folder, tracks = document.songs.len(), "Fetched catalog");

    Ok(Catalog::new(folder, document.songs))
}

/// Parse a `songs.json` body.
pub fn parse_songs_document(body: &[u8]) -> Result<SongsDocument, CatalogError> {
    Ok(serde_json::from_slice(body)?)
}
