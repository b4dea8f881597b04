//! Asset existence check.
//!
//! The probe is a full GET; when it succeeds the body becomes the playable
//! source, so the asset is only downloaded once.

use std::io::Cursor;
use std::sync::Arc;
use std::time::Duration;

use lofty::file::AudioFile;
use lofty::probe::Probe;
use reqwest::blocking::Client;
use tracing::debug;
use url::Url;

use super::types::{MediaSource, ProbeError};

pub fn probe_asset(client: &Client, url: &Url) -> Result<MediaSource, ProbeError> {
    debug!(url = %url, "Probing asset");
    let response = client.get(url.clone()).send()?;
    let status = response.status();
    if !status.is_success() {
        return Err(ProbeError::Status {
            status: status.as_u16(),
        });
    }

    let body = response.bytes()?;
    let bytes: Arc<[u8]> = Arc::from(body.as_ref());
    let duration = probe_duration(&bytes);
    debug!(url = %url, bytes = bytes.len(), ?duration, "Asset available");

    Ok(MediaSource {
        url: url.clone(),
        bytes,
        duration,
    })
}

/// Read the duration from the container headers, if `lofty` recognises them.
pub fn probe_duration(bytes: &[u8]) -> Option<Duration> {
    let tagged = Probe::new(Cursor::new(bytes))
        .guess_file_type()
        .ok()?
        .read()
        .ok()?;
    let duration = tagged.properties().duration();
    (!duration.is_zero()).then_some(duration)
}
