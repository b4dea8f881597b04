//! Utilities for creating `rodio` sinks from probed sources.
//!
//! The helper here decodes the in-memory asset and prepares a paused `Sink`
//! at the requested start position.

use std::io::Cursor;
use std::time::Duration;

use rodio::mixer::Mixer;
use rodio::{Decoder, Sink, Source};

use super::types::{MediaError, MediaSource};

/// Create a paused `Sink` for `source` that starts playback at `start_at`.
///
/// Also returns the decoder's own duration estimate, used when the probe
/// could not read one.
pub(super) fn create_sink_at(
    mixer: &Mixer,
    source: &MediaSource,
    start_at: Duration,
) -> Result<(Sink, Option<Duration>), MediaError> {
    let decoder = Decoder::new(Cursor::new(source.bytes.clone())).map_err(|e| {
        MediaError::Decode {
            url: source.url.to_string(),
            reason: e.to_string(),
        }
    })?;
    let total = decoder.total_duration();

    let sink = Sink::connect_new(mixer);
    // `skip_duration` is our seeking primitive; even Duration::ZERO is fine.
    sink.append(decoder.skip_duration(start_at));
    sink.pause();
    Ok((sink, total))
}
