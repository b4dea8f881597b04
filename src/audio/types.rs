//! Audio-related small types.
//!
//! This module defines the commands accepted by the audio thread, the media
//! events it reports back, and the loaded source handed to it.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use url::Url;

/// A probed asset: its URL (the media `src`) plus the downloaded body.
#[derive(Clone)]
pub struct MediaSource {
    pub url: Url,
    pub bytes: Arc<[u8]>,
    /// Duration reported by the container, when it could be read.
    pub duration: Option<Duration>,
}

impl fmt::Debug for MediaSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MediaSource")
            .field("url", &self.url.as_str())
            .field("bytes", &self.bytes.len())
            .field("duration", &self.duration)
            .finish()
    }
}

#[derive(Debug)]
pub enum AudioCmd {
    /// Replace the current source. Starts playing when `autoplay` is set,
    /// otherwise the source is left loaded and paused.
    Load { source: MediaSource, autoplay: bool },
    /// Resume the loaded source.
    Play,
    /// Pause the loaded source.
    Pause,
    /// Jump to an absolute position.
    SeekTo(Duration),
    /// Seek by the specified number of seconds (positive or negative).
    SeekBy(i64),
    /// Volume in `0.0..=1.0`.
    SetVolume(f32),
    SetMuted(bool),
    /// Quit the audio thread, optionally fading out over `fade_out_ms` milliseconds.
    Quit { fade_out_ms: u64 },
}

/// Notifications from the audio thread, mirroring the media element events.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MediaEvent {
    /// A source finished loading; `duration` is NaN when unknown.
    LoadedMetadata { duration: f64 },
    /// Periodic position report (seconds). `duration` is NaN when unknown.
    TimeUpdate { current: f64, duration: f64 },
    /// The source played to its end.
    Ended,
}

#[derive(Error, Debug)]
pub enum MediaError {
    #[error("no audio output device: {0}")]
    NoOutputDevice(String),

    #[error("failed to decode {url}: {reason}")]
    Decode { url: String, reason: String },

    #[error("audio thread exited before it was ready")]
    ThreadGone,
}

#[derive(Error, Debug)]
pub enum ProbeError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The server answered, but not with a success status.
    #[error("song file not found (status {status})")]
    Status { status: u16 },
}

/// Seconds as `f64`, NaN for an unknown duration.
pub fn secs_or_nan(d: Option<Duration>) -> f64 {
    d.map(|d| d.as_secs_f64()).unwrap_or(f64::NAN)
}
