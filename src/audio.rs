//! Audio playback: the media-element side of the player.
//!
//! A dedicated thread owns the `rodio` output stream and the current sink.
//! The rest of the program talks to it with [`AudioCmd`] and hears back via
//! [`MediaEvent`] (metadata, time updates, end of track).

mod player;
mod probe;
mod sink;
mod thread;
mod types;

pub use player::AudioPlayer;
pub use probe::probe_asset;
pub use types::{AudioCmd, MediaEvent, MediaSource, ProbeError, secs_or_nan};
