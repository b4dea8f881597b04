use url::Url;

use crate::audio::AudioCmd;

/// Existence check to run before a track may be set as the media source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeRequest {
    /// Increases with every `play`; lets the model spot late answers.
    pub seq: u64,
    /// Stem as passed to `play`.
    pub track: String,
    pub url: Url,
    pub autoplay: bool,
}

/// Side effects requested by [`App`](super::App), executed by the runtime.
#[derive(Debug)]
pub enum Effect {
    LoadCatalog { folder: String },
    ProbeAsset(ProbeRequest),
    Audio(AudioCmd),
}
