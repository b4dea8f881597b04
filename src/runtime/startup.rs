use tracing::info;

use crate::app::{App, Effect};
use crate::config;

/// Copy the configured playback and UI defaults into `app`.
///
/// Returns the effects those defaults need (the initial volume for the audio
/// thread, plus the catalog request when there is a single folder card).
pub fn apply_playback_defaults(app: &mut App, settings: &config::Settings) -> Vec<Effect> {
    app.autoplay = settings.playback.autoplay;
    app.sidebar_open = settings.ui.sidebar_open;

    let mut effects = app.set_volume(settings.playback.volume);

    // With only one card there is nothing to choose.
    if app.folders.len() == 1 {
        effects.extend(app.select_folder(0));
    }

    info!(
        folders = app.folders.len(),
        autoplay = app.autoplay,
        volume = app.volume_percent,
        "Playback defaults applied"
    );
    effects
}
