use crate::config;

pub fn load_settings() -> config::Settings {
    match config::Settings::load() {
        Ok(s) => {
            if let Err(msg) = s.validate() {
                eprintln!("allegro: invalid config, using defaults: {msg}");
                config::Settings::default()
            } else {
                s
            }
        }
        Err(e) => {
            // Config is optional; failures should not prevent the app from starting.
            eprintln!("allegro: failed to load config, using defaults: {e}");
            config::Settings::default()
        }
    }
}

/// Apply the `allegro [BASE_URL]` argument on top of the loaded settings.
///
/// An override that does not validate is dropped with a stderr note.
pub fn apply_base_url_override(settings: &mut config::Settings, arg: Option<String>) {
    let Some(raw) = arg else {
        return;
    };
    let previous = std::mem::replace(&mut settings.server.base_url, raw);
    if let Err(msg) = settings.base_url() {
        eprintln!("allegro: ignoring base URL argument: {msg}");
        settings.server.base_url = previous;
    }
}
