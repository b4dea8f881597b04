use std::env;
use std::time::Duration;

use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend};
use reqwest::blocking::Client;
use tracing::info;

use crate::app::App;
use crate::audio::AudioPlayer;

mod event_loop;
mod logging;
mod settings;
mod startup;
mod workers;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut settings = settings::load_settings();
    settings::apply_base_url_override(&mut settings, env::args().nth(1));

    let _log_guard = logging::init_logging(&settings.logging)?;

    let base_url = settings.base_url()?;
    info!(base_url = %base_url, folders = settings.library.folders.len(), "Starting allegro");

    let client = Client::builder()
        .timeout(Duration::from_secs(settings.server.timeout_secs))
        .build()?;

    // Fails before the terminal is touched when there is no output device.
    let (audio_player, media_rx) = AudioPlayer::new()?;
    let (workers, work_rx) = workers::Workers::new(client, base_url.clone());

    let mut app = App::new(base_url, settings.library.folders.clone());
    let effects = startup::apply_playback_defaults(&mut app, &settings);
    workers.execute(effects, &audio_player);

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result: Result<(), Box<dyn std::error::Error>> = (|| {
        let mut state = event_loop::EventLoopState::default();

        event_loop::run(
            &mut terminal,
            &settings,
            &mut app,
            &audio_player,
            &media_rx,
            &workers,
            &work_rx,
            &mut state,
        )
    })();

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), DisableMouseCapture, LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    info!("Shutting down");
    run_result
}
