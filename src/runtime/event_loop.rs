use std::sync::mpsc::Receiver;
use std::time::Duration;

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::debug;

use crate::app::{Action, App, Focus};
use crate::audio::{AudioPlayer, MediaEvent};
use crate::config;
use crate::runtime::workers::{WorkEvent, Workers};
use crate::ui::{self, HitMap};

/// State tracked by the runtime event loop across iterations.
#[derive(Default)]
pub struct EventLoopState {
    /// Internal two-key prefix state used for `gg` handling.
    pub pending_gg: bool,
    /// Clickable areas from the last draw.
    pub hits: HitMap,
}

/// What a key press asks for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum KeyOutcome {
    Action(Action),
    Quit,
    Ignored,
}

/// Main terminal event loop: applies background results and media events,
/// draws, then handles one input event. Returns `Ok(())` when shutdown is
/// requested.
#[allow(clippy::too_many_arguments)]
pub fn run(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    app: &mut App,
    audio_player: &AudioPlayer,
    media_rx: &Receiver<MediaEvent>,
    workers: &Workers,
    work_rx: &Receiver<WorkEvent>,
    state: &mut EventLoopState,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        while let Ok(work) = work_rx.try_recv() {
            let effects = match work {
                WorkEvent::CatalogLoaded { folder, result } => app.catalog_loaded(&folder, result),
                WorkEvent::AssetProbed { request, result } => app.asset_probed(request, result),
            };
            workers.execute(effects, audio_player);
        }

        while let Ok(ev) = media_rx.try_recv() {
            match ev {
                MediaEvent::LoadedMetadata { duration } => app.loaded_metadata(duration),
                MediaEvent::TimeUpdate { current, duration } => app.time_update(current, duration),
                MediaEvent::Ended => {
                    debug!(autoplay = app.autoplay, "Media ended");
                    let effects = app.media_ended();
                    workers.execute(effects, audio_player);
                }
            }
        }

        terminal.draw(|f| ui::draw(f, app, &settings.ui, &settings.controls, &mut state.hits))?;

        if event::poll(Duration::from_millis(50))? {
            let outcome = match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    map_key(key, app.focus, &settings.controls, &mut state.pending_gg)
                }
                Event::Mouse(mouse) => map_mouse(mouse, &state.hits),
                _ => KeyOutcome::Ignored,
            };

            match outcome {
                KeyOutcome::Action(action) => {
                    let effects = app.dispatch(action);
                    workers.execute(effects, audio_player);
                }
                KeyOutcome::Quit => {
                    audio_player
                        .quit_softly(Duration::from_millis(settings.audio.quit_fade_out_ms));
                    break;
                }
                KeyOutcome::Ignored => {}
            }
        }
    }

    Ok(())
}

fn map_mouse(mouse: MouseEvent, hits: &HitMap) -> KeyOutcome {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => hits
            .resolve(mouse.column, mouse.row)
            .map_or(KeyOutcome::Ignored, KeyOutcome::Action),
        _ => KeyOutcome::Ignored,
    }
}

/// Translate a key press into an outcome for the given focus.
pub fn map_key(
    key: KeyEvent,
    focus: Focus,
    controls: &config::ControlsSettings,
    pending_gg: &mut bool,
) -> KeyOutcome {
    if focus == Focus::Search {
        *pending_gg = false;
        return match key.code {
            KeyCode::Esc => KeyOutcome::Action(Action::Focus(Focus::Songs)),
            KeyCode::Backspace => KeyOutcome::Action(Action::SearchBackspace),
            KeyCode::Enter => KeyOutcome::Action(Action::PerformSearch),
            // Keep it simple: accept printable characters.
            KeyCode::Char(c) if !c.is_control() => KeyOutcome::Action(Action::SearchInput(c)),
            _ => KeyOutcome::Ignored,
        };
    }

    if key.code != KeyCode::Char('g') {
        *pending_gg = false;
    }

    if focus == Focus::Folders {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                return KeyOutcome::Action(Action::FolderCursorNext);
            }
            KeyCode::Char('k') | KeyCode::Up => {
                return KeyOutcome::Action(Action::FolderCursorPrev);
            }
            KeyCode::Enter => return KeyOutcome::Action(Action::ActivateFolderCursor),
            KeyCode::Esc | KeyCode::Tab | KeyCode::Char('f') => {
                return KeyOutcome::Action(Action::Focus(Focus::Songs));
            }
            KeyCode::Char('x') => return KeyOutcome::Action(Action::CloseSidebar),
            _ => {}
        }
    }

    let scrub = i64::try_from(controls.scrub_seconds).unwrap_or(i64::MAX);
    let step = i16::from(controls.volume_step);

    let action = match key.code {
        KeyCode::Char('q') => return KeyOutcome::Quit,
        KeyCode::Char('g') => {
            if *pending_gg {
                *pending_gg = false;
                Action::CursorTop
            } else {
                *pending_gg = true;
                return KeyOutcome::Ignored;
            }
        }
        KeyCode::Char('G') => Action::CursorBottom,
        KeyCode::Char('j') | KeyCode::Down => Action::CursorDown,
        KeyCode::Char('k') | KeyCode::Up => Action::CursorUp,
        KeyCode::Enter => Action::PlaySelected,
        KeyCode::Char('p') | KeyCode::Char(' ') => Action::TogglePlay,
        KeyCode::Char('l') => Action::Next,
        KeyCode::Char('h') => Action::Previous,
        KeyCode::Char('L') => Action::ScrubBy(scrub),
        KeyCode::Char('H') => Action::ScrubBy(-scrub),
        KeyCode::Char('a') => Action::ToggleAutoplay,
        KeyCode::Char('m') => Action::ToggleMute,
        KeyCode::Char('+') | KeyCode::Char('=') => Action::StepVolume(step),
        KeyCode::Char('-') => Action::StepVolume(-step),
        KeyCode::Char('/') => Action::FocusSearch,
        KeyCode::Char('f') | KeyCode::Tab => Action::Focus(Focus::Folders),
        KeyCode::Char('x') => Action::CloseSidebar,
        _ => return KeyOutcome::Ignored,
    };
    KeyOutcome::Action(action)
}
