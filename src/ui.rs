//! UI rendering helpers for the terminal user interface.
//!
//! This module contains functions to render the TUI using `ratatui`. While
//! drawing, every clickable control records its screen area in a [`HitMap`]
//! so mouse clicks can be turned back into [`Action`]s.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Position, Rect},
    style::{Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Padding, Paragraph, Wrap},
};
use std::{collections::BTreeMap, sync::LazyLock};

use crate::app::{Action, App, Focus, PlayIcon, VolumeIcon, seek_fraction};
use crate::config::{ControlsSettings, UiSettings};

static CONTROLS_MAP: LazyLock<BTreeMap<String, String>> = LazyLock::new(|| {
    let mut map: BTreeMap<String, String> = BTreeMap::new();
    map.insert("j/k".to_string(), "up/down".to_string());
    map.insert("gg/G".to_string(), "top/bottom".to_string());
    map.insert("enter".to_string(), "play selected".to_string());
    map.insert("space/p".to_string(), "play/pause".to_string());
    map.insert("h/l".to_string(), "prev/next song".to_string());
    // H/L and +/- are filled dynamically from config.
    map.insert("a".to_string(), "autoplay".to_string());
    map.insert("m".to_string(), "mute".to_string());
    map.insert("/".to_string(), "search".to_string());
    map.insert("f/tab".to_string(), "folders".to_string());
    map.insert("x".to_string(), "close sidebar".to_string());
    map.insert("esc".to_string(), "leave search/folders".to_string());
    map.insert("q".to_string(), "quit".to_string());
    map
});

const VOLUME_CELLS: u16 = 10;

/// Render the controls help text, incorporating scrub seconds and volume step.
fn controls_text(controls: &ControlsSettings) -> String {
    // Keep the rendered order stable and human-friendly.
    let order = [
        "j/k", "h/l", "H/L", "enter", "space/p", "a", "+/-", "m", "gg/G", "/", "f/tab", "x",
        "esc", "q",
    ];
    order
        .iter()
        .filter_map(|k| match *k {
            "H/L" => Some(format!("[H/L] scrub -/+{}s", controls.scrub_seconds)),
            "+/-" => Some(format!("[+/-] volume {}%", controls.volume_step)),
            _ => CONTROLS_MAP.get(*k).map(|v| format!("[{}] {}", k, v)),
        })
        .collect::<Vec<String>>()
        .join(" | ")
}

/// What a click on a recorded area means.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Hit {
    Action(Action),
    /// Proportional: the click offset picks the playback position.
    SeekBar,
    /// Proportional: the click offset picks the volume.
    VolumeBar,
}

/// Clickable areas collected during the last draw.
#[derive(Debug, Default)]
pub struct HitMap {
    areas: Vec<(Rect, Hit)>,
}

impl HitMap {
    pub fn clear(&mut self) {
        self.areas.clear();
    }

    pub fn push(&mut self, rect: Rect, hit: Hit) {
        if rect.width > 0 && rect.height > 0 {
            self.areas.push((rect, hit));
        }
    }

    /// Translate a click at (`column`, `row`) into an action.
    ///
    /// Areas recorded later are drawn on top and win.
    pub fn resolve(&self, column: u16, row: u16) -> Option<Action> {
        let pos = Position::new(column, row);
        let (rect, hit) = self.areas.iter().rev().find(|(r, _)| r.contains(pos))?;
        let offset = column - rect.x;
        match hit {
            Hit::Action(action) => Some(*action),
            Hit::SeekBar => seek_fraction(offset, rect.width).map(Action::Seek),
            Hit::VolumeBar => Some(Action::SetVolume(volume_from_click(offset, rect.width))),
        }
    }
}

/// Volume percent for a click `offset` cells into a bar `width` cells wide.
/// The first cell is 0%, the last cell is 100%.
pub fn volume_from_click(offset: u16, width: u16) -> u8 {
    if width <= 1 {
        return 100;
    }
    let fraction = f64::from(offset) / f64::from(width - 1);
    (fraction * 100.0).round().clamp(0.0, 100.0) as u8
}

/// Column of the seek indicator within a bar `width` cells wide.
pub fn circle_column(percent: f64, width: u16) -> u16 {
    if width == 0 {
        return 0;
    }
    let p = if percent.is_finite() {
        percent.clamp(0.0, 100.0)
    } else {
        0.0
    };
    (p / 100.0 * f64::from(width - 1)).round() as u16
}

fn seek_line(percent: f64, width: u16) -> Line<'static> {
    if width == 0 {
        return Line::default();
    }
    let circle = circle_column(percent, width) as usize;
    let width = width as usize;
    Line::from(vec![
        Span::raw("━".repeat(circle)).bold(),
        Span::raw("●").bold(),
        Span::raw("─".repeat(width - circle - 1)).dim(),
    ])
}

fn volume_bar(percent: u8) -> String {
    let filled = (usize::from(percent) * VOLUME_CELLS as usize + 50) / 100;
    let filled = filled.min(VOLUME_CELLS as usize);
    format!(
        "{}{}",
        "■".repeat(filled),
        "□".repeat(VOLUME_CELLS as usize - filled)
    )
}

/// Render the entire UI into the provided `frame`, recording hit areas.
pub fn draw(
    frame: &mut Frame,
    app: &App,
    ui_settings: &UiSettings,
    controls_settings: &ControlsSettings,
    hits: &mut HitMap,
) {
    hits.clear();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(3),
            Constraint::Length(5),
            Constraint::Length(5),
        ])
        .split(frame.area());

    draw_header(frame, chunks[0], ui_settings, hits);

    let body = if app.sidebar_open {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(32), Constraint::Min(10)])
            .split(chunks[1]);
        draw_folders(frame, app, cols[0], hits);
        cols[1]
    } else {
        chunks[1]
    };
    draw_songs(frame, app, body, hits);
    draw_search(frame, app, chunks[2], hits);
    draw_player(frame, app, chunks[3], hits);

    let footer = Paragraph::new(controls_text(controls_settings))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" controls ")
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                }),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(footer, chunks[4]);
}

fn draw_header(frame: &mut Frame, area: Rect, ui_settings: &UiSettings, hits: &mut HitMap) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" allegro ")
        .title_alignment(Alignment::Center);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let header = Paragraph::new(ui_settings.header_text.as_str()).alignment(Alignment::Center);
    frame.render_widget(header, inner);

    // Hamburger.
    let burger = Rect {
        x: inner.x,
        y: inner.y,
        width: inner.width.min(3),
        height: inner.height.min(1),
    };
    frame.render_widget(Paragraph::new("[≡]").bold(), burger);
    hits.push(burger, Hit::Action(Action::OpenSidebar));
}

fn draw_folders(frame: &mut Frame, app: &App, area: Rect, hits: &mut HitMap) {
    let close_label = " [x] ";
    let mut block = Block::bordered()
        .title(" folders ")
        .title(Line::from(close_label).right_aligned());
    if app.focus == Focus::Folders {
        block = block.border_style(Style::default().add_modifier(Modifier::BOLD));
    }
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let close_width = close_label.len() as u16;
    if area.width > close_width + 2 {
        let close = Rect {
            x: area.x + area.width - 1 - close_width,
            y: area.y,
            width: close_width,
            height: 1,
        };
        hits.push(close, Hit::Action(Action::CloseSidebar));
    }

    if app.folders.is_empty() {
        let hint = Paragraph::new("No folders configured.\nAdd [[library.folders]] to config.toml.")
            .dim()
            .wrap(Wrap { trim: true });
        frame.render_widget(hint, inner);
        return;
    }

    // Each card: title, description, spacer.
    for (i, card) in app.folders.iter().enumerate() {
        let y = inner.y + (i as u16) * 3;
        if y >= inner.bottom() {
            break;
        }
        let rect = Rect {
            x: inner.x,
            y,
            width: inner.width,
            height: 2.min(inner.bottom() - y),
        };

        let current = app.current_folder.as_deref() == Some(card.folder.as_str());
        let marker = if current { "♫ " } else { "  " };
        let mut title = Span::raw(format!("{marker}{}", card.label())).bold();
        if app.focus == Focus::Folders && app.folder_cursor == i {
            title = title.reversed();
        }
        let lines = vec![
            Line::from(title),
            Line::from(Span::raw(format!("  {}", card.description)).dim()),
        ];
        frame.render_widget(Paragraph::new(lines), rect);
        hits.push(rect, Hit::Action(Action::SelectFolder(i)));
    }
}

fn draw_songs(frame: &mut Frame, app: &App, area: Rect, hits: &mut HitMap) {
    let title = match app.current_folder.as_deref() {
        Some(folder) => format!(" songs: {folder} "),
        None => " songs ".to_string(),
    };
    let block = Block::default().borders(Borders::ALL).title(title);
    let inner = block.inner(area);

    if !app.has_tracks() {
        let hint = if app.current_folder.is_some() {
            "No songs in this folder yet."
        } else {
            "Pick a folder to load its songs."
        };
        frame.render_widget(Paragraph::new(hint).dim().block(block), area);
        return;
    }

    let display = app.visible_indices();

    // Center the selected item when possible by creating a visible window.
    // Only build ListItems for the visible window.
    let total = display.len();
    let list_height = inner.height as usize;
    let sel_pos = display.iter().position(|&i| i == app.selected).unwrap_or(0);
    let (start, end, selected_pos_in_visible) = if total <= list_height || list_height == 0 {
        (0, total, sel_pos)
    } else {
        let half = list_height / 2;
        let mut start = sel_pos.saturating_sub(half);
        if start + list_height > total {
            start = total - list_height;
        }
        (start, start + list_height, sel_pos - start)
    };

    let visible_items: Vec<ListItem> = display[start..end]
        .iter()
        .map(|&i| {
            let label = app.items[i].label.as_str();
            ListItem::new(Line::from(vec![
                Span::raw("♪ "),
                Span::raw(label.to_string()),
                Span::raw("  ▸ play now").dim(),
            ]))
        })
        .collect();

    for (row, &i) in display[start..end].iter().enumerate() {
        let rect = Rect {
            x: inner.x,
            y: inner.y + row as u16,
            width: inner.width,
            height: 1,
        };
        hits.push(rect, Hit::Action(Action::PlayItem(i)));
    }

    let list = List::new(visible_items)
        .block(block)
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");
    let mut state = ListState::default();
    if total > 0 && app.focus == Focus::Songs {
        state.select(Some(selected_pos_in_visible));
    }
    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_search(frame: &mut Frame, app: &App, area: Rect, hits: &mut HitMap) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(10), Constraint::Length(12)])
        .split(area);

    let focused = app.focus == Focus::Search;
    let mut text = app.search_input.clone();
    if focused {
        text.push('_');
    }
    let mut input_block = Block::bordered().title(" search ");
    if focused {
        input_block = input_block.border_style(Style::default().add_modifier(Modifier::BOLD));
    }
    frame.render_widget(Paragraph::new(text).block(input_block), cols[0]);
    hits.push(cols[0], Hit::Action(Action::FocusSearch));

    let button = Paragraph::new("search")
        .alignment(Alignment::Center)
        .block(Block::bordered());
    frame.render_widget(button, cols[1]);
    hits.push(cols[1], Hit::Action(Action::PerformSearch));
}

fn draw_player(frame: &mut Frame, app: &App, area: Rect, hits: &mut HitMap) {
    let block = Block::bordered().title(" player ").padding(Padding {
        left: 1,
        right: 1,
        top: 0,
        bottom: 0,
    });
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(inner);

    // Now playing + time.
    let time_width = app.time_label.chars().count() as u16;
    let info = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(1), Constraint::Length(time_width)])
        .split(rows[0]);
    frame.render_widget(Paragraph::new(app.now_playing.as_str()).bold(), info[0]);
    frame.render_widget(
        Paragraph::new(app.time_label.as_str()).alignment(Alignment::Right),
        info[1],
    );

    // Seek bar.
    frame.render_widget(
        Paragraph::new(seek_line(app.seek_percent, rows[1].width)),
        rows[1],
    );
    hits.push(rows[1], Hit::SeekBar);

    // Buttons.
    let play = match app.play_icon {
        PlayIcon::Play => "[ > ]",
        PlayIcon::Pause => "[ || ]",
    };
    let autoplay = if app.autoplay {
        "[x] autoplay"
    } else {
        "[ ] autoplay"
    };
    let volume_icon = match app.volume_icon {
        VolumeIcon::Volume => "[vol]",
        VolumeIcon::Mute => "[mute]",
    };
    let segments: Vec<(Span, Option<Hit>)> = vec![
        (Span::raw("[|<]"), Some(Hit::Action(Action::Previous))),
        (Span::raw(" "), None),
        (Span::raw(play).bold(), Some(Hit::Action(Action::TogglePlay))),
        (Span::raw(" "), None),
        (Span::raw("[>|]"), Some(Hit::Action(Action::Next))),
        (Span::raw("    "), None),
        (Span::raw(autoplay), Some(Hit::Action(Action::ToggleAutoplay))),
        (Span::raw("    "), None),
        (Span::raw(volume_icon), Some(Hit::Action(Action::ToggleMute))),
        (Span::raw(" "), None),
        (Span::raw(volume_bar(app.volume_percent)), Some(Hit::VolumeBar)),
        (Span::raw(format!(" {:>3}%", app.volume_percent)).dim(), None),
    ];

    let row = rows[2];
    let mut x = row.x;
    let mut spans = Vec::with_capacity(segments.len());
    for (span, hit) in segments {
        let width = span.width() as u16;
        if let Some(hit) = hit {
            let visible = width.min(row.right().saturating_sub(x));
            hits.push(
                Rect {
                    x,
                    y: row.y,
                    width: visible,
                    height: 1,
                },
                hit,
            );
        }
        x = x.saturating_add(width);
        spans.push(span);
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), row);
}
