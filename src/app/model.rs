//! Application model types: `App`, `MediaState` and the UI flags.
//!
//! The `App` struct holds the folder cards, the current catalog and its
//! rendered list, and a mirror of the media element state. Methods are plain
//! state transitions; anything that needs I/O is returned as an [`Effect`].

use tracing::{debug, error, info};
use url::Url;

use crate::catalog::{Catalog, CatalogError};
use crate::config::FolderCard;

use super::effect::Effect;
use super::search::{SongItem, apply_filter, normalize_query};

/// Mirror of the media element: what is loaded and where it is.
#[derive(Debug, Clone)]
pub struct MediaState {
    pub src: Option<Url>,
    pub paused: bool,
    /// Seconds.
    pub current_time: f64,
    /// Seconds, NaN until known.
    pub duration: f64,
    /// `0.0..=1.0`
    pub volume: f64,
    pub muted: bool,
}

impl Default for MediaState {
    fn default() -> Self {
        Self {
            src: None,
            paused: true,
            current_time: 0.0,
            duration: f64::NAN,
            volume: 1.0,
            muted: false,
        }
    }
}

impl MediaState {
    /// Setting a new source resets position and pauses.
    pub fn load(&mut self, src: Url, duration: f64) {
        self.src = Some(src);
        self.paused = true;
        self.current_time = 0.0;
        self.duration = duration;
    }
}

/// Icon on the play button.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum PlayIcon {
    #[default]
    Play,
    Pause,
}

/// Icon on the volume button.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum VolumeIcon {
    #[default]
    Volume,
    Mute,
}

/// Which panel receives typed keys.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Songs,
    Folders,
    Search,
}

/// The main application model.
pub struct App {
    pub base_url: Url,
    pub folders: Vec<FolderCard>,
    pub folder_cursor: usize,
    /// Folder that `play` resolves paths against. Set as soon as a card is
    /// chosen, before its catalog arrives.
    pub current_folder: Option<String>,

    pub catalog: Catalog,
    pub items: Vec<SongItem>,
    pub selected: usize,

    pub media: MediaState,
    pub autoplay: bool,
    pub play_icon: PlayIcon,
    pub volume_icon: VolumeIcon,
    pub volume_percent: u8,

    pub now_playing: String,
    pub time_label: String,
    pub seek_percent: f64,

    pub sidebar_open: bool,
    pub focus: Focus,
    pub search_input: String,

    pub(super) probe_seq: u64,
}

impl App {
    /// Create a new `App` over the given folder cards.
    pub fn new(base_url: Url, folders: Vec<FolderCard>) -> Self {
        Self {
            base_url,
            folders,
            folder_cursor: 0,
            current_folder: None,

            catalog: Catalog::default(),
            items: Vec::new(),
            selected: 0,

            media: MediaState::default(),
            autoplay: false,
            play_icon: PlayIcon::Play,
            volume_icon: VolumeIcon::Volume,
            volume_percent: 100,

            now_playing: String::new(),
            time_label: "00:00/00:00".to_string(),
            seek_percent: 0.0,

            sidebar_open: true,
            focus: Focus::Songs,
            search_input: String::new(),

            probe_seq: 0,
        }
    }

    /// Choose folder card `idx` and request its catalog.
    pub fn select_folder(&mut self, idx: usize) -> Vec<Effect> {
        let Some(card) = self.folders.get(idx) else {
            return Vec::new();
        };
        let folder = card.folder.clone();
        info!(folder = %folder, "Selecting folder");
        self.folder_cursor = idx;
        self.current_folder = Some(folder.clone());
        vec![Effect::LoadCatalog { folder }]
    }

    /// Apply the outcome of a catalog fetch.
    ///
    /// On success the list is rebuilt from scratch and the first track is
    /// loaded without starting playback. Failures are only logged.
    pub fn catalog_loaded(
        &mut self,
        folder: &str,
        result: Result<Catalog, CatalogError>,
    ) -> Vec<Effect> {
        let catalog = match result {
            Ok(catalog) => catalog,
            Err(e) => {
                error!(folder, error = %e, "Failed to load catalog");
                return Vec::new();
            }
        };

        debug!(folder = %catalog.folder, tracks = catalog.len(), "Catalog loaded");
        self.catalog = catalog;
        self.rebuild_list();

        match self.catalog.stem_at(0).map(str::to_string) {
            Some(first) => self.play(&first, false),
            None => Vec::new(),
        }
    }

    fn rebuild_list(&mut self) {
        self.items = self
            .catalog
            .tracks
            .iter()
            .map(|t| SongItem::new(t.stem()))
            .collect();
        self.selected = 0;
    }

    /// Play the list row at `idx` by its label.
    pub fn play_item(&mut self, idx: usize) -> Vec<Effect> {
        let Some(item) = self.items.get(idx) else {
            return Vec::new();
        };
        let label = item.label.trim().to_string();
        self.selected = idx;
        self.play(&label, true)
    }

    /// Run the search box query over the rendered labels.
    pub fn perform_search(&mut self) {
        let query = normalize_query(&self.search_input);
        apply_filter(&mut self.items, &query);
        debug!(query = %query, visible = self.visible_indices().len(), "Search applied");
        self.ensure_selected_visible();
    }

    /// Indices of the list rows currently shown.
    pub fn visible_indices(&self) -> Vec<usize> {
        self.items
            .iter()
            .enumerate()
            .filter(|(_, item)| item.visible)
            .map(|(i, _)| i)
            .collect()
    }

    /// Return the next visible index after `current`. Wraps around to the first element.
    pub fn next_in_view_from(&self, current: usize) -> Option<usize> {
        let display = self.visible_indices();
        if display.is_empty() {
            return None;
        }

        let pos = display.iter().position(|&i| i == current);
        match pos {
            Some(p) => Some(display[(p + 1) % display.len()]),
            None => Some(display[0]),
        }
    }

    /// Return the previous visible index before `current`. Wraps around to the last element.
    pub fn prev_in_view_from(&self, current: usize) -> Option<usize> {
        let display = self.visible_indices();
        if display.is_empty() {
            return None;
        }

        let pos = display.iter().position(|&i| i == current);
        match pos {
            Some(0) => Some(display[display.len() - 1]),
            Some(p) => Some(display[p - 1]),
            None => Some(display[display.len() - 1]),
        }
    }

    /// Move the list cursor to the next visible row.
    pub fn cursor_down(&mut self) {
        if let Some(next) = self.next_in_view_from(self.selected) {
            self.selected = next;
        }
    }

    /// Move the list cursor to the previous visible row.
    pub fn cursor_up(&mut self) {
        if let Some(prev) = self.prev_in_view_from(self.selected) {
            self.selected = prev;
        }
    }

    pub fn cursor_top(&mut self) {
        if let Some(&first) = self.visible_indices().first() {
            self.selected = first;
        }
    }

    pub fn cursor_bottom(&mut self) {
        if let Some(&last) = self.visible_indices().last() {
            self.selected = last;
        }
    }

    /// Ensure that `selected` is a visible row, otherwise move it to the first one.
    fn ensure_selected_visible(&mut self) {
        let display = self.visible_indices();
        if display.is_empty() {
            self.selected = 0;
            return;
        }

        if !display.contains(&self.selected) {
            self.selected = display[0];
        }
    }

    pub fn folder_cursor_next(&mut self) {
        if !self.folders.is_empty() {
            self.folder_cursor = (self.folder_cursor + 1) % self.folders.len();
        }
    }

    pub fn folder_cursor_prev(&mut self) {
        if !self.folders.is_empty() {
            self.folder_cursor = self
                .folder_cursor
                .checked_sub(1)
                .unwrap_or(self.folders.len() - 1);
        }
    }

    pub fn open_sidebar(&mut self) {
        self.sidebar_open = true;
        self.focus = Focus::Folders;
    }

    pub fn close_sidebar(&mut self) {
        self.sidebar_open = false;
        if self.focus == Focus::Folders {
            self.focus = Focus::Songs;
        }
    }

    /// Return true if the current catalog has any tracks.
    pub fn has_tracks(&self) -> bool {
        !self.catalog.is_empty()
    }
}
