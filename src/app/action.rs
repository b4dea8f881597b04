use super::effect::Effect;
use super::model::{App, Focus};

/// A user intent, produced by a key binding or by a click on a hit area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    OpenSidebar,
    CloseSidebar,
    SelectFolder(usize),
    ActivateFolderCursor,
    FolderCursorNext,
    FolderCursorPrev,

    PlayItem(usize),
    PlaySelected,
    CursorDown,
    CursorUp,
    CursorTop,
    CursorBottom,

    TogglePlay,
    Previous,
    Next,
    ToggleAutoplay,
    /// Click on the seek bar, as a fraction of its width.
    Seek(f64),
    ScrubBy(i64),
    SetVolume(u8),
    StepVolume(i16),
    ToggleMute,

    FocusSearch,
    SearchInput(char),
    SearchBackspace,
    PerformSearch,
    Focus(Focus),
}

impl App {
    /// Apply `action` and return the side effects it needs.
    pub fn dispatch(&mut self, action: Action) -> Vec<Effect> {
        match action {
            Action::OpenSidebar => self.open_sidebar(),
            Action::CloseSidebar => self.close_sidebar(),
            Action::SelectFolder(idx) => return self.select_folder(idx),
            Action::ActivateFolderCursor => return self.select_folder(self.folder_cursor),
            Action::FolderCursorNext => self.folder_cursor_next(),
            Action::FolderCursorPrev => self.folder_cursor_prev(),

            Action::PlayItem(idx) => return self.play_item(idx),
            Action::PlaySelected => {
                if self.items.get(self.selected).is_some_and(|i| i.visible) {
                    return self.play_item(self.selected);
                }
            }
            Action::CursorDown => self.cursor_down(),
            Action::CursorUp => self.cursor_up(),
            Action::CursorTop => self.cursor_top(),
            Action::CursorBottom => self.cursor_bottom(),

            Action::TogglePlay => return self.toggle_play(),
            Action::Previous => return self.previous(),
            Action::Next => return self.next(),
            Action::ToggleAutoplay => self.toggle_autoplay(),
            Action::Seek(fraction) => return self.seek(fraction),
            Action::ScrubBy(secs) => return self.scrub(secs),
            Action::SetVolume(percent) => return self.set_volume(percent),
            Action::StepVolume(delta) => return self.step_volume(delta),
            Action::ToggleMute => return self.toggle_mute(),

            Action::FocusSearch => self.focus = Focus::Search,
            Action::SearchInput(c) => self.search_input.push(c),
            Action::SearchBackspace => {
                self.search_input.pop();
            }
            Action::PerformSearch => self.perform_search(),
            Action::Focus(focus) => {
                if focus == Focus::Folders {
                    self.open_sidebar();
                } else {
                    self.focus = focus;
                }
            }
        }
        Vec::new()
    }
}
