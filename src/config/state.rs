// src/config/state.rs
use super::options::AppOptions;

#[derive(Clone, Debug)]
pub struct GuiState {
    /// Context (tab) currently shown in the viewer
    pub current_tab: Option<u64>,

    /// Row index into the current record list
    pub selected_row: Option<usize>,

    pub window_w: u32,
    pub window_h: u32,

    /// Live log panel expanded?
    pub log_open: bool,

    /// Capture file typed into the toolbar
    pub capture_path: String,
}

impl Default for GuiState {
    fn default() -> Self {
        Self {
            current_tab: None,
            selected_row: None,
            window_w: 1100,
            window_h: 700,
            log_open: false,
            capture_path: s!(),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct AppState {
    pub options: AppOptions,
    pub gui: GuiState,
}
