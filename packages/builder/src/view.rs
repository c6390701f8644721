//! Panel and view-mode flags.
//!
//! These only gate which surfaces the host renders; nothing here touches
//! page data.

use serde::{Deserialize, Serialize};

/// Side panel of the editor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Panel {
    Blocks,
    Settings,
    Themes,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Editor,
    Analytics,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewState {
    pub active_panel: Option<Panel>,
    pub view: ViewMode,
    pub is_preview: bool,
    pub is_support_open: bool,
    pub is_create_page_open: bool,
}

impl ViewState {
    pub fn set_active_panel(&mut self, panel: Option<Panel>) {
        self.active_panel = panel;
    }

    /// Open `panel`, or close it if it is already the open one
    pub fn toggle_panel(&mut self, panel: Panel) {
        self.active_panel = match self.active_panel {
            Some(current) if current == panel => None,
            _ => Some(panel),
        };
    }

    /// Leaving the editor keeps the active panel; hosts hide it themselves
    pub fn set_view(&mut self, view: ViewMode) {
        self.view = view;
    }

    pub fn toggle_preview(&mut self) {
        self.is_preview = !self.is_preview;
    }
}
