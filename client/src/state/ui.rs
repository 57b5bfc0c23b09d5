//! Local UI chrome state (tabs, sidebar, selected history entry).
//!
//! DESIGN
//! ======
//! Keeps transient presentation concerns out of panel state so the shell
//! can route history selections without owning either form.

use prompts::{HistoryItem, HistoryKind};

use super::panel::{CaptionPanel, PostPanel};

#[cfg(test)]
#[path = "ui_test.rs"]
mod ui_test;

/// Generator tab shown in the main area.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ActiveTab {
    #[default]
    Caption,
    Post,
}

impl ActiveTab {
    #[must_use]
    pub fn for_kind(kind: HistoryKind) -> Self {
        match kind {
            HistoryKind::Caption => Self::Caption,
            HistoryKind::Post => Self::Post,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UiState {
    pub active_tab: ActiveTab,
    /// Id of the history entry last selected, highlighted in the sidebar.
    pub selected_history: Option<String>,
    /// Mobile sidebar drawer.
    pub sidebar_open: bool,
}

/// Route a history selection: switch to the entry's tab and pre-fill that
/// panel's query.
pub fn select_history(item: &HistoryItem, ui: &mut UiState, caption: &mut CaptionPanel, post: &mut PostPanel) {
    ui.active_tab = ActiveTab::for_kind(item.kind);
    ui.selected_history = Some(item.id.clone());
    ui.sidebar_open = false;
    match item.kind {
        HistoryKind::Caption => caption.select_query(&item.query),
        HistoryKind::Post => post.select_query(&item.query),
    }
}
