//! Pane State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity. The composition
//! core writes view models here through the render surface; components read
//! them.

use leptos::prelude::*;
use prompt_composer::{BoardView, SourceListView};
use reactive_stores::Store;

/// Everything the two panes display
#[derive(Clone, Debug, Default, Store)]
pub struct PaneState {
    /// Grouped source items, or the empty placeholder
    pub source: SourceListView,
    /// Cards on the target board
    pub board: BoardView,
    /// A drag currently hovers the drop area
    pub drop_hover: bool,
    /// The host completion signal has fired
    pub initialized: bool,
}

/// Type alias for the store
pub type PaneStore = Store<PaneState>;

pub fn store_set_source(store: &PaneStore, view: SourceListView) {
    *store.source().write() = view;
}

pub fn store_set_board(store: &PaneStore, view: BoardView) {
    *store.board().write() = view;
}

pub fn store_set_drop_hover(store: &PaneStore, hovering: bool) {
    if store.drop_hover().get_untracked() != hovering {
        *store.drop_hover().write() = hovering;
    }
}

pub fn store_set_initialized(store: &PaneStore) {
    *store.initialized().write() = true;
}

/// Reset everything the panes show
pub fn store_clear(store: &PaneStore) {
    *store.source().write() = SourceListView::Empty;
    *store.board().write() = BoardView::default();
    *store.drop_hover().write() = false;
}
