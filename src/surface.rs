//! Store-backed Render Surface

use leptos::html;
use leptos::prelude::*;
use prompt_composer::{BoardView, Rect, SourceListView, Surface};

use crate::store::{
    store_clear, store_set_board, store_set_drop_hover, store_set_source, PaneStore,
};

/// Renders the core's view models by writing them into the pane store.
/// The drop area is whatever element `drop_zone` is bound to.
#[derive(Clone, Copy)]
pub struct StoreSurface {
    pub store: PaneStore,
    pub drop_zone: NodeRef<html::Div>,
}

impl Surface for StoreSurface {
    fn draw_source_list(&self, view: SourceListView) {
        store_set_source(&self.store, view);
    }

    fn draw_target_board(&self, view: BoardView) {
        store_set_board(&self.store, view);
    }

    fn drop_zone_bounds(&self) -> Option<Rect> {
        let el = self.drop_zone.get_untracked()?;
        let (left, top, width, height) = dom_dragdrop::element_bounds(&el);
        Some(Rect::new(left, top, width, height))
    }

    fn set_drop_hover(&self, hovering: bool) {
        store_set_drop_hover(&self.store, hovering);
    }

    fn clear(&self) {
        store_clear(&self.store);
    }
}
