//! Test fakes shared by the unit tests.

use std::cell::{Cell, RefCell};
use std::future::Future;
use std::rc::Rc;

use serde_json::json;

use crate::config::{HostConfig, TransportKind};
use crate::error::ComposeResult;
use crate::model::{Card, CardId, DragPayload};
use crate::surface::{BoardView, Rect, SourceListView, Surface, SurfaceRef};
use crate::target_board::{DropRejection, DropTarget};
use crate::transfer::TransferHandle;
use crate::transport::Transport;

pub fn block_on<F: Future>(future: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .build()
        .expect("failed to build test runtime")
        .block_on(future)
}

pub fn cars_json() -> serde_json::Value {
    json!({
        "buttonGroups": [
            {
                "groupLabel": "Cars",
                "defaultExpanded": true,
                "buttons": [{ "label": "Audi", "paramName": "P_Brand" }]
            }
        ]
    })
}

pub fn cars_config() -> HostConfig {
    HostConfig::from_value(&cars_json())
}

/// Surface that records every draw
#[derive(Default)]
pub struct RecordingSurface {
    source_lists: RefCell<Vec<SourceListView>>,
    boards: RefCell<Vec<BoardView>>,
    bounds: Cell<Option<Rect>>,
    hover: Cell<bool>,
    clears: Cell<usize>,
}

impl RecordingSurface {
    /// A surface whose drop area is not laid out yet
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn with_bounds(bounds: Rect) -> Rc<Self> {
        let surface = Self::default();
        surface.bounds.set(Some(bounds));
        Rc::new(surface)
    }

    pub fn handle(self: &Rc<Self>) -> SurfaceRef {
        self.clone()
    }

    pub fn set_bounds(&self, bounds: Option<Rect>) {
        self.bounds.set(bounds);
    }

    pub fn last_source_list(&self) -> Option<SourceListView> {
        self.source_lists.borrow().last().cloned()
    }

    pub fn source_list_draws(&self) -> usize {
        self.source_lists.borrow().len()
    }

    pub fn last_board(&self) -> Option<BoardView> {
        self.boards.borrow().last().cloned()
    }

    pub fn board_draws(&self) -> usize {
        self.boards.borrow().len()
    }

    pub fn hovering(&self) -> bool {
        self.hover.get()
    }

    pub fn clears(&self) -> usize {
        self.clears.get()
    }
}

impl Surface for RecordingSurface {
    fn draw_source_list(&self, view: SourceListView) {
        self.source_lists.borrow_mut().push(view);
    }

    fn draw_target_board(&self, view: BoardView) {
        self.boards.borrow_mut().push(view);
    }

    fn drop_zone_bounds(&self) -> Option<Rect> {
        self.bounds.get()
    }

    fn set_drop_hover(&self, hovering: bool) {
        self.hover.set(hovering);
    }

    fn clear(&self) {
        self.clears.set(self.clears.get() + 1);
    }
}

/// Drop target that counts deliveries and dedups by key
#[derive(Default)]
pub struct CountingTarget {
    pub calls: usize,
    pub keys: Vec<String>,
    /// Reject everything as not ready
    pub closed: bool,
}

impl DropTarget for CountingTarget {
    fn accept_drop(&mut self, payload: DragPayload) -> Result<Card, DropRejection> {
        self.calls += 1;
        if self.closed {
            return Err(DropRejection::NotReady);
        }
        if self.keys.iter().any(|k| k == payload.key()) {
            return Err(DropRejection::Duplicate);
        }
        self.keys.push(payload.key().to_string());
        Ok(Card::new(CardId(self.keys.len() as u32), payload.item))
    }
}

/// Transport that only counts bind/unbind calls
#[derive(Clone, Default)]
pub struct CountingTransport {
    binds: Rc<Cell<usize>>,
    unbinds: Rc<Cell<usize>>,
}

impl CountingTransport {
    pub fn binds(&self) -> usize {
        self.binds.get()
    }

    pub fn unbinds(&self) -> usize {
        self.unbinds.get()
    }
}

impl Transport for CountingTransport {
    fn kind(&self) -> TransportKind {
        TransportKind::Pointer
    }

    fn bind(&mut self, _handle: TransferHandle) -> ComposeResult<()> {
        self.binds.set(self.binds.get() + 1);
        Ok(())
    }

    fn unbind(&mut self) {
        self.unbinds.set(self.unbinds.get() + 1);
    }
}
