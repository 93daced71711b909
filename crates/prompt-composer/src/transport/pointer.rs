//! Synthetic Pointer Transport
//!
//! Tracks down/move/up itself. A press only becomes a drag once the pointer
//! travels past the threshold, so plain clicks never open a session.

use std::cell::RefCell;
use std::rc::Rc;

use crate::config::{TransportKind, DEFAULT_DRAG_THRESHOLD_PX};
use crate::error::ComposeResult;
use crate::model::DragPayload;
use crate::surface::Point;
use crate::transfer::{DropOutcome, TransferHandle};

use super::Transport;

#[derive(Debug, Clone)]
struct PendingPress {
    payload: DragPayload,
    start: Point,
}

pub struct PointerTracker {
    handle: Option<TransferHandle>,
    threshold: f64,
    pending: Option<PendingPress>,
    dragging: bool,
}

impl Default for PointerTracker {
    fn default() -> Self {
        Self::new(DEFAULT_DRAG_THRESHOLD_PX)
    }
}

impl PointerTracker {
    pub fn new(threshold: f64) -> Self {
        Self {
            handle: None,
            threshold,
            pending: None,
            dragging: false,
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Record a press on a source item
    pub fn pointer_down(&mut self, payload: DragPayload, at: Point) {
        if self.handle.is_none() || self.dragging {
            return;
        }
        self.pending = Some(PendingPress { payload, start: at });
    }

    /// Promote a pending press into a session once past the threshold, then
    /// forward positions. Returns whether the pointer hovers the drop area.
    pub fn pointer_move(&mut self, at: Point) -> bool {
        let Some(handle) = self.handle.clone() else {
            return false;
        };

        if !self.dragging {
            let Some(press) = &self.pending else {
                return false;
            };
            let dx = (at.x - press.start.x).abs();
            let dy = (at.y - press.start.y).abs();
            if dx <= self.threshold && dy <= self.threshold {
                return false;
            }
            if !handle.begin_session(press.payload.clone()) {
                self.pending = None;
                return false;
            }
            self.dragging = true;
        }
        handle.update_session(at)
    }

    /// End the press. A press that never became a drag is a click.
    pub fn pointer_up(&mut self, at: Point) -> DropOutcome {
        let was_dragging = std::mem::replace(&mut self.dragging, false);
        self.pending = None;
        match (&self.handle, was_dragging) {
            (Some(handle), true) => handle.end_session(at),
            _ => DropOutcome::Ignored,
        }
    }

    fn connect(&mut self, handle: TransferHandle) {
        self.handle = Some(handle);
    }

    fn disconnect(&mut self) {
        self.pending = None;
        self.dragging = false;
        self.handle = None;
    }
}

/// Shared pointer tracker, cloned into every listener that feeds it
#[derive(Clone, Default)]
pub struct PointerTransport(Rc<RefCell<PointerTracker>>);

impl PointerTransport {
    pub fn new(threshold: f64) -> Self {
        Self(Rc::new(RefCell::new(PointerTracker::new(threshold))))
    }

    pub fn pointer_down(&self, payload: DragPayload, at: Point) {
        self.0.borrow_mut().pointer_down(payload, at)
    }

    pub fn pointer_move(&self, at: Point) -> bool {
        self.0.borrow_mut().pointer_move(at)
    }

    pub fn pointer_up(&self, at: Point) -> DropOutcome {
        self.0.borrow_mut().pointer_up(at)
    }

    pub fn is_dragging(&self) -> bool {
        self.0.borrow().is_dragging()
    }

    pub fn is_pending(&self) -> bool {
        self.0.borrow().is_pending()
    }
}

impl Transport for PointerTransport {
    fn kind(&self) -> TransportKind {
        TransportKind::Pointer
    }

    fn bind(&mut self, handle: TransferHandle) -> ComposeResult<()> {
        self.0.borrow_mut().connect(handle);
        Ok(())
    }

    fn unbind(&mut self) {
        self.0.borrow_mut().disconnect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ItemDescriptor;

    fn payload() -> DragPayload {
        DragPayload::new(&ItemDescriptor::new("Audi", "Cars"), 0)
    }

    #[test]
    fn test_unbound_tracker_ignores_presses() {
        let mut tracker = PointerTracker::default();
        tracker.pointer_down(payload(), Point::new(0.0, 0.0));
        assert!(!tracker.is_pending());
        assert!(!tracker.pointer_move(Point::new(50.0, 50.0)));
        assert!(!tracker.is_dragging());
        assert_eq!(tracker.pointer_up(Point::new(50.0, 50.0)), DropOutcome::Ignored);
    }

    #[test]
    fn test_transport_kind() {
        assert_eq!(PointerTransport::new(3.0).kind(), TransportKind::Pointer);
    }
}
