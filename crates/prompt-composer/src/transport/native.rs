//! Native Drag Transport
//!
//! Follows platform drag events. The platform reports release position and
//! cancellation; `dragend` arrives after `drop` as well, so it only cancels
//! what is still armed.

use std::cell::RefCell;
use std::rc::Rc;

use crate::config::TransportKind;
use crate::error::ComposeResult;
use crate::model::DragPayload;
use crate::surface::Point;
use crate::transfer::{DropOutcome, TransferHandle};

use super::Transport;

#[derive(Default)]
pub struct NativeDrag {
    handle: Option<TransferHandle>,
}

impl NativeDrag {
    /// Open a session. Returns the text for the `text/plain` data transfer
    /// slot, or `None` when no session could start.
    pub fn drag_start(&mut self, payload: DragPayload) -> Option<String> {
        let handle = self.handle.as_ref()?;
        let data = match payload.to_transfer_data() {
            Ok(data) => data,
            Err(e) => {
                tracing::warn!(component = "NativeDrag", error = %e, "payload not serializable");
                return None;
            }
        };
        handle.begin_session(payload).then_some(data)
    }

    pub fn drag_over(&mut self, at: Point) -> bool {
        self.handle
            .as_ref()
            .is_some_and(|handle| handle.update_session(at))
    }

    pub fn drop(&mut self, at: Point) -> DropOutcome {
        match &self.handle {
            Some(handle) => handle.end_session(at),
            None => DropOutcome::Ignored,
        }
    }

    pub fn drag_end(&mut self) -> DropOutcome {
        match &self.handle {
            Some(handle) if handle.cancel_session() => DropOutcome::Cancelled,
            _ => DropOutcome::Ignored,
        }
    }
}

#[derive(Clone, Default)]
pub struct NativeTransport(Rc<RefCell<NativeDrag>>);

impl NativeTransport {
    pub fn drag_start(&self, payload: DragPayload) -> Option<String> {
        self.0.borrow_mut().drag_start(payload)
    }

    pub fn drag_over(&self, at: Point) -> bool {
        self.0.borrow_mut().drag_over(at)
    }

    pub fn drop(&self, at: Point) -> DropOutcome {
        self.0.borrow_mut().drop(at)
    }

    pub fn drag_end(&self) -> DropOutcome {
        self.0.borrow_mut().drag_end()
    }
}

impl Transport for NativeTransport {
    fn kind(&self) -> TransportKind {
        TransportKind::Native
    }

    fn bind(&mut self, handle: TransferHandle) -> ComposeResult<()> {
        self.0.borrow_mut().handle = Some(handle);
        Ok(())
    }

    fn unbind(&mut self) {
        self.0.borrow_mut().handle = None;
    }
}
