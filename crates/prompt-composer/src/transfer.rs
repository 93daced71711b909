//! Transfer Controller
//!
//! Mediates one drag session at a time between the source list and the
//! target board:
//!
//! `Idle -> Armed(payload) -> Dropped | Cancelled -> Idle`
//!
//! A payload is discarded the moment its session ends, so a session turns
//! into at most one card. Out-of-order calls from the transport layer are
//! no-ops.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use async_trait::async_trait;

use crate::component::Component;
use crate::config::HostConfig;
use crate::error::{ComposeError, ComposeResult};
use crate::lifecycle::{ComponentState, Lifecycle};
use crate::model::{CardId, DragPayload};
use crate::source_list::SourceList;
use crate::surface::{Point, SurfaceRef};
use crate::target_board::{DropRejection, DropTarget};
use crate::transport::Transport;

const COMPONENT: &str = "TransferController";

#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    Idle,
    Armed {
        payload: DragPayload,
        /// Advisory hover flag, recomputed on every update
        over_target: bool,
    },
}

/// What ending a session did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropOutcome {
    /// A new card was created
    Added(CardId),
    /// Released over the board but the key already exists
    Duplicate,
    /// Released over a board that cannot take cards
    Rejected,
    /// Released outside the drop area, or cancelled
    Cancelled,
    /// No session was armed
    Ignored,
}

pub struct TransferController {
    lifecycle: Lifecycle,
    source: Option<Rc<RefCell<SourceList>>>,
    target: Option<Rc<RefCell<dyn DropTarget>>>,
    transport: Option<Box<dyn Transport>>,
    surface: Option<SurfaceRef>,
    session: SessionState,
    attached: bool,
    this: Weak<RefCell<TransferController>>,
}

impl TransferController {
    pub fn new(transport: Option<Box<dyn Transport>>) -> Self {
        Self {
            lifecycle: Lifecycle::new(COMPONENT),
            source: None,
            target: None,
            transport,
            surface: None,
            session: SessionState::Idle,
            attached: false,
            this: Weak::new(),
        }
    }

    /// Inject the panes this controller moves items between
    pub fn connect(&mut self, source: Rc<RefCell<SourceList>>, target: Rc<RefCell<dyn DropTarget>>) {
        self.source = Some(source);
        self.target = Some(target);
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    pub fn begin_session(&mut self, payload: DragPayload) -> bool {
        if !self.attached {
            tracing::debug!(component = COMPONENT, "handlers not attached, session refused");
            return false;
        }
        if let SessionState::Armed { payload: current, .. } = &self.session {
            tracing::debug!(component = COMPONENT, armed = current.key(), "session already armed, ignoring begin");
            return false;
        }
        tracing::info!(component = COMPONENT, key = payload.key(), source_index = payload.source_index, "drag started");
        self.session = SessionState::Armed {
            payload,
            over_target: false,
        };
        true
    }

    /// Recompute whether the session hovers the drop area. Returns the new
    /// hover flag, `false` when idle.
    pub fn update_session(&mut self, at: Point) -> bool {
        let inside = self.is_over_drop_zone(at);
        let SessionState::Armed { over_target, .. } = &mut self.session else {
            return false;
        };
        if *over_target != inside {
            *over_target = inside;
            if let Some(surface) = &self.surface {
                surface.set_drop_hover(inside);
            }
        }
        inside
    }

    pub fn end_session(&mut self, at: Point) -> DropOutcome {
        let Some(payload) = self.take_payload() else {
            tracing::debug!(component = COMPONENT, "end_session while idle, ignoring");
            return DropOutcome::Ignored;
        };

        if !self.is_over_drop_zone(at) {
            tracing::info!(component = COMPONENT, key = payload.key(), "released outside drop zone");
            return DropOutcome::Cancelled;
        }

        let Some(target) = &self.target else {
            return DropOutcome::Ignored;
        };
        let Ok(mut target) = target.try_borrow_mut() else {
            tracing::warn!(component = COMPONENT, "drop target busy, drop discarded");
            return DropOutcome::Ignored;
        };
        match target.accept_drop(payload) {
            Ok(card) => DropOutcome::Added(card.id),
            Err(DropRejection::Duplicate) => DropOutcome::Duplicate,
            Err(DropRejection::NotReady) => DropOutcome::Rejected,
        }
    }

    /// Abandon the armed session, if any
    pub fn cancel_session(&mut self) -> bool {
        match self.take_payload() {
            Some(payload) => {
                tracing::info!(component = COMPONENT, key = payload.key(), "drag cancelled");
                true
            }
            None => false,
        }
    }

    fn take_payload(&mut self) -> Option<DragPayload> {
        match std::mem::replace(&mut self.session, SessionState::Idle) {
            SessionState::Armed { payload, over_target } => {
                if over_target {
                    if let Some(surface) = &self.surface {
                        surface.set_drop_hover(false);
                    }
                }
                Some(payload)
            }
            SessionState::Idle => None,
        }
    }

    fn is_over_drop_zone(&self, at: Point) -> bool {
        self.surface
            .as_ref()
            .and_then(|s| s.drop_zone_bounds())
            .is_some_and(|bounds| bounds.has_area() && bounds.contains(at))
    }
}

#[async_trait(?Send)]
impl Component for TransferController {
    fn name(&self) -> &'static str {
        COMPONENT
    }

    fn state(&self) -> ComponentState {
        self.lifecycle.state()
    }

    async fn initialize(&mut self, _config: &HostConfig) -> ComposeResult<()> {
        self.lifecycle.transition(ComponentState::Initializing)?;

        let source_ready = self
            .source
            .as_ref()
            .is_some_and(|s| s.try_borrow().is_ok_and(|s| s.state().is_ready()));
        if !source_ready || self.target.is_none() {
            return Err(ComposeError::optional(COMPONENT, "source list or target board missing"));
        }

        tracing::info!(
            component = COMPONENT,
            transport = ?self.transport.as_ref().map(|t| t.kind()),
            "initialized, handlers attach on render"
        );
        self.lifecycle.transition(ComponentState::Ready)
    }

    /// Attach interaction handlers. Needs a laid-out drop area; until then
    /// the attachment is deferred to a later render. Never attaches twice.
    fn render(&mut self, surface: &SurfaceRef) -> ComposeResult<()> {
        if !self.lifecycle.state().is_ready() {
            return Err(ComposeError::IllegalTransition {
                component: COMPONENT,
                from: self.lifecycle.state(),
                to: ComponentState::Rendered,
            });
        }
        self.surface = Some(surface.clone());

        if self.attached {
            tracing::debug!(component = COMPONENT, "handlers already attached, skipping");
            return Ok(());
        }

        match surface.drop_zone_bounds() {
            Some(bounds) if bounds.has_area() => {}
            _ => {
                tracing::info!(component = COMPONENT, "drop zone has no size yet, attachment deferred");
                return Ok(());
            }
        }

        let handle = self
            .this
            .upgrade()
            .map(TransferHandle)
            .ok_or(ComposeError::NotConnected(COMPONENT))?;
        if let Some(transport) = self.transport.as_mut() {
            transport.bind(handle)?;
        }
        self.attached = true;
        self.lifecycle.transition(ComponentState::Rendered)?;
        tracing::info!(component = COMPONENT, "interaction handlers attached");
        Ok(())
    }

    fn destroy(&mut self) {
        if self.lifecycle.state() == ComponentState::Destroyed {
            return;
        }
        self.cancel_session();
        if self.attached {
            if let Some(transport) = self.transport.as_mut() {
                transport.unbind();
            }
        }
        self.attached = false;
        self.transport = None;
        self.surface = None;
        self.source = None;
        self.target = None;
        let _ = self.lifecycle.transition(ComponentState::Destroyed);
        tracing::info!(component = COMPONENT, "destroyed");
    }
}

/// Shared handle that transports drive sessions through
#[derive(Clone)]
pub struct TransferHandle(Rc<RefCell<TransferController>>);

impl TransferHandle {
    pub fn new(controller: TransferController) -> Self {
        let inner = Rc::new_cyclic(|this| {
            let mut controller = controller;
            controller.this = this.clone();
            RefCell::new(controller)
        });
        Self(inner)
    }

    pub fn state(&self) -> ComponentState {
        self.0.borrow().state()
    }

    pub fn is_attached(&self) -> bool {
        self.0.borrow().is_attached()
    }

    pub fn session(&self) -> SessionState {
        self.0.borrow().session().clone()
    }

    /// Snapshot a source item by its position in the list
    pub fn payload_for(&self, group_index: usize, item_index: usize) -> Option<DragPayload> {
        let controller = self.0.borrow();
        let source = controller.source.as_ref()?.try_borrow().ok()?;
        source.payload_for(group_index, item_index)
    }

    pub fn begin_session(&self, payload: DragPayload) -> bool {
        self.0.borrow_mut().begin_session(payload)
    }

    pub fn update_session(&self, at: Point) -> bool {
        self.0.borrow_mut().update_session(at)
    }

    pub fn end_session(&self, at: Point) -> DropOutcome {
        self.0.borrow_mut().end_session(at)
    }

    pub fn cancel_session(&self) -> bool {
        self.0.borrow_mut().cancel_session()
    }

    pub fn render(&self, surface: &SurfaceRef) -> ComposeResult<()> {
        self.0.borrow_mut().render(surface)
    }

    pub fn destroy(&self) {
        self.0.borrow_mut().destroy()
    }
}
