//! DOM Transports
//!
//! Connects browser events to the core's drag transports.

use std::cell::RefCell;
use std::rc::Rc;

use dom_dragdrop::GlobalPointerListeners;
use prompt_composer::{
    BuiltinLoader, ComposeError, ComposeResult, NativeTransport, Point, PointerTransport, TransferHandle,
    Transport, TransportKind,
};

/// Pointer tracking with document-level move/up listeners that live exactly
/// as long as the transport is bound.
#[derive(Clone)]
pub struct DomPointerTransport {
    tracker: PointerTransport,
    listeners: Rc<RefCell<Option<GlobalPointerListeners>>>,
}

impl DomPointerTransport {
    pub fn new(tracker: PointerTransport) -> Self {
        Self {
            tracker,
            listeners: Rc::new(RefCell::new(None)),
        }
    }
}

impl Transport for DomPointerTransport {
    fn kind(&self) -> TransportKind {
        TransportKind::Pointer
    }

    fn bind(&mut self, handle: TransferHandle) -> ComposeResult<()> {
        self.tracker.bind(handle)?;

        let on_move = self.tracker.clone();
        let on_up = self.tracker.clone();
        let listeners = GlobalPointerListeners::bind(
            move |x, y| {
                on_move.pointer_move(Point::new(x, y));
            },
            move |x, y| {
                let outcome = on_up.pointer_up(Point::new(x, y));
                tracing::debug!(component = "PointerTransport", ?outcome, "pointer released");
            },
        )
        .ok_or_else(|| ComposeError::optional("PointerTransport", "document listeners unavailable"))?;

        *self.listeners.borrow_mut() = Some(listeners);
        Ok(())
    }

    fn unbind(&mut self) {
        self.listeners.borrow_mut().take();
        self.tracker.unbind();
    }
}

/// The input side the panes talk to
#[derive(Clone)]
pub enum DragInput {
    Pointer(PointerTransport),
    Native(NativeTransport),
}

impl DragInput {
    pub fn new(kind: TransportKind, threshold: f64) -> Self {
        match kind {
            TransportKind::Pointer => DragInput::Pointer(PointerTransport::new(threshold)),
            TransportKind::Native => DragInput::Native(NativeTransport::default()),
        }
    }

    pub fn is_native(&self) -> bool {
        matches!(self, DragInput::Native(_))
    }

    /// Loader whose transfer controller is driven by this input
    pub fn loader(&self) -> BuiltinLoader {
        match self {
            DragInput::Pointer(tracker) => {
                BuiltinLoader::new().with_transport(DomPointerTransport::new(tracker.clone()))
            }
            DragInput::Native(native) => BuiltinLoader::new().with_transport(native.clone()),
        }
    }
}
