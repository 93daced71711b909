//! Composition Orchestrator
//!
//! Root coordinator. Loads the source list, then the target board, then the
//! transfer controller, each step gated on the previous one, and exposes one
//! lifecycle to the host.
//!
//! Readiness is reported in three stages:
//! - initialized: components constructed and configured (`on_ready` fires)
//! - rendered: both panes drawn into the surface
//! - interactive: drag handlers attached, which needs a laid-out drop area

use std::cell::RefCell;
use std::future::Future;
use std::rc::{Rc, Weak};

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

use crate::component::Component;
use crate::config::HostConfig;
use crate::error::{ComposeError, ComposeResult};
use crate::lifecycle::{ComponentState, Lifecycle};
use crate::model::{Card, CardId, Parameter};
use crate::source_list::SourceList;
use crate::surface::SurfaceRef;
use crate::target_board::TargetBoard;
use crate::transfer::{TransferController, TransferHandle};
use crate::transport::Transport;

const COMPONENT: &str = "Orchestrator";

/// Produces each component. The point where lazy loading can suspend or fail.
#[async_trait(?Send)]
pub trait ComponentLoader {
    async fn load_source_list(&self) -> ComposeResult<SourceList>;

    async fn load_target_board(&self) -> ComposeResult<TargetBoard>;

    async fn load_transfer(&self, config: &HostConfig) -> ComposeResult<TransferController>;
}

/// Loader for the built-in components
#[derive(Default)]
pub struct BuiltinLoader {
    transport: RefCell<Option<Box<dyn Transport>>>,
}

impl BuiltinLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Transport handed to the transfer controller
    pub fn with_transport(self, transport: impl Transport + 'static) -> Self {
        *self.transport.borrow_mut() = Some(Box::new(transport));
        self
    }
}

#[async_trait(?Send)]
impl ComponentLoader for BuiltinLoader {
    async fn load_source_list(&self) -> ComposeResult<SourceList> {
        Ok(SourceList::new())
    }

    async fn load_target_board(&self) -> ComposeResult<TargetBoard> {
        Ok(TargetBoard::new())
    }

    async fn load_transfer(&self, config: &HostConfig) -> ComposeResult<TransferController> {
        let transport = self.transport.borrow_mut().take();
        match &transport {
            Some(t) if t.kind() != config.transport => tracing::warn!(
                component = COMPONENT,
                configured = ?config.transport,
                provided = ?t.kind(),
                "transport differs from configuration"
            ),
            None => tracing::warn!(component = COMPONENT, "no transport provided, drag sessions must be driven directly"),
            _ => {}
        }
        Ok(TransferController::new(transport))
    }
}

/// Fires the host's completion callback at most once. If initialization is
/// abandoned before firing, the callback runs on drop.
pub struct CompletionSignal {
    callback: Option<Box<dyn FnOnce()>>,
}

impl CompletionSignal {
    pub fn new(callback: impl FnOnce() + 'static) -> Self {
        Self {
            callback: Some(Box::new(callback)),
        }
    }

    /// Returns false if already fired
    pub fn fire(&mut self) -> bool {
        match self.callback.take() {
            Some(callback) => {
                callback();
                true
            }
            None => false,
        }
    }
}

impl Drop for CompletionSignal {
    fn drop(&mut self) {
        if self.callback.is_some() {
            tracing::warn!(component = COMPONENT, "initialization abandoned, signalling completion");
            self.fire();
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Readiness {
    pub initialized: bool,
    pub rendered: bool,
    pub interactive: bool,
}

struct Inner {
    lifecycle: Lifecycle,
    config: HostConfig,
    source: Option<Rc<RefCell<SourceList>>>,
    board: Option<Rc<RefCell<TargetBoard>>>,
    transfer: Option<TransferHandle>,
    surface: Option<SurfaceRef>,
}

impl Inner {
    fn collect_parameters(&self) -> Vec<Parameter> {
        let Some(board) = &self.board else {
            return vec![];
        };
        match board.try_borrow() {
            Ok(board) if board.state().is_ready() => board.collect_parameters(),
            Ok(_) => vec![],
            Err(_) => {
                tracing::warn!(component = COMPONENT, "target board busy, no parameters collected");
                vec![]
            }
        }
    }
}

/// Capability handed to the host integration for reading parameters
#[derive(Clone)]
pub struct ParameterReporter {
    inner: Weak<RefCell<Inner>>,
}

impl ParameterReporter {
    /// Current parameters, empty once the composition is gone
    pub fn collect(&self) -> Vec<Parameter> {
        self.inner
            .upgrade()
            .map(|inner| inner.borrow().collect_parameters())
            .unwrap_or_default()
    }

    pub fn collect_json(&self) -> ComposeResult<String> {
        Ok(serde_json::to_string(&self.collect())?)
    }
}

#[derive(Clone)]
pub struct Orchestrator {
    inner: Rc<RefCell<Inner>>,
    loader: Rc<dyn ComponentLoader>,
}

impl Default for Orchestrator {
    fn default() -> Self {
        Self::new(BuiltinLoader::new())
    }
}

impl Orchestrator {
    pub fn new(loader: impl ComponentLoader + 'static) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                lifecycle: Lifecycle::new(COMPONENT),
                config: HostConfig::default(),
                source: None,
                board: None,
                transfer: None,
                surface: None,
            })),
            loader: Rc::new(loader),
        }
    }

    pub fn state(&self) -> ComponentState {
        self.inner.borrow().lifecycle.state()
    }

    pub fn config(&self) -> HostConfig {
        self.inner.borrow().config.clone()
    }

    /// Run the startup sequence. `on_ready` fires exactly once on every path,
    /// including when the returned future is dropped unfinished.
    pub fn initialize(
        &self,
        host_config: &Value,
        on_ready: impl FnOnce() + 'static,
    ) -> impl Future<Output = ()> + '_ {
        let done = CompletionSignal::new(on_ready);
        let config = HostConfig::from_value(host_config);
        self.run_initialize(config, done)
    }

    async fn run_initialize(&self, config: HostConfig, mut done: CompletionSignal) {
        let started = self.inner.borrow_mut().lifecycle.transition(ComponentState::Initializing);
        if let Err(e) = started {
            tracing::warn!(component = COMPONENT, error = %e, "initialize called out of order");
            done.fire();
            return;
        }

        self.inner.borrow_mut().config = config.clone();
        tracing::info!(component = COMPONENT, transport = ?config.transport, "initialization started");

        // Step 1: source list (mandatory)
        let source = match init_component(self.loader.load_source_list().await, &config).await {
            Ok(source) => Rc::new(RefCell::new(source)),
            Err(e) => {
                let e = as_fatal("SourceList", e);
                tracing::error!(component = COMPONENT, error = %e, "aborting composition");
                done.fire();
                return;
            }
        };
        if self.abandoned() {
            source.borrow_mut().destroy();
            done.fire();
            return;
        }
        self.inner.borrow_mut().source = Some(source.clone());
        tracing::info!(component = COMPONENT, "source list ready");

        // Step 2: target board (mandatory)
        let board = match init_component(self.loader.load_target_board().await, &config).await {
            Ok(board) => Rc::new(RefCell::new(board)),
            Err(e) => {
                let e = as_fatal("TargetBoard", e);
                tracing::error!(component = COMPONENT, error = %e, "aborting composition");
                done.fire();
                return;
            }
        };
        if self.abandoned() {
            board.borrow_mut().destroy();
            done.fire();
            return;
        }
        self.inner.borrow_mut().board = Some(board.clone());
        tracing::info!(component = COMPONENT, "target board ready");

        // Step 3: transfer controller (optional)
        let transfer = async {
            let mut controller = self.loader.load_transfer(&config).await?;
            controller.connect(source, board);
            controller.initialize(&config).await?;
            Ok::<_, ComposeError>(controller)
        }
        .await;
        if self.abandoned() {
            if let Ok(mut controller) = transfer {
                controller.destroy();
            }
            done.fire();
            return;
        }
        match transfer {
            Ok(controller) => {
                self.inner.borrow_mut().transfer = Some(TransferHandle::new(controller));
                tracing::info!(component = COMPONENT, "transfer controller ready");
            }
            Err(e) => {
                let e = match e {
                    e @ ComposeError::OptionalLoad { .. } => e,
                    other => ComposeError::optional("TransferController", other.to_string()),
                };
                tracing::warn!(component = COMPONENT, error = %e, "continuing without drag support");
            }
        }

        let ready = self.inner.borrow_mut().lifecycle.transition(ComponentState::Ready);
        if let Err(e) = ready {
            tracing::warn!(component = COMPONENT, error = %e, "could not mark ready");
        }
        tracing::info!(component = COMPONENT, "initialization complete");
        done.fire();
    }

    /// Draw both panes, then attach drag handlers. Idempotent.
    pub fn render(&self, surface: SurfaceRef) {
        let (source, board, transfer) = {
            let mut inner = self.inner.borrow_mut();
            match inner.lifecycle.state() {
                ComponentState::Unloaded | ComponentState::Destroyed => {
                    tracing::warn!(component = COMPONENT, state = ?inner.lifecycle.state(), "render skipped");
                    return;
                }
                _ => {}
            }
            inner.surface = Some(surface.clone());
            (inner.source.clone(), inner.board.clone(), inner.transfer.clone())
        };

        let mut panes_drawn = true;
        for pane in [
            source.map(|s| s as Rc<RefCell<dyn Component>>),
            board.map(|b| b as Rc<RefCell<dyn Component>>),
        ] {
            let Some(pane) = pane else {
                panes_drawn = false;
                continue;
            };
            let mut pane = pane.borrow_mut();
            if let Err(e) = pane.render(&surface) {
                tracing::warn!(component = COMPONENT, pane = pane.name(), error = %e, "pane not drawn");
                panes_drawn = false;
            }
        }

        if panes_drawn {
            if let Some(transfer) = transfer {
                if let Err(e) = transfer.render(&surface) {
                    tracing::warn!(component = COMPONENT, error = %e, "drag handlers not attached");
                }
            }
        }

        let mut inner = self.inner.borrow_mut();
        if inner.lifecycle.state() == ComponentState::Ready && panes_drawn {
            let _ = inner.lifecycle.transition(ComponentState::Rendered);
        }
    }

    pub fn readiness(&self) -> Readiness {
        let inner = self.inner.borrow();
        let pane_rendered = |state: Option<ComponentState>| state == Some(ComponentState::Rendered);
        Readiness {
            initialized: inner.lifecycle.state().is_ready(),
            rendered: pane_rendered(inner.source.as_ref().map(|s| s.borrow().state()))
                && pane_rendered(inner.board.as_ref().map(|b| b.borrow().state())),
            interactive: inner.transfer.as_ref().is_some_and(|t| t.is_attached()),
        }
    }

    /// Parameters from the target board, `[]` if it never became ready
    pub fn collect_parameters(&self) -> Vec<Parameter> {
        self.inner.borrow().collect_parameters()
    }

    /// Capability for the host integration layer
    pub fn reporter(&self) -> ParameterReporter {
        ParameterReporter {
            inner: Rc::downgrade(&self.inner),
        }
    }

    pub fn transfer_handle(&self) -> Option<TransferHandle> {
        self.inner.borrow().transfer.clone()
    }

    pub fn toggle_group(&self, label: &str) -> Option<bool> {
        let source = self.inner.borrow().source.clone()?;
        let mut source = source.borrow_mut();
        source.toggle_group(label)
    }

    pub fn set_card_value(&self, id: CardId, value: &str) -> bool {
        self.with_board(|board| board.set_card_value(id, value))
            .unwrap_or(false)
    }

    pub fn remove_card(&self, id: CardId) -> bool {
        self.with_board(|board| board.remove_card(id).is_some())
            .unwrap_or(false)
    }

    pub fn suggestions(&self, id: CardId, input: &str) -> Vec<String> {
        self.with_board(|board| board.suggestions(id, input))
            .unwrap_or_default()
    }

    pub fn cards(&self) -> Vec<Card> {
        self.with_board(|board| board.cards().to_vec())
            .unwrap_or_default()
    }

    /// States of source list, target board and transfer controller
    pub fn component_states(&self) -> [Option<ComponentState>; 3] {
        let inner = self.inner.borrow();
        [
            inner.source.as_ref().map(|s| s.borrow().state()),
            inner.board.as_ref().map(|b| b.borrow().state()),
            inner.transfer.as_ref().map(|t| t.state()),
        ]
    }

    /// Tear down in reverse creation order. Safe to call at any time and
    /// more than once.
    pub fn destroy(&self) {
        let (source, board, transfer, surface) = {
            let mut inner = self.inner.borrow_mut();
            if inner.lifecycle.state() == ComponentState::Destroyed {
                tracing::debug!(component = COMPONENT, "already destroyed");
                return;
            }
            let _ = inner.lifecycle.transition(ComponentState::Destroyed);
            (
                inner.source.take(),
                inner.board.take(),
                inner.transfer.take(),
                inner.surface.take(),
            )
        };

        if let Some(transfer) = transfer {
            transfer.destroy();
        }
        if let Some(board) = board {
            match board.try_borrow_mut() {
                Ok(mut board) => board.destroy(),
                Err(_) => tracing::warn!(component = COMPONENT, "target board busy during teardown"),
            }
        }
        if let Some(source) = source {
            match source.try_borrow_mut() {
                Ok(mut source) => source.destroy(),
                Err(_) => tracing::warn!(component = COMPONENT, "source list busy during teardown"),
            }
        }
        if let Some(surface) = surface {
            surface.clear();
        }
        tracing::info!(component = COMPONENT, "destroyed");
    }

    fn abandoned(&self) -> bool {
        let abandoned = self.inner.borrow().lifecycle.state() == ComponentState::Destroyed;
        if abandoned {
            tracing::info!(component = COMPONENT, "destroyed during initialization, stopping");
        }
        abandoned
    }

    fn with_board<R>(&self, f: impl FnOnce(&mut TargetBoard) -> R) -> Option<R> {
        let board = self.inner.borrow().board.clone()?;
        let mut board = board.try_borrow_mut().ok()?;
        Some(f(&mut board))
    }
}

async fn init_component<C: Component>(loaded: ComposeResult<C>, config: &HostConfig) -> ComposeResult<C> {
    let mut component = loaded?;
    component.initialize(config).await?;
    Ok(component)
}

fn as_fatal(component: &'static str, e: ComposeError) -> ComposeError {
    match e {
        e @ ComposeError::FatalLoad { .. } => e,
        other => ComposeError::fatal(component, other.to_string()),
    }
}
