//! Prompt Composer Core
//!
//! Two-pane prompt composition without any DOM dependency:
//! - source_list: grouped draggable items with expand/collapse state
//! - target_board: cards created from drops, reduced to host parameters
//! - transfer: the drag session state machine between the two panes
//! - transport: pointer-tracking and native-drag drivers for sessions
//! - orchestrator: ordered, failure-tolerant startup and teardown

pub mod autocomplete;
pub mod component;
pub mod config;
pub mod error;
pub mod lifecycle;
pub mod model;
pub mod orchestrator;
pub mod source_list;
pub mod surface;
pub mod target_board;
pub mod transfer;
pub mod transport;

#[cfg(test)]
mod testing;

pub use component::Component;
pub use config::{GroupDescriptor, HostConfig, TransportKind};
pub use error::{ComposeError, ComposeResult};
pub use lifecycle::{ComponentState, Lifecycle};
pub use model::{Card, CardId, DragPayload, ItemDescriptor, Parameter, ParameterValue};
pub use orchestrator::{BuiltinLoader, ComponentLoader, Orchestrator, ParameterReporter, Readiness};
pub use source_list::SourceList;
pub use surface::{
    BoardView, CardView, GroupContent, GroupView, ItemView, Point, Rect, SourceListView, Surface,
    SurfaceRef,
};
pub use target_board::{DropRejection, DropTarget, TargetBoard};
pub use transfer::{DropOutcome, SessionState, TransferController, TransferHandle};
pub use transport::{NativeTransport, PointerTransport, Transport};
