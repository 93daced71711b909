//! Drag Transports
//!
//! Input technologies that drive [`TransferHandle`] sessions. Both
//! transports produce the same external behavior: a press on a source item
//! released over the board yields exactly one `add_card`, released anywhere
//! else yields none.

mod native;
mod pointer;

pub use native::{NativeDrag, NativeTransport};
pub use pointer::{PointerTracker, PointerTransport};

use crate::config::TransportKind;
use crate::error::ComposeResult;
use crate::transfer::TransferHandle;

/// Seam between the transfer controller and an input technology
pub trait Transport {
    fn kind(&self) -> TransportKind;

    /// Start feeding events into `handle`. Called once per attachment and
    /// must not call back into the handle synchronously.
    fn bind(&mut self, handle: TransferHandle) -> ComposeResult<()>;

    /// Release every listener installed by `bind`
    fn unbind(&mut self);
}
