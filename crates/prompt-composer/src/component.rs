//! Component Contract
//!
//! The uniform shape the orchestrator sequences: an awaitable initialize, an
//! idempotent render and a teardown that tolerates partial setup.

use async_trait::async_trait;

use crate::config::HostConfig;
use crate::error::ComposeResult;
use crate::lifecycle::ComponentState;
use crate::surface::SurfaceRef;

#[async_trait(?Send)]
pub trait Component {
    fn name(&self) -> &'static str;

    fn state(&self) -> ComponentState;

    /// Configure the component. May suspend while resources load.
    async fn initialize(&mut self, config: &HostConfig) -> ComposeResult<()>;

    /// Clear and redraw into `surface`. Safe to call repeatedly.
    fn render(&mut self, surface: &SurfaceRef) -> ComposeResult<()>;

    /// Release everything. Safe before initialize and when called twice.
    fn destroy(&mut self);
}
