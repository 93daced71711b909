//! Component Lifecycle
//!
//! Every component carries one lifecycle tag and moves through it only via
//! guarded transitions.

use serde::{Deserialize, Serialize};

use crate::error::{ComposeError, ComposeResult};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ComponentState {
    #[default]
    Unloaded,
    Initializing,
    Ready,
    Rendered,
    Destroyed,
}

impl ComponentState {
    /// Whether `next` is a legal successor of this state.
    ///
    /// Re-rendering keeps `Rendered`, and teardown is allowed from anywhere.
    pub fn can_transition_to(self, next: ComponentState) -> bool {
        use ComponentState::*;
        matches!(
            (self, next),
            (Unloaded, Initializing)
                | (Initializing, Ready)
                | (Ready, Rendered)
                | (Rendered, Rendered)
                | (_, Destroyed)
        )
    }

    /// Initialized and not torn down
    pub fn is_ready(self) -> bool {
        matches!(self, ComponentState::Ready | ComponentState::Rendered)
    }
}

/// Lifecycle tag owned by one named component
#[derive(Debug, Clone, Copy)]
pub struct Lifecycle {
    component: &'static str,
    state: ComponentState,
}

impl Lifecycle {
    pub fn new(component: &'static str) -> Self {
        Self {
            component,
            state: ComponentState::Unloaded,
        }
    }

    pub fn state(&self) -> ComponentState {
        self.state
    }

    pub fn transition(&mut self, next: ComponentState) -> ComposeResult<()> {
        if !self.state.can_transition_to(next) {
            return Err(ComposeError::IllegalTransition {
                component: self.component,
                from: self.state,
                to: next,
            });
        }
        if self.state != next {
            tracing::debug!(component = self.component, from = ?self.state, to = ?next, "lifecycle transition");
        }
        self.state = next;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ComponentState::*;

    #[test]
    fn test_forward_path() {
        let mut lc = Lifecycle::new("SourceList");
        for next in [Initializing, Ready, Rendered, Rendered, Destroyed] {
            lc.transition(next).unwrap();
        }
        assert_eq!(lc.state(), Destroyed);
    }

    #[test]
    fn test_out_of_order_is_rejected() {
        let mut lc = Lifecycle::new("TargetBoard");
        assert!(lc.transition(Rendered).is_err());
        assert!(lc.transition(Ready).is_err());
        assert_eq!(lc.state(), Unloaded);

        lc.transition(Destroyed).unwrap();
        assert!(lc.transition(Initializing).is_err());
        // Tearing down twice is fine
        lc.transition(Destroyed).unwrap();
    }

    #[test]
    fn test_is_ready() {
        assert!(Ready.is_ready());
        assert!(Rendered.is_ready());
        assert!(!Initializing.is_ready());
        assert!(!Destroyed.is_ready());
    }
}
