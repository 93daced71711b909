//! Composition Errors
//!
//! Failures the composition core can report. Duplicate drops and out-of-order
//! session calls are expected steady-state behavior and are modelled as
//! [`DropOutcome`](crate::transfer::DropOutcome) values instead.

use thiserror::Error;

use crate::lifecycle::ComponentState;

/// Common result type for composition operations
pub type ComposeResult<T> = Result<T, ComposeError>;

#[derive(Debug, Error)]
pub enum ComposeError {
    /// A mandatory component (SourceList or TargetBoard) could not be loaded
    /// or initialized. Aborts the remaining startup sequence.
    #[error("failed to load {component}: {reason}")]
    FatalLoad {
        component: &'static str,
        reason: String,
    },

    /// An optional component (TransferController) could not be loaded or
    /// initialized. The composition continues without it.
    #[error("optional component {component} unavailable: {reason}")]
    OptionalLoad {
        component: &'static str,
        reason: String,
    },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("{component} cannot move from {from:?} to {to:?}")]
    IllegalTransition {
        component: &'static str,
        from: ComponentState,
        to: ComponentState,
    },

    #[error("{0} is not connected")]
    NotConnected(&'static str),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
}

impl ComposeError {
    pub fn fatal(component: &'static str, reason: impl Into<String>) -> Self {
        Self::FatalLoad {
            component,
            reason: reason.into(),
        }
    }

    pub fn optional(component: &'static str, reason: impl Into<String>) -> Self {
        Self::OptionalLoad {
            component,
            reason: reason.into(),
        }
    }

    /// Whether this error must stop the startup sequence.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Self::OptionalLoad { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optional_load_is_not_fatal() {
        assert!(!ComposeError::optional("TransferController", "missing").is_fatal());
        assert!(ComposeError::fatal("SourceList", "missing").is_fatal());
    }

    #[test]
    fn test_error_messages() {
        let err = ComposeError::IllegalTransition {
            component: "TargetBoard",
            from: ComponentState::Unloaded,
            to: ComponentState::Rendered,
        };
        assert_eq!(err.to_string(), "TargetBoard cannot move from Unloaded to Rendered");
    }
}
