//! Composer Context
//!
//! Handles shared by every pane, provided via Leptos Context API.

use leptos::html;
use leptos::prelude::*;
use prompt_composer::{DragPayload, Orchestrator, TransferHandle};

use crate::store::PaneStore;
use crate::transport::DragInput;

#[derive(Clone, Copy)]
pub struct ComposerContext {
    pub orchestrator: StoredValue<Orchestrator, LocalStorage>,
    pub drag: StoredValue<DragInput, LocalStorage>,
    pub store: PaneStore,
    /// The target board's drop area
    pub drop_zone: NodeRef<html::Div>,
}

impl ComposerContext {
    pub fn transfer(&self) -> Option<TransferHandle> {
        self.orchestrator.with_value(|o| o.transfer_handle())
    }

    /// Snapshot of a source item for a new drag session
    pub fn payload_for(&self, group_index: usize, item_index: usize) -> Option<DragPayload> {
        self.transfer()?.payload_for(group_index, item_index)
    }

    pub fn is_native(&self) -> bool {
        self.drag.with_value(|d| d.is_native())
    }
}

pub fn use_composer() -> ComposerContext {
    expect_context::<ComposerContext>()
}
