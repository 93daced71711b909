//! Prompt Composer App
//!
//! Two-pane layout: source groups on the left, the card board on the right.

use std::rc::Rc;

use gloo_timers::future::TimeoutFuture;
use leptos::html;
use leptos::prelude::*;
use leptos::task::spawn_local;
use prompt_composer::{HostConfig, Orchestrator, SurfaceRef};
use reactive_stores::Store;
use serde_json::Value;

use crate::components::{SourcePane, TargetPane};
use crate::context::ComposerContext;
use crate::host;
use crate::store::{store_set_initialized, PaneState};
use crate::surface::StoreSurface;
use crate::transport::DragInput;

/// Delay between attempts to attach drag handlers while the drop area has
/// not been laid out yet
const LAYOUT_RETRY_MS: u32 = 50;
const LAYOUT_ATTEMPTS: u32 = 20;

#[component]
pub fn App(raw_config: Value, config: HostConfig) -> impl IntoView {
    let store = Store::new(PaneState::default());
    let drop_zone = NodeRef::<html::Div>::new();

    let drag = DragInput::new(config.transport, config.drag_threshold_px);
    let orchestrator = Orchestrator::new(drag.loader());

    let ctx = ComposerContext {
        orchestrator: StoredValue::new_local(orchestrator.clone()),
        drag: StoredValue::new_local(drag),
        store,
        drop_zone,
    };
    provide_context(ctx);

    let capability = StoredValue::new_local(None::<host::HostCapability>);

    spawn_local(async move {
        orchestrator
            .initialize(&raw_config, move || store_set_initialized(&store))
            .await;
        capability.set_value(host::install(orchestrator.reporter()));

        let surface: SurfaceRef = Rc::new(StoreSurface { store, drop_zone });
        for attempt in 1..=LAYOUT_ATTEMPTS {
            TimeoutFuture::new(if attempt == 1 { 0 } else { LAYOUT_RETRY_MS }).await;
            orchestrator.render(surface.clone());
            let readiness = orchestrator.readiness();
            if readiness.interactive || orchestrator.transfer_handle().is_none() {
                tracing::info!(component = "App", attempt, ?readiness, "composition rendered");
                return;
            }
        }
        tracing::warn!(component = "App", "drop area never laid out, drag disabled");
    });

    on_cleanup(move || {
        ctx.orchestrator.with_value(|o| o.destroy());
        capability.set_value(None);
    });

    view! {
        <div class="custom-prompt-layout">
            <SourcePane />
            <TargetPane />
        </div>
    }
}
