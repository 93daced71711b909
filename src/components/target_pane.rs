//! Target Pane
//!
//! The drop area and the cards created from drops. Pointer drags are
//! hit-tested against this element's bounds; native drags deliver their
//! dragover/drop events here.

use leptos::prelude::*;
use prompt_composer::{DropOutcome, Point};
use web_sys::DragEvent;

use crate::components::CardEditor;
use crate::context::use_composer;
use crate::store::PaneStateStoreFields;
use crate::transport::DragInput;

fn event_point(ev: &DragEvent) -> Point {
    let (x, y) = dom_dragdrop::client_point(ev);
    Point::new(x, y)
}

#[component]
pub fn TargetPane() -> impl IntoView {
    let ctx = use_composer();
    let store = ctx.store;

    let on_dragover = move |ev: DragEvent| {
        if let DragInput::Native(native) = ctx.drag.get_value() {
            if native.drag_over(event_point(&ev)) {
                dom_dragdrop::accept_copy(&ev);
            }
        }
    };

    let on_dragleave = move |ev: DragEvent| {
        if let DragInput::Native(native) = ctx.drag.get_value() {
            native.drag_over(event_point(&ev));
        }
    };

    let on_drop = move |ev: DragEvent| {
        ev.prevent_default();
        let DragInput::Native(native) = ctx.drag.get_value() else {
            return;
        };
        if let Some(text) = dom_dragdrop::transfer_text(&ev) {
            tracing::debug!(component = "TargetPane", payload = %text, "native drop received");
        }
        match native.drop(event_point(&ev)) {
            DropOutcome::Duplicate => tracing::info!(component = "TargetPane", "item already on the board"),
            DropOutcome::Rejected => tracing::warn!(component = "TargetPane", "board is not accepting cards"),
            _ => {}
        }
    };

    let is_empty = move || store.board().with(|board| board.cards.is_empty());

    view! {
        <div class="right-pane">
            <div
                node_ref=ctx.drop_zone
                class=move || {
                    let mut c = "right-pane-cards".to_string();
                    if store.drop_hover().get() { c.push_str(" drop-hover"); }
                    if !store.initialized().get() { c.push_str(" loading"); }
                    c
                }
                on:dragover=on_dragover
                on:dragleave=on_dragleave
                on:drop=on_drop
            >
                <Show when=is_empty>
                    <div class="drop-hint">"Drag buttons here to add prompts"</div>
                </Show>
                <For
                    each=move || store.board().get().cards
                    key=|card| card.id
                    children=move |card| view! { <CardEditor card=card /> }
                />
            </div>
        </div>
    }
}
