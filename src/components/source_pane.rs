//! Source Pane
//!
//! Collapsible button groups. Items start a drag either on mousedown
//! (pointer tracking) or through the browser's native drag events.

use leptos::prelude::*;
use prompt_composer::{GroupContent, GroupView, ItemView, Point, SourceListView};

use crate::context::use_composer;
use crate::store::PaneStateStoreFields;
use crate::transport::DragInput;

#[component]
pub fn SourcePane() -> impl IntoView {
    let ctx = use_composer();

    view! {
        <div class="left-pane">
            {move || match ctx.store.source().get() {
                SourceListView::Empty => view! {
                    <div class="left-pane-empty">"No button groups configured."</div>
                }.into_any(),
                SourceListView::Groups(groups) => groups
                    .into_iter()
                    .map(|group| view! { <SourceGroup group=group /> })
                    .collect_view()
                    .into_any(),
            }}
        </div>
    }
}

/// Header arrow: up while expanded, down while collapsed
fn group_arrow(expanded: bool) -> &'static str {
    if expanded { "▲" } else { "▼" }
}

#[component]
fn SourceGroup(group: GroupView) -> impl IntoView {
    let ctx = use_composer();
    let label = group.label.clone();

    let on_toggle = move |_| {
        let expanded = ctx.orchestrator.with_value(|o| o.toggle_group(&label));
        tracing::debug!(component = "SourcePane", group = %label, ?expanded, "group toggled");
    };

    let arrow = group_arrow(group.expanded);

    let content = match group.content {
        GroupContent::Items(items) => view! {
            <div class="group-buttons">
                {items.into_iter().map(|item| view! { <SourceItem item=item /> }).collect_view()}
            </div>
        }.into_any(),
        GroupContent::NoItems => view! {
            <div class="group-buttons group-empty">"No buttons in this group."</div>
        }.into_any(),
        GroupContent::Collapsed => view! { <div></div> }.into_any(),
    };

    view! {
        <div class="button-group">
            <div class="group-header" on:click=on_toggle>
                // Icons are configured as markup (usually inline SVG)
                {group.icon.map(|icon| view! { <span class="group-icon" inner_html=icon></span> })}
                <span class="group-label">{group.label}</span>
                <span class="group-arrow">{arrow}</span>
            </div>
            {content}
        </div>
    }
}

#[component]
fn SourceItem(item: ItemView) -> impl IntoView {
    let ctx = use_composer();
    let (group_index, item_index) = (item.group_index, item.item_index);
    let native = ctx.is_native();

    let on_mousedown = move |ev: web_sys::MouseEvent| {
        if !dom_dragdrop::is_drag_press(&ev) {
            return;
        }
        let DragInput::Pointer(tracker) = ctx.drag.get_value() else {
            return;
        };
        let Some(payload) = ctx.payload_for(group_index, item_index) else {
            return;
        };
        // Keep text selection from following the pointer
        ev.prevent_default();
        let (x, y) = dom_dragdrop::client_point(&ev);
        tracker.pointer_down(payload, Point::new(x, y));
    };

    let on_dragstart = move |ev: web_sys::DragEvent| {
        let DragInput::Native(native) = ctx.drag.get_value() else {
            return;
        };
        let text = ctx
            .payload_for(group_index, item_index)
            .and_then(|payload| native.drag_start(payload));
        match text {
            Some(text) => {
                dom_dragdrop::set_transfer_text(&ev, &text);
            }
            None => ev.prevent_default(),
        }
    };

    let on_dragend = move |_: web_sys::DragEvent| {
        if let DragInput::Native(native) = ctx.drag.get_value() {
            native.drag_end();
        }
    };

    view! {
        <div
            class="drag-button"
            draggable=if native { "true" } else { "false" }
            on:mousedown=on_mousedown
            on:dragstart=on_dragstart
            on:dragend=on_dragend
        >
            {item.label}
        </div>
    }
}
