//! Card Editor Component
//!
//! One prompt card: header, value input with tag suggestions, remove button.

use leptos::prelude::*;
use prompt_composer::CardView;

use crate::context::use_composer;

#[component]
pub fn CardEditor(card: CardView) -> impl IntoView {
    let ctx = use_composer();
    let id = card.id;
    let has_suggestions = card.has_suggestions;

    let (input_value, set_input_value) = signal(card.value);
    let (selected_idx, set_selected_idx) = signal(0usize);
    let (focused, set_focused) = signal(false);

    let suggestions = move || {
        if !has_suggestions || !focused.get() {
            return vec![];
        }
        let input = input_value.get();
        ctx.orchestrator.with_value(|o| o.suggestions(id, &input))
    };

    let commit = move |value: String| {
        ctx.orchestrator.with_value(|o| o.set_card_value(id, &value));
        set_input_value.set(value);
        set_selected_idx.set(0);
    };

    let on_keydown = move |ev: web_sys::KeyboardEvent| {
        let sugg = suggestions();
        if sugg.is_empty() {
            return;
        }
        let sel = selected_idx.get();
        match ev.key().as_str() {
            "Tab" | "Enter" => {
                ev.prevent_default();
                if let Some(value) = sugg.get(sel) {
                    commit(value.clone());
                }
            }
            "ArrowDown" => {
                ev.prevent_default();
                if sel + 1 < sugg.len() {
                    set_selected_idx.set(sel + 1);
                }
            }
            "ArrowUp" => {
                ev.prevent_default();
                if sel > 0 {
                    set_selected_idx.set(sel - 1);
                }
            }
            "Escape" => set_focused.set(false),
            _ => {}
        }
    };

    let on_remove = move |_| {
        ctx.orchestrator.with_value(|o| o.remove_card(id));
    };

    view! {
        <div class="prompt-card">
            <div class="prompt-card-header">
                <span class="prompt-card-title">{card.header}</span>
                <button type="button" class="prompt-card-remove" title="Remove" on:click=on_remove>
                    "×"
                </button>
            </div>
            <div class="tag-input-wrapper">
                <input
                    type="text"
                    class="prompt-card-input"
                    placeholder="Enter value..."
                    autocomplete="off"
                    prop:value=move || input_value.get()
                    on:input=move |ev| commit(event_target_value(&ev))
                    on:keydown=on_keydown
                    on:focus=move |_| set_focused.set(true)
                    on:blur=move |_| set_focused.set(false)
                />
                {move || {
                    let sugg = suggestions();
                    if sugg.is_empty() {
                        return view! { <div></div> }.into_any();
                    }
                    let selected = selected_idx.get();
                    view! {
                        <div class="autocomplete-list">
                            {sugg.into_iter().enumerate().map(|(i, value)| {
                                let for_click = value.clone();
                                view! {
                                    <button
                                        type="button"
                                        class=if i == selected { "autocomplete-item selected" } else { "autocomplete-item" }
                                        // mousedown fires before the input's blur
                                        on:mousedown=move |ev| {
                                            ev.prevent_default();
                                            commit(for_click.clone());
                                        }
                                    >
                                        {value}
                                    </button>
                                }
                            }).collect_view()}
                        </div>
                    }.into_any()
                }}
            </div>
        </div>
    }
}
