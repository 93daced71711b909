//! DOM DragDrop Utilities
//!
//! Browser glue for drag-and-drop:
//! - document-level mousemove/mouseup listeners that are removed again when
//!   dropped, for synthetic pointer tracking
//! - small helpers around native `DragEvent`s and their `DataTransfer`

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

/// MIME slot the payload travels in
pub const TRANSFER_FORMAT: &str = "text/plain";

/// Client coordinates of a mouse (or drag) event
pub fn client_point(ev: &web_sys::MouseEvent) -> (f64, f64) {
    (ev.client_x() as f64, ev.client_y() as f64)
}

/// Whether a mousedown may start tracking a drag.
/// Only the primary button counts, and presses inside text fields are left
/// alone so they keep their caret and selection behavior.
pub fn is_drag_press(ev: &web_sys::MouseEvent) -> bool {
    if ev.button() != 0 {
        return false;
    }
    match ev.target() {
        Some(target) => {
            target.dyn_ref::<web_sys::HtmlInputElement>().is_none()
                && target.dyn_ref::<web_sys::HtmlTextAreaElement>().is_none()
        }
        None => true,
    }
}

/// Bounding box of an element as `(left, top, width, height)`
pub fn element_bounds(el: &web_sys::Element) -> (f64, f64, f64, f64) {
    let rect = el.get_bounding_client_rect();
    (rect.left(), rect.top(), rect.width(), rect.height())
}

type PointerCallback = Closure<dyn FnMut(web_sys::MouseEvent)>;

/// Document-level pointer listeners. Removed from the document on drop.
pub struct GlobalPointerListeners {
    document: web_sys::Document,
    on_move: PointerCallback,
    on_up: PointerCallback,
}

impl GlobalPointerListeners {
    /// Listen for mousemove and mouseup anywhere in the document.
    /// Returns `None` outside a browser.
    pub fn bind<M, U>(mut on_move: M, mut on_up: U) -> Option<Self>
    where
        M: FnMut(f64, f64) + 'static,
        U: FnMut(f64, f64) + 'static,
    {
        let document = web_sys::window()?.document()?;

        let on_move = Closure::<dyn FnMut(web_sys::MouseEvent)>::new(move |ev: web_sys::MouseEvent| {
            let (x, y) = client_point(&ev);
            on_move(x, y);
        });
        let on_up = Closure::<dyn FnMut(web_sys::MouseEvent)>::new(move |ev: web_sys::MouseEvent| {
            let (x, y) = client_point(&ev);
            on_up(x, y);
        });

        document
            .add_event_listener_with_callback("mousemove", on_move.as_ref().unchecked_ref())
            .ok()?;
        if document
            .add_event_listener_with_callback("mouseup", on_up.as_ref().unchecked_ref())
            .is_err()
        {
            let _ = document.remove_event_listener_with_callback("mousemove", on_move.as_ref().unchecked_ref());
            return None;
        }

        Some(Self {
            document,
            on_move,
            on_up,
        })
    }
}

impl Drop for GlobalPointerListeners {
    fn drop(&mut self) {
        let _ = self
            .document
            .remove_event_listener_with_callback("mousemove", self.on_move.as_ref().unchecked_ref());
        let _ = self
            .document
            .remove_event_listener_with_callback("mouseup", self.on_up.as_ref().unchecked_ref());
    }
}

/// Put the payload text on a starting native drag and allow copying
pub fn set_transfer_text(ev: &web_sys::DragEvent, text: &str) -> bool {
    let Some(transfer) = ev.data_transfer() else {
        return false;
    };
    transfer.set_effect_allowed("copy");
    transfer.set_data(TRANSFER_FORMAT, text).is_ok()
}

/// Mark the element under a native drag as a valid copy target
pub fn accept_copy(ev: &web_sys::DragEvent) {
    ev.prevent_default();
    if let Some(transfer) = ev.data_transfer() {
        transfer.set_drop_effect("copy");
    }
}

/// Payload text carried by a native drop
pub fn transfer_text(ev: &web_sys::DragEvent) -> Option<String> {
    ev.data_transfer()?
        .get_data(TRANSFER_FORMAT)
        .ok()
        .filter(|text| !text.is_empty())
}
