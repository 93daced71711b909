//! Host Bridge
//!
//! Reads the host configuration from the page and hands the host an explicit
//! capability object for reading parameters. Nothing on the host side is
//! patched; the host only sees what is installed here.

use prompt_composer::ParameterReporter;
use serde_json::Value;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

/// Global the host places its configuration object in
const CONFIG_GLOBAL: &str = "promptComposerConfig";
/// Global the capability object is installed under
const CAPABILITY_GLOBAL: &str = "promptComposer";

/// The host configuration object, `null` when absent or unreadable
pub fn read_host_config() -> Value {
    let Some(window) = web_sys::window() else {
        return Value::Null;
    };
    let raw = match js_sys::Reflect::get(&window, &JsValue::from_str(CONFIG_GLOBAL)) {
        Ok(raw) if !raw.is_undefined() && !raw.is_null() => raw,
        _ => return Value::Null,
    };
    serde_wasm_bindgen::from_value(raw).unwrap_or(Value::Null)
}

/// Installs `window.promptComposer = { getParameters() }`.
///
/// The closure is kept alive by the returned guard and the global is removed
/// again when the guard drops.
pub fn install(reporter: ParameterReporter) -> Option<HostCapability> {
    let window = web_sys::window()?;

    let get_parameters = Closure::<dyn Fn() -> JsValue>::new(move || {
        let params = reporter.collect();
        tracing::debug!(component = "HostBridge", count = params.len(), "parameters requested");
        serde_wasm_bindgen::to_value(&params).unwrap_or_else(|_| js_sys::Array::new().into())
    });

    let capability = js_sys::Object::new();
    js_sys::Reflect::set(
        &capability,
        &JsValue::from_str("getParameters"),
        get_parameters.as_ref().unchecked_ref(),
    )
    .ok()?;
    js_sys::Reflect::set(&window, &JsValue::from_str(CAPABILITY_GLOBAL), &capability).ok()?;
    tracing::info!(component = "HostBridge", "parameter capability installed");

    Some(HostCapability {
        _get_parameters: get_parameters,
    })
}

pub struct HostCapability {
    _get_parameters: Closure<dyn Fn() -> JsValue>,
}

impl Drop for HostCapability {
    fn drop(&mut self) {
        if let Some(window) = web_sys::window() {
            let _ = js_sys::Reflect::delete_property(&window, &JsValue::from_str(CAPABILITY_GLOBAL));
        }
    }
}
