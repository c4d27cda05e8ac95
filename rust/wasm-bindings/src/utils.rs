// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use ifc_explorer_core::Error;
use wasm_bindgen::{JsCast, JsValue};

/// Set panic hook for better error messages in the browser
pub fn set_panic_hook() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Route `tracing` events to the browser console.
///
/// A second call (e.g. a page that re-runs the start function) keeps the
/// subscriber that is already installed.
pub fn init_tracing() {
    let _ = tracing_wasm::try_set_as_global_default();
}

/// Best-effort message text for a thrown JavaScript value.
pub(crate) fn js_message(value: &JsValue) -> String {
    if let Some(text) = value.as_string() {
        return text;
    }
    if let Some(err) = value.dyn_ref::<js_sys::Error>() {
        return String::from(err.message());
    }
    format!("{:?}", value)
}

/// Convert a core error into a JavaScript `Error`.
pub(crate) fn to_js_error(err: Error) -> JsValue {
    js_sys::Error::new(&err.to_string()).into()
}
