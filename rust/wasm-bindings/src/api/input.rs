// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Viewport input handling for the explorer API

use super::IfcExplorer;
use crate::utils::to_js_error;
use gloo_events::EventListener;
use js_sys::Promise;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::{future_to_promise, spawn_local};
use web_sys::{Event, KeyboardEvent};

#[wasm_bindgen]
impl IfcExplorer {
    /// Route window `mousemove`, `dblclick` and `keydown` to the explorer.
    ///
    /// Calling it again replaces the previous bindings.
    #[wasm_bindgen(js_name = bindWindowEvents)]
    pub fn bind_window_events(&mut self) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("No window"))?;
        self.window_listeners.clear();

        let inner = Rc::clone(&self.inner);
        self.window_listeners
            .push(EventListener::new(&window, "mousemove", move |_| {
                inner.pointer_moved()
            }));

        let inner = Rc::clone(&self.inner);
        self.window_listeners
            .push(EventListener::new(&window, "dblclick", move |_| {
                let inner = Rc::clone(&inner);
                spawn_local(async move {
                    if let Err(err) = inner.double_clicked().await {
                        tracing::warn!(error = %err, "Property lookup failed");
                    }
                });
            }));

        let inner = Rc::clone(&self.inner);
        self.window_listeners
            .push(EventListener::new(&window, "keydown", move |event: &Event| {
                if let Some(event) = event.dyn_ref::<KeyboardEvent>() {
                    inner.key_pressed(&event.code());
                }
            }));

        Ok(())
    }

    /// Drop the window bindings installed by `bindWindowEvents`.
    #[wasm_bindgen(js_name = unbindWindowEvents)]
    pub fn unbind_window_events(&mut self) {
        self.window_listeners.clear();
    }

    /// Preview whatever is under the cursor.
    #[wasm_bindgen(js_name = pointerMoved)]
    pub fn pointer_moved(&self) {
        self.inner.pointer_moved();
    }

    /// Pick under the cursor and show or clear the property panel.
    #[wasm_bindgen(js_name = doubleClicked)]
    pub fn double_clicked(&self) -> Promise {
        let inner = Rc::clone(&self.inner);
        future_to_promise(async move {
            inner.double_clicked().await.map_err(to_js_error)?;
            Ok(JsValue::UNDEFINED)
        })
    }

    /// Run the shortcut bound to a `KeyboardEvent.code`. Returns whether one ran.
    #[wasm_bindgen(js_name = keyPressed)]
    pub fn key_pressed(&self, code: &str) -> bool {
        self.inner.key_pressed(code).is_some()
    }
}
