// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! JavaScript API for the IFC explorer
//!
//! ```javascript
//! const explorer = new IfcExplorer(viewerAdapter, { exportProperties: false });
//! explorer.bindWindowEvents();
//! input.addEventListener('change', (e) => explorer.loadFile(e.target.files[0]));
//! ```

mod input;
mod loading;

use crate::bridge::JsViewer;
use crate::dom::{DomSurface, SurfaceElements};
use crate::utils::to_js_error;
use gloo_events::EventListener;
use ifc_explorer_core::{Explorer, ExplorerConfig, UiEvent};
use std::rc::{Rc, Weak};
use wasm_bindgen::prelude::*;

type BrowserExplorer = Explorer<JsViewer, DomSurface>;

/// Main explorer API
#[wasm_bindgen]
pub struct IfcExplorer {
    inner: Rc<BrowserExplorer>,
    window_listeners: Vec<EventListener>,
}

#[wasm_bindgen]
impl IfcExplorer {
    /// Create an explorer over `viewer` rendering into the current document.
    ///
    /// `config` may be `undefined` or a partial configuration object.
    #[wasm_bindgen(constructor)]
    pub fn new(viewer: JsViewer, config: JsValue) -> Result<IfcExplorer, JsValue> {
        crate::utils::set_panic_hook();

        let config: ExplorerConfig = if config.is_undefined() || config.is_null() {
            ExplorerConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)?
        };
        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or_else(|| JsValue::from_str("No document"))?;
        let elements = SurfaceElements::locate(&document, &config).map_err(to_js_error)?;

        let inner = Rc::new_cyclic(|weak: &Weak<BrowserExplorer>| {
            let weak = weak.clone();
            let dispatch = Rc::new(move |event: UiEvent| {
                if let Some(explorer) = weak.upgrade() {
                    if let Err(err) = explorer.handle(event) {
                        tracing::warn!(error = %err, "UI event failed");
                    }
                }
            });
            Explorer::new(viewer, DomSurface::new(elements, dispatch), config)
        });

        Ok(Self {
            inner,
            window_listeners: Vec::new(),
        })
    }

    /// Id of the model currently shown
    #[wasm_bindgen(getter, js_name = currentModel)]
    pub fn current_model(&self) -> Option<u32> {
        self.inner.current_model().map(|model| model.0)
    }

    /// Number of categories with a checkbox
    #[wasm_bindgen(getter, js_name = categoryCount)]
    pub fn category_count(&self) -> usize {
        self.inner.with_registry(|registry| registry.toggles().len())
    }

    /// Show or hide a category, as its checkbox would.
    #[wasm_bindgen(js_name = toggleCategory)]
    pub fn toggle_category(&self, category: u32, visible: bool) -> Result<(), JsValue> {
        self.inner
            .handle(UiEvent::ToggleCategory {
                category: ifc_explorer_core::CategoryId(category),
                visible,
            })
            .map_err(to_js_error)
    }

    /// Get version string
    #[wasm_bindgen(getter)]
    pub fn version(&self) -> String {
        env!("CARGO_PKG_VERSION").to_string()
    }
}
