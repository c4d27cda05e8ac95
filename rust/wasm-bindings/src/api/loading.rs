// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Model loading and property export for the explorer API

use super::IfcExplorer;
use crate::utils::to_js_error;
use ifc_explorer_core::ModelId;
use js_sys::Promise;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::future_to_promise;
use web_sys::{File, Url};

#[wasm_bindgen]
impl IfcExplorer {
    /// Load a user-picked file and rebuild every panel for it.
    ///
    /// Resolves to the model id. The file is exposed to the viewer through a
    /// blob URL that is revoked once the load settles.
    ///
    /// Example:
    /// ```javascript
    /// input.addEventListener('change', async (event) => {
    ///   const modelId = await explorer.loadFile(event.target.files[0]);
    /// });
    /// ```
    #[wasm_bindgen(js_name = loadFile)]
    pub fn load_file(&self, file: File) -> Promise {
        let inner = Rc::clone(&self.inner);
        future_to_promise(async move {
            let url = Url::create_object_url_with_blob(&file)?;
            tracing::debug!(name = %file.name(), size = file.size(), "Loading picked file");
            let result = inner.load_url(&url).await;
            let _ = Url::revoke_object_url(&url);
            let model = result.map_err(to_js_error)?;
            Ok(JsValue::from(model.0))
        })
    }

    /// Load a model from a URL the viewer can fetch.
    #[wasm_bindgen(js_name = loadUrl)]
    pub fn load_url(&self, url: String) -> Promise {
        let inner = Rc::clone(&self.inner);
        future_to_promise(async move {
            let model = inner.load_url(&url).await.map_err(to_js_error)?;
            Ok(JsValue::from(model.0))
        })
    }

    /// Serialize all properties of the current model and download them.
    ///
    /// Rejects when no model is loaded.
    #[wasm_bindgen(js_name = exportProperties)]
    pub fn export_properties(&self) -> Promise {
        let inner = Rc::clone(&self.inner);
        future_to_promise(async move {
            let model: ModelId = inner
                .current_model()
                .ok_or_else(|| JsValue::from_str("No model loaded"))?;
            inner.export_properties(model).await.map_err(to_js_error)?;
            Ok(JsValue::UNDEFINED)
        })
    }

    /// Report load progress (e.g. from the viewer's loader callback).
    #[wasm_bindgen(js_name = reportProgress)]
    pub fn report_progress(&self, loaded: f64, total: f64) -> Result<(), JsValue> {
        self.inner
            .report_progress(loaded, total)
            .map_err(to_js_error)
    }
}
