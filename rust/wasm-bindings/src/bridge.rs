// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Adapter over the page's JavaScript 3D viewer
//!
//! The page passes an object implementing the `ViewerAdapter` interface
//! below. Asynchronous operations return promises; thrown exceptions and
//! rejections are mapped onto [`ifc_explorer_core::Error`].

use crate::utils::js_message;
use ifc_explorer_core::{
    CategoryId, ElementId, Error, LoadedModel, ModelId, PickHit, PropertyRecord, Result,
    SpatialNode, SubsetRequest, ViewerBackend,
};
use js_sys::{Array, ArrayBuffer, Promise, Uint8Array};
use serde::Deserialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

#[wasm_bindgen(typescript_custom_section)]
const VIEWER_ADAPTER_TS: &'static str = r#"
export interface ViewerAdapter {
  loadModel(url: string): Promise<{ modelId: number; spatialStructure: IfcSpatialNode }>;
  removeModel(modelId: number): void;
  detachModel(modelId: number): void;
  getElementIdsOfCategory(modelId: number, typeCode: number): Promise<number[]>;
  createSubset(request: { modelId: number; ids: number[]; removePrevious: boolean; customId: string }): unknown;
  attachToScene(subset: unknown): void;
  detachFromScene(subset: unknown): void;
  getProperties(modelId: number, expressId: number, recursive: boolean, includeInherited: boolean): Promise<Record<string, unknown>>;
  highlightPreview(modelId: number, ids: number[]): void;
  select(modelId: number, ids: number[]): void;
  clearSelection(): void;
  previewAtCursor(): void;
  pickAtCursor(): Promise<{ modelID: number; id: number } | null>;
  typeCodeForName(modelId: number, typeName: string): number;
  serializeAllProperties(modelId: number): Promise<string | string[] | Uint8Array | ArrayBuffer>;
  createDimension(): void;
  deleteDimension(): void;
}

export interface IfcSpatialNode {
  type: string;
  expressID: number;
  children?: IfcSpatialNode[];
}
"#;

#[wasm_bindgen]
extern "C" {
    /// JavaScript object implementing `ViewerAdapter`.
    #[wasm_bindgen(typescript_type = "ViewerAdapter")]
    #[derive(Clone)]
    pub type JsViewer;

    #[wasm_bindgen(method, catch, js_name = loadModel)]
    fn js_load_model(this: &JsViewer, url: &str) -> std::result::Result<Promise, JsValue>;

    #[wasm_bindgen(method, js_name = removeModel)]
    fn js_remove_model(this: &JsViewer, model_id: u32);

    #[wasm_bindgen(method, js_name = detachModel)]
    fn js_detach_model(this: &JsViewer, model_id: u32);

    #[wasm_bindgen(method, catch, js_name = getElementIdsOfCategory)]
    fn js_element_ids_of_category(
        this: &JsViewer,
        model_id: u32,
        type_code: u32,
    ) -> std::result::Result<Promise, JsValue>;

    #[wasm_bindgen(method, catch, js_name = createSubset)]
    fn js_create_subset(this: &JsViewer, request: &JsValue) -> std::result::Result<JsValue, JsValue>;

    #[wasm_bindgen(method, js_name = attachToScene)]
    fn js_attach_to_scene(this: &JsViewer, subset: &JsValue);

    #[wasm_bindgen(method, js_name = detachFromScene)]
    fn js_detach_from_scene(this: &JsViewer, subset: &JsValue);

    #[wasm_bindgen(method, catch, js_name = getProperties)]
    fn js_properties(
        this: &JsViewer,
        model_id: u32,
        element_id: u32,
        recursive: bool,
        include_inherited: bool,
    ) -> std::result::Result<Promise, JsValue>;

    #[wasm_bindgen(method, js_name = highlightPreview)]
    fn js_highlight_preview(this: &JsViewer, model_id: u32, ids: &Array);

    #[wasm_bindgen(method, js_name = select)]
    fn js_select(this: &JsViewer, model_id: u32, ids: &Array);

    #[wasm_bindgen(method, js_name = clearSelection)]
    fn js_clear_selection(this: &JsViewer);

    #[wasm_bindgen(method, js_name = previewAtCursor)]
    fn js_preview_at_cursor(this: &JsViewer);

    #[wasm_bindgen(method, catch, js_name = pickAtCursor)]
    fn js_pick_at_cursor(this: &JsViewer) -> std::result::Result<Promise, JsValue>;

    #[wasm_bindgen(method, catch, js_name = typeCodeForName)]
    fn js_type_code_for_name(
        this: &JsViewer,
        model_id: u32,
        type_name: &str,
    ) -> std::result::Result<JsValue, JsValue>;

    #[wasm_bindgen(method, catch, js_name = serializeAllProperties)]
    fn js_serialize_all_properties(
        this: &JsViewer,
        model_id: u32,
    ) -> std::result::Result<Promise, JsValue>;

    #[wasm_bindgen(method, js_name = createDimension)]
    fn js_create_dimension(this: &JsViewer);

    #[wasm_bindgen(method, js_name = deleteDimension)]
    fn js_delete_dimension(this: &JsViewer);
}

/// Shape resolved by `loadModel`.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LoadedModelJs {
    #[serde(alias = "modelID")]
    model_id: u32,
    #[serde(alias = "spatialStructureRoot")]
    spatial_structure: SpatialNode,
}

/// Shape resolved by `pickAtCursor` (web-ifc-viewer style `{ modelID, id }`).
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PickHitJs {
    #[serde(alias = "modelID")]
    model_id: u32,
    #[serde(alias = "id")]
    element_id: u32,
}

/// Await a promise, turning a rejection into its message.
async fn settle(promise: std::result::Result<Promise, JsValue>) -> std::result::Result<JsValue, String> {
    let promise = promise.map_err(|e| js_message(&e))?;
    JsFuture::from(promise).await.map_err(|e| js_message(&e))
}

fn ids_to_js(ids: &[ElementId]) -> Array {
    ids.iter()
        .map(|id| JsValue::from_f64(f64::from(id.0)))
        .collect()
}

fn subset_request_to_js(request: &SubsetRequest<'_>) -> JsValue {
    let obj = js_sys::Object::new();
    set_js_prop(&obj, "modelId", &JsValue::from_f64(f64::from(request.model_id.0)));
    set_js_prop(&obj, "ids", &ids_to_js(request.element_ids));
    set_js_prop(
        &obj,
        "removePrevious",
        &JsValue::from_bool(request.replace_previous),
    );
    set_js_prop(&obj, "customId", &JsValue::from_str(&request.subset_key));
    obj.into()
}

/// Safely set a property on a JavaScript object.
#[inline]
fn set_js_prop(obj: &JsValue, key: &str, value: &JsValue) -> bool {
    js_sys::Reflect::set(obj, &JsValue::from_str(key), value).unwrap_or(false)
}

/// Flatten whatever `serializeAllProperties` resolved to into file bytes.
///
/// Accepts a string, an array of string parts (web-ifc's chunked
/// `PropertySerializer` output), a `Uint8Array` or an `ArrayBuffer`.
fn export_bytes(value: &JsValue) -> std::result::Result<Vec<u8>, String> {
    if let Some(text) = value.as_string() {
        return Ok(text.into_bytes());
    }
    if let Some(bytes) = value.dyn_ref::<Uint8Array>() {
        return Ok(bytes.to_vec());
    }
    if let Some(buffer) = value.dyn_ref::<ArrayBuffer>() {
        return Ok(Uint8Array::new(buffer).to_vec());
    }
    if Array::is_array(value) {
        let mut out = Vec::new();
        for part in Array::from(value).iter() {
            out.extend(export_bytes(&part)?);
        }
        return Ok(out);
    }
    Err(format!("unsupported export payload {:?}", value))
}

impl ViewerBackend for JsViewer {
    type Subset = JsValue;

    async fn load_model(&self, url: &str) -> Result<LoadedModel> {
        let value = settle(self.js_load_model(url))
            .await
            .map_err(|message| Error::Load {
                url: url.to_string(),
                message,
            })?;
        let loaded: LoadedModelJs = serde_wasm_bindgen::from_value(value)
            .map_err(|e| Error::InvalidResponse(format!("loadModel: {}", e)))?;
        Ok(LoadedModel {
            model_id: ModelId(loaded.model_id),
            spatial_root: loaded.spatial_structure,
        })
    }

    fn remove_model(&self, model: ModelId) {
        self.js_remove_model(model.0);
    }

    fn detach_model(&self, model: ModelId) {
        self.js_detach_model(model.0);
    }

    async fn element_ids_of_category(
        &self,
        model: ModelId,
        category: CategoryId,
    ) -> Result<Vec<ElementId>> {
        let value = settle(self.js_element_ids_of_category(model.0, category.0))
            .await
            .map_err(|message| Error::ElementIds { category, message })?;
        let ids: Vec<u32> = serde_wasm_bindgen::from_value(value).map_err(|e| Error::ElementIds {
            category,
            message: e.to_string(),
        })?;
        Ok(ids.into_iter().map(ElementId).collect())
    }

    fn create_subset(&self, request: SubsetRequest<'_>) -> Result<JsValue> {
        let category = CategoryId(request.subset_key.parse().unwrap_or_default());
        let subset = self
            .js_create_subset(&subset_request_to_js(&request))
            .map_err(|e| Error::Subset {
                category,
                message: js_message(&e),
            })?;
        if subset.is_undefined() || subset.is_null() {
            return Err(Error::Subset {
                category,
                message: "viewer returned no subset".to_string(),
            });
        }
        Ok(subset)
    }

    fn attach_to_scene(&self, subset: &JsValue) {
        self.js_attach_to_scene(subset);
    }

    fn detach_from_scene(&self, subset: &JsValue) {
        self.js_detach_from_scene(subset);
    }

    async fn properties(
        &self,
        model: ModelId,
        element: ElementId,
        recursive: bool,
        include_inherited: bool,
    ) -> Result<PropertyRecord> {
        let to_error = |message: String| Error::Properties {
            model,
            element: element.0,
            message,
        };
        let value = settle(self.js_properties(model.0, element.0, recursive, include_inherited))
            .await
            .map_err(to_error)?;
        serde_wasm_bindgen::from_value(value).map_err(|e| to_error(e.to_string()))
    }

    fn highlight_preview(&self, model: ModelId, elements: &[ElementId]) {
        self.js_highlight_preview(model.0, &ids_to_js(elements));
    }

    fn select(&self, model: ModelId, elements: &[ElementId]) {
        self.js_select(model.0, &ids_to_js(elements));
    }

    fn clear_selection(&self) {
        self.js_clear_selection();
    }

    fn preview_at_cursor(&self) {
        self.js_preview_at_cursor();
    }

    async fn pick_at_cursor(&self) -> Result<Option<PickHit>> {
        let value = settle(self.js_pick_at_cursor()).await.map_err(Error::Viewer)?;
        let hit: Option<PickHitJs> = serde_wasm_bindgen::from_value(value)
            .map_err(|e| Error::InvalidResponse(format!("pickAtCursor: {}", e)))?;
        Ok(hit.map(|hit| PickHit {
            model_id: ModelId(hit.model_id),
            element_id: ElementId(hit.element_id),
        }))
    }

    fn type_code_for_name(&self, model: ModelId, name: &str) -> Result<CategoryId> {
        let to_error = |message: String| Error::TypeCode {
            name: name.to_string(),
            message,
        };
        let value = self
            .js_type_code_for_name(model.0, name)
            .map_err(|e| to_error(js_message(&e)))?;
        match value.as_f64() {
            Some(code) if code >= 0.0 && code.fract() == 0.0 && code <= f64::from(u32::MAX) => {
                Ok(CategoryId(code as u32))
            }
            _ => Err(to_error(format!("not a type code: {:?}", value))),
        }
    }

    async fn serialize_all_properties(&self, model: ModelId) -> Result<Vec<u8>> {
        let to_error = |message: String| Error::Export { model, message };
        let value = settle(self.js_serialize_all_properties(model.0))
            .await
            .map_err(to_error)?;
        export_bytes(&value).map_err(to_error)
    }

    fn create_dimension(&self) {
        self.js_create_dimension();
    }

    fn delete_dimension(&self) {
        self.js_delete_dimension();
    }
}
