// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::utils::js_message;
use ifc_explorer_core::{Error, Result};
use wasm_bindgen::JsCast;
use web_sys::{Blob, BlobPropertyBag, Document, HtmlAnchorElement, Url};

/// Trigger a browser download of `data` named `file_name`.
///
/// Builds a blob, points a temporary anchor at its object URL, clicks it and
/// revokes the URL again.
pub fn trigger_download(document: &Document, file_name: &str, data: &[u8]) -> Result<()> {
    let bytes = js_sys::Uint8Array::new_with_length(data.len() as u32);
    bytes.copy_from(data);

    let parts = js_sys::Array::new();
    parts.push(&bytes);

    let options = BlobPropertyBag::new();
    options.set_type("application/json");
    let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &options)
        .map_err(|e| Error::Surface(format!("failed to create blob: {}", js_message(&e))))?;

    let url = Url::create_object_url_with_blob(&blob)
        .map_err(|e| Error::Surface(format!("failed to create object URL: {}", js_message(&e))))?;

    let result = click_anchor(document, &url, file_name);
    let _ = Url::revoke_object_url(&url);
    result
}

fn click_anchor(document: &Document, url: &str, file_name: &str) -> Result<()> {
    let anchor = document
        .create_element("a")
        .map_err(|e| Error::Surface(js_message(&e)))?
        .dyn_into::<HtmlAnchorElement>()
        .map_err(|_| Error::Surface("failed to cast to anchor".to_string()))?;
    anchor.set_href(url);
    anchor.set_download(file_name);

    // Firefox only follows anchors that are part of the document
    let body = document
        .body()
        .ok_or_else(|| Error::Surface("document has no body".to_string()))?;
    body.append_child(&anchor)
        .map_err(|e| Error::Surface(js_message(&e)))?;
    anchor.click();
    body.remove_child(&anchor)
        .map_err(|e| Error::Surface(js_message(&e)))?;
    Ok(())
}
