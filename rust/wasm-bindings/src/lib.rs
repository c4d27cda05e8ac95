// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! IFC Explorer WebAssembly Bindings
//!
//! Browser shell for `ifc-explorer-core`: a DOM-backed surface, an adapter
//! over the page's JavaScript viewer and the `IfcExplorer` entry point.

use wasm_bindgen::prelude::*;

mod api;
mod bridge;
mod dom;
mod download;
mod utils;

pub use api::IfcExplorer;
pub use bridge::JsViewer;
pub use dom::{Dispatch, DomSurface, SurfaceElements};
pub use download::trigger_download;
pub use utils::set_panic_hook as init_panic_hook;

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    utils::set_panic_hook();
    utils::init_tracing();
}

/// Get the version of the explorer bindings
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
