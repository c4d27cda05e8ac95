// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Explorer configuration.
//!
//! Deserialized from the object passed by the page; every field is optional.

use serde::{Deserialize, Serialize};

/// How categories are found for a loaded model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum DiscoveryMode {
    /// Fixed list of structural categories.
    Fixed,
    /// Every distinct node type of the spatial tree.
    #[default]
    Discovered,
}

/// Explorer configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExplorerConfig {
    /// Category discovery strategy.
    pub discovery: DiscoveryMode,
    /// Offer all model properties as a download after each load.
    pub export_properties: bool,
    /// File name of the property export.
    pub export_file_name: String,
    /// Id of the tree container element.
    pub tree_root_id: String,
    /// Id of the property panel container element.
    pub property_root_id: String,
    /// Class of the checkbox container element (first match is used).
    pub checkbox_container_class: String,
    /// Id of the progress text element, if any.
    pub progress_text_id: Option<String>,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            discovery: DiscoveryMode::default(),
            export_properties: false,
            export_file_name: "properties.json".into(),
            tree_root_id: "tree-root".into(),
            property_root_id: "ifc-property-menu-root".into(),
            checkbox_container_class: "checkboxes".into(),
            progress_text_id: Some("progress-text".into()),
        }
    }
}
