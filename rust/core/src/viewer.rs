// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Capabilities required from the 3D viewer.
//!
//! The viewer owns parsing, rendering, picking and the scene graph. The
//! explorer only drives it through this trait, which keeps the explorer
//! testable without a browser.

use crate::error::Result;
use crate::property_panel::PropertyRecord;
use crate::schema::CategoryId;
use crate::spatial::{ElementId, ModelId, SpatialNode};

/// Result of a successful model load.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedModel {
    pub model_id: ModelId,
    pub spatial_root: SpatialNode,
}

/// Element under the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PickHit {
    pub model_id: ModelId,
    pub element_id: ElementId,
}

/// Parameters for materializing a renderable subset.
#[derive(Debug, Clone, PartialEq)]
pub struct SubsetRequest<'a> {
    pub model_id: ModelId,
    pub element_ids: &'a [ElementId],
    /// Replace an existing subset with the same key instead of adding one.
    pub replace_previous: bool,
    /// Key identifying the subset within the model.
    pub subset_key: String,
}

/// 3D viewer and model loader.
///
/// Futures are not required to be `Send`; the explorer runs on a single
/// UI thread.
#[allow(async_fn_in_trait)]
pub trait ViewerBackend {
    /// Opaque handle to a subset owned by the viewer.
    type Subset: Clone;

    async fn load_model(&self, url: &str) -> Result<LoadedModel>;

    fn remove_model(&self, model: ModelId);

    /// Take the full model geometry out of the scene, leaving only subsets.
    fn detach_model(&self, model: ModelId);

    async fn element_ids_of_category(
        &self,
        model: ModelId,
        category: CategoryId,
    ) -> Result<Vec<ElementId>>;

    fn create_subset(&self, request: SubsetRequest<'_>) -> Result<Self::Subset>;

    fn attach_to_scene(&self, subset: &Self::Subset);

    fn detach_from_scene(&self, subset: &Self::Subset);

    async fn properties(
        &self,
        model: ModelId,
        element: ElementId,
        recursive: bool,
        include_inherited: bool,
    ) -> Result<PropertyRecord>;

    /// Transient highlight, replaced by the next preview.
    fn highlight_preview(&self, model: ModelId, elements: &[ElementId]);

    /// Persistent selection.
    fn select(&self, model: ModelId, elements: &[ElementId]);

    fn clear_selection(&self);

    /// Transient highlight of whatever is under the cursor.
    fn preview_at_cursor(&self);

    async fn pick_at_cursor(&self) -> Result<Option<PickHit>>;

    fn type_code_for_name(&self, model: ModelId, name: &str) -> Result<CategoryId>;

    async fn serialize_all_properties(&self, model: ModelId) -> Result<Vec<u8>>;

    /// Start a dimension at the cursor.
    fn create_dimension(&self);

    /// Delete the dimension under the cursor.
    fn delete_dimension(&self);
}
