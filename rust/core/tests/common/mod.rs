// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! In-memory viewer and surface used by the integration tests.

#![allow(dead_code)]

use ifc_explorer_core::{
    CategoryId, CategoryToggle, ElementId, Error, ExplorerSurface, LoadedModel, ModelId,
    NodePath, PickHit, PropertyPanel, PropertyRecord, Result, SpatialNode, SubsetRequest,
    TreeView, ViewerBackend,
};
use rustc_hash::{FxHashMap, FxHashSet};
use std::cell::{Cell, RefCell};

/// Subset handle handed out by [`MockViewer`].
#[derive(Debug, Clone, PartialEq)]
pub struct MockSubset {
    pub serial: u32,
    pub key: String,
    pub elements: Vec<ElementId>,
}

/// Side effects recorded by [`MockViewer`].
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    RemoveModel(ModelId),
    DetachModel(ModelId),
    Highlight(ModelId, Vec<ElementId>),
    Select(ModelId, Vec<ElementId>),
    ClearSelection,
    PreviewAtCursor,
    Properties {
        model: ModelId,
        element: ElementId,
        recursive: bool,
        include_inherited: bool,
    },
    CreateDimension,
    DeleteDimension,
}

#[derive(Default)]
pub struct MockViewer {
    pub models: FxHashMap<String, LoadedModel>,
    pub type_codes: FxHashMap<String, CategoryId>,
    pub category_elements: FxHashMap<CategoryId, Vec<ElementId>>,
    pub failing_subsets: FxHashSet<CategoryId>,
    pub properties: FxHashMap<ElementId, PropertyRecord>,
    pub export: Vec<u8>,
    pub pick: Cell<Option<PickHit>>,
    /// Scheduler yields before each element lookup, per model.
    pub slow_models: FxHashMap<ModelId, usize>,
    pub calls: RefCell<Vec<Call>>,
    /// Subsets currently in the scene. Duplicates mean double attachment.
    pub scene: RefCell<Vec<MockSubset>>,
    next_serial: Cell<u32>,
}

impl MockViewer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_model(mut self, url: &str, model_id: u32, root: SpatialNode) -> Self {
        self.models.insert(
            url.to_string(),
            LoadedModel {
                model_id: ModelId(model_id),
                spatial_root: root,
            },
        );
        self
    }

    pub fn with_type(mut self, name: &str, code: u32, elements: &[u32]) -> Self {
        self.type_codes.insert(name.to_string(), CategoryId(code));
        self.category_elements.insert(
            CategoryId(code),
            elements.iter().copied().map(ElementId).collect(),
        );
        self
    }

    pub fn with_elements(mut self, code: u32, elements: &[u32]) -> Self {
        self.category_elements.insert(
            CategoryId(code),
            elements.iter().copied().map(ElementId).collect(),
        );
        self
    }

    pub fn with_failing_subset(mut self, code: u32) -> Self {
        self.failing_subsets.insert(CategoryId(code));
        self
    }

    pub fn with_slow_model(mut self, model_id: u32, yields: usize) -> Self {
        self.slow_models.insert(ModelId(model_id), yields);
        self
    }

    pub fn with_properties(mut self, element: u32, record: PropertyRecord) -> Self {
        self.properties.insert(ElementId(element), record);
        self
    }

    /// Number of scene attachments of the subset keyed by `code`.
    pub fn attached_count(&self, code: u32) -> usize {
        let key = code.to_string();
        self.scene.borrow().iter().filter(|s| s.key == key).count()
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }
}

impl ViewerBackend for MockViewer {
    type Subset = MockSubset;

    async fn load_model(&self, url: &str) -> Result<LoadedModel> {
        self.models.get(url).cloned().ok_or_else(|| Error::Load {
            url: url.to_string(),
            message: "file not found".to_string(),
        })
    }

    fn remove_model(&self, model: ModelId) {
        self.record(Call::RemoveModel(model));
    }

    fn detach_model(&self, model: ModelId) {
        self.record(Call::DetachModel(model));
    }

    async fn element_ids_of_category(
        &self,
        model: ModelId,
        category: CategoryId,
    ) -> Result<Vec<ElementId>> {
        for _ in 0..self.slow_models.get(&model).copied().unwrap_or(0) {
            tokio::task::yield_now().await;
        }
        self.category_elements
            .get(&category)
            .cloned()
            .ok_or_else(|| Error::ElementIds {
                category,
                message: "unknown type code".to_string(),
            })
    }

    fn create_subset(&self, request: SubsetRequest<'_>) -> Result<MockSubset> {
        let category = CategoryId(request.subset_key.parse().unwrap_or_default());
        if self.failing_subsets.contains(&category) {
            return Err(Error::Subset {
                category,
                message: "no geometry".to_string(),
            });
        }
        let serial = self.next_serial.get() + 1;
        self.next_serial.set(serial);
        Ok(MockSubset {
            serial,
            key: request.subset_key,
            elements: request.element_ids.to_vec(),
        })
    }

    fn attach_to_scene(&self, subset: &MockSubset) {
        self.scene.borrow_mut().push(subset.clone());
    }

    fn detach_from_scene(&self, subset: &MockSubset) {
        self.scene.borrow_mut().retain(|s| s.serial != subset.serial);
    }

    async fn properties(
        &self,
        model: ModelId,
        element: ElementId,
        recursive: bool,
        include_inherited: bool,
    ) -> Result<PropertyRecord> {
        self.record(Call::Properties {
            model,
            element,
            recursive,
            include_inherited,
        });
        self.properties
            .get(&element)
            .cloned()
            .ok_or_else(|| Error::Properties {
                model,
                element: element.0,
                message: "no such element".to_string(),
            })
    }

    fn highlight_preview(&self, model: ModelId, elements: &[ElementId]) {
        self.record(Call::Highlight(model, elements.to_vec()));
    }

    fn select(&self, model: ModelId, elements: &[ElementId]) {
        self.record(Call::Select(model, elements.to_vec()));
    }

    fn clear_selection(&self) {
        self.record(Call::ClearSelection);
    }

    fn preview_at_cursor(&self) {
        self.record(Call::PreviewAtCursor);
    }

    async fn pick_at_cursor(&self) -> Result<Option<PickHit>> {
        Ok(self.pick.get())
    }

    fn type_code_for_name(&self, _model: ModelId, name: &str) -> Result<CategoryId> {
        self.type_codes
            .get(name)
            .copied()
            .ok_or_else(|| Error::TypeCode {
                name: name.to_string(),
                message: "not in schema".to_string(),
            })
    }

    async fn serialize_all_properties(&self, _model: ModelId) -> Result<Vec<u8>> {
        Ok(self.export.clone())
    }

    fn create_dimension(&self) {
        self.record(Call::CreateDimension);
    }

    fn delete_dimension(&self) {
        self.record(Call::DeleteDimension);
    }
}

/// Surface that keeps whatever it was last asked to show.
#[derive(Default)]
pub struct RecordingSurface {
    pub tree: RefCell<Option<TreeView>>,
    pub tree_renders: Cell<usize>,
    pub expanded: RefCell<Vec<(NodePath, bool)>>,
    pub properties: RefCell<Option<PropertyPanel>>,
    pub categories: RefCell<Vec<CategoryToggle>>,
    pub downloads: RefCell<Vec<(String, Vec<u8>)>>,
    pub progress: RefCell<Vec<u32>>,
}

impl RecordingSurface {
    pub fn property_keys(&self) -> Vec<String> {
        self.properties
            .borrow()
            .as_ref()
            .map(|panel| panel.rows().iter().map(|r| r.key.clone()).collect())
            .unwrap_or_default()
    }
}

impl ExplorerSurface for RecordingSurface {
    fn show_tree(&self, view: &TreeView) -> Result<()> {
        *self.tree.borrow_mut() = Some(view.clone());
        self.tree_renders.set(self.tree_renders.get() + 1);
        Ok(())
    }

    fn set_branch_expanded(&self, path: &[usize], expanded: bool) -> Result<()> {
        self.expanded.borrow_mut().push((path.to_vec(), expanded));
        Ok(())
    }

    fn show_properties(&self, panel: &PropertyPanel) -> Result<()> {
        *self.properties.borrow_mut() = Some(panel.clone());
        Ok(())
    }

    fn clear_properties(&self) -> Result<()> {
        *self.properties.borrow_mut() = None;
        Ok(())
    }

    fn show_categories(&self, toggles: &[CategoryToggle]) -> Result<()> {
        *self.categories.borrow_mut() = toggles.to_vec();
        Ok(())
    }

    fn offer_download(&self, file_name: &str, data: &[u8]) -> Result<()> {
        self.downloads
            .borrow_mut()
            .push((file_name.to_string(), data.to_vec()));
        Ok(())
    }

    fn show_progress(&self, percent: u32) -> Result<()> {
        self.progress.borrow_mut().push(percent);
        Ok(())
    }
}

/// Project -> [Wall(10), Storey(5) -> [Door(20)]]
pub fn sample_tree() -> SpatialNode {
    SpatialNode::with_children(
        "IFCPROJECT",
        1,
        vec![
            SpatialNode::leaf("IFCWALLSTANDARDCASE", 10),
            SpatialNode::with_children(
                "IFCBUILDINGSTOREY",
                5,
                vec![SpatialNode::leaf("IFCDOOR", 20)],
            ),
        ],
    )
}
