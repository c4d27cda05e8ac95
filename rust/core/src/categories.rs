// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Category registry and subset visibility
//!
//! Each tracked category owns at most one viewer subset holding all of the
//! category's elements. Checkboxes toggle the subset in and out of the scene.

use crate::config::DiscoveryMode;
use crate::error::{Error, Result};
use crate::schema::{CategoryId, StructuralCategory};
use crate::spatial::{ElementId, ModelId, SpatialNode};
use crate::surface::CategoryToggle;
use crate::viewer::{SubsetRequest, ViewerBackend};
use rustc_hash::{FxHashMap, FxHashSet};

/// A category found for the current model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredCategory {
    pub category_id: CategoryId,
    pub display_name: String,
}

/// Find the categories to track for a model.
///
/// In discovered mode every distinct node type of `root` is resolved through
/// the viewer; names without a type code are skipped.
pub fn discover_categories<V: ViewerBackend>(
    viewer: &V,
    model: ModelId,
    root: &SpatialNode,
    mode: DiscoveryMode,
) -> Vec<DiscoveredCategory> {
    match mode {
        DiscoveryMode::Fixed => StructuralCategory::ALL
            .iter()
            .map(|category| DiscoveredCategory {
                category_id: category.type_code(),
                display_name: category.as_str().to_string(),
            })
            .collect(),
        DiscoveryMode::Discovered => {
            let mut seen = FxHashSet::default();
            let mut found = Vec::new();
            for name in root.distinct_types() {
                match viewer.type_code_for_name(model, name) {
                    Ok(category_id) => {
                        if seen.insert(category_id) {
                            found.push(DiscoveredCategory {
                                category_id,
                                display_name: name.to_string(),
                            });
                        }
                    }
                    Err(err) => {
                        tracing::warn!(name = %name, error = %err, "Skipping category without type code");
                    }
                }
            }
            found
        }
    }
}

/// Visibility state of one category.
#[derive(Debug, Clone)]
pub struct CategoryEntry<S> {
    category_id: CategoryId,
    display_name: String,
    element_ids: FxHashSet<ElementId>,
    subset: Option<S>,
    visible: bool,
    attached: bool,
}

impl<S> CategoryEntry<S> {
    pub fn category_id(&self) -> CategoryId {
        self.category_id
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn element_ids(&self) -> &FxHashSet<ElementId> {
        &self.element_ids
    }

    pub fn subset(&self) -> Option<&S> {
        self.subset.as_ref()
    }

    /// Checkbox state; always equal to whether the subset is in the scene.
    pub fn visible(&self) -> bool {
        self.visible
    }

    /// Whether the viewer produced a subset for this category.
    pub fn is_materialized(&self) -> bool {
        self.subset.is_some()
    }
}

/// Tracked categories of the active model.
#[derive(Debug, Clone)]
pub struct CategoryRegistry<S> {
    entries: FxHashMap<CategoryId, CategoryEntry<S>>,
    order: Vec<CategoryId>,
}

impl<S> Default for CategoryRegistry<S> {
    fn default() -> Self {
        Self {
            entries: FxHashMap::default(),
            order: Vec::new(),
        }
    }
}

impl<S: Clone> CategoryRegistry<S> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn get(&self, category: CategoryId) -> Option<&CategoryEntry<S>> {
        self.entries.get(&category)
    }

    /// Entries in discovery order.
    pub fn iter(&self) -> impl Iterator<Item = &CategoryEntry<S>> {
        self.order.iter().filter_map(|id| self.entries.get(id))
    }

    /// Checkbox states for materialized categories, in discovery order.
    pub fn toggles(&self) -> Vec<CategoryToggle> {
        self.iter()
            .filter(|entry| entry.is_materialized())
            .map(|entry| CategoryToggle {
                category_id: entry.category_id,
                display_name: entry.display_name.clone(),
                checked: entry.visible,
            })
            .collect()
    }

    /// Create (or replace) the subset of one category.
    ///
    /// A previously attached subset of the same category is detached first,
    /// so repeated calls leave exactly one subset in the scene. On failure the
    /// entry is kept without a subset and invisible, and the error is returned
    /// for logging.
    pub async fn build_subset<V>(
        &mut self,
        viewer: &V,
        model: ModelId,
        category: &DiscoveredCategory,
    ) -> Result<()>
    where
        V: ViewerBackend<Subset = S>,
    {
        let id = category.category_id;
        let outcome = match viewer.element_ids_of_category(model, id).await {
            Ok(ids) => viewer
                .create_subset(SubsetRequest {
                    model_id: model,
                    element_ids: &ids,
                    replace_previous: true,
                    subset_key: id.to_string(),
                })
                .map(|subset| (ids, subset)),
            Err(err) => Err(err),
        };

        let mut visible = true;
        if let Some(previous) = self.entries.get_mut(&id) {
            if previous.attached {
                if let Some(subset) = &previous.subset {
                    viewer.detach_from_scene(subset);
                }
                previous.attached = false;
            }
            if previous.is_materialized() {
                visible = previous.visible;
            }
            previous.visible = false;
        } else {
            self.order.push(id);
        }

        let (entry, result) = match outcome {
            Ok((ids, subset)) => {
                if visible {
                    viewer.attach_to_scene(&subset);
                }
                tracing::debug!(
                    category = %id,
                    name = %category.display_name,
                    elements = ids.len(),
                    "Built category subset"
                );
                let entry = CategoryEntry {
                    category_id: id,
                    display_name: category.display_name.clone(),
                    element_ids: ids.into_iter().collect(),
                    subset: Some(subset),
                    visible,
                    attached: visible,
                };
                (entry, Ok(()))
            }
            Err(err) => {
                let entry = CategoryEntry {
                    category_id: id,
                    display_name: category.display_name.clone(),
                    element_ids: FxHashSet::default(),
                    subset: None,
                    visible: false,
                    attached: false,
                };
                (entry, Err(err))
            }
        };
        self.entries.insert(id, entry);
        result
    }

    /// Show or hide a category's subset. Repeated calls are no-ops.
    pub fn toggle_visibility<V>(&mut self, viewer: &V, category: CategoryId, visible: bool) -> Result<()>
    where
        V: ViewerBackend<Subset = S>,
    {
        let entry = self
            .entries
            .get_mut(&category)
            .ok_or(Error::UnknownCategory(category))?;

        let Some(subset) = entry.subset.as_ref() else {
            tracing::debug!(category = %category, "Ignoring toggle of category without subset");
            return Ok(());
        };

        if visible && !entry.attached {
            viewer.attach_to_scene(subset);
            entry.attached = true;
        } else if !visible && entry.attached {
            viewer.detach_from_scene(subset);
            entry.attached = false;
        }
        entry.visible = entry.attached;
        Ok(())
    }

    /// Detach every subset and forget all categories.
    pub fn reset<V>(&mut self, viewer: &V)
    where
        V: ViewerBackend<Subset = S>,
    {
        for entry in self.entries.values() {
            if let (true, Some(subset)) = (entry.attached, &entry.subset) {
                viewer.detach_from_scene(subset);
            }
        }
        self.entries.clear();
        self.order.clear();
    }
}
