// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Explorer controller
//!
//! Orchestrates model loads and routes input to the viewer and the surface.
//! All methods take `&self`; mutable state lives in `Cell`/`RefCell` and no
//! borrow is held across an `.await`, so UI events can be handled while a
//! load is in flight. Every load takes a generation number; a load that
//! finds a newer one started after an `.await` drops what it built and
//! returns `Error::Superseded`, so the most recently started load owns the
//! tree, the registry and the panels.

use crate::categories::{discover_categories, CategoryRegistry};
use crate::config::ExplorerConfig;
use crate::error::{Error, Result};
use crate::property_panel::PropertyPanel;
use crate::spatial::{ModelId, SpatialNode};
use crate::surface::{ExplorerSurface, UiEvent};
use crate::tree_view::TreeView;
use crate::viewer::ViewerBackend;
use std::cell::{Cell, RefCell};

/// Keyboard shortcuts forwarded to the viewer's dimension tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    CreateDimension,
    DeleteDimension,
}

impl KeyCommand {
    /// Map a `KeyboardEvent.code` value.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "KeyD" => Some(Self::CreateDimension),
            "Delete" => Some(Self::DeleteDimension),
            _ => None,
        }
    }
}

/// Load progress in whole percent, truncated and clamped to `0..=100`.
pub fn progress_percent(loaded: f64, total: f64) -> u32 {
    if !(total > 0.0) || !(loaded > 0.0) {
        return 0;
    }
    (loaded / total * 100.0).trunc().min(100.0) as u32
}

/// Application controller tying the viewer, the registry and the surface.
pub struct Explorer<V: ViewerBackend, S: ExplorerSurface> {
    viewer: V,
    surface: S,
    config: ExplorerConfig,
    model: Cell<Option<ModelId>>,
    generation: Cell<u64>,
    tree: RefCell<Option<TreeView>>,
    registry: RefCell<CategoryRegistry<V::Subset>>,
}

impl<V: ViewerBackend, S: ExplorerSurface> Explorer<V, S> {
    pub fn new(viewer: V, surface: S, config: ExplorerConfig) -> Self {
        Self {
            viewer,
            surface,
            config,
            model: Cell::new(None),
            generation: Cell::new(0),
            tree: RefCell::new(None),
            registry: RefCell::new(CategoryRegistry::new()),
        }
    }

    pub fn viewer(&self) -> &V {
        &self.viewer
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn config(&self) -> &ExplorerConfig {
        &self.config
    }

    /// Model currently shown, if any.
    pub fn current_model(&self) -> Option<ModelId> {
        self.model.get()
    }

    /// Run `f` against the category registry.
    pub fn with_registry<R>(&self, f: impl FnOnce(&CategoryRegistry<V::Subset>) -> R) -> R {
        f(&self.registry.borrow())
    }

    /// Run `f` against the current tree view.
    pub fn with_tree<R>(&self, f: impl FnOnce(Option<&TreeView>) -> R) -> R {
        f(self.tree.borrow().as_ref())
    }

    /// Load a model and rebuild every panel for it.
    ///
    /// Load failures propagate; category failures only skip the category.
    /// A load overtaken by a newer one returns [`Error::Superseded`] and
    /// leaves the newer load's state untouched.
    pub async fn load_url(&self, url: &str) -> Result<ModelId> {
        let generation = self.generation.get() + 1;
        self.generation.set(generation);

        tracing::info!(url = %url, generation, "Loading model");
        let loaded = self.viewer.load_model(url).await?;
        let model = loaded.model_id;
        if self.is_stale(generation) {
            if self.model.get() != Some(model) {
                self.viewer.remove_model(model);
            }
            return Err(self.superseded(url));
        }

        if let Some(previous) = self.model.replace(Some(model)) {
            if previous != model {
                tracing::debug!(previous = %previous, "Removing previous model");
                self.viewer.remove_model(previous);
            }
        }
        self.viewer.detach_model(model);

        let view = TreeView::build(&loaded.spatial_root);
        self.surface.show_tree(&view)?;
        tracing::debug!(
            leaves = view.leaf_count(),
            branches = view.branch_count(),
            "Spatial tree rendered"
        );
        *self.tree.borrow_mut() = Some(view);

        // The previous registry keeps serving checkbox events until the swap
        let mut registry = self
            .build_registry(model, &loaded.spatial_root, generation)
            .await;
        if self.is_stale(generation) {
            registry.reset(&self.viewer);
            return Err(self.superseded(url));
        }

        let toggles = registry.toggles();
        {
            let mut current = self.registry.borrow_mut();
            current.reset(&self.viewer);
            *current = registry;
        }
        self.surface.show_categories(&toggles)?;

        tracing::info!(
            model = %model,
            categories = toggles.len(),
            "Model ready"
        );

        if self.config.export_properties {
            self.export_properties(model).await?;
        }
        Ok(model)
    }

    fn is_stale(&self, generation: u64) -> bool {
        self.generation.get() != generation
    }

    fn superseded(&self, url: &str) -> Error {
        tracing::debug!(url = %url, "Load superseded");
        Error::Superseded {
            url: url.to_string(),
        }
    }

    async fn build_registry(
        &self,
        model: ModelId,
        root: &SpatialNode,
        generation: u64,
    ) -> CategoryRegistry<V::Subset> {
        let categories = discover_categories(&self.viewer, model, root, self.config.discovery);
        let mut registry = CategoryRegistry::new();
        for category in &categories {
            if self.is_stale(generation) {
                break;
            }
            if let Err(err) = registry.build_subset(&self.viewer, model, category).await {
                tracing::warn!(
                    category = %category.category_id,
                    name = %category.display_name,
                    error = %err,
                    "Skipping category"
                );
            }
        }
        registry
    }

    /// Serialize all properties of `model` and offer them as a download.
    pub async fn export_properties(&self, model: ModelId) -> Result<()> {
        let data = self.viewer.serialize_all_properties(model).await?;
        tracing::debug!(model = %model, bytes = data.len(), "Exporting properties");
        self.surface.offer_download(&self.config.export_file_name, &data)
    }

    /// Pointer moved over the viewport.
    pub fn pointer_moved(&self) {
        self.viewer.preview_at_cursor();
    }

    /// Double click in the viewport: show the picked element's properties,
    /// or clear the selection and the panel when nothing is hit.
    pub async fn double_clicked(&self) -> Result<()> {
        match self.viewer.pick_at_cursor().await? {
            None => {
                self.viewer.clear_selection();
                self.surface.clear_properties()
            }
            Some(hit) => {
                let record = self
                    .viewer
                    .properties(hit.model_id, hit.element_id, true, false)
                    .await?;
                let panel = PropertyPanel::from_record(&record);
                self.surface.show_properties(&panel)
            }
        }
    }

    /// Keyboard shortcut. Returns the command that was run, if any.
    pub fn key_pressed(&self, code: &str) -> Option<KeyCommand> {
        let command = KeyCommand::from_code(code)?;
        match command {
            KeyCommand::CreateDimension => self.viewer.create_dimension(),
            KeyCommand::DeleteDimension => self.viewer.delete_dimension(),
        }
        Some(command)
    }

    /// Forward load progress to the surface.
    pub fn report_progress(&self, loaded: f64, total: f64) -> Result<()> {
        self.surface.show_progress(progress_percent(loaded, total))
    }

    /// Handle an event raised by the surface.
    pub fn handle(&self, event: UiEvent) -> Result<()> {
        match event {
            UiEvent::ToggleBranch(path) => {
                let expanded = self
                    .tree
                    .borrow_mut()
                    .as_mut()
                    .and_then(|tree| tree.toggle(&path));
                match expanded {
                    Some(expanded) => self.surface.set_branch_expanded(&path, expanded),
                    None => Ok(()),
                }
            }
            UiEvent::PreviewElement(element) => {
                if let Some(model) = self.model.get() {
                    self.viewer.highlight_preview(model, &[element]);
                }
                Ok(())
            }
            UiEvent::SelectElement(element) => {
                if let Some(model) = self.model.get() {
                    self.viewer.select(model, &[element]);
                }
                Ok(())
            }
            UiEvent::ToggleCategory { category, visible } => self
                .registry
                .borrow_mut()
                .toggle_visibility(&self.viewer, category, visible),
        }
    }
}
