// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! UI surface the explorer renders into.

use crate::error::Result;
use crate::property_panel::PropertyPanel;
use crate::schema::CategoryId;
use crate::spatial::ElementId;
use crate::tree_view::{NodePath, TreeView};

/// User interaction reported back by the surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    /// Pointer entered a tree leaf.
    PreviewElement(ElementId),
    /// Tree leaf clicked.
    SelectElement(ElementId),
    /// Branch caret clicked.
    ToggleBranch(NodePath),
    /// Category checkbox changed.
    ToggleCategory { category: CategoryId, visible: bool },
}

/// Checkbox state for one materialized category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryToggle {
    pub category_id: CategoryId,
    pub display_name: String,
    pub checked: bool,
}

/// Sink for everything the explorer shows.
///
/// Every `show_*` call replaces what the previous call attached, including
/// any listeners it registered.
pub trait ExplorerSurface {
    /// Replace the spatial tree.
    fn show_tree(&self, view: &TreeView) -> Result<()>;

    /// Reflect a branch's expanded flag after a toggle.
    fn set_branch_expanded(&self, path: &[usize], expanded: bool) -> Result<()>;

    /// Replace the property rows.
    fn show_properties(&self, panel: &PropertyPanel) -> Result<()>;

    /// Remove every property row.
    fn clear_properties(&self) -> Result<()>;

    /// Replace the category checkboxes.
    fn show_categories(&self, toggles: &[CategoryToggle]) -> Result<()>;

    /// Hand a generated file to the user.
    fn offer_download(&self, file_name: &str, data: &[u8]) -> Result<()>;

    /// Show load progress in percent.
    fn show_progress(&self, percent: u32) -> Result<()>;
}
