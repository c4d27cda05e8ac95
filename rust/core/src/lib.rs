// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # IFC Explorer Core
//!
//! Viewer-side logic for browsing a loaded IFC model: the spatial tree, the
//! property panel and per-category visibility.
//!
//! ## Overview
//!
//! Parsing, rendering and picking belong to an external 3D viewer reached
//! through [`ViewerBackend`]. Everything shown to the user goes through an
//! [`ExplorerSurface`]. Between the two sit:
//!
//! - **Tree view**: pure projection of a [`SpatialNode`] hierarchy into a
//!   collapsible [`TreeView`]
//! - **Property panel**: [`PropertyRecord`] to filtered, normalized rows
//! - **Category registry**: one viewer subset per element category, toggled
//!   in and out of the scene by checkboxes
//! - **Explorer**: the controller that wires loads and input events together
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use ifc_explorer_core::{Explorer, ExplorerConfig};
//!
//! let explorer = Explorer::new(viewer, surface, ExplorerConfig::default());
//! let model = explorer.load_url("blob:...").await?;
//! explorer.double_clicked().await?;
//! ```

pub mod categories;
pub mod config;
pub mod error;
pub mod explorer;
pub mod property_panel;
pub mod schema;
pub mod spatial;
pub mod surface;
pub mod tree_view;
pub mod viewer;

pub use categories::{discover_categories, CategoryEntry, CategoryRegistry, DiscoveredCategory};
pub use config::{DiscoveryMode, ExplorerConfig};
pub use error::{Error, Result};
pub use explorer::{progress_percent, Explorer, KeyCommand};
pub use property_panel::{PropertyPanel, PropertyRecord, PropertyRow, PropertyValue, RESERVED_KEYS};
pub use schema::{CategoryId, StructuralCategory};
pub use spatial::{ElementId, ModelId, SpatialNode};
pub use surface::{CategoryToggle, ExplorerSurface, UiEvent};
pub use tree_view::{NodePath, TreeEntry, TreeView};
pub use viewer::{LoadedModel, PickHit, SubsetRequest, ViewerBackend};
