// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for explorer operations.

use crate::schema::CategoryId;
use crate::spatial::ModelId;
use thiserror::Error;

/// Result type alias for explorer operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while driving the viewer.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// The viewer could not load or parse the model file.
    #[error("failed to load model from {url}: {message}")]
    Load { url: String, message: String },

    /// A node type name has no schema type code.
    #[error("no type code for IFC type {name}: {message}")]
    TypeCode { name: String, message: String },

    /// The viewer could not list the elements of a category.
    #[error("failed to list elements of category {category}: {message}")]
    ElementIds {
        category: CategoryId,
        message: String,
    },

    /// The viewer could not materialize a subset.
    #[error("failed to create subset for category {category}: {message}")]
    Subset {
        category: CategoryId,
        message: String,
    },

    /// The category is not tracked by the registry.
    #[error("unknown category {0}")]
    UnknownCategory(CategoryId),

    /// Property lookup failed.
    #[error("failed to fetch properties of element #{element} in model {model}: {message}")]
    Properties {
        model: ModelId,
        element: u32,
        message: String,
    },

    /// Property serialization for export failed.
    #[error("failed to serialize properties of model {model}: {message}")]
    Export { model: ModelId, message: String },

    /// The viewer returned data of an unexpected shape.
    #[error("invalid viewer response: {0}")]
    InvalidResponse(String),

    /// The UI surface could not be updated.
    #[error("surface error: {0}")]
    Surface(String),

    /// A newer load started before this one finished.
    #[error("load of {url} superseded by a newer load")]
    Superseded { url: String },

    /// Any other collaborator failure.
    #[error("viewer error: {0}")]
    Viewer(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::InvalidResponse(err.to_string())
    }
}
