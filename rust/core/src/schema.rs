// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! IFC category type codes
//!
//! Categories are identified by the schema type code the viewer uses for
//! `getAllItemsOfType`-style queries.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Schema type code of an element category.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryId(pub u32);

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for CategoryId {
    fn from(code: u32) -> Self {
        CategoryId(code)
    }
}

/// Structural categories tracked in fixed discovery mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StructuralCategory {
    WallStandardCase,
    Slab,
    Door,
    Window,
    FurnishingElement,
    Member,
    Plate,
}

impl StructuralCategory {
    /// All fixed categories, in checkbox order.
    pub const ALL: [StructuralCategory; 7] = [
        Self::WallStandardCase,
        Self::Slab,
        Self::Door,
        Self::Window,
        Self::FurnishingElement,
        Self::Member,
        Self::Plate,
    ];

    /// IFC type name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::WallStandardCase => "IFCWALLSTANDARDCASE",
            Self::Slab => "IFCSLAB",
            Self::Door => "IFCDOOR",
            Self::Window => "IFCWINDOW",
            Self::FurnishingElement => "IFCFURNISHINGELEMENT",
            Self::Member => "IFCMEMBER",
            Self::Plate => "IFCPLATE",
        }
    }

    /// IFC4 schema type code
    pub fn type_code(&self) -> CategoryId {
        let code = match self {
            Self::WallStandardCase => 3512223829,
            Self::Slab => 1529196076,
            Self::Door => 395920057,
            Self::Window => 3304561284,
            Self::FurnishingElement => 263784265,
            Self::Member => 1073191201,
            Self::Plate => 3171933400,
        };
        CategoryId(code)
    }

}

impl fmt::Display for StructuralCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_follow_checkbox_order() {
        let names: Vec<String> = StructuralCategory::ALL.iter().map(|c| c.to_string()).collect();
        assert_eq!(
            names,
            vec![
                "IFCWALLSTANDARDCASE",
                "IFCSLAB",
                "IFCDOOR",
                "IFCWINDOW",
                "IFCFURNISHINGELEMENT",
                "IFCMEMBER",
                "IFCPLATE",
            ]
        );
        assert_eq!(StructuralCategory::Door.type_code(), CategoryId(395920057));
    }

    #[test]
    fn test_type_codes_are_distinct() {
        let mut codes: Vec<u32> = StructuralCategory::ALL
            .iter()
            .map(|c| c.type_code().0)
            .collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), StructuralCategory::ALL.len());
    }
}
