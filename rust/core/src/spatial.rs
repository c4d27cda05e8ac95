// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Spatial structure records produced by the viewer.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Handle of a model loaded by the viewer.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModelId(pub u32);

impl fmt::Display for ModelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Express id of an element, unique within one model.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(pub u32);

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for ElementId {
    fn from(id: u32) -> Self {
        ElementId(id)
    }
}

/// One node of the model's spatial hierarchy.
///
/// Matches the record the viewer hands out:
/// `{ "type": "IFCBUILDINGSTOREY", "expressID": 42, "children": [...] }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpatialNode {
    /// IFC type name, e.g. "IFCWALLSTANDARDCASE".
    #[serde(rename = "type")]
    pub node_type: String,
    /// Express id of the element.
    #[serde(rename = "expressID")]
    pub element_id: ElementId,
    /// Child nodes in model order.
    #[serde(default)]
    pub children: Vec<SpatialNode>,
}

impl SpatialNode {
    /// Create a node without children.
    pub fn leaf(node_type: impl Into<String>, element_id: u32) -> Self {
        Self {
            node_type: node_type.into(),
            element_id: ElementId(element_id),
            children: Vec::new(),
        }
    }

    /// Create a node with children.
    pub fn with_children(
        node_type: impl Into<String>,
        element_id: u32,
        children: Vec<SpatialNode>,
    ) -> Self {
        Self {
            node_type: node_type.into(),
            element_id: ElementId(element_id),
            children,
        }
    }

    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Tree label, `"<type> - <id>"`.
    pub fn label(&self) -> String {
        format!("{} - {}", self.node_type, self.element_id)
    }

    /// Depth-first, pre-order iterator over this node and all descendants.
    pub fn iter(&self) -> SpatialIter<'_> {
        SpatialIter { stack: vec![self] }
    }

    /// Number of nodes without children, this node included.
    pub fn leaf_count(&self) -> usize {
        self.iter().filter(|node| node.is_leaf()).count()
    }

    /// Distinct node types in first-seen pre-order.
    pub fn distinct_types(&self) -> Vec<&str> {
        let mut seen = FxHashSet::default();
        self.iter()
            .map(|node| node.node_type.as_str())
            .filter(|name| seen.insert(*name))
            .collect()
    }
}

/// Pre-order traversal over a [`SpatialNode`] tree.
pub struct SpatialIter<'a> {
    stack: Vec<&'a SpatialNode>,
}

impl<'a> Iterator for SpatialIter<'a> {
    type Item = &'a SpatialNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        // Reversed so the first child is visited next.
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> SpatialNode {
        SpatialNode::with_children(
            "IFCPROJECT",
            1,
            vec![
                SpatialNode::leaf("IFCWALLSTANDARDCASE", 10),
                SpatialNode::with_children(
                    "IFCBUILDINGSTOREY",
                    5,
                    vec![
                        SpatialNode::leaf("IFCDOOR", 20),
                        SpatialNode::leaf("IFCWALLSTANDARDCASE", 11),
                    ],
                ),
            ],
        )
    }

    #[test]
    fn test_deserialize_viewer_shape() {
        let json = r#"{
            "type": "IFCPROJECT",
            "expressID": 1,
            "children": [
                { "type": "IFCSITE", "expressID": 2, "children": [] },
                { "type": "IFCWALL", "expressID": 3 }
            ]
        }"#;
        let node: SpatialNode = serde_json::from_str(json).unwrap();
        assert_eq!(node.node_type, "IFCPROJECT");
        assert_eq!(node.element_id, ElementId(1));
        assert_eq!(node.children.len(), 2);
        assert!(node.children[1].is_leaf());
    }

    #[test]
    fn test_preorder_iteration() {
        let ids: Vec<u32> = sample().iter().map(|n| n.element_id.0).collect();
        assert_eq!(ids, vec![1, 10, 5, 20, 11]);
    }

    #[test]
    fn test_leaf_count() {
        assert_eq!(sample().leaf_count(), 3);
        assert_eq!(SpatialNode::leaf("IFCPROJECT", 1).leaf_count(), 1);
    }

    #[test]
    fn test_distinct_types_keep_first_seen_order() {
        let root = sample();
        assert_eq!(
            root.distinct_types(),
            vec!["IFCPROJECT", "IFCWALLSTANDARDCASE", "IFCBUILDINGSTOREY", "IFCDOOR"]
        );
    }

    #[test]
    fn test_label() {
        assert_eq!(SpatialNode::leaf("IFCDOOR", 20).label(), "IFCDOOR - 20");
    }
}
