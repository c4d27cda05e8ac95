// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Spatial tree projection
//!
//! Turns a [`SpatialNode`] hierarchy into an immutable render description.
//! The description is attached to the UI by an [`ExplorerSurface`]; the only
//! mutable part is the presentational expand/collapse flag of each branch.
//!
//! [`ExplorerSurface`]: crate::surface::ExplorerSurface

use crate::spatial::{ElementId, SpatialNode};
use crate::surface::UiEvent;

/// Child indices leading from the root to an entry. The root is `[]`.
pub type NodePath = Vec<usize>;

/// One entry of the tree view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeEntry {
    /// Collapsible entry with a caret toggle.
    Branch {
        label: String,
        element_id: ElementId,
        expanded: bool,
        children: Vec<TreeEntry>,
    },
    /// Entry that previews on hover and selects on click.
    Leaf { label: String, element_id: ElementId },
}

impl TreeEntry {
    fn branch(node: &SpatialNode) -> Self {
        TreeEntry::Branch {
            label: node.label(),
            element_id: node.element_id,
            expanded: false,
            children: node.children.iter().map(TreeEntry::from_node).collect(),
        }
    }

    fn from_node(node: &SpatialNode) -> Self {
        if node.is_leaf() {
            TreeEntry::Leaf {
                label: node.label(),
                element_id: node.element_id,
            }
        } else {
            TreeEntry::branch(node)
        }
    }

    pub fn label(&self) -> &str {
        match self {
            TreeEntry::Branch { label, .. } | TreeEntry::Leaf { label, .. } => label,
        }
    }

    pub fn element_id(&self) -> ElementId {
        match self {
            TreeEntry::Branch { element_id, .. } | TreeEntry::Leaf { element_id, .. } => {
                *element_id
            }
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, TreeEntry::Leaf { .. })
    }

    /// Children of a branch; empty for leaves.
    pub fn children(&self) -> &[TreeEntry] {
        match self {
            TreeEntry::Branch { children, .. } => children,
            TreeEntry::Leaf { .. } => &[],
        }
    }

    /// Expanded flag of a branch; `None` for leaves.
    pub fn expanded(&self) -> Option<bool> {
        match self {
            TreeEntry::Branch { expanded, .. } => Some(*expanded),
            TreeEntry::Leaf { .. } => None,
        }
    }

    /// Event raised when the pointer enters this entry.
    pub fn pointer_enter_event(&self) -> Option<UiEvent> {
        match self {
            TreeEntry::Leaf { element_id, .. } => Some(UiEvent::PreviewElement(*element_id)),
            TreeEntry::Branch { .. } => None,
        }
    }

    /// Event raised when this entry (or a branch's caret) is clicked.
    pub fn click_event(&self, path: &[usize]) -> UiEvent {
        match self {
            TreeEntry::Leaf { element_id, .. } => UiEvent::SelectElement(*element_id),
            TreeEntry::Branch { .. } => UiEvent::ToggleBranch(path.to_vec()),
        }
    }

    fn count(&self, leaves: &mut usize, branches: &mut usize) {
        match self {
            TreeEntry::Leaf { .. } => *leaves += 1,
            TreeEntry::Branch { children, .. } => {
                *branches += 1;
                for child in children {
                    child.count(leaves, branches);
                }
            }
        }
    }
}

/// Render description of a whole spatial tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeView {
    root: TreeEntry,
}

impl TreeView {
    /// Project a spatial tree. The root is always a branch, even without
    /// children, so the project node keeps its (empty) collapsible list.
    pub fn build(root: &SpatialNode) -> Self {
        Self {
            root: TreeEntry::branch(root),
        }
    }

    pub fn root(&self) -> &TreeEntry {
        &self.root
    }

    /// Entry at `path`, if it exists.
    pub fn entry(&self, path: &[usize]) -> Option<&TreeEntry> {
        path.iter()
            .try_fold(&self.root, |entry, &index| entry.children().get(index))
    }

    fn entry_mut(&mut self, path: &[usize]) -> Option<&mut TreeEntry> {
        let mut entry = &mut self.root;
        for &index in path {
            entry = match entry {
                TreeEntry::Branch { children, .. } => children.get_mut(index)?,
                TreeEntry::Leaf { .. } => return None,
            };
        }
        Some(entry)
    }

    /// Flip the expanded flag of the branch at `path`.
    ///
    /// Returns the new state, or `None` when `path` does not name a branch.
    pub fn toggle(&mut self, path: &[usize]) -> Option<bool> {
        match self.entry_mut(path)? {
            TreeEntry::Branch { expanded, .. } => {
                *expanded = !*expanded;
                Some(*expanded)
            }
            TreeEntry::Leaf { .. } => None,
        }
    }

    pub fn is_expanded(&self, path: &[usize]) -> Option<bool> {
        self.entry(path)?.expanded()
    }

    pub fn leaf_count(&self) -> usize {
        self.counts().0
    }

    pub fn branch_count(&self) -> usize {
        self.counts().1
    }

    fn counts(&self) -> (usize, usize) {
        let (mut leaves, mut branches) = (0, 0);
        self.root.count(&mut leaves, &mut branches);
        (leaves, branches)
    }

    /// Visit every entry in pre-order together with its path.
    pub fn walk<F>(&self, mut visit: F)
    where
        F: FnMut(&[usize], &TreeEntry),
    {
        fn go<F: FnMut(&[usize], &TreeEntry)>(
            entry: &TreeEntry,
            path: &mut NodePath,
            visit: &mut F,
        ) {
            visit(path.as_slice(), entry);
            for (index, child) in entry.children().iter().enumerate() {
                path.push(index);
                go(child, path, visit);
                path.pop();
            }
        }
        go(&self.root, &mut Vec::new(), &mut visit);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Project -> [Wall(10), Storey(5) -> [Door(20)]]
    fn scenario() -> SpatialNode {
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

    #[test]
    fn test_scenario_structure() {
        let view = TreeView::build(&scenario());
        let root = view.root();
        assert!(!root.is_leaf());
        assert_eq!(root.label(), "IFCPROJECT - 1");

        let wall = view.entry(&[0]).unwrap();
        assert!(wall.is_leaf());
        assert_eq!(wall.label(), "IFCWALLSTANDARDCASE - 10");

        let storey = view.entry(&[1]).unwrap();
        assert!(!storey.is_leaf());
        assert_eq!(storey.label(), "IFCBUILDINGSTOREY - 5");

        let door = view.entry(&[1, 0]).unwrap();
        assert!(door.is_leaf());
        assert_eq!(door.label(), "IFCDOOR - 20");
    }

    #[test]
    fn test_leaf_count_matches_childless_nodes() {
        let tree = scenario();
        let view = TreeView::build(&tree);
        assert_eq!(view.leaf_count(), tree.leaf_count());
        assert_eq!(view.branch_count(), 2);
    }

    #[test]
    fn test_empty_root_is_still_a_branch() {
        let view = TreeView::build(&SpatialNode::leaf("IFCPROJECT", 1));
        assert!(!view.root().is_leaf());
        assert!(view.root().children().is_empty());
        assert_eq!(view.leaf_count(), 0);
        assert_eq!(view.branch_count(), 1);
    }

    #[test]
    fn test_toggle_flips_branch_only() {
        let mut view = TreeView::build(&scenario());
        assert_eq!(view.is_expanded(&[1]), Some(false));
        assert_eq!(view.toggle(&[1]), Some(true));
        assert_eq!(view.is_expanded(&[1]), Some(true));
        assert_eq!(view.toggle(&[1]), Some(false));

        // Leaves and missing paths are not toggleable
        assert_eq!(view.toggle(&[0]), None);
        assert_eq!(view.toggle(&[7, 3]), None);
        assert_eq!(view.is_expanded(&[0]), None);
    }

    #[test]
    fn test_leaf_events() {
        let view = TreeView::build(&scenario());
        let door = view.entry(&[1, 0]).unwrap();
        assert_eq!(
            door.pointer_enter_event(),
            Some(UiEvent::PreviewElement(ElementId(20)))
        );
        assert_eq!(
            door.click_event(&[1, 0]),
            UiEvent::SelectElement(ElementId(20))
        );

        let storey = view.entry(&[1]).unwrap();
        assert_eq!(storey.pointer_enter_event(), None);
        assert_eq!(storey.click_event(&[1]), UiEvent::ToggleBranch(vec![1]));
    }

    #[test]
    fn test_walk_visits_in_preorder_with_paths() {
        let view = TreeView::build(&scenario());
        let mut seen = Vec::new();
        view.walk(|path, entry| seen.push((path.to_vec(), entry.element_id().0)));
        assert_eq!(
            seen,
            vec![
                (vec![], 1),
                (vec![0], 10),
                (vec![1], 5),
                (vec![1, 0], 20),
            ]
        );
    }
}
