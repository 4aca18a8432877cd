//! Navigation tree nodes.
//!
//! Sidebars and navbars are both built from [`NavigationNode`] values: a
//! [`Leaf`] points at one content page, a [`Group`] labels an ordered list
//! of children. Both constructors validate their input, so any node that
//! exists is well formed.

use std::collections::HashSet;

use serde::Serialize;

use crate::path::check_page_path;

/// Error returned when a node cannot be constructed.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum NodeError {
    /// Leaf path is empty, contains `..` or lacks a leading `/`.
    #[error("Invalid page path {path:?}: {reason}")]
    InvalidPath {
        /// Offending path as declared.
        path: String,
        /// Why the path was rejected.
        reason: &'static str,
    },
    /// Group declared without children.
    #[error("Group {label:?} has no children")]
    EmptyGroup {
        /// Group label.
        label: String,
    },
    /// Two sibling leaves under one group point at the same page.
    #[error("Group {label:?} lists {path} more than once")]
    DuplicateSiblingPath {
        /// Group label.
        label: String,
        /// Repeated leaf path.
        path: String,
    },
}

/// Navigation tree node.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum NavigationNode {
    /// Reference to one content page.
    Leaf(Leaf),
    /// Labelled list of child nodes.
    Group(Group),
}

impl NavigationNode {
    /// Short name of the variant, used in diagnostics.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Leaf(_) => "page",
            Self::Group(_) => "group",
        }
    }

    /// Visit every leaf in this subtree in rendered order.
    pub fn for_each_leaf<'a>(&'a self, f: &mut impl FnMut(&'a Leaf)) {
        match self {
            Self::Leaf(leaf) => f(leaf),
            Self::Group(group) => group.for_each_leaf(f),
        }
    }
}

impl From<Leaf> for NavigationNode {
    fn from(leaf: Leaf) -> Self {
        Self::Leaf(leaf)
    }
}

impl From<Group> for NavigationNode {
    fn from(group: Group) -> Self {
        Self::Group(group)
    }
}

/// Navigation entry pointing at a single page.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Leaf {
    path: String,
    #[serde(rename = "label", skip_serializing_if = "Option::is_none")]
    label_override: Option<String>,
}

impl Leaf {
    /// Create a leaf for a root-relative page path.
    ///
    /// # Errors
    ///
    /// Returns [`NodeError::InvalidPath`] if `path` is empty, contains `..`
    /// or does not start with `/`.
    pub fn new(path: impl Into<String>, label_override: Option<String>) -> Result<Self, NodeError> {
        let path = path.into();
        if let Err(reason) = check_page_path(&path) {
            return Err(NodeError::InvalidPath { path, reason });
        }
        Ok(Self {
            path,
            label_override,
        })
    }

    /// Page path as declared.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Label to show instead of the page's own title.
    #[must_use]
    pub fn label_override(&self) -> Option<&str> {
        self.label_override.as_deref()
    }
}

/// Labelled, ordered collection of navigation nodes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Group {
    label: String,
    collapsible: bool,
    children: Vec<NavigationNode>,
}

impl Group {
    /// Create a group.
    ///
    /// Children keep their declared order, which is the rendered order.
    ///
    /// # Errors
    ///
    /// Returns [`NodeError::EmptyGroup`] if `children` is empty and
    /// [`NodeError::DuplicateSiblingPath`] if two direct leaf children share
    /// a path.
    pub fn new(
        label: impl Into<String>,
        collapsible: bool,
        children: Vec<NavigationNode>,
    ) -> Result<Self, NodeError> {
        let label = label.into();
        if children.is_empty() {
            return Err(NodeError::EmptyGroup { label });
        }

        let mut seen = HashSet::new();
        for child in &children {
            if let NavigationNode::Leaf(leaf) = child
                && !seen.insert(leaf.path())
            {
                return Err(NodeError::DuplicateSiblingPath {
                    label,
                    path: leaf.path().to_owned(),
                });
            }
        }

        Ok(Self {
            label,
            collapsible,
            children,
        })
    }

    /// Display label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Whether the renderer may collapse this group.
    #[must_use]
    pub fn collapsible(&self) -> bool {
        self.collapsible
    }

    /// Child nodes in rendered order.
    #[must_use]
    pub fn children(&self) -> &[NavigationNode] {
        &self.children
    }

    /// Visit every leaf below this group in rendered order.
    pub fn for_each_leaf<'a>(&'a self, f: &mut impl FnMut(&'a Leaf)) {
        for child in &self.children {
            child.for_each_leaf(f);
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn leaf(path: &str) -> NavigationNode {
        Leaf::new(path, None).unwrap().into()
    }

    #[test]
    fn test_leaf_new_valid() {
        let leaf = Leaf::new("/guide/intro", Some("Intro".to_owned())).unwrap();
        assert_eq!(leaf.path(), "/guide/intro");
        assert_eq!(leaf.label_override(), Some("Intro"));
    }

    #[test]
    fn test_leaf_new_rejects_empty_path() {
        let err = Leaf::new("", None).unwrap_err();
        assert!(matches!(err, NodeError::InvalidPath { .. }));
    }

    #[test]
    fn test_leaf_new_rejects_relative_path() {
        let err = Leaf::new("guide/intro", None).unwrap_err();
        assert_eq!(
            err,
            NodeError::InvalidPath {
                path: "guide/intro".to_owned(),
                reason: "path must start with '/'",
            }
        );
    }

    #[test]
    fn test_leaf_new_rejects_parent_segments() {
        let err = Leaf::new("/guide/../config", None).unwrap_err();
        assert!(err.to_string().contains(".."));
    }

    #[test]
    fn test_group_new_rejects_empty_children() {
        let err = Group::new("Guide", true, Vec::new()).unwrap_err();
        assert_eq!(
            err,
            NodeError::EmptyGroup {
                label: "Guide".to_owned()
            }
        );
    }

    #[test]
    fn test_group_new_rejects_duplicate_sibling_paths() {
        let err = Group::new("Guide", false, vec![leaf("/a"), leaf("/b"), leaf("/a")]).unwrap_err();
        assert_eq!(
            err,
            NodeError::DuplicateSiblingPath {
                label: "Guide".to_owned(),
                path: "/a".to_owned(),
            }
        );
    }

    #[test]
    fn test_group_allows_same_path_in_different_groups() {
        let inner = Group::new("Features", false, vec![leaf("/a")]).unwrap();
        let outer = Group::new("Guide", false, vec![leaf("/a"), inner.into()]);
        assert!(outer.is_ok());
    }

    #[test]
    fn test_for_each_leaf_visits_in_rendered_order() {
        let inner = Group::new("Features", false, vec![leaf("/b"), leaf("/c")]).unwrap();
        let outer = Group::new("Guide", true, vec![leaf("/a"), inner.into(), leaf("/d")]).unwrap();

        let mut paths = Vec::new();
        outer.for_each_leaf(&mut |l| paths.push(l.path()));

        assert_eq!(paths, vec!["/a", "/b", "/c", "/d"]);
    }

    #[test]
    fn test_serialize_tagged_nodes() {
        let group = Group::new(
            "Guide",
            true,
            vec![Leaf::new("/a", Some("A".to_owned())).unwrap().into()],
        )
        .unwrap();
        let json = serde_json::to_value(NavigationNode::from(group)).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "type": "group",
                "label": "Guide",
                "collapsible": true,
                "children": [{"type": "leaf", "path": "/a", "label": "A"}]
            })
        );
    }
}
