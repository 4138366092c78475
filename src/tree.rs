//! Generic ordered tree with a two-primitive mutation surface.
//!
//! A [`Tree<L>`] is either empty or a label of type `L` paired with an ordered
//! sequence of child trees. The only way to change a tree's structure is
//! [`Tree::compose`] (empty tree becomes a node) and [`Tree::decompose`] (node
//! becomes an empty tree, handing back its label and children). Everything else
//! is read-only.
//!
//! ## Invariants
//! - Each child is owned by exactly one parent; moving a subtree into a new
//!   parent moves it out of the old one.
//! - `decompose` after `compose` returns the same label and the same children in
//!   the same order.
//! - A tree can never contain itself: `compose` consumes its children by value
//!   and borrows the receiver mutably, so the receiver cannot be among them.

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// CORE DATA STRUCTURES
// ============================================================================

/// An ordered, labelled tree that exclusively owns its subtrees.
///
/// # Examples
///
/// ```rust
/// use bl_ast::tree::Tree;
/// let mut leaf = Tree::new();
/// leaf.compose('b', vec![]);
/// let mut root = Tree::new();
/// root.compose('a', vec![leaf]);
/// assert_eq!(root.to_string(), "a(b)");
///
/// let (label, children) = root.decompose();
/// assert_eq!(label, 'a');
/// assert_eq!(children.len(), 1);
/// assert!(root.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tree<L> {
    node: Option<Node<L>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
struct Node<L> {
    label: L,
    children: Vec<Tree<L>>,
}

// ============================================================================
// STRUCTURAL PRIMITIVES
// ============================================================================

impl<L> Tree<L> {
    /// Creates an empty tree.
    pub fn new() -> Self {
        Self { node: None }
    }

    /// Returns true if this tree has no root.
    pub fn is_empty(&self) -> bool {
        self.node.is_none()
    }

    /// Turns this empty tree into the node `(label, children)`.
    ///
    /// The children are moved in, in order. Panics if the tree is not empty.
    pub fn compose(&mut self, label: L, children: Vec<Tree<L>>) {
        crate::requires!(self.is_empty(), "this is an empty tree");
        self.node = Some(Node { label, children });
    }

    /// Takes this node apart, returning its label and its children in order.
    ///
    /// The tree is empty afterwards. Panics if the tree is already empty.
    pub fn decompose(&mut self) -> (L, Vec<Tree<L>>) {
        let Some(Node { label, children }) = self.node.take() else {
            panic!("Violation of: this is not an empty tree");
        };
        (label, children)
    }

    // ------------------------------------------------------------------------
    // Read-only accessors
    // ------------------------------------------------------------------------

    /// Returns the root label. Panics if the tree is empty.
    pub fn root(&self) -> &L {
        match &self.node {
            Some(node) => &node.label,
            None => panic!("Violation of: this is not an empty tree"),
        }
    }

    /// Returns the root label, or `None` for an empty tree.
    pub fn label(&self) -> Option<&L> {
        self.node.as_ref().map(|node| &node.label)
    }

    /// Number of direct children; 0 for an empty tree.
    pub fn child_count(&self) -> usize {
        self.children().len()
    }

    /// The direct children in order; empty for an empty tree.
    pub fn children(&self) -> &[Tree<L>] {
        match &self.node {
            Some(node) => &node.children,
            None => &[],
        }
    }

    /// Returns the child at `pos`. Panics if `pos` is out of range.
    pub fn subtree(&self, pos: usize) -> &Tree<L> {
        let children = self.children();
        crate::requires!(pos < children.len(), "pos < [number of subtrees]");
        &children[pos]
    }

    /// Total number of nodes in the tree.
    pub fn size(&self) -> usize {
        match &self.node {
            Some(node) => 1 + node.children.iter().map(Tree::size).sum::<usize>(),
            None => 0,
        }
    }

    /// Length of the longest root-to-leaf path, counted in nodes.
    pub fn height(&self) -> usize {
        match &self.node {
            Some(node) => 1 + node.children.iter().map(Tree::height).max().unwrap_or(0),
            None => 0,
        }
    }
}

impl<L> Default for Tree<L> {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// DISPLAY
// ============================================================================

impl<L: fmt::Display> fmt::Display for Tree<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(node) = &self.node else {
            return write!(f, "()");
        };
        write!(f, "{}", node.label)?;
        if node.children.is_empty() {
            return Ok(());
        }
        write!(f, "(")?;
        for (i, child) in node.children.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}", child)?;
        }
        write!(f, ")")
    }
}
