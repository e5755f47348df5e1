use std::fmt;

use super::RBTree;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Red,
    Black,
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Red => f.write_str("red"),
            Color::Black => f.write_str("black"),
        }
    }
}

/// Index of a node in the tree's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct NodeId(pub(crate) usize);

pub(crate) struct Node<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
    pub(crate) color: Color,
    pub(crate) left: Option<NodeId>,
    pub(crate) right: Option<NodeId>,
    // non-owning: the arena owns every node
    pub(crate) parent: Option<NodeId>,
}

impl<K, V> Node<K, V> {
    pub(crate) fn new_red(key: K, value: V, parent: Option<NodeId>) -> Self {
        Self {
            key,
            value,
            color: Color::Red,
            left: None,
            right: None,
            parent,
        }
    }
}

/// A borrowed, read-only view of one node in an [`RBTree`].
pub struct NodeRef<'a, K, V> {
    tree: &'a RBTree<K, V>,
    id: NodeId,
}

// not derived: that would require `K: Clone, V: Clone`
impl<K, V> Clone for NodeRef<'_, K, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, V> Copy for NodeRef<'_, K, V> {}

impl<'a, K, V> NodeRef<'a, K, V> {
    pub(crate) fn new(tree: &'a RBTree<K, V>, id: NodeId) -> Self {
        Self { tree, id }
    }

    #[cfg(test)]
    pub(crate) fn id(&self) -> NodeId {
        self.id
    }

    fn node(&self) -> &'a Node<K, V> {
        self.tree.node(self.id)
    }

    fn at(&self, id: Option<NodeId>) -> Option<Self> {
        id.map(|id| Self::new(self.tree, id))
    }

    pub fn key(&self) -> &'a K {
        &self.node().key
    }

    pub fn value(&self) -> &'a V {
        &self.node().value
    }

    pub fn color(&self) -> Color {
        self.node().color
    }

    pub fn is_red(&self) -> bool {
        self.color() == Color::Red
    }

    pub fn is_black(&self) -> bool {
        self.color() == Color::Black
    }

    pub fn left(&self) -> Option<Self> {
        self.at(self.node().left)
    }

    pub fn right(&self) -> Option<Self> {
        self.at(self.node().right)
    }

    /// `None` exactly for the root.
    pub fn parent(&self) -> Option<Self> {
        self.at(self.node().parent)
    }

    pub fn grandparent(&self) -> Option<Self> {
        self.parent()?.parent()
    }

    pub fn is_leaf(&self) -> bool {
        self.node().left.is_none() && self.node().right.is_none()
    }

    /// The node holding the smallest key of this subtree.
    pub fn min_node(&self) -> Self {
        let mut current = *self;
        while let Some(left) = current.left() {
            current = left;
        }
        current
    }

    /// The node holding the largest key of this subtree.
    pub fn max_node(&self) -> Self {
        let mut current = *self;
        while let Some(right) = current.right() {
            current = right;
        }
        current
    }

    pub fn min(&self) -> &'a K {
        self.min_node().key()
    }

    pub fn max(&self) -> &'a K {
        self.max_node().key()
    }

    /// Height of the subtree rooted here: a lone node has height 1.
    ///
    /// Walks the whole subtree on every call.
    pub fn height(&self) -> usize {
        self.tree.subtree_height(Some(self.id))
    }
}

impl<K, V> PartialEq for NodeRef<'_, K, V> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.id == other.id
    }
}

impl<K, V> Eq for NodeRef<'_, K, V> {}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for NodeRef<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("key", self.key())
            .field("value", self.value())
            .field("color", &self.color())
            .finish()
    }
}

impl<K: fmt::Display, V: fmt::Display> fmt::Display for NodeRef<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} => {} ({})", self.key(), self.value(), self.color())
    }
}
