//! An ordered map backed by a red-black tree.
//!
//! Nodes live in an arena owned by the tree and point at each other by index,
//! so the parent link used during rebalancing is a plain, non-owning lookup.

use std::borrow::Borrow;
use std::cmp::Ordering;

use log::debug;

use crate::error::TreeError;

mod fixup;
mod node;
mod rotate;
mod traverse;
mod validate;

pub use node::{Color, NodeRef};
pub use traverse::Iter;

use node::{Node, NodeId};

// PROVE: any node with height `h` has black height at least `h/2`
// PROVE: the subtree located at any node `x` contains at least `2^bh(x) - 1` nodes (use induction)
// LEMMA: An RBTree with `n` internal nodes has height at most `2*log₂(n+1)`

/// What `insert` does with a key that is already present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicateKeys {
    /// Fail with [`TreeError::DuplicateKey`] and leave the tree untouched.
    #[default]
    Reject,
    /// Store another node with the same key. Equal keys descend to the right,
    /// so in-order traversal yields them in insertion order.
    Allow,
}

/// Red-black tree mapping `K` to `V`.
///
/// Insertion and lookup are `O(log n)`. Removal is not supported: see [`RBTree::remove`].
pub struct RBTree<K, V> {
    nodes: Vec<Node<K, V>>,
    root: Option<NodeId>,
    duplicates: DuplicateKeys,
}

impl<K, V> RBTree<K, V> {
    /// Creates an empty tree that rejects duplicate keys.
    pub fn new() -> Self {
        Self::with_duplicates(DuplicateKeys::Reject)
    }

    pub fn with_duplicates(duplicates: DuplicateKeys) -> Self {
        Self {
            nodes: Vec::new(),
            root: None,
            duplicates,
        }
    }

    pub fn duplicates(&self) -> DuplicateKeys {
        self.duplicates
    }

    /// The number of keys in the tree.
    pub fn len(&self) -> usize {
        // nodes are never freed, so every arena slot is a live key
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn root(&self) -> Option<NodeRef<'_, K, V>> {
        self.root.map(|id| NodeRef::new(self, id))
    }

    pub fn root_key(&self) -> Result<&K, TreeError> {
        self.root().map(|root| root.key()).ok_or(TreeError::Empty)
    }

    /// Height of the tree, counting nodes: an empty tree has height 0.
    ///
    /// Complexity: O(n), recomputed on every call.
    pub fn height(&self) -> usize {
        self.subtree_height(self.root)
    }

    /// The smallest key, if any.
    pub fn min(&self) -> Option<&K> {
        self.root().map(|root| root.min())
    }

    /// The largest key, if any.
    pub fn max(&self) -> Option<&K> {
        self.root().map(|root| root.max())
    }

    /// Removal is not supported, so this always returns `false` and leaves the tree as is.
    pub fn remove<Q>(&mut self, _key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        debug!("remove is unsupported, tree left unchanged");
        false
    }

    pub(crate) fn node(&self, id: NodeId) -> &Node<K, V> {
        &self.nodes[id.0]
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node<K, V> {
        &mut self.nodes[id.0]
    }

    pub(crate) fn subtree_height(&self, id: Option<NodeId>) -> usize {
        match id {
            None => 0,
            Some(id) => {
                let node = self.node(id);
                self.subtree_height(node.left).max(self.subtree_height(node.right)) + 1
            }
        }
    }
}

impl<K: Ord, V> RBTree<K, V> {
    /// Inserts `key` with `value`, then rebalances.
    ///
    /// Complexity: O(log n)
    pub fn insert(&mut self, key: K, value: V) -> Result<(), TreeError> {
        let Some(mut current) = self.root else {
            let id = self.push(Node::new_red(key, value, None));
            self.node_mut(id).color = Color::Black;
            self.root = Some(id);
            debug!("inserted root node {}", id.0);
            return Ok(())
        };

        // descend to the first free slot; ties go right
        let goes_left = loop {
            let goes_left = match self.node(current).key.cmp(&key) {
                Ordering::Greater => true,
                Ordering::Equal if self.duplicates == DuplicateKeys::Reject => {
                    debug!("rejected duplicate key at node {}", current.0);
                    return Err(TreeError::DuplicateKey)
                }
                Ordering::Less | Ordering::Equal => false,
            };
            let next = match goes_left {
                true => self.node(current).left,
                false => self.node(current).right,
            };
            match next {
                Some(next) => current = next,
                None => break goes_left,
            }
        };

        let id = self.push(Node::new_red(key, value, Some(current)));
        match goes_left {
            true => self.node_mut(current).left = Some(id),
            false => self.node_mut(current).right = Some(id),
        }
        debug!("inserted node {} under node {}", id.0, current.0);

        self.insert_fixup(id);
        Ok(())
    }

    /// Looks up the value for `key`. When duplicates are allowed, this is the
    /// first matching node met on the way down from the root.
    ///
    /// Complexity: O(log n)
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.find(key).map(|id| &self.node(id).value)
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.find(key).is_some()
    }

    fn find<Q>(&self, key: &Q) -> Option<NodeId>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut current = self.root;
        while let Some(id) = current {
            let node = self.node(id);
            current = match node.key.borrow().cmp(key) {
                Ordering::Greater => node.left,
                Ordering::Less => node.right,
                Ordering::Equal => return Some(id),
            };
        }
        None
    }

    fn push(&mut self, node: Node<K, V>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        id
    }
}

impl<K, V> Default for RBTree<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord, V> Extend<(K, V)> for RBTree<K, V> {
    /// Inserts every pair. Pairs whose key is rejected as a duplicate are dropped.
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            // only `DuplicateKey` can come back, and skipping it is the documented behavior
            let _ = self.insert(key, value);
        }
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for RBTree<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<K: std::fmt::Debug, V: std::fmt::Debug> std::fmt::Debug for RBTree<K, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}
