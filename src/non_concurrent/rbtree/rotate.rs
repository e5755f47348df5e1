use log::trace;

use super::RBTree;
use super::node::NodeId;

impl<K, V> RBTree<K, V> {
    /// Rotates `x` down to the left; its right child takes its place, which is returned.
    ///
    /// ```text
    ///     x              y
    ///    / \            / \
    ///   a   y    =>    x   c
    ///      / \        / \
    ///     b   c      a   b
    /// ```
    ///
    /// Panics if `x` has no right child.
    pub(crate) fn rotate_left(&mut self, x: NodeId) -> NodeId {
        let y = self.node(x).right.expect("rotate_left needs a right child to pivot on");
        trace!("rotating left around node {}", x.0);

        let b = self.node(y).left;
        self.node_mut(x).right = b;
        if let Some(b) = b {
            self.node_mut(b).parent = Some(x);
        }

        self.replace_child(x, y);

        self.node_mut(y).left = Some(x);
        self.node_mut(x).parent = Some(y);
        y
    }

    /// Mirror of [`Self::rotate_left`]. Panics if `x` has no left child.
    pub(crate) fn rotate_right(&mut self, x: NodeId) -> NodeId {
        let y = self.node(x).left.expect("rotate_right needs a left child to pivot on");
        trace!("rotating right around node {}", x.0);

        let b = self.node(y).right;
        self.node_mut(x).left = b;
        if let Some(b) = b {
            self.node_mut(b).parent = Some(x);
        }

        self.replace_child(x, y);

        self.node_mut(y).right = Some(x);
        self.node_mut(x).parent = Some(y);
        y
    }

    /// Hangs `new` where `old` used to be under `old`'s parent, or at the root.
    fn replace_child(&mut self, old: NodeId, new: NodeId) {
        let parent = self.node(old).parent;
        self.node_mut(new).parent = parent;

        match parent {
            None => self.root = Some(new),
            Some(p) if self.node(p).left == Some(old) => self.node_mut(p).left = Some(new),
            Some(p) => {
                debug_assert_eq!(self.node(p).right, Some(old), "parent and child links disagree");
                self.node_mut(p).right = Some(new)
            }
        }
    }
}
