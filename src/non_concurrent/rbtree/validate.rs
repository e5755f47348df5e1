use std::cmp::Ordering;

use super::node::{Color, NodeId};
use super::{DuplicateKeys, RBTree};
use crate::error::InvariantViolation;

impl<K: Ord, V> RBTree<K, V> {
    /// Checks every structural invariant and returns the black height of the
    /// tree (the number of black nodes on any root-to-leaf path).
    ///
    /// Checked: the root is black and has no parent, every child points back
    /// at its parent, no red node has a red child, black heights agree, keys
    /// are in order (strictly, unless duplicates are allowed) and `len()`
    /// matches the number of reachable nodes.
    ///
    /// Complexity: O(n)
    pub fn check_invariants(&self) -> Result<usize, InvariantViolation> {
        let Some(root) = self.root else {
            return match self.len() {
                0 => Ok(0),
                n => Err(InvariantViolation::SizeMismatch { expected: n, reachable: 0 }),
            }
        };

        if self.node(root).color == Color::Red {
            return Err(InvariantViolation::RedRoot)
        }
        if self.node(root).parent.is_some() {
            return Err(InvariantViolation::RootHasParent)
        }

        let mut reachable = 0;
        let black_height = self.check_subtree(root, 0, &mut reachable)?;

        if reachable != self.len() {
            return Err(InvariantViolation::SizeMismatch { expected: self.len(), reachable })
        }

        let keys = self.inorder_keys();
        for (position, pair) in keys.windows(2).enumerate() {
            let in_order = match (pair[0].cmp(pair[1]), self.duplicates) {
                (Ordering::Less, _) => true,
                (Ordering::Equal, DuplicateKeys::Allow) => true,
                _ => false,
            };
            if !in_order {
                return Err(InvariantViolation::OutOfOrder { position: position + 1 })
            }
        }

        Ok(black_height)
    }

    /// Returns the black height below `id`, counting `id` itself.
    fn check_subtree(
        &self,
        id: NodeId,
        depth: usize,
        reachable: &mut usize,
    ) -> Result<usize, InvariantViolation> {
        *reachable += 1;
        let node = self.node(id);

        let mut heights = [0; 2];
        for (height, child) in heights.iter_mut().zip([node.left, node.right]) {
            let Some(child) = child else { continue };
            if self.node(child).parent != Some(id) {
                return Err(InvariantViolation::BrokenParentLink { depth: depth + 1 })
            }
            if node.color == Color::Red && self.node(child).color == Color::Red {
                return Err(InvariantViolation::RedRedEdge { depth })
            }
            *height = self.check_subtree(child, depth + 1, reachable)?;
        }

        let [left, right] = heights;
        if left != right {
            return Err(InvariantViolation::BlackHeightMismatch { depth, left, right })
        }
        Ok(left + usize::from(node.color == Color::Black))
    }
}
