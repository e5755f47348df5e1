use log::trace;

use super::node::{Color, NodeId};
use super::RBTree;

/// Where a red node and its red parent sit below the grandparent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Shape {
    LeftLeft,
    LeftRight,
    RightRight,
    RightLeft,
}

impl<K, V> RBTree<K, V> {
    fn set_color(&mut self, id: NodeId, color: Color) {
        self.node_mut(id).color = color;
    }

    /// The parent of `z`, if both are red.
    fn red_parent(&self, z: NodeId) -> Option<NodeId> {
        let parent = self.node(z).parent?;
        let both_red = self.node(z).color == Color::Red && self.node(parent).color == Color::Red;
        both_red.then_some(parent)
    }

    /// Restores the red-black invariants after `z` was attached as a red leaf.
    pub(crate) fn insert_fixup(&mut self, mut z: NodeId) {
        while let Some(parent) = self.red_parent(z) {
            // a red parent is never the root, so the grandparent exists
            let Some(grandparent) = self.node(parent).parent else { break };

            let parent_is_left = self.node(grandparent).left == Some(parent);
            let uncle = match parent_is_left {
                true => self.node(grandparent).right,
                false => self.node(grandparent).left,
            };

            // a missing uncle is a black nil leaf
            if let Some(uncle) = uncle.filter(|&uncle| self.node(uncle).color == Color::Red) {
                trace!("recoloring below node {}", grandparent.0);
                self.set_color(parent, Color::Black);
                self.set_color(uncle, Color::Black);
                if self.root != Some(grandparent) {
                    self.set_color(grandparent, Color::Red);
                }
                z = grandparent;
                continue;
            }

            let z_is_left = self.node(parent).left == Some(z);
            let shape = match (parent_is_left, z_is_left) {
                (true, true) => Shape::LeftLeft,
                (true, false) => Shape::LeftRight,
                (false, false) => Shape::RightRight,
                (false, true) => Shape::RightLeft,
            };
            trace!("{shape:?} rotation at node {}", grandparent.0);

            let top = match shape {
                Shape::LeftLeft => self.rotate_right(grandparent),
                Shape::LeftRight => {
                    self.rotate_left(parent);
                    self.rotate_right(grandparent)
                }
                Shape::RightRight => self.rotate_left(grandparent),
                Shape::RightLeft => {
                    self.rotate_right(parent);
                    self.rotate_left(grandparent)
                }
            };
            self.swap_colors(grandparent, top);
            // the subtree now has a black top and the same black height as before
            break;
        }

        if let Some(root) = self.root {
            self.set_color(root, Color::Black);
        }
    }

    fn swap_colors(&mut self, a: NodeId, b: NodeId) {
        let (color_a, color_b) = (self.node(a).color, self.node(b).color);
        self.set_color(a, color_b);
        self.set_color(b, color_a);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging;

    fn colors(tree: &RBTree<i32, ()>) -> Vec<(i32, Color)> {
        tree.preorder().into_iter().map(|n| (*n.key(), n.color())).collect()
    }

    #[test]
    fn recolor_keeps_root_black() {
        logging::init_test();
        let mut tree = RBTree::new();
        for k in [20, 10, 30, 5] {
            tree.insert(k, ()).unwrap();
        }
        // 5's uncle 30 was red: 10 and 30 turn black, the root stays black
        assert_eq!(
            colors(&tree),
            [(20, Color::Black), (10, Color::Black), (5, Color::Red), (30, Color::Black)]
        );
    }

    #[test]
    fn recolor_propagates_then_rotates() {
        logging::init_test();
        let mut tree = RBTree::new();
        for k in [10, 5, 20, 1, 7, 15, 30, 25, 40] {
            tree.insert(k, ()).unwrap();
        }
        tree.check_invariants().unwrap();
        assert_eq!(*tree.root_key().unwrap(), 10);

        // 50: recolor under 30 makes 30 red under red 20, whose uncle 5 is black
        tree.insert(50, ()).unwrap();
        tree.check_invariants().unwrap();
        assert_eq!(*tree.root_key().unwrap(), 20);
        assert_eq!(
            colors(&tree),
            [
                (20, Color::Black),
                (10, Color::Red),
                (5, Color::Black),
                (1, Color::Red),
                (7, Color::Red),
                (15, Color::Black),
                (30, Color::Red),
                (25, Color::Black),
                (40, Color::Black),
                (50, Color::Red),
            ]
        );
    }

    #[test]
    fn zig_zag_shapes() {
        logging::init_test();
        for keys in [[30, 10, 20], [10, 30, 20]] {
            let mut tree = RBTree::new();
            for k in keys {
                tree.insert(k, ()).unwrap();
            }
            assert_eq!(colors(&tree), [(20, Color::Black), (10, Color::Red), (30, Color::Red)]);
        }
    }
}
