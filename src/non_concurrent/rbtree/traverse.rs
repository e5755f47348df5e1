use std::collections::VecDeque;

use super::node::{NodeId, NodeRef};
use super::RBTree;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DepthFirst {
    PreOrder,
    InOrder,
    PostOrder,
}

impl<K, V> RBTree<K, V> {
    /// Nodes in ascending key order (left, node, right).
    ///
    /// Every traversal re-walks the tree: O(n) time, O(h) extra space.
    pub fn inorder(&self) -> Vec<NodeRef<'_, K, V>> {
        self.depth_first(DepthFirst::InOrder)
    }

    /// Nodes in node, left, right order.
    pub fn preorder(&self) -> Vec<NodeRef<'_, K, V>> {
        self.depth_first(DepthFirst::PreOrder)
    }

    /// Nodes in left, right, node order.
    pub fn postorder(&self) -> Vec<NodeRef<'_, K, V>> {
        self.depth_first(DepthFirst::PostOrder)
    }

    /// Nodes breadth-first, one `Vec` per depth, starting with `[root]`.
    ///
    /// Complexity: O(n) time, O(w) extra space for the widest level `w`.
    pub fn levelorder(&self) -> Vec<Vec<NodeRef<'_, K, V>>> {
        let mut levels = Vec::new();
        let mut queue: VecDeque<NodeId> = self.root.into_iter().collect();

        while !queue.is_empty() {
            let width = queue.len();
            let mut level = Vec::with_capacity(width);
            for _ in 0..width {
                let Some(id) = queue.pop_front() else { break };
                let node = self.node(id);
                queue.extend(node.left);
                queue.extend(node.right);
                level.push(NodeRef::new(self, id));
            }
            levels.push(level);
        }
        levels
    }

    pub fn inorder_keys(&self) -> Vec<&K> {
        self.inorder().into_iter().map(|n| n.key()).collect()
    }

    pub fn preorder_keys(&self) -> Vec<&K> {
        self.preorder().into_iter().map(|n| n.key()).collect()
    }

    pub fn postorder_keys(&self) -> Vec<&K> {
        self.postorder().into_iter().map(|n| n.key()).collect()
    }

    pub fn levelorder_keys(&self) -> Vec<Vec<&K>> {
        self.levelorder()
            .into_iter()
            .map(|level| level.into_iter().map(|n| n.key()).collect())
            .collect()
    }

    /// Lazily iterates `(key, value)` pairs in ascending key order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        let mut iter = Iter { tree: self, stack: Vec::new(), remaining: self.len() };
        iter.push_left_spine(self.root);
        iter
    }

    fn depth_first(&self, order: DepthFirst) -> Vec<NodeRef<'_, K, V>> {
        let mut out = Vec::with_capacity(self.len());
        self.walk(self.root, order, &mut out);
        out
    }

    // recursion depth is bounded by the tree height, which is O(log n)
    fn walk<'a>(&'a self, id: Option<NodeId>, order: DepthFirst, out: &mut Vec<NodeRef<'a, K, V>>) {
        let Some(id) = id else { return };
        let node = self.node(id);

        if order == DepthFirst::PreOrder {
            out.push(NodeRef::new(self, id));
        }
        self.walk(node.left, order, out);
        if order == DepthFirst::InOrder {
            out.push(NodeRef::new(self, id));
        }
        self.walk(node.right, order, out);
        if order == DepthFirst::PostOrder {
            out.push(NodeRef::new(self, id));
        }
    }
}

/// In-order iterator over an [`RBTree`], created by [`RBTree::iter`].
pub struct Iter<'a, K, V> {
    tree: &'a RBTree<K, V>,
    // nodes whose left subtree is done but which are not yet yielded
    stack: Vec<NodeId>,
    remaining: usize,
}

impl<K, V> Iter<'_, K, V> {
    fn push_left_spine(&mut self, mut id: Option<NodeId>) {
        while let Some(current) = id {
            self.stack.push(current);
            id = self.tree.node(current).left;
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        let node = self.tree.node(id);
        self.push_left_spine(node.right);
        self.remaining -= 1;
        Some((&node.key, &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<'a, K, V> IntoIterator for &'a RBTree<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    //         4
    //      /     \
    //     2       6
    //    / \     / \
    //   1   3   5   8
    //              / \
    //             7   9
    fn sample() -> RBTree<i32, char> {
        let mut tree = RBTree::new();
        for (k, v) in (1..=9).zip('a'..) {
            tree.insert(k, v).unwrap();
        }
        tree
    }

    #[test]
    fn depth_first_orders() {
        let tree = sample();
        assert_eq!(tree.inorder_keys(), [&1, &2, &3, &4, &5, &6, &7, &8, &9]);
        assert_eq!(tree.preorder_keys(), [&4, &2, &1, &3, &6, &5, &8, &7, &9]);
        assert_eq!(tree.postorder_keys(), [&1, &3, &2, &5, &7, &9, &8, &6, &4]);
    }

    #[test]
    fn level_order_groups() {
        let tree = sample();
        assert_eq!(
            tree.levelorder_keys(),
            vec![vec![&4], vec![&2, &6], vec![&1, &3, &5, &8], vec![&7, &9]]
        );
        let levels = tree.levelorder();
        assert_eq!(levels[0][0], tree.root().unwrap());
        assert_eq!(levels.iter().map(Vec::len).sum::<usize>(), tree.len());
    }

    #[test]
    fn traversals_are_repeatable() {
        let tree = sample();
        assert_eq!(tree.inorder(), tree.inorder());
        assert_eq!(tree.preorder_keys(), tree.preorder_keys());
        assert_eq!(tree.levelorder_keys(), tree.levelorder_keys());
    }

    #[test]
    fn empty_traversals() {
        let tree = RBTree::<i32, ()>::new();
        assert!(tree.inorder().is_empty());
        assert!(tree.postorder_keys().is_empty());
        assert!(tree.levelorder().is_empty());
        assert_eq!(tree.iter().next(), None);
    }

    #[test]
    fn iter_matches_inorder() {
        let tree = sample();
        let iter = tree.iter();
        assert_eq!(iter.len(), 9);

        let pairs: Vec<(i32, char)> = iter.map(|(k, v)| (*k, *v)).collect();
        assert_eq!(pairs.first(), Some(&(1, 'a')));
        assert_eq!(pairs.last(), Some(&(9, 'i')));

        let keys: Vec<&i32> = (&tree).into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, tree.inorder_keys());

        let inorder_values: Vec<&char> = tree.inorder().into_iter().map(|n| n.value()).collect();
        assert_eq!(inorder_values, tree.iter().map(|(_, v)| v).collect::<Vec<_>>());
    }
}
