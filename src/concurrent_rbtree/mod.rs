use std::borrow::Borrow;

use crate::error::TreeError;
use crate::non_concurrent::rbtree::{DuplicateKeys, RBTree};
use crate::spinlock_mutex::Mutex;

/// An [`RBTree`] behind one exclusive lock.
///
/// Rotations can rewrite links between nodes that are far apart, so there is no
/// finer-grained locking: every call holds the lock for its whole duration,
/// readers included.
pub struct SharedRBTree<K, V> {
    tree: Mutex<RBTree<K, V>>,
}

impl<K, V> SharedRBTree<K, V> {
    pub fn new() -> Self {
        Self::with_duplicates(DuplicateKeys::Reject)
    }

    pub fn with_duplicates(duplicates: DuplicateKeys) -> Self {
        Self { tree: Mutex::new(RBTree::with_duplicates(duplicates)) }
    }

    pub fn len(&self) -> usize {
        self.read(RBTree::len)
    }

    pub fn is_empty(&self) -> bool {
        self.read(RBTree::is_empty)
    }

    /// Complexity: O(n), see [`RBTree::height`].
    pub fn height(&self) -> usize {
        self.read(RBTree::height)
    }

    /// Runs `f` against the tree while holding the lock.
    pub fn read<F, R>(&self, f: F) -> R where F: FnOnce(&RBTree<K, V>) -> R {
        self.tree.with_lock(|tree| f(tree))
    }

    /// Like [`Self::read`], but gives up with `None` instead of spinning if the
    /// lock is held.
    pub fn try_read<F, R>(&self, f: F) -> Option<R> where F: FnOnce(&RBTree<K, V>) -> R {
        self.tree.try_with_lock(|tree| f(tree))
    }

    /// Runs `f` with mutable access to the tree while holding the lock.
    pub fn write<F, R>(&self, f: F) -> R where F: FnOnce(&mut RBTree<K, V>) -> R {
        self.tree.with_lock(f)
    }

    /// Borrows the tree without locking: `&mut self` already rules out other users.
    pub fn get_mut(&mut self) -> &mut RBTree<K, V> {
        self.tree.get_mut()
    }

    pub fn into_inner(self) -> RBTree<K, V> {
        self.tree.into_inner()
    }
}

impl<K: Ord, V> SharedRBTree<K, V> {
    pub fn insert(&self, key: K, value: V) -> Result<(), TreeError> {
        self.write(|tree| tree.insert(key, value))
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.read(|tree| tree.contains_key(key))
    }
}

impl<K: Clone, V> SharedRBTree<K, V> {
    /// A snapshot of the keys in ascending order.
    pub fn inorder_keys(&self) -> Vec<K> {
        self.read(|tree| tree.inorder_keys().into_iter().cloned().collect())
    }
}

impl<K, V> Default for SharedRBTree<K, V> {
    fn default() -> Self {
        Self { tree: Mutex::default() }
    }
}

impl<K, V> From<RBTree<K, V>> for SharedRBTree<K, V> {
    fn from(tree: RBTree<K, V>) -> Self {
        Self { tree: Mutex::new(tree) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn concurrent_inserts() {
        const T: u32 = 8;
        const R: u32 = 500;

        let shared = SharedRBTree::new();
        thread::scope(|s| {
            for t in 0..T {
                let shared = &shared;
                s.spawn(move || {
                    for i in 0..R {
                        shared.insert(i * T + t, t).unwrap();
                    }
                });
            }
        });

        assert_eq!(shared.len(), (T * R) as usize);
        assert_eq!(shared.inorder_keys(), (0..T * R).collect::<Vec<_>>());

        let tree = shared.into_inner();
        tree.check_invariants().unwrap();
        assert_eq!(tree.get(&(T + 3)), Some(&3));
    }

    #[test]
    fn readers_alongside_writer() {
        let shared = SharedRBTree::new();
        thread::scope(|s| {
            s.spawn(|| {
                for i in 0..1000 {
                    shared.insert(i, ()).unwrap();
                }
            });
            for _ in 0..4 {
                s.spawn(|| {
                    for _ in 0..100 {
                        // every observed state is a completed insert
                        let result = shared.read(|tree| tree.check_invariants());
                        assert!(result.is_ok());
                    }
                });
            }
        });
        assert!(shared.contains_key(&999));
        assert!(shared.height() <= 20);
    }

    #[test]
    fn duplicates_through_the_lock() {
        let shared: SharedRBTree<&str, i32> = RBTree::new().into();
        assert!(shared.is_empty());
        shared.insert("a", 1).unwrap();
        assert_eq!(shared.insert("a", 2), Err(TreeError::DuplicateKey));

        let multi = SharedRBTree::with_duplicates(DuplicateKeys::Allow);
        multi.insert("a", 1).unwrap();
        multi.insert("a", 2).unwrap();
        assert!(!multi.write(|tree| tree.remove("a")));
        assert_eq!(multi.inorder_keys(), ["a", "a"]);
    }

    #[test]
    fn default_rejects_duplicates() {
        let shared = SharedRBTree::<i32, ()>::default();
        assert!(shared.is_empty());
        assert_eq!(shared.read(RBTree::duplicates), DuplicateKeys::Reject);
        shared.insert(1, ()).unwrap();
        assert_eq!(shared.insert(1, ()), Err(TreeError::DuplicateKey));
    }

    #[test]
    fn exclusive_access_skips_the_lock() {
        let mut shared = SharedRBTree::new();
        for k in [3, 1, 2] {
            shared.get_mut().insert(k, k * 10).unwrap();
        }
        assert_eq!(shared.get_mut().get(&2), Some(&20));
        assert_eq!(shared.len(), 3);
        shared.get_mut().check_invariants().unwrap();
    }

    #[test]
    fn try_read_while_writing() {
        let shared = SharedRBTree::new();
        shared.insert(1, ()).unwrap();

        let during = shared.write(|tree| {
            tree.insert(2, ()).unwrap();
            shared.try_read(RBTree::len)
        });
        assert_eq!(during, None);
        assert_eq!(shared.try_read(RBTree::len), Some(2));
    }
}
