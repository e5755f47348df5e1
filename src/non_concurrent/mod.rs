//! Single-threaded data structures. Wrap them in a lock (see
//! [`concurrent_rbtree`](crate::concurrent_rbtree)) to share them across threads.

pub mod rbtree;

pub use rbtree::{Color, DuplicateKeys, NodeRef, RBTree};
