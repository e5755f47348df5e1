#![deny(unsafe_op_in_unsafe_fn)]

// not concurrent
pub mod non_concurrent;

// concurrency primitives
pub mod spinlock_mutex;

// concurrent data structures
pub mod concurrent_rbtree;

pub mod error;
pub mod logging;

pub use concurrent_rbtree::SharedRBTree;
pub use error::{InvariantViolation, LoggingError, TreeError};
pub use non_concurrent::rbtree::{Color, DuplicateKeys, Iter, NodeRef, RBTree};
