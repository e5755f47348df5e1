use thiserror::Error;

/// Errors surfaced by [`RBTree`](crate::non_concurrent::rbtree::RBTree) operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TreeError {
    /// The operation needs a root, but the tree has no nodes.
    #[error("cannot read the root key of an empty tree")]
    Empty,

    /// The key is already present and the tree rejects duplicates.
    #[error("key is already present in the tree")]
    DuplicateKey,
}

/// A broken red-black or search-tree invariant, reported by
/// [`RBTree::check_invariants`](crate::non_concurrent::rbtree::RBTree::check_invariants).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    #[error("the root is colored red")]
    RedRoot,

    #[error("the root has a parent link")]
    RootHasParent,

    #[error("a child at depth {depth} does not point back at its parent")]
    BrokenParentLink { depth: usize },

    #[error("a red node at depth {depth} has a red child")]
    RedRedEdge { depth: usize },

    #[error(
        "black heights differ below a node at depth {depth} \
         ({left} on the left, {right} on the right)"
    )]
    BlackHeightMismatch { depth: usize, left: usize, right: usize },

    #[error("in-order keys are out of order at position {position}")]
    OutOfOrder { position: usize },

    #[error("tree reports {expected} nodes but {reachable} are reachable from the root")]
    SizeMismatch { expected: usize, reachable: usize },
}

/// Errors from [`logging::init`](crate::logging::init).
#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("could not open the log file")]
    Io(#[from] std::io::Error),

    #[error("a global logger is already installed")]
    SetLogger(#[from] log::SetLoggerError),
}
