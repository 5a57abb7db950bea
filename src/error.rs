use thiserror::Error;

/// Reasons an insert can be rejected. Every variant hands the payload back to
/// the caller: a rejected payload is never retained or destroyed by the tree.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InsertError<T> {
    /// The comparator reported `Same` against a node already in the tree.
    #[error("payload already exists in the tree")]
    DuplicateKey(T),
    /// The traversal stopped at a node whose child slot is already taken.
    /// This means the comparator is not a consistent total order.
    #[error("could not find an empty slot to insert into")]
    NoEmptySlot(T),
    /// The arena could not grow to hold another node.
    #[error("failed to allocate a new node")]
    AllocationFailure(T),
}

impl<T> InsertError<T> {
    /// Gives back the payload that was rejected.
    pub fn into_inner(self) -> T {
        match self {
            Self::DuplicateKey(payload)
            | Self::NoEmptySlot(payload)
            | Self::AllocationFailure(payload) => payload,
        }
    }
}

/// Reasons a remove can fail. A failed remove never changes the tree.
#[derive(Copy, Clone, Debug, Error, PartialEq, Eq)]
pub enum RemoveError {
    /// The tree has no nodes.
    #[error("cannot remove from an empty tree")]
    Empty,
    /// No node compares `Same` to the given payload.
    #[error("payload not found in the tree")]
    NotFound,
    /// The matching node is the root, which can't be removed.
    #[error("cannot remove the root of the tree")]
    RootRemoval,
}
