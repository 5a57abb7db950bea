//! This crate exposes a generic, unbalanced Binary Search Tree (BST) whose
//! ordering, printing, and payload disposal are supplied by the caller.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to
//! insert, find, and delete stored records. Each node holds one payload and
//! up to two children. There is no built-in notion of "smaller": the tree
//! asks its comparator where a candidate payload goes relative to a payload
//! already stored, and keeps these invariants:
//!
//! 1. For every node, the comparator places every payload in its left
//!    subtree at [`Placement::Left`] of the node's own payload.
//! 2. For every node, the comparator places every payload in its right
//!    subtree at [`Placement::Right`] of the node's own payload.
//! 3. No two nodes compare [`Placement::Same`].
//!
//! Searching takes `O(height)`. This tree makes no attempt to limit its
//! height: inserting in sorted order produces a list.
//!
//! ## Comparators
//!
//! "Less" and "greater" are whatever the comparator says. A comparator is
//! handed `(existing, candidate)` and answers with a [`Placement`]: the
//! candidate goes [`Left`](Placement::Left) or [`Right`](Placement::Right) of
//! the existing payload, or is the [`Same`](Placement::Same) key. Keys are
//! unique, so inserting a `Same` payload fails. The comparator has to be a
//! consistent total order; if it isn't, the tree's invariants quietly break.
//!
//! ## Removal
//!
//! Removal has two known limitations:
//!
//! 1. The root can't be removed ([`RemoveError::RootRemoval`]).
//! 2. Removing a node with two children promotes one child and hangs the
//!    other one off it, discarding the promoted child's own subtree on that
//!    side. See [`Tree::remove`].

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

mod error;
mod node;
mod ops;
mod tree;
mod util;


pub use error::{InsertError, RemoveError};
pub use node::NodeId;
pub use ops::{Comparator, Destructor, Ops, Placement, Printer};
pub use tree::{Iter, NodeRef, Pretty, Tree};
