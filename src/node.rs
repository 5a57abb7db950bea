//! The arena-resident node type. Nodes carry no behavior of their own; the
//! [`Tree`](crate::Tree) owning the arena does all linking and unlinking.

use crate::util::Side;

/// Stable index of a node inside its tree's arena.
///
/// An id is only meaningful for the tree that handed it out and only while
/// the node it names is still in that tree. Slots of removed nodes are
/// recycled by later inserts.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub(crate) fn index(self) -> usize {
        self.0
    }
}

/// A single payload plus its links. `parent` is a back-reference used only
/// for upward navigation; `left` and `right` are the owning edges.
#[derive(Debug)]
pub(crate) struct Node<T> {
    pub(crate) payload: T,
    pub(crate) parent: Option<NodeId>,
    pub(crate) left: Option<NodeId>,
    pub(crate) right: Option<NodeId>,
}

impl<T> Node<T> {
    pub(crate) fn new(payload: T) -> Self {
        Self {
            payload,
            parent: None,
            left: None,
            right: None,
        }
    }

    pub(crate) fn child(&self, side: Side) -> Option<NodeId> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    pub(crate) fn child_mut(&mut self, side: Side) -> &mut Option<NodeId> {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }
}
