/// Which child slot of a parent a node hangs from.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Side {
    /// The node is (or would be) its parent's left child.
    Left,
    /// The node is (or would be) its parent's right child.
    Right,
}
