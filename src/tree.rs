//! An unbalanced BST whose nodes live in an arena and link to each other by
//! [`NodeId`]. Parent links are plain ids used only to walk upward, so
//! relinking during removal is a matter of rewriting a few ids.
//!
//! # Examples
//!
//! ```
//! use gentree::{RemoveError, Tree};
//!
//! let mut tree = Tree::new();
//!
//! // Nothing in here yet.
//! assert_eq!(tree.search(&1), None);
//!
//! tree.insert(2).unwrap();
//! tree.insert(1).unwrap();
//! assert_eq!(tree.search(&1), Some(&1));
//!
//! // Keys are unique; the rejected payload is handed back.
//! assert_eq!(tree.insert(1).unwrap_err().into_inner(), 1);
//!
//! // Non-root nodes can be removed. The root can't.
//! assert_eq!(tree.remove(&1), Ok(()));
//! assert_eq!(tree.remove(&2), Err(RemoveError::RootRemoval));
//! assert_eq!(tree.len(), 1);
//! ```

use std::fmt;

use log::{debug, trace, warn};

use crate::error::{InsertError, RemoveError};
use crate::node::{Node, NodeId};
use crate::ops::{Ops, Placement, Printer};
use crate::util::Side;

/// A Binary Search Tree ordered by a caller-supplied comparator. It never
/// rebalances, so operations are `O(depth)` and an adversarial insertion
/// order degrades it to a list.
///
/// Payloads are owned by the tree from a successful [`insert`](Tree::insert)
/// until they are handed to the destructor by [`remove`](Tree::remove),
/// [`destroy`](Tree::destroy), or dropping the tree.
pub struct Tree<T> {
    nodes: Vec<Option<Node<T>>>,
    /// Slots in `nodes` that are empty and can be reused.
    free: Vec<NodeId>,
    root: Option<NodeId>,
    len: usize,
    ops: Ops<T>,
    /// Makes growing the arena fail, to exercise allocation failure.
    #[cfg(test)]
    refuse_growth: bool,
}

impl<T> Default for Tree<T>
where
    T: Ord + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for Tree<T> {
    fn drop(&mut self) {
        if let Some(root) = self.root.take() {
            self.release_subtree(root);
        }
    }
}

impl<T> fmt::Debug for Tree<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tree")
            .field("len", &self.len)
            .field("root", &self.root())
            .finish()
    }
}

impl<T> Tree<T> {
    /// Generates a new, empty `Tree` using `T`'s natural ordering, a printer
    /// that only shows payload addresses, and a destructor that drops.
    pub fn new() -> Self
    where
        T: Ord + 'static,
    {
        Self::with_ops(Ops::default())
    }

    /// Generates a new, empty `Tree` with the given capabilities.
    pub fn with_ops(ops: Ops<T>) -> Self {
        Self {
            nodes: Vec::new(),
            free: Vec::new(),
            root: None,
            len: 0,
            ops,
            #[cfg(test)]
            refuse_growth: false,
        }
    }

    /// The number of nodes reachable from the root.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the tree has no nodes.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Inserts `payload`, taking ownership of it on success. On failure the
    /// tree is unchanged and the payload comes back inside the error.
    ///
    /// # Examples
    ///
    /// ```
    /// use gentree::{InsertError, Tree};
    ///
    /// let mut tree = Tree::new();
    ///
    /// assert_eq!(tree.insert(1), Ok(()));
    /// assert_eq!(tree.insert(1), Err(InsertError::DuplicateKey(1)));
    /// assert_eq!(tree.len(), 1);
    /// ```
    pub fn insert(&mut self, payload: T) -> Result<(), InsertError<T>> {
        let Some(target) = self.lookup(&payload) else {
            let root = self
                .alloc(Node::new(payload))
                .map_err(|node| InsertError::AllocationFailure(node.payload))?;
            self.root = Some(root);
            self.len += 1;
            debug!("inserted {} as the root", self.printed(&self.slot(root).payload));
            return Ok(());
        };

        let Some(side) = self.compare(target, &payload).side() else {
            warn!(
                "{} already exists in the tree, not inserting",
                self.printed(&payload)
            );
            return Err(InsertError::DuplicateKey(payload));
        };
        if self.slot(target).child(side).is_some() {
            warn!(
                "no empty {:?} slot under {} to insert {} into",
                side,
                self.printed(&self.slot(target).payload),
                self.printed(&payload)
            );
            return Err(InsertError::NoEmptySlot(payload));
        }

        let id = self
            .alloc(Node::new(payload))
            .map_err(|node| InsertError::AllocationFailure(node.payload))?;
        self.link(target, side, Some(id));
        self.len += 1;
        debug!(
            "inserted {} as the {:?} child of {}",
            self.printed(&self.slot(id).payload),
            side,
            self.printed(&self.slot(target).payload)
        );
        Ok(())
    }

    /// Finds the stored payload the comparator considers the same as
    /// `payload`. The result is on loan: it stays owned by the tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use gentree::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.insert(1).unwrap();
    ///
    /// assert_eq!(tree.search(&1), Some(&1));
    /// assert_eq!(tree.search(&42), None);
    /// ```
    pub fn search(&self, payload: &T) -> Option<&T> {
        let found = self.lookup(payload)?;
        match self.compare(found, payload) {
            Placement::Same => Some(&self.slot(found).payload),
            Placement::Left | Placement::Right => None,
        }
    }

    /// Whether a payload the same as `payload` is stored in the tree.
    pub fn contains(&self, payload: &T) -> bool {
        self.search(payload).is_some()
    }

    /// Removes the node matching `payload` and hands its payload to the
    /// destructor.
    ///
    /// A node with at most one child is spliced out. A node with two children
    /// is replaced by the child on the side away from its parent (its right
    /// child if it is a left child, and vice versa), which then adopts the
    /// other child. Whatever that replacement already had on the adopting
    /// side is cut loose and destroyed along with the removed node, so
    /// removing an internal node can drop more than one payload.
    ///
    /// The root can't be removed.
    ///
    /// # Examples
    ///
    /// ```
    /// use gentree::{RemoveError, Tree};
    ///
    /// let mut tree = Tree::new();
    /// for x in [13, 5, 19, 2, 9, 7] {
    ///     tree.insert(x).unwrap();
    /// }
    ///
    /// // 9 takes 5's place and adopts 2, so 9's old left subtree (7) goes too.
    /// assert_eq!(tree.remove(&5), Ok(()));
    /// assert_eq!(tree.len(), 4);
    /// assert!(!tree.contains(&7));
    ///
    /// assert_eq!(tree.remove(&5), Err(RemoveError::NotFound));
    /// assert_eq!(tree.remove(&13), Err(RemoveError::RootRemoval));
    /// ```
    pub fn remove(&mut self, payload: &T) -> Result<(), RemoveError> {
        let target = self.lookup(payload).ok_or(RemoveError::Empty)?;
        if self.compare(target, payload) != Placement::Same {
            return Err(RemoveError::NotFound);
        }
        let Some(parent) = self.slot(target).parent else {
            warn!(
                "cannot remove {}: it is the root of the tree",
                self.printed(&self.slot(target).payload)
            );
            return Err(RemoveError::RootRemoval);
        };
        let side = self.side_of(parent, target);

        let (left, right) = {
            let node = self.slot(target);
            (node.left, node.right)
        };
        match (left, right) {
            (Some(left), Some(right)) => {
                let (heir, adoptee) = match side {
                    Side::Left => (right, left),
                    Side::Right => (left, right),
                };
                self.link(parent, side, Some(heir));
                let orphan = self.slot(heir).child(side);
                self.link(heir, side, Some(adoptee));
                if let Some(orphan) = orphan {
                    let discarded = self.release_subtree(orphan);
                    warn!(
                        "removal discarded {} node(s) from the {:?} side of {}",
                        discarded,
                        side,
                        self.printed(&self.slot(heir).payload)
                    );
                }
            }
            (only, None) | (None, only) => self.link(parent, side, only),
        }

        let removed = self.release(target);
        self.len -= 1;
        debug!("removed {}", self.printed(&removed));
        (self.ops.destructor)(removed);
        Ok(())
    }

    /// Tears the tree down, handing every payload to the destructor, children
    /// before their parents. Dropping the tree does the same.
    pub fn destroy(self) {
        drop(self)
    }

    /// A read-only view of the root node, if there is one.
    pub fn root(&self) -> Option<NodeRef<'_, T>> {
        self.root.map(|id| NodeRef { tree: self, id })
    }

    /// A read-only view of the node with the given id, if it is still in the
    /// tree.
    pub fn get(&self, id: NodeId) -> Option<NodeRef<'_, T>> {
        self.nodes.get(id.index())?.as_ref()?;
        Some(NodeRef { tree: self, id })
    }

    /// Iterates over the payloads in comparator order.
    ///
    /// # Examples
    ///
    /// ```
    /// use gentree::Tree;
    ///
    /// let mut tree = Tree::new();
    /// for x in [2, 3, 1] {
    ///     tree.insert(x).unwrap();
    /// }
    ///
    /// assert_eq!(tree.iter().copied().collect::<Vec<_>>(), vec![1, 2, 3]);
    /// ```
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self)
    }

    /// Renders the tree pre-order, one payload per line, each indented by a
    /// tab per level of depth.
    ///
    /// # Examples
    ///
    /// ```
    /// use gentree::{Ops, Tree};
    ///
    /// let mut tree = Tree::with_ops(Ops::default().printer(|x: &i32, f| write!(f, "{}", x)));
    /// for x in [2, 1, 3] {
    ///     tree.insert(x).unwrap();
    /// }
    ///
    /// assert_eq!(tree.pretty().to_string(), "2\n\t1\n\t3\n");
    /// ```
    pub fn pretty(&self) -> Pretty<'_, T> {
        Pretty { tree: self }
    }

    /// Writes [`pretty`](Tree::pretty) to stdout.
    pub fn print(&self) {
        print!("{}", self.pretty());
    }

    /// Walks down from the root towards `payload`. Returns the matching node
    /// or, failing that, the node a new child for `payload` would hang from.
    /// Only `None` when the tree is empty.
    fn lookup(&self, payload: &T) -> Option<NodeId> {
        let mut current = self.root?;
        while let Some(side) = self.compare(current, payload).side() {
            match self.slot(current).child(side) {
                Some(child) => current = child,
                None => break,
            }
        }
        trace!("lookup stopped at {}", self.printed(&self.slot(current).payload));
        Some(current)
    }

    fn compare(&self, existing: NodeId, candidate: &T) -> Placement {
        (self.ops.comparator)(&self.slot(existing).payload, candidate)
    }

    fn side_of(&self, parent: NodeId, child: NodeId) -> Side {
        if self.slot(parent).left == Some(child) {
            Side::Left
        } else {
            Side::Right
        }
    }

    /// Points `parent`'s `side` slot at `child` and `child` back at `parent`.
    fn link(&mut self, parent: NodeId, side: Side, child: Option<NodeId>) {
        *self.slot_mut(parent).child_mut(side) = child;
        if let Some(child) = child {
            self.slot_mut(child).parent = Some(parent);
        }
    }

    fn slot(&self, id: NodeId) -> &Node<T> {
        self.nodes[id.index()]
            .as_ref()
            .expect("Linked ids point at live slots")
    }

    fn slot_mut(&mut self, id: NodeId) -> &mut Node<T> {
        self.nodes[id.index()]
            .as_mut()
            .expect("Linked ids point at live slots")
    }

    /// Stores `node` in a free slot, handing it back if the arena can't grow.
    fn alloc(&mut self, node: Node<T>) -> Result<NodeId, Node<T>> {
        if let Some(id) = self.free.pop() {
            self.nodes[id.index()] = Some(node);
            return Ok(id);
        }

        #[cfg(test)]
        {
            if self.refuse_growth {
                return Err(node);
            }
        }
        // `free` keeps room for every slot so that releasing never allocates.
        let slots = self.nodes.len() + 1;
        if self.nodes.try_reserve(1).is_err()
            || self.free.try_reserve(slots - self.free.len()).is_err()
        {
            return Err(node);
        }
        self.nodes.push(Some(node));
        Ok(NodeId(self.nodes.len() - 1))
    }

    /// Empties the slot for `id` and returns its payload. The caller is
    /// responsible for unlinking it.
    fn release(&mut self, id: NodeId) -> T {
        let node = self.nodes[id.index()]
            .take()
            .expect("Releasing a node implies it is live");
        self.free.push(id);
        node.payload
    }

    /// Destroys `top` and everything below it, children before parents, and
    /// returns how many nodes went. `top` must already be unreachable from
    /// the root. Walks back up through parent links instead of keeping a
    /// stack, so degenerate trees are fine.
    fn release_subtree(&mut self, top: NodeId) -> usize {
        let mut released = 0;
        let mut current = top;
        loop {
            let node = self.slot(current);
            if let Some(child) = node.left.or(node.right) {
                current = child;
                continue;
            }

            let parent = node.parent;
            let payload = self.release(current);
            (self.ops.destructor)(payload);
            self.len -= 1;
            released += 1;

            if current == top {
                return released;
            }
            let parent = parent.expect("Only the top of a subtree can be parentless");
            let parent_node = self.slot_mut(parent);
            if parent_node.left == Some(current) {
                parent_node.left = None;
            } else {
                parent_node.right = None;
            }
            current = parent;
        }
    }

    fn printed<'a>(&'a self, payload: &'a T) -> Printed<'a, T> {
        Printed {
            printer: &self.ops.printer,
            payload,
        }
    }
}

impl<'a, T> IntoIterator for &'a Tree<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// A read-only view of one node, for walking the tree's shape.
pub struct NodeRef<'a, T> {
    tree: &'a Tree<T>,
    id: NodeId,
}

impl<T> Clone for NodeRef<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<T> Copy for NodeRef<'_, T> {}

impl<T> fmt::Debug for NodeRef<'_, T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("payload", self.payload())
            .field("left", &self.left())
            .field("right", &self.right())
            .finish()
    }
}

impl<'a, T> NodeRef<'a, T> {
    /// The id of this node in its tree.
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// The payload stored in this node.
    pub fn payload(&self) -> &'a T {
        &self.tree.slot(self.id).payload
    }

    /// The node this one hangs from. `None` for the root.
    pub fn parent(&self) -> Option<Self> {
        self.at(self.tree.slot(self.id).parent)
    }

    /// The root of this node's left subtree.
    pub fn left(&self) -> Option<Self> {
        self.at(self.tree.slot(self.id).left)
    }

    /// The root of this node's right subtree.
    pub fn right(&self) -> Option<Self> {
        self.at(self.tree.slot(self.id).right)
    }

    fn at(&self, id: Option<NodeId>) -> Option<Self> {
        id.map(|id| NodeRef {
            tree: self.tree,
            id,
        })
    }
}

/// In-order iterator over a [`Tree`]'s payloads, created by [`Tree::iter`].
pub struct Iter<'a, T> {
    tree: &'a Tree<T>,
    stack: Vec<NodeId>,
}

impl<'a, T> Iter<'a, T> {
    fn new(tree: &'a Tree<T>) -> Self {
        let mut iter = Self {
            tree,
            stack: Vec::new(),
        };
        iter.push_left_spine(tree.root);
        iter
    }

    fn push_left_spine(&mut self, mut next: Option<NodeId>) {
        while let Some(id) = next {
            self.stack.push(id);
            next = self.tree.slot(id).left;
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let tree = self.tree;
        let node = tree.slot(self.stack.pop()?);
        self.push_left_spine(node.right);
        Some(&node.payload)
    }
}

/// Pre-order, tab-indented rendering of a [`Tree`], created by
/// [`Tree::pretty`].
pub struct Pretty<'a, T> {
    tree: &'a Tree<T>,
}

impl<T> fmt::Display for Pretty<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut stack: Vec<(NodeId, usize)> =
            self.tree.root.map(|id| (id, 0)).into_iter().collect();
        while let Some((id, depth)) = stack.pop() {
            let node = self.tree.slot(id);
            for _ in 0..depth {
                f.write_str("\t")?;
            }
            (self.tree.ops.printer)(&node.payload, f)?;
            f.write_str("\n")?;

            // Right goes on first so the left subtree comes out first.
            stack.extend(node.right.map(|id| (id, depth + 1)));
            stack.extend(node.left.map(|id| (id, depth + 1)));
        }
        Ok(())
    }
}

/// Shows a single payload through the tree's printer.
struct Printed<'a, T> {
    printer: &'a Printer<T>,
    payload: &'a T,
}

impl<T> fmt::Display for Printed<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        (self.printer)(self.payload, f)
    }
}
