//! The capabilities a [`Tree`](crate::Tree) is created with: how payloads are
//! ordered, printed, and destroyed.

use std::cmp::Ordering;
use std::fmt;

use crate::util::Side;

/// Where a candidate payload belongs relative to a payload already in the
/// tree. This is the outcome of every comparator call.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Placement {
    /// The candidate sorts before the existing payload and belongs in its
    /// left subtree.
    Left,
    /// The candidate sorts after the existing payload and belongs in its
    /// right subtree.
    Right,
    /// The candidate has the same key as the existing payload.
    Same,
}

impl Placement {
    /// The child slot a candidate descends into, or `None` on a match.
    pub(crate) fn side(self) -> Option<Side> {
        match self {
            Placement::Left => Some(Side::Left),
            Placement::Right => Some(Side::Right),
            Placement::Same => None,
        }
    }
}

/// Adapts the result of `candidate.cmp(existing)`.
impl From<Ordering> for Placement {
    fn from(ordering: Ordering) -> Self {
        match ordering {
            Ordering::Less => Placement::Left,
            Ordering::Equal => Placement::Same,
            Ordering::Greater => Placement::Right,
        }
    }
}

/// Compares `(existing, candidate)`. Must be a consistent total order or the
/// tree's invariants silently break.
pub type Comparator<T> = Box<dyn Fn(&T, &T) -> Placement>;

/// Writes a single payload. The tree takes care of indentation and newlines.
pub type Printer<T> = Box<dyn Fn(&T, &mut fmt::Formatter<'_>) -> fmt::Result>;

/// Releases a payload when its node is removed or the tree is torn down.
pub type Destructor<T> = Box<dyn FnMut(T)>;

/// The comparator, printer, and destructor a tree uses for its payloads.
///
/// # Examples
///
/// ```
/// use gentree::{Ops, Placement, Tree};
///
/// // Order strings by length only.
/// let ops = Ops::new(|existing: &String, candidate: &String| {
///     Placement::from(candidate.len().cmp(&existing.len()))
/// })
/// .printer(|s, f| write!(f, "{:?}", s));
///
/// let mut tree = Tree::with_ops(ops);
/// tree.insert("ccc".to_string()).unwrap();
/// tree.insert("a".to_string()).unwrap();
///
/// // Same length as "a", so it's a duplicate.
/// assert!(tree.insert("b".to_string()).is_err());
/// assert_eq!(tree.pretty().to_string(), "\"ccc\"\n\t\"a\"\n");
/// ```
pub struct Ops<T> {
    pub(crate) comparator: Comparator<T>,
    pub(crate) printer: Printer<T>,
    pub(crate) destructor: Destructor<T>,
}

impl<T> Ops<T>
where
    T: 'static,
{
    /// Uses the given comparator with the default printer (payload address
    /// only) and destructor (drop).
    pub fn new(comparator: impl Fn(&T, &T) -> Placement + 'static) -> Self {
        Self {
            comparator: Box::new(comparator),
            printer: Box::new(print_address::<T>),
            destructor: Box::new(drop::<T>),
        }
    }

    /// Replaces the printer.
    pub fn printer(
        self,
        printer: impl Fn(&T, &mut fmt::Formatter<'_>) -> fmt::Result + 'static,
    ) -> Self {
        Self {
            printer: Box::new(printer),
            ..self
        }
    }

    /// Replaces the destructor.
    pub fn destructor(self, destructor: impl FnMut(T) + 'static) -> Self {
        Self {
            destructor: Box::new(destructor),
            ..self
        }
    }
}

/// Natural ordering of `T`, so signed integers sort numerically.
impl<T> Default for Ops<T>
where
    T: Ord + 'static,
{
    fn default() -> Self {
        Self::new(natural_order::<T>)
    }
}

impl<T> fmt::Debug for Ops<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ops").finish_non_exhaustive()
    }
}

fn natural_order<T: Ord>(existing: &T, candidate: &T) -> Placement {
    candidate.cmp(existing).into()
}

fn print_address<T>(payload: &T, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{:p}", payload)
}
