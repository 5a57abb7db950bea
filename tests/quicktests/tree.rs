use gentree::{NodeRef, RemoveError, Tree};

use std::collections::{BTreeSet, HashSet};

use crate::Op;

/// Applies a set of operations to a tree, keeping track of every key that
/// should be gone (explicitly removed keys and anything a removal cut loose)
/// and of every key that should still be present.
fn do_ops(ops: &[Op<i8>], tree: &mut Tree<i8>, gone: &mut HashSet<i8>) {
    let mut present = BTreeSet::new();
    for op in ops {
        match op {
            Op::Insert(k) => {
                if tree.insert(*k).is_ok() {
                    gone.remove(k);
                    assert!(present.insert(*k));
                }
            }
            Op::Remove(k) => {
                let before: HashSet<i8> = tree.iter().copied().collect();
                if tree.remove(k).is_ok() {
                    let after: HashSet<i8> = tree.iter().copied().collect();
                    gone.extend(before.difference(&after));
                    present.retain(|x| after.contains(x));
                }
            }
            Op::Iter => {
                assert!(tree.iter().eq(present.iter()));
                assert_eq!(tree.iter().count(), tree.len());
            }
        }
    }
}

/// Every child sits on the side the comparator puts it, and points back at
/// its parent.
fn links_hold(node: NodeRef<'_, i8>) -> bool {
    let left_ok = node.left().map_or(true, |left| {
        left.payload() < node.payload()
            && left.parent().map(|p| p.id()) == Some(node.id())
            && links_hold(left)
    });
    let right_ok = node.right().map_or(true, |right| {
        right.payload() > node.payload()
            && right.parent().map(|p| p.id()) == Some(node.id())
            && links_hold(right)
    });
    left_ok && right_ok
}

quickcheck::quickcheck! {
    fn fuzz_multiple_operations_i8(ops: Vec<Op<i8>>) -> bool {
        let mut tree = Tree::new();
        let mut gone = HashSet::new();

        do_ops(&ops, &mut tree, &mut gone);
        gone.iter().all(|k| tree.search(k).is_none())
            && tree.iter().count() == tree.len()
            && tree.root().map_or(true, links_hold)
    }
}

quickcheck::quickcheck! {
    fn contains(xs: Vec<i8>) -> bool {
        let mut tree = Tree::new();
        for x in &xs {
            let _ = tree.insert(*x);
        }

        xs.iter().all(|x| tree.search(x) == Some(x))
    }
}

quickcheck::quickcheck! {
    fn contains_not(xs: Vec<i8>, nots: Vec<i8>) -> bool {
        let mut tree = Tree::new();
        for x in &xs {
            let _ = tree.insert(*x);
        }
        let added: HashSet<_> = xs.into_iter().collect();
        let nots: HashSet<_> = nots.into_iter().collect();
        let mut nots = nots.difference(&added);

        nots.all(|x| tree.search(x).is_none())
    }
}

quickcheck::quickcheck! {
    fn root_never_removed(xs: Vec<i8>) -> bool {
        let mut tree = Tree::new();
        for x in &xs {
            let _ = tree.insert(*x);
        }
        let len = tree.len();

        match xs.first() {
            Some(root) => {
                tree.remove(root) == Err(RemoveError::RootRemoval)
                    && tree.len() == len
                    && xs.iter().all(|x| tree.contains(x))
            }
            None => tree.remove(&0) == Err(RemoveError::Empty),
        }
    }
}

quickcheck::quickcheck! {
    fn leaf_removal_removes_one(xs: Vec<i8>) -> bool {
        let mut tree = Tree::new();
        for x in &xs {
            let _ = tree.insert(*x);
        }
        let leaves: Vec<i8> = {
            let mut leaves = Vec::new();
            let mut stack: Vec<_> = tree.root().into_iter().collect();
            while let Some(node) = stack.pop() {
                match (node.left(), node.right()) {
                    (None, None) if node.parent().is_some() => leaves.push(*node.payload()),
                    (left, right) => stack.extend(left.into_iter().chain(right)),
                }
            }
            leaves
        };

        leaves.iter().all(|leaf| {
            let len = tree.len();
            tree.remove(leaf).is_ok() && tree.len() == len - 1 && !tree.contains(leaf)
        }) && xs
            .iter()
            .filter(|x| !leaves.contains(x))
            .all(|x| tree.contains(x))
    }
}
