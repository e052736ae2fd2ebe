//! Structural equality over value graphs.
//!
//! Plain `==` on handles would either compare identity or recurse forever on
//! cyclic graphs, so equality carries its own visited-pair set: a pair seen
//! again while a comparison of it is already in progress is assumed equal,
//! the same convergence assumption the merge engine makes.

use std::collections::HashSet;

use super::node::{Node, Value};

impl Node {
    /// Deep structural equality: same declared types and equal contents at
    /// every level. Terminates on cyclic graphs.
    ///
    /// # Panics
    ///
    /// Panics if any value in either graph is currently mutably borrowed.
    #[must_use]
    pub fn structural_eq(&self, other: &Self) -> bool {
        let mut in_progress = HashSet::new();
        eq_nodes(self, other, &mut in_progress)
    }
}

fn eq_nodes(a: &Node, b: &Node, in_progress: &mut HashSet<(usize, usize)>) -> bool {
    if Node::ptr_eq(a, b) {
        return true;
    }
    if a.ty() != b.ty() {
        return false;
    }
    if a.kind().is_reference() && !in_progress.insert((a.address(), b.address())) {
        return true;
    }
    let a_val = a.value();
    let b_val = b.value();
    match (&*a_val, &*b_val) {
        (Value::Record(x), Value::Record(y)) => {
            x.fields().len() == y.fields().len()
                && x.fields().iter().zip(y.fields()).all(|(fa, fb)| {
                    fa.name() == fb.name()
                        && fa.is_exported() == fb.is_exported()
                        && eq_nodes(fa.node(), fb.node(), in_progress)
                })
        }
        (Value::Map(x), Value::Map(y)) => {
            x.len() == y.len()
                && x.entries().all(|(key, va)| {
                    y.get(key).is_some_and(|vb| eq_nodes(va, vb, in_progress))
                })
        }
        (Value::Sequence(x), Value::Sequence(y)) => {
            x.len() == y.len()
                && x.items()
                    .iter()
                    .zip(y.items())
                    .all(|(ia, ib)| eq_nodes(ia, ib, in_progress))
        }
        (Value::Optional(x), Value::Optional(y)) => match (x.inner(), y.inner()) {
            (None, None) => true,
            (Some(ia), Some(ib)) => eq_nodes(ia, ib, in_progress),
            _ => false,
        },
        (Value::Scalar(x), Value::Scalar(y)) => x == y,
        _ => false,
    }
}
