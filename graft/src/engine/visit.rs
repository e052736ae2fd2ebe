//! Cycle bookkeeping for in-progress merges.
//!
//! The engine must keep track of every (destination, source) pair it has
//! entered; the algorithm assumes that a merge already in progress is
//! complete when it re-encounters the same pair, which is what lets cyclic
//! graphs terminate. Pairs are not canonicalized — merging is directional, so
//! (a, b) and (b, a) are distinct merges.

use std::collections::HashSet;

use crate::value::{Node, Type};

/// Identity triple for one (destination, source) pair under merge.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub(crate) struct VisitKey {
    dst: usize,
    src: usize,
    ty: Type,
}

impl VisitKey {
    /// Keys the pair by node identity and its shared declared type.
    pub(crate) fn new(dst: &Node, src: &Node, ty: Type) -> Self {
        Self {
            dst: dst.address(),
            src: src.address(),
            ty,
        }
    }
}

/// Pairs already entered during the current top-level merge call.
///
/// Created fresh per call and discarded when it returns; never shared.
#[derive(Debug, Default)]
pub(crate) struct VisitedSet(HashSet<VisitKey>);

impl VisitedSet {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Records the pair, returning `false` if it had already been entered.
    pub(crate) fn enter(&mut self, key: VisitKey) -> bool {
        self.0.insert(key)
    }
}
