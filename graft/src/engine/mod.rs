//! The recursive deep-merge engine.
//!
//! [`deep_merge`] walks matching destination/source pairs, dispatching on the
//! destination's kind. The destination is mutated in place; the source is
//! only ever read. Borrows of either value are kept short and never held
//! across a recursive call, so aliased and cyclic graphs cannot deadlock the
//! underlying cells.

mod maps;
mod visit;

use tracing::debug;
use visit::VisitKey;

pub(crate) use maps::merge_entry;
pub(crate) use visit::VisitedSet;

use crate::classify::is_empty;
use crate::error::{MergeError, MergeResult};
use crate::value::{Kind, Node, Value};

/// Merges `src` into `dst`, filling empty destination data and, in overwrite
/// mode, replacing non-empty data too.
///
/// Step order matters and follows the per-kind policy exactly: aliasing
/// guard, strict type check, cycle guard, empty-source shortcut, empty-
/// destination adoption, then kind dispatch with a wholesale-replace
/// fallback.
pub(crate) fn deep_merge(
    dst: &Node,
    src: &Node,
    visited: &mut VisitedSet,
    overwrite: bool,
) -> MergeResult<()> {
    if Node::ptr_eq(dst, src) {
        // Merging a value into itself cannot contribute anything.
        return Ok(());
    }
    let dst_ty = dst.ty();
    let src_ty = src.ty();
    if dst_ty != src_ty {
        return Err(MergeError::TypeMismatch {
            dst: dst_ty,
            src: src_ty,
        });
    }
    if dst_ty.kind().is_some_and(Kind::is_reference)
        && !visited.enter(VisitKey::new(dst, src, dst_ty))
    {
        // Already merged or in progress; assume convergence.
        tracing::trace!("revisited pair, short-circuiting");
        return Ok(());
    }
    if is_empty(src) {
        return Ok(());
    }
    if is_empty(dst) {
        dst.set_from(src);
        return Ok(());
    }
    match dst.kind() {
        Kind::Record => return merge_records(dst, src, visited, overwrite),
        Kind::Map => return maps::merge_maps(dst, src, visited, overwrite),
        Kind::Optional if !overwrite => return merge_optionals(dst, src, visited, overwrite),
        Kind::Sequence if !overwrite => {
            concat_sequences(dst, src);
            return Ok(());
        }
        Kind::Optional | Kind::Sequence | Kind::Scalar => {}
    }
    if overwrite {
        dst.set_from(src);
    }
    Ok(())
}

/// Recurses into every exported field pair, matched by name. Internal fields
/// are never visited, so the destination's private state survives any merge.
fn merge_records(dst: &Node, src: &Node, visited: &mut VisitedSet, overwrite: bool) -> MergeResult<()> {
    let pairs: Vec<(Node, Node)> = {
        let dst_val = dst.value();
        let src_val = src.value();
        let (Value::Record(d), Value::Record(s)) = (&*dst_val, &*src_val) else {
            return Ok(());
        };
        d.fields()
            .iter()
            .filter(|f| f.is_exported())
            .filter_map(|f| {
                s.field(f.name())
                    .map(|sf| (f.node().clone(), sf.node().clone()))
            })
            .collect()
    };
    for (field_dst, field_src) in pairs {
        deep_merge(&field_dst, &field_src, visited, overwrite)?;
    }
    Ok(())
}

/// Merges the contents the two optionals point to, rather than replacing the
/// reference itself. A type mismatch between the unwrapped targets (possible
/// when the optionals are dynamically-typed boxes) skips the pair.
fn merge_optionals(
    dst: &Node,
    src: &Node,
    visited: &mut VisitedSet,
    overwrite: bool,
) -> MergeResult<()> {
    let targets = {
        let dst_val = dst.value();
        let src_val = src.value();
        match (&*dst_val, &*src_val) {
            (Value::Optional(d), Value::Optional(s)) => match (d.inner(), s.inner()) {
                (Some(di), Some(si)) => Some((di.clone(), si.clone())),
                _ => None,
            },
            _ => None,
        }
    };
    let Some((inner_dst, inner_src)) = targets else {
        return Ok(());
    };
    match deep_merge(&inner_dst, &inner_src, visited, overwrite) {
        Err(MergeError::TypeMismatch { dst: dt, src: st }) => {
            debug!(dst_ty = %dt, src_ty = %st, "skipping boxed pair with mismatched types");
            Ok(())
        }
        other => other,
    }
}

/// Appends the source's elements after the destination's existing ones; no
/// deduplication, no reordering.
fn concat_sequences(dst: &Node, src: &Node) {
    let additions: Vec<Node> = {
        let src_val = src.value();
        match &*src_val {
            Value::Sequence(s) => s.items().iter().map(Node::shallow_copy).collect(),
            _ => Vec::new(),
        }
    };
    if let Value::Sequence(d) = &mut *dst.value_mut() {
        d.extend(additions);
    }
}
