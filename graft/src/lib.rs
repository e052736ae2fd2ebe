//! Deep, structural merging of partially-populated values.
//!
//! `graft` fills gaps in a destination value from a source value of the same
//! shape: nested records, maps, sequences, and optional references are walked
//! recursively, and any field or entry the destination left empty is adopted
//! from the source. An overwrite variant lets non-empty source data win
//! instead. Internal record fields are never touched, aliased and cyclic
//! graphs terminate, and a merge that has passed top-level validation never
//! gives up part-way: a questionable field is skipped, its siblings still
//! merge.
//!
//! # Examples
//!
//! ```rust
//! use graft::{merge, value::{Node, Scalar}};
//!
//! # fn main() -> graft::MergeResult<()> {
//! let dst = Node::record("server")
//!     .field("host", Node::str(""))
//!     .field("port", Node::int(8080))
//!     .build();
//! let src = Node::record("server")
//!     .field("host", Node::str("example.org"))
//!     .field("port", Node::int(9))
//!     .build();
//!
//! merge(&dst, &src)?;
//!
//! // The empty host was filled in; the populated port was left alone.
//! assert_eq!(dst.field("host").and_then(|n| n.scalar()),
//!            Some(Scalar::Str("example.org".into())));
//! assert_eq!(dst.field("port").and_then(|n| n.scalar()),
//!            Some(Scalar::Int(8080)));
//! # Ok(())
//! # }
//! ```

mod bridge;
mod classify;
mod engine;
mod error;
pub mod value;

pub use classify::{is_empty, same_mergeable_shape};
pub use error::{MergeError, MergeResult};

use std::collections::HashSet;

use engine::VisitedSet;
use value::{Kind, Node, Value};

/// Fills any empty attribute of `dst` from the corresponding non-empty
/// attribute of `src`. Both handles must resolve to records or maps of the
/// same declared type; `dst` is mutated in place and `src` is only read.
///
/// # Errors
///
/// Returns [`MergeError::NilArguments`], [`MergeError::NotSupported`], or
/// [`MergeError::DifferentArgumentTypes`] when the top-level preconditions
/// fail; the destination is untouched in that case.
pub fn merge(dst: &Node, src: &Node) -> MergeResult<()> {
    merge_with(dst, src, false)
}

/// Like [`merge`], except non-empty destination attributes are overwritten
/// by non-empty source attributes.
///
/// # Errors
///
/// Same preconditions as [`merge`].
pub fn merge_with_overwrite(dst: &Node, src: &Node) -> MergeResult<()> {
    merge_with(dst, src, true)
}

/// Merges between a map and a record by field-name correspondence: exported
/// field names, lower-cased, are used as map keys. Same-kind argument pairs
/// are redirected to the plain merge.
///
/// # Errors
///
/// Top-level precondition failures as for [`merge`], plus
/// [`MergeError::ExpectedMapAsDestination`] and
/// [`MergeError::ExpectedRecordAsDestination`] when the argument kinds do
/// not line up.
pub fn map_merge(dst: &Node, src: &Node) -> MergeResult<()> {
    map_with(dst, src, false)
}

/// Like [`map_merge`], with source data overwriting non-empty destination
/// data.
///
/// # Errors
///
/// Same preconditions as [`map_merge`].
pub fn map_merge_with_overwrite(dst: &Node, src: &Node) -> MergeResult<()> {
    map_with(dst, src, true)
}

fn merge_with(dst: &Node, src: &Node, overwrite: bool) -> MergeResult<()> {
    let (dst_res, src_res) = resolve_values(dst, src)?;
    if dst_res.ty() != src_res.ty() {
        return Err(MergeError::DifferentArgumentTypes);
    }
    engine::deep_merge(&dst_res, &src_res, &mut VisitedSet::new(), overwrite)
}

fn map_with(dst: &Node, src: &Node, overwrite: bool) -> MergeResult<()> {
    let (dst_res, src_res) = resolve_values(dst, src)?;
    if dst_res.kind() == src_res.kind() {
        if dst_res.ty() != src_res.ty() {
            return Err(MergeError::DifferentArgumentTypes);
        }
        return engine::deep_merge(&dst_res, &src_res, &mut VisitedSet::new(), overwrite);
    }
    match (dst_res.kind(), src_res.kind()) {
        (Kind::Map, Kind::Record) | (Kind::Record, Kind::Map) => {
            bridge::deep_field_map(&dst_res, &src_res, &mut VisitedSet::new(), overwrite)
        }
        (_, Kind::Record) => Err(MergeError::ExpectedMapAsDestination),
        (_, Kind::Map) => Err(MergeError::ExpectedRecordAsDestination),
        _ => Err(MergeError::NotSupported),
    }
}

/// Resolves both handles: top-level optional wrappers are peeled, and the
/// destination must come out a record or a map.
fn resolve_values(dst: &Node, src: &Node) -> MergeResult<(Node, Node)> {
    let dst_res = resolve_handle(dst)?;
    let src_res = resolve_handle(src)?;
    if !matches!(dst_res.kind(), Kind::Record | Kind::Map) {
        return Err(MergeError::NotSupported);
    }
    Ok((dst_res, src_res))
}

fn resolve_handle(node: &Node) -> MergeResult<Node> {
    let mut seen = HashSet::new();
    let mut current = node.clone();
    loop {
        if !seen.insert(current.address()) {
            // A cyclic chain of optionals never reaches a value.
            return Err(MergeError::NilArguments);
        }
        let next = match &*current.value() {
            Value::Optional(o) => match o.inner() {
                Some(target) => target.clone(),
                None => return Err(MergeError::NilArguments),
            },
            _ => return Ok(current.clone()),
        };
        current = next;
    }
}
