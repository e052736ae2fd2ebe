//! Per-key merge policy for maps.
//!
//! Keys are processed independently: a failure merging one entry keeps that
//! entry as it was and never aborts the rest of the map. New keys from the
//! source are always added; existing keys are replaced outright when the
//! destination entry is empty (or overwrite mode is on) and merged into a
//! fresh copy otherwise.

use tracing::debug;

use super::{VisitedSet, concat_sequences, deep_merge};
use crate::classify::is_empty;
use crate::error::MergeResult;
use crate::value::{Kind, MapKey, Node, Value};

pub(super) fn merge_maps(
    dst: &Node,
    src: &Node,
    visited: &mut VisitedSet,
    overwrite: bool,
) -> MergeResult<()> {
    let src_entries: Vec<(MapKey, Node)> = {
        let src_val = src.value();
        let Value::Map(m) = &*src_val else {
            return Ok(());
        };
        m.entries()
            .map(|(key, node)| (key.clone(), node.clone()))
            .collect()
    };
    for (key, src_entry) in src_entries {
        let existing = dst.entry(&key);
        match existing {
            Some(dst_entry) if !is_empty(&dst_entry) && !overwrite => {
                merge_entry(dst, key, &dst_entry, &src_entry, visited, overwrite);
            }
            _ => insert(dst, key, src_entry.shallow_copy()),
        }
    }
    Ok(())
}

fn insert(dst: &Node, key: MapKey, node: Node) {
    if let Value::Map(m) = &mut *dst.value_mut() {
        m.insert(key, node);
    }
}

/// Nested merge for a key present and non-empty on both sides.
///
/// Boxed entries are unwrapped first. Two sequences of the same element type
/// concatenate destination-then-source; records, optionals, and maps merge
/// into a fresh copy of the destination entry which replaces the original
/// only if the nested merge succeeds. Any other pairing keeps the
/// destination entry.
///
/// Also the per-key policy behind the record-to-map bridge, which pairs an
/// exported field with the entry spelling its name.
pub(crate) fn merge_entry(
    dst: &Node,
    key: MapKey,
    dst_entry: &Node,
    src_entry: &Node,
    visited: &mut VisitedSet,
    overwrite: bool,
) {
    let was_boxed = dst_entry.is_boxed();
    let entry_dst = dst_entry.unboxed();
    let entry_src = src_entry.unboxed();
    match (entry_dst.kind(), entry_src.kind()) {
        // Differing element types fall through and keep the destination;
        // concatenating them would corrupt the sequence's declared type.
        (Kind::Sequence, Kind::Sequence) if entry_dst.ty() == entry_src.ty() => {
            let merged = entry_dst.shallow_copy();
            concat_sequences(&merged, &entry_src);
            insert(dst, key, rebox(was_boxed, merged));
        }
        (
            Kind::Record | Kind::Optional | Kind::Map,
            Kind::Record | Kind::Optional | Kind::Map,
        ) => {
            let merged = entry_dst.shallow_copy();
            match deep_merge(&merged, &entry_src, visited, overwrite) {
                Ok(()) => insert(dst, key, rebox(was_boxed, merged)),
                Err(err) => {
                    debug!(key = %key, error = %err, "keeping existing entry");
                }
            }
        }
        // Mismatched shapes (a sequence against a scalar, say) keep the
        // destination entry; one bad key must not abort its siblings.
        _ => {}
    }
}

fn rebox(was_boxed: bool, node: Node) -> Node {
    if was_boxed { Node::boxed(node) } else { node }
}
