//! Name-based bridging between maps and records.
//!
//! The bridge copies a dynamically-keyed map into a fixed-shape record (or
//! vice versa) by pairing each exported field with the map key spelling its
//! name, then hands the paired values to the regular merge machinery. It
//! performs only the correspondence; every per-kind decision is the
//! engine's.

use tracing::debug;
use uncased::UncasedStr;

use crate::classify::{is_empty, same_mergeable_shape};
use crate::engine::{VisitedSet, deep_merge, merge_entry};
use crate::error::{MergeError, MergeResult};
use crate::value::{Kind, MapKey, Node, Value};

pub(crate) fn deep_field_map(
    dst: &Node,
    src: &Node,
    visited: &mut VisitedSet,
    overwrite: bool,
) -> MergeResult<()> {
    match (dst.kind(), src.kind()) {
        (Kind::Map, Kind::Record) => record_into_map(dst, src, visited, overwrite),
        (Kind::Record, Kind::Map) => map_into_record(dst, src, visited, overwrite),
        _ => Ok(()),
    }
}

/// Pairs each exported source field with the entry under its lower-cased
/// name and applies the engine's per-key map policy: absent or empty entries
/// (or overwrite mode) take the field wholesale, populated entries are
/// merged in place.
fn record_into_map(
    dst: &Node,
    src: &Node,
    visited: &mut VisitedSet,
    overwrite: bool,
) -> MergeResult<()> {
    let fields: Vec<(MapKey, Node)> = {
        let src_val = src.value();
        let Value::Record(r) = &*src_val else {
            return Ok(());
        };
        r.fields()
            .iter()
            .filter(|f| f.is_exported())
            .map(|f| (MapKey::Str(f.name().to_ascii_lowercase()), f.node().clone()))
            .collect()
    };
    let value_ty = {
        let dst_val = dst.value();
        let Value::Map(m) = &*dst_val else {
            return Ok(());
        };
        m.value_ty().clone()
    };
    for (key, field) in fields {
        match dst.entry(&key) {
            Some(existing) if !is_empty(&existing) && !overwrite => {
                merge_entry(dst, key, &existing, &field, visited, overwrite);
            }
            _ => {
                let entry = Node::boxed_for(&value_ty, field.shallow_copy());
                if let Value::Map(m) = &mut *dst.value_mut() {
                    m.insert(key, entry);
                }
            }
        }
    }
    Ok(())
}

/// Fills each exported destination field from the entry matching its name
/// case-insensitively. Boxed entries are unwrapped, an optional source is
/// peeled once when the field itself is not optional, and a map entry aimed
/// at a record field goes back through the bridge. Shape-incompatible
/// entries and keys without a matching field are skipped.
fn map_into_record(
    dst: &Node,
    src: &Node,
    visited: &mut VisitedSet,
    overwrite: bool,
) -> MergeResult<()> {
    let fields: Vec<(String, Node)> = {
        let dst_val = dst.value();
        let Value::Record(r) = &*dst_val else {
            return Ok(());
        };
        r.fields()
            .iter()
            .filter(|f| f.is_exported())
            .map(|f| (f.name().to_owned(), f.node().clone()))
            .collect()
    };
    for (name, field) in fields {
        let Some(entry) = lookup_entry(src, &name) else {
            continue;
        };
        let mut source = entry.unboxed();
        if source.kind() == Kind::Optional && field.kind() != Kind::Optional {
            match source.inner() {
                Some(target) => source = target,
                None => continue,
            }
        }
        if source.kind() == Kind::Map && field.kind() == Kind::Record {
            deep_field_map(&field, &source, visited, overwrite)?;
            continue;
        }
        if !same_mergeable_shape(&field.ty(), &source.ty()) {
            debug!(field = %name, "skipping entry with incompatible shape");
            continue;
        }
        match deep_merge(&field, &source, visited, overwrite) {
            Err(MergeError::TypeMismatch { dst: dt, src: st }) => {
                debug!(field = %name, dst_ty = %dt, src_ty = %st, "skipping mismatched entry");
            }
            other => other?,
        }
    }
    Ok(())
}

/// Finds the map entry whose string key matches `name` case-insensitively.
fn lookup_entry(src: &Node, name: &str) -> Option<Node> {
    let src_val = src.value();
    let map = src_val.as_map()?;
    map.entries()
        .find(|(key, _)| {
            key.as_str()
                .is_some_and(|s| UncasedStr::new(s) == UncasedStr::new(name))
        })
        .map(|(_, node)| node.clone())
}
