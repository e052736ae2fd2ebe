//! The structural value model the merge engine operates on.
//!
//! Rust has no ambient reflection, so the engine works against an explicit
//! model: a [`Value`] is a tagged union over the five structural kinds
//! (record, map, sequence, optional, scalar), and a [`Node`] is a shared
//! handle giving each value a stable identity and in-place mutability.

mod build;
mod eq;
mod node;
mod scalar;
mod ty;

pub use build::RecordBuilder;
pub use node::{Field, MapValue, Node, OptionalValue, Record, Sequence, Value};
pub use scalar::{MapKey, OpaqueId, Scalar};
pub use ty::{Kind, ScalarKind, Type};
