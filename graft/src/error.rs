//! Error types produced by merge operations.

use thiserror::Error;

use crate::value::Type;

/// Result alias for merge operations.
pub type MergeResult<T> = Result<T, MergeError>;

/// Errors that can occur while merging two structural values.
///
/// The top-level precondition variants surface from the public entry points
/// before anything is mutated. Once traversal is underway, a type mismatch
/// inside a map entry or a boxed pair is absorbed where it surfaces, while a
/// mismatch between paired record fields propagates as [`TypeMismatch`],
/// matching the strict per-field contract for records.
///
/// [`TypeMismatch`]: MergeError::TypeMismatch
#[derive(Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum MergeError {
    /// A handle resolved to a nil reference at the top level.
    #[error("src and dst must not be nil")]
    NilArguments,

    /// The two handles report different declared types at the top level.
    #[error("src and dst must be of same type")]
    DifferentArgumentTypes,

    /// The destination's top-level kind is neither record nor map.
    #[error("only records and maps are supported")]
    NotSupported,

    /// The bridge needed a map destination for a record source.
    #[error("dst was expected to be a map")]
    ExpectedMapAsDestination,

    /// The bridge needed a record destination for a map source.
    #[error("dst was expected to be a record")]
    ExpectedRecordAsDestination,

    /// Destination and source types diverged below the top level.
    #[error("src and dst must be same type ({src}) != ({dst})")]
    TypeMismatch {
        /// Declared type of the destination value.
        dst: Type,
        /// Declared type of the source value.
        src: Type,
    },
}
