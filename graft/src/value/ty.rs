//! Structural type descriptors.
//!
//! Every value reports a [`Type`] describing its declared shape, including
//! values that are currently empty (a nil optional still knows what it would
//! wrap). Record types are nominal: two records are the same type when their
//! names match, which keeps self-referential record types finite.

use std::fmt;
use std::sync::Arc;

/// Kind tag for a structural value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Kind {
    /// Named record with an ordered set of fields.
    Record,
    /// Associative map with a declared key and value type.
    Map,
    /// Ordered sequence of homogeneously-typed elements.
    Sequence,
    /// Zero-or-one reference to an inner value.
    Optional,
    /// Terminal primitive.
    Scalar,
}

impl Kind {
    /// Whether values of this kind can participate in reference cycles.
    ///
    /// Only reference-bearing kinds are tracked by the merge engine's cycle
    /// guard; at least one kind in any possible cycle must be tracked, and
    /// tracking scalars or records would grow the visited set without ever
    /// breaking a cycle.
    #[must_use]
    pub const fn is_reference(self) -> bool {
        matches!(self, Self::Map | Self::Sequence | Self::Optional)
    }
}

/// Kind tag for a terminal scalar.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    /// Boolean.
    Bool,
    /// Signed integer.
    Int,
    /// Unsigned integer.
    Uint,
    /// Floating-point number.
    Float,
    /// Text string.
    Str,
    /// Handle the engine cannot introspect (callables, channels, and the
    /// like). Treated as empty only when nil.
    Opaque,
}

/// Declared type of a structural value.
///
/// Types are compared for the strict shape check the merge engine performs at
/// every level, and hashed as part of the cycle guard's visit keys.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Type {
    /// Nominal record type, identified by name.
    Record(Arc<str>),
    /// Map with declared key and value types.
    Map(Box<Type>, Box<Type>),
    /// Sequence with a declared element type.
    Sequence(Box<Type>),
    /// Optional wrapper around a declared inner type.
    Optional(Box<Type>),
    /// Terminal scalar.
    Scalar(ScalarKind),
    /// Dynamically-typed slot; the runtime value supplies the concrete type.
    Any,
}

impl Type {
    /// Nominal record type.
    #[must_use]
    pub fn record(name: impl Into<Arc<str>>) -> Self {
        Self::Record(name.into())
    }

    /// Map type with the given key and value types.
    #[must_use]
    pub fn map(key: Self, value: Self) -> Self {
        Self::Map(Box::new(key), Box::new(value))
    }

    /// Sequence type with the given element type.
    #[must_use]
    pub fn sequence(elem: Self) -> Self {
        Self::Sequence(Box::new(elem))
    }

    /// Optional type wrapping the given inner type.
    #[must_use]
    pub fn optional(inner: Self) -> Self {
        Self::Optional(Box::new(inner))
    }

    /// String scalar type.
    #[must_use]
    pub const fn string() -> Self {
        Self::Scalar(ScalarKind::Str)
    }

    /// Signed integer scalar type.
    #[must_use]
    pub const fn int() -> Self {
        Self::Scalar(ScalarKind::Int)
    }

    /// The kind of value this type describes, or `None` for [`Type::Any`],
    /// whose kind is only known once a runtime value occupies the slot.
    #[must_use]
    pub const fn kind(&self) -> Option<Kind> {
        match self {
            Self::Record(..) => Some(Kind::Record),
            Self::Map(..) => Some(Kind::Map),
            Self::Sequence(..) => Some(Kind::Sequence),
            Self::Optional(..) => Some(Kind::Optional),
            Self::Scalar(..) => Some(Kind::Scalar),
            Self::Any => None,
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Record(name) => write!(f, "{name}"),
            Self::Map(key, value) => write!(f, "map<{key}, {value}>"),
            Self::Sequence(elem) => write!(f, "[{elem}]"),
            Self::Optional(inner) => write!(f, "?{inner}"),
            Self::Scalar(kind) => {
                let name = match kind {
                    ScalarKind::Bool => "bool",
                    ScalarKind::Int => "int",
                    ScalarKind::Uint => "uint",
                    ScalarKind::Float => "float",
                    ScalarKind::Str => "string",
                    ScalarKind::Opaque => "opaque",
                };
                f.write_str(name)
            }
            Self::Any => f.write_str("any"),
        }
    }
}
