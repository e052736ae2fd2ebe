//! Terminal scalar values and map keys.

use std::fmt;

use super::ty::{ScalarKind, Type};

/// Identity token for a handle the engine cannot introspect.
///
/// Callables, channels, and other uninspectable handles collapse to an
/// [`OpaqueId`]; two handles are interchangeable exactly when their tokens
/// match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OpaqueId(u64);

impl OpaqueId {
    /// Wraps a raw token.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw token value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Terminal primitive value.
#[derive(Clone, Debug, PartialEq)]
pub enum Scalar {
    /// Boolean.
    Bool(bool),
    /// Signed integer.
    Int(i64),
    /// Unsigned integer.
    Uint(u64),
    /// Floating-point number.
    Float(f64),
    /// Text string.
    Str(String),
    /// Opaque handle; `None` models a nil callable or channel.
    Opaque(Option<OpaqueId>),
}

impl Scalar {
    /// The scalar kind tag.
    #[must_use]
    pub const fn kind(&self) -> ScalarKind {
        match self {
            Self::Bool(..) => ScalarKind::Bool,
            Self::Int(..) => ScalarKind::Int,
            Self::Uint(..) => ScalarKind::Uint,
            Self::Float(..) => ScalarKind::Float,
            Self::Str(..) => ScalarKind::Str,
            Self::Opaque(..) => ScalarKind::Opaque,
        }
    }

    /// Whether this scalar equals the zero value for its kind.
    ///
    /// Opaque handles have no natural zero and are zero only when nil; a
    /// handle that cannot be introspected is therefore never treated as
    /// mergeable-over.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        match self {
            Self::Bool(b) => !b,
            Self::Int(i) => *i == 0,
            Self::Uint(u) => *u == 0,
            Self::Float(x) => *x == 0.0,
            Self::Str(s) => s.is_empty(),
            Self::Opaque(handle) => handle.is_none(),
        }
    }
}

/// Key of a map entry.
///
/// Keys are restricted to scalar types with total ordering so map iteration
/// stays deterministic.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MapKey {
    /// Boolean key.
    Bool(bool),
    /// Signed integer key.
    Int(i64),
    /// Unsigned integer key.
    Uint(u64),
    /// String key.
    Str(String),
}

impl MapKey {
    /// Declared type of this key.
    #[must_use]
    pub const fn ty(&self) -> Type {
        match self {
            Self::Bool(..) => Type::Scalar(ScalarKind::Bool),
            Self::Int(..) => Type::Scalar(ScalarKind::Int),
            Self::Uint(..) => Type::Scalar(ScalarKind::Uint),
            Self::Str(..) => Type::Scalar(ScalarKind::Str),
        }
    }

    /// The string form of this key, if it is a string key.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s.as_str()),
            _ => None,
        }
    }
}

impl From<&str> for MapKey {
    fn from(s: &str) -> Self {
        Self::Str(s.to_owned())
    }
}

impl From<String> for MapKey {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<i64> for MapKey {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<u64> for MapKey {
    fn from(u: u64) -> Self {
        Self::Uint(u)
    }
}

impl From<bool> for MapKey {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl fmt::Display for MapKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Uint(u) => write!(f, "{u}"),
            Self::Str(s) => f.write_str(s),
        }
    }
}
