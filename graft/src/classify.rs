//! Value classification: emptiness and shape compatibility.

use crate::value::{Kind, Node, Type, Value};

/// Returns whether `v` equals the zero value for its declared type: empty
/// string, zero number, `false`, nil optional, zero-length map or sequence,
/// nil opaque handle.
///
/// Records are never empty; their fields are judged individually during
/// traversal. Opaque handles without a nil state are treated as non-empty,
/// so classification never fails on a value it cannot introspect.
///
/// # Examples
///
/// ```rust
/// use graft::{is_empty, value::Node};
///
/// assert!(is_empty(&Node::str("")));
/// assert!(!is_empty(&Node::int(42)));
/// ```
///
/// # Panics
///
/// Panics if the value is currently mutably borrowed.
#[must_use]
pub fn is_empty(v: &Node) -> bool {
    match &*v.value() {
        Value::Record(..) => false,
        Value::Map(m) => m.is_empty(),
        Value::Sequence(s) => s.is_empty(),
        Value::Optional(o) => o.inner().is_none(),
        Value::Scalar(s) => s.is_zero(),
    }
}

/// Returns whether two declared types are shape-compatible for merging.
///
/// Strictly identical types always are. As a legacy concession, two maps or
/// two sequences of differing element types also count; only the map/record
/// bridge uses this loose mode — the engine proper demands strict equality at
/// every level.
#[must_use]
pub fn same_mergeable_shape(a: &Type, b: &Type) -> bool {
    if a == b {
        return true;
    }
    matches!(
        (a.kind(), b.kind()),
        (Some(Kind::Map), Some(Kind::Map)) | (Some(Kind::Sequence), Some(Kind::Sequence))
    )
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{is_empty, same_mergeable_shape};
    use crate::value::{Node, OpaqueId, Type};

    #[rstest]
    #[case::empty_string(Node::str(""), true)]
    #[case::nonempty_string(Node::str("x"), false)]
    #[case::zero_int(Node::int(0), true)]
    #[case::nonzero_int(Node::int(7), false)]
    #[case::zero_uint(Node::uint(0), true)]
    #[case::zero_float(Node::float(0.0), true)]
    #[case::false_bool(Node::bool(false), true)]
    #[case::true_bool(Node::bool(true), false)]
    #[case::nil_opaque(Node::opaque(None), true)]
    #[case::live_opaque(Node::opaque(Some(OpaqueId::new(1))), false)]
    #[case::nil_optional(Node::none(Type::int()), true)]
    #[case::populated_optional(Node::some(Type::int(), Node::int(0)), false)]
    #[case::empty_sequence(Node::sequence(Type::int(), []), true)]
    #[case::nonempty_sequence(Node::sequence(Type::int(), [Node::int(1)]), false)]
    #[case::empty_map(Node::map(Type::string(), Type::Any), true)]
    fn emptiness_follows_the_zero_value(#[case] node: Node, #[case] expected: bool) {
        assert_eq!(is_empty(&node), expected);
    }

    #[test]
    fn records_are_never_empty() {
        let all_zero = Node::record("simple").field("value", Node::int(0)).build();
        assert!(!is_empty(&all_zero));
    }

    #[rstest]
    #[case::identical(Type::int(), Type::int(), true)]
    #[case::differing_scalars(Type::int(), Type::string(), false)]
    #[case::maps_of_differing_values(
        Type::map(Type::string(), Type::int()),
        Type::map(Type::string(), Type::Any),
        true
    )]
    #[case::sequences_of_differing_elems(
        Type::sequence(Type::int()),
        Type::sequence(Type::string()),
        true
    )]
    #[case::map_against_sequence(
        Type::map(Type::string(), Type::int()),
        Type::sequence(Type::int()),
        false
    )]
    #[case::record_against_map(
        Type::record("simple"),
        Type::map(Type::string(), Type::Any),
        false
    )]
    fn shape_compatibility(#[case] a: Type, #[case] b: Type, #[case] expected: bool) {
        assert_eq!(same_mergeable_shape(&a, &b), expected);
    }
}
