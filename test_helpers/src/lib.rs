//! Fixture builders shared across graft's test suites.
//!
//! The merge tests keep re-using a handful of shapes: a one-field record, a
//! record with an internal field, a self-referential linked node, and
//! dynamically-typed maps. Building them by hand in every test obscures what
//! the test is about, so the constructors live here.

use graft::value::{MapKey, Node, OptionalValue, Type, Value};

/// Builds `simple { value: int }` with the given value.
#[must_use]
pub fn simple_record(value: i64) -> Node {
    Node::record("simple").field("value", Node::int(value)).build()
}

/// Declared type of [`simple_record`] fixtures.
#[must_use]
pub fn simple_ty() -> Type {
    Type::record("simple")
}

/// Builds `complex { st: simple, sz: int (internal), id: string }`.
#[must_use]
pub fn complex_record(nested: i64, internal: i64, id: &str) -> Node {
    Node::record("complex")
        .field("st", simple_record(nested))
        .internal("sz", Node::int(internal))
        .field("id", Node::str(id))
        .build()
}

/// Builds a `link { next: ?link }` node whose `next` is nil.
#[must_use]
pub fn link() -> Node {
    Node::record("link")
        .field("next", Node::none(Type::record("link")))
        .build()
}

/// Points `from.next` at `to`; aiming it back at an ancestor forms a cycle.
/// Nodes without a `next` field are left untouched.
pub fn link_to(from: &Node, to: &Node) {
    if let Some(next) = from.field("next") {
        *next.value_mut() = Value::Optional(OptionalValue::new(
            Type::record("link"),
            Some(to.clone()),
        ));
    }
}

/// Builds a `map<string, any>` node, boxing every entry value.
#[must_use]
pub fn dyn_map(entries: impl IntoIterator<Item = (&'static str, Node)>) -> Node {
    Node::map_with(
        Type::string(),
        Type::Any,
        entries
            .into_iter()
            .map(|(key, node)| (MapKey::from(key), Node::boxed(node))),
    )
}

/// Builds a sequence of string scalars.
#[must_use]
pub fn str_seq(items: &[&str]) -> Node {
    Node::sequence(Type::string(), items.iter().map(|s| Node::str(*s)))
}

/// Builds a sequence of integer scalars.
#[must_use]
pub fn int_seq(items: &[i64]) -> Node {
    Node::sequence(Type::int(), items.iter().map(|i| Node::int(*i)))
}
