//! Convenience constructors for assembling value graphs.
//!
//! These cover the common shapes so tests and callers do not spell out the
//! `Value` enum by hand. Anything not covered here can still be built through
//! [`Node::new`].

use std::sync::Arc;

use super::node::{Field, MapValue, Node, OptionalValue, Record, Sequence, Value};
use super::scalar::{MapKey, OpaqueId, Scalar};
use super::ty::Type;

impl Node {
    /// Boolean scalar node.
    #[must_use]
    pub fn bool(v: bool) -> Self {
        Self::new(Value::Scalar(Scalar::Bool(v)))
    }

    /// Signed integer scalar node.
    #[must_use]
    pub fn int(v: i64) -> Self {
        Self::new(Value::Scalar(Scalar::Int(v)))
    }

    /// Unsigned integer scalar node.
    #[must_use]
    pub fn uint(v: u64) -> Self {
        Self::new(Value::Scalar(Scalar::Uint(v)))
    }

    /// Floating-point scalar node.
    #[must_use]
    pub fn float(v: f64) -> Self {
        Self::new(Value::Scalar(Scalar::Float(v)))
    }

    /// String scalar node.
    #[must_use]
    pub fn str(v: impl Into<String>) -> Self {
        Self::new(Value::Scalar(Scalar::Str(v.into())))
    }

    /// Opaque-handle scalar node; pass `None` for a nil handle.
    #[must_use]
    pub fn opaque(handle: Option<OpaqueId>) -> Self {
        Self::new(Value::Scalar(Scalar::Opaque(handle)))
    }

    /// Sequence node with the given element type.
    #[must_use]
    pub fn sequence(elem_ty: Type, items: impl IntoIterator<Item = Self>) -> Self {
        Self::new(Value::Sequence(Sequence::new(
            elem_ty,
            items.into_iter().collect(),
        )))
    }

    /// Empty map node with the given key and value types.
    #[must_use]
    pub fn map(key_ty: Type, value_ty: Type) -> Self {
        Self::new(Value::Map(MapValue::new(key_ty, value_ty)))
    }

    /// Map node populated from an entry iterator.
    #[must_use]
    pub fn map_with(
        key_ty: Type,
        value_ty: Type,
        entries: impl IntoIterator<Item = (MapKey, Self)>,
    ) -> Self {
        let mut map = MapValue::new(key_ty, value_ty);
        for (key, node) in entries {
            map.insert(key, node);
        }
        Self::new(Value::Map(map))
    }

    /// Populated optional node of the given inner type.
    #[must_use]
    pub fn some(inner_ty: Type, inner: Self) -> Self {
        Self::new(Value::Optional(OptionalValue::new(inner_ty, Some(inner))))
    }

    /// Nil optional node of the given inner type.
    #[must_use]
    pub fn none(inner_ty: Type) -> Self {
        Self::new(Value::Optional(OptionalValue::new(inner_ty, None)))
    }

    /// Dynamically-typed box holding `inner`.
    #[must_use]
    pub fn boxed(inner: Self) -> Self {
        Self::some(Type::Any, inner)
    }

    /// Empty dynamically-typed box.
    #[must_use]
    pub fn empty_box() -> Self {
        Self::none(Type::Any)
    }

    /// Wraps `node` in a box when the slot it is destined for is
    /// dynamically typed; typed slots take the node directly.
    pub(crate) fn boxed_for(slot_ty: &Type, node: Self) -> Self {
        if *slot_ty == Type::Any {
            Self::boxed(node)
        } else {
            node
        }
    }

    /// Starts building a record node of the named type.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use graft::value::Node;
    ///
    /// let server = Node::record("server")
    ///     .field("host", Node::str("example.org"))
    ///     .field("port", Node::int(8080))
    ///     .build();
    /// assert_eq!(server.ty(), graft::value::Type::record("server"));
    /// ```
    #[must_use]
    pub fn record(name: impl Into<Arc<str>>) -> RecordBuilder {
        RecordBuilder {
            name: name.into(),
            fields: Vec::new(),
        }
    }
}

/// Builder for record nodes; fields keep their declaration order.
#[derive(Debug)]
pub struct RecordBuilder {
    name: Arc<str>,
    fields: Vec<Field>,
}

impl RecordBuilder {
    /// Appends an exported field.
    #[must_use]
    pub fn field(mut self, name: impl Into<String>, node: Node) -> Self {
        self.fields.push(Field::new(name, node));
        self
    }

    /// Appends an internal field, invisible to the merge engine.
    #[must_use]
    pub fn internal(mut self, name: impl Into<String>, node: Node) -> Self {
        self.fields.push(Field::internal(name, node));
        self
    }

    /// Finishes the record and wraps it in a fresh node.
    #[must_use]
    pub fn build(self) -> Node {
        Node::new(Value::Record(Record::new(self.name, self.fields)))
    }
}
