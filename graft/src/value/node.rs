//! Structural values and the shared handles that address them.
//!
//! A [`Node`] is the unit of addressability: every field, map entry, sequence
//! element, and optional target sits behind its own node. Nodes are `Rc`
//! handles, so callers can alias them to build cyclic or shared graphs; the
//! merge engine keys its cycle guard on node identity.

use std::cell::{Ref, RefCell, RefMut};
use std::collections::BTreeMap;
use std::rc::Rc;
use std::sync::Arc;

use super::scalar::{MapKey, Scalar};
use super::ty::{Kind, Type};

/// A named record field.
#[derive(Clone, Debug)]
pub struct Field {
    name: String,
    exported: bool,
    node: Node,
}

impl Field {
    /// An exported field.
    #[must_use]
    pub fn new(name: impl Into<String>, node: Node) -> Self {
        Self {
            name: name.into(),
            exported: true,
            node,
        }
    }

    /// An internal field, invisible to the merge engine.
    #[must_use]
    pub fn internal(name: impl Into<String>, node: Node) -> Self {
        Self {
            name: name.into(),
            exported: false,
            node,
        }
    }

    /// Field name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the merge engine may read and write this field.
    #[must_use]
    pub const fn is_exported(&self) -> bool {
        self.exported
    }

    /// The field's value handle.
    #[must_use]
    pub const fn node(&self) -> &Node {
        &self.node
    }
}

/// Record value: a nominal type name plus ordered named fields.
#[derive(Clone, Debug)]
pub struct Record {
    name: Arc<str>,
    fields: Vec<Field>,
}

impl Record {
    /// A record of the named type with the given fields, in declaration order.
    #[must_use]
    pub fn new(name: impl Into<Arc<str>>, fields: Vec<Field>) -> Self {
        Self {
            name: name.into(),
            fields,
        }
    }

    /// The nominal type name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn type_name(&self) -> Arc<str> {
        Arc::clone(&self.name)
    }

    /// Fields in declaration order.
    #[must_use]
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Looks up a field by exact name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// Map value: declared key and value types plus an entry collection.
#[derive(Clone, Debug)]
pub struct MapValue {
    key_ty: Type,
    value_ty: Type,
    entries: BTreeMap<MapKey, Node>,
}

impl MapValue {
    /// An empty map with the given key and value types.
    #[must_use]
    pub const fn new(key_ty: Type, value_ty: Type) -> Self {
        Self {
            key_ty,
            value_ty,
            entries: BTreeMap::new(),
        }
    }

    /// Declared key type.
    #[must_use]
    pub const fn key_ty(&self) -> &Type {
        &self.key_ty
    }

    /// Declared value type.
    #[must_use]
    pub const fn value_ty(&self) -> &Type {
        &self.value_ty
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Looks up the value for a key.
    #[must_use]
    pub fn get(&self, key: &MapKey) -> Option<&Node> {
        self.entries.get(key)
    }

    /// Inserts or replaces the value for a key.
    pub fn insert(&mut self, key: MapKey, node: Node) {
        self.entries.insert(key, node);
    }

    /// Iterates entries in key order.
    pub fn entries(&self) -> impl Iterator<Item = (&MapKey, &Node)> {
        self.entries.iter()
    }
}

/// Sequence value: a declared element type plus ordered elements.
#[derive(Clone, Debug)]
pub struct Sequence {
    elem_ty: Type,
    items: Vec<Node>,
}

impl Sequence {
    /// A sequence of the given element type.
    #[must_use]
    pub const fn new(elem_ty: Type, items: Vec<Node>) -> Self {
        Self { elem_ty, items }
    }

    /// Declared element type.
    #[must_use]
    pub const fn elem_ty(&self) -> &Type {
        &self.elem_ty
    }

    /// Elements in order.
    #[must_use]
    pub fn items(&self) -> &[Node] {
        &self.items
    }

    /// Number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the sequence holds no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Appends elements after the existing ones.
    pub fn extend(&mut self, items: impl IntoIterator<Item = Node>) {
        self.items.extend(items);
    }
}

/// Optional value: a declared inner type plus zero-or-one target.
///
/// Covers both nullable references and boxed, dynamically-typed slots; the
/// latter declare their inner type as [`Type::Any`].
#[derive(Clone, Debug)]
pub struct OptionalValue {
    inner_ty: Type,
    inner: Option<Node>,
}

impl OptionalValue {
    /// An optional of the given inner type.
    #[must_use]
    pub const fn new(inner_ty: Type, inner: Option<Node>) -> Self {
        Self { inner_ty, inner }
    }

    /// Declared inner type.
    #[must_use]
    pub const fn inner_ty(&self) -> &Type {
        &self.inner_ty
    }

    /// The wrapped value, if present.
    #[must_use]
    pub const fn inner(&self) -> Option<&Node> {
        self.inner.as_ref()
    }
}

/// Any structural value the merge engine can introspect.
#[derive(Clone, Debug)]
pub enum Value {
    /// Named record with ordered fields.
    Record(Record),
    /// Associative map.
    Map(MapValue),
    /// Ordered homogeneous sequence.
    Sequence(Sequence),
    /// Zero-or-one reference.
    Optional(OptionalValue),
    /// Terminal primitive.
    Scalar(Scalar),
}

impl Value {
    /// The value's kind tag.
    #[must_use]
    pub const fn kind(&self) -> Kind {
        match self {
            Self::Record(..) => Kind::Record,
            Self::Map(..) => Kind::Map,
            Self::Sequence(..) => Kind::Sequence,
            Self::Optional(..) => Kind::Optional,
            Self::Scalar(..) => Kind::Scalar,
        }
    }

    /// The value's declared type. Available even for empty values: a nil
    /// optional still reports the type it would wrap.
    #[must_use]
    pub fn ty(&self) -> Type {
        match self {
            Self::Record(r) => Type::Record(r.type_name()),
            Self::Map(m) => Type::map(m.key_ty().clone(), m.value_ty().clone()),
            Self::Sequence(s) => Type::sequence(s.elem_ty().clone()),
            Self::Optional(o) => Type::optional(o.inner_ty().clone()),
            Self::Scalar(s) => Type::Scalar(s.kind()),
        }
    }

    /// The record payload, if this is a record.
    #[must_use]
    pub const fn as_record(&self) -> Option<&Record> {
        match self {
            Self::Record(r) => Some(r),
            _ => None,
        }
    }

    /// The map payload, if this is a map.
    #[must_use]
    pub const fn as_map(&self) -> Option<&MapValue> {
        match self {
            Self::Map(m) => Some(m),
            _ => None,
        }
    }

    /// The sequence payload, if this is a sequence.
    #[must_use]
    pub const fn as_sequence(&self) -> Option<&Sequence> {
        match self {
            Self::Sequence(s) => Some(s),
            _ => None,
        }
    }

    /// The optional payload, if this is an optional.
    #[must_use]
    pub const fn as_optional(&self) -> Option<&OptionalValue> {
        match self {
            Self::Optional(o) => Some(o),
            _ => None,
        }
    }

    /// The scalar payload, if this is a scalar.
    #[must_use]
    pub const fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            Self::Scalar(s) => Some(s),
            _ => None,
        }
    }
}

/// Shared, addressable handle to a structural value.
///
/// Cloning a node clones the handle, not the value; two clones address the
/// same allocation. Deliberately `!Send`: merging is a single-threaded,
/// synchronous computation.
#[derive(Clone, Debug)]
pub struct Node(Rc<RefCell<Value>>);

impl Node {
    /// Wraps a value in a fresh handle.
    #[must_use]
    pub fn new(value: Value) -> Self {
        Self(Rc::new(RefCell::new(value)))
    }

    /// Borrows the value for reading.
    ///
    /// # Panics
    ///
    /// Panics if the value is currently mutably borrowed.
    #[must_use]
    pub fn value(&self) -> Ref<'_, Value> {
        self.0.borrow()
    }

    /// Borrows the value for writing.
    ///
    /// # Panics
    ///
    /// Panics if the value is currently borrowed.
    #[must_use]
    pub fn value_mut(&self) -> RefMut<'_, Value> {
        self.0.borrow_mut()
    }

    /// The value's declared type.
    ///
    /// # Panics
    ///
    /// Panics if the value is currently mutably borrowed.
    #[must_use]
    pub fn ty(&self) -> Type {
        self.value().ty()
    }

    /// The value's kind tag.
    ///
    /// # Panics
    ///
    /// Panics if the value is currently mutably borrowed.
    #[must_use]
    pub fn kind(&self) -> Kind {
        self.value().kind()
    }

    /// Whether two handles address the same allocation.
    #[must_use]
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Rc::ptr_eq(&a.0, &b.0)
    }

    /// Stable identity token for the cycle guard.
    pub(crate) fn address(&self) -> usize {
        Rc::as_ptr(&self.0).addr()
    }

    /// Adopts `src`'s contents wholesale.
    ///
    /// The copy is one level deep: the stored value is cloned, and any child
    /// nodes it references are shared with the source afterwards, matching
    /// assignment semantics where references are copied, not duplicated.
    /// Aliased handles are left untouched.
    ///
    /// # Panics
    ///
    /// Panics if either value is currently borrowed.
    pub fn set_from(&self, src: &Self) {
        if Self::ptr_eq(self, src) {
            return;
        }
        let adopted = src.value().clone();
        *self.value_mut() = adopted;
    }

    /// A fresh handle holding a one-level copy of this value.
    ///
    /// # Panics
    ///
    /// Panics if the value is currently mutably borrowed.
    #[must_use]
    pub fn shallow_copy(&self) -> Self {
        Self::new(self.value().clone())
    }

    /// Whether this node is a dynamically-typed box: an optional whose
    /// declared inner type is [`Type::Any`].
    ///
    /// # Panics
    ///
    /// Panics if the value is currently mutably borrowed.
    #[must_use]
    pub fn is_boxed(&self) -> bool {
        self.value()
            .as_optional()
            .is_some_and(|o| *o.inner_ty() == Type::Any)
    }

    /// Peels one dynamically-typed box, yielding the wrapped handle; any
    /// other node (including typed optionals) is returned as-is.
    ///
    /// # Panics
    ///
    /// Panics if the value is currently mutably borrowed.
    #[must_use]
    pub fn unboxed(&self) -> Self {
        if self.is_boxed() {
            if let Some(inner) = self.value().as_optional().and_then(OptionalValue::inner) {
                return inner.clone();
            }
        }
        self.clone()
    }

    /// The named record field's handle, if this is a record with that field.
    ///
    /// # Panics
    ///
    /// Panics if the value is currently mutably borrowed.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<Self> {
        self.value()
            .as_record()
            .and_then(|r| r.field(name))
            .map(|f| f.node().clone())
    }

    /// The map entry's handle, if this is a map containing the key.
    ///
    /// # Panics
    ///
    /// Panics if the value is currently mutably borrowed.
    #[must_use]
    pub fn entry(&self, key: &MapKey) -> Option<Self> {
        self.value().as_map().and_then(|m| m.get(key)).map(Self::clone)
    }

    /// The optional's target handle, if this is a populated optional.
    ///
    /// # Panics
    ///
    /// Panics if the value is currently mutably borrowed.
    #[must_use]
    pub fn inner(&self) -> Option<Self> {
        self.value()
            .as_optional()
            .and_then(OptionalValue::inner)
            .map(Self::clone)
    }

    /// A clone of the scalar payload, if this is a scalar.
    ///
    /// # Panics
    ///
    /// Panics if the value is currently mutably borrowed.
    #[must_use]
    pub fn scalar(&self) -> Option<Scalar> {
        self.value().as_scalar().cloned()
    }
}
