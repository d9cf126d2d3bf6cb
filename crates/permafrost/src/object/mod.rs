//! Shared mutable objects: the structural tier of the value graph
//!
//! An [`ObjectRef`] is a reference-counted handle to a property table with
//! interior mutability. Two handles denote the *same object* when they share
//! an allocation ([`ObjectRef::ptr_eq`]); the traversal in [`crate::freeze`]
//! keys its visited set on that identity.
//!
//! Objects carry two unrelated notions of "prototype":
//! - the *prototype link* ([`ObjectRef::prototype`]): the inheritance chain
//!   consulted by [`ObjectRef::get`], and never by own-member enumeration;
//! - the `"prototype"` *own property* of a function object: an ordinary
//!   member holding the function's template object.

mod key;

pub use key::PropertyKey;

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use parking_lot::RwLock;

use crate::error::{ObjectError, Result};
use crate::value::{NativeFn, Value};

/// Address-derived identity of an object, stable for the object's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectId(usize);

/// An own member: its value plus visibility.
#[derive(Clone)]
pub struct Property {
    /// The member's current value
    pub value: Value,

    /// Whether public enumeration ([`ObjectRef::keys`]) reports this member.
    /// Non-enumerable members still appear in [`ObjectRef::own_keys`].
    pub enumerable: bool,
}

impl Property {
    fn enumerable(value: Value) -> Self {
        Self {
            value,
            enumerable: true,
        }
    }

    fn hidden(value: Value) -> Self {
        Self {
            value,
            enumerable: false,
        }
    }
}

/// What an object is, beyond its property table.
#[derive(Clone)]
pub enum ObjectKind {
    /// A record with named members
    Plain,

    /// An ordered sequence; elements are `Index`-keyed members
    Array,

    /// A callable object with attached state
    Function(NativeFn),
}

struct ObjectData {
    kind: ObjectKind,
    properties: IndexMap<PropertyKey, Property>,
    prototype: Option<ObjectRef>,
    frozen: bool,
}

impl ObjectData {
    fn empty(kind: ObjectKind) -> Self {
        Self {
            kind,
            properties: IndexMap::new(),
            prototype: None,
            frozen: false,
        }
    }
}

/// Shared handle to an object.
///
/// Cloning the handle is cheap and yields the same object; use
/// [`ObjectRef::ptr_eq`] to test for that.
#[derive(Clone)]
pub struct ObjectRef(Arc<RwLock<ObjectData>>);

impl ObjectRef {
    fn from_data(data: ObjectData) -> Self {
        ObjectRef(Arc::new(RwLock::new(data)))
    }

    /// Create an empty plain object.
    pub fn new() -> Self {
        Self::from_data(ObjectData::empty(ObjectKind::Plain))
    }

    /// Create an empty plain object inheriting from `prototype`.
    pub fn with_prototype(prototype: ObjectRef) -> Self {
        let mut data = ObjectData::empty(ObjectKind::Plain);
        data.prototype = Some(prototype);
        Self::from_data(data)
    }

    /// Create an array from its elements.
    ///
    /// Elements become `Index`-keyed own members, so the freeze traversal
    /// and own-member enumeration see them like any other member.
    pub fn array(elements: Vec<Value>) -> Self {
        let mut data = ObjectData::empty(ObjectKind::Array);
        data.properties = elements
            .into_iter()
            .enumerate()
            .map(|(index, element)| (PropertyKey::Index(index), Property::enumerable(element)))
            .collect();
        Self::from_data(data)
    }

    /// Create a callable object around a native function.
    ///
    /// The object gets a non-enumerable own `"prototype"` member holding a
    /// fresh template object, whose non-enumerable `"constructor"` member
    /// points back at the function. The back-link makes every function
    /// object a small cycle, which the freeze traversal must terminate on.
    pub fn function(native: NativeFn) -> Self {
        let function = Self::from_data(ObjectData::empty(ObjectKind::Function(native)));

        let template = ObjectRef::new();
        template.0.write().properties.insert(
            PropertyKey::from("constructor"),
            Property::hidden(Value::Object(function.clone())),
        );
        function.0.write().properties.insert(
            PropertyKey::from("prototype"),
            Property::hidden(Value::Object(template)),
        );

        function
    }

    // ═══════════════════════════════════════════════════════════════════
    // Identity
    // ═══════════════════════════════════════════════════════════════════

    /// This object's identity, derived from its allocation address.
    ///
    /// Stable for as long as the object is alive; used as the key of
    /// [`crate::VisitedSet`].
    pub fn id(&self) -> ObjectId {
        ObjectId(Arc::as_ptr(&self.0) as usize)
    }

    /// Whether two handles denote the same object.
    pub fn ptr_eq(&self, other: &ObjectRef) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    // ═══════════════════════════════════════════════════════════════════
    // Lookup
    // ═══════════════════════════════════════════════════════════════════

    /// Look up a member, falling back through the prototype chain.
    pub fn get(&self, key: impl Into<PropertyKey>) -> Option<Value> {
        let key = key.into();
        let mut current = self.clone();
        loop {
            let next = {
                let data = current.0.read();
                if let Some(property) = data.properties.get(&key) {
                    return Some(property.value.clone());
                }
                data.prototype.clone()
            };
            match next {
                Some(prototype) => current = prototype,
                None => return None,
            }
        }
    }

    /// Look up an own member only; the prototype chain is not consulted.
    pub fn get_own(&self, key: impl Into<PropertyKey>) -> Option<Value> {
        self.0
            .read()
            .properties
            .get(&key.into())
            .map(|property| property.value.clone())
    }

    /// Look up an element by position.
    pub fn get_index(&self, index: usize) -> Option<Value> {
        self.get_own(index)
    }

    /// Whether `key` names an own member.
    pub fn has_own(&self, key: impl Into<PropertyKey>) -> bool {
        self.0.read().properties.contains_key(&key.into())
    }

    // ═══════════════════════════════════════════════════════════════════
    // Mutation
    // ═══════════════════════════════════════════════════════════════════

    /// Set a member, creating an enumerable own property if the key is new.
    ///
    /// An existing member keeps its enumerability.
    ///
    /// # Errors
    ///
    /// Returns [`ObjectError::Frozen`] once the object is frozen.
    pub fn set(&self, key: impl Into<PropertyKey>, value: impl Into<Value>) -> Result<()> {
        let key = key.into();
        let value = value.into();
        let mut data = self.0.write();
        if data.frozen {
            return Err(ObjectError::Frozen {
                action: "set",
                key,
            });
        }
        if let Some(property) = data.properties.get_mut(&key) {
            property.value = value;
        } else {
            data.properties.insert(key, Property::enumerable(value));
        }
        Ok(())
    }

    /// Define (or redefine) a member with explicit enumerability.
    ///
    /// # Errors
    ///
    /// Returns [`ObjectError::Frozen`] once the object is frozen.
    pub fn define(
        &self,
        key: impl Into<PropertyKey>,
        value: impl Into<Value>,
        enumerable: bool,
    ) -> Result<()> {
        let key = key.into();
        let mut data = self.0.write();
        if data.frozen {
            return Err(ObjectError::Frozen {
                action: "define",
                key,
            });
        }
        data.properties.insert(
            key,
            Property {
                value: value.into(),
                enumerable,
            },
        );
        Ok(())
    }

    /// Remove an own member. Returns whether the key was present.
    ///
    /// # Errors
    ///
    /// Returns [`ObjectError::Frozen`] once the object is frozen.
    pub fn delete(&self, key: impl Into<PropertyKey>) -> Result<bool> {
        let key = key.into();
        let mut data = self.0.write();
        if data.frozen {
            return Err(ObjectError::Frozen {
                action: "delete",
                key,
            });
        }
        Ok(data.properties.shift_remove(&key).is_some())
    }

    /// Append an element after the highest existing index. Returns the
    /// index used.
    ///
    /// # Errors
    ///
    /// Returns [`ObjectError::Frozen`] once the object is frozen.
    pub fn push(&self, value: impl Into<Value>) -> Result<usize> {
        let mut data = self.0.write();
        let index = data
            .properties
            .keys()
            .filter_map(|key| match key {
                PropertyKey::Index(index) => Some(index + 1),
                _ => None,
            })
            .max()
            .unwrap_or(0);
        if data.frozen {
            return Err(ObjectError::Frozen {
                action: "push",
                key: PropertyKey::Index(index),
            });
        }
        data.properties
            .insert(PropertyKey::Index(index), Property::enumerable(value.into()));
        Ok(index)
    }

    /// Insert an enumerable member, builder style.
    ///
    /// Intended for constructing fixtures before the handle is shared; a
    /// frozen object is left unchanged.
    pub fn with(self, key: impl Into<PropertyKey>, value: impl Into<Value>) -> Self {
        let _ = self.set(key, value);
        self
    }

    // ═══════════════════════════════════════════════════════════════════
    // Prototype Link
    // ═══════════════════════════════════════════════════════════════════

    /// The object this one inherits from, if any.
    pub fn prototype(&self) -> Option<ObjectRef> {
        self.0.read().prototype.clone()
    }

    /// Replace the prototype link.
    ///
    /// # Errors
    ///
    /// Returns [`ObjectError::FrozenPrototype`] once the object is frozen,
    /// and [`ObjectError::PrototypeCycle`] if the new chain would loop back
    /// to this object.
    pub fn set_prototype(&self, prototype: Option<ObjectRef>) -> Result<()> {
        if self.0.read().frozen {
            return Err(ObjectError::FrozenPrototype);
        }
        if let Some(ref head) = prototype {
            let mut current = Some(head.clone());
            while let Some(ancestor) = current {
                if ancestor.ptr_eq(self) {
                    return Err(ObjectError::PrototypeCycle);
                }
                current = ancestor.prototype();
            }
        }
        self.0.write().prototype = prototype;
        Ok(())
    }

    // ═══════════════════════════════════════════════════════════════════
    // Enumeration
    // ═══════════════════════════════════════════════════════════════════

    /// Enumerable own keys, in insertion order.
    pub fn keys(&self) -> Vec<PropertyKey> {
        self.0
            .read()
            .properties
            .iter()
            .filter(|(_, property)| property.enumerable)
            .map(|(key, _)| key.clone())
            .collect()
    }

    /// Every own key, including non-enumerable and symbol keys.
    ///
    /// Inherited members never appear here; this is the traversal frontier
    /// of the freeze walk.
    pub fn own_keys(&self) -> Vec<PropertyKey> {
        self.0.read().properties.keys().cloned().collect()
    }

    /// Snapshot of all own members.
    ///
    /// The read lock is released before this returns, so callers may
    /// re-enter the object (or reach it again through a cycle) while
    /// iterating the snapshot.
    pub fn own_entries(&self) -> Vec<(PropertyKey, Value)> {
        self.0
            .read()
            .properties
            .iter()
            .map(|(key, property)| (key.clone(), property.value.clone()))
            .collect()
    }

    /// Number of own members.
    pub fn len(&self) -> usize {
        self.0.read().properties.len()
    }

    /// Whether the object has no own members.
    pub fn is_empty(&self) -> bool {
        self.0.read().properties.is_empty()
    }

    // ═══════════════════════════════════════════════════════════════════
    // Freezing
    // ═══════════════════════════════════════════════════════════════════

    /// Mark this object immutable. Shallow and idempotent; see
    /// [`crate::deep_freeze`] for the transitive version.
    pub fn freeze(&self) {
        self.0.write().frozen = true;
    }

    /// Whether this object has been marked immutable.
    pub fn is_frozen(&self) -> bool {
        self.0.read().frozen
    }

    // ═══════════════════════════════════════════════════════════════════
    // Kind and Invocation
    // ═══════════════════════════════════════════════════════════════════

    /// What this object is (plain, array, or function).
    pub fn kind(&self) -> ObjectKind {
        self.0.read().kind.clone()
    }

    /// Whether this object is an array.
    pub fn is_array(&self) -> bool {
        matches!(self.0.read().kind, ObjectKind::Array)
    }

    /// Whether this object carries a callable payload.
    pub fn is_callable(&self) -> bool {
        matches!(self.0.read().kind, ObjectKind::Function(_))
    }

    /// Invoke this object's native payload.
    ///
    /// Freezing does not affect callability; a frozen function object can
    /// still be invoked.
    ///
    /// # Errors
    ///
    /// Returns [`ObjectError::NotCallable`] for plain objects and arrays,
    /// and [`ObjectError::Native`] if the payload reports an error.
    pub fn call(&self, args: &[Value]) -> Result<Value> {
        let kind = self.0.read().kind.clone();
        match kind {
            ObjectKind::Function(native) => {
                native.call(args).map_err(|message| ObjectError::Native {
                    name: native.name.clone(),
                    message,
                })
            }
            _ => Err(ObjectError::NotCallable(format!("{:?}", self))),
        }
    }
}

impl Default for ObjectRef {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let data = self.0.read();
        let frozen = if data.frozen { ", frozen" } else { "" };
        match &data.kind {
            ObjectKind::Plain => write!(
                f,
                "<object {:#x} ({} members{})>",
                Arc::as_ptr(&self.0) as usize,
                data.properties.len(),
                frozen
            ),
            ObjectKind::Array => write!(
                f,
                "<array {:#x} ({} members{})>",
                Arc::as_ptr(&self.0) as usize,
                data.properties.len(),
                frozen
            ),
            ObjectKind::Function(native) => {
                write!(f, "<fn {} ({} members{})>", native.name, data.properties.len(), frozen)
            }
        }
    }
}
