//! # Permafrost
//!
//! Deep, idempotent immutability-marking over a shared, possibly cyclic
//! object graph.
//!
//! Permafrost models a dynamic object graph (plain objects, arrays, and
//! callable objects sharing structure through reference-counted handles)
//! and provides one core operation: [`deep_freeze`], which marks a root
//! value and everything transitively reachable through *own* members as
//! immutable, exactly once per object, no matter how the graph aliases or
//! cycles. Frozen objects reject every mutation through the
//! [`ObjectRef`] API.
//!
//! ## Example
//!
//! ```
//! use permafrost::{deep_freeze, ObjectRef, Value};
//!
//! let inner = ObjectRef::new();
//! let root = ObjectRef::new().with("inner", Value::Object(inner.clone()));
//!
//! deep_freeze(&Value::Object(root.clone()));
//!
//! assert!(root.is_frozen());
//! assert!(inner.is_frozen());
//! assert!(root.set("x", Value::Int(1)).is_err());
//! ```
//!
//! ## What gets frozen
//!
//! Only structural values (objects) are marked; primitives pass through
//! untouched. The traversal covers every own member, including
//! non-enumerable and symbol-keyed ones, and never follows the prototype
//! link, so inherited members stay mutable.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod freeze;
pub mod object;
pub mod symbol;
pub mod value;

// Re-export main types
pub use error::{ObjectError, Result};
pub use freeze::{deep_freeze, deep_freeze_with, is_deeply_frozen, VisitedSet};
pub use object::{ObjectId, ObjectKind, ObjectRef, Property, PropertyKey};
pub use symbol::{Symbol, SymbolId};
pub use value::{NativeFn, NativeFnPtr, Value};

/// Permafrost version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
