//! Value trait implementations: constructors, predicates, extractors, From traits, PartialEq

use std::sync::Arc;

use super::*;

// ═══════════════════════════════════════════════════════════════════
// Convenience Constructors
// ═══════════════════════════════════════════════════════════════════

impl Value {
    /// Create a string value
    pub fn string(s: impl Into<String>) -> Self {
        Value::Str(Arc::new(s.into()))
    }

    /// Create a fresh symbol value
    pub fn symbol() -> Self {
        Value::Symbol(Symbol::new())
    }

    /// Create an empty plain object value
    pub fn object() -> Self {
        Value::Object(ObjectRef::new())
    }

    /// Create an array value
    pub fn array(elements: Vec<Value>) -> Self {
        Value::Object(ObjectRef::array(elements))
    }

    /// Create a callable object value (with an attached template)
    pub fn function(native: NativeFn) -> Self {
        Value::Object(ObjectRef::function(native))
    }

    // ═══════════════════════════════════════════════════════════════════
    // Type Predicates
    // ═══════════════════════════════════════════════════════════════════

    /// Check if value is the absence marker
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Check if value is structural, i.e. an object the freeze traversal
    /// recurses into
    pub fn is_structural(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    /// Check if value is opaque to the freeze traversal
    pub fn is_primitive(&self) -> bool {
        !self.is_structural()
    }

    /// Check if value is callable (bare native function or function object)
    pub fn is_callable(&self) -> bool {
        match self {
            Value::NativeFn(_) => true,
            Value::Object(object) => object.is_callable(),
            _ => false,
        }
    }

    // ═══════════════════════════════════════════════════════════════════
    // Extractors (return Option for safe access)
    // ═══════════════════════════════════════════════════════════════════

    /// Extract boolean value
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Extract as i64 (converts from `BigInt` when in range)
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            Value::BigInt(n) => (*n).try_into().ok(),
            _ => None,
        }
    }

    /// Extract as f64
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(n) => Some(*n),
            _ => None,
        }
    }

    /// Extract string slice
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Extract the symbol
    pub fn as_symbol(&self) -> Option<Symbol> {
        match self {
            Value::Symbol(symbol) => Some(*symbol),
            _ => None,
        }
    }

    /// Extract the object handle
    pub fn as_object(&self) -> Option<&ObjectRef> {
        match self {
            Value::Object(object) => Some(object),
            _ => None,
        }
    }

    // ═══════════════════════════════════════════════════════════════════
    // Structural Comparison
    // ═══════════════════════════════════════════════════════════════════

    /// Compare member by member instead of by identity.
    ///
    /// Shared identity short-circuits, so a graph compared against itself
    /// terminates even when cyclic. Comparing two *distinct* graphs that
    /// both contain cycles may not terminate; this is a tool for comparing
    /// acyclic snapshots.
    pub fn deep_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Object(a), Value::Object(b)) => {
                if a.ptr_eq(b) {
                    return true;
                }
                let left = a.own_entries();
                let right = b.own_entries();
                left.len() == right.len()
                    && left
                        .iter()
                        .zip(&right)
                        .all(|((ka, va), (kb, vb))| ka == kb && va.deep_eq(vb))
            }
            _ => self == other,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════
// From Conversions
// ═══════════════════════════════════════════════════════════════════

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<i128> for Value {
    fn from(n: i128) -> Self {
        Value::BigInt(n)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Float(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::string(s)
    }
}

impl From<Symbol> for Value {
    fn from(symbol: Symbol) -> Self {
        Value::Symbol(symbol)
    }
}

impl From<NativeFn> for Value {
    fn from(native: NativeFn) -> Self {
        Value::NativeFn(native)
    }
}

impl From<ObjectRef> for Value {
    fn from(object: ObjectRef) -> Self {
        Value::Object(object)
    }
}

// ═══════════════════════════════════════════════════════════════════
// PartialEq Implementation
// ═══════════════════════════════════════════════════════════════════

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::BigInt(a), Value::BigInt(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Symbol(a), Value::Symbol(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            // Callables and objects compare by identity, not structure
            (Value::NativeFn(a), Value::NativeFn(b)) => a.ptr_eq(b),
            (Value::Object(a), Value::Object(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}
