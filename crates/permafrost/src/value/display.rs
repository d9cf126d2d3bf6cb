//! Display and Debug implementations for Value

use std::fmt;

use crate::object::PropertyKey;

use super::*;

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(n) => write!(f, "{}", n),
            Value::BigInt(n) => write!(f, "{}n", n),
            Value::Float(n) => write!(f, "{}", n),
            Value::Symbol(symbol) => write!(f, "{:?}", symbol),
            Value::Str(s) => write!(f, "{:?}", s.as_ref()),
            Value::NativeFn(native) => write!(f, "<native {}>", native.name),
            // Shallow on purpose: object graphs may be cyclic
            Value::Object(object) => write!(f, "{:?}", object),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(s) => write!(f, "{}", s.as_ref()), // No quotes for Display
            // One level of members; nested objects fall back to the shallow
            // Debug form so cyclic graphs stay printable
            Value::Object(object) => {
                let entries = object.own_entries();
                if object.is_array() {
                    write!(f, "[")?;
                    for (i, (_, element)) in entries.iter().enumerate() {
                        if i > 0 {
                            write!(f, ", ")?;
                        }
                        write!(f, "{:?}", element)?;
                    }
                    write!(f, "]")
                } else {
                    write!(f, "{{")?;
                    for (i, (key, member)) in entries.iter().enumerate() {
                        if i > 0 {
                            write!(f, ", ")?;
                        }
                        match key {
                            PropertyKey::Symbol(symbol) => write!(f, "[{}]: {:?}", symbol, member)?,
                            _ => write!(f, "{}: {:?}", key, member)?,
                        }
                    }
                    write!(f, "}}")
                }
            }
            _ => fmt::Debug::fmt(self, f),
        }
    }
}
