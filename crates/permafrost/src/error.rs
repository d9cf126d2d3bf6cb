//! Error types for object mutation

use thiserror::Error;

use crate::object::PropertyKey;

/// Main error type for object operations.
///
/// The freeze traversal itself never fails; these errors come from the
/// mutation API once an object has been marked immutable, and from calling
/// values that are not callable.
#[derive(Error, Debug)]
pub enum ObjectError {
    /// Attempted to modify a member of a frozen object
    #[error("cannot {action} `{key}`: object is frozen")]
    Frozen {
        /// The mutation that was attempted (e.g. "set", "delete")
        action: &'static str,
        /// The key the mutation targeted
        key: PropertyKey,
    },

    /// Attempted to replace the prototype of a frozen object
    #[error("cannot set prototype: object is frozen")]
    FrozenPrototype,

    /// Attempted to install a prototype chain that loops back on itself
    #[error("prototype chain would be cyclic")]
    PrototypeCycle,

    /// Attempted to call a value that is not callable
    #[error("not callable: {0}")]
    NotCallable(String),

    /// A native function reported an error
    #[error("native function `{name}` failed: {message}")]
    Native {
        /// The native function's name
        name: String,
        /// The error it reported
        message: String,
    },
}

/// Result type alias for object operations
pub type Result<T> = std::result::Result<T, ObjectError>;
