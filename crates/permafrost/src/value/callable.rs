//! Callable values without attached state

use std::fmt;
use std::sync::Arc;

use super::Value;

/// Type alias for native function pointers to reduce complexity
pub type NativeFnPtr = Arc<dyn Fn(&[Value]) -> Result<Value, String> + Send + Sync>;

/// A native Rust function exposed to the object graph.
///
/// A bare `NativeFn` has no property table, so the freeze traversal treats
/// it as a primitive. [`crate::ObjectRef::function`] attaches one to an
/// object when callable-with-state semantics are needed.
#[derive(Clone)]
pub struct NativeFn {
    /// Function name (for display/debugging)
    pub name: String,

    /// The actual function pointer
    pub func: NativeFnPtr,
}

impl NativeFn {
    /// Create a native function from a closure.
    pub fn new(
        name: impl Into<String>,
        func: impl Fn(&[Value]) -> Result<Value, String> + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            func: Arc::new(func),
        }
    }

    /// Invoke the function.
    ///
    /// # Errors
    ///
    /// Whatever error string the underlying closure reports.
    pub fn call(&self, args: &[Value]) -> Result<Value, String> {
        (self.func)(args)
    }

    /// Whether two values share the same underlying function allocation.
    pub fn ptr_eq(&self, other: &NativeFn) -> bool {
        std::ptr::eq(
            Arc::as_ptr(&self.func) as *const (),
            Arc::as_ptr(&other.func) as *const (),
        )
    }
}

impl fmt::Debug for NativeFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NativeFn({})", self.name)
    }
}
