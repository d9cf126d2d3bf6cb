//! Deep, idempotent immutability-marking over the object graph
//!
//! [`deep_freeze`] marks a value and every object transitively reachable
//! through its own members as immutable, exactly once per object, and
//! terminates on cyclic and aliased graphs. Primitives pass through
//! untouched. Members reachable only through the prototype link are never
//! visited.

use rustc_hash::FxHashSet;
use tracing::trace;

use crate::object::ObjectId;
use crate::value::Value;

/// Identity set of objects already processed by a traversal.
///
/// Keyed by [`ObjectId`], which is reference identity, not structural
/// equality.
/// A fresh set is created per [`deep_freeze`] call and discarded when it
/// returns; callers composing several passes over one larger graph can
/// thread their own set through [`deep_freeze_with`].
#[derive(Debug, Clone, Default)]
pub struct VisitedSet(FxHashSet<ObjectId>);

impl VisitedSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an identity as processed. Returns false if it already was.
    pub fn insert(&mut self, id: ObjectId) -> bool {
        self.0.insert(id)
    }

    /// Whether an identity has been processed.
    pub fn contains(&self, id: ObjectId) -> bool {
        self.0.contains(&id)
    }

    /// Number of identities processed.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no identity has been processed yet.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Freeze `value` and every object reachable through chains of own members.
///
/// Returns the same value: object identity is preserved, primitives come
/// back unchanged. Re-freezing is a no-op, shared and cyclic references are
/// processed exactly once, and members reachable only through the prototype
/// link are left alone.
///
/// This operation does not fail. The walk is recursive, so a non-cyclic
/// own-member chain deep enough to exhaust the call stack is out of
/// contract; cycles are fine at any size.
pub fn deep_freeze(value: &Value) -> Value {
    let mut visited = VisitedSet::new();
    deep_freeze_with(value, &mut visited);
    value.clone()
}

/// [`deep_freeze`] with a caller-supplied visited set.
///
/// Identities already in `visited` are treated as processed and skipped
/// entirely (not frozen, not recursed into), which lets embedders compose
/// several freeze passes over one externally tracked graph. The set is
/// shared across the whole traversal, not reset per branch.
pub fn deep_freeze_with(value: &Value, visited: &mut VisitedSet) {
    let Value::Object(object) = value else {
        return;
    };
    // Insert before recursing: the member walk below may lead back here.
    if !visited.insert(object.id()) {
        trace!(id = ?object.id(), "already visited, skipping");
        return;
    }
    object.freeze();
    trace!(id = ?object.id(), members = object.len(), "froze object");
    for (_, member) in object.own_entries() {
        deep_freeze_with(&member, visited);
    }
}

/// Whether `value` and every object reachable through chains of own members
/// is frozen.
///
/// Primitives are vacuously deeply frozen. Like the freeze walk itself,
/// this never follows the prototype link.
pub fn is_deeply_frozen(value: &Value) -> bool {
    fn walk(value: &Value, visited: &mut VisitedSet) -> bool {
        let Value::Object(object) = value else {
            return true;
        };
        if !visited.insert(object.id()) {
            return true;
        }
        object.is_frozen()
            && object
                .own_entries()
                .iter()
                .all(|(_, member)| walk(member, visited))
    }
    walk(value, &mut VisitedSet::new())
}
