//! Value representation for the object graph

mod callable;
mod display;
mod impls;

pub use callable::{NativeFn, NativeFnPtr};

use std::sync::Arc;

use crate::object::ObjectRef;
use crate::symbol::Symbol;

/// A value in the graph.
///
/// Values fall into two categories for the freeze traversal:
/// - Opaque primitives (everything except `Object`): returned untouched,
///   never marked, never recursed into
/// - Structural objects: marked immutable and walked member by member
#[derive(Clone)]
pub enum Value {
    // ═══════════════════════════════════════════════════════════════════
    // Tier 1: Inline Primitives
    // ═══════════════════════════════════════════════════════════════════
    /// The absence-of-value marker
    Null,

    /// Boolean: `true` or `false`
    Bool(bool),

    /// 64-bit signed integer (default integer type)
    Int(i64),

    /// 128-bit integer, for values beyond the `i64` range
    BigInt(i128),

    /// 64-bit floating point
    Float(f64),

    /// Unique token (see [`Symbol`])
    Symbol(Symbol),

    // ═══════════════════════════════════════════════════════════════════
    // Tier 2: Heap Primitives
    // ═══════════════════════════════════════════════════════════════════
    /// Heap-allocated string
    Str(Arc<String>),

    // ═══════════════════════════════════════════════════════════════════
    // Tier 3: Callables Without Attached State
    // ═══════════════════════════════════════════════════════════════════
    /// Bare native function; carries no members, so it is opaque to the
    /// traversal. Wrap one with [`ObjectRef::function`] to get a callable
    /// object with state.
    NativeFn(NativeFn),

    // ═══════════════════════════════════════════════════════════════════
    // Structural
    // ═══════════════════════════════════════════════════════════════════
    /// Shared object handle; the only freezable category
    Object(ObjectRef),
}
