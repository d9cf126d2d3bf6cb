//! Unique token values backed by a process-wide registry

use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::LazyLock;

use dashmap::DashMap;
use tracing::trace;

/// Identifier backing a [`Symbol`]. Ids are never reused within a process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SymbolId(u32);

impl SymbolId {
    /// The raw id value (for display and diagnostics).
    pub fn as_u32(self) -> u32 {
        self.0
    }
}

static NEXT_ID: AtomicU32 = AtomicU32::new(1);

/// Descriptions for symbols created with [`Symbol::with_description`].
static DESCRIPTIONS: LazyLock<DashMap<SymbolId, String>> = LazyLock::new(DashMap::new);

/// A unique token.
///
/// Every call to [`Symbol::new`] allocates a fresh identity; two symbols
/// compare equal only when they came from the same allocation. The optional
/// description is purely informational and does not participate in equality.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Symbol(SymbolId);

impl Symbol {
    /// Allocate a fresh symbol with no description.
    pub fn new() -> Self {
        let id = SymbolId(NEXT_ID.fetch_add(1, Ordering::Relaxed));
        trace!(id = id.0, "allocated symbol");
        Symbol(id)
    }

    /// Allocate a fresh symbol carrying a description.
    pub fn with_description(description: impl Into<String>) -> Self {
        let symbol = Symbol::new();
        DESCRIPTIONS.insert(symbol.0, description.into());
        symbol
    }

    /// This symbol's id.
    pub fn id(self) -> SymbolId {
        self.0
    }

    /// The description given at allocation, if any.
    pub fn description(self) -> Option<String> {
        DESCRIPTIONS.get(&self.0).map(|entry| entry.value().clone())
    }
}

impl Default for Symbol {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.description() {
            Some(description) => write!(f, "Symbol({})", description),
            None => write!(f, "Symbol(#{})", self.0 .0),
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbols_are_unique() {
        let a = Symbol::new();
        let b = Symbol::new();
        assert_ne!(a, b);
        assert_eq!(a, a);
    }

    #[test]
    fn test_copies_are_equal() {
        let a = Symbol::with_description("token");
        let b = a;
        assert_eq!(a, b);
        assert_eq!(a.id(), b.id());
    }

    #[test]
    fn test_description_is_informational() {
        let a = Symbol::with_description("same");
        let b = Symbol::with_description("same");
        assert_ne!(a, b);
        assert_eq!(a.description().as_deref(), Some("same"));
        assert_eq!(Symbol::new().description(), None);
    }
}
