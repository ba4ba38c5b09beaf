//! Flat symbol table
//!
//! A PLC program has exactly one declarative scope, shared by its
//! parameters and its body, so the table is a single map that never
//! shrinks.

use crate::frontend::ast::DeclId;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use string_interner::{DefaultStringInterner, DefaultSymbol};

/// Name to declaration registry for one program check
#[derive(Debug, Default)]
pub struct SymbolTable {
    names: DefaultStringInterner,
    bindings: HashMap<DefaultSymbol, DeclId>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `name` to `decl`. Returns false, leaving the table unchanged,
    /// if the name is already bound.
    pub fn insert(&mut self, name: &str, decl: DeclId) -> bool {
        let symbol = self.names.get_or_intern(name);
        match self.bindings.entry(symbol) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(decl);
                true
            }
        }
    }

    pub fn lookup(&self, name: &str) -> Option<DeclId> {
        let symbol = self.names.get(name)?;
        self.bindings.get(&symbol).copied()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_insert_then_lookup() {
        let mut table = SymbolTable::new();
        assert!(table.is_empty());
        assert!(table.insert("width", DeclId(0)));
        assert!(table.insert("height", DeclId(1)));

        assert_eq!(table.lookup("width"), Some(DeclId(0)));
        assert_eq!(table.lookup("height"), Some(DeclId(1)));
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_duplicate_insert_is_rejected() {
        let mut table = SymbolTable::new();
        assert!(table.insert("im", DeclId(3)));
        assert!(!table.insert("im", DeclId(4)));

        assert_eq!(table.lookup("im"), Some(DeclId(3)));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_lookup_unknown_name() {
        let mut table = SymbolTable::new();
        table.insert("a", DeclId(0));
        assert_eq!(table.lookup("b"), None);
        assert_eq!(table.lookup(""), None);
    }
}
