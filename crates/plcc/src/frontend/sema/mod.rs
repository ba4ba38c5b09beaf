//! Semantic analysis module
//!
//! This module resolves names, type checks every expression and statement,
//! and records the coercions the code generator must apply.

mod symbol_table;
mod checker;
pub mod rules;

pub use symbol_table::SymbolTable;
pub use checker::TypeChecker;
