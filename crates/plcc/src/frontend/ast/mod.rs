//! Abstract Syntax Tree definitions
//!
//! Expression nodes carry two annotation slots, `ty` and `coerce_to`,
//! written by the type checker. Declarations live in a per-program arena
//! and are referenced by [`DeclId`].

mod expr;
mod stmt;
mod decl;

pub use expr::*;
pub use stmt::*;
pub use decl::*;

use crate::common::Span;
use crate::types::Type;

/// A complete PLC program
#[derive(Debug, Clone)]
pub struct Program {
    pub name: String,
    /// `None` for a `void` program
    pub return_type: Option<Type>,
    pub params: Vec<DeclId>,
    /// Declaration arena; every `DeclId` in the tree indexes into it
    pub decls: Vec<Declaration>,
    pub body: Vec<Stmt>,
    pub span: Span,
}

impl Program {
    pub fn new(name: impl Into<String>, return_type: Option<Type>, span: Span) -> Self {
        Self {
            name: name.into(),
            return_type,
            params: Vec::new(),
            decls: Vec::new(),
            body: Vec::new(),
            span,
        }
    }

    /// Move a declaration into the arena and return its id
    pub fn declare(&mut self, decl: Declaration) -> DeclId {
        let id = DeclId(self.decls.len());
        self.decls.push(decl);
        id
    }

    pub fn decl(&self, id: DeclId) -> Option<&Declaration> {
        self.decls.get(id.index())
    }

    /// Find the declaration introduced under `name`
    pub fn decl_named(&self, name: &str) -> Option<(DeclId, &Declaration)> {
        self.decls
            .iter()
            .enumerate()
            .find(|(_, d)| d.name == name)
            .map(|(i, d)| (DeclId(i), d))
    }
}
