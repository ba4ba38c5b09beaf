//! Declaration AST nodes

use super::Expr;
use crate::common::Span;
use crate::types::Type;

/// Index of a declaration in [`super::Program::decls`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DeclId(pub usize);

impl DeclId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// A named variable or parameter
#[derive(Debug, Clone)]
pub struct Declaration {
    pub name: String,
    pub ty: Type,
    /// Only meaningful for images
    pub dim: Option<Dimension>,
    /// Whether the variable provably holds a value (set during type checking)
    pub initialized: bool,
    pub span: Span,
}

impl Declaration {
    pub fn new(name: impl Into<String>, ty: Type, span: Span) -> Self {
        Self {
            name: name.into(),
            ty,
            dim: None,
            initialized: false,
            span,
        }
    }

    pub fn with_dim(mut self, dim: Dimension) -> Self {
        self.dim = Some(dim);
        self
    }
}

/// Image dimension: `[width, height]`
#[derive(Debug, Clone)]
pub struct Dimension {
    pub width: Box<Expr>,
    pub height: Box<Expr>,
    pub span: Span,
}

impl Dimension {
    pub fn new(width: Expr, height: Expr, span: Span) -> Self {
        Self {
            width: Box::new(width),
            height: Box::new(height),
            span,
        }
    }
}
