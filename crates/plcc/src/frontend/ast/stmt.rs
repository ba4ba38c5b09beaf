//! Statement AST nodes

use super::{DeclId, Expr, PixelSelector};
use crate::common::Span;

/// Statement node
#[derive(Debug, Clone)]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: Span,
}

impl Stmt {
    pub fn new(kind: StmtKind, span: Span) -> Self {
        Self { kind, span }
    }
}

/// Statement kinds
#[derive(Debug, Clone)]
pub enum StmtKind {
    /// Variable declaration: `int x = 3`, `image[w, h] im`, `string s <- console`
    VarDecl {
        decl: DeclId,
        init: Option<Initializer>,
    },

    /// Assignment: `x = e`, `im[x, y] = e`
    Assign {
        target: Target,
        value: Expr,
    },

    /// Read: `x <- console`
    Read {
        target: Target,
        source: Expr,
    },

    /// Write: `e -> console`
    Write {
        source: Expr,
        dest: Expr,
    },

    /// Return: `^ e`
    Return(Expr),
}

/// Left-hand side of an assignment or read
#[derive(Debug, Clone)]
pub struct Target {
    pub name: String,
    pub selector: Option<PixelSelector>,
    /// Resolved declaration (filled in during type checking)
    pub decl: Option<DeclId>,
    pub span: Span,
}

impl Target {
    pub fn new(name: impl Into<String>, selector: Option<PixelSelector>, span: Span) -> Self {
        Self {
            name: name.into(),
            selector,
            decl: None,
            span,
        }
    }
}

/// Declaration initializer
#[derive(Debug, Clone)]
pub struct Initializer {
    pub op: InitOp,
    pub expr: Expr,
}

/// How a declaration receives its initial value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitOp {
    /// `=`
    Assign,
    /// `<-`, read from the console or a file
    Read,
}

impl InitOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            InitOp::Assign => "=",
            InitOp::Read => "<-",
        }
    }
}
