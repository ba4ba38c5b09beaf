//! Expression AST nodes

use super::DeclId;
use crate::common::Span;
use crate::types::Type;

/// Expression node
#[derive(Debug, Clone)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
    /// Type of this expression (filled in during type checking)
    pub ty: Option<Type>,
    /// Type the code generator must convert this value to before its
    /// parent uses it (filled in during type checking)
    pub coerce_to: Option<Type>,
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Self {
            kind,
            span,
            ty: None,
            coerce_to: None,
        }
    }

    /// The type this value has once its coercion, if any, is applied
    pub fn effective_type(&self) -> Option<Type> {
        self.coerce_to.or(self.ty)
    }

    /// Declaration this identifier resolved to, if any
    pub fn resolved_decl(&self) -> Option<DeclId> {
        match &self.kind {
            ExprKind::Identifier { binding: Some(Binding::Decl(id)), .. } => Some(*id),
            _ => None,
        }
    }
}

/// Expression kinds
#[derive(Debug, Clone)]
pub enum ExprKind {
    /// Boolean literal: true, false
    BoolLiteral(bool),

    /// Integer literal: 42
    IntLiteral(i64),

    /// Float literal: 3.14
    FloatLiteral(f64),

    /// String literal: "hello"
    StringLiteral(String),

    /// Predefined color: RED, DARK_GRAY
    ColorConst(ColorConst),

    /// The `console` endpoint
    Console,

    /// Color construction: << r, g, b >>
    Color {
        red: Box<Expr>,
        green: Box<Expr>,
        blue: Box<Expr>,
    },

    /// Conditional: if (c) a else b fi
    Conditional {
        condition: Box<Expr>,
        then_expr: Box<Expr>,
        else_expr: Box<Expr>,
    },

    /// Prefix operation: !b, -x, getRed c, getWidth im
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },

    /// Pixel read: im[x, y]
    PixelAccess {
        image: Box<Expr>,
        selector: PixelSelector,
    },

    /// Binary operation: a + b, x < y
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },

    /// Identifier: foo
    Identifier {
        name: String,
        /// What the name resolved to (filled in during type checking)
        binding: Option<Binding>,
    },
}

/// Resolution of an identifier reference
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Binding {
    /// A program parameter or declared variable
    Decl(DeclId),
    /// A per-pixel coordinate named by `im[x, y] = ...`
    PixelCoordinate,
}

/// Coordinate pair: `[x, y]`
#[derive(Debug, Clone)]
pub struct PixelSelector {
    pub x: Box<Expr>,
    pub y: Box<Expr>,
    pub span: Span,
}

impl PixelSelector {
    pub fn new(x: Expr, y: Expr, span: Span) -> Self {
        Self {
            x: Box::new(x),
            y: Box::new(y),
            span,
        }
    }
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    // Logical
    And,
    Or,

    // Equality
    Eq,
    Ne,

    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    Mod,

    // Relational
    Lt,
    Le,
    Gt,
    Ge,
}

/// Rule table a binary operator is checked against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpClass {
    Logical,
    Equality,
    Additive,
    Multiplicative,
    Relational,
}

impl BinaryOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            BinaryOp::And => "&",
            BinaryOp::Or => "|",
            BinaryOp::Eq => "==",
            BinaryOp::Ne => "!=",
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Mod => "%",
            BinaryOp::Lt => "<",
            BinaryOp::Le => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::Ge => ">=",
        }
    }

    pub fn class(&self) -> OpClass {
        match self {
            BinaryOp::And | BinaryOp::Or => OpClass::Logical,
            BinaryOp::Eq | BinaryOp::Ne => OpClass::Equality,
            BinaryOp::Add | BinaryOp::Sub => OpClass::Additive,
            BinaryOp::Mul | BinaryOp::Div | BinaryOp::Mod => OpClass::Multiplicative,
            BinaryOp::Lt | BinaryOp::Le | BinaryOp::Gt | BinaryOp::Ge => OpClass::Relational,
        }
    }
}

/// Unary prefix operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    /// `!`
    Not,
    /// `-`
    Neg,
    /// Channel extraction: getRed, getGreen, getBlue
    Channel(Channel),
    /// Image property: getWidth, getHeight
    Image(ImageProp),
}

impl UnaryOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnaryOp::Not => "!",
            UnaryOp::Neg => "-",
            UnaryOp::Channel(c) => c.as_str(),
            UnaryOp::Image(p) => p.as_str(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Red,
    Green,
    Blue,
}

impl Channel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Channel::Red => "getRed",
            Channel::Green => "getGreen",
            Channel::Blue => "getBlue",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageProp {
    Width,
    Height,
}

impl ImageProp {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageProp::Width => "getWidth",
            ImageProp::Height => "getHeight",
        }
    }
}

/// Predefined color constants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorConst {
    Black,
    Blue,
    Cyan,
    DarkGray,
    Gray,
    Green,
    LightGray,
    Magenta,
    Orange,
    Pink,
    Red,
    White,
    Yellow,
}

impl ColorConst {
    pub fn from_name(name: &str) -> Option<Self> {
        let color = match name {
            "BLACK" => ColorConst::Black,
            "BLUE" => ColorConst::Blue,
            "CYAN" => ColorConst::Cyan,
            "DARK_GRAY" => ColorConst::DarkGray,
            "GRAY" => ColorConst::Gray,
            "GREEN" => ColorConst::Green,
            "LIGHT_GRAY" => ColorConst::LightGray,
            "MAGENTA" => ColorConst::Magenta,
            "ORANGE" => ColorConst::Orange,
            "PINK" => ColorConst::Pink,
            "RED" => ColorConst::Red,
            "WHITE" => ColorConst::White,
            "YELLOW" => ColorConst::Yellow,
            _ => return None,
        };
        Some(color)
    }
}
