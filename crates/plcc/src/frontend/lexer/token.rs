//! Token definitions for the PLC lexer

use crate::common::Span;
use crate::frontend::ast::{Channel, ColorConst, ImageProp};
use crate::types::Type;
use logos::Logos;

/// Token with source location
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }
}

/// All token kinds in PLC
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\n\r\f]+")]  // Skip whitespace
#[logos(skip r"#[^\n]*")]       // Skip comments
pub enum TokenKind {
    // === Keywords ===
    #[token("int", |_| Type::Int)]
    #[token("float", |_| Type::Float)]
    #[token("string", |_| Type::String)]
    #[token("boolean", |_| Type::Boolean)]
    #[token("color", |_| Type::Color)]
    #[token("image", |_| Type::Image)]
    TypeName(Type),
    #[token("void")]
    Void,
    #[token("if")]
    If,
    #[token("else")]
    Else,
    #[token("fi")]
    Fi,
    #[token("write")]
    Write,
    #[token("console")]
    Console,

    // === Builtin names ===
    #[token("getRed", |_| Channel::Red)]
    #[token("getGreen", |_| Channel::Green)]
    #[token("getBlue", |_| Channel::Blue)]
    ColorOp(Channel),
    #[token("getWidth", |_| ImageProp::Width)]
    #[token("getHeight", |_| ImageProp::Height)]
    ImageOp(ImageProp),
    #[regex(
        r"BLACK|BLUE|CYAN|DARK_GRAY|GRAY|GREEN|LIGHT_GRAY|MAGENTA|ORANGE|PINK|RED|WHITE|YELLOW",
        |lex| ColorConst::from_name(lex.slice()),
        priority = 10
    )]
    ColorConst(ColorConst),

    // === Identifiers ===
    #[regex(r"[a-zA-Z_$][a-zA-Z0-9_$]*", |lex| lex.slice().to_string())]
    Identifier(String),

    // === Literals ===
    #[token("true", |_| true)]
    #[token("false", |_| false)]
    BoolLiteral(bool),

    #[regex(r"[0-9]+", |lex| lex.slice().to_string())]
    IntLiteral(String),

    #[regex(r"[0-9]+\.[0-9]+", |lex| lex.slice().to_string())]
    FloatLiteral(String),

    #[regex(r#""([^"\\]|\\.)*""#, |lex| lex.slice().to_string())]
    StringLiteral(String),

    // === Operators ===
    // Arithmetic
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,

    // Comparison
    #[token("==")]
    EqEq,
    #[token("!=")]
    NotEq,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token("<=")]
    LtEq,
    #[token(">=")]
    GtEq,

    // Logical
    #[token("&")]
    Amp,
    #[token("|")]
    Pipe,
    #[token("!")]
    Bang,

    // Assignment and I/O
    #[token("=")]
    Eq,
    #[token("<-")]
    LArrow,
    #[token("->")]
    RArrow,
    #[token("^")]
    Caret,

    // === Delimiters ===
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("<<")]
    LAngle,
    #[token(">>")]
    RAngle,
    #[token(",")]
    Comma,
    #[token(";")]
    Semi,

    // Special
    Eof,
}

impl TokenKind {
    /// Check if this token can start a declaration
    pub fn can_start_declaration(&self) -> bool {
        matches!(self, TokenKind::TypeName(_))
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenKind::TypeName(ty) => write!(f, "type '{}'", ty),
            TokenKind::Void => write!(f, "'void'"),
            TokenKind::If => write!(f, "'if'"),
            TokenKind::Else => write!(f, "'else'"),
            TokenKind::Fi => write!(f, "'fi'"),
            TokenKind::Write => write!(f, "'write'"),
            TokenKind::Console => write!(f, "'console'"),
            TokenKind::ColorOp(c) => write!(f, "'{}'", c.as_str()),
            TokenKind::ImageOp(p) => write!(f, "'{}'", p.as_str()),
            TokenKind::ColorConst(c) => write!(f, "color constant {:?}", c),
            TokenKind::Identifier(s) => write!(f, "identifier '{}'", s),
            TokenKind::BoolLiteral(b) => write!(f, "boolean '{}'", b),
            TokenKind::IntLiteral(s) => write!(f, "integer '{}'", s),
            TokenKind::FloatLiteral(s) => write!(f, "float '{}'", s),
            TokenKind::StringLiteral(s) => write!(f, "string {}", s),
            TokenKind::Plus => write!(f, "'+'"),
            TokenKind::Minus => write!(f, "'-'"),
            TokenKind::Star => write!(f, "'*'"),
            TokenKind::Slash => write!(f, "'/'"),
            TokenKind::Percent => write!(f, "'%'"),
            TokenKind::EqEq => write!(f, "'=='"),
            TokenKind::NotEq => write!(f, "'!='"),
            TokenKind::Lt => write!(f, "'<'"),
            TokenKind::Gt => write!(f, "'>'"),
            TokenKind::LtEq => write!(f, "'<='"),
            TokenKind::GtEq => write!(f, "'>='"),
            TokenKind::Amp => write!(f, "'&'"),
            TokenKind::Pipe => write!(f, "'|'"),
            TokenKind::Bang => write!(f, "'!'"),
            TokenKind::Eq => write!(f, "'='"),
            TokenKind::LArrow => write!(f, "'<-'"),
            TokenKind::RArrow => write!(f, "'->'"),
            TokenKind::Caret => write!(f, "'^'"),
            TokenKind::LParen => write!(f, "'('"),
            TokenKind::RParen => write!(f, "')'"),
            TokenKind::LBracket => write!(f, "'['"),
            TokenKind::RBracket => write!(f, "']'"),
            TokenKind::LAngle => write!(f, "'<<'"),
            TokenKind::RAngle => write!(f, "'>>'"),
            TokenKind::Comma => write!(f, "','"),
            TokenKind::Semi => write!(f, "';'"),
            TokenKind::Eof => write!(f, "end of file"),
        }
    }
}
