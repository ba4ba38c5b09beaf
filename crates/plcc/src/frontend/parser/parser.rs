//! Recursive descent parser for PLC

use crate::common::{CompileError, CompileResult, Span};
use crate::frontend::ast::*;
use crate::frontend::lexer::{Lexer, Token, TokenKind};

/// Recursive descent parser for PLC
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
}

impl<'a> Parser<'a> {
    /// Create a new parser for the given source
    pub fn new(source: &'a str) -> CompileResult<Self> {
        let mut lexer = Lexer::new(source);
        let current = lexer.next_token()?;
        Ok(Self { lexer, current })
    }

    /// Parse a complete program
    pub fn parse(&mut self) -> CompileResult<Program> {
        let start_span = self.current.span;

        let return_type = match self.current.kind {
            TokenKind::TypeName(ty) => Some(ty),
            TokenKind::Void => None,
            _ => {
                return Err(CompileError::parser(
                    format!("expected return type, found {}", self.current.kind),
                    self.current.span,
                ));
            }
        };
        self.advance()?;

        let (name, _) = self.expect_identifier()?;
        let mut program = Program::new(name, return_type, start_span);

        self.expect(TokenKind::LParen)?;
        if !self.check(&TokenKind::RParen) {
            loop {
                let param = self.parse_name_def()?;
                let id = program.declare(param);
                program.params.push(id);
                if !self.match_token(&TokenKind::Comma)? {
                    break;
                }
            }
        }
        self.expect(TokenKind::RParen)?;

        while !self.at_end() {
            let stmt = if self.current.kind.can_start_declaration() {
                self.parse_declaration(&mut program)?
            } else {
                self.parse_statement()?
            };
            program.body.push(stmt);
            self.expect(TokenKind::Semi)?;
        }

        program.span = start_span.merge(self.current.span);
        Ok(program)
    }

    // =========================================================================
    // Helper methods
    // =========================================================================

    fn at_end(&self) -> bool {
        matches!(self.current.kind, TokenKind::Eof)
    }

    fn advance(&mut self) -> CompileResult<Token> {
        let prev = std::mem::replace(&mut self.current, self.lexer.next_token()?);
        Ok(prev)
    }

    fn check(&self, kind: &TokenKind) -> bool {
        std::mem::discriminant(&self.current.kind) == std::mem::discriminant(kind)
    }

    fn match_token(&mut self, kind: &TokenKind) -> CompileResult<bool> {
        if self.check(kind) {
            self.advance()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    fn expect(&mut self, kind: TokenKind) -> CompileResult<Token> {
        if self.check(&kind) {
            self.advance()
        } else {
            Err(CompileError::parser(
                format!("expected {}, found {}", kind, self.current.kind),
                self.current.span,
            ))
        }
    }

    fn expect_identifier(&mut self) -> CompileResult<(String, Span)> {
        match &self.current.kind {
            TokenKind::Identifier(name) => {
                let name = name.clone();
                let span = self.advance()?.span;
                Ok((name, span))
            }
            _ => Err(CompileError::parser(
                format!("expected identifier, found {}", self.current.kind),
                self.current.span,
            )),
        }
    }

    // =========================================================================
    // Declarations
    // =========================================================================

    /// NameDef ::= Type IDENT | Type Dimension IDENT
    fn parse_name_def(&mut self) -> CompileResult<Declaration> {
        let start_span = self.current.span;
        let ty = match self.current.kind {
            TokenKind::TypeName(ty) => ty,
            _ => {
                return Err(CompileError::parser(
                    format!("expected type, found {}", self.current.kind),
                    self.current.span,
                ));
            }
        };
        self.advance()?;

        let dim = if self.check(&TokenKind::LBracket) {
            let (width, height, span) = self.parse_coordinate_pair()?;
            Some(Dimension::new(width, height, span))
        } else {
            None
        };

        let (name, name_span) = self.expect_identifier()?;
        let mut decl = Declaration::new(name, ty, start_span.merge(name_span));
        if let Some(dim) = dim {
            decl = decl.with_dim(dim);
        }
        Ok(decl)
    }

    /// Declaration ::= NameDef (('=' | '<-') Expr)?
    fn parse_declaration(&mut self, program: &mut Program) -> CompileResult<Stmt> {
        let decl = self.parse_name_def()?;
        let mut span = decl.span;
        let id = program.declare(decl);

        let op = match self.current.kind {
            TokenKind::Eq => Some(InitOp::Assign),
            TokenKind::LArrow => Some(InitOp::Read),
            _ => None,
        };

        let init = match op {
            Some(op) => {
                self.advance()?;
                let expr = self.parse_expression()?;
                span = span.merge(expr.span);
                Some(Initializer { op, expr })
            }
            None => None,
        };

        Ok(Stmt::new(StmtKind::VarDecl { decl: id, init }, span))
    }

    // =========================================================================
    // Statements
    // =========================================================================

    fn parse_statement(&mut self) -> CompileResult<Stmt> {
        let start_span = self.current.span;

        match &self.current.kind {
            TokenKind::Identifier(_) => {
                let (name, name_span) = self.expect_identifier()?;
                let selector = if self.check(&TokenKind::LBracket) {
                    Some(self.parse_pixel_selector()?)
                } else {
                    None
                };
                let target_span = selector
                    .as_ref()
                    .map_or(name_span, |s| name_span.merge(s.span));
                let target = Target::new(name, selector, target_span);

                if self.match_token(&TokenKind::Eq)? {
                    let value = self.parse_expression()?;
                    let span = start_span.merge(value.span);
                    Ok(Stmt::new(StmtKind::Assign { target, value }, span))
                } else if self.match_token(&TokenKind::LArrow)? {
                    let source = self.parse_expression()?;
                    let span = start_span.merge(source.span);
                    Ok(Stmt::new(StmtKind::Read { target, source }, span))
                } else {
                    Err(CompileError::parser(
                        format!("expected '=' or '<-', found {}", self.current.kind),
                        self.current.span,
                    ))
                }
            }
            TokenKind::Write => {
                self.advance()?;
                let source = self.parse_expression()?;
                self.expect(TokenKind::RArrow)?;
                let dest = self.parse_expression()?;
                let span = start_span.merge(dest.span);
                Ok(Stmt::new(StmtKind::Write { source, dest }, span))
            }
            TokenKind::Caret => {
                self.advance()?;
                let value = self.parse_expression()?;
                let span = start_span.merge(value.span);
                Ok(Stmt::new(StmtKind::Return(value), span))
            }
            _ => Err(CompileError::parser(
                format!("expected declaration or statement, found {}", self.current.kind),
                self.current.span,
            )),
        }
    }

    // =========================================================================
    // Expressions
    // =========================================================================

    fn parse_expression(&mut self) -> CompileResult<Expr> {
        if self.check(&TokenKind::If) {
            self.parse_conditional_expression()
        } else {
            self.parse_logical_or_expression()
        }
    }

    fn parse_conditional_expression(&mut self) -> CompileResult<Expr> {
        let start_span = self.expect(TokenKind::If)?.span;
        self.expect(TokenKind::LParen)?;
        let condition = self.parse_expression()?;
        self.expect(TokenKind::RParen)?;
        let then_expr = self.parse_expression()?;
        self.expect(TokenKind::Else)?;
        let else_expr = self.parse_expression()?;
        let end_span = self.expect(TokenKind::Fi)?.span;

        Ok(Expr::new(
            ExprKind::Conditional {
                condition: Box::new(condition),
                then_expr: Box::new(then_expr),
                else_expr: Box::new(else_expr),
            },
            start_span.merge(end_span),
        ))
    }

    fn parse_logical_or_expression(&mut self) -> CompileResult<Expr> {
        let mut left = self.parse_logical_and_expression()?;

        while self.match_token(&TokenKind::Pipe)? {
            let right = self.parse_logical_and_expression()?;
            left = binary(BinaryOp::Or, left, right);
        }

        Ok(left)
    }

    fn parse_logical_and_expression(&mut self) -> CompileResult<Expr> {
        let mut left = self.parse_comparison_expression()?;

        while self.match_token(&TokenKind::Amp)? {
            let right = self.parse_comparison_expression()?;
            left = binary(BinaryOp::And, left, right);
        }

        Ok(left)
    }

    fn parse_comparison_expression(&mut self) -> CompileResult<Expr> {
        let mut left = self.parse_additive_expression()?;

        loop {
            let op = match &self.current.kind {
                TokenKind::Lt => BinaryOp::Lt,
                TokenKind::Gt => BinaryOp::Gt,
                TokenKind::LtEq => BinaryOp::Le,
                TokenKind::GtEq => BinaryOp::Ge,
                TokenKind::EqEq => BinaryOp::Eq,
                TokenKind::NotEq => BinaryOp::Ne,
                _ => break,
            };
            self.advance()?;
            let right = self.parse_additive_expression()?;
            left = binary(op, left, right);
        }

        Ok(left)
    }

    fn parse_additive_expression(&mut self) -> CompileResult<Expr> {
        let mut left = self.parse_multiplicative_expression()?;

        loop {
            let op = match &self.current.kind {
                TokenKind::Plus => BinaryOp::Add,
                TokenKind::Minus => BinaryOp::Sub,
                _ => break,
            };
            self.advance()?;
            let right = self.parse_multiplicative_expression()?;
            left = binary(op, left, right);
        }

        Ok(left)
    }

    fn parse_multiplicative_expression(&mut self) -> CompileResult<Expr> {
        let mut left = self.parse_unary_expression()?;

        loop {
            let op = match &self.current.kind {
                TokenKind::Star => BinaryOp::Mul,
                TokenKind::Slash => BinaryOp::Div,
                TokenKind::Percent => BinaryOp::Mod,
                _ => break,
            };
            self.advance()?;
            let right = self.parse_unary_expression()?;
            left = binary(op, left, right);
        }

        Ok(left)
    }

    fn parse_unary_expression(&mut self) -> CompileResult<Expr> {
        let start_span = self.current.span;

        let op = match self.current.kind {
            TokenKind::Bang => UnaryOp::Not,
            TokenKind::Minus => UnaryOp::Neg,
            TokenKind::ColorOp(channel) => UnaryOp::Channel(channel),
            TokenKind::ImageOp(prop) => UnaryOp::Image(prop),
            _ => return self.parse_postfix_expression(),
        };
        self.advance()?;

        let operand = self.parse_unary_expression()?;
        let span = start_span.merge(operand.span);
        Ok(Expr::new(
            ExprKind::Unary {
                op,
                operand: Box::new(operand),
            },
            span,
        ))
    }

    fn parse_postfix_expression(&mut self) -> CompileResult<Expr> {
        let expr = self.parse_primary_expression()?;

        if self.check(&TokenKind::LBracket) {
            let selector = self.parse_pixel_selector()?;
            let span = expr.span.merge(selector.span);
            Ok(Expr::new(
                ExprKind::PixelAccess {
                    image: Box::new(expr),
                    selector,
                },
                span,
            ))
        } else {
            Ok(expr)
        }
    }

    fn parse_primary_expression(&mut self) -> CompileResult<Expr> {
        let span = self.current.span;

        match &self.current.kind {
            TokenKind::BoolLiteral(value) => {
                let value = *value;
                self.advance()?;
                Ok(Expr::new(ExprKind::BoolLiteral(value), span))
            }
            TokenKind::IntLiteral(s) => {
                let value = self.parse_int_literal(s)?;
                self.advance()?;
                Ok(Expr::new(ExprKind::IntLiteral(value), span))
            }
            TokenKind::FloatLiteral(s) => {
                let value = self.parse_float_literal(s)?;
                self.advance()?;
                Ok(Expr::new(ExprKind::FloatLiteral(value), span))
            }
            TokenKind::StringLiteral(s) => {
                let value = self.parse_string_literal(s)?;
                self.advance()?;
                Ok(Expr::new(ExprKind::StringLiteral(value), span))
            }
            TokenKind::ColorConst(color) => {
                let color = *color;
                self.advance()?;
                Ok(Expr::new(ExprKind::ColorConst(color), span))
            }
            TokenKind::Console => {
                self.advance()?;
                Ok(Expr::new(ExprKind::Console, span))
            }
            TokenKind::Identifier(name) => {
                let name = name.clone();
                self.advance()?;
                Ok(Expr::new(ExprKind::Identifier { name, binding: None }, span))
            }
            TokenKind::LParen => {
                self.advance()?;
                let expr = self.parse_expression()?;
                self.expect(TokenKind::RParen)?;
                Ok(expr)
            }
            TokenKind::LAngle => {
                self.advance()?;
                let red = self.parse_expression()?;
                self.expect(TokenKind::Comma)?;
                let green = self.parse_expression()?;
                self.expect(TokenKind::Comma)?;
                let blue = self.parse_expression()?;
                let end_span = self.expect(TokenKind::RAngle)?.span;
                Ok(Expr::new(
                    ExprKind::Color {
                        red: Box::new(red),
                        green: Box::new(green),
                        blue: Box::new(blue),
                    },
                    span.merge(end_span),
                ))
            }
            _ => Err(CompileError::parser(
                format!("unexpected token in expression: {}", self.current.kind),
                span,
            )),
        }
    }

    /// PixelSelector ::= '[' Expr ',' Expr ']'
    fn parse_pixel_selector(&mut self) -> CompileResult<PixelSelector> {
        let (x, y, span) = self.parse_coordinate_pair()?;
        Ok(PixelSelector::new(x, y, span))
    }

    /// Shared shape of pixel selectors and dimensions
    fn parse_coordinate_pair(&mut self) -> CompileResult<(Expr, Expr, Span)> {
        let start_span = self.expect(TokenKind::LBracket)?.span;
        let first = self.parse_expression()?;
        self.expect(TokenKind::Comma)?;
        let second = self.parse_expression()?;
        let end_span = self.expect(TokenKind::RBracket)?.span;
        Ok((first, second, start_span.merge(end_span)))
    }

    // =========================================================================
    // Literal parsing helpers
    // =========================================================================

    fn parse_int_literal(&self, s: &str) -> CompileResult<i64> {
        s.parse().map_err(|_| {
            CompileError::parser(format!("invalid integer literal: {}", s), self.current.span)
        })
    }

    fn parse_float_literal(&self, s: &str) -> CompileResult<f64> {
        s.parse().map_err(|_| {
            CompileError::parser(format!("invalid float literal: {}", s), self.current.span)
        })
    }

    fn parse_string_literal(&self, s: &str) -> CompileResult<String> {
        let inner = &s[1..s.len() - 1]; // Remove quotes
        let mut result = String::new();
        let mut chars = inner.chars();

        while let Some(c) = chars.next() {
            if c != '\\' {
                result.push(c);
                continue;
            }
            let escaped = match chars.next() {
                Some('b') => '\u{8}',
                Some('t') => '\t',
                Some('n') => '\n',
                Some('f') => '\u{c}',
                Some('r') => '\r',
                Some('"') => '"',
                Some('\'') => '\'',
                Some('\\') => '\\',
                other => {
                    return Err(CompileError::parser(
                        format!("invalid escape sequence '\\{}'", other.map(String::from).unwrap_or_default()),
                        self.current.span,
                    ));
                }
            };
            result.push(escaped);
        }

        Ok(result)
    }
}

fn binary(op: BinaryOp, left: Expr, right: Expr) -> Expr {
    let span = left.span.merge(right.span);
    Expr::new(
        ExprKind::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        },
        span,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Type;
    use pretty_assertions::assert_eq;

    fn parse(source: &str) -> Program {
        Parser::new(source).unwrap().parse().unwrap()
    }

    #[test]
    fn test_parse_program_header() {
        let program = parse("int f(int a, image[10, 20] b) ^ a;");

        assert_eq!(program.name, "f");
        assert_eq!(program.return_type, Some(Type::Int));
        assert_eq!(program.params.len(), 2);
        let b = program.decl(program.params[1]).unwrap();
        assert_eq!(b.name, "b");
        assert_eq!(b.ty, Type::Image);
        assert!(b.dim.is_some());
        assert_eq!(program.body.len(), 1);
    }

    #[test]
    fn test_parse_void_program() {
        let program = parse("void main()");
        assert_eq!(program.return_type, None);
        assert!(program.params.is_empty());
        assert!(program.body.is_empty());
    }

    #[test]
    fn test_parse_declarations() {
        let program = parse("void p() int x = 3; string s <- console; image[2, 3] im;");

        assert_eq!(program.decls.len(), 3);
        match &program.body[0].kind {
            StmtKind::VarDecl { decl, init: Some(init) } => {
                assert_eq!(program.decl(*decl).unwrap().name, "x");
                assert_eq!(init.op, InitOp::Assign);
            }
            other => panic!("expected initialized declaration, got {:?}", other),
        }
        match &program.body[1].kind {
            StmtKind::VarDecl { init: Some(init), .. } => {
                assert_eq!(init.op, InitOp::Read);
                assert!(matches!(init.expr.kind, ExprKind::Console));
            }
            other => panic!("expected read declaration, got {:?}", other),
        }
        match &program.body[2].kind {
            StmtKind::VarDecl { decl, init: None } => {
                assert!(program.decl(*decl).unwrap().dim.is_some());
            }
            other => panic!("expected bare declaration, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_statements() {
        let program = parse("void p() a = 1; im[x, y] = RED; a <- console; write a -> console; ^ a;");

        assert!(matches!(&program.body[0].kind, StmtKind::Assign { target, .. } if target.selector.is_none()));
        assert!(matches!(&program.body[1].kind, StmtKind::Assign { target, .. } if target.selector.is_some()));
        assert!(matches!(program.body[2].kind, StmtKind::Read { .. }));
        assert!(matches!(program.body[3].kind, StmtKind::Write { .. }));
        assert!(matches!(program.body[4].kind, StmtKind::Return(_)));
    }

    #[test]
    fn test_precedence() {
        let program = parse("void p() x = 1 + 2 * 3 < 4 & true | false;");
        let StmtKind::Assign { value, .. } = &program.body[0].kind else {
            panic!("expected assignment");
        };

        // ((((1 + (2 * 3)) < 4) & true) | false)
        let ExprKind::Binary { op: BinaryOp::Or, left, .. } = &value.kind else {
            panic!("expected '|' at the root");
        };
        let ExprKind::Binary { op: BinaryOp::And, left, .. } = &left.kind else {
            panic!("expected '&' below '|'");
        };
        let ExprKind::Binary { op: BinaryOp::Lt, left, .. } = &left.kind else {
            panic!("expected '<' below '&'");
        };
        let ExprKind::Binary { op: BinaryOp::Add, right, .. } = &left.kind else {
            panic!("expected '+' below '<'");
        };
        assert!(matches!(right.kind, ExprKind::Binary { op: BinaryOp::Mul, .. }));
    }

    #[test]
    fn test_parse_unary_and_postfix() {
        let program = parse("void p() x = getRed im[1, 2]; y = -!b;");

        let StmtKind::Assign { value, .. } = &program.body[0].kind else {
            panic!("expected assignment");
        };
        let ExprKind::Unary { op, operand } = &value.kind else {
            panic!("expected unary");
        };
        assert_eq!(*op, UnaryOp::Channel(Channel::Red));
        assert!(matches!(operand.kind, ExprKind::PixelAccess { .. }));

        let StmtKind::Assign { value, .. } = &program.body[1].kind else {
            panic!("expected assignment");
        };
        assert!(matches!(
            &value.kind,
            ExprKind::Unary { op: UnaryOp::Neg, operand } if matches!(operand.kind, ExprKind::Unary { op: UnaryOp::Not, .. })
        ));
    }

    #[test]
    fn test_parse_color_and_conditional() {
        let program = parse("void p() c = <<1, 2, 3>>; d = if (b) RED else BLUE fi;");

        let StmtKind::Assign { value, .. } = &program.body[0].kind else {
            panic!("expected assignment");
        };
        assert!(matches!(value.kind, ExprKind::Color { .. }));

        let StmtKind::Assign { value, .. } = &program.body[1].kind else {
            panic!("expected assignment");
        };
        assert!(matches!(value.kind, ExprKind::Conditional { .. }));
    }

    #[test]
    fn test_string_escapes() {
        let program = parse(r#"void p() s = "a\tb\"c";"#);
        let StmtKind::Assign { value, .. } = &program.body[0].kind else {
            panic!("expected assignment");
        };
        assert!(matches!(&value.kind, ExprKind::StringLiteral(s) if s == "a\tb\"c"));
    }

    #[test]
    fn test_missing_semicolon() {
        let err = Parser::new("void p() x = 1").unwrap().parse().unwrap_err();
        assert!(matches!(err, CompileError::Parser { .. }));
    }

    #[test]
    fn test_bad_statement_start() {
        let err = Parser::new("void p() 3 = x;").unwrap().parse().unwrap_err();
        assert!(matches!(err, CompileError::Parser { span, .. } if span == Span::new(9, 10)));
    }
}
