//! Lexer implementation using logos

use super::token::{Token, TokenKind};
use crate::common::{CompileError, CompileResult, Span};
use logos::Logos;

/// Lexer for PLC source code
pub struct Lexer<'a> {
    inner: logos::Lexer<'a, TokenKind>,
    at_eof: bool,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given source code
    pub fn new(source: &'a str) -> Self {
        Self {
            inner: TokenKind::lexer(source),
            at_eof: false,
        }
    }

    /// Get the next token; yields `Eof` forever once the input is exhausted
    pub fn next_token(&mut self) -> CompileResult<Token> {
        if self.at_eof {
            let len = self.inner.source().len();
            return Ok(Token::new(TokenKind::Eof, Span::new(len, len)));
        }

        match self.inner.next() {
            Some(Ok(kind)) => {
                let span = self.inner.span();
                Ok(Token::new(kind, Span::new(span.start, span.end)))
            }
            Some(Err(())) => {
                let span = self.inner.span();
                Err(CompileError::lexer(
                    format!("unexpected character '{}'", self.inner.slice()),
                    Span::new(span.start, span.end),
                ))
            }
            None => {
                self.at_eof = true;
                let len = self.inner.source().len();
                Ok(Token::new(TokenKind::Eof, Span::new(len, len)))
            }
        }
    }

    /// Tokenize the entire source and return all tokens
    pub fn tokenize_all(mut self) -> CompileResult<Vec<Token>> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let is_eof = matches!(token.kind, TokenKind::Eof);
            tokens.push(token);
            if is_eof {
                break;
            }
        }
        Ok(tokens)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontend::ast::{Channel, ColorConst, ImageProp};
    use crate::types::Type;
    use pretty_assertions::assert_eq;

    fn kinds(source: &str) -> Vec<TokenKind> {
        Lexer::new(source)
            .tokenize_all()
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn test_keywords() {
        assert_eq!(
            kinds("int float string boolean color image void if else fi write console"),
            vec![
                TokenKind::TypeName(Type::Int),
                TokenKind::TypeName(Type::Float),
                TokenKind::TypeName(Type::String),
                TokenKind::TypeName(Type::Boolean),
                TokenKind::TypeName(Type::Color),
                TokenKind::TypeName(Type::Image),
                TokenKind::Void,
                TokenKind::If,
                TokenKind::Else,
                TokenKind::Fi,
                TokenKind::Write,
                TokenKind::Console,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_builtin_names() {
        assert_eq!(
            kinds("getRed getBlue getHeight RED DARK_GRAY"),
            vec![
                TokenKind::ColorOp(Channel::Red),
                TokenKind::ColorOp(Channel::Blue),
                TokenKind::ImageOp(ImageProp::Height),
                TokenKind::ColorConst(ColorConst::Red),
                TokenKind::ColorConst(ColorConst::DarkGray),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_identifiers_are_not_keywords() {
        assert_eq!(
            kinds("integer REDDISH fib"),
            vec![
                TokenKind::Identifier("integer".to_string()),
                TokenKind::Identifier("REDDISH".to_string()),
                TokenKind::Identifier("fib".to_string()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_literals() {
        assert_eq!(
            kinds(r#"42 3.25 "hi\n" true false"#),
            vec![
                TokenKind::IntLiteral("42".to_string()),
                TokenKind::FloatLiteral("3.25".to_string()),
                TokenKind::StringLiteral("\"hi\\n\"".to_string()),
                TokenKind::BoolLiteral(true),
                TokenKind::BoolLiteral(false),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_operators() {
        assert_eq!(
            kinds("<< >> <- -> <= < == != = ^ & |"),
            vec![
                TokenKind::LAngle,
                TokenKind::RAngle,
                TokenKind::LArrow,
                TokenKind::RArrow,
                TokenKind::LtEq,
                TokenKind::Lt,
                TokenKind::EqEq,
                TokenKind::NotEq,
                TokenKind::Eq,
                TokenKind::Caret,
                TokenKind::Amp,
                TokenKind::Pipe,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_comments() {
        let source = "int # the answer\nx";
        assert_eq!(
            kinds(source),
            vec![
                TokenKind::TypeName(Type::Int),
                TokenKind::Identifier("x".to_string()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_spans() {
        let tokens = Lexer::new("int  abc").tokenize_all().unwrap();
        assert_eq!(tokens[0].span, Span::new(0, 3));
        assert_eq!(tokens[1].span, Span::new(5, 8));
        assert_eq!(tokens[2].span, Span::new(8, 8));
    }

    #[test]
    fn test_unexpected_character() {
        let err = Lexer::new("int @").tokenize_all().unwrap_err();
        assert!(matches!(err, CompileError::Lexer { span, .. } if span == Span::new(4, 5)));
    }
}
