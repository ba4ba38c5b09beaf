//! Error types and diagnostic reporting

use codespan_reporting::diagnostic::{Diagnostic, Label};
use codespan_reporting::files::SimpleFiles;
use codespan_reporting::term;
use codespan_reporting::term::termcolor::{ColorChoice, StandardStream};
use thiserror::Error;
use super::Span;

/// Compile error with source location
#[derive(Error, Debug)]
pub enum CompileError {
    #[error("Lexer error at {span}: {message}")]
    Lexer { message: String, span: Span },

    #[error("Parser error at {span}: {message}")]
    Parser { message: String, span: Span },

    #[error("Type error at {span}: {message}")]
    Type { message: String, span: Span },

    /// The AST broke an invariant the parser is expected to uphold.
    #[error("Internal compiler error at {span}: {message}")]
    Internal { message: String, span: Span },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CompileError {
    pub fn lexer(message: impl Into<String>, span: Span) -> Self {
        Self::Lexer {
            message: message.into(),
            span,
        }
    }

    pub fn parser(message: impl Into<String>, span: Span) -> Self {
        Self::Parser {
            message: message.into(),
            span,
        }
    }

    pub fn type_error(message: impl Into<String>, span: Span) -> Self {
        Self::Type {
            message: message.into(),
            span,
        }
    }

    pub fn internal(message: impl Into<String>, span: Span) -> Self {
        Self::Internal {
            message: message.into(),
            span,
        }
    }

    pub fn is_type_error(&self) -> bool {
        matches!(self, Self::Type { .. })
    }

    pub fn is_internal(&self) -> bool {
        matches!(self, Self::Internal { .. })
    }

    /// Human readable message without the location prefix
    pub fn message(&self) -> String {
        match self {
            Self::Lexer { message, .. }
            | Self::Parser { message, .. }
            | Self::Type { message, .. }
            | Self::Internal { message, .. } => message.clone(),
            Self::Io(err) => err.to_string(),
        }
    }

    pub fn span(&self) -> Option<Span> {
        match self {
            Self::Lexer { span, .. }
            | Self::Parser { span, .. }
            | Self::Type { span, .. }
            | Self::Internal { span, .. } => Some(*span),
            Self::Io(_) => None,
        }
    }
}

pub type CompileResult<T> = Result<T, CompileError>;

/// Diagnostic reporter for pretty error output
pub struct DiagnosticReporter {
    files: SimpleFiles<String, String>,
    writer: StandardStream,
    config: term::Config,
}

impl DiagnosticReporter {
    pub fn new() -> Self {
        Self::with_color(ColorChoice::Auto)
    }

    pub fn with_color(color: ColorChoice) -> Self {
        Self {
            files: SimpleFiles::new(),
            writer: StandardStream::stderr(color),
            config: term::Config::default(),
        }
    }

    pub fn add_file(&mut self, name: impl Into<String>, source: impl Into<String>) -> usize {
        self.files.add(name.into(), source.into())
    }

    /// Build the diagnostic for `error` without emitting it
    pub fn diagnostic(file_id: usize, error: &CompileError) -> Diagnostic<usize> {
        match error {
            CompileError::Lexer { message, span } => labelled(file_id, "Lexer error", message, *span),
            CompileError::Parser { message, span } => labelled(file_id, "Syntax error", message, *span),
            CompileError::Type { message, span } => labelled(file_id, "Type error", message, *span),
            CompileError::Internal { message, span } => {
                labelled(file_id, "Internal compiler error", message, *span).with_notes(vec![
                    "the syntax tree violates an invariant the parser guarantees".to_string(),
                ])
            }
            CompileError::Io(err) => {
                Diagnostic::error().with_message(format!("IO error: {}", err))
            }
        }
    }

    pub fn report_error(&self, file_id: usize, error: &CompileError) {
        let diagnostic = Self::diagnostic(file_id, error);
        let _ = term::emit(&mut self.writer.lock(), &self.config, &self.files, &diagnostic);
    }
}

fn labelled(file_id: usize, title: &str, message: &str, span: Span) -> Diagnostic<usize> {
    Diagnostic::error()
        .with_message(title)
        .with_labels(vec![
            Label::primary(file_id, span.start..span.end).with_message(message)
        ])
}

impl Default for DiagnosticReporter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_error_kinds_are_distinguished() {
        let user = CompileError::type_error("undefined identifier 'a'", Span::new(3, 4));
        let internal = CompileError::internal("unknown declaration", Span::new(0, 1));

        assert!(user.is_type_error());
        assert!(!user.is_internal());
        assert!(internal.is_internal());
        assert!(!internal.is_type_error());
    }

    #[test]
    fn test_message_and_span() {
        let err = CompileError::type_error("uninitialized identifier used", Span::new(10, 12));
        assert_eq!(err.message(), "uninitialized identifier used");
        assert_eq!(err.span(), Some(Span::new(10, 12)));
        assert_eq!(err.to_string(), "Type error at 10..12: uninitialized identifier used");
    }

    #[test]
    fn test_diagnostic_labels_error_span() {
        let err = CompileError::type_error("bad", Span::new(2, 5));
        let diagnostic = DiagnosticReporter::diagnostic(0, &err);
        assert_eq!(diagnostic.message, "Type error");
        assert_eq!(diagnostic.labels.len(), 1);
        assert_eq!(diagnostic.labels[0].range, 2..5);
    }
}
