//! PLC frontend
//!
//! The frontend is responsible for:
//! 1. Lexing source code into tokens
//! 2. Parsing tokens into an AST
//! 3. Type checking the AST in place

pub mod ast;
pub mod lexer;
pub mod parser;
pub mod sema;

use crate::common::{CompileResult, DiagnosticReporter};

pub use ast::Program;
pub use lexer::{Lexer, Token, TokenKind};
pub use parser::Parser;
pub use sema::TypeChecker;

/// Configuration options passed to the frontend
#[derive(Debug, Clone, Default)]
pub struct FrontendConfig {
    pub dump_tokens: bool,
    pub dump_ast: bool,
    pub verbose: bool,
}

/// Compilation context providing access to diagnostics and file info
pub struct CompileContext<'a> {
    pub filename: String,
    pub file_id: usize,
    pub reporter: &'a DiagnosticReporter,
}

impl<'a> CompileContext<'a> {
    pub fn new(filename: String, file_id: usize, reporter: &'a DiagnosticReporter) -> Self {
        Self { filename, file_id, reporter }
    }
}

/// PLC language frontend
#[derive(Debug, Default)]
pub struct PlcFrontend;

impl PlcFrontend {
    pub fn new() -> Self {
        Self
    }

    /// Lex, parse and type check `source`, returning the annotated program.
    ///
    /// Errors are rendered through `ctx.reporter` before being returned.
    pub fn check(
        &self,
        source: &str,
        ctx: &CompileContext,
        config: &FrontendConfig,
    ) -> CompileResult<Program> {
        let result = self.run(source, ctx, config);
        if let Err(e) = &result {
            ctx.reporter.report_error(ctx.file_id, e);
        }
        result
    }

    fn run(&self, source: &str, ctx: &CompileContext, config: &FrontendConfig) -> CompileResult<Program> {
        // Phase 1: Lexing (optional token dump)
        if config.dump_tokens {
            eprintln!("=== Tokens ===");
            eprint!("{}", self.dump_tokens(source)?);
            eprintln!("=== End Tokens ===\n");
        }

        // Phase 2: Parsing
        if config.verbose {
            eprintln!("Parsing {}...", ctx.filename);
        }
        let mut program = Parser::new(source)?.parse()?;

        // Phase 3: Type checking
        if config.verbose {
            eprintln!("Type checking '{}'...", program.name);
        }
        TypeChecker::new().check(&mut program)?;

        if config.dump_ast {
            eprintln!("=== Annotated AST ===");
            eprintln!("{:#?}", program);
            eprintln!("=== End AST ===\n");
        }

        Ok(program)
    }

    /// Render the token stream, one token per line
    pub fn dump_tokens(&self, source: &str) -> CompileResult<String> {
        let tokens = Lexer::new(source).tokenize_all()?;
        let mut out = String::new();
        for token in &tokens {
            out.push_str(&format!("{:>5}..{:<5} {}\n", token.span.start, token.span.end, token.kind));
        }
        Ok(out)
    }

    /// Parse `source` and render its AST without type checking
    pub fn dump_ast(&self, source: &str) -> CompileResult<String> {
        let program = Parser::new(source)?.parse()?;
        Ok(format!("{:#?}", program))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Type;
    use codespan_reporting::term::termcolor::ColorChoice;

    fn context(reporter: &DiagnosticReporter) -> CompileContext<'_> {
        CompileContext::new("test.plc".to_string(), 0, reporter)
    }

    #[test]
    fn test_check_returns_annotated_program() {
        let source = "int twice(int n) ^ n + n;";
        let mut reporter = DiagnosticReporter::with_color(ColorChoice::Never);
        reporter.add_file("test.plc", source);

        let program = PlcFrontend::new()
            .check(source, &context(&reporter), &FrontendConfig::default())
            .unwrap();
        assert_eq!(program.name, "twice");
        assert_eq!(program.return_type, Some(Type::Int));
    }

    #[test]
    fn test_check_surfaces_type_errors() {
        let source = "void p() int a = b;";
        let mut reporter = DiagnosticReporter::with_color(ColorChoice::Never);
        reporter.add_file("test.plc", source);

        let err = PlcFrontend::new()
            .check(source, &context(&reporter), &FrontendConfig::default())
            .unwrap_err();
        assert!(err.is_type_error());
    }

    #[test]
    fn test_int_product_is_rejected() {
        let source = "int twice(int n) ^ n * 2;";
        let mut reporter = DiagnosticReporter::with_color(ColorChoice::Never);
        reporter.add_file("test.plc", source);

        let err = PlcFrontend::new()
            .check(source, &context(&reporter), &FrontendConfig::default())
            .unwrap_err();
        assert!(err.is_type_error());
        assert!(err.message().contains("incompatible types for operator '*'"));
    }

    #[test]
    fn test_dump_tokens() {
        let dump = PlcFrontend::new().dump_tokens("int x;").unwrap();
        assert_eq!(dump.lines().count(), 4);
    }

    #[test]
    fn test_dump_ast_is_unannotated() {
        let dump = PlcFrontend::new().dump_ast("void p() int a = 1;").unwrap();
        assert!(dump.contains("IntLiteral"));
        assert!(dump.contains("ty: None"));
    }
}
