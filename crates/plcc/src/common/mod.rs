//! Common infrastructure shared across the frontend and driver

mod error;
mod span;

pub use error::{CompileError, CompileResult, DiagnosticReporter};
pub use span::Span;
