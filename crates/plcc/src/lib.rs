//! PLC Compiler - type checker for the PLC image manipulation language
//!
//! This library turns PLC source into a type-annotated AST ready for a
//! code generator.
//!
//! ## Architecture
//!
//! The compiler is organized into:
//! - **Frontend** (`frontend/`): Lexing, parsing and semantic analysis
//! - **Driver** (`driver/`): File handling and pipeline orchestration
//! - **Common** (`common/`): Shared infrastructure (errors, spans)
//! - **Types** (`types/`): The language's closed type lattice

pub mod common;
pub mod types;
pub mod frontend;
pub mod driver;

// Re-exports for convenience
pub use common::{CompileError, CompileResult, DiagnosticReporter, Span};
pub use frontend::{CompileContext, FrontendConfig, PlcFrontend};
pub use types::Type;
