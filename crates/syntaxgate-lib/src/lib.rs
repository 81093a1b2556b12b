//! Syntaxgate: Python syntax pre-validation with structured diagnostics.
//!
//! One source string in, one [`ParseOutcome`] out: either a syntax tree or a
//! diagnostic describing why there is none. Nothing escapes as a panic or an
//! error value; every failure is data.
//!
//! # Example
//!
//! ```
//! use syntaxgate_lib::{DiagnosticKind, validate};
//!
//! let outcome = validate("x = 1 + 2");
//! assert!(outcome.success());
//! assert_eq!(outcome.tree().unwrap().root_kind(), "module");
//!
//! let outcome = validate("def f(:");
//! let diagnostic = outcome.diagnostics().first().unwrap();
//! assert_eq!(diagnostic.kind(), DiagnosticKind::ParseError);
//! assert_eq!(diagnostic.line(), Some(1));
//! eprintln!("{}", outcome.diagnostics().render("def f(:"));
//! ```

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod diagnostics;
pub mod input;
pub mod lang;
pub mod outcome;
pub mod trace;
pub mod tree;
pub mod validator;

mod conformance;
mod syntax;

#[cfg(test)]
mod conformance_tests;
#[cfg(test)]
mod trace_tests;
#[cfg(test)]
mod tree_tests;

pub use arborium_tree_sitter as tree_sitter;
pub use diagnostics::{Diagnostics, DiagnosticsPrinter};
pub use input::Input;
pub use outcome::ParseOutcome;
pub use syntaxgate_core::{Colors, Diagnostic, DiagnosticKind, Location, Severity, Stage};
pub use trace::{NoopTracer, PrintTracer, Tracer, Verbosity};
pub use tree::{SyntaxTree, TreeDump, TreeSummary};
pub use validator::{SyntaxValidator, parse, validate, validate_traced};

/// Failures inside the parse step.
///
/// These never reach callers of [`validate`]; they are converted into
/// location-less `ParseError` diagnostics.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The grammar could not be loaded into the parser (ABI mismatch).
    #[error("failed to load the python grammar: {0}")]
    Language(#[from] tree_sitter::LanguageError),

    /// The parser gave up without producing a tree.
    #[error("parser returned no tree")]
    NoTree,

    /// The parser panicked.
    #[error("parser panicked: {0}")]
    Panicked(String),
}

pub type Result<T> = std::result::Result<T, Error>;
