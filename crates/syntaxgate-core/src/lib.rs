#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core data structures for syntaxgate diagnostics.
//!
//! Everything here is plain data: the diagnostic record produced by the
//! validator, its enumerated fields, and the ANSI palette shared by the
//! printers. Parsing lives in `syntaxgate-lib`.

mod colors;
mod diagnostic;


pub use colors::Colors;
pub use diagnostic::{Diagnostic, DiagnosticKind, Location, Severity, Stage};
