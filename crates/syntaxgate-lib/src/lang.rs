//! Tree-sitter binding for the analyzed language.
//!
//! The validator is not grammar-agnostic: it always parses Python.

use std::sync::LazyLock;

use arborium_tree_sitter::{Language, Parser};

use crate::Result;

/// Language name used in traces and tree summaries.
pub const NAME: &str = "python";

/// File extensions treated as Python source.
pub const EXTENSIONS: &[&str] = &["py", "pyi", "pyw"];

static PYTHON: LazyLock<Language> = LazyLock::new(|| arborium_python::language().into());

pub fn python() -> &'static Language {
    &PYTHON
}

/// Fresh parser with the Python grammar loaded.
pub fn parser() -> Result<Parser> {
    let mut parser = Parser::new();
    parser.set_language(python())?;
    Ok(parser)
}

pub fn is_source_ext(ext: &str) -> bool {
    let ext = ext.to_ascii_lowercase();
    EXTENSIONS.contains(&ext.as_str())
}
