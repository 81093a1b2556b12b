//! Result of one validation.

use std::time::Duration;

use serde::ser::{Serialize, SerializeStruct, Serializer};
use syntaxgate_core::Diagnostic;

use crate::diagnostics::Diagnostics;
use crate::tree::SyntaxTree;

/// Success flag, tree, diagnostics and timing of one `validate` call.
///
/// Success is derived from the presence of the tree, and the only
/// constructors pair a tree with no diagnostics or a diagnostic with no tree.
#[derive(Debug)]
pub struct ParseOutcome {
    tree: Option<SyntaxTree>,
    diagnostics: Diagnostics,
    elapsed: Duration,
}

impl ParseOutcome {
    pub(crate) fn succeeded(tree: SyntaxTree, elapsed: Duration) -> Self {
        Self {
            tree: Some(tree),
            diagnostics: Diagnostics::new(),
            elapsed,
        }
    }

    pub(crate) fn failed(diagnostic: Diagnostic, elapsed: Duration) -> Self {
        Self {
            tree: None,
            diagnostics: diagnostic.into(),
            elapsed,
        }
    }

    pub fn success(&self) -> bool {
        self.tree.is_some()
    }

    pub fn tree(&self) -> Option<&SyntaxTree> {
        self.tree.as_ref()
    }

    pub fn into_tree(self) -> Option<SyntaxTree> {
        self.tree
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.has_errors()
    }

    /// Time from the start of validation to the end of parsing (or rejection).
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }

    /// Tree on success, diagnostics otherwise.
    pub fn into_result(self) -> Result<SyntaxTree, Diagnostics> {
        match self.tree {
            Some(tree) => Ok(tree),
            None => Err(self.diagnostics),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// The tree is replaced by its [`TreeSummary`](crate::TreeSummary).
impl Serialize for ParseOutcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ParseOutcome", 4)?;
        state.serialize_field("success", &self.success())?;
        state.serialize_field("tree", &self.tree.as_ref().map(SyntaxTree::summary))?;
        state.serialize_field("diagnostics", &self.diagnostics)?;
        state.serialize_field("elapsed", &self.elapsed_secs())?;
        state.end()
    }
}
