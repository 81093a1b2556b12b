//! Owned syntax tree handed out by a successful parse.

use std::fmt;

use arborium_tree_sitter::{Node, Tree};
use serde::Serialize;
use syntaxgate_core::Colors;

use crate::lang;

/// Parsed Python module.
///
/// Owns the tree-sitter tree together with the text it was parsed from.
/// Node handles borrow from the tree and cannot outlive it.
pub struct SyntaxTree {
    tree: Tree,
    source: String,
}

/// Serializable stand-in for a [`SyntaxTree`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreeSummary {
    pub language: &'static str,
    pub root: &'static str,
    pub nodes: usize,
    pub bytes: usize,
}

impl SyntaxTree {
    pub(crate) fn new(tree: Tree, source: &str) -> Self {
        Self {
            tree,
            source: source.to_owned(),
        }
    }

    /// Root node, for downstream analyzers.
    pub fn root_node(&self) -> Node<'_> {
        self.tree.root_node()
    }

    pub fn root_kind(&self) -> &'static str {
        self.root_node().kind()
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// S-expression of named nodes, in tree-sitter's `to_sexp` format.
    ///
    /// Built with a cursor, so nesting depth never grows the call stack.
    pub fn sexp(&self) -> String {
        let mut out = String::new();
        let mut cursor = self.root_node().walk();
        loop {
            let node = cursor.node();
            if node.is_named() {
                if !out.is_empty() {
                    out.push(' ');
                }
                if let Some(field) = cursor.field_name() {
                    out.push_str(field);
                    out.push_str(": ");
                }
                out.push('(');
                out.push_str(node.kind());
                if cursor.goto_first_child() {
                    continue;
                }
                out.push(')');
            }

            // anonymous nodes are never entered, so every parent was opened
            while !cursor.goto_next_sibling() {
                if !cursor.goto_parent() {
                    return out;
                }
                out.push(')');
            }
        }
    }

    /// Number of nodes, anonymous ones included.
    pub fn node_count(&self) -> usize {
        let mut count = 0;
        walk_preorder(self.root_node(), |_, _| {
            count += 1;
            Walk::Descend
        });
        count
    }

    pub fn summary(&self) -> TreeSummary {
        TreeSummary {
            language: lang::NAME,
            root: self.root_kind(),
            nodes: self.node_count(),
            bytes: self.source.len(),
        }
    }

    pub fn dump(&self) -> TreeDump<'_> {
        TreeDump::new(self)
    }
}

impl fmt::Debug for SyntaxTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyntaxTree")
            .field("root", &self.root_kind())
            .field("bytes", &self.source.len())
            .finish()
    }
}

/// What [`walk_preorder`] does after visiting a node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Walk {
    Descend,
    Skip,
    Stop,
}

/// Pre-order traversal driven by a cursor, so nesting depth never grows the
/// call stack. The visitor also receives the parent of each node (`None` for
/// `root`), tracked on a heap stack instead of `Node::parent` lookups.
pub(crate) fn walk_preorder<'t>(
    root: Node<'t>,
    mut visit: impl FnMut(Node<'t>, Option<Node<'t>>) -> Walk,
) {
    let mut cursor = root.walk();
    let mut parents: Vec<Node<'t>> = Vec::new();
    loop {
        let node = cursor.node();
        match visit(node, parents.last().copied()) {
            Walk::Stop => return,
            Walk::Descend if cursor.goto_first_child() => {
                parents.push(node);
                continue;
            }
            Walk::Descend | Walk::Skip => {}
        }

        while !cursor.goto_next_sibling() {
            if !cursor.goto_parent() {
                return;
            }
            parents.pop();
        }
    }
}

/// Builder for the indented, field-labelled tree listing.
pub struct TreeDump<'t> {
    tree: &'t SyntaxTree,
    raw: bool,
    spans: bool,
    colors: Colors,
}

impl<'t> TreeDump<'t> {
    pub fn new(tree: &'t SyntaxTree) -> Self {
        Self {
            tree,
            raw: false,
            spans: false,
            colors: Colors::OFF,
        }
    }

    /// Include anonymous nodes (keywords, punctuation).
    pub fn raw(mut self, value: bool) -> Self {
        self.raw = value;
        self
    }

    /// Append `[row:col-row:col]` positions (0-based, as tree-sitter reports them).
    pub fn spans(mut self, value: bool) -> Self {
        self.spans = value;
        self
    }

    pub fn colors(mut self, colors: Colors) -> Self {
        self.colors = colors;
        self
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        let mut cursor = self.tree.root_node().walk();
        let mut depth = 0;
        loop {
            let node = cursor.node();
            if self.is_visible(node) {
                if !out.is_empty() {
                    out.push('\n');
                }
                let field_name = cursor.field_name();
                if !self.has_visible_children(node) {
                    self.push_leaf(&mut out, node, field_name, depth);
                } else if cursor.goto_first_child() {
                    self.push_open(&mut out, node, field_name, depth);
                    depth += 1;
                    continue;
                }
            }

            // only opened nodes are entered, so each parent needs its `)`
            while !cursor.goto_next_sibling() {
                if !cursor.goto_parent() {
                    out.push('\n');
                    return out;
                }
                depth -= 1;
                out.push(')');
            }
        }
    }

    fn is_visible(&self, node: Node<'_>) -> bool {
        self.raw || node.is_named()
    }

    fn has_visible_children(&self, node: Node<'_>) -> bool {
        if self.raw {
            node.child_count() > 0
        } else {
            node.named_child_count() > 0
        }
    }

    fn prefix(&self, node: Node<'_>, field_name: Option<&str>, depth: usize) -> (String, String) {
        let c = &self.colors;
        let indent = "  ".repeat(depth);
        let field_prefix = field_name.map(|f| format!("{f}: ")).unwrap_or_default();
        let span_suffix = if self.spans {
            let start = node.start_position();
            let end = node.end_position();
            format!(
                " {}[{}:{}-{}:{}]{}",
                c.dim, start.row, start.column, end.row, end.column, c.reset
            )
        } else {
            String::new()
        };
        (format!("{indent}{field_prefix}"), span_suffix)
    }

    fn push_open(&self, out: &mut String, node: Node<'_>, field_name: Option<&str>, depth: usize) {
        let c = &self.colors;
        let (prefix, span_suffix) = self.prefix(node, field_name, depth);
        out.push_str(&format!(
            "{prefix}({}{}{}{span_suffix}",
            c.blue,
            node.kind(),
            c.reset
        ));
    }

    fn push_leaf(&self, out: &mut String, node: Node<'_>, field_name: Option<&str>, depth: usize) {
        let c = &self.colors;
        let (prefix, span_suffix) = self.prefix(node, field_name, depth);
        let kind = node.kind();
        let text = node
            .utf8_text(self.tree.source.as_bytes())
            .unwrap_or("<invalid utf8>");
        let leaf = if text == kind {
            format!(
                "{prefix}({}\"{}\"{}){span_suffix}",
                c.green,
                escape_string(kind),
                c.reset
            )
        } else {
            format!(
                "{prefix}({}{kind}{} {}\"{}\"{}){span_suffix}",
                c.blue,
                c.reset,
                c.green,
                escape_string(text),
                c.reset
            )
        };
        out.push_str(&leaf);
    }
}

fn escape_string(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\n' => result.push_str("\\n"),
            '\r' => result.push_str("\\r"),
            '\t' => result.push_str("\\t"),
            '\\' => result.push_str("\\\\"),
            '"' => result.push_str("\\\""),
            c if c.is_control() => result.push_str(&format!("\\u{{{:04x}}}", c as u32)),
            c => result.push(c),
        }
    }
    result
}
