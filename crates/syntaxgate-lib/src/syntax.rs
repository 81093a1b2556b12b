//! Turns a tree-sitter error tree into a single diagnostic.
//!
//! tree-sitter always recovers and yields a tree; syntax errors show up as
//! `ERROR` nodes (unexpected input) and `MISSING` nodes (zero-width tokens the
//! parser inserted). The first one in document order is reported.

use std::num::NonZeroU32;

use arborium_tree_sitter::Node;
use syntaxgate_core::{Diagnostic, Location};

use crate::tree::{Walk, walk_preorder};

pub(crate) const INVALID_SYNTAX: &str = "invalid syntax";

/// First syntax error under `root`, or `None` for a clean tree.
pub(crate) fn first_error(root: Node<'_>, source: &str) -> Option<Diagnostic> {
    if !root.has_error() {
        return None;
    }

    let mut found = None;
    walk_preorder(root, |node, _| {
        if node.is_error() || node.is_missing() {
            found = Some(node);
            Walk::Stop
        } else if node.has_error() {
            Walk::Descend
        } else {
            Walk::Skip
        }
    });

    // has_error() on the root guarantees a hit; the root is a last resort
    let node = found.unwrap_or(root);
    Some(Diagnostic::syntax(message_for(node), locate(node, source)))
}

fn message_for(node: Node<'_>) -> String {
    if !node.is_missing() {
        return INVALID_SYNTAX.to_owned();
    }

    let kind = node.kind();
    if node.is_named() {
        format!("expected {kind}")
    } else {
        format!("expected '{kind}'")
    }
}

pub(crate) fn locate(node: Node<'_>, source: &str) -> Location {
    let start = node.start_byte();
    let point = node.start_position();
    Location::new(
        one_based(point.row),
        column_at(source, start, point.column),
        start..node.end_byte(),
    )
}

/// Location of `start..end` for offsets that no single node covers.
pub(crate) fn locate_bytes(source: &str, start: usize, end: usize) -> Location {
    let start = start.min(source.len());
    let before = &source.as_bytes()[..start];
    let row = before.iter().filter(|&&b| b == b'\n').count();
    let line_start = before.iter().rposition(|&b| b == b'\n').map_or(0, |i| i + 1);
    Location::new(
        one_based(row),
        column_at(source, start, start - line_start),
        start..end.max(start),
    )
}

/// 1-based character column of `byte`.
///
/// Falls back to tree-sitter's byte column if `byte` is not a char boundary.
pub(crate) fn column_at(source: &str, byte: usize, byte_column: usize) -> NonZeroU32 {
    let chars = source
        .get(..byte)
        .map(|prefix| {
            let line_start = prefix.rfind('\n').map_or(0, |i| i + 1);
            prefix[line_start..].chars().count()
        })
        .unwrap_or(byte_column);
    one_based(chars)
}

pub(crate) fn one_based(zero_based: usize) -> NonZeroU32 {
    u32::try_from(zero_based)
        .ok()
        .and_then(|n| n.checked_add(1))
        .and_then(NonZeroU32::new)
        .unwrap_or(NonZeroU32::MAX)
}
