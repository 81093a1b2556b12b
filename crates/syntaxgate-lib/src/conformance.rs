//! Python 3 rules the tree-sitter grammar leaves unchecked.
//!
//! The grammar only tracks indentation where a block may open, still accepts
//! Python 2 `print`/`exec` statements and `<>`, and takes some parameter,
//! argument and assignment-target shapes that CPython rejects. This pass runs
//! on trees without `ERROR`/`MISSING` nodes and reports the first violation in
//! document order, with CPython's wording.

use arborium_tree_sitter::Node;
use syntaxgate_core::Diagnostic;

use crate::syntax::{INVALID_SYNTAX, locate, locate_bytes};
use crate::tree::{Walk, walk_preorder};

pub(crate) const UNEXPECTED_INDENT: &str = "unexpected indent";
pub(crate) const UNINDENT_MISMATCH: &str = "unindent does not match any outer indentation level";
pub(crate) const INCONSISTENT_TABS: &str = "inconsistent use of tabs and spaces in indentation";
pub(crate) const NON_DEFAULT_AFTER_DEFAULT: &str =
    "parameter without a default follows parameter with a default";
pub(crate) const POSITIONAL_AFTER_KEYWORD: &str = "positional argument follows keyword argument";
pub(crate) const POSITIONAL_AFTER_UNPACKING: &str =
    "positional argument follows keyword argument unpacking";
pub(crate) const ITERABLE_AFTER_UNPACKING: &str =
    "iterable argument unpacking follows keyword argument unpacking";
pub(crate) const GENERATOR_NOT_PARENTHESIZED: &str = "Generator expression must be parenthesized";

/// Clauses that line up with the statement owning them.
const CLAUSES: &[&str] = &[
    "elif_clause",
    "else_clause",
    "except_clause",
    "finally_clause",
];

/// First rule violation under `root`, or `None` for conforming source.
pub(crate) fn first_violation(root: Node<'_>, source: &str) -> Option<Diagnostic> {
    let mut found = None;
    walk_preorder(root, |node, parent| {
        found = check(node, parent, source);
        if found.is_some() {
            Walk::Stop
        } else {
            Walk::Descend
        }
    });
    found
}

fn check(node: Node<'_>, parent: Option<Node<'_>>, source: &str) -> Option<Diagnostic> {
    if node.is_extra() {
        return None;
    }
    if !node.is_named() {
        return (node.kind() == "<>").then(|| violation(INVALID_SYNTAX, node, source));
    }
    if let Some(diagnostic) = parent.and_then(|parent| check_alignment(node, parent, source)) {
        return Some(diagnostic);
    }

    match node.kind() {
        "block" => check_block(node, parent?, source),
        "print_statement" => Some(violation(missing_parens("print"), node, source)),
        "exec_statement" => Some(violation(missing_parens("exec"), node, source)),
        "augmented_assignment" => check_augmented_target(node, source),
        "parameters" | "lambda_parameters" => check_parameters(node, source),
        "argument_list" => check_arguments(node, source),
        "for_in_clause" => check_for_in(node, parent, source),
        _ => None,
    }
}

fn violation(message: impl Into<String>, node: Node<'_>, source: &str) -> Diagnostic {
    Diagnostic::syntax(message, locate(node, source))
}

fn missing_parens(name: &str) -> String {
    format!("Missing parentheses in call to '{name}'. Did you mean {name}(...)?")
}

/// Leading whitespace of a line, measured two ways.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct Indent {
    /// Tab stops every 8 columns.
    col: usize,
    /// Every tab counts as one column.
    alt: usize,
}

impl Indent {
    /// Indentation of the line containing `byte`.
    fn of_line(source: &str, byte: usize) -> Self {
        let mut indent = Indent::default();
        for b in &source.as_bytes()[line_start(source, byte)..] {
            match b {
                b' ' => {
                    indent.col += 1;
                    indent.alt += 1;
                }
                b'\t' => {
                    indent.col = (indent.col / 8 + 1) * 8;
                    indent.alt += 1;
                }
                b'\x0c' => indent = Indent::default(),
                _ => break,
            }
        }
        indent
    }
}

fn line_start(source: &str, byte: usize) -> usize {
    source.as_bytes()[..byte.min(source.len())]
        .iter()
        .rposition(|&b| b == b'\n')
        .map_or(0, |i| i + 1)
}

/// Whether `node` opens a logical line: only whitespace before it on its
/// physical line, and no backslash continuation from the line above.
fn begins_line(node: Node<'_>, source: &str) -> bool {
    let bytes = source.as_bytes();
    let start = node.start_byte().min(bytes.len());
    let line = line_start(source, start);
    if !bytes[line..start]
        .iter()
        .all(|b| matches!(b, b' ' | b'\t' | b'\x0c'))
    {
        return false;
    }
    if line == 0 {
        return true;
    }
    let above = &bytes[..line - 1];
    let above = above.strip_suffix(b"\r").unwrap_or(above);
    !above.ends_with(b"\\")
}

/// Named children, comments and other extras excluded.
fn code_children(node: Node<'_>) -> Vec<Node<'_>> {
    let mut cursor = node.walk();
    let children = node
        .named_children(&mut cursor)
        .filter(|child| !child.is_extra())
        .collect();
    children
}

fn first_code_child(node: Node<'_>) -> Option<Node<'_>> {
    let mut cursor = node.walk();
    let first = node
        .named_children(&mut cursor)
        .find(|child| !child.is_extra());
    first
}

fn has_token(node: Node<'_>, token: &str) -> bool {
    let mut cursor = node.walk();
    let found = node
        .children(&mut cursor)
        .any(|child| !child.is_named() && child.kind() == token);
    found
}

fn check_alignment(node: Node<'_>, parent: Node<'_>, source: &str) -> Option<Diagnostic> {
    let expected = match parent.kind() {
        "module" => Indent::default(),
        "block" => {
            // the first statement sets the block's indentation
            let first = first_code_child(parent)?;
            if first == node || !begins_line(first, source) {
                return None;
            }
            Indent::of_line(source, first.start_byte())
        }
        "decorated_definition" => Indent::of_line(source, parent.start_byte()),
        _ if CLAUSES.contains(&node.kind()) => Indent::of_line(source, parent.start_byte()),
        _ => return None,
    };
    if !begins_line(node, source) {
        return None;
    }

    let actual = Indent::of_line(source, node.start_byte());
    if actual == expected {
        return None;
    }
    let message = if actual.col == expected.col {
        INCONSISTENT_TABS
    } else if actual.col > previous_indent(node, source).unwrap_or(expected).col {
        UNEXPECTED_INDENT
    } else {
        UNINDENT_MISMATCH
    };
    Some(violation(message, node, source))
}

/// Indentation of the last logical line before `node`, found by descending
/// into the trailing blocks and clauses of its previous sibling.
fn previous_indent(node: Node<'_>, source: &str) -> Option<Indent> {
    let mut current = node.prev_named_sibling()?;
    while current.is_extra() {
        current = current.prev_named_sibling()?;
    }

    while let Some(last) = code_children(current).pop() {
        let nested = last.kind() == "block"
            || ((matches!(current.kind(), "block" | "decorated_definition")
                || CLAUSES.contains(&last.kind()))
                && begins_line(last, source));
        if !nested {
            break;
        }
        current = last;
    }
    Some(Indent::of_line(source, current.start_byte()))
}

fn check_block(block: Node<'_>, owner: Node<'_>, source: &str) -> Option<Diagnostic> {
    if first_code_child(block).is_some() {
        return None;
    }

    let label = match owner.kind() {
        "if_statement" => "'if' statement",
        "elif_clause" => "'elif' statement",
        "else_clause" => "'else' statement",
        "for_statement" => "'for' statement",
        "while_statement" => "'while' statement",
        "try_statement" => "'try' statement",
        "except_clause" => "'except' statement",
        "finally_clause" => "'finally' statement",
        "with_statement" => "'with' statement",
        "match_statement" => "'match' statement",
        "case_clause" => "'case' statement",
        "function_definition" => "function definition",
        "class_definition" => "class definition",
        _ => "",
    };
    let message = if label.is_empty() {
        "expected an indented block".to_owned()
    } else {
        format!(
            "expected an indented block after {label} on line {}",
            owner.start_position().row + 1
        )
    };

    // reported at the token that should have been indented
    let next = skip_trivia(source, block.end_byte());
    Some(Diagnostic::syntax(message, locate_bytes(source, next, next)))
}

/// Offset of the first byte after `from` that is not whitespace, a comment
/// or a line continuation.
fn skip_trivia(source: &str, from: usize) -> usize {
    let bytes = source.as_bytes();
    let mut i = from.min(bytes.len());
    while i < bytes.len() {
        match bytes[i] {
            b' ' | b'\t' | b'\r' | b'\n' | b'\x0c' => i += 1,
            b'\\' if matches!(bytes.get(i + 1), Some(b'\n' | b'\r')) => i += 1,
            b'#' => {
                i = bytes[i..]
                    .iter()
                    .position(|&b| b == b'\n')
                    .map_or(bytes.len(), |n| i + n);
            }
            _ => break,
        }
    }
    i
}

fn check_augmented_target(node: Node<'_>, source: &str) -> Option<Diagnostic> {
    let mut target = node.child_by_field_name("left")?;
    // `(a) += 1` parses as a tuple pattern without a comma
    while target.kind() == "tuple_pattern"
        && target.named_child_count() == 1
        && !has_token(target, ",")
    {
        target = target.named_child(0)?;
    }

    let message = match target.kind() {
        "identifier" | "attribute" | "subscript" => return None,
        "pattern_list" | "tuple_pattern" => illegal_target("tuple"),
        "list_pattern" => illegal_target("list"),
        "list_splat_pattern" => illegal_target("starred"),
        _ => "illegal expression for augmented assignment".to_owned(),
    };
    Some(violation(message, target, source))
}

fn illegal_target(what: &str) -> String {
    format!("'{what}' is an illegal expression for augmented assignment")
}

fn check_parameters(node: Node<'_>, source: &str) -> Option<Diagnostic> {
    let mut after_default = false;
    let mut keyword_only = false;
    for param in code_children(node) {
        match param.kind() {
            "default_parameter" | "typed_default_parameter" => after_default = true,
            "list_splat_pattern" | "dictionary_splat_pattern" | "keyword_separator" => {
                keyword_only = true;
            }
            "typed_parameter" if is_splat_parameter(param) => keyword_only = true,
            // Python 2 tuple parameters
            "tuple_pattern" => return Some(violation(INVALID_SYNTAX, param, source)),
            "identifier" | "typed_parameter" if after_default && !keyword_only => {
                return Some(violation(NON_DEFAULT_AFTER_DEFAULT, param, source));
            }
            _ => {}
        }
    }
    None
}

fn is_splat_parameter(param: Node<'_>) -> bool {
    param.named_child(0).is_some_and(|name| {
        matches!(
            name.kind(),
            "list_splat_pattern" | "dictionary_splat_pattern"
        )
    })
}

fn check_arguments(node: Node<'_>, source: &str) -> Option<Diagnostic> {
    let mut keyword = false;
    let mut keyword_unpacking = false;
    for arg in code_children(node) {
        let message = match arg.kind() {
            "keyword_argument" => {
                keyword = true;
                continue;
            }
            "dictionary_splat" => {
                keyword_unpacking = true;
                continue;
            }
            "list_splat" if keyword_unpacking => ITERABLE_AFTER_UNPACKING,
            "list_splat" => continue,
            _ if keyword_unpacking => POSITIONAL_AFTER_UNPACKING,
            _ if keyword => POSITIONAL_AFTER_KEYWORD,
            _ => continue,
        };
        return Some(violation(message, arg, source));
    }
    None
}

/// A comprehension iterates over one expression; `for x in a, b` needs
/// parentheses around `a, b`.
fn check_for_in(node: Node<'_>, parent: Option<Node<'_>>, source: &str) -> Option<Diagnostic> {
    let mut cursor = node.walk();
    let comma = node
        .children(&mut cursor)
        .skip_while(|child| child.kind() != "in")
        .find(|child| !child.is_named() && child.kind() == ",")?;

    // `f(x for x in y, 1)`: the generator swallowed the next argument
    if let Some(generator) = parent.filter(|p| p.kind() == "generator_expression")
        && generator.parent().is_some_and(|p| p.kind() == "call")
    {
        let element = generator.named_child(0).unwrap_or(generator);
        return Some(violation(GENERATOR_NOT_PARENTHESIZED, element, source));
    }
    Some(violation(INVALID_SYNTAX, comma, source))
}
