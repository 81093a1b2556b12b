use indoc::indoc;

use crate::validate;

#[test]
fn summary_of_simple_assignment() {
    let outcome = validate("x = 1 + 2");
    let tree = outcome.tree().unwrap();
    let summary = tree.summary();

    assert_eq!(summary.language, "python");
    assert_eq!(summary.root, "module");
    assert_eq!(summary.bytes, 9);
    assert_eq!(summary.nodes, tree.node_count());
    assert!(summary.nodes > 5);
}

#[test]
fn sexp_has_named_structure() {
    let outcome = validate("x = 1 + 2");
    let sexp = outcome.tree().unwrap().sexp();

    assert!(sexp.starts_with("(module"), "{sexp}");
    assert!(sexp.contains("assignment"), "{sexp}");
    assert!(sexp.contains("binary_operator"), "{sexp}");
}

#[test]
fn root_node_is_borrowable() {
    let outcome = validate("import os\n");
    let tree = outcome.tree().unwrap();
    let root = tree.root_node();

    assert_eq!(root.kind(), "module");
    assert!(!root.has_error());
    assert_eq!(root.named_child_count(), 1);
    assert_eq!(tree.source(), "import os\n");
}

#[test]
fn dump_named_nodes_only() {
    let outcome = validate("x = 1");
    let dump = outcome.tree().unwrap().dump().render();

    assert!(dump.starts_with("(module\n"), "{dump}");
    assert!(dump.contains("left: (identifier \"x\")"), "{dump}");
    assert!(dump.contains("right: (integer \"1\")"), "{dump}");
    assert!(!dump.contains("(\"=\")"), "{dump}");
    assert!(dump.ends_with(")\n"));
}

#[test]
fn dump_raw_includes_punctuation() {
    let outcome = validate("x = 1");
    let dump = outcome.tree().unwrap().dump().raw(true).render();

    assert!(dump.contains("(\"=\")"), "{dump}");
}

#[test]
fn dump_spans() {
    let outcome = validate("x = 1");
    let dump = outcome.tree().unwrap().dump().spans(true).render();

    assert!(dump.starts_with("(module [0:0-0:5]"), "{dump}");
}

#[test]
fn dump_escapes_leaf_text() {
    let outcome = validate("s = \"a\\tb\"\n");
    let dump = outcome.tree().unwrap().dump().render();

    assert!(dump.contains("\\\\t"), "{dump}");
}

fn nested(depth: usize) -> String {
    format!("x = {}1{}\n", "(".repeat(depth), ")".repeat(depth))
}

/// Runs `f` on a thread whose stack is far smaller than the nesting depth
/// would need for a recursive walk.
fn on_small_stack<R: Send>(f: impl FnOnce() -> R + Send) -> R {
    std::thread::scope(|scope| {
        std::thread::Builder::new()
            .stack_size(128 * 1024)
            .spawn_scoped(scope, f)
            .unwrap()
            .join()
            .unwrap()
    })
}

#[test]
fn sexp_matches_tree_sitter_format() {
    let outcome = validate(indoc! {"
        def f(a, *, b=1):
            return [x for x in a if x]

        f(1, b=2)
    "});
    let tree = outcome.tree().unwrap();

    assert_eq!(tree.sexp(), tree.root_node().to_sexp());
}

#[test]
fn deep_nesting_is_walked_without_recursion() {
    let depth = 50_000;
    let outcome = validate(&nested(depth));
    let tree = outcome.tree().unwrap();

    let (count, sexp) = on_small_stack(|| (tree.node_count(), tree.sexp()));

    assert!(count > depth);
    assert!(sexp.starts_with("(module (expression_statement (assignment"), "{}", &sexp[..80]);
    assert_eq!(sexp.matches("(parenthesized_expression").count(), depth);
    assert!(sexp.ends_with(&")".repeat(depth + 4)));
}

#[test]
fn deep_nesting_dumps_without_recursion() {
    let depth = 3_000;
    let outcome = validate(&nested(depth));
    let tree = outcome.tree().unwrap();

    let dump = on_small_stack(|| tree.dump().raw(true).render());

    assert!(dump.starts_with("(module\n"));
    assert!(dump.ends_with(")\n"));
    assert_eq!(dump.matches("(parenthesized_expression").count(), depth);
}

#[test]
fn debug_is_compact() {
    let outcome = validate(indoc! {"
        def f():
            return 1
    "});
    let debug = format!("{:?}", outcome.tree().unwrap());

    assert_eq!(debug, "SyntaxTree { root: \"module\", bytes: 22 }");
}
