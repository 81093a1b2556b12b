use indoc::indoc;

use crate::conformance::first_violation;
use crate::{DiagnosticKind, lang, parse};

fn rejected(source: &str) -> String {
    let diagnostic = parse(source).unwrap_err();
    assert_eq!(diagnostic.kind(), DiagnosticKind::ParseError);
    diagnostic.to_string()
}

#[test]
fn indented_first_statement() {
    insta::assert_snapshot!(rejected("  x = 1\n"), @"1:3: error[syntax]: unexpected indent");
}

#[test]
fn indented_second_statement() {
    insta::assert_snapshot!(rejected("x = 1\n    y = 2\n"), @"2:5: error[syntax]: unexpected indent");
}

#[test]
fn indented_statement_inside_block() {
    let source = indoc! {"
        def f():
            a = 1
                b = 2
    "};
    insta::assert_snapshot!(rejected(source), @"3:9: error[syntax]: unexpected indent");
}

#[test]
fn indented_decorated_definition() {
    insta::assert_snapshot!(rejected("@d\n  def f(): pass\n"), @"2:3: error[syntax]: unexpected indent");
}

#[test]
fn dedent_to_unknown_level() {
    let source = indoc! {"
        if x:
                a
            b
    "};
    insta::assert_snapshot!(rejected(source), @"3:5: error[syntax]: unindent does not match any outer indentation level");
}

#[test]
fn misaligned_else() {
    insta::assert_snapshot!(
        rejected("if x:\n    a\n  else:\n    b\n"),
        @"3:3: error[syntax]: unindent does not match any outer indentation level"
    );
}

#[test]
fn tab_and_spaces_disagree() {
    insta::assert_snapshot!(
        rejected("if x:\n\ta\n        b\n"),
        @"3:9: error[syntax]: inconsistent use of tabs and spaces in indentation"
    );
}

#[test]
fn block_body_not_indented() {
    insta::assert_snapshot!(
        rejected("if True:\npass\n"),
        @"2:1: error[syntax]: expected an indented block after 'if' statement on line 1"
    );
}

#[test]
fn block_body_only_comments() {
    let source = indoc! {"
        def f():
        # nothing here

        x = 1
    "};
    insta::assert_snapshot!(rejected(source), @"4:1: error[syntax]: expected an indented block after function definition on line 1");
}

#[test]
fn block_body_at_end_of_input() {
    insta::assert_snapshot!(
        rejected("class A:\n"),
        @"2:1: error[syntax]: expected an indented block after class definition on line 1"
    );
}

#[test]
fn python2_print_statement() {
    insta::assert_snapshot!(
        rejected("print \"x\"\n"),
        @"1:1: error[syntax]: Missing parentheses in call to 'print'. Did you mean print(...)?"
    );
}

#[test]
fn python2_exec_statement() {
    insta::assert_snapshot!(
        rejected("exec \"x\"\n"),
        @"1:1: error[syntax]: Missing parentheses in call to 'exec'. Did you mean exec(...)?"
    );
}

#[test]
fn python2_not_equal() {
    insta::assert_snapshot!(rejected("1 <> 2\n"), @"1:3: error[syntax]: invalid syntax");
}

#[test]
fn python2_tuple_parameter() {
    insta::assert_snapshot!(rejected("def f(a, (b, c)): pass\n"), @"1:10: error[syntax]: invalid syntax");
}

#[test]
fn augmented_assignment_to_tuple() {
    insta::assert_snapshot!(
        rejected("a, b += 1\n"),
        @"1:1: error[syntax]: 'tuple' is an illegal expression for augmented assignment"
    );
}

#[test]
fn augmented_assignment_to_list() {
    insta::assert_snapshot!(
        rejected("[a] += 1\n"),
        @"1:1: error[syntax]: 'list' is an illegal expression for augmented assignment"
    );
}

#[test]
fn parenthesized_name_is_augmentable() {
    assert!(parse("(a) += 1\n").is_ok());
}

#[test]
fn non_default_after_default() {
    insta::assert_snapshot!(
        rejected("def f(x=1, y): pass\n"),
        @"1:12: error[syntax]: parameter without a default follows parameter with a default"
    );
}

#[test]
fn positional_after_keyword() {
    insta::assert_snapshot!(rejected("f(a=1, 2)\n"), @"1:8: error[syntax]: positional argument follows keyword argument");
}

#[test]
fn positional_after_keyword_unpacking() {
    insta::assert_snapshot!(rejected("f(**k, a)\n"), @"1:8: error[syntax]: positional argument follows keyword argument unpacking");
}

#[test]
fn iterable_after_keyword_unpacking() {
    insta::assert_snapshot!(rejected("f(**k, *a)\n"), @"1:8: error[syntax]: iterable argument unpacking follows keyword argument unpacking");
}

#[test]
fn generator_sharing_call_parentheses() {
    insta::assert_snapshot!(
        rejected("f(x for x in y, 1)\n"),
        @"1:3: error[syntax]: Generator expression must be parenthesized"
    );
}

#[test]
fn comprehension_over_bare_tuple() {
    insta::assert_snapshot!(rejected("[x for x in 1, 2]\n"), @"1:14: error[syntax]: invalid syntax");
}

#[test]
fn conforming_program_passes() {
    let source = indoc! {"
        def f(a=1, *args, b, **kw):
            pass

        lambda a=1, *, b: b
        x = 1 + \\
            2
        if x:
            y = 1
          # comments may sit at any column
            z = 2
        elif y:
            pass
        else:
            pass

        try:
            pass
        except ValueError:
            pass
        finally:
            pass

        match x:
            case 1:
                pass
            case _:
                pass

        @dec
        class C: pass

        f(x for x in y)
        f(*a, b, c=1, *d, **e)
        items = [
                1,
            2,
        ]
    "};

    let tree = lang::parser().unwrap().parse(source, None).unwrap();
    assert!(!tree.root_node().has_error());
    assert!(first_violation(tree.root_node(), source).is_none());
}
