use crate::{Colors, PrintTracer, SyntaxValidator, Verbosity, validate_traced};

fn stages(tracer: &PrintTracer) -> Vec<&str> {
    tracer
        .lines()
        .iter()
        .filter_map(|line| line.split_whitespace().next())
        .collect()
}

#[test]
fn success_path() {
    let mut tracer = PrintTracer::new(Verbosity::Default, Colors::OFF);
    let outcome = validate_traced("x = 1", &mut tracer);

    assert!(outcome.success());
    assert_eq!(
        stages(&tracer),
        ["validating", "parsing", "succeeded", "result"]
    );
    assert_eq!(tracer.lines()[0], "validating str, 5 bytes");
    assert_eq!(tracer.lines()[1], "parsing    python, 1 lines");
    assert_eq!(tracer.lines()[2], "succeeded  module");
    assert!(tracer.lines()[3].starts_with("result     ok ("));
}

#[test]
fn rejected_path_skips_parsing() {
    let mut tracer = PrintTracer::new(Verbosity::Default, Colors::OFF);
    validate_traced(7, &mut tracer);

    assert_eq!(stages(&tracer), ["validating", "rejected", "result"]);
    assert_eq!(tracer.lines()[0], "validating i32");
    assert_eq!(
        tracer.lines()[1],
        "rejected   source code must be a non-empty string"
    );
    assert!(tracer.lines()[2].starts_with("result     error ("));
}

#[test]
fn failed_path_reports_location() {
    let mut tracer = PrintTracer::new(Verbosity::Verbose, Colors::OFF);
    validate_traced("def f(:", &mut tracer);

    assert_eq!(
        stages(&tracer),
        ["validating", "parsing", "failed", "result"]
    );
    assert!(
        tracer.lines()[2].starts_with("failed     ParseError 1:"),
        "{}",
        tracer.lines()[2]
    );
}

#[test]
fn very_verbose_adds_sexp() {
    let mut tracer = PrintTracer::new(Verbosity::VeryVerbose, Colors::OFF);
    validate_traced("x = 1", &mut tracer);

    assert!(tracer.lines()[2].starts_with("succeeded  module, "));
    assert!(tracer.lines()[3].starts_with("(module"));
    assert_eq!(tracer.lines().len(), 5);
}

#[test]
fn very_verbose_handles_deep_nesting() {
    let depth = 50_000;
    let source = format!("x = {}1{}\n", "(".repeat(depth), ")".repeat(depth));
    let mut tracer = PrintTracer::new(Verbosity::VeryVerbose, Colors::OFF);
    let outcome = validate_traced(source.as_str(), &mut tracer);

    assert!(outcome.success());
    assert!(tracer.lines()[3].starts_with("(module"));
    assert_eq!(
        tracer.lines()[3].matches("(parenthesized_expression").count(),
        depth
    );
}

#[test]
fn colored_lines_carry_escapes() {
    let mut tracer = PrintTracer::new(Verbosity::Default, Colors::ON);
    validate_traced("x = 1", &mut tracer);

    assert!(tracer.lines()[0].starts_with("\x1b[34mvalidating\x1b[0m"));
}

#[test]
fn validator_owns_its_tracer() {
    let mut validator =
        SyntaxValidator::with_tracer(PrintTracer::new(Verbosity::Default, Colors::OFF));
    validator.validate("x = 1");
    validator.validate("");

    assert_eq!(validator.tracer().lines().len(), 7);
    let tracer = validator.into_tracer();
    assert_eq!(tracer.lines()[4], "validating str, 0 bytes");
}

#[test]
fn borrowed_tracer_keeps_lines() {
    let mut tracer = PrintTracer::new(Verbosity::Default, Colors::OFF);
    {
        let mut validator = SyntaxValidator::with_tracer(&mut tracer);
        validator.validate("pass");
    }

    assert_eq!(tracer.lines().len(), 4);
}
