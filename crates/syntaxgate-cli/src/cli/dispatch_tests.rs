//! Tests for CLI dispatch logic.
//!
//! These tests verify:
//! 1. Params extraction: correct fields are extracted from ArgMatches
//! 2. Conversion: color choice and verbosity count resolve into command args
//! 3. Rejection: conflicting or unknown values fail at the clap level

use std::path::PathBuf;

use syntaxgate_lib::Verbosity;

use super::*;
use crate::cli::commands::{ast_command, check_command};
use crate::commands::ast::AstArgs;
use crate::commands::check::CheckArgs;

fn check_args(argv: &[&str]) -> CheckArgs {
    let m = check_command()
        .try_get_matches_from(argv)
        .expect("check should accept args");
    CheckParams::from_matches(&m).into()
}

#[test]
fn check_defaults() {
    let m = check_command()
        .try_get_matches_from(["check", "app.py"])
        .unwrap();
    let params = CheckParams::from_matches(&m);

    assert_eq!(params.source_path, Some(PathBuf::from("app.py")));
    assert_eq!(params.source_text, None);
    assert_eq!(params.filename, None);
    assert_eq!(params.format, OutputFormat::Text);
    assert_eq!(params.color, ColorChoice::Auto);
    assert!(!params.trace);
    assert_eq!(params.verbose, 0);
}

#[test]
fn check_accepts_inline_source() {
    let args = check_args(&["check", "-s", "x = 1", "--filename", "snippet.py"]);

    assert_eq!(args.source.path, None);
    assert_eq!(args.source.text.as_deref(), Some("x = 1"));
    assert_eq!(args.source.filename.as_deref(), Some("snippet.py"));
}

#[test]
fn check_accepts_stdin_dash() {
    let args = check_args(&["check", "-"]);

    assert_eq!(args.source.path, Some(PathBuf::from("-")));
}

#[test]
fn check_json_format() {
    let args = check_args(&["check", "app.py", "--format", "json"]);

    assert_eq!(args.format, OutputFormat::Json);
}

#[test]
fn check_color_always_and_never() {
    assert!(check_args(&["check", "app.py", "--color", "always"]).color);
    assert!(!check_args(&["check", "app.py", "--color", "never"]).color);
}

#[test]
fn check_trace_off_by_default() {
    let args = check_args(&["check", "app.py"]);

    assert_eq!(args.trace, None);
}

#[test]
fn check_trace_flag() {
    let args = check_args(&["check", "app.py", "--trace"]);

    assert_eq!(args.trace, Some(Verbosity::Default));
}

#[test]
fn check_verbose_implies_trace() {
    assert_eq!(
        check_args(&["check", "app.py", "-v"]).trace,
        Some(Verbosity::Verbose)
    );
    assert_eq!(
        check_args(&["check", "app.py", "-vv"]).trace,
        Some(Verbosity::VeryVerbose)
    );
    assert_eq!(
        check_args(&["check", "app.py", "--trace", "-vvv"]).trace,
        Some(Verbosity::VeryVerbose)
    );
}

#[test]
fn check_rejects_both_sources() {
    let result = check_command().try_get_matches_from(["check", "app.py", "-s", "x = 1"]);

    assert!(result.is_err(), "-s should conflict with SOURCE");
}

#[test]
fn check_rejects_unknown_format() {
    let result = check_command().try_get_matches_from(["check", "app.py", "--format", "yaml"]);

    assert!(result.is_err(), "--format should only accept text|json");
}

#[test]
fn ast_flags() {
    let m = ast_command()
        .try_get_matches_from(["ast", "app.py", "--raw", "--spans", "--color", "never"])
        .unwrap();
    let args: AstArgs = AstParams::from_matches(&m).into();

    assert_eq!(args.source.path, Some(PathBuf::from("app.py")));
    assert!(args.raw);
    assert!(args.spans);
    assert!(!args.color);
}

#[test]
fn ast_rejects_check_flags() {
    let result = ast_command().try_get_matches_from(["ast", "app.py", "--format", "json"]);

    assert!(result.is_err(), "ast has no --format");
}

#[test]
fn check_help_lists_trace_flags() {
    let mut cmd = check_command();
    let help = cmd.render_help().to_string();

    assert!(help.contains("--trace"), "check help should show --trace");
    assert!(help.contains("--format"), "check help should show --format");
}

#[test]
fn cli_requires_subcommand() {
    let result = build_cli().try_get_matches_from(["syntaxgate"]);

    assert!(result.is_err());
}
