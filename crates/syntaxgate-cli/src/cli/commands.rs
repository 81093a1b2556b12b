//! Command builders for the CLI.

use clap::Command;

use super::args::*;

/// Build the complete CLI with all subcommands.
pub fn build_cli() -> Command {
    Command::new("syntaxgate")
        .about("Python syntax pre-validation with structured diagnostics")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(check_command())
        .subcommand(ast_command())
}

/// Validate Python source.
pub fn check_command() -> Command {
    Command::new("check")
        .about("Validate Python syntax")
        .override_usage(
            "\
  syntaxgate check <SOURCE>
  syntaxgate check -s <TEXT>",
        )
        .after_help(
            r#"EXAMPLES:
  syntaxgate check app.py                   # silent on success
  syntaxgate check app.py --format json     # structured outcome on stdout
  cat app.py | syntaxgate check - --filename app.py
  syntaxgate check -s 'def f(:' -v          # trace the pipeline"#,
        )
        .arg(source_path_arg())
        .arg(source_text_arg())
        .arg(filename_arg())
        .arg(format_arg())
        .arg(color_arg())
        .arg(trace_arg())
        .arg(verbose_arg())
}

/// Show the syntax tree of valid source.
pub fn ast_command() -> Command {
    Command::new("ast")
        .about("Show the syntax tree of Python source")
        .override_usage(
            "\
  syntaxgate ast <SOURCE>
  syntaxgate ast -s <TEXT>",
        )
        .after_help(
            r#"EXAMPLES:
  syntaxgate ast app.py                # named nodes
  syntaxgate ast app.py --raw          # include keywords and punctuation
  syntaxgate ast -s 'x = 1' --spans    # inline source with positions"#,
        )
        .arg(source_path_arg())
        .arg(source_text_arg())
        .arg(filename_arg())
        .arg(raw_arg())
        .arg(spans_arg())
        .arg(color_arg())
}
