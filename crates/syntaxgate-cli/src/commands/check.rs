//! Command: validate Python source and report the outcome.

use std::process::ExitCode;

use syntaxgate_core::Colors;
use syntaxgate_lib::{ParseOutcome, PrintTracer, Verbosity, lang, validate, validate_traced};

use super::source::{self, Source, SourceArgs};
use crate::cli::OutputFormat;

pub struct CheckArgs {
    pub source: SourceArgs,
    pub format: OutputFormat,
    pub color: bool,
    pub trace: Option<Verbosity>,
}

pub fn run(args: CheckArgs) -> ExitCode {
    let source = match source::load(&args.source) {
        Ok(source) => source,
        Err(e) => return usage_error(&e),
    };

    if let Some(ext) = source.extension()
        && !lang::is_source_ext(ext)
    {
        eprintln!(
            "warning: `{}` does not look like a Python file",
            source.label().unwrap_or(ext)
        );
    }

    let outcome = match args.trace {
        Some(verbosity) => {
            let mut tracer = PrintTracer::new(verbosity, Colors::new(args.color));
            let outcome = validate_traced(&source.bytes, &mut tracer);
            tracer.print();
            outcome
        }
        None => validate(&source.bytes),
    };

    match args.format {
        OutputFormat::Json => match outcome.to_json() {
            Ok(json) => println!("{json}"),
            Err(e) => return usage_error(&e),
        },
        OutputFormat::Text => {
            if !outcome.success() {
                print_diagnostics(&outcome, &source, args.color);
            }
        }
    }

    exit_code(&outcome)
}

/// Render the outcome's diagnostics to stderr against the loaded source.
pub(crate) fn print_diagnostics(outcome: &ParseOutcome, source: &Source, color: bool) {
    let text = source.text();
    let mut printer = outcome.diagnostics().printer().source(&text).colored(color);
    if let Some(label) = source.label() {
        printer = printer.path(label);
    }
    eprint!("{}", printer.render());
}

pub(crate) fn exit_code(outcome: &ParseOutcome) -> ExitCode {
    if outcome.success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

pub(crate) fn usage_error(err: &dyn std::error::Error) -> ExitCode {
    eprintln!("error: {err}");
    ExitCode::from(2)
}
