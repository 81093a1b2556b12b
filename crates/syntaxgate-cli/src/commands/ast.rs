//! Command: show the syntax tree of valid Python source.

use std::process::ExitCode;

use syntaxgate_core::Colors;
use syntaxgate_lib::validate;

use super::check::{print_diagnostics, usage_error};
use super::source::{self, SourceArgs};

pub struct AstArgs {
    pub source: SourceArgs,
    pub raw: bool,
    pub spans: bool,
    pub color: bool,
}

pub fn run(args: AstArgs) -> ExitCode {
    let source = match source::load(&args.source) {
        Ok(source) => source,
        Err(e) => return usage_error(&e),
    };

    let outcome = validate(&source.bytes);
    let Some(tree) = outcome.tree() else {
        print_diagnostics(&outcome, &source, args.color);
        return ExitCode::FAILURE;
    };

    print!(
        "{}",
        tree.dump()
            .raw(args.raw)
            .spans(args.spans)
            .colors(Colors::new(args.color))
            .render()
    );
    ExitCode::SUCCESS
}
