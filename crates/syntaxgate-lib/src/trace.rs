//! Tracing hooks for the validate pipeline.
//!
//! The tracer is a zero-cost abstraction: every hook of [`NoopTracer`] is an
//! `#[inline(always)]` empty function, so untraced validation compiles down
//! to the bare pipeline. [`PrintTracer`] collects one line per stage and
//! keeps no state in the validator itself.

use syntaxgate_core::{Colors, Diagnostic};

use crate::input::Input;
use crate::lang;
use crate::outcome::ParseOutcome;
use crate::tree::SyntaxTree;

/// Verbosity level for trace output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Verbosity {
    /// Stage names and outcome only.
    #[default]
    Default,
    /// Verbose (-v): tree size, diagnostic kind.
    Verbose,
    /// Very verbose (-vv): the s-expression of the tree as well.
    VeryVerbose,
}

/// Observer of the validate state machine.
///
/// Hooks fire in one of two orders:
/// - `validating` → `rejected` → `result_ready`
/// - `validating` → `parsing` → `succeeded` | `failed` → `result_ready`
pub trait Tracer {
    /// Before input-shape validation.
    fn trace_validating(&mut self, input: &Input<'_>);

    /// Input-shape validation failed; no parse will be attempted.
    fn trace_rejected(&mut self, diagnostic: &Diagnostic);

    /// Before the parser runs.
    fn trace_parsing(&mut self, source: &str);

    /// The parser produced a clean tree.
    fn trace_succeeded(&mut self, tree: &SyntaxTree);

    /// The parse produced a syntax error or failed outright.
    fn trace_failed(&mut self, diagnostic: &Diagnostic);

    /// The outcome is assembled and about to be returned.
    fn trace_result_ready(&mut self, outcome: &ParseOutcome);
}

/// No-op tracer that gets optimized away completely.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopTracer;

impl Tracer for NoopTracer {
    #[inline(always)]
    fn trace_validating(&mut self, _input: &Input<'_>) {}

    #[inline(always)]
    fn trace_rejected(&mut self, _diagnostic: &Diagnostic) {}

    #[inline(always)]
    fn trace_parsing(&mut self, _source: &str) {}

    #[inline(always)]
    fn trace_succeeded(&mut self, _tree: &SyntaxTree) {}

    #[inline(always)]
    fn trace_failed(&mut self, _diagnostic: &Diagnostic) {}

    #[inline(always)]
    fn trace_result_ready(&mut self, _outcome: &ParseOutcome) {}
}

impl<T: Tracer + ?Sized> Tracer for &mut T {
    fn trace_validating(&mut self, input: &Input<'_>) {
        (**self).trace_validating(input)
    }

    fn trace_rejected(&mut self, diagnostic: &Diagnostic) {
        (**self).trace_rejected(diagnostic)
    }

    fn trace_parsing(&mut self, source: &str) {
        (**self).trace_parsing(source)
    }

    fn trace_succeeded(&mut self, tree: &SyntaxTree) {
        (**self).trace_succeeded(tree)
    }

    fn trace_failed(&mut self, diagnostic: &Diagnostic) {
        (**self).trace_failed(diagnostic)
    }

    fn trace_result_ready(&mut self, outcome: &ParseOutcome) {
        (**self).trace_result_ready(outcome)
    }
}

/// Width of the stage column.
const STAGE_WIDTH: usize = 10;

/// Tracer that collects one line per stage.
#[derive(Debug, Default)]
pub struct PrintTracer {
    verbosity: Verbosity,
    lines: Vec<String>,
    colors: Colors,
}

impl PrintTracer {
    pub fn new(verbosity: Verbosity, colors: Colors) -> Self {
        Self {
            verbosity,
            lines: Vec::new(),
            colors,
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Write collected lines to stderr, keeping stdout free for results.
    pub fn print(&self) {
        for line in &self.lines {
            eprintln!("{}", line);
        }
    }

    fn push(&mut self, stage: &str, color: &str, detail: String) {
        let c = self.colors;
        self.lines.push(format!(
            "{color}{stage:<width$}{} {detail}",
            c.reset,
            width = STAGE_WIDTH
        ));
    }

    fn push_diagnostic(&mut self, stage: &str, diagnostic: &Diagnostic) {
        let mut detail = match diagnostic.location() {
            Some(location) => format!("{}: {}", location, diagnostic.message()),
            None => diagnostic.message().to_owned(),
        };
        if self.verbosity != Verbosity::Default {
            detail = format!("{} {}", diagnostic.kind(), detail);
        }
        self.push(stage, self.colors.red, detail);
    }
}

impl Tracer for PrintTracer {
    fn trace_validating(&mut self, input: &Input<'_>) {
        let detail = match input.byte_len() {
            Some(len) => format!("{}, {} bytes", input.type_name(), len),
            None => input.type_name().to_owned(),
        };
        self.push("validating", self.colors.blue, detail);
    }

    fn trace_rejected(&mut self, diagnostic: &Diagnostic) {
        self.push_diagnostic("rejected", diagnostic);
    }

    fn trace_parsing(&mut self, source: &str) {
        let detail = format!("{}, {} lines", lang::NAME, source.lines().count());
        self.push("parsing", self.colors.blue, detail);
    }

    fn trace_succeeded(&mut self, tree: &SyntaxTree) {
        let mut detail = tree.root_kind().to_owned();
        if self.verbosity != Verbosity::Default {
            detail = format!("{detail}, {} nodes", tree.node_count());
        }
        self.push("succeeded", self.colors.green, detail);

        if self.verbosity == Verbosity::VeryVerbose {
            let c = self.colors;
            self.lines.push(format!("{}{}{}", c.dim, tree.sexp(), c.reset));
        }
    }

    fn trace_failed(&mut self, diagnostic: &Diagnostic) {
        self.push_diagnostic("failed", diagnostic);
    }

    fn trace_result_ready(&mut self, outcome: &ParseOutcome) {
        let c = self.colors;
        let (status, color) = if outcome.success() {
            ("ok", c.green)
        } else {
            ("error", c.red)
        };
        let detail = format!(
            "{color}{status}{} {}({:.3}ms){}",
            c.reset,
            c.dim,
            outcome.elapsed_secs() * 1000.0,
            c.reset
        );
        self.push("result", c.blue, detail);
    }
}
