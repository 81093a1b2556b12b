//! The validate pipeline: input shape, safe parse, outcome assembly.
//!
//! ```text
//! Start → Validating → Rejected ───────────────→ ResultReady
//!                    ↘ Parsing → Succeeded/Failed ↗
//! ```

use std::any::Any;
use std::cell::Cell;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Once;
use std::time::Instant;

use arborium_tree_sitter::Tree;
use syntaxgate_core::Diagnostic;

use crate::input::Input;
use crate::outcome::ParseOutcome;
use crate::trace::{NoopTracer, Tracer};
use crate::tree::SyntaxTree;
use crate::{Error, Result, conformance, lang, syntax};

/// Validate `input` and parse it as Python.
///
/// Never panics and never returns an error value: every failure becomes a
/// diagnostic in the outcome.
pub fn validate<'a>(input: impl Into<Input<'a>>) -> ParseOutcome {
    validate_traced(input, &mut NoopTracer)
}

/// [`validate`] with a tracer observing each stage.
pub fn validate_traced<'a, T: Tracer + ?Sized>(
    input: impl Into<Input<'a>>,
    tracer: &mut T,
) -> ParseOutcome {
    let start = Instant::now();
    let input = input.into();
    tracer.trace_validating(&input);

    let outcome = match input.source() {
        Err(diagnostic) => {
            tracer.trace_rejected(&diagnostic);
            ParseOutcome::failed(diagnostic, start.elapsed())
        }
        Ok(source) => {
            tracer.trace_parsing(source);
            let parsed = parse(source);
            let elapsed = start.elapsed();
            match parsed {
                Ok(tree) => {
                    tracer.trace_succeeded(&tree);
                    ParseOutcome::succeeded(tree, elapsed)
                }
                Err(diagnostic) => {
                    tracer.trace_failed(&diagnostic);
                    ParseOutcome::failed(diagnostic, elapsed)
                }
            }
        }
    };

    tracer.trace_result_ready(&outcome);
    outcome
}

/// Parse already-validated source.
///
/// Yields the tree, or exactly one `ParseError`: located for a syntax error,
/// unlocated for a failure of the parser itself.
pub fn parse(source: &str) -> std::result::Result<SyntaxTree, Diagnostic> {
    parse_guarded(source, || {
        let mut parser = lang::parser()?;
        parser.parse(source, None).ok_or(Error::NoTree)
    })
}

/// Classify the tree `run` produces for `source`; failures of `run` itself,
/// panics included, become an unlocated diagnostic.
pub(crate) fn parse_guarded(
    source: &str,
    run: impl FnOnce() -> Result<Tree>,
) -> std::result::Result<SyntaxTree, Diagnostic> {
    let tree = guarded(run).map_err(|err| Diagnostic::internal(err.to_string()))?;
    let root = tree.root_node();
    let error = syntax::first_error(root, source)
        .or_else(|| conformance::first_violation(root, source));
    match error {
        Some(diagnostic) => Err(diagnostic),
        None => Ok(SyntaxTree::new(tree, source)),
    }
}

/// Run `f`, turning a panic into [`Error::Panicked`].
///
/// The panic message is not printed while `f` runs on this thread.
pub(crate) fn guarded<T>(f: impl FnOnce() -> Result<T>) -> Result<T> {
    silence_panics(|| panic::catch_unwind(AssertUnwindSafe(f)))
        .map_err(|payload| Error::Panicked(panic_message(payload.as_ref())))?
}

thread_local! {
    static SILENCED: Cell<bool> = const { Cell::new(false) };
}

static QUIET_HOOK: Once = Once::new();

/// Whether panics on this thread currently skip the panic hook.
pub(crate) fn panics_silenced() -> bool {
    SILENCED.with(Cell::get)
}

/// Wraps the process panic hook once; the wrapper stays quiet only on a
/// thread that is inside `silence_panics`, so other threads are unaffected.
fn silence_panics<R>(f: impl FnOnce() -> R) -> R {
    QUIET_HOOK.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            if !panics_silenced() {
                previous(info);
            }
        }));
    });

    let outer = SILENCED.with(|s| s.replace(true));
    let result = f();
    SILENCED.with(|s| s.set(outer));
    result
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        return (*msg).to_owned();
    }
    if let Some(msg) = payload.downcast_ref::<String>() {
        return msg.clone();
    }
    "unknown panic".to_owned()
}

/// Reusable validator that keeps the outcome of its most recent call.
///
/// Each `validate` call discards the previous outcome before doing any work.
/// Taking `&mut self` means one caller at a time; share across threads only
/// behind a lock, or use one validator per thread.
#[derive(Debug, Default)]
pub struct SyntaxValidator<T: Tracer = NoopTracer> {
    tracer: T,
    last: Option<ParseOutcome>,
}

impl SyntaxValidator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<T: Tracer> SyntaxValidator<T> {
    pub fn with_tracer(tracer: T) -> Self {
        Self { tracer, last: None }
    }

    pub fn validate<'a>(&mut self, input: impl Into<Input<'a>>) -> &ParseOutcome {
        self.last = None;
        let outcome = validate_traced(input, &mut self.tracer);
        self.last.insert(outcome)
    }

    /// Whether the last call produced any diagnostic.
    pub fn has_errors(&self) -> bool {
        self.last.as_ref().is_some_and(ParseOutcome::has_errors)
    }

    /// Tree of the last call, only if it succeeded.
    pub fn tree(&self) -> Option<&SyntaxTree> {
        self.last
            .as_ref()
            .filter(|outcome| outcome.success())
            .and_then(ParseOutcome::tree)
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        self.last
            .as_ref()
            .map(|outcome| outcome.diagnostics().as_slice())
            .unwrap_or_default()
    }

    pub fn outcome(&self) -> Option<&ParseOutcome> {
        self.last.as_ref()
    }

    pub fn take_outcome(&mut self) -> Option<ParseOutcome> {
        self.last.take()
    }

    pub fn tracer(&self) -> &T {
        &self.tracer
    }

    pub fn into_tracer(self) -> T {
        self.tracer
    }
}
