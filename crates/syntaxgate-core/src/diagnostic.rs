use std::fmt;
use std::num::NonZeroU32;
use std::ops::Range;

use serde::ser::{Serialize, SerializeStruct, Serializer};

/// Category of a diagnostic.
///
/// Serialized under the `kind` key using the variant name verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
pub enum DiagnosticKind {
    /// The caller did not supply a non-empty string. Never carries a location.
    InputError,
    /// A syntax error reported by the parser, or an unexpected failure while
    /// parsing (the latter has no location).
    ParseError,
}

impl DiagnosticKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InputError => "InputError",
            Self::ParseError => "ParseError",
        }
    }
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Every diagnostic the validator emits today is an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => f.write_str("error"),
        }
    }
}

/// Pipeline stage that produced a diagnostic.
///
/// Only `Syntax` exists; later stages (semantic, style) would add variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    #[default]
    Syntax,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Syntax => f.write_str("syntax"),
        }
    }
}

/// Source position of a syntax error.
///
/// `line` and `column` are both 1-based; `column` counts characters (Unicode
/// scalar values) from the start of the line. `range` is the byte range of the
/// offending node, kept for snippet rendering only.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Location {
    line: NonZeroU32,
    column: NonZeroU32,
    range: Range<usize>,
}

impl Location {
    pub fn new(line: NonZeroU32, column: NonZeroU32, range: Range<usize>) -> Self {
        Self {
            line,
            column,
            range,
        }
    }

    pub fn line(&self) -> u32 {
        self.line.get()
    }

    pub fn column(&self) -> u32 {
        self.column.get()
    }

    pub fn range(&self) -> Range<usize> {
        self.range.clone()
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// One structured syntax problem.
///
/// Line and column live together in an optional [`Location`], so they are
/// either both present or both absent.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Diagnostic {
    kind: DiagnosticKind,
    location: Option<Location>,
    message: String,
    severity: Severity,
    stage: Stage,
}

impl Diagnostic {
    fn new(kind: DiagnosticKind, location: Option<Location>, message: impl Into<String>) -> Self {
        Self {
            kind,
            location,
            message: message.into(),
            severity: Severity::Error,
            stage: Stage::Syntax,
        }
    }

    /// Input-shape rejection.
    pub fn input(message: impl Into<String>) -> Self {
        Self::new(DiagnosticKind::InputError, None, message)
    }

    /// Syntax error reported by the parser at a known position.
    pub fn syntax(message: impl Into<String>, location: Location) -> Self {
        Self::new(DiagnosticKind::ParseError, Some(location), message)
    }

    /// Unexpected failure while parsing; no position is known.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(DiagnosticKind::ParseError, None, message)
    }

    pub fn kind(&self) -> DiagnosticKind {
        self.kind
    }

    pub fn location(&self) -> Option<&Location> {
        self.location.as_ref()
    }

    pub fn line(&self) -> Option<u32> {
        self.location.as_ref().map(Location::line)
    }

    pub fn column(&self) -> Option<u32> {
        self.location.as_ref().map(Location::column)
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(location) = &self.location {
            write!(f, "{}: ", location)?;
        }
        write!(f, "{}[{}]: {}", self.severity, self.stage, self.message)
    }
}

impl Serialize for Diagnostic {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Diagnostic", 6)?;
        state.serialize_field("kind", &self.kind)?;
        state.serialize_field("line", &self.line())?;
        state.serialize_field("column", &self.column())?;
        state.serialize_field("message", &self.message)?;
        state.serialize_field("severity", &self.severity)?;
        state.serialize_field("stage", &self.stage)?;
        state.end()
    }
}
