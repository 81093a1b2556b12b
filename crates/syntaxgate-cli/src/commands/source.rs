//! Reading source text from a file, stdin, or the command line.

use std::borrow::Cow;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

/// Where the source comes from, plus an optional display label.
#[derive(Debug, Default)]
pub struct SourceArgs {
    pub path: Option<PathBuf>,
    pub text: Option<String>,
    pub filename: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("cannot use both --source and positional SOURCE")]
    Conflict,

    #[error("source required (positional or --source)")]
    Missing,

    #[error("failed to read {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("failed to read stdin: {0}")]
    Stdin(#[source] io::Error),
}

/// Loaded source, kept as raw bytes so non-UTF-8 input reaches the validator.
#[derive(Debug)]
pub struct Source {
    pub bytes: Vec<u8>,
    label: Option<String>,
    path: Option<PathBuf>,
}

impl Source {
    /// Label for diagnostics: `--filename`, else the file path.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn extension(&self) -> Option<&str> {
        self.path.as_deref()?.extension()?.to_str()
    }

    /// Text for snippet rendering; invalid UTF-8 never carries a location.
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.bytes)
    }
}

pub fn load(args: &SourceArgs) -> Result<Source, SourceError> {
    let (bytes, path) = match (&args.text, &args.path) {
        (Some(text), None) => (text.clone().into_bytes(), None),
        (None, Some(path)) if is_stdin(path) => (read_stdin()?, None),
        (None, Some(path)) => (read_file(path)?, Some(path.clone())),
        (Some(_), Some(_)) => return Err(SourceError::Conflict),
        (None, None) => return Err(SourceError::Missing),
    };

    let label = args
        .filename
        .clone()
        .or_else(|| path.as_ref().map(|p| p.display().to_string()));

    Ok(Source { bytes, label, path })
}

fn is_stdin(path: &Path) -> bool {
    path.as_os_str() == "-"
}

fn read_stdin() -> Result<Vec<u8>, SourceError> {
    let mut buf = Vec::new();
    io::stdin()
        .read_to_end(&mut buf)
        .map_err(SourceError::Stdin)?;
    Ok(buf)
}

fn read_file(path: &Path) -> Result<Vec<u8>, SourceError> {
    fs::read(path).map_err(|source| SourceError::Read {
        path: path.to_path_buf(),
        source,
    })
}
