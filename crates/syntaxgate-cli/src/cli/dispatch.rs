//! Dispatch logic: extract params from ArgMatches and convert to command args.
//!
//! `*Params` mirror the command `*Args` but keep clap-level choices
//! (`ColorChoice`, raw verbosity count); the `Into` impls resolve them.

use std::path::PathBuf;

use clap::ArgMatches;
use syntaxgate_lib::Verbosity;

use super::{ColorChoice, OutputFormat};
use crate::commands::ast::AstArgs;
use crate::commands::check::CheckArgs;
use crate::commands::source::SourceArgs;

pub struct CheckParams {
    pub source_path: Option<PathBuf>,
    pub source_text: Option<String>,
    pub filename: Option<String>,
    pub format: OutputFormat,
    pub color: ColorChoice,
    pub trace: bool,
    pub verbose: u8,
}

impl CheckParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            source_path: m.get_one::<PathBuf>("source_path").cloned(),
            source_text: m.get_one::<String>("source_text").cloned(),
            filename: m.get_one::<String>("filename").cloned(),
            format: parse_format(m),
            color: parse_color(m),
            trace: m.get_flag("trace"),
            verbose: m.get_count("verbose"),
        }
    }
}

impl From<CheckParams> for CheckArgs {
    fn from(p: CheckParams) -> Self {
        // -v alone is enough to turn tracing on
        let trace = (p.trace || p.verbose > 0).then(|| match p.verbose {
            0 => Verbosity::Default,
            1 => Verbosity::Verbose,
            _ => Verbosity::VeryVerbose,
        });

        Self {
            source: SourceArgs {
                path: p.source_path,
                text: p.source_text,
                filename: p.filename,
            },
            format: p.format,
            color: p.color.should_colorize(),
            trace,
        }
    }
}

pub struct AstParams {
    pub source_path: Option<PathBuf>,
    pub source_text: Option<String>,
    pub filename: Option<String>,
    pub raw: bool,
    pub spans: bool,
    pub color: ColorChoice,
}

impl AstParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            source_path: m.get_one::<PathBuf>("source_path").cloned(),
            source_text: m.get_one::<String>("source_text").cloned(),
            filename: m.get_one::<String>("filename").cloned(),
            raw: m.get_flag("raw"),
            spans: m.get_flag("spans"),
            color: parse_color(m),
        }
    }
}

impl From<AstParams> for AstArgs {
    fn from(p: AstParams) -> Self {
        Self {
            source: SourceArgs {
                path: p.source_path,
                text: p.source_text,
                filename: p.filename,
            },
            raw: p.raw,
            spans: p.spans,
            color: p.color.should_colorize(),
        }
    }
}

fn parse_color(m: &ArgMatches) -> ColorChoice {
    match m.get_one::<String>("color").map(|s| s.as_str()) {
        Some("always") => ColorChoice::Always,
        Some("never") => ColorChoice::Never,
        _ => ColorChoice::Auto,
    }
}

fn parse_format(m: &ArgMatches) -> OutputFormat {
    match m.get_one::<String>("format").map(|s| s.as_str()) {
        Some("json") => OutputFormat::Json,
        _ => OutputFormat::Text,
    }
}
