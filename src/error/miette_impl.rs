//! Miette integration for pretty error reporting.

use miette::{Diagnostic, Severity};
use thiserror::Error;

use super::{ConfigError, Stage};
use crate::format::FormatError;

/// A diagnostic wrapper for printer errors compatible with miette.
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
pub struct PrintDiagnostic {
    /// The error message
    pub message: String,

    #[source]
    /// The underlying error source
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,

    #[help]
    /// Help text for the user
    pub help: Option<String>,

    #[diagnostic(severity)]
    /// Severity level
    pub severity: Severity,
}

impl From<ConfigError> for PrintDiagnostic {
    fn from(e: ConfigError) -> Self {
        let help = match e.stage {
            Stage::Load | Stage::Parse => "Check the configuration file and its extension",
            Stage::ResolveSink => "Sink kinds are stdout, stderr, file and null",
            Stage::Open => "Check that the sink's file path is writable",
        };
        PrintDiagnostic {
            message: format!("[{}] on '{}'", e.stage, e.target),
            source: Some(e.error),
            help: Some(help.into()),
            severity: Severity::Error,
        }
    }
}

impl From<FormatError> for PrintDiagnostic {
    fn from(e: FormatError) -> Self {
        PrintDiagnostic {
            message: "format string does not match its arguments".into(),
            source: Some(Box::new(e)),
            help: Some("Each % directive needs one argument of a matching type".into()),
            severity: Severity::Error,
        }
    }
}

impl From<ConfigError> for miette::Report {
    fn from(e: ConfigError) -> Self {
        miette::Report::new(PrintDiagnostic::from(e))
    }
}
