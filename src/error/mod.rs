//! Error types for configuring printers.
//!
//! Emitting text never fails; these errors only come out of loading
//! configuration and building sinks from it. Format/argument mismatches
//! found by strict rendering are `FormatError` in the `format` module.
//!
//! This module provides:
//! - `Stage`: Indicates where configuration failed
//! - `ConfigError`: A single configuration error with context

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Reading the configuration file
    Load,
    /// Deserializing the configuration
    Parse,
    /// Turning a sink entry into a sink specification
    ResolveSink,
    /// Opening the sink's destination
    Open,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Load => write!(f, "Load"),
            Stage::Parse => write!(f, "Parse"),
            Stage::ResolveSink => write!(f, "ResolveSink"),
            Stage::Open => write!(f, "Open"),
        }
    }
}

#[derive(Debug)]
pub struct ConfigError {
    /// Stage where the error occurred
    pub stage: Stage,
    /// What was being configured (file path, sink id, channel name)
    pub target: String,
    /// The underlying error
    pub error: Box<dyn std::error::Error + Send + Sync>,
}

impl ConfigError {
    pub fn new(
        stage: Stage,
        target: impl Into<String>,
        error: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self {
            stage,
            target: target.into(),
            error: error.into(),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.stage, self.target, self.error)
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.error.as_ref())
    }
}

#[cfg(feature = "miette")]
mod miette_impl;

#[cfg(feature = "miette")]
pub use miette_impl::*;
