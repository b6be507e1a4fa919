//! Printer configuration loaded from JSON, YAML or TOML.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::{FileExistsPolicy, SinkKind, SinkSpec};
use crate::channel::Channel;
use crate::error::{ConfigError, Stage};
use crate::format::{DEFAULT_MAX_CHARS, RenderLimit};

/// Configuration for a whole printer.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PrintConfig {
    /// Maximum rendered length in characters; `null` for no bound
    #[serde(default = "default_max_chars")]
    pub max_chars: Option<usize>,
    /// Disable the length bound (for formats without `null`, such as TOML)
    #[serde(default)]
    pub unbounded: bool,
    /// Sink for the normal channel; stdout when absent
    #[serde(default)]
    pub normal: Option<SinkConfig>,
    /// Sink for the error channel; stderr when absent
    #[serde(default)]
    pub error: Option<SinkConfig>,
}

/// Configuration for one channel's sink.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SinkConfig {
    /// Kind of sink: "stdout", "stderr", "file", "null"
    pub kind: String,
    /// Identifier for errors and log events
    #[serde(default)]
    pub id: Option<String>,
    /// File path (for file sinks)
    #[serde(default)]
    pub path: Option<String>,
    /// File exists policy: "overwrite", "append", "error"
    #[serde(default)]
    pub file_exists_policy: Option<String>,
}

fn default_max_chars() -> Option<usize> {
    Some(DEFAULT_MAX_CHARS)
}

impl Default for PrintConfig {
    fn default() -> Self {
        Self {
            max_chars: default_max_chars(),
            unbounded: false,
            normal: None,
            error: None,
        }
    }
}

/// Serialization format of a configuration document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Yaml,
    Toml,
}

impl ConfigFormat {
    /// Pick the format from a file extension.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "json" => Some(ConfigFormat::Json),
            "yaml" | "yml" => Some(ConfigFormat::Yaml),
            "toml" => Some(ConfigFormat::Toml),
            _ => None,
        }
    }
}

impl PrintConfig {
    /// Create a configuration with the default limit and baseline sinks.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the normal channel's sink.
    pub fn with_normal(mut self, sink: SinkConfig) -> Self {
        self.normal = Some(sink);
        self
    }

    /// Set the error channel's sink.
    pub fn with_error(mut self, sink: SinkConfig) -> Self {
        self.error = Some(sink);
        self
    }

    /// Set the length bound.
    pub fn with_max_chars(mut self, max_chars: Option<usize>) -> Self {
        self.max_chars = max_chars;
        self
    }

    /// The render limit this configuration asks for.
    pub fn limit(&self) -> RenderLimit {
        if self.unbounded {
            RenderLimit::Unbounded
        } else {
            RenderLimit::from(self.max_chars)
        }
    }

    /// The sink configuration for `channel`, if any.
    pub fn sink(&self, channel: Channel) -> Option<&SinkConfig> {
        match channel {
            Channel::Normal => self.normal.as_ref(),
            Channel::Error => self.error.as_ref(),
        }
    }

    /// Parse a configuration document.
    pub fn parse(source: &str, format: ConfigFormat) -> Result<Self, ConfigError> {
        let parse_err = |e: Box<dyn std::error::Error + Send + Sync>| {
            ConfigError::new(Stage::Parse, format!("{format:?}"), e)
        };
        match format {
            #[cfg(feature = "json")]
            ConfigFormat::Json => serde_json::from_str(source).map_err(|e| parse_err(Box::new(e))),

            #[cfg(feature = "yaml")]
            ConfigFormat::Yaml => serde_yaml::from_str(source).map_err(|e| parse_err(Box::new(e))),

            #[cfg(feature = "toml")]
            ConfigFormat::Toml => toml::from_str(source).map_err(|e| parse_err(Box::new(e))),

            #[allow(unreachable_patterns)]
            other => {
                let _ = source;
                Err(parse_err(
                    format!("{other:?} configuration support is not enabled").into(),
                ))
            }
        }
    }

    /// Load a configuration file, choosing the parser by extension.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let target = path.display().to_string();

        let format = path
            .extension()
            .and_then(|s| s.to_str())
            .and_then(ConfigFormat::from_extension)
            .ok_or_else(|| {
                ConfigError::new(Stage::Load, &target, "unrecognized configuration extension")
            })?;

        let source =
            std::fs::read_to_string(path).map_err(|e| ConfigError::new(Stage::Load, &target, e))?;

        Self::parse(&source, format).map_err(|e| ConfigError { target, ..e })
    }
}

impl SinkConfig {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            id: None,
            path: None,
            file_exists_policy: None,
        }
    }

    pub fn file(path: impl Into<String>) -> Self {
        Self {
            path: Some(path.into()),
            ..Self::new("file")
        }
    }

    pub fn with_file_exists_policy(mut self, policy: impl Into<String>) -> Self {
        self.file_exists_policy = Some(policy.into());
        self
    }

    /// Resolve this entry into a sink specification for `channel`.
    pub fn to_spec(&self, channel: Channel) -> Result<SinkSpec, ConfigError> {
        let id = self.id.clone().unwrap_or_else(|| channel.to_string());
        let resolve_err = |msg: String| ConfigError::new(Stage::ResolveSink, id.clone(), msg);

        let kind = match self.kind.to_ascii_lowercase().as_str() {
            "stdout" | "-" => SinkKind::Stdout,
            "stderr" => SinkKind::Stderr,
            "null" => SinkKind::Null,
            "file" => {
                let path = self
                    .path
                    .as_ref()
                    .ok_or_else(|| resolve_err("file sink requires 'path' field".into()))?;
                let policy = match self.file_exists_policy.as_deref() {
                    Some(s) => s.parse::<FileExistsPolicy>().map_err(resolve_err)?,
                    None => FileExistsPolicy::default(),
                };
                SinkKind::File {
                    path: PathBuf::from(path),
                    policy,
                }
            }
            other => return Err(resolve_err(format!("unknown sink kind: {other}"))),
        };

        Ok(SinkSpec::new(id, kind))
    }
}
