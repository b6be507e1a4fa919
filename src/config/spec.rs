//! Sink specifications.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::Deserialize;

/// Policy for handling an existing file behind a file sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileExistsPolicy {
    /// Truncate existing files
    Overwrite,
    /// Append to existing files
    #[default]
    Append,
    /// Refuse to open a file that already exists
    Error,
}

impl FromStr for FileExistsPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "overwrite" => Ok(FileExistsPolicy::Overwrite),
            "append" => Ok(FileExistsPolicy::Append),
            "error" => Ok(FileExistsPolicy::Error),
            other => Err(format!("unknown file exists policy: {other}")),
        }
    }
}

/// What kind of sink a channel should get.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkKind {
    Stdout,
    Stderr,
    File {
        path: PathBuf,
        policy: FileExistsPolicy,
    },
    Null,
}

impl fmt::Display for SinkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SinkKind::Stdout => write!(f, "stdout"),
            SinkKind::Stderr => write!(f, "stderr"),
            SinkKind::File { path, .. } => write!(f, "file:{}", path.display()),
            SinkKind::Null => write!(f, "null"),
        }
    }
}

/// Specification for one channel's sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SinkSpec {
    /// Identifier used in errors; defaults to the channel name
    pub id: String,
    pub kind: SinkKind,
}

impl SinkSpec {
    pub fn new(id: impl Into<String>, kind: SinkKind) -> Self {
        Self {
            id: id.into(),
            kind,
        }
    }

    pub fn stdout() -> Self {
        Self::new("-", SinkKind::Stdout)
    }

    pub fn stderr() -> Self {
        Self::new("stderr", SinkKind::Stderr)
    }

    pub fn file(path: impl Into<PathBuf>, policy: FileExistsPolicy) -> Self {
        let path = path.into();
        let id = path.to_string_lossy().into_owned();
        Self::new(id, SinkKind::File { path, policy })
    }
}
