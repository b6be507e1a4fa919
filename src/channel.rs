//! The two output channels.

use std::fmt;
use std::str::FromStr;

/// Output channel. There are exactly two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    /// Informational output, stdout by default
    Normal,
    /// Diagnostic output, stderr by default
    Error,
}

impl Channel {
    /// Both channels, in index order.
    pub const ALL: [Channel; 2] = [Channel::Normal, Channel::Error];

    pub(crate) fn index(self) -> usize {
        match self {
            Channel::Normal => 0,
            Channel::Error => 1,
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Channel::Normal => write!(f, "normal"),
            Channel::Error => write!(f, "error"),
        }
    }
}

impl FromStr for Channel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "normal" | "stdout" | "out" => Ok(Channel::Normal),
            "error" | "stderr" | "err" => Ok(Channel::Error),
            other => Err(format!("unknown channel: {other}")),
        }
    }
}
