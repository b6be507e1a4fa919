//! Configuration types for printers.
//!
//! This module provides:
//! - `SinkSpec` / `SinkKind`: Typed specification for a channel's sink
//! - `FileExistsPolicy`: Policy for handling existing output files
//! - `PrintConfig`: Deserializable configuration for a whole printer

mod printer_config;
mod spec;

pub use printer_config::{ConfigFormat, PrintConfig, SinkConfig};
pub use spec::{FileExistsPolicy, SinkKind, SinkSpec};
