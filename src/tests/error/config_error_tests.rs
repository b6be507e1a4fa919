//! Tests for configuration errors.

use std::error::Error;
use std::io;

use crate::error::{ConfigError, Stage};

#[test]
fn display_includes_stage_and_target() {
    let err = ConfigError::new(Stage::Open, "out.log", "permission denied");
    assert_eq!(err.to_string(), "[Open] out.log: permission denied");
}

#[test]
fn source_is_the_underlying_error() {
    let err = ConfigError::new(
        Stage::Load,
        "printer.yaml",
        io::Error::new(io::ErrorKind::NotFound, "no such file"),
    );

    let source = err.source().unwrap();
    assert_eq!(source.to_string(), "no such file");
    assert!(source.downcast_ref::<io::Error>().is_some());
}

#[test]
fn stage_display() {
    assert_eq!(Stage::Load.to_string(), "Load");
    assert_eq!(Stage::Parse.to_string(), "Parse");
    assert_eq!(Stage::ResolveSink.to_string(), "ResolveSink");
    assert_eq!(Stage::Open.to_string(), "Open");
}

#[cfg(feature = "miette")]
#[test]
fn diagnostic_conversion() {
    use crate::error::PrintDiagnostic;
    use crate::format::check;

    let diag = PrintDiagnostic::from(ConfigError::new(Stage::ResolveSink, "normal", "bad kind"));
    assert_eq!(diag.to_string(), "[ResolveSink] on 'normal'");
    assert!(diag.help.unwrap().contains("stdout, stderr, file and null"));

    let format_err = check("%d", &args!["x"]).unwrap_err();
    let diag = PrintDiagnostic::from(format_err);
    assert!(diag.source.is_some());
}
