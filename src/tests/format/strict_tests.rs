//! Tests for strict rendering and checked requests.

use crate::format::{FormatError, FormatRequest, RenderLimit, check, render, try_render};

#[test]
fn consistent_request_matches_lenient_output() {
    let args = args!["disk full", 28, 0.5];
    let format = "failure: %s (code %d) %.1f";
    let strict = try_render(format, &args, RenderLimit::Unbounded).unwrap();
    assert_eq!(strict, render(format, &args, RenderLimit::Unbounded));
    assert_eq!(strict.as_str(), "failure: disk full (code 28) 0.5");
}

#[test]
fn missing_argument() {
    let err = check("%d %d", &args![1]).unwrap_err();
    assert_eq!(
        err,
        FormatError::MissingArgument {
            offset: 3,
            text: "%d".into(),
        }
    );
}

#[test]
fn argument_type_mismatch() {
    let err = check("%s", &args![1]).unwrap_err();
    assert_eq!(
        err,
        FormatError::ArgumentMismatch {
            offset: 0,
            text: "%s".into(),
            expected: "a string",
            found: "int",
        }
    );
}

#[test]
fn floats_are_not_promoted_when_strict() {
    let err = check("%f", &args![3]).unwrap_err();
    assert!(matches!(
        err,
        FormatError::ArgumentMismatch {
            expected: "a float",
            ..
        }
    ));
}

#[test]
fn star_needs_an_integer() {
    let err = check("%*d", &args!["wide", 1]).unwrap_err();
    assert!(matches!(err, FormatError::ArgumentMismatch { found: "string", .. }));
}

#[test]
fn extra_arguments() {
    let err = check("%d", &args![1, 2, 3]).unwrap_err();
    assert_eq!(err, FormatError::ExtraArguments { extra: 2 });
}

#[test]
fn malformed_directives() {
    assert_eq!(
        check("%y", &args![]).unwrap_err(),
        FormatError::UnknownConversion {
            offset: 0,
            conversion: 'y',
        }
    );
    assert_eq!(
        check("abc %", &args![]).unwrap_err(),
        FormatError::IncompleteDirective { offset: 4 }
    );
    assert_eq!(
        check("%1$d", &args![1]).unwrap_err(),
        FormatError::UnsupportedDirective {
            offset: 0,
            text: "%1$d".into(),
        }
    );
    assert!(matches!(
        check("%n", &args![0]).unwrap_err(),
        FormatError::UnsupportedDirective { .. }
    ));
}

#[test]
fn unsigned_conversions_accept_either_signedness() {
    assert!(check("%u %x %d %c", &args![-1, 255u8, 7u64, 65]).is_ok());
}

#[test]
fn error_messages_name_the_directive() {
    let err = check("value: %5.2f", &args!["x"]).unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("%5.2f"));
    assert!(msg.contains("byte 7"));
}

#[test]
fn format_request_is_checked_at_construction() {
    assert!(FormatRequest::new("%d apples", args!["three"]).is_err());

    let request = FormatRequest::new("%d apples", args![3]).unwrap();
    assert_eq!(request.format(), "%d apples");
    assert_eq!(request.args().len(), 1);
    assert_eq!(request.render(RenderLimit::Unbounded).as_str(), "3 apples");
}

#[test]
fn oversized_counts_are_rejected() {
    assert!(matches!(
        check("%2147483648d", &args![1]).unwrap_err(),
        FormatError::CountOverflow { offset: 0, .. }
    ));
    assert!(matches!(
        check("%*d", &args![i64::MAX, 1]).unwrap_err(),
        FormatError::CountOverflow { .. }
    ));
    assert!(matches!(
        check("%.*d", &args![u64::MAX, 1]).unwrap_err(),
        FormatError::CountOverflow { .. }
    ));
    assert!(check("%*d", &args![-2147483647i64, 1]).is_ok());
}
