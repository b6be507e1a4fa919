//! Tests for the bounded-length policy.

use crate::format::{DEFAULT_MAX_CHARS, RenderLimit, render, try_render};

#[test]
fn default_limit() {
    assert_eq!(RenderLimit::default(), RenderLimit::Chars(DEFAULT_MAX_CHARS));
    assert_eq!(RenderLimit::from(None), RenderLimit::Unbounded);
    assert_eq!(RenderLimit::from(Some(3)), RenderLimit::Chars(3));
}

#[test]
fn keeps_exactly_the_first_chars() {
    let text = render("%s", &args!["hello world"], RenderLimit::Chars(5));
    assert_eq!(text.as_str(), "hello");
    assert!(text.is_truncated());
}

#[test]
fn output_at_the_limit_is_not_truncated() {
    let text = render("%s", &args!["hello world"], RenderLimit::Chars(11));
    assert_eq!(text.as_str(), "hello world");
    assert!(!text.is_truncated());
}

#[test]
fn counts_characters_not_bytes() {
    let text = render("%s!", &args!["héllo"], RenderLimit::Chars(2));
    assert_eq!(text.as_str(), "hé");
}

#[test]
fn padding_is_bounded_too() {
    let text = render("%1000000d", &args![1], RenderLimit::Chars(4));
    assert_eq!(text.as_str(), "    ");
    assert!(text.is_truncated());
}

#[test]
fn truncation_spans_segments() {
    let text = render("ab%dcd%s", &args![12, "xyz"], RenderLimit::Chars(5));
    assert_eq!(text.as_str(), "ab12c");
}

#[test]
fn zero_limit_drops_everything() {
    let text = render("abc", &args![], RenderLimit::Chars(0));
    assert_eq!(text.as_str(), "");
    assert!(text.is_truncated());

    let empty = render("", &args![], RenderLimit::Chars(0));
    assert!(!empty.is_truncated());
}

#[test]
fn truncation_is_deterministic() {
    let args = args!["%d items", 123456, 2.5];
    let first = render("%s / %08d / %e", &args, RenderLimit::Chars(13));
    for _ in 0..10 {
        assert_eq!(render("%s / %08d / %e", &args, RenderLimit::Chars(13)), first);
    }
}

#[test]
fn strict_rendering_truncates_the_same_way() {
    let args = args!["hello world"];
    assert_eq!(
        try_render("%s", &args, RenderLimit::Chars(5)).unwrap(),
        render("%s", &args, RenderLimit::Chars(5))
    );
}

#[test]
fn huge_precision_stays_bounded() {
    let text = render("%.999999999d|", &args![-42], RenderLimit::Chars(6));
    assert_eq!(text.as_str(), "-00000");
    assert!(text.is_truncated());

    let padded = render("%1000000010.999999999d", &args![-42], RenderLimit::Chars(12));
    assert_eq!(padded.as_str(), "          -0");

    let float = render("%.100000000f", &args![1.5], RenderLimit::Chars(8));
    assert_eq!(float.as_str(), "1.500000");
}

#[test]
fn oversized_counts_render_verbatim_when_unbounded() {
    let unbounded = |format: &str, args: &crate::format::ArgList<'_>| {
        render(format, args, RenderLimit::Unbounded).into_string()
    };

    assert_eq!(
        unbounded("[%.99999999999999999999d]", &args![1]),
        "[%.99999999999999999999d]"
    );
    assert_eq!(unbounded("[%*d]", &args![i64::MAX, 7]), "[%*d]");
    assert_eq!(unbounded("[%*d]", &args![i64::MIN, 7]), "[%*d]");
    assert_eq!(unbounded("[%.*f]", &args![u64::MAX, 1.5]), "[%.*f]");
    assert_eq!(unbounded("[%.*f]", &args![-5, 1.5]), "[1.500000]");
}
