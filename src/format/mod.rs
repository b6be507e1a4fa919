//! Format rendering.
//!
//! This module provides:
//! - `FormatArg` / `ArgList`: the type-erased argument list both call shapes share
//! - `render`: lenient, total rendering used by the emitting entry points
//! - `try_render` / `check` / `FormatRequest`: strict rendering that reports
//!   format/argument mismatches as `FormatError`
//! - `RenderLimit`: the bounded-length policy
//!
//! The grammar is C99 printf as implemented by glibc: flags `-+ #0`, width
//! and precision (decimal or `*`), the length modifiers `hh h l ll q L j z t`
//! and the conversions `d i u o x X c s p f F e E g G a A n %`. `%n` never
//! writes anything back.

mod args;
mod convert;
pub mod directive;

use std::fmt;
use std::ops::Deref;

use thiserror::Error;

pub use args::{ArgList, FormatArg};
use args::ArgCursor;
use convert::Output;
use directive::{InvalidKind, Segment};

/// Default bound on rendered text, in characters (ten 8 KiB console buffers).
pub const DEFAULT_MAX_CHARS: usize = 10 * 8192;

/// Errors reported by strict rendering.
///
/// Offsets are byte offsets of the directive's `%` in the format string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("directive `{text}` at byte {offset} has no matching argument")]
    MissingArgument { offset: usize, text: String },

    #[error("directive `{text}` at byte {offset} expects {expected}, got {found}")]
    ArgumentMismatch {
        offset: usize,
        text: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("{extra} argument(s) left over after the last directive")]
    ExtraArguments { extra: usize },

    #[error("unknown conversion `{conversion}` at byte {offset}")]
    UnknownConversion { offset: usize, conversion: char },

    #[error("incomplete directive at byte {offset}")]
    IncompleteDirective { offset: usize },

    #[error("unsupported directive `{text}` at byte {offset}")]
    UnsupportedDirective { offset: usize, text: String },

    #[error("width or precision of `{text}` at byte {offset} exceeds {max}", max = directive::MAX_COUNT)]
    CountOverflow { offset: usize, text: String },
}

/// Maximum length of rendered text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderLimit {
    Unbounded,
    /// Keep at most this many characters
    Chars(usize),
}

impl Default for RenderLimit {
    fn default() -> Self {
        RenderLimit::Chars(DEFAULT_MAX_CHARS)
    }
}

impl RenderLimit {
    pub fn max_chars(&self) -> Option<usize> {
        match self {
            RenderLimit::Unbounded => None,
            RenderLimit::Chars(n) => Some(*n),
        }
    }
}

impl From<Option<usize>> for RenderLimit {
    fn from(max: Option<usize>) -> Self {
        match max {
            Some(n) => RenderLimit::Chars(n),
            None => RenderLimit::Unbounded,
        }
    }
}

/// Final text produced by the renderer.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RenderedText {
    text: String,
    truncated: bool,
}

impl RenderedText {
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Whether the limit cut the text short.
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    pub fn into_string(self) -> String {
        self.text
    }
}

impl Deref for RenderedText {
    type Target = str;

    fn deref(&self) -> &str {
        &self.text
    }
}

impl AsRef<str> for RenderedText {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for RenderedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Render `format` with `args`.
///
/// Never fails. A directive without a usable argument is copied to the
/// output verbatim, as are unknown or incomplete directives. Surplus
/// arguments are ignored.
pub fn render(format: &str, args: &ArgList<'_>, limit: RenderLimit) -> RenderedText {
    let mut out = Output::new(limit.max_chars());
    let mut cursor = ArgCursor::new(args);

    for segment in directive::parse(format) {
        match segment {
            Segment::Literal(text) | Segment::Invalid { text, .. } => out.push_str(text),
            Segment::Directive(d) => match convert::resolve(d, &mut cursor, false) {
                Ok(resolved) => convert::write_directive(&mut out, &resolved),
                Err(_) => out.push_str(d.text),
            },
        }
    }

    finish(out)
}

/// Render `format` with `args`, failing on any inconsistency between them.
///
/// For a consistent request the output is identical to [`render`].
pub fn try_render(
    format: &str,
    args: &ArgList<'_>,
    limit: RenderLimit,
) -> Result<RenderedText, FormatError> {
    let mut out = Output::new(limit.max_chars());
    walk_strict(format, args, |segment| match segment {
        Strict::Literal(text) => out.push_str(text),
        Strict::Directive(resolved) => convert::write_directive(&mut out, &resolved),
    })?;
    Ok(finish(out))
}

/// Check that `format` and `args` agree, without rendering anything.
pub fn check(format: &str, args: &ArgList<'_>) -> Result<(), FormatError> {
    walk_strict(format, args, |_| {})
}

fn finish(out: Output) -> RenderedText {
    let (text, truncated) = out.finish();
    RenderedText { text, truncated }
}

enum Strict<'f, 'a> {
    Literal(&'f str),
    Directive(convert::Resolved<'f, 'a>),
}

fn walk_strict<'f, 'a>(
    format: &'f str,
    args: &ArgList<'a>,
    mut visit: impl FnMut(Strict<'f, 'a>),
) -> Result<(), FormatError> {
    let mut cursor = ArgCursor::new(args);

    for segment in directive::parse(format) {
        match segment {
            Segment::Literal(text) => visit(Strict::Literal(text)),
            Segment::Directive(d) => visit(Strict::Directive(convert::resolve(d, &mut cursor, true)?)),
            Segment::Invalid { text, offset, kind } => {
                return Err(match kind {
                    InvalidKind::Incomplete => FormatError::IncompleteDirective { offset },
                    InvalidKind::Unknown(conversion) => {
                        FormatError::UnknownConversion { offset, conversion }
                    }
                    InvalidKind::Positional => FormatError::UnsupportedDirective {
                        offset,
                        text: text.to_string(),
                    },
                    InvalidKind::Overflow => FormatError::CountOverflow {
                        offset,
                        text: text.to_string(),
                    },
                });
            }
        }
    }

    match cursor.remaining() {
        0 => Ok(()),
        extra => Err(FormatError::ExtraArguments { extra }),
    }
}

/// A format string paired with arguments already checked against it.
#[derive(Debug, Clone)]
pub struct FormatRequest<'f, 'a> {
    format: &'f str,
    args: ArgList<'a>,
}

impl<'f, 'a> FormatRequest<'f, 'a> {
    /// Pair `format` with `args`, rejecting mismatches up front.
    pub fn new(format: &'f str, args: ArgList<'a>) -> Result<Self, FormatError> {
        check(format, &args)?;
        Ok(Self { format, args })
    }

    pub fn format(&self) -> &'f str {
        self.format
    }

    pub fn args(&self) -> &ArgList<'a> {
        &self.args
    }

    pub fn render(&self, limit: RenderLimit) -> RenderedText {
        render(self.format, &self.args, limit)
    }
}
