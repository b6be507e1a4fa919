//! Conversion of resolved directives into text.
//!
//! Rendering a directive is split in two phases. `resolve` pulls the
//! directive's arguments off the cursor and checks them, and is the only
//! phase that can fail. `write_directive` turns a resolved directive into
//! text and cannot fail, so nothing is ever half written.

use super::FormatError;
use super::args::{ArgCursor, FormatArg};
use super::directive::{Conversion, Count, Directive, Flags, LengthMod, MAX_COUNT};

/// Floating point precision beyond which every f64 digit is zero.
const MAX_FLOAT_DIGITS: usize = 1100;

/// Longest digit run an integer conversion can produce, with headroom.
const PRECISION_SLACK: usize = 64;

/// Bounded output buffer.
///
/// Counts characters, not bytes, and never splits a UTF-8 sequence. Once
/// the limit is hit every further write is dropped.
#[derive(Debug)]
pub(crate) struct Output {
    buf: String,
    limit: Option<usize>,
    chars: usize,
    truncated: bool,
}

impl Output {
    pub(crate) fn new(limit: Option<usize>) -> Self {
        Self {
            buf: String::new(),
            limit,
            chars: 0,
            truncated: false,
        }
    }

    pub(crate) fn push_str(&mut self, s: &str) {
        if self.truncated || s.is_empty() {
            return;
        }
        let Some(limit) = self.limit else {
            self.buf.push_str(s);
            return;
        };
        let room = limit - self.chars;
        match s.char_indices().nth(room) {
            None => {
                self.chars += s.chars().count();
                self.buf.push_str(s);
            }
            Some((cut, _)) => {
                self.buf.push_str(&s[..cut]);
                self.chars = limit;
                self.truncated = true;
            }
        }
    }

    /// Characters that can still be written before the limit.
    fn room(&self) -> usize {
        self.limit.map_or(usize::MAX, |limit| limit - self.chars)
    }

    fn push_repeat(&mut self, c: char, n: usize) {
        if self.truncated || n == 0 {
            return;
        }
        let take = match self.limit {
            None => n,
            Some(limit) => {
                let room = limit - self.chars;
                if n > room {
                    self.truncated = true;
                }
                n.min(room)
            }
        };
        self.buf.extend(std::iter::repeat_n(c, take));
        self.chars += take;
    }

    pub(crate) fn finish(self) -> (String, bool) {
        (self.buf, self.truncated)
    }
}

/// A directive whose arguments have been fetched and checked.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Resolved<'f, 'a> {
    directive: Directive<'f>,
    flags: Flags,
    width: usize,
    precision: Option<usize>,
    value: Value<'a>,
}

#[derive(Debug, Clone, Copy)]
enum Value<'a> {
    Signed(i128),
    Unsigned(u64),
    Char(char),
    Str(&'a str),
    Pointer(usize),
    Float(f64),
    None,
}

/// Fetch and check the arguments a directive consumes.
///
/// In lenient mode integers are promoted to floats for the floating
/// conversions; in strict mode that is a mismatch.
pub(crate) fn resolve<'f, 'a>(
    directive: Directive<'f>,
    cursor: &mut ArgCursor<'_, 'a>,
    strict: bool,
) -> Result<Resolved<'f, 'a>, FormatError> {
    let mut flags = directive.flags;

    let width = match directive.width {
        Count::Omitted => 0,
        Count::Fixed(n) => n,
        Count::FromArg => {
            let n = star_arg(&directive, cursor)?;
            if n < 0 {
                flags.left = true;
            }
            checked_count(&directive, n.unsigned_abs())?
        }
    };

    let precision = match directive.precision {
        Count::Omitted => None,
        Count::Fixed(n) => Some(n),
        Count::FromArg => match u64::try_from(star_arg(&directive, cursor)?) {
            Ok(n) => Some(checked_count(&directive, n)?),
            // negative precision is taken as omitted
            Err(_) => None,
        },
    };

    let conversion = directive.conversion;
    let value = if conversion == Conversion::WriteCount {
        if strict {
            return Err(FormatError::UnsupportedDirective {
                offset: directive.offset,
                text: directive.text.to_string(),
            });
        }
        cursor.next_arg();
        Value::None
    } else {
        let arg = cursor
            .next_arg()
            .ok_or_else(|| FormatError::MissingArgument {
                offset: directive.offset,
                text: directive.text.to_string(),
            })?;
        convert_arg(&directive, arg, strict)?
    };

    Ok(Resolved {
        directive,
        flags,
        width,
        precision,
        value,
    })
}

fn star_arg(directive: &Directive<'_>, cursor: &mut ArgCursor<'_, '_>) -> Result<i64, FormatError> {
    match cursor.next_arg() {
        Some(FormatArg::Int(n)) => Ok(n),
        Some(FormatArg::UInt(n)) => Ok(i64::try_from(n).unwrap_or(i64::MAX)),
        Some(other) => Err(mismatch(directive, "an integer field width", other)),
        None => Err(FormatError::MissingArgument {
            offset: directive.offset,
            text: directive.text.to_string(),
        }),
    }
}

fn checked_count(directive: &Directive<'_>, n: u64) -> Result<usize, FormatError> {
    usize::try_from(n)
        .ok()
        .filter(|n| *n <= MAX_COUNT)
        .ok_or_else(|| FormatError::CountOverflow {
            offset: directive.offset,
            text: directive.text.to_string(),
        })
}

fn mismatch(directive: &Directive<'_>, expected: &'static str, found: FormatArg<'_>) -> FormatError {
    FormatError::ArgumentMismatch {
        offset: directive.offset,
        text: directive.text.to_string(),
        expected,
        found: found.kind_name(),
    }
}

fn convert_arg<'a>(
    directive: &Directive<'_>,
    arg: FormatArg<'a>,
    strict: bool,
) -> Result<Value<'a>, FormatError> {
    let conversion = directive.conversion;
    let length = directive.length;
    let value = match (conversion, arg) {
        (Conversion::Signed, FormatArg::Int(v)) => Value::Signed(narrow_signed(v, length)),
        (Conversion::Signed, FormatArg::UInt(v)) => Value::Signed(narrow_unsigned(v, length).into()),
        (Conversion::Signed, FormatArg::Char(c)) => Value::Signed(u32::from(c).into()),

        (Conversion::Unsigned | Conversion::Octal | Conversion::Hex { .. }, arg) => match arg {
            FormatArg::Int(v) => Value::Unsigned(reinterpret_unsigned(v, length)),
            FormatArg::UInt(v) => Value::Unsigned(narrow_unsigned(v, length)),
            FormatArg::Char(c) => Value::Unsigned(u32::from(c).into()),
            other => return Err(mismatch(directive, conversion.expects(), other)),
        },

        (Conversion::Char, FormatArg::Char(c)) => Value::Char(c),
        (Conversion::Char, FormatArg::Int(v)) => Value::Char(int_to_char(v as u64, length)),
        (Conversion::Char, FormatArg::UInt(v)) => Value::Char(int_to_char(v, length)),

        (Conversion::Str, FormatArg::Str(s)) => Value::Str(s),

        (Conversion::Pointer, FormatArg::Ptr(p)) => Value::Pointer(p),
        (Conversion::Pointer, FormatArg::UInt(p)) => Value::Pointer(p as usize),
        (Conversion::Pointer, FormatArg::Int(p)) => Value::Pointer(p as usize),

        (
            Conversion::Fixed { .. }
            | Conversion::Exp { .. }
            | Conversion::General { .. }
            | Conversion::HexFloat { .. },
            arg,
        ) => match arg {
            FormatArg::Float(v) => Value::Float(v),
            FormatArg::Int(v) if !strict => Value::Float(v as f64),
            FormatArg::UInt(v) if !strict => Value::Float(v as f64),
            other => return Err(mismatch(directive, conversion.expects(), other)),
        },

        (_, other) => return Err(mismatch(directive, conversion.expects(), other)),
    };
    Ok(value)
}

fn narrow_signed(v: i64, length: LengthMod) -> i128 {
    match length {
        LengthMod::Char => i128::from(v as i8),
        LengthMod::Short => i128::from(v as i16),
        _ => i128::from(v),
    }
}

fn narrow_unsigned(v: u64, length: LengthMod) -> u64 {
    match length {
        LengthMod::Char => u64::from(v as u8),
        LengthMod::Short => u64::from(v as u16),
        _ => v,
    }
}

/// Two's complement view of a signed value at the width the length
/// modifier implies. Without a modifier, values that fit in 32 bits are
/// treated as C `int`.
fn reinterpret_unsigned(v: i64, length: LengthMod) -> u64 {
    let bits = match length.unsigned_bits() {
        Some(bits) => bits,
        None if i32::try_from(v).is_ok() => 32,
        None => 64,
    };
    if bits == 64 {
        v as u64
    } else {
        (v as u64) & ((1u64 << bits) - 1)
    }
}

fn int_to_char(v: u64, length: LengthMod) -> char {
    match length {
        LengthMod::Long => u32::try_from(v)
            .ok()
            .and_then(char::from_u32)
            .unwrap_or(char::REPLACEMENT_CHARACTER),
        _ => char::from(v as u8),
    }
}

/// Write a resolved directive.
pub(crate) fn write_directive(out: &mut Output, resolved: &Resolved<'_, '_>) {
    let flags = resolved.flags;
    let conversion = resolved.directive.conversion;

    // Zeros a precision asks for past the limit are never written, so they
    // are counted toward the field length instead of being built.
    let cap = out.room().saturating_add(PRECISION_SLACK).max(MAX_FLOAT_DIGITS);
    let (precision, omitted) = match (resolved.precision, resolved.value) {
        (Some(p), Value::Signed(_) | Value::Unsigned(_)) if p > cap => (Some(cap), p - cap),
        (Some(p), Value::Float(v))
            if p > cap && v.is_finite() && !matches!(conversion, Conversion::General { .. }) =>
        {
            (Some(cap), p - cap)
        }
        (p, _) => (p, 0),
    };

    let (prefix, body, zero_ok) = match resolved.value {
        Value::Signed(v) => {
            let sign = sign_for(v < 0, flags);
            let digits = int_digits(v.unsigned_abs(), 10, false, precision);
            (sign.to_string(), digits, precision.is_none())
        }
        Value::Unsigned(v) => {
            let (radix, upper) = match conversion {
                Conversion::Octal => (8, false),
                Conversion::Hex { upper } => (16, upper),
                _ => (10, false),
            };
            let mut digits = int_digits(u128::from(v), radix, upper, precision);
            let mut prefix = String::new();
            if flags.alt {
                match conversion {
                    Conversion::Octal if !digits.starts_with('0') => digits.insert(0, '0'),
                    Conversion::Hex { upper } if v != 0 => {
                        prefix.push_str(if upper { "0X" } else { "0x" })
                    }
                    _ => {}
                }
            }
            (prefix, digits, precision.is_none())
        }
        Value::Char(c) => (String::new(), c.to_string(), false),
        Value::Str(s) => {
            let body = match precision {
                Some(p) => s.chars().take(p).collect(),
                None => s.to_string(),
            };
            (String::new(), body, false)
        }
        Value::Pointer(0) => (String::new(), "(nil)".to_string(), false),
        Value::Pointer(p) => ("0x".to_string(), format!("{p:x}"), true),
        Value::Float(v) => float_parts(v, conversion, flags, precision),
        Value::None => return,
    };

    let len = (prefix.chars().count() + body.chars().count()).saturating_add(omitted);
    let pad = resolved.width.saturating_sub(len);

    if flags.left {
        out.push_str(&prefix);
        out.push_str(&body);
        out.push_repeat(' ', pad);
    } else if flags.zero && zero_ok {
        out.push_str(&prefix);
        out.push_repeat('0', pad);
        out.push_str(&body);
    } else {
        out.push_repeat(' ', pad);
        out.push_str(&prefix);
        out.push_str(&body);
    }
}

fn sign_for(negative: bool, flags: Flags) -> &'static str {
    if negative {
        "-"
    } else if flags.plus {
        "+"
    } else if flags.space {
        " "
    } else {
        ""
    }
}

fn int_digits(v: u128, radix: u32, upper: bool, precision: Option<usize>) -> String {
    if v == 0 && precision == Some(0) {
        return String::new();
    }
    let digits = match (radix, upper) {
        (8, _) => format!("{v:o}"),
        (16, false) => format!("{v:x}"),
        (16, true) => format!("{v:X}"),
        _ => v.to_string(),
    };
    match precision {
        Some(p) if p > digits.len() => {
            let mut padded = "0".repeat(p - digits.len());
            padded.push_str(&digits);
            padded
        }
        _ => digits,
    }
}

/// Returns `(prefix, body, zero_pad_allowed)` for a floating conversion.
fn float_parts(
    v: f64,
    conversion: Conversion,
    flags: Flags,
    precision: Option<usize>,
) -> (String, String, bool) {
    let upper = matches!(
        conversion,
        Conversion::Fixed { upper: true }
            | Conversion::Exp { upper: true }
            | Conversion::General { upper: true }
            | Conversion::HexFloat { upper: true }
    );
    let mut prefix = sign_for(v.is_sign_negative(), flags).to_string();

    if !v.is_finite() {
        let body = match (v.is_nan(), upper) {
            (true, false) => "nan",
            (true, true) => "NAN",
            (false, false) => "inf",
            (false, true) => "INF",
        };
        return (prefix, body.to_string(), false);
    }

    let a = v.abs();
    let body = match conversion {
        Conversion::Fixed { .. } => fixed(a, precision.unwrap_or(6), flags.alt),
        Conversion::Exp { upper } => exponent(a, precision.unwrap_or(6), flags.alt, upper),
        Conversion::General { upper } => general(a, precision.unwrap_or(6), flags.alt, upper),
        Conversion::HexFloat { upper } => {
            prefix.push_str(if upper { "0X" } else { "0x" });
            let body = hex_float(a, precision, flags.alt);
            if upper { body.to_ascii_uppercase() } else { body }
        }
        _ => String::new(),
    };
    (prefix, body, true)
}

fn fixed(a: f64, precision: usize, alt: bool) -> String {
    let digits = precision.min(MAX_FLOAT_DIGITS);
    let mut s = format!("{a:.digits$}");
    s.extend(std::iter::repeat_n('0', precision - digits));
    if alt && precision == 0 {
        s.push('.');
    }
    s
}

/// `d.ddde±XX` with at least two exponent digits.
fn exponent(a: f64, precision: usize, alt: bool, upper: bool) -> String {
    let digits = precision.min(MAX_FLOAT_DIGITS);
    let raw = format!("{a:.digits$e}");
    let (mantissa, exp) = split_exponent(&raw);

    let mut s = String::with_capacity(mantissa.len() + 6);
    s.push_str(mantissa);
    s.extend(std::iter::repeat_n('0', precision - digits));
    if alt && precision == 0 {
        s.push('.');
    }
    push_exponent(&mut s, exp, upper);
    s
}

fn split_exponent(raw: &str) -> (&str, i32) {
    match raw.split_once('e') {
        Some((mantissa, exp)) => (mantissa, exp.parse().unwrap_or(0)),
        None => (raw, 0),
    }
}

fn push_exponent(s: &mut String, exp: i32, upper: bool) {
    s.push(if upper { 'E' } else { 'e' });
    s.push(if exp < 0 { '-' } else { '+' });
    let magnitude = exp.unsigned_abs();
    if magnitude < 10 {
        s.push('0');
    }
    s.push_str(&magnitude.to_string());
}

fn general(a: f64, precision: usize, alt: bool, upper: bool) -> String {
    let p = precision.clamp(1, MAX_FLOAT_DIGITS);
    let exp = if a == 0.0 {
        0
    } else {
        let digits = p - 1;
        split_exponent(&format!("{a:.digits$e}")).1
    };

    let p = p as i64;
    let exp = i64::from(exp);
    let mut s = if exp < p && exp >= -4 {
        let digits = (p - 1 - exp) as usize;
        format!("{a:.digits$}")
    } else {
        exponent(a, (p - 1) as usize, false, upper)
    };

    if alt {
        if !s.contains('.') {
            match s.find(['e', 'E']) {
                Some(idx) => s.insert(idx, '.'),
                None => s.push('.'),
            }
        }
        return s;
    }

    let (mantissa, tail) = match s.find(['e', 'E']) {
        Some(idx) => s.split_at(idx),
        None => (s.as_str(), ""),
    };
    if !mantissa.contains('.') {
        return s;
    }
    let trimmed = mantissa.trim_end_matches('0').trim_end_matches('.');
    let mut out = String::with_capacity(trimmed.len() + tail.len());
    out.push_str(trimmed);
    out.push_str(tail);
    out
}

/// Hexadecimal mantissa and binary exponent, without the `0x` prefix.
fn hex_float(a: f64, precision: Option<usize>, alt: bool) -> String {
    const FRAC_BITS: u32 = 52;
    const FRAC_DIGITS: usize = 13;

    let bits = a.to_bits();
    let biased = ((bits >> FRAC_BITS) & 0x7ff) as i32;
    let frac = bits & ((1u64 << FRAC_BITS) - 1);

    let (lead, exp) = match (biased, frac) {
        (0, 0) => (0u64, 0),
        (0, _) => (0u64, -1022),
        _ => (1u64, biased - 1023),
    };

    let (lead, digits) = match precision {
        Some(p) if p < FRAC_DIGITS => {
            let shift = (FRAC_DIGITS - p) as u32 * 4;
            let full = (lead << FRAC_BITS) | frac;
            let rem = full & ((1u64 << shift) - 1);
            let half = 1u64 << (shift - 1);
            let mut kept = full >> shift;
            if rem > half || (rem == half && kept & 1 == 1) {
                kept += 1;
            }
            let frac_bits = p as u32 * 4;
            let lead = kept >> frac_bits;
            let digits = if p == 0 {
                String::new()
            } else {
                format!("{:0p$x}", kept & ((1u64 << frac_bits) - 1))
            };
            (lead, digits)
        }
        Some(p) => {
            let mut digits = format!("{frac:013x}");
            digits.extend(std::iter::repeat_n('0', p - FRAC_DIGITS));
            (lead, digits)
        }
        None => {
            let digits = format!("{frac:013x}");
            (lead, digits.trim_end_matches('0').to_string())
        }
    };

    let mut s = lead.to_string();
    if !digits.is_empty() || alt {
        s.push('.');
    }
    s.push_str(&digits);
    s.push('p');
    s.push(if exp < 0 { '-' } else { '+' });
    s.push_str(&exp.unsigned_abs().to_string());
    s
}
