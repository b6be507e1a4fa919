//! printf format-string parser.
//!
//! Splits a format string into literal runs and conversion directives. The
//! parser never fails: malformed directives come back as
//! [`Segment::Invalid`] so the caller can decide between rendering them
//! verbatim and reporting an error.

/// Flag characters that may precede the width.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Flags {
    /// `-`: left-justify within the field
    pub left: bool,
    /// `+`: always print a sign for signed conversions
    pub plus: bool,
    /// ` `: prefix a space where the sign would go
    pub space: bool,
    /// `#`: alternate form
    pub alt: bool,
    /// `0`: pad numeric conversions with zeros
    pub zero: bool,
}

/// Largest width or precision accepted, the range of a C `int`.
pub const MAX_COUNT: usize = i32::MAX as usize;

/// Field width or precision.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Count {
    #[default]
    Omitted,
    Fixed(usize),
    /// `*`: taken from the next argument
    FromArg,
}

/// Length modifier between precision and conversion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LengthMod {
    #[default]
    None,
    /// `hh`
    Char,
    /// `h`
    Short,
    /// `l`
    Long,
    /// `ll` or `q`
    LongLong,
    /// `L`
    LongDouble,
    /// `j`
    IntMax,
    /// `z`
    Size,
    /// `t`
    PtrDiff,
}

impl LengthMod {
    /// Bit width used when a negative signed value meets an unsigned
    /// conversion.
    pub(crate) fn unsigned_bits(self) -> Option<u32> {
        match self {
            LengthMod::Char => Some(8),
            LengthMod::Short => Some(16),
            LengthMod::None | LengthMod::LongDouble => None,
            _ => Some(64),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conversion {
    /// `d`, `i`
    Signed,
    /// `u`
    Unsigned,
    /// `o`
    Octal,
    /// `x`, `X`
    Hex { upper: bool },
    /// `c`
    Char,
    /// `s`
    Str,
    /// `p`
    Pointer,
    /// `f`, `F`
    Fixed { upper: bool },
    /// `e`, `E`
    Exp { upper: bool },
    /// `g`, `G`
    General { upper: bool },
    /// `a`, `A`
    HexFloat { upper: bool },
    /// `n`
    WriteCount,
}

impl Conversion {
    fn from_char(c: char) -> Option<Self> {
        let conv = match c {
            'd' | 'i' => Conversion::Signed,
            'u' => Conversion::Unsigned,
            'o' => Conversion::Octal,
            'x' => Conversion::Hex { upper: false },
            'X' => Conversion::Hex { upper: true },
            'c' => Conversion::Char,
            's' => Conversion::Str,
            'p' => Conversion::Pointer,
            'f' => Conversion::Fixed { upper: false },
            'F' => Conversion::Fixed { upper: true },
            'e' => Conversion::Exp { upper: false },
            'E' => Conversion::Exp { upper: true },
            'g' => Conversion::General { upper: false },
            'G' => Conversion::General { upper: true },
            'a' => Conversion::HexFloat { upper: false },
            'A' => Conversion::HexFloat { upper: true },
            'n' => Conversion::WriteCount,
            _ => return None,
        };
        Some(conv)
    }

    /// Human readable description of the argument this conversion wants.
    pub(crate) fn expects(self) -> &'static str {
        match self {
            Conversion::Signed
            | Conversion::Unsigned
            | Conversion::Octal
            | Conversion::Hex { .. } => "an integer",
            Conversion::Char => "a char",
            Conversion::Str => "a string",
            Conversion::Pointer => "a pointer",
            Conversion::Fixed { .. }
            | Conversion::Exp { .. }
            | Conversion::General { .. }
            | Conversion::HexFloat { .. } => "a float",
            Conversion::WriteCount => "nothing",
        }
    }
}

/// One parsed `%` directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Directive<'f> {
    /// The directive exactly as written, including the leading `%`
    pub text: &'f str,
    /// Byte offset of the `%` in the format string
    pub offset: usize,
    pub flags: Flags,
    pub width: Count,
    pub precision: Count,
    pub length: LengthMod,
    pub conversion: Conversion,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidKind {
    /// The format ends in the middle of a directive
    Incomplete,
    /// A conversion character outside the printf grammar
    Unknown(char),
    /// `%N$...` positional arguments
    Positional,
    /// A width or precision larger than [`MAX_COUNT`]
    Overflow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'f> {
    Literal(&'f str),
    Directive(Directive<'f>),
    Invalid {
        text: &'f str,
        offset: usize,
        kind: InvalidKind,
    },
}

/// Iterator over the segments of a format string.
#[derive(Debug, Clone)]
pub struct Segments<'f> {
    format: &'f str,
    pos: usize,
}

/// Parse a format string lazily into segments.
pub fn parse(format: &str) -> Segments<'_> {
    Segments { format, pos: 0 }
}

impl<'f> Iterator for Segments<'f> {
    type Item = Segment<'f>;

    fn next(&mut self) -> Option<Self::Item> {
        let rest = &self.format[self.pos..];
        if rest.is_empty() {
            return None;
        }

        match rest.find('%') {
            Some(0) => Some(self.directive()),
            Some(idx) => {
                self.pos += idx;
                Some(Segment::Literal(&rest[..idx]))
            }
            None => {
                self.pos = self.format.len();
                Some(Segment::Literal(rest))
            }
        }
    }
}

impl<'f> Segments<'f> {
    /// Parse the directive starting at `self.pos` (which points at `%`).
    fn directive(&mut self) -> Segment<'f> {
        let format = self.format;
        let bytes = format.as_bytes();
        let start = self.pos;
        let mut i = start + 1;

        if bytes.get(i) == Some(&b'%') {
            self.pos = i + 1;
            return Segment::Literal(&format[i..i + 1]);
        }

        // %N$ positional form
        let digits = count_digits(&bytes[i..]);
        let positional = digits > 0 && bytes.get(i + digits) == Some(&b'$');
        if positional {
            i += digits + 1;
        }

        let mut flags = Flags::default();
        while let Some(&b) = bytes.get(i) {
            match b {
                b'-' => flags.left = true,
                b'+' => flags.plus = true,
                b' ' => flags.space = true,
                b'#' => flags.alt = true,
                b'0' => flags.zero = true,
                _ => break,
            }
            i += 1;
        }

        let width = parse_count(bytes, &mut i);

        let mut precision = Count::Omitted;
        if bytes.get(i) == Some(&b'.') {
            i += 1;
            precision = match parse_count(bytes, &mut i) {
                Count::Omitted => Count::Fixed(0),
                other => other,
            };
        }

        let length = parse_length(bytes, &mut i);

        let Some(c) = format[i..].chars().next() else {
            self.pos = format.len();
            return Segment::Invalid {
                text: &format[start..],
                offset: start,
                kind: InvalidKind::Incomplete,
            };
        };
        let end = i + c.len_utf8();
        self.pos = end;
        let text = &format[start..end];

        // `%` ignores flags, width and precision
        if c == '%' {
            return Segment::Literal(&format[i..end]);
        }

        let Some(conversion) = Conversion::from_char(c) else {
            return Segment::Invalid {
                text,
                offset: start,
                kind: InvalidKind::Unknown(c),
            };
        };
        if positional {
            return Segment::Invalid {
                text,
                offset: start,
                kind: InvalidKind::Positional,
            };
        }
        if [width, precision]
            .iter()
            .any(|count| matches!(count, Count::Fixed(n) if *n > MAX_COUNT))
        {
            return Segment::Invalid {
                text,
                offset: start,
                kind: InvalidKind::Overflow,
            };
        }

        Segment::Directive(Directive {
            text,
            offset: start,
            flags,
            width,
            precision,
            length,
            conversion,
        })
    }
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

fn parse_count(bytes: &[u8], i: &mut usize) -> Count {
    if bytes.get(*i) == Some(&b'*') {
        *i += 1;
        return Count::FromArg;
    }
    let digits = count_digits(&bytes[*i..]);
    if digits == 0 {
        return Count::Omitted;
    }
    let value = bytes[*i..*i + digits].iter().fold(0usize, |acc, b| {
        acc.saturating_mul(10).saturating_add(usize::from(b - b'0'))
    });
    *i += digits;
    Count::Fixed(value)
}

fn parse_length(bytes: &[u8], i: &mut usize) -> LengthMod {
    let (length, used) = match (bytes.get(*i), bytes.get(*i + 1)) {
        (Some(b'h'), Some(b'h')) => (LengthMod::Char, 2),
        (Some(b'h'), _) => (LengthMod::Short, 1),
        (Some(b'l'), Some(b'l')) => (LengthMod::LongLong, 2),
        (Some(b'l'), _) => (LengthMod::Long, 1),
        (Some(b'q'), _) => (LengthMod::LongLong, 1),
        (Some(b'L'), _) => (LengthMod::LongDouble, 1),
        (Some(b'j'), _) => (LengthMod::IntMax, 1),
        (Some(b'z'), _) => (LengthMod::Size, 1),
        (Some(b't'), _) => (LengthMod::PtrDiff, 1),
        _ => (LengthMod::None, 0),
    };
    *i += used;
    length
}
