//! Type-erased printf arguments and the pre-packed argument list.

use std::fmt;

/// A single printf argument.
///
/// This is the tagged union every call shape funnels into: the variadic
/// macros convert each positional argument into a `FormatArg`, and the
/// delegated entry points receive them already packed in an [`ArgList`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FormatArg<'a> {
    /// Signed integer (`%d`, `%i`, also accepted by the unsigned conversions)
    Int(i64),
    /// Unsigned integer (`%u`, `%o`, `%x`, `%X`)
    UInt(u64),
    /// Floating point (`%f`, `%e`, `%g`, `%a` and their uppercase forms)
    Float(f64),
    /// Character (`%c`)
    Char(char),
    /// Borrowed string (`%s`)
    Str(&'a str),
    /// Pointer address (`%p`)
    Ptr(usize),
}

impl FormatArg<'_> {
    /// Short name of the argument type, used in error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            FormatArg::Int(_) => "int",
            FormatArg::UInt(_) => "unsigned",
            FormatArg::Float(_) => "float",
            FormatArg::Char(_) => "char",
            FormatArg::Str(_) => "string",
            FormatArg::Ptr(_) => "pointer",
        }
    }
}

macro_rules! impl_from_scalar {
    ($variant:ident as $repr:ty: $($t:ty),+) => {
        $(
            impl From<$t> for FormatArg<'_> {
                fn from(v: $t) -> Self {
                    FormatArg::$variant(v as $repr)
                }
            }

            impl From<&$t> for FormatArg<'_> {
                fn from(v: &$t) -> Self {
                    FormatArg::$variant(*v as $repr)
                }
            }
        )+
    };
}

impl_from_scalar!(Int as i64: i8, i16, i32, i64, isize);
impl_from_scalar!(UInt as u64: u8, u16, u32, u64, usize);
impl_from_scalar!(Float as f64: f32, f64);

impl From<bool> for FormatArg<'_> {
    fn from(v: bool) -> Self {
        FormatArg::Int(i64::from(v))
    }
}

impl From<char> for FormatArg<'_> {
    fn from(v: char) -> Self {
        FormatArg::Char(v)
    }
}

impl<'a> From<&'a str> for FormatArg<'a> {
    fn from(v: &'a str) -> Self {
        FormatArg::Str(v)
    }
}

impl<'a> From<&'a String> for FormatArg<'a> {
    fn from(v: &'a String) -> Self {
        FormatArg::Str(v.as_str())
    }
}

impl<T> From<*const T> for FormatArg<'_> {
    fn from(v: *const T) -> Self {
        FormatArg::Ptr(v as usize)
    }
}

impl<T> From<*mut T> for FormatArg<'_> {
    fn from(v: *mut T) -> Self {
        FormatArg::Ptr(v as usize)
    }
}

/// An ordered, already-materialized argument list.
///
/// This is the handle a wrapper passes along when it forwards its own
/// arguments without re-interpreting them. The variadic macros build one of
/// these and hand it to the same rendering path, so both call shapes render
/// identically.
#[derive(Clone, Default, PartialEq)]
pub struct ArgList<'a> {
    args: Vec<FormatArg<'a>>,
}

impl<'a> ArgList<'a> {
    /// Create an empty argument list.
    pub fn new() -> Self {
        Self { args: Vec::new() }
    }

    /// Create an empty argument list with room for `n` arguments.
    pub fn with_capacity(n: usize) -> Self {
        Self {
            args: Vec::with_capacity(n),
        }
    }

    /// Append an argument.
    pub fn push(&mut self, arg: impl Into<FormatArg<'a>>) {
        self.args.push(arg.into());
    }

    /// Append an argument, builder style.
    pub fn with(mut self, arg: impl Into<FormatArg<'a>>) -> Self {
        self.push(arg);
        self
    }

    pub fn len(&self) -> usize {
        self.args.len()
    }

    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&FormatArg<'a>> {
        self.args.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FormatArg<'a>> {
        self.args.iter()
    }

    pub fn as_slice(&self) -> &[FormatArg<'a>] {
        &self.args
    }
}

impl fmt::Debug for ArgList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.args.iter()).finish()
    }
}

impl<'a> From<Vec<FormatArg<'a>>> for ArgList<'a> {
    fn from(args: Vec<FormatArg<'a>>) -> Self {
        Self { args }
    }
}

impl<'a> From<&[FormatArg<'a>]> for ArgList<'a> {
    fn from(args: &[FormatArg<'a>]) -> Self {
        Self {
            args: args.to_vec(),
        }
    }
}

impl<'a> FromIterator<FormatArg<'a>> for ArgList<'a> {
    fn from_iter<I: IntoIterator<Item = FormatArg<'a>>>(iter: I) -> Self {
        Self {
            args: iter.into_iter().collect(),
        }
    }
}

impl<'a> Extend<FormatArg<'a>> for ArgList<'a> {
    fn extend<I: IntoIterator<Item = FormatArg<'a>>>(&mut self, iter: I) {
        self.args.extend(iter);
    }
}

impl<'l, 'a> IntoIterator for &'l ArgList<'a> {
    type Item = &'l FormatArg<'a>;
    type IntoIter = std::slice::Iter<'l, FormatArg<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.args.iter()
    }
}

/// Walks an argument list in directive order.
#[derive(Debug)]
pub(crate) struct ArgCursor<'l, 'a> {
    args: &'l [FormatArg<'a>],
    next: usize,
}

impl<'l, 'a> ArgCursor<'l, 'a> {
    pub(crate) fn new(args: &'l ArgList<'a>) -> Self {
        Self {
            args: args.as_slice(),
            next: 0,
        }
    }

    pub(crate) fn next_arg(&mut self) -> Option<FormatArg<'a>> {
        let arg = self.args.get(self.next).copied();
        if arg.is_some() {
            self.next += 1;
        }
        arg
    }

    pub(crate) fn remaining(&self) -> usize {
        self.args.len() - self.next
    }
}
