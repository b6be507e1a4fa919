//! Variadic entry points.
//!
//! Each macro packs its arguments into an `ArgList` and hands it to the
//! matching `_v` function, so the direct and delegated call shapes share one
//! rendering path.

/// Build an [`ArgList`](crate::ArgList) from positional arguments.
///
/// ```
/// let args = printio::args![3, "ripe"];
/// assert_eq!(args.len(), 2);
/// ```
#[macro_export]
macro_rules! args {
    () => {
        $crate::ArgList::new()
    };
    ($($arg:expr),+ $(,)?) => {
        $crate::ArgList::from(::std::vec![$($crate::FormatArg::from($arg)),+])
    };
}

/// printf to the normal channel of the global printer.
///
/// ```
/// printio::emit_normal!("%d apples, %s\n", 3, "ripe");
/// ```
#[macro_export]
macro_rules! emit_normal {
    ($format:expr $(, $arg:expr)* $(,)?) => {
        $crate::global::emit_normal_v($format, &$crate::args![$($arg),*])
    };
}

/// printf to the error channel of the global printer.
#[macro_export]
macro_rules! emit_error {
    ($format:expr $(, $arg:expr)* $(,)?) => {
        $crate::global::emit_error_v($format, &$crate::args![$($arg),*])
    };
}

/// printf to a channel of an explicit [`Printer`](crate::Printer).
///
/// ```
/// use printio::{Channel, InMemorySink, Printer};
/// use std::sync::Arc;
///
/// let printer = Printer::default();
/// let capture = InMemorySink::new("capture");
/// printer.set_sink(Channel::Normal, Arc::new(capture.clone()));
/// printio::emit!(printer, Channel::Normal, "%6.2f|", 2.5);
/// assert_eq!(capture.contents(), "  2.50|");
/// ```
#[macro_export]
macro_rules! emit {
    ($printer:expr, $channel:expr, $format:expr $(, $arg:expr)* $(,)?) => {
        $printer.emit_v($channel, $format, &$crate::args![$($arg),*])
    };
}
