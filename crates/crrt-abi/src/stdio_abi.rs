//! ABI layer for the print family.
//!
//! `printf` walks the parsed format once to pull exactly one `va_list` value
//! per argument-consuming directive, packs them as [`FormatArg`]s and hands
//! the lot to the core [`Printer`]. `print` and `putstr` need no variadics.

use std::ffi::{c_char, c_uint};

use crrt_core::FormatMode;
use crrt_core::stdio::{FormatArg, OutputSink, Printer};
#[cfg(feature = "c-variadic")]
use crrt_core::stdio::{Directive, FormatSegment, parse_format_string};

use crate::runtime_mode::format_mode;
use crate::unistd_abi::RawSink;
use crate::util::{NULL_STR, c_str_bytes};

/// Maximum variadic arguments we extract per printf call.
pub const MAX_VA_ARGS: usize = 32;

/// A `%s` argument: the C string's bytes, or `(null)` for a null pointer.
///
/// # Safety
///
/// A non-null `ptr` must point to a NUL-terminated string that outlives `'a`.
pub unsafe fn str_arg<'a>(ptr: *const c_char) -> &'a [u8] {
    unsafe { c_str_bytes(ptr) }.unwrap_or(NULL_STR)
}

/// Format through a [`Printer`] on `sink` and map the outcome to the C return:
/// the argument count, or 0 when strict mode rejected the call.
pub fn printf_to<S: OutputSink>(
    sink: S,
    mode: FormatMode,
    fmt: &[u8],
    args: &[FormatArg<'_>],
) -> c_uint {
    Printer::new(sink, mode).printf(fmt, args).unwrap_or(0)
}

/// Extract variadic arguments from `$args` into `$buf`, guided by `$fmt`.
/// Uses a macro to avoid naming the unstable `VaList` type directly.
#[cfg(feature = "c-variadic")]
macro_rules! extract_va_args {
    ($fmt:expr, $args:expr, $buf:expr) => {{
        let mut count = 0usize;
        for segment in parse_format_string($fmt) {
            let FormatSegment::Directive(directive) = segment else {
                continue;
            };
            if count == MAX_VA_ARGS {
                break;
            }
            $buf[count] = match directive {
                Directive::Int | Directive::Hex => FormatArg::Int(unsafe { $args.arg::<i32>() }),
                Directive::Long => FormatArg::Long(unsafe { $args.arg::<u64>() } as i64),
                Directive::Str => FormatArg::Str(unsafe { str_arg($args.arg::<*const c_char>()) }),
                Directive::Unrecognized(_) => continue,
            };
            count += 1;
        }
        count
    }};
}

/// `printf(fmt, ...)`: format into a 1024-byte buffer and write it to stdout.
///
/// Returns the argument count (directives plus one), or 0 if `fmt` is null or
/// strict mode rejected the call. At most [`MAX_VA_ARGS`] values are read.
#[cfg(feature = "c-variadic")]
#[cfg_attr(not(any(debug_assertions, test)), unsafe(no_mangle))]
pub unsafe extern "C" fn printf(format: *const c_char, mut args: ...) -> c_uint {
    let Some(fmt) = (unsafe { c_str_bytes(format) }) else {
        return 0;
    };
    let mut arg_buf = [FormatArg::Int(0); MAX_VA_ARGS];
    let count = extract_va_args!(fmt, args, arg_buf);
    printf_to(RawSink, format_mode(), fmt, &arg_buf[..count])
}

/// `print(value)`: unsigned decimal, no prefix, no newline.
#[cfg_attr(not(any(debug_assertions, test)), unsafe(no_mangle))]
pub extern "C" fn print(value: u64) {
    Printer::new(RawSink, format_mode()).print(value);
}

abi_fn! {
    /// `putstr(text)`: write `text` verbatim. A null pointer writes nothing.
    fn putstr(text: *const c_char) {
        if let Some(bytes) = c_str_bytes(text) {
            Printer::new(RawSink, format_mode()).putstr(bytes);
        }
    }
}
