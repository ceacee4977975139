//! Standard I/O operations.
//!
//! Implements the formatted-output subset: `itoa`, `vsprintf`, and the
//! `printf`/`print`/`putstr` wrapper over an injectable output sink.

pub mod cursor;
pub mod itoa;
pub mod print;
pub mod printf;

pub use cursor::OutputCursor;
pub use itoa::{Radix, itoa};
#[cfg(target_arch = "x86_64")]
pub use print::{FdSink, stdout};
pub use print::{OutputSink, PRINT_BUFFER_SIZE, Printer, Stream};
pub use printf::{
    Directive, FormatArg, FormatError, FormatReport, FormatSegment, Segments,
    parse_format_string, vsprintf,
};
