//! Line-buffered print wrapper over an injected output sink.

use super::printf::{FormatArg, FormatError, FormatReport, vsprintf};
use crate::config::FormatMode;
use crate::string::strlen;

/// Size of the stack buffer each [`Printer::printf`] call formats into.
pub const PRINT_BUFFER_SIZE: usize = 1024;

/// Destination stream for raw output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stream {
    Stdout,
    Stderr,
}

impl Stream {
    /// File descriptor of the stream.
    #[must_use]
    pub const fn fd(self) -> i32 {
        match self {
            Self::Stdout => 1,
            Self::Stderr => 2,
        }
    }
}

/// Raw output primitive.
///
/// One call is one best-effort transfer. Callers never inspect a result and
/// never retry, so implementations swallow their own failures.
pub trait OutputSink {
    fn write(&mut self, stream: Stream, bytes: &[u8]);
}

impl<S: OutputSink + ?Sized> OutputSink for &mut S {
    fn write(&mut self, stream: Stream, bytes: &[u8]) {
        (**self).write(stream, bytes);
    }
}

/// Sink that issues the `write` syscall directly.
#[cfg(target_arch = "x86_64")]
#[derive(Debug, Default, Clone, Copy)]
pub struct FdSink;

#[cfg(target_arch = "x86_64")]
impl OutputSink for FdSink {
    fn write(&mut self, stream: Stream, bytes: &[u8]) {
        let _ = crate::syscall::write_bytes(stream.fd(), bytes);
    }
}

/// `printf`, `print` and `putstr` bound to one sink and one mode.
#[derive(Debug)]
pub struct Printer<S> {
    sink: S,
    mode: FormatMode,
}

impl<S: OutputSink> Printer<S> {
    #[must_use]
    pub const fn new(sink: S, mode: FormatMode) -> Self {
        Self { sink, mode }
    }

    #[must_use]
    pub const fn mode(&self) -> FormatMode {
        self.mode
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Format into a zeroed [`PRINT_BUFFER_SIZE`] stack buffer and hand the
    /// result to stdout. Returns the argument count.
    ///
    /// In strict mode a failed format writes nothing.
    pub fn printf(&mut self, fmt: &[u8], args: &[FormatArg<'_>]) -> Result<u32, FormatError> {
        self.printf_report(fmt, args).map(|report| report.argc)
    }

    /// [`printf`](Self::printf), returning the whole [`FormatReport`].
    pub fn printf_report(
        &mut self,
        fmt: &[u8],
        args: &[FormatArg<'_>],
    ) -> Result<FormatReport, FormatError> {
        let mut buf = [0u8; PRINT_BUFFER_SIZE];
        let report = vsprintf(&mut buf, fmt, args, self.mode)?;
        self.sink.write(Stream::Stdout, &buf[..report.len]);
        Ok(report)
    }

    /// Print an unsigned 64-bit value in decimal, no prefix, no newline.
    pub fn print(&mut self, value: u64) {
        // At most 20 digits, cannot fail.
        let _ = self.printf(b"%l", &[FormatArg::ULong(value)]);
    }

    /// Print `text` verbatim up to its first NUL.
    ///
    /// Nothing is formatted, so the text is not bounded by the print buffer
    /// and goes out in one write whatever the mode.
    pub fn putstr(&mut self, text: &[u8]) {
        self.sink.write(Stream::Stdout, &text[..strlen(text)]);
    }
}

/// Printer on the process's real stdout.
#[cfg(target_arch = "x86_64")]
#[must_use]
pub const fn stdout(mode: FormatMode) -> Printer<FdSink> {
    Printer::new(FdSink, mode)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct CaptureSink {
        writes: Vec<(Stream, Vec<u8>)>,
    }

    impl OutputSink for CaptureSink {
        fn write(&mut self, stream: Stream, bytes: &[u8]) {
            self.writes.push((stream, bytes.to_vec()));
        }
    }

    #[test]
    fn printf_hands_exact_length_to_stdout() {
        let mut p = Printer::new(CaptureSink::default(), FormatMode::Strict);
        let argc = p.printf(b"a=%d,b=%s", &crrt_args![7, "x"]).unwrap();
        assert_eq!(argc, 3);
        assert_eq!(p.sink().writes, [(Stream::Stdout, b"a=7,b=x".to_vec())]);
    }

    #[test]
    fn printf_literal_only_returns_one() {
        let mut p = Printer::new(CaptureSink::default(), FormatMode::Strict);
        assert_eq!(p.printf(b"hi\n", &[]).unwrap(), 1);
        assert_eq!(p.sink().writes[0].1, b"hi\n");
    }

    #[test]
    fn print_renders_full_u64() {
        let mut p = Printer::new(CaptureSink::default(), FormatMode::Strict);
        p.print(0);
        p.print(u64::MAX);
        let sink = p.into_sink();
        assert_eq!(sink.writes[0].1, b"0");
        assert_eq!(sink.writes[1].1, b"18446744073709551615");
    }

    #[test]
    fn putstr_is_verbatim() {
        let mut p = Printer::new(CaptureSink::default(), FormatMode::Strict);
        p.putstr(b"100% literal %d\0ignored");
        assert_eq!(p.sink().writes[0].1, b"100% literal %d");
    }

    #[test]
    fn putstr_longer_than_print_buffer_is_written_in_strict_mode() {
        let long = vec![b'a'; PRINT_BUFFER_SIZE];
        let mut p = Printer::new(CaptureSink::default(), FormatMode::Strict);
        p.putstr(&long);
        assert_eq!(p.sink().writes, [(Stream::Stdout, long)]);
    }

    #[test]
    fn putstr_is_not_truncated_in_hardened_mode() {
        let mut long = vec![b'z'; PRINT_BUFFER_SIZE * 3];
        long.push(0);
        let mut p = Printer::new(CaptureSink::default(), FormatMode::Hardened);
        p.putstr(&long);
        assert_eq!(p.sink().writes[0].1.len(), PRINT_BUFFER_SIZE * 3);
    }

    #[test]
    fn printf_report_exposes_truncation() {
        let long = [b'a'; PRINT_BUFFER_SIZE + 10];
        let mut p = Printer::new(CaptureSink::default(), FormatMode::Hardened);
        let report = p.printf_report(b"%s", &[FormatArg::Str(&long)]).unwrap();
        assert!(report.truncated);
        assert_eq!(report.argc, 2);
        assert_eq!(report.len, PRINT_BUFFER_SIZE - 1);
        assert_eq!(p.sink().writes[0].1.len(), report.len);
    }

    #[test]
    fn strict_overflow_writes_nothing() {
        let long = [b'a'; PRINT_BUFFER_SIZE];
        let mut p = Printer::new(CaptureSink::default(), FormatMode::Strict);
        let err = p.printf(b"%s", &[FormatArg::Str(&long)]).unwrap_err();
        assert_eq!(err.kind(), "overflow");
        assert!(p.sink().writes.is_empty());
    }

    #[test]
    fn hardened_overflow_writes_truncated_buffer() {
        let long = [b'a'; PRINT_BUFFER_SIZE + 10];
        let mut p = Printer::new(CaptureSink::default(), FormatMode::Hardened);
        assert_eq!(p.printf(b"%s", &[FormatArg::Str(&long)]).unwrap(), 2);
        assert_eq!(p.sink().writes[0].1.len(), PRINT_BUFFER_SIZE - 1);
    }

    #[test]
    fn sink_by_reference() {
        let mut sink = CaptureSink::default();
        {
            let mut p = Printer::new(&mut sink, FormatMode::Strict);
            p.putstr(b"x");
        }
        assert_eq!(sink.writes.len(), 1);
    }

    #[test]
    fn stream_fds() {
        assert_eq!(Stream::Stdout.fd(), 1);
        assert_eq!(Stream::Stderr.fd(), 2);
    }
}
