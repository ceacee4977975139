//! printf formatting engine.
//!
//! Interprets a deliberately small directive set (`%d`, `%l`, `%x`, `%s`)
//! against a typed argument slice and renders into a fixed caller-owned
//! buffer. There are no flags, widths, precisions or floating point.
//!
//! Output is always bounded by the destination buffer. What happens when the
//! output or the argument list does not fit the format string depends on the
//! [`FormatMode`]: strict reports a [`FormatError`], hardened repairs and
//! records the repair in the [`FormatReport`].

use thiserror::Error;

use super::cursor::OutputCursor;
use super::itoa::{Radix, itoa};
use crate::config::FormatMode;
use crate::string::strlen;

// ---------------------------------------------------------------------------
// Arguments
// ---------------------------------------------------------------------------

/// Typed argument value, consumed left to right by the directives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatArg<'a> {
    /// C `int`, for `%d` and `%x`.
    Int(i32),
    /// Signed 64-bit value, for `%l`.
    Long(i64),
    /// Unsigned 64-bit value, for `%l`.
    ULong(u64),
    /// Byte string, for `%s`. Read up to the first NUL or the end of the slice.
    Str(&'a [u8]),
}

impl FormatArg<'_> {
    /// Short type name used in diagnostics.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Int(_) => "int",
            Self::Long(_) => "long",
            Self::ULong(_) => "ulong",
            Self::Str(_) => "str",
        }
    }
}

impl From<i32> for FormatArg<'_> {
    fn from(value: i32) -> Self {
        Self::Int(value)
    }
}

impl From<i64> for FormatArg<'_> {
    fn from(value: i64) -> Self {
        Self::Long(value)
    }
}

impl From<u64> for FormatArg<'_> {
    fn from(value: u64) -> Self {
        Self::ULong(value)
    }
}

impl<'a> From<&'a [u8]> for FormatArg<'a> {
    fn from(value: &'a [u8]) -> Self {
        Self::Str(value)
    }
}

impl<'a, const N: usize> From<&'a [u8; N]> for FormatArg<'a> {
    fn from(value: &'a [u8; N]) -> Self {
        Self::Str(value)
    }
}

impl<'a> From<&'a str> for FormatArg<'a> {
    fn from(value: &'a str) -> Self {
        Self::Str(value.as_bytes())
    }
}

// ---------------------------------------------------------------------------
// Format string segments
// ---------------------------------------------------------------------------

/// A `%`-introduced directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive {
    /// `%d`: signed decimal `int`.
    Int,
    /// `%l`: 64-bit decimal, signed for `Long`, unsigned for `ULong`.
    Long,
    /// `%x`: uppercase hex of the `int` bit pattern.
    Hex,
    /// `%s`: byte string copied verbatim.
    Str,
    /// Any other conversion byte. A `%` ending the format string is
    /// reported with byte `0`, the terminator the scanner ran into.
    Unrecognized(u8),
}

impl Directive {
    /// Classify the byte following a `%`.
    #[must_use]
    pub const fn from_conversion(byte: u8) -> Self {
        match byte {
            b'd' => Self::Int,
            b'l' => Self::Long,
            b'x' => Self::Hex,
            b's' => Self::Str,
            other => Self::Unrecognized(other),
        }
    }

    /// The conversion byte as written in the format string.
    #[must_use]
    pub const fn conversion(self) -> u8 {
        match self {
            Self::Int => b'd',
            Self::Long => b'l',
            Self::Hex => b'x',
            Self::Str => b's',
            Self::Unrecognized(byte) => byte,
        }
    }

    /// Whether this directive pulls an argument from the list.
    #[must_use]
    pub const fn consumes_argument(self) -> bool {
        !matches!(self, Self::Unrecognized(_))
    }

    /// Argument type(s) the directive accepts without reinterpretation.
    #[must_use]
    pub const fn expected(self) -> &'static str {
        match self {
            Self::Int | Self::Hex => "int",
            Self::Long => "long or ulong",
            Self::Str => "str",
            Self::Unrecognized(_) => "nothing",
        }
    }
}

/// A segment of a parsed format string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatSegment<'a> {
    /// Literal bytes to emit verbatim.
    Literal(&'a [u8]),
    /// A directive, `%` and conversion byte already consumed.
    Directive(Directive),
}

/// Iterator over the segments of a format string.
///
/// The format string ends at its first NUL byte, or at the end of the slice.
#[derive(Debug, Clone)]
pub struct Segments<'a> {
    fmt: &'a [u8],
    pos: usize,
}

impl<'a> Segments<'a> {
    #[must_use]
    pub fn new(fmt: &'a [u8]) -> Self {
        Self {
            fmt: &fmt[..strlen(fmt)],
            pos: 0,
        }
    }
}

impl<'a> Iterator for Segments<'a> {
    type Item = FormatSegment<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let len = self.fmt.len();
        if self.pos >= len {
            return None;
        }

        if self.fmt[self.pos] != b'%' {
            let start = self.pos;
            let end = self.fmt[start..]
                .iter()
                .position(|&b| b == b'%')
                .map_or(len, |off| start + off);
            self.pos = end;
            return Some(FormatSegment::Literal(&self.fmt[start..end]));
        }

        // Skip the '%'.
        self.pos += 1;
        if self.pos >= len {
            return Some(FormatSegment::Directive(Directive::Unrecognized(0)));
        }
        let conversion = self.fmt[self.pos];
        self.pos += 1;
        Some(FormatSegment::Directive(Directive::from_conversion(
            conversion,
        )))
    }
}

/// Iterate over the segments of `fmt`.
#[must_use]
pub fn parse_format_string(fmt: &[u8]) -> Segments<'_> {
    Segments::new(fmt)
}

// ---------------------------------------------------------------------------
// Result record and errors
// ---------------------------------------------------------------------------

/// What a successful [`vsprintf`] call produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatReport {
    /// Directives seen plus one, recognized or not.
    pub argc: u32,
    /// Bytes written before the NUL terminator.
    pub len: usize,
    /// Output was clamped to the buffer (hardened mode only).
    pub truncated: bool,
    /// Arguments skipped or reinterpreted (hardened mode only).
    pub repairs: u32,
}

/// Failure of a strict-mode [`vsprintf`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("output needs {required} bytes plus terminator but the buffer holds {capacity}")]
    Overflow { capacity: usize, required: usize },
    #[error("%{directive} needs argument #{index} but only {index} were supplied")]
    MissingArgument { directive: char, index: usize },
    #[error("%{directive} expects {expected} but argument #{index} is {found}")]
    ArgumentMismatch {
        directive: char,
        index: usize,
        expected: &'static str,
        found: &'static str,
    },
}

impl FormatError {
    /// Stable machine-readable name of the failure class.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Overflow { .. } => "overflow",
            Self::MissingArgument { .. } => "missing_argument",
            Self::ArgumentMismatch { .. } => "argument_mismatch",
        }
    }
}

// ---------------------------------------------------------------------------
// Interpreter
// ---------------------------------------------------------------------------

/// How a resolved argument is drawn.
#[derive(Debug, Clone, Copy)]
enum Rendering<'a> {
    Signed(i64),
    Unsigned(u64, Radix),
    Bytes(&'a [u8]),
}

/// Outcome of matching one argument against one directive.
#[derive(Debug, Clone, Copy)]
enum Resolution<'a> {
    Exact(Rendering<'a>),
    /// Wrong width; read the way C `va_arg` would have read the slot.
    Reinterpreted(Rendering<'a>),
    Incompatible,
}

fn resolve<'a>(directive: Directive, arg: FormatArg<'a>) -> Resolution<'a> {
    use FormatArg as A;
    use Rendering as R;
    use Resolution::{Exact, Incompatible, Reinterpreted};

    match (directive, arg) {
        (Directive::Int, A::Int(v)) => Exact(R::Signed(v.into())),
        (Directive::Int, A::Long(v)) => Reinterpreted(R::Signed((v as i32).into())),
        (Directive::Int, A::ULong(v)) => Reinterpreted(R::Signed((v as i32).into())),

        // Magnitude-only: the 32-bit pattern, never a sign.
        (Directive::Hex, A::Int(v)) => Exact(R::Unsigned(u64::from(v as u32), Radix::Hex)),
        (Directive::Hex, A::Long(v)) => {
            Reinterpreted(R::Unsigned(u64::from(v as u32), Radix::Hex))
        }
        (Directive::Hex, A::ULong(v)) => {
            Reinterpreted(R::Unsigned(u64::from(v as u32), Radix::Hex))
        }

        (Directive::Long, A::Long(v)) => Exact(R::Signed(v)),
        (Directive::Long, A::ULong(v)) => Exact(R::Unsigned(v, Radix::Decimal)),
        (Directive::Long, A::Int(v)) => Reinterpreted(R::Signed(v.into())),

        (Directive::Str, A::Str(s)) => Exact(R::Bytes(s)),

        _ => Incompatible,
    }
}

fn render(rendering: Rendering<'_>, cursor: &mut OutputCursor<'_>) {
    match rendering {
        Rendering::Signed(v) => {
            if v < 0 {
                cursor.push(b'-');
            }
            itoa(v.unsigned_abs(), cursor, Radix::Decimal);
        }
        Rendering::Unsigned(v, radix) => itoa(v, cursor, radix),
        Rendering::Bytes(s) => cursor.extend(&s[..strlen(s)]),
    }
}

/// Render `fmt` with `args` into `out`, NUL-terminated.
///
/// Literal bytes are copied verbatim. Each directive bumps the argument
/// counter; recognized directives consume exactly one argument, unrecognized
/// ones consume none and render nothing. Arguments left over at the end are
/// ignored.
///
/// Bytes of `out` past the terminator are not touched. On error the buffer
/// holds whatever was rendered before the failure, still terminated.
pub fn vsprintf(
    out: &mut [u8],
    fmt: &[u8],
    args: &[FormatArg<'_>],
    mode: FormatMode,
) -> Result<FormatReport, FormatError> {
    let mut cursor = OutputCursor::new(out);
    let mut argc: u32 = 1;
    let mut repairs: u32 = 0;
    let mut next_arg = 0usize;

    for segment in parse_format_string(fmt) {
        let directive = match segment {
            FormatSegment::Literal(lit) => {
                cursor.extend(lit);
                continue;
            }
            FormatSegment::Directive(directive) => directive,
        };

        argc += 1;
        if !directive.consumes_argument() {
            continue;
        }

        let index = next_arg;
        let Some(&arg) = args.get(index) else {
            if mode.heals_enabled() {
                repairs += 1;
                continue;
            }
            cursor.terminate();
            return Err(FormatError::MissingArgument {
                directive: char::from(directive.conversion()),
                index,
            });
        };
        next_arg += 1;

        match resolve(directive, arg) {
            Resolution::Exact(rendering) => render(rendering, &mut cursor),
            resolution if mode.heals_enabled() => {
                repairs += 1;
                if let Resolution::Reinterpreted(rendering) = resolution {
                    render(rendering, &mut cursor);
                }
            }
            _ => {
                cursor.terminate();
                return Err(FormatError::ArgumentMismatch {
                    directive: char::from(directive.conversion()),
                    index,
                    expected: directive.expected(),
                    found: arg.type_name(),
                });
            }
        }
    }

    let terminated = cursor.terminate();
    let truncated = cursor.overflowed() || !terminated;
    if truncated && !mode.heals_enabled() {
        return Err(FormatError::Overflow {
            capacity: cursor.capacity(),
            required: cursor.required(),
        });
    }

    Ok(FormatReport {
        argc,
        len: cursor.position(),
        truncated,
        repairs,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
