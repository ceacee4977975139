//! Integer-to-text conversion.

use super::cursor::OutputCursor;

/// Base for numeric rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Radix {
    /// Base 10, digits `0`-`9`.
    Decimal,
    /// Base 16, digits `0`-`9` then uppercase `A`-`F`.
    Hex,
}

impl Radix {
    /// Numeric base.
    #[must_use]
    pub const fn base(self) -> u64 {
        match self {
            Self::Decimal => 10,
            Self::Hex => 16,
        }
    }

    /// Maximum number of digits a `u64` needs in this base.
    #[must_use]
    pub const fn max_digits(self) -> usize {
        match self {
            Self::Decimal => 20,
            Self::Hex => 16,
        }
    }
}

/// Map a single digit value (`< 16`) to its ASCII character.
#[inline]
#[must_use]
pub const fn digit_char(digit: u8) -> u8 {
    if digit < 10 {
        b'0' + digit
    } else {
        b'A' + (digit - 10)
    }
}

/// Write `value` at the cursor, most significant digit first.
///
/// Emits the minimal representation: no sign, no prefix, no leading zeros,
/// and `0` as a single `'0'`. Recursion depth is at most
/// [`Radix::max_digits`].
pub fn itoa(value: u64, cursor: &mut OutputCursor<'_>, radix: Radix) {
    let base = radix.base();
    let digit = (value % base) as u8;
    let rest = value / base;
    if rest != 0 {
        itoa(rest, cursor, radix);
    }
    cursor.push(digit_char(digit));
}
