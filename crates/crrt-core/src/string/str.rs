//! NUL-terminated byte strings.
//!
//! Strings are `&[u8]` slices where a NUL byte (`0x00`) marks the logical end.
//! A slice without NUL ends at its last byte.

/// Returns the length of a NUL-terminated byte string (not counting the NUL).
///
/// Equivalent to C `strlen`. Scans `s` for the first `0x00` byte and returns
/// its index. If no NUL is found, returns the full slice length.
#[must_use]
pub fn strlen(s: &[u8]) -> usize {
    s.iter().position(|&b| b == 0).unwrap_or(s.len())
}
