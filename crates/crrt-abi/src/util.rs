//! Shared internal utilities for ABI adapters.

use std::ffi::c_char;

/// Rendered in place of a null `char *` argument.
pub const NULL_STR: &[u8] = b"(null)";

/// Length of a C string, terminator excluded.
///
/// # Safety
///
/// `ptr` must be non-null and point to a NUL-terminated string.
pub unsafe fn c_strlen(ptr: *const c_char) -> usize {
    let mut len = 0usize;
    while unsafe { *ptr.add(len) } != 0 {
        len += 1;
    }
    len
}

/// Borrow a NUL-terminated C string as bytes (terminator excluded).
///
/// Returns `None` for a null pointer.
///
/// # Safety
///
/// A non-null `ptr` must point to a NUL-terminated string that outlives `'a`.
pub unsafe fn c_str_bytes<'a>(ptr: *const c_char) -> Option<&'a [u8]> {
    if ptr.is_null() {
        return None;
    }
    let len = unsafe { c_strlen(ptr) };
    // SAFETY: `len` bytes before the terminator were just read.
    Some(unsafe { std::slice::from_raw_parts(ptr.cast::<u8>(), len) })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn c_strlen_stops_at_first_nul() {
        let s = b"hello\0world\0";
        assert_eq!(unsafe { c_strlen(s.as_ptr().cast()) }, 5);
        assert_eq!(unsafe { c_strlen(c"".as_ptr()) }, 0);
    }

    #[test]
    fn c_str_bytes_null_is_none() {
        assert_eq!(unsafe { c_str_bytes(std::ptr::null()) }, None);
    }

    #[test]
    fn c_str_bytes_borrows_without_terminator() {
        let s = c"abc";
        assert_eq!(unsafe { c_str_bytes(s.as_ptr()) }, Some(&b"abc"[..]));
    }
}
