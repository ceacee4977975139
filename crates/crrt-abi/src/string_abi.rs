//! ABI layer for the byte-fill primitive.

use std::ffi::{c_int, c_void};

use crrt_core::string::mem;

abi_fn! {
    /// `memset(s, c, n)`: fill `n` bytes at `s` with `c as u8`.
    ///
    /// Returns nothing. A null `s` or `n == 0` is a no-op.
    fn memset(s: *mut c_void, c: c_int, n: usize) {
        if s.is_null() || n == 0 {
            return;
        }
        // SAFETY: caller guarantees `s` is writable for `n` bytes.
        let dest = std::slice::from_raw_parts_mut(s.cast::<u8>(), n);
        mem::memset(dest, c as u8, n);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fills_exactly_n_bytes() {
        let mut buf = [0u8; 8];
        unsafe { memset(buf.as_mut_ptr().cast(), c_int::from(b'Z'), 5) };
        assert_eq!(&buf, b"ZZZZZ\0\0\0");
    }

    #[test]
    fn value_is_truncated_to_a_byte() {
        let mut buf = [0u8; 4];
        unsafe { memset(buf.as_mut_ptr().cast(), 0x1FF, 4) };
        assert_eq!(buf, [0xFF; 4]);
    }

    #[test]
    fn null_and_zero_length_are_no_ops() {
        unsafe { memset(std::ptr::null_mut(), 1, 16) };
        let mut buf = [7u8; 2];
        unsafe { memset(buf.as_mut_ptr().cast(), 0, 0) };
        assert_eq!(buf, [7, 7]);
    }
}
