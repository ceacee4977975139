//! Byte-fill primitive.

/// Fills the first `n` bytes of `dest` with the byte `value`.
///
/// Equivalent to C `memset(dest, c, n)`, clamped to the slice.
///
/// Returns the number of bytes actually set.
#[inline]
pub fn memset(dest: &mut [u8], value: u8, n: usize) -> usize {
    let count = n.min(dest.len());
    for byte in &mut dest[..count] {
        *byte = value;
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memset_basic() {
        let mut buf = [0u8; 8];
        assert_eq!(memset(&mut buf, b'A', 8), 8);
        assert_eq!(&buf, b"AAAAAAAA");
    }

    #[test]
    fn test_memset_partial() {
        let mut buf = [0u8; 8];
        memset(&mut buf, b'X', 3);
        assert_eq!(&buf, b"XXX\0\0\0\0\0");
    }

    #[test]
    fn test_memset_clamps_to_slice() {
        let mut buf = [1u8; 4];
        assert_eq!(memset(&mut buf, 0, 100), 4);
        assert_eq!(buf, [0; 4]);
    }

    #[test]
    fn test_memset_zero_len() {
        let mut buf = [7u8; 2];
        assert_eq!(memset(&mut buf, 0, 0), 0);
        assert_eq!(buf, [7, 7]);
    }
}
