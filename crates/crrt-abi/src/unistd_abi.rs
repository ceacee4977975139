//! ABI layer for the raw `write` primitive.
//!
//! On x86_64 the bytes go straight to the kernel through the core syscall
//! veneer; elsewhere through the host `libc::write`.

use std::ffi::c_void;

use crrt_core::stdio::{OutputSink, Stream};

/// One `write(2)` of `bytes` to `fd`. Returns the kernel's count or -1.
pub(crate) fn raw_write(fd: i32, bytes: &[u8]) -> libc::ssize_t {
    #[cfg(target_arch = "x86_64")]
    {
        match crrt_core::syscall::write_bytes(fd, bytes) {
            Ok(n) => n as libc::ssize_t,
            Err(_) => -1,
        }
    }
    #[cfg(not(target_arch = "x86_64"))]
    {
        // SAFETY: the slice is readable for its full length.
        unsafe { libc::write(fd, bytes.as_ptr().cast(), bytes.len()) }
    }
}

/// Sink used by the exported print family.
#[derive(Debug, Default, Clone, Copy)]
pub struct RawSink;

impl OutputSink for RawSink {
    fn write(&mut self, stream: Stream, bytes: &[u8]) {
        let _ = raw_write(stream.fd(), bytes);
    }
}

abi_fn! {
    /// `write(fd, buf, len)`: one best-effort transfer, result discarded.
    ///
    /// A null `buf` or a non-positive `len` writes nothing.
    fn write(fd: i64, buf: *const c_void, len: i64) {
        if buf.is_null() || len <= 0 {
            return;
        }
        let bytes = std::slice::from_raw_parts(buf.cast::<u8>(), len as usize);
        let _ = raw_write(fd as i32, bytes);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pipe() -> (i32, i32) {
        let mut fds = [0i32; 2];
        assert_eq!(unsafe { libc::pipe(fds.as_mut_ptr()) }, 0);
        (fds[0], fds[1])
    }

    fn drain(fd: i32) -> Vec<u8> {
        let mut buf = [0u8; 256];
        let n = unsafe { libc::read(fd, buf.as_mut_ptr().cast(), buf.len()) };
        assert!(n >= 0);
        buf[..n as usize].to_vec()
    }

    fn close(fd: i32) {
        unsafe { libc::close(fd) };
    }

    #[test]
    fn write_reaches_the_descriptor() {
        let (rd, wr) = pipe();
        let msg = b"via write";
        unsafe { write(i64::from(wr), msg.as_ptr().cast(), msg.len() as i64) };
        close(wr);
        assert_eq!(drain(rd), msg);
        close(rd);
    }

    #[test]
    fn write_ignores_null_and_non_positive_len() {
        let (rd, wr) = pipe();
        unsafe {
            write(i64::from(wr), std::ptr::null(), 4);
            write(i64::from(wr), b"x".as_ptr().cast(), 0);
            write(i64::from(wr), b"x".as_ptr().cast(), -3);
        }
        close(wr);
        assert!(drain(rd).is_empty());
        close(rd);
    }

    #[test]
    fn raw_write_bad_fd_is_negative() {
        assert_eq!(raw_write(-1, b"x"), -1);
    }

    #[test]
    fn raw_sink_writes_through() {
        let (rd, wr) = pipe();
        let n = raw_write(wr, b"sink");
        assert_eq!(n, 4);
        close(wr);
        assert_eq!(drain(rd), b"sink");
        close(rd);
    }
}
