//! Exercises the exported entry points through their Rust paths.

use std::ffi::c_int;

use crrt_abi::string_abi::memset;
use crrt_abi::unistd_abi::write;

fn pipe() -> (c_int, c_int) {
    let mut fds = [0 as c_int; 2];
    assert_eq!(unsafe { libc::pipe(fds.as_mut_ptr()) }, 0);
    (fds[0], fds[1])
}

fn read_all(fd: c_int) -> Vec<u8> {
    let mut out = Vec::new();
    let mut chunk = [0u8; 64];
    loop {
        let n = unsafe { libc::read(fd, chunk.as_mut_ptr().cast(), chunk.len()) };
        if n <= 0 {
            break;
        }
        out.extend_from_slice(&chunk[..n as usize]);
    }
    out
}

#[test]
fn memset_then_write_round_trip() {
    let mut buf = [0u8; 12];
    unsafe {
        memset(buf.as_mut_ptr().cast(), c_int::from(b'-'), buf.len());
        memset(buf.as_mut_ptr().add(4).cast(), c_int::from(b'#'), 4);
    }
    assert_eq!(&buf, b"----####----");

    let (rd, wr) = pipe();
    unsafe {
        write(i64::from(wr), buf.as_ptr().cast(), 6);
        write(i64::from(wr), buf.as_ptr().add(6).cast(), 6);
        libc::close(wr);
    }
    assert_eq!(read_all(rd), buf);
    unsafe { libc::close(rd) };
}

#[cfg(feature = "c-variadic")]
#[test]
fn variadic_printf_returns_argument_count() {
    use crrt_abi::stdio_abi::printf;

    let n = unsafe { printf(c"abi %d %x %l %s %q\n".as_ptr(), -3i32, 255i32, 7u64, c"ok".as_ptr()) };
    assert_eq!(n, 6);
    assert_eq!(unsafe { printf(std::ptr::null()) }, 0);
}
