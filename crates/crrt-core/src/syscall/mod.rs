//! Raw Linux x86_64 syscall veneer.
//!
//! The runtime's only path to the kernel: a `write` issued with inline
//! assembly, so no host libc is needed.
//!
//! # Architecture
//!
//! x86_64 Linux syscall ABI:
//! - Syscall number: `rax`
//! - Arguments: `rdi`, `rsi`, `rdx`
//! - Return: `rax` (negative values in `[-4095, -1]` indicate `-errno`)
//! - Clobbered: `rcx`, `r11`

#[allow(unsafe_code)]
mod raw;

pub use raw::*;

pub const SYS_WRITE: usize = 1;

pub const STDOUT_FILENO: i32 = 1;
pub const STDERR_FILENO: i32 = 2;

/// Maximum errno value returned by Linux syscalls.
const MAX_ERRNO: usize = 4095;

/// Convert a raw syscall return value to `Result<usize, i32>`.
///
/// On x86_64 Linux, error returns are in the range `[-(MAX_ERRNO), -1]`
/// which in unsigned representation is `[usize::MAX - MAX_ERRNO + 1, usize::MAX]`.
#[inline]
pub fn syscall_result(ret: usize) -> Result<usize, i32> {
    if ret > usize::MAX - MAX_ERRNO {
        Err(-(ret as isize) as i32)
    } else {
        Ok(ret)
    }
}

/// `write(fd, buf, count)`: write to a file descriptor.
///
/// # Safety
///
/// `buf` must point to a readable region of at least `count` bytes.
#[inline]
#[allow(unsafe_code)]
pub unsafe fn sys_write(fd: i32, buf: *const u8, count: usize) -> Result<usize, i32> {
    // SAFETY: caller guarantees buf validity and count bounds.
    let ret = unsafe { raw::syscall3(SYS_WRITE, fd as usize, buf as usize, count) };
    syscall_result(ret)
}

/// Single `write` of a whole slice. Short writes are returned, not retried.
#[inline]
#[allow(unsafe_code)]
pub fn write_bytes(fd: i32, bytes: &[u8]) -> Result<usize, i32> {
    // SAFETY: the slice is readable for its full length.
    unsafe { sys_write(fd, bytes.as_ptr(), bytes.len()) }
}
