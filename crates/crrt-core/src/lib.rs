//! # crrt-core
//!
//! Freestanding runtime fragment: a small `printf` family, a byte-fill
//! primitive and the raw `write` syscall, for targets without an OS C library.
//!
//! Everything outside [`syscall`] is safe Rust over caller-owned buffers and
//! performs no allocation, so the crate is `no_std`.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

#[macro_use]
mod macros;

pub mod config;
pub mod stdio;
pub mod string;
#[allow(unsafe_code)]
#[cfg(target_arch = "x86_64")]
pub mod syscall;

pub use config::FormatMode;
