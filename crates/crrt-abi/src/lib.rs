#![cfg_attr(feature = "c-variadic", feature(c_variadic))]
// Exports take raw pointers under the usual C contract.
#![allow(clippy::missing_safety_doc)]
// This crate exports `memset`; LLVM must not lower fill loops back into calls to it.
#![no_builtins]
//! # crrt-abi
//!
//! `extern "C"` boundary for the crrt runtime.
//!
//! This crate produces a `cdylib` exposing `printf`, `print`, `putstr`,
//! `memset` and `write`. Each entry point turns raw C arguments into slices
//! and typed [`FormatArg`](crrt_core::stdio::FormatArg)s, then delegates to the
//! safe implementations in `crrt-core`.
//!
//! # Architecture
//!
//! ```text
//! C caller -> ABI entry (this crate) -> runtime mode -> core impl -> write(2)
//! ```
//!
//! In **strict** mode a format that overruns the print buffer or disagrees
//! with its arguments writes nothing and `printf` returns 0.
//!
//! In **hardened** mode the same call truncates or repairs and still writes.

#[macro_use]
mod macros;

pub mod runtime_mode;
pub mod stdio_abi;
pub mod string_abi;
pub mod unistd_abi;
pub mod util;
