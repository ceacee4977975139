//! String and memory operations.
//!
//! The `<string.h>` pieces the runtime needs, as safe Rust on slices.

pub mod mem;
pub mod str;

pub use mem::memset;
pub use str::strlen;
