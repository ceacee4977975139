//! Call-site helpers for building argument lists.

/// Build a `[FormatArg; N]` array from heterogeneous values, left to right.
///
/// Each expression goes through `FormatArg::from`, so `i32`, `i64`, `u64`,
/// `&str` and `&[u8]` values can be mixed freely.
///
/// ```
/// use crrt_core::crrt_args;
/// use crrt_core::stdio::FormatArg;
///
/// let args = crrt_args![7, "x", 1u64 << 40];
/// assert!(matches!(args[0], FormatArg::Int(7)));
/// assert!(matches!(args[1], FormatArg::Str(b"x")));
/// ```
#[macro_export]
macro_rules! crrt_args {
    () => {
        [$crate::stdio::FormatArg::Int(0); 0]
    };
    ($($arg:expr),+ $(,)?) => {
        [$($crate::stdio::FormatArg::from($arg)),+]
    };
}
