//! Helper macros for ABI function generation.
//!
//! Provides the `abi_fn!` macro that generates `pub unsafe extern "C" fn`
//! wrappers, unmangled in release builds.

/// Generate an ABI-compatible extern "C" function.
///
/// # Usage
///
/// ```ignore
/// abi_fn! {
///     /// Doc comment for the function.
///     fn my_func(arg1: Type1, arg2: Type2) -> ReturnType {
///         // implementation body
///     }
/// }
/// ```
///
/// The symbol is `#[no_mangle]` only in non-test release builds: a test
/// binary that exported `memset` or `write` would shadow the host libc.
macro_rules! abi_fn {
    (
        $(#[$meta:meta])*
        fn $name:ident( $($arg:ident : $argty:ty),* $(,)? ) -> $ret:ty
        $body:block
    ) => {
        $(#[$meta])*
        #[cfg_attr(not(any(debug_assertions, test)), unsafe(no_mangle))]
        pub unsafe extern "C" fn $name( $($arg : $argty),* ) -> $ret {
            unsafe { $body }
        }
    };

    // Variant without return type (returns ())
    (
        $(#[$meta:meta])*
        fn $name:ident( $($arg:ident : $argty:ty),* $(,)? )
        $body:block
    ) => {
        $(#[$meta])*
        #[cfg_attr(not(any(debug_assertions, test)), unsafe(no_mangle))]
        pub unsafe extern "C" fn $name( $($arg : $argty),* ) {
            unsafe { $body }
        }
    };
}
