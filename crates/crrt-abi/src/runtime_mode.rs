//! Process-wide runtime mode.
//!
//! Set via the `CRRT_MODE` environment variable:
//! - `strict` (default): format failures are reported and nothing is written.
//! - `hardened`: overruns are truncated and argument mismatches repaired.
//!
//! Anything else resolves to strict.

use std::sync::atomic::{AtomicU8, Ordering};

use crrt_core::FormatMode;

/// Environment variable consulted on first use.
pub const MODE_ENV: &str = "CRRT_MODE";

// Atomic cache: 0=unresolved, 1=Strict, 2=Hardened, 255=resolving.
// Not a OnceLock: std::env::var may re-enter our exported symbols while the
// mode is being resolved, and a blocking init would deadlock there.
static CACHED_MODE: AtomicU8 = AtomicU8::new(0);

const MODE_UNRESOLVED: u8 = 0;
const MODE_STRICT: u8 = 1;
const MODE_HARDENED: u8 = 2;
const MODE_RESOLVING: u8 = 255;

fn mode_to_u8(mode: FormatMode) -> u8 {
    match mode {
        FormatMode::Strict => MODE_STRICT,
        FormatMode::Hardened => MODE_HARDENED,
    }
}

fn u8_to_mode(v: u8) -> FormatMode {
    match v {
        MODE_HARDENED => FormatMode::Hardened,
        _ => FormatMode::Strict,
    }
}

fn is_resolved(v: u8) -> bool {
    v != MODE_UNRESOLVED && v != MODE_RESOLVING
}

/// Get the configured mode (reads `CRRT_MODE` on first call, caches thereafter).
///
/// A call that arrives while another is resolving sees [`FormatMode::Strict`].
#[must_use]
pub fn format_mode() -> FormatMode {
    let cached = CACHED_MODE.load(Ordering::Relaxed);
    if is_resolved(cached) {
        return u8_to_mode(cached);
    }
    if cached == MODE_RESOLVING {
        return FormatMode::Strict;
    }

    if CACHED_MODE
        .compare_exchange(
            MODE_UNRESOLVED,
            MODE_RESOLVING,
            Ordering::SeqCst,
            Ordering::Relaxed,
        )
        .is_err()
    {
        let v = CACHED_MODE.load(Ordering::Relaxed);
        return if is_resolved(v) {
            u8_to_mode(v)
        } else {
            FormatMode::Strict
        };
    }

    let mode = std::env::var(MODE_ENV)
        .map(|v| FormatMode::from_str_loose(&v))
        .unwrap_or_default();
    CACHED_MODE.store(mode_to_u8(mode), Ordering::Release);
    mode
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn u8_encoding_round_trips() {
        for mode in [FormatMode::Strict, FormatMode::Hardened] {
            assert_eq!(u8_to_mode(mode_to_u8(mode)), mode);
        }
        assert_eq!(u8_to_mode(MODE_UNRESOLVED), FormatMode::Strict);
        assert_eq!(u8_to_mode(MODE_RESOLVING), FormatMode::Strict);
    }

    #[test]
    fn cached_mode_is_process_sticky_until_cache_reset() {
        let previous = CACHED_MODE.swap(MODE_STRICT, Ordering::SeqCst);
        assert_eq!(format_mode(), FormatMode::Strict);
        assert_eq!(format_mode(), FormatMode::Strict);

        CACHED_MODE.store(MODE_HARDENED, Ordering::SeqCst);
        assert_eq!(format_mode(), FormatMode::Hardened);

        CACHED_MODE.store(MODE_RESOLVING, Ordering::SeqCst);
        assert_eq!(format_mode(), FormatMode::Strict);

        CACHED_MODE.store(previous, Ordering::SeqCst);
    }
}
