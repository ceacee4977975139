//! Runtime mode configuration.
//!
//! The format path runs in one of two modes:
//! - `strict` (default): overruns and argument/directive mismatches are
//!   reported as [`FormatError`](crate::stdio::FormatError) and nothing is
//!   handed to the output sink.
//! - `hardened`: the same conditions are repaired deterministically (truncate
//!   the output, skip or reinterpret the argument) and the call succeeds.
//!
//! Resolving the mode from the environment is the ABI layer's job; this crate
//! only defines the type.

/// Runtime operating mode for the format interpreter.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormatMode {
    /// Reject overruns and argument mismatches with an error.
    #[default]
    Strict,
    /// Truncate overruns and repair argument mismatches.
    Hardened,
}

impl FormatMode {
    /// Parse from string (case-insensitive). Unknown values fall back to strict.
    #[must_use]
    pub fn from_str_loose(s: &str) -> Self {
        const HARDENED: [&str; 4] = ["hardened", "repair", "tsm", "full"];
        if HARDENED.iter().any(|name| s.eq_ignore_ascii_case(name)) {
            Self::Hardened
        } else {
            Self::Strict
        }
    }

    /// Canonical lowercase name, as used in fixtures and logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Strict => "strict",
            Self::Hardened => "hardened",
        }
    }

    /// Returns true if violations are repaired instead of reported.
    #[must_use]
    pub const fn heals_enabled(self) -> bool {
        matches!(self, Self::Hardened)
    }
}

impl core::fmt::Display for FormatMode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_modes() {
        assert_eq!(FormatMode::from_str_loose("strict"), FormatMode::Strict);
        assert_eq!(FormatMode::from_str_loose("STRICT"), FormatMode::Strict);
        assert_eq!(FormatMode::from_str_loose("default"), FormatMode::Strict);
        assert_eq!(FormatMode::from_str_loose("abi"), FormatMode::Strict);
        assert_eq!(FormatMode::from_str_loose("hardened"), FormatMode::Hardened);
        assert_eq!(FormatMode::from_str_loose("Repair"), FormatMode::Hardened);
        assert_eq!(FormatMode::from_str_loose("tsm"), FormatMode::Hardened);
        assert_eq!(FormatMode::from_str_loose("full"), FormatMode::Hardened);
        assert_eq!(FormatMode::from_str_loose("bogus"), FormatMode::Strict);
        assert_eq!(FormatMode::from_str_loose(""), FormatMode::Strict);
    }

    #[test]
    fn default_is_strict() {
        assert_eq!(FormatMode::default(), FormatMode::Strict);
    }

    #[test]
    fn healing_only_in_hardened() {
        assert!(!FormatMode::Strict.heals_enabled());
        assert!(FormatMode::Hardened.heals_enabled());
    }

    #[test]
    fn names_round_trip_through_loose_parser() {
        for mode in [FormatMode::Strict, FormatMode::Hardened] {
            assert_eq!(FormatMode::from_str_loose(mode.as_str()), mode);
        }
    }
}
