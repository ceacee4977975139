//! Fixture loading and management.

use std::path::{Path, PathBuf};

use crrt_core::stdio::{FormatArg, PRINT_BUFFER_SIZE};
use serde::{Deserialize, Serialize};

use crate::error::HarnessError;

/// One typed argument, as written in fixture JSON (`{"int": 7}`, `{"str": "x"}`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FixtureArg {
    Int(i32),
    Long(i64),
    ULong(u64),
    Str(String),
}

impl FixtureArg {
    /// Borrow as a core argument.
    #[must_use]
    pub fn as_format_arg(&self) -> FormatArg<'_> {
        match self {
            Self::Int(v) => FormatArg::Int(*v),
            Self::Long(v) => FormatArg::Long(*v),
            Self::ULong(v) => FormatArg::ULong(*v),
            Self::Str(s) => FormatArg::Str(s.as_bytes()),
        }
    }

    /// Parse the CLI spelling `int:N`, `long:N`, `ulong:N` or `str:TEXT`.
    pub fn parse_cli(raw: &str) -> Result<Self, HarnessError> {
        let (kind, value) = raw
            .split_once(':')
            .ok_or_else(|| HarnessError::InvalidArg(format!("expected <type>:<value>, got '{raw}'")))?;
        let bad = |e: std::num::ParseIntError| HarnessError::InvalidArg(format!("{raw}: {e}"));
        match kind.to_ascii_lowercase().as_str() {
            "int" => value.parse().map(Self::Int).map_err(bad),
            "long" => value.parse().map(Self::Long).map_err(bad),
            "ulong" => value.parse().map(Self::ULong).map_err(bad),
            "str" => Ok(Self::Str(value.to_string())),
            other => Err(HarnessError::InvalidArg(format!(
                "unknown argument type '{other}', expected int|long|ulong|str"
            ))),
        }
    }
}

fn default_capacity() -> usize {
    PRINT_BUFFER_SIZE
}

/// Inputs shared by every fixture function.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureInputs {
    /// Format string (`vsprintf`, `printf`) or text (`putstr`).
    #[serde(default)]
    pub format: String,
    #[serde(default)]
    pub args: Vec<FixtureArg>,
    /// Destination buffer size for `vsprintf`.
    #[serde(default = "default_capacity")]
    pub capacity: usize,
}

impl FixtureInputs {
    /// Core arguments borrowed from this input set.
    #[must_use]
    pub fn format_args(&self) -> Vec<FormatArg<'_>> {
        self.args.iter().map(FixtureArg::as_format_arg).collect()
    }
}

/// A single fixture test case.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureCase {
    /// Case identifier.
    pub name: String,
    /// Entry point exercised: `vsprintf`, `printf`, `print` or `putstr`.
    pub function: String,
    /// Behaviour reference (e.g. "format/hex").
    #[serde(alias = "spec_section")]
    pub section: String,
    pub inputs: FixtureInputs,
    /// Rendered bytes as UTF-8, or `error:<kind>` for a rejected call.
    pub expected_output: String,
    /// Expected argument count, when the function reports one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_argc: Option<u32>,
    /// `strict`, `hardened` or `both`.
    pub mode: String,
}

/// A collection of fixture cases for a function family.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureSet {
    /// Schema version.
    pub version: String,
    /// Function family name.
    pub family: String,
    /// UTC timestamp of capture.
    pub captured_at: String,
    /// Individual test cases.
    pub cases: Vec<FixtureCase>,
}

impl FixtureSet {
    /// Load fixture set from JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serialize fixture set to JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load fixture set from a file path.
    pub fn from_file(path: &Path) -> Result<Self, HarnessError> {
        let content = std::fs::read_to_string(path)?;
        Ok(Self::from_json(&content)?)
    }
}

/// Sorted `*.json` paths directly under `dir`.
pub fn fixture_paths(dir: &Path) -> Result<Vec<PathBuf>, HarnessError> {
    let mut paths: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|entry| entry.path()))
        .filter(|path| path.extension().and_then(|s| s.to_str()) == Some("json"))
        .collect();
    paths.sort();
    Ok(paths)
}
