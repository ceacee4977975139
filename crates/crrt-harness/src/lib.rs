//! Fixture verification harness for crrt.
//!
//! This crate provides:
//! - Fixtures: JSON cases pairing a format string and typed arguments with
//!   the expected rendering and argument count
//! - Runner: executes cases through the core formatter in strict or hardened mode
//! - Reports: markdown and JSON summaries carrying a digest of the fixtures run
//! - Structured logging: JSONL records for each verified case

#![forbid(unsafe_code)]

pub mod diff;
pub mod error;
pub mod fixtures;
pub mod report;
pub mod runner;
pub mod structured_log;
pub mod verify;

pub use error::HarnessError;
pub use fixtures::{FixtureArg, FixtureCase, FixtureSet};
pub use report::ConformanceReport;
pub use runner::TestRunner;
pub use verify::VerificationResult;
