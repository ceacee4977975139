//! CLI entrypoint for the crrt fixture harness.

use std::io::Write;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use crrt_core::FormatMode;
use crrt_core::stdio::{PRINT_BUFFER_SIZE, vsprintf};
use crrt_harness::fixtures::{FixtureArg, FixtureSet, fixture_paths};
use crrt_harness::report::fixture_digest;
use crrt_harness::structured_log::{LogEmitter, LogEntry, LogLevel, Outcome, now_utc};
use crrt_harness::verify::VerificationSummary;
use crrt_harness::{ConformanceReport, HarnessError, TestRunner};

/// Conformance tooling for crrt.
#[derive(Debug, Parser)]
#[command(name = "crrt-harness")]
#[command(about = "Fixture verification harness for crrt")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Verify the formatter against fixture files, in strict and hardened mode.
    Verify {
        /// Directory containing fixture JSON files.
        #[arg(long)]
        fixture: PathBuf,
        /// Output report path (markdown; JSON is written beside it).
        #[arg(long)]
        report: Option<PathBuf>,
        /// Structured JSONL log path.
        #[arg(long)]
        log: Option<PathBuf>,
        /// Fixed report timestamp, for reproducible output.
        #[arg(long)]
        timestamp: Option<String>,
    },
    /// Render one format string and print the result.
    Render {
        /// Format string.
        #[arg(long)]
        format: String,
        /// Argument as `int:N`, `long:N`, `ulong:N` or `str:TEXT` (repeatable).
        #[arg(long = "arg")]
        args: Vec<String>,
        /// Runtime mode (strict or hardened).
        #[arg(long, default_value = "strict")]
        mode: String,
        /// Destination buffer size in bytes, terminator included.
        #[arg(long, default_value_t = PRINT_BUFFER_SIZE)]
        capacity: usize,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Verify {
            fixture,
            report,
            log,
            timestamp,
        } => {
            eprintln!("Verifying against fixtures in {}", fixture.display());
            let mut fixture_sets = Vec::new();
            for path in fixture_paths(&fixture)? {
                match FixtureSet::from_file(&path) {
                    Ok(set) => fixture_sets.push(set),
                    Err(err) => eprintln!("Skipping {}: {}", path.display(), err),
                }
            }
            if fixture_sets.is_empty() {
                return Err(HarnessError::NoFixtures(fixture).into());
            }

            let timestamp = timestamp.unwrap_or_else(now_utc);
            let mut emitter = match &log {
                Some(path) => LogEmitter::to_file(path, "fixture-verify", &timestamp)?,
                None => LogEmitter::to_buffer("fixture-verify", &timestamp),
            };

            let strict_runner = TestRunner::new("fixture-verify", "strict");
            let hardened_runner = TestRunner::new("fixture-verify", "hardened");
            let mut results = Vec::new();
            for set in &fixture_sets {
                results.extend(strict_runner.run_logged(set, &mut emitter)?);
                results.extend(hardened_runner.run_logged(set, &mut emitter)?);
            }

            let summary = VerificationSummary::from_results(results);
            let report_doc = ConformanceReport {
                title: String::from("crrt Conformance Report"),
                mode: String::from("strict+hardened"),
                timestamp,
                fixture_digest: fixture_digest(&fixture_sets)?,
                summary,
            };

            let (level, outcome) = if report_doc.summary.all_passed() {
                (LogLevel::Info, Outcome::Pass)
            } else {
                (LogLevel::Error, Outcome::Fail)
            };
            emitter.emit_entry(
                LogEntry::new("", level, "verify_summary")
                    .with_outcome(outcome)
                    .with_details(serde_json::json!({
                        "total": report_doc.summary.total,
                        "passed": report_doc.summary.passed,
                        "failed": report_doc.summary.failed,
                        "fixture_digest": report_doc.fixture_digest,
                    })),
            )?;
            emitter.flush()?;

            eprintln!(
                "Verification complete: total={}, passed={}, failed={}",
                report_doc.summary.total, report_doc.summary.passed, report_doc.summary.failed
            );

            if let Some(report_path) = report {
                eprintln!("Writing report to {}", report_path.display());
                std::fs::write(&report_path, report_doc.to_markdown())?;
                let json_path = report_path.with_extension("json");
                std::fs::write(&json_path, report_doc.to_json())?;
            }
            if let Some(log_path) = log {
                eprintln!("Wrote structured log to {}", log_path.display());
            }

            if !report_doc.summary.all_passed() {
                return Err("Conformance verification failed".into());
            }
        }
        Command::Render {
            format,
            args,
            mode,
            capacity,
        } => {
            let parsed = args
                .iter()
                .map(|raw| FixtureArg::parse_cli(raw))
                .collect::<Result<Vec<_>, _>>()?;
            let format_args: Vec<_> = parsed.iter().map(FixtureArg::as_format_arg).collect();
            let mode = FormatMode::from_str_loose(&mode);

            let mut buf = vec![0u8; capacity];
            let report = vsprintf(&mut buf, format.as_bytes(), &format_args, mode)?;

            let mut stdout = std::io::stdout().lock();
            stdout.write_all(&buf[..report.len])?;
            stdout.write_all(b"\n")?;
            eprintln!(
                "mode={} argc={} len={} truncated={} repairs={}",
                mode, report.argc, report.len, report.truncated, report.repairs
            );
        }
    }

    Ok(())
}
