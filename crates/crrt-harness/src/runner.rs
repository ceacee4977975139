//! Test execution engine.

use std::time::Instant;

use crrt_core::FormatMode;
use crrt_core::stdio::{FormatArg, FormatReport, OutputSink, Printer, Stream, vsprintf};

use crate::diff;
use crate::error::HarnessError;
use crate::fixtures::{FixtureCase, FixtureSet};
use crate::structured_log::{LogEmitter, LogEntry, LogLevel, Outcome};
use crate::verify::VerificationResult;

/// Runs a fixture set and collects verification results.
pub struct TestRunner {
    /// Name of the test campaign.
    pub campaign: String,
    /// Mode being tested (strict or hardened).
    pub mode: String,
}

/// What one case produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseExecution {
    /// Rendered bytes (lossy UTF-8), `error:<kind>` or `unsupported:<what>`.
    pub output: String,
    pub argc: Option<u32>,
    pub healing_action: Option<&'static str>,
}

impl CaseExecution {
    fn unsupported(what: &str) -> Self {
        Self {
            output: format!("unsupported:{what}"),
            argc: None,
            healing_action: None,
        }
    }
}

impl TestRunner {
    /// Create a new test runner.
    #[must_use]
    pub fn new(campaign: impl Into<String>, mode: impl Into<String>) -> Self {
        Self {
            campaign: campaign.into(),
            mode: mode.into(),
        }
    }

    #[must_use]
    pub fn format_mode(&self) -> FormatMode {
        FormatMode::from_str_loose(&self.mode)
    }

    /// Run all fixtures in a set and return results.
    pub fn run(&self, fixture_set: &FixtureSet) -> Vec<VerificationResult> {
        self.matching(fixture_set)
            .map(|case| self.verify_case(case, &execute_case(case, self.format_mode())))
            .collect()
    }

    /// Like [`run`](Self::run), emitting one log line per case.
    pub fn run_logged(
        &self,
        fixture_set: &FixtureSet,
        log: &mut LogEmitter,
    ) -> Result<Vec<VerificationResult>, HarnessError> {
        let mut results = Vec::new();
        for case in self.matching(fixture_set) {
            let started = Instant::now();
            let execution = execute_case(case, self.format_mode());
            let latency_ns = u64::try_from(started.elapsed().as_nanos()).unwrap_or(u64::MAX);
            let result = self.verify_case(case, &execution);

            let (level, outcome) = if result.passed {
                (LogLevel::Info, Outcome::Pass)
            } else {
                (LogLevel::Error, Outcome::Fail)
            };
            let mut entry = LogEntry::new("", level, "fixture_case")
                .with_mode(self.format_mode().as_str())
                .with_symbol(&case.function)
                .with_outcome(outcome)
                .with_latency_ns(latency_ns)
                .with_details(serde_json::json!({
                    "family": fixture_set.family,
                    "case": case.name,
                    "section": case.section,
                    "expected": result.expected,
                    "actual": result.actual,
                }));
            if let Some(action) = execution.healing_action {
                entry = entry.with_healing_action(action);
            }
            log.emit_entry(entry)?;
            results.push(result);
        }
        Ok(results)
    }

    fn matching<'s>(&'s self, fixture_set: &'s FixtureSet) -> impl Iterator<Item = &'s FixtureCase> {
        fixture_set
            .cases
            .iter()
            .filter(|case| mode_matches(&self.mode, &case.mode))
    }

    fn verify_case(&self, case: &FixtureCase, execution: &CaseExecution) -> VerificationResult {
        let output_ok = execution.output == case.expected_output;
        let argc_ok = case.expected_argc.is_none() || case.expected_argc == execution.argc;
        let diff = if !output_ok {
            Some(diff::render_diff(&case.expected_output, &execution.output))
        } else if !argc_ok {
            Some(format!(
                "argc mismatch: expected={:?}, actual={:?}",
                case.expected_argc, execution.argc
            ))
        } else {
            None
        };
        VerificationResult {
            case_name: case.name.clone(),
            spec_section: case.section.clone(),
            mode: self.format_mode().as_str().to_string(),
            passed: output_ok && argc_ok,
            expected: case.expected_output.clone(),
            actual: execution.output.clone(),
            expected_argc: case.expected_argc,
            actual_argc: execution.argc,
            healing_action: execution.healing_action.map(str::to_string),
            diff,
        }
    }
}

fn mode_matches(active_mode: &str, case_mode: &str) -> bool {
    let active = active_mode.to_ascii_lowercase();
    let case = case_mode.to_ascii_lowercase();
    case == active || case == "both"
}

#[derive(Default)]
struct CaptureSink(Vec<u8>);

impl OutputSink for CaptureSink {
    fn write(&mut self, _stream: Stream, bytes: &[u8]) {
        self.0.extend_from_slice(bytes);
    }
}

fn healing_action(report: &FormatReport) -> Option<&'static str> {
    if report.truncated {
        Some("truncate")
    } else if report.repairs > 0 {
        Some("repair_argument")
    } else {
        None
    }
}

fn lossy(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

/// Execute one case through the core in `mode`.
#[must_use]
pub fn execute_case(case: &FixtureCase, mode: FormatMode) -> CaseExecution {
    let inputs = &case.inputs;
    let args = inputs.format_args();
    let fmt = inputs.format.as_bytes();

    match case.function.as_str() {
        "vsprintf" => {
            let mut buf = vec![0u8; inputs.capacity];
            match vsprintf(&mut buf, fmt, &args, mode) {
                Ok(report) => CaseExecution {
                    output: lossy(&buf[..report.len]),
                    argc: Some(report.argc),
                    healing_action: healing_action(&report),
                },
                Err(err) => CaseExecution {
                    output: format!("error:{}", err.kind()),
                    argc: None,
                    healing_action: None,
                },
            }
        }
        "printf" => {
            let mut printer = Printer::new(CaptureSink::default(), mode);
            match printer.printf_report(fmt, &args) {
                Ok(report) => CaseExecution {
                    output: lossy(&printer.into_sink().0),
                    argc: Some(report.argc),
                    healing_action: healing_action(&report),
                },
                Err(err) => CaseExecution {
                    output: format!("error:{}", err.kind()),
                    argc: None,
                    healing_action: None,
                },
            }
        }
        "print" => {
            let value = match args.first() {
                Some(FormatArg::ULong(v)) => *v,
                Some(FormatArg::Long(v)) => *v as u64,
                Some(FormatArg::Int(v)) => *v as u64,
                _ => return CaseExecution::unsupported("print needs one numeric argument"),
            };
            let mut printer = Printer::new(CaptureSink::default(), mode);
            printer.print(value);
            CaseExecution {
                output: lossy(&printer.into_sink().0),
                argc: None,
                healing_action: None,
            }
        }
        "putstr" => {
            let mut printer = Printer::new(CaptureSink::default(), mode);
            printer.putstr(fmt);
            CaseExecution {
                output: lossy(&printer.into_sink().0),
                argc: None,
                healing_action: None,
            }
        }
        other => CaseExecution::unsupported(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FixtureSet;

    fn fixture(cases: &str) -> FixtureSet {
        FixtureSet::from_json(&format!(
            r#"{{"version":"v1","family":"stdio/printf","captured_at":"2026-10-16T00:00:00Z","cases":[{cases}]}}"#
        ))
        .expect("valid fixture json")
    }

    #[test]
    fn strict_runner_executes_matching_cases() {
        let set = fixture(
            r#"{"name":"strict_int","function":"vsprintf","section":"format/int","inputs":{"format":"%d","args":[{"int":-42}]},"expected_output":"-42","expected_argc":2,"mode":"strict"},
               {"name":"hard_only","function":"vsprintf","section":"format/int","inputs":{"format":"%d"},"expected_output":"","mode":"hardened"}"#,
        );
        let strict = TestRunner::new("smoke", "strict").run(&set);
        assert_eq!(strict.len(), 1);
        assert!(strict[0].passed, "{:?}", strict[0].diff);
        assert_eq!(strict[0].actual_argc, Some(2));
    }

    #[test]
    fn both_runs_in_each_mode() {
        let set = fixture(
            r#"{"name":"hex","function":"vsprintf","section":"format/hex","inputs":{"format":"%x","args":[{"int":255}]},"expected_output":"FF","mode":"both"}"#,
        );
        assert_eq!(TestRunner::new("m", "strict").run(&set).len(), 1);
        assert_eq!(TestRunner::new("m", "hardened").run(&set).len(), 1);
    }

    #[test]
    fn strict_overflow_renders_error_kind() {
        let set = fixture(
            r#"{"name":"tiny","function":"vsprintf","section":"bounds","inputs":{"format":"hello","capacity":3},"expected_output":"error:overflow","mode":"strict"}"#,
        );
        let results = TestRunner::new("b", "strict").run(&set);
        assert!(results[0].passed, "{:?}", results[0].diff);
    }

    #[test]
    fn hardened_truncation_is_tagged() {
        let set = fixture(
            r#"{"name":"tiny","function":"vsprintf","section":"bounds","inputs":{"format":"hello","capacity":3},"expected_output":"he","expected_argc":1,"mode":"hardened"}"#,
        );
        let results = TestRunner::new("b", "hardened").run(&set);
        assert!(results[0].passed, "{:?}", results[0].diff);
        assert_eq!(results[0].healing_action.as_deref(), Some("truncate"));
    }

    #[test]
    fn argc_mismatch_fails_the_case() {
        let set = fixture(
            r#"{"name":"argc","function":"vsprintf","section":"argc","inputs":{"format":"x"},"expected_output":"x","expected_argc":2,"mode":"strict"}"#,
        );
        let results = TestRunner::new("a", "strict").run(&set);
        assert!(!results[0].passed);
        assert!(results[0].diff.as_deref().unwrap_or("").contains("argc mismatch"));
    }

    #[test]
    fn print_family_functions() {
        let case = |json: &str| serde_json::from_str::<FixtureCase>(json).unwrap();
        let print = case(
            r#"{"name":"p","function":"print","section":"print","inputs":{"args":[{"ulong":18446744073709551615}]},"expected_output":"","mode":"both"}"#,
        );
        assert_eq!(
            execute_case(&print, FormatMode::Strict).output,
            "18446744073709551615"
        );

        let putstr = case(
            r#"{"name":"s","function":"putstr","section":"putstr","inputs":{"format":"50% %d"},"expected_output":"","mode":"both"}"#,
        );
        assert_eq!(execute_case(&putstr, FormatMode::Strict).output, "50% %d");

        let printf = case(
            r#"{"name":"f","function":"printf","section":"printf","inputs":{"format":"a=%d,b=%s","args":[{"int":7},{"str":"x"}]},"expected_output":"","mode":"both"}"#,
        );
        let run = execute_case(&printf, FormatMode::Strict);
        assert_eq!(run.output, "a=7,b=x");
        assert_eq!(run.argc, Some(3));
    }

    #[test]
    fn hardened_printf_cases_carry_healing_action() {
        let long = "y".repeat(1500);
        let set = fixture(&format!(
            r#"{{"name":"clamped","function":"printf","section":"bounds","inputs":{{"format":"{long}"}},"expected_output":"{}","expected_argc":1,"mode":"hardened"}},
               {{"name":"missing","function":"printf","section":"args","inputs":{{"format":"[%d]"}},"expected_output":"[]","expected_argc":2,"mode":"hardened"}}"#,
            &long[..1023]
        ));
        let results = TestRunner::new("p", "hardened").run(&set);
        assert!(results.iter().all(|r| r.passed), "{results:?}");
        assert_eq!(results[0].healing_action.as_deref(), Some("truncate"));
        assert_eq!(results[1].healing_action.as_deref(), Some("repair_argument"));
    }

    #[test]
    fn strict_putstr_is_not_bounded_by_print_buffer() {
        let long = "q".repeat(4096);
        let case: FixtureCase = serde_json::from_str(&format!(
            r#"{{"name":"s","function":"putstr","section":"putstr","inputs":{{"format":"{long}"}},"expected_output":"","mode":"strict"}}"#
        ))
        .unwrap();
        assert_eq!(execute_case(&case, FormatMode::Strict).output, long);
    }

    #[test]
    fn unknown_function_is_unsupported() {
        let case: FixtureCase = serde_json::from_str(
            r#"{"name":"u","function":"scanf","section":"-","inputs":{},"expected_output":"","mode":"both"}"#,
        )
        .unwrap();
        assert_eq!(execute_case(&case, FormatMode::Strict).output, "unsupported:scanf");
    }

    #[test]
    fn logged_run_emits_one_line_per_case() {
        let set = fixture(
            r#"{"name":"one","function":"vsprintf","section":"s","inputs":{"format":"1"},"expected_output":"1","mode":"both"},
               {"name":"two","function":"vsprintf","section":"s","inputs":{"format":"%d"},"expected_output":"","mode":"hardened"}"#,
        );
        let mut log = LogEmitter::to_buffer("fixture-verify", "run-1");
        let results = TestRunner::new("fixture-verify", "hardened")
            .run_logged(&set, &mut log)
            .unwrap();
        assert_eq!(results.len(), 2);
        assert!(results.iter().all(|r| r.passed));
        assert_eq!(log.buffered_lines().len(), 2);
        assert!(log.buffered_lines()[1].contains("\"healing_action\":\"repair_argument\""));
    }
}
