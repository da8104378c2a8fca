use std::io::BufRead;
use std::mem;
use std::time::Duration;

use lazy_static::*;
use regex::Regex;

use crate::runner::{Benchmark, Package, RunState, Test, TestResult};

lazy_static! {
    static ref RUN_LINE: Regex =
        Regex::new(r"^=== RUN\s+(\S+)").expect("Regex compilation error");
    static ref RESULT_LINE: Regex =
        Regex::new(r"^\s*--- (PASS|FAIL|SKIP): (\S+) \((\d+(?:\.\d+)?)s\)")
            .expect("Regex compilation error");
    static ref STATUS_LINE: Regex =
        Regex::new(r"^(ok|FAIL)\s+(\S+)\s+(\d+(?:\.\d+)?)s").expect("Regex compilation error");
    static ref COVERAGE_LINE: Regex =
        Regex::new(r"coverage:\s+(\d+(?:\.\d+)?)% of statements").expect("Regex compilation error");
    static ref BENCH_LINE: Regex = Regex::new(
        r"^(Benchmark[^\s-]+)(?:-\d+)?\s+(\d+)\s+(\d+(?:\.\d+)?) ns/op(?:\s+(\d+) B/op)?(?:\s+(\d+) allocs/op)?"
    )
    .expect("Regex compilation error");
}

/// Consumes verbose runner output line by line, pushing each completed
/// package into the shared state and signalling completion at end of input.
/// Lines that are not control lines are captured as output of the test
/// currently in flight.
pub fn consume<R: BufRead>(reader: R, state: &RunState) -> std::io::Result<()> {
    let mut tests: Vec<Test> = Vec::new();
    let mut benchmarks: Vec<Benchmark> = Vec::new();
    let mut coverage: Option<String> = None;
    let mut current: Option<usize> = None;

    for line in reader.lines() {
        let line = line?;
        if let Some(caps) = RUN_LINE.captures(&line) {
            tests.push(Test {
                name: caps[1].to_owned(),
                duration: Duration::from_secs(0),
                result: TestResult::Pass,
                output: Vec::new(),
            });
            current = Some(tests.len() - 1);
        } else if let Some(caps) = RESULT_LINE.captures(&line) {
            let name = caps[2].to_owned();
            if let Some(index) = tests.iter().position(|t| t.name == name) {
                tests[index].result = match &caps[1] {
                    "FAIL" => TestResult::Fail,
                    "SKIP" => TestResult::Skip,
                    _ => TestResult::Pass,
                };
                tests[index].duration = parse_seconds(&caps[3]);
                current = Some(index);
            }
        } else if let Some(caps) = BENCH_LINE.captures(&line) {
            benchmarks.push(Benchmark {
                name: caps[1].to_owned(),
                duration: parse_nanos(&caps[3]),
                bytes: caps.get(4).map(|m| parse_count(m.as_str())).unwrap_or(0),
                allocs: caps.get(5).map(|m| parse_count(m.as_str())).unwrap_or(0),
            });
        } else if let Some(caps) = COVERAGE_LINE.captures(&line) {
            coverage = Some(caps[1].to_owned());
        } else if let Some(caps) = STATUS_LINE.captures(&line) {
            state.push(Package {
                name: caps[2].to_owned(),
                duration: parse_seconds(&caps[3]),
                coverage_pct: coverage.take(),
                tests: mem::replace(&mut tests, Vec::new()),
                benchmarks: mem::replace(&mut benchmarks, Vec::new()),
            });
            current = None;
        } else if is_output(&line) {
            if let Some(index) = current {
                tests[index].output.push(line.trim_end().to_owned());
            }
        }
    }

    state.finish();
    Ok(())
}

fn is_output(line: &str) -> bool {
    let trimmed = line.trim();
    !trimmed.is_empty()
        && trimmed != "PASS"
        && trimmed != "FAIL"
        && !trimmed.starts_with("exit status")
}

fn parse_seconds(value: &str) -> Duration {
    value
        .parse::<f64>()
        .map(Duration::from_secs_f64)
        .unwrap_or_else(|_| Duration::from_secs(0))
}

fn parse_nanos(value: &str) -> Duration {
    Duration::from_nanos(value.parse::<f64>().unwrap_or(0.0) as u64)
}

fn parse_count(value: &str) -> u64 {
    value.parse().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const RUNNER_OUTPUT: &str = "\
=== RUN   TestPass
=== RUN   TestFail
    some_test.go:12: expected 1, got 2
--- PASS: TestPass (0.01s)
--- FAIL: TestFail (0.02s)
=== RUN   TestSkip
--- SKIP: TestSkip (0.00s)
    some_test.go:30: not supported here
BenchmarkEncode-8   \t 100000\t 125.5 ns/op\t 48 B/op\t 2 allocs/op
coverage: 78.5% of statements
FAIL\tgithub.com/acme/pkg/codec\t0.135s
=== RUN   TestOther
--- PASS: TestOther (0.10s)
ok  \tgithub.com/acme/pkg/other\t0.210s
";

    #[test]
    fn test_consume_builds_packages_in_order() {
        let state = RunState::new();
        consume(Cursor::new(RUNNER_OUTPUT), &state).unwrap();

        let packages = state.snapshot();
        assert_eq!(packages.len(), 2);
        assert_eq!(packages[0].name, "github.com/acme/pkg/codec");
        assert_eq!(packages[0].duration, Duration::from_millis(135));
        assert_eq!(packages[1].name, "github.com/acme/pkg/other");
        assert!(state.is_done());
    }

    #[test]
    fn test_consume_classifies_results_and_captures_output() {
        let state = RunState::new();
        consume(Cursor::new(RUNNER_OUTPUT), &state).unwrap();

        let codec = &state.snapshot()[0];
        assert_eq!(codec.tests.len(), 3);
        assert_eq!(codec.tests[0].result, TestResult::Pass);
        assert_eq!(codec.tests[1].result, TestResult::Fail);
        assert_eq!(codec.tests[1].output, vec!["    some_test.go:12: expected 1, got 2"]);
        assert_eq!(codec.tests[2].result, TestResult::Skip);
        assert_eq!(codec.tests[2].output, vec!["    some_test.go:30: not supported here"]);
        assert_eq!(codec.coverage_pct.as_deref(), Some("78.5"));
    }

    #[test]
    fn test_consume_parses_benchmark_samples() {
        let state = RunState::new();
        consume(Cursor::new(RUNNER_OUTPUT), &state).unwrap();

        let codec = &state.snapshot()[0];
        assert_eq!(codec.benchmarks.len(), 1);
        let bench = &codec.benchmarks[0];
        assert_eq!(bench.name, "BenchmarkEncode");
        assert_eq!(bench.duration, Duration::from_nanos(125));
        assert_eq!(bench.bytes, 48);
        assert_eq!(bench.allocs, 2);
    }

    #[test]
    fn test_empty_input_still_signals_completion() {
        let state = RunState::new();
        consume(Cursor::new(""), &state).unwrap();

        assert!(state.snapshot().is_empty());
        assert!(state.is_done());
    }
}
