use std::env;
use std::time::Duration;

use crate::report::bench::merge_benchmarks;
use crate::report::{
    normalize, Failure, Properties, Property, SkipMessage, TestCase, TestSuite, TestSuites,
};
use crate::runner::{Package, TestResult};

/// Projects runner packages into a canonical report, one suite per package
/// in input order. Benchmark samples are merged before projection and appear
/// as extra cases after the test-derived ones.
pub fn project(packages: &[Package], go_version: Option<&str>) -> TestSuites {
    let mut report = TestSuites::default();
    for package in packages {
        report.suites.push(project_package(package, go_version));
    }
    normalize(&mut report);
    report
}

fn project_package(package: &Package, go_version: Option<&str>) -> TestSuite {
    let benchmarks = merge_benchmarks(&package.benchmarks);
    let classname = match package.name.rfind('/') {
        Some(index) => package.name[index + 1..].to_owned(),
        None => package.name.clone(),
    };

    let mut properties = vec![Property {
        name: "go.version".to_owned(),
        value: resolve_go_version(go_version),
    }];
    if let Some(pct) = &package.coverage_pct {
        properties.push(Property {
            name: "coverage.statements.pct".to_owned(),
            value: pct.clone(),
        });
    }

    let mut suite = TestSuite {
        name: package.name.clone(),
        tests: package.tests.len() + benchmarks.len(),
        failures: 0,
        time: format_time(package.duration),
        properties: Some(Properties {
            property: properties,
        }),
        cases: Vec::new(),
    };

    for test in &package.tests {
        let mut case = TestCase {
            classname: classname.clone(),
            name: test.name.clone(),
            time: format_time(test.duration),
            ..Default::default()
        };
        match test.result {
            TestResult::Fail => {
                suite.failures += 1;
                case.failure = Some(Failure {
                    message: "Failed".to_owned(),
                    kind: String::new(),
                    contents: test.output.join("\n"),
                });
            }
            TestResult::Skip => {
                case.skipped = Some(SkipMessage {
                    message: test.output.join("\n"),
                });
            }
            TestResult::Pass => {}
        }
        suite.cases.push(case);
    }

    for bench in &benchmarks {
        suite.cases.push(TestCase {
            classname: classname.clone(),
            name: bench.name.clone(),
            time: format_benchmark_time(bench.duration),
            ..Default::default()
        });
    }

    suite
}

// The original tool falls back to its own runtime version; this process has
// no Go runtime, so the GOVERSION environment variable is the next best
// source when no version was supplied explicitly.
fn resolve_go_version(go_version: Option<&str>) -> String {
    match go_version {
        Some(version) if !version.is_empty() => version.to_owned(),
        _ => env::var("GOVERSION").unwrap_or_else(|_| "unknown".to_owned()),
    }
}

pub fn format_time(duration: Duration) -> String {
    format!("{:.3}", duration.as_secs_f64())
}

pub fn format_benchmark_time(duration: Duration) -> String {
    format!("{:.9}", duration.as_secs_f64())
}
