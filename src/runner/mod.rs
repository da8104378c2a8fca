pub(crate) mod parse;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use std::time::Duration;

macro_rules! lock {
    ($name: expr) => {
        match $name.lock() {
            Ok(locked) => locked,
            Err(e) => panic!("{:#?}", e),
        }
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TestResult {
    Pass,
    Fail,
    Skip,
}

/// One test observed in the runner output, with its captured log lines.
#[derive(Debug, Clone)]
pub struct Test {
    pub name: String,
    pub duration: Duration,
    pub result: TestResult,
    pub output: Vec<String>,
}

/// One raw benchmark sample. Repeated runs of the same benchmark produce
/// multiple samples sharing a name; see `report::bench::merge_benchmarks`.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Benchmark {
    pub name: String,
    pub allocs: u64,
    pub bytes: u64,
    pub duration: Duration,
}

/// A completed package of tests and benchmarks, as reported by the runner.
#[derive(Debug, Default, Clone)]
pub struct Package {
    pub name: String,
    pub duration: Duration,
    pub coverage_pct: Option<String>,
    pub tests: Vec<Test>,
    pub benchmarks: Vec<Benchmark>,
}

/// State shared between the runner-output parser and the publication loop.
/// The parser appends whole packages under the lock and sets the completion
/// flag once at end of input; the loop only ever takes cloned snapshots, so
/// it can never observe a package mid-append.
pub struct RunState {
    packages: Mutex<Vec<Package>>,
    done: AtomicBool,
}

impl RunState {
    pub fn new() -> Self {
        Self {
            packages: Mutex::new(Vec::new()),
            done: AtomicBool::new(false),
        }
    }

    pub fn push(&self, package: Package) {
        lock!(self.packages).push(package);
    }

    pub fn snapshot(&self) -> Vec<Package> {
        lock!(self.packages).clone()
    }

    pub fn finish(&self) {
        self.done.store(true, Ordering::SeqCst);
    }

    pub fn is_done(&self) -> bool {
        self.done.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_is_detached_from_shared_state() {
        let state = RunState::new();
        state.push(Package {
            name: "pkg/one".to_owned(),
            ..Default::default()
        });

        let snapshot = state.snapshot();
        state.push(Package {
            name: "pkg/two".to_owned(),
            ..Default::default()
        });

        assert_eq!(snapshot.len(), 1);
        assert_eq!(state.snapshot().len(), 2);
    }

    #[test]
    fn test_completion_flag_starts_unset() {
        let state = RunState::new();
        assert!(!state.is_done());
        state.finish();
        assert!(state.is_done());
    }
}
