pub(crate) mod bench;
pub(crate) mod error;
pub(crate) mod ingest;
pub(crate) mod project;
pub(crate) mod publish;
pub(crate) mod render;

use serde_derive::{Deserialize, Serialize};

/// Root of a report, a collection of test suites.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct TestSuites {
    #[serde(rename(deserialize = "testsuite", serialize = "suites"), default)]
    pub suites: Vec<TestSuite>,
}

/// A single test suite which may contain many test cases.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct TestSuite {
    #[serde(rename(deserialize = "@name"), default)]
    pub name: String,
    #[serde(rename(deserialize = "@tests"), default)]
    pub tests: usize,
    #[serde(rename(deserialize = "@failures"), default)]
    pub failures: usize,
    #[serde(rename(deserialize = "@time"), default)]
    pub time: String,
    #[serde(default)]
    pub properties: Option<Properties>,
    #[serde(rename(deserialize = "testcase", serialize = "cases"), default)]
    pub cases: Vec<TestCase>,
}

/// A single test case with its result.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct TestCase {
    #[serde(rename(deserialize = "@classname"), default)]
    pub classname: String,
    #[serde(rename(deserialize = "@name"), default)]
    pub name: String,
    #[serde(rename(deserialize = "@time"), default)]
    pub time: String,
    #[serde(default)]
    pub skipped: Option<SkipMessage>,
    #[serde(default)]
    pub failure: Option<Failure>,
    /// Anchor identifier, assigned by [`normalize`].
    #[serde(skip_deserializing, default)]
    pub id: String,
    /// Derived classification, assigned by [`normalize`].
    #[serde(skip_deserializing, default)]
    pub outcome: Outcome,
}

/// The reason why a test case was skipped.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct SkipMessage {
    #[serde(rename(deserialize = "@message"), default)]
    pub message: String,
}

/// Data related to a failed test.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct Failure {
    #[serde(rename(deserialize = "@message"), default)]
    pub message: String,
    #[serde(rename(deserialize = "@type", serialize = "type"), default)]
    pub kind: String,
    #[serde(rename(deserialize = "$text"), default)]
    pub contents: String,
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct Properties {
    #[serde(default)]
    pub property: Vec<Property>,
}

/// A key/value pair attached to a suite.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct Property {
    #[serde(rename(deserialize = "@name"), default)]
    pub name: String,
    #[serde(rename(deserialize = "@value"), default)]
    pub value: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Outcome {
    Success,
    Failed,
    Skipped,
}

impl Default for Outcome {
    fn default() -> Self {
        Outcome::Success
    }
}

/// Assigns every case a stable `id_<suite>_<case>` anchor and classifies its
/// outcome from the presence of failure/skip details. Idempotent, must run
/// after every decode or projection.
pub fn normalize(report: &mut TestSuites) {
    for (i, suite) in report.suites.iter_mut().enumerate() {
        for (j, case) in suite.cases.iter_mut().enumerate() {
            case.id = format!("id_{}_{}", i, j);
            case.outcome = if case.failure.is_some() {
                Outcome::Failed
            } else if case.skipped.is_some() {
                Outcome::Skipped
            } else {
                Outcome::Success
            };
        }
    }
}
