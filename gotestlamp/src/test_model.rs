use indexmap::IndexMap;
use serde::Deserialize;
use serde::Serialize;

/// One record of `go test -json` output.
///
/// Every field is optional on the wire; missing fields decode to their defaults.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct TestEvent {
    pub time: Option<String>,
    pub action: String,
    pub package: String,
    pub test: Option<String>,
    pub output: Option<String>,
    pub elapsed: Option<f64>,
}

impl TestEvent {
    pub fn test_id(&self) -> &str {
        self.test.as_deref().unwrap_or("")
    }

    pub fn elapsed_seconds(&self) -> f64 {
        self.elapsed.unwrap_or(0.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum TestAction {
    Pass,
    Fail,
    Other,
}

impl TestAction {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "pass" => Self::Pass,
            "fail" => Self::Fail,
            _ => Self::Other,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Subtest {
    pub name: String,
    pub passed: bool,
    pub elapsed: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParentTest {
    pub name: String,
    pub subtests: Vec<Subtest>,
    pub passed: bool,
    #[serde(skip)]
    pub(crate) fail_seen: bool,
}

impl ParentTest {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            subtests: Vec::new(),
            passed: false,
            fail_seen: false,
        }
    }

    pub fn failed_subtests(&self) -> impl Iterator<Item = &Subtest> {
        self.subtests.iter().filter(|s| !s.passed)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum PackageStatus {
    Passed,
    Failed,
    Skipped,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageResult {
    pub name: String,
    pub passed: bool,
    pub has_tests: bool,
    pub duration: f64,
    pub parents: IndexMap<String, ParentTest>,
}

impl PackageResult {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            passed: false,
            has_tests: false,
            duration: 0.0,
            parents: IndexMap::new(),
        }
    }

    pub fn skipped(&self) -> bool {
        !self.has_tests
    }

    pub fn status(&self) -> PackageStatus {
        if self.skipped() {
            PackageStatus::Skipped
        } else if self.passed {
            PackageStatus::Passed
        } else {
            PackageStatus::Failed
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunCounters {
    pub suites_passed: u64,
    pub suites_failed: u64,
    pub suites_skipped: u64,
    pub tests_passed: u64,
    pub tests_failed: u64,
}

impl RunCounters {
    pub fn suites_total(&self) -> u64 {
        self.suites_passed + self.suites_failed + self.suites_skipped
    }

    pub fn tests_total(&self) -> u64 {
        self.tests_passed + self.tests_failed
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSummary {
    pub counters: RunCounters,
    pub tests_processed: u64,
    pub packages: IndexMap<String, PackageResult>,
}

impl RunSummary {
    pub fn success(&self) -> bool {
        self.counters.suites_failed == 0 && self.counters.tests_failed == 0
    }
}
