use indexmap::IndexMap;

use crate::test_model::{
    PackageResult, PackageStatus, ParentTest, RunCounters, RunSummary, Subtest, TestAction,
    TestEvent,
};

#[derive(Debug, Clone, PartialEq)]
pub struct GoTestStreamUpdate {
    pub package: String,
    pub test_name: String,
    pub passed: bool,
    pub tests_processed: u64,
}

/// Folds `go test -json` records into a package → parent test → subtest model.
#[derive(Debug, Clone, Default)]
pub struct GoTestJsonStreamParser {
    packages: IndexMap<String, PackageResult>,
    tests_passed: u64,
    tests_failed: u64,
    tests_processed: u64,
    skipped_lines: u64,
}

impl GoTestJsonStreamParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_line(&mut self, line: &str) -> Option<GoTestStreamUpdate> {
        match decode_event_line(line) {
            Some(event) => self.push_event(event),
            None => {
                self.note_skipped_line();
                None
            }
        }
    }

    pub fn push_event(&mut self, event: TestEvent) -> Option<GoTestStreamUpdate> {
        let action = TestAction::parse(&event.action);
        let package = self
            .packages
            .entry(event.package.clone())
            .or_insert_with(|| PackageResult::new(event.package.clone()));

        let test_id = event.test_id().to_string();
        if test_id.is_empty() {
            match action {
                TestAction::Pass => {
                    package.passed = true;
                    package.duration = event.elapsed_seconds();
                }
                TestAction::Fail => {
                    package.passed = false;
                    package.duration = event.elapsed_seconds();
                }
                TestAction::Other => {}
            }
            return None;
        }

        package.has_tests = true;
        let (parent_name, subtest_name) = split_test_id(&test_id);
        let parent = package
            .parents
            .entry(parent_name.clone())
            .or_insert_with(|| ParentTest::new(parent_name));

        let passed = match action {
            TestAction::Pass => true,
            TestAction::Fail => false,
            TestAction::Other => return None,
        };
        apply_test_result(parent, subtest_name, passed, event.elapsed_seconds());

        if passed {
            self.tests_passed += 1;
        } else {
            self.tests_failed += 1;
        }
        self.tests_processed += 1;

        Some(GoTestStreamUpdate {
            package: event.package,
            test_name: test_id,
            passed,
            tests_processed: self.tests_processed,
        })
    }

    pub fn note_skipped_line(&mut self) {
        self.skipped_lines += 1;
    }

    pub fn tests_processed(&self) -> u64 {
        self.tests_processed
    }

    /// Lines that could not be decoded as a test event.
    pub fn skipped_lines(&self) -> u64 {
        self.skipped_lines
    }

    pub fn finalize(self) -> RunSummary {
        let mut counters = RunCounters {
            tests_passed: self.tests_passed,
            tests_failed: self.tests_failed,
            ..RunCounters::default()
        };
        for package in self.packages.values() {
            match package.status() {
                PackageStatus::Skipped => counters.suites_skipped += 1,
                PackageStatus::Passed => counters.suites_passed += 1,
                PackageStatus::Failed => counters.suites_failed += 1,
            }
        }
        RunSummary {
            counters,
            tests_processed: self.tests_processed,
            packages: self.packages,
        }
    }
}

pub fn decode_event_line(line: &str) -> Option<TestEvent> {
    let trimmed = line.trim();
    if !(trimmed.starts_with('{') && trimmed.ends_with('}')) {
        return None;
    }
    serde_json::from_str::<TestEvent>(trimmed).ok()
}

fn apply_test_result(
    parent: &mut ParentTest,
    subtest_name: Option<String>,
    passed: bool,
    elapsed: f64,
) {
    match subtest_name {
        Some(name) => {
            parent.subtests.push(Subtest {
                name,
                passed,
                elapsed,
            });
            if !passed {
                parent.fail_seen = true;
                parent.passed = false;
            }
        }
        None if passed => parent.passed = !parent.fail_seen,
        None => {
            parent.fail_seen = true;
            parent.passed = false;
        }
    }
}

/// Splits `TestFoo/case_one/nested` into (`TestFoo`, `case one > nested`).
pub fn split_test_id(test_id: &str) -> (String, Option<String>) {
    match test_id.split_once('/') {
        Some((parent, sub)) => (prettify_test_name(parent), Some(prettify_test_name(sub))),
        None => (prettify_test_name(test_id), None),
    }
}

pub fn prettify_test_name(name: &str) -> String {
    name.replace('_', " ").replace('/', " > ")
}
