use std::time::Duration;

use crate::format::{ansi, colors};
use crate::test_model::{PackageResult, PackageStatus, ParentTest, RunCounters, RunSummary};

const PARENT_INDENT: &str = "  ";
const SUBTEST_INDENT: &str = "     ";

fn package_badge(status: PackageStatus) -> String {
    match status {
        PackageStatus::Passed => colors::badge_pass(),
        PackageStatus::Failed => colors::badge_fail(),
        PackageStatus::Skipped => colors::badge_skip(),
    }
}

pub fn render_package_header(pkg: &PackageResult) -> String {
    let status = pkg.status();
    let badge = package_badge(status);
    let label = match status {
        PackageStatus::Skipped => colors::skip(&pkg.name),
        PackageStatus::Passed => colors::success(&format!("{} ({:.2}s)", pkg.name, pkg.duration)),
        PackageStatus::Failed => colors::failure(&format!("{} ({:.2}s)", pkg.name, pkg.duration)),
    };
    format!("{badge}  {label}")
}

fn mark(passed: bool) -> &'static str {
    if passed { "✓" } else { "✗" }
}

fn tint(passed: bool, text: &str) -> String {
    if passed {
        colors::success(text)
    } else {
        colors::failure(text)
    }
}

fn render_parent_lines(parent: &ParentTest, only_failures: bool) -> Vec<String> {
    let head = tint(
        parent.passed,
        &format!("{PARENT_INDENT}{} {}", mark(parent.passed), parent.name),
    );
    let subtests = parent
        .subtests
        .iter()
        .filter(|sub| !(only_failures && sub.passed))
        .map(|sub| {
            tint(
                sub.passed,
                &format!("{SUBTEST_INDENT}{} {}", mark(sub.passed), sub.name),
            )
        });
    std::iter::once(head).chain(subtests).collect()
}

/// Package header, then each parent test and its subtests in arrival order.
pub fn render_package_block(pkg: &PackageResult, only_failures: bool) -> Vec<String> {
    let parents = pkg
        .parents
        .values()
        .filter(|parent| !(only_failures && parent.passed))
        .flat_map(|parent| render_parent_lines(parent, only_failures));
    std::iter::once(render_package_header(pkg))
        .chain(parents)
        .chain([String::new()])
        .collect()
}

/// Grouped pass/fail/skip report used when no coverage profile was requested.
pub fn render_grouped_report(summary: &RunSummary, only_failures: bool) -> String {
    summary
        .packages
        .values()
        .filter(|pkg| !only_failures || pkg.status() == PackageStatus::Failed)
        .flat_map(|pkg| render_package_block(pkg, only_failures))
        .map(|line| format!("{line}\n"))
        .collect()
}

/// One `PASS`/`SKIP`/`FAIL` banner per package, printed above the coverage table.
pub fn render_package_banners(summary: &RunSummary) -> String {
    summary
        .packages
        .values()
        .map(|pkg| {
            let badge = match pkg.status() {
                PackageStatus::Passed => {
                    ansi::bold(&ansi::white(&ansi::bg_bright_green(" PASS ")))
                }
                status => package_badge(status),
            };
            format!("{badge}   {}\n", ansi::bold(&ansi::white(&pkg.name)))
        })
        .collect()
}

fn join_counts(parts: impl IntoIterator<Item = Option<String>>) -> String {
    parts
        .into_iter()
        .flatten()
        .map(|part| ansi::bold(&part))
        .collect()
}

fn suites_line(counters: &RunCounters) -> String {
    let counts = join_counts([
        (counters.suites_failed > 0)
            .then(|| ansi::red(&format!("{} failed, ", counters.suites_failed))),
        (counters.suites_passed > 0)
            .then(|| ansi::bright_green(&format!("{} passed, ", counters.suites_passed))),
        (counters.suites_skipped > 0)
            .then(|| ansi::cyan(&format!("{} skipped, ", counters.suites_skipped))),
    ]);
    format!(
        "{}{counts}{}",
        ansi::bold("Test Suites: "),
        ansi::bold(&format!("{} total", counters.suites_total()))
    )
}

fn tests_line(counters: &RunCounters) -> String {
    let counts = join_counts([
        (counters.tests_failed > 0)
            .then(|| ansi::red(&format!("{} failed, ", counters.tests_failed))),
        (counters.tests_passed > 0)
            .then(|| ansi::bright_green(&format!("{} passed, ", counters.tests_passed))),
    ]);
    format!(
        "{}{counts}{}",
        ansi::bold("Tests:       "),
        ansi::bold(&format!("{} total", counters.tests_total()))
    )
}

pub fn render_summary_footer(counters: &RunCounters, elapsed: Duration) -> String {
    [
        suites_line(counters),
        tests_line(counters),
        ansi::bold(&format!("Time:        {:.2}s", elapsed.as_secs_f64())),
    ]
    .join("\n")
}
