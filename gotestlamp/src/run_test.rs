use std::io::Cursor;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::args::ParsedArgs;
use crate::coverage::print::PrintOpts;
use crate::live_progress::LiveProgress;
use crate::run::{RunError, render_report, run_report};

const EVENTS: &str = "\
{\"Action\":\"run\",\"Package\":\"example.com/calc\",\"Test\":\"TestAdd\"}
{\"Action\":\"pass\",\"Package\":\"example.com/calc\",\"Test\":\"TestAdd\",\"Elapsed\":0}
{\"Action\":\"pass\",\"Package\":\"example.com/calc\",\"Elapsed\":0.12}
{\"Action\":\"pass\",\"Package\":\"example.com/docs\",\"Elapsed\":0}
";

fn plain(text: &str) -> String {
    String::from_utf8_lossy(&strip_ansi_escapes::strip(text.as_bytes())).to_string()
}

fn args_with_profile(path: Option<PathBuf>) -> ParsedArgs {
    ParsedArgs {
        coverprofile: path,
        progress: false,
        ..ParsedArgs::default()
    }
}

fn run_to_string(args: &ParsedArgs) -> (Result<(), RunError>, String) {
    let mut out = Vec::<u8>::new();
    let result = run_report(
        Cursor::new(EVENTS),
        args,
        &mut LiveProgress::off(),
        &mut out,
        &PrintOpts { columns: 120 },
        Instant::now(),
    )
    .map(|_| ());
    (result, plain(&String::from_utf8_lossy(&out)))
}

#[test]
fn missing_coverprofile_fails_before_printing_anything() {
    let dir = tempfile::tempdir().unwrap();
    let args = args_with_profile(Some(dir.path().join("missing.out")));
    let (result, out) = run_to_string(&args);
    let err = result.unwrap_err();
    assert_eq!(err.exit_code(), 1);
    assert!(matches!(err, RunError::Coverage(_)));
    assert!(err.to_string().contains("missing.out"), "{err}");
    assert!(out.is_empty(), "{out}");
}

#[test]
fn grouped_report_without_coverprofile() {
    let (result, out) = run_to_string(&args_with_profile(None));
    result.unwrap();
    assert!(out.starts_with(" PASS   example.com/calc (0.12s)\n  ✓ TestAdd\n\n"));
    assert!(out.contains(" SKIP   example.com/docs\n"));
    assert!(out.contains("Test Suites: 1 passed, 1 skipped, 2 total\n"));
    assert!(out.contains("Tests:       1 passed, 1 total\n"));
    assert!(!out.contains('╭'));
}

#[test]
fn coverage_report_prints_banners_then_table() {
    let dir = tempfile::tempdir().unwrap();
    let profile = dir.path().join("cover.out");
    std::fs::write(
        &profile,
        "mode: set\nexample.com/calc/add.go:3.20,5.2 1 1\nexample.com/calc/add.go:7.1,8.2 1 0\n",
    )
    .unwrap();

    let (result, out) = run_to_string(&args_with_profile(Some(profile)));
    result.unwrap();
    let lines = out.lines().collect::<Vec<_>>();
    assert_eq!(lines[0], " PASS    example.com/calc");
    assert_eq!(lines[1], " SKIP    example.com/docs");
    assert_eq!(lines[2], "");
    assert_eq!(lines[3], "");
    assert!(lines[4].starts_with('╭'));
    assert!(out.contains("add.go"));
    assert!(out.contains(" 50.00%"));
    assert!(out.contains("1/2"));
    assert!(!out.contains("✓ TestAdd"));
}

#[test]
fn render_report_separates_body_and_footer_with_two_blank_lines() {
    let parser = crate::format::go_test_json::GoTestJsonStreamParser::new();
    let summary = parser.finalize();
    let report = plain(&render_report(
        &summary,
        None,
        false,
        &PrintOpts { columns: 80 },
        Duration::from_millis(50),
    ));
    assert_eq!(
        report,
        "\n\nTest Suites: 0 total\nTests:       0 total\nTime:        0.05s\n"
    );
}
