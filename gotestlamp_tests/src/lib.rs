//! Fixture builders shared by the integration tests.

use serde_json::json;

/// One `go test -json` record. An empty `test` makes it package-scoped.
pub fn go_test_event_line(package: &str, test: &str, action: &str, elapsed: f64) -> String {
    let mut event = json!({
        "Time": "2024-05-01T10:00:00.000000Z",
        "Action": action,
        "Package": package,
        "Elapsed": elapsed,
    });
    if !test.is_empty() {
        event["Test"] = json!(test);
    }
    event.to_string()
}

pub fn go_test_output_line(package: &str, test: &str, output: &str) -> String {
    json!({
        "Action": "output",
        "Package": package,
        "Test": test,
        "Output": output,
    })
    .to_string()
}

pub fn join_lines(lines: &[String]) -> String {
    lines.iter().map(|line| format!("{line}\n")).collect()
}

/// `<file>:<line>.1,<line>.20 1 <hits>` block lines under a `mode: set` header.
pub fn go_profile_text(blocks: &[(&str, u32, u64)]) -> String {
    std::iter::once("mode: set".to_string())
        .chain(
            blocks
                .iter()
                .map(|(file, line, hits)| format!("{file}:{line}.1,{line}.20 1 {hits}")),
        )
        .map(|line| format!("{line}\n"))
        .collect()
}

pub fn strip_ansi(text: &str) -> String {
    String::from_utf8_lossy(&strip_ansi_escapes::strip(text.as_bytes())).to_string()
}
