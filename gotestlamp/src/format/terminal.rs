use std::io::IsTerminal;

use terminal_size::{Height, Width, terminal_size_of};

pub fn is_output_terminal() -> bool {
    std::io::stdout().is_terminal()
}

pub fn detect_terminal_size_cols_rows() -> Option<(usize, usize)> {
    let stdout = std::io::stdout();
    if !stdout.is_terminal() {
        return None;
    }
    terminal_size_of(stdout).map(|(Width(w), Height(h))| (w as usize, h as usize))
}

/// `COLUMNS` wins over the detected size; falls back to 120.
pub fn terminal_columns() -> usize {
    std::env::var("COLUMNS")
        .ok()
        .and_then(|s| s.trim().parse::<usize>().ok())
        .filter(|n| *n >= 20)
        .or_else(|| detect_terminal_size_cols_rows().map(|(cols, _)| cols))
        .unwrap_or(120)
}

pub fn visible_width(text: &str) -> usize {
    let stripped_bytes = strip_ansi_escapes::strip(text.as_bytes());
    let stripped = String::from_utf8_lossy(&stripped_bytes);
    unicode_width::UnicodeWidthStr::width(stripped.as_ref())
}
