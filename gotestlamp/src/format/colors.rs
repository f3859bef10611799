use crate::format::ansi;

pub fn use_color() -> bool {
    let no_color = std::env::var("NO_COLOR")
        .ok()
        .is_some_and(|value| !value.trim().is_empty());
    if no_color {
        return false;
    }

    let clicolor_disabled = std::env::var("CLICOLOR")
        .ok()
        .is_some_and(|value| value.trim() == "0");
    if clicolor_disabled {
        return false;
    }

    let is_dumb_term = std::env::var("TERM")
        .ok()
        .is_some_and(|value| value.trim() == "dumb");

    let force_color = match std::env::var("FORCE_COLOR")
        .ok()
        .map(|s| s.trim().to_string())
    {
        None => None,
        Some(force_value) if force_value.is_empty() => None,
        Some(force_value) if force_value == "0" => Some(false),
        Some(_) => Some(true),
    };

    if is_dumb_term && force_color != Some(true) {
        return false;
    }

    force_color.unwrap_or_else(crate::format::terminal::is_output_terminal)
}

pub fn success(text: &str) -> String {
    ansi::green(text)
}

pub fn failure(text: &str) -> String {
    ansi::red(text)
}

pub fn skip(text: &str) -> String {
    ansi::yellow(text)
}

pub fn badge_pass() -> String {
    ansi::bold(&ansi::white(&ansi::bg_green(" PASS ")))
}

pub fn badge_fail() -> String {
    ansi::bold(&ansi::white(&ansi::bg_red(" FAIL ")))
}

pub fn badge_skip() -> String {
    ansi::bold(&ansi::white(&ansi::bg_yellow(" SKIP ")))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoverageBand {
    Critical,
    Low,
    Medium,
    Good,
    Excellent,
}

pub fn coverage_band(pct: f64) -> CoverageBand {
    if pct < 20.0 {
        CoverageBand::Critical
    } else if pct < 50.0 {
        CoverageBand::Low
    } else if pct < 70.0 {
        CoverageBand::Medium
    } else if pct < 90.0 {
        CoverageBand::Good
    } else {
        CoverageBand::Excellent
    }
}

pub fn tint_pct(pct: f64, text: &str) -> String {
    match coverage_band(pct) {
        CoverageBand::Critical => ansi::red(text),
        CoverageBand::Low => ansi::bright_yellow(text),
        CoverageBand::Medium => ansi::yellow(text),
        CoverageBand::Good => ansi::green(text),
        CoverageBand::Excellent => ansi::bright_green(text),
    }
}
