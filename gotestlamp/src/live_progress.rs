use std::io::Write;

const BAR_WIDTH: usize = 20;
const PLAIN_REPORT_EVERY: u64 = 100;
const CLEAR_WIDTH: usize = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiveProgressMode {
    Off,
    Plain,
    Interactive,
}

pub fn live_progress_mode_with_env_ci(
    stdout_is_tty: bool,
    ci: bool,
    env_ci: bool,
    disabled: bool,
) -> LiveProgressMode {
    if disabled {
        return LiveProgressMode::Off;
    }
    if ci || env_ci {
        return LiveProgressMode::Plain;
    }
    if stdout_is_tty {
        return LiveProgressMode::Interactive;
    }
    LiveProgressMode::Off
}

pub fn live_progress_mode(stdout_is_tty: bool, ci: bool, disabled: bool) -> LiveProgressMode {
    let env_ci = std::env::var("CI").ok().is_some();
    live_progress_mode_with_env_ci(stdout_is_tty, ci, env_ci, disabled)
}

/// Progress feedback while the test stream is being consumed.
///
/// Interactive mode redraws a single `\r`-terminated line; plain mode prints a
/// line every [`PLAIN_REPORT_EVERY`] tests so CI logs stay short.
pub struct LiveProgress {
    mode: LiveProgressMode,
    out: Box<dyn Write>,
    drawn: bool,
}

impl LiveProgress {
    pub fn new(mode: LiveProgressMode) -> Self {
        Self::with_writer(mode, Box::new(std::io::stdout()))
    }

    pub fn with_writer(mode: LiveProgressMode, out: Box<dyn Write>) -> Self {
        Self {
            mode,
            out,
            drawn: false,
        }
    }

    pub fn off() -> Self {
        Self::with_writer(LiveProgressMode::Off, Box::new(std::io::sink()))
    }

    pub fn mode(&self) -> LiveProgressMode {
        self.mode
    }

    pub fn on_test_finished(&mut self, tests_done: u64) {
        match self.mode {
            LiveProgressMode::Off => {}
            LiveProgressMode::Plain => {
                if tests_done % PLAIN_REPORT_EVERY == 0 {
                    let _ = writeln!(self.out, "Running tests: {tests_done} tests done");
                }
            }
            LiveProgressMode::Interactive => {
                let _ = write!(self.out, "\r{}", render_progress_line(tests_done));
                let _ = self.out.flush();
                self.drawn = true;
            }
        }
    }

    /// Erases the interactive line, if one was drawn.
    pub fn finish(&mut self) {
        if !self.drawn {
            return;
        }
        let _ = write!(self.out, "\r{}\r", " ".repeat(CLEAR_WIDTH));
        let _ = self.out.flush();
        self.drawn = false;
    }
}

pub fn render_progress_line(tests_done: u64) -> String {
    let filled = (tests_done % (BAR_WIDTH as u64 + 1)) as usize;
    format!(
        "Running tests: [{}{}] {tests_done} tests done",
        "■".repeat(filled),
        " ".repeat(BAR_WIDTH - filled)
    )
}
