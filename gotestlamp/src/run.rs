use std::io::{BufRead, Write};
use std::path::Path;
use std::time::{Duration, Instant};

use thiserror::Error;

use crate::args::ParsedArgs;
use crate::coverage::go_profile::read_go_profile_file;
use crate::coverage::print::{PrintOpts, render_coverage_table};
use crate::coverage::tree::{TreeNode, build_aggregated_tree};
use crate::diagnostics_trace::{RunFacts, maybe_write_run_trace};
use crate::error::GotestlampError;
use crate::format::console::{
    render_grouped_report, render_package_banners, render_summary_footer,
};
use crate::live_progress::LiveProgress;
use crate::streaming::consume_go_test_stream;
use crate::test_model::RunSummary;

#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Config(GotestlampError),

    #[error(transparent)]
    Coverage(GotestlampError),

    #[error("failed to write report: {0}")]
    Output(std::io::Error),
}

impl RunError {
    pub fn exit_code(&self) -> i32 {
        match self {
            RunError::Config(_) => 2,
            RunError::Coverage(_) | RunError::Output(_) => 1,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub summary: RunSummary,
    pub coverage: Option<TreeNode>,
    pub skipped_lines: u64,
}

impl RunOutcome {
    fn facts(&self) -> RunFacts {
        RunFacts {
            counters: self.summary.counters,
            tests_processed: self.summary.tests_processed,
            skipped_lines: self.skipped_lines,
            coverage_files: self.coverage.as_ref().map(count_files),
        }
    }
}

fn count_files(node: &TreeNode) -> usize {
    if node.is_dir {
        node.children.values().map(count_files).sum()
    } else {
        1
    }
}

fn load_coverage_tree(path: &Path) -> Result<TreeNode, RunError> {
    let files = read_go_profile_file(path).map_err(RunError::Coverage)?;
    tracing::debug!(path = %path.display(), files = files.len(), "built coverage tree");
    Ok(build_aggregated_tree(&files))
}

/// Full report text: the grouped test listing, or package banners plus the
/// coverage table when a tree is given, then the summary footer.
pub fn render_report(
    summary: &RunSummary,
    coverage: Option<&TreeNode>,
    only_failures: bool,
    opts: &PrintOpts,
    elapsed: Duration,
) -> String {
    let mut out = match coverage {
        Some(root) => format!(
            "{}\n\n{}\n",
            render_package_banners(summary),
            render_coverage_table(root, opts)
        ),
        None => render_grouped_report(summary, only_failures),
    };
    out.push_str("\n\n");
    out.push_str(&render_summary_footer(&summary.counters, elapsed));
    out.push('\n');
    out
}

/// Aggregates the event stream, then the optional coverage profile, then
/// writes the report. A profile that cannot be read aborts before anything is
/// written to `out`.
pub fn run_report(
    input: impl BufRead,
    args: &ParsedArgs,
    progress: &mut LiveProgress,
    out: &mut impl Write,
    opts: &PrintOpts,
    started_at: Instant,
) -> Result<RunOutcome, RunError> {
    let parser = consume_go_test_stream(input, progress);
    let skipped_lines = parser.skipped_lines();
    let summary = parser.finalize();

    let coverage = args
        .coverprofile
        .as_deref()
        .map(load_coverage_tree)
        .transpose()?;

    let report = render_report(
        &summary,
        coverage.as_ref(),
        args.only_failures,
        opts,
        started_at.elapsed(),
    );
    out.write_all(report.as_bytes())
        .and_then(|()| out.flush())
        .map_err(RunError::Output)?;

    Ok(RunOutcome {
        summary,
        coverage,
        skipped_lines,
    })
}

pub fn run_from_stdin(repo_root: &Path, args: &ParsedArgs) -> Result<RunOutcome, RunError> {
    let started_at = Instant::now();
    let stdout_is_tty = crate::format::terminal::is_output_terminal();
    let mode = crate::live_progress::live_progress_mode(stdout_is_tty, args.ci, !args.progress);
    let mut progress = LiveProgress::new(mode);
    tracing::debug!(mode = ?progress.mode(), "progress indicator");

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    let result = run_report(
        stdin.lock(),
        args,
        &mut progress,
        &mut stdout,
        &PrintOpts::default(),
        started_at,
    );
    if let Ok(outcome) = &result {
        maybe_write_run_trace(repo_root, args, Some(started_at), outcome.facts());
    }
    result
}
