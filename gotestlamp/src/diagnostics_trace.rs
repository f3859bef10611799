use std::path::{Path, PathBuf};
use std::time::Instant;

use serde::Serialize;

use crate::args::ParsedArgs;
use crate::test_model::RunCounters;

pub const DIAGNOSTICS_DIR_ENV: &str = "GOTESTLAMP_DIAGNOSTICS_DIR";

#[derive(Debug, Clone, Serialize)]
pub struct RunTrace {
    pub schema_version: u32,
    pub repo_root: String,
    pub started_at_unix_ms: Option<u128>,
    pub elapsed_ms: Option<u128>,
    pub args: ArgsSummary,
    pub counters: RunCounters,
    pub tests_processed: u64,
    pub skipped_lines: u64,
    pub coverage_files: Option<usize>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ArgsSummary {
    pub ci: bool,
    pub verbose: bool,
    pub only_failures: bool,
    pub progress: bool,
    pub coverprofile: Option<String>,
}

impl From<&ParsedArgs> for ArgsSummary {
    fn from(args: &ParsedArgs) -> Self {
        Self {
            ci: args.ci,
            verbose: args.verbose,
            only_failures: args.only_failures,
            progress: args.progress,
            coverprofile: args
                .coverprofile
                .as_ref()
                .map(|p| p.to_string_lossy().to_string()),
        }
    }
}

/// Stream facts gathered by the run, beyond what `ParsedArgs` carries.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunFacts {
    pub counters: RunCounters,
    pub tests_processed: u64,
    pub skipped_lines: u64,
    pub coverage_files: Option<usize>,
}

fn diagnostics_dir() -> Option<PathBuf> {
    std::env::var(DIAGNOSTICS_DIR_ENV)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .map(PathBuf::from)
}

pub fn maybe_write_run_trace(
    repo_root: &Path,
    args: &ParsedArgs,
    started_at: Option<Instant>,
    facts: RunFacts,
) {
    let Some(dir) = diagnostics_dir() else {
        return;
    };
    write_run_trace(&dir, repo_root, args, started_at, facts);
}

pub fn write_run_trace(
    dir: &Path,
    repo_root: &Path,
    args: &ParsedArgs,
    started_at: Option<Instant>,
    facts: RunFacts,
) {
    let _ = std::fs::create_dir_all(dir);
    let trace_path = dir.join("run_trace.json");

    let started_at_unix_ms = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .ok()
        .map(|d| d.as_millis());
    let elapsed_ms = started_at.map(|t| t.elapsed().as_millis());

    let trace = RunTrace {
        schema_version: 1,
        repo_root: repo_root.to_string_lossy().to_string(),
        started_at_unix_ms,
        elapsed_ms,
        args: ArgsSummary::from(args),
        counters: facts.counters,
        tests_processed: facts.tests_processed,
        skipped_lines: facts.skipped_lines,
        coverage_files: facts.coverage_files,
    };

    match std::fs::File::create(&trace_path) {
        Ok(file) => {
            if let Err(err) = serde_json::to_writer_pretty(file, &trace) {
                tracing::warn!(path = %trace_path.display(), %err, "failed to write run trace");
            }
        }
        Err(err) => {
            tracing::warn!(path = %trace_path.display(), %err, "failed to create run trace");
        }
    }
}
