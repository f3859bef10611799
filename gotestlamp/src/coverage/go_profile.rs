use std::io::{BufRead, BufReader};
use std::path::Path;

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::coverage::model::FileCoverage;
use crate::error::GotestlampError;

/// `<file>:<startLine>.<startCol>,<endLine>.<endCol> <numStatements> <hitCount>`
static PROFILE_BLOCK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(.+):(\d+)\.\d+,\d+\.\d+ \d+ (\d+)$").unwrap());

const MODE_HEADER_PREFIX: &str = "mode:";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProfileBlock<'a> {
    pub path: &'a str,
    pub start_line: u32,
    pub hit_count: u64,
}

pub type ProfileCoverage = IndexMap<String, FileCoverage>;

pub fn parse_profile_line(line: &str) -> Option<ProfileBlock<'_>> {
    let line = line.strip_suffix('\r').unwrap_or(line);
    if line.starts_with(MODE_HEADER_PREFIX) {
        return None;
    }
    let caps = PROFILE_BLOCK_RE.captures(line)?;
    let path = caps.get(1)?.as_str();
    let start_line = caps.get(2)?.as_str().parse::<u32>().ok()?;
    let hit_count = caps.get(3)?.as_str().parse::<u64>().ok()?;
    Some(ProfileBlock {
        path,
        start_line,
        hit_count,
    })
}

#[derive(Debug, Default)]
struct ProfileParseState {
    files: ProfileCoverage,
    skipped_lines: u64,
}

impl ProfileParseState {
    fn push_line(&mut self, line: &str) {
        if line.trim().is_empty() {
            return;
        }
        let Some(block) = parse_profile_line(line) else {
            self.skipped_lines += 1;
            return;
        };
        self.files
            .entry(block.path.to_string())
            .or_insert_with(|| FileCoverage::new(block.path))
            .record_line(block.start_line, block.hit_count);
    }

    fn finish(self) -> ProfileCoverage {
        tracing::debug!(
            files = self.files.len(),
            skipped_lines = self.skipped_lines,
            "parsed coverage profile"
        );
        self.files
    }
}

/// Parses Go coverage profile text. Lines that do not look like a block are ignored.
pub fn parse_go_profile_text(text: &str) -> ProfileCoverage {
    let mut state = ProfileParseState::default();
    text.lines().for_each(|line| state.push_line(line));
    state.finish()
}

pub fn parse_go_profile_reader(
    reader: impl BufRead,
    path: &Path,
) -> Result<ProfileCoverage, GotestlampError> {
    let mut state = ProfileParseState::default();
    for chunk in reader.split(b'\n') {
        let bytes = chunk.map_err(|source| GotestlampError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        state.push_line(&String::from_utf8_lossy(&bytes));
    }
    Ok(state.finish())
}

pub fn read_go_profile_file(path: &Path) -> Result<ProfileCoverage, GotestlampError> {
    let file = std::fs::File::open(path).map_err(|source| GotestlampError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_go_profile_reader(BufReader::new(file), path)
}
