use std::collections::BTreeSet;

/// Line coverage for one source file of a Go coverage profile.
///
/// `covered` and `uncovered` are disjoint and their union is `total`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileCoverage {
    pub path: String,
    pub covered: BTreeSet<u32>,
    pub uncovered: BTreeSet<u32>,
    pub total: BTreeSet<u32>,
}

impl FileCoverage {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    /// Records one block's start line. A line that is hit by any block is covered,
    /// whatever order the blocks arrive in.
    pub fn record_line(&mut self, line: u32, hit_count: u64) {
        self.total.insert(line);
        if hit_count > 0 {
            self.uncovered.remove(&line);
            self.covered.insert(line);
        } else if !self.covered.contains(&line) {
            self.uncovered.insert(line);
        }
    }

    pub fn lines_covered(&self) -> u32 {
        count_u32(self.covered.len())
    }

    pub fn lines_total(&self) -> u32 {
        count_u32(self.total.len())
    }

    pub fn uncovered_lines(&self) -> Vec<u32> {
        self.uncovered.iter().copied().collect()
    }

    pub fn pct(&self) -> f64 {
        coverage_pct(self.lines_covered(), self.lines_total())
    }
}

pub fn coverage_pct(covered: u32, total: u32) -> f64 {
    if total == 0 {
        0.0
    } else {
        (covered as f64 / total as f64) * 100.0
    }
}

fn count_u32(len: usize) -> u32 {
    (len as u64).min(u64::from(u32::MAX)) as u32
}
