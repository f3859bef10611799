use crate::coverage::table::{
    Cell, ColumnSpec, Decor, cell, cell_with, compute_column_widths, fit_widths_to_budget,
    render_table,
};
use crate::coverage::tree::{TreeNode, TreeRow, flatten_rows};

const INDENT: &str = "  ";
const UNCOVERED_COLUMN: usize = 3;

pub const COVERAGE_COLUMNS: [ColumnSpec; 4] = [
    ColumnSpec {
        label: "File",
        align_right: false,
    },
    ColumnSpec {
        label: "% Coverage",
        align_right: true,
    },
    ColumnSpec {
        label: "% Lines",
        align_right: true,
    },
    ColumnSpec {
        label: "Uncovered Lines #s",
        align_right: false,
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrintOpts {
    pub columns: usize,
}

impl Default for PrintOpts {
    fn default() -> Self {
        Self {
            columns: crate::format::terminal::terminal_columns(),
        }
    }
}

pub fn display_name(row: &TreeRow<'_>) -> String {
    let indent = INDENT.repeat(row.depth);
    if row.node.is_dir {
        format!("{indent}{}/", row.node.name)
    } else {
        format!("{indent}{}", row.node.name)
    }
}

pub fn format_pct(pct: f64) -> String {
    format!("{pct:6.2}%")
}

pub fn format_uncovered(node: &TreeNode) -> String {
    if node.is_dir {
        return String::new();
    }
    node.uncovered
        .iter()
        .map(u32::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

pub fn coverage_row(row: &TreeRow<'_>) -> [Cell; 4] {
    let node = row.node;
    let tint = Decor::TintPct { pct: node.coverage };
    let uncovered = format_uncovered(node);
    [
        cell_with(display_name(row), tint),
        cell_with(format_pct(node.coverage), tint),
        cell_with(format!("{}/{}", node.covered, node.total), tint),
        if uncovered.is_empty() {
            cell(uncovered)
        } else {
            cell_with(uncovered, Decor::Failure)
        },
    ]
}

/// One table row per node below the root, siblings ordered by name.
pub fn render_coverage_table(root: &TreeNode, opts: &PrintOpts) -> String {
    let rows = flatten_rows(root)
        .iter()
        .map(coverage_row)
        .collect::<Vec<_>>();
    let mut widths = compute_column_widths(&COVERAGE_COLUMNS, &rows);
    fit_widths_to_budget(&mut widths, opts.columns, UNCOVERED_COLUMN);
    render_table(&COVERAGE_COLUMNS, &widths, &rows)
}
