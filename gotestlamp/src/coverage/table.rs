use unicode_width::UnicodeWidthChar;

use crate::format::{ansi, colors, terminal::visible_width};

const CELL_PADDING: usize = 2;
const MIN_SHRINK_WIDTH: usize = 10;

#[derive(Debug, Clone)]
pub struct TableFrame {
    pub hr_top: String,
    pub hr_sep: String,
    pub hr_bot: String,
    pub header: String,
}

#[derive(Debug, Clone)]
pub struct ColumnSpec {
    pub label: &'static str,
    pub align_right: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Decor {
    None,
    Failure,
    TintPct { pct: f64 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub raw: String,
    pub decor: Decor,
}

pub fn cell(raw: impl Into<String>) -> Cell {
    Cell {
        raw: raw.into(),
        decor: Decor::None,
    }
}

pub fn cell_with(raw: impl Into<String>, decor: Decor) -> Cell {
    Cell {
        raw: raw.into(),
        decor,
    }
}

/// Natural width of every column: the widest of its label and its cells.
pub fn compute_column_widths<const N: usize>(
    columns: &[ColumnSpec; N],
    rows: &[[Cell; N]],
) -> Vec<usize> {
    columns
        .iter()
        .enumerate()
        .map(|(index, column)| {
            rows.iter()
                .map(|row| visible_width(&row[index].raw))
                .fold(visible_width(column.label), usize::max)
        })
        .collect()
}

/// Shrinks the column at `shrink_index` until the table fits `total_columns`.
pub fn fit_widths_to_budget(widths: &mut [usize], total_columns: usize, shrink_index: usize) {
    let borders = widths.len() + 1;
    let used = widths.iter().map(|w| w + CELL_PADDING).sum::<usize>() + borders;
    if used <= total_columns {
        return;
    }
    let Some(width) = widths.get_mut(shrink_index) else {
        return;
    };
    let overflow = used - total_columns;
    *width = width.saturating_sub(overflow).max(MIN_SHRINK_WIDTH.min(*width));
}

pub fn build_table_frame(columns: &[ColumnSpec], widths: &[usize]) -> TableFrame {
    fn build_hr(left: char, mid: char, right: char, widths: &[usize]) -> String {
        let mut out = String::new();
        out.push(left);
        for (index, width) in widths.iter().enumerate() {
            if index > 0 {
                out.push(mid);
            }
            out.extend(std::iter::repeat_n('─', width + CELL_PADDING));
        }
        out.push(right);
        out
    }

    let mut header = String::new();
    header.push('│');
    for (index, (column, width)) in columns.iter().zip(widths.iter()).enumerate() {
        if index > 0 {
            header.push('│');
        }
        header.push(' ');
        header.push_str(&ansi::bold(&pad_visible(column.label, *width, false)));
        header.push(' ');
    }
    header.push('│');

    TableFrame {
        hr_top: build_hr('╭', '┬', '╮', widths),
        hr_sep: build_hr('├', '┼', '┤', widths),
        hr_bot: build_hr('╰', '┴', '╯', widths),
        header,
    }
}

pub fn render_table<const N: usize>(
    columns: &[ColumnSpec; N],
    widths: &[usize],
    rows: &[[Cell; N]],
) -> String {
    let frame = build_table_frame(columns, widths);
    let mut out = String::new();
    out.push_str(&frame.hr_top);
    out.push('\n');
    out.push_str(&frame.header);
    out.push('\n');
    out.push_str(&frame.hr_sep);
    for row in rows {
        out.push('\n');
        out.push('│');
        for (index, cell) in row.iter().enumerate() {
            if index > 0 {
                out.push('│');
            }
            let width = widths.get(index).copied().unwrap_or(1);
            let align_right = columns[index].align_right;
            out.push(' ');
            let padded = pad_visible(&cell.raw, width, align_right);
            out.push_str(&apply_decor(cell.decor, &padded));
            out.push(' ');
        }
        out.push('│');
    }
    out.push('\n');
    out.push_str(&frame.hr_bot);
    out
}

fn apply_decor(decor: Decor, padded: &str) -> String {
    match decor {
        Decor::None => padded.to_string(),
        Decor::Failure => colors::failure(padded),
        Decor::TintPct { pct } => colors::tint_pct(pct, padded),
    }
}

/// Pads (or truncates with `…`) plain text to exactly `width` columns.
pub fn pad_visible(text: &str, width: usize, align_right: bool) -> String {
    let len = visible_width(text);
    if len > width {
        if width == 0 {
            return String::new();
        }
        let mut used = 0usize;
        let mut out = text
            .chars()
            .take_while(|ch| {
                used += UnicodeWidthChar::width(*ch).unwrap_or(0);
                used < width
            })
            .collect::<String>();
        out.push('…');
        return pad_visible(&out, width, align_right);
    }
    let padding = " ".repeat(width - len);
    if align_right {
        format!("{padding}{text}")
    } else {
        format!("{text}{padding}")
    }
}
