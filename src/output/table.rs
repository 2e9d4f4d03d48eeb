//! Plain-text table rendering for the terminal

use crate::crawler::PageRecord;
use crate::output::CSV_HEADER;

/// Longest cell shown before truncation
const MAX_CELL_WIDTH: usize = 60;

/// Renders records as an aligned table with a header and separator row
pub fn render_table(records: &[PageRecord]) -> String {
    let rows: Vec<[String; 3]> = records
        .iter()
        .map(|r| [cell(r.url()), cell(r.title()), cell(r.description())])
        .collect();

    let mut widths = CSV_HEADER.map(|h| h.chars().count());
    for row in &rows {
        for (width, value) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(value.chars().count());
        }
    }

    let mut out = String::new();
    push_row(&mut out, &CSV_HEADER.map(str::to_string), &widths);
    let separator = widths.map(|w| "-".repeat(w));
    push_row(&mut out, &separator, &widths);
    for row in &rows {
        push_row(&mut out, row, &widths);
    }
    out
}

fn push_row(out: &mut String, row: &[String; 3], widths: &[usize; 3]) {
    let line = row
        .iter()
        .zip(widths.iter())
        .map(|(value, width)| {
            let pad = width - value.chars().count();
            format!("{}{}", value, " ".repeat(pad))
        })
        .collect::<Vec<_>>()
        .join(" | ");
    out.push_str(line.trim_end());
    out.push('\n');
}

/// Collapses whitespace and truncates long values
fn cell(value: &str) -> String {
    let flat = value.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() <= MAX_CELL_WIDTH {
        return flat;
    }
    let mut cut: String = flat.chars().take(MAX_CELL_WIDTH - 3).collect();
    cut.push_str("...");
    cut
}
