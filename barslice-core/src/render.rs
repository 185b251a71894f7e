//! Plain-text rendering of extracted rows and lookup results.

use crate::domain::{BarTable, SampleWindow};
use crate::lookup::{LookupMiss, LookupOutcome};

/// Render the window's rows as an aligned text table.
///
/// One header line followed by one line per row. No row-index column.
/// Every column is right-aligned to its widest cell and columns are
/// separated by a single space.
pub fn render_rows(table: &BarTable, window: &SampleWindow) -> String {
    let end = window.end().min(table.len());
    let start = window.start.min(end);
    let rows = &table.rows()[start..end];

    let mut widths: Vec<usize> = table.columns().iter().map(|c| c.chars().count()).collect();
    for row in rows {
        for (w, field) in widths.iter_mut().zip(&row.fields) {
            *w = (*w).max(field.chars().count());
        }
    }

    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(align_line(table.columns(), &widths));
    for row in rows {
        lines.push(align_line(&row.fields, &widths));
    }
    lines.join("\n")
}

fn align_line(cells: &[String], widths: &[usize]) -> String {
    cells
        .iter()
        .zip(widths)
        .map(|(cell, &w)| format!("{cell:>w$}"))
        .collect::<Vec<_>>()
        .join(" ")
}

/// One-line description of a lookup outcome.
pub fn prediction_text(outcome: &LookupOutcome) -> String {
    match outcome {
        LookupOutcome::NextBar { close, .. } => format!("next close: {close:.2}"),
        LookupOutcome::NextNoon { close, .. } => format!("next 12:00 close: {close:.2}"),
        LookupOutcome::NotFound(LookupMiss::NoBarAfterWindow) => {
            "next close: not found".to_string()
        }
        LookupOutcome::NotFound(LookupMiss::NoNoonBar { target }) => {
            format!("next 12:00 close: not found (no bar at {target})")
        }
    }
}

/// Label shown for a random-size extraction.
pub fn drawn_count_text(drawn: usize, effective: usize) -> String {
    if drawn == effective {
        format!("this extraction: {drawn} rows")
    } else {
        format!("this extraction: {drawn} rows (clamped to {effective})")
    }
}
