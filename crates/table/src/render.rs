//! Plain-text rendering of a [`TableView`] for terminals.

use crate::columns::ViewportClass;
use crate::view::{ERROR_INDICATOR, TableStatus, TableView};

pub const TITLE: &str = "U.S. Voter Information";

/// Cells wider than this are cut and end in `…`.
const MAX_CELL_CHARS: usize = 40;

/// Draw the view as a fixed-width grid with a footer line.
pub fn render_text(view: &TableView) -> String {
    let headers: Vec<String> = view.columns.iter().map(|c| clip(c.header_name)).collect();
    let rows: Vec<Vec<String>> =
        view.rows.iter().map(|r| r.cells.iter().map(|c| clip(c)).collect()).collect();

    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_line(&mut out, &headers, &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_line(&mut out, &rule, &widths);

    match view.status {
        TableStatus::Loading => out.push_str("Loading...\n"),
        TableStatus::Error => {
            out.push_str(ERROR_INDICATOR);
            out.push('\n');
        },
        TableStatus::Ready if rows.is_empty() => out.push_str("No rows\n"),
        TableStatus::Ready => {
            for row in &rows {
                push_line(&mut out, row, &widths);
            }
        },
    }

    let footer = if view.rows.is_empty() {
        format!("rows 0 of {}\n", view.total_rows)
    } else {
        let first = view.page.saturating_mul(view.page_size);
        format!(
            "rows {}–{} of {}, page {} of {}\n",
            first + 1,
            first + view.rows.len(),
            view.total_rows,
            view.page + 1,
            view.page_count
        )
    };
    out.push_str(&footer);
    out
}

/// Title and usage lines printed above the grid. Phones get the shorter
/// instruction since only three columns are shown.
pub fn render_banner(viewport: ViewportClass) -> String {
    let instruction = match viewport {
        ViewportClass::Desktop => {
            "To find your state, pass --filter state=<name>. Every other column can be \
             filtered the same way and ordered with --sort <column> [--desc]."
        },
        ViewportClass::Mobile => "To find your state, pass --filter state=<name>.",
    };
    format!(
        "{TITLE}\nThe table below lists voter registration deadlines by state.\n{instruction}\nHappy voting!\n\n"
    )
}

fn clip(text: &str) -> String {
    if text.chars().count() <= MAX_CELL_CHARS {
        return text.to_owned();
    }
    let mut clipped: String = text.chars().take(MAX_CELL_CHARS - 1).collect();
    clipped.push('…');
    clipped
}

fn push_line(out: &mut String, cells: &[String], widths: &[usize]) {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join(" | ");
    out.push_str(line.trim_end());
    out.push('\n');
}
