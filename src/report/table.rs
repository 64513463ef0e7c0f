use unicode_width::UnicodeWidthStr;

use crate::semrush::{Column, KeywordRow};

pub const DEFAULT_PREVIEW_ROWS: usize = 20;

/// Terminal columns, so wide (CJK, emoji) keywords stay aligned.
fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

fn pad(out: &mut String, value: &str, width: usize) {
    out.push_str(value);
    for _ in display_width(value)..width {
        out.push(' ');
    }
}

/// Render an aligned text table. `limit` of 0 shows every row.
pub fn render_table(rows: &[KeywordRow], columns: &[Column], limit: usize) -> String {
    let shown = if limit == 0 { rows.len() } else { limit.min(rows.len()) };
    let visible = &rows[..shown];

    let widths: Vec<usize> = columns
        .iter()
        .map(|&col| {
            visible
                .iter()
                .map(|row| display_width(row.field(col)))
                .chain(std::iter::once(display_width(col.header())))
                .max()
                .unwrap_or_default()
        })
        .collect();

    let mut out = String::new();
    write_line(&mut out, columns.iter().map(|c| c.header()), &widths);

    let rule: Vec<String> = widths.iter().map(|&w| "-".repeat(w)).collect();
    out.push_str(&rule.join("-+-"));
    out.push('\n');

    for row in visible {
        write_line(&mut out, columns.iter().map(|&c| row.field(c)), &widths);
    }

    if shown < rows.len() {
        out.push_str(&format!("... {} more rows\n", rows.len() - shown));
    }

    out
}

fn write_line<'a>(out: &mut String, cells: impl Iterator<Item = &'a str>, widths: &[usize]) {
    let mut line = String::new();
    for (i, (cell, &width)) in cells.zip(widths).enumerate() {
        if i > 0 {
            line.push_str(" | ");
        }
        pad(&mut line, cell, width);
    }
    out.push_str(line.trim_end());
    out.push('\n');
}
