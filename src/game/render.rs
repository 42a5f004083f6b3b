use std::fmt::Write;

use crate::models::Grid;

/// Render a grid as a bordered table, one character per cell:
///
/// ```text
/// +---+---+
/// | C | A |
/// +---+---+
/// ```
pub fn render_table(grid: &Grid) -> String {
    let width = match grid.first() {
        Some(row) => row.len(),
        None => return String::new(),
    };

    let rule = format!("+{}\n", "---+".repeat(width));
    let mut out = String::with_capacity(rule.len() * (grid.len() * 2 + 1));
    out.push_str(&rule);

    for row in grid {
        out.push('|');
        for letter in row {
            // Writing to a String cannot fail
            let _ = write!(out, " {} |", letter);
        }
        out.push('\n');
        out.push_str(&rule);
    }

    out
}
