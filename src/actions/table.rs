//! Fixed-width console tables for listing actions.

use unicode_width::UnicodeWidthStr;

/// Pads `text` on the right to `width` terminal columns. Longer text is left as is.
fn pad(text: &str, width: usize) -> String {
    let shown = UnicodeWidthStr::width(text);
    if shown >= width {
        return text.to_string();
    }
    format!("{text}{}", " ".repeat(width - shown))
}

fn render_row(columns: &[(&str, usize)], cells: &[String]) -> String {
    columns
        .iter()
        .zip(cells)
        .map(|((_, width), cell)| pad(cell, *width))
        .collect::<Vec<_>>()
        .join(" ")
        .trim_end()
        .to_string()
}

/// Header, a dashed rule as wide as the columns, then one line per row.
pub fn render(columns: &[(&str, usize)], rows: &[Vec<String>]) -> Vec<String> {
    let titles: Vec<String> = columns.iter().map(|(title, _)| title.to_string()).collect();
    let rule_width = columns.iter().map(|(_, width)| width).sum::<usize>() + columns.len().saturating_sub(1);

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(render_row(columns, &titles));
    lines.push("-".repeat(rule_width));
    lines.extend(rows.iter().map(|row| render_row(columns, row)));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_two_columns() {
        let lines = render(
            &[("Email", 8), ("UID", 4)],
            &[vec!["a@b.c".to_string(), "u1".to_string()]],
        );
        assert_eq!(lines, vec!["Email    UID", "-------------", "a@b.c    u1"]);
    }

    #[test]
    fn test_wide_characters_count_as_two_columns() {
        assert_eq!(pad("日本", 6), "日本  ");
        assert_eq!(pad("toolong", 3), "toolong");
    }
}
