//! Inspect report types and terminal formatting.

use serde::Serialize;
use std::fmt;

/// The result of inspecting a corpus layout.
#[derive(Clone, Debug, Serialize)]
pub struct InspectReport {
    pub summary: SummarySection,
    /// One row per staff, top to bottom.
    pub staves: Vec<StaffRow>,
    /// Top `ref1` categories by piece count.
    pub categories: Vec<LabelCount>,
    /// Pieces in categories not shown in `categories`.
    pub other_categories: usize,
    /// Piece errors by message.
    pub errors: Vec<LabelCount>,
    #[serde(skip)]
    pub(crate) bar_width: usize,
}

/// Summary counts for the layout.
#[derive(Clone, Debug, Default, Serialize)]
pub struct SummarySection {
    pub staves: usize,
    pub pieces: usize,
    /// Pieces carrying a `piece_error`.
    pub flagged: usize,
    /// Pieces carrying a `name` label.
    pub labelled: usize,
}

/// Geometry and counts of one staff.
#[derive(Clone, Debug, Serialize)]
pub struct StaffRow {
    pub index: usize,
    pub x0: f64,
    pub x1: f64,
    pub y: f64,
    pub dy: f64,
    pub nlines: i32,
    pub pieces: usize,
    pub flagged: usize,
}

/// A label with its count.
#[derive(Clone, Debug, Serialize)]
pub struct LabelCount {
    pub label: String,
    pub count: usize,
}

impl fmt::Display for InspectReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Corpus Inspection Report")?;
        writeln!(f, "========================")?;
        writeln!(f)?;

        let s = &self.summary;
        writeln!(f, "Summary")?;
        writeln!(f, "  Staves:     {:>8}", format_number(s.staves))?;
        writeln!(f, "  Pieces:     {:>8}", format_number(s.pieces))?;
        writeln!(
            f,
            "  Flagged:    {:>8}  ({})",
            format_number(s.flagged),
            fmt_percent(s.flagged, s.pieces)
        )?;
        writeln!(f, "  Labelled:   {:>8}", format_number(s.labelled))?;
        writeln!(f)?;

        self.fmt_staves(f)?;
        writeln!(f)?;
        self.fmt_histogram(f, "Categories (ref1)", &self.categories, self.other_categories)?;
        if !self.errors.is_empty() {
            writeln!(f)?;
            self.fmt_histogram(f, "Piece errors", &self.errors, 0)?;
        }
        Ok(())
    }
}

impl InspectReport {
    fn fmt_staves(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Staves")?;
        if self.staves.is_empty() {
            return writeln!(f, "  No staves found.");
        }
        writeln!(
            f,
            "  {:>3}  {:>9}  {:>7}  {:>5}  {:>9}  {:>9}  {:>7}  {:>7}",
            "#", "y", "dy", "lines", "x0", "x1", "pieces", "flagged"
        )?;
        for row in &self.staves {
            writeln!(
                f,
                "  {:>3}  {:>9.2}  {:>7.3}  {:>5}  {:>9.2}  {:>9.2}  {:>7}  {:>7}",
                row.index, row.y, row.dy, row.nlines, row.x0, row.x1, row.pieces, row.flagged
            )?;
        }
        Ok(())
    }

    fn fmt_histogram(
        &self,
        f: &mut fmt::Formatter<'_>,
        title: &str,
        entries: &[LabelCount],
        other: usize,
    ) -> fmt::Result {
        writeln!(f, "{}", title)?;
        if entries.is_empty() {
            return writeln!(f, "  No pieces found.");
        }
        let max_count = entries.iter().map(|e| e.count).max().unwrap_or(1);
        let total: usize = entries.iter().map(|e| e.count).sum::<usize>() + other;
        for entry in entries {
            writeln!(
                f,
                "  {:<24} {:>7} {:>6}  {}",
                truncate_label(&entry.label, 24),
                format_number(entry.count),
                fmt_percent(entry.count, total),
                render_bar(entry.count, max_count, self.bar_width)
            )?;
        }
        if other > 0 {
            writeln!(
                f,
                "  {:<24} {:>7} {:>6}",
                "(other)",
                format_number(other),
                fmt_percent(other, total)
            )?;
        }
        Ok(())
    }
}

/// Format a number with thousands separators.
fn format_number(n: usize) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result.chars().rev().collect()
}

/// Format a percentage, handling zero denominators.
fn fmt_percent(numerator: usize, denominator: usize) -> String {
    if denominator == 0 {
        "n/a".to_string()
    } else {
        format!("{:.1}%", (numerator as f64 / denominator as f64) * 100.0)
    }
}

/// Render a horizontal bar using Unicode block characters.
fn render_bar(count: usize, max_count: usize, width: usize) -> String {
    if max_count == 0 || width == 0 {
        return String::new();
    }
    let filled = ((count * width) / max_count).min(width);
    "█".repeat(filled) + &"░".repeat(width - filled)
}

/// Truncate a label to fit in the display column.
fn truncate_label(label: &str, max_chars: usize) -> String {
    if label.chars().count() <= max_chars {
        label.to_string()
    } else {
        let head: String = label.chars().take(max_chars - 1).collect();
        format!("{}…", head)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(1234), "1,234");
        assert_eq!(format_number(1234567), "1,234,567");
    }

    #[test]
    fn test_fmt_percent() {
        assert_eq!(fmt_percent(0, 0), "n/a");
        assert_eq!(fmt_percent(1, 4), "25.0%");
    }

    #[test]
    fn test_render_bar() {
        assert_eq!(render_bar(5, 10, 10), "█████░░░░░");
        assert_eq!(render_bar(0, 10, 4), "░░░░");
    }

    #[test]
    fn test_truncate_label() {
        assert_eq!(truncate_label("Rest8", 10), "Rest8");
        assert_eq!(truncate_label("x distance too low", 10), "x distanc…");
    }
}
