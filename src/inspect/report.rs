//! Inspect report types and terminal formatting.

use serde::Serialize;
use std::fmt;

use crate::ir::AnnotationIndex;
use crate::sedeen::HolePair;

/// The result of inspecting a parsed slide.
#[derive(Clone, Debug, Serialize)]
pub struct InspectReport {
    /// Summary counts.
    pub summary: SummarySection,
    /// Per-label annotation counts.
    pub labels: Vec<LabelCount>,
    /// Hole resolution outcome.
    pub holes: HolesSection,
    #[serde(skip)]
    pub(crate) bar_width: usize,
}

/// Summary counts for one slide.
#[derive(Clone, Debug, Default, Serialize)]
pub struct SummarySection {
    pub annotations: usize,
    pub points: usize,
    pub polygons: usize,
    /// Labels in the vocabulary.
    pub vocabulary: usize,
    /// Annotations whose pen color matched no label.
    pub unlabeled: usize,
    /// Records dropped as exact duplicates.
    pub duplicates_dropped: usize,
}

/// A single label with its annotation count.
#[derive(Clone, Debug, Serialize)]
pub struct LabelCount {
    pub label: String,
    pub value: u32,
    pub count: usize,
}

/// Hole resolution outcome.
#[derive(Clone, Debug, Default, Serialize)]
pub struct HolesSection {
    /// Polygons carrying at least one hole.
    pub polygons_with_holes: usize,
    /// Holes across all polygons.
    pub total_holes: usize,
    pub pairs: Vec<HolePair>,
    /// Annular candidates left without a partner.
    pub unresolved: Vec<AnnotationIndex>,
}

impl fmt::Display for InspectReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        writeln!(f, "╭─────────────────────────────────────────────────────────────╮")?;
        writeln!(f, "│                 Slide Annotation Report                     │")?;
        writeln!(f, "╰─────────────────────────────────────────────────────────────╯")?;
        writeln!(f)?;

        self.fmt_summary(f)?;
        writeln!(f)?;
        self.fmt_labels(f)?;
        writeln!(f)?;
        self.fmt_holes(f)
    }
}

impl InspectReport {
    fn fmt_summary(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = &self.summary;

        writeln!(f, "┌─ Summary ─────────────────────────────────────────────────┐")?;
        writeln!(f, "│   Annotations:   {:>8}", format_number(s.annotations))?;
        writeln!(f, "│     Polygons:    {:>8}", format_number(s.polygons))?;
        writeln!(f, "│     Points:      {:>8}", format_number(s.points))?;
        writeln!(f, "│   Labels:        {:>8}", format_number(s.vocabulary))?;
        if s.unlabeled > 0 {
            writeln!(f, "│   ⚠ Unlabeled:   {:>8}", format_number(s.unlabeled))?;
        }
        if s.duplicates_dropped > 0 {
            writeln!(
                f,
                "│   Duplicates:    {:>8} dropped",
                format_number(s.duplicates_dropped)
            )?;
        }
        writeln!(f, "└───────────────────────────────────────────────────────────┘")
    }

    fn fmt_labels(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "┌─ Labels ──────────────────────────────────────────────────┐")?;

        if self.labels.is_empty() {
            writeln!(f, "│   No labeled annotations.")?;
        } else {
            let max_count = self.labels.iter().map(|e| e.count).max().unwrap_or(1);
            for entry in &self.labels {
                writeln!(
                    f,
                    "│   {:<16} {:>4} {:>7}  {}",
                    truncate_label(&entry.label, 16),
                    entry.value,
                    format_number(entry.count),
                    render_bar(entry.count, max_count, self.bar_width)
                )?;
            }
        }

        writeln!(f, "└───────────────────────────────────────────────────────────┘")
    }

    fn fmt_holes(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let h = &self.holes;

        writeln!(f, "┌─ Annular Holes ───────────────────────────────────────────┐")?;
        writeln!(
            f,
            "│   Polygons with holes: {:>6}",
            format_number(h.polygons_with_holes)
        )?;
        writeln!(f, "│   Holes:               {:>6}", format_number(h.total_holes))?;
        for pair in &h.pairs {
            writeln!(f, "│     #{} ⊃ #{}", pair.outer, pair.inner)?;
        }
        if !h.unresolved.is_empty() {
            let list: Vec<String> = h.unresolved.iter().map(|i| format!("#{i}")).collect();
            writeln!(f, "│   Unpaired candidates: {}", list.join(", "))?;
        }
        writeln!(f, "└───────────────────────────────────────────────────────────┘")
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

/// Widest histogram bar rendered, in characters.
pub const MAX_BAR_WIDTH: usize = 200;

/// Render a horizontal bar using Unicode block characters.
fn render_bar(count: usize, max_count: usize, width: usize) -> String {
    let width = width.min(MAX_BAR_WIDTH);
    if max_count == 0 || width == 0 {
        return String::new();
    }

    let filled = (count as u128 * width as u128 / max_count as u128).min(width as u128) as usize;
    "█".repeat(filled) + &"░".repeat(width - filled)
}

/// Truncate a label to fit in the display column.
fn truncate_label(label: &str, max_chars: usize) -> String {
    if label.chars().count() <= max_chars {
        label.to_string()
    } else {
        let head: String = label.chars().take(max_chars - 1).collect();
        format!("{head}…")
    }
}
