//! Label vocabulary discovery from pen colors, and per-record resolution.

use std::collections::BTreeSet;

use roxmltree::Node;

use super::extract::{is_drawable, pen_color};
use crate::ir::{Label, Labels};

/// Order in which distinct pen colors receive label values.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LabelOrder {
    /// Lexicographic by color; values are reproducible across runs.
    #[default]
    Sorted,
    /// Order of first appearance in the document.
    FirstSeen,
}

/// Strips the leading marker character (`#`) from a pen color.
pub fn color_name(color: &str) -> &str {
    let mut chars = color.chars();
    chars.next();
    chars.as_str()
}

/// Build the label vocabulary of an `<overlays>` element.
///
/// Every distinct pen color of a drawable graphic becomes a label named
/// after the color without its leading character, numbered from 1.
pub fn discover_labels(overlays: Node<'_, '_>, order: LabelOrder) -> Labels {
    let mut seen_names = BTreeSet::new();
    let mut colors: Vec<&str> = Vec::new();

    for graphic in overlays.children().filter(is_drawable) {
        let Some(color) = pen_color(&graphic) else {
            continue;
        };
        let name = color_name(color);
        if !name.is_empty() && seen_names.insert(name) {
            colors.push(color);
        }
    }

    if order == LabelOrder::Sorted {
        colors.sort_unstable();
    }

    let labels = colors
        .into_iter()
        .enumerate()
        .map(|(idx, color)| Label::with_color(color_name(color), (idx + 1) as u32, color))
        .collect::<Vec<_>>();

    log::debug!("discovered {} label(s) from pen colors", labels.len());

    Labels::from_unique(labels)
}

/// Resolve the label of one record.
///
/// A vocabulary entry named `type_override` wins; otherwise the pen color
/// (without its leading character) is looked up by name. Unknown colors
/// resolve to `None`.
pub fn resolve_label(color: Option<&str>, type_override: &str, labels: &Labels) -> Option<Label> {
    if let Some(label) = labels.get_by_name(type_override) {
        return Some(label.clone());
    }

    let color = color?;
    let resolved = labels.get_by_name(color_name(color)).cloned();
    if resolved.is_none() {
        log::debug!("pen color '{color}' is not in the label vocabulary");
    }
    resolved
}
