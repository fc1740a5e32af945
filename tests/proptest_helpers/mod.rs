#![allow(dead_code)]

use std::fmt::Write;

use proptest::prelude::*;
use proptest::test_runner::{Config as ProptestConfig, FileFailurePersistence};
use slidelabel::ir::{Coord, Ring};

pub const MARKER_COLOR: &str = "#ff00ff00";

/// Pen colors used by generated documents, marker excluded.
pub const PALETTE: &[&str] = &["#ffff0000", "#ff0000ff", "#ff00ffff", "#ffffff00"];

pub fn proptest_config() -> ProptestConfig {
    let cases = std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(64);

    let mut config = ProptestConfig::with_failure_persistence(FileFailurePersistence::WithSource(
        "proptest-regressions",
    ));
    config.cases = cases;
    config.max_shrink_iters = 1024;
    config
}

/// One `<graphic>` element of a generated document.
#[derive(Clone, Debug)]
pub struct GraphicSpec {
    pub kind: &'static str,
    pub color: Option<&'static str>,
    pub points: Vec<(i32, i32)>,
}

pub fn square(x0: f64, y0: f64, side: f64) -> Ring {
    vec![
        Coord::new(x0, y0),
        Coord::new(x0 + side, y0),
        Coord::new(x0 + side, y0 + side),
        Coord::new(x0, y0 + side),
    ]
}

fn arb_color(with_marker: bool) -> BoxedStrategy<Option<&'static str>> {
    let mut colors: Vec<&'static str> = PALETTE.to_vec();
    if with_marker {
        colors.push(MARKER_COLOR);
    }
    prop_oneof![
        1 => Just(None),
        6 => prop::sample::select(colors).prop_map(Some),
    ]
    .boxed()
}

/// Graphics with small integer coordinates, so duplicates are common.
pub fn arb_graphic(with_marker: bool) -> BoxedStrategy<GraphicSpec> {
    let kind = prop::sample::select(vec!["polygon", "rectangle", "ellipse", "dot", "pointset"]);
    let points = prop::collection::vec((0i32..4, 0i32..4), 0..5);
    (kind, arb_color(with_marker), points)
        .prop_map(|(kind, color, points)| GraphicSpec {
            kind,
            color,
            points,
        })
        .boxed()
}

pub fn arb_document(with_marker: bool, max_graphics: usize) -> BoxedStrategy<Vec<GraphicSpec>> {
    prop::collection::vec(arb_graphic(with_marker), 0..max_graphics).boxed()
}

/// Render graphics as a Sedeen session document.
pub fn render_document(graphics: &[GraphicSpec]) -> String {
    let mut xml = String::from("<session><image><overlays>");
    for graphic in graphics {
        let _ = write!(xml, "<graphic type=\"{}\">", graphic.kind);
        if let Some(color) = graphic.color {
            let _ = write!(xml, "<pen color=\"{color}\"/>");
        }
        xml.push_str("<point-list>");
        for (x, y) in &graphic.points {
            let _ = write!(xml, "<point>{x},{y}</point>");
        }
        xml.push_str("</point-list></graphic>");
    }
    xml.push_str("</overlays></image></session>");
    xml
}

/// Render rings as marker-colored polygons.
pub fn render_marker_rings(rings: &[Ring]) -> String {
    let graphics: Vec<String> = rings
        .iter()
        .map(|ring| {
            let points: String = ring
                .iter()
                .map(|c| format!("<point>{},{}</point>", c.x, c.y))
                .collect();
            format!(
                "<graphic type=\"polygon\"><pen color=\"{MARKER_COLOR}\"/><point-list>{points}</point-list></graphic>"
            )
        })
        .collect();
    format!(
        "<session><image><overlays>{}</overlays></image></session>",
        graphics.concat()
    )
}

/// Concentric square pairs laid out on a row, one pair per 100-unit cell,
/// returned as (outer, inner) in cell order.
pub fn arb_concentric_pairs(max_pairs: usize) -> BoxedStrategy<Vec<(Ring, Ring)>> {
    prop::collection::vec((10u32..50, 1u32..5), 1..max_pairs)
        .prop_map(|cells| {
            cells
                .into_iter()
                .enumerate()
                .map(|(i, (side, inset))| {
                    let x = i as f64 * 100.0;
                    let side = f64::from(side);
                    let inset = f64::from(inset);
                    (
                        square(x, 0.0, side),
                        square(x + inset, inset, side - 2.0 * inset),
                    )
                })
                .collect()
        })
        .boxed()
}
