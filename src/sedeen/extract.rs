//! Geometry extraction from the `<overlays>` section of a Sedeen document.
//!
//! Walks `<graphic>` elements and yields one [`RawRecord`] per non-empty
//! `<point-list>`. No label interpretation happens here.

use std::path::Path;

use roxmltree::{Children, Node};

use crate::error::SlideLabelError;
use crate::ir::{AnnotationType, Coord, Slide};

const GRAPHIC_TAG: &str = "graphic";
const PEN_TAG: &str = "pen";
const POINT_LIST_TAG: &str = "point-list";
const TEXT_KIND: &str = "text";

/// One drawn shape as found in the document.
#[derive(Clone, Debug, PartialEq)]
pub struct RawRecord {
    pub kind: AnnotationType,
    pub coordinates: Vec<Coord<Slide>>,
    /// Pen color, e.g. `#ff00ff00`.
    pub color: Option<String>,
}

/// Maps a Sedeen graphic `type` attribute to a geometry type.
pub fn graphic_kind(raw: &str) -> Option<AnnotationType> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "polygon" | "rectangle" | "spline" | "ellipse" | "polyline" => {
            Some(AnnotationType::Polygon)
        }
        "dot" | "pointset" => Some(AnnotationType::Point),
        _ => None,
    }
}

/// Returns true for `<graphic>` elements that carry drawable geometry.
pub(crate) fn is_drawable(node: &Node<'_, '_>) -> bool {
    node.is_element()
        && node.tag_name().name() == GRAPHIC_TAG
        && !node
            .attribute("type")
            .is_some_and(|kind| kind.trim().eq_ignore_ascii_case(TEXT_KIND))
}

/// Pen color of a drawable graphic, if it has a colored `<pen>`.
pub(crate) fn pen_color<'a>(graphic: &Node<'a, '_>) -> Option<&'a str> {
    graphic
        .children()
        .find(|n| n.is_element() && n.tag_name().name() == PEN_TAG)
        .and_then(|pen| pen.attribute("color"))
}

/// Lazily extract raw records from an `<overlays>` element.
///
/// Iteration stops after the first error.
pub fn extract_records<'a, 'input>(overlays: Node<'a, 'input>, path: &'a Path) -> Records<'a, 'input> {
    Records {
        graphics: overlays.children(),
        current: None,
        ordinal: 0,
        path,
        failed: false,
    }
}

/// Iterator returned by [`extract_records`].
pub struct Records<'a, 'input> {
    graphics: Children<'a, 'input>,
    current: Option<OpenGraphic<'a, 'input>>,
    ordinal: usize,
    path: &'a Path,
    failed: bool,
}

struct OpenGraphic<'a, 'input> {
    kind: AnnotationType,
    color: Option<String>,
    label: String,
    children: Children<'a, 'input>,
}

impl<'a, 'input> Iterator for Records<'a, 'input> {
    type Item = Result<RawRecord, SlideLabelError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.failed {
                return None;
            }

            if let Some(open) = self.current.as_mut() {
                for child in open.children.by_ref() {
                    if !child.is_element() || child.tag_name().name() != POINT_LIST_TAG {
                        continue;
                    }

                    match parse_point_list(child, self.path, &open.label) {
                        Ok(coordinates) if coordinates.is_empty() => continue,
                        Ok(coordinates) => {
                            return Some(Ok(RawRecord {
                                kind: open.kind,
                                coordinates,
                                color: open.color.clone(),
                            }));
                        }
                        Err(err) => {
                            self.failed = true;
                            return Some(Err(err));
                        }
                    }
                }
                self.current = None;
            }

            let graphic = self.graphics.by_ref().find(is_drawable)?;
            self.ordinal += 1;
            let label = describe_graphic(&graphic, self.ordinal);

            let raw_kind = graphic.attribute("type").unwrap_or("");
            let Some(kind) = graphic_kind(raw_kind) else {
                self.failed = true;
                return Some(Err(SlideLabelError::UnsupportedType {
                    path: self.path.to_path_buf(),
                    graphic: label,
                    kind: raw_kind.to_string(),
                }));
            };

            self.current = Some(OpenGraphic {
                kind,
                color: pen_color(&graphic).map(ToOwned::to_owned),
                label,
                children: graphic.children(),
            });
        }
    }
}

fn describe_graphic(graphic: &Node<'_, '_>, ordinal: usize) -> String {
    match graphic.attribute("name").map(str::trim).filter(|n| !n.is_empty()) {
        Some(name) => format!("<graphic> #{ordinal} '{name}'"),
        None => format!("<graphic> #{ordinal}"),
    }
}

fn parse_point_list(
    node: Node<'_, '_>,
    path: &Path,
    graphic: &str,
) -> Result<Vec<Coord<Slide>>, SlideLabelError> {
    node.children()
        .filter(|n| n.is_element())
        .map(|point| parse_point(point.text().unwrap_or(""), path, graphic))
        .collect()
}

fn parse_point(raw: &str, path: &Path, graphic: &str) -> Result<Coord<Slide>, SlideLabelError> {
    let invalid = || SlideLabelError::SedeenXmlParse {
        path: path.to_path_buf(),
        message: format!("{graphic} has invalid point '{}'; expected 'x,y'", raw.trim()),
    };

    let (x, y) = raw.trim().split_once(',').ok_or_else(invalid)?;
    let x = x.trim().parse::<f64>().map_err(|_| invalid())?;
    let y = y.trim().parse::<f64>().map_err(|_| invalid())?;
    Ok(Coord::new(x, y))
}
