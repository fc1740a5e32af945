//! Sedeen annotation XML reader.
//!
//! Sedeen stores whole-slide annotations as drawing-tool records:
//!
//! ```xml
//! <session>
//!   <image>
//!     <overlays>
//!       <graphic type="polygon" name="region 1">
//!         <pen color="#ff00ff00" width="2" style="solid"/>
//!         <point-list>
//!           <point>1024.5,2048</point>
//!           ...
//!         </point-list>
//!       </graphic>
//!     </overlays>
//!   </image>
//! </session>
//! ```
//!
//! There is no label dictionary in the file, so labels are reconstructed from
//! pen colors. Shapes drawn in the annular marker color (`#ff00ff00`) are
//! paired into outer polygons with holes.
//!
//! Parsing is split across these modules:
//! - [`extract`]: `<graphic>` elements to raw (type, points, color) records
//! - [`vocabulary`]: pen colors to a label vocabulary, and record labels
//! - [`assemble`]: scaling, renaming, indexing and deduplication
//! - [`holes`]: greedy containment pairing of annular candidates

pub mod assemble;
pub mod extract;
pub mod holes;
pub mod vocabulary;

pub use assemble::{assemble_annotations, Assembled, Assembler, ANNULAR_MARKER};
pub use extract::{extract_records, graphic_kind, RawRecord};
pub use holes::{resolve_holes, HolePair, HoleSummary};
pub use vocabulary::{color_name, discover_labels, resolve_label, LabelOrder};

use std::fs;
use std::path::{Path, PathBuf};

use roxmltree::{Document, Node};

use crate::config::{LabelMapFile, LabelRenames};
use crate::error::SlideLabelError;
use crate::ir::{Labels, SlideAnnotations};

const OVERLAYS_TAG: &str = "overlays";

/// Options controlling how a Sedeen document is turned into annotations.
#[derive(Clone, Debug)]
pub struct ParseOptions {
    /// Linear factor applied to every coordinate.
    pub scale: f64,
    /// Label renames applied after annular candidates are identified.
    pub renames: LabelRenames,
    /// Vocabulary to use instead of discovering one from pen colors.
    pub labels: Option<Labels>,
    /// Value order for discovered labels.
    pub label_order: LabelOrder,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            scale: 1.0,
            renames: LabelRenames::default(),
            labels: None,
            label_order: LabelOrder::default(),
        }
    }
}

impl ParseOptions {
    /// Sets the coordinate scale factor.
    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    /// Sets the label renames.
    pub fn with_renames(mut self, renames: LabelRenames) -> Self {
        self.renames = renames;
        self
    }

    /// Uses a fixed vocabulary instead of discovering one.
    pub fn with_labels(mut self, labels: Labels) -> Self {
        self.labels = Some(labels);
        self
    }

    /// Sets the value order for discovered labels.
    pub fn with_label_order(mut self, order: LabelOrder) -> Self {
        self.label_order = order;
        self
    }

    /// Applies a label map file: its renames, and its vocabulary if present.
    pub fn with_label_map(mut self, map: LabelMapFile) -> Result<Self, SlideLabelError> {
        if let Some(labels) = map.vocabulary()? {
            self.labels = Some(labels);
        }
        self.renames = map.renames;
        Ok(self)
    }
}

/// A parsed document together with what hole resolution did.
#[derive(Clone, Debug, Default)]
pub struct ParseOutcome {
    pub slide: SlideAnnotations,
    pub holes: HoleSummary,
    pub duplicates_dropped: usize,
}

/// Read a Sedeen XML file into annotations.
pub fn read_sedeen_xml(path: &Path, opts: &ParseOptions) -> Result<SlideAnnotations, SlideLabelError> {
    read_sedeen_xml_outcome(path, opts).map(|outcome| outcome.slide)
}

/// Read a Sedeen XML file, keeping hole resolution details.
pub fn read_sedeen_xml_outcome(
    path: &Path,
    opts: &ParseOptions,
) -> Result<ParseOutcome, SlideLabelError> {
    if !path.exists() {
        return Err(SlideLabelError::MissingSource {
            path: path.to_path_buf(),
        });
    }

    let xml = fs::read_to_string(path).map_err(SlideLabelError::Io)?;
    parse_sedeen_xml_str(&xml, path, opts)
}

/// Parse Sedeen XML from a string.
pub fn from_sedeen_xml_str(xml: &str, opts: &ParseOptions) -> Result<SlideAnnotations, SlideLabelError> {
    parse_sedeen_xml_str(xml, Path::new("<string>"), opts).map(|outcome| outcome.slide)
}

/// Parse Sedeen XML from bytes (must be valid UTF-8).
pub fn from_sedeen_xml_slice(
    bytes: &[u8],
    opts: &ParseOptions,
) -> Result<SlideAnnotations, SlideLabelError> {
    let xml = std::str::from_utf8(bytes).map_err(|source| SlideLabelError::SedeenXmlParse {
        path: PathBuf::from("<bytes>"),
        message: format!("input is not valid UTF-8: {source}"),
    })?;
    parse_sedeen_xml_str(xml, Path::new("<bytes>"), opts).map(|outcome| outcome.slide)
}

fn parse_sedeen_xml_str(
    xml: &str,
    path: &Path,
    opts: &ParseOptions,
) -> Result<ParseOutcome, SlideLabelError> {
    let document = Document::parse(xml).map_err(|source| SlideLabelError::SedeenXmlParse {
        path: path.to_path_buf(),
        message: source.to_string(),
    })?;

    let overlays = find_overlays(&document).ok_or_else(|| SlideLabelError::SedeenXmlParse {
        path: path.to_path_buf(),
        message: format!("missing <{OVERLAYS_TAG}> element"),
    })?;

    let labels = match &opts.labels {
        Some(labels) => labels.clone(),
        None => discover_labels(overlays, opts.label_order),
    };

    let mut assembler = Assembler::new(opts.scale, &opts.renames);
    for record in extract_records(overlays, path) {
        let record = record?;
        let label = resolve_label(record.color.as_deref(), record.kind.name(), &labels);
        assembler.push(record, label);
    }

    let Assembled {
        annotations,
        annular_candidates,
        duplicates_dropped,
    } = assembler.finish();
    let (annotations, holes) = resolve_holes(annotations, &annular_candidates);

    log::info!(
        "{}: {} annotation(s), {} label(s), {} hole(s), {} duplicate(s) dropped",
        path.display(),
        annotations.len(),
        labels.len(),
        holes.pairs.len(),
        duplicates_dropped
    );

    Ok(ParseOutcome {
        slide: SlideAnnotations {
            labels,
            annotations,
        },
        holes,
        duplicates_dropped,
    })
}

fn find_overlays<'a, 'input>(document: &'a Document<'input>) -> Option<Node<'a, 'input>> {
    document
        .root_element()
        .descendants()
        .find(|n| n.is_element() && n.tag_name().name() == OVERLAYS_TAG)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{AnnotationIndex, AnnotationType, Coord, Label, LabelValue};

    const DOCUMENT: &str = r##"<?xml version="1.0" encoding="UTF-8"?>
<session software="Sedeen Viewer" version="5.4">
  <image identifier="slide.tif">
    <overlays>
      <graphic type="polygon" name="outer">
        <pen color="#ff00ff00" width="2"/>
        <point-list>
          <point>0,0</point><point>10,0</point><point>10,10</point><point>0,10</point>
        </point-list>
      </graphic>
      <graphic type="polygon" name="inner">
        <pen color="#ff00ff00" width="2"/>
        <point-list>
          <point>3,3</point><point>8,3</point><point>8,7</point><point>3,7</point>
        </point-list>
      </graphic>
      <graphic type="rectangle" name="tumor">
        <pen color="#ffff0000"/>
        <point-list>
          <point>20,20</point><point>30,20</point><point>30,30</point><point>20,30</point>
        </point-list>
      </graphic>
      <graphic type="rectangle" name="tumor copy">
        <pen color="#ffff0000"/>
        <point-list>
          <point>20,20</point><point>30,20</point><point>30,30</point><point>20,30</point>
        </point-list>
      </graphic>
      <graphic type="text" name="caption"><pen color="#ff000000"/></graphic>
      <graphic type="dot" name="empty"><pen color="#ff0000ff"/><point-list/></graphic>
      <graphic type="dot" name="cell"><pen color="#ff0000ff"/><point-list><point>1,1</point></point-list></graphic>
    </overlays>
  </image>
</session>"##;

    #[test]
    fn parses_full_document() {
        let slide = from_sedeen_xml_str(DOCUMENT, &ParseOptions::default()).expect("parse");

        assert_eq!(
            slide.labels.names().collect::<Vec<_>>(),
            ["ff0000ff", "ff00ff00", "ffff0000"]
        );
        assert_eq!(slide.annotations.len(), 4);
        for (pos, ann) in slide.annotations.iter().enumerate() {
            assert_eq!(ann.index, AnnotationIndex(pos));
        }

        let outer = &slide.annotations[0];
        assert_eq!(outer.holes.len(), 1);
        assert_eq!(outer.holes[0][0], Coord::new(3.0, 3.0));

        let inner = &slide.annotations[1];
        assert_eq!(inner.label.as_ref().map(|l| l.value), Some(LabelValue(0)));
        assert_eq!(inner.coordinates.len(), 4);

        assert_eq!(slide.annotations[3].kind, AnnotationType::Point);
    }

    #[test]
    fn scale_and_renames_apply() {
        let renames: LabelRenames = [("ffff0000", "tumor"), (ANNULAR_MARKER, "annulus")]
            .into_iter()
            .collect();
        let opts = ParseOptions::default()
            .with_scale(0.5)
            .with_renames(renames);
        let slide = from_sedeen_xml_str(DOCUMENT, &opts).expect("parse");

        let tumor = &slide.annotations[2];
        assert_eq!(tumor.label.as_ref().map(|l| l.name.as_str()), Some("tumor"));
        assert_eq!(tumor.coordinates[0], Coord::new(10.0, 10.0));

        // Renaming the marker does not stop hole resolution.
        assert_eq!(slide.annotations[0].holes.len(), 1);
        assert_eq!(
            slide.annotations[0].label.as_ref().map(|l| l.name.as_str()),
            Some("annulus")
        );
    }

    #[test]
    fn supplied_vocabulary_replaces_discovery() {
        let labels = Labels::create(vec![Label::new("ffff0000", 7u32)]).expect("labels");
        let opts = ParseOptions::default().with_labels(labels);
        let slide = from_sedeen_xml_str(DOCUMENT, &opts).expect("parse");

        assert_eq!(slide.labels.len(), 1);
        assert_eq!(slide.annotations[2].label.as_ref().map(|l| l.value), Some(LabelValue(7)));
        assert!(slide.annotations[0].label.is_none());
        // Without the marker label nothing is paired.
        assert!(slide.annotations[0].holes.is_empty());
    }

    #[test]
    fn missing_overlays_is_a_parse_error() {
        let err = from_sedeen_xml_str("<session><image/></session>", &ParseOptions::default())
            .unwrap_err();
        match err {
            SlideLabelError::SedeenXmlParse { message, .. } => {
                assert!(message.contains("<overlays>"))
            }
            other => panic!("expected SedeenXmlParse, got {other:?}"),
        }
    }

    #[test]
    fn invalid_utf8_is_rejected() {
        let err = from_sedeen_xml_slice(&[0xff, 0xfe, 0x00], &ParseOptions::default()).unwrap_err();
        assert!(matches!(err, SlideLabelError::SedeenXmlParse { .. }));
    }

    #[test]
    fn missing_file_is_reported_before_reading() {
        let err = read_sedeen_xml(Path::new("does/not/exist.xml"), &ParseOptions::default())
            .unwrap_err();
        assert!(matches!(err, SlideLabelError::MissingSource { .. }));
    }
}
