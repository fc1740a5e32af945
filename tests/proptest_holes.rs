use proptest::prelude::*;
use slidelabel::ir::{Annotation, AnnotationIndex, AnnotationType, Label, Ring};
use slidelabel::sedeen::{from_sedeen_xml_str, resolve_holes, ParseOptions, ANNULAR_MARKER};

mod proptest_helpers;

fn marker_annotations(rings: &[Ring]) -> Vec<Annotation> {
    rings
        .iter()
        .enumerate()
        .map(|(i, ring)| {
            Annotation::new(
                i,
                AnnotationType::Polygon,
                ring.clone(),
                Some(Label::new(ANNULAR_MARKER, 1u32)),
            )
        })
        .collect()
}

proptest! {
    #![proptest_config(proptest_helpers::proptest_config())]

    #[test]
    fn separated_donuts_all_resolve(
        shuffled in proptest_helpers::arb_concentric_pairs(8)
            .prop_flat_map(|pairs| {
                let rings: Vec<(Ring, bool)> = pairs
                    .into_iter()
                    .flat_map(|(outer, inner)| [(outer, true), (inner, false)])
                    .collect();
                Just(rings).prop_shuffle()
            })
    ) {
        let rings: Vec<Ring> = shuffled.iter().map(|(ring, _)| ring.clone()).collect();
        let candidates: Vec<AnnotationIndex> = (0..rings.len()).map(AnnotationIndex).collect();

        let (out, summary) = resolve_holes(marker_annotations(&rings), &candidates);

        prop_assert_eq!(summary.pairs.len(), rings.len() / 2);
        prop_assert!(summary.unresolved.is_empty());
        for (ann, (ring, is_outer)) in out.iter().zip(&shuffled) {
            prop_assert_eq!(&ann.coordinates, ring);
            if *is_outer {
                prop_assert_eq!(ann.holes.len(), 1);
                prop_assert_eq!(ann.label.as_ref().map(|l| l.name.as_str()), Some(ANNULAR_MARKER));
            } else {
                prop_assert!(ann.holes.is_empty());
                prop_assert!(ann.label.as_ref().is_some_and(Label::is_rest));
            }
        }
    }

    #[test]
    fn resolution_preserves_count_and_indices(
        pairs in proptest_helpers::arb_concentric_pairs(6),
        extra in prop::collection::vec(0usize..20, 0..6),
    ) {
        let rings: Vec<Ring> = pairs
            .into_iter()
            .flat_map(|(outer, inner)| [outer, inner])
            .collect();
        let candidates: Vec<AnnotationIndex> = (0..rings.len())
            .chain(extra)
            .map(AnnotationIndex)
            .collect();

        let (out, summary) = resolve_holes(marker_annotations(&rings), &candidates);

        prop_assert_eq!(out.len(), rings.len());
        for (pos, ann) in out.iter().enumerate() {
            prop_assert_eq!(ann.index, AnnotationIndex(pos));
        }
        let holes: usize = out.iter().map(|a| a.holes.len()).sum();
        prop_assert_eq!(holes, summary.pairs.len());
        prop_assert_eq!(summary.pairs.len() * 2 + summary.unresolved.len(), rings.len());
    }

    #[test]
    fn document_order_does_not_change_pairing(
        pairs in proptest_helpers::arb_concentric_pairs(6),
    ) {
        let forward: Vec<Ring> = pairs
            .iter()
            .flat_map(|(outer, inner)| [outer.clone(), inner.clone()])
            .collect();
        let backward: Vec<Ring> = forward.iter().rev().cloned().collect();

        let parse = |rings: &[Ring]| {
            let xml = proptest_helpers::render_marker_rings(rings);
            from_sedeen_xml_str(&xml, &ParseOptions::default()).expect("parse")
        };
        let holes_of = |slide: &slidelabel::ir::SlideAnnotations| {
            let mut holes: Vec<(String, String)> = slide
                .annotations
                .iter()
                .flat_map(|a| {
                    a.holes
                        .iter()
                        .map(move |h| (format!("{:?}", a.coordinates), format!("{h:?}")))
                })
                .collect();
            holes.sort();
            holes
        };

        let a = parse(&forward);
        let b = parse(&backward);
        prop_assert_eq!(holes_of(&a).len(), pairs.len());
        prop_assert_eq!(holes_of(&a), holes_of(&b));
    }
}
