//! Intermediate representation (IR) for parsed slide annotations.
//!
//! Format readers convert vendor documents into these types; everything
//! downstream (JSON output, inspection) works from them.
//!
//! # Design Principles
//!
//! 1. **Type Safety**: Coordinates carry a marker for the space they live in,
//!    so document coordinates cannot reach an annotation unscaled.
//!
//! 2. **Stable Indices**: Annotations are addressed by a dense
//!    [`AnnotationIndex`]; rewriting an annotation keeps its index.
//!
//! 3. **Permissive Labels**: An annotation may carry no label at all when its
//!    pen color is not part of the vocabulary.
//!
//! # Example
//!
//! ```
//! use slidelabel::ir::{Annotation, AnnotationType, Coord, Label, Labels, SlideAnnotations};
//!
//! let labels = Labels::create(vec![Label::with_color("ff0000ff", 1u32, "#ff0000ff")]).unwrap();
//! let slide = SlideAnnotations {
//!     annotations: vec![Annotation::new(
//!         0usize,
//!         AnnotationType::Polygon,
//!         vec![Coord::new(0.0, 0.0), Coord::new(10.0, 0.0), Coord::new(10.0, 10.0)],
//!         labels.get_by_name("ff0000ff").cloned(),
//!     )],
//!     labels,
//! };
//! assert_eq!(slide.annotations[0].area(), 50.0);
//! ```

mod coord;
pub mod geometry;
mod ids;
mod label;
mod model;
mod space;

// Re-export core types for convenient access
pub use coord::Coord;
pub use ids::{AnnotationIndex, LabelValue};
pub use label::{Label, Labels, REST_LABEL_NAME};
pub use model::{Annotation, AnnotationType, Ring, SlideAnnotations};
pub use space::{Scaled, Slide};
