pub mod segmentation;
pub mod labeling;
pub mod boundary;
pub mod hull;
pub mod simplification;
pub mod contour;
pub mod classification;

pub use segmentation::*;
pub use labeling::*;
pub use boundary::*;
pub use hull::*;
pub use simplification::*;
pub use contour::{select_contour, sample_uniform, ContourSelection, ContourSource, Refinement};
pub use classification::{classify, is_circular, is_star, Classification, ClassifierInput, ShapeMetrics};
