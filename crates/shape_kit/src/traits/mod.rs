use image::RgbaImage;
use crate::{
    algorithms::ContourSelection,
    pipeline::Rejection,
    types::{BinaryMask, DetectedShape, DetectionResult},
};

/// Trait for turning an RGBA raster into a foreground mask
pub trait Segmenter: Send + Sync {
    fn segment(&self, image: &RgbaImage) -> BinaryMask;
}

/// Receives diagnostics from a detection run.
///
/// The stages themselves never log; the detector reports through this seam.
/// Per-component events carry the component's discovery index and arrive in
/// discovery order. Every method defaults to a no-op.
pub trait DetectionObserver: Send + Sync {
    fn on_mask(&self, _mask: &BinaryMask) {}

    fn on_components(&self, _count: usize) {}

    fn on_contour_selected(&self, _index: usize, _selection: &ContourSelection) {}

    fn on_detected(&self, _index: usize, _shape: &DetectedShape) {}

    fn on_rejected(&self, _index: usize, _reason: &Rejection) {}

    fn on_finished(&self, _result: &DetectionResult) {}
}
