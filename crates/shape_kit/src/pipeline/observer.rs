use tracing::{debug, info, trace};
use crate::{
    algorithms::ContourSelection,
    pipeline::Rejection,
    traits::DetectionObserver,
    types::{BinaryMask, DetectedShape, DetectionResult},
};

/// Forwards detector diagnostics to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl DetectionObserver for TracingObserver {
    fn on_mask(&self, mask: &BinaryMask) {
        debug!(
            width = mask.width(),
            height = mask.height(),
            foreground = mask.foreground_count(),
            "segmented image"
        );
    }

    fn on_components(&self, count: usize) {
        debug!(count, "labelled components");
    }

    fn on_contour_selected(&self, index: usize, selection: &ContourSelection) {
        trace!(
            component = index,
            source = ?selection.source,
            refinement = ?selection.refinement,
            vertices = selection.polygon.len(),
            perimeter = selection.perimeter,
            "selected contour"
        );
    }

    fn on_detected(&self, index: usize, shape: &DetectedShape) {
        debug!(
            component = index,
            kind = %shape.kind,
            confidence = shape.confidence,
            area = shape.area,
            "detected shape"
        );
    }

    fn on_rejected(&self, index: usize, reason: &Rejection) {
        debug!(component = index, %reason, "rejected component");
    }

    fn on_finished(&self, result: &DetectionResult) {
        info!(
            shapes = result.shapes.len(),
            width = result.image_width,
            height = result.image_height,
            elapsed_ms = result.processing_time_ms,
            "detection finished"
        );
    }
}
