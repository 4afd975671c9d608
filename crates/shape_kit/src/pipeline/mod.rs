pub mod builder;
pub mod observer;

use std::{fmt, path::Path, sync::Arc, time::Instant};

use image::RgbaImage;
use crate::{
    algorithms::{
        classify, convex_hull, extract_boundary, label_components, select_contour,
        ClassifierInput, ContourSelection, ShapeMetrics,
    },
    config::DetectionConfig,
    error::{Result, ShapeError},
    traits::{DetectionObserver, Segmenter},
    types::{Component, DetectedShape, DetectionResult},
};

/// Why a component produced no shape. These are expected outcomes, not errors.
#[derive(Debug, Clone, PartialEq)]
pub enum Rejection {
    TooFewPixels { count: usize, min: usize },
    BoundingBoxTooSmall { width: u32, height: u32, min: u32 },
    BoundaryTooShort { points: usize, min: usize },
    Unclassified { vertex_count: usize, extent: f64 },
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooFewPixels { count, min } => write!(f, "{} pixels, need {}", count, min),
            Self::BoundingBoxTooSmall { width, height, min } => {
                write!(f, "bounding box {}x{} below {}x{}", width, height, min, min)
            }
            Self::BoundaryTooShort { points, min } => {
                write!(f, "{} boundary points, need {}", points, min)
            }
            Self::Unclassified { vertex_count, extent } => {
                write!(f, "no rule for {} vertices at extent {:.3}", vertex_count, extent)
            }
        }
    }
}

/// Result of analysing one component.
#[derive(Debug, Clone)]
pub enum ComponentOutcome {
    Detected {
        shape: DetectedShape,
        selection: ContourSelection,
    },
    /// `selection` is present when the component got as far as the classifier.
    Rejected {
        reason: Rejection,
        selection: Option<ContourSelection>,
    },
}

impl ComponentOutcome {
    fn rejected(reason: Rejection) -> Self {
        Self::Rejected { reason, selection: None }
    }

    pub fn shape(&self) -> Option<&DetectedShape> {
        match self {
            Self::Detected { shape, .. } => Some(shape),
            Self::Rejected { .. } => None,
        }
    }
}

/// Run the size filters, contour selection and classification for one component.
pub fn analyze_component(
    component: &Component,
    image_width: u32,
    image_height: u32,
    config: &DetectionConfig,
) -> ComponentOutcome {
    if component.len() < config.min_pixel_count {
        return ComponentOutcome::rejected(Rejection::TooFewPixels {
            count: component.len(),
            min: config.min_pixel_count,
        });
    }

    let Some(bounding_box) = component.bounding_box() else {
        return ComponentOutcome::rejected(Rejection::TooFewPixels { count: 0, min: config.min_pixel_count });
    };
    if bounding_box.width < config.min_bbox_side || bounding_box.height < config.min_bbox_side {
        return ComponentOutcome::rejected(Rejection::BoundingBoxTooSmall {
            width: bounding_box.width,
            height: bounding_box.height,
            min: config.min_bbox_side,
        });
    }

    let boundary = extract_boundary(component, image_width, image_height);
    if boundary.len() < config.min_boundary_points {
        return ComponentOutcome::rejected(Rejection::BoundaryTooShort {
            points: boundary.len(),
            min: config.min_boundary_points,
        });
    }

    let hull = convex_hull(&boundary);
    let center = bounding_box.center();
    let area = component.len();
    let extent = area as f64 / bounding_box.area() as f64;
    let selection = select_contour(&boundary, &hull, extent);

    let input = ClassifierInput {
        polygon: &selection.polygon,
        hull: &hull,
        bounding_box,
        center,
        area,
        perimeter: selection.perimeter,
    };

    match classify(&input) {
        Some(classification) => ComponentOutcome::Detected {
            shape: DetectedShape {
                kind: classification.kind,
                confidence: classification.confidence,
                bounding_box,
                center,
                area: area as u64,
            },
            selection,
        },
        None => {
            let metrics = ShapeMetrics::compute(&input);
            ComponentOutcome::Rejected {
                reason: Rejection::Unclassified {
                    vertex_count: metrics.vertex_count,
                    extent: metrics.extent,
                },
                selection: Some(selection),
            }
        }
    }
}

/// Shape detector: segmentation, labelling and per-component analysis.
///
/// Holds no per-run state, so one detector can serve any number of images.
pub struct Detector {
    config: DetectionConfig,
    segmenter: Box<dyn Segmenter>,
    observer: Option<Arc<dyn DetectionObserver>>,
}

impl Detector {
    /// Create a new detector builder
    pub fn builder() -> builder::DetectorBuilder {
        builder::DetectorBuilder::new()
    }

    pub fn new(
        config: DetectionConfig,
        segmenter: Box<dyn Segmenter>,
        observer: Option<Arc<dyn DetectionObserver>>,
    ) -> Self {
        Self {
            config,
            segmenter,
            observer,
        }
    }

    pub fn config(&self) -> &DetectionConfig {
        &self.config
    }

    /// Detect shapes in an RGBA image.
    pub fn detect(&self, image: &RgbaImage) -> DetectionResult {
        let started = Instant::now();
        let (width, height) = image.dimensions();

        let mask = self.segmenter.segment(image);
        if let Some(observer) = &self.observer {
            observer.on_mask(&mask);
        }

        let components = label_components(&mask);
        if let Some(observer) = &self.observer {
            observer.on_components(components.len());
        }

        let outcomes = self.analyze_all(&components, width, height);

        let mut shapes = Vec::new();
        for (index, outcome) in outcomes.into_iter().enumerate() {
            match outcome {
                ComponentOutcome::Detected { shape, selection } => {
                    if let Some(observer) = &self.observer {
                        observer.on_contour_selected(index, &selection);
                        observer.on_detected(index, &shape);
                    }
                    shapes.push(shape);
                }
                ComponentOutcome::Rejected { reason, selection } => {
                    if let Some(observer) = &self.observer {
                        if let Some(selection) = &selection {
                            observer.on_contour_selected(index, selection);
                        }
                        observer.on_rejected(index, &reason);
                    }
                }
            }
        }

        let result = DetectionResult {
            shapes,
            processing_time_ms: started.elapsed().as_secs_f64() * 1000.0,
            image_width: width,
            image_height: height,
        };
        if let Some(observer) = &self.observer {
            observer.on_finished(&result);
        }
        result
    }

    /// Detect shapes in a raw row-major RGBA buffer of `width * height * 4` bytes.
    pub fn detect_raw(&self, width: u32, height: u32, pixels: &[u8]) -> Result<DetectionResult> {
        if width == 0 || height == 0 {
            return Err(ShapeError::InvalidDimensions { width, height });
        }
        let expected = width as usize * height as usize * 4;
        if pixels.len() != expected {
            return Err(ShapeError::InvalidBuffer {
                expected,
                actual: pixels.len(),
            });
        }
        let image = RgbaImage::from_raw(width, height, pixels.to_vec())
            .ok_or(ShapeError::InvalidBuffer { expected, actual: pixels.len() })?;
        Ok(self.detect(&image))
    }

    /// Decode an image file and detect shapes in it.
    pub fn detect_file(&self, path: impl AsRef<Path>) -> Result<DetectionResult> {
        let image = image::open(path)?.to_rgba8();
        Ok(self.detect(&image))
    }

    #[cfg(feature = "parallel")]
    fn analyze_all(&self, components: &[Component], width: u32, height: u32) -> Vec<ComponentOutcome> {
        if self.config.parallel {
            use rayon::prelude::*;

            return components
                .par_iter()
                .map(|component| analyze_component(component, width, height, &self.config))
                .collect();
        }
        self.analyze_sequential(components, width, height)
    }

    #[cfg(not(feature = "parallel"))]
    fn analyze_all(&self, components: &[Component], width: u32, height: u32) -> Vec<ComponentOutcome> {
        self.analyze_sequential(components, width, height)
    }

    fn analyze_sequential(&self, components: &[Component], width: u32, height: u32) -> Vec<ComponentOutcome> {
        components
            .iter()
            .map(|component| analyze_component(component, width, height, &self.config))
            .collect()
    }

    /// Get information about the detector configuration
    pub fn info(&self) -> String {
        format!(
            "Detector: min {} px, min {}x{} box, min {} boundary points, observer {}",
            self.config.min_pixel_count,
            self.config.min_bbox_side,
            self.config.min_bbox_side,
            self.config.min_boundary_points,
            if self.observer.is_some() { "attached" } else { "none" },
        )
    }
}

impl Default for Detector {
    fn default() -> Self {
        Self::builder().build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo_types::Coord;

    fn block(x0: i32, y0: i32, w: i32, h: i32) -> Component {
        let mut pixels = Vec::new();
        for y in y0..y0 + h {
            for x in x0..x0 + w {
                pixels.push(Coord { x, y });
            }
        }
        Component { pixels }
    }

    #[test]
    fn test_small_component_rejected_as_noise() {
        let outcome = analyze_component(&block(0, 0, 7, 7), 50, 50, &DetectionConfig::default());
        assert!(matches!(
            outcome,
            ComponentOutcome::Rejected { reason: Rejection::TooFewPixels { count: 49, min: 50 }, .. }
        ));
    }

    #[test]
    fn test_narrow_component_rejected_by_box() {
        let outcome = analyze_component(&block(0, 0, 9, 40), 50, 50, &DetectionConfig::default());
        assert!(matches!(
            outcome,
            ComponentOutcome::Rejected { reason: Rejection::BoundingBoxTooSmall { width: 9, height: 40, .. }, .. }
        ));
    }

    #[test]
    fn test_boundary_filter_applies_before_classification() {
        let config = DetectionConfig { min_boundary_points: 1_000, ..Default::default() };
        let outcome = analyze_component(&block(5, 5, 20, 20), 50, 50, &config);
        assert!(matches!(
            outcome,
            ComponentOutcome::Rejected { reason: Rejection::BoundaryTooShort { points: 76, .. }, selection: None }
        ));
    }

    #[test]
    fn test_block_is_rectangle_with_box_center() {
        let outcome = analyze_component(&block(10, 20, 30, 12), 100, 100, &DetectionConfig::default());
        let shape = outcome.shape().expect("block should classify");
        assert_eq!(shape.kind, crate::ShapeKind::Rectangle);
        assert_eq!(shape.confidence, 0.95);
        assert_eq!(shape.area, 360);
        assert_eq!(shape.center, Coord { x: 25.0, y: 26.0 });
    }

    #[test]
    fn test_detect_raw_validates_buffer() {
        let detector = Detector::default();
        let err = detector.detect_raw(4, 4, &[0u8; 10]).unwrap_err();
        assert!(matches!(err, ShapeError::InvalidBuffer { expected: 64, actual: 10 }));
        assert!(matches!(
            detector.detect_raw(0, 4, &[]),
            Err(ShapeError::InvalidDimensions { .. })
        ));

        let white = vec![255u8; 4 * 4 * 4];
        let result = detector.detect_raw(4, 4, &white).expect("valid buffer");
        assert!(result.shapes.is_empty());
        assert_eq!((result.image_width, result.image_height), (4, 4));
    }

    #[test]
    fn test_detect_file_decodes_png() {
        let mut image = RgbaImage::from_pixel(80, 60, image::Rgba([255, 255, 255, 255]));
        for y in 10..40 {
            for x in 20..60 {
                image.put_pixel(x, y, image::Rgba([0, 0, 0, 255]));
            }
        }
        let path = std::env::temp_dir().join(format!("shape_kit_detect_{}.png", std::process::id()));
        image.save(&path).expect("write png");

        let detector = Detector::default();
        let result = detector.detect_file(&path);
        std::fs::remove_file(&path).ok();

        let result = result.expect("decodable png");
        assert_eq!((result.image_width, result.image_height), (80, 60));
        assert_eq!(result.shapes, detector.detect(&image).shapes);
        assert_eq!(result.shapes[0].kind, crate::ShapeKind::Rectangle);
        assert_eq!(result.shapes[0].area, 1200);

        assert!(matches!(
            detector.detect_file(std::env::temp_dir().join("shape_kit_missing.png")),
            Err(ShapeError::ImageLoad(_))
        ));
    }

    #[test]
    fn test_rejection_display() {
        let reason = Rejection::BoundingBoxTooSmall { width: 9, height: 40, min: 10 };
        assert_eq!(reason.to_string(), "bounding box 9x40 below 10x10");
    }
}
