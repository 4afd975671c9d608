//! # Shape Detection Library
//!
//! Classifies filled circles, triangles, rectangles, pentagons and stars in a
//! raster image using classic geometry only: binary segmentation, connected
//! component labelling, boundary extraction, a Graham-scan convex hull,
//! adaptive Douglas-Peucker simplification and a rule-based classifier.
//!
//! ## Core Features
//!
//! - **Pure stages**: every step is a plain function with explicit inputs
//! - **Detector**: composes the stages and applies the size filters
//! - **Observer seam**: diagnostics through [`DetectionObserver`], never from the stages
//! - **GeoJSON Support**: export detections as a feature collection
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use shape_kit::Detector;
//!
//! let detector = Detector::builder().build();
//!
//! let image = image::open("shapes.png")?.to_rgba8();
//! let result = detector.detect(&image);
//!
//! for shape in &result.shapes {
//!     println!("{} ({:.2}) at {:?}", shape.kind, shape.confidence, shape.center);
//! }
//! result.save_geojson("shapes.geojson")?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

// Core modules
pub mod error;
pub mod types;
pub mod config;
pub mod traits;
pub mod algorithms;
pub mod pipeline;
pub mod io;

// Re-exports for convenience
pub use error::{Result, ShapeError};
pub use types::{BinaryMask, BoundingBox, Component, DetectedShape, DetectionResult, PixelPoint, ShapeKind};
pub use config::{DetectionConfig, SegmentationConfig};
pub use traits::*;
pub use algorithms::*;
pub use pipeline::{
    analyze_component, builder::DetectorBuilder, observer::TracingObserver, ComponentOutcome, Detector,
    Rejection,
};

/// Detect shapes with the default configuration.
pub fn detect_shapes(image: &image::RgbaImage) -> DetectionResult {
    Detector::default().detect(image)
}
