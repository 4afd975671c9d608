use std::sync::Arc;

use crate::{
    algorithms::AlphaLumaSegmenter,
    config::DetectionConfig,
    error::Result,
    pipeline::{observer::TracingObserver, Detector},
    traits::{DetectionObserver, Segmenter},
};

/// Builder for creating detectors with a fluent API
pub struct DetectorBuilder {
    config: DetectionConfig,
    segmenter: Option<Box<dyn Segmenter>>,
    observer: Option<Arc<dyn DetectionObserver>>,
}

impl DetectorBuilder {
    /// Create a new detector builder
    pub fn new() -> Self {
        Self {
            config: DetectionConfig::default(),
            segmenter: None,
            observer: None,
        }
    }

    /// Replace the whole configuration
    pub fn with_config(mut self, config: DetectionConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the segmenter (replaces the alpha/luminance default)
    pub fn with_segmenter<S>(mut self, segmenter: S) -> Self
    where
        S: Segmenter + 'static,
    {
        self.segmenter = Some(Box::new(segmenter));
        self
    }

    pub fn with_observer<O>(mut self, observer: O) -> Self
    where
        O: DetectionObserver + 'static,
    {
        self.observer = Some(Arc::new(observer));
        self
    }

    pub fn with_shared_observer(mut self, observer: Arc<dyn DetectionObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Report diagnostics through `tracing`
    pub fn with_tracing(self) -> Self {
        self.with_observer(TracingObserver)
    }

    pub fn min_pixel_count(mut self, min: usize) -> Self {
        self.config.min_pixel_count = min;
        self
    }

    pub fn min_bbox_side(mut self, min: u32) -> Self {
        self.config.min_bbox_side = min;
        self
    }

    pub fn min_boundary_points(mut self, min: usize) -> Self {
        self.config.min_boundary_points = min;
        self
    }

    /// Analyse components on the rayon pool when built with the `parallel` feature
    pub fn parallel(mut self, enabled: bool) -> Self {
        self.config.parallel = enabled;
        self
    }

    /// Build the detector with default components if not specified
    pub fn build(self) -> Detector {
        let segmenter = self
            .segmenter
            .unwrap_or_else(|| Box::new(AlphaLumaSegmenter::from(self.config.segmentation)));

        Detector::new(self.config, segmenter, self.observer)
    }

    /// Validate the configuration, then build
    pub fn try_build(self) -> Result<Detector> {
        self.config.validate()?;
        Ok(self.build())
    }
}

impl Default for DetectorBuilder {
    fn default() -> Self {
        Self::new()
    }
}
