use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{Result, ShapeError};

/// Foreground rule: `alpha > alpha_threshold && mean(r, g, b) < luminance_threshold`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct SegmentationConfig {
    pub alpha_threshold: u8,
    pub luminance_threshold: u8,
}

impl Default for SegmentationConfig {
    fn default() -> Self {
        Self {
            alpha_threshold: 200,
            luminance_threshold: 128,
        }
    }
}

/// Pipeline-level filters applied before a component reaches the classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct DetectionConfig {
    pub segmentation: SegmentationConfig,
    /// Components with fewer pixels are noise.
    pub min_pixel_count: usize,
    /// Minimum bounding box width and height.
    #[schemars(range(min = 1))]
    pub min_bbox_side: u32,
    #[schemars(range(min = 3))]
    pub min_boundary_points: usize,
    /// Analyse components on the rayon pool. Only honoured with the `parallel` feature.
    pub parallel: bool,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            segmentation: SegmentationConfig::default(),
            min_pixel_count: 50,
            min_bbox_side: 10,
            min_boundary_points: 8,
            parallel: false,
        }
    }
}

impl DetectionConfig {
    pub fn validate(&self) -> Result<()> {
        if self.min_bbox_side == 0 {
            return Err(ShapeError::InvalidConfig(
                "min_bbox_side must be at least 1".to_string(),
            ));
        }
        if self.min_boundary_points < 3 {
            return Err(ShapeError::InvalidConfig(format!(
                "min_boundary_points must be at least 3, got {}",
                self.min_boundary_points
            )));
        }
        Ok(())
    }

    pub fn schema() -> schemars::schema::RootSchema {
        schemars::schema_for!(DetectionConfig)
    }
}
