use image::RgbaImage;
use crate::{config::SegmentationConfig, traits::Segmenter, types::BinaryMask};

/// Dark, opaque pixels are foreground.
#[derive(Debug, Clone)]
pub struct AlphaLumaSegmenter {
    pub alpha_threshold: u8,
    pub luminance_threshold: u8,
}

impl Default for AlphaLumaSegmenter {
    fn default() -> Self {
        SegmentationConfig::default().into()
    }
}

impl From<SegmentationConfig> for AlphaLumaSegmenter {
    fn from(config: SegmentationConfig) -> Self {
        Self {
            alpha_threshold: config.alpha_threshold,
            luminance_threshold: config.luminance_threshold,
        }
    }
}

impl AlphaLumaSegmenter {
    #[inline]
    pub fn is_foreground(&self, [r, g, b, a]: [u8; 4]) -> bool {
        // mean(r, g, b) < t  <=>  r + g + b < 3t, kept in integers
        let sum = r as u32 + g as u32 + b as u32;
        a > self.alpha_threshold && sum < 3 * self.luminance_threshold as u32
    }
}

impl Segmenter for AlphaLumaSegmenter {
    fn segment(&self, image: &RgbaImage) -> BinaryMask {
        BinaryMask::from_fn(image.width(), image.height(), |x, y| {
            self.is_foreground(image.get_pixel(x, y).0)
        })
    }
}
