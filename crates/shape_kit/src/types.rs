use geo_types::Coord;
use image::{GrayImage, Luma};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Integer pixel coordinate, `y` grows downward.
pub type PixelPoint = Coord<i32>;

/// Per-pixel foreground flags with the same dimensions as the source image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryMask {
    width: u32,
    height: u32,
    bits: Vec<bool>,
}

impl BinaryMask {
    /// Build a mask by evaluating `f` for every pixel in row-major order.
    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> bool) -> Self {
        let mut bits = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                bits.push(f(x, y));
            }
        }
        Self { width, height, bits }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn is_foreground(&self, x: u32, y: u32) -> bool {
        x < self.width && y < self.height && self.bits[self.index(x, y)]
    }

    #[inline]
    pub(crate) fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    pub(crate) fn bits(&self) -> &[bool] {
        &self.bits
    }

    pub fn foreground_count(&self) -> usize {
        self.bits.iter().filter(|&&b| b).count()
    }

    /// Render the mask as a 0/255 grayscale image (foreground white).
    pub fn to_luma_image(&self) -> GrayImage {
        GrayImage::from_fn(self.width, self.height, |x, y| {
            if self.is_foreground(x, y) {
                Luma([255u8])
            } else {
                Luma([0u8])
            }
        })
    }
}

/// A maximal 4-connected set of foreground pixels.
///
/// Pixel order is the labeler's enumeration order; treat it as a set except
/// where the boundary extractor deliberately reuses it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Component {
    pub pixels: Vec<PixelPoint>,
}

impl Component {
    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Integer envelope of the pixel coordinates, `None` for an empty component.
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        let first = self.pixels.first()?;
        let (mut min_x, mut min_y, mut max_x, mut max_y) = (first.x, first.y, first.x, first.y);
        for p in &self.pixels[1..] {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }

        Some(BoundingBox {
            x: min_x as u32,
            y: min_y as u32,
            width: (max_x - min_x + 1) as u32,
            height: (max_y - min_y + 1) as u32,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl BoundingBox {
    pub fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Geometric midpoint of the box (not a pixel centroid).
    pub fn center(&self) -> Coord<f64> {
        Coord {
            x: self.x as f64 + self.width as f64 / 2.0,
            y: self.y as f64 + self.height as f64 / 2.0,
        }
    }

    pub fn aspect_ratio(&self) -> f64 {
        self.width as f64 / self.height as f64
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ShapeKind {
    Circle,
    Triangle,
    Rectangle,
    Pentagon,
    Star,
}

/// A classified component. The only artifact that leaves the detector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectedShape {
    #[serde(rename = "type")]
    pub kind: ShapeKind,
    /// In `[0, 1]`.
    pub confidence: f64,
    pub bounding_box: BoundingBox,
    /// Midpoint of `bounding_box`.
    pub center: Coord<f64>,
    /// Pixel count of the originating component. A full `u32 x u32` image
    /// can exceed `u32::MAX`.
    pub area: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionResult {
    /// Shapes in component discovery order
    pub shapes: Vec<DetectedShape>,
    pub processing_time_ms: f64,
    /// Original image dimensions
    pub image_width: u32,
    pub image_height: u32,
}

impl DetectionResult {
    pub fn count_of(&self, kind: ShapeKind) -> usize {
        self.shapes.iter().filter(|s| s.kind == kind).count()
    }
}
