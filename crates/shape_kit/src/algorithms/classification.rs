//! Rule-based shape classification.
//!
//! Rules are tried in a fixed priority order and the first match wins, so
//! reordering them changes results.

use std::f64::consts::PI;

use geo_types::Coord;
use crate::types::{BoundingBox, PixelPoint, ShapeKind};

// circle test
pub const CIRCLE_MAX_ASPECT_DEVIATION: f64 = 0.25;
pub const CIRCLE_MIN_CIRCULARITY: f64 = 0.70;
pub const CIRCLE_MIN_EXTENT: f64 = 0.70;
pub const CIRCLE_MAX_MEAN_RADIAL_ERROR: f64 = 0.20;

// star test
pub const STAR_MAX_EXTENT: f64 = 0.50;
pub const STAR_MIN_VERTICES: usize = 6;
pub const STAR_MAX_VERTICES: usize = 25;
pub const STAR_MIN_HULL_POINTS: usize = 8;
pub const STAR_MIN_RADIAL_COV: f64 = 0.10;
/// A radial jump counts as an alternation above this fraction of the mean distance.
pub const STAR_ALTERNATION_RATIO: f64 = 0.15;
pub const STAR_MIN_ALTERNATIONS: usize = 4;
pub const STAR_ALTERNATION_HULL_FRACTION: f64 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Classification {
    pub kind: ShapeKind,
    pub confidence: f64,
}

impl Classification {
    fn new(kind: ShapeKind, confidence: f64) -> Self {
        Self { kind, confidence }
    }
}

/// Everything the classifier looks at for one component.
#[derive(Debug, Clone)]
pub struct ClassifierInput<'a> {
    /// Simplified polygon
    pub polygon: &'a [PixelPoint],
    /// Convex hull of the boundary, whichever contour was simplified
    pub hull: &'a [PixelPoint],
    pub bounding_box: BoundingBox,
    pub center: Coord<f64>,
    /// Component pixel count
    pub area: usize,
    /// Perimeter of the contour that was simplified
    pub perimeter: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeMetrics {
    pub vertex_count: usize,
    pub aspect_ratio: f64,
    pub extent: f64,
    /// `4πA / P²`, zero when the perimeter is zero
    pub circularity: f64,
}

impl ShapeMetrics {
    pub fn compute(input: &ClassifierInput<'_>) -> Self {
        let area = input.area as f64;
        let circularity = if input.perimeter > 0.0 {
            4.0 * PI * area / (input.perimeter * input.perimeter)
        } else {
            0.0
        };

        Self {
            vertex_count: input.polygon.len(),
            aspect_ratio: input.bounding_box.aspect_ratio(),
            extent: area / input.bounding_box.area() as f64,
            circularity,
        }
    }
}

fn radial_distances(points: &[PixelPoint], center: Coord<f64>) -> Vec<f64> {
    points
        .iter()
        .map(|p| (p.x as f64 - center.x).hypot(p.y as f64 - center.y))
        .collect()
}

/// Near-square box, round enough, and hull points close to the inscribed radius.
pub fn is_circular(input: &ClassifierInput<'_>, metrics: &ShapeMetrics) -> bool {
    if input.perimeter <= 0.0 || input.hull.is_empty() {
        return false;
    }
    if (metrics.aspect_ratio - 1.0).abs() > CIRCLE_MAX_ASPECT_DEVIATION {
        return false;
    }
    if metrics.circularity < CIRCLE_MIN_CIRCULARITY || metrics.extent < CIRCLE_MIN_EXTENT {
        return false;
    }

    let radius = (input.bounding_box.width + input.bounding_box.height) as f64 / 4.0;
    let distances = radial_distances(input.hull, input.center);
    let mean_error = distances.iter().map(|d| (d - radius).abs() / radius).sum::<f64>()
        / distances.len() as f64;

    mean_error < CIRCLE_MAX_MEAN_RADIAL_ERROR
}

/// Sparse shape whose hull points swing in and out around the center.
pub fn is_star(input: &ClassifierInput<'_>, metrics: &ShapeMetrics) -> bool {
    if metrics.extent > STAR_MAX_EXTENT {
        return false;
    }
    if !(STAR_MIN_VERTICES..=STAR_MAX_VERTICES).contains(&metrics.vertex_count) {
        return false;
    }
    if input.hull.len() < STAR_MIN_HULL_POINTS {
        return false;
    }

    let distances = radial_distances(input.hull, input.center);
    let n = distances.len();
    let mean = distances.iter().sum::<f64>() / n as f64;
    if mean <= 0.0 {
        return false;
    }
    let variance = distances.iter().map(|d| (d - mean).powi(2)).sum::<f64>() / n as f64;
    if variance.sqrt() / mean < STAR_MIN_RADIAL_COV {
        return false;
    }

    let alternations = (0..n)
        .filter(|&i| (distances[i] - distances[(i + 1) % n]).abs() > STAR_ALTERNATION_RATIO * mean)
        .count();
    let required = STAR_MIN_ALTERNATIONS.min((n as f64 * STAR_ALTERNATION_HULL_FRACTION).floor() as usize);

    alternations >= required
}

// circle confidence: base + slope * circularity, capped
pub const CIRCLE_BASE_CONFIDENCE: f64 = 0.90;
pub const CIRCLE_CIRCULARITY_WEIGHT: f64 = 0.10;
pub const CIRCLE_MAX_CONFIDENCE: f64 = 0.98;

pub const TRIANGLE_CONFIDENCE: f64 = 0.92;

// four vertices
pub const RECTANGLE_MIN_EXTENT: f64 = 0.70;
pub const RECTANGLE_SOLID_EXTENT: f64 = 0.85;
pub const RECTANGLE_SOLID_CONFIDENCE: f64 = 0.95;
pub const RECTANGLE_CONFIDENCE: f64 = 0.88;
/// Four vertices this sparse are a triangle with one extra corner.
pub const QUAD_TRIANGLE_MAX_EXTENT: f64 = 0.60;
pub const QUAD_TRIANGLE_CONFIDENCE: f64 = 0.85;

// five vertices
pub const PENTAGON_MIN_EXTENT: f64 = 0.65;
pub const PENTAGON_SOLID_EXTENT: f64 = 0.75;
pub const PENTAGON_SOLID_CONFIDENCE: f64 = 0.88;
pub const PENTAGON_CONFIDENCE: f64 = 0.80;
pub const FIVE_VERTEX_RECTANGLE_MIN_EXTENT: f64 = 0.45;
pub const FIVE_VERTEX_RECTANGLE_MIN_ASPECT: f64 = 0.7;
pub const FIVE_VERTEX_RECTANGLE_MAX_ASPECT: f64 = 1.5;
pub const FIVE_VERTEX_RECTANGLE_CONFIDENCE: f64 = 0.82;

// stars confirmed by the radial test
pub const STAR_MANY_VERTICES: usize = 8;
pub const STAR_MANY_VERTICES_CONFIDENCE: f64 = 0.85;
pub const STAR_FEW_VERTICES_MAX_EXTENT: f64 = 0.38;
pub const STAR_FEW_VERTICES_CONFIDENCE: f64 = 0.75;

// fallbacks
pub const QUAD_FALLBACK_CONFIDENCE: f64 = 0.78;
pub const FIVE_VERTEX_TRIANGLE_MAX_EXTENT: f64 = 0.55;
pub const FIVE_VERTEX_TRIANGLE_CONFIDENCE: f64 = 0.70;
pub const FIVE_VERTEX_PENTAGON_CONFIDENCE: f64 = 0.75;
pub const HEXAGON_PENTAGON_MIN_EXTENT: f64 = 0.50;
pub const HEXAGON_PENTAGON_CONFIDENCE: f64 = 0.70;
pub const SPARSE_STAR_MIN_VERTICES: usize = 7;
pub const SPARSE_STAR_CONFIDENCE: f64 = 0.70;
pub const DENSE_POLYGON_MIN_VERTICES: usize = 10;
pub const DENSE_STAR_MAX_EXTENT: f64 = 0.60;
pub const DENSE_STAR_CONFIDENCE: f64 = 0.65;
pub const DENSE_RECTANGLE_MIN_EXTENT: f64 = 0.80;
pub const DENSE_RECTANGLE_CONFIDENCE: f64 = 0.60;
/// A hull-sampled box can collapse to a diagonal.
pub const DIAGONAL_RECTANGLE_MIN_EXTENT: f64 = 0.85;
pub const DIAGONAL_RECTANGLE_CONFIDENCE: f64 = 0.70;

/// Classify one component, or `None` when no rule applies.
pub fn classify(input: &ClassifierInput<'_>) -> Option<Classification> {
    use ShapeKind::*;

    let m = ShapeMetrics::compute(input);
    let (n, extent, aspect) = (m.vertex_count, m.extent, m.aspect_ratio);

    if is_circular(input, &m) {
        let confidence = (CIRCLE_BASE_CONFIDENCE + CIRCLE_CIRCULARITY_WEIGHT * m.circularity)
            .min(CIRCLE_MAX_CONFIDENCE);
        return Some(Classification::new(Circle, confidence));
    }
    if n == 3 {
        return Some(Classification::new(Triangle, TRIANGLE_CONFIDENCE));
    }
    if n == 4 && extent > RECTANGLE_MIN_EXTENT {
        let confidence = if extent > RECTANGLE_SOLID_EXTENT {
            RECTANGLE_SOLID_CONFIDENCE
        } else {
            RECTANGLE_CONFIDENCE
        };
        return Some(Classification::new(Rectangle, confidence));
    }
    if n == 4 && extent < QUAD_TRIANGLE_MAX_EXTENT {
        return Some(Classification::new(Triangle, QUAD_TRIANGLE_CONFIDENCE));
    }
    if n == 5 && extent > PENTAGON_MIN_EXTENT {
        let confidence = if extent > PENTAGON_SOLID_EXTENT {
            PENTAGON_SOLID_CONFIDENCE
        } else {
            PENTAGON_CONFIDENCE
        };
        return Some(Classification::new(Pentagon, confidence));
    }
    if n == 5
        && extent > FIVE_VERTEX_RECTANGLE_MIN_EXTENT
        && extent <= PENTAGON_MIN_EXTENT
        && aspect > FIVE_VERTEX_RECTANGLE_MIN_ASPECT
        && aspect < FIVE_VERTEX_RECTANGLE_MAX_ASPECT
    {
        return Some(Classification::new(Rectangle, FIVE_VERTEX_RECTANGLE_CONFIDENCE));
    }
    if n >= STAR_MANY_VERTICES && extent < STAR_MAX_EXTENT && is_star(input, &m) {
        return Some(Classification::new(Star, STAR_MANY_VERTICES_CONFIDENCE));
    }
    if (STAR_MIN_VERTICES..STAR_MANY_VERTICES).contains(&n)
        && extent < STAR_FEW_VERTICES_MAX_EXTENT
        && is_star(input, &m)
    {
        return Some(Classification::new(Star, STAR_FEW_VERTICES_CONFIDENCE));
    }

    // fallbacks
    if n == 4 {
        return Some(Classification::new(Rectangle, QUAD_FALLBACK_CONFIDENCE));
    }
    if n == 5 {
        return Some(if extent < FIVE_VERTEX_TRIANGLE_MAX_EXTENT {
            Classification::new(Triangle, FIVE_VERTEX_TRIANGLE_CONFIDENCE)
        } else {
            Classification::new(Pentagon, FIVE_VERTEX_PENTAGON_CONFIDENCE)
        });
    }
    if n == 6 && extent > HEXAGON_PENTAGON_MIN_EXTENT {
        return Some(Classification::new(Pentagon, HEXAGON_PENTAGON_CONFIDENCE));
    }
    if n >= SPARSE_STAR_MIN_VERTICES && extent < STAR_MAX_EXTENT {
        return Some(Classification::new(Star, SPARSE_STAR_CONFIDENCE));
    }
    if n >= DENSE_POLYGON_MIN_VERTICES {
        if extent < DENSE_STAR_MAX_EXTENT {
            return Some(Classification::new(Star, DENSE_STAR_CONFIDENCE));
        }
        if extent > DENSE_RECTANGLE_MIN_EXTENT {
            return Some(Classification::new(Rectangle, DENSE_RECTANGLE_CONFIDENCE));
        }
    }
    if n == 2 && extent > DIAGONAL_RECTANGLE_MIN_EXTENT {
        return Some(Classification::new(Rectangle, DIAGONAL_RECTANGLE_CONFIDENCE));
    }

    None
}
