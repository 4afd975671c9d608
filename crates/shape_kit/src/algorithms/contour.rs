//! Picks the working contour for a component and simplifies it with a
//! perimeter-relative tolerance, retrying when the vertex count looks wrong.

use serde::Serialize;
use crate::{
    algorithms::simplification::{closed_perimeter, douglas_peucker},
    types::PixelPoint,
};

/// Below this extent the shape is treated as deeply concave and the boundary is used.
pub const CONCAVE_EXTENT: f64 = 0.40;
/// Above this extent the component nearly fills its box.
pub const FILLED_EXTENT: f64 = 0.80;
pub const EPSILON_RATIO: f64 = 0.01;
pub const FINE_EPSILON_RATIO: f64 = 0.005;
pub const COARSE_EPSILON_RATIO: f64 = 0.03;
pub const MIN_POLYGON_VERTICES: usize = 4;
pub const MAX_POLYGON_VERTICES: usize = 12;
/// Filled shapes may keep up to this many vertices without a coarse retry.
pub const FILLED_VERTEX_ALLOWANCE: usize = 20;
pub const SAMPLED_VERTICES: usize = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ContourSource {
    /// Concave shape, the hull would erase its notches
    Boundary,
    /// Hull collapsed to fewer than 4 points on a filled shape
    DegenerateHull,
    Hull,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Refinement {
    None,
    Finer,
    Sampled,
    Coarser,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContourSelection {
    pub polygon: Vec<PixelPoint>,
    /// Closed-loop perimeter of the chosen contour
    pub perimeter: f64,
    pub source: ContourSource,
    pub refinement: Refinement,
}

/// Evenly strided subset of at most `count` points.
pub fn sample_uniform(contour: &[PixelPoint], count: usize) -> Vec<PixelPoint> {
    let n = count.min(contour.len());
    (0..n).map(|i| contour[i * contour.len() / n]).collect()
}

/// Choose between `boundary` and `hull` based on `extent` and simplify.
///
/// Both contours are used in the order given. The boundary is pixel-scan
/// ordered rather than perimeter ordered, so its perimeter and the
/// simplification over it are approximations.
pub fn select_contour(boundary: &[PixelPoint], hull: &[PixelPoint], extent: f64) -> ContourSelection {
    let (contour, source) = if extent < CONCAVE_EXTENT {
        (boundary, ContourSource::Boundary)
    } else if hull.len() < MIN_POLYGON_VERTICES && extent > FILLED_EXTENT {
        (boundary, ContourSource::DegenerateHull)
    } else {
        (hull, ContourSource::Hull)
    };

    let perimeter = closed_perimeter(contour);
    let mut polygon = douglas_peucker(contour, EPSILON_RATIO * perimeter);
    let mut refinement = Refinement::None;

    if source == ContourSource::Hull
        && polygon.len() < MIN_POLYGON_VERTICES
        && extent > FILLED_EXTENT
    {
        polygon = douglas_peucker(contour, FINE_EPSILON_RATIO * perimeter);
        refinement = Refinement::Finer;
        if polygon.len() < MIN_POLYGON_VERTICES {
            polygon = sample_uniform(contour, SAMPLED_VERTICES);
            refinement = Refinement::Sampled;
        }
    }

    let filled_allowance = extent > FILLED_EXTENT && polygon.len() < FILLED_VERTEX_ALLOWANCE;
    if polygon.len() > MAX_POLYGON_VERTICES && !filled_allowance {
        let coarse = douglas_peucker(contour, COARSE_EPSILON_RATIO * perimeter);
        if coarse.len() >= MIN_POLYGON_VERTICES {
            polygon = coarse;
            refinement = Refinement::Coarser;
        }
    }

    ContourSelection {
        polygon,
        perimeter,
        source,
        refinement,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo_types::Coord;

    fn pt(x: i32, y: i32) -> PixelPoint {
        Coord { x, y }
    }

    fn square_hull() -> Vec<PixelPoint> {
        vec![pt(0, 40), pt(0, 0), pt(40, 0), pt(40, 40)]
    }

    #[test]
    fn test_concave_extent_uses_boundary() {
        let boundary = vec![pt(0, 0), pt(10, 0), pt(10, 10), pt(0, 10)];
        let selection = select_contour(&boundary, &square_hull(), 0.3);
        assert_eq!(selection.source, ContourSource::Boundary);
        assert_eq!(selection.perimeter, 40.0);
    }

    #[test]
    fn test_degenerate_hull_on_filled_shape_uses_boundary() {
        let hull = vec![pt(0, 0), pt(20, 0), pt(20, 20)];
        let boundary = vec![pt(0, 0), pt(20, 0), pt(20, 20), pt(0, 20)];
        let selection = select_contour(&boundary, &hull, 0.9);
        assert_eq!(selection.source, ContourSource::DegenerateHull);
        assert_eq!(selection.polygon.len(), 4);
    }

    #[test]
    fn test_small_hull_on_sparse_shape_stays_on_hull() {
        let hull = vec![pt(0, 30), pt(15, 0), pt(30, 30)];
        let selection = select_contour(&[], &hull, 0.5);
        assert_eq!(selection.source, ContourSource::Hull);
        assert_eq!(selection.polygon, hull);
        assert_eq!(selection.refinement, Refinement::None);
    }

    #[test]
    fn test_square_hull_simplifies_to_corners() {
        let selection = select_contour(&[], &square_hull(), 1.0);
        assert_eq!(selection.source, ContourSource::Hull);
        assert_eq!(selection.polygon, square_hull());
        assert_eq!(selection.perimeter, 160.0);
    }

    #[test]
    fn test_filled_hull_collapsing_below_four_falls_back_to_sampling() {
        // a long flat sliver: every interior point is within 0.005 * perimeter
        let mut hull = vec![pt(0, 1)];
        hull.extend((1..10).map(|x| pt(x * 10, 0)));
        hull.push(pt(100, 1));
        let selection = select_contour(&[], &hull, 0.9);
        assert_eq!(selection.refinement, Refinement::Sampled);
        assert_eq!(selection.polygon.len(), 11);
        assert_eq!(selection.polygon, hull);
    }

    #[test]
    fn test_filled_hull_recovered_by_finer_tolerance() {
        // perimeter ~321: the 2px bulge survives 0.005 * P but not 0.01 * P
        let hull = vec![pt(0, 0), pt(80, -2), pt(160, 0), pt(80, 2), pt(0, 1)];
        assert_eq!(douglas_peucker(&hull, EPSILON_RATIO * closed_perimeter(&hull)).len(), 3);

        let selection = select_contour(&[], &hull, 0.9);
        assert_eq!(selection.source, ContourSource::Hull);
        assert_eq!(selection.refinement, Refinement::Finer);
        assert_eq!(selection.polygon, vec![pt(0, 0), pt(80, -2), pt(160, 0), pt(0, 1)]);
    }

    #[test]
    fn test_too_many_vertices_retries_coarser() {
        // 24-gon of radius 100; 1% keeps every vertex, 3% keeps fewer
        let hull: Vec<PixelPoint> = (0..24)
            .map(|i| {
                let a = i as f64 * std::f64::consts::TAU / 24.0;
                pt((100.0 * a.cos()).round() as i32, (100.0 * a.sin()).round() as i32)
            })
            .collect();
        let selection = select_contour(&[], &hull, 0.6);
        assert_eq!(selection.refinement, Refinement::Coarser);
        assert!(selection.polygon.len() >= MIN_POLYGON_VERTICES);
        assert!(selection.polygon.len() < 24);
    }

    #[test]
    fn test_coarse_retry_discarded_when_too_few_vertices() {
        // 4px zigzag: 13 vertices at 0.01 * P, a bare segment at 0.03 * P
        let contour: Vec<PixelPoint> = (0..15)
            .map(|i| pt(i * 10, if i % 2 == 1 { 4 } else { 0 }))
            .collect();
        let perimeter = closed_perimeter(&contour);
        assert_eq!(douglas_peucker(&contour, COARSE_EPSILON_RATIO * perimeter).len(), 2);

        let selection = select_contour(&[], &contour, 0.6);
        assert_eq!(selection.refinement, Refinement::None);
        assert_eq!(selection.polygon.len(), 13);
        assert_eq!(selection.polygon, douglas_peucker(&contour, EPSILON_RATIO * perimeter));
    }

    #[test]
    fn test_filled_shape_keeps_moderate_vertex_count() {
        let hull: Vec<PixelPoint> = (0..16)
            .map(|i| {
                let a = i as f64 * std::f64::consts::TAU / 16.0;
                pt((100.0 * a.cos()).round() as i32, (100.0 * a.sin()).round() as i32)
            })
            .collect();
        let selection = select_contour(&[], &hull, 0.85);
        assert_eq!(selection.refinement, Refinement::None);
        assert_eq!(selection.polygon.len(), 16);
    }

    #[test]
    fn test_sample_uniform_strides() {
        let contour: Vec<_> = (0..30).map(|i| pt(i, 0)).collect();
        let sampled = sample_uniform(&contour, 12);
        assert_eq!(sampled.len(), 12);
        assert_eq!(sampled[0], pt(0, 0));
        assert_eq!(sampled[1], pt(2, 0));
        assert_eq!(sampled[11], pt(27, 0));
        assert_eq!(sample_uniform(&contour[..5], 12).len(), 5);
    }
}
