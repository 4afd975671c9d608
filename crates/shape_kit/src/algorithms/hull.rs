//! Graham scan over integer pixel coordinates.
//!
//! The pivot is the point with the largest `y`, ties broken by the smallest
//! `x`. Every other point lies in the half-plane above the pivot (or on its
//! row, to the right), so polar order can be decided exactly with an integer
//! cross product instead of `atan2`. Points collinear with the pivot are
//! ordered nearest first, which makes the sweep pop all but the farthest of
//! them. Copies of the pivot are dropped.

use std::cmp::Ordering;
use crate::types::PixelPoint;

/// `(a - o) x (b - o)`; positive when `o -> a -> b` turns counter-clockwise in
/// image coordinates.
#[inline]
pub fn cross(o: PixelPoint, a: PixelPoint, b: PixelPoint) -> i64 {
    (a.x as i64 - o.x as i64) * (b.y as i64 - o.y as i64)
        - (a.y as i64 - o.y as i64) * (b.x as i64 - o.x as i64)
}

#[inline]
fn distance_sq(a: PixelPoint, b: PixelPoint) -> i64 {
    let dx = a.x as i64 - b.x as i64;
    let dy = a.y as i64 - b.y as i64;
    dx * dx + dy * dy
}

/// Convex hull of `points`. Fewer than 3 points are returned unchanged.
pub fn convex_hull(points: &[PixelPoint]) -> Vec<PixelPoint> {
    if points.len() < 3 {
        return points.to_vec();
    }

    let Some(pivot) = points
        .iter()
        .copied()
        .max_by(|a, b| a.y.cmp(&b.y).then(b.x.cmp(&a.x)))
    else {
        return points.to_vec();
    };

    let mut sorted: Vec<PixelPoint> = points.iter().copied().filter(|&p| p != pivot).collect();
    sorted.sort_by(|&a, &b| match cross(pivot, a, b) {
        c if c > 0 => Ordering::Less,
        c if c < 0 => Ordering::Greater,
        _ => distance_sq(pivot, a).cmp(&distance_sq(pivot, b)),
    });

    let mut hull: Vec<PixelPoint> = Vec::with_capacity(sorted.len() + 1);
    hull.push(pivot);
    for p in sorted {
        while hull.len() >= 2 && cross(hull[hull.len() - 2], hull[hull.len() - 1], p) <= 0 {
            hull.pop();
        }
        hull.push(p);
    }

    hull
}
