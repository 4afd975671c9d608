use crate::types::PixelPoint;

/// Distance from `p` to the infinite line through `a` and `b`, or to `a` when
/// the two coincide.
pub fn perpendicular_distance(p: PixelPoint, a: PixelPoint, b: PixelPoint) -> f64 {
    let (px, py) = (p.x as f64, p.y as f64);
    let (ax, ay) = (a.x as f64, a.y as f64);
    let (bx, by) = (b.x as f64, b.y as f64);
    let dx = bx - ax;
    let dy = by - ay;
    let mag = (dx * dx + dy * dy).sqrt();
    if mag == 0.0 {
        return ((px - ax).powi(2) + (py - ay).powi(2)).sqrt();
    }
    (dy * px - dx * py + bx * ay - by * ax).abs() / mag
}

/// Closed-loop length of `points`, including the last-to-first edge.
pub fn closed_perimeter(points: &[PixelPoint]) -> f64 {
    if points.len() < 2 {
        return 0.0;
    }
    let n = points.len();
    (0..n)
        .map(|i| {
            let a = points[i];
            let b = points[(i + 1) % n];
            (((b.x - a.x) as f64).powi(2) + ((b.y - a.y) as f64).powi(2)).sqrt()
        })
        .sum()
}

/// Douglas-Peucker simplification of an open polyline.
///
/// A span is split at its first farthest point when that distance exceeds
/// `epsilon`, otherwise it collapses to its endpoints. Spans are processed
/// from an explicit work stack, so near-collinear input cannot exhaust the
/// call stack. Inputs shorter than 3 points are returned unchanged.
pub fn douglas_peucker(points: &[PixelPoint], epsilon: f64) -> Vec<PixelPoint> {
    let n = points.len();
    if n < 3 {
        return points.to_vec();
    }

    let mut keep = vec![false; n];
    keep[0] = true;
    keep[n - 1] = true;

    let mut spans = vec![(0usize, n - 1)];
    while let Some((start, end)) = spans.pop() {
        if end - start < 2 {
            continue;
        }

        let mut max_distance = 0.0;
        let mut split = start;
        for i in start + 1..end {
            let d = perpendicular_distance(points[i], points[start], points[end]);
            if d > max_distance {
                max_distance = d;
                split = i;
            }
        }

        if max_distance > epsilon {
            keep[split] = true;
            spans.push((start, split));
            spans.push((split, end));
        }
    }

    points
        .iter()
        .zip(keep)
        .filter_map(|(&p, k)| k.then_some(p))
        .collect()
}
