//! Raster fixtures: dark ink shapes on a light, opaque canvas.

use std::f64::consts::PI;

use image::{Rgba, RgbaImage};

pub const INK: Rgba<u8> = Rgba([20, 20, 30, 255]);
pub const PAPER: Rgba<u8> = Rgba([250, 250, 250, 255]);

pub fn blank_canvas(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_pixel(width, height, PAPER)
}

/// Every pixel within `radius` of `(cx, cy)`, measured from the pixel's integer coordinate.
pub fn fill_disk(img: &mut RgbaImage, cx: i32, cy: i32, radius: i32) {
    for y in 0..img.height() {
        for x in 0..img.width() {
            let dx = x as i32 - cx;
            let dy = y as i32 - cy;
            if dx * dx + dy * dy <= radius * radius {
                img.put_pixel(x, y, INK);
            }
        }
    }
}

pub fn fill_rect(img: &mut RgbaImage, x0: u32, y0: u32, width: u32, height: u32) {
    for y in y0..y0 + height {
        for x in x0..x0 + width {
            img.put_pixel(x, y, INK);
        }
    }
}

/// Even-odd point-in-polygon test.
fn inside(polygon: &[(f64, f64)], px: f64, py: f64) -> bool {
    let mut result = false;
    let mut j = polygon.len() - 1;
    for i in 0..polygon.len() {
        let (xi, yi) = polygon[i];
        let (xj, yj) = polygon[j];
        if (yi > py) != (yj > py) && px < (xj - xi) * (py - yi) / (yj - yi) + xi {
            result = !result;
        }
        j = i;
    }
    result
}

/// Fill every pixel whose center lies inside `polygon`.
pub fn fill_polygon(img: &mut RgbaImage, polygon: &[(f64, f64)]) {
    for y in 0..img.height() {
        for x in 0..img.width() {
            if inside(polygon, x as f64 + 0.5, y as f64 + 0.5) {
                img.put_pixel(x, y, INK);
            }
        }
    }
}

/// Vertices of a regular `sides`-gon with its first vertex pointing up.
pub fn regular_polygon(cx: f64, cy: f64, radius: f64, sides: usize) -> Vec<(f64, f64)> {
    (0..sides)
        .map(|i| {
            let a = -PI / 2.0 + 2.0 * PI * i as f64 / sides as f64;
            (cx + radius * a.cos(), cy + radius * a.sin())
        })
        .collect()
}

/// Upright equilateral triangle with side `side`, centered on `(cx, cy)`.
pub fn equilateral_triangle(cx: f64, cy: f64, side: f64) -> Vec<(f64, f64)> {
    let h = side * 3f64.sqrt() / 2.0;
    vec![
        (cx, cy - h / 2.0),
        (cx + side / 2.0, cy + h / 2.0),
        (cx - side / 2.0, cy + h / 2.0),
    ]
}

/// Five-pointed star alternating between `outer` and `inner` radii.
pub fn star_polygon(cx: f64, cy: f64, outer: f64, inner: f64) -> Vec<(f64, f64)> {
    (0..10)
        .map(|i| {
            let r = if i % 2 == 0 { outer } else { inner };
            let a = -PI / 2.0 + PI * i as f64 / 5.0;
            (cx + r * a.cos(), cy + r * a.sin())
        })
        .collect()
}
