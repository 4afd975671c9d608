use crate::types::{Component, PixelPoint};

/// Pixels of `component` with at least one 4-neighbor outside the image or
/// outside the component.
///
/// The result keeps the component's enumeration order; it is not a walk
/// around the perimeter.
pub fn extract_boundary(component: &Component, image_width: u32, image_height: u32) -> Vec<PixelPoint> {
    let Some(bbox) = component.bounding_box() else {
        return Vec::new();
    };

    // membership lookup local to the bounding box
    let (ox, oy) = (bbox.x as i32, bbox.y as i32);
    let (bw, bh) = (bbox.width as i32, bbox.height as i32);
    let mut members = vec![false; bbox.area() as usize];
    for p in &component.pixels {
        members[((p.y - oy) * bw + (p.x - ox)) as usize] = true;
    }
    let is_member = |x: i32, y: i32| {
        let (lx, ly) = (x - ox, y - oy);
        lx >= 0 && ly >= 0 && lx < bw && ly < bh && members[(ly * bw + lx) as usize]
    };

    let (w, h) = (image_width as i32, image_height as i32);
    component
        .pixels
        .iter()
        .filter(|p| {
            [(1, 0), (-1, 0), (0, 1), (0, -1)].iter().any(|&(dx, dy)| {
                let (nx, ny) = (p.x + dx, p.y + dy);
                nx < 0 || ny < 0 || nx >= w || ny >= h || !is_member(nx, ny)
            })
        })
        .copied()
        .collect()
}
