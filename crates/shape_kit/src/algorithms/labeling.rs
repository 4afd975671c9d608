use geo_types::Coord;
use crate::types::{BinaryMask, Component};

/// Split the mask into 4-connected components.
///
/// Components come out in the row-major order of their first pixel. The fill
/// uses an explicit stack, so a component covering the whole image is fine.
/// Neighbors are pushed right, left, down, up and marked when pushed; the
/// resulting pop order is the component's pixel order.
pub fn label_components(mask: &BinaryMask) -> Vec<Component> {
    let (width, height) = (mask.width(), mask.height());
    let bits = mask.bits();
    let mut visited = vec![false; bits.len()];
    let mut components = Vec::new();
    let mut stack: Vec<(u32, u32)> = Vec::new();

    for y in 0..height {
        for x in 0..width {
            let start = mask.index(x, y);
            if !bits[start] || visited[start] {
                continue;
            }

            visited[start] = true;
            stack.push((x, y));
            let mut pixels = Vec::new();

            while let Some((px, py)) = stack.pop() {
                pixels.push(Coord { x: px as i32, y: py as i32 });

                let neighbors = [
                    (px + 1 < width).then(|| (px + 1, py)),
                    px.checked_sub(1).map(|nx| (nx, py)),
                    (py + 1 < height).then(|| (px, py + 1)),
                    py.checked_sub(1).map(|ny| (px, ny)),
                ];
                for (nx, ny) in neighbors.into_iter().flatten() {
                    let idx = mask.index(nx, ny);
                    if bits[idx] && !visited[idx] {
                        visited[idx] = true;
                        stack.push((nx, ny));
                    }
                }
            }

            components.push(Component { pixels });
        }
    }

    components
}
