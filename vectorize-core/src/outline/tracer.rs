//! Outline tracer: walks a segmented bitmap and emits one closed or open
//! pixel outline per maximal 4-connected same-color region.
//!
//! Scan order is row-major from `(0, 0)`; within a region, the boundary is
//! walked clockwise with the standard Moore-neighborhood follower, rotating
//! counter-clockwise from the "turn-right" candidate so the region stays on
//! the walker's right.

use super::{PixelOutline, PixelOutlineList, PixelPoint};
use crate::bitmap::{Bitmap, Rgb};
use std::collections::VecDeque;

/// Clockwise compass directions starting at north, used both for the
/// 4-connected flood fill (indices 0, 2, 4, 6) and the 8-connected Moore
/// boundary walk (all eight).
const DIRS: [(i32, i32); 8] = [
    (0, -1),
    (1, -1),
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
];

/// `find_outline_pixels(bitmap) -> pixel_outline_list`.
pub fn find_outline_pixels(bitmap: &Bitmap, background: Option<Rgb>) -> PixelOutlineList {
    let w = bitmap.width();
    let h = bitmap.height();
    let mut marked = vec![false; w as usize * h as usize];
    let mut outlines = Vec::new();

    for y in 0..h {
        for x in 0..w {
            let idx = (y * w + x) as usize;
            if marked[idx] {
                continue;
            }
            let color = bitmap.pixel(x, y);
            let region = flood_fill_region(bitmap, x, y, color, &mut marked);
            if Some(color) == background {
                continue;
            }
            let touches_frame = region
                .iter()
                .any(|p| p.x == 0 || p.y == 0 || p.x as u32 == w - 1 || p.y as u32 == h - 1);
            let points = trace_boundary(&region);
            outlines.push(PixelOutline {
                points,
                open: touches_frame,
                color,
            });
        }
    }

    outlines
}

/// 4-connected flood fill of the region containing `(sx, sy)`, marking every
/// visited pixel in `marked` so the outer scan never revisits it.
fn flood_fill_region(
    bitmap: &Bitmap,
    sx: u32,
    sy: u32,
    color: Rgb,
    marked: &mut [bool],
) -> Vec<PixelPoint> {
    let w = bitmap.width();
    let idx = |x: u32, y: u32| (y * w + x) as usize;

    let mut region = Vec::new();
    let mut queue = VecDeque::new();
    queue.push_back((sx, sy));
    marked[idx(sx, sy)] = true;

    while let Some((x, y)) = queue.pop_front() {
        region.push(PixelPoint::new(x as i32, y as i32));
        for &(dx, dy) in &[(0i32, -1i32), (1, 0), (0, 1), (-1, 0)] {
            let nx = x as i32 + dx;
            let ny = y as i32 + dy;
            if !bitmap.in_bounds(nx, ny) {
                continue;
            }
            let (nx, ny) = (nx as u32, ny as u32);
            if marked[idx(nx, ny)] {
                continue;
            }
            if bitmap.pixel(nx, ny) != color {
                continue;
            }
            marked[idx(nx, ny)] = true;
            queue.push_back((nx, ny));
        }
    }
    region
}

/// Moore-neighbor boundary trace of a region given as a pixel set. Returns
/// the ordered boundary pixels, clockwise, starting at the topmost then
/// leftmost region pixel. A single-pixel region returns that one pixel
/// (spec.md §4.1, "Failure").
fn trace_boundary(region: &[PixelPoint]) -> Vec<PixelPoint> {
    use std::collections::HashSet;
    let set: HashSet<PixelPoint> = region.iter().copied().collect();

    let start = *region
        .iter()
        .min_by_key(|p| (p.y, p.x))
        .expect("region is never empty");

    let mut boundary = Vec::new();
    let mut current = start;
    // The pixel immediately west of the topmost-leftmost pixel is
    // guaranteed outside the region, so that is the initial backtrack
    // direction (index 6, west, in the clockwise DIRS table).
    let mut backtrack_dir = 6usize;
    let max_steps = set.len() * 8 + 8;

    for _ in 0..max_steps {
        boundary.push(current);
        let search_start = (backtrack_dir + 1) % 8;
        let mut found = None;
        for i in 0..8 {
            let d = (search_start + i) % 8;
            let (dx, dy) = DIRS[d];
            let candidate = PixelPoint::new(current.x + dx, current.y + dy);
            if set.contains(&candidate) {
                found = Some((candidate, d));
                break;
            }
        }
        let Some((next, dir_to_next)) = found else {
            // Current pixel has no foreground neighbor: an isolated
            // single-pixel region.
            return vec![start];
        };
        backtrack_dir = (dir_to_next + 4) % 8;
        current = next;
        if current == start {
            break;
        }
    }

    boundary
}
