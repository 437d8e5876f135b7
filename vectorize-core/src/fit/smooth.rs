//! Smoothing filter (spec.md §4.5): run between consecutive corners,
//! replacing each interior point with a blend of itself and the centroid
//! of its neighbors. Corners and endpoints never move.

use super::tangent::estimate_tangent;
use crate::geom::Point;
use crate::options::FittingOptions;

fn neighbor_index(i: isize, offset: isize, n: isize, closed: bool) -> usize {
    let raw = i + offset;
    let idx = if closed { raw.rem_euclid(n) } else { raw.clamp(0, n - 1) };
    idx as usize
}

fn centroid(points: &[Point], i: usize, surround: usize, closed: bool) -> Point {
    let n = points.len() as isize;
    let neighbors: Vec<Point> = (1..=surround as isize)
        .flat_map(|k| {
            [
                points[neighbor_index(i as isize, -k, n, closed)],
                points[neighbor_index(i as isize, k, n, closed)],
            ]
        })
        .collect();
    let count = neighbors.len() as f64;
    neighbors.into_iter().fold(Point::ZERO, |acc, p| acc + p) * (1.0 / count)
}

/// Smooth one arc (an index range `[start, end]` into `points`, inclusive,
/// not wrapping) in place, running `filter_iteration_count` passes. `mark`
/// flags indices that must never move (the arc's own corner endpoints).
///
/// `closed` and the full-outline `points` slice are needed so the per-point
/// alternate-surround tangent check can look past the arc's own boundary
/// when estimating tangents, matching the tangent estimator used elsewhere.
pub fn smooth_arc(points: &mut [Point], start: usize, end: usize, closed: bool, opts: &FittingOptions) {
    if end <= start + 1 {
        return; // no interior points to move
    }
    let mut surrounds: Vec<usize> = (start..=end).map(|_| opts.filter_surround).collect();

    for _pass in 0..opts.filter_iteration_count {
        let snapshot = points.to_vec();
        for idx in (start + 1)..end {
            let default_tangent = estimate_tangent(&snapshot, idx, opts.filter_surround, closed);
            let alt_tangent = estimate_tangent(&snapshot, idx, opts.filter_alternative_surround, closed);
            let disagreement = default_tangent.angle_between(alt_tangent).to_degrees();
            if disagreement > opts.filter_epsilon {
                surrounds[idx - start] = opts.filter_alternative_surround;
            }
            let surround = surrounds[idx - start];
            let m = centroid(&snapshot, idx, surround, closed);
            let p = snapshot[idx];
            points[idx] = p * (1.0 - opts.filter_percent) + m * opts.filter_percent;
        }
    }
}
