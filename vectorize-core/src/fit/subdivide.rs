//! Recursive subdivision (spec.md §4.8) and the per-arc fit loop that ties
//! the a priori line check, cubic fit, Newton-Raphson reparameterization,
//! subdivision, and a posteriori line reversion together.
//!
//! The spec's design notes call for an explicit work-stack rather than
//! native call-stack recursion, so a subdivided arc doesn't grow the Rust
//! call stack with the depth of the curve. Each stack item is a half-open
//! range into the arc's own point slice plus the two endpoint tangents —
//! nothing else is threaded through.

use super::bezier::chord_length_parameterize;
use super::reparam::fit_with_reparameterization;
use super::reversion::{maybe_revert_to_line, try_line_a_priori};
use super::{tangent, Spline, SplineList};
use crate::geom::{perpendicular_distance_to_chord, Point};
use crate::options::FittingOptions;
use log::{debug, trace, warn};

/// Hard cap on subdivision depth, independent of `error_threshold`: a
/// pathological arc (e.g. all-NaN input slipping past validation) must not
/// spin forever chasing a fit error that can never drop below threshold.
const MAX_SUBDIVIDE_DEPTH: u32 = 16;

struct WorkItem {
    start: usize,
    end: usize,
    t_start: Point,
    t_end: Point,
    depth: u32,
}

/// Fit one corner-to-corner arc (`points[0]` and `points[last]` are already
/// the arc's hard endpoints; nothing before or after is considered). Always
/// returns an open `SplineList` — the caller decides whether consecutive
/// arcs chain into a closed spline list.
pub fn fit_arc(points: &[Point], opts: &FittingOptions) -> SplineList {
    let mut result = SplineList::new(false);
    if points.len() < 2 {
        return result;
    }
    if points.len() == 2 {
        result.push(Spline::Line {
            start: points[0],
            end: points[1],
        });
        return result;
    }

    let t_start0 = tangent::estimate_tangent(points, 0, opts.tangent_surround, false);
    let t_end0 = tangent::estimate_tangent(points, points.len() - 1, opts.tangent_surround, false) * -1.0;

    let mut stack = vec![WorkItem {
        start: 0,
        end: points.len() - 1,
        t_start: t_start0,
        t_end: t_end0,
        depth: 0,
    }];

    // LIFO processing with "push right half, then left half" guarantees the
    // left half (and everything it further splits into) is fully resolved,
    // in order, before the right half is touched — so splines land in the
    // result in left-to-right order even though the stack itself is a
    // stack, not a queue.
    while let Some(item) = stack.pop() {
        let arc = &points[item.start..=item.end];
        trace!(
            "fit_arc: processing range {}..={} (depth {}, {} points)",
            item.start,
            item.end,
            item.depth,
            arc.len()
        );

        if let Some(line) = try_line_a_priori(arc, opts) {
            result.push(line);
            continue;
        }

        let u = chord_length_parameterize(arc);
        let refined = fit_with_reparameterization(arc, u, item.t_start, item.t_end, opts);

        let can_split = arc.len() > 3 && item.depth < MAX_SUBDIVIDE_DEPTH;
        let split = if can_split { choose_split_index(arc, opts) } else { None };
        if refined.error > opts.error_threshold {
            if let Some(split_local) = split {
                let split_global = item.start + split_local;
                debug!(
                    "fit_arc: error {:.3} exceeds threshold {:.3}, subdividing {}..={} at {}",
                    refined.error, opts.error_threshold, item.start, item.end, split_global
                );
                let left_tangent_end =
                    tangent::estimate_tangent(&points[item.start..=split_global], split_local, opts.tangent_surround, false)
                        * -1.0;
                let right_tangent_start =
                    tangent::estimate_tangent(&points[split_global..=item.end], 0, opts.tangent_surround, false);

                stack.push(WorkItem {
                    start: split_global,
                    end: item.end,
                    t_start: right_tangent_start,
                    t_end: item.t_end,
                    depth: item.depth + 1,
                });
                stack.push(WorkItem {
                    start: item.start,
                    end: split_global,
                    t_start: item.t_start,
                    t_end: left_tangent_end,
                    depth: item.depth + 1,
                });
                continue;
            } else {
                warn!(
                    "fit_arc: error {:.3} exceeds threshold {:.3} but {}..={} can no longer split (depth {}), keeping best fit",
                    refined.error, opts.error_threshold, item.start, item.end, item.depth
                );
            }
        }

        let spline = maybe_revert_to_line(arc[0], refined.cubic.control1, refined.cubic.control2, *arc.last().unwrap(), opts);
        result.push(spline);
    }

    result
}

/// Pick the split point: start from the index farthest from the endpoint
/// chord (the usual "worst offender" guess), then search a small window
/// around it — sized by `subdivide_surround * subdivide_search` — for the
/// point that sits *closest* to the chord. Splitting at a locally flat
/// point rather than the sharpest one gives the two subfits a cleaner
/// corner to anchor their own endpoint tangents on. Returns `None` if the
/// arc is too short to have an interior split point.
fn choose_split_index(arc: &[Point], opts: &FittingOptions) -> Option<usize> {
    let n = arc.len();
    if n < 4 {
        return None;
    }
    let start = arc[0];
    let end = *arc.last().unwrap();
    let distance = |i: usize| perpendicular_distance_to_chord(arc[i], start, end);

    let guess = (1..n - 1).max_by(|&a, &b| distance(a).partial_cmp(&distance(b)).unwrap())?;

    let window = ((opts.subdivide_surround as f64) * opts.subdivide_search).round().max(1.0) as usize;
    let lo = guess.saturating_sub(window).max(1);
    let hi = (guess + window).min(n - 2);

    (lo..=hi).min_by(|&a, &b| distance(a).partial_cmp(&distance(b)).unwrap())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn straight_arc_fits_without_subdividing() {
        let points: Vec<Point> = (0..=20).map(|i| Point::xy(i as f64, 0.0)).collect();
        let opts = FittingOptions::default();
        let list = fit_arc(&points, &opts);
        assert_eq!(list.splines.len(), 1);
    }

    #[test]
    fn sharp_l_shape_subdivides_into_multiple_segments() {
        // An L-shaped arc with no interior corner marked: the fitter has to
        // discover the bend through subdivision since nothing upstream
        // split it at the elbow.
        let mut points = Vec::new();
        for i in 0..=10 {
            points.push(Point::xy(i as f64, 0.0));
        }
        for i in 1..=10 {
            points.push(Point::xy(10.0, i as f64));
        }
        let mut opts = FittingOptions::default();
        opts.error_threshold = 0.5;
        let list = fit_arc(&points, &opts);
        assert!(list.splines.len() > 1, "expected subdivision, got {} segments", list.splines.len());
        for spline in &list.splines {
            assert!(spline.is_finite());
        }
    }

    #[test]
    fn two_point_arc_is_a_single_line() {
        let points = vec![Point::xy(0.0, 0.0), Point::xy(5.0, 5.0)];
        let opts = FittingOptions::default();
        let list = fit_arc(&points, &opts);
        assert_eq!(list.splines.len(), 1);
        assert!(matches!(list.splines[0], Spline::Line { .. }));
    }

    #[test]
    fn subdivision_terminates_on_pathological_high_threshold() {
        // error_threshold so tight that no fit will ever satisfy it: the
        // depth cap must still stop recursion.
        let points: Vec<Point> = (0..=30)
            .map(|i| Point::xy(i as f64, ((i as f64) * 1.3).sin() * 3.0))
            .collect();
        let mut opts = FittingOptions::default();
        opts.error_threshold = 1e-9;
        let list = fit_arc(&points, &opts);
        assert!(!list.splines.is_empty());
        for spline in &list.splines {
            assert!(spline.is_finite());
        }
    }
}
