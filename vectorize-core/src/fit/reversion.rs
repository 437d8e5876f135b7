//! Line reversion (spec.md §4.9): a cubic that is already flat enough isn't
//! worth the extra two control points, so it's collapsed back to a line
//! both before fitting (a priori, on the raw samples) and after (a
//! posteriori, on the fitted control points).

use super::Spline;
use crate::geom::{perpendicular_distance_to_chord, Point};
use crate::options::FittingOptions;

/// Before fitting: if every point in `arc` lies within `line_threshold` of
/// the endpoint chord, skip the cubic fit entirely and emit a line.
pub fn try_line_a_priori(arc: &[Point], opts: &FittingOptions) -> Option<Spline> {
    let start = arc[0];
    let end = *arc.last()?;
    let max_deviation = arc
        .iter()
        .map(|&p| perpendicular_distance_to_chord(p, start, end))
        .fold(0.0, f64::max);
    if max_deviation <= opts.line_threshold {
        Some(Spline::Line { start, end })
    } else {
        None
    }
}

/// After fitting: a cubic whose control points sit almost on the chord adds
/// curvature the source data didn't ask for. Per spec.md §4.9, the test is
/// `d(C1)*L^2 + d(C2)*L^2 < line_reversion_threshold`, where `L` is the
/// chord length: each control point's perpendicular distance to the chord,
/// scaled by the chord length squared, summed, and compared directly
/// against the threshold.
pub fn maybe_revert_to_line(start: Point, control1: Point, control2: Point, end: Point, opts: &FittingOptions) -> Spline {
    let chord_length = start.distance_to(end);
    let d1 = perpendicular_distance_to_chord(control1, start, end);
    let d2 = perpendicular_distance_to_chord(control2, start, end);
    let l2 = chord_length * chord_length;
    let score = (d1 + d2) * l2;

    if score < opts.line_reversion_threshold {
        Spline::Line { start, end }
    } else {
        Spline::Cubic {
            start,
            control1,
            control2,
            end,
        }
    }
}
