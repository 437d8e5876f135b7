//! Least-squares cubic Bezier fit (spec.md §4.6): the Schneider
//! (Graphics Gems) construction — chord-length parameterization, a 2x2
//! linear system in the two control-point magnitudes solved by Cramer's
//! rule, and a one-third-chord fallback when that system is degenerate.

use crate::geom::Point;
use log::warn;

/// `u_i`: cumulative chord length to `points[i]` divided by the arc's total
/// chord length, so `u[0] == 0.0` and `u[last] == 1.0`.
pub fn chord_length_parameterize(points: &[Point]) -> Vec<f64> {
    let mut u = Vec::with_capacity(points.len());
    let mut acc = 0.0;
    u.push(0.0);
    for w in points.windows(2) {
        acc += w[0].distance_to(w[1]);
        u.push(acc);
    }
    if acc > 1e-12 {
        for v in &mut u {
            *v /= acc;
        }
    }
    u
}

fn bernstein(u: f64) -> [f64; 4] {
    let one_minus_u = 1.0 - u;
    [
        one_minus_u * one_minus_u * one_minus_u,
        3.0 * one_minus_u * one_minus_u * u,
        3.0 * one_minus_u * u * u,
        u * u * u,
    ]
}

/// A fitted cubic, as the four control points (start/end are the arc's own
/// endpoints, so only the two interior control points are solved for).
#[derive(Debug, Clone, Copy)]
pub struct FittedCubic {
    pub control1: Point,
    pub control2: Point,
}

/// Fit a cubic Bezier to `points` parameterized by `u`, with `t_start` and
/// `t_end` the unit tangents at the arc's two endpoints (pointing *into*
/// the arc: `t_start` forward from `points[0]`, `t_end` backward from
/// `points[last]`).
pub fn fit_cubic(points: &[Point], u: &[f64], t_start: Point, t_end: Point) -> FittedCubic {
    let p0 = points[0];
    let pn = *points.last().unwrap();
    let chord_length = p0.distance_to(pn);

    let mut c00 = 0.0;
    let mut c01 = 0.0;
    let mut c11 = 0.0;
    let mut x0 = 0.0;
    let mut x1 = 0.0;

    for (i, &ui) in u.iter().enumerate() {
        let b = bernstein(ui);
        let a0 = t_start * b[1];
        let a1 = t_end * b[2];
        c00 += a0.dot(a0);
        c01 += a0.dot(a1);
        c11 += a1.dot(a1);

        let baseline = p0 * (b[0] + b[1]) + pn * (b[2] + b[3]);
        let tmp = points[i] - baseline;
        x0 += tmp.dot(a0);
        x1 += tmp.dot(a1);
    }

    let det_c0_c1 = c00 * c11 - c01 * c01;
    let det_c0_x = c00 * x1 - c01 * x0;
    let det_x_c1 = x0 * c11 - x1 * c01;

    let (mut alpha, mut beta) = if det_c0_c1.abs() < 1e-12 {
        warn!("fit_cubic: near-singular 2x2 system (det={det_c0_c1:.3e}), falling back to one-third-chord heuristic");
        (f64::NAN, f64::NAN)
    } else {
        (det_x_c1 / det_c0_c1, det_c0_x / det_c0_c1)
    };

    let fallback = chord_length / 3.0;
    let min_alpha = chord_length * 1e-6;
    if !alpha.is_finite() || alpha < min_alpha {
        if alpha.is_finite() {
            warn!("fit_cubic: non-positive control1 magnitude ({alpha:.3e}), falling back to one-third-chord heuristic");
        }
        alpha = fallback;
    }
    if !beta.is_finite() || beta < min_alpha {
        if beta.is_finite() {
            warn!("fit_cubic: non-positive control2 magnitude ({beta:.3e}), falling back to one-third-chord heuristic");
        }
        beta = fallback;
    }

    FittedCubic {
        control1: p0 + t_start * alpha,
        control2: pn + t_end * beta,
    }
}

/// `max_i || B(u_i) - P_i ||` for the fitted cubic.
pub fn max_fit_error(points: &[Point], u: &[f64], p0: Point, c1: Point, c2: Point, pn: Point) -> f64 {
    points
        .iter()
        .zip(u.iter())
        .map(|(&p, &ui)| crate::geom::evaluate_cubic(p0, c1, c2, pn, ui).distance_to(p))
        .fold(0.0, f64::max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chord_length_parameterization_starts_at_zero_ends_at_one() {
        let points = vec![
            Point::xy(0.0, 0.0),
            Point::xy(1.0, 0.0),
            Point::xy(3.0, 0.0),
        ];
        let u = chord_length_parameterize(&points);
        assert_eq!(u[0], 0.0);
        assert!((u[u.len() - 1] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn fits_a_straight_line_exactly() {
        let points: Vec<Point> = (0..=10).map(|i| Point::xy(i as f64, 0.0)).collect();
        let u = chord_length_parameterize(&points);
        let t_start = Point::xy(1.0, 0.0);
        let t_end = Point::xy(-1.0, 0.0);
        let fit = fit_cubic(&points, &u, t_start, t_end);
        let err = max_fit_error(&points, &u, points[0], fit.control1, fit.control2, *points.last().unwrap());
        assert!(err < 1e-6, "error was {err}");
    }

    #[test]
    fn degenerate_single_point_arc_falls_back_to_chord_third() {
        let points = vec![Point::xy(0.0, 0.0), Point::xy(0.0, 0.0), Point::xy(10.0, 0.0)];
        let u = chord_length_parameterize(&points);
        let t_start = Point::xy(1.0, 0.0);
        let t_end = Point::xy(-1.0, 0.0);
        let fit = fit_cubic(&points, &u, t_start, t_end);
        assert!(fit.control1.is_finite());
        assert!(fit.control2.is_finite());
    }
}
