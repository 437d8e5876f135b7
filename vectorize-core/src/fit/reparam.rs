//! Newton-Raphson reparameterization (spec.md §4.7): after an initial fit,
//! nudge each `u_i` toward the parameter that actually minimizes distance
//! to `P_i`, then refit, repeating until the gain levels off.

use super::bezier::{fit_cubic, max_fit_error, FittedCubic};
use crate::geom::{derivative_cubic, evaluate_cubic, second_derivative_cubic, Point};
use crate::options::FittingOptions;

const MAX_ITERATIONS: u32 = 4;

/// One Newton-Raphson step toward the `t` minimizing `||B(t) - point||`.
fn newton_raphson_step(point: Point, t: f64, p0: Point, c1: Point, c2: Point, pn: Point) -> f64 {
    let b = evaluate_cubic(p0, c1, c2, pn, t);
    let d1 = derivative_cubic(p0, c1, c2, pn, t);
    let d2 = second_derivative_cubic(p0, c1, c2, pn, t);
    let diff = b - point;
    let numerator = diff.dot(d1);
    let denominator = d1.dot(d1) + diff.dot(d2);
    if denominator.abs() < 1e-12 {
        return t;
    }
    (t - numerator / denominator).clamp(0.0, 1.0)
}

fn reparameterize(points: &[Point], u: &[f64], p0: Point, c1: Point, c2: Point, pn: Point) -> Vec<f64> {
    points
        .iter()
        .zip(u.iter())
        .map(|(&p, &t)| newton_raphson_step(p, t, p0, c1, c2, pn))
        .collect()
}

/// Result of fitting an arc, with reparameterization already applied where
/// the spec calls for it.
pub struct RefinedFit {
    pub u: Vec<f64>,
    pub cubic: FittedCubic,
    pub error: f64,
}

/// Fit `points` with the initial chord-length parameterization `u`, then —
/// if the initial error is within `reparameterize_threshold` — iterate
/// Newton-Raphson reparameterization + refit until the relative error
/// improvement drops below `reparameterize_improvement` or four iterations
/// have run.
pub fn fit_with_reparameterization(
    points: &[Point],
    u: Vec<f64>,
    t_start: Point,
    t_end: Point,
    opts: &FittingOptions,
) -> RefinedFit {
    let p0 = points[0];
    let pn = *points.last().unwrap();

    let initial = fit_cubic(points, &u, t_start, t_end);
    let mut error = max_fit_error(points, &u, p0, initial.control1, initial.control2, pn);
    let mut cubic = initial;
    let mut u = u;

    if error > opts.reparameterize_threshold {
        return RefinedFit { u, cubic, error };
    }

    for _ in 0..MAX_ITERATIONS {
        let new_u = reparameterize(points, &u, p0, cubic.control1, cubic.control2, pn);
        let new_cubic = fit_cubic(points, &new_u, t_start, t_end);
        let new_error = max_fit_error(points, &new_u, p0, new_cubic.control1, new_cubic.control2, pn);

        let relative_improvement = if error > 1e-12 {
            (error - new_error) / error
        } else {
            0.0
        };

        u = new_u;
        cubic = new_cubic;
        error = new_error;

        if relative_improvement < opts.reparameterize_improvement {
            break;
        }
    }

    RefinedFit { u, cubic, error }
}
