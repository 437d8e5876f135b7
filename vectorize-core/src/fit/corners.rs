//! Corner detection (spec.md §4.4): marks the outline points where the
//! fitter must not smooth or fit across a tangent discontinuity.

use crate::geom::Point;
use crate::options::FittingOptions;

fn neighbor_index(i: isize, offset: isize, n: isize, closed: bool) -> usize {
    let raw = i + offset;
    let idx = if closed { raw.rem_euclid(n) } else { raw.clamp(0, n - 1) };
    idx as usize
}

/// `alpha(i)`: the minimum, over `k = 1..=surround`, of the angle at
/// `points[i]` between the chords to its `k`-th predecessor and `k`-th
/// successor. Small `alpha` means a sharp turn.
fn corner_angle(points: &[Point], i: usize, surround: usize, closed: bool) -> f64 {
    let n = points.len() as isize;
    let p = points[i];
    (1..=surround as isize)
        .map(|k| {
            let pred = points[neighbor_index(i as isize, -k, n, closed)];
            let succ = points[neighbor_index(i as isize, k, n, closed)];
            (pred - p).angle_between(succ - p)
        })
        .fold(f64::INFINITY, f64::min)
}

/// Produce a boolean mark per outline point, `true` at corners. Endpoints
/// of an open outline are always corners.
pub fn detect_corners(points: &[Point], closed: bool, opts: &FittingOptions) -> Vec<bool> {
    let n = points.len();
    if n == 0 {
        return Vec::new();
    }
    if n < 3 {
        return vec![true; n];
    }

    let always_threshold = opts.corner_always_threshold.to_radians();
    let threshold = opts.corner_threshold.to_radians();
    // `angle_between` never returns more than pi, so a `corner_threshold` at
    // or above 180 degrees would otherwise admit every non-collinear point
    // as a candidate rather than none of them. Treat the angle's own
    // ceiling as the sentinel for "candidate tier disabled" so raising
    // corner_threshold to its maximum behaves like turning it off, per the
    // convex-outline invariant in spec.md §8.
    let candidate_tier_enabled = threshold < std::f64::consts::PI - 1e-9;
    let alpha: Vec<f64> = (0..n)
        .map(|i| corner_angle(points, i, opts.corner_surround, closed))
        .collect();

    let mut marks = vec![false; n];
    for i in 0..n {
        if alpha[i] < always_threshold {
            marks[i] = true;
            continue;
        }
        if !candidate_tier_enabled || alpha[i] >= threshold {
            continue;
        }
        let surround = opts.corner_surround as isize;
        let ni = n as isize;
        let is_local_min = (1..=surround).all(|k| {
            let j_plus = neighbor_index(i as isize, k, ni, closed);
            let j_minus = neighbor_index(i as isize, -k, ni, closed);
            !beats(alpha[j_plus], j_plus, alpha[i], i) && !beats(alpha[j_minus], j_minus, alpha[i], i)
        });
        if is_local_min {
            marks[i] = true;
        }
    }

    if !closed {
        marks[0] = true;
        marks[n - 1] = true;
    }

    if opts.remove_adj_corners {
        collapse_adjacent_corners(&mut marks, &alpha, closed);
    }

    marks
}

/// Does candidate `(alpha_j, j)` beat `(alpha_i, i)` as the smaller alpha,
/// with ties broken toward the earlier index?
fn beats(alpha_j: f64, j: usize, alpha_i: f64, i: usize) -> bool {
    alpha_j < alpha_i || (alpha_j == alpha_i && j < i)
}

/// Collapse runs of adjacent marked corners, keeping only the one with the
/// smallest `alpha` in each run (ties kept at the earliest index).
fn collapse_adjacent_corners(marks: &mut [bool], alpha: &[f64], closed: bool) {
    let n = marks.len();
    if n == 0 {
        return;
    }
    let mut visited = vec![false; n];
    let mut i = 0usize;
    while i < n {
        if !marks[i] || visited[i] {
            i += 1;
            continue;
        }
        let mut run = vec![i];
        visited[i] = true;
        let mut j = i;
        loop {
            let next = if closed { (j + 1) % n } else { j + 1 };
            if next >= n || !marks[next] || visited[next] || (closed && next == i) {
                break;
            }
            run.push(next);
            visited[next] = true;
            j = next;
        }
        if run.len() > 1 {
            let keep = *run
                .iter()
                .min_by(|&&a, &&b| alpha[a].partial_cmp(&alpha[b]).unwrap())
                .unwrap();
            for &idx in &run {
                marks[idx] = idx == keep;
            }
        }
        i += 1;
    }
}
