//! [`fitted_splines`]: the entry point tying together the whole per-outline
//! state machine from spec.md §4.10 — corner marking, rotation to a corner,
//! smoothing, corner-to-corner partitioning, and per-arc fitting.

use super::{corners, smooth, subdivide, Spline, SplineList, SplineListArray};
use crate::error::VectorizeResult;
use crate::geom::Point;
use crate::options::FittingOptions;
use crate::outline::{PixelOutline, PixelOutlineList};
use log::debug;

/// Fit every pixel outline independently, producing one [`SplineList`] per
/// outline in the same order. Outlines with fewer than two points carry no
/// recoverable curve and are dropped (spec.md §9, "outlines under 3 points").
pub fn fitted_splines(outlines: &PixelOutlineList, opts: &FittingOptions) -> VectorizeResult<SplineListArray> {
    opts.validate()?;
    debug!("fitted_splines: fitting {} pixel outline(s)", outlines.len());

    #[cfg(feature = "parallel")]
    let fitted: Vec<SplineList> = {
        use rayon::prelude::*;
        outlines.par_iter().map(|o| fit_one_outline(o, opts)).collect()
    };
    #[cfg(not(feature = "parallel"))]
    let fitted: Vec<SplineList> = outlines.iter().map(|o| fit_one_outline(o, opts)).collect();

    let result: SplineListArray = fitted.into_iter().filter(|list| !list.is_empty()).collect();
    debug!("fitted_splines: produced {} spline list(s)", result.len());
    Ok(result)
}

fn fit_one_outline(outline: &PixelOutline, opts: &FittingOptions) -> SplineList {
    let closed = !outline.open;
    let mut points: Vec<Point> = outline.points.iter().map(|&p| p.into()).collect();

    if points.len() < 2 {
        return SplineList::new(closed);
    }
    if points.len() == 2 {
        let mut list = SplineList::new(closed);
        list.push(Spline::Line {
            start: points[0],
            end: points[1],
        });
        return list;
    }

    let mut marks = corners::detect_corners(&points, closed, opts);
    debug!(
        "fit_one_outline: {} points, {} corners, closed={closed}",
        points.len(),
        marks.iter().filter(|&&m| m).count()
    );

    // Rotating a closed outline to start at a corner keeps every fitted arc
    // within a single pass through `points` — no arc straddles the index-0
    // seam unless the whole outline has no corner at all.
    if closed {
        if let Some(first_corner) = marks.iter().position(|&m| m) {
            points.rotate_left(first_corner);
            marks.rotate_left(first_corner);
        }
    }

    let arcs = partition_into_arcs(&points, &marks, closed);

    let mut result = SplineList::new(closed);
    for mut arc in arcs {
        if arc.len() > 2 {
            let last = arc.len() - 1;
            smooth::smooth_arc(&mut arc, 0, last, false, opts);
        }
        result.extend(subdivide::fit_arc(&arc, opts));
    }
    result
}

/// Split `points` into corner-to-corner arcs, each an owned, independent
/// point sequence sharing its endpoint with the previous/next arc. Treating
/// every arc as its own closed=false sequence is deliberate: a corner is by
/// definition a tangent discontinuity, so neither smoothing nor fitting
/// should ever look across it.
fn partition_into_arcs(points: &[Point], marks: &[bool], closed: bool) -> Vec<Vec<Point>> {
    let n = points.len();
    let mut corner_idxs: Vec<usize> = (0..n).filter(|&i| marks[i]).collect();
    if corner_idxs.is_empty() {
        // A closed outline with no detected corner is one smooth loop;
        // split it arbitrarily at index 0 so it still becomes one arc.
        corner_idxs.push(0);
    }

    let mut arcs: Vec<Vec<Point>> = corner_idxs
        .windows(2)
        .map(|w| points[w[0]..=w[1]].to_vec())
        .collect();

    if closed {
        let first = corner_idxs[0];
        let last = *corner_idxs.last().unwrap();
        let mut wrap: Vec<Point> = points[last..].to_vec();
        wrap.extend_from_slice(&points[..=first]);
        arcs.push(wrap);
    }

    arcs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bitmap::Rgb;
    use crate::outline::PixelPoint;

    fn square_outline() -> PixelOutline {
        // 4x4 filled square, 12-pixel perimeter, clockwise from top-left.
        let coords = [
            (0, 0),
            (1, 0),
            (2, 0),
            (3, 0),
            (3, 1),
            (3, 2),
            (3, 3),
            (2, 3),
            (1, 3),
            (0, 3),
            (0, 2),
            (0, 1),
        ];
        PixelOutline {
            points: coords.iter().map(|&(x, y)| PixelPoint::new(x, y)).collect(),
            open: false,
            color: Rgb::gray(0),
        }
    }

    #[test]
    fn square_fits_to_a_closed_spline_list() {
        let outlines = vec![square_outline()];
        let opts = FittingOptions::default();
        let result = fitted_splines(&outlines, &opts).unwrap();
        assert_eq!(result.len(), 1);
        assert!(result[0].closed);
        assert!(!result[0].is_empty());
        for spline in &result[0].splines {
            assert!(spline.is_finite());
        }
    }

    #[test]
    fn closed_outline_first_spline_start_equals_last_spline_end_exactly() {
        let outlines = vec![square_outline()];
        let opts = FittingOptions::default();
        let result = fitted_splines(&outlines, &opts).unwrap();
        let list = &result[0];
        assert!(list.closed);
        let first_start = list.splines.first().unwrap().start();
        let last_end = list.splines.last().unwrap().end();
        assert_eq!(first_start, last_end);
    }

    #[test]
    fn two_point_outline_is_a_single_line() {
        let outline = PixelOutline {
            points: vec![PixelPoint::new(0, 0), PixelPoint::new(5, 5)],
            open: true,
            color: Rgb::gray(0),
        };
        let result = fitted_splines(&[outline], &FittingOptions::default()).unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].splines.len(), 1);
        assert!(matches!(result[0].splines[0], Spline::Line { .. }));
    }

    #[test]
    fn single_point_outline_is_dropped() {
        let outline = PixelOutline {
            points: vec![PixelPoint::new(0, 0)],
            open: false,
            color: Rgb::gray(0),
        };
        let result = fitted_splines(&[outline], &FittingOptions::default()).unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn invalid_options_are_rejected_before_any_fitting_runs() {
        let mut opts = FittingOptions::default();
        opts.error_threshold = -5.0;
        let err = fitted_splines(&[square_outline()], &opts).unwrap_err();
        assert!(matches!(err, crate::error::VectorizeError::InvalidOptions { .. }));
    }

    #[test]
    fn open_l_shape_produces_a_single_open_spline_list() {
        let mut coords = Vec::new();
        for i in 0..=8 {
            coords.push(PixelPoint::new(i, 0));
        }
        for i in 1..=8 {
            coords.push(PixelPoint::new(8, i));
        }
        let outline = PixelOutline {
            points: coords,
            open: true,
            color: Rgb::gray(0),
        };
        let result = fitted_splines(&[outline], &FittingOptions::default()).unwrap();
        assert_eq!(result.len(), 1);
        assert!(!result[0].closed);
        assert!(result[0].splines.len() >= 2, "L-shape should keep its corner");
    }
}
