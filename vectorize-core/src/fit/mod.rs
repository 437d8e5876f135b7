//! The fitter: tangent estimation, corner detection, smoothing, cubic
//! least-squares fitting with subdivision and reparameterization, and line
//! reversion — glued together by [`driver::fitted_splines`].

pub mod bezier;
pub mod corners;
pub mod driver;
pub mod reparam;
pub mod reversion;
pub mod smooth;
pub mod subdivide;
pub mod tangent;

pub use driver::fitted_splines;

use crate::geom::Point;
use serde::{Deserialize, Serialize};

/// A single curve segment: a straight line (two points) or a cubic Bezier
/// (four points), tagged by degree. Start and end points are shared with
/// the previous/next segment in a [`SplineList`] (C0 continuity along one
/// outline; C1 is not required).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Spline {
    Line { start: Point, end: Point },
    Cubic {
        start: Point,
        control1: Point,
        control2: Point,
        end: Point,
    },
}

impl Spline {
    pub fn start(&self) -> Point {
        match self {
            Spline::Line { start, .. } => *start,
            Spline::Cubic { start, .. } => *start,
        }
    }

    pub fn end(&self) -> Point {
        match self {
            Spline::Line { end, .. } => *end,
            Spline::Cubic { end, .. } => *end,
        }
    }

    /// Evaluate the spline at parameter `t` in `[0, 1]`.
    pub fn evaluate(&self, t: f64) -> Point {
        match self {
            Spline::Line { start, end } => *start + (*end - *start) * t,
            Spline::Cubic {
                start,
                control1,
                control2,
                end,
            } => crate::geom::evaluate_cubic(*start, *control1, *control2, *end, t),
        }
    }

    /// `true` if every coordinate of every point defining this spline is
    /// finite (spec.md §7 invariant: no NaN/Inf in emitted splines).
    pub fn is_finite(&self) -> bool {
        match self {
            Spline::Line { start, end } => start.is_finite() && end.is_finite(),
            Spline::Cubic {
                start,
                control1,
                control2,
                end,
            } => {
                start.is_finite() && control1.is_finite() && control2.is_finite() && end.is_finite()
            }
        }
    }
}

/// Ordered sequence of splines representing one fitted outline. Closed if
/// the originating pixel outline was closed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SplineList {
    pub splines: Vec<Spline>,
    pub closed: bool,
}

impl SplineList {
    pub fn new(closed: bool) -> Self {
        Self {
            splines: Vec::new(),
            closed,
        }
    }

    pub fn push(&mut self, spline: Spline) {
        self.splines.push(spline);
    }

    pub fn extend(&mut self, other: SplineList) {
        self.splines.extend(other.splines);
    }

    pub fn is_empty(&self) -> bool {
        self.splines.is_empty()
    }
}

/// Ordered sequence of spline lists; the final pipeline product.
pub type SplineListArray = Vec<SplineList>;
