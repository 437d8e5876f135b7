//! Geometric primitives: real-coordinate points, vector arithmetic, and
//! cubic Bezier evaluation via de Casteljau's algorithm.
//!
//! All geometry operates in R^3 (`z` is typically 0) so that tangent
//! computation has a uniform representation regardless of whether a future
//! caller needs the third axis; every other subsystem in this crate treats
//! `z` as just another component.

use serde::{Deserialize, Serialize};

/// A point (or free vector) in R^3, double precision throughout.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point {
    pub const ZERO: Point = Point {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn xy(x: f64, y: f64) -> Self {
        Self::new(x, y, 0.0)
    }

    pub fn add(self, other: Point) -> Point {
        Point::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }

    pub fn sub(self, other: Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }

    pub fn scale(self, s: f64) -> Point {
        Point::new(self.x * s, self.y * s, self.z * s)
    }

    pub fn dot(self, other: Point) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn magnitude(self) -> f64 {
        self.dot(self).sqrt()
    }

    pub fn distance_to(self, other: Point) -> f64 {
        self.sub(other).magnitude()
    }

    /// Unit vector in the direction of `self`, or `None` if `self` is
    /// (numerically) the zero vector.
    pub fn normalize(self) -> Option<Point> {
        let m = self.magnitude();
        if m < 1e-12 {
            None
        } else {
            Some(self.scale(1.0 / m))
        }
    }

    /// Angle between two vectors in radians, in `[0, pi]`. Returns `0` if
    /// either vector is (numerically) zero-length, since no rotation is
    /// measurable between a vector and a point.
    pub fn angle_between(self, other: Point) -> f64 {
        let (Some(a), Some(b)) = (self.normalize(), other.normalize()) else {
            return 0.0;
        };
        a.dot(b).clamp(-1.0, 1.0).acos()
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl std::ops::Add for Point {
    type Output = Point;
    fn add(self, rhs: Point) -> Point {
        Point::add(self, rhs)
    }
}

impl std::ops::Sub for Point {
    type Output = Point;
    fn sub(self, rhs: Point) -> Point {
        Point::sub(self, rhs)
    }
}

impl std::ops::Mul<f64> for Point {
    type Output = Point;
    fn mul(self, rhs: f64) -> Point {
        Point::scale(self, rhs)
    }
}

/// Evaluate a cubic Bezier curve at parameter `t` via de Casteljau's
/// algorithm (Schneider, Graphics Gems, p.37-ish construction).
pub fn evaluate_cubic(p0: Point, p1: Point, p2: Point, p3: Point, t: f64) -> Point {
    let ab = lerp(p0, p1, t);
    let bc = lerp(p1, p2, t);
    let cd = lerp(p2, p3, t);
    let abc = lerp(ab, bc, t);
    let bcd = lerp(bc, cd, t);
    lerp(abc, bcd, t)
}

/// First derivative of the cubic Bezier at `t`.
pub fn derivative_cubic(p0: Point, p1: Point, p2: Point, p3: Point, t: f64) -> Point {
    let one_minus_t = 1.0 - t;
    (p1 - p0) * (3.0 * one_minus_t * one_minus_t)
        + (p2 - p1) * (6.0 * one_minus_t * t)
        + (p3 - p2) * (3.0 * t * t)
}

/// Second derivative of the cubic Bezier at `t`.
pub fn second_derivative_cubic(p0: Point, p1: Point, p2: Point, p3: Point, t: f64) -> Point {
    let one_minus_t = 1.0 - t;
    (p2 - p1 * 2.0 + p0) * (6.0 * one_minus_t) + (p3 - p2 * 2.0 + p1) * (6.0 * t)
}

fn lerp(a: Point, b: Point, t: f64) -> Point {
    a * (1.0 - t) + b * t
}

/// Perpendicular distance from `p` to the infinite line through
/// `chord_start`/`chord_end`. If the chord is degenerate (zero length),
/// returns the distance from `p` to `chord_start`.
pub fn perpendicular_distance_to_chord(p: Point, chord_start: Point, chord_end: Point) -> f64 {
    let chord = chord_end - chord_start;
    let Some(dir) = chord.normalize() else {
        return p.distance_to(chord_start);
    };
    let to_p = p - chord_start;
    let projection = dir * to_p.dot(dir);
    (to_p - projection).magnitude()
}
