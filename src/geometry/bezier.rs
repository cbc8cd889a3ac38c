//! Hermite endpoint data and cubic Bezier curves.
//!
//! Each mesh element contributes one [`RawSegment`]: the position and the
//! first-coordinate derivative sampled at both element ends. The Hermite form
//! `(h0, v0, h1, v1)` converts to Bezier control points by
//!
//! ```text
//! b0 = h0
//! b1 = h0 + v0 / 3
//! b2 = h1 - v1 / 3
//! b3 = h1
//! ```

use crate::geometry::point::{Point2, Vector2};
use serde::{Deserialize, Serialize};

/// Position and tangent sampled at one end of one element.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RawEndpoint {
    pub position: Point2,
    pub tangent: Vector2,
}

impl RawEndpoint {
    #[inline]
    pub const fn new(position: Point2, tangent: Vector2) -> Self {
        Self { position, tangent }
    }
}

/// Both ends of one element, in element parameter order.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RawSegment {
    pub start: RawEndpoint,
    pub end: RawEndpoint,
}

impl RawSegment {
    #[inline]
    pub const fn new(start: RawEndpoint, end: RawEndpoint) -> Self {
        Self { start, end }
    }

    /// Bezier form of this segment.
    #[inline]
    pub fn to_bezier(&self) -> BezierCurve {
        BezierCurve::from_hermite(&self.start, &self.end)
    }
}

/// Cubic Bezier curve given by its four control points.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BezierCurve {
    pub b0: Point2,
    pub b1: Point2,
    pub b2: Point2,
    pub b3: Point2,
}

impl BezierCurve {
    #[inline]
    pub const fn new(b0: Point2, b1: Point2, b2: Point2, b3: Point2) -> Self {
        Self { b0, b1, b2, b3 }
    }

    /// Hermite-to-Bezier basis change.
    pub fn from_hermite(start: &RawEndpoint, end: &RawEndpoint) -> Self {
        Self {
            b0: start.position,
            b1: start.position + start.tangent / 3.0,
            b2: end.position - end.tangent / 3.0,
            b3: end.position,
        }
    }

    /// First control point; the curve's start.
    #[inline]
    pub fn start(&self) -> Point2 {
        self.b0
    }

    /// Last control point; the curve's end.
    #[inline]
    pub fn end(&self) -> Point2 {
        self.b3
    }

    #[inline]
    pub fn control_points(&self) -> [Point2; 4] {
        [self.b0, self.b1, self.b2, self.b3]
    }

    /// Evaluate the curve at `t` in `[0, 1]`.
    pub fn point_at(&self, t: f64) -> Point2 {
        let s = 1.0 - t;
        let w = [s * s * s, 3.0 * s * s * t, 3.0 * s * t * t, t * t * t];
        let pts = self.control_points();
        let x: f64 = pts.iter().zip(w).map(|(p, w)| p.x * w).sum();
        let y: f64 = pts.iter().zip(w).map(|(p, w)| p.y * w).sum();
        Point2::new(x, y)
    }
}

/// Bezier curves for a batch of segments, preserving order.
pub fn bezier_curves(segments: &[RawSegment]) -> Vec<BezierCurve> {
    segments.iter().map(RawSegment::to_bezier).collect()
}
