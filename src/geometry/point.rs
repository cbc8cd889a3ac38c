//! Planar value types used by the flatmap pipeline.
//!
//! Points carry no identity beyond their coordinates. Equality between two
//! points produced by independent evaluations is never tested exactly; see
//! [`crate::geometry::quantize`] for the tolerance-keyed comparison.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

/// A 2-D coordinate.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point2 {
    pub x: f64,
    pub y: f64,
}

/// A 2-D displacement, e.g. an element tangent.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vector2 {
    pub x: f64,
    pub y: f64,
}

impl Point2 {
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Builds a point from the leading two components of a field value.
    ///
    /// Returns `None` when fewer than two components are present.
    pub fn from_components(values: &[f64]) -> Option<Self> {
        match values {
            [x, y, ..] => Some(Self::new(*x, *y)),
            _ => None,
        }
    }

    /// Euclidean distance to `other`.
    #[inline]
    pub fn distance(self, other: Point2) -> f64 {
        (self - other).length()
    }

    /// Both coordinates, in order.
    #[inline]
    pub fn components(self) -> [f64; 2] {
        [self.x, self.y]
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Vector2 {
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Builds a vector from the leading two components of a derivative value.
    pub fn from_components(values: &[f64]) -> Option<Self> {
        match values {
            [x, y, ..] => Some(Self::new(*x, *y)),
            _ => None,
        }
    }

    #[inline]
    pub fn dot(self, other: Vector2) -> f64 {
        self.x * other.x + self.y * other.y
    }

    #[inline]
    pub fn length(self) -> f64 {
        self.x.hypot(self.y)
    }
}

impl fmt::Display for Point2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl Add<Vector2> for Point2 {
    type Output = Point2;
    #[inline]
    fn add(self, rhs: Vector2) -> Point2 {
        Point2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub<Vector2> for Point2 {
    type Output = Point2;
    #[inline]
    fn sub(self, rhs: Vector2) -> Point2 {
        Point2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Sub for Point2 {
    type Output = Vector2;
    #[inline]
    fn sub(self, rhs: Point2) -> Vector2 {
        Vector2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Vector2 {
    type Output = Vector2;
    #[inline]
    fn mul(self, rhs: f64) -> Vector2 {
        Vector2::new(self.x * rhs, self.y * rhs)
    }
}

impl Div<f64> for Vector2 {
    type Output = Vector2;
    #[inline]
    fn div(self, rhs: f64) -> Vector2 {
        Vector2::new(self.x / rhs, self.y / rhs)
    }
}

impl Neg for Vector2 {
    type Output = Vector2;
    #[inline]
    fn neg(self) -> Vector2 {
        Vector2::new(-self.x, -self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_components_takes_leading_pair() {
        assert_eq!(
            Point2::from_components(&[1.0, 2.0, 3.0]),
            Some(Point2::new(1.0, 2.0))
        );
        assert_eq!(Point2::from_components(&[1.0]), None);
        assert_eq!(Vector2::from_components(&[]), None);
    }

    #[test]
    fn point_vector_arithmetic() {
        let p = Point2::new(1.0, 1.0);
        let v = Vector2::new(3.0, 6.0);
        assert_eq!(p + v / 3.0, Point2::new(2.0, 3.0));
        assert_eq!(p - v / 3.0, Point2::new(0.0, -1.0));
        assert_eq!(Point2::new(4.0, 5.0) - p, Vector2::new(3.0, 4.0));
        assert_eq!(p.distance(Point2::new(4.0, 5.0)), 5.0);
    }
}
