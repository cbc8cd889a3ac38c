//! Quantized point keys.
//!
//! A point is mapped to an integer key by multiplying each coordinate by the
//! reciprocal of a [`Tolerance`] and truncating toward zero. Two points are
//! considered the same iff their keys are equal, which turns approximate
//! equality into hashing.
//!
//! The scale must come from a tolerance computed over the batch the keys are
//! compared within. Keys built from different tolerances are not comparable.

use crate::geometry::point::Point2;
use crate::geometry::tolerance::Tolerance;
use hashbrown::HashMap;
use std::fmt;

/// Integer key of a point under a given scale.
///
/// Each coordinate is stored as the bit pattern of its truncated scaled
/// value. Truncated floats are whole numbers, so the key is exact at any
/// magnitude instead of saturating like a fixed-width integer cast.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct PointKey {
    x: u64,
    y: u64,
}

impl PointKey {
    /// Quantize `point` with the multiplying factor `scale`.
    #[inline]
    pub fn new(point: Point2, scale: f64) -> Self {
        Self {
            x: truncated_bits(point.x * scale),
            y: truncated_bits(point.y * scale),
        }
    }

    /// Truncated scaled x coordinate.
    #[inline]
    pub fn x(self) -> f64 {
        f64::from_bits(self.x)
    }

    /// Truncated scaled y coordinate.
    #[inline]
    pub fn y(self) -> f64 {
        f64::from_bits(self.y)
    }
}

/// `-0.0` folds into `0.0` so both signs of a vanishing value share a key.
fn truncated_bits(v: f64) -> u64 {
    let t = v.trunc();
    if t == 0.0 { 0.0f64.to_bits() } else { t.to_bits() }
}

impl fmt::Display for PointKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:.0}, {:.0}]", self.x(), self.y())
    }
}

impl fmt::Debug for PointKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PointKey{self}")
    }
}

/// Deduplicating point registry under one tolerance.
///
/// Each distinct key receives a canonical index in order of first
/// insertion; later points with an equal key resolve to that index and keep
/// the first point's coordinates.
#[derive(Clone, Debug)]
pub struct QuantizedPointIndex {
    scale: f64,
    indices: HashMap<PointKey, usize>,
    points: Vec<Point2>,
}

impl QuantizedPointIndex {
    /// Creates an empty index for `tolerance`.
    pub fn new(tolerance: Tolerance) -> Self {
        Self {
            scale: tolerance.scale(),
            indices: HashMap::new(),
            points: Vec::new(),
        }
    }

    /// The multiplying factor used for keys.
    #[inline]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Key of `point` under this index's scale.
    #[inline]
    pub fn key(&self, point: Point2) -> PointKey {
        PointKey::new(point, self.scale)
    }

    /// Registers `point`, returning its canonical index.
    pub fn insert(&mut self, point: Point2) -> usize {
        let key = self.key(point);
        let next = self.points.len();
        let index = *self.indices.entry(key).or_insert(next);
        if index == next {
            self.points.push(point);
        }
        index
    }

    /// Canonical index of a previously registered point.
    pub fn get(&self, point: Point2) -> Option<usize> {
        self.indices.get(&self.key(point)).copied()
    }

    /// Number of canonical points.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Canonical points in index order.
    #[inline]
    pub fn points(&self) -> &[Point2] {
        &self.points
    }
}
