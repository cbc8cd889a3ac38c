//! Geometry utilities for mesh-flatmap.
//!
//! Planar points, the adaptive tolerance, quantized point keys and the
//! Hermite-to-Bezier curve builder.

pub mod bezier;
pub mod point;
pub mod quantize;
pub mod tolerance;

pub use bezier::{BezierCurve, RawEndpoint, RawSegment};
pub use point::{Point2, Vector2};
pub use quantize::{PointKey, QuantizedPointIndex};
pub use tolerance::Tolerance;
