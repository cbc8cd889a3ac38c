//! Adaptive numeric-equality tolerance.
//!
//! Coordinates reach the exporter in whatever units the source mesh was built
//! in, so "the same point" cannot be decided with a fixed epsilon. A
//! [`Tolerance`] is derived from the batch of numbers it will be applied to:
//!
//! - the smallest count of significant figures in the batch, never trusted
//!   below [`MIN_TRUSTED_SIGNIFICANT_FIGURES`];
//! - the largest decimal magnitude `ceil(log10(|n|))` in the batch, with
//!   values at or below `1e-8` counted as magnitude 0.
//!
//! The tolerance is `10^-(figures - magnitude - 2)` when that exponent is
//! positive, and `1e-8` otherwise.
//!
//! Significant figures are counted on Rust's shortest round-trip scientific
//! representation (`{:e}`), which is platform independent.
//!
//! The tolerance is stored as its decimal exponent so that [`Tolerance::scale`]
//! is an exact power of ten rather than the rounded reciprocal of an inexact
//! `10^-k`; keys of short coordinates then land exactly on integers.

/// Fewer significant figures than this are never assumed, even when a value
/// happens to print short.
pub const MIN_TRUSTED_SIGNIFICANT_FIGURES: i32 = 14;

/// Tolerance returned when the batch magnitude leaves no usable precision.
pub const FALLBACK_TOLERANCE: f64 = 1e-8;

const FALLBACK_EXPONENT: i32 = 8;

/// Absolute values at or below this contribute magnitude 0.
const MAGNITUDE_FLOOR: f64 = 1e-8;

/// Digits reserved below the significant-figure budget.
const GUARD_DIGITS: i32 = 2;

/// A strictly positive, finite equality threshold `10^-exponent`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Tolerance {
    exponent: i32,
}

impl Tolerance {
    /// Derive a tolerance from a batch of numbers.
    ///
    /// Non-finite values are ignored. An empty batch behaves like a batch of
    /// short, unit-magnitude values.
    pub fn from_values<I>(values: I) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        let mut min_figures: Option<i32> = None;
        let mut max_magnitude: Option<i32> = None;
        for n in values.into_iter().filter(|n| n.is_finite()) {
            let figures = significant_figures(n) as i32;
            min_figures = Some(min_figures.map_or(figures, |m| m.min(figures)));
            let mag = magnitude(n);
            max_magnitude = Some(max_magnitude.map_or(mag, |m| m.max(mag)));
        }

        let figures = min_figures
            .unwrap_or(MIN_TRUSTED_SIGNIFICANT_FIGURES)
            .max(MIN_TRUSTED_SIGNIFICANT_FIGURES);
        let exponent = figures - max_magnitude.unwrap_or(0) - GUARD_DIGITS;
        Tolerance {
            exponent: if exponent > 0 {
                exponent
            } else {
                FALLBACK_EXPONENT
            },
        }
    }

    /// Derive a tolerance from every coordinate of a set of points.
    pub fn from_points<I>(points: I) -> Self
    where
        I: IntoIterator<Item = crate::geometry::point::Point2>,
    {
        Self::from_values(points.into_iter().flat_map(|p| p.components()))
    }

    /// The absolute tolerance.
    #[inline]
    pub fn value(self) -> f64 {
        10f64.powi(-self.exponent)
    }

    /// Reciprocal of the tolerance; multiplies coordinates before
    /// quantization.
    #[inline]
    pub fn scale(self) -> f64 {
        10f64.powi(self.exponent)
    }

    /// Decimal exponent `k` of the tolerance `10^-k`.
    #[inline]
    pub fn exponent(self) -> i32 {
        self.exponent
    }
}

/// Count the significant figures of `n` in its shortest round-trip decimal
/// form. Zero counts as one figure.
pub fn significant_figures(n: f64) -> u32 {
    let repr = format!("{:e}", n.abs());
    let mantissa = repr.split('e').next().unwrap_or_default();
    let digits = mantissa
        .chars()
        .filter(char::is_ascii_digit)
        .collect::<String>();
    let trimmed = digits.trim_start_matches('0').trim_end_matches('0');
    trimmed.len().max(1) as u32
}

/// Decimal magnitude `ceil(log10(|n|))`, or 0 for values at or below `1e-8`.
pub fn magnitude(n: f64) -> i32 {
    let abs = n.abs();
    if abs > MAGNITUDE_FLOOR {
        abs.log10().ceil() as i32
    } else {
        0
    }
}
