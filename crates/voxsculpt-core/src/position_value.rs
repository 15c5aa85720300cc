//! A world position paired with its sampled value.

use glam::Vec3;

use crate::scalar::Scalar;

/// An immutable `(position, value)` sample.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PositionValue<T> {
    position: Vec3,
    value: T,
}

impl<T: Scalar> PositionValue<T> {
    #[must_use]
    pub fn new(position: Vec3, value: T) -> Self {
        Self { position, value }
    }

    #[must_use]
    pub fn position(&self) -> Vec3 {
        self.position
    }

    #[must_use]
    pub fn value(&self) -> T {
        self.value
    }

    /// Returns the point on the segment `self -> other` where the linear
    /// interpolation of the two values crosses `isolevel`.
    ///
    /// The result does not depend on argument order: the segment is always
    /// walked from the lower-valued endpoint. The weight is computed in `f64`,
    /// so `f64` samples that differ only far below `f32` precision still give
    /// a proper crossing. Equal values have no crossing and the lower-valued
    /// endpoint is returned instead of a NaN.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn interpolate(&self, isolevel: T, other: &Self) -> Vec3 {
        let (lo, hi) = if other.value < self.value {
            (other, self)
        } else {
            (self, other)
        };
        let a = lo.value.to_f64();
        let b = hi.value.to_f64();
        let denom = b - a;
        if denom == 0.0 {
            log::warn!(
                "degenerate edge at {} -> {} (both values {a}), snapping to lower endpoint",
                lo.position,
                hi.position
            );
            return lo.position;
        }
        let t = (isolevel.to_f64() - a) / denom;
        if !t.is_finite() {
            return lo.position;
        }
        lo.position + (t as f32) * (hi.position - lo.position)
    }
}
