//! Sample types that can be stored in a [`Volume`](crate::Volume).
//!
//! Floating point samples accumulate with plain IEEE addition. Integer samples
//! (8-bit density volumes and friends) accumulate with saturating arithmetic so
//! overlapping blend brushes clip at the type's range instead of wrapping.

#![allow(clippy::cast_possible_truncation, clippy::cast_lossless)]

use std::fmt::Debug;

/// A scalar sample stored in a volume.
pub trait Scalar: Copy + PartialOrd + Debug + Default + Send + Sync + 'static {
    /// Adds `rhs` to `self` using the type's accumulation policy.
    #[must_use]
    fn accumulate(self, rhs: Self) -> Self;

    /// Converts to `f32`.
    fn to_f32(self) -> f32;

    /// Converts to `f64` without rounding. Interpolation weights are computed at this width.
    fn to_f64(self) -> f64;

    /// Converts from `f32`. Integer types saturate at their range and map NaN to zero.
    fn from_f32(v: f32) -> Self;
}

impl Scalar for f32 {
    #[inline]
    fn accumulate(self, rhs: Self) -> Self {
        self + rhs
    }

    #[inline]
    fn to_f32(self) -> f32 {
        self
    }

    #[inline]
    fn to_f64(self) -> f64 {
        f64::from(self)
    }

    #[inline]
    fn from_f32(v: f32) -> Self {
        v
    }
}

impl Scalar for f64 {
    #[inline]
    fn accumulate(self, rhs: Self) -> Self {
        self + rhs
    }

    #[inline]
    fn to_f32(self) -> f32 {
        self as f32
    }

    #[inline]
    fn to_f64(self) -> f64 {
        self
    }

    #[inline]
    fn from_f32(v: f32) -> Self {
        f64::from(v)
    }
}

/// Returns the smallest and largest of `values`, skipping unordered samples (NaN).
///
/// `None` when nothing comparable is left.
pub(crate) fn ordered_range<T: Scalar>(values: &[T]) -> Option<(T, T)> {
    let mut ordered = values.iter().copied().filter(|v| v.partial_cmp(v).is_some());
    let first = ordered.next()?;
    Some(ordered.fold((first, first), |(min, max), v| {
        (if v < min { v } else { min }, if v > max { v } else { max })
    }))
}

macro_rules! impl_saturating_scalar {
    ($($t:ty),*) => {
        $(
            impl Scalar for $t {
                #[inline]
                fn accumulate(self, rhs: Self) -> Self {
                    self.saturating_add(rhs)
                }

                #[inline]
                fn to_f32(self) -> f32 {
                    self as f32
                }

                #[inline]
                fn to_f64(self) -> f64 {
                    f64::from(self)
                }

                #[inline]
                fn from_f32(v: f32) -> Self {
                    // `as` from float saturates and maps NaN to 0.
                    v as $t
                }
            }
        )*
    };
}

impl_saturating_scalar!(u8, u16, i16);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_float_accumulate() {
        assert_eq!(1.5_f32.accumulate(2.0), 3.5);
        assert_eq!((-1.0_f64).accumulate(0.25), -0.75);
    }

    #[test]
    fn test_u8_accumulate_saturates() {
        assert_eq!(200_u8.accumulate(100), 255);
        assert_eq!(10_u8.accumulate(5), 15);
    }

    #[test]
    fn test_i16_accumulate_saturates() {
        assert_eq!(i16::MAX.accumulate(1), i16::MAX);
        assert_eq!(i16::MIN.accumulate(-1), i16::MIN);
    }

    #[test]
    fn test_to_f64_is_exact() {
        assert_eq!((1.0e10_f64 + 1.0).to_f64() - 1.0e10, 1.0);
        assert_eq!(0.1_f32.to_f64(), f64::from(0.1_f32));
        assert_eq!(u16::MAX.to_f64(), 65535.0);
        assert_eq!(i16::MIN.to_f64(), -32768.0);
    }

    #[test]
    fn test_ordered_range_skips_nan() {
        assert_eq!(ordered_range(&[f32::NAN, 2.0, -1.0]), Some((-1.0, 2.0)));
        assert_eq!(ordered_range(&[2.0, f32::NAN, -1.0]), Some((-1.0, 2.0)));
        assert_eq!(ordered_range(&[f64::NAN, f64::NAN]), None);
        assert_eq!(ordered_range(&[3_u8, 9, 1]), Some((1, 9)));
    }

    #[test]
    fn test_from_f32_saturates() {
        assert_eq!(u8::from_f32(300.0), 255);
        assert_eq!(u8::from_f32(-3.0), 0);
        assert_eq!(u8::from_f32(f32::NAN), 0);
        assert_eq!(u16::from_f32(12.7), 12);
    }
}
