//! Eight-corner cube sampled from a volume.

use glam::Vec3;

use crate::domain::SpatialDomain;
use crate::error::Result;
use crate::position_value::PositionValue;
use crate::scalar::{ordered_range, Scalar};

/// A cube of eight samples in marching cubes corner order.
///
/// ```text
///       7──────6
///      /│     /│
///     4─┼────5 │        +Z
///     │ 3────┼─2         │  +Y
///     │/     │/          │ /
///     0──────1           └───+X
/// ```
///
/// Corner positions are stored as given, so two cells sharing a grid point
/// report bit-identical positions for it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell<T> {
    corners: [Vec3; 8],
    values: [T; 8],
}

impl<T: Scalar> Cell<T> {
    /// Creates a cell whose corners are those of `space`.
    #[must_use]
    pub fn new(space: SpatialDomain, values: [T; 8]) -> Self {
        Self::with_corners(space.corners(), values)
    }

    #[must_use]
    pub fn with_corners(corners: [Vec3; 8], values: [T; 8]) -> Self {
        Self { corners, values }
    }

    /// Returns the box spanned by the cell's corner samples.
    pub fn space(&self) -> Result<SpatialDomain> {
        SpatialDomain::from_corners(self.corners[0], self.corners[6])
    }

    #[must_use]
    pub fn corners(&self) -> [Vec3; 8] {
        self.corners
    }

    #[must_use]
    pub fn values(&self) -> [T; 8] {
        self.values
    }

    /// Pairs each corner position with its value, in corner order.
    #[must_use]
    pub fn position_values(&self) -> [PositionValue<T>; 8] {
        std::array::from_fn(|i| PositionValue::new(self.corners[i], self.values[i]))
    }

    /// Returns the smallest and largest corner value.
    ///
    /// NaN corners are skipped wherever they sit. If every corner is NaN both
    /// bounds are NaN and the cell is never a boundary.
    #[must_use]
    pub fn value_range(&self) -> (T, T) {
        ordered_range(&self.values).unwrap_or((self.values[0], self.values[0]))
    }

    /// Returns true unless every corner is strictly below or strictly above `isolevel`.
    #[must_use]
    pub fn is_boundary(&self, isolevel: T) -> bool {
        let (min, max) = self.value_range();
        min <= isolevel && isolevel <= max
    }
}
