//! Axis-aligned spatial domain.
//!
//! A [`SpatialDomain`] is the physical box a grid occupies: an origin (the
//! minimum corner) plus a non-negative extent along each axis. Both are
//! finite on every axis; construction, mutation and deserialization all
//! enforce this.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::{Result, VoxelError};

/// An axis-aligned box described by its minimum corner and extent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawDomain")]
pub struct SpatialDomain {
    origin: Vec3,
    extent: Vec3,
}

/// Unvalidated wire form of [`SpatialDomain`].
#[derive(Deserialize)]
struct RawDomain {
    origin: Vec3,
    extent: Vec3,
}

impl TryFrom<RawDomain> for SpatialDomain {
    type Error = VoxelError;

    fn try_from(raw: RawDomain) -> Result<Self> {
        Self::new(raw.origin, raw.extent)
    }
}

fn validate(origin: Vec3, extent: Vec3) -> Result<()> {
    if !origin.is_finite() {
        return Err(VoxelError::InvalidOrigin { origin });
    }
    if !extent.is_finite() || extent.cmplt(Vec3::ZERO).any() {
        return Err(VoxelError::InvalidExtent { extent });
    }
    Ok(())
}

impl Default for SpatialDomain {
    fn default() -> Self {
        Self::unit()
    }
}

impl SpatialDomain {
    /// Creates a domain from an origin and extent.
    ///
    /// Returns an error if the origin is not finite, or if any extent
    /// component is negative or not finite.
    pub fn new(origin: Vec3, extent: Vec3) -> Result<Self> {
        validate(origin, extent)?;
        Ok(Self { origin, extent })
    }

    /// Creates a domain spanning two arbitrary corner points.
    ///
    /// Fails like [`new`](Self::new) when a corner is not finite or the
    /// corners are too far apart for the extent to be represented.
    pub fn from_corners(a: Vec3, b: Vec3) -> Result<Self> {
        if !a.is_finite() || !b.is_finite() {
            return Err(VoxelError::InvalidOrigin { origin: a.min(b) });
        }
        let min = a.min(b);
        Self::new(min, a.max(b) - min)
    }

    /// The unit cube at the world origin.
    #[must_use]
    pub fn unit() -> Self {
        Self {
            origin: Vec3::ZERO,
            extent: Vec3::ONE,
        }
    }

    /// Returns the minimum corner.
    #[must_use]
    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    /// Returns the per-axis lengths.
    #[must_use]
    pub fn extent(&self) -> Vec3 {
        self.extent
    }

    /// Alias of [`origin`](Self::origin).
    #[must_use]
    pub fn start(&self) -> Vec3 {
        self.origin
    }

    /// Returns the maximum corner.
    #[must_use]
    pub fn end(&self) -> Vec3 {
        self.origin + self.extent
    }

    #[must_use]
    pub fn center(&self) -> Vec3 {
        self.origin + self.extent * 0.5
    }

    #[must_use]
    pub fn volume(&self) -> f32 {
        self.extent.x * self.extent.y * self.extent.z
    }

    #[must_use]
    pub fn min_length(&self) -> f32 {
        self.extent.min_element()
    }

    #[must_use]
    pub fn max_length(&self) -> f32 {
        self.extent.max_element()
    }

    /// Returns the eight corners in marching cubes order.
    ///
    /// Bottom face (`z = start`) counter-clockwise as 0..4, then the top face
    /// directly above as 4..8.
    #[must_use]
    pub fn corners(&self) -> [Vec3; 8] {
        let s = self.start();
        let e = self.end();
        [
            Vec3::new(s.x, s.y, s.z),
            Vec3::new(e.x, s.y, s.z),
            Vec3::new(e.x, e.y, s.z),
            Vec3::new(s.x, e.y, s.z),
            Vec3::new(s.x, s.y, e.z),
            Vec3::new(e.x, s.y, e.z),
            Vec3::new(e.x, e.y, e.z),
            Vec3::new(s.x, e.y, e.z),
        ]
    }

    /// Returns true if `p` lies strictly inside the box.
    #[must_use]
    pub fn is_interior(&self, p: Vec3) -> bool {
        p.cmpgt(self.start()).all() && p.cmplt(self.end()).all()
    }

    /// Returns true if the two boxes overlap with non-zero volume.
    #[must_use]
    pub fn intersects(&self, other: &Self) -> bool {
        let dist = (self.center() - other.center()).abs();
        let reach = (self.extent + other.extent) * 0.5;
        dist.cmplt(reach).all()
    }

    /// Returns the overlapping region of two boxes, if any.
    #[must_use]
    pub fn overlap(&self, other: &Self) -> Option<Self> {
        if !self.intersects(other) {
            return None;
        }
        let min = self.start().max(other.start());
        let max = self.end().min(other.end());
        Self::from_corners(min, max).ok()
    }

    /// Moves the box by `v`.
    ///
    /// Leaves the box untouched and returns an error if the new origin would
    /// not be finite.
    pub fn translate(&mut self, v: Vec3) -> Result<&mut Self> {
        let origin = self.origin + v;
        validate(origin, self.extent)?;
        self.origin = origin;
        Ok(self)
    }

    /// Scales the extent component-wise, keeping the origin fixed.
    ///
    /// Negative factors are folded to their magnitude. Leaves the box
    /// untouched and returns an error if the new extent would not be finite.
    pub fn scale(&mut self, s: Vec3) -> Result<&mut Self> {
        let extent = self.extent * s.abs();
        validate(self.origin, extent)?;
        self.extent = extent;
        Ok(self)
    }
}
