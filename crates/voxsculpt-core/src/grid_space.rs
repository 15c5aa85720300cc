//! Grid index space: a fixed resolution laid over a [`SpatialDomain`].
//!
//! Every sample of a grid sits at the centre of its unit box, so sample
//! `(ix, iy, iz)` lives at `origin + unit_size * (index + 0.5)`. Both brush
//! rasterization and surface extraction go through [`GridSpace::cell_center`]
//! so they agree on where a sample is.
//!
//! Samples are stored and visited with `x` outermost and `z` innermost; the
//! linear offset of `(ix, iy, iz)` is `(ix * ny + iy) * nz + iz`.

#![allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]

use glam::{UVec3, Vec3};
use serde::{Deserialize, Serialize};

use crate::domain::SpatialDomain;
use crate::error::{Result, VoxelError};

/// A resolution mapped onto a spatial domain.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawGridSpace")]
pub struct GridSpace {
    domain: SpatialDomain,
    resolution: UVec3,
}

#[derive(Deserialize)]
struct RawGridSpace {
    domain: SpatialDomain,
    resolution: UVec3,
}

impl TryFrom<RawGridSpace> for GridSpace {
    type Error = VoxelError;

    fn try_from(raw: RawGridSpace) -> Result<Self> {
        Self::new(raw.domain, raw.resolution)
    }
}

impl GridSpace {
    /// Creates a grid space.
    ///
    /// Returns [`VoxelError::InvalidResolution`] if any axis of `resolution` is zero.
    pub fn new(domain: SpatialDomain, resolution: UVec3) -> Result<Self> {
        if resolution.cmpeq(UVec3::ZERO).any() {
            return Err(VoxelError::InvalidResolution { resolution });
        }
        Ok(Self { domain, resolution })
    }

    /// Creates a grid space with the same resolution on every axis.
    pub fn new_uniform(domain: SpatialDomain, resolution: u32) -> Result<Self> {
        Self::new(domain, UVec3::splat(resolution))
    }

    #[must_use]
    pub fn domain(&self) -> &SpatialDomain {
        &self.domain
    }

    /// Returns the number of samples along each axis.
    #[must_use]
    pub fn resolution(&self) -> UVec3 {
        self.resolution
    }

    /// Returns the total number of samples.
    #[must_use]
    pub fn num_samples(&self) -> usize {
        self.resolution.x as usize * self.resolution.y as usize * self.resolution.z as usize
    }

    /// Returns the number of cells along each axis (one fewer than samples).
    #[must_use]
    pub fn cell_dim(&self) -> UVec3 {
        self.resolution.saturating_sub(UVec3::ONE)
    }

    /// Returns the total number of cells.
    #[must_use]
    pub fn num_cells(&self) -> usize {
        let c = self.cell_dim();
        c.x as usize * c.y as usize * c.z as usize
    }

    /// Returns the per-axis size of one unit box.
    #[must_use]
    pub fn unit_size(&self) -> Vec3 {
        self.domain.extent() / self.resolution.as_vec3()
    }

    #[must_use]
    pub fn unit_volume(&self) -> f32 {
        let u = self.unit_size();
        u.x * u.y * u.z
    }

    /// Returns the world position of sample `(ix, iy, iz)`.
    #[must_use]
    pub fn cell_center(&self, ix: u32, iy: u32, iz: u32) -> Vec3 {
        self.domain.origin() + self.normalized(ix, iy, iz)
    }

    /// Returns the position of sample `(ix, iy, iz)` relative to the origin.
    #[must_use]
    pub fn normalized(&self, ix: u32, iy: u32, iz: u32) -> Vec3 {
        self.unit_size() * (UVec3::new(ix, iy, iz).as_vec3() + Vec3::splat(0.5))
    }

    /// Returns every sample position in traversal order.
    #[must_use]
    pub fn cell_centers(&self) -> Vec<Vec3> {
        self.indices()
            .map(|i| self.cell_center(i.x, i.y, i.z))
            .collect()
    }

    /// Converts a world position to the index of the unit box containing it.
    ///
    /// Positions outside the domain clamp to the nearest boundary sample.
    #[must_use]
    pub fn to_index(&self, p: Vec3) -> UVec3 {
        let f = ((p - self.domain.origin()) / self.unit_size()).floor();
        // `max` drops NaN (zero-extent axes), then the upper clamp handles +inf.
        f.max(Vec3::ZERO)
            .min(self.cell_dim().as_vec3())
            .as_uvec3()
    }

    /// Returns true if `index` addresses a sample of this grid.
    #[must_use]
    pub fn contains_index(&self, index: UVec3) -> bool {
        index.cmplt(self.resolution).all()
    }

    /// Fails with [`VoxelError::IndexOutOfBounds`] unless `index` is a valid sample.
    pub fn check_index(&self, index: UVec3) -> Result<()> {
        if self.contains_index(index) {
            Ok(())
        } else {
            Err(VoxelError::IndexOutOfBounds {
                index,
                resolution: self.resolution,
            })
        }
    }

    /// Flattens a 3D sample index to a linear offset. The index is not checked.
    #[must_use]
    pub fn flatten(&self, ix: u32, iy: u32, iz: u32) -> usize {
        (ix as usize * self.resolution.y as usize + iy as usize) * self.resolution.z as usize
            + iz as usize
    }

    /// Unflattens a linear offset to a 3D sample index.
    #[must_use]
    pub fn unflatten(&self, offset: usize) -> UVec3 {
        let nz = self.resolution.z as usize;
        let ny = self.resolution.y as usize;
        let iz = offset % nz;
        let iy = (offset / nz) % ny;
        let ix = offset / (nz * ny);
        UVec3::new(ix as u32, iy as u32, iz as u32)
    }

    /// Iterates every sample index, `x` outermost and `z` innermost.
    pub fn indices(&self) -> impl Iterator<Item = UVec3> {
        let res = self.resolution;
        (0..res.x).flat_map(move |x| {
            (0..res.y).flat_map(move |y| (0..res.z).map(move |z| UVec3::new(x, y, z)))
        })
    }

    /// Returns a half-open index box `[start, end)` whose samples include every
    /// sample whose centre lies inside `region`.
    ///
    /// The box is padded by one sample on each side so callers that re-test
    /// membership exactly see the same set as a full sweep would.
    #[must_use]
    pub fn index_range_of(&self, region: &SpatialDomain) -> (UVec3, UVec3) {
        let unit = self.unit_size();
        let origin = self.domain.origin();
        let mut start = UVec3::ZERO;
        let mut end = self.resolution;
        for axis in 0..3 {
            if unit[axis] <= 0.0 {
                continue;
            }
            let res = self.resolution[axis] as f32;
            let lo = ((region.start()[axis] - origin[axis]) / unit[axis] - 0.5).floor() - 1.0;
            let hi = ((region.end()[axis] - origin[axis]) / unit[axis] - 0.5).ceil() + 2.0;
            start[axis] = lo.clamp(0.0, res) as u32;
            end[axis] = hi.clamp(0.0, res) as u32;
        }
        (start, end.max(start))
    }

    /// Returns the part of `region` that overlaps this grid's domain.
    #[must_use]
    pub fn overlap(&self, region: &SpatialDomain) -> Option<SpatialDomain> {
        self.domain.overlap(region)
    }

    /// Moves the underlying domain by `v`.
    pub fn translate(&mut self, v: Vec3) -> Result<&mut Self> {
        self.domain.translate(v)?;
        Ok(self)
    }

    /// Scales the underlying domain's extent. A non-finite result is rejected
    /// and leaves the grid unchanged.
    pub fn scale(&mut self, s: Vec3) -> Result<&mut Self> {
        self.domain.scale(s)?;
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn space(extent: f32, res: UVec3) -> GridSpace {
        GridSpace::new(
            SpatialDomain::new(Vec3::ZERO, Vec3::splat(extent)).unwrap(),
            res,
        )
        .unwrap()
    }

    #[test]
    fn test_zero_resolution_rejected() {
        let err = GridSpace::new(SpatialDomain::unit(), UVec3::new(2, 0, 2)).unwrap_err();
        assert!(matches!(err, VoxelError::InvalidResolution { .. }));
    }

    #[test]
    fn test_resolution_and_counts() {
        let g = GridSpace::new(SpatialDomain::unit(), UVec3::new(1, 2, 3)).unwrap();
        assert_eq!(g.resolution(), UVec3::new(1, 2, 3));
        assert_eq!(g.num_samples(), 6);
        assert_eq!(g.cell_dim(), UVec3::new(0, 1, 2));
        assert_eq!(g.num_cells(), 0);
    }

    #[test]
    fn test_unit_size() {
        assert_eq!(space(1.0, UVec3::splat(2)).unit_size(), Vec3::splat(0.5));
        assert_eq!(
            space(1.0, UVec3::new(2, 4, 8)).unit_size(),
            Vec3::new(0.5, 0.25, 0.125)
        );
        assert_eq!(space(1.0, UVec3::splat(2)).unit_volume(), 0.125);
    }

    #[test]
    fn test_cell_center() {
        let g = space(1.0, UVec3::splat(2));
        assert_eq!(g.normalized(0, 0, 0), Vec3::splat(0.25));
        assert_eq!(g.normalized(1, 1, 1), Vec3::splat(0.75));

        let mut moved = g;
        moved.translate(Vec3::new(1.0, 2.0, 3.0)).unwrap();
        assert_eq!(moved.cell_center(0, 0, 0), Vec3::new(1.25, 2.25, 3.25));
    }

    #[test]
    fn test_to_index() {
        let g = space(10.0, UVec3::splat(2));
        assert_eq!(g.to_index(Vec3::splat(2.0)), UVec3::ZERO);
        assert_eq!(g.to_index(Vec3::splat(8.0)), UVec3::ONE);
    }

    #[test]
    fn test_to_index_clamps() {
        let g = space(10.0, UVec3::splat(2));
        assert_eq!(g.to_index(Vec3::splat(-5.0)), UVec3::ZERO);
        assert_eq!(g.to_index(Vec3::splat(10.0)), UVec3::ONE);
        assert_eq!(g.to_index(Vec3::splat(1.0e9)), UVec3::ONE);
    }

    #[test]
    fn test_to_index_zero_extent() {
        let g = GridSpace::new(
            SpatialDomain::new(Vec3::ZERO, Vec3::new(0.0, 1.0, 1.0)).unwrap(),
            UVec3::splat(4),
        )
        .unwrap();
        let i = g.to_index(Vec3::new(0.0, 0.6, 0.1));
        assert_eq!(i, UVec3::new(0, 2, 0));
    }

    #[test]
    fn test_flatten_roundtrip_and_order() {
        let g = space(1.0, UVec3::new(5, 6, 7));
        let offset = g.flatten(2, 3, 4);
        assert_eq!(g.unflatten(offset), UVec3::new(2, 3, 4));

        for (expected, idx) in g.indices().enumerate() {
            assert_eq!(g.flatten(idx.x, idx.y, idx.z), expected);
        }
    }

    #[test]
    fn test_check_index() {
        let g = space(1.0, UVec3::splat(3));
        assert!(g.check_index(UVec3::new(2, 2, 2)).is_ok());
        assert!(matches!(
            g.check_index(UVec3::new(3, 0, 0)),
            Err(VoxelError::IndexOutOfBounds { .. })
        ));
    }

    #[test]
    fn test_cell_centers() {
        let g = space(1.0, UVec3::splat(2));
        let centers = g.cell_centers();
        assert_eq!(centers.len(), 8);
        assert_eq!(centers[0], Vec3::splat(0.25));
        assert_eq!(centers[1], Vec3::new(0.25, 0.25, 0.75));
        assert_eq!(centers[7], Vec3::splat(0.75));
    }

    #[test]
    fn test_index_range_of() {
        let g = space(10.0, UVec3::splat(10));
        let region = SpatialDomain::from_corners(Vec3::splat(4.0), Vec3::splat(6.0)).unwrap();
        let (start, end) = g.index_range_of(&region);
        // Centres 4.5 and 5.5 are inside; padding may widen but must cover them.
        assert!(start.cmple(UVec3::splat(4)).all());
        assert!(end.cmpge(UVec3::splat(6)).all());
        assert!(end.cmple(UVec3::splat(10)).all());

        let outside = SpatialDomain::from_corners(Vec3::splat(50.0), Vec3::splat(60.0)).unwrap();
        let (start, end) = g.index_range_of(&outside);
        assert_eq!(start, end);
    }

    #[test]
    fn test_scale() {
        let mut g = GridSpace::new(SpatialDomain::unit(), UVec3::ONE).unwrap();
        g.scale(Vec3::new(2.0, 4.0, 8.0)).unwrap();
        assert_eq!(g.domain().extent(), Vec3::new(2.0, 4.0, 8.0));

        assert!(g.scale(Vec3::new(1.0, f32::NAN, 1.0)).is_err());
        assert_eq!(g.domain().extent(), Vec3::new(2.0, 4.0, 8.0));
        assert!(g.unit_size().is_finite());
    }

    #[test]
    fn test_deserialize_validates() {
        let json = r#"{"domain":{"origin":[0.0,0.0,0.0],"extent":[1.0,1.0,1.0]},"resolution":[4,0,4]}"#;
        assert!(serde_json::from_str::<GridSpace>(json).is_err());

        let g = space(2.0, UVec3::new(3, 4, 5));
        let back: GridSpace = serde_json::from_str(&serde_json::to_string(&g).unwrap()).unwrap();
        assert_eq!(back, g);
    }
}
