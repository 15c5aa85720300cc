//! Brushes that paint density into a [`Volume`].
//!
//! A brush is a plain value: a centre, a size and a [`BrushKind`] saying how it
//! writes. Its influence region is the sphere of radius `size.x / 2` around the
//! centre; only the `x` component of `size` takes part in that test. A sample is
//! touched when its cell centre lies strictly inside the sphere.
//!
//! [`Brush::apply`] visits every sample of the target volume.
//! [`Brush::apply_pruned`] restricts the sweep to the sphere's bounding box and
//! touches exactly the same samples.

use glam::{UVec3, Vec3};
use serde::{Deserialize, Serialize};

use crate::domain::SpatialDomain;
use crate::error::Result;
use crate::scalar::Scalar;
use crate::volume::Volume;

/// How a brush writes into the samples it touches.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum BrushKind {
    /// Accumulates `(1 - distance / radius) * density`.
    Blend { density: f32 },
    /// Overwrites with a constant.
    Fill { fill_value: f32 },
}

/// A spherical brush.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Brush {
    center: Vec3,
    size: Vec3,
    kind: BrushKind,
}

impl Default for Brush {
    fn default() -> Self {
        Self::default_blend()
    }
}

impl Brush {
    #[must_use]
    pub fn new(center: Vec3, size: Vec3, kind: BrushKind) -> Self {
        Self { center, size, kind }
    }

    /// Creates an additive brush with radial falloff.
    #[must_use]
    pub fn blend(center: Vec3, size: Vec3, density: f32) -> Self {
        Self::new(center, size, BrushKind::Blend { density })
    }

    /// Unit-size blend brush of density 1 at the origin.
    #[must_use]
    pub fn default_blend() -> Self {
        Self::blend(Vec3::ZERO, Vec3::ONE, 1.0)
    }

    /// Creates an overwriting brush.
    #[must_use]
    pub fn fill(center: Vec3, size: Vec3, fill_value: f32) -> Self {
        Self::new(center, size, BrushKind::Fill { fill_value })
    }

    #[must_use]
    pub fn center(&self) -> Vec3 {
        self.center
    }

    #[must_use]
    pub fn size(&self) -> Vec3 {
        self.size
    }

    #[must_use]
    pub fn kind(&self) -> BrushKind {
        self.kind
    }

    /// Returns the influence radius, `size.x / 2`.
    #[must_use]
    pub fn radius(&self) -> f32 {
        self.size.x * 0.5
    }

    #[must_use]
    pub fn min_position(&self) -> Vec3 {
        self.center - self.size * 0.5
    }

    #[must_use]
    pub fn max_position(&self) -> Vec3 {
        self.center + self.size * 0.5
    }

    /// Returns the box spanned by the brush size around its centre.
    ///
    /// Fails for a brush whose centre or size is not finite.
    pub fn space(&self) -> Result<SpatialDomain> {
        SpatialDomain::from_corners(self.min_position(), self.max_position())
    }

    pub fn translate(&mut self, v: Vec3) -> &mut Self {
        self.center += v;
        self
    }

    /// Multiplies the size component-wise.
    pub fn scale(&mut self, s: Vec3) -> &mut Self {
        self.size *= s;
        self
    }

    pub fn add_size(&mut self, s: Vec3) -> &mut Self {
        self.size += s;
        self
    }

    /// Returns true if `p` lies strictly inside the influence sphere.
    #[must_use]
    pub fn contains(&self, p: Vec3) -> bool {
        let r = self.radius();
        r > 0.0 && self.center.distance_squared(p) < r * r
    }

    /// Returns the value this brush contributes at `p`.
    #[must_use]
    pub fn value_at(&self, p: Vec3) -> f32 {
        match self.kind {
            BrushKind::Blend { density } => {
                (1.0 - p.distance(self.center) / self.radius()) * density
            }
            BrushKind::Fill { fill_value } => fill_value,
        }
    }

    /// Paints into `volume`, visiting every sample. Returns the number of samples touched.
    ///
    /// A brush with a non-positive radius touches nothing.
    pub fn apply<T: Scalar>(&self, volume: &mut Volume<T>) -> usize {
        let resolution = volume.resolution();
        self.paint(volume, UVec3::ZERO, resolution)
    }

    /// Paints into `volume`, visiting only samples near the influence sphere.
    ///
    /// Produces the same field as [`apply`](Self::apply).
    pub fn apply_pruned<T: Scalar>(&self, volume: &mut Volume<T>) -> usize {
        let r = self.radius();
        if r.is_nan() || r <= 0.0 {
            return 0;
        }
        let reach = Vec3::splat(r);
        // An unbounded reach or a non-finite centre has nothing to prune against.
        let Ok(bounds) = SpatialDomain::from_corners(self.center - reach, self.center + reach)
        else {
            return self.apply(volume);
        };
        let (start, end) = volume.space().index_range_of(&bounds);
        self.paint(volume, start, end)
    }

    fn paint<T: Scalar>(&self, volume: &mut Volume<T>, start: UVec3, end: UVec3) -> usize {
        let r = self.radius();
        if r.is_nan() || r <= 0.0 {
            return 0;
        }
        let space = *volume.space();
        let mut touched = 0;
        for x in start.x..end.x {
            for y in start.y..end.y {
                for z in start.z..end.z {
                    let pos = space.cell_center(x, y, z);
                    if !self.contains(pos) {
                        continue;
                    }
                    let offset = space.flatten(x, y, z);
                    let v = T::from_f32(self.value_at(pos));
                    match self.kind {
                        BrushKind::Blend { .. } => volume.add_at(offset, v),
                        BrushKind::Fill { .. } => volume.set_at(offset, v),
                    }
                    touched += 1;
                }
            }
        }
        log::trace!("{:?} at {} touched {touched} samples", self.kind, self.center);
        touched
    }
}

/// Applies every brush in order. Returns the total number of samples touched.
pub fn apply_all<T: Scalar>(brushes: &[Brush], volume: &mut Volume<T>) -> usize {
    brushes.iter().map(|b| b.apply(volume)).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid_space::GridSpace;

    /// 10x10x10 samples over [-1, 1]^3, spacing 0.2.
    fn unit_volume() -> Volume<f32> {
        let domain = SpatialDomain::new(Vec3::splat(-1.0), Vec3::splat(2.0)).unwrap();
        Volume::new(GridSpace::new_uniform(domain, 10).unwrap())
    }

    #[test]
    fn test_default_brush() {
        let b = Brush::default();
        assert_eq!(b, Brush::default_blend());
        assert_eq!(b.size(), Vec3::ONE);
        assert_eq!(b.center(), Vec3::ZERO);
        assert_eq!(b.kind(), BrushKind::Blend { density: 1.0 });
    }

    #[test]
    fn test_translate() {
        let mut b = Brush::blend(Vec3::new(1.0, 2.0, 3.0), Vec3::ONE, 1.0);
        b.translate(Vec3::new(3.0, 2.0, 1.0));
        assert_eq!(b.center(), Vec3::splat(4.0));
    }

    #[test]
    fn test_scale_and_add_size() {
        let mut b = Brush::fill(Vec3::ZERO, Vec3::ONE, 1.0);
        b.scale(Vec3::new(2.0, 3.0, 4.0)).add_size(Vec3::ONE);
        assert_eq!(b.size(), Vec3::new(3.0, 4.0, 5.0));
        assert_eq!(b.radius(), 1.5);
    }

    #[test]
    fn test_space() {
        let b = Brush::fill(Vec3::ONE, Vec3::new(2.0, 4.0, 6.0), 1.0);
        assert_eq!(b.min_position(), Vec3::new(0.0, -1.0, -2.0));
        assert_eq!(b.max_position(), Vec3::new(2.0, 3.0, 4.0));
        assert_eq!(b.space().unwrap().extent(), Vec3::new(2.0, 4.0, 6.0));
    }

    #[test]
    fn test_space_rejects_non_finite_brush() {
        assert!(Brush::fill(Vec3::splat(f32::NAN), Vec3::ONE, 1.0).space().is_err());
        assert!(Brush::fill(Vec3::ZERO, Vec3::splat(f32::INFINITY), 1.0).space().is_err());
    }

    #[test]
    fn test_pruned_unbounded_brush_matches_full_sweep() {
        let everywhere = Brush::fill(Vec3::ZERO, Vec3::splat(f32::INFINITY), 3.0);
        let mut full = unit_volume();
        let mut pruned = unit_volume();
        assert_eq!(everywhere.apply(&mut full), 1000);
        assert_eq!(everywhere.apply_pruned(&mut pruned), 1000);
        assert_eq!(full.values(), pruned.values());

        let lost = Brush::fill(Vec3::new(f32::NAN, 0.0, 0.0), Vec3::ONE, 3.0);
        assert_eq!(lost.apply_pruned(&mut pruned), 0);
        assert_eq!(full.values(), pruned.values());
    }

    #[test]
    fn test_fill_containment_is_strict() {
        // Unit spacing grid whose sample centres sit on integer coordinates.
        let domain = SpatialDomain::new(Vec3::splat(-2.5), Vec3::splat(5.0)).unwrap();
        let mut volume = Volume::<f32>::new(GridSpace::new_uniform(domain, 5).unwrap());
        let brush = Brush::fill(Vec3::ZERO, Vec3::splat(2.0), 1.0_f32);

        let touched = brush.apply(&mut volume);

        // Only the origin has distance^2 < 1; its six neighbours sit exactly at 1.
        assert_eq!(touched, 1);
        for i in volume.space().indices() {
            let c = volume.cell_center(i.x, i.y, i.z);
            let expected = if c.length_squared() < 1.0 { 1.0 } else { 0.0 };
            assert_eq!(volume.value(i.x, i.y, i.z).unwrap(), expected, "sample {i}");
        }
        assert_eq!(volume.value(3, 2, 2).unwrap(), 0.0);
    }

    #[test]
    fn test_fill_is_idempotent() {
        let mut volume = unit_volume();
        let brush = Brush::fill(Vec3::new(0.1, 0.0, -0.2), Vec3::splat(1.2), 3.0);
        brush.apply(&mut volume);
        let once = volume.clone();
        brush.apply(&mut volume);
        assert_eq!(volume, once);
    }

    #[test]
    fn test_blend_accumulates_with_falloff() {
        let mut volume = unit_volume();
        let brush = Brush::blend(Vec3::splat(0.1), Vec3::splat(1.0), 2.0);
        brush.apply(&mut volume);
        brush.apply(&mut volume);

        // Sample (5,5,5) sits at (0.1, 0.1, 0.1): the brush centre.
        assert!((volume.value(5, 5, 5).unwrap() - 4.0).abs() < 1e-5);
        // Sample (6,5,5) is 0.2 away from a radius 0.5 brush: (1 - 0.4) * 2 per pass.
        assert!((volume.value(6, 5, 5).unwrap() - 2.4).abs() < 1e-5);
        // Outside the sphere nothing changes.
        assert_eq!(volume.value(0, 0, 0).unwrap(), 0.0);
    }

    #[test]
    fn test_blend_order_independent() {
        let a = Brush::blend(Vec3::new(-0.2, 0.0, 0.0), Vec3::splat(1.4), 1.5);
        let b = Brush::blend(Vec3::new(0.3, 0.1, 0.0), Vec3::splat(1.0), 0.5);

        let mut ab = unit_volume();
        a.apply(&mut ab);
        b.apply(&mut ab);

        let mut ba = unit_volume();
        b.apply(&mut ba);
        a.apply(&mut ba);

        for (x, y) in ab.values().iter().zip(ba.values()) {
            assert!((x - y).abs() < 1e-6);
        }
    }

    #[test]
    fn test_radius_uses_size_x_only() {
        let mut volume = unit_volume();
        let brush = Brush::fill(Vec3::splat(0.1), Vec3::new(0.0, 10.0, 10.0), 1.0);
        assert_eq!(brush.apply(&mut volume), 0);
        assert!(volume.values().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_non_positive_radius_is_noop() {
        let mut volume = unit_volume();
        let brush = Brush::blend(Vec3::ZERO, Vec3::splat(-4.0), 1.0);
        assert_eq!(brush.apply(&mut volume), 0);
        assert_eq!(brush.apply_pruned(&mut volume), 0);
        assert!(volume.values().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_pruned_matches_full_sweep() {
        let brushes = [
            Brush::blend(Vec3::new(0.33, -0.1, 0.7), Vec3::splat(0.9), 1.0),
            Brush::fill(Vec3::new(-0.5, 0.5, 0.1), Vec3::splat(0.6), 2.0),
            Brush::blend(Vec3::splat(3.0), Vec3::splat(1.0), 1.0),
            Brush::blend(Vec3::ZERO, Vec3::splat(10.0), 0.25),
        ];
        for brush in brushes {
            let mut full = unit_volume();
            let mut pruned = unit_volume();
            let n_full = brush.apply(&mut full);
            let n_pruned = brush.apply_pruned(&mut pruned);
            assert_eq!(n_full, n_pruned);
            assert_eq!(full, pruned);
        }
    }

    #[test]
    fn test_integer_volume_saturates() {
        let domain = SpatialDomain::new(Vec3::ZERO, Vec3::splat(3.0)).unwrap();
        let mut volume: Volume<u8> = Volume::new(GridSpace::new_uniform(domain, 3).unwrap());
        let brush = Brush::blend(Vec3::splat(1.5), Vec3::splat(2.0), 200.0);
        brush.apply(&mut volume);
        brush.apply(&mut volume);
        assert_eq!(volume.value(1, 1, 1).unwrap(), 255);
    }

    #[test]
    fn test_apply_all() {
        let mut volume = unit_volume();
        let brushes = [
            Brush::fill(Vec3::splat(0.1), Vec3::splat(0.3), 1.0),
            Brush::fill(Vec3::splat(0.1), Vec3::splat(0.3), 2.0),
        ];
        let touched = apply_all(&brushes, &mut volume);
        assert_eq!(touched, 2);
        assert_eq!(volume.value(5, 5, 5).unwrap(), 2.0);
    }
}
