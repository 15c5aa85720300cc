//! Volume registration and sculpting.
//!
//! Volumes live in the global registry under a unique name. A [`VolumeHandle`]
//! only stores that name, so handles are cheap to clone and every operation
//! reports [`VoxelError::VolumeNotFound`] once the volume has been removed.
//!
//! # Example
//!
//! ```no_run
//! use voxsculpt::*;
//!
//! fn main() -> Result<()> {
//!     init()?;
//!
//!     let domain = SpatialDomain::new(Vec3::splat(-1.0), Vec3::splat(2.0))?;
//!     let volume = register_volume("blob", domain, UVec3::splat(32))?;
//!
//!     volume.apply_brush(&Brush::blend(Vec3::ZERO, Vec3::splat(1.5), 2.0))?;
//!     let mesh = volume.extract_isosurface(0.5)?;
//!     println!("{} triangles", mesh.num_triangles());
//!     Ok(())
//! }
//! ```

use glam::{UVec3, Vec3};
use voxsculpt_core::{
    apply_all, Brush, GridSpace, IsoMesh, MarchingCubes, Options, Result, SpatialDomain,
    Triangle, Volume, VoxelError,
};

use crate::state::{try_with_context, try_with_context_mut};

/// Registers a zero-filled volume covering `domain` at `resolution` samples per axis.
pub fn register_volume(
    name: impl Into<String>,
    domain: SpatialDomain,
    resolution: UVec3,
) -> Result<VolumeHandle> {
    let name = name.into();
    let volume = Volume::new(GridSpace::new(domain, resolution)?);

    try_with_context_mut(|ctx| ctx.registry.register(name.clone(), volume))
        .ok_or(VoxelError::NotInitialized)??;

    log::debug!("registered volume '{name}' ({resolution})");
    Ok(VolumeHandle { name })
}

/// Registers a volume with the same resolution on every axis.
pub fn register_volume_uniform(
    name: impl Into<String>,
    domain: SpatialDomain,
    resolution: u32,
) -> Result<VolumeHandle> {
    register_volume(name, domain, UVec3::splat(resolution))
}

/// Gets a handle to a registered volume, or `None` if there is none by that name.
pub fn get_volume(name: &str) -> Option<VolumeHandle> {
    try_with_context(|ctx| ctx.registry.contains(name))
        .unwrap_or(false)
        .then(|| VolumeHandle {
            name: name.to_string(),
        })
}

/// Removes a volume by name. Returns true if it existed.
pub fn remove_volume(name: &str) -> bool {
    try_with_context_mut(|ctx| ctx.registry.remove(name).is_some()).unwrap_or(false)
}

/// Removes every registered volume.
pub fn remove_all_volumes() {
    try_with_context_mut(|ctx| ctx.registry.clear());
}

/// Returns the names of all registered volumes, sorted.
pub fn volume_names() -> Vec<String> {
    try_with_context(|ctx| ctx.registry.names()).unwrap_or_default()
}

/// Runs `f` on the named volume.
fn with_volume<R>(name: &str, f: impl FnOnce(&mut Volume<f32>, &Options) -> R) -> Result<R> {
    try_with_context_mut(|ctx| {
        let options = ctx.options.clone();
        ctx.registry
            .get_mut(name)
            .map(|v| f(v, &options))
            .ok_or_else(|| VoxelError::VolumeNotFound(name.to_string()))
    })
    .ok_or(VoxelError::NotInitialized)?
}

/// Runs `f` on the named volume without taking the write lock.
fn with_volume_ref<R>(name: &str, f: impl FnOnce(&Volume<f32>, &Options) -> R) -> Result<R> {
    try_with_context(|ctx| {
        ctx.registry
            .get(name)
            .map(|v| f(v, &ctx.options))
            .ok_or_else(|| VoxelError::VolumeNotFound(name.to_string()))
    })
    .ok_or(VoxelError::NotInitialized)?
}

/// Handle for a registered volume.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VolumeHandle {
    name: String,
}

impl VolumeHandle {
    /// Returns the name of this volume.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn resolution(&self) -> Result<UVec3> {
        with_volume_ref(&self.name, |v, _| v.resolution())
    }

    /// Returns the physical box the volume occupies.
    pub fn domain(&self) -> Result<SpatialDomain> {
        with_volume_ref(&self.name, |v, _| *v.space().domain())
    }

    /// Paints a brush into the volume. Returns the number of samples touched.
    ///
    /// Honours [`Options::prune_brush_sweep`]; both sweeps touch the same samples.
    pub fn apply_brush(&self, brush: &Brush) -> Result<usize> {
        with_volume(&self.name, |v, options| {
            if options.prune_brush_sweep {
                brush.apply_pruned(v)
            } else {
                brush.apply(v)
            }
        })
    }

    /// Paints every brush in order with a full sweep.
    pub fn apply_brushes(&self, brushes: &[Brush]) -> Result<usize> {
        with_volume(&self.name, |v, _| apply_all(brushes, v))
    }

    pub fn value(&self, ix: u32, iy: u32, iz: u32) -> Result<f32> {
        with_volume_ref(&self.name, |v, _| v.value(ix, iy, iz))?
    }

    pub fn set_value(&self, ix: u32, iy: u32, iz: u32, value: f32) -> Result<()> {
        with_volume(&self.name, |v, _| v.set_value(ix, iy, iz, value))?
    }

    pub fn add(&self, ix: u32, iy: u32, iz: u32, value: f32) -> Result<()> {
        with_volume(&self.name, |v, _| v.add(ix, iy, iz, value))?
    }

    /// Sets every sample to `value`.
    pub fn fill(&self, value: f32) -> Result<()> {
        with_volume(&self.name, |v, _| v.fill(value))
    }

    /// Returns the smallest and largest sample.
    pub fn value_range(&self) -> Result<(f32, f32)> {
        with_volume_ref(&self.name, |v, _| v.value_range())
    }

    /// Moves the volume by `offset`; samples keep their values.
    ///
    /// A non-finite result is rejected and leaves the volume where it was.
    pub fn translate(&self, offset: Vec3) -> Result<()> {
        with_volume(&self.name, |v, _| v.space_mut().translate(offset).map(|_| ()))?
    }

    /// Scales the volume's extent about its origin.
    ///
    /// A non-finite result is rejected and leaves the volume unchanged.
    pub fn scale(&self, factors: Vec3) -> Result<()> {
        with_volume(&self.name, |v, _| v.space_mut().scale(factors).map(|_| ()))?
    }

    /// Returns a copy of the volume.
    pub fn snapshot(&self) -> Result<Volume<f32>> {
        with_volume_ref(&self.name, |v, _| v.clone())
    }

    /// Extracts the raw triangle list at `isolevel`.
    ///
    /// Honours [`Options::parallel_extraction`]; both paths return the same list.
    pub fn extract_triangles(&self, isolevel: f32) -> Result<Vec<Triangle>> {
        with_volume_ref(&self.name, |v, options| triangles_of(v, isolevel, options))
    }

    /// Extracts the isosurface at `isolevel` as an indexed mesh.
    ///
    /// Vertices are welded when [`Options::weld_vertices`] is set.
    pub fn extract_isosurface(&self, isolevel: f32) -> Result<IsoMesh> {
        with_volume_ref(&self.name, |v, options| mesh_of(v, isolevel, options))
    }

    /// Extracts the isosurface at [`Options::isolevel`].
    pub fn extract_with_default_isolevel(&self) -> Result<IsoMesh> {
        with_volume_ref(&self.name, |v, options| mesh_of(v, options.isolevel, options))
    }
}

fn triangles_of(volume: &Volume<f32>, isolevel: f32, options: &Options) -> Vec<Triangle> {
    let mc = MarchingCubes::new();
    if options.parallel_extraction {
        mc.extract_parallel(volume, isolevel)
    } else {
        mc.extract(volume, isolevel)
    }
}

/// Extracts and indexes under one options snapshot.
fn mesh_of(volume: &Volume<f32>, isolevel: f32, options: &Options) -> IsoMesh {
    let triangles = triangles_of(volume, isolevel, options);
    IsoMesh::from_triangles(&triangles, options.weld_vertices)
}
