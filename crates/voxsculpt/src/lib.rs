//! voxsculpt: voxel sculpting with brushes and marching cubes.
//!
//! voxsculpt keeps named scalar volumes in a process-wide registry. Brushes
//! paint density into a volume and the marching cubes extractor turns a level
//! set of that density into a triangle mesh.
//!
//! # Quick Start
//!
//! ```no_run
//! use voxsculpt::*;
//!
//! fn main() -> Result<()> {
//!     // Initialize voxsculpt
//!     init()?;
//!
//!     // A 24^3 volume over [-1, 1]^3
//!     let domain = SpatialDomain::new(Vec3::splat(-1.0), Vec3::splat(2.0))?;
//!     let clay = register_volume_uniform("clay", domain, 24)?;
//!
//!     // Two overlapping blend brushes
//!     clay.apply_brush(&Brush::blend(Vec3::new(-0.3, 0.0, 0.0), Vec3::splat(1.2), 1.0))?;
//!     clay.apply_brush(&Brush::blend(Vec3::new(0.3, 0.0, 0.0), Vec3::splat(1.2), 1.0))?;
//!
//!     // Extract at the configured isolevel
//!     let mesh = clay.extract_with_default_isolevel()?;
//!     println!("{} vertices", mesh.vertices.len());
//!
//!     shutdown();
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - [`voxsculpt_core`] holds the volume model: [`SpatialDomain`], [`GridSpace`],
//!   [`Volume`], [`Brush`] and [`MarchingCubes`].
//! - This crate adds the global [`Context`], the [`Registry`] of named volumes
//!   and [`VolumeHandle`] for sculpting a registered volume by name.

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
// Builder patterns return Self which doesn't need must_use
#![allow(clippy::must_use_candidate)]

pub mod registry;
pub mod state;
mod volume;

// Re-export core types
pub use voxsculpt_core::{
    apply_all, cube_index, marching_cubes, polygonise, Brush, BrushKind, Cell, GridSpace,
    IsoMesh, MarchingCubeTable, MarchingCubes, Options, PositionValue, Result, Scalar,
    SpatialDomain, Triangle, UVec3, Vec3, Volume, VoxelError,
};

pub use registry::Registry;
pub use state::{with_context, with_context_mut, Context};
pub use volume::{
    get_volume, register_volume, register_volume_uniform, remove_all_volumes, remove_volume,
    volume_names, VolumeHandle,
};

/// Initializes voxsculpt and installs the `env_logger` backend if no logger is set.
///
/// This must be called before any other voxsculpt functions.
pub fn init() -> Result<()> {
    let _ = env_logger::try_init();
    state::init_context()?;
    log::info!("voxsculpt initialized");
    Ok(())
}

/// Returns whether voxsculpt has been initialized.
pub fn is_initialized() -> bool {
    state::is_initialized()
}

/// Shuts down voxsculpt and drops every registered volume.
pub fn shutdown() {
    state::shutdown_context();
    log::info!("voxsculpt shut down");
}

/// Replaces the global options.
///
/// Returns [`VoxelError::NotInitialized`] before [`init`].
pub fn set_options(options: Options) -> Result<()> {
    state::try_with_context_mut(|ctx| ctx.options = options).ok_or(VoxelError::NotInitialized)
}

/// Returns a copy of the global options, or the defaults before [`init`].
pub fn options() -> Options {
    state::try_with_context(|ctx| ctx.options.clone()).unwrap_or_default()
}
