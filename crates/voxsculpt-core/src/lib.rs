//! Core volume model for voxsculpt.
//!
//! This crate provides the volumetric pipeline used throughout voxsculpt:
//! - [`SpatialDomain`] and [`GridSpace`] for mapping grid indices to world space and back
//! - [`Volume`], a dense scalar field generic over its sample type
//! - [`Brush`] rasterization that paints density into a volume
//! - [`MarchingCubes`] isosurface extraction and the [`IsoMesh`] hand-off mesh
//! - Configuration options

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
// Builder patterns return Self which doesn't need must_use
#![allow(clippy::must_use_candidate)]
// Tables and tests compare floats exactly on purpose
#![allow(clippy::float_cmp)]
// Index arguments are conventionally named ix, iy, iz
#![allow(clippy::many_single_char_names, clippy::similar_names)]

pub mod brush;
pub mod cell;
pub mod domain;
pub mod error;
pub mod grid_space;
pub mod marching_cubes;
pub mod mc_table;
pub mod mesh;
pub mod options;
pub mod position_value;
pub mod scalar;
pub mod volume;

pub use brush::{apply_all, Brush, BrushKind};
pub use cell::Cell;
pub use domain::SpatialDomain;
pub use error::{Result, VoxelError};
pub use grid_space::GridSpace;
pub use marching_cubes::{cube_index, marching_cubes, polygonise, MarchingCubes, Triangle};
pub use mc_table::MarchingCubeTable;
pub use mesh::IsoMesh;
pub use options::Options;
pub use position_value::PositionValue;
pub use scalar::Scalar;
pub use volume::Volume;

// Re-export glam types for convenience
pub use glam::{UVec3, Vec3};
