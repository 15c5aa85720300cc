//! Error types for voxsculpt.

use glam::{UVec3, Vec3};
use thiserror::Error;

/// The main error type for voxsculpt operations.
#[derive(Error, Debug)]
pub enum VoxelError {
    /// A grid resolution with a zero axis was requested.
    #[error("invalid resolution {resolution}: every axis must be at least 1")]
    InvalidResolution { resolution: UVec3 },

    /// A spatial domain with a negative or non-finite extent was requested.
    #[error("invalid extent {extent}: every axis must be finite and >= 0")]
    InvalidExtent { extent: Vec3 },

    /// A spatial domain with a non-finite origin was requested.
    #[error("invalid origin {origin}: every axis must be finite")]
    InvalidOrigin { origin: Vec3 },

    /// A sample index lies outside the grid resolution.
    #[error("sample index {index} out of bounds for resolution {resolution}")]
    IndexOutOfBounds { index: UVec3, resolution: UVec3 },

    /// A cell index lies outside the cell dimensions (resolution - 1).
    #[error("cell index {index} out of bounds for cell dimensions {cell_dim}")]
    CellOutOfBounds { index: UVec3, cell_dim: UVec3 },

    /// Data size mismatch.
    #[error("data size mismatch: expected {expected}, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },

    /// The sculpting context has not been initialized.
    #[error("voxsculpt not initialized - call voxsculpt::init() first")]
    NotInitialized,

    /// The sculpting context has already been initialized.
    #[error("voxsculpt already initialized")]
    AlreadyInitialized,

    /// A volume with the given name already exists.
    #[error("volume '{0}' already exists")]
    VolumeExists(String),

    /// A volume with the given name was not found.
    #[error("volume '{0}' not found")]
    VolumeNotFound(String),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// A specialized Result type for voxsculpt operations.
pub type Result<T> = std::result::Result<T, VoxelError>;
