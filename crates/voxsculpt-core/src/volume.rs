//! Dense scalar field laid over a grid index space.
//!
//! A [`Volume`] owns its [`GridSpace`] and one sample per grid point, stored
//! contiguously in traversal order. A volume of resolution `N` has `N - 1`
//! cells per axis; cell `(ix, iy, iz)` spans samples `ix..=ix + 1` (and the
//! same for `y` and `z`).
//!
//! Every public accessor is bounds-checked and reports
//! [`VoxelError::IndexOutOfBounds`] / [`VoxelError::CellOutOfBounds`] instead of
//! clamping.

use glam::{UVec3, Vec3};

use crate::cell::Cell;
use crate::error::{Result, VoxelError};
use crate::grid_space::GridSpace;
use crate::scalar::{ordered_range, Scalar};

/// A dense 3D array of samples co-located with a [`GridSpace`].
#[derive(Debug, Clone, PartialEq)]
pub struct Volume<T = f32> {
    space: GridSpace,
    values: Vec<T>,
}

impl<T: Scalar> Volume<T> {
    /// Creates a volume with every sample set to `T::default()`.
    #[must_use]
    pub fn new(space: GridSpace) -> Self {
        Self::filled(space, T::default())
    }

    /// Creates a volume with every sample set to `value`.
    #[must_use]
    pub fn filled(space: GridSpace, value: T) -> Self {
        Self {
            values: vec![value; space.num_samples()],
            space,
        }
    }

    /// Creates a volume from samples in traversal order (`x` outermost, `z` innermost).
    pub fn from_values(space: GridSpace, values: Vec<T>) -> Result<Self> {
        let expected = space.num_samples();
        if values.len() != expected {
            return Err(VoxelError::SizeMismatch {
                expected,
                actual: values.len(),
            });
        }
        Ok(Self { space, values })
    }

    #[must_use]
    pub fn space(&self) -> &GridSpace {
        &self.space
    }

    /// Mutable access to the grid space, for relocating or rescaling the volume.
    pub fn space_mut(&mut self) -> &mut GridSpace {
        &mut self.space
    }

    #[must_use]
    pub fn resolution(&self) -> UVec3 {
        self.space.resolution()
    }

    /// Returns the samples in traversal order.
    #[must_use]
    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// Returns the world position of sample `(ix, iy, iz)`.
    #[must_use]
    pub fn cell_center(&self, ix: u32, iy: u32, iz: u32) -> Vec3 {
        self.space.cell_center(ix, iy, iz)
    }

    /// Returns the sample at `(ix, iy, iz)`.
    pub fn value(&self, ix: u32, iy: u32, iz: u32) -> Result<T> {
        let offset = self.checked_offset(ix, iy, iz)?;
        Ok(self.values[offset])
    }

    /// Overwrites the sample at `(ix, iy, iz)`.
    pub fn set_value(&mut self, ix: u32, iy: u32, iz: u32, v: T) -> Result<()> {
        let offset = self.checked_offset(ix, iy, iz)?;
        self.values[offset] = v;
        Ok(())
    }

    /// Accumulates `v` into the sample at `(ix, iy, iz)`.
    ///
    /// Integer samples saturate; see [`Scalar::accumulate`].
    pub fn add(&mut self, ix: u32, iy: u32, iz: u32, v: T) -> Result<()> {
        let offset = self.checked_offset(ix, iy, iz)?;
        self.add_at(offset, v);
        Ok(())
    }

    /// Sets every sample to `v`.
    pub fn fill(&mut self, v: T) {
        self.values.fill(v);
    }

    /// Returns the smallest and largest sample, ignoring NaN.
    ///
    /// Both bounds are NaN only when every sample is.
    #[must_use]
    pub fn value_range(&self) -> (T, T) {
        ordered_range(&self.values).unwrap_or((self.values[0], self.values[0]))
    }

    /// Returns the number of cells (one fewer than samples on each axis).
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.space.num_cells()
    }

    /// Gathers the eight samples of cell `(ix, iy, iz)`.
    pub fn cell_at(&self, ix: u32, iy: u32, iz: u32) -> Result<Cell<T>> {
        let cell_dim = self.space.cell_dim();
        let index = UVec3::new(ix, iy, iz);
        if !index.cmplt(cell_dim).all() {
            return Err(VoxelError::CellOutOfBounds { index, cell_dim });
        }
        Ok(self.cell_unchecked(ix, iy, iz))
    }

    /// Iterates every cell in index order.
    pub fn cells(&self) -> impl Iterator<Item = Cell<T>> + '_ {
        let dim = self.space.cell_dim();
        (0..dim.x).flat_map(move |ix| self.cells_in_slab(ix))
    }

    /// Iterates the cells with the given `x` index, in index order.
    pub fn cells_in_slab(&self, ix: u32) -> impl Iterator<Item = Cell<T>> + '_ {
        let dim = self.space.cell_dim();
        (0..dim.y).flat_map(move |iy| (0..dim.z).map(move |iz| self.cell_unchecked(ix, iy, iz)))
    }

    /// Lazily yields, in index order, every cell that straddles `isolevel`.
    ///
    /// A cell is skipped only when all eight corners are strictly below or
    /// strictly above `isolevel`.
    pub fn boundary_cells(&self, isolevel: T) -> impl Iterator<Item = Cell<T>> + '_ {
        self.cells().filter(move |cell| cell.is_boundary(isolevel))
    }

    fn checked_offset(&self, ix: u32, iy: u32, iz: u32) -> Result<usize> {
        self.space.check_index(UVec3::new(ix, iy, iz))?;
        Ok(self.space.flatten(ix, iy, iz))
    }

    pub(crate) fn set_at(&mut self, offset: usize, v: T) {
        self.values[offset] = v;
    }

    pub(crate) fn add_at(&mut self, offset: usize, v: T) {
        let slot = &mut self.values[offset];
        *slot = slot.accumulate(v);
    }

    fn cell_unchecked(&self, ix: u32, iy: u32, iz: u32) -> Cell<T> {
        const OFFSETS: [[u32; 3]; 8] = [
            [0, 0, 0],
            [1, 0, 0],
            [1, 1, 0],
            [0, 1, 0],
            [0, 0, 1],
            [1, 0, 1],
            [1, 1, 1],
            [0, 1, 1],
        ];
        let mut corners = [Vec3::ZERO; 8];
        let mut values = [T::default(); 8];
        for (i, [dx, dy, dz]) in OFFSETS.into_iter().enumerate() {
            let (x, y, z) = (ix + dx, iy + dy, iz + dz);
            corners[i] = self.space.cell_center(x, y, z);
            values[i] = self.values[self.space.flatten(x, y, z)];
        }
        Cell::with_corners(corners, values)
    }
}
