//! Marching Cubes isosurface extraction.
//!
//! Walks the boundary cells of a [`Volume`] in index order, classifies each
//! against the isolevel, interpolates the crossed edges and emits triangles in
//! the winding given by [`TRI_TABLE`](crate::mc_table::TRI_TABLE). A corner
//! counts as inside when its value is strictly below the isolevel; a value equal
//! to the isolevel is outside.
//!
//! The output is a flat triangle list in world space, one entry per triangle,
//! ordered by cell and then by table order within the cell.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use rayon::prelude::*;

use crate::cell::Cell;
use crate::mc_table::{MarchingCubeTable, EDGE_CORNERS};
use crate::scalar::Scalar;
use crate::volume::Volume;

/// A world-space triangle.
///
/// `#[repr(C)]` and [`Pod`] so a `&[Triangle]` can be cast straight to a vertex buffer.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable)]
pub struct Triangle {
    pub v0: Vec3,
    pub v1: Vec3,
    pub v2: Vec3,
}

impl Triangle {
    #[must_use]
    pub fn new(v0: Vec3, v1: Vec3, v2: Vec3) -> Self {
        Self { v0, v1, v2 }
    }

    #[must_use]
    pub fn vertices(&self) -> [Vec3; 3] {
        [self.v0, self.v1, self.v2]
    }

    /// Returns `(v1 - v0) x (v2 - v0)`, whose length is twice the area.
    #[must_use]
    pub fn scaled_normal(&self) -> Vec3 {
        (self.v1 - self.v0).cross(self.v2 - self.v0)
    }

    /// Returns the unit normal, or zero for a degenerate triangle.
    #[must_use]
    pub fn normal(&self) -> Vec3 {
        self.scaled_normal().normalize_or_zero()
    }

    #[must_use]
    pub fn area(&self) -> f32 {
        self.scaled_normal().length() * 0.5
    }

    #[must_use]
    pub fn centroid(&self) -> Vec3 {
        (self.v0 + self.v1 + self.v2) / 3.0
    }
}

/// Builds the 8-bit cube index: bit `i` is set when `values[i] < isolevel`.
#[must_use]
pub fn cube_index<T: Scalar>(values: &[T; 8], isolevel: T) -> u8 {
    values
        .iter()
        .enumerate()
        .fold(0u8, |acc, (i, &v)| if v < isolevel { acc | (1 << i) } else { acc })
}

/// Triangulates one cell.
#[must_use]
pub fn polygonise<T: Scalar>(cell: &Cell<T>, isolevel: T) -> Vec<Triangle> {
    let mut out = Vec::new();
    polygonise_into(cell, isolevel, &mut out);
    out
}

/// Triangulates one cell, appending its triangles to `out`.
///
/// Returns the number of triangles appended.
pub fn polygonise_into<T: Scalar>(cell: &Cell<T>, isolevel: T, out: &mut Vec<Triangle>) -> usize {
    let table = MarchingCubeTable::shared();
    let case = cube_index(&cell.values(), isolevel);
    let mask = table.edge_mask(case);
    if mask == 0 {
        return 0;
    }

    let pvs = cell.position_values();
    let mut vertices = [Vec3::ZERO; 12];
    for (edge, &[a, b]) in EDGE_CORNERS.iter().enumerate() {
        if mask & (1 << edge) != 0 {
            vertices[edge] = pvs[a].interpolate(isolevel, &pvs[b]);
        }
    }

    let before = out.len();
    out.extend(
        table
            .triangles(case)
            .map(|[a, b, c]| Triangle::new(vertices[a], vertices[b], vertices[c])),
    );
    out.len() - before
}

/// Marching Cubes extractor.
///
/// Holds only a reference to the shared case tables, so it is cheap to create
/// and safe to use from many threads at once.
#[derive(Debug, Clone, Copy)]
pub struct MarchingCubes {
    table: &'static MarchingCubeTable,
}

impl Default for MarchingCubes {
    fn default() -> Self {
        Self::new()
    }
}

impl MarchingCubes {
    #[must_use]
    pub fn new() -> Self {
        Self {
            table: MarchingCubeTable::shared(),
        }
    }

    /// Returns the case tables this extractor reads.
    #[must_use]
    pub fn table(&self) -> &'static MarchingCubeTable {
        self.table
    }

    /// Extracts the isosurface of `volume` at `isolevel`.
    ///
    /// Deterministic: the same field and isolevel always yield the same list.
    #[must_use]
    pub fn extract<T: Scalar>(&self, volume: &Volume<T>, isolevel: T) -> Vec<Triangle> {
        let mut triangles = Vec::new();
        let mut cells = 0usize;
        for cell in volume.boundary_cells(isolevel) {
            polygonise_into(&cell, isolevel, &mut triangles);
            cells += 1;
        }
        log::debug!(
            "marching cubes: {cells} boundary cells -> {} triangles (isolevel {isolevel:?})",
            triangles.len()
        );
        triangles
    }

    /// Extracts the isosurface using the rayon thread pool.
    ///
    /// Each `x` slab of cells is triangulated independently and the slabs are
    /// concatenated in index order, so the result equals [`extract`](Self::extract).
    #[must_use]
    pub fn extract_parallel<T: Scalar>(&self, volume: &Volume<T>, isolevel: T) -> Vec<Triangle> {
        let slabs: Vec<Vec<Triangle>> = (0..volume.space().cell_dim().x)
            .into_par_iter()
            .map(|ix| {
                let mut out = Vec::new();
                for cell in volume
                    .cells_in_slab(ix)
                    .filter(|cell| cell.is_boundary(isolevel))
                {
                    polygonise_into(&cell, isolevel, &mut out);
                }
                out
            })
            .collect();
        let triangles = slabs.concat();
        log::debug!(
            "marching cubes (parallel, {} slabs): {} triangles (isolevel {isolevel:?})",
            slabs.len(),
            triangles.len()
        );
        triangles
    }
}

/// Extracts the isosurface of `volume` at `isolevel` with the shared tables.
#[must_use]
pub fn marching_cubes<T: Scalar>(volume: &Volume<T>, isolevel: T) -> Vec<Triangle> {
    MarchingCubes::new().extract(volume, isolevel)
}
