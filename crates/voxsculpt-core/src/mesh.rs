//! Indexed triangle mesh built from an extracted triangle list.

#![allow(clippy::cast_possible_truncation)]

use std::collections::HashMap;

use glam::Vec3;

use crate::domain::SpatialDomain;
use crate::marching_cubes::Triangle;

/// Indexed isosurface mesh.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IsoMesh {
    /// Vertex positions in world space.
    pub vertices: Vec<Vec3>,
    /// Per-vertex normals, area-weighted sums of the adjacent face normals, normalized.
    pub normals: Vec<Vec3>,
    /// Triangle indices (every 3 consecutive indices form a triangle).
    pub indices: Vec<u32>,
}

impl IsoMesh {
    /// Builds a mesh from a triangle list.
    ///
    /// With `weld` set, vertices with bit-identical positions share one index;
    /// otherwise every triangle gets its own three vertices.
    #[must_use]
    pub fn from_triangles(triangles: &[Triangle], weld: bool) -> Self {
        let mut mesh = Self {
            vertices: Vec::with_capacity(triangles.len() * 3),
            normals: Vec::with_capacity(triangles.len() * 3),
            indices: Vec::with_capacity(triangles.len() * 3),
        };
        let mut lookup: HashMap<[u32; 3], u32> = HashMap::new();

        for triangle in triangles {
            let mut face = [0u32; 3];
            for (slot, v) in face.iter_mut().zip(triangle.vertices()) {
                *slot = if weld {
                    let key = v.to_array().map(f32::to_bits);
                    *lookup
                        .entry(key)
                        .or_insert_with(|| mesh.push_vertex(v))
                } else {
                    mesh.push_vertex(v)
                };
            }
            mesh.indices.extend_from_slice(&face);
            mesh.accumulate_normal(face);
        }

        for normal in &mut mesh.normals {
            *normal = normal.normalize_or_zero();
        }
        log::debug!(
            "built mesh: {} triangles, {} vertices (weld: {weld})",
            mesh.num_triangles(),
            mesh.vertices.len()
        );
        mesh
    }

    /// Returns the number of triangles in the mesh.
    #[must_use]
    pub fn num_triangles(&self) -> usize {
        self.indices.len() / 3
    }

    /// Returns true if the mesh has no triangles.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Returns the tightest box around the vertices, or `None` for an empty mesh.
    #[must_use]
    pub fn bounding_box(&self) -> Option<SpatialDomain> {
        let first = *self.vertices.first()?;
        let (min, max) = self
            .vertices
            .iter()
            .fold((first, first), |(lo, hi), &v| (lo.min(v), hi.max(v)));
        SpatialDomain::from_corners(min, max).ok()
    }

    /// Iterates the faces as world-space triangles.
    pub fn triangles(&self) -> impl Iterator<Item = Triangle> + '_ {
        self.indices.chunks_exact(3).map(|f| {
            Triangle::new(
                self.vertices[f[0] as usize],
                self.vertices[f[1] as usize],
                self.vertices[f[2] as usize],
            )
        })
    }

    fn push_vertex(&mut self, v: Vec3) -> u32 {
        let idx = self.vertices.len() as u32;
        self.vertices.push(v);
        self.normals.push(Vec3::ZERO);
        idx
    }

    /// Adds the face's scaled normal to each of its three vertices.
    fn accumulate_normal(&mut self, [a, b, c]: [u32; 3]) {
        let n = Triangle::new(
            self.vertices[a as usize],
            self.vertices[b as usize],
            self.vertices[c as usize],
        )
        .scaled_normal();
        self.normals[a as usize] += n;
        self.normals[b as usize] += n;
        self.normals[c as usize] += n;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid_space::GridSpace;
    use crate::marching_cubes::marching_cubes;
    use crate::volume::Volume;

    fn quad() -> Vec<Triangle> {
        vec![
            Triangle::new(Vec3::ZERO, Vec3::X, Vec3::new(1.0, 1.0, 0.0)),
            Triangle::new(Vec3::ZERO, Vec3::new(1.0, 1.0, 0.0), Vec3::Y),
        ]
    }

    fn sphere_triangles(n: u32, radius: f32) -> Vec<Triangle> {
        let domain = SpatialDomain::new(Vec3::splat(-1.0), Vec3::splat(2.0)).unwrap();
        let space = GridSpace::new_uniform(domain, n).unwrap();
        let values = space
            .indices()
            .map(|i| space.cell_center(i.x, i.y, i.z).length() - radius)
            .collect();
        marching_cubes(&Volume::from_values(space, values).unwrap(), 0.0)
    }

    #[test]
    fn test_empty() {
        let mesh = IsoMesh::from_triangles(&[], true);
        assert!(mesh.is_empty());
        assert_eq!(mesh.num_triangles(), 0);
        assert!(mesh.bounding_box().is_none());
    }

    #[test]
    fn test_weld_shares_vertices() {
        let welded = IsoMesh::from_triangles(&quad(), true);
        assert_eq!(welded.num_triangles(), 2);
        assert_eq!(welded.vertices.len(), 4);
        assert_eq!(welded.indices, vec![0, 1, 2, 0, 2, 3]);

        let split = IsoMesh::from_triangles(&quad(), false);
        assert_eq!(split.num_triangles(), 2);
        assert_eq!(split.vertices.len(), 6);
        assert_eq!(split.indices, vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_normals() {
        let mesh = IsoMesh::from_triangles(&quad(), true);
        assert_eq!(mesh.vertices.len(), mesh.normals.len());
        for n in &mesh.normals {
            assert!((*n - Vec3::Z).length() < 1e-6, "normal {n}");
        }
    }

    #[test]
    fn test_degenerate_triangle_has_zero_normal() {
        let t = Triangle::new(Vec3::ONE, Vec3::ONE, Vec3::ONE);
        let mesh = IsoMesh::from_triangles(&[t], false);
        assert!(mesh.normals.iter().all(|n| *n == Vec3::ZERO));
    }

    #[test]
    fn test_bounding_box() {
        let mesh = IsoMesh::from_triangles(&quad(), true);
        let bbox = mesh.bounding_box().unwrap();
        assert_eq!(bbox.start(), Vec3::ZERO);
        assert_eq!(bbox.end(), Vec3::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn test_triangles_round_trip() {
        let mesh = IsoMesh::from_triangles(&quad(), true);
        let back: Vec<_> = mesh.triangles().collect();
        assert_eq!(back, quad());
    }

    #[test]
    fn test_welded_sphere_is_closed() {
        let triangles = sphere_triangles(16, 0.61);
        let mesh = IsoMesh::from_triangles(&triangles, true);
        assert_eq!(mesh.num_triangles(), triangles.len());
        assert!(mesh.vertices.len() < triangles.len() * 3);

        // Every directed edge appears once and its reverse appears once.
        let mut edges: HashMap<(u32, u32), usize> = HashMap::new();
        for f in mesh.indices.chunks_exact(3) {
            for (a, b) in [(f[0], f[1]), (f[1], f[2]), (f[2], f[0])] {
                *edges.entry((a, b)).or_default() += 1;
            }
        }
        for (&(a, b), &count) in &edges {
            assert_eq!(count, 1, "edge {a}->{b} used {count} times");
            assert_eq!(edges.get(&(b, a)), Some(&1), "edge {a}->{b} has no twin");
        }

        for (v, n) in mesh.vertices.iter().zip(&mesh.normals) {
            assert!((n.length() - 1.0).abs() < 1e-3);
            // Interior is negative, so normals face the centre.
            assert!(n.dot(*v) < 0.0);
        }
    }
}
