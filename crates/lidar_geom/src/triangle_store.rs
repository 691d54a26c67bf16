use lidar_math::{Aabb, Vec3};

use crate::GeometryError;

/// Immutable, validated triangle mesh.
///
/// Vertices and indices are stored flat, matching the layout a caller would
/// hand over from a mesh importer or procedural generator. Per-triangle
/// centroids and bounding boxes are precomputed at construction time since
/// both the BVH builder and its traversal need them repeatedly.
#[derive(Clone, Debug)]
pub struct TriangleStore {
    positions: Vec<Vec3>,
    indices: Vec<u32>,
    centroids: Vec<Vec3>,
    bounds: Vec<Aabb>,
    world_bounds: Aabb,
    degenerate_count: usize,
}

impl TriangleStore {
    /// Build a triangle store from flat vertex positions and triangle
    /// indices, validating both before committing to a layout.
    ///
    /// `vertices` is a flat `[x, y, z, x, y, z, ...]` array; `indices` is a
    /// flat `[a, b, c, a, b, c, ...]` array, one triple per triangle.
    pub fn new(vertices: &[f32], indices: &[u32]) -> Result<Self, GeometryError> {
        if vertices.len() % 3 != 0 {
            return Err(GeometryError::MalformedVertexBuffer {
                len: vertices.len(),
            });
        }
        if indices.len() % 3 != 0 {
            return Err(GeometryError::MalformedIndexBuffer { len: indices.len() });
        }

        let vertex_count = vertices.len() / 3;
        if vertex_count > u32::MAX as usize {
            return Err(GeometryError::TooManyVertices { count: vertex_count });
        }

        for &idx in indices {
            if idx as usize >= vertex_count {
                return Err(GeometryError::IndexOutOfRange {
                    index: idx,
                    vertex_count,
                });
            }
        }

        let positions: Vec<Vec3> = vertices
            .chunks_exact(3)
            .map(|c| Vec3::new(c[0], c[1], c[2]))
            .collect();

        let triangle_count = indices.len() / 3;
        let mut centroids = Vec::with_capacity(triangle_count);
        let mut bounds = Vec::with_capacity(triangle_count);
        let mut world_bounds = Aabb::EMPTY;
        let mut degenerate_count = 0;

        for tri in indices.chunks_exact(3) {
            let a = positions[tri[0] as usize];
            let b = positions[tri[1] as usize];
            let c = positions[tri[2] as usize];

            if tri[0] == tri[1] || tri[1] == tri[2] || tri[0] == tri[2] {
                degenerate_count += 1;
            }

            let centroid = (a + b + c) / 3.0;
            let tri_bounds = Aabb::surrounding(&Aabb::from_points(a, b), &Aabb::from_points(b, c));

            world_bounds = Aabb::surrounding(&world_bounds, &tri_bounds);
            centroids.push(centroid);
            bounds.push(tri_bounds);
        }

        log::debug!(
            "built triangle store: {} vertices, {} triangles, {} degenerate",
            vertex_count,
            triangle_count,
            degenerate_count
        );

        Ok(Self {
            positions,
            indices: indices.to_vec(),
            centroids,
            bounds,
            world_bounds,
            degenerate_count,
        })
    }

    /// Number of vertices in the store.
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of triangles in the store.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// The three vertex positions of triangle `i`.
    pub fn triangle_vertices(&self, i: usize) -> (Vec3, Vec3, Vec3) {
        let base = i * 3;
        (
            self.positions[self.indices[base] as usize],
            self.positions[self.indices[base + 1] as usize],
            self.positions[self.indices[base + 2] as usize],
        )
    }

    /// Precomputed centroid of triangle `i`.
    pub fn triangle_centroid(&self, i: usize) -> Vec3 {
        self.centroids[i]
    }

    /// Precomputed bounding box of triangle `i`.
    pub fn triangle_aabb(&self, i: usize) -> Aabb {
        self.bounds[i]
    }

    /// Bounding box of the entire mesh.
    pub fn world_bounds(&self) -> Aabb {
        self.world_bounds
    }

    /// Number of triangles with a repeated vertex index (zero area). These
    /// are kept in the store rather than rejected, but never report a hit:
    /// their determinant is numerically zero under
    /// `lidar_accel`'s near-parallel rejection threshold.
    pub fn degenerate_triangle_count(&self) -> usize {
        self.degenerate_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single_triangle() -> (Vec<f32>, Vec<u32>) {
        let vertices = vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0];
        let indices = vec![0, 1, 2];
        (vertices, indices)
    }

    #[test]
    fn test_single_triangle_store() {
        let (vertices, indices) = single_triangle();
        let store = TriangleStore::new(&vertices, &indices).unwrap();

        assert_eq!(store.vertex_count(), 3);
        assert_eq!(store.triangle_count(), 1);

        let (a, b, c) = store.triangle_vertices(0);
        assert_eq!(a, Vec3::new(0.0, 0.0, 0.0));
        assert_eq!(b, Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(c, Vec3::new(0.0, 1.0, 0.0));

        let centroid = store.triangle_centroid(0);
        assert!((centroid - Vec3::new(1.0 / 3.0, 1.0 / 3.0, 0.0)).length() < 1e-6);
    }

    #[test]
    fn test_empty_store() {
        let store = TriangleStore::new(&[], &[]).unwrap();
        assert_eq!(store.vertex_count(), 0);
        assert_eq!(store.triangle_count(), 0);
        assert_eq!(store.world_bounds(), Aabb::EMPTY);
    }

    #[test]
    fn test_rejects_malformed_vertex_buffer() {
        let err = TriangleStore::new(&[0.0, 0.0], &[]).unwrap_err();
        assert!(matches!(err, GeometryError::MalformedVertexBuffer { .. }));
    }

    #[test]
    fn test_rejects_malformed_index_buffer() {
        let (vertices, _) = single_triangle();
        let err = TriangleStore::new(&vertices, &[0, 1]).unwrap_err();
        assert!(matches!(err, GeometryError::MalformedIndexBuffer { .. }));
    }

    #[test]
    fn test_rejects_out_of_range_index() {
        let (vertices, _) = single_triangle();
        let err = TriangleStore::new(&vertices, &[0, 1, 5]).unwrap_err();
        assert!(matches!(err, GeometryError::IndexOutOfRange { .. }));
    }

    #[test]
    fn test_degenerate_triangle_is_counted_but_not_rejected() {
        let vertices = vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0];
        // Triangle (0, 1, 1) repeats an index: zero area, but still valid
        // geometry since every index is in range.
        let indices = vec![0, 1, 1];
        let store = TriangleStore::new(&vertices, &indices).unwrap();

        assert_eq!(store.triangle_count(), 1);
        assert_eq!(store.degenerate_triangle_count(), 1);
    }

    #[test]
    fn test_non_degenerate_mesh_has_zero_degenerate_count() {
        let (vertices, indices) = single_triangle();
        let store = TriangleStore::new(&vertices, &indices).unwrap();
        assert_eq!(store.degenerate_triangle_count(), 0);
    }

    #[test]
    fn test_world_bounds_covers_all_triangles() {
        let vertices = vec![
            0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 5.0, 5.0, 5.0, 6.0, 5.0, 5.0, 5.0, 6.0,
            5.0,
        ];
        let indices = vec![0, 1, 2, 3, 4, 5];
        let store = TriangleStore::new(&vertices, &indices).unwrap();

        let bounds = store.world_bounds();
        assert_eq!(bounds.min(), Vec3::new(0.0, 0.0, 0.0));
        assert_eq!(bounds.max(), Vec3::new(6.0, 6.0, 5.0));
    }
}
