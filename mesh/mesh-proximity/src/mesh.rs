//! Mesh faces and the mesh source boundary.

use nalgebra::Point3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A polygonal face, stored as ordered indices into a vertex array.
///
/// Proximity queries accept triangles and quadrilaterals; a face of any
/// other length is rejected at query time with
/// [`ProximityError::UnsupportedFace`](crate::ProximityError::UnsupportedFace).
///
/// # Example
///
/// ```
/// use mesh_proximity::Face;
///
/// let tri = Face::triangle(0, 1, 2);
/// assert_eq!(tri.vertex_count(), 3);
///
/// let quad = Face::quad(0, 1, 2, 3);
/// assert_eq!(quad.vertex_count(), 4);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Face {
    /// Vertex indices, in winding order.
    pub indices: Vec<u32>,
}

impl Face {
    /// Create a face from arbitrary vertex indices.
    ///
    /// The length is not validated here; queries reject anything that is
    /// not a triangle or a quadrilateral.
    #[inline]
    #[must_use]
    pub const fn new(indices: Vec<u32>) -> Self {
        Self { indices }
    }

    /// Create a triangular face.
    #[inline]
    #[must_use]
    pub fn triangle(a: u32, b: u32, c: u32) -> Self {
        Self {
            indices: vec![a, b, c],
        }
    }

    /// Create a quadrilateral face.
    #[inline]
    #[must_use]
    pub fn quad(a: u32, b: u32, c: u32, d: u32) -> Self {
        Self {
            indices: vec![a, b, c, d],
        }
    }

    /// Number of vertices in this face.
    #[inline]
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.indices.len()
    }
}

impl From<[u32; 3]> for Face {
    fn from([a, b, c]: [u32; 3]) -> Self {
        Self::triangle(a, b, c)
    }
}

impl From<[u32; 4]> for Face {
    fn from([a, b, c, d]: [u32; 4]) -> Self {
        Self::quad(a, b, c, d)
    }
}

/// The boundary through which a mesh is handed to the query engine.
///
/// Implementations expose two read operations: the vertex coordinates and
/// the faces as vertex-index tuples. The engine consumes a source exactly
/// once, at construction, and keeps no reference to it afterwards.
///
/// Face indices must be valid into the vertex enumeration; the source is
/// responsible for keeping the two calls consistent.
pub trait MeshSource {
    /// Enumerate the vertex coordinates of the mesh.
    fn vertices(&self) -> impl Iterator<Item = Point3<f32>>;

    /// Enumerate the faces of the mesh.
    fn faces(&self) -> impl Iterator<Item = Face>;
}

/// A plain in-memory mesh of triangles and quadrilaterals.
///
/// This is the ready-made [`MeshSource`] for callers that do not have their
/// own mesh representation.
///
/// # Example
///
/// ```
/// use mesh_proximity::{Face, PolygonMesh, Point3};
///
/// let mut mesh = PolygonMesh::new();
/// mesh.vertices.push(Point3::new(0.0, 0.0, 0.0));
/// mesh.vertices.push(Point3::new(1.0, 0.0, 0.0));
/// mesh.vertices.push(Point3::new(0.0, 1.0, 0.0));
/// mesh.faces.push(Face::triangle(0, 1, 2));
///
/// assert_eq!(mesh.vertex_count(), 3);
/// assert_eq!(mesh.face_count(), 1);
/// assert!(!mesh.is_empty());
/// ```
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PolygonMesh {
    /// Vertex positions.
    pub vertices: Vec<Point3<f32>>,

    /// Faces referencing the vertex array by index.
    pub faces: Vec<Face>,
}

impl PolygonMesh {
    /// Create a new empty mesh.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            vertices: Vec::new(),
            faces: Vec::new(),
        }
    }

    /// Create a mesh with pre-allocated capacity.
    #[inline]
    #[must_use]
    pub fn with_capacity(vertex_count: usize, face_count: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertex_count),
            faces: Vec::with_capacity(face_count),
        }
    }

    /// Create a mesh from vertex and face arrays.
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_proximity::{Face, PolygonMesh, Point3};
    ///
    /// let mesh = PolygonMesh::from_parts(
    ///     vec![
    ///         Point3::new(0.0, 0.0, 0.0),
    ///         Point3::new(1.0, 0.0, 0.0),
    ///         Point3::new(0.0, 1.0, 0.0),
    ///     ],
    ///     vec![Face::triangle(0, 1, 2)],
    /// );
    /// assert_eq!(mesh.face_count(), 1);
    /// ```
    #[inline]
    #[must_use]
    pub const fn from_parts(vertices: Vec<Point3<f32>>, faces: Vec<Face>) -> Self {
        Self { vertices, faces }
    }

    /// Number of vertices.
    #[inline]
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of faces.
    #[inline]
    #[must_use]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Check whether the mesh has no vertices.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}

impl MeshSource for PolygonMesh {
    fn vertices(&self) -> impl Iterator<Item = Point3<f32>> {
        self.vertices.iter().copied()
    }

    fn faces(&self) -> impl Iterator<Item = Face> {
        self.faces.iter().cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_face_triangle() {
        let face = Face::triangle(0, 1, 2);
        assert_eq!(face.vertex_count(), 3);
        assert_eq!(face.indices, vec![0, 1, 2]);
    }

    #[test]
    fn test_face_quad() {
        let face = Face::quad(4, 5, 6, 7);
        assert_eq!(face.vertex_count(), 4);
        assert_eq!(face.indices, vec![4, 5, 6, 7]);
    }

    #[test]
    fn test_face_from_arrays() {
        let tri: Face = [0u32, 1, 2].into();
        assert_eq!(tri, Face::triangle(0, 1, 2));

        let quad: Face = [0u32, 1, 2, 3].into();
        assert_eq!(quad, Face::quad(0, 1, 2, 3));
    }

    #[test]
    fn test_face_arbitrary_length() {
        let pentagon = Face::new(vec![0, 1, 2, 3, 4]);
        assert_eq!(pentagon.vertex_count(), 5);
    }

    #[test]
    fn test_mesh_empty() {
        let mesh = PolygonMesh::new();
        assert!(mesh.is_empty());
        assert_eq!(mesh.vertex_count(), 0);
        assert_eq!(mesh.face_count(), 0);
    }

    #[test]
    fn test_mesh_from_parts() {
        let mesh = PolygonMesh::from_parts(
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
            ],
            vec![Face::triangle(0, 1, 2)],
        );
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.face_count(), 1);
        assert!(!mesh.is_empty());
    }

    #[test]
    fn test_mesh_source_iteration() {
        let mesh = PolygonMesh::from_parts(
            vec![Point3::new(1.0, 2.0, 3.0), Point3::new(4.0, 5.0, 6.0)],
            vec![Face::triangle(0, 1, 0)],
        );

        let vertices: Vec<_> = MeshSource::vertices(&mesh).collect();
        assert_eq!(vertices.len(), 2);
        assert_eq!(vertices[0], Point3::new(1.0, 2.0, 3.0));

        let faces: Vec<_> = MeshSource::faces(&mesh).collect();
        assert_eq!(faces.len(), 1);
        assert_eq!(faces[0].vertex_count(), 3);
    }

    #[test]
    fn test_mesh_with_capacity_starts_empty() {
        let mesh = PolygonMesh::with_capacity(100, 200);
        assert!(mesh.is_empty());
    }
}
