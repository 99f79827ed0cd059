//! Closest-point queries over a whole mesh.
//!
//! [`ClosestPointQuery`] copies a mesh out of a [`MeshSource`] once, at
//! construction, and then answers any number of queries against it. Small
//! meshes are scanned face by face; larger meshes are indexed with a loose
//! octree and searched best-first, expanding nodes in order of their
//! squared distance to the query point.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use nalgebra::Point3;
use tracing::{debug, info};

use crate::bounds::{Aabb, BoundingCube};
use crate::error::{ProximityError, ProximityResult};
use crate::mesh::{Face, MeshSource};
use crate::octree::OctreeNode;
use crate::triangle::{closest_point_on_face, SurfacePoint};

/// Check whether any component of a point is NaN.
///
/// An all-NaN point is how [`ClosestPointQuery::closest_point`] reports
/// that no surface point lies within the search radius; this is the
/// detection path for that marker.
#[inline]
#[must_use]
pub fn has_nan(point: &Point3<f32>) -> bool {
    point.x.is_nan() || point.y.is_nan() || point.z.is_nan()
}

/// The starting "no result yet" state: an all-NaN point whose squared
/// distance is the search radius itself. Only strictly closer candidates
/// replace it, which enforces the radius gate and lets the indexed search
/// prune against the radius from the first node on.
fn unreachable_marker(sqr_max: f32) -> SurfacePoint {
    SurfacePoint {
        point: Point3::new(f32::NAN, f32::NAN, f32::NAN),
        distance_squared: sqr_max,
    }
}

/// A face handle paired with the face's bounding box, as stored in the
/// octree. The handle is an index into the engine's face array.
#[derive(Debug, Clone)]
struct FaceElement {
    face: usize,
    bounds: Aabb,
}

fn element_intersects(cube: &BoundingCube, element: &FaceElement) -> bool {
    cube.intersects(&element.bounds)
}

/// Frontier entry for the best-first search, ordered nearest-first.
struct NodeEntry<'a> {
    distance_squared: f32,
    node: &'a OctreeNode<FaceElement>,
}

impl PartialEq for NodeEntry<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.distance_squared.total_cmp(&other.distance_squared) == Ordering::Equal
    }
}

impl Eq for NodeEntry<'_> {}

impl PartialOrd for NodeEntry<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for NodeEntry<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap pops the maximum; reverse so the nearest node wins.
        other.distance_squared.total_cmp(&self.distance_squared)
    }
}

/// Closest-point queries against a static triangle/quad mesh.
///
/// Construction copies the vertices and faces out of the source and, for
/// meshes of at least [`MIN_PARTITION_FACES`](Self::MIN_PARTITION_FACES)
/// faces, partitions space with a loose octree. The engine is immutable
/// afterwards, so `&self` queries may run concurrently from any number of
/// threads.
///
/// # Example
///
/// ```
/// use mesh_proximity::{ClosestPointQuery, Face, PolygonMesh, Point3};
///
/// let mesh = PolygonMesh::from_parts(
///     vec![
///         Point3::new(0.0, 0.0, 0.0),
///         Point3::new(1.0, 0.0, 0.0),
///         Point3::new(0.0, 1.0, 0.0),
///     ],
///     vec![Face::triangle(0, 1, 2)],
/// );
///
/// let query = ClosestPointQuery::new(&mesh)?;
/// let hit = query.closest_point(Point3::new(1.0, 1.0, 0.0), f32::INFINITY)?;
/// assert_eq!(hit, Point3::new(0.5, 0.5, 0.0));
/// # Ok::<(), mesh_proximity::ProximityError>(())
/// ```
#[derive(Debug)]
pub struct ClosestPointQuery {
    vertices: Vec<Point3<f32>>,
    faces: Vec<Face>,
    partition: Option<OctreeNode<FaceElement>>,
}

impl ClosestPointQuery {
    /// Meshes with fewer faces than this are scanned linearly instead of
    /// being indexed.
    pub const MIN_PARTITION_FACES: usize = 32;

    /// Build a query engine for a mesh.
    ///
    /// The source is read once and not retained.
    ///
    /// # Errors
    ///
    /// Returns [`ProximityError::EmptyMesh`] when the source enumerates no
    /// vertices.
    ///
    /// # Panics
    ///
    /// Partitioning indexes vertices through face indices; a face index
    /// out of range for the vertex enumeration panics. Sources must keep
    /// the two enumerations consistent.
    pub fn new(mesh: &impl MeshSource) -> ProximityResult<Self> {
        let vertices: Vec<Point3<f32>> = mesh.vertices().collect();
        let faces: Vec<Face> = mesh.faces().collect();
        if vertices.is_empty() {
            return Err(ProximityError::EmptyMesh);
        }
        debug!(
            vertex_count = vertices.len(),
            face_count = faces.len(),
            "Copied mesh for proximity queries"
        );

        let partition = if faces.len() >= Self::MIN_PARTITION_FACES {
            let root = partition_space(&vertices, &faces);
            info!(
                face_count = faces.len(),
                leaf_count = root.leaf_count(),
                "Partitioned mesh into a loose octree"
            );
            Some(root)
        } else {
            None
        };

        Ok(Self {
            vertices,
            faces,
            partition,
        })
    }

    /// Number of vertices copied from the source.
    #[inline]
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of faces copied from the source.
    #[inline]
    #[must_use]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Whether an octree index was built at construction.
    #[inline]
    #[must_use]
    pub const fn is_partitioned(&self) -> bool {
        self.partition.is_some()
    }

    /// Find the point on the mesh surface closest to `query`, looking no
    /// farther than `max_dist` (which may be `f32::INFINITY`).
    ///
    /// When no surface point lies within `max_dist`, the returned point
    /// has all components NaN; check with [`has_nan`].
    ///
    /// # Errors
    ///
    /// Propagates [`ProximityError::DegenerateTriangle`] and
    /// [`ProximityError::UnsupportedFace`] from the faces it evaluates. A
    /// single bad face fails the whole query; the mesh contract is total.
    ///
    /// # Panics
    ///
    /// Panics if a face index is out of range for the vertex array;
    /// sources must uphold the index validity contract of
    /// [`MeshSource`](crate::MeshSource).
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_proximity::{has_nan, ClosestPointQuery, Face, PolygonMesh, Point3};
    ///
    /// let mesh = PolygonMesh::from_parts(
    ///     vec![
    ///         Point3::new(0.0, 0.0, 0.0),
    ///         Point3::new(1.0, 0.0, 0.0),
    ///         Point3::new(0.0, 1.0, 0.0),
    ///     ],
    ///     vec![Face::triangle(0, 1, 2)],
    /// );
    /// let query = ClosestPointQuery::new(&mesh)?;
    ///
    /// // Nothing within one unit of a faraway point.
    /// let miss = query.closest_point(Point3::new(-100.0, -100.0, -100.0), 1.0)?;
    /// assert!(has_nan(&miss));
    /// # Ok::<(), mesh_proximity::ProximityError>(())
    /// ```
    pub fn closest_point(
        &self,
        query: Point3<f32>,
        max_dist: f32,
    ) -> ProximityResult<Point3<f32>> {
        let sqr_max = max_dist * max_dist;
        let best = match &self.partition {
            Some(root) => self.search_partition(root, query, sqr_max)?,
            None => self.scan_faces(query, sqr_max)?,
        };
        Ok(best.point)
    }

    /// Linear mode: fold every face through the kernel.
    fn scan_faces(&self, query: Point3<f32>, sqr_max: f32) -> ProximityResult<SurfacePoint> {
        let mut best = unreachable_marker(sqr_max);
        for face in &self.faces {
            let candidate = closest_point_on_face(query, face, &self.vertices)?;
            if candidate.distance_squared < best.distance_squared {
                best = candidate;
            }
        }
        Ok(best)
    }

    /// Indexed mode: best-first search over the octree.
    ///
    /// The frontier is ordered by squared distance from the query point to
    /// each node's cube, a lower bound for every face beneath the node.
    /// Once the nearest frontier node cannot beat the current best, no
    /// unexplored node can, and the search stops. Because the best starts
    /// at the radius, subtrees entirely beyond `max_dist` are never
    /// entered at all.
    fn search_partition(
        &self,
        root: &OctreeNode<FaceElement>,
        query: Point3<f32>,
        sqr_max: f32,
    ) -> ProximityResult<SurfacePoint> {
        let mut best = unreachable_marker(sqr_max);
        let mut frontier = BinaryHeap::new();
        frontier.push(NodeEntry {
            distance_squared: root.bounds().distance_squared_to(&query),
            node: root,
        });

        while let Some(entry) = frontier.pop() {
            if entry.distance_squared >= best.distance_squared {
                break;
            }

            if entry.node.is_leaf() {
                // The same face may surface in several leaves (loose
                // octree); the strict-less update makes revisits harmless.
                for element in entry.node.elements() {
                    let candidate =
                        closest_point_on_face(query, &self.faces[element.face], &self.vertices)?;
                    if candidate.distance_squared < best.distance_squared {
                        best = candidate;
                    }
                }
            } else {
                for child in entry.node.children() {
                    let distance_squared = child.bounds().distance_squared_to(&query);
                    if distance_squared < best.distance_squared {
                        frontier.push(NodeEntry {
                            distance_squared,
                            node: child,
                        });
                    }
                }
            }
        }

        Ok(best)
    }
}

/// Build the loose octree over the faces of a mesh.
fn partition_space(vertices: &[Point3<f32>], faces: &[Face]) -> OctreeNode<FaceElement> {
    let extent = Aabb::from_points(vertices.iter());
    let mut root = OctreeNode::new(BoundingCube::enclosing(&extent));

    for (index, face) in faces.iter().enumerate() {
        let bounds = Aabb::from_points(face.indices.iter().map(|&i| &vertices[i as usize]));
        root.insert(FaceElement { face: index, bounds }, &element_intersects);
    }
    root
}
