//! Closest-point queries on triangle/quad meshes.
//!
//! This crate answers nearest-point queries against a static polygonal
//! surface: given a query point and a maximum search radius, it returns
//! the coordinate on the mesh surface closest to the query.
//!
//! - [`ClosestPointQuery`] - The query engine; copies a mesh once, answers
//!   many queries
//! - [`MeshSource`] - The boundary through which meshes are supplied
//! - [`PolygonMesh`] - A ready-made in-memory mesh source
//! - [`OctreeNode`] - The loose octree backing the spatial index
//! - [`Aabb`] and [`BoundingCube`] - Axis-aligned bounding volumes
//! - [`closest_point_on_triangle`] - The exact point-to-triangle kernel
//!
//! # Layer 0 Crate
//!
//! This is a Layer 0 crate with **zero engine dependencies**. It can be
//! used in:
//! - CLI tools
//! - Web applications (WASM)
//! - Servers
//! - Game engines
//! - Python bindings
//!
//! # How It Works
//!
//! Construction copies the mesh's vertices and faces and, for meshes of at
//! least 32 faces, sorts the faces into a loose octree keyed by their
//! bounding boxes. A query then runs a best-first search over the tree,
//! expanding nodes in order of squared distance from the query point and
//! pruning every subtree that cannot beat the best face found so far.
//! Small meshes skip the index and scan faces directly. Distances to
//! individual triangles come from Eberly's closed-form nearest-point
//! solution; quadrilaterals are split into two triangles.
//!
//! # Precision
//!
//! All coordinates are `f32`. The crate is unit-agnostic.
//!
//! # Example
//!
//! ```
//! use mesh_proximity::{has_nan, ClosestPointQuery, Face, PolygonMesh, Point3};
//!
//! // A unit square in the z = 0 plane.
//! let mesh = PolygonMesh::from_parts(
//!     vec![
//!         Point3::new(0.0, 0.0, 0.0),
//!         Point3::new(1.0, 0.0, 0.0),
//!         Point3::new(1.0, 1.0, 0.0),
//!         Point3::new(0.0, 1.0, 0.0),
//!     ],
//!     vec![Face::quad(0, 1, 2, 3)],
//! );
//!
//! let query = ClosestPointQuery::new(&mesh)?;
//!
//! // A point above the square projects straight down onto it.
//! let hit = query.closest_point(Point3::new(0.25, 0.75, 2.0), f32::INFINITY)?;
//! assert_eq!(hit, Point3::new(0.25, 0.75, 0.0));
//!
//! // Nothing within half a unit of a faraway point.
//! let miss = query.closest_point(Point3::new(10.0, 10.0, 10.0), 0.5)?;
//! assert!(has_nan(&miss));
//! # Ok::<(), mesh_proximity::ProximityError>(())
//! ```
//!
//! # Thread Safety
//!
//! The engine is immutable after construction; `&self` queries may run
//! concurrently from any number of threads without locking.

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod bounds;
mod error;
mod mesh;
mod octree;
mod query;
mod triangle;

// Re-export core types
pub use bounds::{Aabb, BoundingCube};
pub use error::{ProximityError, ProximityResult};
pub use mesh::{Face, MeshSource, PolygonMesh};
pub use octree::OctreeNode;
pub use query::{has_nan, ClosestPointQuery};
pub use triangle::{closest_point_on_face, closest_point_on_triangle, SurfacePoint};

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, Vector3};
