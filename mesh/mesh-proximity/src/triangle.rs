//! Closest-point queries against single faces.
//!
//! The triangle kernel implements the closed-form method from
//! "Distance Between Point and Triangle in 3D" by David Eberly: the query
//! point is projected into the triangle's (s, t) parameter plane, the
//! unconstrained minimizer is classified into one of seven regions, and
//! the region's clamping rule yields the nearest feasible point.
//! Quadrilaterals are handled by splitting into two triangles.

use nalgebra::Point3;

use crate::error::{ProximityError, ProximityResult};
use crate::mesh::Face;

/// A point on a mesh surface together with its squared distance to the
/// query point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfacePoint {
    /// Coordinate on the surface.
    pub point: Point3<f32>,
    /// Squared distance from the query point to `point`.
    pub distance_squared: f32,
}

impl SurfacePoint {
    /// Euclidean distance from the query point to the surface point.
    #[inline]
    #[must_use]
    pub fn distance(&self) -> f32 {
        self.distance_squared.sqrt()
    }
}

/// Compute the point on a triangle closest to a query point.
///
/// The triangle is parameterized as `v0 + s·(v1−v0) + t·(v2−v0)` with
/// `s ≥ 0`, `t ≥ 0`, `s + t ≤ 1`.
///
/// # Errors
///
/// Returns [`ProximityError::DegenerateTriangle`] when the vertices are
/// collinear (the Gram determinant `a·c − b·b` is exactly zero).
///
/// # Example
///
/// ```
/// use mesh_proximity::{closest_point_on_triangle, Point3};
///
/// let v0 = Point3::new(0.0, 0.0, 0.0);
/// let v1 = Point3::new(1.0, 0.0, 0.0);
/// let v2 = Point3::new(0.0, 1.0, 0.0);
///
/// // A point above the hypotenuse projects onto its midpoint.
/// let result = closest_point_on_triangle(Point3::new(1.0, 1.0, 0.0), v0, v1, v2)?;
/// assert_eq!(result.point, Point3::new(0.5, 0.5, 0.0));
/// assert!((result.distance_squared - 0.5).abs() < 1e-6);
/// # Ok::<(), mesh_proximity::ProximityError>(())
/// ```
#[allow(clippy::float_cmp)] // exact zero test: collinearity is a hard fault, not a tolerance
#[allow(clippy::suboptimal_flops)] // fused ops would change which determinants round to zero
#[allow(clippy::many_single_char_names, clippy::similar_names)] // names follow the paper
pub fn closest_point_on_triangle(
    point: Point3<f32>,
    v0: Point3<f32>,
    v1: Point3<f32>,
    v2: Point3<f32>,
) -> ProximityResult<SurfacePoint> {
    let edge0 = v1 - v0;
    let edge1 = v2 - v0;
    let diff = v0 - point;

    let a = edge0.norm_squared();
    let b = edge0.dot(&edge1);
    let c = edge1.norm_squared();
    let d = edge0.dot(&diff);
    let e = edge1.dot(&diff);

    let det = a * c - b * b;
    if det == 0.0 {
        return Err(ProximityError::DegenerateTriangle);
    }

    // Numerators of the unconstrained minimizer; dividing by det is
    // deferred until region 0 is confirmed.
    let s_num = b * e - c * d;
    let t_num = b * d - a * e;

    let (s, t) = if s_num + t_num <= det {
        if s_num < 0.0 {
            if t_num < 0.0 {
                // Region 4: below both edges, behind v0.
                if d < 0.0 {
                    let s = if -d >= a { 1.0 } else { -d / a };
                    (s, 0.0)
                } else {
                    let t = clamp_edge_parameter(e, c);
                    (0.0, t)
                }
            } else {
                // Region 3: project onto the edge s = 0.
                (0.0, clamp_edge_parameter(e, c))
            }
        } else if t_num < 0.0 {
            // Region 5: project onto the edge t = 0.
            (clamp_edge_parameter(d, a), 0.0)
        } else {
            // Region 0: the minimizer lies inside the triangle.
            let inv_det = 1.0 / det;
            (s_num * inv_det, t_num * inv_det)
        }
    } else if s_num < 0.0 {
        // Region 2: past v2, between the extensions of both edges.
        let tmp0 = b + d;
        let tmp1 = c + e;
        if tmp1 > tmp0 {
            let num = tmp1 - tmp0;
            let denom = a - 2.0 * b + c;
            let s = if num >= denom { 1.0 } else { num / denom };
            (s, 1.0 - s)
        } else if tmp1 <= 0.0 {
            (0.0, 1.0)
        } else if e >= 0.0 {
            (0.0, 0.0)
        } else {
            (0.0, -e / c)
        }
    } else if t_num < 0.0 {
        // Region 6: past v1, mirror of region 2 with s and t exchanged.
        let tmp0 = b + e;
        let tmp1 = a + d;
        if tmp1 > tmp0 {
            let num = tmp1 - tmp0;
            let denom = a - 2.0 * b + c;
            let t = if num >= denom { 1.0 } else { num / denom };
            (1.0 - t, t)
        } else if tmp1 <= 0.0 {
            (1.0, 0.0)
        } else if d >= 0.0 {
            (0.0, 0.0)
        } else {
            (-d / a, 0.0)
        }
    } else {
        // Region 1: project onto the hypotenuse s + t = 1.
        let num = c + e - b - d;
        let s = if num <= 0.0 {
            0.0
        } else {
            let denom = a - 2.0 * b + c;
            if num >= denom {
                1.0
            } else {
                num / denom
            }
        };
        (s, 1.0 - s)
    };

    let closest = v0 + edge0 * s + edge1 * t;
    Ok(SurfacePoint {
        point: closest,
        distance_squared: (point - closest).norm_squared(),
    })
}

/// Clamp the 1D minimizer `-num / denom` of an edge projection to [0, 1].
fn clamp_edge_parameter(num: f32, denom: f32) -> f32 {
    if num >= 0.0 {
        0.0
    } else if -num >= denom {
        1.0
    } else {
        -num / denom
    }
}

/// Compute the point on a face closest to a query point.
///
/// Triangles use the kernel directly. Quadrilaterals `(i0, i1, i2, i3)` are
/// evaluated as the triangles `(v0, v1, v2)` and `(v2, v3, v0)`, keeping
/// whichever result is nearer; for planar convex quads this covers the
/// surface exactly. Neither planarity nor convexity is validated.
///
/// # Errors
///
/// Returns [`ProximityError::UnsupportedFace`] when the face does not have
/// 3 or 4 vertices, and propagates [`ProximityError::DegenerateTriangle`]
/// from the kernel.
///
/// # Panics
///
/// Panics if a face index is out of range for `vertices`; sources must
/// uphold the index validity contract of
/// [`MeshSource`](crate::MeshSource).
pub fn closest_point_on_face(
    point: Point3<f32>,
    face: &Face,
    vertices: &[Point3<f32>],
) -> ProximityResult<SurfacePoint> {
    let vertex_count = face.vertex_count();
    if !(3..=4).contains(&vertex_count) {
        return Err(ProximityError::UnsupportedFace { vertex_count });
    }

    let v0 = vertices[face.indices[0] as usize];
    let v1 = vertices[face.indices[1] as usize];
    let v2 = vertices[face.indices[2] as usize];

    let first = closest_point_on_triangle(point, v0, v1, v2)?;
    if vertex_count == 3 {
        return Ok(first);
    }

    let v3 = vertices[face.indices[3] as usize];
    let second = closest_point_on_triangle(point, v2, v3, v0)?;
    Ok(if second.distance_squared < first.distance_squared {
        second
    } else {
        first
    })
}
