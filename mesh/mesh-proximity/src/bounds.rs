//! Axis-aligned bounding volumes.
//!
//! Two shapes cover the needs of the spatial index: [`Aabb`], a per-axis
//! box that doubles as the min/max accumulator while reducing point sets,
//! and [`BoundingCube`], the uniform cube used for octree node regions.

use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An axis-aligned bounding box.
///
/// Defined by minimum and maximum corner points.
///
/// # Example
///
/// ```
/// use mesh_proximity::{Aabb, Point3};
///
/// let points = vec![
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(10.0, 5.0, 3.0),
///     Point3::new(-2.0, 8.0, 1.0),
/// ];
///
/// let aabb = Aabb::from_points(points.iter());
/// assert_eq!(aabb.min, Point3::new(-2.0, 0.0, 0.0));
/// assert_eq!(aabb.max, Point3::new(10.0, 8.0, 3.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Aabb {
    /// Minimum corner (smallest x, y, z values).
    pub min: Point3<f32>,
    /// Maximum corner (largest x, y, z values).
    pub max: Point3<f32>,
}

impl Aabb {
    /// Create a new AABB from minimum and maximum corners.
    ///
    /// The corners are reordered if min > max on any axis.
    #[must_use]
    pub fn new(min: Point3<f32>, max: Point3<f32>) -> Self {
        Self {
            min: Point3::new(min.x.min(max.x), min.y.min(max.y), min.z.min(max.z)),
            max: Point3::new(min.x.max(max.x), min.y.max(max.y), min.z.max(max.z)),
        }
    }

    /// Create an empty (inverted) AABB.
    ///
    /// The empty box has min = +∞ and max = −∞; it is the identity for
    /// [`expand_to_include`](Self::expand_to_include), so it serves as the
    /// starting accumulator when reducing a point set.
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_proximity::{Aabb, Point3};
    ///
    /// let mut aabb = Aabb::empty();
    /// assert!(aabb.is_empty());
    ///
    /// aabb.expand_to_include(&Point3::new(1.0, 2.0, 3.0));
    /// assert!(!aabb.is_empty());
    /// ```
    #[must_use]
    pub fn empty() -> Self {
        Self {
            min: Point3::new(f32::INFINITY, f32::INFINITY, f32::INFINITY),
            max: Point3::new(f32::NEG_INFINITY, f32::NEG_INFINITY, f32::NEG_INFINITY),
        }
    }

    /// Create an AABB covering an iterator of points.
    ///
    /// Returns an empty AABB for an empty iterator.
    #[must_use]
    pub fn from_points<'a>(points: impl Iterator<Item = &'a Point3<f32>>) -> Self {
        let mut aabb = Self::empty();
        for point in points {
            aabb.expand_to_include(point);
        }
        aabb
    }

    /// Grow this AABB to include a point.
    pub fn expand_to_include(&mut self, point: &Point3<f32>) {
        self.min.x = self.min.x.min(point.x);
        self.min.y = self.min.y.min(point.y);
        self.min.z = self.min.z.min(point.z);
        self.max.x = self.max.x.max(point.x);
        self.max.y = self.max.y.max(point.y);
        self.max.z = self.max.z.max(point.z);
    }

    /// Check if the AABB is empty (min > max on any axis).
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    /// Get the size (dimensions) of the AABB.
    #[inline]
    #[must_use]
    pub fn size(&self) -> Vector3<f32> {
        self.max - self.min
    }

    /// Get the center of the AABB.
    #[inline]
    #[must_use]
    pub fn center(&self) -> Point3<f32> {
        Point3::new(
            (self.min.x + self.max.x) * 0.5,
            (self.min.y + self.max.y) * 0.5,
            (self.min.z + self.max.z) * 0.5,
        )
    }

    /// Get the half-extents (per-axis half-widths) of the AABB.
    #[inline]
    #[must_use]
    pub fn half_extents(&self) -> Vector3<f32> {
        self.size() * 0.5
    }

    /// Check if a point is inside the AABB.
    ///
    /// Points on the boundary are considered inside.
    #[must_use]
    pub fn contains(&self, point: &Point3<f32>) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
            && point.z >= self.min.z
            && point.z <= self.max.z
    }
}

impl Default for Aabb {
    fn default() -> Self {
        Self::empty()
    }
}

/// An axis-aligned bounding cube: a center point and a uniform half-width.
///
/// Octree node regions are cubes so that subdividing along all three axes
/// yields eight congruent octants.
///
/// # Example
///
/// ```
/// use mesh_proximity::{BoundingCube, Point3};
///
/// let cube = BoundingCube::new(Point3::origin(), 2.0);
/// assert!(cube.contains(&Point3::new(1.5, -1.5, 0.0)));
/// assert!(!cube.contains(&Point3::new(2.5, 0.0, 0.0)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BoundingCube {
    /// Center of the cube.
    pub center: Point3<f32>,
    /// Half of the cube's edge length.
    pub half_width: f32,
}

impl BoundingCube {
    /// Create a cube from its center and half-width.
    #[inline]
    #[must_use]
    pub const fn new(center: Point3<f32>, half_width: f32) -> Self {
        Self { center, half_width }
    }

    /// The smallest cube containing an AABB.
    ///
    /// Centered at the box's midpoint with half-width equal to half the
    /// largest box dimension.
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_proximity::{Aabb, BoundingCube, Point3};
    ///
    /// let aabb = Aabb::new(Point3::new(0.0, 0.0, 0.0), Point3::new(4.0, 2.0, 1.0));
    /// let cube = BoundingCube::enclosing(&aabb);
    /// assert_eq!(cube.center, Point3::new(2.0, 1.0, 0.5));
    /// assert_eq!(cube.half_width, 2.0);
    /// ```
    #[must_use]
    pub fn enclosing(aabb: &Aabb) -> Self {
        let size = aabb.size();
        Self {
            center: aabb.center(),
            half_width: 0.5 * size.x.max(size.y).max(size.z),
        }
    }

    /// The bounding cube of the octant with the given index.
    ///
    /// The child has half this cube's half-width and its center is offset
    /// by ±child half-width along each axis: bit 0 selects +x, bit 1 +y,
    /// bit 2 +z.
    ///
    /// # Panics
    ///
    /// Panics if `octant >= 8`.
    #[must_use]
    pub fn child(&self, octant: usize) -> Self {
        assert!(octant < 8, "octant index out of range: {octant}");
        let half_width = self.half_width * 0.5;
        let offset = |bit: usize| {
            if octant & bit == 0 {
                -half_width
            } else {
                half_width
            }
        };
        Self {
            center: Point3::new(
                self.center.x + offset(1),
                self.center.y + offset(2),
                self.center.z + offset(4),
            ),
            half_width,
        }
    }

    /// Check if a point is inside the cube.
    ///
    /// Points on the boundary are considered inside.
    #[must_use]
    pub fn contains(&self, point: &Point3<f32>) -> bool {
        let distances = (point - self.center).abs();
        distances.x <= self.half_width
            && distances.y <= self.half_width
            && distances.z <= self.half_width
    }

    /// Check if the cube and an AABB overlap.
    ///
    /// True iff the center distance does not exceed the sum of half-widths
    /// on every axis; touching counts as overlapping.
    #[must_use]
    pub fn intersects(&self, aabb: &Aabb) -> bool {
        let distances = (self.center - aabb.center()).abs();
        let spans = aabb.half_extents().add_scalar(self.half_width);
        distances.x <= spans.x && distances.y <= spans.y && distances.z <= spans.z
    }

    /// Squared distance from a point to the closest point of the cube.
    ///
    /// Zero when the point lies inside the cube. This is a lower bound for
    /// the distance from the point to anything contained in the cube, which
    /// is what makes it usable as a best-first search key.
    #[must_use]
    pub fn distance_squared_to(&self, point: &Point3<f32>) -> f32 {
        let outside = (point - self.center).abs().add_scalar(-self.half_width);
        let dx = outside.x.max(0.0);
        let dy = outside.y.max(0.0);
        let dz = outside.z.max(0.0);
        dz.mul_add(dz, dx.mul_add(dx, dy * dy))
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_aabb_new_reorders() {
        let aabb = Aabb::new(Point3::new(5.0, 0.0, 2.0), Point3::new(0.0, 3.0, 1.0));
        assert_eq!(aabb.min, Point3::new(0.0, 0.0, 1.0));
        assert_eq!(aabb.max, Point3::new(5.0, 3.0, 2.0));
    }

    #[test]
    fn test_aabb_empty_is_identity() {
        let mut aabb = Aabb::empty();
        assert!(aabb.is_empty());

        aabb.expand_to_include(&Point3::new(1.0, -2.0, 3.0));
        assert!(!aabb.is_empty());
        assert_eq!(aabb.min, Point3::new(1.0, -2.0, 3.0));
        assert_eq!(aabb.max, Point3::new(1.0, -2.0, 3.0));
    }

    #[test]
    fn test_aabb_from_points() {
        let points = [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(2.0, -1.0, 5.0),
            Point3::new(-3.0, 4.0, 1.0),
        ];
        let aabb = Aabb::from_points(points.iter());
        assert_eq!(aabb.min, Point3::new(-3.0, -1.0, 0.0));
        assert_eq!(aabb.max, Point3::new(2.0, 4.0, 5.0));
    }

    #[test]
    fn test_aabb_from_no_points_is_empty() {
        let aabb = Aabb::from_points(std::iter::empty());
        assert!(aabb.is_empty());
    }

    #[test]
    fn test_aabb_center_and_half_extents() {
        let aabb = Aabb::new(Point3::new(0.0, 0.0, 0.0), Point3::new(4.0, 2.0, 6.0));
        assert_eq!(aabb.center(), Point3::new(2.0, 1.0, 3.0));
        assert_eq!(aabb.half_extents(), Vector3::new(2.0, 1.0, 3.0));
    }

    #[test]
    fn test_aabb_contains_boundary() {
        let aabb = Aabb::new(Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 1.0, 1.0));
        assert!(aabb.contains(&Point3::new(0.0, 0.0, 0.0)));
        assert!(aabb.contains(&Point3::new(1.0, 1.0, 1.0)));
        assert!(aabb.contains(&Point3::new(0.5, 0.5, 0.5)));
        assert!(!aabb.contains(&Point3::new(1.1, 0.5, 0.5)));
    }

    #[test]
    fn test_cube_enclosing_contains_extent() {
        let aabb = Aabb::new(Point3::new(-1.0, 0.0, 2.0), Point3::new(3.0, 1.0, 4.0));
        let cube = BoundingCube::enclosing(&aabb);

        assert_eq!(cube.center, aabb.center());
        assert_eq!(cube.half_width, 2.0);
        assert!(cube.contains(&aabb.min));
        assert!(cube.contains(&aabb.max));
    }

    #[test]
    fn test_cube_child_offsets() {
        let cube = BoundingCube::new(Point3::origin(), 2.0);

        let child0 = cube.child(0);
        assert_eq!(child0.half_width, 1.0);
        assert_eq!(child0.center, Point3::new(-1.0, -1.0, -1.0));

        let child7 = cube.child(7);
        assert_eq!(child7.center, Point3::new(1.0, 1.0, 1.0));

        // Bit 0 = x+, bit 1 = y+, bit 2 = z+.
        let child5 = cube.child(5);
        assert_eq!(child5.center, Point3::new(1.0, -1.0, 1.0));
    }

    #[test]
    #[should_panic(expected = "octant index out of range")]
    fn test_cube_child_out_of_range() {
        let cube = BoundingCube::new(Point3::origin(), 1.0);
        let _ = cube.child(8);
    }

    #[test]
    fn test_cube_children_tile_parent() {
        let cube = BoundingCube::new(Point3::new(1.0, 2.0, 3.0), 4.0);
        for octant in 0..8 {
            let child = cube.child(octant);
            assert_eq!(child.half_width, 2.0);
            assert!(cube.contains(&child.center));
        }
    }

    #[test]
    fn test_cube_intersects_box() {
        let cube = BoundingCube::new(Point3::origin(), 1.0);

        let inside = Aabb::new(Point3::new(-0.5, -0.5, -0.5), Point3::new(0.5, 0.5, 0.5));
        assert!(cube.intersects(&inside));

        let touching = Aabb::new(Point3::new(1.0, -0.5, -0.5), Point3::new(2.0, 0.5, 0.5));
        assert!(cube.intersects(&touching));

        let separate = Aabb::new(Point3::new(1.5, 1.5, 1.5), Point3::new(2.0, 2.0, 2.0));
        assert!(!cube.intersects(&separate));
    }

    #[test]
    fn test_cube_distance_squared_inside_is_zero() {
        let cube = BoundingCube::new(Point3::new(1.0, 1.0, 1.0), 2.0);
        assert_eq!(cube.distance_squared_to(&Point3::new(1.0, 1.0, 1.0)), 0.0);
        assert_eq!(cube.distance_squared_to(&Point3::new(2.9, 0.0, -0.9)), 0.0);
        // On the boundary.
        assert_eq!(cube.distance_squared_to(&Point3::new(3.0, 1.0, 1.0)), 0.0);
    }

    #[test]
    fn test_cube_distance_squared_face_and_corner() {
        let cube = BoundingCube::new(Point3::origin(), 1.0);

        // Straight out of a face: distance 2.
        assert_relative_eq!(
            cube.distance_squared_to(&Point3::new(3.0, 0.0, 0.0)),
            4.0,
            epsilon = 1e-6
        );

        // Out of a corner: offset (1, 1, 1) past the corner.
        assert_relative_eq!(
            cube.distance_squared_to(&Point3::new(2.0, 2.0, 2.0)),
            3.0,
            epsilon = 1e-6
        );
    }
}
