//! Error types for proximity queries.

use thiserror::Error;

/// Result type for proximity operations.
pub type ProximityResult<T> = Result<T, ProximityError>;

/// Errors that can occur while building or querying a closest-point index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ProximityError {
    /// The mesh supplied at construction has no vertices.
    #[error("mesh has no vertices")]
    EmptyMesh,

    /// A face has three or more collinear vertices, so no triangle plane
    /// can be formed.
    #[error("triangle vertices are collinear")]
    DegenerateTriangle,

    /// A face has a vertex count other than 3 or 4.
    #[error("face has {vertex_count} vertices, only triangles and quadrilaterals are supported")]
    UnsupportedFace {
        /// Number of vertices the offending face carries.
        vertex_count: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert!(format!("{}", ProximityError::EmptyMesh).contains("no vertices"));
        assert!(format!("{}", ProximityError::DegenerateTriangle).contains("collinear"));

        let err = ProximityError::UnsupportedFace { vertex_count: 5 };
        assert!(format!("{err}").contains('5'));
    }

    #[test]
    fn test_error_equality() {
        assert_eq!(ProximityError::EmptyMesh, ProximityError::EmptyMesh);
        assert_ne!(
            ProximityError::DegenerateTriangle,
            ProximityError::UnsupportedFace { vertex_count: 2 }
        );
    }
}
