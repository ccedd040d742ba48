use crate::geometry::Point;
use thiserror::Error;

/// Everything that can make a triangulation fail.
///
/// Public operations return [`anyhow::Result`]; the underlying value is always one of these and can
/// be recovered with `err.downcast_ref::<TriangulationError>()`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TriangulationError {
    /// No points at all, so there is no bounding box to enclose.
    #[error("cannot build an enclosing triangle for an empty point set")]
    EmptyInput,
    /// Fewer than 3 points.
    #[error("needs at least 3 vertices to compute a 2D triangulation, got {found}")]
    InsufficientInput { found: usize },
    /// Three (nearly) collinear points, either met in a circumcircle computation or witnessing
    /// that the whole input lies on a single line.
    #[error("degenerate triangle {points:?}: its vertices are (nearly) collinear")]
    DegenerateGeometry { points: [Point; 3] },
    /// Two input points with identical coordinates.
    #[error("vertices {first} and {second} coincide")]
    DuplicatePoint { first: usize, second: usize },
    /// A coordinate is NaN or infinite.
    #[error("vertex {index} has a non-finite coordinate")]
    NonFiniteCoordinate { index: usize },
    /// A late insertion that the enclosing triangle does not strictly contain.
    #[error("vertex {point} is not strictly inside the enclosing triangle")]
    OutsideEnclosingTriangle { point: Point },
    /// The mesh reached a state a valid triangulation never has.
    #[error("triangulation invariant violated: {0}")]
    InvariantViolation(String),
    /// The input spans so far that the enclosing triangle would leave the usable float range.
    #[error("input extent too large: enclosing triangle coordinates would exceed {limit:e}")]
    ExtentTooLarge { limit: f64 },
    /// A single vertex was inserted before any batch seeded the mesh.
    #[error("needs an enclosing triangle before single vertices can be inserted")]
    NotInitialized,
    /// A configuration value outside of its domain.
    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),
}
