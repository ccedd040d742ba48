//! # Bowyer
//!
//! An implementation of 2D Delaunay triangulation via the incremental Bowyer–Watson algorithm.
//!
//! Points are inserted one after another into a mesh seeded with a large enclosing triangle.
//! Every triangle whose circumcircle contains the new point is removed and the resulting cavity is
//! re-triangulated around it. Finally all triangles touching the enclosing triangle are dropped.
//!
//! ```
//! use bowyer::{triangulate, Point};
//!
//! let points = [
//!     Point::new(0.0, 0.0),
//!     Point::new(1.0, 0.0),
//!     Point::new(1.0, 1.0),
//!     Point::new(0.0, 1.0),
//! ];
//!
//! let triangles = triangulate(&points).unwrap();
//! assert_eq!(triangles.len(), 2);
//! ```
#![forbid(unsafe_code)]
#![warn(clippy::all)]

pub use config::{ContainmentPolicy, DuplicatePolicy, InCircleTest, TriangulationConfig};
pub use enclosing::{enclosing_triangle, BoundingBox};
pub use error::TriangulationError;
pub use geometry::{circle_contains, circumcircle, distance, Circle, Point};
pub use node::VertexNode;
pub use triangulation::{triangulate, Triangulation};
pub use trids::{edge::Edge, triangle::Triangle};

pub mod config;
pub mod enclosing;
pub mod error;
pub mod geometry;
mod node;
pub mod predicates;
pub mod triangulation;
pub mod trids;
mod utils;
