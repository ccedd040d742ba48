use core::fmt;

use crate::{
    error::TriangulationError,
    geometry::{circumcircle, Circle, Point},
};

/// A triangle given by its three corner coordinates.
///
/// The corners are labeled but carry no orientation; use [`Triangle::canonical_key`] to compare
/// triangles as unordered vertex triples.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub a: Point,
    pub b: Point,
    pub c: Point,
}

impl Triangle {
    pub const fn new(a: Point, b: Point, c: Point) -> Self {
        Self { a, b, c }
    }

    pub const fn vertices(&self) -> [Point; 3] {
        [self.a, self.b, self.c]
    }

    pub fn circumcircle(&self) -> Result<Circle, TriangulationError> {
        circumcircle(self.a, self.b, self.c)
    }

    pub fn has_vertex(&self, p: Point) -> bool {
        self.vertices().contains(&p)
    }

    /// Check if the triangle shares at least one corner with `other`.
    pub fn shares_vertex_with(&self, other: &Triangle) -> bool {
        self.vertices().iter().any(|&p| other.has_vertex(p))
    }

    /// The corner keys in sorted order; equal for two triangles with the same corner set.
    pub fn canonical_key(&self) -> [(u64, u64); 3] {
        let mut key = self.vertices().map(|p| p.key());
        key.sort_unstable();
        key
    }
}

impl fmt::Display for Triangle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Triangle({}, {}, {})", self.a, self.b, self.c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_key_ignores_labels() {
        let [p, q, r] = [
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(0.0, 1.0),
        ];

        assert_eq!(
            Triangle::new(p, q, r).canonical_key(),
            Triangle::new(r, p, q).canonical_key()
        );
        assert_ne!(
            Triangle::new(p, q, r).canonical_key(),
            Triangle::new(p, q, Point::new(1.0, 1.0)).canonical_key()
        );
    }

    #[test]
    fn test_shares_vertex_with() {
        let t0 = Triangle::new(
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(0.0, 1.0),
        );
        let t1 = Triangle::new(
            Point::new(1.0, 0.0),
            Point::new(2.0, 0.0),
            Point::new(2.0, 1.0),
        );
        let t2 = Triangle::new(
            Point::new(5.0, 5.0),
            Point::new(6.0, 5.0),
            Point::new(5.0, 6.0),
        );

        assert!(t0.shares_vertex_with(&t1));
        assert!(!t0.shares_vertex_with(&t2));
    }
}
