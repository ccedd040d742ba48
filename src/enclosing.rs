//! Construction of the enclosing ("super") triangle that seeds the mesh.

use crate::{
    error::TriangulationError,
    geometry::{circumcircle_with_tolerance, Point, DEGENERACY_EPSILON},
    predicates::orient_2d,
    trids::triangle::Triangle,
};

/// Axis-aligned bounding box of a point set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min: Point,
    pub max: Point,
}

impl BoundingBox {
    /// The bounding box of `points`, `None` if there are none.
    pub fn from_points(points: &[Point]) -> Option<Self> {
        let first = *points.first()?;

        Some(points.iter().fold(
            Self {
                min: first,
                max: first,
            },
            |bb, p| Self {
                min: Point::new(bb.min.x.min(p.x), bb.min.y.min(p.y)),
                max: Point::new(bb.max.x.max(p.x), bb.max.y.max(p.y)),
            },
        ))
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    pub fn center(&self) -> Point {
        Point::new(
            (self.min.x + self.max.x) / 2.0,
            (self.min.y + self.max.y) / 2.0,
        )
    }

    /// The largest side length, or `1.0` for a box that collapsed into a single point.
    pub fn span(&self) -> f64 {
        let span = self.width().max(self.height());
        if span > 0.0 {
            span
        } else {
            1.0
        }
    }
}

/// Largest coordinate magnitude of an enclosing-triangle corner.
///
/// The exact in-circle determinant is of degree 4 in coordinate differences, so it stays finite
/// only below roughly `1e77`.
pub const MAX_CORNER_MAGNITUDE: f64 = 1e75;

/// Check if `p` lies strictly inside `tri`, i.e. not on one of its edges.
pub fn strictly_contains(tri: &Triangle, p: Point) -> bool {
    let [a, b, c] = tri.vertices().map(Point::to_array);
    let p = p.to_array();

    let o0 = orient_2d(&a, &b, &p);
    let o1 = orient_2d(&b, &c, &p);
    let o2 = orient_2d(&c, &a, &p);

    o0 != 0.0 && o0 == o1 && o1 == o2
}

/// Builds a triangle strictly containing every point of `points`.
///
/// The bounding box is grown by `margin` times its largest dimension on every side; the triangle
/// is then laid around that square (base below it, apex above it) with a clearance of at least
/// half the square's size.
///
/// The corners lie about `4 * (margin + 0.5)` bounding-box sizes away from the center, so the input
/// must satisfy `|center| + 4 * (margin + 0.5) * size <= MAX_CORNER_MAGNITUDE`. With the default
/// margin of `100` that allows coordinates up to about `1e72`. Larger extents fail with
/// [`TriangulationError::ExtentTooLarge`].
pub fn enclosing_triangle(points: &[Point], margin: f64) -> Result<Triangle, TriangulationError> {
    let bb = BoundingBox::from_points(points).ok_or(TriangulationError::EmptyInput)?;

    let center = bb.center();
    let half = bb.span() * (0.5 + margin);

    let tri = Triangle::new(
        Point::new(center.x - 4.0 * half, center.y - 2.0 * half),
        Point::new(center.x + 4.0 * half, center.y - 2.0 * half),
        Point::new(center.x, center.y + 4.0 * half),
    );

    let in_range = |v: f64| v.abs() <= MAX_CORNER_MAGNITUDE;
    if !tri.vertices().iter().all(|p| in_range(p.x) && in_range(p.y)) {
        return Err(TriangulationError::ExtentTooLarge {
            limit: MAX_CORNER_MAGNITUDE,
        });
    }

    circumcircle_with_tolerance(tri.a, tri.b, tri.c, DEGENERACY_EPSILON)?;

    if let Some(outside) = points.iter().position(|&p| !strictly_contains(&tri, p)) {
        return Err(TriangulationError::InvariantViolation(format!(
            "enclosing triangle does not strictly contain vertex {outside}"
        )));
    }

    Ok(tri)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bowyer_test_utils::{sample_vertices_2d, sample_vertices_normal};

    #[test]
    fn test_empty_input() {
        assert_eq!(
            enclosing_triangle(&[], 2.0),
            Err(TriangulationError::EmptyInput)
        );
    }

    #[test]
    fn test_bounding_box() {
        let points = [
            Point::new(1.0, -2.0),
            Point::new(-3.0, 0.5),
            Point::new(2.0, 4.0),
        ];
        let bb = BoundingBox::from_points(&points).unwrap();

        assert_eq!(bb.min, Point::new(-3.0, -2.0));
        assert_eq!(bb.max, Point::new(2.0, 4.0));
        assert_eq!(bb.span(), 6.0);
        assert_eq!(bb.center(), Point::new(-0.5, 1.0));
    }

    #[test]
    fn test_single_point() {
        let p = Point::new(7.0, -7.0);
        let tri = enclosing_triangle(&[p], 2.0).unwrap();
        assert!(strictly_contains(&tri, p));
    }

    #[test]
    fn test_contains_box_corners() {
        let points = [Point::new(0.0, 0.0), Point::new(10.0, 1.0)];
        let tri = enclosing_triangle(&points, 2.0).unwrap();

        // corners of the bounding box, not only the points themselves
        for corner in [
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(0.0, 1.0),
            Point::new(10.0, 1.0),
        ] {
            assert!(strictly_contains(&tri, corner));
        }
    }

    #[test]
    fn test_contains_sampled_points() {
        for vertices in [
            sample_vertices_2d(500, None),
            sample_vertices_2d(500, Some(-1e6..=1e6)),
            sample_vertices_normal(500, None),
        ] {
            let points: Vec<Point> = vertices.into_iter().map(Point::from).collect();
            let tri = enclosing_triangle(&points, 2.0).unwrap();

            assert!(points.iter().all(|&p| strictly_contains(&tri, p)));
        }
    }

    #[test]
    fn test_extent_too_large() {
        for points in [
            vec![Point::new(0.0, 0.0), Point::new(1e306, 0.0)],
            vec![Point::new(-f64::MAX, 0.0), Point::new(f64::MAX, 1.0)],
            vec![Point::new(9e74, 0.0), Point::new(9.1e74, 0.0)],
        ] {
            assert_eq!(
                enclosing_triangle(&points, 100.0),
                Err(TriangulationError::ExtentTooLarge {
                    limit: MAX_CORNER_MAGNITUDE
                })
            );
        }
    }

    #[test]
    fn test_large_extent_within_range() {
        let points = [Point::new(0.0, 0.0), Point::new(1e70, -1e70)];
        let tri = enclosing_triangle(&points, 100.0).unwrap();

        assert!(points.iter().all(|&p| strictly_contains(&tri, p)));
    }

    #[test]
    fn test_strictly_contains_excludes_edges() {
        let tri = Triangle::new(
            Point::new(0.0, 0.0),
            Point::new(2.0, 0.0),
            Point::new(0.0, 2.0),
        );

        assert!(strictly_contains(&tri, Point::new(0.5, 0.5)));
        assert!(!strictly_contains(&tri, Point::new(1.0, 0.0)));
        assert!(!strictly_contains(&tri, Point::new(1.0, 1.0)));
        assert!(!strictly_contains(&tri, Point::new(3.0, 3.0)));
    }
}
