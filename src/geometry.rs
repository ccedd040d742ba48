//! Geometry kernel: points, distances and circumcircles.

use core::fmt;

use nalgebra::Vector2;

use crate::{
    config::ContainmentPolicy, error::TriangulationError, predicates, utils::types::Vertex2,
};

/// Default relative tolerance below which a circumcircle determinant counts as zero.
pub const DEGENERACY_EPSILON: f64 = 1e-12;

/// A point in the plane.
///
/// Equality is exact coordinate equality, there is no epsilon involved.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub const fn to_array(self) -> Vertex2 {
        [self.x, self.y]
    }

    pub fn to_vector(self) -> Vector2<f64> {
        Vector2::new(self.x, self.y)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Bit pattern of the coordinates, usable as a hash key.
    ///
    /// `-0.0` is folded into `0.0` so the key agrees with `==`.
    pub fn key(&self) -> (u64, u64) {
        let fold = |v: f64| if v == 0.0 { 0.0f64.to_bits() } else { v.to_bits() };
        (fold(self.x), fold(self.y))
    }
}

impl From<Vertex2> for Point {
    fn from(v: Vertex2) -> Self {
        Self::new(v[0], v[1])
    }
}

impl From<Point> for Vertex2 {
    fn from(p: Point) -> Self {
        p.to_array()
    }
}

impl From<Vector2<f64>> for Point {
    fn from(v: Vector2<f64>) -> Self {
        Self::new(v.x, v.y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "[{:.2}, {:.2}]", self.x, self.y)
    }
}

/// A circle, always derived from the three corners of a triangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub center: Point,
    pub radius: f64,
}

impl Circle {
    /// Check if `p` lies inside the circle, boundary included.
    pub fn contains(&self, p: Point) -> bool {
        self.contains_with(p, ContainmentPolicy::Inclusive)
    }

    pub fn contains_with(&self, p: Point, policy: ContainmentPolicy) -> bool {
        let dist = distance(p, self.center);
        match policy {
            ContainmentPolicy::Inclusive => dist <= self.radius,
            ContainmentPolicy::Strict => dist < self.radius,
        }
    }
}

/// Euclidean distance of two points.
pub fn distance(a: Point, b: Point) -> f64 {
    (a.to_vector() - b.to_vector()).norm()
}

/// Check if `p` lies inside the circle, a point exactly on the circle counts as inside.
pub fn circle_contains(circle: &Circle, p: Point) -> bool {
    circle.contains(p)
}

/// The circle through `a`, `b` and `c`, using the default degeneracy tolerance.
pub fn circumcircle(a: Point, b: Point, c: Point) -> Result<Circle, TriangulationError> {
    circumcircle_with_tolerance(a, b, c, DEGENERACY_EPSILON)
}

/// The circle through `a`, `b` and `c`.
///
/// Fails with [`TriangulationError::DegenerateGeometry`] if the three points are collinear, either
/// exactly (by the exact orientation predicate) or nearly, i.e. the sine of the largest angle is
/// at most `epsilon`.
pub fn circumcircle_with_tolerance(
    a: Point,
    b: Point,
    c: Point,
    epsilon: f64,
) -> Result<Circle, TriangulationError> {
    let degenerate = || TriangulationError::DegenerateGeometry { points: [a, b, c] };

    if predicates::orient_2d(&a.to_array(), &b.to_array(), &c.to_array()) == 0.0 {
        return Err(degenerate());
    }

    let d = 2.0 * (a.x * (b.y - c.y) + b.x * (c.y - a.y) + c.x * (a.y - b.y));

    let mut sides = [distance(a, b), distance(b, c), distance(c, a)];
    sides.sort_unstable_by(f64::total_cmp);

    // |d| / 2 over the two shorter sides is the sine of the largest angle
    if !d.is_finite() || d.abs() <= 2.0 * epsilon * sides[0] * sides[1] {
        return Err(degenerate());
    }

    let a_sq = a.x * a.x + a.y * a.y;
    let b_sq = b.x * b.x + b.y * b.y;
    let c_sq = c.x * c.x + c.y * c.y;

    let x = (a_sq * (b.y - c.y) + b_sq * (c.y - a.y) + c_sq * (a.y - b.y)) / d;
    let y = (a_sq * (c.x - b.x) + b_sq * (a.x - c.x) + c_sq * (b.x - a.x)) / d;

    let center = Point::new(x, y);
    if !center.is_finite() {
        return Err(degenerate());
    }

    Ok(Circle {
        center,
        radius: distance(center, a),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_distance() {
        assert_relative_eq!(distance(Point::new(0.0, 0.0), Point::new(3.0, 4.0)), 5.0);
        assert_relative_eq!(distance(Point::new(-1.0, 2.0), Point::new(-1.0, 2.0)), 0.0);
    }

    #[test]
    fn test_circumcircle_right_triangle() {
        // the hypotenuse of a right triangle is a diameter of its circumcircle
        let circle =
            circumcircle(Point::new(0.0, 0.0), Point::new(2.0, 0.0), Point::new(0.0, 2.0)).unwrap();

        assert_relative_eq!(circle.center.x, 1.0);
        assert_relative_eq!(circle.center.y, 1.0);
        assert_relative_eq!(circle.radius, 2.0f64.sqrt());
    }

    #[test]
    fn test_circumcircle_is_equidistant() {
        let [a, b, c] = [
            Point::new(0.3, -1.2),
            Point::new(4.1, 0.7),
            Point::new(-2.0, 3.3),
        ];
        let circle = circumcircle(a, b, c).unwrap();

        assert_relative_eq!(distance(circle.center, b), circle.radius, epsilon = 1e-12);
        assert_relative_eq!(distance(circle.center, c), circle.radius, epsilon = 1e-12);
    }

    #[test]
    fn test_circumcircle_independent_of_vertex_order() {
        let [a, b, c] = [
            Point::new(1.0, 1.0),
            Point::new(5.0, 2.0),
            Point::new(2.0, 6.0),
        ];
        let ccw = circumcircle(a, b, c).unwrap();
        let cw = circumcircle(a, c, b).unwrap();

        assert_relative_eq!(ccw.center.x, cw.center.x, epsilon = 1e-12);
        assert_relative_eq!(ccw.center.y, cw.center.y, epsilon = 1e-12);
        assert_relative_eq!(ccw.radius, cw.radius, epsilon = 1e-12);
    }

    #[test]
    fn test_circumcircle_collinear_fails() {
        let result = circumcircle(
            Point::new(0.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(2.0, 2.0),
        );
        assert!(matches!(
            result,
            Err(TriangulationError::DegenerateGeometry { .. })
        ));
    }

    #[test]
    fn test_circumcircle_nearly_collinear_fails() {
        let result = circumcircle(
            Point::new(0.0, 0.0),
            Point::new(1.0, 1e-14),
            Point::new(2.0, 0.0),
        );
        assert!(matches!(
            result,
            Err(TriangulationError::DegenerateGeometry { .. })
        ));
    }

    #[test]
    fn test_circumcircle_coincident_fails() {
        let p = Point::new(1.5, -2.5);
        assert!(circumcircle(p, p, Point::new(0.0, 0.0)).is_err());
    }

    #[test]
    fn test_contains_boundary_policy() {
        let circle =
            circumcircle(Point::new(0.0, 0.0), Point::new(1.0, 0.0), Point::new(1.0, 1.0)).unwrap();
        let on_circle = Point::new(0.0, 1.0);

        assert!(circle_contains(&circle, on_circle));
        assert!(!circle.contains_with(on_circle, ContainmentPolicy::Strict));
        assert!(circle.contains_with(Point::new(0.5, 0.5), ContainmentPolicy::Strict));
        assert!(!circle.contains(Point::new(2.0, 2.0)));
    }

    #[test]
    fn test_key_folds_signed_zero() {
        assert_eq!(Point::new(0.0, 1.0).key(), Point::new(-0.0, 1.0).key());
        assert_ne!(Point::new(1.0, 0.0).key(), Point::new(0.0, 1.0).key());
    }
}
