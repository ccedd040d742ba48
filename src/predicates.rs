//! Exact geometric predicates.
//!
//! With feature `geogram` (default): orientation uses [geogram_predicates] (FFI to C++ geogram).
//!
//! Without it, orientation falls back to the pure-Rust [robust] crate. The in-circle test always
//! uses [robust], as it reports exact cocircularity as `0.0` (geogram's symbolic perturbation never
//! does).

use robust::{incircle, Coord};

use crate::utils::types::Vertex2;

/// Normalize predicate result to sign: -1.0, 0.0, or 1.0 so that `==` compares signs.
#[inline]
fn sign_f64(x: f64) -> f64 {
    if x > 0.0 {
        1.0
    } else if x < 0.0 {
        -1.0
    } else {
        0.0
    }
}

#[inline]
const fn coord2(p: &Vertex2) -> Coord<f64> {
    Coord { x: p[0], y: p[1] }
}

#[cfg(feature = "geogram")]
mod imp {
    use super::*;
    use geogram_predicates as gp;

    #[inline]
    pub fn orient_2d(a: &Vertex2, b: &Vertex2, c: &Vertex2) -> f64 {
        sign_f64(f64::from(gp::orient_2d(a, b, c)))
    }
}

#[cfg(not(feature = "geogram"))]
mod imp {
    use super::*;
    use robust::orient2d;

    #[inline]
    pub fn orient_2d(a: &Vertex2, b: &Vertex2, c: &Vertex2) -> f64 {
        sign_f64(orient2d(coord2(a), coord2(b), coord2(c)))
    }
}

/// Orientation of `c` relative to the directed line `a -> b`.
///
/// `1.0` if counterclockwise, `-1.0` if clockwise, `0.0` if the three points are collinear.
pub use imp::orient_2d;

/// Position of `p` relative to the circle through `a`, `b`, `c`, independent of their orientation.
///
/// `1.0` if strictly inside, `-1.0` if strictly outside, `0.0` if on the circle or if `a, b, c`
/// are collinear.
#[inline]
pub fn in_circle(a: &Vertex2, b: &Vertex2, c: &Vertex2, p: &Vertex2) -> f64 {
    let orientation = orient_2d(a, b, c);
    orientation * sign_f64(incircle(coord2(a), coord2(b), coord2(c), coord2(p)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orient_2d() {
        assert_eq!(orient_2d(&[0.0, 0.0], &[1.0, 0.0], &[0.0, 1.0]), 1.0);
        assert_eq!(orient_2d(&[0.0, 0.0], &[0.0, 1.0], &[1.0, 0.0]), -1.0);
        assert_eq!(orient_2d(&[0.0, 0.0], &[1.0, 1.0], &[3.0, 3.0]), 0.0);
    }

    #[test]
    fn test_in_circle_either_orientation() {
        let [a, b, c] = [[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]];

        assert_eq!(in_circle(&a, &b, &c, &[0.4, 0.4]), 1.0);
        assert_eq!(in_circle(&a, &c, &b, &[0.4, 0.4]), 1.0);
        assert_eq!(in_circle(&a, &b, &c, &[2.0, 2.0]), -1.0);
        assert_eq!(in_circle(&a, &c, &b, &[2.0, 2.0]), -1.0);
    }

    #[test]
    fn test_in_circle_cocircular_is_zero() {
        let [a, b, c] = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0]];
        assert_eq!(in_circle(&a, &b, &c, &[0.0, 1.0]), 0.0);
    }
}
