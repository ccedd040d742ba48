use crate::{error::TriangulationError, geometry::DEGENERACY_EPSILON};

/// How a point exactly on a circumcircle is classified during bad-triangle detection.
///
/// Only exactly cocircular inputs (e.g. the corners of a square) are affected.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ContainmentPolicy {
    /// `distance <= radius`, a triangle whose circumcircle passes through the new point is
    /// re-triangulated.
    #[default]
    Inclusive,
    /// `distance < radius`, such a triangle stays in place.
    Strict,
}

/// Which predicate decides whether a vertex is in conflict with a triangle.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum InCircleTest {
    /// Sign of the exact in-circle determinant.
    #[default]
    Exact,
    /// `distance(p, center)` against the cached radius, in floating point.
    Distance,
}

/// What happens to an input point that coincides with an earlier one.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum DuplicatePolicy {
    /// Fail with [`TriangulationError::DuplicatePoint`].
    #[default]
    Reject,
    /// Keep the first occurrence, record the others as ignored vertices.
    Skip,
}

/// Settings of a [`Triangulation`](crate::Triangulation).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriangulationConfig {
    pub containment: ContainmentPolicy,
    pub in_circle: InCircleTest,
    /// Enclosing-triangle margin, as a multiple of the bounding box's largest dimension.
    pub margin: f64,
    /// Relative tolerance below which a circumcircle determinant counts as zero.
    pub degeneracy_epsilon: f64,
    /// Insert along a Hilbert curve instead of in input order.
    pub spatial_sorting: bool,
    pub dedup: DuplicatePolicy,
}

impl Default for TriangulationConfig {
    fn default() -> Self {
        Self {
            containment: ContainmentPolicy::Inclusive,
            in_circle: InCircleTest::Exact,
            margin: 100.0,
            degeneracy_epsilon: DEGENERACY_EPSILON,
            spatial_sorting: false,
            dedup: DuplicatePolicy::Reject,
        }
    }
}

impl TriangulationConfig {
    pub fn with_containment(mut self, containment: ContainmentPolicy) -> Self {
        self.containment = containment;
        self
    }

    pub fn with_in_circle(mut self, in_circle: InCircleTest) -> Self {
        self.in_circle = in_circle;
        self
    }

    pub fn with_margin(mut self, margin: f64) -> Self {
        self.margin = margin;
        self
    }

    pub fn with_spatial_sorting(mut self, spatial_sorting: bool) -> Self {
        self.spatial_sorting = spatial_sorting;
        self
    }

    pub fn with_dedup(mut self, dedup: DuplicatePolicy) -> Self {
        self.dedup = dedup;
        self
    }

    pub fn validate(&self) -> Result<(), TriangulationError> {
        if !self.margin.is_finite() || self.margin <= 0.0 {
            return Err(TriangulationError::InvalidConfig(
                "margin must be finite and positive",
            ));
        }
        if !self.degeneracy_epsilon.is_finite() || self.degeneracy_epsilon < 0.0 {
            return Err(TriangulationError::InvalidConfig(
                "degeneracy_epsilon must be finite and non-negative",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = TriangulationConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.containment, ContainmentPolicy::Inclusive);
        assert_eq!(config.dedup, DuplicatePolicy::Reject);
    }

    #[test]
    fn test_rejects_bad_margin() {
        for margin in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let config = TriangulationConfig::default().with_margin(margin);
            assert!(matches!(
                config.validate(),
                Err(TriangulationError::InvalidConfig(_))
            ));
        }
    }
}
