//! Point samplers for bowyer tests
#![forbid(unsafe_code)]
#![deny(unused)]
#![warn(clippy::all, clippy::missing_const_for_fn)]

use rand::{distr::Uniform, prelude::Distribution};
use rand_distr::Normal;
use std::{f64::consts::TAU, ops::RangeInclusive};

pub type Vertex2 = [f64; 2];

/// Samples `n` vertices in 2D space from the [Uniform] distribution.
///
/// If no range is specified, the unit-square centered around the origin is used, `[-0.5, 0.5]`.
pub fn sample_vertices_2d(n: usize, range: Option<RangeInclusive<f64>>) -> Vec<Vertex2> {
    let mut rng = rand::rng();
    let range = range.unwrap_or(-0.5..=0.5);
    let uniform = Uniform::try_from(range).expect("Expected range with a greater start then end");

    let mut vertices: Vec<Vertex2> = Vec::with_capacity(n);
    for _ in 0..n {
        let x = uniform.sample(&mut rng);
        let y = uniform.sample(&mut rng);
        vertices.push([x, y]);
    }

    vertices
}

/// Samples `n` vertices from an isotropic [Normal] distribution around the origin.
///
/// The default parametrization is `μ = 0.0` and `σ = 1.0`, applied to both coordinates.
pub fn sample_vertices_normal(n: usize, params: Option<(f64, f64)>) -> Vec<Vertex2> {
    let mut rng = rand::rng();
    let (mean, std_dev) = params.unwrap_or((0.0, 1.0));
    let normal = Normal::new(mean, std_dev).unwrap();

    (0..n)
        .map(|_| [normal.sample(&mut rng), normal.sample(&mut rng)])
        .collect()
}

/// Places `n` vertices evenly on a circle of the given `radius` around the origin,
/// starting at a random angle.
///
/// All returned vertices are on the convex hull of the set.
pub fn sample_vertices_on_circle(n: usize, radius: f64) -> Vec<Vertex2> {
    let mut rng = rand::rng();
    let offset = Uniform::try_from(0.0..=TAU)
        .expect("Expected a valid angle range")
        .sample(&mut rng);

    (0..n)
        .map(|i| {
            let angle = offset + TAU * i as f64 / n as f64;
            [radius * angle.cos(), radius * angle.sin()]
        })
        .collect()
}

/// Samples `n` vertices uniformly from the open disk of the given `radius` around the origin.
///
/// The radius is scaled by `0.9` so no sample comes close to the circle itself.
pub fn sample_vertices_in_disk(n: usize, radius: f64) -> Vec<Vertex2> {
    let mut rng = rand::rng();
    let angle = Uniform::try_from(0.0..=TAU).expect("Expected a valid angle range");
    let unit = Uniform::<f64>::try_from(0.0..=1.0).expect("Expected a valid unit range");

    (0..n)
        .map(|_| {
            let a = angle.sample(&mut rng);
            let r = 0.9 * radius * unit.sample(&mut rng).sqrt();
            [r * a.cos(), r * a.sin()]
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disk_samples_stay_inside() {
        let vertices = sample_vertices_in_disk(1000, 2.0);

        assert_eq!(vertices.len(), 1000);
        assert!(vertices
            .iter()
            .all(|[x, y]| (x * x + y * y).sqrt() <= 0.9 * 2.0 + 1e-12));
    }

    #[test]
    fn test_circle_samples_on_circle() {
        for [x, y] in sample_vertices_on_circle(16, 3.0) {
            assert!(((x * x + y * y).sqrt() - 3.0).abs() < 1e-12);
        }
    }
}
