use std::collections::HashMap;

use crate::{
    config::{DuplicatePolicy, TriangulationConfig},
    enclosing::{enclosing_triangle, strictly_contains},
    error::TriangulationError,
    geometry::Point,
    node::VertexNode,
    predicates,
    trids::{
        tri_data_structure::{edge_counts, MeshTri, TriDataStructure},
        triangle::Triangle,
    },
    utils::{point_order::sort_along_hilbert_curve_2d, types::VertexIdx},
};
use anyhow::Result;
use log::error;
use rayon::iter::{IntoParallelRefIterator, ParallelIterator};

/// A 2D Delaunay triangulation built by incremental Bowyer–Watson insertion.
///
/// ```
/// use bowyer::Triangulation;
///
/// let vertices = vec![
///     [0.0, 0.0],
///     [-0.5, 1.0],
///     [0.0, 2.5],
///     [2.0, 3.0],
///     [4.0, 2.5],
///     [5.0, 1.5],
///     [4.5, 0.5],
///     [2.5, -0.5],
///     [1.5, 1.5],
///     [3.0, 1.0],
/// ];
///
/// let mut triangulation = Triangulation::default();
/// triangulation.insert_vertices(&vertices).unwrap();
///
/// assert_eq!(triangulation.is_delaunay_p(), 1.0);
/// assert!(triangulation.is_sound().unwrap());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Triangulation {
    pub tds: TriDataStructure,
    vertices: Vec<Point>,
    config: TriangulationConfig,
    time_sorting: u128,
    time_inserting: u128,
    /// Vertices that are part of the triangulation.
    used_vertices: Vec<VertexIdx>,
    /// Vertices that are not part of the triangulation, because they repeat an earlier vertex.
    ignored_vertices: Vec<VertexIdx>,
    first_occurrence: HashMap<(u64, u64), VertexIdx>,
}

impl Triangulation {
    pub fn new(config: TriangulationConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    pub const fn config(&self) -> &TriangulationConfig {
        &self.config
    }

    /// Insert a set of vertices into the triangulation.
    ///
    /// The first batch needs at least 3 distinct, non-collinear vertices; it determines the
    /// enclosing triangle. Vertices of later batches must lie strictly inside of it.
    ///
    /// On error the triangulation is left as it was before the call.
    pub fn insert_vertices<P>(&mut self, vertices: &[P]) -> Result<()>
    where
        P: Copy + Into<Point>,
    {
        self.config.validate()?;

        let points: Vec<Point> = vertices.iter().map(|&v| v.into()).collect();

        if self.tds.scaffold().is_none() && points.len() < 3 {
            return Err(TriangulationError::InsufficientInput {
                found: points.len(),
            }
            .into());
        }

        self.insert_batch(points)
    }

    /// Insert a single vertex into an existing triangulation.
    pub fn insert_vertex<P: Into<Point>>(&mut self, v: P) -> Result<()> {
        if self.tds.scaffold().is_none() {
            return Err(TriangulationError::NotInitialized.into());
        }

        self.insert_batch(vec![v.into()])
    }

    fn insert_batch(&mut self, points: Vec<Point>) -> Result<()> {
        let offset = self.vertices.len();

        if let Some(index) = points.iter().position(|p| !p.is_finite()) {
            return Err(TriangulationError::NonFiniteCoordinate {
                index: offset + index,
            }
            .into());
        }

        // Resolve duplicates before touching any state
        let mut first_occurrence = self.first_occurrence.clone();
        let mut idxs_to_insert = Vec::with_capacity(points.len());
        let mut ignored = Vec::new();

        for (i, p) in points.iter().enumerate() {
            let v_idx = offset + i;
            match first_occurrence.get(&p.key()) {
                Some(&first) => match self.config.dedup {
                    DuplicatePolicy::Reject => {
                        return Err(TriangulationError::DuplicatePoint {
                            first,
                            second: v_idx,
                        }
                        .into());
                    }
                    DuplicatePolicy::Skip => ignored.push(v_idx),
                },
                None => {
                    first_occurrence.insert(p.key(), v_idx);
                    idxs_to_insert.push(v_idx);
                }
            }
        }

        let mut vertices = self.vertices.clone();
        vertices.extend_from_slice(&points);

        let mut tds = self.tds.clone();
        match tds.scaffold() {
            None => {
                let distinct: Vec<Point> = idxs_to_insert.iter().map(|&i| vertices[i]).collect();

                if distinct.len() < 3 {
                    return Err(TriangulationError::InsufficientInput {
                        found: distinct.len(),
                    }
                    .into());
                }
                check_not_all_collinear(&distinct)?;

                let scaffold = enclosing_triangle(&distinct, self.config.margin)?;
                tds.add_init_tri(scaffold, self.config.degeneracy_epsilon)?;

                log::trace!("Enclosing triangle: {}", scaffold);
            }
            Some(scaffold) => {
                if let Some(&outside) = idxs_to_insert
                    .iter()
                    .find(|&&i| !strictly_contains(&scaffold, vertices[i]))
                {
                    return Err(TriangulationError::OutsideEnclosingTriangle {
                        point: vertices[outside],
                    }
                    .into());
                }
            }
        }

        if self.config.spatial_sorting {
            let now = std::time::Instant::now();

            idxs_to_insert = sort_along_hilbert_curve_2d(&vertices, &idxs_to_insert);

            self.time_sorting += now.elapsed().as_micros();
            log::trace!(
                "Spatial sorting (hilbert curve) computed in {:.4} µs",
                now.elapsed().as_micros()
            );
        }

        log::debug!("Inserting {} vertices", idxs_to_insert.len());

        let now = std::time::Instant::now();
        let (mut num_bad_tris, mut num_new_tris) = (0, 0);
        for &v_idx in &idxs_to_insert {
            let stats = tds.insert_vertex(
                v_idx,
                vertices[v_idx],
                self.config.in_circle,
                self.config.containment,
                self.config.degeneracy_epsilon,
            )?;
            num_bad_tris += stats.num_bad_tris;
            num_new_tris += stats.num_new_tris;
        }
        self.time_inserting += now.elapsed().as_micros();

        log::trace!(
            "Replaced {} triangles in conflict with {} vertices by {} triangles",
            num_bad_tris,
            idxs_to_insert.len(),
            num_new_tris
        );

        self.tds = tds;
        self.vertices = vertices;
        self.first_occurrence = first_occurrence;
        self.used_vertices.extend(idxs_to_insert);
        self.ignored_vertices.extend(ignored);

        self.log_time();

        Ok(())
    }

    /// All vertices passed in so far, including ignored ones.
    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    /// The enclosing triangle, once the first batch is inserted.
    pub fn enclosing(&self) -> Option<Triangle> {
        self.tds.scaffold()
    }

    /// The triangles as index triples into [`Triangulation::vertices`].
    ///
    /// Triangles touching the enclosing triangle are left out.
    pub fn tris(&self) -> Vec<[VertexIdx; 3]> {
        self.tds
            .casual_tris()
            .filter_map(|tri| {
                let [n0, n1, n2] = tri.nodes;
                Some([n0.idx()?, n1.idx()?, n2.idx()?])
            })
            .collect()
    }

    /// The triangles with their corner coordinates.
    ///
    /// Triangles touching the enclosing triangle are left out.
    pub fn triangles(&self) -> Vec<Triangle> {
        self.tds.casual_tris().map(MeshTri::to_triangle).collect()
    }

    pub fn num_tris(&self) -> usize {
        self.tds.casual_tris().count()
    }

    pub fn used_vertices(&self) -> &[VertexIdx] {
        &self.used_vertices
    }

    pub fn num_used_vertices(&self) -> usize {
        self.used_vertices.len()
    }

    pub fn num_ignored_vertices(&self) -> usize {
        self.ignored_vertices.len()
    }

    /// Edges of exactly one triangle, i.e. the boundary of the triangulated region.
    pub fn hull_edges(&self) -> Vec<[VertexIdx; 2]> {
        let counts = edge_counts(self.tds.casual_tris());

        let mut hull: Vec<[VertexIdx; 2]> = counts
            .into_iter()
            .filter(|&(_, count)| count == 1)
            .filter_map(|(edge, _)| {
                let [n0, n1] = edge.nodes();
                Some([n0.idx()?, n1.idx()?])
            })
            .collect();
        hull.sort_unstable();
        hull
    }

    /// Check if some used vertex, other than its corners, lies strictly inside the circumcircle
    /// of `tri`, or if `tri` is flat.
    fn is_tri_violated(&self, tri: &MeshTri) -> bool {
        if tri.is_flat() {
            return true;
        }

        let [a, b, c] = tri.points.map(Point::to_array);
        self.used_vertices.iter().any(|&v_idx| {
            !tri.has_node(VertexNode::Casual(v_idx))
                && predicates::in_circle(&a, &b, &c, &self.vertices[v_idx].to_array()) > 0.0
        })
    }

    /// Check if the triangulation is Delaunay w.r.t. the empty circumcircle property.
    ///
    /// Vertices exactly on a circumcircle do not count as violations. Returns if the triangulation
    /// is valid and to what degree.
    #[must_use]
    pub fn is_delaunay(&self) -> (bool, f64) {
        let mut num_tris = 0;
        let mut num_violated_tris = 0;

        for tri in self.tds.casual_tris() {
            num_tris += 1;

            if tri.is_flat() {
                error!("Flat triangle: {}", tri.to_triangle());
                num_violated_tris += 1;
            } else if self.is_tri_violated(tri) {
                error!("Vertex in circumcircle of: {}", tri.to_triangle());
                num_violated_tris += 1;
            }
        }

        (num_violated_tris == 0, delaunay_ratio(num_violated_tris, num_tris))
    }

    /// Checks the Delaunay property in a parallel manner using `rayon`s `par_iter()`.
    ///
    /// This can significantly reduce the runtime of this predicate.
    #[must_use]
    pub fn is_delaunay_p(&self) -> f64 {
        let tris: Vec<MeshTri> = self.tds.casual_tris().copied().collect();

        let num_violated_tris = tris
            .par_iter()
            .filter(|tri| self.is_tri_violated(tri))
            .count();

        delaunay_ratio(num_violated_tris, tris.len())
    }

    /// Structural check of the full mesh, see [`TriDataStructure::is_sound`].
    ///
    /// Fails with [`TriangulationError::NotInitialized`] before the first batch.
    pub fn is_sound(&self) -> Result<bool> {
        if self.tds.scaffold().is_none() {
            return Err(TriangulationError::NotInitialized.into());
        }

        if self.tds.is_sound(self.used_vertices.len()) {
            Ok(true)
        } else {
            error!("Triangulation is not sound!");
            Ok(false)
        }
    }

    fn log_time(&self) {
        log::debug!("-------------------------------------------");
        log::debug!("Time elapsed:");
        log::debug!("Sorting computed in {} μs", self.time_sorting);
        log::debug!("Inserts computed in {} μs", self.time_inserting);
        log::debug!("Triangles replaced: {}", self.tds.num_deleted_tris);
    }
}

/// Computes the Delaunay triangulation of `points` with the default configuration.
///
/// The result never contains a corner of the enclosing triangle. Fails instead of returning a
/// partial or empty mesh.
///
/// ```
/// use bowyer::{triangulate, Point};
///
/// let triangles = triangulate(&[
///     Point::new(0.0, 0.0),
///     Point::new(1.0, 0.0),
///     Point::new(0.0, 1.0),
/// ])
/// .unwrap();
///
/// assert_eq!(triangles.len(), 1);
/// ```
pub fn triangulate(points: &[Point]) -> Result<Vec<Triangle>> {
    let mut triangulation = Triangulation::default();
    triangulation.insert_vertices(points)?;

    let triangles = triangulation.triangles();
    if triangles.is_empty() {
        return Err(TriangulationError::InvariantViolation(
            "no triangle left after removing the enclosing triangle".to_string(),
        )
        .into());
    }

    Ok(triangles)
}

fn check_not_all_collinear(points: &[Point]) -> Result<(), TriangulationError> {
    let (p0, p1) = (points[0].to_array(), points[1].to_array());

    if points
        .iter()
        .skip(2)
        .any(|p| predicates::orient_2d(&p0, &p1, &p.to_array()) != 0.0)
    {
        return Ok(());
    }

    Err(TriangulationError::DegenerateGeometry {
        points: [points[0], points[1], points[points.len() - 1]],
    })
}

fn delaunay_ratio(num_violated_tris: usize, num_tris: usize) -> f64 {
    if num_tris == 0 {
        1.0
    } else {
        1.0 - num_violated_tris as f64 / num_tris as f64
    }
}
