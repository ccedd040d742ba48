use std::collections::HashMap;

use log::error;

use super::{edge::Edge, triangle::Triangle};
use crate::{
    config::{ContainmentPolicy, InCircleTest},
    error::TriangulationError,
    geometry::{circumcircle_with_tolerance, Circle, Point},
    node::VertexNode,
    predicates,
    utils::types::VertexIdx,
};

/// A mesh triangle: its corner nodes, their coordinates and the cached circumcircle.
///
/// Never modified after construction; insertion replaces triangles wholesale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshTri {
    pub nodes: [VertexNode; 3],
    pub points: [Point; 3],
    pub circle: Circle,
}

impl MeshTri {
    /// Fails with [`TriangulationError::DegenerateGeometry`] for collinear corners.
    pub fn new(
        nodes: [VertexNode; 3],
        points: [Point; 3],
        epsilon: f64,
    ) -> Result<Self, TriangulationError> {
        let circle = circumcircle_with_tolerance(points[0], points[1], points[2], epsilon)?;

        Ok(Self {
            nodes,
            points,
            circle,
        })
    }

    /// The three edges, each with its endpoint coordinates in canonical node order.
    pub fn edges(&self) -> [(Edge, [Point; 2]); 3] {
        let [n0, n1, n2] = self.nodes;
        let [p0, p1, p2] = self.points;

        [
            aligned_edge((n0, p0), (n1, p1)),
            aligned_edge((n1, p1), (n2, p2)),
            aligned_edge((n2, p2), (n0, p0)),
        ]
    }

    pub fn touches_scaffold(&self) -> bool {
        self.nodes.iter().any(VertexNode::is_scaffold)
    }

    pub fn has_node(&self, node: VertexNode) -> bool {
        self.nodes.contains(&node)
    }

    /// Check if the triangle is flat, i.e. exists of three co-linear points.
    pub fn is_flat(&self) -> bool {
        let [a, b, c] = self.points.map(Point::to_array);
        predicates::orient_2d(&a, &b, &c) == 0.0
    }

    pub const fn to_triangle(&self) -> Triangle {
        Triangle::new(self.points[0], self.points[1], self.points[2])
    }

    /// Check if `p` lies in the circumcircle, with ties broken by `policy`.
    pub fn circumcircle_contains(
        &self,
        p: Point,
        test: InCircleTest,
        policy: ContainmentPolicy,
    ) -> bool {
        match test {
            InCircleTest::Distance => self.circle.contains_with(p, policy),
            InCircleTest::Exact => {
                let [a, b, c] = self.points.map(Point::to_array);
                let sign = predicates::in_circle(&a, &b, &c, &p.to_array());

                match policy {
                    ContainmentPolicy::Inclusive => sign >= 0.0,
                    ContainmentPolicy::Strict => sign > 0.0,
                }
            }
        }
    }
}

/// Counters of a single vertex insertion.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct InsertionStats {
    /// Triangles removed because their circumcircle contains the new vertex.
    pub num_bad_tris: usize,
    /// Triangles fanned out from the new vertex to the cavity boundary.
    pub num_new_tris: usize,
}

/// A 2D triangulation data structure.
///
/// The triangles are kept in a flat list without adjacency information. Each insertion partitions
/// the list, drops the triangles in conflict with the new vertex and appends the re-triangulated
/// cavity.
#[derive(Debug, Default, Clone)]
pub struct TriDataStructure {
    scaffold: Option<[Point; 3]>,
    tris: Vec<MeshTri>,
    /// The number of triangles removed over the lifetime of the mesh.
    pub num_deleted_tris: usize,
}

impl TriDataStructure {
    pub const fn new() -> Self {
        Self {
            scaffold: None,
            tris: Vec::new(),
            num_deleted_tris: 0,
        }
    }

    /// Seed the mesh with the enclosing triangle.
    pub fn add_init_tri(
        &mut self,
        scaffold: Triangle,
        epsilon: f64,
    ) -> Result<(), TriangulationError> {
        if !self.tris.is_empty() {
            return Err(TriangulationError::InvariantViolation(
                "triangulation already contains triangles".to_string(),
            ));
        }

        let points = scaffold.vertices();
        let tri = MeshTri::new(
            [
                VertexNode::Scaffold(0),
                VertexNode::Scaffold(1),
                VertexNode::Scaffold(2),
            ],
            points,
            epsilon,
        )?;

        self.scaffold = Some(points);
        self.tris.push(tri);

        Ok(())
    }

    /// The enclosing triangle, once seeded.
    pub fn scaffold(&self) -> Option<Triangle> {
        self.scaffold.map(|[a, b, c]| Triangle::new(a, b, c))
    }

    /// All triangles, including the ones touching the enclosing triangle.
    pub fn tris(&self) -> &[MeshTri] {
        &self.tris
    }

    /// The triangles between input vertices only.
    pub fn casual_tris(&self) -> impl Iterator<Item = &MeshTri> + '_ {
        self.tris.iter().filter(|tri| !tri.touches_scaffold())
    }

    pub fn num_tris(&self) -> usize {
        self.tris.len()
    }

    /// Check the mesh for structural defects, given `num_vertices` inserted vertices.
    ///
    /// A sound mesh has no flat or repeated triangles, no edge in more than two triangles, the
    /// three scaffold edges as its only boundary, and `2n + 1` triangles for `n` vertices.
    pub fn is_sound(&self, num_vertices: usize) -> bool {
        let mut sound = true;

        if let Some(tri) = self.tris.iter().find(|tri| tri.is_flat()) {
            error!("Flat triangle: {}", tri.to_triangle());
            sound = false;
        }

        let mut keys: Vec<[VertexNode; 3]> = self
            .tris
            .iter()
            .map(|tri| {
                let mut nodes = tri.nodes;
                nodes.sort_unstable();
                nodes
            })
            .collect();
        keys.sort_unstable();
        if keys.windows(2).any(|pair| pair[0] == pair[1]) {
            error!("Repeated triangle in the mesh");
            sound = false;
        }

        for (edge, count) in edge_counts(self.tris.iter()) {
            if count > 2 {
                error!("Edge {} is shared by {} triangles", edge, count);
                sound = false;
            } else if count == 1 && !edge.is_scaffold() {
                error!("Edge {} is on the boundary of the mesh", edge);
                sound = false;
            }
        }

        let expected = 2 * num_vertices + 1;
        if self.tris.len() != expected {
            error!(
                "Mesh has {} triangles, expected {} for {} vertices",
                self.tris.len(),
                expected,
                num_vertices
            );
            sound = false;
        }

        sound
    }

    /// Insert the vertex `p` with index `v_idx` (Bowyer–Watson step).
    ///
    /// On error the mesh is left untouched.
    pub fn insert_vertex(
        &mut self,
        v_idx: VertexIdx,
        p: Point,
        test: InCircleTest,
        policy: ContainmentPolicy,
        epsilon: f64,
    ) -> Result<InsertionStats, TriangulationError> {
        let (bad, good): (Vec<MeshTri>, Vec<MeshTri>) = self
            .tris
            .iter()
            .copied()
            .partition(|tri| tri.circumcircle_contains(p, test, policy));

        if bad.is_empty() {
            return Err(TriangulationError::InvariantViolation(format!(
                "no circumcircle contains vertex {v_idx} {p}"
            )));
        }

        let boundary = cavity_boundary(&bad)?;

        let node = VertexNode::Casual(v_idx);
        let new_tris = boundary
            .into_iter()
            .map(|(edge, [u, v])| {
                let [n_u, n_v] = edge.nodes();
                MeshTri::new([n_u, n_v, node], [u, v, p], epsilon)
            })
            .collect::<Result<Vec<_>, _>>()?;

        let stats = InsertionStats {
            num_bad_tris: bad.len(),
            num_new_tris: new_tris.len(),
        };

        self.num_deleted_tris += bad.len();
        self.tris = good;
        self.tris.extend(new_tris);

        Ok(stats)
    }
}

/// How many of `tris` use each edge.
pub fn edge_counts<'a>(tris: impl Iterator<Item = &'a MeshTri>) -> HashMap<Edge, usize> {
    let mut counts = HashMap::new();
    for (edge, _) in tris.flat_map(MeshTri::edges) {
        *counts.entry(edge).or_insert(0) += 1;
    }
    counts
}

/// The edges used by exactly one of `bad`, in the order they are first met.
fn cavity_boundary(bad: &[MeshTri]) -> Result<Vec<(Edge, [Point; 2])>, TriangulationError> {
    let mut counts: HashMap<Edge, usize> = HashMap::with_capacity(3 * bad.len());
    let mut edges = Vec::with_capacity(3 * bad.len());

    for (edge, ends) in bad.iter().flat_map(MeshTri::edges) {
        let count = counts.entry(edge).or_default();
        *count += 1;

        if *count > 2 {
            return Err(TriangulationError::InvariantViolation(format!(
                "edge {edge} is shared by more than two triangles"
            )));
        }

        if *count == 1 {
            edges.push((edge, ends));
        }
    }

    Ok(edges
        .into_iter()
        .filter(|(edge, _)| counts.get(edge) == Some(&1))
        .collect())
}

fn aligned_edge(
    (n_u, p_u): (VertexNode, Point),
    (n_v, p_v): (VertexNode, Point),
) -> (Edge, [Point; 2]) {
    let edge = Edge::new(n_u, n_v);
    if edge.nodes()[0] == n_u {
        (edge, [p_u, p_v])
    } else {
        (edge, [p_v, p_u])
    }
}
