use crate::{enclosing::BoundingBox, geometry::Point};

use super::types::VertexIdx;

/// Child cells of a Hilbert cell for each of the 8 curve orientations, as `(quadrant, orientation)`
/// in push order.
///
/// Quadrants: `0` lower left, `1` upper left, `2` upper right, `3` lower right.
const HILBERT_2D: [[(usize, u8); 4]; 8] = [
    [(0, 3), (1, 0), (2, 0), (3, 7)],
    [(3, 6), (2, 1), (1, 1), (0, 2)],
    [(1, 5), (2, 2), (3, 2), (0, 1)],
    [(0, 0), (3, 3), (2, 3), (1, 4)],
    [(2, 7), (3, 4), (0, 4), (1, 3)],
    [(1, 2), (0, 5), (3, 5), (2, 6)],
    [(3, 1), (0, 6), (1, 6), (2, 5)],
    [(2, 4), (1, 7), (0, 7), (3, 0)],
];

struct Cell {
    orientation: u8,
    idxs: Vec<VertexIdx>,
}

/// Sorts vertices along 2D Hilbert curve
///
/// Every index of `indices_to_add` appears exactly once in the result. Each cell is split at the
/// center of the tight bounding box of its own vertices.
pub fn sort_along_hilbert_curve_2d(
    vertices: &[Point],
    indices_to_add: &[VertexIdx],
) -> Vec<VertexIdx> {
    let mut curve_order = Vec::with_capacity(indices_to_add.len());

    let mut to_subdiv = vec![Cell {
        orientation: 0,
        idxs: indices_to_add.to_vec(),
    }];

    while let Some(cell) = to_subdiv.pop() {
        let num_idxs = cell.idxs.len();
        let points: Vec<Point> = cell.idxs.iter().map(|&idx| vertices[idx]).collect();

        let Some(bb) = BoundingBox::from_points(&points).filter(|_| num_idxs > 1) else {
            curve_order.extend(cell.idxs);
            continue;
        };

        let sep = bb.center();
        let mut quadrants: [Vec<VertexIdx>; 4] = Default::default();

        for idx in cell.idxs {
            let v = vertices[idx];
            let quadrant = match (v.x < sep.x, v.y < sep.y) {
                (true, true) => 0,
                (true, false) => 1,
                (false, false) => 2,
                (false, true) => 3,
            };
            quadrants[quadrant].push(idx);
        }

        // coincident vertices, or vertices too close for their midpoint to fall between them
        if quadrants.iter().any(|quadrant| quadrant.len() == num_idxs) {
            curve_order.extend(quadrants.into_iter().flatten());
            continue;
        }

        for (quadrant, orientation) in HILBERT_2D[cell.orientation as usize] {
            let idxs = std::mem::take(&mut quadrants[quadrant]);
            if idxs.is_empty() {
                continue;
            }

            to_subdiv.push(Cell { orientation, idxs });
        }
    }

    curve_order
}
