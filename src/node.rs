use crate::utils::types::VertexIdx;
use core::fmt;

/// A triangle corner.
///
/// A `casual node` has an index into the input vertex list.
///
/// A `scaffold node` is one of the three corners of the enclosing triangle. Triangles touching
/// one are removed when the triangulation is read out.
///
/// The derived ordering is total, so a pair of nodes can be sorted into a canonical edge.
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Copy, Clone, Debug)]
pub enum VertexNode {
    Casual(VertexIdx),
    Scaffold(usize),
}

impl VertexNode {
    /// Get the index of the node.
    pub const fn idx(&self) -> Option<VertexIdx> {
        match self {
            VertexNode::Casual(idx) => Some(*idx),
            VertexNode::Scaffold(_) => None,
        }
    }

    /// Check if the node is an enclosing-triangle corner.
    pub const fn is_scaffold(&self) -> bool {
        matches!(self, VertexNode::Scaffold(_))
    }
}

impl fmt::Display for VertexNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VertexNode::Casual(v_idx) => write!(f, "Casual({})", v_idx),
            VertexNode::Scaffold(corner) => write!(f, "Scaffold({})", corner),
        }
    }
}
