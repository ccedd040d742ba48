use core::fmt;

use crate::node::VertexNode;

/// An undirected edge between two triangle corners.
///
/// The endpoints are stored sorted, so `Edge::new(u, v) == Edge::new(v, u)` and both hash alike.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Edge([VertexNode; 2]);

impl Edge {
    pub fn new(u: VertexNode, v: VertexNode) -> Self {
        if u <= v {
            Self([u, v])
        } else {
            Self([v, u])
        }
    }

    pub const fn nodes(&self) -> [VertexNode; 2] {
        self.0
    }

    /// Check if the edge has one end in the enclosing triangle.
    pub const fn touches_scaffold(&self) -> bool {
        self.0[0].is_scaffold() || self.0[1].is_scaffold()
    }

    /// Check if both ends are enclosing-triangle corners.
    pub const fn is_scaffold(&self) -> bool {
        self.0[0].is_scaffold() && self.0[1].is_scaffold()
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -- {}", self.0[0], self.0[1])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_order_independent() {
        let u = VertexNode::Casual(3);
        let v = VertexNode::Scaffold(1);

        assert_eq!(Edge::new(u, v), Edge::new(v, u));
        assert_eq!(Edge::new(u, v).nodes(), Edge::new(v, u).nodes());
    }

    #[test]
    fn test_counts_as_one_key() {
        let a = VertexNode::Casual(0);
        let b = VertexNode::Casual(1);
        let c = VertexNode::Casual(2);

        let mut counts: HashMap<Edge, usize> = HashMap::new();
        for edge in [Edge::new(a, b), Edge::new(b, a), Edge::new(b, c)] {
            *counts.entry(edge).or_default() += 1;
        }

        assert_eq!(counts[&Edge::new(a, b)], 2);
        assert_eq!(counts[&Edge::new(c, b)], 1);
    }

    #[test]
    fn test_touches_scaffold() {
        assert!(Edge::new(VertexNode::Casual(0), VertexNode::Scaffold(2)).touches_scaffold());
        assert!(!Edge::new(VertexNode::Casual(0), VertexNode::Casual(2)).touches_scaffold());
        assert!(Edge::new(VertexNode::Scaffold(0), VertexNode::Scaffold(2)).is_scaffold());
        assert!(!Edge::new(VertexNode::Casual(0), VertexNode::Scaffold(2)).is_scaffold());
    }
}
