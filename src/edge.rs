use std::fmt::{Debug, Display};

use crate::Node;

/// An edge between two dense nodes.
/// It is up to the graph whether an Edge is directed or not.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Edge(pub Node, pub Node);

/// We limit the number of edges to `2^32 - 1`.
pub type NumEdges = u32;

/// Position of an edge in insertion order.
pub type EdgeId = NumEdges;

/// Real-valued edge weight
pub type Weight = f64;

/// Non-negative edge capacity used by flow computations
pub type Capacity = f64;

impl Display for Edge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{})", self.0, self.1)
    }
}

impl Debug for Edge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        <Self as Display>::fmt(self, f)
    }
}

impl Edge {
    /// Normalizes the edge such that the endpoint with smaller value comes first
    pub fn normalized(&self) -> Self {
        Edge(self.0.min(self.1), self.0.max(self.1))
    }

    /// Returns true if the endpoint with smaller index comes first
    pub fn is_normalized(&self) -> bool {
        self.0 <= self.1
    }
}

/// An edge together with its attributes, expressed in caller vertex identifiers.
///
/// `V` is usually either an owned vertex identifier or a reference into the graph store.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightedEdge<V> {
    pub source: V,
    pub target: V,
    pub weight: Weight,
    pub capacity: Option<Capacity>,
}

impl<V: Clone> WeightedEdge<&V> {
    /// Clones the endpoints to obtain an edge that no longer borrows the graph
    pub fn cloned(&self) -> WeightedEdge<V> {
        WeightedEdge {
            source: self.source.clone(),
            target: self.target.clone(),
            weight: self.weight,
            capacity: self.capacity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cloned_edge_owns_its_endpoints() {
        let (a, b) = ("a".to_string(), "b".to_string());
        let borrowed = WeightedEdge {
            source: &a,
            target: &b,
            weight: 2.5,
            capacity: Some(7.0),
        };
        let owned: WeightedEdge<String> = borrowed.cloned();
        assert_eq!(owned.source, "a");
        assert_eq!((owned.weight, owned.capacity), (2.5, Some(7.0)));
    }

    #[test]
    fn edge_normalization() {
        assert_eq!(Edge(3, 1).normalized(), Edge(1, 3));
        assert!(Edge(1, 3).is_normalized());
        assert!(!Edge(3, 1).is_normalized());
        assert_eq!(format!("{:?}", Edge(0, 4)), "(0,4)");
    }
}
