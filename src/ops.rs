/*!
# Graph Operations

Traits describing what algorithms may ask of a graph. They are implemented by
[`GraphStore`](crate::GraphStore), by its [`UnderlyingUndirected`](crate::UnderlyingUndirected)
view and by the residual network of the flow algorithms, so that traversals are written once
and reused everywhere.
*/

use std::{
    fmt::{self, Display},
    ops::Range,
};

use itertools::Itertools;

use crate::*;

/// Orientation of all edges of a graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Directed,
    Undirected,
}

impl Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Directed => write!(f, "directed"),
            Direction::Undirected => write!(f, "undirected"),
        }
    }
}

/// Provides access to the orientation of a graph
pub trait GraphType {
    /// Returns the orientation of all edges
    fn direction(&self) -> Direction;

    /// Returns *true* if edges have an orientation
    fn is_directed(&self) -> bool {
        self.direction() == Direction::Directed
    }

    /// Returns *true* if `(u, v)` and `(v, u)` denote the same edge
    fn is_undirected(&self) -> bool {
        self.direction() == Direction::Undirected
    }
}

/// Provides getters pertaining to the node-size of a graph
pub trait GraphNodeOrder {
    /// Returns the number of nodes of the graph
    fn number_of_nodes(&self) -> NumNodes;

    /// Return the number of nodes as usize
    fn len(&self) -> usize {
        self.number_of_nodes() as usize
    }

    /// Returns a range over all nodes.
    /// In contrast to an iterator borrowing `self`, the range may be used where additional
    /// mutable references are needed.
    fn vertices_range(&self) -> Range<Node> {
        0..self.number_of_nodes()
    }

    /// Returns empty bitset with one entry per node
    fn vertex_bitset_unset(&self) -> NodeBitSet {
        NodeBitSet::new(self.number_of_nodes())
    }

    /// Returns *true* if the graph has no nodes (and thus no edges)
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Provides getters pertaining to the edge-size of a graph
pub trait GraphEdgeOrder {
    /// Returns the number of edges of the graph
    fn number_of_edges(&self) -> NumEdges;

    /// Returns *true* if the graph has no edges
    fn is_singleton(&self) -> bool {
        self.number_of_edges() == 0
    }
}

/// Traits pertaining getters for neighborhoods & edges
pub trait AdjacencyList: GraphNodeOrder + Sized {
    /// Returns an iterator over the (open) neighborhood of a given vertex.
    /// The order is deterministic and stable across calls.
    /// ** Panics if `u >= n` **
    ///
    /// Note that for directed graphs, this should be equivalent to out-neighbors
    fn neighbors_of(&self, u: Node) -> impl Iterator<Item = Node> + '_;

    /// Returns the number of (outgoing) neighbors of `u`
    /// ** Panics if `u >= n` **
    fn degree_of(&self, u: Node) -> NumNodes;

    /// Returns an iterator over outgoing edges of a given vertex.
    /// If `only_normalized`, then only edges `(u, v)` with `u <= v` are considered.
    /// ** Panics if `u >= n` **
    fn edges_of(&self, u: Node, only_normalized: bool) -> impl Iterator<Item = Edge> + '_ {
        self.neighbors_of(u)
            .map(move |v| Edge(u, v))
            .filter(move |e| !only_normalized || e.is_normalized())
    }

    /// Returns an iterator over all edges in the graph.
    /// If `only_normalized`, then only edges `(u, v)` with `u <= v` are considered.
    fn edges(&self, only_normalized: bool) -> impl Iterator<Item = Edge> + '_ {
        self.vertices_range()
            .flat_map(move |u| self.edges_of(u, only_normalized))
    }

    /// Returns all edges in lexicographic order.
    fn ordered_edges(&self, only_normalized: bool) -> Vec<Edge> {
        self.edges(only_normalized).sorted().collect_vec()
    }
}

/// Adjacency lists whose arcs carry a weight
pub trait WeightedAdjacencyList: AdjacencyList {
    /// Returns an iterator over `(neighbor, weight)` pairs in the same order as
    /// [`AdjacencyList::neighbors_of`].
    /// ** Panics if `u >= n` **
    fn weighted_neighbors_of(&self, u: Node) -> impl Iterator<Item = (Node, Weight)> + '_;
}

/// Directed adjacency lists that additionally provide in-neighbors
pub trait DirectedAdjacencyList: AdjacencyList {
    /// Returns an iterator over all `v` with an arc `(v, u)`.
    /// ** Panics if `u >= n` **
    fn in_neighbors_of(&self, u: Node) -> impl Iterator<Item = Node> + '_;

    /// Returns the number of in-neighbors of `u`
    /// ** Panics if `u >= n` **
    fn in_degree_of(&self, u: Node) -> NumNodes;
}

/// Helper trait for structs that hold a reference to a graph
pub trait WithGraphRef<G> {
    /// Returns the graph being referenced
    fn graph_ref(&self) -> &G;
}
