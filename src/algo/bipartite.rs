/*!
# Bipartite Graph Algorithms

Two-coloring of graphs: computing a bipartition, if one exists, and testing bipartiteness.
Edge orientation is ignored, i.e. a directed graph is bipartite iff its underlying
undirected graph is.
*/

use super::*;
use tracing::debug;

/// A split of all vertices into two classes such that every edge connects both classes.
///
/// Within each class, vertices appear in registration order. The smallest node of every
/// connected component lies in `left`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bipartition<V> {
    pub left: Vec<V>,
    pub right: Vec<V>,
}

impl<V: Vertex> Bipartition<V> {
    /// Returns `Some(true)` if `v` is in `left`, `Some(false)` if it is in `right`
    /// and `None` if it is in neither
    pub fn is_on_left_side(&self, v: &V) -> Option<bool> {
        if self.left.contains(v) {
            Some(true)
        } else if self.right.contains(v) {
            Some(false)
        } else {
            None
        }
    }
}

/// Computes a two-coloring of the node set, where nodes in the returned set form the
/// **right** (1) class and all others the **left** (0) class.
///
/// Each component is colored by a BFS from its smallest node, assigning every discovered node
/// the color opposite to its predecessor. Afterwards, all edges are verified.
///
/// # Errors
/// - [`GraphError::NotBipartite`] naming the first monochromatic edge in insertion order,
/// - [`GraphError::Interrupted`] if `interrupt` was raised.
pub(crate) fn two_coloring<V: Vertex>(
    graph: &GraphStore<V>,
    interrupt: Option<&Interrupt>,
) -> Result<NodeBitSet> {
    let mut right = graph.vertex_bitset_unset();
    if graph.is_empty() {
        return Ok(right);
    }

    let view = graph.underlying_undirected();
    let mut bfs = view.bfs_with_predecessor(0);

    loop {
        for (node, pred) in bfs
            .by_ref()
            .filter_map(|x| Some((x.item(), x.predecessor()?)))
        {
            interrupt::check(interrupt)?;
            if !right.get_bit(pred) {
                right.set_bit(node);
            }
        }

        if !bfs.try_restart_at_unvisited() {
            break;
        }
    }

    if let Some(record) = graph
        .edge_records()
        .iter()
        .find(|r| right.get_bit(r.edge.0) == right.get_bit(r.edge.1))
    {
        let Edge(u, v) = record.edge;
        debug!(from = ?graph.label_of(u), to = ?graph.label_of(v), "monochromatic edge");
        return Err(GraphError::not_bipartite(graph.label_of(u), graph.label_of(v)));
    }

    Ok(right)
}

/// A trait for testing and computing bipartitions of a [`GraphStore`]
pub trait BipartiteTest<V> {
    /// Computes a bipartition of the graph, if one exists.
    ///
    /// # Examples
    /// ```
    /// use wgraphs::{prelude::*, algo::*};
    ///
    /// let mut g = GraphStore::undirected();
    /// for (u, v) in [(0, 1), (1, 2), (2, 3)] {
    ///     g.add_unit_edge(u, v).unwrap();
    /// }
    ///
    /// let bip = g.bipartition().unwrap();
    /// assert_eq!(bip.left, vec![0, 2]);
    /// assert_eq!(bip.right, vec![1, 3]);
    ///
    /// g.add_unit_edge(0, 2).unwrap();
    /// assert!(g.bipartition().is_err());
    /// ```
    ///
    /// # Errors
    /// [`GraphError::NotBipartite`] naming an edge whose endpoints received the same color.
    fn bipartition(&self) -> Result<Bipartition<V>>;

    /// Tests whether the graph is bipartite.
    fn is_bipartite(&self) -> bool {
        self.bipartition().is_ok()
    }
}

impl<V: Vertex> BipartiteTest<V> for GraphStore<V> {
    fn bipartition(&self) -> Result<Bipartition<V>> {
        Search::new().bipartition(self)
    }
}

impl Search {
    /// Computes a bipartition of the graph, see [`BipartiteTest::bipartition`]
    pub fn bipartition<V: Vertex>(&self, graph: &GraphStore<V>) -> Result<Bipartition<V>> {
        let right = two_coloring(graph, self.interrupt_ref())?;

        let (right_side, left_side): (Vec<Node>, Vec<Node>) =
            graph.vertices_range().partition(|&u| right.get_bit(u));
        let labels = |nodes: Vec<Node>| -> Vec<V> {
            nodes.into_iter().map(|u| graph.label_of(u).clone()).collect()
        };

        Ok(Bipartition {
            left: labels(left_side),
            right: labels(right_side),
        })
    }
}
