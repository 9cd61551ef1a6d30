use super::*;

/// A view of a [`GraphStore`] that ignores edge orientation.
///
/// For directed graphs, the neighbors of `u` are its out-neighbors followed by its in-neighbors.
/// For undirected graphs, the view behaves exactly like the store itself.
/// Used for weak connectivity and two-colorings of directed graphs.
#[derive(Debug, Clone, Copy)]
pub struct UnderlyingUndirected<'a, V> {
    graph: &'a GraphStore<V>,
}

impl<'a, V> UnderlyingUndirected<'a, V> {
    pub fn new(graph: &'a GraphStore<V>) -> Self {
        Self { graph }
    }
}

impl<V> GraphNodeOrder for UnderlyingUndirected<'_, V> {
    fn number_of_nodes(&self) -> NumNodes {
        self.graph.number_of_nodes()
    }
}

impl<V> AdjacencyList for UnderlyingUndirected<'_, V> {
    fn neighbors_of(&self, u: Node) -> impl Iterator<Item = Node> + '_ {
        let incoming = self.graph.is_directed().then(|| self.graph.in_neighbors_of(u));
        self.graph
            .neighbors_of(u)
            .chain(incoming.into_iter().flatten())
    }

    fn degree_of(&self, u: Node) -> NumNodes {
        if self.graph.is_directed() {
            self.graph.degree_of(u) + self.graph.in_degree_of(u)
        } else {
            self.graph.degree_of(u)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use itertools::Itertools;

    #[test]
    fn directed_view_merges_in_and_out() {
        let mut g = GraphStore::directed();
        g.add_unit_edge('a', 'b').unwrap();
        g.add_unit_edge('c', 'b').unwrap();
        g.add_unit_edge('b', 'd').unwrap();

        let view = g.underlying_undirected();
        let b = g.node_of(&'b').unwrap();
        let nbs = view.neighbors_of(b).map(|u| *g.label_of(u)).collect_vec();
        assert_eq!(nbs, vec!['d', 'a', 'c']);
        assert_eq!(view.degree_of(b), 3);
    }

    #[test]
    fn undirected_view_is_identity() {
        let mut g = GraphStore::undirected();
        g.add_unit_edge(1, 2).unwrap();
        g.add_unit_edge(2, 3).unwrap();

        let view = g.underlying_undirected();
        for u in g.vertices_range() {
            assert_eq!(
                view.neighbors_of(u).collect_vec(),
                g.neighbors_of(u).collect_vec()
            );
        }
    }
}
