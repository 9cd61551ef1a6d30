/*!
# Minimum Spanning Trees

Kruskal's and Prim's algorithm for undirected weighted graphs.

Both algorithms return a [`SpanningForest`]: on a connected graph it is a minimum spanning
tree, otherwise Kruskal returns a minimum spanning forest and Prim (by default) grows one tree
per component, restarting at the smallest unreached vertex. The flag
[`SpanningForest::spanning`] reports whether the result connects all vertices.

Ties between equal weights are broken deterministically: Kruskal prefers earlier inserted
edges, Prim prefers edges that entered its frontier earlier.
*/

use super::*;
use std::{
    cmp::{Ordering, Reverse},
    collections::BinaryHeap,
};
use tracing::{debug, trace};

/// Edges selected by a spanning tree algorithm
#[derive(Debug, Clone, PartialEq)]
pub struct SpanningForest<V> {
    /// Selected edges in the order they were accepted
    pub edges: Vec<WeightedEdge<V>>,
    /// Sum of the weights of all selected edges
    pub total_weight: Weight,
    /// *true* iff the edges connect all vertices (`|edges| = |V| - 1`)
    pub spanning: bool,
}

impl<V> SpanningForest<V> {
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Number of trees, given the number of vertices of the graph
    pub fn number_of_trees(&self, number_of_nodes: NumNodes) -> NumNodes {
        number_of_nodes - self.edges.len() as NumNodes
    }
}

fn require_undirected<V>(graph: &GraphStore<V>) -> Result<()> {
    if graph.is_directed() {
        return Err(GraphError::DirectionMismatch {
            expected: Direction::Undirected,
        });
    }
    Ok(())
}

/// Translates selected edge ids into a [`SpanningForest`].
/// Each selected id comes with the node from which the edge was reached.
fn collect_forest<V: Vertex>(
    graph: &GraphStore<V>,
    selected: Vec<(Node, EdgeId)>,
) -> SpanningForest<V> {
    let records = graph.edge_records();
    let mut total_weight = 0.0;

    let edges: Vec<_> = selected
        .into_iter()
        .map(|(tail, id)| {
            let record = &records[id as usize];
            let Edge(u, v) = record.edge;
            let head = if u == tail { v } else { u };
            total_weight += record.weight;
            WeightedEdge {
                source: graph.label_of(tail).clone(),
                target: graph.label_of(head).clone(),
                weight: record.weight,
                capacity: record.capacity,
            }
        })
        .collect();

    let n = graph.number_of_nodes();
    SpanningForest {
        spanning: n <= 1 || edges.len() as NumNodes == n - 1,
        edges,
        total_weight,
    }
}

/// Kruskal's algorithm: scans all edges by ascending weight and keeps every edge that
/// connects two different components of the union-find structure.
///
/// # Examples
/// ```
/// use wgraphs::{prelude::*, algo::*};
///
/// let g = GraphStore::from_weighted_edges(
///     Direction::Undirected,
///     [("a", "b", 1.0), ("b", "c", 2.0), ("a", "c", 3.0), ("c", "d", 1.0)],
/// )
/// .unwrap();
///
/// let mst = Kruskal::new().run(&g).unwrap();
/// assert_eq!(mst.total_weight, 4.0);
/// assert_eq!(mst.len(), 3);
/// assert!(mst.spanning);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Kruskal {
    interrupt: Option<Interrupt>,
}

impl Kruskal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Polls `interrupt` once per scanned edge
    pub fn set_interrupt(&mut self, interrupt: Interrupt) {
        self.interrupt = Some(interrupt);
    }

    /// Polls `interrupt` once per scanned edge
    pub fn interrupt(mut self, interrupt: Interrupt) -> Self {
        self.set_interrupt(interrupt);
        self
    }

    /// Computes a minimum spanning forest.
    ///
    /// # Errors
    /// [`GraphError::DirectionMismatch`] if the graph is directed.
    pub fn run<V: Vertex>(&self, graph: &GraphStore<V>) -> Result<SpanningForest<V>> {
        require_undirected(graph)?;

        let records = graph.edge_records();
        let mut order: Vec<EdgeId> = (0..records.len() as EdgeId).collect();
        // stable sort: equal weights keep insertion order
        order.sort_by(|&a, &b| {
            records[a as usize]
                .weight
                .total_cmp(&records[b as usize].weight)
        });

        let mut components = UnionFind::new(graph.number_of_nodes());
        let mut selected = Vec::with_capacity(graph.len().saturating_sub(1));
        for id in order {
            interrupt::check(self.interrupt.as_ref())?;
            let Edge(u, v) = records[id as usize].edge;
            if components.union(u, v) {
                trace!(edge = id, weight = records[id as usize].weight, "accept");
                selected.push((u, id));
            }
        }

        let forest = collect_forest(graph, selected);
        debug!(
            nodes = graph.number_of_nodes(),
            edges = graph.number_of_edges(),
            total_weight = forest.total_weight,
            spanning = forest.spanning,
            "kruskal finished"
        );
        Ok(forest)
    }
}

/// Entry of Prim's frontier: an edge leaving the current tree
#[derive(Debug, Clone, Copy)]
struct FrontierEdge {
    weight: Weight,
    seq: u64,
    tail: Node,
    head: Node,
    edge: EdgeId,
}

impl PartialEq for FrontierEdge {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FrontierEdge {}

impl PartialOrd for FrontierEdge {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierEdge {
    fn cmp(&self, other: &Self) -> Ordering {
        self.weight
            .total_cmp(&other.weight)
            .then(self.seq.cmp(&other.seq))
    }
}

/// Prim's algorithm: grows a tree from a start vertex by repeatedly adding the cheapest edge
/// leaving the tree, using a binary heap with lazy deletion.
///
/// - If no start vertex is set, the smallest vertex (by `Ord`) is used.
/// - If restarts are enabled (default), a new tree is grown from the smallest unreached vertex
///   whenever the frontier runs empty, so that every component is covered.
///
/// # Examples
/// ```
/// use wgraphs::{prelude::*, algo::*};
///
/// let mut g = GraphStore::undirected();
/// g.add_weighted_edge("a", "b", 1.0).unwrap();
/// g.add_weighted_edge("c", "d", 2.0).unwrap();
///
/// let forest = Prim::new().run(&g).unwrap();
/// assert_eq!(forest.total_weight, 3.0);
/// assert!(!forest.spanning);
///
/// let tree = Prim::new().start("c").restart(false).run(&g).unwrap();
/// assert_eq!(tree.total_weight, 2.0);
/// assert_eq!(tree.edges[0].source, "c");
/// ```
#[derive(Debug, Clone)]
pub struct Prim<V> {
    start: Option<V>,
    restart: bool,
    interrupt: Option<Interrupt>,
}

impl<V> Default for Prim<V> {
    fn default() -> Self {
        Self {
            start: None,
            restart: true,
            interrupt: None,
        }
    }
}

impl<V: Vertex> Prim<V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Grows the first tree from `start`
    pub fn set_start(&mut self, start: V) {
        self.start = Some(start);
    }

    /// Grows the first tree from `start`
    pub fn start(mut self, start: V) -> Self {
        self.set_start(start);
        self
    }

    /// If *false*, only the component of the start vertex is spanned
    pub fn set_restart(&mut self, restart: bool) {
        self.restart = restart;
    }

    /// If *false*, only the component of the start vertex is spanned
    pub fn restart(mut self, restart: bool) -> Self {
        self.set_restart(restart);
        self
    }

    /// Polls `interrupt` once per extracted frontier edge
    pub fn set_interrupt(&mut self, interrupt: Interrupt) {
        self.interrupt = Some(interrupt);
    }

    /// Polls `interrupt` once per extracted frontier edge
    pub fn interrupt(mut self, interrupt: Interrupt) -> Self {
        self.set_interrupt(interrupt);
        self
    }

    /// Computes a minimum spanning tree (or forest, see [`Prim`]).
    ///
    /// # Errors
    /// - [`GraphError::DirectionMismatch`] if the graph is directed,
    /// - [`GraphError::UnknownVertex`] if the start vertex is not in the graph.
    pub fn run(&self, graph: &GraphStore<V>) -> Result<SpanningForest<V>> {
        require_undirected(graph)?;

        let start = match &self.start {
            Some(s) => graph.node_of(s)?,
            None => match graph.min_node() {
                Some(u) => u,
                None => return Ok(collect_forest(graph, Vec::new())),
            },
        };

        // restart candidates in ascending vertex order
        let mut roots: Vec<Node> = graph.vertices_range().collect();
        roots.sort_by(|&a, &b| graph.label_of(a).cmp(graph.label_of(b)));
        let mut roots = roots.into_iter();

        let mut in_tree = graph.vertex_bitset_unset();
        let mut frontier = BinaryHeap::new();
        let mut seq = 0u64;
        let mut selected = Vec::with_capacity(graph.len().saturating_sub(1));

        let mut enter = |u: Node, frontier: &mut BinaryHeap<Reverse<FrontierEdge>>| {
            for inc in graph.incidences_of(u) {
                seq += 1;
                frontier.push(Reverse(FrontierEdge {
                    weight: graph.edge_records()[inc.edge as usize].weight,
                    seq,
                    tail: u,
                    head: inc.head,
                    edge: inc.edge,
                }));
            }
        };

        let mut root = Some(start);
        while let Some(r) = root {
            in_tree.set_bit(r);
            enter(r, &mut frontier);

            while let Some(Reverse(entry)) = frontier.pop() {
                interrupt::check(self.interrupt.as_ref())?;
                if in_tree.set_bit(entry.head) {
                    continue;
                }
                trace!(edge = entry.edge, weight = entry.weight, "accept");
                selected.push((entry.tail, entry.edge));
                enter(entry.head, &mut frontier);
            }

            root = if self.restart {
                roots.find(|&u| !in_tree.get_bit(u))
            } else {
                None
            };
        }

        let forest = collect_forest(graph, selected);
        debug!(
            nodes = graph.number_of_nodes(),
            edges = graph.number_of_edges(),
            total_weight = forest.total_weight,
            spanning = forest.spanning,
            "prim finished"
        );
        Ok(forest)
    }
}

/// Convenience methods for [`Kruskal`] and [`Prim`] with default configuration
pub trait MinimumSpanningTree<V> {
    /// Minimum spanning forest via [`Kruskal`]
    fn kruskal(&self) -> Result<SpanningForest<V>>;

    /// Minimum spanning forest via [`Prim`], starting at the smallest vertex
    fn prim(&self) -> Result<SpanningForest<V>>;
}

impl<V: Vertex> MinimumSpanningTree<V> for GraphStore<V> {
    fn kruskal(&self) -> Result<SpanningForest<V>> {
        Kruskal::new().run(self)
    }

    fn prim(&self) -> Result<SpanningForest<V>> {
        Prim::new().run(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use itertools::Itertools;
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg64Mcg;

    fn square_with_diagonal() -> GraphStore<&'static str> {
        GraphStore::from_weighted_edges(
            Direction::Undirected,
            [
                ("a", "b", 1.0),
                ("b", "c", 2.0),
                ("c", "d", 1.0),
                ("d", "a", 3.0),
                ("a", "c", 2.5),
            ],
        )
        .unwrap()
    }

    #[test]
    fn kruskal_selects_lightest_edges() {
        let g = square_with_diagonal();
        let mst = g.kruskal().unwrap();

        let edges = mst
            .edges
            .iter()
            .map(|e| (e.source, e.target, e.weight))
            .collect_vec();
        assert_eq!(edges, vec![("a", "b", 1.0), ("c", "d", 1.0), ("b", "c", 2.0)]);
        assert_eq!(mst.total_weight, 4.0);
        assert!(mst.spanning);
    }

    #[test]
    fn prim_grows_from_smallest_vertex() {
        let g = square_with_diagonal();
        let mst = g.prim().unwrap();

        let edges = mst
            .edges
            .iter()
            .map(|e| (e.source, e.target))
            .collect_vec();
        assert_eq!(edges, vec![("a", "b"), ("b", "c"), ("c", "d")]);
        assert_eq!(mst.total_weight, 4.0);
        assert!(mst.spanning);
    }

    #[test]
    fn kruskal_breaks_ties_by_insertion_order() {
        let g = GraphStore::from_weighted_edges(
            Direction::Undirected,
            [(0, 1, 1.0), (1, 2, 1.0), (0, 2, 1.0)],
        )
        .unwrap();
        let mst = g.kruskal().unwrap();
        assert_eq!(
            mst.edges.iter().map(|e| (e.source, e.target)).collect_vec(),
            vec![(0, 1), (1, 2)]
        );
    }

    #[test]
    fn disconnected_graphs_yield_forests() {
        let mut g = GraphStore::undirected();
        g.add_weighted_edge("a", "b", 1.0).unwrap();
        g.add_weighted_edge("c", "d", 2.0).unwrap();
        g.add_vertex("e");

        for forest in [g.kruskal().unwrap(), g.prim().unwrap()] {
            assert_eq!(forest.len(), 2);
            assert_eq!(forest.total_weight, 3.0);
            assert!(!forest.spanning);
            assert_eq!(forest.number_of_trees(g.number_of_nodes()), 3);
        }

        let single = Prim::new().start("d").restart(false).run(&g).unwrap();
        assert_eq!(single.len(), 1);
        assert_eq!((single.edges[0].source, single.edges[0].target), ("d", "c"));
    }

    #[test]
    fn trivial_graphs_are_spanned() {
        let empty = GraphStore::<u32>::undirected();
        assert!(empty.kruskal().unwrap().spanning);
        assert!(empty.prim().unwrap().is_empty());

        let mut single = GraphStore::undirected();
        single.add_vertex(7);
        let forest = single.prim().unwrap();
        assert!(forest.spanning);
        assert_eq!(forest.total_weight, 0.0);
    }

    #[test]
    fn rejects_directed_graphs_and_unknown_start() {
        let mut g = GraphStore::directed();
        g.add_unit_edge(0, 1).unwrap();
        assert!(matches!(
            g.kruskal(),
            Err(GraphError::DirectionMismatch {
                expected: Direction::Undirected
            })
        ));
        assert!(g.prim().is_err());

        let mut g = GraphStore::undirected();
        g.add_unit_edge(0, 1).unwrap();
        assert!(matches!(
            Prim::new().start(5).run(&g),
            Err(GraphError::UnknownVertex(_))
        ));
    }

    #[test]
    fn negative_weights_are_allowed() {
        let g = GraphStore::from_weighted_edges(
            Direction::Undirected,
            [(0, 1, -2.0), (1, 2, 3.0), (0, 2, -1.0)],
        )
        .unwrap();
        assert_eq!(g.kruskal().unwrap().total_weight, -3.0);
        assert_eq!(g.prim().unwrap().total_weight, -3.0);
    }

    #[test]
    fn kruskal_and_prim_agree_on_random_graphs() {
        let rng = &mut Pcg64Mcg::seed_from_u64(0x3517);

        for _ in 0..100 {
            let n: u32 = rng.random_range(1..30);
            let mut g = GraphStore::undirected();
            for u in 0..n {
                g.add_vertex(u);
            }
            for _ in 0..rng.random_range(0..(3 * n)) {
                let u = rng.random_range(0..n);
                let v = rng.random_range(0..n);
                if u != v && !g.contains_edge(&u, &v) {
                    let w = rng.random_range(0..20) as Weight;
                    g.add_weighted_edge(u, v, w).unwrap();
                }
            }

            let kruskal = g.kruskal().unwrap();
            let prim = g.prim().unwrap();
            assert_eq!(kruskal.total_weight, prim.total_weight);
            assert_eq!(kruskal.len(), prim.len());
            assert_eq!(kruskal.spanning, prim.spanning);
            assert_eq!(kruskal.spanning, is_connected(&g));

            // the selected edges never close a cycle
            let mut uf = UnionFind::new(n);
            for e in &kruskal.edges {
                assert!(uf.union(e.source, e.target));
            }
        }
    }

    #[test]
    fn raised_interrupt_aborts() {
        let g = square_with_diagonal();
        let interrupt = Interrupt::new();
        interrupt.raise();
        assert!(matches!(
            Kruskal::new().interrupt(interrupt.clone()).run(&g),
            Err(GraphError::Interrupted)
        ));
        assert!(matches!(
            Prim::new().interrupt(interrupt).run(&g),
            Err(GraphError::Interrupted)
        ));
    }
}
