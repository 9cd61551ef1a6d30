/*!
# Maximum Flow and Minimum Cut

This module computes maximum (s, t)-flows with the **Edmonds-Karp** algorithm and derives a
minimum (s, t)-cut from the final residual network.

## Core concepts
- Every edge is an arc with a **capacity**: the explicit capacity of the edge or, if none
  was given, its weight. Undirected edges yield one arc per direction, each with the full
  capacity.
- The [`ResidualNetwork`] stores every arc together with a paired reverse arc of capacity 0;
  pushing flow along an arc moves residual capacity to its partner.
- [`EdmondsKarp`] is an iterator: every call to `next` finds a shortest augmenting path by BFS
  and augments along it.
- After termination, the vertices reachable from the source in the residual network form the
  source side of a minimum cut (max-flow min-cut theorem).
*/

use super::*;
use fxhash::FxHashSet;
use smallvec::SmallVec;
use tracing::{debug, trace};

/// Index of an arc in a [`ResidualNetwork`]; arc `a` and arc `a ^ 1` are partners
pub type ArcId = u32;

#[derive(Debug, Clone, Copy, PartialEq)]
struct ArcRecord {
    head: Node,
    residual: Capacity,
    capacity: Capacity,
}

/// Residual network of a flow computation between a fixed source and target.
///
/// Even arc ids are forward arcs (one per arc of the input), odd ids their reverse arcs.
/// As an [`AdjacencyList`], the neighbors of `u` are the heads of arcs leaving `u` with positive
/// residual capacity, so all traversals of this crate run on it unchanged.
#[derive(Debug, Clone)]
pub struct ResidualNetwork {
    source: Node,
    target: Node,
    arcs: Vec<ArcRecord>,
    out_arcs: Vec<SmallVec<[ArcId; 4]>>,
}

impl ResidualNetwork {
    /// Builds the residual network of `graph` with zero flow.
    ///
    /// # Errors
    /// [`GraphError::NegativeCapacity`] if an edge without explicit capacity has a negative
    /// weight.
    pub fn from_graph<V: Vertex>(graph: &GraphStore<V>, source: Node, target: Node) -> Result<Self> {
        let mut network = Self {
            source,
            target,
            arcs: Vec::with_capacity(4 * graph.edge_records().len()),
            out_arcs: vec![SmallVec::new(); graph.len()],
        };

        for record in graph.edge_records() {
            let Edge(u, v) = record.edge;
            let capacity = record.effective_capacity();
            if capacity < 0.0 {
                return Err(GraphError::NegativeCapacity {
                    from: graph.describe(u),
                    to: graph.describe(v),
                    capacity,
                });
            }

            network.add_arc_pair(u, v, capacity);
            if graph.is_undirected() {
                network.add_arc_pair(v, u, capacity);
            }
        }

        Ok(network)
    }

    fn add_arc_pair(&mut self, u: Node, v: Node, capacity: Capacity) {
        let id = self.arcs.len() as ArcId;
        self.arcs.push(ArcRecord {
            head: v,
            residual: capacity,
            capacity,
        });
        self.arcs.push(ArcRecord {
            head: u,
            residual: 0.0,
            capacity: 0.0,
        });
        self.out_arcs[u as usize].push(id);
        self.out_arcs[v as usize].push(id + 1);
    }

    pub fn source(&self) -> Node {
        self.source
    }

    pub fn target(&self) -> Node {
        self.target
    }

    /// Number of arcs including reverse arcs
    pub fn number_of_arcs(&self) -> usize {
        self.arcs.len()
    }

    /// Tail of an arc, i.e. the head of its partner
    pub fn tail_of(&self, arc: ArcId) -> Node {
        self.arcs[(arc ^ 1) as usize].head
    }

    pub fn head_of(&self, arc: ArcId) -> Node {
        self.arcs[arc as usize].head
    }

    pub fn residual_of(&self, arc: ArcId) -> Capacity {
        self.arcs[arc as usize].residual
    }

    /// Flow on an arc; zero for reverse arcs
    pub fn flow_of(&self, arc: ArcId) -> Capacity {
        let a = &self.arcs[arc as usize];
        (a.capacity - a.residual).max(0.0)
    }

    /// Returns *true* for arcs that stem from an edge of the input graph
    pub fn is_forward(&self, arc: ArcId) -> bool {
        arc % 2 == 0
    }

    /// Moves `amount` units of residual capacity from `arc` to its partner
    pub fn push(&mut self, arc: ArcId, amount: Capacity) {
        self.arcs[arc as usize].residual -= amount;
        self.arcs[(arc ^ 1) as usize].residual += amount;
    }

    /// First arc `u -> v` with positive residual capacity
    fn admissible_arc(&self, u: Node, v: Node) -> Option<ArcId> {
        self.out_arcs[u as usize]
            .iter()
            .copied()
            .find(|&a| self.head_of(a) == v && self.residual_of(a) > 0.0)
    }
}

impl GraphNodeOrder for ResidualNetwork {
    fn number_of_nodes(&self) -> NumNodes {
        self.out_arcs.len() as NumNodes
    }
}

impl AdjacencyList for ResidualNetwork {
    fn neighbors_of(&self, u: Node) -> impl Iterator<Item = Node> + '_ {
        self.out_arcs[u as usize]
            .iter()
            .filter(|&&a| self.residual_of(a) > 0.0)
            .map(|&a| self.head_of(a))
    }

    fn degree_of(&self, u: Node) -> NumNodes {
        self.neighbors_of(u).count() as NumNodes
    }
}

/// A single augmentation performed by [`EdmondsKarp`]
#[derive(Debug, Clone, PartialEq)]
pub struct AugmentingPath {
    /// Nodes from source to target
    pub nodes: Vec<Node>,
    /// Amount of flow pushed along the path
    pub bottleneck: Capacity,
}

/// Implementation of the Edmonds-Karp algorithm on a [`ResidualNetwork`].
///
/// Iterating yields one [`AugmentingPath`] per shortest augmenting path found; the iterator
/// terminates once the target is no longer reachable from the source.
///
/// # Examples
/// ```
/// use wgraphs::{prelude::*, algo::*};
///
/// let mut g = GraphStore::directed();
/// g.add_capacity_edge("s", "a", 2.0).unwrap();
/// g.add_capacity_edge("a", "t", 1.0).unwrap();
/// g.add_capacity_edge("s", "t", 1.0).unwrap();
///
/// let (s, t) = (g.node_of(&"s").unwrap(), g.node_of(&"t").unwrap());
/// let mut ek = EdmondsKarp::new(ResidualNetwork::from_graph(&g, s, t).unwrap());
///
/// let first = ek.next().unwrap();
/// assert_eq!(first.nodes, vec![s, t]);
/// assert_eq!(ek.count(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct EdmondsKarp {
    residual_network: ResidualNetwork,
    predecessor: Vec<Node>,
    value: Capacity,
}

impl EdmondsKarp {
    pub fn new(residual_network: ResidualNetwork) -> Self {
        let n = residual_network.len();
        Self {
            residual_network,
            predecessor: vec![INVALID_NODE; n],
            value: 0.0,
        }
    }

    /// Performs BFS to find an augmenting path from source to target.
    /// Updates the predecessor array and returns whether the target was reached.
    fn bfs(&mut self) -> bool {
        let s = self.residual_network.source();
        let t = self.residual_network.target();

        let mut bfs = self.residual_network.bfs_with_predecessor(s);
        bfs.set_stop_at(t);
        bfs.parent_array_into(self.predecessor.as_mut_slice());
        bfs.did_visit_node(t)
    }

    /// Total flow pushed so far
    pub fn value(&self) -> Capacity {
        self.value
    }

    pub fn residual_network(&self) -> &ResidualNetwork {
        &self.residual_network
    }

    /// Augments until no augmenting path is left and returns the flow value.
    /// `interrupt` is polled before every augmentation.
    pub fn run_to_completion(&mut self, interrupt: Option<&Interrupt>) -> Result<Capacity> {
        loop {
            interrupt::check(interrupt)?;
            match self.next() {
                Some(path) => trace!(
                    length = path.nodes.len() - 1,
                    bottleneck = path.bottleneck,
                    "augment"
                ),
                None => return Ok(self.value),
            }
        }
    }

    /// Nodes reachable from the source in the current residual network
    pub fn source_side(&self) -> NodeBitSet {
        let mut reachable = self.residual_network.vertex_bitset_unset();
        for u in self.residual_network.bfs(self.residual_network.source()) {
            reachable.set_bit(u);
        }
        reachable
    }

    /// Consumes the solver and returns the residual network
    pub fn take(self) -> ResidualNetwork {
        self.residual_network
    }
}

impl Iterator for EdmondsKarp {
    type Item = AugmentingPath;

    fn next(&mut self) -> Option<Self::Item> {
        if !self.bfs() {
            return None;
        }

        let s = self.residual_network.source();
        let t = self.residual_network.target();

        let mut nodes = vec![t];
        let mut arcs: SmallVec<[ArcId; 16]> = SmallVec::new();
        let mut v = t;
        while v != s {
            let u = self.predecessor[v as usize];
            arcs.push(self.residual_network.admissible_arc(u, v)?);
            nodes.push(u);
            v = u;
        }

        let bottleneck = arcs
            .iter()
            .map(|&a| self.residual_network.residual_of(a))
            .fold(Capacity::INFINITY, Capacity::min);
        for &a in &arcs {
            self.residual_network.push(a, bottleneck);
        }
        self.value += bottleneck;

        nodes.reverse();
        Some(AugmentingPath { nodes, bottleneck })
    }
}

/// Flow on a single arc of the input graph
#[derive(Debug, Clone, PartialEq)]
pub struct ArcFlow<V> {
    pub from: V,
    pub to: V,
    pub capacity: Capacity,
    pub flow: Capacity,
}

/// Remaining capacity of an arc of the final residual network (reverse arcs included)
#[derive(Debug, Clone, PartialEq)]
pub struct ResidualArc<V> {
    pub from: V,
    pub to: V,
    pub residual: Capacity,
}

/// Result of a maximum flow computation
#[derive(Debug, Clone, PartialEq)]
pub struct MaxFlow<V: Vertex> {
    /// Value of the maximum flow
    pub value: Capacity,
    /// Vertices reachable from the source in the final residual network
    pub source_side: FxHashSet<V>,
    /// Arcs from the source side to the sink side; all of them are saturated
    pub cut_edges: Vec<ArcFlow<V>>,
    /// Flow on every arc of the input, in edge insertion order.
    /// Undirected edges contribute one entry per direction.
    pub flows: Vec<ArcFlow<V>>,
    /// Arcs of the final residual network with positive residual capacity
    pub residual: Vec<ResidualArc<V>>,
    /// Number of augmenting paths used
    pub augmentations: usize,
}

impl<V: Vertex> MaxFlow<V> {
    /// Sum of the capacities of all cut edges; equals [`MaxFlow::value`]
    pub fn cut_capacity(&self) -> Capacity {
        self.cut_edges.iter().map(|e| e.capacity).sum()
    }

    /// Flow on the arc `from -> to`, if the arc exists
    pub fn flow_on(&self, from: &V, to: &V) -> Option<Capacity> {
        self.flows
            .iter()
            .find(|f| &f.from == from && &f.to == to)
            .map(|f| f.flow)
    }

    pub fn is_on_source_side(&self, v: &V) -> bool {
        self.source_side.contains(v)
    }
}

/// Maximum flow between two vertices of a [`GraphStore`].
///
/// # Examples
/// ```
/// use wgraphs::{prelude::*, algo::*};
///
/// let mut g = GraphStore::directed();
/// g.add_capacity_edge("s", "a", 3.0).unwrap();
/// g.add_capacity_edge("a", "t", 2.0).unwrap();
/// g.add_capacity_edge("s", "t", 1.0).unwrap();
///
/// let flow = FlowNetwork::new(&g, &"s", &"t").unwrap().edmonds_karp().unwrap();
/// assert_eq!(flow.value, 3.0);
/// assert_eq!(flow.cut_capacity(), 3.0);
/// assert!(flow.is_on_source_side(&"a"));
/// ```
#[derive(Debug, Clone)]
pub struct FlowNetwork<'a, V> {
    graph: &'a GraphStore<V>,
    residual_network: ResidualNetwork,
    interrupt: Option<Interrupt>,
}

impl<'a, V: Vertex> FlowNetwork<'a, V> {
    /// Prepares a flow computation from `source` to `sink`.
    ///
    /// # Errors
    /// - [`GraphError::UnknownVertex`] if either vertex is not in the graph,
    /// - [`GraphError::SourceIsSink`] if both are the same vertex,
    /// - [`GraphError::NegativeCapacity`] if some arc has negative capacity.
    pub fn new(graph: &'a GraphStore<V>, source: &V, sink: &V) -> Result<Self> {
        let s = graph.node_of(source)?;
        let t = graph.node_of(sink)?;
        if s == t {
            return Err(GraphError::SourceIsSink(format!("{source:?}")));
        }

        Ok(Self {
            graph,
            residual_network: ResidualNetwork::from_graph(graph, s, t)?,
            interrupt: None,
        })
    }

    /// Polls `interrupt` once per augmentation
    pub fn set_interrupt(&mut self, interrupt: Interrupt) {
        self.interrupt = Some(interrupt);
    }

    /// Polls `interrupt` once per augmentation
    pub fn interrupt(mut self, interrupt: Interrupt) -> Self {
        self.set_interrupt(interrupt);
        self
    }

    /// Computes a maximum flow and a minimum cut
    pub fn edmonds_karp(self) -> Result<MaxFlow<V>> {
        let graph = self.graph;
        let label = |u: Node| graph.label_of(u).clone();

        let mut solver = EdmondsKarp::new(self.residual_network);
        let mut augmentations = 0;
        loop {
            interrupt::check(self.interrupt.as_ref())?;
            match solver.next() {
                Some(path) => {
                    augmentations += 1;
                    trace!(
                        length = path.nodes.len() - 1,
                        bottleneck = path.bottleneck,
                        "augment"
                    );
                }
                None => break,
            }
        }

        let reachable = solver.source_side();
        let network = solver.residual_network();
        let arcs = 0..network.number_of_arcs() as ArcId;

        let arc_flow = |a: ArcId| ArcFlow {
            from: label(network.tail_of(a)),
            to: label(network.head_of(a)),
            capacity: network.arcs[a as usize].capacity,
            flow: network.flow_of(a),
        };

        let flows: Vec<_> = arcs
            .clone()
            .filter(|&a| network.is_forward(a))
            .map(arc_flow)
            .collect();

        let cut_edges: Vec<_> = arcs
            .clone()
            .filter(|&a| {
                network.is_forward(a)
                    && reachable.get_bit(network.tail_of(a))
                    && !reachable.get_bit(network.head_of(a))
            })
            .map(arc_flow)
            .collect();

        let residual = arcs
            .filter(|&a| network.residual_of(a) > 0.0)
            .map(|a| ResidualArc {
                from: label(network.tail_of(a)),
                to: label(network.head_of(a)),
                residual: network.residual_of(a),
            })
            .collect();

        let source_side = graph
            .vertices_range()
            .filter(|&u| reachable.get_bit(u))
            .map(label)
            .collect();

        debug!(
            value = solver.value(),
            augmentations,
            cut_edges = cut_edges.len(),
            "edmonds-karp finished"
        );

        Ok(MaxFlow {
            value: solver.value(),
            source_side,
            cut_edges,
            flows,
            residual,
            augmentations,
        })
    }
}

/// Convenience method for maximum (s, t)-flows with default configuration
pub trait STFlow<V: Vertex> {
    /// Computes a maximum flow from `source` to `sink` with [`FlowNetwork::edmonds_karp`]
    fn max_flow(&self, source: &V, sink: &V) -> Result<MaxFlow<V>>;
}

impl<V: Vertex> STFlow<V> for GraphStore<V> {
    fn max_flow(&self, source: &V, sink: &V) -> Result<MaxFlow<V>> {
        FlowNetwork::new(self, source, sink)?.edmonds_karp()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg64Mcg;

    /// Classic example with maximum flow 23
    fn clrs() -> GraphStore<&'static str> {
        let mut g = GraphStore::directed();
        for (u, v, c) in [
            ("s", "v1", 16.0),
            ("s", "v2", 13.0),
            ("v2", "v1", 4.0),
            ("v1", "v3", 12.0),
            ("v3", "v2", 9.0),
            ("v2", "v4", 14.0),
            ("v4", "v3", 7.0),
            ("v3", "t", 20.0),
            ("v4", "t", 4.0),
        ] {
            g.add_capacity_edge(u, v, c).unwrap();
        }
        g
    }

    #[test]
    fn classic_network() {
        let g = clrs();
        let flow = g.max_flow(&"s", &"t").unwrap();

        assert_eq!(flow.value, 23.0);
        assert_eq!(flow.cut_capacity(), 23.0);
        assert!(flow.is_on_source_side(&"s"));
        assert!(!flow.is_on_source_side(&"t"));
        assert!(flow.cut_edges.iter().all(|e| e.flow == e.capacity));
        assert!(flow.augmentations >= 2);
        assert_eq!(flow.flows.len(), g.number_of_edges() as usize);
    }

    #[test]
    fn flow_is_feasible_and_conserved() {
        let g = clrs();
        let flow = g.max_flow(&"s", &"t").unwrap();

        for f in &flow.flows {
            assert!(f.flow >= 0.0 && f.flow <= f.capacity);
        }
        for v in g.vertices().filter(|v| **v != "s" && **v != "t") {
            let inflow: Capacity = flow.flows.iter().filter(|f| f.to == *v).map(|f| f.flow).sum();
            let outflow: Capacity = flow.flows.iter().filter(|f| f.from == *v).map(|f| f.flow).sum();
            assert_eq!(inflow, outflow);
        }
        let out_of_source: Capacity = flow
            .flows
            .iter()
            .filter(|f| f.from == "s")
            .map(|f| f.flow)
            .sum();
        assert_eq!(out_of_source, flow.value);
    }

    #[test]
    fn weights_serve_as_capacities() {
        let g = GraphStore::from_weighted_edges(
            Direction::Directed,
            [(0, 1, 2.0), (1, 2, 5.0), (0, 2, 1.5)],
        )
        .unwrap();
        let flow = g.max_flow(&0, &2).unwrap();
        assert_eq!(flow.value, 3.5);
        assert_eq!(flow.flow_on(&0, &1), Some(2.0));
        assert_eq!(flow.flow_on(&2, &0), None);

        let mut g = g;
        g.add_weighted_edge(2, 3, -1.0).unwrap();
        assert!(matches!(
            g.max_flow(&0, &3),
            Err(GraphError::NegativeCapacity { .. })
        ));
    }

    #[test]
    fn undirected_edges_carry_flow_both_ways() {
        let mut g = GraphStore::undirected();
        g.add_capacity_edge("a", "b", 3.0).unwrap();
        g.add_capacity_edge("b", "c", 2.0).unwrap();
        g.add_capacity_edge("a", "c", 1.0).unwrap();

        assert_eq!(g.max_flow(&"a", &"c").unwrap().value, 3.0);
        assert_eq!(g.max_flow(&"c", &"a").unwrap().value, 3.0);
        assert_eq!(g.max_flow(&"b", &"a").unwrap().value, 4.0);
    }

    #[test]
    fn unreachable_sink_and_invalid_requests() {
        let mut g = GraphStore::directed();
        g.add_capacity_edge(0, 1, 4.0).unwrap();
        g.add_capacity_edge(2, 1, 4.0).unwrap();

        let flow = g.max_flow(&0, &2).unwrap();
        assert_eq!(flow.value, 0.0);
        assert!(flow.cut_edges.is_empty());
        assert_eq!(flow.augmentations, 0);
        assert_eq!(flow.source_side.len(), 2);

        assert!(matches!(g.max_flow(&0, &0), Err(GraphError::SourceIsSink(_))));
        assert!(matches!(g.max_flow(&0, &9), Err(GraphError::UnknownVertex(_))));
    }

    #[test]
    fn residual_network_as_adjacency_list() {
        let mut g = GraphStore::directed();
        g.add_capacity_edge(0, 1, 1.0).unwrap();
        g.add_capacity_edge(1, 2, 1.0).unwrap();

        let mut network = ResidualNetwork::from_graph(&g, 0, 2).unwrap();
        assert_eq!(network.number_of_arcs(), 4);
        assert_eq!(network.neighbors_of(1).collect::<Vec<_>>(), vec![2]);

        network.push(0, 1.0);
        assert_eq!(network.degree_of(0), 0);
        assert_eq!(network.neighbors_of(1).collect::<Vec<_>>(), vec![0, 2]);
        assert_eq!(network.flow_of(0), 1.0);
        assert_eq!(network.flow_of(1), 0.0);
        assert_eq!(network.tail_of(0), 0);
        assert_eq!(network.tail_of(1), 1);
    }

    #[test]
    fn iterator_reports_augmenting_paths() {
        let g = clrs();
        let (s, t) = (g.node_of(&"s").unwrap(), g.node_of(&"t").unwrap());
        let mut ek = EdmondsKarp::new(ResidualNetwork::from_graph(&g, s, t).unwrap());

        let mut previous_length = 0;
        for path in ek.by_ref() {
            assert_eq!(path.nodes.first(), Some(&s));
            assert_eq!(path.nodes.last(), Some(&t));
            assert!(path.bottleneck > 0.0);
            // shortest augmenting paths never get shorter
            assert!(path.nodes.len() >= previous_length);
            previous_length = path.nodes.len();
        }
        assert_eq!(ek.value(), 23.0);
        assert!(!ek.source_side().get_bit(t));
        assert_eq!(ek.run_to_completion(None).unwrap(), 23.0);
    }

    #[test]
    fn max_flow_equals_min_cut_on_random_graphs() {
        let rng = &mut Pcg64Mcg::seed_from_u64(0xf10e);

        for round in 0..60 {
            let n: u32 = rng.random_range(2..20);
            let mut g = GraphStore::new(if round % 3 == 0 {
                Direction::Undirected
            } else {
                Direction::Directed
            });
            for u in 0..n {
                g.add_vertex(u);
            }
            for _ in 0..rng.random_range(0..(4 * n)) {
                let u = rng.random_range(0..n);
                let v = rng.random_range(0..n);
                if u != v && !g.contains_edge(&u, &v) {
                    g.add_capacity_edge(u, v, rng.random_range(0..8) as Capacity)
                        .unwrap();
                }
            }

            let flow = g.max_flow(&0, &(n - 1)).unwrap();
            assert_eq!(flow.value, flow.cut_capacity());
            assert!(flow.is_on_source_side(&0));
            assert!(!flow.is_on_source_side(&(n - 1)));
            for f in &flow.cut_edges {
                assert_eq!(f.flow, f.capacity);
            }
            // no residual arc leaves the source side
            for r in &flow.residual {
                assert!(!flow.is_on_source_side(&r.from) || flow.is_on_source_side(&r.to));
            }
        }
    }

    #[test]
    fn raised_interrupt_aborts() {
        let g = clrs();
        let interrupt = Interrupt::new();
        interrupt.raise();
        assert!(matches!(
            FlowNetwork::new(&g, &"s", &"t")
                .unwrap()
                .interrupt(interrupt)
                .edmonds_karp(),
            Err(GraphError::Interrupted)
        ));
    }
}
