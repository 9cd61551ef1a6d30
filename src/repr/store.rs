use fxhash::{FxHashMap, FxHashSet};
use smallvec::SmallVec;

use super::*;

/// One entry of a neighborhood: the node at the other end and the edge connecting it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Incidence {
    pub(crate) head: Node,
    pub(crate) edge: EdgeId,
}

/// Neighborhood that stores the first few incidences inline
type Neighborhood = SmallVec<[Incidence; 4]>;

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct EdgeRecord {
    pub(crate) edge: Edge,
    pub(crate) weight: Weight,
    pub(crate) capacity: Option<Capacity>,
}

impl EdgeRecord {
    /// Explicit capacity, falling back to the weight
    pub(crate) fn effective_capacity(&self) -> Capacity {
        self.capacity.unwrap_or(self.weight)
    }
}

/// A simple weighted graph over caller-supplied vertex identifiers.
///
/// The graph grows monotonically: vertices and edges can be added but not removed.
/// Algorithms only ever borrow the store immutably.
///
/// # Examples
/// ```
/// use wgraphs::prelude::*;
///
/// let mut g = GraphStore::directed();
/// g.add_weighted_edge("a", "b", 2.0).unwrap();
/// g.add_edge("b", "c", 1.0, Some(5.0)).unwrap();
///
/// assert_eq!(g.number_of_nodes(), 3);
/// assert_eq!(g.number_of_edges(), 2);
/// assert!(g.add_unit_edge("a", "b").is_err());
///
/// let nbs: Vec<_> = g.neighbors(&"b").unwrap().collect();
/// assert_eq!(nbs, vec![(&"c", 1.0, Some(5.0))]);
/// ```
#[derive(Debug, Clone)]
pub struct GraphStore<V> {
    direction: Direction,
    labels: Vec<V>,
    ids: FxHashMap<V, Node>,
    out_nbs: Vec<Neighborhood>,
    in_nbs: Vec<Neighborhood>,
    edges: Vec<EdgeRecord>,
    edge_ids: FxHashMap<Edge, EdgeId>,
}

impl<V: Vertex> GraphStore<V> {
    /// Creates an empty graph with the given orientation
    pub fn new(direction: Direction) -> Self {
        Self {
            direction,
            labels: Vec::new(),
            ids: FxHashMap::default(),
            out_nbs: Vec::new(),
            in_nbs: Vec::new(),
            edges: Vec::new(),
            edge_ids: FxHashMap::default(),
        }
    }

    /// Creates an empty directed graph
    pub fn directed() -> Self {
        Self::new(Direction::Directed)
    }

    /// Creates an empty undirected graph
    pub fn undirected() -> Self {
        Self::new(Direction::Undirected)
    }

    /// Creates a graph from `(u, v, weight)` triples.
    /// Fails on the first edge that cannot be added.
    pub fn from_weighted_edges<I>(direction: Direction, edges: I) -> Result<Self>
    where
        I: IntoIterator<Item = (V, V, Weight)>,
    {
        let mut graph = Self::new(direction);
        for (u, v, w) in edges {
            graph.add_weighted_edge(u, v, w)?;
        }
        Ok(graph)
    }

    /// Registers a vertex and returns its node. Registering a known vertex is a no-op.
    pub fn add_vertex(&mut self, id: V) -> Node {
        if let Some(&u) = self.ids.get(&id) {
            return u;
        }

        let u = self.labels.len() as Node;
        self.ids.insert(id.clone(), u);
        self.labels.push(id);
        self.out_nbs.push(Neighborhood::new());
        if self.direction == Direction::Directed {
            self.in_nbs.push(Neighborhood::new());
        }
        u
    }

    /// Adds the edge `(u, v)` and returns its id. Unknown endpoints are registered.
    ///
    /// # Errors
    /// - [`GraphError::SelfLoop`] if `u == v`,
    /// - [`GraphError::NegativeCapacity`] if `capacity < 0`,
    /// - [`GraphError::DuplicateEdge`] if the edge (or its reverse in undirected graphs) exists.
    ///
    /// The graph is left unchanged on error.
    pub fn add_edge(
        &mut self,
        u: V,
        v: V,
        weight: Weight,
        capacity: Option<Capacity>,
    ) -> Result<EdgeId> {
        if u == v {
            return Err(GraphError::SelfLoop(format!("{u:?}")));
        }
        if let Some(c) = capacity.filter(|&c| c < 0.0) {
            return Err(GraphError::NegativeCapacity {
                from: format!("{u:?}"),
                to: format!("{v:?}"),
                capacity: c,
            });
        }
        if let (Some(&nu), Some(&nv)) = (self.ids.get(&u), self.ids.get(&v))
            && self.edge_ids.contains_key(&self.key(Edge(nu, nv)))
        {
            return Err(GraphError::duplicate_edge(&u, &v));
        }

        let nu = self.add_vertex(u);
        let nv = self.add_vertex(v);
        let id = self.edges.len() as EdgeId;
        let edge = Edge(nu, nv);

        self.edges.push(EdgeRecord {
            edge,
            weight,
            capacity,
        });
        self.edge_ids.insert(self.key(edge), id);

        self.out_nbs[nu as usize].push(Incidence { head: nv, edge: id });
        match self.direction {
            Direction::Directed => self.in_nbs[nv as usize].push(Incidence { head: nu, edge: id }),
            Direction::Undirected => {
                self.out_nbs[nv as usize].push(Incidence { head: nu, edge: id })
            }
        }

        Ok(id)
    }

    /// Adds an edge of weight `1` without capacity
    pub fn add_unit_edge(&mut self, u: V, v: V) -> Result<EdgeId> {
        self.add_edge(u, v, 1.0, None)
    }

    /// Adds an edge with the given weight and without capacity
    pub fn add_weighted_edge(&mut self, u: V, v: V, weight: Weight) -> Result<EdgeId> {
        self.add_edge(u, v, weight, None)
    }

    /// Adds an edge of weight `1` with the given capacity
    pub fn add_capacity_edge(&mut self, u: V, v: V, capacity: Capacity) -> Result<EdgeId> {
        self.add_edge(u, v, 1.0, Some(capacity))
    }

    /// Returns *true* if the vertex is registered
    pub fn contains_vertex(&self, id: &V) -> bool {
        self.ids.contains_key(id)
    }

    /// Returns *true* if the edge `(u, v)` exists (in either orientation for undirected graphs)
    pub fn contains_edge(&self, u: &V, v: &V) -> bool {
        self.edge(u, v).is_some()
    }

    /// Returns the edge `(u, v)` if it exists.
    /// For undirected graphs, the edge is returned with endpoints in the requested order.
    pub fn edge(&self, u: &V, v: &V) -> Option<WeightedEdge<&V>> {
        let nu = *self.ids.get(u)?;
        let nv = *self.ids.get(v)?;
        let id = *self.edge_ids.get(&self.key(Edge(nu, nv)))?;
        let record = &self.edges[id as usize];

        Some(WeightedEdge {
            source: &self.labels[nu as usize],
            target: &self.labels[nv as usize],
            weight: record.weight,
            capacity: record.capacity,
        })
    }

    /// Returns the neighbors of `v` with the weight and capacity of the connecting edge,
    /// in insertion order. For directed graphs, only out-neighbors are reported.
    pub fn neighbors(
        &self,
        v: &V,
    ) -> Result<impl Iterator<Item = (&V, Weight, Option<Capacity>)> + use<'_, V>> {
        let u = self.node_of(v)?;
        Ok(self.out_nbs[u as usize].iter().map(move |inc| {
            let record = &self.edges[inc.edge as usize];
            (&self.labels[inc.head as usize], record.weight, record.capacity)
        }))
    }

    /// Returns all vertices in registration order
    pub fn vertices(&self) -> impl ExactSizeIterator<Item = &V> + '_ {
        self.labels.iter()
    }

    /// Returns the set of all vertices
    pub fn vertex_set(&self) -> FxHashSet<&V> {
        self.labels.iter().collect()
    }

    /// Returns all edges in insertion order
    pub fn edges(&self) -> impl ExactSizeIterator<Item = WeightedEdge<&V>> + '_ {
        self.edges.iter().map(move |record| WeightedEdge {
            source: &self.labels[record.edge.0 as usize],
            target: &self.labels[record.edge.1 as usize],
            weight: record.weight,
            capacity: record.capacity,
        })
    }

    /// Returns the node of a registered vertex
    pub fn node_of(&self, id: &V) -> Result<Node> {
        self.ids
            .get(id)
            .copied()
            .ok_or_else(|| GraphError::unknown_vertex(id))
    }

    /// Returns the vertex identifier of a node.
    /// ** Panics if `u >= n` **
    pub fn label_of(&self, u: Node) -> &V {
        &self.labels[u as usize]
    }

    /// Returns all vertex identifiers indexed by node
    pub fn labels(&self) -> &[V] {
        &self.labels
    }

    /// Returns the node whose vertex identifier is the smallest one, if any
    pub fn min_node(&self) -> Option<Node> {
        self.vertices_range().min_by(|&a, &b| self.label_of(a).cmp(self.label_of(b)))
    }

    /// Returns a view of the graph that ignores edge orientation
    pub fn underlying_undirected(&self) -> UnderlyingUndirected<'_, V> {
        UnderlyingUndirected::new(self)
    }

    /// Renders the label of a node for error messages
    pub(crate) fn describe(&self, u: Node) -> String {
        format!("{:?}", self.label_of(u))
    }

    /// Neighborhood of `u` with edge ids
    pub(crate) fn incidences_of(&self, u: Node) -> &[Incidence] {
        &self.out_nbs[u as usize]
    }

    /// All edges in insertion order, as dense records
    pub(crate) fn edge_records(&self) -> &[EdgeRecord] {
        &self.edges
    }

    /// Returns every arc `(u, v, weight)`: one per directed edge, two per undirected edge.
    /// Arcs appear in edge insertion order.
    pub(crate) fn arcs(&self) -> impl Iterator<Item = (Node, Node, Weight)> + '_ {
        let both = self.is_undirected();
        self.edges.iter().flat_map(move |record| {
            let Edge(u, v) = record.edge;
            std::iter::once((u, v, record.weight))
                .chain(both.then_some((v, u, record.weight)))
        })
    }

    fn key(&self, edge: Edge) -> Edge {
        match self.direction {
            Direction::Directed => edge,
            Direction::Undirected => edge.normalized(),
        }
    }
}

impl<V> GraphType for GraphStore<V> {
    fn direction(&self) -> Direction {
        self.direction
    }
}

impl<V> GraphNodeOrder for GraphStore<V> {
    fn number_of_nodes(&self) -> NumNodes {
        self.out_nbs.len() as NumNodes
    }
}

impl<V> GraphEdgeOrder for GraphStore<V> {
    fn number_of_edges(&self) -> NumEdges {
        self.edges.len() as NumEdges
    }
}

impl<V> AdjacencyList for GraphStore<V> {
    fn neighbors_of(&self, u: Node) -> impl Iterator<Item = Node> + '_ {
        self.out_nbs[u as usize].iter().map(|inc| inc.head)
    }

    fn degree_of(&self, u: Node) -> NumNodes {
        self.out_nbs[u as usize].len() as NumNodes
    }
}

impl<V> WeightedAdjacencyList for GraphStore<V> {
    fn weighted_neighbors_of(&self, u: Node) -> impl Iterator<Item = (Node, Weight)> + '_ {
        self.out_nbs[u as usize]
            .iter()
            .map(move |inc| (inc.head, self.edges[inc.edge as usize].weight))
    }
}

impl<V> DirectedAdjacencyList for GraphStore<V> {
    fn in_neighbors_of(&self, u: Node) -> impl Iterator<Item = Node> + '_ {
        let nbs = match self.direction {
            Direction::Directed => &self.in_nbs[u as usize],
            Direction::Undirected => &self.out_nbs[u as usize],
        };
        nbs.iter().map(|inc| inc.head)
    }

    fn in_degree_of(&self, u: Node) -> NumNodes {
        match self.direction {
            Direction::Directed => self.in_nbs[u as usize].len() as NumNodes,
            Direction::Undirected => self.out_nbs[u as usize].len() as NumNodes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use itertools::Itertools;

    #[test]
    fn add_edge_registers_endpoints() {
        let mut g = GraphStore::directed();
        g.add_vertex("x");
        g.add_weighted_edge("a", "b", 3.0).unwrap();

        assert_eq!(g.number_of_nodes(), 3);
        assert_eq!(g.vertices().copied().collect_vec(), vec!["x", "a", "b"]);
        assert_eq!(g.node_of(&"b").unwrap(), 2);
        assert_eq!(*g.label_of(1), "a");
        assert_eq!(g.add_vertex("a"), 1);
        assert_eq!(g.number_of_nodes(), 3);
    }

    #[test]
    fn duplicate_edges() {
        let mut directed = GraphStore::directed();
        directed.add_unit_edge(1, 2).unwrap();
        assert!(directed.add_unit_edge(2, 1).is_ok());
        assert!(matches!(
            directed.add_unit_edge(1, 2),
            Err(GraphError::DuplicateEdge { .. })
        ));

        let mut undirected = GraphStore::undirected();
        undirected.add_unit_edge(1, 2).unwrap();
        assert!(matches!(
            undirected.add_unit_edge(2, 1),
            Err(GraphError::DuplicateEdge { .. })
        ));
        assert_eq!(undirected.number_of_edges(), 1);
    }

    #[test]
    fn rejected_edges_leave_graph_unchanged() {
        let mut g = GraphStore::undirected();
        assert!(matches!(
            g.add_unit_edge("a", "a"),
            Err(GraphError::SelfLoop(_))
        ));
        assert!(matches!(
            g.add_edge("a", "b", 1.0, Some(-1.0)),
            Err(GraphError::NegativeCapacity { .. })
        ));
        assert!(g.is_empty());
        assert!(g.is_singleton());
    }

    #[test]
    fn undirected_edges_are_symmetric() {
        let mut g = GraphStore::undirected();
        g.add_edge("a", "b", 2.0, Some(4.0)).unwrap();
        g.add_weighted_edge("b", "c", 1.0).unwrap();

        assert_eq!(
            g.neighbors(&"b").unwrap().collect_vec(),
            vec![(&"a", 2.0, Some(4.0)), (&"c", 1.0, None)]
        );
        assert_eq!(g.neighbors(&"a").unwrap().count(), 1);

        let e = g.edge(&"b", &"a").unwrap();
        assert_eq!((*e.source, *e.target, e.weight), ("b", "a", 2.0));
        assert!(g.contains_edge(&"c", &"b"));

        assert_eq!(g.arcs().count(), 4);
        assert_eq!(g.ordered_edges(true), vec![Edge(0, 1), Edge(1, 2)]);
    }

    #[test]
    fn directed_neighborhoods() {
        let mut g = GraphStore::directed();
        g.add_unit_edge(0, 1).unwrap();
        g.add_unit_edge(2, 1).unwrap();

        assert_eq!(g.neighbors(&1).unwrap().count(), 0);
        assert_eq!(g.in_neighbors_of(1).collect_vec(), vec![0, 2]);
        assert_eq!(g.in_degree_of(1), 2);
        assert_eq!(g.degree_of(0), 1);
        assert!(!g.contains_edge(&1, &0));
        assert!(matches!(
            g.neighbors(&7).map(|_| ()),
            Err(GraphError::UnknownVertex(_))
        ));
    }

    #[test]
    fn edges_in_insertion_order() {
        let g = GraphStore::from_weighted_edges(
            Direction::Undirected,
            [("c", "d", 4.0), ("a", "b", 1.0), ("b", "c", 2.0)],
        )
        .unwrap();

        let edges = g
            .edges()
            .map(|e| (*e.source, *e.target, e.weight))
            .collect_vec();
        assert_eq!(edges, vec![("c", "d", 4.0), ("a", "b", 1.0), ("b", "c", 2.0)]);
        assert_eq!(g.min_node().map(|u| *g.label_of(u)), Some("a"));
        assert_eq!(g.vertex_set().len(), 4);
    }

    #[test]
    fn capacity_falls_back_to_weight() {
        let mut g = GraphStore::directed();
        g.add_edge("a", "b", 2.5, Some(7.0)).unwrap();
        g.add_weighted_edge("b", "c", 4.0).unwrap();

        let capacities = g
            .edge_records()
            .iter()
            .map(EdgeRecord::effective_capacity)
            .collect_vec();
        assert_eq!(capacities, vec![7.0, 4.0]);
    }
}
