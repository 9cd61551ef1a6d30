/*!
# Shortest Paths

- [`Dijkstra`]: single source, non-negative weights, binary heap with lazy deletion.
- [`BellmanFord`]: single source, arbitrary weights, detects negative cycles.
- [`FloydWarshall`]: all pairs, arbitrary weights, detects negative cycles.

Unreachable vertices have distance [`f64::INFINITY`]. In undirected graphs every edge can be
used in both directions, hence a single negative undirected edge already forms a negative cycle.
*/

use super::*;
use fxhash::FxHashMap;
use std::{
    cmp::{Ordering, Reverse},
    collections::BinaryHeap,
};
use tracing::{debug, trace};

/// Distances and shortest-path tree of a single-source computation
#[derive(Debug, Clone, PartialEq)]
pub struct ShortestPaths<V: Vertex> {
    source: V,
    distance: FxHashMap<V, Weight>,
    parent: FxHashMap<V, V>,
}

impl<V: Vertex> ShortestPaths<V> {
    fn from_dense(graph: &GraphStore<V>, source: Node, dist: &[Weight], parent: &[Node]) -> Self {
        let labels = graph.labels();
        Self {
            source: labels[source as usize].clone(),
            distance: labels.iter().cloned().zip(dist.iter().copied()).collect(),
            parent: parent
                .iter()
                .enumerate()
                .filter(|&(_, &p)| p != INVALID_NODE)
                .map(|(v, &p)| (labels[v].clone(), labels[p as usize].clone()))
                .collect(),
        }
    }

    pub fn source(&self) -> &V {
        &self.source
    }

    /// Distance from the source to `v`; `f64::INFINITY` if `v` is unreachable and `None` if `v`
    /// is not a vertex of the graph
    pub fn distance_to(&self, v: &V) -> Option<Weight> {
        self.distance.get(v).copied()
    }

    pub fn is_reachable(&self, v: &V) -> bool {
        self.distance_to(v).is_some_and(|d| d < Weight::INFINITY)
    }

    /// Predecessor of `v` on a shortest path from the source
    pub fn parent_of(&self, v: &V) -> Option<&V> {
        self.parent.get(v)
    }

    /// All distances, including unreachable vertices with `f64::INFINITY`
    pub fn distances(&self) -> &FxHashMap<V, Weight> {
        &self.distance
    }

    /// Returns a shortest path from the source to `target` (both included), if one exists
    ///
    /// # Examples
    /// ```
    /// use wgraphs::{prelude::*, algo::*};
    ///
    /// let g = GraphStore::from_weighted_edges(
    ///     Direction::Directed,
    ///     [("s", "a", 1.0), ("a", "t", 1.0), ("s", "t", 5.0)],
    /// )
    /// .unwrap();
    ///
    /// let paths = g.dijkstra(&"s").unwrap();
    /// assert_eq!(paths.path_to(&"t"), Some(vec!["s", "a", "t"]));
    /// assert_eq!(paths.path_to(&"s"), Some(vec!["s"]));
    /// ```
    pub fn path_to(&self, target: &V) -> Option<Vec<V>> {
        if !self.is_reachable(target) {
            return None;
        }

        let mut path = vec![target.clone()];
        let mut current = target;
        while let Some(p) = self.parent.get(current) {
            path.push(p.clone());
            current = p;
        }
        path.reverse();
        Some(path)
    }
}

/// Heap entry ordered by distance, then by node
#[derive(Debug, Clone, Copy)]
struct QueueEntry {
    distance: Weight,
    node: Node,
}

impl PartialEq for QueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for QueueEntry {}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.distance
            .total_cmp(&other.distance)
            .then(self.node.cmp(&other.node))
    }
}

/// Dijkstra's algorithm for graphs without negative weights.
///
/// All edge weights are checked before the search starts, so a negative weight is reported
/// even if it is unreachable from the source.
#[derive(Debug, Clone, Default)]
pub struct Dijkstra {
    interrupt: Option<Interrupt>,
}

impl Dijkstra {
    pub fn new() -> Self {
        Self::default()
    }

    /// Polls `interrupt` once per extracted queue entry
    pub fn set_interrupt(&mut self, interrupt: Interrupt) {
        self.interrupt = Some(interrupt);
    }

    /// Polls `interrupt` once per extracted queue entry
    pub fn interrupt(mut self, interrupt: Interrupt) -> Self {
        self.set_interrupt(interrupt);
        self
    }

    /// Computes shortest paths from `source`.
    ///
    /// # Errors
    /// - [`GraphError::UnknownVertex`] if `source` is not in the graph,
    /// - [`GraphError::NegativeWeightNotAllowed`] naming the first edge with negative weight.
    pub fn run<V: Vertex>(&self, graph: &GraphStore<V>, source: &V) -> Result<ShortestPaths<V>> {
        let s = graph.node_of(source)?;
        if let Some(record) = graph.edge_records().iter().find(|r| r.weight < 0.0) {
            let Edge(u, v) = record.edge;
            return Err(GraphError::NegativeWeightNotAllowed {
                from: graph.describe(u),
                to: graph.describe(v),
                weight: record.weight,
            });
        }

        let mut dist = vec![Weight::INFINITY; graph.len()];
        let mut parent = vec![INVALID_NODE; graph.len()];
        let mut heap = BinaryHeap::new();

        dist[s as usize] = 0.0;
        heap.push(Reverse(QueueEntry {
            distance: 0.0,
            node: s,
        }));

        let mut settled = 0usize;
        while let Some(Reverse(QueueEntry { distance, node: u })) = heap.pop() {
            interrupt::check(self.interrupt.as_ref())?;
            if distance > dist[u as usize] {
                continue; // stale
            }
            settled += 1;

            for (v, w) in graph.weighted_neighbors_of(u) {
                let candidate = distance + w;
                if candidate < dist[v as usize] {
                    dist[v as usize] = candidate;
                    parent[v as usize] = u;
                    heap.push(Reverse(QueueEntry {
                        distance: candidate,
                        node: v,
                    }));
                }
            }
        }

        debug!(source = ?source, settled, "dijkstra finished");
        Ok(ShortestPaths::from_dense(graph, s, &dist, &parent))
    }
}

/// Bellman-Ford algorithm for graphs with arbitrary weights.
///
/// Relaxes every arc in exactly `|V| - 1` rounds, then performs one more pass; any further
/// improvement proves a negative cycle reachable from the source.
#[derive(Debug, Clone, Default)]
pub struct BellmanFord {
    interrupt: Option<Interrupt>,
}

impl BellmanFord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Polls `interrupt` once per relaxation round
    pub fn set_interrupt(&mut self, interrupt: Interrupt) {
        self.interrupt = Some(interrupt);
    }

    /// Polls `interrupt` once per relaxation round
    pub fn interrupt(mut self, interrupt: Interrupt) -> Self {
        self.set_interrupt(interrupt);
        self
    }

    /// Computes shortest paths from `source`.
    ///
    /// # Errors
    /// - [`GraphError::UnknownVertex`] if `source` is not in the graph,
    /// - [`GraphError::NegativeCycleDetected`] if a negative cycle is reachable from `source`.
    pub fn run<V: Vertex>(&self, graph: &GraphStore<V>, source: &V) -> Result<ShortestPaths<V>> {
        let s = graph.node_of(source)?;
        let arcs: Vec<(Node, Node, Weight)> = graph.arcs().collect();

        let mut dist = vec![Weight::INFINITY; graph.len()];
        let mut parent = vec![INVALID_NODE; graph.len()];
        dist[s as usize] = 0.0;

        let rounds = graph.len().saturating_sub(1);
        for round in 1..=rounds {
            interrupt::check(self.interrupt.as_ref())?;

            let mut relaxed = 0usize;
            for &(u, v, w) in &arcs {
                let du = dist[u as usize];
                if du < Weight::INFINITY && du + w < dist[v as usize] {
                    dist[v as usize] = du + w;
                    parent[v as usize] = u;
                    relaxed += 1;
                }
            }
            trace!(round, relaxed, "relaxation round");
        }

        if let Some(&(u, v, _)) = arcs.iter().find(|&&(u, v, w)| {
            let du = dist[u as usize];
            du < Weight::INFINITY && du + w < dist[v as usize]
        }) {
            debug!(from = ?graph.label_of(u), to = ?graph.label_of(v), "negative cycle");
            return Err(GraphError::NegativeCycleDetected(format!(
                "edge {} -> {} can still be relaxed",
                graph.describe(u),
                graph.describe(v)
            )));
        }

        debug!(source = ?source, rounds, "bellman-ford finished");
        Ok(ShortestPaths::from_dense(graph, s, &dist, &parent))
    }
}

/// All-pairs distances computed by [`FloydWarshall`]
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix<V: Vertex> {
    labels: Vec<V>,
    index: FxHashMap<V, Node>,
    dist: Vec<Weight>,
    next: Vec<Node>,
}

impl<V: Vertex> DistanceMatrix<V> {
    fn entry(&self, u: &V, v: &V) -> Option<usize> {
        let n = self.labels.len();
        let i = *self.index.get(u)? as usize;
        let j = *self.index.get(v)? as usize;
        Some(i * n + j)
    }

    /// Vertices of the matrix in registration order
    pub fn vertices(&self) -> &[V] {
        &self.labels
    }

    /// Distance from `u` to `v`; `f64::INFINITY` if there is no path and `None` if either
    /// vertex is not in the graph
    pub fn distance(&self, u: &V, v: &V) -> Option<Weight> {
        self.entry(u, v).map(|e| self.dist[e])
    }

    /// All distances from `u`
    pub fn row(&self, u: &V) -> Option<FxHashMap<V, Weight>> {
        let n = self.labels.len();
        let i = *self.index.get(u)? as usize;
        Some(
            self.labels
                .iter()
                .cloned()
                .zip(self.dist[i * n..(i + 1) * n].iter().copied())
                .collect(),
        )
    }

    /// Returns a shortest path from `u` to `v` (both included), if one exists
    ///
    /// # Examples
    /// ```
    /// use wgraphs::{prelude::*, algo::*};
    ///
    /// let g = GraphStore::from_weighted_edges(
    ///     Direction::Directed,
    ///     [(1, 2, 4.0), (2, 3, -2.0), (1, 3, 3.0)],
    /// )
    /// .unwrap();
    ///
    /// let all = g.floyd_warshall().unwrap();
    /// assert_eq!(all.distance(&1, &3), Some(2.0));
    /// assert_eq!(all.path(&1, &3), Some(vec![1, 2, 3]));
    /// assert_eq!(all.path(&3, &1), None);
    /// ```
    pub fn path(&self, u: &V, v: &V) -> Option<Vec<V>> {
        let n = self.labels.len();
        let mut i = *self.index.get(u)? as usize;
        let j = *self.index.get(v)? as usize;
        if self.next[i * n + j] == INVALID_NODE {
            return None;
        }

        let mut path = vec![self.labels[i].clone()];
        while i != j {
            i = self.next[i * n + j] as usize;
            path.push(self.labels[i].clone());
        }
        Some(path)
    }
}

/// Floyd-Warshall algorithm computing distances between all pairs of vertices
/// in `O(|V|^3)` time and `O(|V|^2)` space.
#[derive(Debug, Clone, Default)]
pub struct FloydWarshall {
    interrupt: Option<Interrupt>,
}

impl FloydWarshall {
    pub fn new() -> Self {
        Self::default()
    }

    /// Polls `interrupt` once per intermediate vertex
    pub fn set_interrupt(&mut self, interrupt: Interrupt) {
        self.interrupt = Some(interrupt);
    }

    /// Polls `interrupt` once per intermediate vertex
    pub fn interrupt(mut self, interrupt: Interrupt) -> Self {
        self.set_interrupt(interrupt);
        self
    }

    /// Computes all pairwise distances.
    ///
    /// # Errors
    /// [`GraphError::NegativeCycleDetected`] if some vertex reaches itself at negative cost.
    pub fn run<V: Vertex>(&self, graph: &GraphStore<V>) -> Result<DistanceMatrix<V>> {
        let n = graph.len();
        let mut dist = vec![Weight::INFINITY; n * n];
        let mut next = vec![INVALID_NODE; n * n];

        for i in graph.vertices_range() {
            let ii = i as usize * n + i as usize;
            dist[ii] = 0.0;
            next[ii] = i;
        }
        for (u, v, w) in graph.arcs() {
            let uv = u as usize * n + v as usize;
            if w < dist[uv] {
                dist[uv] = w;
                next[uv] = v;
            }
        }

        for k in 0..n {
            interrupt::check(self.interrupt.as_ref())?;
            for i in 0..n {
                let dik = dist[i * n + k];
                if dik == Weight::INFINITY {
                    continue;
                }
                for j in 0..n {
                    let dkj = dist[k * n + j];
                    if dkj == Weight::INFINITY {
                        continue;
                    }
                    if dik + dkj < dist[i * n + j] {
                        dist[i * n + j] = dik + dkj;
                        next[i * n + j] = next[i * n + k];
                    }
                }
            }
        }

        if let Some(i) = graph
            .vertices_range()
            .find(|&i| dist[i as usize * n + i as usize] < 0.0)
        {
            debug!(vertex = ?graph.label_of(i), "negative cycle");
            return Err(GraphError::NegativeCycleDetected(format!(
                "vertex {} reaches itself at negative cost",
                graph.describe(i)
            )));
        }

        debug!(nodes = n, "floyd-warshall finished");
        Ok(DistanceMatrix {
            labels: graph.labels().to_vec(),
            index: graph
                .vertices_range()
                .map(|u| (graph.label_of(u).clone(), u))
                .collect(),
            dist,
            next,
        })
    }
}

/// Convenience methods for the shortest path algorithms with default configuration
pub trait ShortestPath<V: Vertex> {
    /// See [`Dijkstra`]
    fn dijkstra(&self, source: &V) -> Result<ShortestPaths<V>>;

    /// See [`BellmanFord`]
    fn bellman_ford(&self, source: &V) -> Result<ShortestPaths<V>>;

    /// See [`FloydWarshall`]
    fn floyd_warshall(&self) -> Result<DistanceMatrix<V>>;
}

impl<V: Vertex> ShortestPath<V> for GraphStore<V> {
    fn dijkstra(&self, source: &V) -> Result<ShortestPaths<V>> {
        Dijkstra::new().run(self, source)
    }

    fn bellman_ford(&self, source: &V) -> Result<ShortestPaths<V>> {
        BellmanFord::new().run(self, source)
    }

    fn floyd_warshall(&self) -> Result<DistanceMatrix<V>> {
        FloydWarshall::new().run(self)
    }
}
