/*!
# Bipartite Matching

Maximum matchings in bipartite graphs with the **Hopcroft-Karp** algorithm.

A *matching* is a set of edges without shared endpoints; a *maximum* matching is one of
largest possible size. Hopcroft-Karp works in phases: each phase computes BFS layers from all
free left vertices and then augments along a maximal set of vertex-disjoint shortest
augmenting paths, giving `O(|E| sqrt(|V|))` time overall.
*/

use super::*;
use fxhash::FxHashMap;
use std::collections::VecDeque;
use tracing::{debug, trace};

/// A matching between the two classes of a bipartite graph
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matching<V: Vertex> {
    pairs: Vec<(V, V)>,
    partner: FxHashMap<V, V>,
    phases: usize,
}

impl<V: Vertex> Matching<V> {
    /// Number of matched pairs
    pub fn size(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Matched pairs `(left, right)` in the order of the left class
    pub fn pairs(&self) -> &[(V, V)] {
        &self.pairs
    }

    /// The vertex matched to `v` (from either class)
    pub fn partner_of(&self, v: &V) -> Option<&V> {
        self.partner.get(v)
    }

    pub fn is_matched(&self, v: &V) -> bool {
        self.partner.contains_key(v)
    }

    /// Number of BFS phases that found augmenting paths
    pub fn phases(&self) -> usize {
        self.phases
    }
}

/// Distance label of left vertices not reached in the current phase
const UNREACHED: NumNodes = NumNodes::MAX;

/// Layered phase state over dense left indices `0..adj.len()` and right indices
/// `0..pair_right.len()`
struct LayeredMatcher<'a> {
    adj: &'a [Vec<Node>],
    pair_left: Vec<Node>,
    pair_right: Vec<Node>,
    dist: Vec<NumNodes>,
    cursor: Vec<usize>,
    free_layer: NumNodes,
}

impl<'a> LayeredMatcher<'a> {
    fn new(adj: &'a [Vec<Node>], num_right: usize) -> Self {
        Self {
            adj,
            pair_left: vec![INVALID_NODE; adj.len()],
            pair_right: vec![INVALID_NODE; num_right],
            dist: vec![UNREACHED; adj.len()],
            cursor: vec![0; adj.len()],
            free_layer: UNREACHED,
        }
    }

    /// Computes layers from all free left vertices. Returns *true* if a free right vertex was
    /// reached, in which case `free_layer` is the layer of the shortest augmenting paths.
    fn bfs_phase(&mut self) -> bool {
        let mut queue = VecDeque::new();
        for (l, &partner) in self.pair_left.iter().enumerate() {
            if partner == INVALID_NODE {
                self.dist[l] = 0;
                queue.push_back(l as Node);
            } else {
                self.dist[l] = UNREACHED;
            }
        }

        self.free_layer = UNREACHED;
        while let Some(l) = queue.pop_front() {
            let layer = self.dist[l as usize];
            if layer >= self.free_layer {
                continue;
            }
            for &r in &self.adj[l as usize] {
                match self.pair_right[r as usize] {
                    INVALID_NODE => {
                        if self.free_layer == UNREACHED {
                            self.free_layer = layer + 1;
                        }
                    }
                    w if self.dist[w as usize] == UNREACHED => {
                        self.dist[w as usize] = layer + 1;
                        queue.push_back(w);
                    }
                    _ => {}
                }
            }
        }

        self.free_layer != UNREACHED
    }

    /// Augments along vertex-disjoint shortest augmenting paths and returns their number
    fn dfs_phase(&mut self) -> usize {
        self.cursor.fill(0);
        let mut augmented = 0;
        for root in 0..self.adj.len() as Node {
            if self.pair_left[root as usize] == INVALID_NODE && self.augment_from(root) {
                augmented += 1;
            }
        }
        augmented
    }

    /// Iterative layered DFS from a free left vertex. Left vertices without a way to a free
    /// right vertex are excluded for the rest of the phase.
    fn augment_from(&mut self, root: Node) -> bool {
        let mut stack = vec![root];
        let mut via: Vec<Node> = Vec::new();

        while let Some(&l) = stack.last() {
            let li = l as usize;
            let Some(&r) = self.adj[li].get(self.cursor[li]) else {
                self.dist[li] = UNREACHED;
                stack.pop();
                via.pop();
                continue;
            };
            self.cursor[li] += 1;

            let next_layer = self.dist[li] + 1;
            match self.pair_right[r as usize] {
                INVALID_NODE if next_layer == self.free_layer => {
                    via.push(r);
                    for (&l, &r) in stack.iter().zip(via.iter()) {
                        self.pair_left[l as usize] = r;
                        self.pair_right[r as usize] = l;
                    }
                    return true;
                }
                INVALID_NODE => {}
                w if self.dist[w as usize] == next_layer => {
                    via.push(r);
                    stack.push(w);
                }
                _ => {}
            }
        }

        false
    }
}

/// Assigns dense indices to the vertices of one class and marks them in `listed`
fn index_class<V: Vertex>(
    graph: &GraphStore<V>,
    class: &[V],
    index: &mut [Node],
    listed: &mut NodeBitSet,
) -> Result<Vec<Node>> {
    let mut nodes = Vec::with_capacity(class.len());
    for v in class {
        let u = graph.node_of(v)?;
        if listed.set_bit(u) {
            return Err(GraphError::InvalidPartition(format!(
                "vertex {v:?} is listed more than once"
            )));
        }
        index[u as usize] = nodes.len() as Node;
        nodes.push(u);
    }
    Ok(nodes)
}

/// Hopcroft-Karp algorithm for maximum matchings in bipartite graphs with a given partition.
///
/// Edges are used regardless of their orientation. Edges with an endpoint outside both
/// classes are ignored.
///
/// # Examples
/// ```
/// use wgraphs::{prelude::*, algo::*};
///
/// let mut g = GraphStore::undirected();
/// for (u, v) in [("a", "x"), ("a", "y"), ("b", "x")] {
///     g.add_unit_edge(u, v).unwrap();
/// }
///
/// let matching = HopcroftKarp::new().run(&g, &["a", "b"], &["x", "y"]).unwrap();
/// assert_eq!(matching.size(), 2);
/// assert_eq!(matching.partner_of(&"b"), Some(&"x"));
/// assert_eq!(matching.partner_of(&"y"), Some(&"a"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct HopcroftKarp {
    interrupt: Option<Interrupt>,
}

impl HopcroftKarp {
    pub fn new() -> Self {
        Self::default()
    }

    /// Polls `interrupt` once per phase
    pub fn set_interrupt(&mut self, interrupt: Interrupt) {
        self.interrupt = Some(interrupt);
    }

    /// Polls `interrupt` once per phase
    pub fn interrupt(mut self, interrupt: Interrupt) -> Self {
        self.set_interrupt(interrupt);
        self
    }

    /// Computes a maximum matching between the classes `left` and `right`.
    ///
    /// # Errors
    /// - [`GraphError::UnknownVertex`] if a listed vertex is not in the graph,
    /// - [`GraphError::InvalidPartition`] if a vertex is listed twice,
    /// - [`GraphError::NotBipartite`] naming the first edge inside a class.
    pub fn run<V: Vertex>(
        &self,
        graph: &GraphStore<V>,
        left: &[V],
        right: &[V],
    ) -> Result<Matching<V>> {
        let mut listed = graph.vertex_bitset_unset();
        let mut left_index = vec![INVALID_NODE; graph.len()];
        let mut right_index = vec![INVALID_NODE; graph.len()];
        let left_nodes = index_class(graph, left, &mut left_index, &mut listed)?;
        let right_nodes = index_class(graph, right, &mut right_index, &mut listed)?;

        let mut adj: Vec<Vec<Node>> = vec![Vec::new(); left_nodes.len()];
        for record in graph.edge_records() {
            let Edge(u, v) = record.edge;
            let (lu, lv) = (left_index[u as usize], left_index[v as usize]);
            let (ru, rv) = (right_index[u as usize], right_index[v as usize]);

            if (lu != INVALID_NODE && lv != INVALID_NODE) || (ru != INVALID_NODE && rv != INVALID_NODE)
            {
                return Err(GraphError::not_bipartite(graph.label_of(u), graph.label_of(v)));
            }
            if lu != INVALID_NODE && rv != INVALID_NODE {
                adj[lu as usize].push(rv);
            } else if lv != INVALID_NODE && ru != INVALID_NODE {
                adj[lv as usize].push(ru);
            }
        }

        let mut matcher = LayeredMatcher::new(&adj, right_nodes.len());
        let mut phases = 0;
        loop {
            interrupt::check(self.interrupt.as_ref())?;
            if !matcher.bfs_phase() {
                break;
            }
            phases += 1;
            let augmented = matcher.dfs_phase();
            trace!(phase = phases, layer = matcher.free_layer, augmented, "phase");
        }

        let mut pairs = Vec::new();
        let mut partner = FxHashMap::default();
        for (l, &r) in matcher.pair_left.iter().enumerate() {
            if r == INVALID_NODE {
                continue;
            }
            let a = graph.label_of(left_nodes[l]).clone();
            let b = graph.label_of(right_nodes[r as usize]).clone();
            partner.insert(a.clone(), b.clone());
            partner.insert(b.clone(), a.clone());
            pairs.push((a, b));
        }

        debug!(
            left = left_nodes.len(),
            right = right_nodes.len(),
            size = pairs.len(),
            phases,
            "hopcroft-karp finished"
        );
        Ok(Matching {
            pairs,
            partner,
            phases,
        })
    }
}

/// Convenience methods for bipartite matchings with default configuration
pub trait BipartiteMatching<V: Vertex> {
    /// Maximum matching between the given classes, see [`HopcroftKarp::run`]
    fn hopcroft_karp(&self, left: &[V], right: &[V]) -> Result<Matching<V>>;

    /// Maximum matching of a bipartite graph whose classes are computed by
    /// [`BipartiteTest::bipartition`]
    ///
    /// # Errors
    /// [`GraphError::NotBipartite`] if the graph has an odd cycle.
    fn maximum_matching(&self) -> Result<Matching<V>>;
}

impl<V: Vertex> BipartiteMatching<V> for GraphStore<V> {
    fn hopcroft_karp(&self, left: &[V], right: &[V]) -> Result<Matching<V>> {
        HopcroftKarp::new().run(self, left, right)
    }

    fn maximum_matching(&self) -> Result<Matching<V>> {
        let classes = self.bipartition()?;
        HopcroftKarp::new().run(self, &classes.left, &classes.right)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use itertools::Itertools;
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg64Mcg;

    fn bipartite(edges: &[(u32, u32)]) -> GraphStore<u32> {
        let mut g = GraphStore::undirected();
        for &(u, v) in edges {
            g.add_unit_edge(u, v).unwrap();
        }
        g
    }

    /// Exhaustive search for the size of a maximum matching
    fn brute_force(graph: &GraphStore<u32>) -> usize {
        fn rec(edges: &[(Node, Node)], used: &mut Vec<bool>) -> usize {
            let Some((&(u, v), rest)) = edges.split_first() else {
                return 0;
            };
            let mut best = rec(rest, used);
            if !used[u as usize] && !used[v as usize] {
                used[u as usize] = true;
                used[v as usize] = true;
                best = best.max(1 + rec(rest, used));
                used[u as usize] = false;
                used[v as usize] = false;
            }
            best
        }

        let edges = graph.edge_records().iter().map(|r| (r.edge.0, r.edge.1)).collect_vec();
        rec(&edges, &mut vec![false; graph.len()])
    }

    #[test]
    fn perfect_matching_needs_augmentation() {
        // greedy would match 0-10 and get stuck
        let g = bipartite(&[(0, 10), (0, 11), (1, 10)]);
        let m = g.hopcroft_karp(&[0, 1], &[10, 11]).unwrap();

        assert_eq!(m.size(), 2);
        assert_eq!(m.pairs(), &[(0, 11), (1, 10)]);
        assert_eq!(m.partner_of(&10), Some(&1));
        assert!(m.is_matched(&11));
    }

    #[test]
    fn unbalanced_classes() {
        // star: one left vertex, many right vertices
        let g = bipartite(&[(0, 1), (0, 2), (0, 3)]);
        let m = g.hopcroft_karp(&[0], &[1, 2, 3]).unwrap();
        assert_eq!(m.size(), 1);
        assert_eq!(m.phases(), 1);

        let m = g.maximum_matching().unwrap();
        assert_eq!(m.size(), 1);
    }

    #[test]
    fn partition_errors() {
        let g = bipartite(&[(0, 1), (1, 2)]);

        assert!(matches!(
            g.hopcroft_karp(&[0, 2], &[1, 0]),
            Err(GraphError::InvalidPartition(_))
        ));
        assert!(matches!(
            g.hopcroft_karp(&[0, 1], &[2]),
            Err(GraphError::NotBipartite { .. })
        ));
        assert!(matches!(
            g.hopcroft_karp(&[0, 7], &[1]),
            Err(GraphError::UnknownVertex(_))
        ));

        // vertices outside both classes are ignored
        let m = g.hopcroft_karp(&[0], &[1]).unwrap();
        assert_eq!(m.size(), 1);
    }

    #[test]
    fn odd_cycle_has_no_maximum_bipartite_matching() {
        let g = bipartite(&[(0, 1), (1, 2), (2, 0)]);
        assert!(matches!(
            g.maximum_matching(),
            Err(GraphError::NotBipartite { .. })
        ));
    }

    #[test]
    fn empty_inputs() {
        let g = GraphStore::<u32>::undirected();
        let m = g.maximum_matching().unwrap();
        assert!(m.is_empty());
        assert_eq!(m.phases(), 0);

        let mut g = GraphStore::directed();
        g.add_vertex(0);
        g.add_vertex(1);
        assert!(g.hopcroft_karp(&[0], &[1]).unwrap().is_empty());
    }

    #[test]
    fn directed_edges_are_used_in_both_orientations() {
        let mut g = GraphStore::directed();
        g.add_unit_edge("x", "a").unwrap();
        g.add_unit_edge("b", "y").unwrap();
        let m = g.hopcroft_karp(&["a", "b"], &["x", "y"]).unwrap();
        assert_eq!(m.pairs(), &[("a", "x"), ("b", "y")]);
    }

    #[test]
    fn one_phase_augments_all_disjoint_paths() {
        let k = 8u32;
        let mut g = GraphStore::directed();
        for i in 0..k {
            g.add_unit_edge(i, 100 + i).unwrap();
        }
        let left = (0..k).collect_vec();
        let right = (100..100 + k).collect_vec();

        let m = g.hopcroft_karp(&left, &right).unwrap();
        assert_eq!(m.size(), k as usize);
        assert_eq!(m.phases(), 1);
    }

    #[test]
    fn phase_count_stays_within_square_root_bound() {
        let rng = &mut Pcg64Mcg::seed_from_u64(0x4a7d);

        for _ in 0..60 {
            let nl: u32 = rng.random_range(1..40);
            let nr: u32 = rng.random_range(1..40);
            let mut g = GraphStore::undirected();
            for u in 0..(nl + nr) {
                g.add_vertex(u);
            }
            for _ in 0..rng.random_range(0..(3 * (nl + nr))) {
                let u = rng.random_range(0..nl);
                let v = nl + rng.random_range(0..nr);
                if !g.contains_edge(&u, &v) {
                    g.add_unit_edge(u, v).unwrap();
                }
            }

            let left = (0..nl).collect_vec();
            let right = (nl..nl + nr).collect_vec();
            let m = g.hopcroft_karp(&left, &right).unwrap();
            let bound = 2 * ((nl + nr) as f64).sqrt().ceil() as usize + 2;
            assert!(m.phases() <= bound, "{} phases for {nl}+{nr} vertices", m.phases());
            assert!(m.phases() <= m.size());
        }
    }

    #[test]
    fn matches_brute_force_on_random_graphs() {
        let rng = &mut Pcg64Mcg::seed_from_u64(0x4a7c);

        for _ in 0..80 {
            let nl: u32 = rng.random_range(1..7);
            let nr: u32 = rng.random_range(1..7);
            let mut g = GraphStore::undirected();
            for u in 0..(nl + nr) {
                g.add_vertex(u);
            }
            for _ in 0..rng.random_range(0..12) {
                let u = rng.random_range(0..nl);
                let v = nl + rng.random_range(0..nr);
                if !g.contains_edge(&u, &v) {
                    g.add_unit_edge(u, v).unwrap();
                }
            }

            let left = (0..nl).collect_vec();
            let right = (nl..nl + nr).collect_vec();
            let m = g.hopcroft_karp(&left, &right).unwrap();
            assert_eq!(m.size(), brute_force(&g));

            // pairs are edges with distinct endpoints
            let mut seen = FxHashMap::default();
            for (a, b) in m.pairs() {
                assert!(g.contains_edge(a, b));
                assert!(seen.insert(*a, ()).is_none());
                assert!(seen.insert(*b, ()).is_none());
            }
        }
    }

    #[test]
    fn raised_interrupt_aborts() {
        let g = bipartite(&[(0, 1)]);
        let interrupt = Interrupt::new();
        interrupt.raise();
        assert!(matches!(
            HopcroftKarp::new().interrupt(interrupt).run(&g, &[0], &[1]),
            Err(GraphError::Interrupted)
        ));
    }
}
