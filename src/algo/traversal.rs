/*!
Graph traversal algorithms and traversal-derived utilities.

This module provides:
- Generic traversal iterators over dense nodes (BFS, DFS, with and without predecessor tracking)
  that work on every [`AdjacencyList`], including the residual network of the flow algorithms.
- [`TraversalTree`] to turn traversals into parent and depth arrays.
- Topological ordering for directed acyclic graphs.
- [`Search`], which runs traversals on a [`GraphStore`] and reports results in terms of vertex
  identifiers, together with connectivity and cycle checks.

DFS visits nodes in the order of a recursive preorder search: neighbors are explored in the
order reported by the graph. BFS marks nodes when they are discovered, DFS when they are
expanded.
*/

use super::*;
use fxhash::{FxHashMap, FxHashSet};
use smallvec::SmallVec;
use std::{collections::VecDeque, marker::PhantomData};
use tracing::debug;

/// Common interface for querying visited-states during a traversal.
pub trait TraversalState {
    /// Returns a reference to the set of visited nodes.
    fn visited(&self) -> &NodeBitSet;

    /// Checks if a given node `u` has already been visited.
    fn did_visit_node(&self, u: Node) -> bool {
        self.visited().get_bit(u)
    }
}

/// Abstraction for items yielded by a traversal iterator.
///
/// A `SequencedItem` encodes both the **node currently visited**
/// and an **optional predecessor** that represents its parent
/// in the traversal tree.
pub trait SequencedItem: Clone + Copy {
    /// Constructs a new item with a predecessor.
    fn new_with_predecessor(predecessor: Node, item: Node) -> Self;

    /// Constructs a new item without predecessor information.
    fn new_without_predecessor(item: Node) -> Self;

    /// Returns the node represented by this item.
    fn item(&self) -> Node;

    /// Returns the predecessor of this node, if any.
    fn predecessor(&self) -> Option<Node>;

    /// Returns a pair `(predecessor, item)`.
    fn predecessor_with_item(&self) -> (Option<Node>, Node) {
        (self.predecessor(), self.item())
    }
}

impl SequencedItem for Node {
    fn new_with_predecessor(_: Node, item: Node) -> Self {
        item
    }
    fn new_without_predecessor(item: Node) -> Self {
        item
    }
    fn item(&self) -> Node {
        *self
    }
    fn predecessor(&self) -> Option<Node> {
        None
    }
}

/// Compact representation of `(predecessor, node)` used for
/// traversals with parent tracking.
///
/// The absence of a predecessor is encoded by setting both entries
/// to the same node; graphs in this crate have no self-loops.
pub type PredecessorOfNode = (Node, Node);
impl SequencedItem for PredecessorOfNode {
    fn new_with_predecessor(predecessor: Node, item: Node) -> Self {
        (predecessor, item)
    }
    fn new_without_predecessor(item: Node) -> Self {
        (item, item)
    }
    fn item(&self) -> Node {
        self.1
    }
    fn predecessor(&self) -> Option<Node> {
        if self.0 == self.1 { None } else { Some(self.0) }
    }
}

/// Abstraction for the traversal frontier data structure.
///
/// - [`VecDeque`] -> queue semantics -> **BFS**
/// - [`Vec`] -> stack semantics -> **DFS**
pub trait NodeSequencer<T> {
    /// If *true*, nodes are marked visited when pushed; otherwise when popped.
    const VISIT_ON_PUSH: bool;

    /// Creates a new sequencer initialized with a single node.
    fn init(u: T) -> Self;

    /// Pushes a node into the frontier.
    fn push(&mut self, item: T);

    /// Removes and returns the next node from the frontier.
    fn pop(&mut self) -> Option<T>;

    /// Returns the number of items currently in the frontier.
    fn cardinality(&self) -> usize;
}

impl<T> NodeSequencer<T> for VecDeque<T> {
    const VISIT_ON_PUSH: bool = true;

    fn init(u: T) -> Self {
        Self::from(vec![u])
    }
    fn push(&mut self, u: T) {
        self.push_back(u)
    }
    fn pop(&mut self) -> Option<T> {
        self.pop_front()
    }
    fn cardinality(&self) -> usize {
        self.len()
    }
}

impl<T> NodeSequencer<T> for Vec<T> {
    const VISIT_ON_PUSH: bool = false;

    fn init(u: T) -> Self {
        vec![u]
    }
    fn push(&mut self, u: T) {
        self.push(u)
    }
    fn pop(&mut self) -> Option<T> {
        self.pop()
    }
    fn cardinality(&self) -> usize {
        self.len()
    }
}

/// Generic traversal iterator supporting BFS and DFS variants.
///
/// Maintains an explicit frontier (queue or stack) of nodes to visit,
/// a bitset of visited nodes, and optionally records predecessor information.
pub struct TraversalSearch<'a, G, S, I>
where
    G: AdjacencyList,
    S: NodeSequencer<I>,
    I: SequencedItem,
{
    graph: &'a G,
    visited: NodeBitSet,
    sequencer: S,
    stop_at: Option<Node>,
    _item: PhantomData<I>,
}

/// A BFS traversal iterator over the graph, visiting nodes in
/// breadth-first order from a given starting node.
pub type BFS<'a, G> = TraversalSearch<'a, G, VecDeque<Node>, Node>;

/// A DFS traversal iterator over the graph, visiting nodes in
/// depth-first preorder from a given starting node.
pub type DFS<'a, G> = TraversalSearch<'a, G, Vec<Node>, Node>;

/// A BFS traversal iterator that records predecessor information.
pub type BFSWithPredecessor<'a, G> =
    TraversalSearch<'a, G, VecDeque<PredecessorOfNode>, PredecessorOfNode>;

/// A DFS traversal iterator that records predecessor information.
pub type DFSWithPredecessor<'a, G> =
    TraversalSearch<'a, G, Vec<PredecessorOfNode>, PredecessorOfNode>;

impl<G, S, I> WithGraphRef<G> for TraversalSearch<'_, G, S, I>
where
    G: AdjacencyList,
    S: NodeSequencer<I>,
    I: SequencedItem,
{
    fn graph_ref(&self) -> &G {
        self.graph
    }
}

impl<G, S, I> TraversalState for TraversalSearch<'_, G, S, I>
where
    G: AdjacencyList,
    S: NodeSequencer<I>,
    I: SequencedItem,
{
    fn visited(&self) -> &NodeBitSet {
        &self.visited
    }
}

impl<G, S, I> Iterator for TraversalSearch<'_, G, S, I>
where
    G: AdjacencyList,
    S: NodeSequencer<I>,
    I: SequencedItem,
{
    type Item = I;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let popped = self.sequencer.pop()?;
            let u = popped.item();

            // a stack may hold several entries of the same node; only the topmost counts
            if !S::VISIT_ON_PUSH && self.visited.set_bit(u) {
                continue;
            }

            if self.stop_at == Some(u) {
                while self.sequencer.pop().is_some() {} // drop all
            } else if S::VISIT_ON_PUSH {
                for v in self.graph.neighbors_of(u) {
                    if !self.visited.set_bit(v) {
                        self.sequencer.push(I::new_with_predecessor(u, v));
                    }
                }
            } else {
                let pending: SmallVec<[Node; 8]> = self
                    .graph
                    .neighbors_of(u)
                    .filter(|&v| !self.visited.get_bit(v))
                    .collect();
                for &v in pending.iter().rev() {
                    self.sequencer.push(I::new_with_predecessor(u, v));
                }
            }

            return Some(popped);
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.graph.len() - self.visited.cardinality() as usize;
        if !S::VISIT_ON_PUSH {
            // the stack may only hold stale entries of visited nodes
            (0, Some(remaining))
        } else if self.stop_at.is_some() {
            (0, Some(remaining + self.sequencer.cardinality()))
        } else {
            (self.sequencer.cardinality(), Some(remaining + self.sequencer.cardinality()))
        }
    }
}

impl<'a, G, S, I> TraversalSearch<'a, G, S, I>
where
    G: AdjacencyList,
    S: NodeSequencer<I>,
    I: SequencedItem,
{
    /// Creates a new traversal iterator starting from `start`.
    pub fn new(graph: &'a G, start: Node) -> Self {
        let mut visited = graph.vertex_bitset_unset();
        if S::VISIT_ON_PUSH {
            visited.set_bit(start);
        }
        Self {
            graph,
            visited,
            sequencer: S::init(I::new_without_predecessor(start)),
            stop_at: None,
            _item: PhantomData,
        }
    }

    /// Tries to restart the search at the smallest yet unvisited node and returns
    /// true iff successful. Requires that search came to a hold earlier,
    /// i.e. self.next() returned None
    pub fn try_restart_at_unvisited(&mut self) -> bool {
        debug_assert_eq!(self.sequencer.cardinality(), 0);
        match self
            .graph
            .vertices_range()
            .find(|&u| !self.visited.get_bit(u))
        {
            None => false,
            Some(x) => {
                if S::VISIT_ON_PUSH {
                    self.visited.set_bit(x);
                }
                self.sequencer.push(I::new_without_predecessor(x));
                true
            }
        }
    }

    /// Sets a stopper node. If this node is reached, the iterator returns it and afterwards only None.
    pub fn set_stop_at(&mut self, stopper: Node) {
        self.stop_at = Some(stopper);
    }

    /// Sets a stopper node. If this node is reached, the iterator returns it and afterwards only None.
    pub fn stop_at(mut self, stopper: Node) -> Self {
        self.set_stop_at(stopper);
        self
    }
}

/// Extension trait for traversal iterators that return `PredecessorOfNode`,
/// enabling extraction of the implied spanning tree structure (parents, depths).
pub trait TraversalTree<'a, G>:
    WithGraphRef<G> + Iterator<Item = PredecessorOfNode> + Sized
where
    G: 'a + AdjacencyList,
{
    /// Consumes the iterator and records the parent of each node in the implied
    /// traversal tree into the provided slice `tree`.
    /// Entries of unvisited nodes and of roots remain unchanged.
    ///
    /// # Examples
    /// ```
    /// use wgraphs::{prelude::*, algo::*};
    ///
    /// let mut g = GraphStore::undirected();
    /// g.add_unit_edge(0, 1).unwrap();
    /// g.add_unit_edge(1, 2).unwrap();
    ///
    /// let mut parents: Vec<Node> = g.vertices_range().collect();
    /// g.bfs_with_predecessor(0).parent_array_into(&mut parents);
    /// assert_eq!(parents, vec![0, 0, 1]);
    /// ```
    fn parent_array_into(&mut self, tree: &mut [Node]) {
        for pred_with_item in self.by_ref() {
            if let Some(p) = pred_with_item.predecessor() {
                tree[pred_with_item.item() as usize] = p;
            }
        }
    }

    /// Constructs a fresh parent array where each node is initially its own parent,
    /// then fills in the traversal tree using `parent_array_into`.
    fn parent_array(&mut self) -> Vec<Node> {
        let mut tree: Vec<_> = self.graph_ref().vertices_range().collect();
        self.parent_array_into(&mut tree);
        tree
    }

    /// Consumes the iterator and computes the depth of each visited node in
    /// the traversal tree (root depth = 0). Unvisited entries remain unchanged.
    fn depths_into(&mut self, depths: &mut [Node]) {
        for pred_with_item in self.by_ref() {
            depths[pred_with_item.item() as usize] = pred_with_item
                .predecessor()
                .map_or(0, |p| depths[p as usize] + 1);
        }
    }

    /// Constructs a depth array initialized with [`INVALID_NODE`] (unreached),
    /// then fills in the traversal tree depths using `depths_into`.
    ///
    /// # Examples
    /// ```
    /// use wgraphs::{prelude::*, algo::*};
    ///
    /// let mut g = GraphStore::directed();
    /// g.add_unit_edge(0, 1).unwrap();
    /// g.add_unit_edge(1, 2).unwrap();
    ///
    /// assert_eq!(g.bfs_with_predecessor(1).depths(), vec![INVALID_NODE, 0, 1]);
    /// ```
    fn depths(&mut self) -> Vec<Node> {
        let mut depths = vec![INVALID_NODE; self.graph_ref().len()];
        self.depths_into(&mut depths);
        depths
    }
}

impl<'a, G, S> TraversalTree<'a, G> for TraversalSearch<'a, G, S, PredecessorOfNode>
where
    G: AdjacencyList,
    S: NodeSequencer<PredecessorOfNode>,
{
}

/// Iterator implementing topological ordering over a directed acyclic graph (DAG).
///
/// Uses a variant of Kahn's algorithm:
/// - Initializes with all nodes of in-degree 0.
/// - Repeatedly removes a node, decreasing in-degrees of its successors,
///   and enqueues new nodes of in-degree 0.
/// - Stops once all nodes are output or a cycle blocks further progress.
pub struct TopoSearch<'a, G> {
    graph: &'a G,
    in_degs: Vec<NumNodes>,
    queue: VecDeque<Node>,
}

impl<G> WithGraphRef<G> for TopoSearch<'_, G>
where
    G: AdjacencyList,
{
    fn graph_ref(&self) -> &G {
        self.graph
    }
}

impl<G> Iterator for TopoSearch<'_, G>
where
    G: AdjacencyList,
{
    type Item = Node;

    fn next(&mut self) -> Option<Self::Item> {
        let u = self.queue.pop_front()?;

        for v in self.graph.neighbors_of(u) {
            self.in_degs[v as usize] -= 1;
            if self.in_degs[v as usize] == 0 {
                self.queue.push_back(v);
            }
        }

        Some(u)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.queue.len(), Some(self.graph.len()))
    }
}

impl<'a, G> TopoSearch<'a, G>
where
    G: AdjacencyList,
{
    fn new(graph: &'a G) -> Self {
        let mut in_degs: Vec<NumNodes> = vec![0; graph.len()];
        for Edge(_, v) in graph.edges(false) {
            in_degs[v as usize] += 1;
        }

        let queue = graph
            .vertices_range()
            .filter(|&u| in_degs[u as usize] == 0)
            .collect();

        Self {
            graph,
            in_degs,
            queue,
        }
    }
}

/// Provides traversal iterators over dense nodes for every adjacency list
pub trait Traversal: AdjacencyList + Sized {
    /// Returns an iterator that traverses nodes reachable from `start`
    /// in **breadth-first search (BFS) order**.
    ///
    /// # Examples
    /// ```
    /// use wgraphs::{prelude::*, algo::*};
    ///
    /// let mut g = GraphStore::undirected();
    /// g.add_unit_edge(0, 1).unwrap();
    ///
    /// let order: Vec<_> = g.bfs(0).collect();
    /// assert_eq!(order, vec![0, 1]);
    /// ```
    fn bfs(&self, start: Node) -> BFS<'_, Self> {
        BFS::new(self, start)
    }

    /// Returns an iterator that traverses nodes reachable from `start`
    /// in **depth-first search (DFS) preorder**.
    fn dfs(&self, start: Node) -> DFS<'_, Self> {
        DFS::new(self, start)
    }

    /// Returns a BFS iterator starting from `start` that additionally
    /// yields the predecessor relation (edges traversed).
    fn bfs_with_predecessor(&self, start: Node) -> BFSWithPredecessor<'_, Self> {
        BFSWithPredecessor::new(self, start)
    }

    /// Returns a DFS iterator starting from `start` that additionally
    /// yields the predecessor relation (edges traversed).
    fn dfs_with_predecessor(&self, start: Node) -> DFSWithPredecessor<'_, Self> {
        DFSWithPredecessor::new(self, start)
    }

    /// Returns an iterator yielding nodes in a valid **topological order**.
    /// Neighbors are interpreted as out-neighbors.
    /// Terminates early if the graph contains a cycle.
    fn topo_search(&self) -> TopoSearch<'_, Self> {
        TopoSearch::new(self)
    }
}

impl<G> Traversal for G where G: AdjacencyList + Sized {}

/// Result of a depth-first search on a [`GraphStore`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DfsTree<V: Vertex> {
    /// Vertices in visiting (preorder) order, starting with the root
    pub order: Vec<V>,
    /// Parent of every visited vertex except the root
    pub parent: FxHashMap<V, V>,
    /// Set of visited vertices
    pub visited: FxHashSet<V>,
}

/// Result of a breadth-first search on a [`GraphStore`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BfsTree<V: Vertex> {
    /// Vertices in visiting order, starting with the root
    pub order: Vec<V>,
    /// Parent of every visited vertex except the root
    pub parent: FxHashMap<V, V>,
    /// Number of edges on a shortest path from the root
    pub distance: FxHashMap<V, NumNodes>,
}

/// Follows parent pointers from `target` back to a root and returns the path root-first
fn walk_parents<V: Vertex>(parent: &FxHashMap<V, V>, target: &V) -> Vec<V> {
    let mut path = vec![target.clone()];
    let mut current = target;
    while let Some(p) = parent.get(current) {
        path.push(p.clone());
        current = p;
    }
    path.reverse();
    path
}

impl<V: Vertex> DfsTree<V> {
    pub fn root(&self) -> Option<&V> {
        self.order.first()
    }

    /// Returns the tree path from the root to `target`, if `target` was visited
    pub fn path_to(&self, target: &V) -> Option<Vec<V>> {
        self.visited
            .contains(target)
            .then(|| walk_parents(&self.parent, target))
    }
}

impl<V: Vertex> BfsTree<V> {
    pub fn root(&self) -> Option<&V> {
        self.order.first()
    }

    pub fn is_reached(&self, v: &V) -> bool {
        self.distance.contains_key(v)
    }

    /// Returns a path with the fewest edges from the root to `target`, if `target` was reached
    pub fn path_to(&self, target: &V) -> Option<Vec<V>> {
        self.is_reached(target)
            .then(|| walk_parents(&self.parent, target))
    }
}

/// Traversal-based queries on a [`GraphStore`] reporting vertex identifiers.
///
/// # Examples
/// ```
/// use wgraphs::{prelude::*, algo::*};
///
/// let mut g = GraphStore::undirected();
/// g.add_unit_edge("a", "b").unwrap();
/// g.add_unit_edge("a", "c").unwrap();
/// g.add_unit_edge("b", "d").unwrap();
///
/// let tree = Search::new().dfs(&g, &"a").unwrap();
/// assert_eq!(tree.order, vec!["a", "b", "d", "c"]);
/// assert_eq!(tree.parent[&"d"], "b");
///
/// assert!(is_connected(&g));
/// assert!(!has_cycle(&g).unwrap());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Search {
    interrupt: Option<Interrupt>,
}

impl Search {
    pub fn new() -> Self {
        Self::default()
    }

    /// Polls `interrupt` once per visited vertex
    pub fn set_interrupt(&mut self, interrupt: Interrupt) {
        self.interrupt = Some(interrupt);
    }

    /// Polls `interrupt` once per visited vertex
    pub fn interrupt(mut self, interrupt: Interrupt) -> Self {
        self.set_interrupt(interrupt);
        self
    }

    pub(crate) fn interrupt_ref(&self) -> Option<&Interrupt> {
        self.interrupt.as_ref()
    }

    pub(crate) fn check_interrupt(&self) -> Result<()> {
        interrupt::check(self.interrupt_ref())
    }

    /// Depth-first search from `start` following out-edges.
    ///
    /// # Errors
    /// [`GraphError::UnknownVertex`] if `start` is not in the graph.
    pub fn dfs<V: Vertex>(&self, graph: &GraphStore<V>, start: &V) -> Result<DfsTree<V>> {
        let s = graph.node_of(start)?;

        let mut order = Vec::new();
        let mut parent = FxHashMap::default();
        for item in graph.dfs_with_predecessor(s) {
            self.check_interrupt()?;
            let (pred, u) = item.predecessor_with_item();
            let label = graph.label_of(u).clone();
            if let Some(p) = pred {
                parent.insert(label.clone(), graph.label_of(p).clone());
            }
            order.push(label);
        }

        debug!(start = ?start, visited = order.len(), "dfs finished");
        let visited = order.iter().cloned().collect();
        Ok(DfsTree {
            order,
            parent,
            visited,
        })
    }

    /// Breadth-first search from `start` following out-edges.
    ///
    /// # Errors
    /// [`GraphError::UnknownVertex`] if `start` is not in the graph.
    pub fn bfs<V: Vertex>(&self, graph: &GraphStore<V>, start: &V) -> Result<BfsTree<V>> {
        let s = graph.node_of(start)?;

        let mut order = Vec::new();
        let mut parent = FxHashMap::default();
        let mut depth = vec![0 as NumNodes; graph.len()];
        let mut distance = FxHashMap::default();
        for item in graph.bfs_with_predecessor(s) {
            self.check_interrupt()?;
            let (pred, u) = item.predecessor_with_item();
            let label = graph.label_of(u).clone();
            if let Some(p) = pred {
                depth[u as usize] = depth[p as usize] + 1;
                parent.insert(label.clone(), graph.label_of(p).clone());
            }
            distance.insert(label.clone(), depth[u as usize]);
            order.push(label);
        }

        debug!(start = ?start, visited = order.len(), "bfs finished");
        Ok(BfsTree {
            order,
            parent,
            distance,
        })
    }

    /// Returns *true* if every vertex is reachable from every other one when edge orientation
    /// is ignored (weak connectivity for directed graphs). The empty graph is connected.
    pub fn is_connected<V: Vertex>(&self, graph: &GraphStore<V>) -> Result<bool> {
        if graph.is_empty() {
            return Ok(true);
        }

        let view = graph.underlying_undirected();
        let mut reached = 0;
        for _ in view.bfs(0) {
            self.check_interrupt()?;
            reached += 1;
        }
        Ok(reached == graph.len())
    }

    /// Returns *true* if the directed graph contains a directed cycle.
    ///
    /// Runs an iterative depth-first search from every unvisited vertex and reports a cycle as
    /// soon as an edge leads to a vertex that is still on the search stack.
    ///
    /// # Errors
    /// [`GraphError::DirectionMismatch`] if the graph is undirected.
    pub fn has_cycle_directed<V: Vertex>(&self, graph: &GraphStore<V>) -> Result<bool> {
        if graph.is_undirected() {
            return Err(GraphError::DirectionMismatch {
                expected: Direction::Directed,
            });
        }

        let mut discovered = graph.vertex_bitset_unset();
        let mut on_stack = graph.vertex_bitset_unset();
        let mut stack: Vec<(Node, usize)> = Vec::new();

        for root in graph.vertices_range() {
            if discovered.set_bit(root) {
                continue;
            }
            on_stack.set_bit(root);
            stack.push((root, 0));

            while let Some(&(u, cursor)) = stack.last() {
                let Some(inc) = graph.incidences_of(u).get(cursor) else {
                    on_stack.clear_bit(u);
                    stack.pop();
                    continue;
                };

                let top = stack.len() - 1;
                stack[top].1 += 1;

                let v = inc.head;
                if on_stack.get_bit(v) {
                    debug!(from = ?graph.label_of(u), to = ?graph.label_of(v), "back edge found");
                    return Ok(true);
                }
                if !discovered.set_bit(v) {
                    self.check_interrupt()?;
                    on_stack.set_bit(v);
                    stack.push((v, 0));
                }
            }
        }

        Ok(false)
    }

    /// Returns *true* if the graph contains a cycle: a directed cycle for directed graphs,
    /// any cycle for undirected graphs (detected with union-find).
    pub fn has_cycle<V: Vertex>(&self, graph: &GraphStore<V>) -> Result<bool> {
        if graph.is_directed() {
            return self.has_cycle_directed(graph);
        }

        let mut uf = UnionFind::new(graph.number_of_nodes());
        for record in graph.edge_records() {
            self.check_interrupt()?;
            let Edge(u, v) = record.edge;
            if !uf.union(u, v) {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Returns the vertices of a directed acyclic graph in topological order,
    /// or `None` if the graph has a directed cycle.
    /// Ties are broken by registration order.
    ///
    /// # Errors
    /// [`GraphError::DirectionMismatch`] if the graph is undirected.
    pub fn topological_order<V: Vertex>(&self, graph: &GraphStore<V>) -> Result<Option<Vec<V>>> {
        if graph.is_undirected() {
            return Err(GraphError::DirectionMismatch {
                expected: Direction::Directed,
            });
        }

        let mut order = Vec::with_capacity(graph.len());
        for u in graph.topo_search() {
            self.check_interrupt()?;
            order.push(graph.label_of(u).clone());
        }

        Ok((order.len() == graph.len()).then_some(order))
    }
}

/// Depth-first search from `start`, see [`Search::dfs`]
pub fn dfs<V: Vertex>(graph: &GraphStore<V>, start: &V) -> Result<DfsTree<V>> {
    Search::new().dfs(graph, start)
}

/// Breadth-first search from `start`, see [`Search::bfs`]
pub fn bfs<V: Vertex>(graph: &GraphStore<V>, start: &V) -> Result<BfsTree<V>> {
    Search::new().bfs(graph, start)
}

/// Connectivity ignoring edge orientation, see [`Search::is_connected`]
pub fn is_connected<V: Vertex>(graph: &GraphStore<V>) -> bool {
    graph.is_empty() || graph.underlying_undirected().bfs(0).count() == graph.len()
}

/// Directed cycle detection, see [`Search::has_cycle_directed`]
pub fn has_cycle_directed<V: Vertex>(graph: &GraphStore<V>) -> Result<bool> {
    Search::new().has_cycle_directed(graph)
}

/// Cycle detection for either orientation, see [`Search::has_cycle`]
pub fn has_cycle<V: Vertex>(graph: &GraphStore<V>) -> Result<bool> {
    Search::new().has_cycle(graph)
}

/// Topological order of a directed graph, see [`Search::topological_order`]
pub fn topological_order<V: Vertex>(graph: &GraphStore<V>) -> Result<Option<Vec<V>>> {
    Search::new().topological_order(graph)
}
