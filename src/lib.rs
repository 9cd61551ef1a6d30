/*!
`wgraphs` is a graph data structure & algorithms library for graphs that are
- **w**eighted : Every edge carries a real-valued weight (default `1`) and optionally a capacity
- labelled by arbitrary vertex identifiers supplied by the caller
- either directed or undirected, decided when the graph is created

# Representation

Vertices are caller-supplied identifiers of any type implementing [`Vertex`]
(`Clone + Eq + Hash + Ord + Debug`). Internally, each vertex is mapped to a dense
**node** `u32` in the range `0..n` (in registration order), and all algorithms work on
these nodes. Results are translated back into the caller's identifiers.

For **edges**, we use a simple tuple-struct `Edge(Node, Node)` internally and
[`WeightedEdge`] when exposing edges together with their attributes.

### Directed vs Undirected

- In an **undirected** graph, `(u, v)` and `(v, u)` are the same connection and share
  weight and capacity.
- In a **directed** graph, the edge has orientation.

The graph is simple: parallel edges and self-loops are rejected at construction time.

# Design

All algorithms are provided as configurable structs that one can alter to their needs using
the *Builder* / *Setter* pattern before running them on a provided graph
(e.g. `Prim::new().start("a").run(&graph)`).
The commonly used functionality is also implemented via traits on [`GraphStore`] itself,
making it usable without configuring the algorithm beforehand (e.g. `graph.kruskal()`).

Every algorithm borrows the graph immutably and returns an owned result value; per-call state
(visited sets, parent arrays, union-find arrays, residual networks) never outlives the call.
Long running algorithms can be cancelled cooperatively with an [`Interrupt`].

# Usage

- [`prelude`] includes nodes, edges, errors, basic graph operations and [`GraphStore`],
- [`algo`] includes traversal, spanning trees, shortest paths, maximum flow and matching,
- [`io`] includes a reader/writer for a plain-text edge list format.

In most use-cases, `use wgraphs::{prelude::*, algo::*};` suffices for your needs.

```
use wgraphs::{prelude::*, algo::*};

let mut graph = GraphStore::undirected();
graph.add_weighted_edge("a", "b", 1.0).unwrap();
graph.add_weighted_edge("b", "c", 2.0).unwrap();
graph.add_weighted_edge("a", "c", 5.0).unwrap();

let mst = graph.kruskal().unwrap();
assert_eq!(mst.total_weight, 3.0);
assert!(mst.spanning);

let paths = graph.dijkstra(&"a").unwrap();
assert_eq!(paths.distance_to(&"c"), Some(3.0));
```
*/

pub mod algo;
pub mod edge;
pub mod error;
pub mod interrupt;
pub mod io;
pub mod node;
pub mod ops;
pub mod repr;

pub use edge::*;
pub use error::*;
pub use interrupt::Interrupt;
pub use node::*;
pub use ops::{Direction, GraphType};
pub use repr::*;

/// `wgraphs::prelude` includes definitions for nodes and edges, errors, all basic graph operation
/// traits as well as the graph store.
pub mod prelude {
    pub use super::{edge::*, error::*, interrupt::Interrupt, node::*, ops::*, repr::*};
}
