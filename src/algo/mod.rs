/*!
# Graph Algorithms

This module provides the algorithms of this crate, built on top of [`GraphStore`].
All algorithms are re-exported at the top level of this module, so you can simply do:
```rust
use wgraphs::algo::*;
```
and gain access to traversal, spanning trees, shortest paths, maximum flow and matching.

Each algorithm is available in two flavours:
- a configuration struct (e.g. [`Dijkstra`], [`Prim`], [`HopcroftKarp`]) with setters for
  optional behaviour such as an [`Interrupt`] handle, and
- a convenience trait implemented on [`GraphStore`] (e.g. [`ShortestPath`]) using the default
  configuration.

Low-level traversals over dense nodes are provided as **iterators** (see [`Traversal`]).
*/

mod bipartite;
mod matching;
mod network_flow;
mod shortest_path;
mod spanning_tree;
mod traversal;
mod union_find;

use crate::{interrupt, ops::*, *};

pub use bipartite::*;
pub use matching::*;
pub use network_flow::*;
pub use shortest_path::*;
pub use spanning_tree::*;
pub use traversal::*;
pub use union_find::*;
