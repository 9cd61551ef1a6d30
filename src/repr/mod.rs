/*!
# Graph Representation

[`GraphStore`] is the single graph representation of this crate: adjacency lists indexed by dense
nodes, a bidirectional mapping between caller-supplied vertex identifiers and nodes, and a list of
edges in insertion order carrying weight and (optional) capacity.

- Directed graphs additionally store in-neighborhoods so that the underlying undirected graph
  (see [`UnderlyingUndirected`]) can be walked without scanning all vertices.
- Undirected graphs store every edge in the neighborhoods of both endpoints.

Neighborhoods keep insertion order, which makes all traversals deterministic.
*/

use crate::{ops::*, *};

mod store;
mod undirected;

pub use store::*;
pub use undirected::*;
