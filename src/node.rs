/*!
# Node Representation

Vertices are arbitrary caller-supplied identifiers (see [`Vertex`]). Inside the graph store and the
algorithms, every vertex is represented by a dense `Node = u32` in the range `0..n`.
This allows us to (1) use plain vectors and bitsets instead of hash maps for per-call state and
(2) keep algorithm code independent of the identifier type.
*/

use std::{fmt::Debug, hash::Hash};
use stream_bitset::bitset::BitSetImpl;

/// Nodes can be any unsigned integer from `0` to `Node::MAX - 1`
pub type Node = u32;

/// Node-Value that is considered invalid
pub const INVALID_NODE: Node = Node::MAX;

/// There can be at most `2^32 - 1` nodes in a graph!
pub type NumNodes = Node;

/// BitSet for Nodes
pub type NodeBitSet = BitSetImpl<Node>;

/// Bounds required from caller-supplied vertex identifiers.
///
/// `Ord` is used wherever a deterministic choice between vertices is needed
/// (e.g. the default start vertex of Prim's algorithm).
pub trait Vertex: Clone + Eq + Hash + Ord + Debug {}

impl<V> Vertex for V where V: Clone + Eq + Hash + Ord + Debug {}
