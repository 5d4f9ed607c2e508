/*!
# Node Representation

We choose `Node = u32` as benchmark graphs (even at millions of nodes) stay well below `2^32` nodes.
This allows us to (1) save space in adjacency lists, degree pools and traversal arrays by not using
`usize` or `u64` and (2) directly manipulate node values without abstracting over them.
*/

use std::num::NonZero;

use bitvec::vec::BitVec;

/// Nodes can be any unsigned integer from `0` to `Node::MAX - 1`
pub type Node = u32;

/// Node-Value that is considered invalid
pub const INVALID_NODE: Node = Node::MAX;

/// There can be at most `2^32 - 1` nodes in a graph!
pub type NumNodes = Node;

/// BitSet for Nodes: bit `u` corresponds to node `u`
pub type NodeBitSet = BitVec<u64>;

/// As `Option<Node>` uses additional bytes for padding, it can be inefficient
/// since we often need to use `Vec<Option<Node>>`. This instead uses the
/// `NonZero`-Wrapper to assign a constant value (often `INVALID_NODE`) as `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct OptionalNodeImpl<const N: Node>(NonZero<Node>);

/// Often, `INVALID_NODE` is safe to pick as the `None`-Value
pub type OptionalNode = OptionalNodeImpl<INVALID_NODE>;

impl<const N: Node> OptionalNodeImpl<N> {
    /// Returns `Some(OptionalNodeImpl)` if `n != N` and `None` otherwise
    pub const fn new(n: Node) -> Option<Self> {
        match NonZero::new(n ^ N) {
            Some(inner) => Some(OptionalNodeImpl(inner)),
            None => None,
        }
    }

    /// Gets the underlying Node-Value
    pub const fn get(&self) -> Node {
        self.0.get() ^ N
    }
}

/// Exports an optional node-value as a signed integer where `None` becomes `-1`.
///
/// This is the representation consumers of traversal results expect for roots and
/// unreached nodes.
pub fn signed_or_sentinel<const N: Node>(value: Option<OptionalNodeImpl<N>>) -> i64 {
    value.map_or(-1, |v| v.get() as i64)
}
