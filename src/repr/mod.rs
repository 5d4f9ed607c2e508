/*!
# Graph Representations

Graphs are stored as one [`Neighborhood`] per node. The neighborhood keeps neighbors in insertion
order, which the traversal algorithms rely on for reproducible tie-breaking.

- [`AdjArrayUndir`]: neighborhoods as `Vec<Node>`, the general-purpose choice.
- [`SparseAdjArrayUndir`]: neighborhoods as `SmallVec<[Node; N]>`, avoiding a heap allocation for
  low-degree nodes. In preferential-attachment graphs most nodes keep a degree close to `m`, so
  choosing `N >= m` keeps almost all neighborhoods inline.

[`digest`] provides representation independent hashes of graphs.
*/

use crate::prelude::*;

mod neighborhood;
mod undirected;

pub mod digest;

pub use neighborhood::*;
pub use undirected::*;

/// Trait for methods on the Neighborhood of a specified Node
pub trait Neighborhood: Clone {
    fn new(n: NumNodes) -> Self;

    /// Returns the number of neighbors in the Neighborhood
    fn num_of_neighbors(&self) -> NumNodes;

    type NeighborhoodIter<'a>: Iterator<Item = Node> + 'a
    where
        Self: 'a;

    /// Returns an iterator over all neighbors in the Neighborhood in insertion order
    fn neighbors(&self) -> Self::NeighborhoodIter<'_>;

    /// Returns *true* if `u` is in the Neighborhood
    fn has_neighbor(&self, v: Node) -> bool {
        self.neighbors().any(|u| u == v)
    }

    /// Tries to add a neighbor to the Neighborhood.
    /// Returns *true* if the node was in the Neighborhood before.
    fn try_add_neighbor(&mut self, u: Node) -> bool {
        if self.has_neighbor(u) {
            true
        } else {
            self.add_neighbor(u);
            false
        }
    }

    /// Adds a neighbor to the Neighborhood without checking if this neighbor exists beforehand.
    /// For list-based implementations, this might lead to Multi-Edges
    fn add_neighbor(&mut self, u: Node);

    /// Removes all neighbors in the Neighborhood
    fn clear(&mut self);
}

/// Trait for accessing the neighborhood of nodes as slices
pub trait NeighborhoodSlice: Neighborhood {
    /// Returns a slice-reference of the neighborhood of a given vertex
    fn as_slice(&self) -> &[Node];
}
