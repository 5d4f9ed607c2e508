/*!
`scalefree` grows **scale-free graphs** by preferential attachment (the Barabási–Albert model) and
runs breadth-first traversals and related algorithms on them. It is built to serve as a
load-generating benchmark workload at sizes up to millions of nodes.

# Representation

We represent **nodes** as `u32` in the range `0..n` where `n` is the number of nodes in the graph.
For **edges**, we use a simple tuple-struct `Edge(Node, Node)`.
All graphs are **undirected**, so `Edge(u, v)` is treated as equivalent to `Edge(v, u)`.

See the [`repr`] module for the storage backends:

- [`AdjArrayUndir`](crate::repr::AdjArrayUndir): one growable neighbor list per node
- [`SparseAdjArrayUndir`](crate::repr::SparseAdjArrayUndir): neighbor lists stored inline up to a small degree

# Design

Generators and algorithms are provided as configurable structs that one can alter using the
*Builder* / *Setter* pattern before running them on a graph. The most common functionality is also
implemented via traits on the graph itself, e.g. `AdjArrayUndir::barabasi_albert(rng, n, m)` or
`graph.bfs_tree(root)`.

All randomness is drawn from an explicitly passed generator. Given the same seeded generator,
graph construction and therefore every algorithm result is fully reproducible.

# Usage

There are *4* core submodules you probably want to interact with:
- [`prelude`] includes definitions for nodes, edges, basic graph operations, and all graph representations,
- [`gens`] includes the Barabási–Albert generator, both as an edge stream and as a graph constructor,
- [`algo`] includes BFS (`graph.bfs_tree(root)`), BFS spanning trees and PageRank,
- [`workload`] bundles generation and one algorithm into a timed, serializable benchmark request.

In most use-cases, `use scalefree::{prelude::*, gens::*, algo::*};` suffices for your needs.

```
use rand::SeedableRng;
use rand_pcg::Pcg64Mcg;
use scalefree::{prelude::*, gens::*, algo::*};

let rng = &mut Pcg64Mcg::seed_from_u64(42);
let graph = AdjArrayUndir::barabasi_albert(rng, 1000, 10).unwrap();

let result = graph.bfs_tree(0).unwrap();
assert_eq!(result.order.len(), 1000);
assert_eq!(result.signed_parents()[0], -1);
```
*/

pub mod algo;
pub mod edge;
pub mod error;
pub mod gens;
pub mod node;
pub mod ops;
pub mod repr;
pub(crate) mod testing;
pub mod utils;
pub mod workload;

/// `scalefree::prelude` includes definitions for nodes and edges, all basic graph operation traits as well as all implemented representations.
pub mod prelude {
    pub use super::{edge::*, node::*, ops::*, repr::*};
}
