/*!
# Graph Algorithms

This module provides the **graph algorithms** run on top of the graph representations in this crate.
All algorithms are re-exported at the top level of this module, so you can simply do:
```rust
use scalefree::algo::*;
```
and gain access to breadth-first traversal, BFS spanning trees and PageRank.
If possible, algorithms are provided as **iterators**, making it easy to consume results lazily.
*/

mod pagerank;
mod spanning_tree;
mod traversal;

use crate::{error::*, prelude::*, utils::*};

pub use pagerank::*;
pub use spanning_tree::*;
pub use traversal::*;
