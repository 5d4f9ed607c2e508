/*!
# Graph Hash Digests

This module provides the [`GraphDigest`] trait, which allows computing
**hash-based digests** of graphs that are independent of the underlying
data structure and of the order in which edges were inserted.

The digest encodes:
- the number of nodes, and
- the sorted list of normalized edges,

before feeding them into a cryptographic hash function.

Benchmark runs print this digest so that two runs with the same seed can be
compared without shipping the whole graph around.

## Example
```
use scalefree::{prelude::*, repr::digest::GraphDigest};

let a = AdjArrayUndir::from_edges(3, [Edge(0, 1), Edge(1, 2)].into_iter());
let b = SparseAdjArrayUndir::from_edges(3, [Edge(2, 1), Edge(1, 0)].into_iter());

assert_eq!(a.digest_sha256(), b.digest_sha256());
assert_eq!(a.digest_sha256().len(), 64);
```
*/

use std::fmt::LowerHex;

use super::*;
use ::digest::{Digest, Output};

/// Trait for computing a **canonical hash digest** of an undirected graph.
///
/// Digests are designed to be:
/// - **Representation independent**: Works with any [`AdjacencyList`] implementation.
/// - **Deterministic**: Edges are normalized and encoded in sorted order.
pub trait GraphDigest {
    /// Computes a digest of the graph using the provided hash function `D`.
    ///
    /// The result is returned as a **hexadecimal string**.
    fn digest<D>(&self) -> String
    where
        Output<D>: LowerHex,
        D: Digest;

    /// Computes a **SHA-256 digest** of the graph.
    ///
    /// The returned string is exactly 64 characters long.
    fn digest_sha256(&self) -> String {
        self.digest::<sha2::Sha256>()
    }
}

impl<G> GraphDigest for G
where
    G: AdjacencyList,
{
    fn digest<D>(&self) -> String
    where
        Output<D>: LowerHex,
        D: Digest,
    {
        let mut hasher = D::new();

        // first encode the number of nodes in the graph
        hasher.update(self.number_of_nodes().to_le_bytes());

        // then append the sorted edge list; every undirected edge exactly once
        let mut buffer = [0u8; 8];
        for Edge(u, v) in self.ordered_edges(true) {
            buffer[..4].copy_from_slice(&u.to_le_bytes());
            buffer[4..].copy_from_slice(&v.to_le_bytes());
            hasher.update(buffer);
        }

        format!("{:x}", hasher.finalize())
    }
}
