/*!
# Graph Generators

This module provides traits and builder patterns for constructing random graph generators.

Each graph generator allows parameterized control over structural properties of the graph and can
produce either a complete collection of edges or a stream of them through iterators. All randomness
is drawn from a caller-provided [`Rng`], so a seeded generator (e.g. `rand_pcg::Pcg64Mcg`) makes the
output fully reproducible and no process-global state is involved.

The typical usage workflow is:

1. Create a generator instance (e.g., `BarabasiAlbert::new()`).
2. Set parameters using builder methods (e.g., `.nodes(n).attachments(m)`).
3. Generate edges via `generate()` / `stream()`, or their validating `try_*` counterparts.

In addition, the [`RandomGraph`] trait abstracts the generation of whole graph instances into
reusable constructors that work for every representation implementing [`GraphFromScratch`].

Supported models:
- Barabási–Albert: preferential attachment growth producing scale-free graphs

# Example
```
use rand::SeedableRng;
use rand_pcg::Pcg64Mcg;
use scalefree::{prelude::*, gens::*};

let rng = &mut Pcg64Mcg::seed_from_u64(1);
let graph = AdjArrayUndir::barabasi_albert(rng, 100, 3).unwrap();

// 3 seed edges and 3 edges for each of the remaining 97 nodes
assert_eq!(graph.number_of_edges(), 3 + 97 * 3);
```
*/

use rand::Rng;

use crate::{error::*, prelude::*};

mod barabasi_albert;

pub use barabasi_albert::*;

/// Trait for generators that allow setting the number of nodes.
///
/// Allows a fluent interface when configuring generators.
pub trait NumNodesGen: Sized {
    /// Sets the number of nodes in the graph generator.
    fn set_nodes(&mut self, n: NumNodes);

    /// Sets the number of nodes in the graph generator.
    fn nodes(mut self, n: NumNodes) -> Self {
        self.set_nodes(n);
        self
    }
}

/// General trait for a configurable random edge generator.
///
/// Types implementing this trait can produce a complete edge list
/// or a lazily-evaluated stream (iterator) of edges.
pub trait GraphGenerator {
    /// Checks whether the configured parameters describe a valid graph.
    fn validate(&self) -> Result<()> {
        Ok(())
    }

    /// Generates a list of random edges.
    ///
    /// This collects the full result from `stream()` into a `Vec<Edge>` as default.
    ///
    /// # Panics
    /// If the generator is misconfigured, see [`GraphGenerator::validate`].
    fn generate<R>(&self, rng: &mut R) -> Vec<Edge>
    where
        R: Rng,
    {
        self.stream(rng).collect()
    }

    /// Creates a lazy iterator (stream) over generated edges.
    ///
    /// Preferred for large graphs or pipelined filtering.
    ///
    /// # Panics
    /// If the generator is misconfigured, see [`GraphGenerator::validate`].
    fn stream<R>(&self, rng: &mut R) -> impl Iterator<Item = Edge>
    where
        R: Rng;

    /// Like [`GraphGenerator::generate`] but returns an error instead of panicking on invalid parameters.
    fn try_generate<R>(&self, rng: &mut R) -> Result<Vec<Edge>>
    where
        R: Rng,
    {
        self.validate()?;
        Ok(self.generate(rng))
    }

    /// Like [`GraphGenerator::stream`] but returns an error instead of panicking on invalid parameters.
    fn try_stream<R>(&self, rng: &mut R) -> Result<impl Iterator<Item = Edge>>
    where
        R: Rng,
    {
        self.validate()?;
        Ok(self.stream(rng))
    }
}

/// Trait for building full graph instances from common random models.
///
/// Requires that the implementing type supports construction from a set of edges.
/// Provided implementations use the corresponding edge generators under the hood.
pub trait RandomGraph: Sized {
    /// Creates a random Barabási–Albert graph with `n` nodes where every node added after the
    /// fully connected core of `m` nodes attaches to `m` distinct existing nodes.
    ///
    /// Neighborhoods are filled in the order the generator emits edges.
    ///
    /// # Errors
    /// Returns [`InvalidParameter`] if `m == 0` or `n <= m`.
    fn barabasi_albert<R>(rng: &mut R, n: NumNodes, m: NumNodes) -> Result<Self>
    where
        R: Rng;
}

impl<G> RandomGraph for G
where
    G: GraphFromScratch,
{
    fn barabasi_albert<R>(rng: &mut R, n: NumNodes, m: NumNodes) -> Result<Self>
    where
        R: Rng,
    {
        let generator = BarabasiAlbert::new().nodes(n).attachments(m);
        let edges = generator.try_stream(rng)?;

        // the generator never emits an edge twice
        Ok(Self::from_distinct_edges(n, edges))
    }
}
