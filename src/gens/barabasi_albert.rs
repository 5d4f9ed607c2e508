/*!
# Barabási–Albert Graphs

Scale-free graphs grown by **preferential attachment**: nodes are added one at a time and each new
node connects to `m` distinct existing nodes, chosen with probability proportional to their current
degree ("rich get richer").

The generator works in two phases:
1. **Seed core**: nodes `0..m` are connected to a clique, edges emitted in lexicographic order.
2. **Growth**: every node `k` in `m..n` draws entries from the [`DegreePool`] until it has collected
   `m` distinct targets and is then connected to them in draw order.

Degree-proportional selection does not need explicit probabilities: the pool holds every endpoint
of every edge emitted so far, so a uniform draw from the pool picks node `u` with probability
`deg(u) / 2|E|`.

Every node is attached to already existing nodes, so the resulting graph is connected, simple and
has exactly `m(m-1)/2 + (n-m)m` edges.

# Examples
```
use rand::SeedableRng;
use rand_pcg::Pcg64Mcg;
use scalefree::gens::*;

let rng = &mut Pcg64Mcg::seed_from_u64(7);
let edges = BarabasiAlbert::new().nodes(6).attachments(2).generate(rng);

assert_eq!(edges.len(), 1 + 4 * 2);
assert_eq!(edges[0], scalefree::edge::Edge(0, 1));
```
*/

use rand::Rng;
use smallvec::SmallVec;

use super::*;

/// The multiset of edge endpoints recorded so far: node `u` occurs exactly `deg(u)` times.
///
/// Drawing a uniform entry therefore samples nodes proportional to their degree.
#[derive(Debug, Clone, Default)]
pub struct DegreePool {
    entries: Vec<Node>,
}

impl DegreePool {
    /// Creates an empty pool with room for `capacity` endpoints
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Records both endpoints of a new edge
    pub fn record(&mut self, Edge(u, v): Edge) {
        self.entries.push(u);
        self.entries.push(v);
    }

    /// Draws a uniformly random entry, i.e. a node with probability proportional to its degree.
    /// Returns `None` if the pool is empty.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> Option<Node> {
        if self.entries.is_empty() {
            None
        } else {
            Some(self.entries[rng.random_range(0..self.entries.len())])
        }
    }

    /// Number of entries, i.e. twice the number of recorded edges
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns *true* if no edge was recorded yet
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of occurrences of `u`, equal to its degree so far.
    /// Takes linear time.
    pub fn multiplicity(&self, u: Node) -> usize {
        self.entries.iter().filter(|&&x| x == u).count()
    }
}

/// Generator for Barabási–Albert graphs with `n` nodes and `m` edges per new node.
///
/// The generator can be parameterized via:
/// - `.nodes(n)`: total number of nodes
/// - `.attachments(m)`: size of the seed clique and number of edges of each new node
///
/// Both must satisfy `1 <= m < n`, see [`GraphGenerator::validate`].
#[derive(Debug, Copy, Clone, Default)]
pub struct BarabasiAlbert {
    n: NumNodes,
    m: NumNodes,
}

impl BarabasiAlbert {
    /// Creates a new unconfigured generator
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the number of edges every new node attaches with
    pub fn set_attachments(&mut self, m: NumNodes) {
        self.m = m;
    }

    /// Sets the number of edges every new node attaches with
    pub fn attachments(mut self, m: NumNodes) -> Self {
        self.set_attachments(m);
        self
    }

    /// Total number of edges the generator emits for valid parameters
    pub fn number_of_edges(&self) -> NumEdges {
        let (n, m) = (self.n as NumEdges, self.m as NumEdges);
        m * m.saturating_sub(1) / 2 + n.saturating_sub(m) * m
    }
}

impl NumNodesGen for BarabasiAlbert {
    fn set_nodes(&mut self, n: NumNodes) {
        self.n = n;
    }
}

impl GraphGenerator for BarabasiAlbert {
    /// Requires `m >= 1` (at least one edge per new node) and `n > m` (the seed core needs `m`
    /// nodes and growth at least one more).
    fn validate(&self) -> Result<()> {
        if self.m == 0 {
            return Err(InvalidParameter::NoAttachments.into());
        }

        if self.n <= self.m {
            return Err(InvalidParameter::TooFewNodes {
                nodes: self.n,
                attachments: self.m,
            }
            .into());
        }

        Ok(())
    }

    /// Returns a streaming iterator over the edges of a random Barabási–Albert graph
    /// in insertion order.
    ///
    /// # Panics
    /// If `m == 0` or `n <= m`.
    fn stream<R>(&self, rng: &mut R) -> impl Iterator<Item = Edge>
    where
        R: Rng,
    {
        if let Err(e) = self.validate() {
            panic!("{e}");
        }

        BarabasiAlbertGenerator::new(rng, self.n, self.m)
    }
}

/// Current position of a [`BarabasiAlbertGenerator`]
#[derive(Debug, Copy, Clone)]
enum Phase {
    /// Emitting clique edge `(u, v)` of the seed core next
    Seed { u: Node, v: Node },
    /// Emitting the edges of new node `k` to the already selected targets
    Growth { k: Node },
    Done,
}

/// Streaming generator emitting the edges of a Barabási–Albert graph one at a time.
///
/// Edges are yielded exactly in the order in which they are added: first the seed clique on
/// `0..m` as `(i, j)` with `i < j`, then for every new node `k` the edges `(k, t)` to its targets
/// in draw order. Building a graph by inserting the edges in this order yields stable
/// neighborhood orders for a given random sequence.
pub struct BarabasiAlbertGenerator<'a, R>
where
    R: Rng,
{
    rng: &'a mut R,
    n: NumNodes,
    m: NumNodes,
    pool: DegreePool,
    phase: Phase,
    targets: SmallVec<[Node; 16]>,
    next_target: usize,
    rem: NumEdges,
}

impl<'a, R> BarabasiAlbertGenerator<'a, R>
where
    R: Rng,
{
    /// Creates a new generator for `n` nodes and `m` attachments per new node.
    ///
    /// # Panics
    /// Panics if `m == 0` or `n <= m` as the distinct-target selection could never finish.
    pub fn new(rng: &'a mut R, n: NumNodes, m: NumNodes) -> Self {
        assert!(m >= 1 && n > m, "Barabási–Albert graphs require 1 <= m < n");

        let num_edges = BarabasiAlbert { n, m }.number_of_edges();

        Self {
            rng,
            n,
            m,
            pool: DegreePool::with_capacity(2 * num_edges as usize),
            phase: Phase::Seed { u: 0, v: 1 },
            targets: SmallVec::with_capacity(m as usize),
            next_target: 0,
            rem: num_edges,
        }
    }

    /// The pool of all endpoints emitted so far
    pub fn degree_pool(&self) -> &DegreePool {
        &self.pool
    }

    /// Adds an edge to the pool and hands it out
    fn emit(&mut self, edge: Edge) -> Edge {
        self.pool.record(edge);
        self.rem -= 1;
        edge
    }

    /// Selects the targets of node `k` or finishes if all nodes were placed
    fn begin_growth(&mut self, k: Node) {
        if k >= self.n {
            self.phase = Phase::Done;
            return;
        }

        self.targets.clear();
        self.next_target = 0;

        // All nodes `0..k` are in the pool (each has degree >= 1) unless the pool is empty,
        // so there are `k >= m` distinct candidates and the loop terminates.
        while self.targets.len() < self.m as usize {
            // An empty pool only occurs for `m = 1, k = 1` where the seed core has no edges
            let candidate = match self.pool.sample(&mut *self.rng) {
                Some(u) => u,
                None => self.rng.random_range(0..k),
            };

            if candidate != k && !self.targets.contains(&candidate) {
                self.targets.push(candidate);
            }
        }

        self.phase = Phase::Growth { k };
    }
}

impl<R> Iterator for BarabasiAlbertGenerator<'_, R>
where
    R: Rng,
{
    type Item = Edge;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.phase {
                Phase::Seed { u, v } => {
                    if v < self.m {
                        self.phase = Phase::Seed { u, v: v + 1 };
                        return Some(self.emit(Edge(u, v)));
                    }

                    if u + 2 < self.m {
                        self.phase = Phase::Seed { u: u + 1, v: u + 2 };
                    } else {
                        self.begin_growth(self.m);
                    }
                }
                Phase::Growth { k } => {
                    if let Some(&t) = self.targets.get(self.next_target) {
                        self.next_target += 1;
                        return Some(self.emit(Edge(k, t)));
                    }

                    self.begin_growth(k + 1);
                }
                Phase::Done => return None,
            }
        }
    }

    /// Returns the number of edges remaining to be generated.
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.rem as usize, Some(self.rem as usize))
    }
}

impl<R> ExactSizeIterator for BarabasiAlbertGenerator<'_, R> where R: Rng {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GraphError;
    use itertools::Itertools;
    use rand::SeedableRng;
    use rand_pcg::Pcg64Mcg;

    #[test]
    fn rejects_invalid_parameters() {
        for (n, m) in [(10, 0), (0, 0), (0, 3), (3, 3), (2, 5)] {
            let result = BarabasiAlbert::new()
                .nodes(n)
                .attachments(m)
                .try_generate(&mut Pcg64Mcg::seed_from_u64(0));
            assert!(matches!(result, Err(GraphError::InvalidParameter(_))));
        }

        assert_eq!(
            BarabasiAlbert::new().nodes(10).attachments(10).validate(),
            Err(InvalidParameter::TooFewNodes {
                nodes: 10,
                attachments: 10
            }
            .into())
        );
        assert_eq!(
            BarabasiAlbert::new().nodes(10).validate(),
            Err(InvalidParameter::NoAttachments.into())
        );
    }

    #[test]
    #[should_panic]
    fn stream_panics_on_invalid_parameters() {
        let rng = &mut Pcg64Mcg::seed_from_u64(0);
        let _ = BarabasiAlbert::new().nodes(4).attachments(4).generate(rng);
    }

    #[test]
    fn seed_core_is_clique() {
        let rng = &mut Pcg64Mcg::seed_from_u64(1);

        for m in 1..8 {
            let edges = BarabasiAlbert::new()
                .nodes(m + 1)
                .attachments(m)
                .generate(rng);

            let core = (0..m).tuple_combinations().map(|(u, v)| Edge(u, v)).collect_vec();
            assert_eq!(edges[..core.len()], core[..]);

            // the only new node attaches to every core node
            let grown = edges[core.len()..].iter().map(|e| e.1).sorted().collect_vec();
            assert_eq!(grown, (0..m).collect_vec());
        }
    }

    #[test]
    fn edge_counts_and_growth() {
        let rng = &mut Pcg64Mcg::seed_from_u64(2);

        for m in [1, 2, 3, 10] {
            for n in [m + 1, m + 5, 100, 1000] {
                let generator = BarabasiAlbert::new().nodes(n).attachments(m);
                let stream = BarabasiAlbertGenerator::new(rng, n, m);
                assert_eq!(stream.len() as NumEdges, generator.number_of_edges());

                let edges = stream.collect_vec();
                assert_eq!(edges.len() as NumEdges, generator.number_of_edges());

                let core_edges = (m * (m - 1) / 2) as usize;
                for (i, chunk) in edges[core_edges..].chunks(m as usize).enumerate() {
                    let k = m + i as Node;
                    assert_eq!(chunk.len(), m as usize);
                    assert!(chunk.iter().all(|&Edge(u, t)| u == k && t < k));
                    assert!(chunk.iter().map(|e| e.1).all_unique());
                }
            }
        }
    }

    #[test]
    fn graphs_are_simple_and_connected() {
        let rng = &mut Pcg64Mcg::seed_from_u64(3);

        for m in [1, 2, 5] {
            for n in [m + 1, 50, 500] {
                let edges = BarabasiAlbert::new().nodes(n).attachments(m).generate(rng);

                // `from_edges` panics on duplicate edges
                let graph = AdjArrayUndir::from_edges(n, edges.iter());
                assert!(graph.vertices().all(|u| !graph.has_self_loop(u)));
                assert!(graph.vertices().all(|u| graph.degree_of(u) >= 1));

                // every node apart from 0 is attached to a smaller node
                for u in 1..n {
                    assert!(graph.neighbors_of(u).any(|v| v < u));
                }
            }
        }
    }

    #[test]
    fn pool_tracks_degrees() {
        let rng = &mut Pcg64Mcg::seed_from_u64(4);
        let (n, m) = (200, 3);

        let mut generator = BarabasiAlbertGenerator::new(rng, n, m);
        let edges = generator.by_ref().collect_vec();
        let graph = AdjArrayUndir::from_distinct_edges(n, edges.into_iter());

        let pool = generator.degree_pool();
        assert_eq!(pool.len() as NumEdges, 2 * graph.number_of_edges());
        for u in graph.vertices() {
            assert_eq!(pool.multiplicity(u), graph.degree_of(u) as usize);
        }
    }

    #[test]
    fn single_attachment_builds_tree() {
        let rng = &mut Pcg64Mcg::seed_from_u64(5);

        for n in [2, 3, 10, 100] {
            let edges = BarabasiAlbert::new().nodes(n).attachments(1).generate(rng);
            assert_eq!(edges.len(), n as usize - 1);
            assert_eq!(edges[0], Edge(1, 0));
            assert!(edges.iter().all(|&Edge(u, v)| v < u));
        }
    }

    #[test]
    fn deterministic_given_seed() {
        let generator = BarabasiAlbert::new().nodes(300).attachments(4);

        let a = generator.generate(&mut Pcg64Mcg::seed_from_u64(42));
        let b = generator.generate(&mut Pcg64Mcg::seed_from_u64(42));
        let c = generator.generate(&mut Pcg64Mcg::seed_from_u64(43));

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn attachment_is_preferential() {
        let rng = &mut Pcg64Mcg::seed_from_u64(6);
        let (n, m) = (2000, 3);

        for _ in 0..5 {
            let graph = AdjArrayUndir::barabasi_albert(rng, n, m).unwrap();

            let avg_degree = 2.0 * graph.number_of_edges() as f64 / n as f64;
            let early_avg = (0..10).map(|u| graph.degree_of(u) as f64).sum::<f64>() / 10.0;
            let late_avg =
                (n - 100..n).map(|u| graph.degree_of(u) as f64).sum::<f64>() / 100.0;

            assert!(early_avg > 4.0 * avg_degree);
            assert!(late_avg < avg_degree);
        }
    }

    #[test]
    fn random_graph_matches_stream() {
        let (n, m) = (120, 4);

        let edges = BarabasiAlbert::new()
            .nodes(n)
            .attachments(m)
            .generate(&mut Pcg64Mcg::seed_from_u64(9));
        let expected = AdjArrayUndir::from_edges(n, edges.iter());

        let graph =
            SparseAdjArrayUndir::barabasi_albert(&mut Pcg64Mcg::seed_from_u64(9), n, m).unwrap();

        for u in graph.vertices() {
            assert_eq!(graph.as_neighbors_slice(u), expected.as_neighbors_slice(u));
        }
    }
}
