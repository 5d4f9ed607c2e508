/*!
Breadth-first traversal and traversal-derived structures.

This module provides:
- A generic lazy traversal iterator ([`TraversalSearch`]) with and without predecessor tracking
  and with a pluggable visited-set.
- [`TraversalTree`] to turn a traversal into parent- and depth-arrays.
- [`TraversalResult`], the complete outcome of a BFS from a root: visitation order, distances
  and parents.
- A high-level [`Traversal`] trait that exposes these directly as methods on graphs.

All traversals are iterative; the frontier lives on the heap so arbitrarily deep graphs are fine.
*/

use super::*;
use serde::ser::{Serialize, SerializeStruct, Serializer};
use std::{collections::VecDeque, marker::PhantomData};

/// Abstraction for items yielded by a traversal iterator.
///
/// A `SequencedItem` encodes both the **node currently visited**
/// and an **optional predecessor** that represents its parent
/// in the traversal tree.
///
/// Two implementations are provided:
/// - [`Node`]: stores only the node (no predecessor information).
/// - [`PredecessorOfNode`]: stores `(predecessor, node)` pairs.
pub trait SequencedItem: Clone + Copy {
    /// Constructs a new item with a predecessor.
    fn new_with_predecessor(predecessor: Node, item: Node) -> Self;

    /// Constructs a new item without a predecessor (used for the root).
    fn new_without_predecessor(item: Node) -> Self;

    /// Returns the node represented by this item.
    fn item(&self) -> Node;

    /// Returns the predecessor of this node, if any.
    fn predecessor(&self) -> Option<Node>;

    /// Returns a pair `(predecessor, item)` where the predecessor
    /// may be `None` if not tracked.
    fn predecessor_with_item(&self) -> (Option<Node>, Node) {
        (self.predecessor(), self.item())
    }
}

impl SequencedItem for Node {
    fn new_with_predecessor(_: Node, item: Node) -> Self {
        item
    }
    fn new_without_predecessor(item: Node) -> Self {
        item
    }
    fn item(&self) -> Node {
        *self
    }
    fn predecessor(&self) -> Option<Node> {
        None
    }
}

/// Compact representation of `(predecessor, node)` used for
/// traversals with parent tracking.
///
/// Internally, the absence of a predecessor is encoded by
/// setting both tuple entries to the same node value.
/// As the graphs are free of self-loops, no real tree edge looks like this.
pub type PredecessorOfNode = (Node, Node);
impl SequencedItem for PredecessorOfNode {
    fn new_with_predecessor(predecessor: Node, item: Node) -> Self {
        (predecessor, item)
    }
    fn new_without_predecessor(item: Node) -> Self {
        (item, item)
    }

    fn item(&self) -> Node {
        self.1
    }

    fn predecessor(&self) -> Option<Node> {
        if self.0 == self.1 { None } else { Some(self.0) }
    }
}

/// Abstraction for the traversal frontier data structure.
///
/// A `NodeSequencer` stores the discovered but not yet expanded nodes.
/// The implementation determines the traversal order; [`VecDeque`] gives
/// queue semantics and therefore **BFS**.
pub trait NodeSequencer<T> {
    /// Creates a new sequencer initialized with a single node.
    fn init(u: T) -> Self;

    /// Pushes a node into the frontier.
    fn push(&mut self, item: T);

    /// Removes and returns the next node from the frontier.
    fn pop(&mut self) -> Option<T>;

    /// Returns the number of items currently in the frontier.
    fn cardinality(&self) -> usize;
}

impl<T> NodeSequencer<T> for VecDeque<T> {
    fn init(u: T) -> Self {
        let mut queue = Self::new();
        queue.push_back(u);
        queue
    }
    fn push(&mut self, u: T) {
        self.push_back(u)
    }
    fn pop(&mut self) -> Option<T> {
        self.pop_front()
    }
    fn cardinality(&self) -> usize {
        self.len()
    }
}

/// Generic traversal iterator.
///
/// Maintains an explicit frontier of nodes to visit, a set of visited
/// nodes, and optionally records predecessor information.
/// Parameterized by the container type for the frontier, the type of
/// items yielded (either `Node` or `PredecessorOfNode`) and the visited-set.
///
/// Nodes are marked visited when they are discovered, so every node is
/// yielded at most once. Neighbors are discovered in adjacency order.
pub struct TraversalSearch<'a, G, S, I, V>
where
    G: AdjacencyList,
    S: NodeSequencer<I>,
    I: SequencedItem,
    V: Set<Node>,
{
    graph: &'a G,
    visited: V,
    sequencer: S,
    _item: PhantomData<I>,
}

/// Type alias for a **breadth-first search** iterator with a custom visited-set.
pub type BFSWithSet<'a, G, V> = TraversalSearch<'a, G, VecDeque<Node>, Node, V>;

/// A BFS traversal iterator over the graph, visiting nodes in
/// breadth-first order from a given starting node.
pub type BFS<'a, G> = TraversalSearch<'a, G, VecDeque<Node>, Node, NodeBitSet>;

/// A BFS traversal iterator that records predecessor information,
/// producing a spanning tree of the search.
pub type BFSWithPredecessor<'a, G> =
    TraversalSearch<'a, G, VecDeque<PredecessorOfNode>, PredecessorOfNode, NodeBitSet>;

impl<G, S, I, V> WithGraphRef<G> for TraversalSearch<'_, G, S, I, V>
where
    G: AdjacencyList,
    S: NodeSequencer<I>,
    I: SequencedItem,
    V: Set<Node>,
{
    fn graph_ref(&self) -> &G {
        self.graph
    }
}

impl<G, S, I, V> Iterator for TraversalSearch<'_, G, S, I, V>
where
    G: AdjacencyList,
    S: NodeSequencer<I>,
    I: SequencedItem,
    V: Set<Node>,
{
    type Item = I;

    fn next(&mut self) -> Option<Self::Item> {
        let popped = self.sequencer.pop()?;
        let u = popped.item();

        for v in self.graph.neighbors_of(u) {
            if !self.visited.insert(v) {
                self.sequencer.push(I::new_with_predecessor(u, v));
            }
        }

        Some(popped)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (
            self.sequencer.cardinality(),
            Some(self.sequencer.cardinality() + self.graph.len() - self.visited.len()),
        )
    }
}

impl<'a, G, S, I, V> TraversalSearch<'a, G, S, I, V>
where
    G: AdjacencyList,
    S: NodeSequencer<I>,
    I: SequencedItem,
    V: Set<Node> + FromCapacity,
{
    /// Creates a new traversal iterator starting from `start`.
    ///
    /// # Panics
    /// If `start` is not a node of `graph`.
    pub fn new(graph: &'a G, start: Node) -> Self {
        assert!(start < graph.number_of_nodes());

        let len = graph.len();
        let mut visited = V::from_total_used_capacity(len, len);
        visited.insert(start);
        Self {
            graph,
            visited,
            sequencer: S::init(I::new_without_predecessor(start)),
            _item: PhantomData,
        }
    }
}

impl<G, S, I, V> TraversalSearch<'_, G, S, I, V>
where
    G: AdjacencyList,
    S: NodeSequencer<I>,
    I: SequencedItem,
    V: Set<Node>,
{
    /// Returns *true* if `u` was already discovered.
    pub fn did_visit_node(&self, u: Node) -> bool {
        self.visited.contains(&u)
    }

    /// Returns the number of discovered nodes so far.
    pub fn num_visited(&self) -> usize {
        self.visited.len()
    }
}

/// Extension trait for traversal iterators that return `PredecessorOfNode`,
/// enabling extraction of the implied spanning tree structure (parents, depths).
pub trait TraversalTree<'a, G>:
    WithGraphRef<G> + Iterator<Item = PredecessorOfNode> + Sized
where
    G: 'a + AdjacencyList,
{
    /// Consumes the iterator and records the parent of each node in the implied
    /// traversal tree into the provided slice `tree`.
    ///
    /// - For each visited non-root node `v`, `tree[v]` is set to its predecessor.
    /// - All other entries remain unchanged.
    ///
    /// # Requirements
    /// - `tree.len()` must be at least `graph.len()`.
    fn parent_array_into(&mut self, tree: &mut [Option<OptionalNode>]) {
        for pred_with_item in self.by_ref() {
            if let Some(p) = pred_with_item.predecessor() {
                tree[pred_with_item.item() as usize] = OptionalNode::new(p);
            }
        }
    }

    /// Constructs a fresh parent array of size `graph.len()` in which the root
    /// and all unreached nodes have no parent.
    ///
    /// # Examples
    /// ```
    /// use scalefree::{prelude::*, algo::*};
    ///
    /// let g = AdjArrayUndir::from_edges(3, [Edge(0, 1), Edge(1, 2)].into_iter());
    ///
    /// let parents: Vec<_> = g
    ///     .bfs_with_predecessor(0)
    ///     .parent_array()
    ///     .into_iter()
    ///     .map(signed_or_sentinel)
    ///     .collect();
    /// assert_eq!(parents, vec![-1, 0, 1]);
    /// ```
    fn parent_array(&mut self) -> Vec<Option<OptionalNode>> {
        let mut tree = vec![None; self.graph_ref().len()];
        self.parent_array_into(&mut tree);
        tree
    }

    /// Consumes the iterator and computes the depth of each visited node in
    /// the traversal tree (root depth = 0).
    ///
    /// - For each visited node `v`, `depths[v]` is set accordingly.
    /// - Unvisited entries remain unchanged.
    ///
    /// # Requirements
    /// - `depths.len()` must be at least `graph.len()`.
    fn depths_into(&mut self, depths: &mut [Option<OptionalNode>]) {
        for pred_with_item in self.by_ref() {
            let depth = pred_with_item
                .predecessor()
                .and_then(|p| depths[p as usize])
                .map_or(0, |d| d.get() + 1);
            depths[pred_with_item.item() as usize] = OptionalNode::new(depth);
        }
    }

    /// Constructs a fresh depth array of size `graph.len()` in which unreached
    /// nodes have no depth.
    ///
    /// # Examples
    /// ```
    /// use scalefree::{prelude::*, algo::*};
    ///
    /// let g = AdjArrayUndir::from_edges(4, [Edge(0, 1), Edge(1, 2)].into_iter());
    ///
    /// let depths: Vec<_> = g
    ///     .bfs_with_predecessor(0)
    ///     .depths()
    ///     .into_iter()
    ///     .map(signed_or_sentinel)
    ///     .collect();
    /// assert_eq!(depths, vec![0, 1, 2, -1]);
    /// ```
    fn depths(&mut self) -> Vec<Option<OptionalNode>> {
        let mut depths = vec![None; self.graph_ref().len()];
        self.depths_into(&mut depths);
        depths
    }
}

impl<'a, G, S, V> TraversalTree<'a, G> for TraversalSearch<'a, G, S, PredecessorOfNode, V>
where
    G: AdjacencyList,
    S: NodeSequencer<PredecessorOfNode>,
    V: Set<Node>,
{
}

/// Outcome of a breadth-first search from a single root.
///
/// `dist` and `parent` are indexed by node; `order` lists the reached nodes
/// in the order they were first visited.
/// Unreached nodes have neither a distance nor a parent, the root has no parent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraversalResult {
    /// Reached nodes in visitation order, starting with the root
    pub order: Vec<Node>,
    /// Distance from the root for every node
    pub dist: Vec<Option<OptionalNode>>,
    /// Predecessor in the BFS tree for every node
    pub parent: Vec<Option<OptionalNode>>,
}

impl TraversalResult {
    /// A result for `n` nodes in which no node was reached yet
    fn unreached(n: NumNodes) -> Self {
        Self {
            order: Vec::with_capacity(n as usize),
            dist: vec![None; n as usize],
            parent: vec![None; n as usize],
        }
    }

    /// Returns the distance of `u` from the root or `None` if `u` was not reached.
    pub fn distance_of(&self, u: Node) -> Option<Node> {
        self.dist[u as usize].map(|d| d.get())
    }

    /// Returns the parent of `u` in the BFS tree or `None` if `u` is the root or was not reached.
    pub fn parent_of(&self, u: Node) -> Option<Node> {
        self.parent[u as usize].map(|p| p.get())
    }

    /// Returns the number of reached nodes
    pub fn num_reached(&self) -> NumNodes {
        self.order.len() as NumNodes
    }

    /// Returns *true* if every node of the graph was reached
    pub fn is_spanning(&self) -> bool {
        self.order.len() == self.dist.len()
    }

    /// Distances as signed integers with `-1` for unreached nodes
    pub fn signed_dist(&self) -> Vec<i64> {
        self.dist.iter().copied().map(signed_or_sentinel).collect()
    }

    /// Parents as signed integers with `-1` for the root and unreached nodes
    pub fn signed_parents(&self) -> Vec<i64> {
        self.parent.iter().copied().map(signed_or_sentinel).collect()
    }
}

impl Serialize for TraversalResult {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("TraversalResult", 3)?;
        state.serialize_field("order", &self.order)?;
        state.serialize_field("dist", &self.signed_dist())?;
        state.serialize_field("parents", &self.signed_parents())?;
        state.end()
    }
}

/// Provides convenient traversal methods
pub trait Traversal: AdjacencyList + Sized {
    /// Returns an iterator that traverses nodes reachable from `start`
    /// in **breadth-first search (BFS) order**.
    ///
    /// # Examples
    /// ```
    /// use scalefree::{prelude::*, algo::*};
    ///
    /// let g = AdjArrayUndir::from_edges(2, [Edge(0, 1)].into_iter());
    ///
    /// let order: Vec<_> = g.bfs(0).collect();
    /// assert_eq!(order, vec![0, 1]);
    /// ```
    fn bfs(&self, start: Node) -> BFS<'_, Self> {
        BFS::new(self, start)
    }

    /// Like [`Traversal::bfs`] but tracks visited nodes in a set of type `S`,
    /// e.g. an `FxHashSet<Node>` if only a small part of the graph is expected to be reached.
    fn bfs_with_set<S>(&self, start: Node) -> BFSWithSet<'_, Self, S>
    where
        S: Set<Node> + FromCapacity,
    {
        BFSWithSet::new(self, start)
    }

    /// Returns a BFS iterator starting from `start` that additionally
    /// yields the predecessor relation (edges traversed).
    ///
    /// # Examples
    /// ```
    /// use scalefree::{prelude::*, algo::*};
    ///
    /// let g = AdjArrayUndir::from_edges(2, [Edge(0, 1)].into_iter());
    ///
    /// let mut it = g.bfs_with_predecessor(0);
    /// assert_eq!(it.next().unwrap().item(), 0);
    /// assert_eq!(it.next().unwrap().predecessor(), Some(0));
    /// ```
    fn bfs_with_predecessor(&self, start: Node) -> BFSWithPredecessor<'_, Self> {
        BFSWithPredecessor::new(self, start)
    }

    /// Runs a complete BFS from `root` and returns visitation order, distances and parents.
    ///
    /// Neighbors are visited in adjacency order, which breaks ties between nodes of
    /// equal distance. Runs in time `O(n + m)`.
    ///
    /// # Errors
    /// Returns [`InvalidParameter::RootOutOfRange`] if `root` is not a node of the graph.
    ///
    /// # Examples
    /// ```
    /// use scalefree::{prelude::*, algo::*};
    ///
    /// let g = AdjArrayUndir::from_edges(4, [Edge(0, 1), Edge(1, 2)].into_iter());
    /// let result = g.bfs_tree(0).unwrap();
    ///
    /// assert_eq!(result.order, vec![0, 1, 2]);
    /// assert_eq!(result.signed_dist(), vec![0, 1, 2, -1]);
    /// assert_eq!(result.signed_parents(), vec![-1, 0, 1, -1]);
    /// ```
    fn bfs_tree(&self, root: Node) -> Result<TraversalResult> {
        if root >= self.number_of_nodes() {
            return Err(InvalidParameter::RootOutOfRange {
                root,
                nodes: self.number_of_nodes(),
            }
            .into());
        }

        let mut result = TraversalResult::unreached(self.number_of_nodes());
        for item in self.bfs_with_predecessor(root) {
            let (pred, u) = item.predecessor_with_item();

            // a predecessor is always dequeued, and thus reached, before its children
            let depth = pred
                .and_then(|p| result.distance_of(p))
                .map_or(0, |d| d + 1);

            result.order.push(u);
            result.dist[u as usize] = OptionalNode::new(depth);
            result.parent[u as usize] = pred.and_then(OptionalNode::new);
        }

        Ok(result)
    }
}

impl<G> Traversal for G where G: AdjacencyList + Sized {}

#[cfg(test)]
pub mod tests {
    use super::*;
    use crate::{error::GraphError, gens::*};
    use fxhash::FxHashSet;
    use itertools::Itertools;
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg64Mcg;

    //  / 2 --- \
    // 1         4 - 3
    //  \ 0 - 5 /
    fn sample_graph() -> AdjArrayUndir {
        AdjArrayUndir::from_edges(
            6,
            [
                Edge(1, 2),
                Edge(1, 0),
                Edge(4, 3),
                Edge(0, 5),
                Edge(2, 4),
                Edge(5, 4),
            ]
            .into_iter(),
        )
    }

    #[test]
    fn bfs_order() {
        let graph = sample_graph();

        {
            let order: Vec<Node> = graph.bfs(1).collect();
            assert_eq!(order, [1, 2, 0, 4, 5, 3]);
        }

        {
            let order: Vec<Node> = BFS::new(&graph, 5).collect();
            assert_eq!(order, [5, 0, 4, 1, 3, 2]);
        }

        {
            let order: Vec<Node> = graph.bfs_with_set::<FxHashSet<Node>>(1).collect();
            assert_eq!(order, [1, 2, 0, 4, 5, 3]);
        }
    }

    #[test]
    fn bfs_with_predecessor() {
        let graph = sample_graph();

        let mut edges: Vec<_> = graph
            .bfs_with_predecessor(1)
            .map(|x| x.predecessor_with_item())
            .collect();
        edges.sort();
        assert_eq!(
            edges,
            vec![
                (None, 1),
                (Some(0), 5),
                (Some(1), 0),
                (Some(1), 2),
                (Some(2), 4),
                (Some(4), 3)
            ]
        );
    }

    #[test]
    fn visited_tracking() {
        let graph = sample_graph();
        let mut bfs = graph.bfs(1);

        assert!(bfs.did_visit_node(1));
        assert!(!bfs.did_visit_node(0));

        bfs.next();
        assert!(bfs.did_visit_node(0) && bfs.did_visit_node(2));
        assert_eq!(bfs.num_visited(), 3);
    }

    #[test]
    fn tree_arrays() {
        let graph = sample_graph();

        let tree = graph.bfs_with_predecessor(1).parent_array();
        assert_eq!(
            tree.into_iter().map(signed_or_sentinel).collect_vec(),
            vec![1, -1, 1, 4, 2, 0]
        );

        let depths = graph.bfs_with_predecessor(1).depths();
        assert_eq!(
            depths.into_iter().map(signed_or_sentinel).collect_vec(),
            vec![1, 0, 1, 3, 2, 2]
        );
    }

    #[test]
    fn bfs_tree_connected() {
        let graph = sample_graph();
        let result = graph.bfs_tree(1).unwrap();

        assert_eq!(result.order, vec![1, 2, 0, 4, 5, 3]);
        assert_eq!(result.signed_dist(), vec![1, 0, 1, 3, 2, 2]);
        assert_eq!(result.signed_parents(), vec![1, -1, 1, 4, 2, 0]);
        assert!(result.is_spanning());
        assert_eq!(result.parent_of(1), None);
        assert_eq!(result.parent_of(3), Some(4));
        assert_eq!(result.distance_of(3), Some(3));
    }

    #[test]
    fn bfs_tree_disconnected() {
        let graph = AdjArrayUndir::from_edges(
            6,
            [Edge(0, 1), Edge(1, 2), Edge(3, 4)].into_iter(),
        );
        let result = graph.bfs_tree(0).unwrap();

        assert_eq!(result.order, vec![0, 1, 2]);
        assert_eq!(result.num_reached(), 3);
        assert!(!result.is_spanning());
        assert_eq!(result.signed_dist(), vec![0, 1, 2, -1, -1, -1]);
        assert_eq!(result.signed_parents(), vec![-1, 0, 1, -1, -1, -1]);

        // singleton root
        let result = graph.bfs_tree(5).unwrap();
        assert_eq!(result.order, vec![5]);
        assert_eq!(result.distance_of(5), Some(0));
        assert_eq!(result.parent_of(5), None);
    }

    #[test]
    fn bfs_tree_rejects_invalid_root() {
        let graph = sample_graph();
        assert_eq!(
            graph.bfs_tree(6),
            Err(GraphError::InvalidParameter(
                InvalidParameter::RootOutOfRange { root: 6, nodes: 6 }
            ))
        );

        let empty = AdjArrayUndir::new(0);
        assert!(empty.bfs_tree(0).is_err());
    }

    #[test]
    fn serialize_result() {
        let graph = AdjArrayUndir::from_edges(4, [Edge(0, 1), Edge(0, 2)].into_iter());
        let json = serde_json::to_value(graph.bfs_tree(0).unwrap()).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "order": [0, 1, 2],
                "dist": [0, 1, 1, -1],
                "parents": [-1, 0, 0, -1],
            })
        );
    }

    fn assert_bfs_invariants<G: AdjacencyList>(graph: &G, result: &TraversalResult, root: Node) {
        let n = graph.number_of_nodes();
        assert_eq!(result.order.len(), n as usize);
        assert_eq!(result.order[0], root);
        assert_eq!(result.distance_of(root), Some(0));
        assert_eq!(result.parent_of(root), None);
        assert!(result.order.iter().all_unique());

        let mut position = vec![0; n as usize];
        for (i, &u) in result.order.iter().enumerate() {
            position[u as usize] = i;
        }

        for &v in &result.order[1..] {
            let u = result.parent_of(v).unwrap();
            assert_eq!(result.distance_of(v), Some(result.distance_of(u).unwrap() + 1));
            assert!(position[u as usize] < position[v as usize]);
            assert!(graph.neighbors_of(u).any(|w| w == v));
        }

        // distances are non-decreasing along the visitation order
        assert!(
            result
                .order
                .iter()
                .tuple_windows()
                .all(|(&a, &b)| result.distance_of(a) <= result.distance_of(b))
        );

        // BFS distances differ by at most one along every edge
        for Edge(u, v) in graph.edges(true) {
            let (du, dv) = (result.distance_of(u).unwrap(), result.distance_of(v).unwrap());
            assert!(du.abs_diff(dv) <= 1);
        }
    }

    #[test]
    fn barabasi_albert_invariants() {
        let rng = &mut Pcg64Mcg::seed_from_u64(0x5eed);

        for (n, m) in [(2, 1), (4, 1), (4, 2), (4, 3), (50, 1), (50, 5), (1000, 10)] {
            for _ in 0..5 {
                let graph = AdjArrayUndir::barabasi_albert(rng, n, m).unwrap();
                let root = rng.random_range(0..n);
                let result = graph.bfs_tree(root).unwrap();
                assert_bfs_invariants(&graph, &result, root);
            }
        }
    }

    #[test]
    fn small_scenarios() {
        for seed in 0..50 {
            let rng = &mut Pcg64Mcg::seed_from_u64(seed);

            let graph = AdjArrayUndir::barabasi_albert(rng, 4, 2).unwrap();
            let result = graph.bfs_tree(0).unwrap();
            assert_eq!(result.order[0], 0);
            assert_eq!((result.signed_dist()[0], result.signed_parents()[0]), (0, -1));
            assert!((1..4).all(|u| matches!(result.distance_of(u), Some(1 | 2))));

            let graph = AdjArrayUndir::barabasi_albert(rng, 4, 1).unwrap();
            let result = graph.bfs_tree(0).unwrap();
            assert_eq!(result.order[0], 0);
            assert_eq!((result.signed_dist()[0], result.signed_parents()[0]), (0, -1));
            assert!((1..4).all(|u| matches!(result.distance_of(u), Some(1..=3))));
        }
    }

    #[test]
    fn deterministic_given_seed() {
        let run = |seed| {
            let rng = &mut Pcg64Mcg::seed_from_u64(seed);
            let graph = SparseAdjArrayUndir::barabasi_albert(rng, 500, 3).unwrap();
            graph.bfs_tree(0).unwrap()
        };

        assert_eq!(run(11), run(11));
        assert_ne!(run(11).order, run(12).order);
    }
}
