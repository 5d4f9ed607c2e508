use super::*;

/// Spanning trees derived from a breadth-first traversal
pub trait SpanningTree: AdjacencyList + Sized {
    /// Returns the edges `(parent, child)` of the BFS tree rooted at `root` in the order
    /// in which the children were discovered.
    ///
    /// The tree spans the connected component of `root`, i.e. there are exactly
    /// `reached - 1` edges.
    ///
    /// # Errors
    /// Returns [`InvalidParameter::RootOutOfRange`] if `root` is not a node of the graph.
    ///
    /// # Examples
    /// ```
    /// use scalefree::{prelude::*, algo::*};
    ///
    /// let g = AdjArrayUndir::from_edges(4, [Edge(0, 1), Edge(1, 2), Edge(2, 0), Edge(2, 3)].into_iter());
    /// let tree = g.bfs_spanning_tree(0).unwrap();
    ///
    /// assert_eq!(tree, vec![Edge(0, 1), Edge(0, 2), Edge(2, 3)]);
    /// ```
    fn bfs_spanning_tree(&self, root: Node) -> Result<Vec<Edge>>;
}

impl<G> SpanningTree for G
where
    G: AdjacencyList + Sized,
{
    fn bfs_spanning_tree(&self, root: Node) -> Result<Vec<Edge>> {
        if root >= self.number_of_nodes() {
            return Err(InvalidParameter::RootOutOfRange {
                root,
                nodes: self.number_of_nodes(),
            }
            .into());
        }

        Ok(self
            .bfs_with_predecessor(root)
            .filter_map(|item| {
                let (pred, u) = item.predecessor_with_item();
                pred.map(|p| Edge(p, u))
            })
            .collect())
    }
}
