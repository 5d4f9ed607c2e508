use super::*;

/// Configurable PageRank computation via power iteration.
///
/// Every undirected edge is followed in both directions. The probability mass of nodes
/// without neighbors (dangling nodes) is redistributed uniformly over all nodes, so the
/// resulting scores always sum to `1`.
///
/// # Examples
/// ```
/// use scalefree::{prelude::*, algo::*};
///
/// let g = AdjArrayUndir::from_edges(3, [Edge(0, 1), Edge(0, 2)].into_iter());
/// let scores = PageRank::new().damping(0.85).compute(&g).unwrap();
///
/// assert!(scores[0] > scores[1]);
/// assert!((scores.iter().sum::<f64>() - 1.0).abs() < 1e-9);
/// ```
#[derive(Debug, Copy, Clone)]
pub struct PageRank {
    damping: f64,
    tolerance: f64,
    max_iterations: usize,
}

impl Default for PageRank {
    fn default() -> Self {
        Self {
            damping: 0.85,
            tolerance: 1e-10,
            max_iterations: 100,
        }
    }
}

impl PageRank {
    /// Creates a new configuration with damping `0.85`, tolerance `1e-10` and at most `100` iterations
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the probability of following an edge instead of teleporting
    pub fn set_damping(&mut self, damping: f64) {
        self.damping = damping;
    }

    /// Sets the probability of following an edge instead of teleporting
    pub fn damping(mut self, damping: f64) -> Self {
        self.set_damping(damping);
        self
    }

    /// Sets the L1-change between two iterations below which the computation stops
    pub fn set_tolerance(&mut self, tolerance: f64) {
        self.tolerance = tolerance;
    }

    /// Sets the L1-change between two iterations below which the computation stops
    pub fn tolerance(mut self, tolerance: f64) -> Self {
        self.set_tolerance(tolerance);
        self
    }

    /// Sets the maximum number of power iterations
    pub fn set_max_iterations(&mut self, max_iterations: usize) {
        self.max_iterations = max_iterations;
    }

    /// Sets the maximum number of power iterations
    pub fn max_iterations(mut self, max_iterations: usize) -> Self {
        self.set_max_iterations(max_iterations);
        self
    }

    /// Computes the score of every node of `graph`.
    ///
    /// # Errors
    /// Returns [`InvalidParameter::InvalidDamping`] if the damping factor is not in `[0, 1]`.
    pub fn compute<G>(&self, graph: &G) -> Result<Vec<f64>>
    where
        G: AdjacencyList,
    {
        if !self.damping.is_valid_probility() {
            return Err(InvalidParameter::InvalidDamping(self.damping).into());
        }

        Ok(self.power_iteration(graph))
    }

    /// Runs the power iteration with an already validated damping factor
    fn power_iteration<G>(&self, graph: &G) -> Vec<f64>
    where
        G: AdjacencyList,
    {
        let n = graph.len();
        if n == 0 {
            return Vec::new();
        }

        let uniform = 1.0 / n as f64;
        let mut scores = vec![uniform; n];
        let mut next = vec![0.0; n];

        for _ in 0..self.max_iterations {
            let dangling: f64 = graph
                .vertices()
                .filter(|&u| graph.degree_of(u) == 0)
                .map(|u| scores[u as usize])
                .sum();

            next.fill((1.0 - self.damping) * uniform + self.damping * dangling * uniform);

            for u in graph.vertices() {
                let degree = graph.degree_of(u);
                if degree == 0 {
                    continue;
                }

                let share = self.damping * scores[u as usize] / degree as f64;
                for v in graph.neighbors_of(u) {
                    next[v as usize] += share;
                }
            }

            let delta: f64 = scores.iter().zip(&next).map(|(a, b)| (a - b).abs()).sum();
            std::mem::swap(&mut scores, &mut next);

            if delta < self.tolerance {
                break;
            }
        }

        // compensate for accumulated rounding errors
        let total: f64 = scores.iter().sum();
        scores.iter_mut().for_each(|s| *s /= total);

        scores
    }
}

/// Shorthand for PageRank with the default configuration
pub trait PageRankScores: AdjacencyList {
    /// Computes PageRank scores with damping `0.85`, see [`PageRank`].
    fn pagerank(&self) -> Vec<f64> {
        PageRank::new().power_iteration(self)
    }
}

impl<G> PageRankScores for G where G: AdjacencyList {}
