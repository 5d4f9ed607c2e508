/// Every undirected graph representation should pass the same construction, adjacency and editing
/// tests. `test_graph_ops!(module_name, GraphType)` stamps them into a test module.
macro_rules! test_graph_ops {
    ($env:ident, $graph:ident) => {
        #[cfg(test)]
        mod $env {
            use crate::prelude::*;
            use itertools::Itertools;
            use rand::{Rng, SeedableRng};
            use rand_pcg::Pcg64Mcg;

            /// Creates a list of at most `m_ub` random normalized edges without loops for nodes `0..n`
            fn random_edges<R: Rng>(rng: &mut R, n: NumNodes, m_ub: NumEdges) -> Vec<Edge> {
                let mut edges: Vec<Edge> = (0..m_ub)
                    .map(|_| Edge(rng.random_range(0..n), rng.random_range(0..n)).normalized())
                    .filter(|e| !e.is_loop())
                    .collect_vec();
                edges.sort_unstable();
                edges.dedup();

                edges
            }

            #[test]
            fn graph_new() {
                for n in 1..50 {
                    let graph = <$graph>::new(n);

                    assert_eq!(graph.number_of_edges(), 0);
                    assert_eq!(graph.number_of_nodes(), n);
                    assert!(graph.is_singleton_graph());

                    assert_eq!(graph.vertices_range().len(), n as usize);
                    assert_eq!(graph.vertices().collect_vec(), (0..n).collect_vec());
                }
            }

            #[test]
            fn adjacency_list() {
                let rng = &mut Pcg64Mcg::seed_from_u64(3);

                for n in [10 as NumNodes, 20, 50] {
                    for m_ub in [n * 2, n * 5, n * 10] {
                        for _ in 0..10 {
                            let edges = random_edges(rng, n, m_ub as NumEdges);

                            let mut adj_matrix = vec![NodeBitSet::repeat(false, n as usize); n as usize];
                            for &Edge(u, v) in &edges {
                                adj_matrix[u as usize].set(v as usize, true);
                                adj_matrix[v as usize].set(u as usize, true);
                            }

                            let graph = <$graph>::from_edges(n, edges.iter());

                            assert_eq!(graph.number_of_nodes(), n);
                            assert_eq!(graph.number_of_edges(), edges.len() as NumEdges);
                            assert_eq!(edges, graph.ordered_edges(true).collect_vec());

                            for u in 0..n {
                                let row = &adj_matrix[u as usize];
                                assert_eq!(graph.degree_of(u) as usize, row.count_ones());
                                for v in graph.neighbors_of(u) {
                                    assert!(row[v as usize]);
                                    assert!(graph.has_edge(u, v));
                                    assert!(graph.has_edge(v, u));
                                }
                            }

                            let distribution = graph.degree_distribution();
                            assert!(distribution.iter().tuple_windows().all(|(a, b)| a.0 < b.0));
                            assert_eq!(distribution.iter().map(|&(_, c)| c).sum::<NumNodes>(), n);
                            for &(d, c) in &distribution {
                                assert_eq!(graph.degrees().filter(|&x| x == d).count() as NumNodes, c);
                            }
                        }
                    }
                }
            }

            #[test]
            fn graph_edge_editing() {
                let rng = &mut Pcg64Mcg::seed_from_u64(4);

                for n in [10 as NumNodes, 20, 50] {
                    let mut graph = <$graph>::new(n);
                    let edges = random_edges(rng, n, (n * 3) as NumEdges);

                    for &Edge(u, v) in &edges {
                        assert!(!graph.try_add_edge(u, v));
                        assert!(graph.try_add_edge(v, u));
                    }
                    assert_eq!(graph.number_of_edges(), edges.len() as NumEdges);

                    let unchecked = <$graph>::from_distinct_edges(n, edges.iter());
                    assert_eq!(
                        graph.ordered_edges(false).collect_vec(),
                        unchecked.ordered_edges(false).collect_vec()
                    );

                    let degree_sum: u64 = graph.degrees().map(|d| d as u64).sum();
                    assert_eq!(degree_sum, 2 * graph.number_of_edges());
                    assert!(graph.vertices().all(|u| !graph.has_self_loop(u)));
                }
            }
        }
    };
}

pub(crate) use test_graph_ops;
