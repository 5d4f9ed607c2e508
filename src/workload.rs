/*!
# Benchmark Workloads

A workload is one complete request: grow a Barabási–Albert graph of the requested size and run a
single algorithm on it. Every call to [`run_workload`] performs its own full build-and-compute
cycle with a private random generator, so workloads can run on any number of threads in parallel
without sharing state.

Requests use the shape `{"size": 1000, "seed": 42}`; all other fields are optional.

```
use scalefree::workload::*;

let config: WorkloadConfig = serde_json::from_str(r#"{"size": 200, "seed": 42}"#).unwrap();
let report = run_workload(&config).unwrap();

match &report.result {
    WorkloadResult::Bfs(result) => assert_eq!(result.order.len(), 200),
    _ => unreachable!(),
}
assert_eq!(report.seed, 42);
```
*/

use std::time::{Duration, Instant};

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64Mcg;
use serde::{
    Deserialize, Serialize,
    ser::{SerializeStruct, Serializer},
};
use tracing::{debug, info, info_span};

use crate::{
    algo::*,
    error::*,
    gens::{BarabasiAlbert, GraphGenerator, NumNodesGen, RandomGraph},
    prelude::*,
    repr::digest::GraphDigest,
};

/// Number of edges every new node attaches with unless configured otherwise
pub const DEFAULT_ATTACHMENTS: NumNodes = 10;

/// The algorithm run on the generated graph
#[derive(
    Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum WorkloadKind {
    /// Breadth-first search: visitation order, distances and parents
    #[default]
    Bfs,
    /// Edges of the BFS spanning tree
    SpanningTree,
    /// PageRank score of every node
    PageRank,
}

/// Parameters of a single workload request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkloadConfig {
    /// Number of nodes of the generated graph
    pub size: NumNodes,
    /// Seed of the random generator; fresh entropy is used if absent.
    /// Any integer is accepted, negative seeds are reinterpreted bitwise.
    #[serde(default)]
    pub seed: Option<i64>,
    /// Number of edges every new node attaches with
    #[serde(default = "default_attachments")]
    pub attachments: NumNodes,
    /// Root of the traversal
    #[serde(default)]
    pub root: Node,
    /// Algorithm run on the generated graph
    #[serde(default)]
    pub kind: WorkloadKind,
}

fn default_attachments() -> NumNodes {
    DEFAULT_ATTACHMENTS
}

impl WorkloadConfig {
    /// Creates a BFS workload on `size` nodes with default parameters and no fixed seed
    pub fn new(size: NumNodes) -> Self {
        Self {
            size,
            seed: None,
            attachments: DEFAULT_ATTACHMENTS,
            root: 0,
            kind: WorkloadKind::default(),
        }
    }

    /// Fixes the seed of the random generator
    pub fn seed(mut self, seed: i64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the number of edges every new node attaches with
    pub fn attachments(mut self, m: NumNodes) -> Self {
        self.attachments = m;
        self
    }

    /// Sets the root of the traversal
    pub fn root(mut self, root: Node) -> Self {
        self.root = root;
        self
    }

    /// Sets the algorithm to run
    pub fn kind(mut self, kind: WorkloadKind) -> Self {
        self.kind = kind;
        self
    }

    /// Rejects requests that cannot be served before any work is done
    pub fn validate(&self) -> Result<()> {
        if self.size == 0 {
            return Err(InvalidParameter::EmptyGraph.into());
        }

        BarabasiAlbert::new()
            .nodes(self.size)
            .attachments(self.attachments)
            .validate()?;

        if self.root >= self.size {
            return Err(InvalidParameter::RootOutOfRange {
                root: self.root,
                nodes: self.size,
            }
            .into());
        }

        Ok(())
    }
}

/// Output of the algorithm of a workload
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum WorkloadResult {
    Bfs(TraversalResult),
    SpanningTree(Vec<Edge>),
    PageRank(Vec<f64>),
}

/// Wall-clock time of both phases of a workload in microseconds
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Measurement {
    /// Time spent growing the graph
    pub graph_generating_time: u64,
    /// Time spent running the algorithm
    pub compute_time: u64,
}

/// Everything a single workload produces
#[derive(Debug, Clone, Serialize)]
pub struct WorkloadReport {
    pub result: WorkloadResult,
    pub measurement: Measurement,
    /// The seed actually used; rerunning with it reproduces the workload
    pub seed: i64,
    /// SHA-256 digest of the generated graph
    pub digest: String,
}

fn micros(duration: Duration) -> u64 {
    duration.as_micros().try_into().unwrap_or(u64::MAX)
}

/// Generates a graph and runs the configured algorithm on it.
///
/// # Errors
/// Returns [`InvalidParameter`] if the configuration is rejected by [`WorkloadConfig::validate`].
pub fn run_workload(config: &WorkloadConfig) -> Result<WorkloadReport> {
    config.validate()?;

    let seed = config.seed.unwrap_or_else(|| rand::rng().random());
    let span = info_span!("workload", kind = ?config.kind, size = config.size, seed);
    let _enter = span.enter();

    let rng = &mut Pcg64Mcg::seed_from_u64(seed as u64);

    let begin = Instant::now();
    let graph = AdjArrayUndir::barabasi_albert(rng, config.size, config.attachments)?;
    let graph_generating_time = micros(begin.elapsed());

    debug!(
        edges = graph.number_of_edges(),
        max_degree = graph.max_degree(),
        degree_distribution = ?graph.degree_distribution(),
        graph_generating_time,
        "Generated graph"
    );

    let begin = Instant::now();
    let result = match config.kind {
        WorkloadKind::Bfs => WorkloadResult::Bfs(graph.bfs_tree(config.root)?),
        WorkloadKind::SpanningTree => {
            WorkloadResult::SpanningTree(graph.bfs_spanning_tree(config.root)?)
        }
        WorkloadKind::PageRank => WorkloadResult::PageRank(graph.pagerank()),
    };
    let compute_time = micros(begin.elapsed());

    let digest = graph.digest_sha256();

    info!(graph_generating_time, compute_time, digest = %digest, "Workload complete");

    Ok(WorkloadReport {
        result,
        measurement: Measurement {
            graph_generating_time,
            compute_time,
        },
        seed,
        digest,
    })
}

/// Running minimum, mean and maximum of a series of timings in microseconds
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct TimingStats {
    count: u64,
    total: u64,
    min: u64,
    max: u64,
}

impl Default for TimingStats {
    fn default() -> Self {
        Self {
            count: 0,
            total: 0,
            min: u64::MAX,
            max: 0,
        }
    }
}

impl TimingStats {
    /// Creates an empty series
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a single timing
    pub fn record(&mut self, micros: u64) {
        self.count += 1;
        self.total = self.total.saturating_add(micros);
        self.min = self.min.min(micros);
        self.max = self.max.max(micros);
    }

    /// Combines the timings of two series
    pub fn merge(&self, other: &Self) -> Self {
        Self {
            count: self.count + other.count,
            total: self.total.saturating_add(other.total),
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Number of recorded timings
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Smallest timing or `None` if nothing was recorded
    pub fn min(&self) -> Option<u64> {
        (self.count > 0).then_some(self.min)
    }

    /// Largest timing or `None` if nothing was recorded
    pub fn max(&self) -> Option<u64> {
        (self.count > 0).then_some(self.max)
    }

    /// Average timing or `None` if nothing was recorded
    pub fn mean(&self) -> Option<f64> {
        (self.count > 0).then(|| self.total as f64 / self.count as f64)
    }
}

impl Serialize for TimingStats {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("TimingStats", 4)?;
        state.serialize_field("count", &self.count)?;
        state.serialize_field("min", &self.min())?;
        state.serialize_field("mean", &self.mean())?;
        state.serialize_field("max", &self.max())?;
        state.end()
    }
}

/// Per-phase timings of many workloads.
///
/// Every worker thread keeps its own instance; they are merged once all workers finished.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BenchStats {
    pub graph_generating_time: TimingStats,
    pub compute_time: TimingStats,
}

impl BenchStats {
    /// Creates statistics without any recorded workload
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the timings of one finished workload
    pub fn record(&mut self, measurement: &Measurement) {
        self.graph_generating_time
            .record(measurement.graph_generating_time);
        self.compute_time.record(measurement.compute_time);
    }

    /// Combines the statistics of two workers
    pub fn merge(&self, other: &Self) -> Self {
        Self {
            graph_generating_time: self.graph_generating_time.merge(&other.graph_generating_time),
            compute_time: self.compute_time.merge(&other.compute_time),
        }
    }

    /// Number of recorded workloads
    pub fn jobs(&self) -> u64 {
        self.compute_time.count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_from_request() {
        let config: WorkloadConfig = serde_json::from_str(r#"{"size": 100, "seed": 7}"#).unwrap();
        assert_eq!(config, WorkloadConfig::new(100).seed(7));
        assert_eq!(config.attachments, DEFAULT_ATTACHMENTS);
        assert_eq!(config.kind, WorkloadKind::Bfs);

        let config: WorkloadConfig =
            serde_json::from_str(r#"{"size": 50, "kind": "page-rank", "attachments": 2}"#)
                .unwrap();
        assert_eq!(
            config,
            WorkloadConfig::new(50)
                .kind(WorkloadKind::PageRank)
                .attachments(2)
        );

        let config: WorkloadConfig =
            serde_json::from_str(r#"{"size": 100, "seed": -5}"#).unwrap();
        assert_eq!(config, WorkloadConfig::new(100).seed(-5));

        assert!(serde_json::from_str::<WorkloadConfig>(r#"{"seed": 7}"#).is_err());
        assert!(serde_json::from_str::<WorkloadConfig>(r#"{"size": -3}"#).is_err());
    }

    #[test]
    fn rejects_invalid_configs() {
        assert_eq!(
            WorkloadConfig::new(0).validate(),
            Err(InvalidParameter::EmptyGraph.into())
        );
        assert_eq!(
            WorkloadConfig::new(10).validate(),
            Err(InvalidParameter::TooFewNodes {
                nodes: 10,
                attachments: 10
            }
            .into())
        );
        assert_eq!(
            WorkloadConfig::new(10).attachments(0).validate(),
            Err(InvalidParameter::NoAttachments.into())
        );
        assert_eq!(
            WorkloadConfig::new(20).root(20).validate(),
            Err(InvalidParameter::RootOutOfRange { root: 20, nodes: 20 }.into())
        );
        assert!(run_workload(&WorkloadConfig::new(0)).is_err());
        assert!(WorkloadConfig::new(11).root(10).validate().is_ok());
    }

    #[test]
    fn bfs_workload() {
        let config = WorkloadConfig::new(500).seed(3).root(7);
        let report = run_workload(&config).unwrap();

        let WorkloadResult::Bfs(result) = &report.result else {
            panic!("expected a traversal result");
        };
        assert_eq!(result.order.len(), 500);
        assert_eq!(result.order[0], 7);
        assert_eq!(result.parent_of(7), None);
        assert_eq!(report.seed, 3);
        assert_eq!(report.digest.len(), 64);

        let again = run_workload(&config).unwrap();
        assert_eq!(again.result, report.result);
        assert_eq!(again.digest, report.digest);
    }

    #[test]
    fn other_workloads() {
        let config = WorkloadConfig::new(300).seed(5).attachments(3);

        let report = run_workload(&config.clone().kind(WorkloadKind::SpanningTree)).unwrap();
        let WorkloadResult::SpanningTree(tree) = &report.result else {
            panic!("expected a spanning tree");
        };
        assert_eq!(tree.len(), 299);

        let pagerank = run_workload(&config.kind(WorkloadKind::PageRank)).unwrap();
        let WorkloadResult::PageRank(scores) = &pagerank.result else {
            panic!("expected pagerank scores");
        };
        assert_eq!(scores.len(), 300);
        assert!((scores.iter().sum::<f64>() - 1.0).abs() < 1e-9);

        // same seed, same graph, independent of the algorithm
        assert_eq!(report.digest, pagerank.digest);
    }

    #[test]
    fn entropy_seed_is_reported() {
        let report = run_workload(&WorkloadConfig::new(100).attachments(2)).unwrap();
        let replay =
            run_workload(&WorkloadConfig::new(100).attachments(2).seed(report.seed)).unwrap();

        assert_eq!(report.digest, replay.digest);
        assert_eq!(report.result, replay.result);
    }

    #[test]
    fn negative_seed() {
        let config = WorkloadConfig::new(100).attachments(2).seed(-5);
        let report = run_workload(&config).unwrap();
        let replay = run_workload(&config).unwrap();

        assert_eq!(report.seed, -5);
        assert_eq!(report.digest, replay.digest);
        assert_ne!(
            report.digest,
            run_workload(&config.clone().seed(5)).unwrap().digest
        );
    }

    #[test]
    fn report_json() {
        let config = WorkloadConfig::new(3)
            .attachments(1)
            .seed(1)
            .kind(WorkloadKind::SpanningTree);
        let json = serde_json::to_value(run_workload(&config).unwrap()).unwrap();

        assert_eq!(json["result"].as_array().map(Vec::len), Some(2));
        assert!(json["measurement"]["graph_generating_time"].is_u64());
        assert!(json["measurement"]["compute_time"].is_u64());
        assert_eq!(json["seed"], 1);
    }

    #[test]
    fn timing_stats() {
        let mut a = BenchStats::new();
        assert_eq!(a.jobs(), 0);
        assert_eq!(a.compute_time.min(), None);
        assert_eq!(a.compute_time.mean(), None);

        a.record(&Measurement {
            graph_generating_time: 10,
            compute_time: 4,
        });
        a.record(&Measurement {
            graph_generating_time: 30,
            compute_time: 2,
        });

        let mut b = BenchStats::new();
        b.record(&Measurement {
            graph_generating_time: 20,
            compute_time: 9,
        });

        let merged = a.merge(&b).merge(&BenchStats::new());
        assert_eq!(merged.jobs(), 3);
        assert_eq!(merged.graph_generating_time.min(), Some(10));
        assert_eq!(merged.graph_generating_time.max(), Some(30));
        assert_eq!(merged.graph_generating_time.mean(), Some(20.0));
        assert_eq!(merged.compute_time.min(), Some(2));
        assert_eq!(merged.compute_time.max(), Some(9));
        assert_eq!(merged.compute_time.mean(), Some(5.0));

        let json = serde_json::to_value(merged).unwrap();
        assert_eq!(
            json["compute_time"],
            serde_json::json!({"count": 3, "min": 2, "mean": 5.0, "max": 9})
        );
        assert_eq!(
            serde_json::to_value(BenchStats::new()).unwrap()["compute_time"],
            serde_json::json!({"count": 0, "min": null, "mean": null, "max": null})
        );
    }
}
