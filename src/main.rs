use clap::Parser;
use scalefree::{
    node::{Node, NumNodes},
    workload::*,
};
use serde::Serialize;
use std::{
    error::Error,
    process::ExitCode,
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
    thread,
    time::Instant,
};
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt};

/// Load generator growing scale-free graphs and running graph algorithms on them
#[derive(Parser, Debug)]
#[command(name = "scalefree-bench")]
#[command(about = "Benchmarks Barabási–Albert graph generation and traversal", long_about = None)]
struct Args {
    /// Number of nodes of every generated graph
    #[arg(short, long)]
    size: NumNodes,

    /// Seed of the random generator; every job uses fresh entropy if omitted
    #[arg(long, allow_negative_numbers = true)]
    seed: Option<i64>,

    /// Number of edges every new node attaches with
    #[arg(short = 'm', long, default_value_t = DEFAULT_ATTACHMENTS)]
    attachments: NumNodes,

    /// Root node of the traversal
    #[arg(short, long, default_value_t = 0)]
    root: Node,

    /// Algorithm to run on every graph
    #[arg(short, long, value_enum, default_value_t = WorkloadKind::Bfs)]
    kind: WorkloadKind,

    /// Number of independent requests to process
    #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u64).range(1..))]
    jobs: u64,

    /// Number of worker threads
    #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u64).range(1..))]
    threads: u64,

    /// Print the full report of the first job
    #[arg(long)]
    emit_result: bool,
}

impl Args {
    fn workload(&self) -> WorkloadConfig {
        let config = WorkloadConfig::new(self.size)
            .attachments(self.attachments)
            .root(self.root)
            .kind(self.kind);

        match self.seed {
            Some(seed) => config.seed(seed),
            None => config,
        }
    }
}

#[derive(Serialize)]
struct Summary {
    kind: WorkloadKind,
    size: NumNodes,
    attachments: NumNodes,
    threads: usize,
    /// Wall-clock time of the whole run in microseconds
    wall_time: u64,
    jobs_per_second: f64,
    #[serde(flatten)]
    stats: BenchStats,
}

type WorkerOutput = (BenchStats, Option<WorkloadReport>);

fn run(args: &Args) -> Result<(), Box<dyn Error>> {
    let config = Arc::new(args.workload());
    config.validate()?;

    let num_jobs = args.jobs as usize;
    let num_threads = args.threads.min(args.jobs) as usize;
    info!(
        jobs = num_jobs,
        threads = num_threads,
        size = config.size,
        kind = ?config.kind,
        "Starting benchmark"
    );

    let start_time = Instant::now();

    let next_job = Arc::new(AtomicUsize::new(0));
    let handles: Vec<_> = (0..num_threads)
        .map(|_| {
            let config = Arc::clone(&config);
            let next_job = Arc::clone(&next_job);

            thread::spawn(move || -> scalefree::error::Result<WorkerOutput> {
                let mut local_stats = BenchStats::new();
                let mut first_report = None;

                loop {
                    // Atomically grab the next job
                    let job = next_job.fetch_add(1, Ordering::Relaxed);
                    if job >= num_jobs {
                        break;
                    }

                    let report = run_workload(&config)?;
                    local_stats.record(&report.measurement);

                    if job == 0 {
                        first_report = Some(report);
                    }
                }

                Ok((local_stats, first_report))
            })
        })
        .collect();

    let mut combined_stats = BenchStats::new();
    let mut first_report = None;
    for handle in handles {
        let (local_stats, report) = handle.join().expect("Worker thread panicked")?;
        combined_stats = combined_stats.merge(&local_stats);
        first_report = first_report.or(report);
    }

    let elapsed = start_time.elapsed();

    if let Some(report) = first_report.as_ref().filter(|_| args.emit_result) {
        println!("{}", serde_json::to_string(report)?);
    }

    let summary = Summary {
        kind: config.kind,
        size: config.size,
        attachments: config.attachments,
        threads: num_threads,
        wall_time: elapsed.as_micros().try_into().unwrap_or(u64::MAX),
        jobs_per_second: combined_stats.jobs() as f64 / elapsed.as_secs_f64(),
        stats: combined_stats,
    };
    println!("{}", serde_json::to_string_pretty(&summary)?);

    info!(
        jobs = combined_stats.jobs(),
        elapsed = ?elapsed,
        "Benchmark complete"
    );

    Ok(())
}

fn main() -> ExitCode {
    // Initialize structured logging on stderr; stdout only carries JSON
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .with_thread_ids(true)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Benchmark failed");
            ExitCode::FAILURE
        }
    }
}
