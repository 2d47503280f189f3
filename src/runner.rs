//! Benchmark runner.
//!
//! Executes `runs` independent connect → query × N → end cycles against a
//! [`ClientFactory`] and averages the elapsed time of every phase.
//!
//! Every operation is awaited before the next one starts: queries never
//! overlap each other, and a run never overlaps the next run.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::time::Instant;

use crate::client::{BenchClient, ClientFactory};
use crate::error::{BenchError, BenchResult};

/// Query issued on every connection.
pub const DEFAULT_QUERY: &str = "SELECT * FROM games";

/// Queries issued per connection.
pub const QUERIES_PER_RUN: usize = 10;

/// Upper bound on runs reserved up front; larger counts grow on demand.
const PREALLOCATED_RUNS: usize = 1024;

/// Phase timings of one connect / query / end cycle, in milliseconds.
#[derive(Debug, Clone, PartialEq)]
pub struct RunResult {
    pub connection: f64,
    pub queries: Vec<f64>,
    pub teardown: f64,
    pub total: f64,
}

/// All samples collected over a benchmark, one vector per phase.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Samples {
    pub connection: Vec<f64>,
    pub query: Vec<f64>,
    pub teardown: Vec<f64>,
    pub total: Vec<f64>,
}

impl Samples {
    fn with_capacity(runs: u32, queries_per_run: usize) -> Self {
        let runs = (runs as usize).min(PREALLOCATED_RUNS);
        Self {
            connection: Vec::with_capacity(runs),
            query: Vec::with_capacity(runs * queries_per_run),
            teardown: Vec::with_capacity(runs),
            total: Vec::with_capacity(runs),
        }
    }

    fn push(&mut self, run: RunResult) {
        self.connection.push(run.connection);
        self.query.extend(run.queries);
        self.teardown.push(run.teardown);
        self.total.push(run.total);
    }

    /// Arithmetic mean of every phase.
    ///
    /// Fails with [`BenchError::NoSamples`] if any phase is empty.
    pub fn summary(&self) -> BenchResult<BenchmarkSummary> {
        Ok(BenchmarkSummary {
            average_query_time: mean(&self.query).ok_or(BenchError::NoSamples)?,
            average_connection_time: mean(&self.connection).ok_or(BenchError::NoSamples)?,
            average_teardown_time: mean(&self.teardown).ok_or(BenchError::NoSamples)?,
            average_total_time: mean(&self.total).ok_or(BenchError::NoSamples)?,
        })
    }
}

/// Averaged phase durations for one connection strategy, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BenchmarkSummary {
    pub average_query_time: f64,
    pub average_connection_time: f64,
    pub average_teardown_time: f64,
    pub average_total_time: f64,
}

/// Times client lifecycles for a fixed query workload.
#[derive(Debug, Clone)]
pub struct BenchmarkRunner {
    query: String,
    queries_per_run: usize,
}

impl Default for BenchmarkRunner {
    fn default() -> Self {
        Self {
            query: DEFAULT_QUERY.to_string(),
            queries_per_run: QUERIES_PER_RUN,
        }
    }
}

impl BenchmarkRunner {
    /// Create a runner with the default workload.
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the query issued on each connection.
    pub fn query(mut self, sql: impl Into<String>) -> Self {
        self.query = sql.into();
        self
    }

    /// Override how many times the query runs per connection.
    pub fn queries_per_run(mut self, n: usize) -> Self {
        self.queries_per_run = n;
        self
    }

    /// Benchmark `runs` cycles and return the averages.
    pub async fn run(&self, factory: &dyn ClientFactory, runs: u32) -> BenchResult<BenchmarkSummary> {
        let summary = self.collect(factory, runs).await?.summary()?;
        tracing::info!(
            runs,
            connection_ms = summary.average_connection_time,
            query_ms = summary.average_query_time,
            teardown_ms = summary.average_teardown_time,
            total_ms = summary.average_total_time,
            "Benchmark complete"
        );
        Ok(summary)
    }

    /// Benchmark `runs` cycles and return every raw sample.
    pub async fn collect(&self, factory: &dyn ClientFactory, runs: u32) -> BenchResult<Samples> {
        if runs == 0 {
            return Err(BenchError::InvalidRuns(0));
        }
        if self.queries_per_run == 0 {
            return Err(BenchError::Config("queries_per_run must be at least 1".to_string()));
        }

        let mut samples = Samples::with_capacity(runs, self.queries_per_run);
        for run in 0..runs {
            let result = self.run_once(factory).await?;
            tracing::debug!(
                run,
                connection_ms = result.connection,
                teardown_ms = result.teardown,
                total_ms = result.total,
                "Run finished"
            );
            samples.push(result);
        }
        Ok(samples)
    }

    /// One full cycle on a fresh client.
    pub async fn run_once(&self, factory: &dyn ClientFactory) -> BenchResult<RunResult> {
        let run_start = Instant::now();

        let mut client = factory.create();

        let connect_start = Instant::now();
        client.connect().await?;
        let connection = millis(connect_start.elapsed());

        let mut queries = Vec::with_capacity(self.queries_per_run);
        for _ in 0..self.queries_per_run {
            let query_start = Instant::now();
            client.query(&self.query).await?;
            queries.push(millis(query_start.elapsed()));
        }

        let teardown_start = Instant::now();
        client.end().await?;
        let teardown = millis(teardown_start.elapsed());

        Ok(RunResult {
            connection,
            queries,
            teardown,
            total: millis(run_start.elapsed()),
        })
    }
}

fn millis(d: Duration) -> f64 {
    d.as_nanos() as f64 / 1_000_000.0
}

fn mean(samples: &[f64]) -> Option<f64> {
    if samples.is_empty() {
        return None;
    }
    Some(samples.iter().sum::<f64>() / samples.len() as f64)
}
