//! Timing harness for shortest-path algorithms.
//!
//! Each trial is timed with [`Instant`] (monotonic). Samples are raw wall
//! clock seconds; the reported metric is their arithmetic mean, with no
//! retries and no outlier rejection. The graph is only borrowed immutably.

use crate::algorithms::{AStar, Heuristic, Route, SingleSource};
use crate::{Cell, Graph};
use log::{debug, warn};
use pathbench_core::{Error, Result};
use petgraph::graphmap::NodeTrait;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hint::black_box;
use std::time::Instant;

// ============================================================================
// Types
// ============================================================================

/// Timing samples for one algorithm.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkReport {
    /// Algorithm name.
    pub algorithm: String,
    /// Elapsed seconds per trial, in run order.
    pub samples: Vec<f64>,
    /// Arithmetic mean of `samples`.
    pub mean: f64,
}

impl BenchmarkReport {
    /// Build a report from raw samples.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if `samples` is empty.
    pub fn from_samples(algorithm: impl Into<String>, samples: Vec<f64>) -> Result<Self> {
        let mean = mean(&samples)
            .ok_or_else(|| Error::config("cannot summarise an empty sample set"))?;
        Ok(Self {
            algorithm: algorithm.into(),
            samples,
            mean,
        })
    }

    /// Fastest trial.
    pub fn min(&self) -> f64 {
        self.samples.iter().copied().fold(f64::INFINITY, f64::min)
    }

    /// Slowest trial.
    pub fn max(&self) -> f64 {
        self.samples.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    }
}

/// One A* experiment on a grid graph.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PointToPointTrial {
    /// Start cell.
    pub start: Cell,
    /// Goal cell (never equal to `start`).
    pub end: Cell,
    /// Elapsed seconds.
    pub seconds: f64,
    /// Route found, or `None` when the goal was unreachable.
    pub route: Option<Route<Cell>>,
}

/// Results of repeated A* experiments.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PointToPointReport {
    /// Heuristic used by every trial.
    pub heuristic: Heuristic,
    /// Per-trial details, in run order.
    pub trials: Vec<PointToPointTrial>,
    /// Elapsed seconds per trial.
    pub samples: Vec<f64>,
    /// Arithmetic mean of `samples`.
    pub mean: f64,
}

impl PointToPointReport {
    /// Number of trials whose goal was unreachable.
    pub fn unreachable_count(&self) -> usize {
        self.trials.iter().filter(|t| t.route.is_none()).count()
    }
}

// ============================================================================
// Harness
// ============================================================================

/// Run `algorithm` from `source` exactly `trials` times and time each run.
///
/// # Errors
///
/// - [`Error::Config`] if `trials == 0`.
/// - [`Error::NotFound`] if `source` is not in the graph (before any trial).
pub fn benchmark<N, A>(
    graph: &Graph<N>,
    source: N,
    algorithm: &A,
    trials: usize,
) -> Result<BenchmarkReport>
where
    N: NodeTrait + fmt::Debug,
    A: SingleSource<N> + ?Sized,
{
    check_trials(trials)?;
    if !graph.contains_node(source) {
        return Err(Error::not_found("node", format!("{source:?}")));
    }

    let mut samples = Vec::with_capacity(trials);
    for _ in 0..trials {
        let started = Instant::now();
        let paths = algorithm.run(graph, source);
        let elapsed = started.elapsed().as_secs_f64();
        black_box(paths?);
        samples.push(elapsed);
    }

    let report = BenchmarkReport::from_samples(algorithm.name(), samples)?;
    debug!(
        "{}: {} trials, mean {:.6}s",
        report.algorithm, trials, report.mean
    );
    Ok(report)
}

/// Benchmark several algorithms over the same graph and source, in order.
pub fn compare<N>(
    graph: &Graph<N>,
    source: N,
    algorithms: &[&dyn SingleSource<N>],
    trials: usize,
) -> Result<Vec<BenchmarkReport>>
where
    N: NodeTrait + fmt::Debug,
{
    algorithms
        .iter()
        .map(|algorithm| benchmark(graph, source, *algorithm, trials))
        .collect()
}

/// Run `trials` A* experiments between random distinct start/end cells.
///
/// Each trial draws a fresh start and end; the end is redrawn while it
/// equals the start.
///
/// # Errors
///
/// Returns [`Error::Config`] if `trials == 0` or the graph has fewer than
/// two nodes.
pub fn benchmark_point_to_point<R: Rng + ?Sized>(
    graph: &Graph<Cell>,
    search: &AStar,
    trials: usize,
    rng: &mut R,
) -> Result<PointToPointReport> {
    check_trials(trials)?;
    let nodes = graph.sorted_nodes();
    if nodes.len() < 2 {
        return Err(Error::config(format!(
            "point-to-point search needs at least 2 nodes, graph has {}",
            nodes.len()
        )));
    }

    let mut runs = Vec::with_capacity(trials);
    for _ in 0..trials {
        let start = nodes[rng.gen_range(0..nodes.len())];
        let mut end = nodes[rng.gen_range(0..nodes.len())];
        while end == start {
            end = nodes[rng.gen_range(0..nodes.len())];
        }

        let started = Instant::now();
        let route = search.find(graph, start, end);
        let seconds = started.elapsed().as_secs_f64();
        let route = route?;

        if route.is_none() {
            warn!("no path from {start} to {end}");
        }
        runs.push(PointToPointTrial {
            start,
            end,
            seconds,
            route,
        });
    }

    let samples: Vec<f64> = runs.iter().map(|t| t.seconds).collect();
    let mean = mean(&samples).ok_or_else(|| Error::config("no trials were run"))?;
    Ok(PointToPointReport {
        heuristic: search.heuristic(),
        trials: runs,
        samples,
        mean,
    })
}

/// Arithmetic mean, or `None` for an empty slice.
pub fn mean(samples: &[f64]) -> Option<f64> {
    if samples.is_empty() {
        return None;
    }
    Some(samples.iter().sum::<f64>() / samples.len() as f64)
}

fn check_trials(trials: usize) -> Result<()> {
    if trials == 0 {
        return Err(Error::config("trials must be at least 1"));
    }
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
