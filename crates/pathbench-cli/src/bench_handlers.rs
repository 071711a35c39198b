//! Handler functions for the experiment commands.
//!
//! These functions implement `general`, `grid`, and `stats`: generate a
//! graph from resolved settings, run the requested measurements, and print
//! the outcome as text or JSON.

use crate::cli::{GeneralArgs, GridArgs, StatsTarget};
use crate::config::{GeneralConfig, GridConfig, OutputFormat, PathbenchConfig};
use pathbench_core::{Error, Result};
use pathbench_graph::{
    AStar, BellmanFord, BenchmarkReport, Dijkstra, GraphStats, GridReport, PointToPointReport,
    SingleSource, ValidationResult, benchmark_point_to_point, compare, compute_stats, general,
    grid, quick_summary, validate_graph,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use tracing::info;

// ============================================================================
// Settings resolution
// ============================================================================

/// Apply command-line overrides on top of the configured general settings.
pub fn resolve_general(config: &GeneralConfig, args: &GeneralArgs) -> GeneralConfig {
    GeneralConfig {
        vertices: args.vertices.unwrap_or(config.vertices),
        edges: args.edges.unwrap_or(config.edges),
        source: args.source.unwrap_or(config.source),
        trials: args.trials.unwrap_or(config.trials),
    }
}

/// Apply command-line overrides on top of the configured grid settings.
pub fn resolve_grid(config: &GridConfig, args: &GridArgs) -> GridConfig {
    GridConfig {
        height: args.height.unwrap_or(config.height),
        width: args.width.unwrap_or(config.width),
        obstacles: args.obstacles.unwrap_or(config.obstacles),
        trials: args.trials.unwrap_or(config.trials),
        heuristic: args.heuristic.unwrap_or(config.heuristic),
    }
}

/// The seed to use, drawing a fresh one when none is configured.
pub fn resolve_seed(seed: Option<u64>) -> u64 {
    seed.unwrap_or_else(rand::random)
}

fn seeded_rng(seed: u64) -> StdRng {
    info!(seed, "seeding random number generator");
    StdRng::seed_from_u64(seed)
}

// ============================================================================
// Outcome types
// ============================================================================

/// Result of the general-graph experiment.
#[derive(Debug, Clone, Serialize)]
pub struct GeneralOutcome {
    /// Seed the graph was generated from.
    pub seed: u64,
    /// Effective settings.
    pub settings: GeneralConfig,
    /// Shape of the generated graph.
    pub stats: GraphStats,
    /// Shortest paths per algorithm name, keyed by target node.
    pub paths: BTreeMap<String, BTreeMap<usize, Vec<usize>>>,
    /// One timing report per algorithm.
    pub reports: Vec<BenchmarkReport>,
}

/// Result of the grid experiment.
#[derive(Debug, Clone, Serialize)]
pub struct GridOutcome {
    /// Seed the grid and trials were drawn from.
    pub seed: u64,
    /// Effective settings.
    pub settings: GridConfig,
    /// Generation diagnostics.
    pub generation: GridReport,
    /// Shape of the generated graph.
    pub stats: GraphStats,
    /// A* timings.
    pub benchmark: PointToPointReport,
}

/// Result of the stats command.
#[derive(Debug, Clone, Serialize)]
pub struct StatsOutcome {
    /// Seed the graph was generated from.
    pub seed: u64,
    /// Generator that produced the graph.
    pub kind: &'static str,
    /// One-line size summary.
    pub summary: String,
    /// Structural statistics.
    pub stats: GraphStats,
    /// Integrity findings.
    pub validation: ValidationResult,
    /// Grid diagnostics, for grid graphs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation: Option<GridReport>,
}

// ============================================================================
// Experiments
// ============================================================================

/// Generate a general graph, print the shortest paths of both algorithms,
/// and time them.
pub fn run_general(settings: &GeneralConfig, seed: u64) -> Result<GeneralOutcome> {
    let mut rng = seeded_rng(seed);
    let graph = general::generate(settings.vertices, settings.edges, &mut rng)?;
    info!("generated general graph: {}", quick_summary(&graph));

    let algorithms: [&dyn SingleSource<usize>; 2] = [&Dijkstra, &BellmanFord];
    let mut paths = BTreeMap::new();
    for algorithm in algorithms {
        let found = algorithm.run(&graph, settings.source)?;
        paths.insert(algorithm.name().to_string(), found.paths());
    }
    let reports = compare(&graph, settings.source, &algorithms, settings.trials)?;

    Ok(GeneralOutcome {
        seed,
        settings: settings.clone(),
        stats: compute_stats(&graph),
        paths,
        reports,
    })
}

/// Generate a grid graph and time A* between random cell pairs.
pub fn run_grid(settings: &GridConfig, seed: u64) -> Result<GridOutcome> {
    let mut rng = seeded_rng(seed);
    let (graph, generation) =
        grid::generate_detailed(settings.height, settings.width, settings.obstacles, &mut rng)?;
    info!("generated grid graph: {}", quick_summary(&graph));

    let search = AStar::new(settings.heuristic);
    let benchmark = benchmark_point_to_point(&graph, &search, settings.trials, &mut rng)?;

    Ok(GridOutcome {
        seed,
        settings: settings.clone(),
        generation,
        stats: compute_stats(&graph),
        benchmark,
    })
}

/// Generate a graph of the requested kind and analyse it.
pub fn run_stats(config: &PathbenchConfig, target: &StatsTarget, seed: u64) -> Result<StatsOutcome> {
    let mut rng = seeded_rng(seed);
    match target {
        StatsTarget::General(args) => {
            let settings = resolve_general(&config.general, args);
            let graph = general::generate(settings.vertices, settings.edges, &mut rng)?;
            Ok(StatsOutcome {
                seed,
                kind: "general",
                summary: quick_summary(&graph),
                stats: compute_stats(&graph),
                validation: validate_graph(&graph),
                generation: None,
            })
        }
        StatsTarget::Grid(args) => {
            let settings = resolve_grid(&config.grid, args);
            let (graph, generation) = grid::generate_detailed(
                settings.height,
                settings.width,
                settings.obstacles,
                &mut rng,
            )?;
            Ok(StatsOutcome {
                seed,
                kind: "grid",
                summary: quick_summary(&graph),
                stats: compute_stats(&graph),
                validation: validate_graph(&graph),
                generation: Some(generation),
            })
        }
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// Run and print the general-graph experiment.
pub fn handle_general(settings: &GeneralConfig, seed: u64, format: OutputFormat) -> Result<()> {
    let outcome = run_general(settings, seed)?;
    emit(&outcome, format)
}

/// Run and print the grid experiment.
pub fn handle_grid(settings: &GridConfig, seed: u64, format: OutputFormat) -> Result<()> {
    let outcome = run_grid(settings, seed)?;
    emit(&outcome, format)
}

/// Run and print the stats command.
pub fn handle_stats(
    config: &PathbenchConfig,
    target: &StatsTarget,
    seed: u64,
    format: OutputFormat,
) -> Result<()> {
    let outcome = run_stats(config, target, seed)?;
    emit(&outcome, format)
}

fn emit<T: Serialize + fmt::Display>(outcome: &T, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => print!("{outcome}"),
        OutputFormat::Json => println!("{}", to_json(outcome)?),
    }
    Ok(())
}

fn to_json<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).map_err(|e| Error::serialization(e.to_string()))
}

// ============================================================================
// Text rendering
// ============================================================================

fn join_path<N: fmt::Display>(nodes: &[N]) -> String {
    nodes
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" -> ")
}

fn write_stats(f: &mut fmt::Formatter<'_>, stats: &GraphStats) -> fmt::Result {
    writeln!(f, "Nodes:          {}", stats.node_count)?;
    writeln!(f, "Edges:          {}", stats.edge_count)?;
    writeln!(
        f,
        "  Weighted:     {} (total weight {})",
        stats.weighted_edge_count, stats.total_weight
    )?;
    writeln!(f, "Components:     {}", stats.component_count)?;
    writeln!(f, "  Largest:      {}", stats.largest_component)?;
    writeln!(f, "Isolated:       {}", stats.isolated_count)?;
    writeln!(f, "Avg degree:     {:.2}", stats.avg_degree)?;
    writeln!(f, "Max degree:     {}", stats.max_degree)
}

fn write_generation(f: &mut fmt::Formatter<'_>, report: &GridReport) -> fmt::Result {
    writeln!(
        f,
        "Grid:           {}x{}, {} obstacle(s)",
        report.height,
        report.width,
        report.obstacles.len()
    )?;
    writeln!(
        f,
        "Orphans:        {} ({} restored)",
        report.orphans.len(),
        report.restored.len()
    )?;
    if !report.reinserted.is_empty() {
        writeln!(f, "Reinserted:     {}", join_cells(&report.reinserted))?;
    }
    let unrestored = report.unrestored();
    if !unrestored.is_empty() {
        writeln!(f, "Unrestored:     {}", join_cells(&unrestored))?;
    }
    writeln!(
        f,
        "Connected:      {}",
        if report.connected { "yes" } else { "no" }
    )
}

fn join_cells<N: fmt::Display>(cells: &[N]) -> String {
    cells
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

impl fmt::Display for GeneralOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "General Graph (seed {})", self.seed)?;
        writeln!(f, "=============")?;
        write_stats(f, &self.stats)?;

        for (algorithm, paths) in &self.paths {
            writeln!(f, "\n{algorithm} paths from {}:", self.settings.source)?;
            for (target, path) in paths {
                writeln!(f, "  {target}: {}", join_path(path))?;
            }
        }

        writeln!(f, "\nTimings ({} trials each):", self.settings.trials)?;
        for report in &self.reports {
            writeln!(
                f,
                "  {:<14} mean {:.6}s  min {:.6}s  max {:.6}s",
                report.algorithm,
                report.mean,
                report.min(),
                report.max()
            )?;
        }
        Ok(())
    }
}

impl fmt::Display for GridOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Grid Graph (seed {})", self.seed)?;
        writeln!(f, "==========")?;
        write_generation(f, &self.generation)?;
        write_stats(f, &self.stats)?;

        writeln!(
            f,
            "\nA* ({} heuristic), {} trial(s):",
            self.benchmark.heuristic,
            self.benchmark.trials.len()
        )?;
        for trial in &self.benchmark.trials {
            match &trial.route {
                Some(route) => writeln!(
                    f,
                    "  {} -> {}: {:.6}s, cost {}, {} step(s)",
                    trial.start,
                    trial.end,
                    trial.seconds,
                    route.cost,
                    route.nodes.len().saturating_sub(1)
                )?,
                None => writeln!(
                    f,
                    "  {} -> {}: {:.6}s, unreachable",
                    trial.start, trial.end, trial.seconds
                )?,
            }
        }
        writeln!(f, "Mean:           {:.6}s", self.benchmark.mean)
    }
}

impl fmt::Display for StatsOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Graph Statistics ({}, seed {})", self.kind, self.seed)?;
        writeln!(f, "================")?;
        writeln!(f, "{}", self.summary)?;
        if let Some(generation) = &self.generation {
            write_generation(f, generation)?;
        }
        write_stats(f, &self.stats)?;

        let validation = &self.validation;
        if validation.valid {
            writeln!(f, "\nGraph is valid.")?;
        } else {
            writeln!(f, "\nGraph has validation issues:")?;
        }
        for error in &validation.errors {
            writeln!(f, "  ERROR [{}]: {}", error.code, error.message)?;
            for edge in &error.edges {
                writeln!(f, "    - {edge}")?;
            }
        }
        for warning in &validation.warnings {
            writeln!(f, "  WARN  [{}]: {}", warning.code, warning.message)?;
            for node in &warning.nodes {
                writeln!(f, "    - {node}")?;
            }
        }
        writeln!(
            f,
            "Summary: {} error(s), {} warning(s)",
            validation.errors.len(),
            validation.warnings.len()
        )
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pathbench_graph::Heuristic;

    fn small_general() -> GeneralConfig {
        GeneralConfig {
            vertices: 12,
            edges: 30,
            source: 3,
            trials: 2,
        }
    }

    fn small_grid() -> GridConfig {
        GridConfig {
            height: 4,
            width: 5,
            obstacles: 3,
            trials: 3,
            heuristic: Heuristic::Manhattan,
        }
    }

    #[test]
    fn test_resolve_general_overrides() {
        let args = GeneralArgs {
            vertices: Some(20),
            trials: Some(1),
            ..Default::default()
        };
        let settings = resolve_general(&GeneralConfig::default(), &args);
        assert_eq!(settings.vertices, 20);
        assert_eq!(settings.edges, 500);
        assert_eq!(settings.source, 7);
        assert_eq!(settings.trials, 1);
    }

    #[test]
    fn test_resolve_grid_overrides() {
        let args = GridArgs {
            width: Some(3),
            heuristic: Some(Heuristic::Manhattan),
            ..Default::default()
        };
        let settings = resolve_grid(&GridConfig::default(), &args);
        assert_eq!(settings.height, 10);
        assert_eq!(settings.width, 3);
        assert_eq!(settings.heuristic, Heuristic::Manhattan);
    }

    #[test]
    fn test_resolve_seed() {
        assert_eq!(resolve_seed(Some(17)), 17);
    }

    #[test]
    fn test_run_general() {
        let outcome = run_general(&small_general(), 5).unwrap();

        assert_eq!(outcome.stats.node_count, 12);
        assert_eq!(outcome.stats.edge_count, 29);
        assert_eq!(outcome.reports.len(), 2);
        assert!(outcome.reports.iter().all(|r| r.samples.len() == 2));

        let dijkstra = &outcome.paths["dijkstra"];
        let bellman_ford = &outcome.paths["bellman-ford"];
        assert_eq!(dijkstra.len(), 12);
        assert_eq!(bellman_ford.len(), 12);
        assert_eq!(dijkstra[&3], vec![3]);
    }

    #[test]
    fn test_run_general_is_reproducible() {
        let a = run_general(&small_general(), 9).unwrap();
        let b = run_general(&small_general(), 9).unwrap();
        assert_eq!(a.stats, b.stats);
        assert_eq!(a.paths, b.paths);
    }

    #[test]
    fn test_run_general_missing_source() {
        let settings = GeneralConfig {
            source: 99,
            ..small_general()
        };
        let err = run_general(&settings, 1).unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[test]
    fn test_run_general_invalid_counts() {
        let settings = GeneralConfig {
            edges: 5,
            ..small_general()
        };
        assert!(run_general(&settings, 1).unwrap_err().is_config());
    }

    #[test]
    fn test_run_grid() {
        let outcome = run_grid(&small_grid(), 11).unwrap();

        assert_eq!(outcome.generation.obstacles.len(), 3);
        assert_eq!(outcome.benchmark.trials.len(), 3);
        assert_eq!(outcome.benchmark.heuristic, Heuristic::Manhattan);
        assert!(outcome.stats.node_count <= 20);
    }

    #[test]
    fn test_run_grid_too_few_nodes() {
        let settings = GridConfig {
            height: 1,
            width: 2,
            obstacles: 2,
            ..small_grid()
        };
        assert!(run_grid(&settings, 1).unwrap_err().is_config());
    }

    #[test]
    fn test_run_stats_general() {
        let target = StatsTarget::General(GeneralArgs {
            vertices: Some(10),
            edges: Some(20),
            ..Default::default()
        });
        let outcome = run_stats(&PathbenchConfig::default(), &target, 2).unwrap();

        assert_eq!(outcome.kind, "general");
        assert_eq!(outcome.summary, "10 nodes, 19 edges");
        assert!(outcome.validation.valid);
        assert!(outcome.generation.is_none());
    }

    #[test]
    fn test_run_stats_grid() {
        let target = StatsTarget::Grid(GridArgs {
            height: Some(3),
            width: Some(3),
            obstacles: Some(0),
            ..Default::default()
        });
        let outcome = run_stats(&PathbenchConfig::default(), &target, 2).unwrap();

        assert_eq!(outcome.kind, "grid");
        assert_eq!(outcome.summary, "9 nodes, 12 edges");
        assert!(outcome.validation.valid);
        assert!(outcome.generation.unwrap().connected);
    }

    #[test]
    fn test_general_text_output() {
        let text = run_general(&small_general(), 5).unwrap().to_string();
        assert!(text.contains("General Graph (seed 5)"));
        assert!(text.contains("dijkstra paths from 3:"));
        assert!(text.contains("bellman-ford paths from 3:"));
        assert!(text.contains("  3: 3\n"));
    }

    #[test]
    fn test_grid_text_output() {
        let text = run_grid(&small_grid(), 11).unwrap().to_string();
        assert!(text.contains("Grid:           4x5, 3 obstacle(s)"));
        assert!(text.contains("A* (manhattan heuristic), 3 trial(s):"));
        assert!(text.contains("Mean:"));
    }

    #[test]
    fn test_stats_json_output() {
        let target = StatsTarget::Grid(GridArgs {
            height: Some(2),
            width: Some(2),
            obstacles: Some(1),
            ..Default::default()
        });
        let outcome = run_stats(&PathbenchConfig::default(), &target, 4).unwrap();
        let json = to_json(&outcome).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["kind"], "grid");
        assert_eq!(value["stats"]["node_count"], 3);
        assert_eq!(value["generation"]["obstacles"].as_array().unwrap().len(), 1);
    }
}
