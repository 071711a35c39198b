//! Grid obstacle-graph generator.
//!
//! Generation runs in four steps:
//!
//! 1. build the full `height × width` grid with 4-directional unit edges;
//! 2. remove obstacle cells (random, or supplied explicitly);
//! 3. keep the first component found by the connectivity scan and prune
//!    every other survivor as an orphan;
//! 4. run the repair pass.
//!
//! # Repair pass
//!
//! The repair pass works from a snapshot of the survivors taken right after
//! step 2 (orphans included; never updated). Candidate places are the grid
//! positions outside that snapshot, scanned in row-major order. The pass
//! runs once per orphan. Each pass reinserts the first place that has a
//! snapshot neighbor in [`Direction::PRIORITY`] order, connects it to that
//! neighbor, and connects it to at most one more snapshot neighbor taken
//! from [`Direction::fallbacks`]. Connecting to a pruned orphan restores
//! that orphan as a node.
//!
//! The repair is best effort. A pass reinserts at most one place, and
//! reinserted places only link to the snapshot, so the result may stay
//! disconnected. That outcome is reported through [`GridReport`] and logged,
//! not raised as an error.

use crate::connectivity::{first_component, is_connected};
use crate::{Cell, Direction, Graph};
use log::{debug, warn};
use pathbench_core::{Error, Result};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};

// ============================================================================
// Types
// ============================================================================

/// Diagnostics collected while generating a grid graph.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridReport {
    /// Grid height (rows).
    pub height: usize,
    /// Grid width (columns).
    pub width: usize,
    /// Obstacle cells, in removal order.
    pub obstacles: Vec<Cell>,
    /// Survivors pruned because they were outside the first component.
    pub orphans: Vec<Cell>,
    /// Places reinserted by the repair pass, in repair order.
    pub reinserted: Vec<Cell>,
    /// Orphans brought back by repair edges.
    pub restored: Vec<Cell>,
    /// Whether the final graph is connected.
    pub connected: bool,
}

impl GridReport {
    /// Orphans that the repair pass did not bring back.
    pub fn unrestored(&self) -> Vec<Cell> {
        self.orphans
            .iter()
            .filter(|cell| !self.restored.contains(cell))
            .copied()
            .collect()
    }
}

// ============================================================================
// Generation
// ============================================================================

/// Generate a grid graph with `obstacle_count` random obstacles.
///
/// # Errors
///
/// Returns [`Error::Config`] if `obstacle_count > height * width`.
pub fn generate<R: Rng + ?Sized>(
    height: usize,
    width: usize,
    obstacle_count: usize,
    rng: &mut R,
) -> Result<Graph<Cell>> {
    generate_detailed(height, width, obstacle_count, rng).map(|(graph, _)| graph)
}

/// Like [`generate`], also returning the generation diagnostics.
pub fn generate_detailed<R: Rng + ?Sized>(
    height: usize,
    width: usize,
    obstacle_count: usize,
    rng: &mut R,
) -> Result<(Graph<Cell>, GridReport)> {
    let cells = cell_count(height, width)?;
    if obstacle_count > cells {
        return Err(Error::config(format!(
            "obstacle_count ({obstacle_count}) must not exceed height * width ({cells})"
        )));
    }

    let mut graph = full_grid(height, width);
    let mut survivors = graph.sorted_nodes();
    let mut obstacles = Vec::with_capacity(obstacle_count);

    for _ in 0..obstacle_count {
        let chosen = survivors.swap_remove(rng.gen_range(0..survivors.len()));
        graph.remove_node(chosen);
        obstacles.push(chosen);
    }

    Ok(prune_and_repair(graph, height, width, obstacles))
}

/// Generate a grid graph from an explicit obstacle list.
///
/// # Errors
///
/// Returns [`Error::Config`] if an obstacle lies outside the grid or is
/// listed twice.
pub fn generate_with_obstacles(
    height: usize,
    width: usize,
    obstacles: &[Cell],
) -> Result<(Graph<Cell>, GridReport)> {
    cell_count(height, width)?;

    let mut graph = full_grid(height, width);
    for &obstacle in obstacles {
        if obstacle.row >= height || obstacle.col >= width {
            return Err(Error::config(format!(
                "obstacle {obstacle} lies outside the {height}x{width} grid"
            )));
        }
        if !graph.remove_node(obstacle) {
            return Err(Error::config(format!("obstacle {obstacle} is listed twice")));
        }
    }

    Ok(prune_and_repair(graph, height, width, obstacles.to_vec()))
}

/// The full `height × width` grid graph.
pub fn full_grid(height: usize, width: usize) -> Graph<Cell> {
    let mut graph = Graph::with_nodes(all_positions(height, width));
    for row in 0..height {
        for col in 0..width {
            let cell = Cell::new(row, col);
            if col + 1 < width {
                graph.add_edge(cell, Cell::new(row, col + 1));
            }
            if row + 1 < height {
                graph.add_edge(cell, Cell::new(row + 1, col));
            }
        }
    }
    graph
}

fn all_positions(height: usize, width: usize) -> impl Iterator<Item = Cell> {
    (0..height).flat_map(move |row| (0..width).map(move |col| Cell::new(row, col)))
}

fn cell_count(height: usize, width: usize) -> Result<usize> {
    height
        .checked_mul(width)
        .ok_or_else(|| Error::config(format!("grid {height}x{width} is too large")))
}

// ============================================================================
// Pruning and repair
// ============================================================================

fn prune_and_repair(
    mut graph: Graph<Cell>,
    height: usize,
    width: usize,
    obstacles: Vec<Cell>,
) -> (Graph<Cell>, GridReport) {
    let survivors: HashSet<Cell> = graph.nodes().collect();
    let main = first_component(&graph).unwrap_or_default();

    let orphans: Vec<Cell> = graph
        .sorted_nodes()
        .into_iter()
        .filter(|cell| !main.contains(cell))
        .collect();
    for &orphan in &orphans {
        graph.remove_node(orphan);
    }

    let mut possible_places: BTreeSet<Cell> = all_positions(height, width)
        .filter(|cell| !survivors.contains(cell))
        .collect();

    let reinserted = repair(&mut graph, &survivors, &mut possible_places, orphans.len());

    let restored: Vec<Cell> = orphans
        .iter()
        .filter(|cell| graph.contains_node(**cell))
        .copied()
        .collect();
    let connected = is_connected(&graph);

    debug!(
        "grid {height}x{width}: {} obstacles, {} orphans, {} reinserted, {} restored",
        obstacles.len(),
        orphans.len(),
        reinserted.len(),
        restored.len()
    );
    if !connected {
        warn!(
            "grid repair left the graph disconnected ({} of {} orphans restored)",
            restored.len(),
            orphans.len()
        );
    }

    let report = GridReport {
        height,
        width,
        obstacles,
        orphans,
        reinserted,
        restored,
        connected,
    };
    (graph, report)
}

/// Run `passes` repair passes, returning the reinserted places.
fn repair(
    graph: &mut Graph<Cell>,
    survivors: &HashSet<Cell>,
    possible_places: &mut BTreeSet<Cell>,
    passes: usize,
) -> Vec<Cell> {
    let mut reinserted = Vec::new();

    for _ in 0..passes {
        let found = possible_places.iter().find_map(|&place| {
            attachment(place, survivors).map(|(direction, neighbor)| (place, direction, neighbor))
        });
        let Some((place, direction, neighbor)) = found else {
            continue;
        };

        graph.add_node(place);
        graph.add_edge(place, neighbor);

        let second = direction
            .fallbacks()
            .into_iter()
            .filter_map(|d| place.step(d))
            .find(|cell| survivors.contains(cell));
        if let Some(second) = second {
            graph.add_edge(place, second);
        }

        possible_places.remove(&place);
        reinserted.push(place);
    }

    reinserted
}

/// First snapshot neighbor of `place`, in priority order.
fn attachment(place: Cell, survivors: &HashSet<Cell>) -> Option<(Direction, Cell)> {
    Direction::PRIORITY.into_iter().find_map(|direction| {
        place
            .step(direction)
            .filter(|cell| survivors.contains(cell))
            .map(|cell| (direction, cell))
    })
}

// ============================================================================
// Tests
// ============================================================================
