//! Random general-graph generator.
//!
//! Builds a connected graph over the nodes `0..vertices_count`:
//!
//! 1. every node `r < vertices_count - 1` gets an unweighted spanning edge to
//!    a uniformly random greater node, which chains every node to the last
//!    one and so connects the graph;
//! 2. extra edges are sampled without replacement from the remaining
//!    upper-triangle pairs and given a random weight in
//!    [`MIN_WEIGHT`]`..=`[`MAX_WEIGHT`].
//!
//! Pairs are handled through the linear index `i * vertices_count + j`
//! (`i < j`), so the candidate pool never contains self-loops or duplicates.
//!
//! The extra-edge budget is `edges_count - vertices_count` while only
//! `vertices_count - 1` spanning edges are built, so a generated graph holds
//! `edges_count - 1` edges.

use crate::Graph;
use log::debug;
use pathbench_core::{Error, Result};
use rand::Rng;
use rand::seq::SliceRandom;
use std::collections::HashSet;

/// Smallest weight assigned to an extra edge.
pub const MIN_WEIGHT: u32 = 1;

/// Largest weight assigned to an extra edge.
pub const MAX_WEIGHT: u32 = 100;

// ============================================================================
// Generation
// ============================================================================

/// Generate a connected random graph.
///
/// # Errors
///
/// - [`Error::Config`] if `edges_count > vertices_count² / 2` or
///   `edges_count < vertices_count`, before anything is built.
/// - [`Error::SamplingExhausted`] if fewer candidate pairs remain after the
///   spanning edges than extra edges are requested.
pub fn generate<R: Rng + ?Sized>(
    vertices_count: usize,
    edges_count: usize,
    rng: &mut R,
) -> Result<Graph<usize>> {
    check_counts(vertices_count, edges_count)?;

    let mut graph = Graph::with_nodes(0..vertices_count);
    let mut spanning = HashSet::with_capacity(vertices_count);

    for row in 0..vertices_count.saturating_sub(1) {
        let column = rng.gen_range(row + 1..vertices_count);
        graph.add_edge(row, column);
        spanning.insert(encode(row, column, vertices_count));
    }

    let edges_left = edges_count - vertices_count;
    let pool = candidate_pool(vertices_count, &spanning);
    if edges_left > pool.len() {
        return Err(Error::sampling_exhausted(edges_left, pool.len()));
    }

    let sampled: Vec<usize> = pool.choose_multiple(rng, edges_left).copied().collect();
    for idx in sampled {
        let (a, b) = decode(idx, vertices_count);
        graph.add_weighted_edge(a, b, rng.gen_range(MIN_WEIGHT..=MAX_WEIGHT));
    }

    debug!(
        "generated general graph: {} nodes, {} spanning + {} extra edges",
        graph.node_count(),
        vertices_count.saturating_sub(1),
        edges_left
    );

    Ok(graph)
}

/// Check the vertex/edge count preconditions.
pub fn check_counts(vertices_count: usize, edges_count: usize) -> Result<()> {
    if edges_count > max_edges(vertices_count) {
        return Err(Error::config(format!(
            "edges_count ({edges_count}) must not exceed vertices_count^2 / 2 ({})",
            (vertices_count as u128 * vertices_count as u128) as f64 / 2.0
        )));
    }

    if edges_count < vertices_count {
        return Err(Error::config(format!(
            "edges_count ({edges_count}) must be at least vertices_count ({vertices_count})"
        )));
    }

    Ok(())
}

/// Largest `edges_count` accepted for `vertices_count` nodes.
pub fn max_edges(vertices_count: usize) -> usize {
    let squared = vertices_count as u128 * vertices_count as u128;
    usize::try_from(squared / 2).unwrap_or(usize::MAX)
}

/// Number of pairs left for extra edges once the spanning edges are placed.
pub fn extra_capacity(vertices_count: usize) -> usize {
    let pairs = vertices_count * vertices_count.saturating_sub(1) / 2;
    pairs - vertices_count.saturating_sub(1)
}

// ============================================================================
// Pair encoding
// ============================================================================

/// Linear indices of every pair `(i, j)` with `i < j` not in `taken`,
/// ascending.
fn candidate_pool(vertices_count: usize, taken: &HashSet<usize>) -> Vec<usize> {
    let pairs = vertices_count * vertices_count.saturating_sub(1) / 2;
    let mut pool = Vec::with_capacity(pairs.saturating_sub(taken.len()));
    for i in 0..vertices_count {
        pool.extend(
            (i + 1..vertices_count)
                .map(|j| encode(i, j, vertices_count))
                .filter(|idx| !taken.contains(idx)),
        );
    }
    pool
}

fn encode(i: usize, j: usize, vertices_count: usize) -> usize {
    i * vertices_count + j
}

fn decode(idx: usize, vertices_count: usize) -> (usize, usize) {
    (idx / vertices_count, idx % vertices_count)
}

// ============================================================================
// Tests
// ============================================================================
