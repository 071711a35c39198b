//! Shortest-path algorithms.
//!
//! Thin wrappers over `petgraph::algo` that accept a [`Graph`] and report
//! results in pathbench terms:
//!
//! - [`Dijkstra`] and [`BellmanFord`] implement [`SingleSource`] and return
//!   [`ShortestPaths`] (raw distances; paths are reconstructed on request).
//! - [`AStar`] finds a point-to-point [`Route`] on grid graphs using a
//!   [`Heuristic`].

use crate::{Cell, Graph};
use pathbench_core::{Error, Result};
use petgraph::graphmap::NodeTrait;
use petgraph::visit::{EdgeRef, NodeIndexable};
use serde::{Deserialize, Serialize};
use std::cell::OnceCell;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// ShortestPaths
// ============================================================================

/// Result of a single-source shortest-path search.
///
/// Holds the search output as petgraph produced it. Predecessor trees and
/// sorted maps are derived on request, so timing [`SingleSource::run`]
/// measures the search alone.
#[derive(Clone, Debug)]
pub struct ShortestPaths<'g, N: NodeTrait> {
    graph: &'g Graph<N>,
    source: N,
    search: Search<N>,
}

#[derive(Clone, Debug)]
enum Search<N> {
    /// Final distances keyed by node; the predecessor tree is rebuilt and
    /// cached on first use.
    Keyed {
        distances: HashMap<N, f64>,
        tree: OnceCell<HashMap<N, N>>,
    },
    /// Per-index distances (infinite when unreachable) and predecessors.
    Indexed {
        distances: Vec<f64>,
        predecessors: Vec<Option<N>>,
    },
}

impl<'g, N: NodeTrait> ShortestPaths<'g, N> {
    /// The node the search started from.
    pub fn source(&self) -> N {
        self.source
    }

    /// Shortest distance to `target`, or `None` if unreachable.
    pub fn distance(&self, target: N) -> Option<f64> {
        match &self.search {
            Search::Keyed { distances, .. } => distances.get(&target).copied(),
            Search::Indexed { distances, .. } => {
                let d = *distances.get(self.index_of(target)?)?;
                d.is_finite().then_some(d)
            }
        }
    }

    /// Number of nodes reached (including the source).
    pub fn reachable_count(&self) -> usize {
        match &self.search {
            Search::Keyed { distances, .. } => distances.len(),
            Search::Indexed { distances, .. } => {
                distances.iter().filter(|d| d.is_finite()).count()
            }
        }
    }

    /// Node sequence from the source to `target`, or `None` if unreachable.
    pub fn path_to(&self, target: N) -> Option<Vec<N>> {
        self.distance(target)?;
        let mut path = vec![target];
        let mut current = target;
        while current != self.source {
            current = self.predecessor(current)?;
            path.push(current);
        }
        path.reverse();
        Some(path)
    }

    /// Paths to every reachable node, keyed by target.
    pub fn paths(&self) -> BTreeMap<N, Vec<N>> {
        self.graph
            .nodes()
            .filter_map(|target| self.path_to(target).map(|path| (target, path)))
            .collect()
    }

    /// Distances to every reachable node, keyed by target.
    pub fn distances(&self) -> BTreeMap<N, f64> {
        self.graph
            .nodes()
            .filter_map(|target| self.distance(target).map(|d| (target, d)))
            .collect()
    }

    fn predecessor(&self, node: N) -> Option<N> {
        match &self.search {
            Search::Keyed { distances, tree } => tree
                .get_or_init(|| predecessors_from_distances(self.graph, self.source, distances))
                .get(&node)
                .copied(),
            Search::Indexed { predecessors, .. } => *predecessors.get(self.index_of(node)?)?,
        }
    }

    fn index_of(&self, node: N) -> Option<usize> {
        self.graph
            .contains_node(node)
            .then(|| NodeIndexable::to_index(&self.graph.graph, node))
    }
}

// ============================================================================
// Single-source algorithms
// ============================================================================

/// A single-source shortest-path algorithm.
pub trait SingleSource<N: NodeTrait> {
    /// Display name of the algorithm.
    fn name(&self) -> &str;

    /// Compute shortest paths from `source` to every reachable node.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if `source` is not in the graph.
    fn run<'g>(&self, graph: &'g Graph<N>, source: N) -> Result<ShortestPaths<'g, N>>;
}

/// Dijkstra's algorithm (non-negative weights).
#[derive(Clone, Copy, Debug, Default)]
pub struct Dijkstra;

/// The Bellman-Ford algorithm (tolerates negative weights).
#[derive(Clone, Copy, Debug, Default)]
pub struct BellmanFord;

impl<N: NodeTrait + fmt::Debug> SingleSource<N> for Dijkstra {
    fn name(&self) -> &str {
        "dijkstra"
    }

    fn run<'g>(&self, graph: &'g Graph<N>, source: N) -> Result<ShortestPaths<'g, N>> {
        ensure_node(graph, source)?;
        let distances = petgraph::algo::dijkstra(&graph.graph, source, None, |e| *e.weight())
            .into_iter()
            .collect();
        Ok(ShortestPaths {
            graph,
            source,
            search: Search::Keyed {
                distances,
                tree: OnceCell::new(),
            },
        })
    }
}

impl<N: NodeTrait + fmt::Debug> SingleSource<N> for BellmanFord {
    fn name(&self) -> &str {
        "bellman-ford"
    }

    fn run<'g>(&self, graph: &'g Graph<N>, source: N) -> Result<ShortestPaths<'g, N>> {
        ensure_node(graph, source)?;
        let paths = petgraph::algo::bellman_ford(&graph.graph, source)
            .map_err(|_| Error::NegativeCycle)?;
        Ok(ShortestPaths {
            graph,
            source,
            search: Search::Indexed {
                distances: paths.distances,
                predecessors: paths.predecessors,
            },
        })
    }
}

/// Rebuild a predecessor tree from final distances.
///
/// For every reached node, the smallest neighbor lying on a shortest path
/// becomes its predecessor.
fn predecessors_from_distances<N: NodeTrait>(
    graph: &Graph<N>,
    source: N,
    distances: &HashMap<N, f64>,
) -> HashMap<N, N> {
    let mut predecessors = HashMap::with_capacity(distances.len());
    for (&node, &distance) in distances {
        if node == source {
            continue;
        }
        let best = graph
            .graph
            .edges(node)
            .filter_map(|(_, other, &cost)| {
                let d = distances.get(&other)?;
                (*d + cost == distance).then_some(other)
            })
            .min();
        if let Some(p) = best {
            predecessors.insert(node, p);
        }
    }
    predecessors
}

fn ensure_node<N: NodeTrait + fmt::Debug>(graph: &Graph<N>, node: N) -> Result<()> {
    if graph.contains_node(node) {
        Ok(())
    } else {
        Err(Error::not_found("node", format!("{node:?}")))
    }
}

// ============================================================================
// A*
// ============================================================================

/// Admissible distance estimates for grid search.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Heuristic {
    /// Always zero; A* degrades to Dijkstra.
    #[default]
    Zero,
    /// Manhattan distance between cells.
    Manhattan,
}

impl Heuristic {
    /// Estimated cost from `from` to `to`.
    pub fn estimate(self, from: Cell, to: Cell) -> f64 {
        match self {
            Self::Zero => 0.0,
            Self::Manhattan => from.manhattan(to) as f64,
        }
    }

    /// Returns the heuristic name as a string.
    pub fn name(self) -> &'static str {
        match self {
            Self::Zero => "zero",
            Self::Manhattan => "manhattan",
        }
    }
}

impl FromStr for Heuristic {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "zero" | "none" => Ok(Self::Zero),
            "manhattan" => Ok(Self::Manhattan),
            other => Err(Error::config(format!(
                "unknown heuristic '{other}' (expected 'zero' or 'manhattan')"
            ))),
        }
    }
}

impl fmt::Display for Heuristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A point-to-point path and its total cost.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Route<N> {
    /// Sum of edge costs along the path.
    pub cost: f64,
    /// Nodes from start to goal, inclusive.
    pub nodes: Vec<N>,
}

/// A* search on grid graphs.
#[derive(Clone, Copy, Debug, Default)]
pub struct AStar {
    heuristic: Heuristic,
}

impl AStar {
    /// Creates an A* search using `heuristic`.
    pub fn new(heuristic: Heuristic) -> Self {
        Self { heuristic }
    }

    /// The heuristic in use.
    pub fn heuristic(&self) -> Heuristic {
        self.heuristic
    }

    /// Find a shortest route from `start` to `goal`.
    ///
    /// Returns `Ok(None)` when `goal` is unreachable.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if either endpoint is not in the graph.
    pub fn find(&self, graph: &Graph<Cell>, start: Cell, goal: Cell) -> Result<Option<Route<Cell>>> {
        let heuristic = self.heuristic;
        astar_route(graph, start, goal, |cell| heuristic.estimate(cell, goal))
    }
}

/// A* over any node type with a caller-supplied estimate.
pub fn astar_route<N, H>(
    graph: &Graph<N>,
    start: N,
    goal: N,
    estimate: H,
) -> Result<Option<Route<N>>>
where
    N: NodeTrait + fmt::Debug,
    H: FnMut(N) -> f64,
{
    ensure_node(graph, start)?;
    ensure_node(graph, goal)?;
    let found = petgraph::algo::astar(
        &graph.graph,
        start,
        |n| n == goal,
        |e| *e.weight(),
        estimate,
    );
    Ok(found.map(|(cost, nodes)| Route { cost, nodes }))
}

// ============================================================================
// Tests
// ============================================================================
