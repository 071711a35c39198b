//! Core graph types for pathbench.
//!
//! [`Graph`] pairs a petgraph [`UnGraphMap`] (traversal costs consumed by the
//! path-finding algorithms) with a table of explicit integer weights keyed by
//! endpoint pair. [`Edge`] records are assembled from both on demand.

use petgraph::graphmap::{NodeTrait, UnGraphMap};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Traversal cost of an edge that carries no explicit weight.
pub const UNIT_COST: f64 = 1.0;

// ============================================================================
// Cell / Direction
// ============================================================================

/// A grid position, used as the node type of grid graphs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Cell {
    /// Row index (grows downwards).
    pub row: usize,
    /// Column index (grows to the right).
    pub col: usize,
}

impl Cell {
    /// Creates a cell at the given row and column.
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// The structurally adjacent cell in `direction`.
    ///
    /// Returns `None` when the step would leave the non-negative quadrant.
    /// Upper bounds are not checked; callers test membership instead.
    pub fn step(self, direction: Direction) -> Option<Cell> {
        match direction {
            Direction::Down => Some(Cell::new(self.row.checked_add(1)?, self.col)),
            Direction::Right => Some(Cell::new(self.row, self.col.checked_add(1)?)),
            Direction::Up => Some(Cell::new(self.row.checked_sub(1)?, self.col)),
            Direction::Left => Some(Cell::new(self.row, self.col.checked_sub(1)?)),
        }
    }

    /// Manhattan distance to `other`.
    pub fn manhattan(self, other: Cell) -> usize {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }

    /// Whether `other` is one of the four neighbors of this cell.
    pub fn is_adjacent(self, other: Cell) -> bool {
        self.manhattan(other) == 1
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// The four grid directions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Row + 1.
    Down,
    /// Column + 1.
    Right,
    /// Row - 1.
    Up,
    /// Column - 1.
    Left,
}

impl Direction {
    /// All directions in repair priority order.
    pub const PRIORITY: [Direction; 4] = [
        Direction::Down,
        Direction::Right,
        Direction::Up,
        Direction::Left,
    ];

    /// Directions tried, in order, for the optional second edge after a
    /// cell was attached through `self`.
    pub fn fallbacks(self) -> [Direction; 3] {
        match self {
            Self::Down => [Self::Right, Self::Up, Self::Left],
            Self::Right => [Self::Down, Self::Up, Self::Left],
            Self::Up => [Self::Right, Self::Down, Self::Left],
            Self::Left => [Self::Right, Self::Up, Self::Down],
        }
    }

    /// Returns the direction name as a string.
    pub fn name(self) -> &'static str {
        match self {
            Self::Down => "down",
            Self::Right => "right",
            Self::Up => "up",
            Self::Left => "left",
        }
    }
}

// ============================================================================
// Edge
// ============================================================================

/// An undirected edge with an optional positive integer weight.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge<N> {
    /// First endpoint.
    pub a: N,
    /// Second endpoint.
    pub b: N,
    /// Explicit weight, if one was assigned.
    pub weight: Option<u32>,
}

impl<N: NodeTrait> Edge<N> {
    /// Creates an unweighted edge.
    pub fn new(a: N, b: N) -> Self {
        Self { a, b, weight: None }
    }

    /// Sets an explicit weight.
    pub fn with_weight(mut self, weight: u32) -> Self {
        self.weight = Some(weight);
        self
    }

    /// Traversal cost: the explicit weight, or [`UNIT_COST`].
    pub fn cost(&self) -> f64 {
        self.weight.map_or(UNIT_COST, f64::from)
    }

    /// Whether this edge joins `x` and `y` (in either order).
    pub fn joins(&self, x: N, y: N) -> bool {
        (self.a == x && self.b == y) || (self.a == y && self.b == x)
    }

    /// Whether `n` is one of the endpoints.
    pub fn touches(&self, n: N) -> bool {
        self.a == n || self.b == n
    }

    /// Endpoints ordered so the smaller one comes first.
    pub fn ordered(&self) -> (N, N) {
        pair_key(self.a, self.b)
    }
}

fn pair_key<N: NodeTrait>(a: N, b: N) -> (N, N) {
    if a <= b { (a, b) } else { (b, a) }
}

// ============================================================================
// Graph
// ============================================================================

/// An undirected graph with optional integer edge weights.
///
/// Node identity is the node value itself (`usize` for general graphs,
/// [`Cell`] for grid graphs). Adding an edge inserts missing endpoints.
/// Edge lookups and node removal only touch the edges involved.
#[derive(Clone, Debug)]
pub struct Graph<N: NodeTrait> {
    /// Petgraph view: node set plus traversal cost per edge.
    pub(crate) graph: UnGraphMap<N, f64>,
    /// Explicit weights keyed by ordered endpoints. Absent means unweighted.
    weights: HashMap<(N, N), u32>,
}

impl<N: NodeTrait> Graph<N> {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self {
            graph: UnGraphMap::new(),
            weights: HashMap::new(),
        }
    }

    /// Creates a graph holding the given nodes and no edges.
    pub fn with_nodes(nodes: impl IntoIterator<Item = N>) -> Self {
        let mut graph = Self::new();
        for node in nodes {
            graph.add_node(node);
        }
        graph
    }

    /// Read-only access to the underlying petgraph structure.
    pub fn as_petgraph(&self) -> &UnGraphMap<N, f64> {
        &self.graph
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of edges.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Whether the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Check if a node exists.
    pub fn contains_node(&self, node: N) -> bool {
        self.graph.contains_node(node)
    }

    /// Check if an edge exists between two nodes.
    pub fn contains_edge(&self, a: N, b: N) -> bool {
        self.graph.contains_edge(a, b)
    }

    /// Iterate over nodes. Order is deterministic for a given build sequence.
    pub fn nodes(&self) -> impl Iterator<Item = N> + '_ {
        self.graph.nodes()
    }

    /// All nodes in ascending order.
    pub fn sorted_nodes(&self) -> Vec<N> {
        let mut nodes: Vec<N> = self.graph.nodes().collect();
        nodes.sort();
        nodes
    }

    /// Iterate over edge records, endpoints in ascending order.
    ///
    /// Order is deterministic for a given build sequence.
    pub fn edges(&self) -> impl Iterator<Item = Edge<N>> + '_ {
        self.graph.all_edges().map(|(a, b, _)| self.record(a, b))
    }

    /// Look up the edge record joining two nodes.
    pub fn edge(&self, a: N, b: N) -> Option<Edge<N>> {
        self.graph
            .contains_edge(a, b)
            .then(|| self.record(a, b))
    }

    fn record(&self, a: N, b: N) -> Edge<N> {
        let (a, b) = pair_key(a, b);
        Edge {
            a,
            b,
            weight: self.weights.get(&(a, b)).copied(),
        }
    }

    /// Iterate over the neighbors of a node.
    pub fn neighbors(&self, node: N) -> impl Iterator<Item = N> + '_ {
        self.graph.neighbors(node)
    }

    /// Number of edges incident to a node.
    pub fn degree(&self, node: N) -> usize {
        self.graph.neighbors(node).count()
    }

    // ========================================================================
    // Mutation API (used by the generators during construction)
    // ========================================================================

    /// Add a node. Returns `false` if it was already present.
    pub fn add_node(&mut self, node: N) -> bool {
        if self.graph.contains_node(node) {
            return false;
        }
        self.graph.add_node(node);
        true
    }

    /// Add an unweighted edge, inserting missing endpoints.
    pub fn add_edge(&mut self, a: N, b: N) {
        self.insert_edge(Edge::new(a, b));
    }

    /// Add an edge with an explicit weight, inserting missing endpoints.
    pub fn add_weighted_edge(&mut self, a: N, b: N, weight: u32) {
        self.insert_edge(Edge::new(a, b).with_weight(weight));
    }

    /// Insert an edge record. Re-adding an existing edge replaces its weight.
    pub fn insert_edge(&mut self, edge: Edge<N>) {
        self.graph.add_edge(edge.a, edge.b, edge.cost());
        match edge.weight {
            Some(weight) => self.weights.insert(edge.ordered(), weight),
            None => self.weights.remove(&edge.ordered()),
        };
    }

    /// Remove a node and all its incident edges.
    ///
    /// Returns `false` if the node didn't exist.
    pub fn remove_node(&mut self, node: N) -> bool {
        if !self.graph.contains_node(node) {
            return false;
        }
        if !self.weights.is_empty() {
            let incident: Vec<N> = self.graph.neighbors(node).collect();
            for other in incident {
                self.weights.remove(&pair_key(node, other));
            }
        }
        self.graph.remove_node(node)
    }
}

impl<N: NodeTrait> Default for Graph<N> {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    // ------------------------------------------------------------------------
    // Cell tests
    // ------------------------------------------------------------------------

    #[test]
    fn test_cell_step() {
        let cell = Cell::new(2, 3);
        assert_eq!(cell.step(Direction::Down), Some(Cell::new(3, 3)));
        assert_eq!(cell.step(Direction::Right), Some(Cell::new(2, 4)));
        assert_eq!(cell.step(Direction::Up), Some(Cell::new(1, 3)));
        assert_eq!(cell.step(Direction::Left), Some(Cell::new(2, 2)));
    }

    #[test]
    fn test_cell_step_at_origin() {
        let origin = Cell::new(0, 0);
        assert_eq!(origin.step(Direction::Up), None);
        assert_eq!(origin.step(Direction::Left), None);
    }

    #[test]
    fn test_cell_manhattan_and_adjacency() {
        let a = Cell::new(1, 1);
        assert_eq!(a.manhattan(Cell::new(4, 5)), 7);
        assert!(a.is_adjacent(Cell::new(0, 1)));
        assert!(!a.is_adjacent(Cell::new(0, 0)));
        assert!(!a.is_adjacent(a));
    }

    #[test]
    fn test_cell_ordering_is_row_major() {
        let mut cells = vec![Cell::new(1, 0), Cell::new(0, 2), Cell::new(0, 1)];
        cells.sort();
        assert_eq!(cells, vec![Cell::new(0, 1), Cell::new(0, 2), Cell::new(1, 0)]);
    }

    #[test]
    fn test_cell_display() {
        assert_eq!(Cell::new(3, 7).to_string(), "(3, 7)");
    }

    #[test]
    fn test_direction_fallbacks_exclude_self() {
        for dir in Direction::PRIORITY {
            assert!(!dir.fallbacks().contains(&dir), "{}", dir.name());
        }
        assert_eq!(
            Direction::Left.fallbacks(),
            [Direction::Right, Direction::Up, Direction::Down]
        );
    }

    // ------------------------------------------------------------------------
    // Edge tests
    // ------------------------------------------------------------------------

    #[test]
    fn test_edge_cost() {
        assert_eq!(Edge::new(0usize, 1).cost(), UNIT_COST);
        assert_eq!(Edge::new(0usize, 1).with_weight(42).cost(), 42.0);
    }

    #[test]
    fn test_edge_joins_either_order() {
        let edge = Edge::new(3usize, 5);
        assert!(edge.joins(3, 5));
        assert!(edge.joins(5, 3));
        assert!(!edge.joins(3, 4));
        assert_eq!(Edge::new(5usize, 3).ordered(), (3, 5));
    }

    // ------------------------------------------------------------------------
    // Graph tests
    // ------------------------------------------------------------------------

    #[test]
    fn test_graph_with_nodes() {
        let graph: Graph<usize> = Graph::with_nodes(0..4);
        assert_eq!(graph.node_count(), 4);
        assert_eq!(graph.edge_count(), 0);
        assert_eq!(graph.sorted_nodes(), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_graph_add_node_twice() {
        let mut graph = Graph::new();
        assert!(graph.add_node(1usize));
        assert!(!graph.add_node(1));
        assert_eq!(graph.node_count(), 1);
    }

    #[test]
    fn test_graph_add_edge_inserts_endpoints() {
        let mut graph = Graph::new();
        graph.add_edge(Cell::new(0, 0), Cell::new(0, 1));

        assert!(graph.contains_node(Cell::new(0, 0)));
        assert!(graph.contains_node(Cell::new(0, 1)));
        assert!(graph.contains_edge(Cell::new(0, 1), Cell::new(0, 0)));
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn test_graph_weighted_edge_record() {
        let mut graph = Graph::with_nodes(0..3usize);
        graph.add_edge(0, 1);
        graph.add_weighted_edge(1, 2, 17);

        assert_eq!(graph.edge(0, 1).and_then(|e| e.weight), None);
        assert_eq!(graph.edge(2, 1).and_then(|e| e.weight), Some(17));
        assert_eq!(graph.as_petgraph().edge_weight(1, 2), Some(&17.0));
    }

    #[test]
    fn test_graph_readding_edge_replaces_weight() {
        let mut graph = Graph::new();
        graph.add_weighted_edge(0usize, 1, 5);
        graph.add_weighted_edge(1, 0, 9);

        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.edge(0, 1).and_then(|e| e.weight), Some(9));
        assert_eq!(graph.as_petgraph().edge_weight(0, 1), Some(&9.0));
    }

    #[test]
    fn test_graph_remove_node_drops_incident_edges() {
        let mut graph = Graph::with_nodes(0..3usize);
        graph.add_edge(0, 1);
        graph.add_edge(1, 2);
        graph.add_edge(0, 2);

        assert!(graph.remove_node(1));
        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edge_count(), 1);
        assert!(graph.contains_edge(0, 2));
        assert!(!graph.remove_node(1));
    }

    #[test]
    fn test_graph_remove_node_drops_incident_weights() {
        let mut graph = Graph::with_nodes(0..4usize);
        graph.add_weighted_edge(0, 1, 3);
        graph.add_weighted_edge(2, 1, 4);
        graph.add_weighted_edge(2, 3, 5);

        assert!(graph.remove_node(1));
        graph.add_edge(0, 1);

        // The re-added edge must not inherit the weight of the removed one.
        assert_eq!(graph.edge(1, 0).and_then(|e| e.weight), None);
        assert_eq!(graph.edge(2, 1), None);
        assert_eq!(graph.edge(3, 2).and_then(|e| e.weight), Some(5));
        assert_eq!(graph.edge_count(), 2);
    }

    #[test]
    fn test_graph_edges_are_ordered_records() {
        let mut graph = Graph::new();
        graph.add_weighted_edge(4usize, 2, 8);
        graph.add_edge(3, 1);

        let edges: Vec<Edge<usize>> = graph.edges().collect();
        assert_eq!(
            edges,
            vec![Edge::new(2, 4).with_weight(8), Edge::new(1, 3)]
        );
        assert!(graph.edge(7, 1).is_none());
    }

    #[test]
    fn test_graph_bulk_removal_keeps_records_in_sync() {
        let mut graph = Graph::new();
        for row in 0..60usize {
            for col in 0..60usize {
                let node = row * 60 + col;
                if col + 1 < 60 {
                    graph.add_weighted_edge(node, node + 1, 2);
                }
                if row + 1 < 60 {
                    graph.add_edge(node, node + 60);
                }
            }
        }
        let before = graph.edge_count();
        let mut removed_edges = 0;
        for node in (0..3600usize).step_by(7) {
            removed_edges += graph.degree(node);
            assert!(graph.remove_node(node));
        }

        assert_eq!(graph.edge_count(), before - removed_edges);
        assert_eq!(graph.edges().count(), graph.edge_count());
        assert_eq!(
            graph.edges().filter(|e| e.weight.is_some()).count(),
            graph.weights.len()
        );
        assert!(graph.edges().all(|e| graph.contains_node(e.a) && graph.contains_node(e.b)));
    }

    #[test]
    fn test_graph_degree_and_neighbors() {
        let mut graph = Graph::with_nodes(0..4usize);
        graph.add_edge(0, 1);
        graph.add_edge(0, 2);

        assert_eq!(graph.degree(0), 2);
        assert_eq!(graph.degree(3), 0);
        let mut neighbors: Vec<usize> = graph.neighbors(0).collect();
        neighbors.sort();
        assert_eq!(neighbors, vec![1, 2]);
    }

    #[test]
    fn test_graph_default_is_empty() {
        let graph: Graph<Cell> = Graph::default();
        assert!(graph.is_empty());
    }
}
