//! Graph statistics and analysis.
//!
//! Provides functions for summarising the structure of generated graphs:
//! sizes, weight composition, connectivity, and degree distribution.

use crate::Graph;
use crate::connectivity::connected_components;
use petgraph::graphmap::NodeTrait;
use serde::{Deserialize, Serialize};

// ============================================================================
// Types
// ============================================================================

/// Comprehensive statistics about a graph.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GraphStats {
    /// Total number of nodes.
    pub node_count: usize,
    /// Total number of edges.
    pub edge_count: usize,
    /// Edges carrying an explicit weight.
    pub weighted_edge_count: usize,
    /// Sum of explicit weights.
    pub total_weight: u64,
    /// Number of connected components.
    pub component_count: usize,
    /// Size of the largest component.
    pub largest_component: usize,
    /// Nodes without any edges.
    pub isolated_count: usize,
    /// Average edges per node.
    pub avg_degree: f32,
    /// Maximum degree.
    pub max_degree: usize,
}

// ============================================================================
// Functions
// ============================================================================

/// Compute comprehensive statistics for a graph.
pub fn compute_stats<N: NodeTrait>(graph: &Graph<N>) -> GraphStats {
    let node_count = graph.node_count();
    let edge_count = graph.edge_count();

    let weighted_edge_count = graph.edges().filter(|e| e.weight.is_some()).count();
    let total_weight = graph
        .edges()
        .filter_map(|e| e.weight)
        .map(u64::from)
        .sum();

    let components = connected_components(graph);
    let largest_component = components.iter().map(|c| c.len()).max().unwrap_or(0);

    let degrees: Vec<usize> = graph.nodes().map(|n| graph.degree(n)).collect();
    let isolated_count = degrees.iter().filter(|&&d| d == 0).count();
    let max_degree = degrees.iter().copied().max().unwrap_or(0);
    let avg_degree = if node_count > 0 {
        (2 * edge_count) as f32 / node_count as f32
    } else {
        0.0
    };

    GraphStats {
        node_count,
        edge_count,
        weighted_edge_count,
        total_weight,
        component_count: components.len(),
        largest_component,
        isolated_count,
        avg_degree,
        max_degree,
    }
}

/// Get a quick summary of graph size.
pub fn quick_summary<N: NodeTrait>(graph: &Graph<N>) -> String {
    format!("{} nodes, {} edges", graph.node_count(), graph.edge_count())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_graph() -> Graph<usize> {
        let mut graph = Graph::with_nodes(0..5);
        graph.add_edge(0, 1);
        graph.add_weighted_edge(1, 2, 30);
        graph.add_weighted_edge(0, 2, 12);
        // 3 - 4 form a second component
        graph.add_edge(3, 4);
        graph
    }

    #[test]
    fn test_compute_stats_basic_counts() {
        let stats = compute_stats(&create_test_graph());

        assert_eq!(stats.node_count, 5);
        assert_eq!(stats.edge_count, 4);
    }

    #[test]
    fn test_compute_stats_weights() {
        let stats = compute_stats(&create_test_graph());

        assert_eq!(stats.weighted_edge_count, 2);
        assert_eq!(stats.total_weight, 42);
    }

    #[test]
    fn test_compute_stats_components() {
        let stats = compute_stats(&create_test_graph());

        assert_eq!(stats.component_count, 2);
        assert_eq!(stats.largest_component, 3);
        assert_eq!(stats.isolated_count, 0);
    }

    #[test]
    fn test_compute_stats_degrees() {
        let stats = compute_stats(&create_test_graph());

        // 4 edges, 5 nodes: 8 / 5
        assert!((stats.avg_degree - 1.6).abs() < 0.01);
        assert_eq!(stats.max_degree, 2);
    }

    #[test]
    fn test_compute_stats_isolated() {
        let mut graph = create_test_graph();
        graph.add_node(9);
        let stats = compute_stats(&graph);

        assert_eq!(stats.isolated_count, 1);
        assert_eq!(stats.component_count, 3);
    }

    #[test]
    fn test_compute_stats_empty_graph() {
        let graph: Graph<usize> = Graph::new();
        let stats = compute_stats(&graph);

        assert_eq!(stats.node_count, 0);
        assert_eq!(stats.edge_count, 0);
        assert_eq!(stats.component_count, 0);
        assert_eq!(stats.largest_component, 0);
        assert_eq!(stats.avg_degree, 0.0);
    }

    #[test]
    fn test_quick_summary() {
        assert_eq!(quick_summary(&create_test_graph()), "5 nodes, 4 edges");
    }

    #[test]
    fn test_quick_summary_empty() {
        let graph: Graph<usize> = Graph::new();
        assert_eq!(quick_summary(&graph), "0 nodes, 0 edges");
    }

    #[test]
    fn test_graph_stats_serialization() {
        let stats = compute_stats(&create_test_graph());

        let json = serde_json::to_string(&stats).unwrap();
        let parsed: GraphStats = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.node_count, stats.node_count);
        assert_eq!(parsed.weighted_edge_count, stats.weighted_edge_count);
        assert_eq!(parsed.component_count, stats.component_count);
    }
}
