//! Connected-component scan.
//!
//! Components are reported in discovery order: nodes are visited in
//! ascending order and each unvisited node seeds a breadth-first search.
//! The result is not sorted by size, so the first component is the one
//! containing the smallest node, not necessarily the largest.

use crate::Graph;
use petgraph::graphmap::NodeTrait;
use petgraph::visit::Bfs;
use std::collections::{BTreeSet, HashSet};

/// Partition the graph into connected components, in scan order.
pub fn connected_components<N: NodeTrait>(graph: &Graph<N>) -> Vec<BTreeSet<N>> {
    let mut seen: HashSet<N> = HashSet::with_capacity(graph.node_count());
    let mut components = Vec::new();

    for start in graph.sorted_nodes() {
        if seen.contains(&start) {
            continue;
        }
        let mut component = BTreeSet::new();
        let mut bfs = Bfs::new(&graph.graph, start);
        while let Some(node) = bfs.next(&graph.graph) {
            seen.insert(node);
            component.insert(node);
        }
        components.push(component);
    }

    components
}

/// The first component found by the scan, or `None` for an empty graph.
pub fn first_component<N: NodeTrait>(graph: &Graph<N>) -> Option<BTreeSet<N>> {
    connected_components(graph).into_iter().next()
}

/// Whether the graph has at most one component.
///
/// The empty graph counts as connected.
pub fn is_connected<N: NodeTrait>(graph: &Graph<N>) -> bool {
    connected_components(graph).len() <= 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Cell;

    #[test]
    fn test_components_of_empty_graph() {
        let graph: Graph<usize> = Graph::new();
        assert!(connected_components(&graph).is_empty());
        assert!(first_component(&graph).is_none());
        assert!(is_connected(&graph));
    }

    #[test]
    fn test_components_in_scan_order_not_size_order() {
        // {0} alone, then {1, 2, 3}
        let mut graph = Graph::with_nodes(0..4usize);
        graph.add_edge(1, 2);
        graph.add_edge(2, 3);

        let components = connected_components(&graph);
        assert_eq!(components.len(), 2);
        assert_eq!(components[0], BTreeSet::from([0]));
        assert_eq!(components[1], BTreeSet::from([1, 2, 3]));
        assert!(!is_connected(&graph));
    }

    #[test]
    fn test_single_component() {
        let mut graph = Graph::new();
        graph.add_edge(Cell::new(0, 0), Cell::new(0, 1));
        graph.add_edge(Cell::new(0, 1), Cell::new(1, 1));

        assert!(is_connected(&graph));
        let first = first_component(&graph).unwrap();
        assert_eq!(first.len(), 3);
    }

    #[test]
    fn test_scan_order_independent_of_insertion_order() {
        let mut graph = Graph::new();
        graph.add_edge(5usize, 6);
        graph.add_node(2);

        let first = first_component(&graph).unwrap();
        assert_eq!(first, BTreeSet::from([2]));
    }
}
