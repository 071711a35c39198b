//! Graph validation and integrity checking.
//!
//! Provides functions to validate generated graphs and detect issues such
//! as self-loops, disconnected fragments, and isolated nodes.

use crate::Graph;
use crate::connectivity::connected_components;
use petgraph::graphmap::NodeTrait;
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Types
// ============================================================================

/// Result of graph validation.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ValidationResult {
    /// Whether the graph is valid (no critical issues).
    pub valid: bool,
    /// Critical issues that should be fixed.
    pub errors: Vec<ValidationIssue>,
    /// Non-critical issues (warnings).
    pub warnings: Vec<ValidationIssue>,
}

impl ValidationResult {
    /// Create a new empty (valid) result.
    pub fn new() -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Add an error (marks graph as invalid).
    pub fn add_error(&mut self, issue: ValidationIssue) {
        self.valid = false;
        self.errors.push(issue);
    }

    /// Add a warning.
    pub fn add_warning(&mut self, issue: ValidationIssue) {
        self.warnings.push(issue);
    }

    /// Total issue count (errors + warnings).
    pub fn total_issues(&self) -> usize {
        self.errors.len() + self.warnings.len()
    }

    /// Whether an issue with `code` was reported.
    pub fn has_issue(&self, code: &str) -> bool {
        self.errors
            .iter()
            .chain(self.warnings.iter())
            .any(|issue| issue.code == code)
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::new()
    }
}

/// A validation issue found in the graph.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ValidationIssue {
    /// Issue type/code.
    pub code: String,
    /// Human-readable message.
    pub message: String,
    /// Affected nodes (if applicable).
    pub nodes: Vec<String>,
    /// Affected edge descriptions (if applicable).
    pub edges: Vec<String>,
}

impl ValidationIssue {
    /// Create a new issue.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            nodes: Vec::new(),
            edges: Vec::new(),
        }
    }

    /// Attach affected nodes.
    pub fn with_nodes(mut self, nodes: Vec<String>) -> Self {
        self.nodes = nodes;
        self
    }

    /// Attach affected edges.
    pub fn with_edges(mut self, edges: Vec<String>) -> Self {
        self.edges = edges;
        self
    }
}

// ============================================================================
// Validation functions
// ============================================================================

/// Validate a graph for common issues.
///
/// Checks for:
/// - Self-loops (edge from node to itself)
/// - Disconnected graph (more than one component)
/// - Isolated nodes (no edges)
pub fn validate_graph<N: NodeTrait + fmt::Display>(graph: &Graph<N>) -> ValidationResult {
    let mut result = ValidationResult::new();

    check_self_loops(graph, &mut result);
    check_connectivity(graph, &mut result);
    check_isolated(graph, &mut result);

    result
}

/// Quick check if graph has any validation errors.
pub fn is_valid<N: NodeTrait + fmt::Display>(graph: &Graph<N>) -> bool {
    validate_graph(graph).valid
}

// ============================================================================
// Individual checks
// ============================================================================

fn check_self_loops<N: NodeTrait + fmt::Display>(graph: &Graph<N>, result: &mut ValidationResult) {
    let self_loops: Vec<String> = graph
        .edges()
        .filter(|edge| edge.a == edge.b)
        .map(|edge| format!("{} -- {}", edge.a, edge.b))
        .collect();

    if !self_loops.is_empty() {
        result.add_error(
            ValidationIssue::new(
                "SELF_LOOPS",
                format!("{} edge(s) are self-loops", self_loops.len()),
            )
            .with_edges(self_loops),
        );
    }
}

/// Reports every component after the first as detached.
fn check_connectivity<N: NodeTrait + fmt::Display>(
    graph: &Graph<N>,
    result: &mut ValidationResult,
) {
    let components = connected_components(graph);
    if components.len() <= 1 {
        return;
    }

    let detached: Vec<String> = components
        .iter()
        .skip(1)
        .flat_map(|component| component.iter().map(|n| n.to_string()))
        .collect();

    result.add_error(
        ValidationIssue::new(
            "DISCONNECTED",
            format!(
                "graph has {} components; {} node(s) are detached from the first",
                components.len(),
                detached.len()
            ),
        )
        .with_nodes(detached),
    );
}

fn check_isolated<N: NodeTrait + fmt::Display>(graph: &Graph<N>, result: &mut ValidationResult) {
    if graph.node_count() < 2 {
        return;
    }

    let isolated: Vec<String> = graph
        .sorted_nodes()
        .into_iter()
        .filter(|&n| graph.degree(n) == 0)
        .map(|n| n.to_string())
        .collect();

    if !isolated.is_empty() {
        result.add_warning(
            ValidationIssue::new(
                "ISOLATED_NODES",
                format!("{} node(s) have no connections", isolated.len()),
            )
            .with_nodes(isolated),
        );
    }
}

// ============================================================================
// Tests
// ============================================================================
