//! Contact Network
//!
//! The directed, weighted contact graph shared by all agents, plus the fixed
//! circular layout read by rendering collaborators.

use bevy_ecs::prelude::*;

/// A directed tie to another node with its current trust weight
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub target: usize,
    pub weight: f32,
}

/// Directed contact graph over dense node ids `0..node_count`.
///
/// Out-edges are stored per node in insertion order; adjacency rows are
/// short (average degree), so weight lookups scan the row. Self-loops are
/// never materialized.
#[derive(Resource, Debug, Clone, Default)]
pub struct ContactGraph {
    out_edges: Vec<Vec<Edge>>,
    positions: Vec<[f32; 2]>,
    edge_count: usize,
}

impl ContactGraph {
    /// Create a graph with `n` isolated nodes and a fixed circular layout.
    pub fn with_nodes(n: usize) -> Self {
        let positions = (0..n)
            .map(|i| {
                let angle = 2.0 * std::f32::consts::PI * i as f32 / n.max(1) as f32;
                [angle.cos(), angle.sin()]
            })
            .collect();
        Self {
            out_edges: vec![Vec::new(); n],
            positions,
            edge_count: 0,
        }
    }

    pub fn node_count(&self) -> usize {
        self.out_edges.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Insert a directed edge. Self-loops and duplicates are skipped.
    pub fn add_edge(&mut self, from: usize, to: usize, weight: f32) {
        if from == to || self.has_edge(from, to) {
            return;
        }
        self.out_edges[from].push(Edge { target: to, weight });
        self.edge_count += 1;
    }

    pub fn has_edge(&self, from: usize, to: usize) -> bool {
        self.out_edges[from].iter().any(|e| e.target == to)
    }

    /// Current weight of the edge `from -> to`, if it exists.
    pub fn weight(&self, from: usize, to: usize) -> Option<f32> {
        self.out_edges[from]
            .iter()
            .find(|e| e.target == to)
            .map(|e| e.weight)
    }

    /// Multiply the weight of `from -> to`. Returns false when the edge is
    /// missing, which callers treat as "skip", never as an error.
    pub fn scale_weight(&mut self, from: usize, to: usize, factor: f32) -> bool {
        if let Some(edge) = self.out_edges[from].iter_mut().find(|e| e.target == to) {
            edge.weight *= factor;
            true
        } else {
            false
        }
    }

    /// Outgoing ties of `node` in insertion order.
    pub fn out_neighbors(&self, node: usize) -> &[Edge] {
        &self.out_edges[node]
    }

    pub fn out_degree(&self, node: usize) -> usize {
        self.out_edges[node].len()
    }

    /// Every edge weight, in (source, insertion) order.
    pub fn weight_list(&self) -> Vec<f32> {
        self.out_edges
            .iter()
            .flat_map(|row| row.iter().map(|e| e.weight))
            .collect()
    }

    /// Iterate all directed edges as (source, target, weight).
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize, f32)> + '_ {
        self.out_edges
            .iter()
            .enumerate()
            .flat_map(|(source, row)| row.iter().map(move |e| (source, e.target, e.weight)))
    }

    /// Fixed layout position of `node`, computed once at construction.
    pub fn position(&self, node: usize) -> [f32; 2] {
        self.positions[node]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_lookup_edges() {
        let mut graph = ContactGraph::with_nodes(3);
        graph.add_edge(0, 1, 0.5);
        graph.add_edge(1, 0, 0.8);

        assert_eq!(graph.edge_count(), 2);
        assert!(graph.has_edge(0, 1));
        assert!(!graph.has_edge(0, 2));
        assert_eq!(graph.weight(1, 0), Some(0.8));
        assert_eq!(graph.weight(2, 0), None);
    }

    #[test]
    fn test_self_loops_are_skipped() {
        let mut graph = ContactGraph::with_nodes(2);
        graph.add_edge(0, 0, 1.0);
        assert_eq!(graph.edge_count(), 0);
        assert!(!graph.has_edge(0, 0));
    }

    #[test]
    fn test_duplicate_edges_are_skipped() {
        let mut graph = ContactGraph::with_nodes(2);
        graph.add_edge(0, 1, 1.0);
        graph.add_edge(0, 1, 0.3);
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.weight(0, 1), Some(1.0));
    }

    #[test]
    fn test_scale_weight() {
        let mut graph = ContactGraph::with_nodes(2);
        graph.add_edge(0, 1, 1.0);

        assert!(graph.scale_weight(0, 1, 0.5));
        assert_eq!(graph.weight(0, 1), Some(0.5));
        // Missing edge is a skip, not an error
        assert!(!graph.scale_weight(1, 0, 0.5));
    }

    #[test]
    fn test_weight_list_covers_all_edges() {
        let mut graph = ContactGraph::with_nodes(3);
        graph.add_edge(0, 1, 0.1);
        graph.add_edge(1, 2, 0.2);
        graph.add_edge(2, 0, 0.3);

        let weights = graph.weight_list();
        assert_eq!(weights.len(), 3);
        assert_eq!(graph.edges().count(), 3);
    }

    #[test]
    fn test_positions_on_unit_circle() {
        let graph = ContactGraph::with_nodes(4);
        for node in 0..4 {
            let [x, y] = graph.position(node);
            assert!((x * x + y * y - 1.0).abs() < 1e-5);
        }
    }
}
