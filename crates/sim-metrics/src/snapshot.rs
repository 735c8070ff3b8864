//! Snapshot Types
//!
//! Read-only serialization structs describing the contact network at a
//! point in time: node roles and beliefs, edge weights, and the fixed
//! layout positions. Used by rendering collaborators; never written back.

use serde::{Deserialize, Serialize};

/// One node of the contact graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeSnapshot {
    pub id: usize,
    /// "resident" or "staff"
    pub role: String,
    pub belief: f32,
    /// Fixed layout position computed once at construction
    pub position: [f32; 2],
}

/// One directed tie with its current trust weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeSnapshot {
    pub source: usize,
    pub target: usize,
    pub weight: f32,
}

/// Complete view of the network state at one tick.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphSnapshot {
    pub tick: u64,
    pub nodes: Vec<NodeSnapshot>,
    pub edges: Vec<EdgeSnapshot>,
}

impl GraphSnapshot {
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_counts() {
        let snapshot = GraphSnapshot {
            tick: 3,
            nodes: vec![NodeSnapshot {
                id: 0,
                role: "resident".to_string(),
                belief: 0.5,
                position: [1.0, 0.0],
            }],
            edges: Vec::new(),
        };

        assert_eq!(snapshot.node_count(), 1);
        assert_eq!(snapshot.edge_count(), 0);
    }
}
