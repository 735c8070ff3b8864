//! Graph Snapshot
//!
//! Read-only view of the network for rendering collaborators: node roles,
//! current beliefs, fixed layout positions, and per-edge weights. Nothing
//! here is ever written back into the simulation.

use bevy_ecs::prelude::*;
use std::fs;
use std::path::Path;

use sim_metrics::{EdgeSnapshot, GraphSnapshot, NodeSnapshot};

use crate::components::agent::{Belief, NodeRole};
use crate::components::network::ContactGraph;
use crate::setup::agents::NodeIndex;
use crate::SimulationState;

/// Capture the current network state.
pub fn generate_snapshot(world: &World) -> GraphSnapshot {
    let graph = world.resource::<ContactGraph>();
    let index = world.resource::<NodeIndex>();
    let tick = world.resource::<SimulationState>().current_tick;

    let nodes = (0..graph.node_count())
        .map(|node| {
            let entity = index.entity(node);
            let role = world
                .get::<NodeRole>(entity)
                .map(|r| r.label())
                .unwrap_or("resident");
            let belief = world
                .get::<Belief>(entity)
                .map(|b| b.value())
                .unwrap_or(0.0);
            NodeSnapshot {
                id: node,
                role: role.to_string(),
                belief,
                position: graph.position(node),
            }
        })
        .collect();

    let edges = graph
        .edges()
        .map(|(source, target, weight)| EdgeSnapshot {
            source,
            target,
            weight,
        })
        .collect();

    GraphSnapshot { tick, nodes, edges }
}

/// Write a snapshot as pretty JSON.
pub fn write_snapshot(snapshot: &GraphSnapshot, path: impl AsRef<Path>) -> std::io::Result<()> {
    if let Some(parent) = path.as_ref().parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let json = serde_json::to_string_pretty(snapshot)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
    fs::write(path, json)
}
