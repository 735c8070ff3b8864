//! Fact-Checking Phase
//!
//! Probabilistic self-correction against held misinformation, followed by
//! trust-weight deprecation toward every source that spread it.

use bevy_ecs::prelude::*;
use rand::rngs::SmallRng;
use rand::Rng;

use crate::components::agent::{Belief, ReceivedLog, ReceivedSignal};
use crate::components::network::ContactGraph;
use crate::setup::agents::NodeIndex;
use crate::SimulationState;

/// Fraction of a trusting belief that survives a fact-check
const CORRECTION_FACTOR: f32 = 0.5;

/// Run one agent's fact-checking phase.
///
/// The check fires with probability `1 - fact_checking_prob`. When it fires
/// on a currently trusting agent, the belief halves and every logged sender
/// of a trusting signal loses edge weight.
pub fn fact_check(world: &mut World, node: usize, rng: &mut SmallRng) {
    let (fact_checking_prob, deprecation_rate) = {
        let state = world.resource::<SimulationState>();
        (state.fact_checking_prob, state.confidence_deprecation_rate)
    };

    if rng.gen::<f32>() <= fact_checking_prob {
        return;
    }

    let entity = world.resource::<NodeIndex>().entity(node);
    let trusting = world
        .get::<Belief>(entity)
        .map(|b| b.value() > 0.0)
        .unwrap_or(false);
    if !trusting {
        return;
    }

    if let Some(mut belief) = world.get_mut::<Belief>(entity) {
        belief.scale(CORRECTION_FACTOR);
    }
    adjust_weights(world, node, deprecation_rate);
}

/// Deprecate trust toward every logged sender whose signal was trusting.
///
/// The log is never cleared within a run, so senders penalized once are
/// penalized again on the next fact-check. A missing edge back to the
/// sender is skipped, never an error.
pub fn adjust_weights(world: &mut World, node: usize, deprecation_rate: f32) {
    let entity = world.resource::<NodeIndex>().entity(node);
    let entries: Vec<ReceivedSignal> = match world.get::<ReceivedLog>(entity) {
        Some(log) => log.entries.clone(),
        None => return,
    };

    let mut graph = world.resource_mut::<ContactGraph>();
    for signal in entries {
        if signal.attitude > 0.0 {
            graph.scale_weight(node, signal.sender, deprecation_rate);
        }
    }
}
