//! Spreading Phase
//!
//! Disposition classification, receiver selection, and message delivery.
//! Belief mutations land on receivers immediately, so agents later in the
//! tick order see them; that asynchrony is part of the model.

use bevy_ecs::prelude::*;
use rand::rngs::SmallRng;
use rand::Rng;

use crate::components::agent::{belief_bands, Belief, ReceivedLog, Traits};
use crate::components::network::ContactGraph;
use crate::config::InfoFormat;
use crate::setup::agents::NodeIndex;
use crate::SimulationState;

/// Influence multipliers applied on contact
pub mod influence {
    /// Chance an attempted contact actually happens, per receiver per tick
    pub const CONTACT_PROB: f64 = 0.5;
    /// Boost from a reciprocated tie when the receiver seeks engagement
    pub const ENGAGEMENT_BOOST: f32 = 1.1;
    /// Boost when the misinformation circulates in visual form
    pub const VISUAL_BOOST: f32 = 1.1;
    /// Boost when the sender is staff (higher-authority source)
    pub const AUTHORITY_BOOST: f32 = 1.1;
}

/// How loudly an agent shares its current stance this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// Strong (dis)trust: contact every outgoing neighbor
    Broadcast,
    /// Moderate (dis)trust: contact the closest neighbor only
    Confide,
    /// Weak stance: say nothing
    Silent,
}

/// Classify a belief scale into its disposition band.
pub fn classify(belief: f32) -> Disposition {
    let strength = belief.abs();
    if strength > belief_bands::BROADCAST {
        Disposition::Broadcast
    } else if strength > belief_bands::CONFIDE {
        Disposition::Confide
    } else {
        Disposition::Silent
    }
}

/// Receivers for this tick given the sender's disposition.
pub fn select_receivers(
    graph: &ContactGraph,
    sender: usize,
    disposition: Disposition,
) -> Vec<usize> {
    match disposition {
        Disposition::Silent => Vec::new(),
        Disposition::Broadcast => graph
            .out_neighbors(sender)
            .iter()
            .map(|e| e.target)
            .collect(),
        Disposition::Confide => closest_neighbor(graph, sender).into_iter().collect(),
    }
}

/// Outgoing neighbor with the strongest tie; the first seen wins ties.
fn closest_neighbor(graph: &ContactGraph, sender: usize) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;
    for edge in graph.out_neighbors(sender) {
        match best {
            Some((_, weight)) if edge.weight <= weight => {}
            _ => best = Some((edge.target, edge.weight)),
        }
    }
    best.map(|(target, _)| target)
}

/// Run one agent's spreading phase: classify, pick receivers, deliver.
pub fn spread_from(world: &mut World, sender: usize, rng: &mut SmallRng) {
    let sender_entity = world.resource::<NodeIndex>().entity(sender);
    let (sender_belief, sender_se_motivated) = {
        let Some(belief) = world.get::<Belief>(sender_entity) else {
            return;
        };
        let Some(traits) = world.get::<Traits>(sender_entity) else {
            return;
        };
        (belief.value(), traits.se_motivated)
    };

    let receivers = select_receivers(
        world.resource::<ContactGraph>(),
        sender,
        classify(sender_belief),
    );

    for receiver in receivers {
        if !rng.gen_bool(influence::CONTACT_PROB) {
            continue;
        }
        deliver(world, sender, sender_belief, sender_se_motivated, receiver);
    }
}

/// Deliver one message: log it, then shift the receiver's belief by its
/// susceptibility times the engagement, format, and authority multipliers.
fn deliver(
    world: &mut World,
    sender: usize,
    sender_belief: f32,
    sender_se_motivated: bool,
    receiver: usize,
) {
    let receiver_entity = world.resource::<NodeIndex>().entity(receiver);

    if let Some(mut log) = world.get_mut::<ReceivedLog>(receiver_entity) {
        log.push(sender, sender_belief);
    }

    let Some(traits) = world.get::<Traits>(receiver_entity) else {
        return;
    };
    let (digital_literacy, cognitive_ability, se_motivated) = (
        traits.digital_literacy,
        traits.cognitive_ability,
        traits.se_motivated,
    );

    // A reciprocated tie back to the sender amplifies (or dampens, under
    // weak ties) the socially motivated receiver; a missing edge is no boost
    let engagement = if se_motivated {
        world
            .resource::<ContactGraph>()
            .weight(receiver, sender)
            .map(|w| influence::ENGAGEMENT_BOOST * w)
            .unwrap_or(1.0)
    } else {
        1.0
    };
    let format = match world.resource::<SimulationState>().info_format {
        InfoFormat::Visual => influence::VISUAL_BOOST,
        InfoFormat::Text => 1.0,
    };
    let authority = if sender_se_motivated {
        1.0
    } else {
        influence::AUTHORITY_BOOST
    };

    let delta = digital_literacy * cognitive_ability * format * engagement * authority;
    if let Some(mut belief) = world.get_mut::<Belief>(receiver_entity) {
        belief.shift(delta);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_bands() {
        assert_eq!(classify(0.9), Disposition::Broadcast);
        assert_eq!(classify(-0.8), Disposition::Broadcast);
        assert_eq!(classify(0.5), Disposition::Confide);
        assert_eq!(classify(-0.4), Disposition::Confide);
        assert_eq!(classify(0.1), Disposition::Silent);
        assert_eq!(classify(-0.2), Disposition::Silent);
        assert_eq!(classify(0.0), Disposition::Silent);
    }

    #[test]
    fn test_classify_band_boundaries() {
        // Boundaries are inclusive downward
        assert_eq!(classify(0.66), Disposition::Confide);
        assert_eq!(classify(0.33), Disposition::Silent);
        assert_eq!(classify(-0.33), Disposition::Silent);
        assert_eq!(classify(-0.66), Disposition::Confide);
    }

    #[test]
    fn test_broadcast_selects_all_out_neighbors() {
        let mut graph = ContactGraph::with_nodes(4);
        graph.add_edge(0, 1, 1.0);
        graph.add_edge(0, 2, 1.0);
        graph.add_edge(3, 0, 1.0);

        let receivers = select_receivers(&graph, 0, Disposition::Broadcast);
        assert_eq!(receivers, vec![1, 2]);
    }

    #[test]
    fn test_confide_picks_heaviest_tie() {
        let mut graph = ContactGraph::with_nodes(4);
        graph.add_edge(0, 1, 0.2);
        graph.add_edge(0, 2, 0.9);
        graph.add_edge(0, 3, 0.5);

        let receivers = select_receivers(&graph, 0, Disposition::Confide);
        assert_eq!(receivers, vec![2]);
    }

    #[test]
    fn test_confide_ties_break_by_first_seen() {
        let mut graph = ContactGraph::with_nodes(3);
        graph.add_edge(0, 2, 1.0);
        graph.add_edge(0, 1, 1.0);

        let receivers = select_receivers(&graph, 0, Disposition::Confide);
        assert_eq!(receivers, vec![2]);
    }

    #[test]
    fn test_silent_and_isolated_select_nobody() {
        let graph = ContactGraph::with_nodes(2);
        assert!(select_receivers(&graph, 0, Disposition::Silent).is_empty());
        assert!(select_receivers(&graph, 0, Disposition::Broadcast).is_empty());
        assert!(select_receivers(&graph, 1, Disposition::Confide).is_empty());
    }
}
