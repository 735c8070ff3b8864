//! Tick Systems
//!
//! The per-tick update protocol. Every agent runs its spreading phase and
//! then its fact-checking phase, in an order freshly shuffled each tick.
//! There is no dynamic dispatch: one fixed update path per agent.

pub mod fact_check;
pub mod spread;

pub use fact_check::{adjust_weights, fact_check};
pub use spread::{classify, influence, select_receivers, spread_from, Disposition};

use bevy_ecs::prelude::*;
use rand::seq::SliceRandom;

use crate::setup::agents::NodeIndex;
use crate::SimRng;

/// Run one full tick of agent updates.
///
/// The RNG resource is taken out for the duration of the tick so agent
/// updates can borrow the world mutably while drawing from it.
pub fn run_agent_updates(world: &mut World) {
    let Some(mut rng) = world.remove_resource::<SimRng>() else {
        return;
    };

    let mut order: Vec<usize> = (0..world.resource::<NodeIndex>().len()).collect();
    order.shuffle(&mut rng.0);

    for node in order {
        spread::spread_from(world, node, &mut rng.0);
        fact_check::fact_check(world, node, &mut rng.0);
    }

    world.insert_resource(rng);
}
