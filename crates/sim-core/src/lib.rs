//! Misinformation diffusion over a resident/staff contact network.
//!
//! Agents exchange belief signals along weighted directed ties, revise
//! their own belief strength from cognitive and digital-literacy traits,
//! and occasionally fact-check and penalize unreliable contacts.

use bevy_ecs::prelude::*;
use rand::rngs::SmallRng;

pub mod components;
pub mod config;
pub mod model;
pub mod output;
pub mod setup;
pub mod systems;

pub use components::*;
pub use config::{ConfigError, InfoFormat, SeedMode, SimulationConfig, Topology};
pub use model::{BuildError, Simulation};

/// Seeded random number generator resource.
/// One source per run is the reproducibility contract.
#[derive(Resource)]
pub struct SimRng(pub SmallRng);

/// Global tick state and the protocol parameters read inside a tick.
#[derive(Resource, Debug, Clone)]
pub struct SimulationState {
    pub current_tick: u64,
    /// Cleared when the population saturates
    pub running: bool,
    pub info_format: InfoFormat,
    pub fact_checking_prob: f32,
    pub confidence_deprecation_rate: f32,
}
