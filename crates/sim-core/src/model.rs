//! Simulation Model
//!
//! Owns the ECS world, drives ticks, and exposes the metrics and snapshot
//! surfaces consumed by external reporting tools. Construction validates
//! every parameter and runs the network builder, agent spawner, and
//! misinformation seeder in a fixed order so equal seeds replay exactly.

use std::collections::HashMap;

use bevy_ecs::prelude::*;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use thiserror::Error;
use uuid::Uuid;

use sim_metrics::{GraphSnapshot, RunSummary, TickRecord};

use crate::components::agent::Belief;
use crate::components::network::ContactGraph;
use crate::config::{ConfigError, SimulationConfig};
use crate::output::snapshot::generate_snapshot;
use crate::output::stats::{collect_metrics, MetricsCollector};
use crate::setup::agents::{spawn_agents, NodeIndex};
use crate::setup::network::build_network;
use crate::setup::seeding::choose_seed_node;
use crate::setup::SetupError;
use crate::systems::run_agent_updates;
use crate::{SimRng, SimulationState};

/// Fatal model-construction errors. Nothing ticks after one of these.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Setup(#[from] SetupError),
}

/// A single simulation run.
pub struct Simulation {
    world: World,
    config: SimulationConfig,
    run_id: Uuid,
    ticks_run: u64,
}

impl Simulation {
    /// Build a run: validate, construct the network, spawn agents, seed
    /// the misinformation, and record the construction-time metrics row.
    pub fn new(config: SimulationConfig) -> Result<Self, BuildError> {
        config.validate()?;

        let mut rng = SmallRng::seed_from_u64(config.seed);
        let (graph, roles) = build_network(&config, &mut rng)?;

        let mut world = World::new();
        world.insert_resource(SimulationState {
            current_tick: 0,
            running: true,
            info_format: config.info_format,
            fact_checking_prob: config.fact_checking_prob,
            confidence_deprecation_rate: config.confidence_deprecation_rate,
        });
        world.insert_resource(MetricsCollector::new());

        let index = spawn_agents(&mut world, &config, &roles, &mut rng)?;
        let seed_node = choose_seed_node(&graph, &roles, config.seed_mode, &mut rng)?;
        if let Some(mut belief) = world.get_mut::<Belief>(index.entity(seed_node)) {
            *belief = Belief::new(1.0);
        }

        world.insert_resource(graph);
        world.insert_resource(index);
        world.insert_resource(SimRng(rng));

        collect_metrics(&mut world);

        let run_id = Uuid::new_v4();
        tracing::info!(
            %run_id,
            seed = config.seed,
            nodes = config.total_nodes(),
            seed_node,
            "constructed simulation"
        );

        Ok(Self {
            world,
            config,
            run_id,
            ticks_run: 0,
        })
    }

    /// Build a run from a flat parameter map, for sweep drivers.
    pub fn from_params(params: &HashMap<String, String>) -> Result<Self, BuildError> {
        Self::new(SimulationConfig::from_params(params)?)
    }

    /// Execute one tick: shuffled agent updates, then metrics, then the
    /// saturation check.
    pub fn step(&mut self) {
        self.world.resource_mut::<SimulationState>().current_tick += 1;
        run_agent_updates(&mut self.world);
        collect_metrics(&mut self.world);
        self.ticks_run += 1;

        let saturated = self
            .world
            .resource::<MetricsCollector>()
            .saturated(self.config.total_nodes());
        if saturated {
            self.world.resource_mut::<SimulationState>().running = false;
            tracing::debug!(tick = self.ticks_run, "belief saturated, halting");
        }
    }

    /// Step until saturation or the tick budget is exhausted.
    pub fn run(&mut self, max_ticks: u64) -> RunSummary {
        while self.running() && self.ticks_run < max_ticks {
            self.step();
        }
        self.summary()
    }

    pub fn running(&self) -> bool {
        self.world.resource::<SimulationState>().running
    }

    pub fn current_tick(&self) -> u64 {
        self.ticks_run
    }

    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Per-tick metrics history, including the construction-time row.
    pub fn metrics(&self) -> &[TickRecord] {
        &self.world.resource::<MetricsCollector>().history
    }

    /// Current belief vector in node order.
    pub fn beliefs(&self) -> Vec<f32> {
        let index = self.world.resource::<NodeIndex>();
        index
            .iter()
            .map(|entity| {
                self.world
                    .get::<Belief>(entity)
                    .map(|b| b.value())
                    .unwrap_or(0.0)
            })
            .collect()
    }

    /// Read-only contact graph access for introspection.
    pub fn graph(&self) -> &ContactGraph {
        self.world.resource::<ContactGraph>()
    }

    /// Read-only network snapshot for rendering collaborators.
    pub fn snapshot(&self) -> GraphSnapshot {
        generate_snapshot(&self.world)
    }

    /// Final state for serialization by sweep drivers.
    pub fn summary(&self) -> RunSummary {
        let history = self.metrics().to_vec();
        let final_record = history.last().cloned().unwrap_or(TickRecord {
            tick: 0,
            trust: 0.0,
            distrust: 0.0,
            neglect: 1.0,
            belief_total: 0.0,
        });
        RunSummary {
            run_id: self.run_id,
            seed: self.config.seed,
            ticks: self.ticks_run,
            saturated: !self.running(),
            final_record,
            history,
        }
    }
}
