//! Agent Spawning
//!
//! Creates one agent entity per graph node with Beta-distributed traits.
//! Residents and staff swap the cognitive shape parameters, so staff skew
//! toward higher ability; digital literacy uses the same shapes for both.

use bevy_ecs::prelude::*;
use rand::rngs::SmallRng;
use rand_distr::{Beta, Distribution};

use crate::components::agent::{Agent, Belief, NodeId, NodeRole, ReceivedLog, Traits};
use crate::config::SimulationConfig;
use crate::setup::SetupError;

/// Maps node ids to their agent entities, in node order.
/// Built once at spawn; the tick driver and metrics walk it.
#[derive(Resource, Debug, Default)]
pub struct NodeIndex {
    entities: Vec<Entity>,
}

impl NodeIndex {
    pub fn from_entities(entities: Vec<Entity>) -> Self {
        Self { entities }
    }

    pub fn entity(&self, node: usize) -> Entity {
        self.entities[node]
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Entity> + '_ {
        self.entities.iter().copied()
    }
}

/// Spawn every agent and return the node -> entity index.
pub fn spawn_agents(
    world: &mut World,
    config: &SimulationConfig,
    roles: &[NodeRole],
    rng: &mut SmallRng,
) -> Result<NodeIndex, SetupError> {
    let resident_cognitive = beta_dist(config.cognitive_alpha, config.cognitive_beta)?;
    let staff_cognitive = beta_dist(config.cognitive_beta, config.cognitive_alpha)?;
    let literacy = beta_dist(config.literacy_alpha, config.literacy_beta)?;

    let mut entities = Vec::with_capacity(roles.len());
    for (node, &role) in roles.iter().enumerate() {
        let cognitive_ability = match role {
            NodeRole::Resident => resident_cognitive.sample(rng),
            NodeRole::Staff => staff_cognitive.sample(rng),
        };
        let traits = Traits {
            cognitive_ability,
            digital_literacy: literacy.sample(rng),
            se_motivated: !role.is_staff(),
        };
        let entity = world
            .spawn((
                Agent,
                NodeId(node),
                role,
                traits,
                Belief::default(),
                ReceivedLog::default(),
            ))
            .id();
        entities.push(entity);
    }
    Ok(NodeIndex::from_entities(entities))
}

fn beta_dist(alpha: f32, beta: f32) -> Result<Beta<f32>, SetupError> {
    Beta::new(alpha, beta).map_err(|e| SetupError::Distribution(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_spawn_creates_one_agent_per_node() {
        let mut world = World::new();
        let config = SimulationConfig::default();
        let roles = vec![NodeRole::Resident, NodeRole::Staff, NodeRole::Resident];
        let mut rng = SmallRng::seed_from_u64(11);

        let index = spawn_agents(&mut world, &config, &roles, &mut rng).unwrap();
        assert_eq!(index.len(), 3);

        for (node, &role) in roles.iter().enumerate() {
            let entity = index.entity(node);
            assert_eq!(world.get::<NodeId>(entity).unwrap().0, node);
            assert_eq!(*world.get::<NodeRole>(entity).unwrap(), role);
            assert_eq!(world.get::<Belief>(entity).unwrap().value(), 0.0);
            assert!(world.get::<ReceivedLog>(entity).unwrap().is_empty());
        }
    }

    #[test]
    fn test_traits_stay_in_unit_interval() {
        let mut world = World::new();
        let config = SimulationConfig::default();
        let roles = vec![NodeRole::Resident; 40];
        let mut rng = SmallRng::seed_from_u64(12);

        let index = spawn_agents(&mut world, &config, &roles, &mut rng).unwrap();
        for entity in index.iter() {
            let traits = world.get::<Traits>(entity).unwrap();
            assert!((0.0..=1.0).contains(&traits.cognitive_ability));
            assert!((0.0..=1.0).contains(&traits.digital_literacy));
            assert!(traits.se_motivated);
        }
    }

    #[test]
    fn test_engagement_motivation_mirrors_role() {
        let mut world = World::new();
        let config = SimulationConfig::default();
        let roles = vec![NodeRole::Staff, NodeRole::Resident];
        let mut rng = SmallRng::seed_from_u64(13);

        let index = spawn_agents(&mut world, &config, &roles, &mut rng).unwrap();
        assert!(!world.get::<Traits>(index.entity(0)).unwrap().se_motivated);
        assert!(world.get::<Traits>(index.entity(1)).unwrap().se_motivated);
    }
}
