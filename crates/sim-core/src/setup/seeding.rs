//! Misinformation Seeding
//!
//! Picks the node that starts the run fully convinced, according to the
//! configured targeting strategy. Centralities are computed once here.

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;

use crate::components::agent::NodeRole;
use crate::components::network::ContactGraph;
use crate::config::SeedMode;
use crate::setup::centrality::{betweenness_centrality, degree_centrality, rank_descending};
use crate::setup::SetupError;

/// Choose the seed node for the given mode.
///
/// An empty candidate pool (e.g. no residents in the requested centrality
/// band) is a configuration error and fails loudly rather than seeding
/// elsewhere.
pub fn choose_seed_node(
    graph: &ContactGraph,
    roles: &[NodeRole],
    mode: SeedMode,
    rng: &mut SmallRng,
) -> Result<usize, SetupError> {
    let n = graph.node_count();
    let band = (n as f32 * 0.25).ceil() as usize;

    let pool: Vec<usize> = match mode {
        SeedMode::Random => (0..n).collect(),
        SeedMode::Staff => (0..n).filter(|&node| roles[node].is_staff()).collect(),
        SeedMode::HighBetweenness => {
            residents_in_band(&rank_descending(&betweenness_centrality(graph)), band, roles, true)
        }
        SeedMode::HighDegree => {
            residents_in_band(&rank_descending(&degree_centrality(graph)), band, roles, true)
        }
        SeedMode::PeripheralBetweenness => {
            residents_in_band(&rank_descending(&betweenness_centrality(graph)), band, roles, false)
        }
        SeedMode::PeripheralDegree => {
            residents_in_band(&rank_descending(&degree_centrality(graph)), band, roles, false)
        }
    };

    let node = pool
        .choose(rng)
        .copied()
        .ok_or(SetupError::EmptySeedPool(mode.as_str()))?;
    tracing::debug!(node, mode = mode.as_str(), "seeded misinformation");
    Ok(node)
}

/// Residents within the top (or bottom) `band` nodes of a centrality ranking.
fn residents_in_band(ranked: &[usize], band: usize, roles: &[NodeRole], top: bool) -> Vec<usize> {
    let band = band.min(ranked.len());
    let slice = if top {
        &ranked[..band]
    } else {
        &ranked[ranked.len() - band..]
    };
    slice
        .iter()
        .copied()
        .filter(|&node| !roles[node].is_staff())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    /// Reciprocated star: hub 0, four leaves
    fn star() -> ContactGraph {
        let mut graph = ContactGraph::with_nodes(5);
        for leaf in 1..5 {
            graph.add_edge(0, leaf, 1.0);
            graph.add_edge(leaf, 0, 1.0);
        }
        graph
    }

    #[test]
    fn test_staff_mode_picks_a_staff_node() {
        let graph = star();
        let roles = vec![
            NodeRole::Staff,
            NodeRole::Resident,
            NodeRole::Resident,
            NodeRole::Staff,
            NodeRole::Resident,
        ];
        for seed in 0..20 {
            let mut rng = SmallRng::seed_from_u64(seed);
            let node = choose_seed_node(&graph, &roles, SeedMode::Staff, &mut rng).unwrap();
            assert!(roles[node].is_staff());
        }
    }

    #[test]
    fn test_random_mode_allows_any_node() {
        let graph = star();
        let roles = vec![NodeRole::Resident; 5];
        let mut seen = std::collections::BTreeSet::new();
        for seed in 0..200 {
            let mut rng = SmallRng::seed_from_u64(seed);
            seen.insert(choose_seed_node(&graph, &roles, SeedMode::Random, &mut rng).unwrap());
        }
        assert_eq!(seen.len(), 5);
    }

    #[test]
    fn test_high_degree_mode_picks_top_band_resident() {
        let graph = star();
        let roles = vec![
            NodeRole::Resident,
            NodeRole::Resident,
            NodeRole::Resident,
            NodeRole::Resident,
            NodeRole::Resident,
        ];
        // band = ceil(5 * 0.25) = 2: hub plus the first leaf by tie-break
        let mut rng = SmallRng::seed_from_u64(1);
        let node = choose_seed_node(&graph, &roles, SeedMode::HighDegree, &mut rng).unwrap();
        assert!(node == 0 || node == 1);
    }

    #[test]
    fn test_peripheral_degree_mode_avoids_hub() {
        let graph = star();
        let roles = vec![NodeRole::Resident; 5];
        for seed in 0..20 {
            let mut rng = SmallRng::seed_from_u64(seed);
            let node =
                choose_seed_node(&graph, &roles, SeedMode::PeripheralDegree, &mut rng).unwrap();
            assert_ne!(node, 0, "peripheral mode must not pick the hub");
        }
    }

    #[test]
    fn test_empty_pool_is_fatal() {
        let graph = star();
        // No staff anywhere: staff mode has nothing to pick
        let roles = vec![NodeRole::Resident; 5];
        let mut rng = SmallRng::seed_from_u64(2);
        let result = choose_seed_node(&graph, &roles, SeedMode::Staff, &mut rng);
        assert!(matches!(result, Err(SetupError::EmptySeedPool("staff"))));
    }

    #[test]
    fn test_high_band_excludes_staff_only_band() {
        let graph = star();
        // The entire top band (hub + tie-break leaf) is staff
        let roles = vec![
            NodeRole::Staff,
            NodeRole::Staff,
            NodeRole::Resident,
            NodeRole::Resident,
            NodeRole::Resident,
        ];
        let mut rng = SmallRng::seed_from_u64(3);
        let result = choose_seed_node(&graph, &roles, SeedMode::HighDegree, &mut rng);
        assert!(matches!(result, Err(SetupError::EmptySeedPool(_))));
    }
}
