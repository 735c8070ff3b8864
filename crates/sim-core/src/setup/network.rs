//! Network Construction
//!
//! Builds the directed contact graph for each topology mode and assigns
//! resident/staff roles from degree centrality.

use std::collections::BTreeSet;
use std::collections::VecDeque;

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::components::agent::NodeRole;
use crate::components::network::ContactGraph;
use crate::config::{SimulationConfig, Topology};
use crate::setup::centrality::{degree_centrality, rank_descending};
use crate::setup::SetupError;

/// Attempts at producing a connected small-world graph before giving up
const SMALL_WORLD_TRIES: usize = 100;

/// Build the contact graph and role assignment for the configured topology.
pub fn build_network(
    config: &SimulationConfig,
    rng: &mut SmallRng,
) -> Result<(ContactGraph, Vec<NodeRole>), SetupError> {
    let n = config.total_nodes();
    let edge_prob = config.avg_node_degree as f32 / n as f32;
    let mut graph = ContactGraph::with_nodes(n);

    match config.topology {
        Topology::UniformWeight => {
            for (u, v) in random_pairs(n, edge_prob, rng) {
                graph.add_edge(u, v, 1.0);
                graph.add_edge(v, u, 1.0);
            }
        }
        Topology::RandomWeight => {
            // Weights are level of trust; each direction gets its own draw
            for (u, v) in random_pairs(n, edge_prob, rng) {
                let forward: f32 = rng.gen();
                let backward: f32 = rng.gen();
                graph.add_edge(u, v, forward);
                graph.add_edge(v, u, backward);
            }
        }
        Topology::SmallWorld => {
            let edges =
                connected_watts_strogatz(n, config.avg_node_degree, edge_prob, rng)?;
            for (u, v) in edges {
                graph.add_edge(u, v, 1.0);
                graph.add_edge(v, u, 1.0);
            }
        }
    }

    let roles = assign_roles(&graph, config.staff_count(), rng);
    tracing::info!(
        nodes = n,
        edges = graph.edge_count(),
        topology = config.topology.as_str(),
        "built contact network"
    );
    Ok((graph, roles))
}

/// Undirected Erdos-Renyi pair list: each pair connected with `prob`.
fn random_pairs(n: usize, prob: f32, rng: &mut SmallRng) -> Vec<(usize, usize)> {
    let mut pairs = Vec::new();
    for u in 0..n {
        for v in (u + 1)..n {
            if rng.gen::<f32>() < prob {
                pairs.push((u, v));
            }
        }
    }
    pairs
}

/// Connected Watts-Strogatz graph: ring lattice of `k` nearest neighbors
/// with per-edge rewiring at `beta`, regenerated until connected.
fn connected_watts_strogatz(
    n: usize,
    k: usize,
    beta: f32,
    rng: &mut SmallRng,
) -> Result<Vec<(usize, usize)>, SetupError> {
    for _ in 0..SMALL_WORLD_TRIES {
        let edges = watts_strogatz(n, k, beta, rng);
        if is_connected(n, &edges) {
            return Ok(edges);
        }
    }
    Err(SetupError::Disconnected(SMALL_WORLD_TRIES))
}

/// One Watts-Strogatz draw. Each node starts joined to its k/2 nearest
/// neighbors on each side of the ring; each ring edge is rewired to a
/// uniformly chosen non-neighbor with probability `beta`.
fn watts_strogatz(n: usize, k: usize, beta: f32, rng: &mut SmallRng) -> Vec<(usize, usize)> {
    let half = k / 2;
    let mut adjacency: Vec<BTreeSet<usize>> = vec![BTreeSet::new(); n];

    for d in 1..=half {
        for u in 0..n {
            let v = (u + d) % n;
            if u != v {
                adjacency[u].insert(v);
                adjacency[v].insert(u);
            }
        }
    }

    for d in 1..=half {
        for u in 0..n {
            let v = (u + d) % n;
            if u == v || rng.gen::<f32>() >= beta {
                continue;
            }
            // A node tied to everyone has nowhere to rewire
            if adjacency[u].len() >= n - 1 {
                continue;
            }
            let w = loop {
                let candidate = rng.gen_range(0..n);
                if candidate != u && !adjacency[u].contains(&candidate) {
                    break candidate;
                }
            };
            adjacency[u].remove(&v);
            adjacency[v].remove(&u);
            adjacency[u].insert(w);
            adjacency[w].insert(u);
        }
    }

    let mut edges = Vec::new();
    for u in 0..n {
        for &v in adjacency[u].iter() {
            if v > u {
                edges.push((u, v));
            }
        }
    }
    edges
}

/// Breadth-first connectivity check over an undirected pair list.
fn is_connected(n: usize, edges: &[(usize, usize)]) -> bool {
    if n == 0 {
        return true;
    }
    let mut adjacency: Vec<Vec<usize>> = vec![Vec::new(); n];
    for &(u, v) in edges {
        adjacency[u].push(v);
        adjacency[v].push(u);
    }

    let mut visited = vec![false; n];
    let mut queue = VecDeque::new();
    visited[0] = true;
    queue.push_back(0);
    let mut seen = 1;
    while let Some(u) = queue.pop_front() {
        for &v in &adjacency[u] {
            if !visited[v] {
                visited[v] = true;
                seen += 1;
                queue.push_back(v);
            }
        }
    }
    seen == n
}

/// Assign roles: the exact staff count is sampled uniformly from the top
/// 2x-staff-count nodes by degree centrality; everyone else is a resident.
/// Roles never change after this.
pub fn assign_roles(graph: &ContactGraph, staff_count: usize, rng: &mut SmallRng) -> Vec<NodeRole> {
    let n = graph.node_count();
    let mut roles = vec![NodeRole::Resident; n];
    if staff_count == 0 {
        return roles;
    }

    let centrality = degree_centrality(graph);
    let ranked = rank_descending(&centrality);
    let pool_len = (staff_count * 2).min(n);
    let pool = &ranked[..pool_len];

    for &node in pool.choose_multiple(rng, staff_count) {
        roles[node] = NodeRole::Staff;
    }
    roles
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn test_config(topology: Topology) -> SimulationConfig {
        let mut config = SimulationConfig::default();
        config.num_residents = 30;
        config.staff_resident_ratio = 0.1;
        config.avg_node_degree = 6;
        config.topology = topology;
        config
    }

    #[test]
    fn test_uniform_weight_edges_are_reciprocated() {
        let config = test_config(Topology::UniformWeight);
        let mut rng = SmallRng::seed_from_u64(1);
        let (graph, _) = build_network(&config, &mut rng).unwrap();

        for (source, target, weight) in graph.edges() {
            assert_ne!(source, target, "self-loop found");
            assert!(graph.has_edge(target, source), "missing reciprocal edge");
            assert_eq!(weight, 1.0);
        }
        assert!(graph.edge_count() > 0);
    }

    #[test]
    fn test_random_weight_edges_in_unit_interval() {
        let config = test_config(Topology::RandomWeight);
        let mut rng = SmallRng::seed_from_u64(2);
        let (graph, _) = build_network(&config, &mut rng).unwrap();

        for (source, target, weight) in graph.edges() {
            assert!((0.0..1.0).contains(&weight));
            assert!(graph.has_edge(target, source));
            assert_ne!(source, target);
        }
    }

    #[test]
    fn test_small_world_is_connected_and_symmetric() {
        let config = test_config(Topology::SmallWorld);
        let mut rng = SmallRng::seed_from_u64(3);
        let (graph, _) = build_network(&config, &mut rng).unwrap();

        let undirected: Vec<(usize, usize)> = graph
            .edges()
            .filter(|(u, v, _)| u < v)
            .map(|(u, v, _)| (u, v))
            .collect();
        assert!(is_connected(graph.node_count(), &undirected));
        for (source, target, weight) in graph.edges() {
            assert!(graph.has_edge(target, source));
            assert_eq!(weight, 1.0);
        }
    }

    #[test]
    fn test_ring_lattice_degree_without_rewiring() {
        let mut rng = SmallRng::seed_from_u64(4);
        let edges = watts_strogatz(10, 4, 0.0, &mut rng);
        // 10 nodes, k = 4: exactly n * k / 2 undirected edges
        assert_eq!(edges.len(), 20);

        let mut degree = vec![0usize; 10];
        for (u, v) in edges {
            degree[u] += 1;
            degree[v] += 1;
        }
        assert!(degree.iter().all(|&d| d == 4));
    }

    #[test]
    fn test_staff_count_is_exact_and_high_centrality() {
        let config = test_config(Topology::UniformWeight);
        let mut rng = SmallRng::seed_from_u64(5);
        let (graph, roles) = build_network(&config, &mut rng).unwrap();

        let staff: Vec<usize> = roles
            .iter()
            .enumerate()
            .filter(|(_, r)| r.is_staff())
            .map(|(i, _)| i)
            .collect();
        assert_eq!(staff.len(), config.staff_count());

        // Staff must come from the top 2x-staff-count centrality band
        let ranked = rank_descending(&degree_centrality(&graph));
        let pool: Vec<usize> = ranked[..config.staff_count() * 2].to_vec();
        assert!(staff.iter().all(|node| pool.contains(node)));
    }

    #[test]
    fn test_build_is_deterministic_for_equal_seeds() {
        let config = test_config(Topology::RandomWeight);

        let mut rng_a = SmallRng::seed_from_u64(9);
        let (graph_a, roles_a) = build_network(&config, &mut rng_a).unwrap();
        let mut rng_b = SmallRng::seed_from_u64(9);
        let (graph_b, roles_b) = build_network(&config, &mut rng_b).unwrap();

        let edges_a: Vec<(usize, usize, f32)> = graph_a.edges().collect();
        let edges_b: Vec<(usize, usize, f32)> = graph_b.edges().collect();
        assert_eq!(edges_a, edges_b);
        assert_eq!(roles_a, roles_b);
    }

    #[test]
    fn test_is_connected() {
        assert!(is_connected(3, &[(0, 1), (1, 2)]));
        assert!(!is_connected(3, &[(0, 1)]));
    }
}
