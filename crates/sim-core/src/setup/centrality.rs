//! Centrality Measures
//!
//! Degree and betweenness centrality over the contact graph, used for role
//! assignment and misinformation seeding. Both are computed once at
//! construction; the hot loop never touches them.

use std::collections::VecDeque;

use crate::components::network::ContactGraph;

/// Degree centrality per node: (in-degree + out-degree) / (n - 1).
pub fn degree_centrality(graph: &ContactGraph) -> Vec<f32> {
    let n = graph.node_count();
    let mut degrees = vec![0usize; n];
    for (source, target, _) in graph.edges() {
        degrees[source] += 1;
        degrees[target] += 1;
    }
    if n < 2 {
        return vec![0.0; n];
    }
    let scale = 1.0 / (n - 1) as f32;
    degrees.iter().map(|&d| d as f32 * scale).collect()
}

/// Betweenness centrality per node (Brandes, unweighted shortest paths),
/// normalized over ordered pairs: 1 / ((n - 1)(n - 2)). Endpoints excluded.
pub fn betweenness_centrality(graph: &ContactGraph) -> Vec<f32> {
    let n = graph.node_count();
    let mut centrality = vec![0.0f64; n];

    for source in 0..n {
        // Single-source shortest paths by BFS
        let mut stack = Vec::with_capacity(n);
        let mut predecessors: Vec<Vec<usize>> = vec![Vec::new(); n];
        let mut path_counts = vec![0.0f64; n];
        let mut distance = vec![-1i64; n];
        let mut queue = VecDeque::new();

        path_counts[source] = 1.0;
        distance[source] = 0;
        queue.push_back(source);

        while let Some(v) = queue.pop_front() {
            stack.push(v);
            for edge in graph.out_neighbors(v) {
                let w = edge.target;
                if distance[w] < 0 {
                    distance[w] = distance[v] + 1;
                    queue.push_back(w);
                }
                if distance[w] == distance[v] + 1 {
                    path_counts[w] += path_counts[v];
                    predecessors[w].push(v);
                }
            }
        }

        // Dependency accumulation in reverse BFS order
        let mut dependency = vec![0.0f64; n];
        while let Some(w) = stack.pop() {
            for &v in &predecessors[w] {
                dependency[v] += path_counts[v] / path_counts[w] * (1.0 + dependency[w]);
            }
            if w != source {
                centrality[w] += dependency[w];
            }
        }
    }

    if n > 2 {
        let scale = 1.0 / ((n - 1) as f64 * (n - 2) as f64);
        for value in &mut centrality {
            *value *= scale;
        }
    }
    centrality.into_iter().map(|v| v as f32).collect()
}

/// Node ids ranked by descending score, ties broken by node id.
pub fn rank_descending(scores: &[f32]) -> Vec<usize> {
    let mut ranked: Vec<usize> = (0..scores.len()).collect();
    ranked.sort_by(|&a, &b| {
        scores[b]
            .partial_cmp(&scores[a])
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.cmp(&b))
    });
    ranked
}
