//! Test-only fixture generation: random, connected, labeled transaction
//! graphs (spec §8's test plan). Grounded in the teacher's
//! `testing/random_graphs.rs`: build a spanning tree first (vertex `i`
//! attaches to a uniformly random earlier vertex `j < i`), then scatter
//! extra random edges, all seeded through `StdRng` for reproducibility.

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::graph::Graph;
use crate::label::Label;

/// One connected transaction graph with `n` vertices and at least `n - 1`
/// edges (more if `m > n - 1`), labels drawn uniformly from the given
/// alphabets.
pub fn random_transaction(
    name: impl Into<String>,
    n: usize,
    m: usize,
    directed: bool,
    vertex_alphabet: &[&str],
    edge_alphabet: &[&str],
    seed: u64,
) -> Graph {
    assert!(n > 0, "a transaction needs at least one vertex");
    let mut rng = StdRng::seed_from_u64(seed);
    let mut graph = Graph::new(name, directed);
    let mut vertices = Vec::with_capacity(n);

    for i in 0..n {
        let label = Label::concrete(vertex_alphabet[rng.random_range(0..vertex_alphabet.len())]);
        vertices.push(graph.add_vertex(label));
        if i > 0 {
            let j = rng.random_range(0..i);
            let el = Label::concrete(edge_alphabet[rng.random_range(0..edge_alphabet.len())]);
            graph.add_edge(vertices[i], vertices[j], el);
        }
    }

    for _ in n.saturating_sub(1)..m {
        let s = rng.random_range(0..n);
        let t = rng.random_range(0..n);
        let el = Label::concrete(edge_alphabet[rng.random_range(0..edge_alphabet.len())]);
        graph.add_edge(vertices[s], vertices[t], el);
    }

    graph
}

/// A database of `count` random transactions named `T0..T{count-1}`, one
/// independent seed per transaction derived from `seed`.
pub fn random_transactions(
    count: usize,
    n: usize,
    m: usize,
    directed: bool,
    vertex_alphabet: &[&str],
    edge_alphabet: &[&str],
    seed: u64,
) -> Vec<Graph> {
    (0..count)
        .map(|i| {
            random_transaction(
                format!("T{i}"),
                n,
                m,
                directed,
                vertex_alphabet,
                edge_alphabet,
                seed.wrapping_add(i as u64),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_transaction_is_connected_by_construction() {
        let g = random_transaction("T0", 6, 8, false, &["A", "B"], &["x", "y"], 42);
        assert_eq!(g.vertex_count(), 6);
        assert!(g.edge_count() >= 5);
    }

    #[test]
    fn same_seed_is_deterministic() {
        let g1 = random_transaction("T0", 6, 8, false, &["A", "B"], &["x", "y"], 7);
        let g2 = random_transaction("T0", 6, 8, false, &["A", "B"], &["x", "y"], 7);
        assert_eq!(g1.vertex_count(), g2.vertex_count());
        assert_eq!(g1.edge_count(), g2.edge_count());
    }

    #[test]
    fn random_transactions_builds_a_database() {
        let db = random_transactions(5, 4, 5, false, &["A"], &["x"], 1);
        assert_eq!(db.len(), 5);
        assert_eq!(db[0].name(), "T0");
        assert_eq!(db[4].name(), "T4");
    }
}
