//! Mining driver: depth-first canonical-extension search over the
//! right-most extension generator, pruned by support and by minimality
//! (spec §4.G, §6).
//!
//! The recursion shape — push an edge, recurse, pop it — is the same
//! explicit-stack DFS the teacher's `palm_tree.rs` uses, just over a
//! `DfsCode` instead of a petgraph graph.

use hashbrown::HashMap;
use log::{debug, info};

use crate::dfscode::{DfsCode, EdgeCode, cmp_edge_codes};
use crate::embedding::SbgArena;
use crate::error::{MiningError, Result};
use crate::extend::generate_candidates;
use crate::graph::Graph;
use crate::label::LabelPolicy;
use crate::minimal::is_minimum;
use crate::projection::{Projection, seed_projections};

/// Parameters governing one mining run.
pub struct MiningConfig<'a> {
    pub minsup: usize,
    /// Checked at every recursion entry; when it returns `true`, the
    /// current branch is abandoned without error (spec §5's cooperative
    /// cancellation hook). The CLI leaves this unset.
    pub should_cancel: Option<&'a dyn Fn() -> bool>,
}

impl<'a> MiningConfig<'a> {
    pub fn new(minsup: usize) -> Self {
        Self {
            minsup,
            should_cancel: None,
        }
    }
}

/// Mines every frequent connected subgraph pattern across `graphs`,
/// calling `visitor` once per pattern in its canonical DFS-code form
/// together with the projection (and the arena it indexes into) backing
/// it.
pub fn mine(
    graphs: &[Graph],
    config: &MiningConfig<'_>,
    policy: &dyn LabelPolicy,
    visitor: &mut dyn FnMut(&DfsCode, &Projection, &SbgArena),
) -> Result<()> {
    if config.minsup == 0 {
        return Err(MiningError::InvalidSupportThreshold {
            minsup: config.minsup,
            transaction_count: graphs.len(),
        });
    }

    // `minsup > graphs.len()` is not an error: no pattern can ever reach
    // that support, so every seed is pruned below and the run emits
    // nothing (spec §8's "minsup > |graphs| emits nothing" boundary).

    let mut arena = SbgArena::new();
    let seeds = seed_projections(graphs, policy, &mut arena);
    info!(
        "seeded {} one-edge candidate patterns from {} transactions",
        seeds.len(),
        graphs.len()
    );

    let mut keys: Vec<_> = seeds.keys().cloned().collect();
    keys.sort();

    let mut code = DfsCode::new();
    for key in keys {
        let projection = seeds.get(&key).expect("key came from this map").clone();
        if projection.support(&arena) < config.minsup {
            continue;
        }
        code.push(EdgeCode::new(0, 1, key.0, key.1, key.2));
        grow(graphs, &mut code, &projection, config, policy, &mut arena, visitor)?;
        code.pop();
    }

    Ok(())
}

fn grow(
    graphs: &[Graph],
    code: &mut DfsCode,
    projection: &Projection,
    config: &MiningConfig<'_>,
    policy: &dyn LabelPolicy,
    arena: &mut SbgArena,
    visitor: &mut dyn FnMut(&DfsCode, &Projection, &SbgArena),
) -> Result<()> {
    if let Some(cancel) = config.should_cancel {
        if cancel() {
            return Ok(());
        }
    }

    if !is_minimum(code, policy) {
        debug!("pruned non-canonical code of length {}", code.len());
        return Ok(());
    }

    visitor(code, projection, arena);

    let candidates = generate_candidates(code, projection, graphs, arena, policy);
    let mut sorted: Vec<EdgeCode> = candidates.keys().cloned().collect();
    sorted.sort_by(|a, b| cmp_edge_codes(a, b));

    let grouped: HashMap<EdgeCode, Projection> = candidates;
    for ec in sorted {
        let child_projection = grouped.get(&ec).expect("key came from this map").clone();
        if child_projection.support(arena) < config.minsup {
            continue;
        }
        code.push(ec);
        grow(graphs, code, &child_projection, config, policy, arena, visitor)?;
        code.pop();
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::label::{Label, UndirectedPolicy};

    fn single_edge(name: &str) -> Graph {
        let mut g = Graph::new(name, false);
        let a = g.add_vertex(Label::concrete("A"));
        let b = g.add_vertex(Label::concrete("A"));
        g.add_edge(a, b, Label::concrete("x"));
        g
    }

    fn triangle(name: &str) -> Graph {
        let mut g = Graph::new(name, false);
        let a = g.add_vertex(Label::concrete("A"));
        let b = g.add_vertex(Label::concrete("B"));
        let c = g.add_vertex(Label::concrete("C"));
        g.add_edge(a, b, Label::concrete("x"));
        g.add_edge(b, c, Label::concrete("x"));
        g.add_edge(c, a, Label::concrete("x"));
        g
    }

    #[test]
    fn singleton_scenario_emits_exactly_one_pattern() {
        let graphs = vec![single_edge("G1")];
        let config = MiningConfig::new(1);
        let mut found = Vec::new();
        mine(&graphs, &config, &UndirectedPolicy, &mut |code, projection, arena| {
            found.push((code.clone(), projection.support(arena)));
        })
        .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].0.len(), 1);
        assert_eq!(found[0].1, 1);
    }

    #[test]
    fn support_pruning_rejects_everything_below_threshold() {
        let mut g1 = Graph::new("G1", false);
        let a = g1.add_vertex(Label::concrete("A"));
        let b = g1.add_vertex(Label::concrete("B"));
        g1.add_edge(a, b, Label::concrete("x"));

        let mut g2 = Graph::new("G2", false);
        let a2 = g2.add_vertex(Label::concrete("A"));
        let b2 = g2.add_vertex(Label::concrete("B"));
        g2.add_edge(a2, b2, Label::concrete("y"));

        let graphs = vec![g1, g2];
        let config = MiningConfig::new(2);
        let mut found = Vec::new();
        mine(&graphs, &config, &UndirectedPolicy, &mut |code, _, _| {
            found.push(code.clone());
        })
        .unwrap();
        assert!(found.is_empty());
    }

    #[test]
    fn duplicate_triangle_pattern_is_not_emitted_twice() {
        let graphs = vec![triangle("G1"), triangle("G2")];
        let config = MiningConfig::new(2);
        let mut found: Vec<DfsCode> = Vec::new();
        mine(&graphs, &config, &UndirectedPolicy, &mut |code, _, _| {
            found.push(code.clone());
        })
        .unwrap();

        let triangles: Vec<_> = found.iter().filter(|c| c.len() == 3).collect();
        assert_eq!(triangles.len(), 1);
    }

    #[test]
    fn invalid_minsup_is_rejected() {
        let graphs = vec![single_edge("G1")];
        let config = MiningConfig::new(0);
        let result = mine(&graphs, &config, &UndirectedPolicy, &mut |_, _, _| {});
        assert!(result.is_err());
    }

    #[test]
    fn minsup_above_transaction_count_emits_nothing_without_erroring() {
        let graphs = vec![single_edge("G1")];
        let config = MiningConfig::new(2);
        let mut found = Vec::new();
        mine(&graphs, &config, &UndirectedPolicy, &mut |code, _, _| {
            found.push(code.clone());
        })
        .unwrap();
        assert!(found.is_empty());
    }
}
