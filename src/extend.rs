//! Right-most extension: given one growing pattern and its projection,
//! enumerate every legal one-edge extension and the projection it would
//! produce (spec §4.E).
//!
//! Backward extensions may only originate at the rightmost vertex and
//! must land on another right-most-path vertex; forward extensions may
//! originate anywhere on the right-most path but must discover a fresh
//! vertex. This mirrors the teacher's `palm_tree.rs` DFS shape — explicit
//! visited bookkeeping, no `petgraph::visit` DFS wrapper — since the
//! pattern here is DFS-code-native rather than a petgraph graph.

use fixedbitset::FixedBitSet;
use hashbrown::{HashMap, HashSet};

use crate::dfscode::{DfsCode, EdgeCode};
use crate::embedding::SbgArena;
use crate::graph::{Graph, HostEdge, HostVertex};
use crate::label::LabelPolicy;
use crate::projection::Projection;

/// Reconstructs the pattern-vertex-id → host-vertex mapping for one
/// embedding, by replaying the DFS code against the embedding's host
/// edge chain. The first edge's orientation is disambiguated by vertex
/// label (an SBG chain node only remembers a host edge id, not which of
/// its two stored endpoints plays the `vi_from` role); every edge after
/// that has at least one already-mapped endpoint to anchor on.
fn vertex_map(
    code: &[EdgeCode],
    host: &Graph,
    chain: &[HostEdge],
) -> HashMap<usize, HostVertex> {
    let mut map: HashMap<usize, HostVertex> = HashMap::new();
    for (ec, &edge_id) in code.iter().zip(chain) {
        let (hs, ht) = host.edge_endpoints(edge_id);
        if map.is_empty() {
            if host.vertex_label(hs) == &ec.vl_from {
                map.insert(ec.vi_from, hs);
                map.insert(ec.vi_to, ht);
            } else {
                map.insert(ec.vi_from, ht);
                map.insert(ec.vi_to, hs);
            }
            continue;
        }
        if ec.is_forward() {
            let from_host = map[&ec.vi_from];
            let new_host = if hs == from_host { ht } else { hs };
            map.insert(ec.vi_to, new_host);
        }
    }
    map
}

/// Every legal one-edge extension of `code` under its `projection`,
/// grouped by the resulting [`EdgeCode`], each paired with the
/// projection it would produce. `arena` grows by one node per extended
/// embedding. `_policy` is accepted for symmetry with the rest of the
/// engine's signatures even though extension legality here depends only
/// on what [`Graph::incident_edges`] already filtered by orientation.
pub fn generate_candidates(
    code: &DfsCode,
    projection: &Projection,
    hosts: &[Graph],
    arena: &mut SbgArena,
    _policy: &dyn LabelPolicy,
) -> HashMap<EdgeCode, Projection> {
    let mut candidates: HashMap<EdgeCode, Projection> = HashMap::new();
    let rmpath = code.rightmost_path();
    let Some(&rightmost) = rmpath.first() else {
        return candidates;
    };
    let next_id = code.rightmost_vertex().unwrap() + 1;

    for &sbg in projection.members() {
        let host_id = arena.host(sbg);
        let host = &hosts[host_id];
        let chain = arena.edges(sbg);
        let map = vertex_map(code.as_slice(), host, &chain);
        let used_edges: HashSet<HostEdge> = chain.iter().copied().collect();
        // Visited-vertex tracking sized to the host, same shape as the
        // teacher's `palm_tree.rs` DFS uses a `FixedBitSet` over vertex
        // indices rather than a hash set.
        let mut mapped_hosts = FixedBitSet::with_capacity(host.vertex_count());
        for &hv in map.values() {
            mapped_hosts.insert(hv.index());
        }

        let rightmost_host = map[&rightmost];
        for &u in rmpath.iter().skip(1) {
            if code
                .as_slice()
                .iter()
                .any(|e| (e.vi_from == rightmost && e.vi_to == u) || (e.vi_from == u && e.vi_to == rightmost))
            {
                continue;
            }
            let u_host = map[&u];
            for (other, edge_id, el) in host.incident_edges(rightmost_host) {
                if other != u_host || used_edges.contains(&edge_id) {
                    continue;
                }
                let vl_from = host.vertex_label(rightmost_host).clone();
                let vl_to = host.vertex_label(u_host).clone();
                let ec = EdgeCode::new(rightmost, u, vl_from, el.clone(), vl_to);
                let new_sbg = arena.extend(sbg, edge_id);
                candidates.entry(ec).or_default().push(new_sbg);
            }
        }

        for &u in &rmpath {
            let u_host = map[&u];
            for (other_host, edge_id, el) in host.incident_edges(u_host) {
                if used_edges.contains(&edge_id) || mapped_hosts.contains(other_host.index()) {
                    continue;
                }
                let vl_from = host.vertex_label(u_host).clone();
                let vl_to = host.vertex_label(other_host).clone();
                let ec = EdgeCode::new(u, next_id, vl_from, el.clone(), vl_to);
                let new_sbg = arena.extend(sbg, edge_id);
                candidates.entry(ec).or_default().push(new_sbg);
            }
        }
    }

    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::label::{Label, UndirectedPolicy};
    use crate::projection::seed_projections;

    fn triangle() -> Graph {
        let mut g = Graph::new("G", false);
        let a = g.add_vertex(Label::concrete("A"));
        let b = g.add_vertex(Label::concrete("B"));
        let c = g.add_vertex(Label::concrete("C"));
        g.add_edge(a, b, Label::concrete("x"));
        g.add_edge(b, c, Label::concrete("x"));
        g.add_edge(c, a, Label::concrete("x"));
        g
    }

    #[test]
    fn one_edge_pattern_extends_to_path() {
        let hosts = vec![triangle()];
        let mut arena = SbgArena::new();
        let seeds = seed_projections(&hosts, &UndirectedPolicy, &mut arena);
        let key = (
            Label::concrete("A"),
            Label::concrete("x"),
            Label::concrete("B"),
        );
        let projection = seeds.get(&key).expect("seed should exist").clone();

        let mut code = DfsCode::new();
        code.push(EdgeCode::new(
            0,
            1,
            Label::concrete("A"),
            Label::concrete("x"),
            Label::concrete("B"),
        ));

        let candidates = generate_candidates(&code, &projection, &hosts, &mut arena, &UndirectedPolicy);
        assert!(!candidates.is_empty());
        assert!(
            candidates
                .keys()
                .any(|ec| ec.is_forward() && ec.vi_to == 2)
        );
    }

    #[test]
    fn closing_backward_edge_is_offered_on_triangle() {
        let hosts = vec![triangle()];
        let mut arena = SbgArena::new();
        let seeds = seed_projections(&hosts, &UndirectedPolicy, &mut arena);
        let key = (
            Label::concrete("A"),
            Label::concrete("x"),
            Label::concrete("B"),
        );
        let projection = seeds.get(&key).expect("seed should exist").clone();

        let mut code = DfsCode::new();
        code.push(EdgeCode::new(
            0,
            1,
            Label::concrete("A"),
            Label::concrete("x"),
            Label::concrete("B"),
        ));
        let forward = generate_candidates(&code, &projection, &hosts, &mut arena, &UndirectedPolicy);
        let (ec, next_projection) = forward
            .into_iter()
            .find(|(ec, _)| ec.is_forward() && ec.vi_to == 2)
            .expect("a forward extension to vertex 2 should exist");
        code.push(ec);

        let backward = generate_candidates(&code, &next_projection, &hosts, &mut arena, &UndirectedPolicy);
        assert!(backward.keys().any(|ec| ec.is_backward()));
    }
}
